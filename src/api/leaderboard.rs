use axum::{extract::State, response::Json, routing::get, Router};
use sqlx::PgPool;

use crate::api::ApiError;
use crate::models::TeamLeaderboardResponse;
use crate::services::LeaderboardService;

pub fn leaderboard_routes(db: PgPool) -> Router {
    Router::new()
        .route("/leaderboard/team", get(get_team_leaderboard))
        .with_state(LeaderboardService::new(db))
}

/// Teams by total points with their members, best first
pub async fn get_team_leaderboard(
    State(leaderboard_service): State<LeaderboardService>,
) -> Result<Json<TeamLeaderboardResponse>, ApiError> {
    let leaderboard = leaderboard_service.team_leaderboard().await?;
    Ok(Json(TeamLeaderboardResponse { leaderboard }))
}
