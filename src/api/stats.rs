use axum::{extract::State, response::Json, routing::get, Router};
use sqlx::PgPool;

use crate::api::ApiError;
use crate::models::GeneralStats;
use crate::services::StatsService;

#[derive(Clone)]
pub struct StatsAppState {
    pub stats_service: StatsService,
    pub team_count: usize,
}

pub fn stats_routes(db: PgPool, team_count: usize) -> Router {
    let shared_state = StatsAppState {
        stats_service: StatsService::new(db),
        team_count,
    };

    Router::new()
        .route("/stats/general", get(get_general_stats))
        .with_state(shared_state)
}

/// Competition-wide ride, hour and mileage totals
pub async fn get_general_stats(
    State(state): State<StatsAppState>,
) -> Result<Json<GeneralStats>, ApiError> {
    let stats = state.stats_service.general_stats(state.team_count).await?;
    Ok(Json(stats))
}
