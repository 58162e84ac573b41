use axum::{routing::get, Router};
use sqlx::PgPool;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::health::health_check;
use super::leaderboard::leaderboard_routes;
use super::photos::photo_routes;
use super::stats::stats_routes;
use super::tracks::{geojson_routes, track_map_routes};
use crate::auth::{cors_layer, JwtService};
use crate::config::AppConfig;

pub fn create_routes(db: PgPool, config: &AppConfig) -> Router {
    let jwt_service = JwtService::new(&config.jwt_secret);

    // Read-only views other sites may embed
    let cross_domain = Router::new()
        .merge(stats_routes(db.clone(), config.competition_teams.len()))
        .merge(photo_routes(db.clone()))
        .merge(leaderboard_routes(db.clone()))
        .merge(geojson_routes(db.clone()))
        .layer(cors_layer());

    let api = cross_domain.merge(track_map_routes(db, jwt_service));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
