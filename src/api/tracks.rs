use axum::{
    extract::{Path, Query, State},
    middleware,
    response::Json,
    routing::get,
    Extension, Router,
};
use sqlx::PgPool;
use tracing::info;

use crate::api::params::{get_limit, parse_date_param, GeoTrackQuery, TrackMapQuery};
use crate::api::ApiError;
use crate::auth::{jwt_auth_middleware, AthleteSession, JwtService};
use crate::models::{GeoTrackFilter, MultiLineString, TrackMap, TrackMapFilter};
use crate::services::TrackService;

pub fn geojson_routes(db: PgPool) -> Router {
    Router::new()
        .route("/all/tracks.geojson", get(geo_tracks_all))
        .route("/teams/:team_id/tracks.geojson", get(geo_tracks_team))
        .with_state(TrackService::new(db))
}

pub fn track_map_routes(db: PgPool, jwt_service: JwtService) -> Router {
    let track_service = TrackService::new(db);

    let authenticated = Router::new()
        .route("/my/trackmap.json", get(track_map_my))
        .route_layer(middleware::from_fn_with_state(
            jwt_service,
            jwt_auth_middleware,
        ))
        .with_state(track_service.clone());

    Router::new()
        .route("/all/trackmap.json", get(track_map_all))
        .route("/teams/:team_id/trackmap.json", get(track_map_team))
        .with_state(track_service)
        .merge(authenticated)
}

fn geo_filter(query: &GeoTrackQuery, team_id: Option<i64>) -> Result<GeoTrackFilter, ApiError> {
    Ok(GeoTrackFilter {
        team_id,
        start_date: parse_date_param("start_date", query.start_date.as_deref())?,
        end_date: parse_date_param("end_date", query.end_date.as_deref())?,
        limit: Some(get_limit(query.limit.as_deref())?),
    })
}

/// GPS tracks of all public rides
pub async fn geo_tracks_all(
    State(track_service): State<TrackService>,
    Query(query): Query<GeoTrackQuery>,
) -> Result<Json<MultiLineString>, ApiError> {
    info!("Fetching gps tracks");

    let filter = geo_filter(&query, None)?;
    Ok(Json(track_service.geo_tracks(&filter).await?))
}

/// GPS tracks of one team's public rides
pub async fn geo_tracks_team(
    State(track_service): State<TrackService>,
    Path(team_id): Path<i64>,
    Query(query): Query<GeoTrackQuery>,
) -> Result<Json<MultiLineString>, ApiError> {
    info!(team_id, "Fetching gps tracks for team");

    let filter = geo_filter(&query, Some(team_id))?;
    Ok(Json(track_service.geo_tracks(&filter).await?))
}

pub async fn track_map_all(
    State(track_service): State<TrackService>,
    Query(query): Query<TrackMapQuery>,
) -> Result<Json<TrackMap>, ApiError> {
    let filter = TrackMapFilter {
        hashtag: query.hashtag.filter(|tag| !tag.is_empty()),
        limit: Some(get_limit(query.limit.as_deref())?),
        ..Default::default()
    };

    Ok(Json(track_service.track_map(&filter).await?))
}

/// The caller's own rides, private ones included
pub async fn track_map_my(
    State(track_service): State<TrackService>,
    Extension(session): Extension<AthleteSession>,
    Query(query): Query<TrackMapQuery>,
) -> Result<Json<TrackMap>, ApiError> {
    let filter = TrackMapFilter {
        athlete_id: Some(session.athlete_id),
        include_private: true,
        limit: Some(get_limit(query.limit.as_deref())?),
        ..Default::default()
    };

    Ok(Json(track_service.track_map(&filter).await?))
}

pub async fn track_map_team(
    State(track_service): State<TrackService>,
    Path(team_id): Path<i64>,
    Query(query): Query<TrackMapQuery>,
) -> Result<Json<TrackMap>, ApiError> {
    let filter = TrackMapFilter {
        team_id: Some(team_id),
        limit: Some(get_limit(query.limit.as_deref())?),
        ..Default::default()
    };

    Ok(Json(track_service.track_map(&filter).await?))
}
