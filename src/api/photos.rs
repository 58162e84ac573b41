use axum::{extract::State, response::Json, routing::get, Router};
use sqlx::PgPool;

use crate::api::ApiError;
use crate::models::PhotoListResponse;
use crate::services::{photo_service::RECENT_PHOTO_LIMIT, PhotoService};

pub fn photo_routes(db: PgPool) -> Router {
    Router::new()
        .route("/photos", get(list_photos))
        .with_state(PhotoService::new(db))
}

pub async fn list_photos(
    State(photo_service): State<PhotoService>,
) -> Result<Json<PhotoListResponse>, ApiError> {
    let photos = photo_service.recent_photos(RECENT_PHOTO_LIMIT).await?;
    Ok(Json(PhotoListResponse::from(photos)))
}
