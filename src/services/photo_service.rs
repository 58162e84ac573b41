use anyhow::Result;
use sqlx::PgPool;
use tracing::instrument;

use crate::models::RidePhoto;

/// Number of photos returned by the photo feed.
pub const RECENT_PHOTO_LIMIT: i64 = 20;

#[derive(Clone)]
pub struct PhotoService {
    db: PgPool,
}

impl PhotoService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Photos from the most recently started rides first.
    #[instrument(skip(self))]
    pub async fn recent_photos(&self, limit: i64) -> Result<Vec<RidePhoto>> {
        let photos = sqlx::query_as::<_, RidePhoto>(
            r#"
            SELECT P.id, P.source, P.ride_id, P.ref, P.caption, P.img_t, P.img_l, P."primary"
            FROM ride_photos P
            JOIN rides R ON R.id = P.ride_id
            ORDER BY R.start_date DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(photos)
    }
}
