use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RidePhoto {
    pub id: String,
    pub source: i32,
    pub ride_id: i64,
    #[sqlx(rename = "ref")]
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub caption: Option<String>,
    pub img_t: Option<String>,
    pub img_l: Option<String>,
    pub primary: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PhotoListResponse {
    pub result: Vec<RidePhoto>,
    pub count: usize,
}

impl From<Vec<RidePhoto>> for PhotoListResponse {
    fn from(result: Vec<RidePhoto>) -> Self {
        let count = result.len();
        Self { result, count }
    }
}
