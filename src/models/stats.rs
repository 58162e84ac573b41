use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Ride count and total moving time for some subset of rides.
#[derive(Debug, Clone, Copy, Default, PartialEq, FromRow)]
pub struct RideTotals {
    pub num_rides: i64,
    pub moving_time: i64,
}

impl RideTotals {
    pub fn hours(&self) -> f64 {
        self.moving_time as f64 / 3600.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralStats {
    pub team_count: usize,
    pub contestant_count: i64,
    pub total_rides: i64,
    pub total_hours: f64,
    pub total_miles: i64,
    pub rain_hours: f64,
    pub snow_hours: f64,
    pub sub_freezing_hours: f64,
}
