use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::geometry::LatLon;

/// A stored ride track with the ride details needed to timestamp it.
#[derive(Debug, Clone, FromRow)]
pub struct RideTrackRow {
    pub ride_id: i64,
    pub gps_track_wkt: String,
    pub elevation_stream: Json<Vec<f64>>,
    pub time_stream: Json<Vec<f64>>,
    pub start_date: chrono::NaiveDateTime,
    pub timezone: Option<String>,
}

/// One GeoJSON position: longitude, latitude, elevation and a local
/// ISO-8601 timestamp.
pub type GeoPoint = (f64, f64, f64, String);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultiLineString {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Vec<GeoPoint>>,
}

impl MultiLineString {
    pub fn new(coordinates: Vec<Vec<GeoPoint>>) -> Self {
        Self {
            kind: "MultiLineString".to_string(),
            coordinates,
        }
    }
}

/// A ride track as WKT together with its owner's team index.
#[derive(Debug, Clone, FromRow)]
pub struct TeamTrackRow {
    pub gps_track_wkt: String,
    pub team_index: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TeamTrack {
    pub team: i64,
    pub track: Vec<LatLon>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrackMap {
    pub tracks: Vec<TeamTrack>,
}

/// Which ride tracks go into a GeoJSON response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoTrackFilter {
    pub team_id: Option<i64>,
    pub start_date: Option<chrono::NaiveDateTime>,
    pub end_date: Option<chrono::NaiveDateTime>,
    pub limit: Option<i64>,
}

/// Which ride tracks go into a track map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackMapFilter {
    pub team_id: Option<i64>,
    pub athlete_id: Option<i64>,
    pub include_private: bool,
    pub hashtag: Option<String>,
    pub limit: Option<i64>,
}
