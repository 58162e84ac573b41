// Ride track geometry helpers

pub mod segment;
pub mod wkt;

pub use segment::{distance_squared, split_track, LatLon, MAX_GAP_SQUARED};
pub use wkt::{parse_linestring, WktError};
