// API routes and handlers

pub mod error;
pub mod health;
pub mod leaderboard;
pub mod params;
pub mod photos;
pub mod routes;
pub mod stats;
pub mod tracks;

pub use error::ApiError;
