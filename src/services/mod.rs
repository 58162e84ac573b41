// Query and assembly logic behind the API

pub mod leaderboard_service;
pub mod photo_service;
pub mod stats_service;
pub mod track_service;

pub use leaderboard_service::LeaderboardService;
pub use photo_service::PhotoService;
pub use stats_service::StatsService;
pub use track_service::TrackService;
