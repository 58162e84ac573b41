// Response and row types for the leaderboard API

pub mod leaderboard;
pub mod photo;
pub mod stats;
pub mod track;

pub use leaderboard::*;
pub use photo::*;
pub use stats::*;
pub use track::*;
