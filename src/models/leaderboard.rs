use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Points and distance summed over a team's daily scores.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TeamScoreRow {
    pub team_id: i64,
    pub team_name: String,
    pub total_score: f64,
    pub total_distance: f64,
}

/// Points, distance and riding days summed over one athlete's daily scores.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct AthleteScoreRow {
    pub athlete_id: i64,
    pub team_id: Option<i64>,
    pub athlete_name: String,
    pub total_score: f64,
    pub total_distance: f64,
    pub days_ridden: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    pub athlete_id: i64,
    pub athlete_name: String,
    pub total_score: f64,
    pub total_distance: f64,
    pub days_ridden: i64,
}

impl From<AthleteScoreRow> for TeamMember {
    fn from(row: AthleteScoreRow) -> Self {
        Self {
            athlete_id: row.athlete_id,
            athlete_name: row.athlete_name,
            total_score: row.total_score,
            total_distance: row.total_distance,
            days_ridden: row.days_ridden,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamStanding {
    pub team_name: String,
    pub total_score: f64,
    pub total_distance: f64,
    pub team_id: i64,
    /// 1-based position, best score first.
    pub rank: usize,
    pub team_members: Vec<TeamMember>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamLeaderboardResponse {
    pub leaderboard: Vec<TeamStanding>,
}
