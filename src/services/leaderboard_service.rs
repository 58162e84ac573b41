use anyhow::Result;
use sqlx::PgPool;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::instrument;

use crate::models::{AthleteScoreRow, TeamMember, TeamScoreRow, TeamStanding};

#[derive(Clone)]
pub struct LeaderboardService {
    db: PgPool,
}

impl LeaderboardService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn team_leaderboard(&self) -> Result<Vec<TeamStanding>> {
        let teams = sqlx::query_as::<_, TeamScoreRow>(
            r#"
            SELECT T.id AS team_id, T.name AS team_name,
                   COALESCE(SUM(DS.points), 0)::FLOAT8 AS total_score,
                   COALESCE(SUM(DS.distance), 0)::FLOAT8 AS total_distance
            FROM daily_scores DS
            JOIN teams T ON T.id = DS.team_id
            WHERE NOT T.leaderboard_exclude
            GROUP BY T.id, T.name
            ORDER BY total_score DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        let athletes = sqlx::query_as::<_, AthleteScoreRow>(
            r#"
            SELECT A.id AS athlete_id, A.team_id, A.display_name AS athlete_name,
                   COALESCE(SUM(DS.points), 0)::FLOAT8 AS total_score,
                   COALESCE(SUM(DS.distance), 0)::FLOAT8 AS total_distance,
                   COUNT(DS.points) AS days_ridden
            FROM daily_scores DS
            JOIN lbd_athletes A ON A.id = DS.athlete_id
            GROUP BY A.id, A.team_id, A.display_name
            ORDER BY total_score DESC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        tracing::debug!(
            teams = teams.len(),
            athletes = athletes.len(),
            "loaded daily score totals"
        );

        Ok(rank_teams(teams, athletes))
    }
}

fn by_score_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Order teams by score, best first, number them from 1 and attach each
/// team's members, also best first. Ties keep their input order. Athletes
/// whose team is not in `teams` are dropped.
pub fn rank_teams(
    mut teams: Vec<TeamScoreRow>,
    athletes: Vec<AthleteScoreRow>,
) -> Vec<TeamStanding> {
    let mut members_by_team: HashMap<i64, Vec<TeamMember>> = HashMap::new();
    for athlete in athletes {
        if let Some(team_id) = athlete.team_id {
            members_by_team
                .entry(team_id)
                .or_default()
                .push(TeamMember::from(athlete));
        }
    }

    teams.sort_by(|a, b| by_score_desc(a.total_score, b.total_score));

    teams
        .into_iter()
        .enumerate()
        .map(|(index, team)| {
            let mut team_members = members_by_team.remove(&team.team_id).unwrap_or_default();
            team_members.sort_by(|a, b| by_score_desc(a.total_score, b.total_score));

            TeamStanding {
                team_name: team.team_name,
                total_score: team.total_score,
                total_distance: team.total_distance,
                team_id: team.team_id,
                rank: index + 1,
                team_members,
            }
        })
        .collect()
}
