use anyhow::Result;
use sqlx::PgPool;
use tracing::instrument;

use crate::models::{GeneralStats, RideTotals};

#[derive(Clone)]
pub struct StatsService {
    db: PgPool,
}

impl StatsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Competition-wide totals. `team_count` comes from configuration rather
    /// than the database so that observer teams are not counted.
    #[instrument(skip(self))]
    pub async fn general_stats(&self, team_count: usize) -> Result<GeneralStats> {
        let contestant_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) AS num_contestants FROM lbd_athletes")
                .fetch_one(&self.db)
                .await?;

        let (total_rides, moving_time, distance): (i64, i64, f64) = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS num_rides,
                   COALESCE(SUM(R.moving_time), 0)::BIGINT AS moving_time,
                   COALESCE(SUM(R.distance), 0)::FLOAT8 AS distance
            FROM rides R
            "#,
        )
        .fetch_one(&self.db)
        .await?;

        let sub_freezing = self.weather_totals("W.ride_temp_avg < 32").await?;
        let rain = self.weather_totals("W.ride_rain").await?;
        let snow = self.weather_totals("W.ride_snow").await?;

        let all = RideTotals {
            num_rides: total_rides,
            moving_time,
        };

        Ok(GeneralStats {
            team_count,
            contestant_count,
            total_rides,
            total_hours: all.hours(),
            total_miles: distance.trunc() as i64,
            rain_hours: rain.hours(),
            snow_hours: snow.hours(),
            sub_freezing_hours: sub_freezing.hours(),
        })
    }

    /// Totals over rides whose weather matches `condition`. The condition is
    /// one of a fixed set of literals, never user input.
    async fn weather_totals(&self, condition: &'static str) -> Result<RideTotals> {
        let query = format!(
            r#"
            SELECT COUNT(*) AS num_rides,
                   COALESCE(SUM(R.moving_time), 0)::BIGINT AS moving_time
            FROM rides R
            JOIN ride_weather W ON W.ride_id = R.id
            WHERE {condition}
            "#
        );

        let totals = sqlx::query_as::<_, RideTotals>(&query)
            .fetch_one(&self.db)
            .await?;

        tracing::debug!(condition, rides = totals.num_rides, "weather totals");
        Ok(totals)
    }
}
