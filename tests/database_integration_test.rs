// Service and endpoint tests against a real PostGIS database.
//
// Run with: DATABASE_URL=postgresql://... cargo test -- --ignored

mod common;

use chrono::NaiveDate;
use freezing_web::auth::JwtService;
use freezing_web::config::database::run_migrations;
use freezing_web::models::{GeoTrackFilter, TrackMapFilter};
use freezing_web::services::{LeaderboardService, PhotoService, StatsService, TrackService};
use pretty_assertions::assert_eq;
use serde_json::Value;
use serial_test::serial;
use sqlx::{Executor, PgPool};

use common::{init_test_logging, spawn_app, TEST_JWT_SECRET};

async fn seeded_pool() -> PgPool {
    init_test_logging();

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a PostGIS database");
    let pool = PgPool::connect(&url).await.expect("connect to test database");
    run_migrations(&pool).await.expect("apply reference schema");

    pool.execute(
        r#"
        TRUNCATE daily_scores, ride_photos, ride_tracks, ride_weather, rides, athletes, teams;

        INSERT INTO teams (id, name, leaderboard_exclude) VALUES
            (10, 'Ice Riders', FALSE),
            (20, 'Slush Puppies', FALSE),
            (30, 'Observers', TRUE);

        INSERT INTO athletes (id, team_id, display_name) VALUES
            (1, 10, 'Ada'),
            (2, 10, 'Bo'),
            (3, 20, 'Cy'),
            (4, 30, 'Di');

        INSERT INTO rides (id, athlete_id, name, start_date, timezone, private, moving_time, distance) VALUES
            (100, 1, 'Commute #BAFS', '2024-01-05 08:30:00', 'America/New_York', FALSE, 3600, 10.7),
            (101, 2, 'Coffee ride', '2024-01-06 09:00:00', 'America/New_York', FALSE, 1800, 5.2),
            (102, 3, 'Night loop', '2024-01-07 20:00:00', 'America/New_York', TRUE, 7200, 20.0),
            (103, 4, 'Observer spin', '2024-01-08 12:00:00', 'UTC', FALSE, 900, 3.0);

        INSERT INTO ride_weather (ride_id, ride_temp_avg, ride_rain, ride_snow) VALUES
            (100, 28.0, FALSE, TRUE),
            (101, 40.0, TRUE, FALSE),
            (102, 20.0, FALSE, FALSE);

        INSERT INTO ride_tracks (ride_id, gps_track, elevation_stream, time_stream) VALUES
            (100, ST_GeomFromText('LINESTRING(-77.03 38.89, -77.04 38.9)', 4326), '[10.0, 11.5]', '[0, 60]'),
            (101, ST_GeomFromText('LINESTRING(-77.1 38.8, -77.11 38.81, -78.5 39.9)', 4326), '[5.0, 6.0, 7.0]', '[0, 30, 90]'),
            (102, ST_GeomFromText('LINESTRING(-76.9 39.0, -76.91 39.01)', 4326), '[1.0, 2.0]', '[0, 10]');

        INSERT INTO ride_photos (id, source, ride_id, ref, caption, img_t, img_l, "primary") VALUES
            ('p-old', 2, 100, NULL, 'frosty', 't1', 'l1', TRUE),
            ('p-new', 2, 101, NULL, 'latte', 't2', 'l2', FALSE);

        INSERT INTO daily_scores (athlete_id, team_id, ride_date, distance, points) VALUES
            (1, 10, '2024-01-05', 10.7, 20.7),
            (2, 10, '2024-01-06', 5.2, 15.2),
            (3, 20, '2024-01-07', 20.0, 30.0),
            (3, 20, '2024-01-08', 2.0, 12.0),
            (4, 30, '2024-01-08', 3.0, 13.0);
        "#,
    )
    .await
    .expect("seed test data");

    pool
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostGIS database at DATABASE_URL"]
async fn test_general_stats() {
    let pool = seeded_pool().await;

    let stats = StatsService::new(pool).general_stats(2).await.unwrap();

    assert_eq!(stats.team_count, 2);
    assert_eq!(stats.contestant_count, 3);
    assert_eq!(stats.total_rides, 4);
    assert_eq!(stats.total_hours, 13500.0 / 3600.0);
    assert_eq!(stats.total_miles, 38);
    assert_eq!(stats.sub_freezing_hours, 3.0);
    assert_eq!(stats.rain_hours, 0.5);
    assert_eq!(stats.snow_hours, 1.0);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostGIS database at DATABASE_URL"]
async fn test_team_leaderboard() {
    let pool = seeded_pool().await;

    let standings = LeaderboardService::new(pool).team_leaderboard().await.unwrap();

    let teams: Vec<(i64, usize)> = standings.iter().map(|s| (s.team_id, s.rank)).collect();
    assert_eq!(teams, vec![(20, 1), (10, 2)]);

    assert_eq!(standings[0].total_score, 42.0);
    assert_eq!(standings[0].team_members[0].days_ridden, 2);

    let members: Vec<i64> = standings[1]
        .team_members
        .iter()
        .map(|m| m.athlete_id)
        .collect();
    assert_eq!(members, vec![1, 2]);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostGIS database at DATABASE_URL"]
async fn test_recent_photos() {
    let pool = seeded_pool().await;

    let photos = PhotoService::new(pool).recent_photos(20).await.unwrap();

    let ids: Vec<&str> = photos.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p-new", "p-old"]);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostGIS database at DATABASE_URL"]
async fn test_geo_tracks_filtering() {
    let pool = seeded_pool().await;
    let service = TrackService::new(pool);

    let all = service
        .geo_tracks(&GeoTrackFilter::default())
        .await
        .unwrap();
    // private ride 102 is excluded
    assert_eq!(all.coordinates.len(), 2);

    let team = service
        .geo_tracks(&GeoTrackFilter {
            team_id: Some(10),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 6).unwrap().and_hms_opt(0, 0, 0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(team.coordinates.len(), 1);
    assert_eq!(
        team.coordinates[0][2],
        (-78.5, 39.9, 7.0, "2024-01-06T09:01:30-05:00".to_string())
    );
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostGIS database at DATABASE_URL"]
async fn test_track_map_filters() {
    let pool = seeded_pool().await;
    let service = TrackService::new(pool);

    let all = service.track_map(&TrackMapFilter::default()).await.unwrap();
    // ride 101 splits in two, ride 100 stays whole; oldest first
    assert_eq!(all.tracks.len(), 3);
    assert_eq!(all.tracks[0].track.len(), 2);
    assert_eq!(all.tracks[0].team, 1);

    let tagged = service
        .track_map(&TrackMapFilter {
            hashtag: Some("BAFS".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(tagged.tracks.len(), 1);

    let mine = service
        .track_map(&TrackMapFilter {
            athlete_id: Some(3),
            include_private: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.tracks.len(), 1);
    assert_eq!(mine.tracks[0].team, 2);
}

#[tokio::test]
#[serial]
#[ignore = "requires a PostGIS database at DATABASE_URL"]
async fn test_my_trackmap_endpoint() {
    let pool = seeded_pool().await;
    let base = spawn_app(pool).await;
    let token = JwtService::new(TEST_JWT_SECRET).create_token(3).unwrap();

    let response = reqwest::Client::new()
        .get(format!("{base}/api/my/trackmap.json"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["tracks"][0]["track"][0], serde_json::json!([39.0, -76.9]));
}
