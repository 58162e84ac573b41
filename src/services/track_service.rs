use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDateTime, Offset, SecondsFormat, TimeZone};
use chrono_tz::Tz;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{instrument, warn};

use crate::geometry::{parse_linestring, split_track, LatLon, WktError, MAX_GAP_SQUARED};
use crate::models::{
    GeoPoint, GeoTrackFilter, MultiLineString, RideTrackRow, TeamTrack, TeamTrackRow, TrackMap,
    TrackMapFilter,
};

#[derive(Clone)]
pub struct TrackService {
    db: PgPool,
}

impl TrackService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Public ride tracks as a GeoJSON MultiLineString whose positions carry
    /// elevation and a local timestamp.
    #[instrument(skip(self))]
    pub async fn geo_tracks(&self, filter: &GeoTrackFilter) -> Result<MultiLineString> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT T.ride_id, ST_AsText(T.gps_track) AS gps_track_wkt,
                   T.elevation_stream, T.time_stream, R.start_date, R.timezone
            FROM ride_tracks T
            JOIN rides R ON R.id = T.ride_id
            JOIN athletes A ON A.id = R.athlete_id
            WHERE NOT R.private
            "#,
        );

        if let Some(team_id) = filter.team_id {
            query.push(" AND A.team_id = ").push_bind(team_id);
        }
        if let Some(start_date) = filter.start_date {
            query.push(" AND R.start_date >= ").push_bind(start_date);
        }
        if let Some(end_date) = filter.end_date {
            query.push(" AND R.start_date < ").push_bind(end_date);
        }
        query.push(" ORDER BY R.start_date DESC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let rows = query
            .build_query_as::<RideTrackRow>()
            .fetch_all(&self.db)
            .await?;

        tracing::debug!(rows = rows.len(), "loaded ride tracks");

        let coordinates = rows
            .iter()
            .map(|row| {
                geo_track_points(row)
                    .with_context(|| format!("invalid track for ride {}", row.ride_id))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MultiLineString::new(coordinates))
    }

    /// Compact `[lat, lon]` polylines tagged with a team index, split at
    /// large gaps.
    #[instrument(skip(self))]
    pub async fn track_map(&self, filter: &TrackMapFilter) -> Result<TrackMap> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            WITH team_idx(team_id, team_index) AS (
                SELECT id, ROW_NUMBER() OVER (ORDER BY id) FROM teams
            )
            SELECT ST_AsText(T.gps_track) AS gps_track_wkt, X.team_index
            FROM ride_tracks T
            JOIN rides R ON R.id = T.ride_id
            JOIN athletes A ON A.id = R.athlete_id
            JOIN team_idx X ON X.team_id = A.team_id
            WHERE TRUE
            "#,
        );

        if !filter.include_private {
            query.push(" AND NOT R.private");
        }
        if let Some(athlete_id) = filter.athlete_id {
            query.push(" AND A.id = ").push_bind(athlete_id);
        }
        if let Some(team_id) = filter.team_id {
            query.push(" AND A.team_id = ").push_bind(team_id);
        }
        if let Some(hashtag) = filter.hashtag.as_deref() {
            query.push(" AND R.name LIKE ").push_bind(hashtag_pattern(hashtag));
        }
        query.push(" ORDER BY R.start_date DESC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(limit);
        }

        let rows = query
            .build_query_as::<TeamTrackRow>()
            .fetch_all(&self.db)
            .await?;

        tracing::debug!(rows = rows.len(), "loaded team tracks");

        Ok(build_track_map(&rows)?)
    }
}

/// `LIKE` pattern matching ride names that mention `#hashtag`.
pub fn hashtag_pattern(hashtag: &str) -> String {
    format!("%#{hashtag}%")
}

/// Split every track at large gaps and tag each piece with its team.
///
/// Rows arrive newest first; the returned pieces are reversed so the map
/// draws the newest rides last.
pub fn build_track_map(rows: &[TeamTrackRow]) -> Result<TrackMap, WktError> {
    let mut tracks = Vec::new();

    for row in rows {
        let line = parse_linestring(&row.gps_track_wkt)?;
        let points = line.coords().map(|c| LatLon(c.y, c.x));

        tracks.extend(
            split_track(points, MAX_GAP_SQUARED)
                .into_iter()
                .map(|track| TeamTrack {
                    team: row.team_index,
                    track,
                }),
        );
    }

    tracks.reverse();
    Ok(TrackMap { tracks })
}

/// Turn one stored track into GeoJSON positions.
///
/// Streams shorter than the geometry cut the track short.
pub fn geo_track_points(row: &RideTrackRow) -> Result<Vec<GeoPoint>> {
    let line = parse_linestring(&row.gps_track_wkt)?;
    let tz = ride_timezone(row.ride_id, row.timezone.as_deref());

    let elevations = &row.elevation_stream.0;
    let times = &row.time_stream.0;
    let len = line.0.len().min(elevations.len()).min(times.len());
    if len < line.0.len() {
        warn!(
            ride_id = row.ride_id,
            points = line.0.len(),
            elevations = elevations.len(),
            times = times.len(),
            "ride streams shorter than track, truncating"
        );
    }

    line.coords()
        .zip(elevations.iter())
        .zip(times.iter())
        .map(|((coord, &elevation), &offset)| -> Result<GeoPoint> {
            let local = seconds(offset)
                .and_then(|delta| row.start_date.checked_add_signed(delta))
                .with_context(|| {
                    format!("ride {} time offset {offset} out of range", row.ride_id)
                })?;
            let at = localize(tz, local);
            Ok((
                coord.x,
                coord.y,
                elevation,
                at.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            ))
        })
        .collect()
}

fn seconds(offset: f64) -> Option<Duration> {
    if !offset.is_finite() {
        return None;
    }
    Duration::try_milliseconds((offset * 1000.0).round() as i64)
}

fn ride_timezone(ride_id: i64, name: Option<&str>) -> Tz {
    match name.map(str::parse::<Tz>) {
        Some(Ok(tz)) => tz,
        Some(Err(_)) | None => {
            warn!(ride_id, timezone = ?name, "unknown ride timezone, using UTC");
            Tz::UTC
        }
    }
}

/// Attach `tz` to a naive local time. Ambiguous times resolve to standard
/// time; times skipped by a DST jump keep the offset in effect just before.
pub fn localize(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    use chrono::LocalResult;

    match tz.from_local_datetime(&local) {
        LocalResult::Single(at) => at,
        LocalResult::Ambiguous(_, standard) => standard,
        LocalResult::None => {
            let offset = tz.offset_from_utc_datetime(&local).fix();
            tz.from_utc_datetime(&(local - offset))
        }
    }
}
