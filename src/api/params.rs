use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::api::ApiError;

/// Tracks returned when the request does not ask for a limit.
pub const TRACK_LIMIT_DEFAULT: i64 = 1024;

/// Most tracks one request may ask for. Track assembly is expensive, so
/// larger requests are refused rather than clamped.
pub const TRACK_LIMIT_MAX: i64 = 2048;

#[derive(Debug, Default, Deserialize)]
pub struct GeoTrackQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackMapQuery {
    pub hashtag: Option<String>,
    pub limit: Option<String>,
}

/// Resolve the `limit` query parameter.
pub fn get_limit(raw: Option<&str>) -> Result<i64, ApiError> {
    let Some(raw) = raw else {
        return Ok(TRACK_LIMIT_DEFAULT);
    };

    let limit: i64 = raw
        .trim()
        .parse()
        .map_err(|_| ApiError::bad_request(format!("limit {raw:?} is not an integer")))?;

    if limit > TRACK_LIMIT_MAX {
        return Err(ApiError::bad_request(format!(
            "limit {limit} exceeds {TRACK_LIMIT_MAX}"
        )));
    }
    if limit < 0 {
        return Err(ApiError::bad_request(format!("limit {limit} is negative")));
    }

    Ok(limit)
}

/// Parse an ISO-8601 date or date-time into a naive timestamp. Offsets are
/// dropped and the wall-clock time kept, since ride start dates are stored
/// without a zone. Empty values count as absent.
pub fn parse_date_param(name: &str, raw: Option<&str>) -> Result<Option<NaiveDateTime>, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.naive_local()));
    }
    // offsets written without a colon, e.g. `+0000`
    for format in ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"] {
        if let Ok(at) = DateTime::parse_from_str(raw, format) {
            return Ok(Some(at.naive_local()));
        }
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(at));
        }
    }
    if let Some(midnight) = parse_calendar_date(raw).and_then(|date| date.and_hms_opt(0, 0, 0)) {
        return Ok(Some(midnight));
    }

    Err(ApiError::bad_request(format!(
        "{name} {raw:?} is not an ISO-8601 date"
    )))
}

/// `YYYY-MM-DD`, or a partial `YYYY-MM` / `YYYY` meaning the first day of
/// that month or year.
fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    let mut parts = raw.splitn(2, '-');
    let year = parts.next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = match parts.next() {
        Some(month) if month.len() == 2 && month.bytes().all(|b| b.is_ascii_digit()) => {
            month.parse().ok()?
        }
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}
