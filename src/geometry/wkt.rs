use geo::{Coord, LineString};
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum WktError {
    #[error("not a LINESTRING: {0}")]
    NotALineString(String),
    #[error("invalid coordinate {0:?}")]
    InvalidCoordinate(String),
}

fn linestring_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^\s*LINESTRING\s*(?:ZM|Z|M)?\s*(?:\((.*)\)|(EMPTY))\s*$")
            .expect("static regex")
    })
}

/// Parse a WKT `LINESTRING` into x/y (lon/lat) coordinates.
///
/// Extra ordinates (Z, M) are accepted and dropped.
pub fn parse_linestring(wkt: &str) -> Result<LineString<f64>, WktError> {
    let captures = linestring_regex()
        .captures(wkt)
        .ok_or_else(|| WktError::NotALineString(truncate(wkt)))?;

    let Some(body) = captures.get(1) else {
        return Ok(LineString::new(Vec::new()));
    };

    let mut coords = Vec::new();
    for pair in body.as_str().split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }

        let mut ordinates = pair.split_whitespace().map(str::parse::<f64>);
        match (ordinates.next(), ordinates.next()) {
            (Some(Ok(x)), Some(Ok(y))) => coords.push(Coord { x, y }),
            _ => return Err(WktError::InvalidCoordinate(pair.to_string())),
        }
    }

    Ok(LineString::new(coords))
}

fn truncate(wkt: &str) -> String {
    wkt.chars().take(40).collect()
}
