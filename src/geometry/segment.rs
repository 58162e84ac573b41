use serde::Serialize;

/// Largest squared planar distance, in degrees², allowed between two
/// consecutive points of one segment. Roughly six miles on a flat earth.
pub const MAX_GAP_SQUARED: f64 = 0.01;

/// A point as the track map expects it: `[lat, lon]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

/// Crude squared distance between two points, treating degrees as planar.
pub fn distance_squared(a: LatLon, b: LatLon) -> f64 {
    let d0 = a.0 - b.0;
    let d1 = a.1 - b.1;
    d0 * d0 + d1 * d1
}

/// Split a track into segments wherever consecutive points are further
/// apart than `max_gap_squared`, which breaks up flights and train legs.
///
/// Always returns at least one segment, possibly empty.
pub fn split_track<I>(points: I, max_gap_squared: f64) -> Vec<Vec<LatLon>>
where
    I: IntoIterator<Item = LatLon>,
{
    let mut segments = vec![Vec::new()];
    let mut previous: Option<LatLon> = None;

    for point in points {
        if let Some(prev) = previous {
            if distance_squared(point, prev) > max_gap_squared {
                segments.push(Vec::new());
            }
        }
        previous = Some(point);
        if let Some(current) = segments.last_mut() {
            current.push(point);
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_squared() {
        assert_eq!(distance_squared(LatLon(0.0, 0.0), LatLon(0.3, 0.4)), 0.25);
        assert_eq!(distance_squared(LatLon(1.0, 1.0), LatLon(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_continuous_track_is_one_segment() {
        let points = vec![LatLon(38.90, -77.03), LatLon(38.91, -77.04), LatLon(38.92, -77.05)];
        let segments = split_track(points.clone(), MAX_GAP_SQUARED);

        assert_eq!(segments, vec![points]);
    }

    #[test]
    fn test_split_when_gap_exceeds_threshold() {
        // 0.2 degrees of latitude -> 0.04 squared
        let points = vec![
            LatLon(38.90, -77.03),
            LatLon(38.91, -77.03),
            LatLon(39.11, -77.03),
            LatLon(39.12, -77.03),
        ];
        let segments = split_track(points, MAX_GAP_SQUARED);

        assert_eq!(
            segments,
            vec![
                vec![LatLon(38.90, -77.03), LatLon(38.91, -77.03)],
                vec![LatLon(39.11, -77.03), LatLon(39.12, -77.03)],
            ]
        );
    }

    #[test]
    fn test_gap_just_under_threshold_does_not_split() {
        // 0.09 degrees -> 0.0081 squared
        let points = vec![LatLon(0.0, 0.0), LatLon(0.0, 0.09), LatLon(0.0, 0.18)];
        let segments = split_track(points, MAX_GAP_SQUARED);

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 3);
    }

    #[test]
    fn test_every_jump_starts_a_new_segment() {
        let points = vec![LatLon(0.0, 0.0), LatLon(1.0, 0.0), LatLon(2.0, 0.0)];
        let segments = split_track(points, MAX_GAP_SQUARED);

        assert_eq!(
            segments,
            vec![vec![LatLon(0.0, 0.0)], vec![LatLon(1.0, 0.0)], vec![LatLon(2.0, 0.0)]]
        );
    }

    #[test]
    fn test_empty_track_yields_one_empty_segment() {
        let segments = split_track(Vec::new(), MAX_GAP_SQUARED);
        assert_eq!(segments, vec![Vec::<LatLon>::new()]);
    }
}
