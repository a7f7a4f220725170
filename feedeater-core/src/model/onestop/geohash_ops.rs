use geo::{Centroid, MultiPoint, Point};

use super::OnestopIdError;

/// longest geohash produced when fitting entity geometries.
pub const GEOHASH_MAX_PRECISION: usize = 10;

/// finds the most precise geohash whose cell contains every point.
///
/// this is the common prefix of each point's geohash at [`GEOHASH_MAX_PRECISION`].
/// points that share no prefix (e.g. on both sides of a top-level cell boundary)
/// fall back to the single-character geohash of their centroid.
pub fn fit(points: &[Point<f64>]) -> Result<String, OnestopIdError> {
    let hashes = points
        .iter()
        .map(|p| encode(p, GEOHASH_MAX_PRECISION))
        .collect::<Result<Vec<_>, _>>()?;
    let (first, rest) = hashes
        .split_first()
        .ok_or_else(|| OnestopIdError::MissingCoordinates(String::from("geohash fit")))?;
    let prefix_len = rest.iter().fold(first.len(), |len, hash| {
        first
            .chars()
            .zip(hash.chars())
            .take(len)
            .take_while(|(a, b)| a == b)
            .count()
    });
    if prefix_len > 0 {
        return Ok(first[..prefix_len].to_string());
    }
    let centroid = MultiPoint::from(points.to_vec())
        .centroid()
        .ok_or_else(|| OnestopIdError::MissingCoordinates(String::from("geohash fit")))?;
    encode(&centroid, 1)
}

pub fn encode(point: &Point<f64>, precision: usize) -> Result<String, OnestopIdError> {
    geohash::encode(point.0, precision)
        .map_err(|e| OnestopIdError::GeohashError(format!("{e:?} at point {point:?}")))
}

/// true if the value only contains characters of the geohash base32 alphabet.
pub fn is_geohash(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| "0123456789bcdefghjkmnpqrstuvwxyz".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Point};

    #[test]
    fn test_single_point_uses_max_precision() {
        let result = fit(&[Point::new(-122.4194, 37.7749)]).expect("should fit");
        assert_eq!(result.len(), GEOHASH_MAX_PRECISION);
        assert!(result.starts_with("9q8yy"));
    }

    #[test]
    fn test_fit_contains_all_points() {
        let points = vec![
            Point::new(-122.4194, 37.7749),
            Point::new(-122.4089, 37.7837),
            Point::new(-122.3942, 37.7765),
        ];
        let result = fit(&points).expect("should fit");
        assert!(result.len() < GEOHASH_MAX_PRECISION);
        let bbox = geohash::decode_bbox(&result).expect("valid geohash");
        for p in points.iter() {
            assert!(bbox.contains(p), "{result} should contain {p:?}");
        }
    }

    #[test]
    fn test_no_common_prefix_falls_back_to_centroid() {
        let points = vec![Point::new(-0.1, 51.5), Point::new(0.1, 51.5)];
        let result = fit(&points).expect("should fit");
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_empty_points_fails() {
        assert!(matches!(
            fit(&[]),
            Err(OnestopIdError::MissingCoordinates(_))
        ));
    }
}
