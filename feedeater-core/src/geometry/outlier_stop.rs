use geo::{Closest, ClosestPoint, LineString, Point};

use super::geometry_ops;

/// stops farther than this from their pattern's line are reported.
pub const OUTLIER_STOP_THRESHOLD_METERS: f64 = 100.0;

/// true if the stop lies more than [`OUTLIER_STOP_THRESHOLD_METERS`] from the
/// closest point on the line.
pub fn is_outlier_stop(line: &LineString<f64>, stop: &Point<f64>) -> bool {
    match line.closest_point(stop) {
        Closest::Intersection(p) | Closest::SinglePoint(p) => {
            geometry_ops::haversine_distance(&p, stop) > OUTLIER_STOP_THRESHOLD_METERS
        }
        Closest::Indeterminate => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_outlier_stop;
    use geo::{line_string, point};

    #[test]
    fn test_outlier() {
        let line = line_string![(x: -122.0, y: 37.0), (x: -122.0, y: 37.01)];
        assert!(!is_outlier_stop(&line, &point!(x: -122.0001, y: 37.005)));
        // 0.002 degrees of longitude at 37N is about 178 meters
        assert!(is_outlier_stop(&line, &point!(x: -122.002, y: 37.005)));
    }
}
