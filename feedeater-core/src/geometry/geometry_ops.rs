use geo::{
    BoundingRect, Centroid, ConvexHull, Coord, Distance, Haversine, Length, LineString,
    MultiPoint, Point, Polygon, Rect,
};
use itertools::Itertools;

/// decimal places kept for stored coordinates (about 1 meter).
pub const COORDINATE_PRECISION: i32 = 5;

pub fn haversine_distance(a: &Point<f64>, b: &Point<f64>) -> f64 {
    Haversine.distance(*a, *b)
}

pub fn line_length(line: &LineString<f64>) -> f64 {
    Haversine.length(line)
}

/// convex hull of a set of points. a single point or a straight run of points
/// produces a degenerate polygon.
pub fn convex_hull(points: &[Point<f64>]) -> Polygon<f64> {
    MultiPoint::from(points.to_vec()).convex_hull()
}

/// convex hull around two polygons.
pub fn merge_hulls(a: &Polygon<f64>, b: &Polygon<f64>) -> Polygon<f64> {
    let points = a
        .exterior()
        .points()
        .chain(b.exterior().points())
        .collect_vec();
    convex_hull(&points)
}

pub fn centroid(points: &[Point<f64>]) -> Option<Point<f64>> {
    MultiPoint::from(points.to_vec()).centroid()
}

pub fn bounding_box(points: &[Point<f64>]) -> Option<Rect<f64>> {
    MultiPoint::from(points.to_vec()).bounding_rect()
}

pub fn round_coord(coord: Coord<f64>) -> Coord<f64> {
    let scale = 10f64.powi(COORDINATE_PRECISION);
    Coord {
        x: (coord.x * scale).round() / scale,
        y: (coord.y * scale).round() / scale,
    }
}

pub fn round_line(line: &LineString<f64>) -> LineString<f64> {
    line.coords().map(|c| round_coord(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo::{coord, line_string, point, Contains};

    #[test]
    fn test_haversine_distance() {
        // one thousandth of a degree of latitude is about 111 meters
        let d = haversine_distance(&point!(x: -122.0, y: 37.0), &point!(x: -122.0, y: 37.001));
        assert_relative_eq!(d, 111.19, epsilon = 0.1);
    }

    #[test]
    fn test_merge_hulls_contains_both() {
        let a = convex_hull(&[
            point!(x: 0.0, y: 0.0),
            point!(x: 1.0, y: 0.0),
            point!(x: 0.0, y: 1.0),
        ]);
        let b = convex_hull(&[
            point!(x: 2.0, y: 2.0),
            point!(x: 3.0, y: 2.0),
            point!(x: 2.0, y: 3.0),
        ]);
        let merged = merge_hulls(&a, &b);
        assert!(merged.contains(&point!(x: 1.5, y: 1.5)));
        assert!(!a.contains(&point!(x: 1.5, y: 1.5)));
    }

    #[test]
    fn test_round_line() {
        let line = round_line(&line_string![(x: -122.123456, y: 37.000004)]);
        assert_eq!(line.0[0], coord! {x: -122.12346, y: 37.0});
        assert_relative_eq!(line_length(&line), 0.0);
    }
}
