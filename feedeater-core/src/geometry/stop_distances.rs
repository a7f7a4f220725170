use geo::{Coord, LineString, Point};
use itertools::Itertools;

use super::{geometry_ops, GeometryError};

/// distance in meters along `line` of each stop, in trip order.
///
/// each stop is projected onto the nearest segment at or after the segment of
/// the previous stop, so that loops and out-and-back patterns are walked in
/// order. distances never decrease and never exceed the length of the line.
pub fn calculate_distances(
    line: &LineString<f64>,
    stops: &[Point<f64>],
) -> Result<Vec<f64>, GeometryError> {
    let coords = line.coords().copied().dedup().collect_vec();
    if coords.len() < 2 {
        return Err(GeometryError::LineTooShort(coords.len()));
    }
    let mut cumulative = Vec::with_capacity(coords.len());
    let mut total = 0.0;
    cumulative.push(total);
    for (a, b) in coords.iter().tuple_windows() {
        total += geometry_ops::haversine_distance(&Point::from(*a), &Point::from(*b));
        cumulative.push(total);
    }

    let mut distances = Vec::with_capacity(stops.len());
    let mut segment = 0;
    let mut fraction = 0.0;
    for stop in stops {
        let (best_segment, best_fraction) = (segment..coords.len() - 1)
            .map(|i| {
                let min_t = if i == segment { fraction } else { 0.0 };
                let (t, d) = project(coords[i], coords[i + 1], stop.0, min_t);
                (i, t, d)
            })
            .min_by(|(_, _, d1), (_, _, d2)| d1.total_cmp(d2))
            .map(|(i, t, _)| (i, t))
            .unwrap_or((segment, fraction));
        segment = best_segment;
        fraction = best_fraction;
        let t = fraction;

        let start = coords[segment];
        let end = coords[segment + 1];
        let projected = Coord {
            x: start.x + t * (end.x - start.x),
            y: start.y + t * (end.y - start.y),
        };
        let along = cumulative[segment]
            + geometry_ops::haversine_distance(&Point::from(start), &Point::from(projected));
        let previous = distances.last().copied().unwrap_or(0.0);
        distances.push(along.max(previous).min(total));
    }
    Ok(distances)
}

/// projects `p` onto segment `a`-`b` in a local equirectangular plane, scaling
/// longitude by the cosine of latitude. the projection is kept at or beyond
/// `min_t`. returns the fraction along the segment and the squared planar
/// distance to the projection.
fn project(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>, min_t: f64) -> (f64, f64) {
    let scale = a.y.to_radians().cos();
    let (ax, ay) = (a.x * scale, a.y);
    let (bx, by) = (b.x * scale, b.y);
    let (px, py) = (p.x * scale, p.y);
    let (dx, dy) = (bx - ax, by - ay);
    let length_squared = dx * dx + dy * dy;
    let t = if length_squared == 0.0 {
        min_t
    } else {
        (((px - ax) * dx + (py - ay) * dy) / length_squared).clamp(min_t, 1.0)
    };
    let (qx, qy) = (ax + t * dx, ay + t * dy);
    (t, (px - qx).powi(2) + (py - qy).powi(2))
}
