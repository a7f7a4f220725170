use std::fmt::Display;

use feedeater_core::geometry::geometry_ops;
use feedeater_core::model::entity::Stop;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// extent of the stops imported from a feed, in WGS84 degrees.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FeedBoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl FeedBoundingBox {
    pub fn from_stops(stops: &[Stop]) -> Option<FeedBoundingBox> {
        let points = stops.iter().map(|s| s.geometry).collect_vec();
        let rect = geometry_ops::bounding_box(&points)?;
        Some(FeedBoundingBox {
            min_lon: rect.min().x,
            min_lat: rect.min().y,
            max_lon: rect.max().x,
            max_lat: rect.max().y,
        })
    }
}

impl Display for FeedBoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::FeedBoundingBox;
    use feedeater_core::model::entity::Stop;
    use geo::point;

    #[test]
    fn test_from_stops() {
        let stops = vec![
            Stop::new(String::from("s-a-a"), String::from("A"), point!(x: -122.4, y: 37.8)),
            Stop::new(String::from("s-b-b"), String::from("B"), point!(x: -121.9, y: 37.3)),
        ];
        let bbox = FeedBoundingBox::from_stops(&stops).expect("should have extent");
        assert_eq!(bbox.to_string(), "-122.4,37.3,-121.9,37.8");
        assert_eq!(FeedBoundingBox::from_stops(&[]), None);
    }
}
