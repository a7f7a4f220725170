//! serde adapters that write entity geometries as GeoJSON geometry objects, the
//! representation used by change payloads and store snapshots.
use std::fmt::Display;

use serde::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

fn serialize_geometry<G, S>(geometry: &G, serializer: S) -> Result<S::Ok, S::Error>
where
    for<'a> geojson::Value: From<&'a G>,
    S: Serializer,
{
    geojson::Geometry::new(geojson::Value::from(geometry)).serialize(serializer)
}

fn deserialize_geometry<'de, G, D>(deserializer: D) -> Result<G, D::Error>
where
    G: TryFrom<geojson::Value>,
    <G as TryFrom<geojson::Value>>::Error: Display,
    D: Deserializer<'de>,
{
    let geometry = geojson::Geometry::deserialize(deserializer)?;
    G::try_from(geometry.value).map_err(|e| D::Error::custom(format!("invalid geometry: {e}")))
}

pub mod point {
    use geo::Point;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(point: &Point<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_geometry(point, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point<f64>, D::Error> {
        super::deserialize_geometry(deserializer)
    }
}

pub mod line_string {
    use geo::LineString;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        line: &LineString<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        super::serialize_geometry(line, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<LineString<f64>, D::Error> {
        super::deserialize_geometry(deserializer)
    }
}

pub mod optional_polygon {
    use geo::Polygon;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        polygon: &Option<Polygon<f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match polygon {
            Some(p) => super::serialize_geometry(p, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Polygon<f64>>, D::Error> {
        match Option::<geojson::Geometry>::deserialize(deserializer)? {
            None => Ok(None),
            Some(g) => Polygon::try_from(g.value)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid polygon: {e}"))),
        }
    }
}

pub mod optional_multi_line_string {
    use geo::MultiLineString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        lines: &Option<MultiLineString<f64>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match lines {
            Some(l) => super::serialize_geometry(l, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<MultiLineString<f64>>, D::Error> {
        match Option::<geojson::Geometry>::deserialize(deserializer)? {
            None => Ok(None),
            Some(g) => MultiLineString::try_from(g.value)
                .map(Some)
                .map_err(|e| serde::de::Error::custom(format!("invalid multilinestring: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point, LineString, Point};
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Fixture {
        #[serde(with = "super::point")]
        location: Point<f64>,
        #[serde(with = "super::line_string")]
        path: LineString<f64>,
    }

    #[test]
    fn test_geojson_shape() {
        let fixture = Fixture {
            location: point!(x: -122.4, y: 37.7),
            path: line_string![(x: -122.4, y: 37.7), (x: -122.5, y: 37.8)],
        };
        let json = serde_json::to_value(&fixture).expect("should serialize");
        assert_eq!(json["location"]["type"], "Point");
        assert_eq!(json["location"]["coordinates"][0], -122.4);
        assert_eq!(json["path"]["type"], "LineString");
        let decoded: Fixture = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(decoded, fixture);
    }
}
