use std::{fmt::Display, str::FromStr};

use geo::Point;
use twox_hash::XxHash64;

use super::{
    geohash_ops, parameterize, parameterize::PLATFORM_DELIMITER, OnestopIdError, OnestopPrefix,
};

const COMPONENT_SEPARATOR: char = '-';

/// a stable identifier for a logical transit entity, composed of an entity-type
/// prefix, a geohash fit to the entity's geometry and a normalized name, such
/// as `s-9q9k62qu53-sanjosediridon`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OnestopId {
    pub prefix: OnestopPrefix,
    pub geohash: String,
    pub name: String,
}

impl OnestopId {
    pub fn new(prefix: OnestopPrefix, geohash: &str, name: &str) -> Result<OnestopId, OnestopIdError> {
        if !geohash_ops::is_geohash(geohash) {
            return Err(OnestopIdError::InvalidOnestopId(
                format!("{prefix}-{geohash}-{name}"),
                String::from("geohash component is not valid"),
            ));
        }
        let name = parameterize(name);
        if name.is_empty() {
            return Err(OnestopIdError::MissingName);
        }
        Ok(OnestopId {
            prefix,
            geohash: geohash.to_string(),
            name,
        })
    }

    /// builds an identifier from the points that make up an entity's geometry.
    ///
    /// # Arguments
    ///
    /// * `prefix` - entity type
    /// * `points` - every coordinate of the entity (stop location, served stops, ...)
    /// * `name` - human-readable name, normalized by [`parameterize`]
    pub fn from_points(
        prefix: OnestopPrefix,
        points: &[Point<f64>],
        name: Option<&str>,
    ) -> Result<OnestopId, OnestopIdError> {
        let name = name.filter(|n| !n.trim().is_empty()).ok_or(OnestopIdError::MissingName)?;
        if points.is_empty() {
            return Err(OnestopIdError::MissingCoordinates(name.to_string()));
        }
        let geohash = geohash_ops::fit(points)?;
        OnestopId::new(prefix, &geohash, name)
    }

    /// identifier of a platform that belongs to this (parent station) identifier.
    /// the platform shares the parent geohash and extends its name with a suffix.
    pub fn with_platform(&self, platform_id: &str) -> Result<OnestopId, OnestopIdError> {
        let name = format!("{}{PLATFORM_DELIMITER}{platform_id}", self.name);
        OnestopId::new(self.prefix, &self.geohash, &name)
    }

    /// for a platform identifier, the identifier of its parent station.
    pub fn parent(&self) -> Option<OnestopId> {
        let (parent_name, _) = self.name.split_once(PLATFORM_DELIMITER)?;
        Some(OnestopId {
            prefix: self.prefix,
            geohash: self.geohash.clone(),
            name: parent_name.to_string(),
        })
    }
}

impl FromStr for OnestopId {
    type Err = OnestopIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut components = s.splitn(3, COMPONENT_SEPARATOR);
        match (components.next(), components.next(), components.next()) {
            (Some(prefix), Some(geohash), Some(name)) if !name.is_empty() => {
                let prefix = OnestopPrefix::try_from(prefix)?;
                if !geohash_ops::is_geohash(geohash) {
                    return Err(OnestopIdError::InvalidOnestopId(
                        s.to_string(),
                        String::from("geohash component is not valid"),
                    ));
                }
                Ok(OnestopId {
                    prefix,
                    geohash: geohash.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(OnestopIdError::InvalidOnestopId(
                s.to_string(),
                String::from("expected '<prefix>-<geohash>-<name>'"),
            )),
        }
    }
}

impl Display for OnestopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{COMPONENT_SEPARATOR}{}{COMPONENT_SEPARATOR}{}",
            self.prefix, self.geohash, self.name
        )
    }
}

/// identifier of a route stop pattern: the owning route identifier extended
/// with a hash of the ordered stop sequence. two trips of the same route that
/// visit the same stops in the same order share one pattern.
pub fn route_stop_pattern_onestop_id(route_onestop_id: &str, stop_pattern: &[String]) -> String {
    let joined = stop_pattern.join(",");
    let hash = XxHash64::oneshot(0, joined.as_bytes());
    format!(
        "{route_onestop_id}{COMPONENT_SEPARATOR}{:08x}",
        hash & 0xffff_ffff
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id = OnestopId::from_str("s-9q9p-caltrain").expect("should parse");
        assert_eq!(id.prefix, OnestopPrefix::Stop);
        assert_eq!(id.geohash, "9q9p");
        assert_eq!(id.name, "caltrain");
        assert_eq!(id.to_string(), "s-9q9p-caltrain");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(OnestopId::from_str("s-9q9p").is_err());
        assert!(OnestopId::from_str("x-9q9p-caltrain").is_err());
        assert!(OnestopId::from_str("s-AAAA-caltrain").is_err());
    }

    #[test]
    fn test_from_points() {
        let points = vec![Point::new(-122.4194, 37.7749)];
        let id = OnestopId::from_points(OnestopPrefix::Stop, &points, Some("Civic Center"))
            .expect("should build");
        assert!(id.to_string().starts_with("s-9q8yy"));
        assert!(id.to_string().ends_with("-civiccenter"));
    }

    #[test]
    fn test_from_points_requires_name_and_coordinates() {
        let points = vec![Point::new(-122.4194, 37.7749)];
        assert_eq!(
            OnestopId::from_points(OnestopPrefix::Stop, &points, None),
            Err(OnestopIdError::MissingName)
        );
        assert!(matches!(
            OnestopId::from_points(OnestopPrefix::Stop, &[], Some("Civic Center")),
            Err(OnestopIdError::MissingCoordinates(_))
        ));
    }

    #[test]
    fn test_platform_round_trip() {
        let parent = OnestopId::from_str("s-9q9k62qu53-sanjosediridon").expect("should parse");
        let platform = parent.with_platform("70261").expect("should build");
        assert_eq!(platform.to_string(), "s-9q9k62qu53-sanjosediridon<70261");
        assert_eq!(platform.parent(), Some(parent.clone()));
        assert_eq!(parent.parent(), None);
    }

    #[test]
    fn test_pattern_id_depends_on_stop_order() {
        let a = vec![String::from("s-9q9-a"), String::from("s-9q9-b")];
        let b = vec![String::from("s-9q9-b"), String::from("s-9q9-a")];
        let id_a = route_stop_pattern_onestop_id("r-9q9-local", &a);
        assert!(id_a.starts_with("r-9q9-local-"));
        assert_eq!(id_a, route_stop_pattern_onestop_id("r-9q9-local", &a));
        assert_ne!(id_a, route_stop_pattern_onestop_id("r-9q9-local", &b));
    }
}
