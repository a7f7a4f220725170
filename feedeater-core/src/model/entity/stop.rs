use std::collections::{BTreeMap, BTreeSet};

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::geometry::geometry_codec;

/// a station, platform or stand-alone stop.
///
/// stations form a hierarchy: a parent station contains platforms, referenced
/// here by the parent's Onestop ID rather than owned by it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    pub onestop_id: String,
    pub name: String,
    #[serde(with = "geometry_codec::point")]
    pub geometry: Point<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_station_onestop_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_boarding: Option<bool>,
    #[serde(default)]
    pub identified_by: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Stop {
    pub const PARENT_STATION_TAG: &'static str = "parent_station";

    pub fn new(onestop_id: String, name: String, geometry: Point<f64>) -> Stop {
        Stop {
            onestop_id,
            name,
            geometry,
            timezone: None,
            parent_station_onestop_id: None,
            wheelchair_boarding: None,
            identified_by: BTreeSet::new(),
            tags: BTreeMap::new(),
        }
    }

    /// true if this stop is a platform of some parent station.
    pub fn is_platform(&self) -> bool {
        self.parent_station_onestop_id.is_some()
    }

    /// records the back-reference to a parent station.
    pub fn set_parent_station(&mut self, parent_onestop_id: &str) {
        self.parent_station_onestop_id = Some(parent_onestop_id.to_string());
        self.tags.insert(
            String::from(Self::PARENT_STATION_TAG),
            parent_onestop_id.to_string(),
        );
    }
}
