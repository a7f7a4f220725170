use std::collections::{BTreeMap, BTreeSet};

use geo::Polygon;
use serde::{Deserialize, Serialize};

use crate::geometry::geometry_codec;

/// a transit agency as a Onestop entity. its geometry is the convex hull of
/// the stops served by its routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub onestop_id: String,
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "geometry_codec::optional_polygon"
    )]
    pub geometry: Option<Polygon<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default)]
    pub identified_by: BTreeSet<String>,
    /// Onestop IDs of the routes operated
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub serves: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Operator {
    pub fn new(onestop_id: String, name: String) -> Operator {
        Operator {
            onestop_id,
            name,
            geometry: None,
            timezone: None,
            website: None,
            identified_by: BTreeSet::new(),
            serves: BTreeSet::new(),
            tags: BTreeMap::new(),
        }
    }
}
