use std::collections::{BTreeMap, BTreeSet};

use geo::MultiLineString;
use serde::{Deserialize, Serialize};

use super::VehicleType;
use crate::geometry::geometry_codec;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub onestop_id: String,
    pub name: String,
    #[serde(default)]
    pub vehicle_type: VehicleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Onestop ID of the operator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operated_by: Option<String>,
    /// Onestop IDs of the stops served
    #[serde(default)]
    pub serves: BTreeSet<String>,
    /// representative geometry, derived from the route stop patterns
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "geometry_codec::optional_multi_line_string"
    )]
    pub geometry: Option<MultiLineString<f64>>,
    #[serde(default)]
    pub identified_by: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Route {
    pub fn new(onestop_id: String, name: String, vehicle_type: VehicleType) -> Route {
        Route {
            onestop_id,
            name,
            vehicle_type,
            color: None,
            operated_by: None,
            serves: BTreeSet::new(),
            geometry: None,
            identified_by: BTreeSet::new(),
            tags: BTreeMap::new(),
        }
    }

    /// a color is six uppercase hexadecimal digits, or empty.
    pub fn color_valid(color: &str) -> bool {
        color.is_empty()
            || (color.len() == 6
                && color
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)))
    }

    /// normalizes a GTFS `route_color`, dropping values that are not valid colors.
    pub fn color_from_gtfs(route_color: &str) -> Option<String> {
        let color = route_color.trim().to_uppercase();
        (!color.is_empty() && Route::color_valid(&color)).then_some(color)
    }
}
