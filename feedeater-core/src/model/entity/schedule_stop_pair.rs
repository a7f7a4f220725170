use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{GtfsTime, ServicePeriod};

/// non-regular pickup or drop-off arrangements. regular service is `None`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PickupType {
    Unavailable,
    AskAgency,
    AskDriver,
}

/// where a stop time came from: the feed itself or linear interpolation
/// between known timepoints.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimepointSource {
    GtfsExact,
    TlLinear,
}

/// a single scheduled edge: one trip traveling between two consecutive stops.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStopPair {
    pub origin_onestop_id: String,
    pub destination_onestop_id: String,
    pub route_onestop_id: String,
    pub route_stop_pattern_onestop_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_onestop_id: Option<String>,
    pub trip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_headsign: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trip_short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_arrival_time: Option<GtfsTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_departure_time: Option<GtfsTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_arrival_time: Option<GtfsTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_departure_time: Option<GtfsTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_timepoint_source: Option<TimepointSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_timepoint_source: Option<TimepointSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_dist_traveled: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_dist_traveled: Option<f64>,
    /// `shape_dist_traveled` of the destination stop time, as given by the feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shape_dist_traveled: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServicePeriod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wheelchair_accessible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bikes_allowed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_type: Option<PickupType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drop_off_type: Option<PickupType>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ScheduleStopPair {
    /// identifies a pair within a store: the trip of a pattern leaving one
    /// stop for the next at a given time.
    pub fn identity(&self) -> (&str, &str, &str, &str, Option<GtfsTime>) {
        (
            &self.route_stop_pattern_onestop_id,
            &self.trip,
            &self.origin_onestop_id,
            &self.destination_onestop_id,
            self.origin_departure_time,
        )
    }
}
