use serde::{Deserialize, Serialize};

/// GTFS `route_type`, including the extended (hierarchical) vehicle types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct VehicleType(pub i16);

impl VehicleType {
    pub fn name(&self) -> &'static str {
        match self.0 {
            0 => "tram",
            1 => "metro",
            2 => "rail",
            3 => "bus",
            4 => "ferry",
            5 => "cablecar",
            6 => "gondola",
            7 => "funicular",
            11 => "trolleybus",
            12 => "monorail",
            100..=199 => "railway_service",
            200..=299 => "coach_service",
            400..=499 => "urban_railway_service",
            700..=799 => "bus_service",
            800..=899 => "trolleybus_service",
            900..=999 => "tram_service",
            1000..=1099 => "water_transport_service",
            1100..=1199 => "air_service",
            1300..=1399 => "aerial_lift_service",
            1400..=1499 => "funicular_service",
            1500..=1599 => "taxi_service",
            _ => "unknown",
        }
    }
}
