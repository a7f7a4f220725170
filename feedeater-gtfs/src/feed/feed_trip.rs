use super::FeedStopTime;

#[derive(Debug, Clone, PartialEq)]
pub struct FeedTrip {
    pub id: String,
    pub route_id: String,
    pub service_id: String,
    pub shape_id: Option<String>,
    pub trip_headsign: Option<String>,
    pub trip_short_name: Option<String>,
    /// GTFS `wheelchair_accessible` code
    pub wheelchair_accessible: u8,
    /// GTFS `bikes_allowed` code
    pub bikes_allowed: u8,
    /// in file order, see [`crate::schedule::ProcessedTrip`] for stop sequence order
    pub stop_times: Vec<FeedStopTime>,
}
