#[derive(Debug, Clone, PartialEq)]
pub struct FeedStopTime {
    pub stop_id: String,
    pub stop_sequence: u32,
    /// seconds past the start of the service day
    pub arrival_time: Option<u32>,
    pub departure_time: Option<u32>,
    pub stop_headsign: Option<String>,
    /// GTFS `pickup_type` code
    pub pickup_type: u8,
    /// GTFS `drop_off_type` code
    pub drop_off_type: u8,
    pub shape_dist_traveled: Option<f64>,
}
