use geo::Point;

#[derive(Debug, Clone, PartialEq)]
pub struct FeedStop {
    pub id: String,
    pub name: Option<String>,
    pub location: Option<Point<f64>>,
    pub parent_station: Option<String>,
    pub timezone: Option<String>,
    /// GTFS `wheelchair_boarding` code
    pub wheelchair_boarding: u8,
}
