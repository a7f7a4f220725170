#[derive(Debug, Clone, PartialEq)]
pub struct FeedAgency {
    /// GTFS `agency_id`, optional for single-agency feeds
    pub id: Option<String>,
    pub name: String,
    pub url: Option<String>,
    pub timezone: Option<String>,
}
