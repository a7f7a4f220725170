#[derive(Debug, Clone, PartialEq)]
pub struct FeedRoute {
    pub id: String,
    pub agency_id: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    /// GTFS `route_type` code
    pub route_type: i16,
    /// GTFS `route_color` as hexadecimal digits
    pub color: Option<String>,
}

impl FeedRoute {
    /// the short name when present, otherwise the long name.
    pub fn name(&self) -> Option<&str> {
        self.short_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.long_name.as_deref())
            .filter(|n| !n.trim().is_empty())
    }
}
