use serde::{Deserialize, Serialize};

/// declares that the agency with `gtfs_agency_id` in a feed is the operator
/// `operator_onestop_id`. an absent agency id matches an agency without one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OperatorInFeed {
    #[serde(default)]
    pub gtfs_agency_id: Option<String>,
    pub operator_onestop_id: String,
}
