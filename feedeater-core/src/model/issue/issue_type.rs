use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    StationHierarchy,
    RouteGeometry,
}

/// kinds of anomaly reported by the quality checks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    StopPlatformsTooClose,
    StopPlatformParentDistanceGap,
    RspLineOnlyStopPoints,
    StopPositionInaccurate,
    RspStopsTooClose,
    DistanceCalculationInaccurate,
    StopRspDistanceGap,
}

impl IssueType {
    pub fn category(&self) -> IssueCategory {
        match self {
            IssueType::StopPlatformsTooClose | IssueType::StopPlatformParentDistanceGap => {
                IssueCategory::StationHierarchy
            }
            IssueType::RspLineOnlyStopPoints
            | IssueType::StopPositionInaccurate
            | IssueType::RspStopsTooClose
            | IssueType::DistanceCalculationInaccurate
            | IssueType::StopRspDistanceGap => IssueCategory::RouteGeometry,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::StopPlatformsTooClose => "stop_platforms_too_close",
            IssueType::StopPlatformParentDistanceGap => "stop_platform_parent_distance_gap",
            IssueType::RspLineOnlyStopPoints => "rsp_line_only_stop_points",
            IssueType::StopPositionInaccurate => "stop_position_inaccurate",
            IssueType::RspStopsTooClose => "rsp_stops_too_close",
            IssueType::DistanceCalculationInaccurate => "distance_calculation_inaccurate",
            IssueType::StopRspDistanceGap => "stop_rsp_distance_gap",
        }
    }
}

impl Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
