//! automated geometric consistency checks over the entities touched by an
//! applied changeset. findings are reported as [`Issue`](crate::model::issue::Issue)
//! records and never fail the changeset.
mod geometry_check;
mod quality_check;
mod quality_ops;
mod quality_report;
mod station_hierarchy_check;
mod stop_lookup;

pub use geometry_check::{
    GeometryCheck, DUPLICATE_STOP_TOLERANCE_METERS, LAST_STOP_DISTANCE_LENIENCY_METERS,
    MINIMUM_DISTANCE_BETWEEN_STOPS_METERS,
};
pub use quality_check::QualityCheck;
pub use quality_ops::{distance_score, run_quality_checks};
pub use quality_report::QualityReport;
pub use station_hierarchy_check::{
    StationHierarchyCheck, MINIMUM_DISTANCE_BETWEEN_PLATFORMS_METERS,
    PLATFORM_PARENT_DISTANCE_GAP_METERS,
};
