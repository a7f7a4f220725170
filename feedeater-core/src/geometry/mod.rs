//! route geometry and the spatial primitives used when building and checking
//! an entity graph. all distances are in meters over the haversine metric.
pub mod geometry_codec;
pub mod geometry_ops;
mod geometry_error;
mod outlier_stop;
mod representative_geometry;
mod stop_distances;

pub use geometry_error::GeometryError;
pub use outlier_stop::{is_outlier_stop, OUTLIER_STOP_THRESHOLD_METERS};
pub use representative_geometry::{
    representative_patterns, route_geometry, simplify_line, SIMPLIFY_TOLERANCE,
};
pub use stop_distances::calculate_distances;
