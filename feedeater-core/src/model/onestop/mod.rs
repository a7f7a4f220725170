mod geohash_ops;
mod onestop_error;
mod onestop_id;
mod onestop_prefix;
mod parameterize;

pub use geohash_ops::{fit, GEOHASH_MAX_PRECISION};
pub use onestop_error::OnestopIdError;
pub use onestop_id::{route_stop_pattern_onestop_id, OnestopId};
pub use onestop_prefix::OnestopPrefix;
pub use parameterize::parameterize;
