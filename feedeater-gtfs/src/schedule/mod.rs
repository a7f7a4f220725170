//! generates schedule stop pairs, the timed edges between consecutive stops
//! of each trip, in independent chunks of trips.
mod interpolation;
mod processed_trip;
mod schedule_error;
mod schedule_ops;
mod schedule_worker;

pub use interpolation::{interpolate_times, Timepoint};
pub use processed_trip::ProcessedTrip;
pub use schedule_error::ScheduleError;
pub use schedule_ops::{
    make_ssp, pattern_distances, to_pickup_type, to_tfn, trip_ssps, EdgeStop, TripEdges,
};
pub use schedule_worker::{ScheduleChunk, ScheduleWorker};
