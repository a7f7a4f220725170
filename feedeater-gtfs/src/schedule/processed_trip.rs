use std::collections::BinaryHeap;

use crate::{
    feed::{FeedStopTime, FeedTrip},
    schedule::ScheduleError,
};

/// a trip with its stop times in `stop_sequence` order, ready for edge generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedTrip {
    /// GTFS trip identifier
    pub trip_id: String,
    /// GTFS route_id associated with this trip
    pub route_id: String,
    /// service associated with this trip
    pub service_id: String,
    /// stop times of this trip in ascending `stop_sequence` order
    pub stop_times: Vec<FeedStopTime>,
}

impl ProcessedTrip {
    pub fn new(trip: &FeedTrip) -> Result<ProcessedTrip, ScheduleError> {
        let stop_times = get_ordered_stops(trip)?;
        Ok(ProcessedTrip {
            trip_id: trip.id.clone(),
            route_id: trip.route_id.clone(),
            service_id: trip.service_id.clone(),
            stop_times,
        })
    }
}

/// Returns an ordered (ascending) vector of [FeedStopTime]. Internally uses [BinaryHeap] to sort.
fn get_ordered_stops(trip: &FeedTrip) -> Result<Vec<FeedStopTime>, ScheduleError> {
    let stop_queue_order: BinaryHeap<(u32, usize)> = trip
        .stop_times
        .iter()
        .enumerate()
        .map(|(i, st)| (st.stop_sequence, i))
        .collect();

    stop_queue_order
        .into_sorted_vec()
        .iter()
        .map(|(_, idx)| {
            trip.stop_times.get(*idx).cloned().ok_or_else(|| {
                let msg = format!("expected stop index {idx} not found in trip {}", trip.id);
                ScheduleError::MalformedTrip(msg)
            })
        })
        .collect::<Result<Vec<_>, _>>()
}
