use feedeater_core::model::entity::{GtfsTime, TimepointSource};
use itertools::Itertools;

use crate::feed::FeedStopTime;

/// arrival and departure at one stop of a trip, after interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timepoint {
    pub arrival: Option<GtfsTime>,
    pub departure: Option<GtfsTime>,
    pub source: Option<TimepointSource>,
}

/// times at each stop of a trip, in stop sequence order.
///
/// a stop with only one of arrival or departure uses it for both. stops without
/// times that lie between two timed stops get a linear estimate, weighted by
/// `distances` when every stop in the gap has one and they increase, otherwise
/// by the number of hops. stops before the first or after the last timed stop
/// stay empty.
pub fn interpolate_times(stop_times: &[FeedStopTime], distances: &[Option<f64>]) -> Vec<Timepoint> {
    let mut timepoints = stop_times
        .iter()
        .map(|st| {
            let arrival = st.arrival_time.or(st.departure_time).map(GtfsTime);
            let departure = st.departure_time.or(st.arrival_time).map(GtfsTime);
            Timepoint {
                arrival,
                departure,
                source: arrival.map(|_| TimepointSource::GtfsExact),
            }
        })
        .collect_vec();

    let known = timepoints
        .iter()
        .positions(|t| t.source.is_some())
        .collect_vec();
    for (a, b) in known.into_iter().tuple_windows() {
        if b - a < 2 {
            continue;
        }
        let (Some(start), Some(end)) = (timepoints[a].departure, timepoints[b].arrival) else {
            continue;
        };
        let start = start.seconds();
        let duration = end.seconds().saturating_sub(start) as f64;
        let gap_distances = (a..=b)
            .map(|i| distances.get(i).copied().flatten())
            .collect::<Option<Vec<f64>>>()
            .filter(|d| d[d.len() - 1] > d[0]);
        for i in (a + 1)..b {
            let fraction = match &gap_distances {
                Some(d) => ((d[i - a] - d[0]) / (d[d.len() - 1] - d[0])).clamp(0.0, 1.0),
                None => (i - a) as f64 / (b - a) as f64,
            };
            let time = Some(GtfsTime(start + (duration * fraction).round() as u32));
            timepoints[i] = Timepoint {
                arrival: time,
                departure: time,
                source: Some(TimepointSource::TlLinear),
            };
        }
    }
    timepoints
}
