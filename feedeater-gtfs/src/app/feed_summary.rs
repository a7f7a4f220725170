use std::{collections::HashSet, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::feed::FeedSource;

/// size of a feed and how much of it has shapes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FeedSummary {
    pub agencies: usize,
    pub stops: usize,
    pub routes: usize,
    pub trips: usize,
    pub shapes: usize,
    /// share of trips whose shape is present in the feed
    pub coverage: f64,
    pub legs: usize,
    /// legs counted once per trip and stop pair
    pub unique_legs: usize,
}

impl From<&FeedSource> for FeedSummary {
    fn from(feed: &FeedSource) -> Self {
        let mut legs = 0;
        let mut unique_legs = 0;
        let mut with_shape = 0;
        for trip in feed.trips.values() {
            let leg_ods = trip
                .stop_times
                .windows(2)
                .map(|pair| (&pair[0].stop_id, &pair[1].stop_id))
                .collect::<HashSet<_>>();
            // stop times are vertices, legs are edges
            legs += trip.stop_times.len().saturating_sub(1);
            unique_legs += leg_ods.len();
            if feed.shape_line(trip.shape_id.as_deref()).is_some() {
                with_shape += 1;
            }
        }
        let coverage = match feed.trips.len() {
            0 => 0.0,
            n => with_shape as f64 / n as f64,
        };
        FeedSummary {
            agencies: feed.agencies.len(),
            stops: feed.stops.len(),
            routes: feed.routes.len(),
            trips: feed.trips.len(),
            shapes: feed.shapes.len(),
            coverage,
            legs,
            unique_legs,
        }
    }
}

impl Display for FeedSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{},{},{},{},{},{},{}",
            self.agencies,
            self.stops,
            self.routes,
            self.trips,
            self.shapes,
            self.coverage,
            self.legs,
            self.unique_legs
        )
    }
}
