//! the raw transit feed read by an import, decoupled from the GTFS reader so
//! that imports can also run over feeds built in memory.
mod feed_agency;
mod feed_route;
mod feed_source;
mod feed_stop;
mod feed_stop_time;
mod feed_trip;
mod gtfs_adapter;
mod service_ops;

pub use feed_agency::FeedAgency;
pub use feed_route::FeedRoute;
pub use feed_source::FeedSource;
pub use feed_stop::FeedStop;
pub use feed_stop_time::FeedStopTime;
pub use feed_trip::FeedTrip;
pub use service_ops::service_periods;

#[cfg(test)]
pub(crate) mod test_feed;
