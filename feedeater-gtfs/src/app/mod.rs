//! command line tool for importing feeds, checking entity store snapshots
//! and summarizing GTFS archives.
mod feed_eater_app;
mod feed_summary;
mod issue_ops;
mod operation;

pub use feed_eater_app::FeedEaterApp;
pub use feed_summary::FeedSummary;
pub use issue_ops::write_issues;
pub use operation::FeedEaterOperation;
