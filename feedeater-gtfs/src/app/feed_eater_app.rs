use super::FeedEaterOperation;
use clap::Parser;

/// command line tool for importing GTFS feeds into a Onestop entity store
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct FeedEaterApp {
    #[command(subcommand)]
    pub op: FeedEaterOperation,
}
