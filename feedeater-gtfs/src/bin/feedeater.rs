//! imports GTFS feeds into a Onestop entity store snapshot, checks snapshots
//! for geometric quality issues and summarizes GTFS archives.
use clap::Parser;
use feedeater_gtfs::app::FeedEaterApp;

fn main() {
    env_logger::init();
    let args = FeedEaterApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
