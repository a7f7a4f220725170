//! imports GTFS feeds into a graph of Onestop-identified operators, stops,
//! routes and route stop patterns, then generates schedule stop pairs from
//! the feed's trips in parallel chunks.
pub mod app;
pub mod config;
pub mod feed;
pub mod graph;
pub mod import;
pub mod schedule;
