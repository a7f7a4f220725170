//! a small hand-built feed shared by tests: one agency, two routes each run by
//! one trip, three stops. the local route visits all three stops, the express
//! skips the middle one.
use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use feedeater_core::model::entity::ServicePeriod;
use geo::point;

use super::{FeedAgency, FeedRoute, FeedSource, FeedStop, FeedStopTime, FeedTrip};
use crate::config::{ImportConfiguration, OperatorInFeed};

pub const FEED_ONESTOP_ID: &str = "f-9q9-caltrain";
pub const OPERATOR_ONESTOP_ID: &str = "o-9q9-caltrain";

pub fn stop(id: &str, name: &str, x: f64, y: f64) -> FeedStop {
    FeedStop {
        id: id.to_string(),
        name: Some(name.to_string()),
        location: Some(point!(x: x, y: y)),
        parent_station: None,
        timezone: None,
        wheelchair_boarding: 0,
    }
}

pub fn stop_time(stop_id: &str, stop_sequence: u32, time: Option<u32>) -> FeedStopTime {
    FeedStopTime {
        stop_id: stop_id.to_string(),
        stop_sequence,
        arrival_time: time,
        departure_time: time,
        stop_headsign: None,
        pickup_type: 0,
        drop_off_type: 0,
        shape_dist_traveled: None,
    }
}

pub fn trip(id: &str, route_id: &str, stop_times: Vec<FeedStopTime>) -> FeedTrip {
    FeedTrip {
        id: id.to_string(),
        route_id: route_id.to_string(),
        service_id: String::from("weekday"),
        shape_id: None,
        trip_headsign: Some(String::from("San Jose")),
        trip_short_name: None,
        wheelchair_accessible: 1,
        bikes_allowed: 2,
        stop_times,
    }
}

fn route(id: &str, short_name: &str, route_type: i16, color: &str) -> FeedRoute {
    FeedRoute {
        id: id.to_string(),
        agency_id: Some(String::from("CT")),
        short_name: Some(short_name.to_string()),
        long_name: None,
        route_type,
        color: Some(color.to_string()),
    }
}

pub fn feed() -> FeedSource {
    let mut feed = FeedSource {
        agencies: vec![FeedAgency {
            id: Some(String::from("CT")),
            name: String::from("Caltrain"),
            url: Some(String::from("https://www.caltrain.com")),
            timezone: Some(String::from("America/Los_Angeles")),
        }],
        ..Default::default()
    };
    for s in [
        stop("A", "Alpha", -122.000, 37.000),
        stop("B", "Bravo", -122.010, 37.010),
        stop("C", "Charlie", -122.020, 37.020),
    ] {
        feed.stops.insert(s.id.clone(), s);
    }
    for r in [
        route("local", "Local", 2, "e31837"),
        route("express", "Express", 3, "not a color"),
    ] {
        feed.routes.insert(r.id.clone(), r);
    }
    let t1 = trip(
        "t1",
        "local",
        vec![
            stop_time("C", 3, Some(8 * 3600 + 20 * 60)),
            stop_time("A", 1, Some(8 * 3600)),
            stop_time("B", 2, None),
        ],
    );
    let t2 = trip(
        "t2",
        "express",
        vec![
            stop_time("A", 1, Some(9 * 3600)),
            stop_time("C", 2, Some(9 * 3600 + 15 * 60)),
        ],
    );
    feed.trips.insert(t1.id.clone(), t1);
    feed.trips.insert(t2.id.clone(), t2);
    feed.services = HashMap::from([(
        String::from("weekday"),
        ServicePeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            days_of_week: [true, true, true, true, true, false, false],
            added_dates: BTreeSet::new(),
            except_dates: BTreeSet::new(),
        },
    )]);
    feed
}

pub fn config(import_level: u8) -> ImportConfiguration {
    let mut config = ImportConfiguration::new(
        FEED_ONESTOP_ID,
        vec![OperatorInFeed {
            gtfs_agency_id: Some(String::from("CT")),
            operator_onestop_id: String::from(OPERATOR_ONESTOP_ID),
        }],
    );
    config.import_level = import_level;
    config
}
