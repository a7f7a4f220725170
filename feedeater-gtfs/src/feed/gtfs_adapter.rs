use std::collections::{BTreeMap, HashMap};

use geo::{Coord, LineString, Point};
use gtfs_structures::{
    Agency, Availability, BikesAllowedType, Gtfs, PickupDropOffType, Route, RouteType, Shape,
    Stop, StopTime, Trip,
};
use itertools::Itertools;

use super::{
    service_periods, FeedAgency, FeedRoute, FeedSource, FeedStop, FeedStopTime, FeedTrip,
};
use crate::import::ImportError;

impl FeedSource {
    /// reads a GTFS archive or directory.
    pub fn from_path(path: &str) -> Result<FeedSource, ImportError> {
        log::info!("Load GTFS: {path}");
        let gtfs = Gtfs::new(path)?;
        FeedSource::try_from(&gtfs)
    }
}

impl TryFrom<&Gtfs> for FeedSource {
    type Error = ImportError;

    fn try_from(gtfs: &Gtfs) -> Result<Self, Self::Error> {
        let agencies = gtfs.agencies.iter().map(feed_agency).collect_vec();
        let routes: BTreeMap<String, FeedRoute> = gtfs
            .routes
            .iter()
            .map(|(id, route)| (id.clone(), feed_route(route)))
            .collect();
        let stops: BTreeMap<String, FeedStop> = gtfs
            .stops
            .iter()
            .map(|(id, stop)| (id.clone(), feed_stop(stop)))
            .collect();
        let trips = gtfs
            .trips
            .iter()
            .map(|(id, trip)| {
                if !routes.contains_key(&trip.route_id) {
                    return Err(ImportError::MalformedFeed(format!(
                        "trip '{id}' references unknown route '{}'",
                        trip.route_id
                    )));
                }
                Ok((id.clone(), feed_trip(trip)))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        let shapes: HashMap<String, LineString<f64>> = gtfs
            .shapes
            .iter()
            .map(|(id, points)| (id.clone(), shape_line(points)))
            .collect();
        let services = service_periods(&gtfs.calendar, &gtfs.calendar_dates);
        log::info!(
            "  agencies: {}, routes: {}, stops: {}, trips: {}, shapes: {}, services: {}",
            agencies.len(),
            routes.len(),
            stops.len(),
            trips.len(),
            shapes.len(),
            services.len()
        );
        Ok(FeedSource {
            agencies,
            routes,
            stops,
            trips,
            shapes,
            services,
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn feed_agency(agency: &Agency) -> FeedAgency {
    FeedAgency {
        id: agency.id.clone(),
        name: agency.name.clone(),
        url: non_empty(&agency.url),
        timezone: non_empty(&agency.timezone),
    }
}

/// the reader fills a missing `route_color` with white, the GTFS default, so
/// white is read as no color.
fn route_color(route: &Route) -> Option<String> {
    let color = format!(
        "{:02X}{:02X}{:02X}",
        route.color.r, route.color.g, route.color.b
    );
    (color != "FFFFFF").then_some(color)
}

fn feed_route(route: &Route) -> FeedRoute {
    FeedRoute {
        id: route.id.clone(),
        agency_id: route.agency_id.clone(),
        short_name: route.short_name.clone(),
        long_name: route.long_name.clone(),
        route_type: route_type_code(&route.route_type),
        color: route_color(route),
    }
}

/// the GTFS `route_type` code, including extended route types.
#[allow(unreachable_patterns)]
fn route_type_code(route_type: &RouteType) -> i16 {
    match route_type {
        RouteType::Tramway => 0,
        RouteType::Subway => 1,
        RouteType::Rail => 2,
        RouteType::Bus => 3,
        RouteType::Ferry => 4,
        RouteType::CableCar => 5,
        RouteType::Gondola => 6,
        RouteType::Funicular => 7,
        RouteType::Coach => 200,
        RouteType::Air => 1100,
        RouteType::Taxi => 1500,
        RouteType::Other(code) => *code,
        _ => 3,
    }
}

fn feed_stop(stop: &Stop) -> FeedStop {
    let location = match (stop.longitude, stop.latitude) {
        (Some(x), Some(y)) => Some(Point::new(x, y)),
        _ => None,
    };
    FeedStop {
        id: stop.id.clone(),
        name: stop.name.clone(),
        location,
        parent_station: stop.parent_station.clone(),
        timezone: stop.timezone.clone(),
        wheelchair_boarding: availability_code(&stop.wheelchair_boarding),
    }
}

fn feed_trip(trip: &Trip) -> FeedTrip {
    FeedTrip {
        id: trip.id.clone(),
        route_id: trip.route_id.clone(),
        service_id: trip.service_id.clone(),
        shape_id: trip.shape_id.clone(),
        trip_headsign: trip.trip_headsign.clone(),
        trip_short_name: trip.trip_short_name.clone(),
        wheelchair_accessible: availability_code(&trip.wheelchair_accessible),
        bikes_allowed: match trip.bikes_allowed {
            BikesAllowedType::AtLeastOneBike => 1,
            BikesAllowedType::NoBikesAllowed => 2,
            _ => 0,
        },
        stop_times: trip.stop_times.iter().map(feed_stop_time).collect(),
    }
}

fn feed_stop_time(stop_time: &StopTime) -> FeedStopTime {
    FeedStopTime {
        stop_id: stop_time.stop.id.clone(),
        stop_sequence: stop_time.stop_sequence,
        arrival_time: stop_time.arrival_time,
        departure_time: stop_time.departure_time,
        stop_headsign: stop_time.stop_headsign.clone(),
        pickup_type: pickup_drop_off_code(&stop_time.pickup_type),
        drop_off_type: pickup_drop_off_code(&stop_time.drop_off_type),
        shape_dist_traveled: stop_time.shape_dist_traveled.map(f64::from),
    }
}

fn availability_code(availability: &Availability) -> u8 {
    match availability {
        Availability::Available => 1,
        Availability::NotAvailable => 2,
        _ => 0,
    }
}

fn pickup_drop_off_code(value: &PickupDropOffType) -> u8 {
    match value {
        PickupDropOffType::NotAvailable => 1,
        PickupDropOffType::ArrangeByPhone => 2,
        PickupDropOffType::CoordinateWithDriver => 3,
        _ => 0,
    }
}

fn shape_line(points: &[Shape]) -> LineString<f64> {
    points
        .iter()
        .sorted_by_key(|p| p.sequence)
        .map(|p| Coord {
            x: p.longitude,
            y: p.latitude,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{route_type_code, shape_line};
    use crate::feed::FeedSource;
    use gtfs_structures::{RouteType, Shape};
    use std::path::Path;

    fn write_feed(directory: &Path, routes: &str) {
        let files = [
            (
                "agency.txt",
                "agency_id,agency_name,agency_url,agency_timezone\n\
                 CT,Caltrain,https://www.caltrain.com,America/Los_Angeles\n",
            ),
            (
                "stops.txt",
                "stop_id,stop_name,stop_lat,stop_lon\nA,Alpha,37.0,-122.0\nB,Bravo,37.01,-122.01\n",
            ),
            ("routes.txt", routes),
            ("trips.txt", "route_id,service_id,trip_id\nR,weekday,t1\n"),
            (
                "stop_times.txt",
                "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
                 t1,08:00:00,08:00:00,A,1\n\
                 t1,08:10:00,08:10:00,B,2\n",
            ),
            (
                "calendar.txt",
                "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
                 weekday,1,1,1,1,1,0,0,20240101,20241231\n",
            ),
        ];
        for (name, contents) in files {
            std::fs::write(directory.join(name), contents).expect("should write feed file");
        }
    }

    fn read_feed(routes: &str) -> FeedSource {
        let dir = tempfile::tempdir().expect("should create temp dir");
        write_feed(dir.path(), routes);
        let path = dir.path().to_str().expect("utf-8 path");
        FeedSource::from_path(path).expect("should read feed")
    }

    #[test]
    fn test_missing_route_color() {
        let feed = read_feed("route_id,agency_id,route_short_name,route_long_name,route_type\nR,CT,L,Local,2\n");
        assert_eq!(feed.routes["R"].color, None);
        assert_eq!(feed.trips["t1"].stop_times.len(), 2);
    }

    #[test]
    fn test_route_color() {
        let feed = read_feed(
            "route_id,agency_id,route_short_name,route_long_name,route_type,route_color\n\
             R,CT,L,Local,2,e31837\n\
             W,CT,W,White,3,\n",
        );
        assert_eq!(feed.routes["R"].color.as_deref(), Some("E31837"));
        assert_eq!(feed.routes["W"].color, None);
    }

    #[test]
    fn test_route_type_code() {
        assert_eq!(route_type_code(&RouteType::Rail), 2);
        assert_eq!(route_type_code(&RouteType::Coach), 200);
        assert_eq!(route_type_code(&RouteType::Other(715)), 715);
    }

    #[test]
    fn test_shape_sorted_by_sequence() {
        let shape = |sequence: usize, x: f64| Shape {
            id: String::from("sh1"),
            latitude: 37.0,
            longitude: x,
            sequence,
            dist_traveled: None,
        };
        let line = shape_line(&[shape(2, -122.2), shape(0, -122.0), shape(1, -122.1)]);
        let xs: Vec<f64> = line.coords().map(|c| c.x).collect();
        assert_eq!(xs, vec![-122.0, -122.1, -122.2]);
    }
}
