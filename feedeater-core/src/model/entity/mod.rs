mod onestop_entity;
mod entity_kind;
mod gtfs_time;
mod operator;
mod route;
mod route_stop_pattern;
mod schedule_stop_pair;
mod service_period;
mod stop;
mod vehicle_type;

pub use onestop_entity::{Entity, OnestopEntity};
pub use entity_kind::EntityKind;
pub use gtfs_time::GtfsTime;
pub use operator::Operator;
pub use route::Route;
pub use route_stop_pattern::RouteStopPattern;
pub use schedule_stop_pair::{PickupType, ScheduleStopPair, TimepointSource};
pub use service_period::ServicePeriod;
pub use stop::Stop;
pub use vehicle_type::VehicleType;
