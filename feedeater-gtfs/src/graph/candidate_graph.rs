use std::collections::BTreeMap;

use feedeater_core::model::entity::{Entity, EntityKind, Operator, Route, RouteStopPattern, Stop};

use super::{FeedBoundingBox, GtfsIdMap};
use crate::import::ImportLevel;

/// the entities reachable from the operators of an import, ready to submit.
#[derive(Debug, Clone, Default)]
pub struct CandidateGraph {
    pub operators: Vec<Operator>,
    /// parent stations before their platforms
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    pub route_stop_patterns: Vec<RouteStopPattern>,
    pub id_map: GtfsIdMap,
    pub bounding_box: Option<FeedBoundingBox>,
}

impl CandidateGraph {
    /// entities submitted at this import level, grouped by kind in apply order.
    pub fn entities(&self, level: ImportLevel) -> Vec<(EntityKind, Vec<Entity>)> {
        let mut result = vec![(
            EntityKind::Operator,
            self.operators.iter().cloned().map(Entity::from).collect(),
        )];
        if level >= ImportLevel::Network {
            result.push((
                EntityKind::Stop,
                self.stops.iter().cloned().map(Entity::from).collect(),
            ));
            result.push((
                EntityKind::Route,
                self.routes.iter().cloned().map(Entity::from).collect(),
            ));
            result.push((
                EntityKind::RouteStopPattern,
                self.route_stop_patterns
                    .iter()
                    .cloned()
                    .map(Entity::from)
                    .collect(),
            ));
        }
        result
    }

    pub fn counts(&self) -> BTreeMap<EntityKind, usize> {
        BTreeMap::from([
            (EntityKind::Operator, self.operators.len()),
            (EntityKind::Stop, self.stops.len()),
            (EntityKind::Route, self.routes.len()),
            (EntityKind::RouteStopPattern, self.route_stop_patterns.len()),
        ])
    }
}
