use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{EntityKind, Operator, Route, RouteStopPattern, ScheduleStopPair, Stop};

/// any entity produced by an import. serializes as a single-key object keyed by
/// [`EntityKind::payload_key`], which is the entity half of a change record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Entity {
    Operator(Operator),
    Stop(Stop),
    Route(Route),
    RouteStopPattern(RouteStopPattern),
    ScheduleStopPair(ScheduleStopPair),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Operator(_) => EntityKind::Operator,
            Entity::Stop(_) => EntityKind::Stop,
            Entity::Route(_) => EntityKind::Route,
            Entity::RouteStopPattern(_) => EntityKind::RouteStopPattern,
            Entity::ScheduleStopPair(_) => EntityKind::ScheduleStopPair,
        }
    }

    /// schedule stop pairs are not identified by a Onestop ID.
    pub fn onestop_id(&self) -> Option<&str> {
        match self {
            Entity::Operator(e) => Some(&e.onestop_id),
            Entity::Stop(e) => Some(&e.onestop_id),
            Entity::Route(e) => Some(&e.onestop_id),
            Entity::RouteStopPattern(e) => Some(&e.onestop_id),
            Entity::ScheduleStopPair(_) => None,
        }
    }

    pub fn identified_by(&self) -> Option<&BTreeSet<String>> {
        match self {
            Entity::Operator(e) => Some(&e.identified_by),
            Entity::Stop(e) => Some(&e.identified_by),
            Entity::Route(e) => Some(&e.identified_by),
            Entity::RouteStopPattern(e) => Some(&e.identified_by),
            Entity::ScheduleStopPair(_) => None,
        }
    }

    /// feeds with a record identifying this entity, read from its
    /// `gtfs://<feed>/<prefix>/<id>` identifiers.
    pub fn imported_from_feeds(&self) -> BTreeSet<&str> {
        self.identified_by()
            .into_iter()
            .flatten()
            .filter_map(|id| id.strip_prefix("gtfs://"))
            .filter_map(|rest| rest.split('/').next())
            .collect()
    }

    /// removes the identifiers recorded by one feed.
    pub fn forget_feed(&mut self, feed_onestop_id: &str) {
        let identified_by = match self {
            Entity::Operator(e) => &mut e.identified_by,
            Entity::Stop(e) => &mut e.identified_by,
            Entity::Route(e) => &mut e.identified_by,
            Entity::RouteStopPattern(e) => &mut e.identified_by,
            Entity::ScheduleStopPair(_) => return,
        };
        let prefix = format!("gtfs://{feed_onestop_id}/");
        identified_by.retain(|id| !id.starts_with(&prefix));
    }
}

/// an entity with a Onestop ID that can be resolved against the entity store.
pub trait OnestopEntity: Clone + Into<Entity> {
    const KIND: EntityKind;

    fn onestop_id(&self) -> &str;

    fn from_entity(entity: Entity) -> Option<Self>;
}

macro_rules! onestop_entity {
    ($type:ident) => {
        impl OnestopEntity for $type {
            const KIND: EntityKind = EntityKind::$type;

            fn onestop_id(&self) -> &str {
                &self.onestop_id
            }

            fn from_entity(entity: Entity) -> Option<Self> {
                match entity {
                    Entity::$type(e) => Some(e),
                    _ => None,
                }
            }
        }

        impl From<$type> for Entity {
            fn from(value: $type) -> Self {
                Entity::$type(value)
            }
        }
    };
}

onestop_entity!(Operator);
onestop_entity!(Stop);
onestop_entity!(Route);
onestop_entity!(RouteStopPattern);

impl From<ScheduleStopPair> for Entity {
    fn from(value: ScheduleStopPair) -> Self {
        Entity::ScheduleStopPair(value)
    }
}
