//! builds the candidate entity graph of an import: resolves every feed stop,
//! route, trip and agency to a Onestop-identified entity, reusing entities
//! already in the store.
mod candidate_graph;
mod entity_cache;
mod feed_bounding_box;
mod feed_entity;
mod gtfs_graph;
mod gtfs_id_map;
mod import_context;

pub use candidate_graph::CandidateGraph;
pub use entity_cache::EntityCache;
pub use feed_bounding_box::FeedBoundingBox;
pub use feed_entity::FeedEntityKind;
pub use gtfs_graph::GtfsGraph;
pub use gtfs_id_map::GtfsIdMap;
pub use import_context::ImportContext;
