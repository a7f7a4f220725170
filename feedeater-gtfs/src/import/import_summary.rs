use std::collections::BTreeMap;

use feedeater_core::{changeset::ChangesetId, model::entity::EntityKind, quality::QualityReport};
use serde::{Deserialize, Serialize};

use super::ImportLevel;
use crate::graph::FeedBoundingBox;

/// what an import wrote, printed by the command line tool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub feed_onestop_id: String,
    pub feed_version: Option<String>,
    pub import_level: ImportLevel,
    /// entities submitted per kind
    pub counts: BTreeMap<EntityKind, usize>,
    /// the changeset of operators, stops, routes and patterns
    pub changeset: ChangesetId,
    /// one changeset per schedule chunk
    pub schedule_changesets: Vec<ChangesetId>,
    /// quality checks over the network changeset
    pub quality: QualityReport,
    pub bounding_box: Option<FeedBoundingBox>,
}

impl ImportSummary {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or_default()
    }
}
