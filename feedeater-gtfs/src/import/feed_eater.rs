use std::sync::{Arc, Mutex};

use feedeater_core::{
    changeset::{
        AppliedChangeset, ChangeAction, ChangeBatcher, ChangesetId, ChangesetJournal, EntityStore,
    },
    model::entity::{Entity, EntityKind},
    quality::run_quality_checks,
};
use kdam::{Bar, BarExt};
use rayon::prelude::*;

use super::{ImportError, ImportLevel, ImportSummary};
use crate::{
    config::ImportConfiguration,
    feed::FeedSource,
    graph::{CandidateGraph, GtfsGraph, GtfsIdMap},
    schedule::{ScheduleChunk, ScheduleWorker},
};

/// imports one feed into an entity store through a changeset journal.
pub struct FeedEater {
    feed: FeedSource,
    store: Arc<dyn EntityStore>,
    journal: Arc<dyn ChangesetJournal>,
    config: ImportConfiguration,
}

impl FeedEater {
    pub fn new(
        feed: FeedSource,
        store: Arc<dyn EntityStore>,
        journal: Arc<dyn ChangesetJournal>,
        config: ImportConfiguration,
    ) -> Result<FeedEater, ImportError> {
        config.validate()?;
        Ok(FeedEater {
            feed,
            store,
            journal,
            config,
        })
    }

    pub fn feed(&self) -> &FeedSource {
        &self.feed
    }

    pub fn config(&self) -> &ImportConfiguration {
        &self.config
    }

    /// builds the entity graph, applies it as one changeset and checks its
    /// quality. at the schedule level, schedule stop pairs are then generated
    /// in parallel chunks, each applied as its own changeset.
    pub fn import(&self) -> Result<ImportSummary, ImportError> {
        let level = self.config.import_level()?;
        let feed_onestop_id = &self.config.feed_onestop_id;
        log::info!("Import feed {feed_onestop_id} at level {level}");

        let graph = self.build_graph()?;
        let applied = self.create_change_osr(&graph, level)?;
        log::info!("Quality checks");
        let quality = run_quality_checks(self.store.as_ref(), &applied);
        log::info!("  issues: {}", quality.issues.len());

        let mut counts = graph.counts();
        if level < ImportLevel::Network {
            counts.retain(|kind, _| *kind == EntityKind::Operator);
        }
        let mut schedule_changesets = vec![];
        if level >= ImportLevel::Schedule {
            let chunks = self.ssp_schedule(&graph.id_map)?;
            let pairs = chunks.iter().map(|c| c.schedule_stop_pairs).sum::<usize>();
            counts.insert(EntityKind::ScheduleStopPair, pairs);
            schedule_changesets = chunks.iter().map(|c| c.changeset).collect();
        }
        log::info!("Import feed {feed_onestop_id} done");
        Ok(ImportSummary {
            feed_onestop_id: feed_onestop_id.clone(),
            feed_version: self.config.feed_version.clone(),
            import_level: level,
            counts,
            changeset: applied.id,
            schedule_changesets,
            quality,
            bounding_box: graph.bounding_box,
        })
    }

    pub fn build_graph(&self) -> Result<CandidateGraph, ImportError> {
        log::info!("Build graph");
        GtfsGraph::new(
            &self.feed,
            &self.config.feed_onestop_id,
            self.store.as_ref(),
        )
        .build(
            &self.config.operators_in_feed,
            self.config.simplify_tolerance,
        )
    }

    /// submits the operators and, from the network level, the stops, routes
    /// and route stop patterns of the graph as one changeset and applies it.
    pub fn create_change_osr(
        &self,
        graph: &CandidateGraph,
        level: ImportLevel,
    ) -> Result<AppliedChangeset, ImportError> {
        let batcher = ChangeBatcher::new(self.config.change_payload_max_entities)?;
        let feed_onestop_id = &self.config.feed_onestop_id;
        let changeset = self.journal.create(
            Some(feed_onestop_id),
            self.config.feed_version.as_deref(),
            &format!("Import feed {feed_onestop_id} at level {level}"),
        )?;
        log::info!("Create changes");
        for (kind, entities) in graph.entities(level) {
            log::info!("  {kind}: {}", entities.len());
            batcher.submit(
                self.journal.as_ref(),
                changeset,
                ChangeAction::CreateUpdate,
                entities,
            )?;
        }
        log::info!("Changeset apply");
        let applied = self.journal.apply(changeset)?;
        self.journal.destroy_payloads(changeset)?;
        Ok(applied)
    }

    /// splits the feed's trips into chunks of at most `stop_times_max_load`
    /// stop times and generates each chunk on the worker pool. every chunk is
    /// attempted; failures are logged and reported together.
    pub fn ssp_schedule(&self, id_map: &GtfsIdMap) -> Result<Vec<ScheduleChunk>, ImportError> {
        let chunks = self.feed.trip_chunks(self.config.stop_times_max_load);
        log::info!(
            "Schedule: {} trips in {} chunks",
            self.feed.trips.len(),
            chunks.len()
        );
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.parallelism)
            .build()
            .map_err(|e| ImportError::WorkerPool(e.to_string()))?;
        let bar = Arc::new(Mutex::new(
            Bar::builder()
                .desc("schedule chunks")
                .total(chunks.len())
                .build()
                .map_err(|e| ImportError::ProgressBar(e.to_string()))?,
        ));
        let results = pool.install(|| {
            chunks
                .par_iter()
                .map(|trip_ids| {
                    let result = self.ssp_perform(trip_ids, id_map.clone());
                    if let Ok(mut bar) = bar.lock() {
                        let _ = bar.update(1);
                    }
                    result
                })
                .collect::<Vec<_>>()
        });

        let total = results.len();
        let mut completed = Vec::with_capacity(total);
        let mut failed = 0;
        for (index, result) in results.into_iter().enumerate() {
            match result {
                Ok(chunk) => completed.push(chunk),
                Err(e) => {
                    failed += 1;
                    log::error!("schedule chunk {index} failed: {e}");
                }
            }
        }
        if failed > 0 {
            return Err(ImportError::ScheduleChunksFailed { failed, total });
        }
        Ok(completed)
    }

    /// generates the schedule stop pairs of one chunk of trips.
    pub fn ssp_perform(
        &self,
        trip_ids: &[String],
        id_map: GtfsIdMap,
    ) -> Result<ScheduleChunk, ImportError> {
        let batcher = ChangeBatcher::new(self.config.change_payload_max_entities)?;
        let mut worker = ScheduleWorker::new(
            &self.feed,
            self.store.as_ref(),
            self.journal.as_ref(),
            batcher,
            id_map,
        );
        let chunk = worker.perform(
            &self.config.feed_onestop_id,
            self.config.feed_version.as_deref(),
            trip_ids,
        )?;
        Ok(chunk)
    }

    /// destroys every entity imported from this feed as one changeset:
    /// schedule stop pairs, route stop patterns, platforms, stations, routes
    /// and then operators. an entity also identified by another feed is kept,
    /// and only loses this feed's identifiers. returns `None` when there is
    /// nothing to change.
    pub fn destroy_feed(&self) -> Result<Option<ChangesetId>, ImportError> {
        let feed_onestop_id = &self.config.feed_onestop_id;
        let store = self.store.as_ref();
        let mut released: Vec<Entity> = vec![];
        let mut from_feed = |kind: EntityKind| -> Result<Vec<Entity>, ImportError> {
            let (owned, shared): (Vec<Entity>, Vec<Entity>) = store
                .entities_imported_from_feed(feed_onestop_id, kind)?
                .into_iter()
                .partition(|e| {
                    e.imported_from_feeds()
                        .iter()
                        .all(|feed| *feed == feed_onestop_id.as_str())
                });
            if !shared.is_empty() {
                log::info!(
                    "feed {feed_onestop_id}: keeping {} {kind} entities also imported from other feeds",
                    shared.len()
                );
            }
            released.extend(shared.into_iter().map(|mut e| {
                e.forget_feed(feed_onestop_id);
                e
            }));
            Ok(owned)
        };
        let pairs = from_feed(EntityKind::ScheduleStopPair)?;
        let patterns = from_feed(EntityKind::RouteStopPattern)?;
        let (platforms, stations): (Vec<Entity>, Vec<Entity>) = from_feed(EntityKind::Stop)?
            .into_iter()
            .partition(|e| matches!(e, Entity::Stop(s) if s.is_platform()));
        let routes = from_feed(EntityKind::Route)?;
        let operators = from_feed(EntityKind::Operator)?;
        let groups = vec![pairs, patterns, platforms, stations, routes, operators];
        if released.is_empty() && groups.iter().all(Vec::is_empty) {
            log::info!("feed {feed_onestop_id}: nothing to destroy");
            return Ok(None);
        }

        let batcher = ChangeBatcher::new(self.config.change_payload_max_entities)?;
        let changeset = self.journal.create(
            Some(feed_onestop_id),
            self.config.feed_version.as_deref(),
            &format!("Destroy feed {feed_onestop_id}"),
        )?;
        if !released.is_empty() {
            batcher.submit(
                self.journal.as_ref(),
                changeset,
                ChangeAction::CreateUpdate,
                released,
            )?;
        }
        for entities in groups.into_iter().filter(|g| !g.is_empty()) {
            batcher.submit(
                self.journal.as_ref(),
                changeset,
                ChangeAction::Destroy,
                entities,
            )?;
        }
        log::info!("Changeset apply");
        self.journal.apply(changeset)?;
        self.journal.destroy_payloads(changeset)?;
        Ok(Some(changeset))
    }
}

#[cfg(test)]
mod tests {
    use super::FeedEater;
    use crate::{
        feed::test_feed,
        import::{ImportError, ImportLevel},
    };
    use feedeater_core::{
        changeset::{ChangesetJournal, EntityStore, EntityStoreExt, InMemoryJournal, InMemoryStore},
        model::entity::{EntityKind, Operator},
    };
    use std::sync::Arc;

    fn feed_eater(level: u8) -> (FeedEater, Arc<InMemoryStore>, Arc<InMemoryJournal>) {
        let store = Arc::new(InMemoryStore::default());
        let journal = Arc::new(InMemoryJournal::new(store.clone()));
        let mut config = test_feed::config(level);
        config.feed_version = Some(String::from("2024-01-01"));
        config.change_payload_max_entities = 2;
        let eater = FeedEater::new(test_feed::feed(), store.clone(), journal.clone(), config)
            .expect("valid configuration");
        (eater, store, journal)
    }

    fn count(store: &InMemoryStore, kind: EntityKind) -> usize {
        store.count(kind).expect("should count")
    }

    #[test]
    fn test_level_entities() {
        let (eater, _, _) = feed_eater(1);
        let graph = eater.build_graph().expect("should build");
        let kinds = |level| {
            graph
                .entities(level)
                .into_iter()
                .map(|(kind, _)| kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(ImportLevel::Operators), vec![EntityKind::Operator]);
        assert_eq!(
            kinds(ImportLevel::Network),
            vec![
                EntityKind::Operator,
                EntityKind::Stop,
                EntityKind::Route,
                EntityKind::RouteStopPattern
            ]
        );
    }

    #[test]
    fn test_import_level_operators() {
        let (eater, store, _) = feed_eater(0);
        let summary = eater.import().expect("should import");
        assert_eq!(count(&store, EntityKind::Operator), 1);
        assert_eq!(count(&store, EntityKind::Stop), 0);
        assert_eq!(count(&store, EntityKind::Route), 0);
        assert_eq!(summary.count(EntityKind::Operator), 1);
        assert_eq!(summary.count(EntityKind::Stop), 0);
        assert!(summary.schedule_changesets.is_empty());
    }

    #[test]
    fn test_import_level_network() {
        let (eater, store, journal) = feed_eater(1);
        let summary = eater.import().expect("should import");
        assert_eq!(count(&store, EntityKind::Operator), 1);
        assert_eq!(count(&store, EntityKind::Stop), 3);
        assert_eq!(count(&store, EntityKind::Route), 2);
        assert_eq!(count(&store, EntityKind::RouteStopPattern), 2);
        assert_eq!(count(&store, EntityKind::ScheduleStopPair), 0);
        assert!(summary.quality.distance_score.is_some());

        let record = journal.record(summary.changeset).expect("changeset recorded");
        assert!(record.applied);
        assert!(record.payloads.is_empty());
        assert_eq!(record.imported_from_feed.as_deref(), Some(test_feed::FEED_ONESTOP_ID));
        assert_eq!(record.feed_version.as_deref(), Some("2024-01-01"));
    }

    #[test]
    fn test_import_level_schedule() {
        let (mut eater, store, _) = feed_eater(2);
        eater.config.stop_times_max_load = 3;
        eater.config.parallelism = 2;
        let summary = eater.import().expect("should import");
        assert_eq!(count(&store, EntityKind::ScheduleStopPair), 3);
        assert_eq!(summary.count(EntityKind::ScheduleStopPair), 3);
        assert_eq!(summary.schedule_changesets.len(), 2);
        assert!(summary
            .schedule_changesets
            .iter()
            .all(|id| *id != summary.changeset));
    }

    #[test]
    fn test_reimport_reuses_entities() {
        let (eater, store, _) = feed_eater(1);
        eater.import().expect("should import");
        eater.import().expect("should import again");
        assert_eq!(count(&store, EntityKind::Stop), 3);
        assert_eq!(count(&store, EntityKind::RouteStopPattern), 2);
    }

    #[test]
    fn test_reimport_schedule_level() {
        let (eater, store, _) = feed_eater(2);
        eater.import().expect("should import");
        eater.import().expect("should import again");
        assert_eq!(count(&store, EntityKind::ScheduleStopPair), 3);
        assert_eq!(count(&store, EntityKind::RouteStopPattern), 2);
    }

    #[test]
    fn test_destroy_feed_keeps_shared_entities() {
        let (eater, store, journal) = feed_eater(1);
        eater.import().expect("should import");
        let mut config = test_feed::config(1);
        config.feed_onestop_id = String::from("f-9q9-caltrain~mirror");
        let mirror = FeedEater::new(test_feed::feed(), store.clone(), journal, config)
            .expect("valid configuration");
        mirror.import().expect("should import mirror");
        assert_eq!(count(&store, EntityKind::Operator), 1);

        eater
            .destroy_feed()
            .expect("should destroy")
            .expect("identifiers to remove");
        assert_eq!(count(&store, EntityKind::Operator), 1);
        assert_eq!(count(&store, EntityKind::Stop), 3);
        assert_eq!(count(&store, EntityKind::RouteStopPattern), 2);
        let operator = store
            .find::<Operator>(test_feed::OPERATOR_ONESTOP_ID)
            .expect("should read")
            .expect("operator kept");
        assert!(operator
            .identified_by
            .iter()
            .all(|id| id.starts_with("gtfs://f-9q9-caltrain~mirror/")));
        assert_eq!(eater.destroy_feed().expect("should succeed"), None);

        mirror
            .destroy_feed()
            .expect("should destroy")
            .expect("entities to destroy");
        assert_eq!(count(&store, EntityKind::Operator), 0);
        assert_eq!(count(&store, EntityKind::Stop), 0);
    }

    #[test]
    fn test_destroy_feed() {
        let (eater, store, journal) = feed_eater(2);
        eater.import().expect("should import");
        let changeset = eater
            .destroy_feed()
            .expect("should destroy")
            .expect("entities to destroy");
        for kind in [
            EntityKind::Operator,
            EntityKind::Stop,
            EntityKind::Route,
            EntityKind::RouteStopPattern,
            EntityKind::ScheduleStopPair,
        ] {
            assert_eq!(count(&store, kind), 0, "{kind} left after destroy");
        }
        assert!(journal.record(changeset).is_some_and(|r| r.applied));
        assert_eq!(eater.destroy_feed().expect("should succeed"), None);
    }

    #[test]
    fn test_invalid_level_rejected() {
        let store = Arc::new(InMemoryStore::default());
        let journal: Arc<dyn ChangesetJournal> = Arc::new(InMemoryJournal::new(store.clone()));
        let store: Arc<dyn EntityStore> = store;
        let result = FeedEater::new(test_feed::feed(), store, journal, test_feed::config(3));
        assert!(matches!(result, Err(ImportError::InvalidImportLevel(3))));
    }
}
