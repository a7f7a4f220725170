use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex, MutexGuard,
    },
};

use super::{
    changeset_journal::apply_changes, AppliedChangeset, ChangePayload, ChangesetError,
    ChangesetId, ChangesetJournal, ChangesetRecord, EntityStore,
};

/// a [`ChangesetJournal`] that keeps changesets in memory and applies them
/// to a shared [`EntityStore`].
pub struct InMemoryJournal {
    store: Arc<dyn EntityStore>,
    changesets: Mutex<BTreeMap<ChangesetId, ChangesetRecord>>,
    next_id: AtomicU64,
}

impl InMemoryJournal {
    pub fn new(store: Arc<dyn EntityStore>) -> InMemoryJournal {
        InMemoryJournal {
            store,
            changesets: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn store(&self) -> Arc<dyn EntityStore> {
        self.store.clone()
    }

    pub fn record(&self, changeset: ChangesetId) -> Option<ChangesetRecord> {
        self.lock().ok()?.get(&changeset).cloned()
    }

    pub fn records(&self) -> Result<Vec<ChangesetRecord>, ChangesetError> {
        Ok(self.lock()?.values().cloned().collect())
    }

    fn lock(
        &self,
    ) -> Result<MutexGuard<'_, BTreeMap<ChangesetId, ChangesetRecord>>, ChangesetError> {
        self.changesets
            .lock()
            .map_err(|e| ChangesetError::StoreLock(e.to_string()))
    }
}

impl ChangesetJournal for InMemoryJournal {
    fn create(
        &self,
        imported_from_feed: Option<&str>,
        feed_version: Option<&str>,
        notes: &str,
    ) -> Result<ChangesetId, ChangesetError> {
        let id = ChangesetId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = ChangesetRecord {
            id,
            imported_from_feed: imported_from_feed.map(String::from),
            feed_version: feed_version.map(String::from),
            notes: notes.to_string(),
            payloads: vec![],
            applied: false,
        };
        self.lock()?.insert(id, record);
        Ok(id)
    }

    fn add_payload(
        &self,
        changeset: ChangesetId,
        payload: ChangePayload,
    ) -> Result<(), ChangesetError> {
        let mut changesets = self.lock()?;
        let record = changesets
            .get_mut(&changeset)
            .ok_or(ChangesetError::ChangesetNotFound(changeset))?;
        if record.applied {
            return Err(ChangesetError::AlreadyApplied(changeset));
        }
        record.payloads.push(payload);
        Ok(())
    }

    fn apply(&self, changeset: ChangesetId) -> Result<AppliedChangeset, ChangesetError> {
        let record = {
            let changesets = self.lock()?;
            let record = changesets
                .get(&changeset)
                .ok_or(ChangesetError::ChangesetNotFound(changeset))?;
            if record.applied {
                return Err(ChangesetError::AlreadyApplied(changeset));
            }
            record.clone()
        };
        let applied = apply_changes(self.store.as_ref(), &record)?;
        if let Some(r) = self.lock()?.get_mut(&changeset) {
            r.applied = true;
        }
        log::debug!(
            "changeset {changeset} applied: {} payload(s), {} schedule stop pair(s)",
            record.payloads.len(),
            applied.schedule_stop_pairs
        );
        Ok(applied)
    }

    fn destroy_payloads(&self, changeset: ChangesetId) -> Result<(), ChangesetError> {
        let mut changesets = self.lock()?;
        let record = changesets
            .get_mut(&changeset)
            .ok_or(ChangesetError::ChangesetNotFound(changeset))?;
        record.payloads.clear();
        Ok(())
    }
}
