use itertools::Itertools;

use super::{ChangeAction, ChangePayload, ChangesetError, ChangesetId, ChangesetJournal};
use crate::model::entity::Entity;

/// splits entity lists into bounded change payloads and submits them to a
/// changeset.
#[derive(Debug, Clone, Copy)]
pub struct ChangeBatcher {
    pub max_entities: usize,
}

impl ChangeBatcher {
    pub fn new(max_entities: usize) -> Result<ChangeBatcher, ChangesetError> {
        if max_entities == 0 {
            return Err(ChangesetError::InvalidBatchSize);
        }
        Ok(ChangeBatcher { max_entities })
    }

    /// `ceil(n / max)` batches in input order; only the last may be short.
    pub fn chunk<T>(entities: Vec<T>, max: usize) -> Result<Vec<Vec<T>>, ChangesetError> {
        if max == 0 {
            return Err(ChangesetError::InvalidBatchSize);
        }
        let chunks = entities
            .into_iter()
            .chunks(max)
            .into_iter()
            .map(|c| c.collect_vec())
            .collect_vec();
        Ok(chunks)
    }

    /// adds one payload per batch to the changeset. a payload that the journal
    /// rejects is logged along with the error and the failure is returned.
    pub fn submit(
        &self,
        journal: &dyn ChangesetJournal,
        changeset: ChangesetId,
        action: ChangeAction,
        entities: Vec<Entity>,
    ) -> Result<usize, ChangesetError> {
        let mut submitted = 0;
        for batch in ChangeBatcher::chunk(entities, self.max_entities)? {
            let payload = ChangePayload::new(action, batch);
            let count = payload.len();
            let json = serde_json::to_string(&payload)?;
            if let Err(e) = journal.add_payload(changeset, payload) {
                log::error!("changeset {changeset}: failed to add change payload: {e}");
                log::error!("{json}");
                return Err(e);
            }
            submitted += count;
        }
        Ok(submitted)
    }
}
