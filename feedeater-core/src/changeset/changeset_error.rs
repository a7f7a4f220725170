use std::path::PathBuf;

use super::ChangesetId;
use crate::model::entity::EntityKind;

#[derive(thiserror::Error, Debug)]
pub enum ChangesetError {
    #[error("change payloads must hold at least one entity")]
    InvalidBatchSize,
    #[error("changeset {0} not found")]
    ChangesetNotFound(ChangesetId),
    #[error("changeset {0} has already been applied")]
    AlreadyApplied(ChangesetId),
    #[error("cannot destroy {0} '{1}', it does not exist")]
    EntityNotFound(EntityKind, String),
    #[error("entity store lock is poisoned: {0}")]
    StoreLock(String),
    #[error("failure reading or writing '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure encoding or decoding change payload: {0}")]
    Json(#[from] serde_json::Error),
}
