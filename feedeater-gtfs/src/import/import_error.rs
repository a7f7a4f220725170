use std::path::PathBuf;

use feedeater_core::{changeset::ChangesetError, model::onestop::OnestopIdError};

use crate::schedule::ScheduleError;

#[derive(thiserror::Error, Debug)]
pub enum ImportError {
    #[error("no operators found in feed")]
    NoOperatorsFound,
    #[error("invalid import level {0}, must be 0, 1 or 2")]
    InvalidImportLevel(u8),
    #[error("invalid import configuration: {0}")]
    InvalidConfiguration(String),
    #[error("malformed feed: {0}")]
    MalformedFeed(String),
    #[error("{failed} of {total} schedule chunks failed")]
    ScheduleChunksFailed { failed: usize, total: usize },
    #[error("failure building worker pool: {0}")]
    WorkerPool(String),
    #[error("failure creating progress bar: {0}")]
    ProgressBar(String),
    #[error("failure reading or writing '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failure reading GTFS: {0}")]
    Gtfs(#[from] gtfs_structures::Error),
    #[error(transparent)]
    Changeset(#[from] ChangesetError),
    #[error(transparent)]
    Onestop(#[from] OnestopIdError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("failure writing CSV: {0}")]
    Csv(#[from] csv::Error),
}
