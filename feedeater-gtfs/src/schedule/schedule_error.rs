use feedeater_core::changeset::ChangesetError;

#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("malformed trip: {0}")]
    MalformedTrip(String),
    #[error(transparent)]
    Changeset(#[from] ChangesetError),
}
