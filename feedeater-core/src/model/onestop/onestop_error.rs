use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OnestopIdError {
    #[error("cannot create Onestop ID for '{0}': no coordinates")]
    MissingCoordinates(String),
    #[error("cannot create Onestop ID: name required")]
    MissingName,
    #[error("invalid Onestop ID '{0}': {1}")]
    InvalidOnestopId(String, String),
    #[error("unknown Onestop ID prefix '{0}'")]
    UnknownPrefix(String),
    #[error("failure computing geohash: {0}")]
    GeohashError(String),
}
