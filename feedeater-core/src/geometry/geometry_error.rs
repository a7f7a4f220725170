#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("line has {0} distinct coordinate(s), at least 2 are required")]
    LineTooShort(usize),
    #[error("expected {expected} stop distances for pattern '{onestop_id}', found {found}")]
    DistanceCountMismatch {
        onestop_id: String,
        expected: usize,
        found: usize,
    },
}
