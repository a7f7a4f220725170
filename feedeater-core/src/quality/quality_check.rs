use super::QualityReport;
use crate::changeset::{AppliedChangeset, ChangesetError, EntityStore};

/// a check run over the entities touched by an applied changeset.
pub trait QualityCheck {
    fn name(&self) -> &'static str;

    /// inspects the changeset against the current store. errors reading the
    /// store are returned; findings are reported as issues.
    fn check(
        &self,
        store: &dyn EntityStore,
        changeset: &AppliedChangeset,
    ) -> Result<QualityReport, ChangesetError>;
}
