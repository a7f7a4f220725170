use super::{GeometryCheck, QualityCheck, QualityReport, StationHierarchyCheck};
use crate::changeset::{AppliedChangeset, EntityStore};

/// `(tests - anomalies) / tests` rounded to five decimals, or 1.0 when nothing
/// was tested.
pub fn distance_score(distance_tests: usize, distance_issues: usize) -> f64 {
    if distance_tests == 0 {
        return 1.0;
    }
    let score = distance_tests.saturating_sub(distance_issues) as f64 / distance_tests as f64;
    (score * 1e5).round() / 1e5
}

/// runs every quality check over an applied changeset. a check that cannot
/// read the store is logged and skipped, so this never fails.
pub fn run_quality_checks(store: &dyn EntityStore, changeset: &AppliedChangeset) -> QualityReport {
    let checks: Vec<Box<dyn QualityCheck>> =
        vec![Box::new(StationHierarchyCheck), Box::new(GeometryCheck)];
    let mut report = QualityReport::default();
    for check in checks.iter() {
        match check.check(store, changeset) {
            Ok(r) => report.merge(r),
            Err(e) => log::error!(
                "changeset {}: {} quality check failed: {e}",
                changeset.id,
                check.name()
            ),
        }
    }
    for issue in report.issues.iter_mut() {
        issue.created_by_changeset_id = Some(changeset.id);
    }

    if let Some(feed) = &changeset.imported_from_feed {
        let score = distance_score(report.distance_tests, report.distance_issues);
        log::info!(
            "feed {feed} imported with distance score {score}: {} stop/pattern positions tested, {} distance issues found",
            report.distance_tests,
            report.distance_issues
        );
        report.distance_score = Some(score);
    }
    report
}
