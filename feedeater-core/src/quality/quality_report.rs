use serde::{Deserialize, Serialize};

use crate::model::issue::Issue;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub issues: Vec<Issue>,
    /// stop positions evaluated for distance accuracy
    pub distance_tests: usize,
    /// `distance_calculation_inaccurate` issues among `issues`
    pub distance_issues: usize,
    /// share of stop positions without distance issues. only reported for
    /// changesets imported from a feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_score: Option<f64>,
}

impl QualityReport {
    pub fn from_issues(issues: Vec<Issue>) -> QualityReport {
        QualityReport {
            issues,
            ..Default::default()
        }
    }

    pub fn merge(&mut self, other: QualityReport) {
        self.issues.extend(other.issues);
        self.distance_tests += other.distance_tests;
        self.distance_issues += other.distance_issues;
    }
}
