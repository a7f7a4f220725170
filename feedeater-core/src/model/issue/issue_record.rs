use serde::{Deserialize, Serialize};

use super::{EntityWithIssue, IssueType};
use crate::changeset::ChangesetId;

/// a quality finding. issues are data attached to a changeset, never errors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub issue_type: IssueType,
    pub details: String,
    pub entities_with_issues: Vec<EntityWithIssue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_changeset_id: Option<ChangesetId>,
}

impl Issue {
    pub fn new(issue_type: IssueType, details: String) -> Issue {
        Issue {
            issue_type,
            details,
            entities_with_issues: vec![],
            created_by_changeset_id: None,
        }
    }

    pub fn with_entity(mut self, onestop_id: &str, entity_attribute: &str) -> Issue {
        self.entities_with_issues
            .push(EntityWithIssue::new(onestop_id, entity_attribute));
        self
    }

    pub fn involves(&self, onestop_id: &str) -> bool {
        self.entities_with_issues
            .iter()
            .any(|e| e.onestop_id == onestop_id)
    }
}
