mod entity_with_issue;
mod issue_record;
mod issue_type;

pub use entity_with_issue::EntityWithIssue;
pub use issue_record::Issue;
pub use issue_type::{IssueCategory, IssueType};
