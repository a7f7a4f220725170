use std::{fs::File, path::Path};

use feedeater_core::model::issue::Issue;
use flate2::{write::GzEncoder, Compression};
use itertools::Itertools;
use serde::Serialize;

use crate::import::ImportError;

#[derive(Serialize)]
struct IssueRow<'a> {
    issue_type: &'a str,
    details: &'a str,
    /// `onestop_id:attribute` pairs separated by `;`
    entities: String,
    changeset: Option<u64>,
}

impl<'a> From<&'a Issue> for IssueRow<'a> {
    fn from(issue: &'a Issue) -> Self {
        IssueRow {
            issue_type: issue.issue_type.as_str(),
            details: &issue.details,
            entities: issue
                .entities_with_issues
                .iter()
                .map(|e| format!("{}:{}", e.onestop_id, e.entity_attribute))
                .join(";"),
            changeset: issue.created_by_changeset_id.map(|id| id.0),
        }
    }
}

/// writes issues as a gzipped CSV file with a header row.
pub fn write_issues(path: &Path, issues: &[Issue]) -> Result<(), ImportError> {
    let io_error = |source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = csv::Writer::from_writer(GzEncoder::new(file, Compression::default()));
    for issue in issues.iter() {
        writer.serialize(IssueRow::from(issue))?;
    }
    let encoder = writer
        .into_inner()
        .map_err(|e| io_error(std::io::Error::other(e.to_string())))?;
    encoder.finish().map_err(io_error)?;
    Ok(())
}
