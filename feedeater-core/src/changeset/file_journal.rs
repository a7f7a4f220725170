use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use flate2::{write::GzEncoder, Compression};

use super::{
    AppliedChangeset, ChangePayload, ChangesetError, ChangesetId, ChangesetJournal, EntityStore,
    InMemoryJournal,
};

/// a [`ChangesetJournal`] that, on apply, also writes each changeset to
/// `changeset_<id>.jsonl.gz` in its output directory: a header line with the
/// changeset record followed by one change payload per line.
pub struct FileJournal {
    output_directory: PathBuf,
    journal: InMemoryJournal,
}

impl FileJournal {
    pub fn new(
        output_directory: &Path,
        store: Arc<dyn EntityStore>,
    ) -> Result<FileJournal, ChangesetError> {
        std::fs::create_dir_all(output_directory).map_err(|source| ChangesetError::Io {
            path: output_directory.to_path_buf(),
            source,
        })?;
        Ok(FileJournal {
            output_directory: output_directory.to_path_buf(),
            journal: InMemoryJournal::new(store),
        })
    }

    pub fn changeset_path(&self, changeset: ChangesetId) -> PathBuf {
        self.output_directory
            .join(format!("changeset_{changeset}.jsonl.gz"))
    }

    fn write_changeset(&self, changeset: ChangesetId) -> Result<(), ChangesetError> {
        let record = self
            .journal
            .record(changeset)
            .ok_or(ChangesetError::ChangesetNotFound(changeset))?;
        let path = self.changeset_path(changeset);
        let io_error = |source| ChangesetError::Io {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(GzEncoder::new(file, Compression::default()));

        let mut header = record.clone();
        header.payloads = vec![];
        serde_json::to_writer(&mut writer, &header)?;
        writeln!(writer).map_err(io_error)?;
        for payload in record.payloads.iter() {
            serde_json::to_writer(&mut writer, payload)?;
            writeln!(writer).map_err(io_error)?;
        }
        let encoder = writer.into_inner().map_err(|e| io_error(e.into_error()))?;
        encoder.finish().map_err(io_error)?;
        Ok(())
    }
}

impl ChangesetJournal for FileJournal {
    fn create(
        &self,
        imported_from_feed: Option<&str>,
        feed_version: Option<&str>,
        notes: &str,
    ) -> Result<ChangesetId, ChangesetError> {
        self.journal.create(imported_from_feed, feed_version, notes)
    }

    fn add_payload(
        &self,
        changeset: ChangesetId,
        payload: ChangePayload,
    ) -> Result<(), ChangesetError> {
        self.journal.add_payload(changeset, payload)
    }

    fn apply(&self, changeset: ChangesetId) -> Result<AppliedChangeset, ChangesetError> {
        self.write_changeset(changeset)?;
        self.journal.apply(changeset)
    }

    fn destroy_payloads(&self, changeset: ChangesetId) -> Result<(), ChangesetError> {
        self.journal.destroy_payloads(changeset)
    }
}

#[cfg(test)]
mod tests {
    use super::FileJournal;
    use crate::changeset::{ChangeAction, ChangePayload, ChangesetJournal, InMemoryStore};
    use crate::model::entity::{Entity, Operator};
    use flate2::read::GzDecoder;
    use std::{
        fs::File,
        io::{BufRead, BufReader},
        sync::Arc,
    };

    #[test]
    fn test_writes_payload_lines() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let journal = FileJournal::new(dir.path(), Arc::new(InMemoryStore::default()))
            .expect("should create journal");
        let id = journal
            .create(Some("f-9q9-caltrain"), Some("abc123"), "import")
            .expect("should create");
        let operator = Entity::from(Operator::new(
            String::from("o-9q9-caltrain"),
            String::from("Caltrain"),
        ));
        for _ in 0..2 {
            journal
                .add_payload(
                    id,
                    ChangePayload::new(ChangeAction::CreateUpdate, vec![operator.clone()]),
                )
                .expect("should add payload");
        }
        journal.apply(id).expect("should apply");

        let file = File::open(journal.changeset_path(id)).expect("file should exist");
        let lines = BufReader::new(GzDecoder::new(file))
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .expect("should read lines");
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("\"importedFromFeed\":\"f-9q9-caltrain\""));
        assert!(lines[1].starts_with("{\"changes\":[{\"action\":\"createUpdate\""));
    }
}
