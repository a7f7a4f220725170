//! subcommands of the `feedeater` command line tool. imports and destroys run
//! against an in-memory entity store that is read from and written back to a
//! JSON snapshot file.
use std::{fs::File, path::Path, sync::Arc};

use clap::Subcommand;
use feedeater_core::{
    changeset::{
        AppliedChangeset, ChangesetJournal, EntityStore, FileJournal, InMemoryJournal,
        InMemoryStore,
    },
    model::{entity::EntityKind, issue::Issue},
    quality::run_quality_checks,
};
use serde::{Deserialize, Serialize};
use wkt::ToWkt;

use super::{write_issues, FeedSummary};
use crate::{
    config::ImportConfiguration,
    feed::FeedSource,
    import::{FeedEater, ImportError},
};

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum FeedEaterOperation {
    /// import a GTFS archive into an entity store snapshot
    Import {
        /// import configuration file, .toml or .json
        #[arg(long)]
        config: String,
        /// GTFS archive, directory or URL
        #[arg(long)]
        gtfs: String,
        /// snapshot to import into. the import starts from an empty store
        /// when not provided.
        #[arg(long)]
        snapshot_in: Option<String>,
        /// where to write the store after the import
        #[arg(long)]
        snapshot_out: Option<String>,
        /// directory receiving one gzipped changeset file per changeset
        #[arg(long)]
        output_directory: Option<String>,
        /// overrides the import level of the configuration
        #[arg(long)]
        import_level: Option<u8>,
    },
    /// destroy every entity imported from the configured feed
    Destroy {
        #[arg(long)]
        config: String,
        #[arg(long)]
        snapshot_in: String,
        #[arg(long)]
        snapshot_out: String,
        #[arg(long)]
        output_directory: Option<String>,
    },
    /// run the quality checks over every entity of a snapshot
    Check {
        #[arg(long)]
        snapshot: String,
        #[arg(long, default_value_t = String::from("issues.csv.gz"))]
        output_file: String,
    },
    /// summarize the contents of a GTFS archive
    Summary {
        #[arg(long)]
        gtfs: String,
        /// optionally write the feed shapes as `shape_id,geometry` WKT rows
        #[arg(long)]
        shapes_file: Option<String>,
    },
}

impl FeedEaterOperation {
    pub fn run(&self) -> Result<(), ImportError> {
        match self {
            FeedEaterOperation::Import {
                config,
                gtfs,
                snapshot_in,
                snapshot_out,
                output_directory,
                import_level,
            } => {
                let mut configuration = ImportConfiguration::try_from(config)?;
                if let Some(level) = import_level {
                    configuration.import_level = *level;
                }
                let store = Arc::new(load_store(snapshot_in.as_deref())?);
                let journal = open_journal(output_directory.as_deref(), store.clone())?;
                let feed = FeedSource::from_path(gtfs)?;
                let eater = FeedEater::new(feed, store.clone(), journal, configuration)?;
                let summary = eater.import()?;
                println!("{}", serde_json::to_string_pretty(&summary)?);
                if let Some(path) = snapshot_out {
                    store.save_snapshot(Path::new(path))?;
                }
                Ok(())
            }
            FeedEaterOperation::Destroy {
                config,
                snapshot_in,
                snapshot_out,
                output_directory,
            } => {
                let configuration = ImportConfiguration::try_from(config)?;
                let store = Arc::new(load_store(Some(snapshot_in.as_str()))?);
                let journal = open_journal(output_directory.as_deref(), store.clone())?;
                let eater =
                    FeedEater::new(FeedSource::default(), store.clone(), journal, configuration)?;
                match eater.destroy_feed()? {
                    Some(changeset) => log::info!("destroyed feed in changeset {changeset}"),
                    None => log::info!("no entities imported from feed"),
                }
                store.save_snapshot(Path::new(snapshot_out))?;
                Ok(())
            }
            FeedEaterOperation::Check {
                snapshot,
                output_file,
            } => {
                let store = load_store(Some(snapshot.as_str()))?;
                let issues = check_all(&store)?;
                log::info!("{} issues found", issues.len());
                write_issues(Path::new(output_file), &issues)
            }
            FeedEaterOperation::Summary { gtfs, shapes_file } => {
                let feed = FeedSource::from_path(gtfs)?;
                let summary = FeedSummary::from(&feed);
                println!("{}", serde_json::to_string_pretty(&summary)?);
                if let Some(path) = shapes_file {
                    write_shapes(Path::new(path), &feed)?;
                }
                Ok(())
            }
        }
    }
}

fn load_store(snapshot: Option<&str>) -> Result<InMemoryStore, ImportError> {
    match snapshot {
        Some(path) => {
            log::info!("Load snapshot: {path}");
            Ok(InMemoryStore::load_snapshot(Path::new(path))?)
        }
        None => Ok(InMemoryStore::default()),
    }
}

fn open_journal(
    output_directory: Option<&str>,
    store: Arc<dyn EntityStore>,
) -> Result<Arc<dyn ChangesetJournal>, ImportError> {
    match output_directory {
        Some(directory) => Ok(Arc::new(FileJournal::new(Path::new(directory), store)?)),
        None => Ok(Arc::new(InMemoryJournal::new(store))),
    }
}

/// quality checks over the whole store, as if every entity had just changed.
fn check_all(store: &InMemoryStore) -> Result<Vec<Issue>, ImportError> {
    let mut changeset = AppliedChangeset::default();
    for kind in [
        EntityKind::Operator,
        EntityKind::Stop,
        EntityKind::Route,
        EntityKind::RouteStopPattern,
    ] {
        let onestop_ids = store
            .entities(kind)?
            .iter()
            .filter_map(|e| e.onestop_id().map(String::from))
            .collect();
        changeset.touched.insert(kind, onestop_ids);
    }
    Ok(run_quality_checks(store, &changeset).issues)
}

fn write_shapes(path: &Path, feed: &FeedSource) -> Result<(), ImportError> {
    let file = File::create(path).map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(["shape_id", "geometry"])?;
    let mut shape_ids = feed.shapes.keys().collect::<Vec<_>>();
    shape_ids.sort();
    for shape_id in shape_ids {
        if let Some(line) = feed.shapes.get(shape_id) {
            writer.write_record([shape_id.as_str(), line.wkt_string().as_str()])?;
        }
    }
    writer.flush().map_err(|source| ImportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}
