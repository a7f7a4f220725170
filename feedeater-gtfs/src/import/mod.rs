//! runs an import of one feed into the entity store through the changeset
//! journal, at the configured import level.
mod feed_eater;
mod import_error;
mod import_level;
mod import_summary;

pub use feed_eater::FeedEater;
pub use import_error::ImportError;
pub use import_level::ImportLevel;
pub use import_summary::ImportSummary;
