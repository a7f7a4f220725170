//! interfaces to the entity store and changeset journal, the wire format of
//! change payloads, and in-process implementations of both collaborators.
mod change_batcher;
mod change_payload;
mod changeset_error;
mod changeset_id;
mod changeset_journal;
mod entity_store;
mod file_journal;
mod in_memory_journal;
mod in_memory_store;

pub use change_batcher::ChangeBatcher;
pub use change_payload::{Change, ChangeAction, ChangePayload};
pub use changeset_error::ChangesetError;
pub use changeset_id::ChangesetId;
pub use changeset_journal::{AppliedChangeset, ChangesetJournal, ChangesetRecord};
pub use entity_store::{EntityStore, EntityStoreExt};
pub use file_journal::FileJournal;
pub use in_memory_journal::InMemoryJournal;
pub use in_memory_store::InMemoryStore;
