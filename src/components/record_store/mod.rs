mod actor;
pub mod memory;

pub use actor::{RecordStoreActor, RecordStoreHandle};
pub use memory::MemoryRecordStore;

use crate::error::ImportResult;
use async_trait::async_trait;

/// Identifier of a persisted record
pub type RecordId = u64;

/// Identifier of a taxonomy term
pub type TermId = u64;

/// Field key holding the external event identifier
pub const EXTERNAL_ID_KEY: &str = "_p_event_external_id";

/// Record type assigned to every imported event
pub const RECORD_TYPE_EVENT: &str = "tribe_events";

/// Author assigned to every imported event
pub const IMPORT_AUTHOR: u64 = 24;

/// Canonical fields written on every create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    pub title: String,
    pub content: String,
    pub record_type: String,
    pub status: String,
    pub comment_status: String,
    pub ping_status: String,
    pub author: u64,
}

impl RecordFields {
    /// Build the fixed-metadata field set for one imported event
    pub fn for_event(title: &str, content: &str) -> Self {
        Self {
            title: title.to_string(),
            content: content.to_string(),
            record_type: RECORD_TYPE_EVENT.to_string(),
            status: "publish".to_string(),
            comment_status: "closed".to_string(),
            ping_status: "closed".to_string(),
            author: IMPORT_AUTHOR,
        }
    }
}

/// Persistence capability consumed by the reconciler.
///
/// The store guarantees at most one record per external identifier; lookups
/// are indexed, never free-form queries. The host environment serializes
/// imports, so implementations do not need their own locking.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up a record by its external event identifier
    async fn find_by_external_id(&self, external_id: &str) -> ImportResult<Option<RecordId>>;

    /// Create a record and return its identifier
    async fn create_record(&self, fields: &RecordFields) -> ImportResult<RecordId>;

    /// Overwrite the canonical fields of an existing record
    async fn update_record(&self, id: RecordId, fields: &RecordFields) -> ImportResult<()>;

    /// Set a single flat field on a record, creating or overwriting it
    async fn set_field(&self, id: RecordId, key: &str, value: &str) -> ImportResult<()>;

    /// Return the term with this name in the taxonomy, creating it if absent.
    /// Resolving the same name twice returns the same identifier.
    async fn resolve_or_create_term(&self, name: &str, taxonomy: &str)
        -> ImportResult<(TermId, bool)>;

    /// Associate a record with a term; additive, idempotent
    async fn associate_term(&self, id: RecordId, term: TermId, taxonomy: &str)
        -> ImportResult<()>;
}
