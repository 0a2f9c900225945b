//! Record store contract.

use async_trait::async_trait;
use uuid::Uuid;

use hookblocks_core::result::AppResult;
use hookblocks_entity::record::{ContentRecord, CreateRecord};

/// Persistence for content records.
///
/// Implementations assign IDs on create and maintain `updated_at`. Purging
/// trashed records is left to the implementation.
#[async_trait]
pub trait RecordStore: Send + Sync + std::fmt::Debug + 'static {
    /// Create a new draft record.
    async fn create(&self, data: CreateRecord) -> AppResult<ContentRecord>;

    /// Find a record by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ContentRecord>>;

    /// Overwrite a stored record, status included. Returns the stored version.
    async fn update(&self, record: &ContentRecord) -> AppResult<ContentRecord>;

    /// Permanently delete a record. Returns `true` if it existed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// All records in creation order.
    async fn find_all(&self) -> AppResult<Vec<ContentRecord>>;

    /// Published records with a non-empty hook name, ordered by `order`
    /// ascending, then by ID.
    async fn find_active(&self) -> AppResult<Vec<ContentRecord>>;
}
