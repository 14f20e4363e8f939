use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::contact::{Contact, ContactPatch, NewContact};

/// Persistence operations the contact service needs.
///
/// Stores do no ownership filtering on single-record operations; callers
/// check `Contact::owner` themselves after `find_by_id`.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts of `owner`, newest first.
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Contact>, DatabaseError>;

    /// Insert a contact for `owner`. The store assigns `id` and `created_at`.
    async fn insert(&self, owner: Uuid, contact: NewContact) -> Result<Contact, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, DatabaseError>;

    /// Apply the present fields of `patch`. Returns `None` if the record vanished.
    async fn update(&self, id: Uuid, patch: ContactPatch) -> Result<Option<Contact>, DatabaseError>;

    /// Hard delete. Returns true if a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;

    /// Liveness check used by `/health`.
    async fn ping(&self) -> Result<(), DatabaseError>;

    /// Release connections on shutdown.
    async fn close(&self) {}
}
