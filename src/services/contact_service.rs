use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::contact::{Contact, ContactPatch, CreateContact};
use crate::database::store::ContactStore;
use crate::validation::{self, FieldError};

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error("Invalid contact: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),
    #[error("Contact not found")]
    NotFound,
    #[error("Not authorized")]
    NotAuthorized,
    #[error("Store error: {0}")]
    Store(#[from] DatabaseError),
}

/// Per-user contact operations. Every mutation goes through the
/// existence-then-ownership guard in `owned_contact`.
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ContactStore> {
        &self.store
    }

    /// All of the caller's contacts, newest first
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Contact>, ContactError> {
        let contacts = self.store.list_by_owner(user_id).await?;
        debug!("Listed {} contacts for user {}", contacts.len(), user_id);
        Ok(contacts)
    }

    /// Validate and insert a contact owned by the caller
    pub async fn create(&self, user_id: Uuid, payload: CreateContact) -> Result<Contact, ContactError> {
        let new_contact = validation::validate_create(payload).map_err(ContactError::Validation)?;
        let contact = self.store.insert(user_id, new_contact).await?;
        debug!("Created contact {} for user {}", contact.id, user_id);
        Ok(contact)
    }

    /// Apply a sparse patch to one of the caller's contacts.
    ///
    /// `patch` arrives unresolved: body errors are only reported once the
    /// caller is known to own an existing record.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        patch: Result<ContactPatch, Vec<FieldError>>,
    ) -> Result<Contact, ContactError> {
        let existing = self.owned_contact(user_id, id).await?;

        let patch = patch.map_err(ContactError::Validation)?;
        validation::validate_patch(&patch).map_err(ContactError::Validation)?;
        if patch.is_empty() {
            return Ok(existing);
        }

        // A concurrent delete between the guard and the write reads as not found
        let updated = self.store.update(id, patch).await?.ok_or(ContactError::NotFound)?;
        debug!("Updated contact {} for user {}", id, user_id);
        Ok(updated)
    }

    /// Remove one of the caller's contacts
    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), ContactError> {
        self.owned_contact(user_id, id).await?;

        if !self.store.delete(id).await? {
            return Err(ContactError::NotFound);
        }
        debug!("Deleted contact {} for user {}", id, user_id);
        Ok(())
    }

    /// Existence first, ownership second: a missing id is `NotFound` for
    /// every caller, and only an existing record can be `NotAuthorized`.
    async fn owned_contact(&self, user_id: Uuid, id: Uuid) -> Result<Contact, ContactError> {
        let contact = self.store.find_by_id(id).await?.ok_or(ContactError::NotFound)?;
        if !contact.is_owned_by(user_id) {
            return Err(ContactError::NotAuthorized);
        }
        Ok(contact)
    }
}
