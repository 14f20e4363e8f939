use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::contact::{Contact, ContactPatch, NewContact};
use crate::database::store::ContactStore;

/// In-process `ContactStore` for development and tests. Contents are lost on exit.
#[derive(Default)]
pub struct MemoryContactStore {
    // Kept in insertion order
    contacts: RwLock<Vec<Contact>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_empty(&self) -> bool {
        self.contacts.read().await.is_empty()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Contact>, DatabaseError> {
        let contacts = self.contacts.read().await;
        // Newest insert first, then a stable sort keeps that order on timestamp ties
        let mut owned: Vec<Contact> = contacts
            .iter()
            .rev()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn insert(&self, owner: Uuid, contact: NewContact) -> Result<Contact, DatabaseError> {
        let created = Contact {
            id: Uuid::new_v4(),
            owner,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            kind: contact.kind,
            created_at: Utc::now(),
        };
        self.contacts.write().await.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, DatabaseError> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn update(&self, id: Uuid, patch: ContactPatch) -> Result<Option<Contact>, DatabaseError> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.iter_mut().find(|c| c.id == id).map(|contact| {
            contact.apply(patch);
            contact.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let mut contacts = self.contacts.write().await;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        Ok(contacts.len() < before)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;

    fn new_contact(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            email: None,
            phone: None,
            kind: None,
        }
    }

    #[tokio::test]
    async fn lists_only_the_owners_contacts_newest_first() {
        let store = MemoryContactStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.insert(alice, new_contact("first")).await.unwrap();
        store.insert(bob, new_contact("bob's")).await.unwrap();
        store.insert(alice, new_contact("second")).await.unwrap();

        let listed = store.list_by_owner(alice).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
        assert!(listed.iter().all(|c| c.owner == alice));
    }

    #[tokio::test]
    async fn update_merges_present_fields() {
        let store = MemoryContactStore::new();
        let owner = Uuid::new_v4();
        let created = store.insert(owner, new_contact("Alice")).await.unwrap();

        let patch = ContactPatch {
            phone: Field::Present("555-1234".to_string()),
            ..Default::default()
        };
        let updated = store.update(created.id, patch).await.unwrap().unwrap();

        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.phone.as_deref(), Some("555-1234"));
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_ids() {
        let store = MemoryContactStore::new();
        let missing = Uuid::new_v4();

        assert!(store.update(missing, ContactPatch::default()).await.unwrap().is_none());
        assert!(!store.delete(missing).await.unwrap());
    }

    #[tokio::test]
    async fn delete_removes_the_record() {
        let store = MemoryContactStore::new();
        let created = store.insert(Uuid::new_v4(), new_contact("Alice")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(store.find_by_id(created.id).await.unwrap().is_none());
        assert!(store.is_empty().await);
    }
}
