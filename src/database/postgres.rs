use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::contact::{Contact, ContactPatch, NewContact};
use crate::database::store::ContactStore;

// `seq` only orders rows; it is never selected
const CONTACT_COLUMNS: &str = "id, owner, name, email, phone, contact_type, created_at";

/// `ContactStore` backed by the `contacts` table
#[derive(Clone)]
pub struct PgContactStore {
    pool: PgPool,
}

impl PgContactStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContactStore for PgContactStore {
    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Contact>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM contacts WHERE owner = $1 ORDER BY created_at DESC, seq DESC",
            CONTACT_COLUMNS
        );
        let contacts = sqlx::query_as::<_, Contact>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(contacts)
    }

    async fn insert(&self, owner: Uuid, contact: NewContact) -> Result<Contact, DatabaseError> {
        let sql = format!(
            "INSERT INTO contacts (id, owner, name, email, phone, contact_type) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            CONTACT_COLUMNS
        );
        let created = sqlx::query_as::<_, Contact>(&sql)
            .bind(Uuid::new_v4())
            .bind(owner)
            .bind(contact.name)
            .bind(contact.email)
            .bind(contact.phone)
            .bind(contact.kind)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, DatabaseError> {
        let sql = format!("SELECT {} FROM contacts WHERE id = $1", CONTACT_COLUMNS);
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn update(&self, id: Uuid, patch: ContactPatch) -> Result<Option<Contact>, DatabaseError> {
        // NULL binds leave the column untouched
        let sql = format!(
            "UPDATE contacts SET \
                name = COALESCE($2, name), \
                email = COALESCE($3, email), \
                phone = COALESCE($4, phone), \
                contact_type = COALESCE($5, contact_type) \
             WHERE id = $1 RETURNING {}",
            CONTACT_COLUMNS
        );
        let contact = sqlx::query_as::<_, Contact>(&sql)
            .bind(id)
            .bind(patch.name.into_option())
            .bind(patch.email.into_option())
            .bind(patch.phone.into_option())
            .bind(patch.kind.into_option())
            .fetch_optional(&self.pool)
            .await?;
        Ok(contact)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }

    async fn close(&self) {
        DatabaseManager::close(&self.pool).await;
    }
}
