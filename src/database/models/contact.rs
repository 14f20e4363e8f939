use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::types::Field;

/// One address-book entry, owned by the user who created it.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub owner: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    #[sqlx(rename = "contact_type")]
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Contact {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner == user_id
    }

    /// Merge the supplied fields of `patch` into this record.
    pub fn apply(&mut self, patch: ContactPatch) {
        patch.name.apply_to(&mut self.name);
        patch.email.map(Some).apply_to(&mut self.email);
        patch.phone.map(Some).apply_to(&mut self.phone);
        patch.kind.map(Some).apply_to(&mut self.kind);
    }
}

/// POST body. Everything is optional here so that a missing `name` surfaces
/// as a validation error instead of a deserialization failure. Unknown keys
/// such as `owner` or `user` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// A validated contact ready to be inserted. Owner and timestamp are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewContact {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub kind: Option<String>,
}

/// PUT body: a sparse set of field changes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactPatch {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub phone: Field<String>,
    #[serde(default, rename = "type")]
    pub kind: Field<String>,
}

impl ContactPatch {
    pub fn is_empty(&self) -> bool {
        !(self.name.is_present()
            || self.email.is_present()
            || self.phone.is_present()
            || self.kind.is_present())
    }
}
