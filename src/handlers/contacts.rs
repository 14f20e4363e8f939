use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::contact::{Contact, ContactPatch, CreateContact};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::ContactError;
use crate::validation;

/// GET /api/contacts - All of the caller's contacts, newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let contacts = state.contacts.list(user.id).await?;
    Ok(Json(contacts))
}

/// POST /api/contacts - Create a contact owned by the caller
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateContact>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let Json(payload) = payload?;
    let contact = state.contacts.create(user.id, payload).await?;
    Ok(Json(contact))
}

/// PUT /api/contacts/:id - Update the supplied fields of a contact
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<ContactPatch>, JsonRejection>,
) -> Result<Json<Contact>, ApiError> {
    let id = parse_contact_id(&id)?;
    // Body errors are resolved by the service after the ownership guard
    let patch = payload
        .map(|Json(patch)| patch)
        .map_err(|rejection| vec![validation::body_error(rejection.body_text())]);
    let contact = state.contacts.update(user.id, id, patch).await?;
    Ok(Json(contact))
}

/// DELETE /api/contacts/:id - Remove a contact
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_contact_id(&id)?;
    state.contacts.delete(user.id, id).await?;
    Ok(Json(json!({ "msg": "Contact removed" })))
}

/// Ids that are not UUIDs cannot name a stored contact
fn parse_contact_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::from(ContactError::NotFound))
}
