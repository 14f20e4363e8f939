// handlers/mod.rs
//
// Public: `/` and `/health`
// Protected (JWT required): `/api/contacts[/:id]`
pub mod contacts;
pub mod root;
