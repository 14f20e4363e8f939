pub mod contact;

pub use contact::{Contact, ContactPatch, CreateContact, NewContact};
