// Entry persistence: the store seam, boundary validation, and the HTTP handlers.

pub mod handlers;
pub mod store;
pub mod validation;

pub use store::{EntryStore, InMemoryEntryStore, PgEntryStore};
