//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **user_directory**: reqwest-backed client for the downstream user store.
//!
//! Adapters are thin translators between domain types and transport
//! representations. They contain no business logic.

pub mod user_directory;
