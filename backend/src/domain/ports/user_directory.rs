//! Driven port for the downstream user store.
//!
//! The facade never persists users itself; every read and write goes through
//! this trait. Adapters own transport details and translate failures into
//! [`UserDirectoryError`].

use async_trait::async_trait;

use crate::domain::{UserId, UserRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The user store could not be reached.
        Transport { message: String } => "user directory transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } => "user directory request timed out: {message}",
        /// The user store answered with a non-success status.
        Status { status: u16, message: String } =>
            "user directory returned status {status}: {message}",
        /// The response body could not be decoded into user records.
        Decode { message: String } => "user directory response could not be decoded: {message}",
        /// The record was missing when read back after an update.
        NotFoundAfterUpdate { id: UserId } => "user {id} not found after update",
    }
}

/// Access to user records held by the downstream store.
///
/// Read failures on [`UserDirectory::get_by_id`] degrade to `None`; every
/// other operation propagates its failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch every record, in store order. A `null` or empty listing is an
    /// empty vector.
    async fn list_all(&self) -> Result<Vec<UserRecord>, UserDirectoryError>;

    /// Fetch one record. Any failure is logged and reported as absent.
    async fn get_by_id(&self, id: UserId) -> Option<UserRecord>;

    /// First record in [`UserDirectory::list_all`] order whose email equals
    /// `email` exactly.
    ///
    /// This is a linear scan over a freshly fetched listing.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserDirectoryError> {
        let records = self.list_all().await?;
        Ok(first_with_email(records, email))
    }

    /// Create a record and return the store's representation, including the
    /// assigned id.
    async fn create(&self, record: &UserRecord) -> Result<UserRecord, UserDirectoryError>;

    /// Replace a record, then read it back.
    ///
    /// Fails with [`UserDirectoryError::NotFoundAfterUpdate`] when the read
    /// back finds nothing. The write itself is not rolled back.
    async fn update(
        &self,
        id: UserId,
        record: &UserRecord,
    ) -> Result<UserRecord, UserDirectoryError>;

    /// Delete a record without confirming the removal.
    async fn delete(&self, id: UserId) -> Result<(), UserDirectoryError>;
}

/// Pick the first record whose email equals `email`.
pub fn first_with_email(records: Vec<UserRecord>, email: &str) -> Option<UserRecord> {
    records.into_iter().find(|record| record.has_email(email))
}
