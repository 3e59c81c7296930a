//! Driven port for resolving usernames against the external users service.
//!
//! The settlement pipeline pairs users by position, so implementations must
//! return users in exactly the order the usernames were supplied, omitting
//! names the service does not know. The pipeline realigns the answer and
//! rejects users nobody asked for, so a misbehaving directory cannot swap or
//! substitute parties.

use async_trait::async_trait;

use crate::domain::DirectoryUser;

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while resolving users.
    pub enum UserDirectoryError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "user directory transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "user directory timeout: {message}",
        /// The directory answered with a non-success status.
        Status { status: u16, message: String } =>
            "user directory returned status {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "user directory response decode failed: {message}",
    }
}

/// Port for resolving an ordered list of usernames to balance snapshots.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve `usernames`, preserving order.
    async fn resolve_users(
        &self,
        usernames: &[String],
    ) -> Result<Vec<DirectoryUser>, UserDirectoryError>;
}
