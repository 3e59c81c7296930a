//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **users**: reqwest clients for the users service (directory lookups
//!   and receipt reports).
//! - **quotes**: reqwest client for the currency quotes API.
//! - **persistence**: in-memory transaction and market stores.
//!
//! Adapters are thin translators between wire or storage shapes and domain
//! types. They contain no business logic.

pub(crate) mod http_support;
pub mod persistence;
pub mod quotes;
pub mod users;
