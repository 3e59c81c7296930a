//! In-memory persistence adapters.
//!
//! Storage engines are out of scope for these services: both stores keep
//! their records in a `tokio::sync::RwLock<HashMap<Uuid, _>>` and assign
//! v4 UUIDs on insert. Clones share the same map.

mod in_memory_markets;
mod in_memory_transactions;

pub use in_memory_markets::InMemoryMarketRepository;
pub use in_memory_transactions::InMemoryTransactionRepository;
