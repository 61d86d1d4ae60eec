pub mod cloud;
pub mod local;
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::GatewayError;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Persisted key for the serialized transaction array.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Persisted key for the theme name (`"light"` / `"dark"`).
pub const THEME_KEY: &str = "theme";
/// Persisted key for the currency configuration JSON.
pub const CURRENCY_KEY: &str = "currency";

/// Abstraction over the key-value stores a ledger can persist to. One
/// implementation is selected at startup and injected; callers never branch
/// on the backend per call.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Fetches the requested keys. Absent keys are simply missing from the
    /// returned map, not errors.
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>>;

    /// Stores one value. Implementations may complete the write after
    /// returning; a failed write must stay non-fatal to the caller.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub use cloud::CloudStore;
pub use local::LocalStore;
pub use memory::MemoryStore;
