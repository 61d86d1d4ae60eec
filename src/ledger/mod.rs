pub mod store;
pub mod transaction;

pub use store::LedgerStore;
pub use transaction::Transaction;
