use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{error, warn};

use crate::{
    errors::ValidationError,
    gateway::{PersistenceGateway, TRANSACTIONS_KEY},
};

use super::transaction::{IdGenerator, Transaction};

/// Owns the in-memory ledger and writes the whole collection through to the
/// persistence gateway after every mutation. The in-memory state stays
/// authoritative for the session even when a write fails.
pub struct LedgerStore {
    transactions: Vec<Transaction>,
    ids: IdGenerator,
    gateway: Arc<dyn PersistenceGateway>,
}

impl LedgerStore {
    /// Loads the persisted ledger. Absent or unreadable state falls back to
    /// an empty ledger so application start never blocks on bad data.
    pub async fn load(gateway: Arc<dyn PersistenceGateway>) -> Self {
        let transactions = match gateway.get(&[TRANSACTIONS_KEY]).await {
            Ok(mut values) => match values.remove(TRANSACTIONS_KEY) {
                Some(raw) => match serde_json::from_str::<Vec<Transaction>>(&raw) {
                    Ok(parsed) => parsed,
                    Err(err) => {
                        warn!("stored ledger is unreadable, starting empty: {}", err);
                        Vec::new()
                    }
                },
                None => Vec::new(),
            },
            Err(err) => {
                warn!("ledger fetch failed, starting empty: {}", err);
                Vec::new()
            }
        };
        let ids = IdGenerator::seeded(&transactions);
        Self {
            transactions,
            ids,
            gateway,
        }
    }

    /// Validates and appends a new entry, then persists. The date defaults
    /// to today and may not lie in the future. On rejection nothing is
    /// mutated and nothing is written.
    pub async fn add(
        &mut self,
        description: &str,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Result<Transaction, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if !amount.is_finite() {
            return Err(ValidationError::AmountNotFinite);
        }
        if amount == 0.0 {
            return Err(ValidationError::ZeroAmount);
        }
        let today = Utc::now().date_naive();
        let date = date.unwrap_or(today);
        if date > today {
            return Err(ValidationError::FutureDate(date));
        }
        let transaction = Transaction {
            id: self.ids.next(),
            description: description.to_string(),
            amount,
            date,
        };
        self.transactions.push(transaction.clone());
        self.persist().await;
        Ok(transaction)
    }

    /// Removes the entry with the given id, reporting whether anything was
    /// removed. A no-op removal skips the persistence write.
    pub async fn remove(&mut self, id: i64) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.persist().await;
        }
        removed
    }

    /// Current entries in insertion order, for the aggregator.
    pub fn snapshot(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    async fn persist(&self) {
        let json = match serde_json::to_string(&self.transactions) {
            Ok(json) => json,
            Err(err) => {
                error!("ledger serialization failed, skipping write: {}", err);
                return;
            }
        };
        if let Err(err) = self.gateway.set(TRANSACTIONS_KEY, &json).await {
            error!("ledger write failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MemoryStore;

    async fn empty_store() -> (LedgerStore, Arc<MemoryStore>) {
        let gateway = Arc::new(MemoryStore::default());
        let store = LedgerStore::load(Arc::clone(&gateway) as Arc<dyn PersistenceGateway>).await;
        (store, gateway)
    }

    #[tokio::test]
    async fn add_appends_and_returns_the_entry() {
        let (mut store, _gateway) = empty_store().await;
        let created = store.add("Salary", 50_000.0, None).await.expect("valid entry");
        assert_eq!(created.description, "Salary");
        assert_eq!(created.amount, 50_000.0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0], created);
    }

    #[tokio::test]
    async fn add_trims_the_description() {
        let (mut store, _gateway) = empty_store().await;
        let created = store.add("  Coffee  ", -300.0, None).await.expect("valid entry");
        assert_eq!(created.description, "Coffee");
    }

    #[tokio::test]
    async fn rejected_add_leaves_ledger_and_storage_untouched() {
        let (mut store, gateway) = empty_store().await;
        assert_eq!(
            store.add("   ", 100.0, None).await,
            Err(ValidationError::EmptyDescription)
        );
        assert_eq!(store.add("Rent", 0.0, None).await, Err(ValidationError::ZeroAmount));
        assert_eq!(
            store.add("Rent", f64::NAN, None).await,
            Err(ValidationError::AmountNotFinite)
        );
        let tomorrow = Utc::now().date_naive().succ_opt().unwrap();
        assert_eq!(
            store.add("Rent", 100.0, Some(tomorrow)).await,
            Err(ValidationError::FutureDate(tomorrow))
        );
        assert!(store.is_empty());
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn remove_is_idempotent_and_skips_no_op_writes() {
        let (mut store, gateway) = empty_store().await;
        let created = store.add("Coffee", -300.0, None).await.expect("valid entry");
        assert_eq!(gateway.write_count(), 1);

        assert!(store.remove(created.id).await);
        assert_eq!(store.len(), 0);
        assert_eq!(gateway.write_count(), 2);

        assert!(!store.remove(created.id).await);
        assert_eq!(store.len(), 0);
        assert_eq!(gateway.write_count(), 2);
    }

    #[tokio::test]
    async fn load_fails_open_on_corrupt_state() {
        let gateway = Arc::new(MemoryStore::default());
        gateway
            .set(TRANSACTIONS_KEY, "{not json")
            .await
            .expect("memory write");
        let store = LedgerStore::load(Arc::clone(&gateway) as Arc<dyn PersistenceGateway>).await;
        assert!(store.is_empty());
    }
}
