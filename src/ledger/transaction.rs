use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single signed monetary entry. Positive amounts are income, negative
/// amounts are expenses; entries are never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub date: NaiveDate,
}

/// Generates ledger-unique ids: a microsecond creation timestamp widened
/// with a random sub-microsecond component. Ids are strictly increasing
/// within one generator, so descending id equals reverse creation order
/// even for entries created in the same instant.
#[derive(Debug)]
pub(crate) struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    /// Seeds the generator above everything already in the ledger, keeping
    /// fresh ids ahead of entries loaded from persistence.
    pub fn seeded(transactions: &[Transaction]) -> Self {
        let last = transactions.iter().map(|t| t.id).max().unwrap_or(0);
        Self { last }
    }

    pub fn next(&mut self) -> i64 {
        let micros = Utc::now().timestamp_micros();
        let candidate = micros * 1000 + rand::thread_rng().gen_range(0..1000);
        self.last = candidate.max(self.last + 1);
        self.last
    }
}
