//! Application state: the ledger plus display settings behind one explicit
//! struct, loaded fully before any interaction and mutated only through its
//! methods. Replaces ambient globals; a presentation layer renders the
//! view-model this produces.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::{
    aggregate::{self, Totals},
    errors::ValidationError,
    format::{format_currency, format_date_label, CurrencyConfig},
    gateway::PersistenceGateway,
    ledger::{LedgerStore, Transaction},
    settings::{Settings, ThemeSetting},
};

pub struct AppState {
    gateway: Arc<dyn PersistenceGateway>,
    store: LedgerStore,
    settings: Settings,
}

impl AppState {
    /// Loads ledger and settings from the gateway. Awaited at startup so the
    /// presentation layer never reads half-initialized state.
    pub async fn start(gateway: Arc<dyn PersistenceGateway>) -> Self {
        let store = LedgerStore::load(Arc::clone(&gateway)).await;
        let settings = Settings::load(&gateway).await;
        Self {
            gateway,
            store,
            settings,
        }
    }

    pub async fn add(
        &mut self,
        description: &str,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Result<Transaction, ValidationError> {
        self.store.add(description, amount, date).await
    }

    pub async fn remove(&mut self, id: i64) -> bool {
        self.store.remove(id).await
    }

    pub fn transactions(&self) -> &[Transaction] {
        self.store.snapshot()
    }

    pub fn theme(&self) -> ThemeSetting {
        self.settings.theme
    }

    pub async fn toggle_theme(&mut self) -> ThemeSetting {
        self.settings.theme = self.settings.theme.toggled();
        self.settings.save_theme(&self.gateway).await;
        self.settings.theme
    }

    pub fn currency(&self) -> &CurrencyConfig {
        &self.settings.currency
    }

    pub async fn set_currency(&mut self, currency: CurrencyConfig) {
        self.settings.currency = currency;
        self.settings.save_currency(&self.gateway).await;
    }

    /// Render-ready snapshot: overall totals plus date groups with amounts
    /// and labels already formatted for the active currency.
    pub fn view_model(&self) -> LedgerView {
        self.view_model_at(Utc::now().date_naive())
    }

    /// Same as [`view_model`](Self::view_model) with an explicit "today"
    /// reference for the relative date labels.
    pub fn view_model_at(&self, today: NaiveDate) -> LedgerView {
        let currency = &self.settings.currency;
        let totals = aggregate::totals(self.store.snapshot());
        let groups = aggregate::group_by_date(self.store.snapshot())
            .into_iter()
            .map(|group| DateGroupView {
                date: group.date,
                label: format_date_label(group.date, today, currency),
                balance: format_currency(group.date_balance, currency),
                entries: group
                    .transactions
                    .into_iter()
                    .map(|transaction| EntryView {
                        id: transaction.id,
                        description: transaction.description,
                        income: transaction.amount > 0.0,
                        amount: format_currency(transaction.amount.abs(), currency),
                    })
                    .collect(),
            })
            .collect();
        LedgerView {
            balance: format_currency(totals.balance, currency),
            income: format_currency(totals.income, currency),
            expense: format_currency(totals.expense, currency),
            totals,
            groups,
        }
    }
}

/// Everything a presentation layer needs to render the ledger screen.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerView {
    pub totals: Totals,
    pub balance: String,
    pub income: String,
    pub expense: String,
    pub groups: Vec<DateGroupView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateGroupView {
    pub date: NaiveDate,
    pub label: String,
    pub balance: String,
    pub entries: Vec<EntryView>,
}

/// One rendered ledger row. `amount` is formatted unsigned; `income` tells
/// the renderer which sign styling to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryView {
    pub id: i64,
    pub description: String,
    pub income: bool,
    pub amount: String,
}
