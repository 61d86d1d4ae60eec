#![doc(test(attr(deny(warnings))))]

//! Pocket Ledger is the core of a personal finance tracker: an in-memory
//! transaction ledger with write-through persistence to a pluggable
//! key-value gateway, plus pure aggregation and display formatting.

pub mod aggregate;
pub mod app;
pub mod errors;
pub mod format;
pub mod gateway;
pub mod ledger;
pub mod settings;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("pocket_ledger=info".parse().unwrap());
        fmt().with_env_filter(filter).init();

        tracing::info!("Pocket Ledger tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
