use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use tracing::error;

use super::{PersistenceGateway, Result};

/// Remote key-value store scoped to one user session. Reads await the full
/// round trip; writes are fire-and-forget: `set` queues the request on the
/// runtime and returns immediately, and a failed write is logged, never
/// retried. Callers must not assume a write has landed when `set` returns.
pub struct CloudStore {
    client: Client,
    base_url: String,
    session: String,
}

impl CloudStore {
    pub fn new(base_url: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session: session.into(),
        }
    }
}

#[async_trait]
impl PersistenceGateway for CloudStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
        let response = self
            .client
            .get(format!("{}/kv", self.base_url))
            .query(&[
                ("session", self.session.as_str()),
                ("keys", keys.join(",").as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<HashMap<String, String>>().await?)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let request = self
            .client
            .put(format!("{}/kv/{}", self.base_url, key))
            .query(&[("session", self.session.as_str())])
            .body(value.to_string());
        let key = key.to_string();
        tokio::spawn(async move {
            match request.send().await.and_then(|r| r.error_for_status()) {
                Ok(_) => {}
                Err(err) => error!("cloud write for `{}` failed: {}", key, err),
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped_from_the_base_url() {
        let store = CloudStore::new("https://kv.example.com/", "session-token");
        assert_eq!(store.base_url, "https://kv.example.com");
    }
}
