use std::{
    collections::HashMap,
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use dirs::home_dir;

use super::{PersistenceGateway, Result};

const DEFAULT_DIR_NAME: &str = ".pocket_ledger";
const TMP_SUFFIX: &str = "tmp";

/// Key-value store backed by one file per key under a local directory.
/// Writes are staged to a temporary file and renamed into place, and they
/// complete before `set` returns.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Default store location: `$POCKET_LEDGER_HOME` when set, otherwise
    /// `~/.pocket_ledger`.
    pub fn new_default() -> Result<Self> {
        if let Some(custom) = env::var_os("POCKET_LEDGER_HOME") {
            return Self::new(PathBuf::from(custom));
        }
        let root = home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME);
        Self::new(root)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", canonical_key(key)))
    }
}

#[async_trait]
impl PersistenceGateway for LocalStore {
    async fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>> {
        let mut values = HashMap::new();
        for key in keys {
            let path = self.key_path(key);
            if !path.exists() {
                continue;
            }
            values.insert((*key).to_string(), fs::read_to_string(path)?);
        }
        Ok(values)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key);
        let tmp = tmp_path(&path);
        write_file(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "key".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (LocalStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = LocalStore::new(temp.path()).expect("local store");
        (store, temp)
    }

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let (store, _guard) = store_with_temp_dir();
        store.set("transactions", "[]").await.expect("write");
        let values = store.get(&["transactions"]).await.expect("read");
        assert_eq!(values.get("transactions").map(String::as_str), Some("[]"));
    }

    #[tokio::test]
    async fn absent_keys_are_missing_not_errors() {
        let (store, _guard) = store_with_temp_dir();
        let values = store.get(&["transactions", "theme"]).await.expect("read");
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn overwrites_replace_the_previous_value() {
        let (store, _guard) = store_with_temp_dir();
        store.set("theme", "light").await.expect("write");
        store.set("theme", "dark").await.expect("write");
        let values = store.get(&["theme"]).await.expect("read");
        assert_eq!(values.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        assert_eq!(canonical_key("Transactions"), "transactions");
        assert_eq!(canonical_key("../theme"), "___theme");
        assert_eq!(canonical_key("  "), "key");
    }
}
