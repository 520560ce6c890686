use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::domain::{repositories::contacts::ContactStore, value_objects::contacts::Contact};

/// File-backed [`ContactStore`]: the whole list lives in one JSON array and is
/// rewritten on every mutation. Writes go through a sibling temp file and a
/// rename so a failed write never truncates the existing list.
pub struct JsonFileContactStore {
    path: PathBuf,
}

impl JsonFileContactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ContactStore for JsonFileContactStore {
    async fn load(&self) -> Result<Vec<Contact>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "contact store file absent, starting empty");
            return Ok(Vec::new());
        }

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let contacts = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(contacts)
    }

    async fn save(&self, contacts: &[Contact]) -> Result<()> {
        let raw = serde_json::to_string_pretty(contacts)
            .context("failed to serialize contact list")?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, raw.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .with_context(|| format!("failed to replace {}", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            contact_count = contacts.len(),
            "contact store file rewritten"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> (JsonFileContactStore, PathBuf) {
        let path = std::env::temp_dir().join(format!("contacts-{}.json", Uuid::new_v4()));
        (JsonFileContactStore::new(path.clone()), path)
    }

    fn sample_contact(name: &str) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: "11912345678".to_string(),
            email: None,
            notes: Some("nota; com, separadores".to_string()),
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let (store, path) = temp_store();
        assert!(store.load().await.unwrap().is_empty());
        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let (store, path) = temp_store();
        let contacts = vec![sample_contact("Ana"), sample_contact("Bia")];

        store.save(&contacts).await.unwrap();
        assert_eq!(store.load().await.unwrap(), contacts);

        let _ = tokio::fs::remove_file(path).await;
    }

    #[tokio::test]
    async fn save_overwrites_the_whole_list() {
        let (store, path) = temp_store();

        store.save(&[sample_contact("Ana")]).await.unwrap();
        store.save(&[sample_contact("Bia")]).await.unwrap();

        let contacts = store.load().await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].name, "Bia");

        let _ = tokio::fs::remove_file(path).await;
    }
}
