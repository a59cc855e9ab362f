//! File-backed secure store.
//!
//! Credentials are kept as a JSON object in a single file. The file is
//! rewritten atomically (temp file + rename) and, on unix, restricted to the
//! owner. Writers are serialized through an async mutex so concurrent `set`
//! and `delete` calls cannot lose each other's updates.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::debug;
use tokio::fs;
use tokio::sync::Mutex;

use super::store::{SecureStore, SecureStoreResult};

#[derive(Debug)]
pub struct FileSecureStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSecureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> SecureStoreResult<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> SecureStoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).await?;
        }

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, serde_json::to_vec_pretty(entries)?).await?;
        restrict_permissions(&tmp_path).await?;
        fs::rename(&tmp_path, &self.path).await?;

        debug!(path:% = self.path.display(), entries = entries.len(); "Credential file written");
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[async_trait]
impl SecureStore for FileSecureStore {
    async fn get(&self, key: &str) -> SecureStoreResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> SecureStoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries).await
    }

    async fn delete(&self, key: &str) -> SecureStoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::credentials::SecureStoreError;

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        let store = FileSecureStore::new(&path);
        store.set("access_token", "token-a").await.unwrap();
        store.set("refresh_token", "token-r").await.unwrap();

        let reopened = FileSecureStore::new(&path);
        assert_eq!(reopened.get("access_token").await.unwrap().as_deref(), Some("token-a"));
        assert_eq!(reopened.get("refresh_token").await.unwrap().as_deref(), Some("token-r"));
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileSecureStore::new(dir.path().join("absent.json"));

        assert_eq!(store.get("access_token").await.unwrap(), None);
        store.delete("access_token").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_delete_keeps_other_keys() {
        let dir = tempdir().unwrap();
        let store = FileSecureStore::new(dir.path().join("credentials.json"));
        store.set("access_token", "a").await.unwrap();
        store.set("refresh_token", "r").await.unwrap();

        store.delete("access_token").await.unwrap();

        assert_eq!(store.get("access_token").await.unwrap(), None);
        assert_eq!(store.get("refresh_token").await.unwrap().as_deref(), Some("r"));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileSecureStore::new(&path).get("access_token").await.unwrap_err();
        assert!(matches!(err, SecureStoreError::Serialization(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        FileSecureStore::new(&path).set("access_token", "a").await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
