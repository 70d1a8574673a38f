//! Persistence layer for the welcome plugin configuration.
//!
//! Admin commands mutate the in-memory [`WelcomeConfig`] and flush it through
//! a [`ConfigStore`] before acknowledging the command. The default
//! implementation, [`FileConfigStore`], serializes the snapshot to a JSON file
//! in the data directory.

use log::{error, info, warn};
use mockall::automock;
use tokio::fs;

use crate::config::WelcomeConfig;

/// Write-through persistence for the plugin configuration.
///
/// This trait abstracts the storage operation so the command handlers can be
/// tested with mocks, counting exactly how many writes a command performs.
#[automock]
pub trait ConfigStore {
    /// Persists the full configuration snapshot.
    ///
    /// Must be durable on return: the command handlers acknowledge a mutation
    /// to the user only after this call succeeds.
    async fn save(&self, config: &WelcomeConfig) -> anyhow::Result<()>;
}

/// File-backed [`ConfigStore`] keeping the snapshot as JSON.
///
/// # Examples
///
/// ```no_run
/// # use nihao::store::{ConfigStore, FileConfigStore};
/// # async fn example() -> anyhow::Result<()> {
/// let store = FileConfigStore::new("./data/config.json".to_owned());
///
/// // Restore the snapshot from a previous run, if any
/// let config = store.load().await.unwrap_or_default();
///
/// // Later, after a mutation
/// store.save(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FileConfigStore {
    /// Path to the JSON file where the snapshot is stored.
    path: String,
}

impl FileConfigStore {
    /// Creates a new store for the given file path.
    pub fn new(path: String) -> Self {
        FileConfigStore { path }
    }

    /// Loads the persisted configuration snapshot from disk.
    ///
    /// # Returns
    ///
    /// * `Some(WelcomeConfig)` - A snapshot persisted by a previous run
    /// * `None` - No snapshot exists, or the file could not be deserialized
    ///
    /// # Error Handling
    ///
    /// - Missing file: logs a warning and returns `None`
    /// - Corrupt file: logs an error and returns `None`
    ///
    /// Either way the bot can still start, falling back to the configuration
    /// file values.
    pub async fn load(&self) -> Option<WelcomeConfig> {
        let Ok(serialized) = fs::read_to_string(&self.path).await else {
            warn!("no persisted plugin config found, using configuration file values");
            return None;
        };

        let Ok(config) = serde_json::from_str(&serialized) else {
            error!("failed to deserialize persisted plugin config, ignoring it");
            return None;
        };

        info!("loaded persisted plugin config {}", serialized);

        Some(config)
    }
}

impl ConfigStore for FileConfigStore {
    /// Serializes the snapshot to JSON and writes it to the configured path.
    ///
    /// Unlike loading, a failed save is propagated to the caller: the command
    /// handlers roll back the in-memory mutation so memory and disk stay
    /// consistent.
    async fn save(&self, config: &WelcomeConfig) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(config)?;
        fs::write(&self.path, serialized).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn create_test_config() -> WelcomeConfig {
        WelcomeConfig {
            is_send_welcome: true,
            is_at: false,
            welcome_text: "欢迎".to_owned(),
            welcome_groups: vec!["100".to_owned(), "200".to_owned()],
            monitor_groups: HashSet::from(["300".to_owned()]),
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_none() {
        let store = FileConfigStore::new("/nonexistent/dir/config.json".to_owned());
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_load_corrupt_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileConfigStore::new(path.to_str().unwrap().to_owned());
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_returns_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::new(path.to_str().unwrap().to_owned());

        let config = create_test_config();
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::new(path.to_str().unwrap().to_owned());

        let mut config = create_test_config();
        store.save(&config).await.unwrap();

        config.welcome_groups.push("400".to_owned());
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.welcome_groups.last().unwrap(), "400");
    }

    #[tokio::test]
    async fn test_save_to_unwritable_path_fails() {
        let store = FileConfigStore::new("/nonexistent/dir/config.json".to_owned());
        assert!(store.save(&create_test_config()).await.is_err());
    }
}
