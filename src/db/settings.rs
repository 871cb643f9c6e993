use log::debug;
use sled::Db;
use std::path::Path;
use thiserror::Error;

use crate::{
    config::swap::{SETTINGS_KEY, SETTINGS_TREE_NAME},
    models::settings::SwapSettings,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Sled DB error: {0}")]
    SledError(#[from] sled::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub struct SettingsStore {
    db: Db,
}

impl SettingsStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let db = sled::open(path)?;

        Ok(SettingsStore { db })
    }

    /// Stored settings, or the defaults when nothing was saved yet.
    pub fn load(&self) -> Result<SwapSettings, SettingsError> {
        let tree = self.db.open_tree(SETTINGS_TREE_NAME)?;

        match tree.get(SETTINGS_KEY)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => {
                debug!("no stored swap settings, using defaults");

                Ok(SwapSettings::default())
            }
        }
    }

    pub fn save(&self, settings: &SwapSettings) -> Result<(), SettingsError> {
        let tree = self.db.open_tree(SETTINGS_TREE_NAME)?;
        let bytes = serde_json::to_vec(settings)?;

        tree.insert(SETTINGS_KEY, bytes)?;
        self.db.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_defaults_when_empty() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();

        assert_eq!(store.load().unwrap(), SwapSettings::default());
    }

    #[test]
    fn save_and_load_settings() {
        let dir = tempdir().unwrap();
        let settings = SwapSettings {
            chain: "bsc".to_string(),
            slippage: "0.1".to_string(),
        };

        {
            let store = SettingsStore::open(dir.path()).unwrap();
            store.save(&settings).unwrap();
        }

        let reopened = SettingsStore::open(dir.path()).unwrap();

        assert_eq!(reopened.load().unwrap(), settings);
    }

    #[test]
    fn save_overwrites_existing() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        let mut settings = SwapSettings::default();

        store.save(&settings).unwrap();
        settings.slippage = "1".to_string();
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap().slippage, "1");
    }

    #[test]
    fn corrupted_settings_are_an_error() {
        let dir = tempdir().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();

        store
            .db
            .open_tree(SETTINGS_TREE_NAME)
            .unwrap()
            .insert(SETTINGS_KEY, "not json")
            .unwrap();

        assert!(matches!(
            store.load(),
            Err(SettingsError::SerializationError(_))
        ));
    }
}
