use crate::models::{DefaultTabVariant, MySiteTabType};
use crate::utils::error::{Result, WpMobileError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

const KEY_VARIANT_ASSIGNED: &str = "my_site_default_tab_experiment_variant_assigned";
const KEY_EXPERIMENT_VARIANT: &str = "my_site_default_tab_experiment_variant";
const KEY_INITIAL_SCREEN: &str = "my_site_initial_screen";

/// Stored preference value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PrefValue {
    Bool(bool),
    String(String),
}

/// Key/value preference storage
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<PrefValue>>;

    fn set(&self, key: &str, value: PrefValue) -> Result<()>;

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        Ok(match self.get(key)? {
            Some(PrefValue::Bool(b)) => Some(b),
            _ => None,
        })
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(match self.get(key)? {
            Some(PrefValue::String(s)) => Some(s),
            _ => None,
        })
    }
}

fn poisoned(_: impl std::fmt::Display) -> WpMobileError {
    WpMobileError::PreferenceError("preference lock poisoned".to_string())
}

/// Volatile store, used by tests and dry runs
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: RwLock<BTreeMap<String, PrefValue>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key
    pub fn snapshot(&self) -> BTreeMap<String, PrefValue> {
        self.values
            .read()
            .map(|values| values.clone())
            .unwrap_or_default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<PrefValue>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: PrefValue) -> Result<()> {
        let mut values = self.values.write().map_err(poisoned)?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Store persisted as a flat TOML table, rewritten on every change
#[derive(Debug)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, PrefValue>>,
}

impl TomlPreferenceStore {
    /// Open the store at `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let values = if path.exists() {
            let content = fs::read_to_string(&path)?;
            let values: BTreeMap<String, PrefValue> = toml::from_str(&content).map_err(|e| {
                WpMobileError::PreferenceError(format!("Failed to parse {:?}: {}", path, e))
            })?;
            tracing::debug!("Loaded {} preferences from {:?}", values.len(), path);
            values
        } else {
            tracing::debug!("No preferences file at {:?}, starting empty", path);
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, PrefValue>) -> Result<()> {
        let content = toml::to_string_pretty(values).map_err(|e| {
            WpMobileError::PreferenceError(format!("Failed to serialize preferences: {}", e))
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<PrefValue>> {
        let values = self.values.read().map_err(poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: PrefValue) -> Result<()> {
        let mut values = self.values.write().map_err(poisoned)?;
        // Only a successful write becomes visible to readers
        let mut updated = values.clone();
        updated.insert(key.to_string(), value);
        self.flush(&updated)?;
        *values = updated;
        tracing::debug!("Saved preference {} to {:?}", key, self.path);
        Ok(())
    }
}

/// Typed access to the preferences the app cares about
#[derive(Clone)]
pub struct AppPrefs {
    store: Arc<dyn PreferenceStore>,
}

impl AppPrefs {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    pub fn is_my_site_default_tab_experiment_variant_assigned(&self) -> Result<bool> {
        Ok(self.store.get_bool(KEY_VARIANT_ASSIGNED)?.unwrap_or(false))
    }

    pub fn set_my_site_default_tab_experiment_variant_assigned(&self) -> Result<()> {
        self.store.set(KEY_VARIANT_ASSIGNED, PrefValue::Bool(true))
    }

    /// Persist the experiment arm and the initial screen it implies
    pub fn set_initial_screen_from_my_site_default_tab_experiment_variant(
        &self,
        variant: DefaultTabVariant,
    ) -> Result<()> {
        self.store.set(
            KEY_EXPERIMENT_VARIANT,
            PrefValue::String(variant.tracking_label().to_string()),
        )?;
        self.set_my_site_initial_screen(variant.tab())
    }

    pub fn my_site_default_tab_experiment_variant(&self) -> Result<Option<DefaultTabVariant>> {
        Ok(self
            .store
            .get_string(KEY_EXPERIMENT_VARIANT)?
            .map(|label| DefaultTabVariant::from_tracking_label(&label)))
    }

    /// Label of the tab My Site opens on; site menu when nothing was stored
    pub fn my_site_initial_screen(&self) -> Result<String> {
        Ok(self
            .store
            .get_string(KEY_INITIAL_SCREEN)?
            .unwrap_or_else(|| MySiteTabType::SiteMenu.label().to_string()))
    }

    pub fn set_my_site_initial_screen(&self, tab: MySiteTabType) -> Result<()> {
        self.store
            .set(KEY_INITIAL_SCREEN, PrefValue::String(tab.label().to_string()))
    }
}
