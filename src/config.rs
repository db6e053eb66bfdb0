//! Configuration file handling.
//!
//! The configuration file is stored at `$EXPENSES_HOME/config.json`. Transactions are stored in
//! `$EXPENSES_HOME/data`.

use crate::clock::SystemClock;
use crate::locale::Locale;
use crate::storage::FileStore;
use crate::store::TransactionStore;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "expenses";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DATA: &str = "data";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$EXPENSES_HOME` and from there it loads `$EXPENSES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    data_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory, the data directory and an initial `config.json`.
    ///
    /// # Errors
    /// - Returns an error if `config.json` already exists or any file operation fails.
    pub fn create(dir: impl Into<PathBuf>, locale: Option<Locale>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).context("Unable to create the expenses home directory")?;
        let root = utils::canonicalize(&maybe_relative)?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!("A config file already exists at '{}'", config_path.display())
        }

        let data_dir = root.join(DATA);
        utils::make_dir(&data_dir)?;

        let config_file = ConfigFile {
            locale,
            ..ConfigFile::default()
        };
        config_file.save(&config_path)?;
        debug!("Created {}", config_path.display());

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that `home` and its config file exist
    /// - load the config file
    /// - validate that the data directory exists
    pub fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative).context("Expenses home is missing")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path)?;

        let data_dir = root.join(DATA);
        if !data_dir.is_dir() {
            bail!("The data directory is missing '{}'", data_dir.display())
        }

        Ok(Self {
            root,
            config_path,
            data_dir,
            config_file,
        })
    }

    /// Loads the configuration in `home`, creating it with defaults on first use.
    pub fn load_or_create(home: impl Into<PathBuf>) -> Result<Self> {
        let home = home.into();
        if home.join(CONFIG_JSON).is_file() {
            Self::load(home)
        } else {
            Self::create(home, None)
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The locale saved in `config.json`, if any.
    pub fn locale(&self) -> Option<Locale> {
        self.config_file.locale
    }

    /// Picks the locale to label days with: `flag` first, then the config file, then the
    /// environment.
    pub fn resolve_locale(&self, flag: Option<Locale>) -> Locale {
        flag.or(self.locale()).unwrap_or_else(Locale::from_env)
    }

    /// The file-backed storage for transactions.
    pub fn storage(&self) -> Result<FileStore> {
        FileStore::new(&self.data_dir)
    }

    /// Opens the transaction store over `storage()` using the system clock.
    pub fn open_store(&self, locale: Locale) -> Result<TransactionStore> {
        Ok(TransactionStore::new(self.storage()?, SystemClock, locale))
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expenses",
///   "config_version": 1,
///   "locale": "ru"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expenses"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Locale for day labels. Taken from the environment when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locale: Option<Locale>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            locale: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or names another app.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data).context("Unable to write config file")
    }
}
