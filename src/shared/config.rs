//! Application configuration. Storage backend, paths, listing defaults.

use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" | "" => Ok(Self::Sqlite),
            "memory" | "in-memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding equilibrio.db. Read from EQUILIBRIO_DATA_DIR.
    pub data_dir: Option<String>,

    /// `sqlite` or `memory`. Read from EQUILIBRIO_STORAGE.
    #[serde(default)]
    pub storage: Option<String>,

    /// Insert the default categories at startup. Read from EQUILIBRIO_SEED_DEFAULT_CATEGORIES.
    #[serde(default)]
    pub seed_default_categories: Option<bool>,

    /// Rows per page in listings. Read from EQUILIBRIO_PAGE_SIZE.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("EQUILIBRIO").try_parsing(true));
        if let Ok(path) = std::env::var("EQUILIBRIO_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    /// Falls back to SQLite when unset; an unknown name is an error.
    pub fn storage_or_default(&self) -> Result<StorageBackend, String> {
        self.storage
            .as_deref()
            .map_or(Ok(StorageBackend::Sqlite), str::parse)
    }

    pub fn seed_default_categories_or_default(&self) -> bool {
        self.seed_default_categories.unwrap_or(true)
    }

    /// Zero counts as unset.
    pub fn page_size_or_default(&self) -> u32 {
        self.page_size.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }
}
