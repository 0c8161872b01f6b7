//! Process configuration and startup wiring.

use std::path::PathBuf;

use anyhow::Context;

use assetstock_observability::LogFormat;

use crate::persistence::FilePersistenceStore;
use crate::store::InventoryStore;

pub const DATA_DIR_VAR: &str = "ASSETSTOCK_DATA_DIR";
pub const LOG_VAR: &str = "ASSETSTOCK_LOG";
pub const LOG_FORMAT_VAR: &str = "ASSETSTOCK_LOG_FORMAT";

const APP_DIR: &str = "assetstock";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Directory holding one JSON file per collection.
    pub data_dir: PathBuf,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    pub log_format: LogFormat,
}

impl InventoryConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let data_dir = match lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .with_context(|| format!("invalid {LOG_FORMAT_VAR}"))?,
            None => LogFormat::default(),
        };

        Ok(Self {
            data_dir,
            log_filter,
            log_format,
        })
    }
}

/// `{os data dir}/assetstock`, falling back to `~/.local/share/assetstock`.
fn default_data_dir() -> anyhow::Result<PathBuf> {
    let mut dir = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory or home directory")?;
    dir.push(APP_DIR);
    Ok(dir)
}

/// Initialize logging, open the file-backed store and load both collections.
pub fn bootstrap(config: &InventoryConfig) -> anyhow::Result<InventoryStore<FilePersistenceStore>> {
    assetstock_observability::init(&config.log_filter, config.log_format);

    let persistence = FilePersistenceStore::open(config.data_dir.clone()).with_context(|| {
        format!("failed to open data directory at {:?}", config.data_dir)
    })?;
    let store = InventoryStore::open(persistence).context("failed to load inventory")?;

    tracing::info!(data_dir = %config.data_dir.display(), "inventory ready");
    Ok(store)
}
