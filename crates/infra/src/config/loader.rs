//! Configuration loader
//!
//! Loads the application configuration from a TOML or JSON file.
//!
//! ## Loading Strategy
//! 1. `SETTLER_CONFIG` environment variable, when set, names the file
//! 2. Otherwise a fixed list of paths is probed
//! 3. Format is detected by file extension
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./settler.toml`
//! 2. `./settler.json`
//! 3. `$HOME/.config/settler/settler.toml`
//!
//! A missing file or a missing key is fatal at startup; there is nothing
//! sensible to reconcile without credentials and a database.

use std::path::{Path, PathBuf};

use settler_domain::{Config, Result, SettlerError};
use tracing::info;

/// Load configuration from the environment-named file or the probe list.
///
/// # Errors
/// Returns `SettlerError::Config` if no file is found, the format is
/// invalid, or required fields are missing.
pub fn load() -> Result<Config> {
    if let Ok(path) = std::env::var("SETTLER_CONFIG") {
        return load_from_file(Path::new(&path));
    }

    for candidate in probe_paths() {
        if candidate.is_file() {
            return load_from_file(&candidate);
        }
    }

    Err(SettlerError::Config(
        "no configuration file found (set SETTLER_CONFIG or provide ./settler.toml)".to_string(),
    ))
}

/// Load configuration from a specific file, TOML or JSON by extension.
///
/// # Errors
/// Returns `SettlerError::Config` on unreadable files, unknown extensions,
/// parse failures and empty store lists.
pub fn load_from_file(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        SettlerError::Config(format!("cannot read config file {}: {err}", path.display()))
    })?;

    let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&contents).map_err(|err| {
            SettlerError::Config(format!("invalid TOML in {}: {err}", path.display()))
        })?,
        Some("json") => serde_json::from_str(&contents).map_err(|err| {
            SettlerError::Config(format!("invalid JSON in {}: {err}", path.display()))
        })?,
        _ => {
            return Err(SettlerError::Config(format!(
                "unsupported config format: {}",
                path.display()
            )))
        }
    };

    validate(&config)?;
    info!(path = %path.display(), stores = config.stores.len(), "configuration loaded");
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.stores.is_empty() {
        return Err(SettlerError::Config("no stores configured".to_string()));
    }
    for store in &config.stores {
        if store.client_id.is_empty() || store.client_secret.is_empty() {
            return Err(SettlerError::Config(format!(
                "store {} is missing API credentials",
                store.name
            )));
        }
    }
    Ok(())
}

fn probe_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("settler.toml"), PathBuf::from("settler.json")];
    if let Some(home) = std::env::var_os("HOME") {
        paths.push(PathBuf::from(home).join(".config").join("settler").join("settler.toml"));
    }
    paths
}
