//! Storage Layer
//!
//! Locates the per-user directories holding the configuration file and the
//! zhuyin dictionary.

use anyhow::Result;
use std::path::PathBuf;

/// File name of the configuration inside the config directory
pub const CONFIG_FILE: &str = "config.toml";
/// Default dictionary file name inside the data directory
pub const DICTIONARY_FILE: &str = "word4k.tsv";

fn project_dirs() -> Result<directories::ProjectDirs> {
    directories::ProjectDirs::from("me", "osku", "ZhuyinLens")
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))
}

/// Get the application data directory
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = project_dirs()?.data_dir().to_path_buf();
    std::fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = project_dirs()?.config_dir().to_path_buf();
    std::fs::create_dir_all(&config_dir)?;

    Ok(config_dir)
}

/// Default location of the dictionary table
pub fn default_dictionary_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(DICTIONARY_FILE))
}
