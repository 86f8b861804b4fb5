// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration file discovery and parsing.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::types::DeckConfig;

/// Directory under the home directory holding global configuration.
pub const GLOBAL_CONFIG_DIR: &str = ".agentdeck";

/// Global configuration file name.
pub const GLOBAL_CONFIG_FILE: &str = "config.json";

/// Workspace configuration file name, looked up in the project root.
pub const WORKSPACE_CONFIG_FILE: &str = ".agentdeck.json";

/// Path to the global config file (~/.agentdeck/config.json), if a home
/// directory can be determined.
pub fn get_global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Load and parse a config file.
///
/// Returns `Ok(None)` when the file does not exist; a file that exists but
/// fails to parse is an error, not a silent default.
pub fn load_config_file(path: &Path) -> Result<Option<DeckConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(path)?;
    let config = serde_json::from_str(&contents).map_err(|err| ConfigError::InvalidFormat(
        format!("{}: {err}", path.display()),
    ))?;
    debug!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// Load the global config, if present.
pub fn load_global_config() -> Result<Option<DeckConfig>, ConfigError> {
    match get_global_config_path() {
        Some(path) => load_config_file(&path),
        None => Ok(None),
    }
}

/// Load the workspace config from the project root, if present.
pub fn load_workspace_config(workspace_root: &Path) -> Result<Option<DeckConfig>, ConfigError> {
    load_config_file(&workspace_root.join(WORKSPACE_CONFIG_FILE))
}
