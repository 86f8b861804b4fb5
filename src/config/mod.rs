// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for Agentdeck.
//!
//! Handles loading and merging of configuration from two sources:
//! - Global config: ~/.agentdeck/config.json
//! - Workspace config: .agentdeck.json in the project root
//!
//! Workspace values win over global values, which win over the defaults.

mod loader;
mod types;

pub use loader::{
    get_global_config_path, load_config_file, load_global_config, load_workspace_config,
    GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILE, WORKSPACE_CONFIG_FILE,
};
pub use types::{DeckConfig, LayoutConfig, ResolvedConfig};

use crate::error::ConfigError;
use std::path::Path;

/// Load and merge all configuration sources for a workspace.
///
/// This is the main entry point for configuration loading.
pub fn load_config(workspace_root: &Path) -> Result<ResolvedConfig, ConfigError> {
    let global = load_global_config()?;
    let workspace = load_workspace_config(workspace_root)?;
    ResolvedConfig::merge(global, workspace)
}
