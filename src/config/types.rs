// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::flow::LayoutMetrics;

/// Partial layout overrides as written in a config file.
///
/// Every field is optional; absent fields fall back to the built-in
/// [`LayoutMetrics`] defaults or whatever a lower-precedence source set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_height: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_x: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_y: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_canvas_width: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_canvas_height: Option<f64>,
}

impl LayoutConfig {
    /// Apply these overrides on top of the given metrics.
    fn apply(&self, metrics: &mut LayoutMetrics) {
        if let Some(v) = self.node_width {
            metrics.node_width = v;
        }
        if let Some(v) = self.node_height {
            metrics.node_height = v;
        }
        if let Some(v) = self.margin_x {
            metrics.margin_x = v;
        }
        if let Some(v) = self.margin_y {
            metrics.margin_y = v;
        }
        if let Some(v) = self.padding {
            metrics.padding = v;
        }
        if let Some(v) = self.min_canvas_width {
            metrics.min_canvas_width = v;
        }
        if let Some(v) = self.min_canvas_height {
            metrics.min_canvas_height = v;
        }
    }
}

/// Configuration file contents (global or workspace).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckConfig {
    /// Layout metric overrides.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutConfig>,

    /// Run id the dashboard opens on startup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_run: Option<String>,
}

/// Fully merged configuration, ready to use.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub metrics: LayoutMetrics,
    pub default_run: Option<String>,
}

impl ResolvedConfig {
    /// Merge config sources over the defaults: workspace wins over global.
    pub fn merge(
        global: Option<DeckConfig>,
        workspace: Option<DeckConfig>,
    ) -> Result<Self, ConfigError> {
        let mut metrics = LayoutMetrics::default();
        let mut default_run = None;

        for source in [global, workspace].into_iter().flatten() {
            if let Some(layout) = &source.layout {
                layout.apply(&mut metrics);
            }
            if source.default_run.is_some() {
                default_run = source.default_run;
            }
        }

        validate_metrics(&metrics)?;
        Ok(Self {
            metrics,
            default_run,
        })
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            default_run: None,
        }
    }
}

/// Dimensions must be positive; margins and padding must be non-negative.
fn validate_metrics(metrics: &LayoutMetrics) -> Result<(), ConfigError> {
    let positive = [
        ("layout.nodeWidth", metrics.node_width),
        ("layout.nodeHeight", metrics.node_height),
        ("layout.minCanvasWidth", metrics.min_canvas_width),
        ("layout.minCanvasHeight", metrics.min_canvas_height),
    ];
    for (field, value) in positive {
        if value.is_nan() || value <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("must be positive, got {value}"),
            });
        }
    }

    let non_negative = [
        ("layout.marginX", metrics.margin_x),
        ("layout.marginY", metrics.margin_y),
        ("layout.padding", metrics.padding),
    ];
    for (field, value) in non_negative {
        if value.is_nan() || value < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                message: format!("must be non-negative, got {value}"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_defaults_when_empty() {
        let resolved = ResolvedConfig::merge(None, None).unwrap();
        assert_eq!(resolved, ResolvedConfig::default());
    }

    #[test]
    fn test_workspace_wins_over_global() {
        let global = DeckConfig {
            layout: Some(LayoutConfig {
                node_width: Some(200.0),
                padding: Some(10.0),
                ..Default::default()
            }),
            default_run: Some("global-run".to_string()),
        };
        let workspace = DeckConfig {
            layout: Some(LayoutConfig {
                node_width: Some(300.0),
                ..Default::default()
            }),
            default_run: None,
        };

        let resolved = ResolvedConfig::merge(Some(global), Some(workspace)).unwrap();
        assert_eq!(resolved.metrics.node_width, 300.0); // workspace wins
        assert_eq!(resolved.metrics.padding, 10.0); // global survives
        assert_eq!(resolved.default_run.as_deref(), Some("global-run"));
    }

    #[test]
    fn test_validation_rejects_nan() {
        let workspace = DeckConfig {
            layout: Some(LayoutConfig {
                padding: Some(f64::NAN),
                ..Default::default()
            }),
            default_run: None,
        };
        assert!(ResolvedConfig::merge(None, Some(workspace)).is_err());
    }

    #[test]
    fn test_validation_rejects_zero_width() {
        let workspace = DeckConfig {
            layout: Some(LayoutConfig {
                node_width: Some(0.0),
                ..Default::default()
            }),
            default_run: None,
        };
        assert!(ResolvedConfig::merge(None, Some(workspace)).is_err());
    }

    #[test]
    fn test_layout_config_deserialization() {
        let config: DeckConfig =
            serde_json::from_str(r#"{"layout": {"nodeWidth": 100}}"#).unwrap();
        assert_eq!(config.layout.unwrap().node_width, Some(100.0));
    }
}
