// Copyright 2026 Agentdeck Authors
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Agentdeck CLI - lay out plan graphs and replay run telemetry offline.

use std::io::BufRead;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::warn;

use agentdeck::config::load_config;
use agentdeck::flow::{edge_paths, layout, FlowEdge, FlowNode};
use agentdeck::run::{decode, EventEnvelope, RunState};
use agentdeck::telemetry::{init_telemetry, TelemetryConfig};

/// Agentdeck - dashboard core for AI agent orchestration.
#[derive(Parser)]
#[command(name = "agentdeck")]
#[command(author, version, about = "Plan graph layout and run telemetry tooling", long_about = None)]
struct Cli {
    /// Workspace root to load configuration from
    #[arg(long, env = "AGENTDECK_WORKSPACE", default_value = ".")]
    workspace: PathBuf,

    /// Show debug output
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the layered layout for a plan graph file and print it as JSON
    Layout {
        /// Plan graph file: {"nodes": [...], "edges": [...]}
        file: PathBuf,

        /// Include renderable edge paths in the output
        #[arg(long)]
        edges: bool,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Fold run event lines from stdin and print the resulting state
    ///
    /// Each line is a JSON object with a "type" field naming the event type;
    /// the remaining fields are the event payload. Lines that fail to parse
    /// are skipped.
    Replay {
        /// Run id to scope to (falls back to the configured default run)
        #[arg(short, long)]
        run: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// On-disk plan graph format consumed by `layout`.
#[derive(Debug, Deserialize)]
struct PlanFile {
    nodes: Vec<FlowNode>,
    #[serde(default)]
    edges: Vec<FlowEdge>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let telemetry = if cli.debug {
        TelemetryConfig::development()
    } else {
        TelemetryConfig::default()
    };
    let _guard = init_telemetry(&telemetry)?;

    let config = load_config(&cli.workspace)?;

    match cli.command {
        Commands::Layout {
            file,
            edges,
            pretty,
        } => {
            let contents = std::fs::read_to_string(&file)?;
            let plan: PlanFile = serde_json::from_str(&contents)?;

            let result = layout(&plan.nodes, &config.metrics)?;
            let output = if edges {
                let paths = edge_paths(&plan.edges, &result, &config.metrics);
                serde_json::json!({ "layout": result, "edges": paths })
            } else {
                serde_json::json!({ "layout": result })
            };
            print_json(&output, pretty)?;
        }

        Commands::Replay { run, pretty } => {
            let scope = run
                .or(config.default_run)
                .ok_or_else(|| anyhow::anyhow!("no run id given and no default run configured"))?;

            let mut state = RunState::new(scope);
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                match parse_event_line(&line) {
                    Some(envelope) => {
                        if let Some(event) = decode(&envelope) {
                            state.apply(&event);
                        }
                    }
                    None => warn!("skipping unparseable event line"),
                }
            }
            print_json(&serde_json::to_value(&state)?, pretty)?;
        }
    }

    Ok(())
}

/// Parse one stdin line into an envelope: the "type" field names the event,
/// everything else is payload.
fn parse_event_line(line: &str) -> Option<EventEnvelope> {
    let mut value: serde_json::Value = serde_json::from_str(line).ok()?;
    let event_type = value.get("type")?.as_str()?.to_string();
    if let Some(obj) = value.as_object_mut() {
        obj.remove("type");
    }
    Some(EventEnvelope::new(event_type, value))
}

fn print_json(value: &serde_json::Value, pretty: bool) -> anyhow::Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}
