// Copyright (c) 2025 - Cowboy AI, Inc.
//! MAAS Bridge CLI
//!
//! Applies, reads, deletes, or imports a bridge interface on a MAAS machine.
//! Desired state is a JSON `BridgeSpec`; the managed state is a JSON
//! `BridgeState` file that this tool keeps up to date.
//!
//! Run with: cargo run --bin maas-bridge -- --help
//!
//! Prerequisites:
//! 1. MAAS API reachable (via MAAS_URL environment variable)
//! 2. MAAS API key set (via MAAS_API_KEY environment variable)

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use maas_bridge::adapters::{MaasClient, MaasConfig};
use maas_bridge::{BridgeReconciler, BridgeSpec, BridgeState, Resource};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Manage a bridge interface on a MAAS machine
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the MAAS region version
    Version,

    /// Create or update the bridge described by a spec file
    Apply {
        /// Desired bridge (JSON)
        spec: PathBuf,

        /// State file to create or update; printed to stdout when omitted
        state: Option<PathBuf>,
    },

    /// Refresh the bridge state, dropping it if the bridge is gone
    Read {
        /// State file
        state: PathBuf,
    },

    /// Delete the bridge tracked by a state file
    Delete {
        /// State file
        state: PathBuf,
    },

    /// Import an existing bridge
    Import {
        /// MACHINE:NETWORK_INTERFACE (MAC address, name, or id)
        id: String,

        /// State file to write; printed to stdout when omitted
        state: Option<PathBuf>,
    },
}

fn load_state(path: &Path) -> Result<Option<BridgeState>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read state {}", path.display()))?;
    let state = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid state file {}", path.display()))?;
    Ok(Some(state))
}

fn write_state(path: Option<&Path>, state: &BridgeState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    match path {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write state {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

async fn apply(
    reconciler: &BridgeReconciler<MaasClient>,
    spec_path: &Path,
    state_path: Option<&Path>,
) -> Result<()> {
    let raw = std::fs::read_to_string(spec_path)
        .with_context(|| format!("Failed to read spec {}", spec_path.display()))?;
    let spec: BridgeSpec = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid spec {}", spec_path.display()))?;

    let existing = match state_path {
        Some(path) => load_state(path)?,
        None => None,
    };

    let state = match existing {
        Some(mut state) if state.is_created() => {
            info!("Updating bridge {} on {}", state.id, spec.machine);
            reconciler.update(&spec, &mut state).await?;
            state
        }
        _ => {
            info!("Creating bridge on {} ({})", spec.machine, spec.mac_address);
            let mut state = BridgeState::default();
            let result = reconciler.create(&spec, &mut state).await;
            if result.is_err() && state.is_created() {
                // keep the id so the next apply updates instead of adopting
                write_state(state_path, &state)?;
            }
            result?;
            state
        }
    };

    write_state(state_path, &state)
}

async fn read(reconciler: &BridgeReconciler<MaasClient>, state_path: &Path) -> Result<()> {
    let Some(mut state) = load_state(state_path)? else {
        bail!("No state at {}", state_path.display());
    };

    match reconciler.read(&mut state).await {
        Ok(()) => write_state(Some(state_path), &state),
        // only a remote 404 for the interface itself means the bridge is gone
        Err(e) if e.is_not_found() => {
            warn!("Bridge {} is gone, dropping {}", state.id, state_path.display());
            std::fs::remove_file(state_path)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

async fn delete(reconciler: &BridgeReconciler<MaasClient>, state_path: &Path) -> Result<()> {
    let Some(state) = load_state(state_path)? else {
        bail!("No state at {}", state_path.display());
    };

    reconciler.delete(&state).await?;
    std::fs::remove_file(state_path)?;
    info!("Deleted bridge {}", state.id);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = MaasConfig::from_env().context("Run with MAAS_URL and MAAS_API_KEY set")?;
    info!("MAAS URL: {}", config.base_url);
    let client = MaasClient::new(config)?;

    match cli.command {
        Command::Version => {
            let version = client.version().await?;
            println!("{} {}", version.version, version.subversion);
        }
        Command::Apply { spec, state } => {
            apply(&BridgeReconciler::new(client), &spec, state.as_deref()).await?;
        }
        Command::Read { state } => read(&BridgeReconciler::new(client), &state).await?,
        Command::Delete { state } => delete(&BridgeReconciler::new(client), &state).await?,
        Command::Import { id, state } => {
            let imported = BridgeReconciler::new(client).import(&id).await?;
            write_state(state.as_deref(), &imported)?;
        }
    }

    Ok(())
}
