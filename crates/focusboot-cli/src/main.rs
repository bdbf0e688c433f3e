//! focusboot - application bootstrap launcher
//!
//! Builds the initialization flags for an application runtime and writes the
//! handoff document (`{"mount": ..., "flags": ...}`) as JSON.
//!
//! ## Commands
//!
//! - `launch`: bundled datasets plus focus-point overrides fetched over HTTP
//! - `static`: bundled datasets only
//! - `check-overrides`: fetch the override document and report the decision

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use focusboot_core::{
    BootConfig, FixedViewport, HtmlShell, JsonHandoffRuntime, LaunchReport, Launcher,
    OverrideDecision, OverrideFetcher, StaticDatasets, WindowSize, DEFAULT_BASE_URL,
    DEFAULT_MOUNT_ID,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "focusboot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bootstrap launcher with focus-point overrides", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch overrides, merge them after the base focus points and hand off
    Launch {
        #[command(flatten)]
        target: LaunchTarget,

        /// Origin serving /focus-point-overrides.json
        #[arg(long, env = "FOCUSBOOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },

    /// Hand off the bundled datasets without looking for overrides
    Static {
        #[command(flatten)]
        target: LaunchTarget,
    },

    /// Fetch the override document and print how it was classified
    CheckOverrides {
        /// Origin serving /focus-point-overrides.json
        #[arg(long, env = "FOCUSBOOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,
    },
}

#[derive(Args)]
struct LaunchTarget {
    /// HTML shell containing the mount element
    #[arg(long)]
    shell: PathBuf,

    /// Id of the mount element
    #[arg(long, env = "FOCUSBOOT_MOUNT_ID", default_value = DEFAULT_MOUNT_ID)]
    mount_id: String,

    /// Viewport width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Viewport height
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Directory with names.json and focus-points.json (default: bundled data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write the handoff document here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    focusboot_core::telemetry::init_tracing(cli.json, level);

    match cli.command {
        Commands::Launch { target, base_url } => {
            let config = BootConfig::new(&base_url).with_mount_id(&target.mount_id);
            cmd_launch(&config, &target).await.map(|_| ())
        }
        Commands::Static { target } => {
            let config = BootConfig::from_env().with_mount_id(&target.mount_id);
            cmd_static(&config, &target).await.map(|_| ())
        }
        Commands::CheckOverrides { base_url } => {
            cmd_check_overrides(&BootConfig::new(&base_url)).await
        }
    }
}

fn load_datasets(data_dir: Option<&Path>) -> Result<StaticDatasets> {
    match data_dir {
        Some(dir) => StaticDatasets::from_dir(dir)
            .with_context(|| format!("Failed to load datasets from {:?}", dir)),
        None => StaticDatasets::bundled().context("Bundled datasets are invalid"),
    }
}

fn build_launcher(config: &BootConfig, target: &LaunchTarget) -> Result<Launcher> {
    let datasets = load_datasets(target.data_dir.as_deref())?;
    let shell = HtmlShell::from_path(&target.shell)
        .with_context(|| format!("Failed to read HTML shell: {:?}", target.shell))?;
    let viewport = FixedViewport(WindowSize::new(target.width, target.height));
    let runtime = match &target.out {
        Some(path) => JsonHandoffRuntime::to_file(path),
        None => JsonHandoffRuntime::stdout(),
    };

    Ok(Launcher::new(
        config.clone(),
        datasets,
        Arc::new(shell),
        Arc::new(viewport),
        Arc::new(runtime),
    ))
}

/// Full bootstrap with overrides
async fn cmd_launch(config: &BootConfig, target: &LaunchTarget) -> Result<LaunchReport> {
    let launcher = build_launcher(config, target)?;
    let fetcher = OverrideFetcher::http(config).context("Failed to create HTTP client")?;

    let report = launcher
        .launch(&fetcher)
        .await
        .context("Bootstrap failed")?;
    info!(
        "Handed off {} focus points ({} overrides) to #{}",
        report.total_focus_points(),
        report.override_focus_points,
        report.mount.id
    );
    Ok(report)
}

/// Bootstrap with the base datasets only
async fn cmd_static(config: &BootConfig, target: &LaunchTarget) -> Result<LaunchReport> {
    let launcher = build_launcher(config, target)?;

    let report = launcher
        .launch_static()
        .await
        .context("Bootstrap failed")?;
    info!(
        "Handed off {} focus points to #{}",
        report.total_focus_points(),
        report.mount.id
    );
    Ok(report)
}

async fn cmd_check_overrides(config: &BootConfig) -> Result<()> {
    let fetcher = OverrideFetcher::http(config).context("Failed to create HTTP client")?;
    let decision = fetcher
        .fetch()
        .await
        .context("Failed to fetch override document")?;

    match decision {
        OverrideDecision::Accepted(points) => {
            println!("Overrides accepted: {} focus point(s)", points.len());
        }
        OverrideDecision::Absent(reason) => {
            println!("No overrides ({})", reason);
        }
    }
    Ok(())
}
