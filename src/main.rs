//! `view-router` command line front end.
//!
//! ```text
//! routes.toml ──▶ config loader ──▶ RouteManager (view tree) ──▶ JSON report
//!                      ▲                     ▲
//!                      │                     │
//!                 watcher (watch)      locations from argv
//! ```

use std::error::Error;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use view_router::config::loader::load_config;
use view_router::config::watcher::ConfigWatcher;
use view_router::config::RouterConfig;
use view_router::observability::{logging, metrics};
use view_router::report;

#[derive(Parser)]
#[command(name = "view-router", version)]
#[command(about = "Resolve locations against a hierarchical view route tree", long_about = None)]
struct Cli {
    /// Routes file (TOML). Without it the tree is empty.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides observability.log_level from the routes file.
    #[arg(short, long, value_parser = parse_level)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the routes file and print the route tree
    Check,
    /// Probe a single pattern against a path
    Test { pattern: String, path: String },
    /// Activate locations against the configured views
    Resolve {
        /// Route on the URL fragment
        #[arg(long)]
        hash: bool,
        #[arg(required = true)]
        locations: Vec<String>,
    },
    /// Re-run resolve every time the routes file changes
    Watch {
        /// Route on the URL fragment
        #[arg(long)]
        hash: bool,
        #[arg(required = true)]
        locations: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    let level = cli
        .log_level
        .as_deref()
        .unwrap_or(&config.observability.log_level);
    logging::init(level);

    tracing::debug!(
        config = ?cli.config,
        views = config.routes.len(),
        "view-router starting"
    );

    match cli.command {
        Commands::Check => print_json(&report::describe_tree(&config)?)?,
        Commands::Test { pattern, path } => print_json(&report::probe(&pattern, &path)?)?,
        Commands::Resolve { hash, locations } => {
            print_json(&report::resolve_locations(&config, hash, &locations)?)?
        }
        Commands::Watch { hash, locations } => {
            let path = cli.config.ok_or("watch requires --config")?;
            tokio::runtime::Runtime::new()?.block_on(watch(&path, config, hash, locations))?;
        }
    }

    Ok(())
}

async fn watch(
    path: &Path,
    config: RouterConfig,
    hash: bool,
    locations: Vec<String>,
) -> Result<(), Box<dyn Error>> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    print_json(&report::resolve_locations(&config, hash, &locations)?)?;

    let (watcher, mut updates) = ConfigWatcher::new(path);
    let _handle = watcher.run()?;

    loop {
        tokio::select! {
            update = updates.recv() => {
                let Some(config) = update else { break };
                match report::resolve_locations(&config, hash, &locations) {
                    Ok(reports) => print_json(&reports)?,
                    Err(e) => tracing::error!(error = %e, "Failed to rebuild route tree"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    Ok(())
}

fn parse_level(level: &str) -> Result<String, String> {
    if logging::is_valid_level(level) {
        Ok(level.to_ascii_lowercase())
    } else {
        Err(format!(
            "unknown log level {level:?}, expected one of {}",
            logging::LEVELS.join(", ")
        ))
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
