//! gutwise-prompts - inspect and drive prompt cooldowns
//!
//! Composition root for the cooldown policies:
//! - Configuration loading (config file or built-in prompts)
//! - Store initialization (SQLite in the data directory, optional)
//! - One policy per prompt, driven by the system clock

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gutwise_config::{load_config, PromptsConfig};
use gutwise_core::{CooldownPolicy, PromptRegistry, PromptStatus};
use gutwise_store::{KeyValueStore, SqliteStore};
use gutwise_util::{
    default_config_path, format_duration, format_timestamp, is_mock_time_active, store_path,
    PromptId, SystemClock,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// gutwise-prompts - Inspect and drive GutWise prompt cooldowns
#[derive(Parser, Debug)]
#[command(name = "gutwise-prompts")]
#[command(about = "Inspect and drive GutWise prompt cooldowns", long_about = None)]
struct Args {
    /// Configuration file (default: ~/.config/gutwise/prompts.toml, built-in prompts if absent)
    #[arg(short, long, env = "GUTWISE_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory override (or set GUTWISE_DATA_DIR env var)
    #[arg(short, long, env = "GUTWISE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Print machine-readable JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every configured prompt and its status
    List,

    /// Show one prompt's status
    Status { prompt: String },

    /// Record that the prompt was presented
    Shown { prompt: String },

    /// Dismiss the prompt
    Dismiss {
        prompt: String,

        /// Dismissal length in minutes (default: the prompt's configured duration)
        #[arg(short, long)]
        minutes: Option<u64>,
    },

    /// Clear stored state
    Reset { prompt: String },
}

#[derive(Debug, Serialize)]
struct PromptReport<'a> {
    prompt: &'a PromptId,
    #[serde(flatten)]
    status: PromptStatus,
}

fn load_prompts(args: &Args) -> Result<PromptsConfig> {
    if let Some(path) = &args.config {
        return load_config(path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let path = default_config_path();
    if path.exists() {
        load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
    } else {
        debug!(path = %path.display(), "No config file; using built-in prompts");
        Ok(PromptsConfig::builtin())
    }
}

/// Open the prompt store. Failure is not fatal: prompts fail open.
fn open_store(data_dir: &Path) -> Option<Arc<dyn KeyValueStore>> {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        warn!(data_dir = %data_dir.display(), error = %e, "Cannot create data directory; running without store");
        return None;
    }

    let db_path = store_path(data_dir);
    match SqliteStore::open(&db_path) {
        Ok(store) => {
            if store.is_healthy() {
                info!(db_path = %db_path.display(), "Store initialized");
            } else {
                warn!(db_path = %db_path.display(), "Store opened but failed its health check");
            }
            Some(Arc::new(store))
        }
        Err(e) => {
            warn!(db_path = %db_path.display(), error = %e, "Cannot open store; running without store");
            None
        }
    }
}

fn print_status(policy: &CooldownPolicy, json: bool) -> Result<()> {
    let report = PromptReport {
        prompt: policy.prompt(),
        status: policy.status(),
    };

    if json {
        println!("{}", serde_json::to_string(&report)?);
        return Ok(());
    }

    let status = &report.status;
    let verdict = match status.eligible_at {
        None => "can show".to_string(),
        Some(at) => format!(
            "hidden until {} (in {})",
            format_timestamp(at),
            format_duration(at.saturating_duration_until(status.now))
        ),
    };
    println!("{}: {}", report.prompt, verdict);

    if let Some(last) = status.state.last_shown {
        println!("  last shown:      {}", format_timestamp(last));
    }
    if let Some(until) = status.state.dismissed_until {
        println!("  dismissed until: {}", format_timestamp(until));
    }

    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = load_prompts(&args)?;
    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| config.store.data_dir.clone());

    let store = open_store(&data_dir);
    let registry = PromptRegistry::new(&config, Arc::new(SystemClock), store);

    match &args.command {
        Command::List => {
            for policy in registry.iter() {
                print_status(policy, args.json)?;
            }
        }
        Command::Status { prompt } => {
            print_status(registry.get(&PromptId::new(prompt.as_str()))?, args.json)?;
        }
        Command::Shown { prompt } => {
            let policy = registry.get(&PromptId::new(prompt.as_str()))?;
            policy.mark_shown();
            print_status(policy, args.json)?;
        }
        Command::Dismiss { prompt, minutes } => {
            let policy = registry.get(&PromptId::new(prompt.as_str()))?;
            match minutes {
                Some(m) => policy.dismiss_for(Duration::from_secs(m.saturating_mul(60))),
                None => policy.dismiss(),
            }
            print_status(policy, args.json)?;
        }
        Command::Reset { prompt } => {
            let policy = registry.get(&PromptId::new(prompt.as_str()))?;
            policy.reset();
            print_status(policy, args.json)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "gutwise-prompts starting");

    if is_mock_time_active() {
        warn!("Mock time is active; timestamps do not reflect the real clock");
    }

    run(args)
}
