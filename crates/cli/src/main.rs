use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pod_registration::config::default_config_path;
use pod_registration::{MemoryCaseStore, Pod, PodRegistry, REGISTRATION_POD};
use pod_types::ReadParams;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "casepro-pod", version, about = "Run casepro pods outside the host application")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the panel content a pod produces for a case
    ReadData {
        /// Case to read data for
        #[arg(long)]
        case_id: u64,
        /// Pod configuration file (defaults to CASEPRO_POD_CONFIG_PATH or the user config dir)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
        /// JSON file mapping case ids to contacts, e.g. {"42": {"uuid": "..."}}
        #[arg(long)]
        cases: PathBuf,
        /// Pod identifier
        #[arg(long, default_value = REGISTRATION_POD.identifier)]
        pod: String,
    },
    /// Print the registered pods and their configuration schemas
    Describe,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", pod_util::redact_sensitive(&format!("{:#}", err)));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// `RUST_LOG` when set, `info` otherwise.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

async fn run(command: Command) -> Result<()> {
    let registry = PodRegistry::with_builtin_pods();
    match command {
        Command::ReadData {
            case_id,
            config,
            cases,
            pod,
        } => {
            let config_path = config.unwrap_or_else(default_config_path);
            let raw_config = read_json(&config_path).context("load pod configuration")?;
            let case_store = MemoryCaseStore::from_path(&cases)?;

            let pod = registry.build(&pod, raw_config, Arc::new(case_store))?;
            info!(pod = pod.descriptor().identifier, case_id, "Reading pod data");
            let content = pod.read_data(ReadParams { case_id }).await?;
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Command::Describe => {
            let descriptors: Vec<Value> = registry.descriptors().map(|descriptor| descriptor.summary()).collect();
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
    }
    Ok(())
}

fn read_json(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_controls_the_filter() {
        temp_env::with_var("RUST_LOG", Some("debug"), || {
            assert_eq!(env_filter().to_string(), "debug");
        });
        temp_env::with_var("RUST_LOG", Some("pod_registration=trace"), || {
            assert_eq!(env_filter().to_string(), "pod_registration=trace");
        });
    }

    #[test]
    fn filter_defaults_to_info() {
        temp_env::with_var_unset("RUST_LOG", || {
            assert_eq!(env_filter().to_string(), "info");
        });
    }
}
