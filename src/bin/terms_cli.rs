//! Terms CLI
//!
//! Drives the clause version engine from the command line:
//! 1. Load the clause catalog (built-in, or `TERMS_CATALOG_PATH` / `--catalog`)
//! 2. Seed a fresh document (v1 draft)
//! 3. Apply a YAML script of editor intents against the active version
//! 4. Print the resulting editor view and full history as JSON
//!
//! Usage:
//!   cargo run --features cli --bin terms_cli -- catalog
//!   cargo run --features cli --bin terms_cli -- run script.yaml
//!
//! Script format:
//!   - intent: select_clause
//!     key: promoter
//!   - intent: edit_body
//!     body: "The promoter of this campaign is Acme Ltd."
//!   - intent: set_approver
//!     name: Ben Cook
//!   - intent: publish
//!   - intent: new_draft

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;

use cosmohub_terms::{EditorSession, EngineConfig, Intent};

/// Clause-based Terms & Conditions editor engine
#[derive(Parser, Debug)]
#[command(name = "terms_cli")]
#[command(about = "Inspect the clause catalog and replay editor intent scripts")]
struct Args {
    /// YAML clause catalog (overrides TERMS_CATALOG_PATH)
    #[arg(long, short = 'c', global = true)]
    catalog: Option<PathBuf>,

    /// Engine config file (YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the clause catalog as JSON
    Catalog,
    /// Apply an intent script to a fresh document
    Run {
        /// YAML list of intents
        script: PathBuf,
        /// Keep going after a rejected intent
        #[arg(long)]
        keep_going: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_yaml_file(path)?,
        None => EngineConfig::from_env(),
    };
    if let Some(path) = args.catalog {
        config.catalog_path = Some(path);
    }

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let catalog = config.load_catalog()?;

    match args.command {
        Command::Catalog => {
            println!("{}", serde_json::to_string_pretty(catalog.definitions())?);
        }
        Command::Run { script, keep_going } => {
            let yaml = std::fs::read_to_string(&script)
                .with_context(|| format!("Failed to read script {}", script.display()))?;
            let intents: Vec<Intent> = serde_yaml::from_str(&yaml)
                .with_context(|| format!("Failed to parse script {}", script.display()))?;

            let mut session = EditorSession::with_catalog(catalog);
            let mut outcomes = Vec::new();
            let mut rejected = Vec::new();

            for (step, intent) in intents.into_iter().enumerate() {
                match session.apply(intent) {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => {
                        tracing::warn!(step, error = %e, "Intent rejected");
                        rejected.push(json!({ "step": step, "error": e }));
                        if !keep_going {
                            break;
                        }
                    }
                }
            }

            let report = json!({
                "outcomes": outcomes,
                "rejected": rejected,
                "view": session.view(),
                "history": session.engine().history(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);

            if !rejected.is_empty() && !keep_going {
                std::process::exit(2);
            }
        }
    }

    Ok(())
}
