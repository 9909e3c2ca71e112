use std::path::PathBuf;

use clap::{Parser, Subcommand};
use trickset_core::engine::MAX_DECKS;
use trickset_core::model::requirement::RequirementKind;

use crate::config::{ConfigError, TricksetsConfig};

/// Plan how many sets of each trick a shared pool of decks can supply.
#[derive(Debug, Parser)]
#[command(
    name = "tricksets",
    author,
    version,
    about = "Trick set manager: share a pool of card decks between tricks"
)]
pub struct Cli {
    /// Path to the YAML configuration file (defaults to ./tricksets.yaml when present).
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Override the trick definition file.
    #[arg(long, value_name = "FILE", global = true)]
    pub store: Option<PathBuf>,

    /// Override the number of decks in the pool.
    #[arg(short, long, value_name = "DECKS", global = true, value_parser = clap::value_parser!(u32).range(1..=MAX_DECKS as i64))]
    pub decks: Option<u32>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show every trick with its requirements.
    List,
    /// Create a new trick (named "New Trick <id>" unless given).
    AddTrick {
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a trick.
    RemoveTrick { id: u32 },
    /// Rename a trick.
    Rename { id: u32, name: String },
    /// Include a trick in calculations.
    Activate { id: u32 },
    /// Exclude a trick from calculations.
    Deactivate { id: u32 },
    /// Append a requirement to a trick.
    AddRequirement {
        id: u32,
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        #[arg(long, default_value = "identical", value_parser = parse_kind)]
        kind: RequirementKind,
    },
    /// Replace the requirement at INDEX.
    SetRequirement {
        id: u32,
        index: usize,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        #[arg(long, value_parser = parse_kind)]
        kind: RequirementKind,
    },
    /// Delete the requirement at INDEX.
    RemoveRequirement { id: u32, index: usize },
    /// Compute each trick alone and the shared allocation.
    Calculate {
        /// Emit the report as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn parse_kind(value: &str) -> Result<RequirementKind, String> {
    value.parse()
}

impl Cli {
    /// Load the configuration, apply command-line overrides, then validate
    /// the result.
    pub fn resolve_config(&self) -> Result<TricksetsConfig, ConfigError> {
        let mut config = TricksetsConfig::discover(self.config.as_deref())?;

        if let Some(store) = self.store.as_ref() {
            config.store = store.display().to_string();
        }

        if let Some(decks) = self.decks {
            config.decks = decks;
        }

        if let Some(level) = self.log_level.as_ref() {
            config.logging.tracing_level = level.clone();
        }

        config.validated()
    }
}
