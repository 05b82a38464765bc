//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for generated or stored exhibitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Title, rooms and quality scores
    Summary,
    /// Every room, exhibit, timeline event and enrichment
    Full,
    /// JSON output
    Json,
}

/// CLI arguments for museum-curator
#[derive(Parser, Debug)]
#[command(name = "museum-curator")]
#[command(author, version, about = "Generate museum exhibitions from a topic")]
#[command(long_about = r#"
Museum Curator turns a topic into a complete virtual exhibition.

A fixed pipeline of agents analyzes the topic, researches it, writes
exhibits, arranges them into themed rooms, adds narrative, timeline,
interactive and accessibility content, then evaluates and refines the
result before storing it.

Configuration files are loaded from (in priority order):
1. CURATOR_<SECTION>__<KEY>                 Environment variables
2. --config <path>                          Explicit config file
3. ./curator.toml                           Project-level config
4. ~/.config/museum-curator/config.toml     Global config

Example:
  museum-curator generate "The Silk Road"
  museum-curator generate "Ancient Egyptian astronomy" --output json
  museum-curator list --limit 5
  museum-curator show 3 --output full
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the full pipeline for a topic and store the exhibition
    Generate {
        /// The exhibition topic
        topic: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Skip the image generation stage
        #[arg(long)]
        no_images: bool,
    },

    /// List recently stored exhibitions
    List {
        /// Maximum number of exhibitions to list
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show a stored exhibition
    Show {
        /// Exhibition id as printed by `generate` or `list`
        id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}
