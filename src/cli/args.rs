//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Plant nursery: a greenhouse of sections and plants with care and growth simulation
#[derive(Parser, Debug)]
#[command(name = "nursery")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the stocked nursery as tree
    Tree,

    /// Run the daily care cycle
    Simulate {
        /// Number of days (default: from config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Locate a plant by name
    Find {
        /// Plant name
        name: String,
    },

    /// Simulate, then take the first mature plant of a name
    Sell {
        /// Plant name
        name: String,
        /// Days to grow before selling (default: from config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// List known plants
    Catalog,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
