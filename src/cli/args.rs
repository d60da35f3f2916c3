//! CLI argument definitions using clap

use clap::{Parser, Subcommand};

/// Hierarchical tag management for personal task lists
#[derive(Parser, Debug)]
#[command(name = "rstag")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase debug output (-d, -dd, -ddd)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show tags as a tree
    Tree {
        /// Tag specs, nested with '/' (e.g. work/urgent/today)
        specs: Vec<String>,
    },

    /// List every tag with its id
    List {
        /// Tag specs, nested with '/'
        specs: Vec<String>,
    },

    /// Count tags
    Count {
        /// Tag specs, nested with '/'
        specs: Vec<String>,
        /// Count root-level tags only
        #[arg(long)]
        roots: bool,
    },

    /// Generate distinct label colors
    Colors {
        /// Number of colors to generate
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
