//! Inferds CLI.

pub mod commands;
pub mod config;
pub mod logging;

use clap::{Parser, Subcommand};

/// Inferds - data structures for inference-serving workloads.
#[derive(Parser, Debug)]
#[command(
    name = "inferds",
    version,
    about = "Hand-built data structures with inference-serving workload demos",
    long_about = "Inferds implements the classic data structures from scratch and\n\
                  demonstrates each one on the kind of workload an inference server\n\
                  runs: token buffers, page tables, ordered schedules, vocabulary\n\
                  tries, and block allocators.\n\n\
                  Structures:\n\
                  • Growable buffer with amortized doubling\n\
                  • Chained hash map with load-factor rehash\n\
                  • AVL tree, binary tree, N-ary tree, trie, Fenwick tree\n\
                  • Adjacency-list, adjacency-matrix, and weighted graphs\n\
                  • Slab-backed linked lists and an LRU cache"
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path.
    #[arg(short, long, global = true, env = "INFERDS_CONFIG")]
    pub config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, global = true, default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,

    /// Override the demo scale from the config file.
    #[arg(short, long, global = true, env = "INFERDS_SCALE")]
    pub scale: Option<usize>,

    /// Override the demo seed from the config file.
    #[arg(long, global = true, env = "INFERDS_SEED")]
    pub seed: Option<u64>,

    /// Enable JSON output.
    #[arg(long, global = true)]
    pub json: bool,
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Demo the linear structures (buffer, lists, ring queue).
    Linear(commands::linear::LinearArgs),

    /// Demo the map structures (chained hash map, LRU cache).
    Maps(commands::maps::MapsArgs),

    /// Demo the tree structures (AVL, binary, N-ary, trie, Fenwick).
    Trees(commands::trees::TreesArgs),

    /// Demo the graph structures and shortest paths.
    Graphs(commands::graphs::GraphsArgs),

    /// Run every demo with default arguments.
    All,

    /// Show version information.
    Version,
}
