//! Triplefold CLI - Command-line interface for graph summarization.

mod commands;
mod config;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "triplefold")]
#[command(author, version, about = "Triplefold - capacity-bounded RDF graph summarization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Triplefold project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Reduce a triple file to a bounded, render-ready graph
    Reduce {
        /// JSON file holding an array of triples
        #[arg(short, long)]
        input: String,

        /// Maximum number of visible nodes
        #[arg(short, long)]
        capacity: Option<usize>,

        /// Display value of the node to measure distances from
        #[arg(short, long)]
        root: Option<String>,

        /// Collapse whole stranded components instead of dependents
        #[arg(long)]
        agnostic: bool,

        /// File with prefix declarations, one per line
        #[arg(long)]
        prefixes: Option<String>,

        /// File with whitelist patterns, one per line
        #[arg(long)]
        whitelist: Option<String>,

        /// File with blacklist patterns, one per line
        #[arg(long)]
        blacklist: Option<String>,

        /// Write the bound view to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show what a triple file converts to, without reducing it
    Stats {
        /// JSON file holding an array of triples
        #[arg(short, long)]
        input: String,

        /// File with prefix declarations, one per line
        #[arg(long)]
        prefixes: Option<String>,

        /// File with whitelist patterns, one per line
        #[arg(long)]
        whitelist: Option<String>,

        /// File with blacklist patterns, one per line
        #[arg(long)]
        blacklist: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Reduce {
            input,
            capacity,
            root,
            agnostic,
            prefixes,
            whitelist,
            blacklist,
            output,
        } => commands::reduce::run(
            commands::reduce::ReduceOptions {
                input,
                capacity,
                root,
                agnostic,
                prefixes,
                whitelist,
                blacklist,
                output,
            },
            cli.verbose,
        ),
        Commands::Stats {
            input,
            prefixes,
            whitelist,
            blacklist,
        } => commands::stats::run(
            &input,
            prefixes.as_deref(),
            whitelist.as_deref(),
            blacklist.as_deref(),
        ),
    }
}
