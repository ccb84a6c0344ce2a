//! Reduce a triple file to a bounded graph view.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use triplefold::prelude::*;

use crate::config::Config;
use crate::input;

pub struct ReduceOptions {
    pub input: String,
    pub capacity: Option<usize>,
    pub root: Option<String>,
    pub agnostic: bool,
    pub prefixes: Option<String>,
    pub whitelist: Option<String>,
    pub blacklist: Option<String>,
    pub output: Option<String>,
}

pub fn run(options: ReduceOptions, verbose: bool) -> Result<()> {
    let config = Config::load()?;
    let capacity = options.capacity.unwrap_or(config.reduce.capacity);
    let preferred = options.root.or(config.reduce.root);
    let policy = if options.agnostic || config.reduce.agnostic {
        CollapsePolicy::Agnostic
    } else {
        CollapsePolicy::Dependency
    };
    let prefix_path = options.prefixes.or(config.filters.prefixes);
    let whitelist_path = options.whitelist.or(config.filters.whitelist);
    let blacklist_path = options.blacklist.or(config.filters.blacklist);

    let triples = input::load_triples(&options.input)?;
    let prefixes = input::load_prefixes(prefix_path.as_deref())?;
    let filter = input::load_filter(whitelist_path.as_deref(), blacklist_path.as_deref())?;

    let graph = build_graph(&triples, &prefixes, &filter);
    if verbose {
        eprintln!(
            "{} triples read, {} admitted, {} distinct nodes",
            triples.len(),
            graph.links.len(),
            graph.nodes.len()
        );
    }

    let summary = match layer_and_collapse(graph, capacity, preferred.as_deref(), policy) {
        Ok(summary) => summary,
        Err(ReduceError::EmptyGraph) => {
            bail!(
                "No triples were admitted from {}; nothing to reduce.",
                options.input.cyan()
            )
        }
        Err(ReduceError::PreferredSourceNodeNotFound(value)) => {
            bail!("Root {} does not match any node's display value.", value.cyan())
        }
    };
    let view = bind_view(&summary, &config.view);

    match options.output {
        Some(path) => {
            let content = serde_json::to_string_pretty(&view)?;
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write view: {path}"))?;

            println!("{} Wrote {}", "✓".green().bold(), path.cyan());
            println!(
                "  Visible nodes:  {}",
                summary.visible_count().to_string().cyan()
            );
            println!(
                "  Hidden nodes:   {}",
                summary.hidden_count().to_string().cyan()
            );
            println!(
                "  Isolated nodes: {}",
                summary.isolated_nodes().len().to_string().cyan()
            );
            if let Some(root) = summary.node(summary.root()) {
                println!("  Root:           {}", root.display_value.cyan());
            }
        }
        None => {
            // bare JSON on stdout so the output can be piped
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
    }

    Ok(())
}
