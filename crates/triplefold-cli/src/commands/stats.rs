//! Show what a triple file converts to.

use anyhow::Result;
use colored::Colorize;
use triplefold::prelude::*;

use crate::config::Config;
use crate::input;

pub fn run(
    input: &str,
    prefixes: Option<&str>,
    whitelist: Option<&str>,
    blacklist: Option<&str>,
) -> Result<()> {
    let config = Config::load()?;
    let prefix_path = prefixes.map(str::to_string).or(config.filters.prefixes);
    let whitelist_path = whitelist.map(str::to_string).or(config.filters.whitelist);
    let blacklist_path = blacklist.map(str::to_string).or(config.filters.blacklist);

    let triples = input::load_triples(input)?;
    let prefix_table = input::load_prefixes(prefix_path.as_deref())?;
    let filter = input::load_filter(whitelist_path.as_deref(), blacklist_path.as_deref())?;

    let graph = build_graph(&triples, &prefix_table, &filter);
    let deduped = dedup_links(graph.links.clone());
    let (isolated, connected) = split_isolated(graph.nodes.clone(), &deduped);

    let mut literals = 0;
    let mut resources = 0;
    for node in &graph.nodes {
        match node.term_type {
            TermType::Literal => literals += 1,
            _ => resources += 1,
        }
    }

    println!("{}", "Triplefold Conversion Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Input".blue().bold());
    println!("  Triples:           {}", triples.len().to_string().cyan());
    println!("  Admitted:          {}", graph.links.len().to_string().cyan());
    println!("  Prefixes known:    {}", prefix_table.len().to_string().cyan());
    println!();

    println!("{}", "Graph Structure".blue().bold());
    println!("  Distinct nodes:    {}", graph.nodes.len().to_string().cyan());
    println!("  Resource nodes:    {}", resources.to_string().cyan());
    println!("  Literal nodes:     {}", literals.to_string().cyan());
    println!("  Links:             {}", graph.links.len().to_string().cyan());
    println!("  Deduplicated:      {}", deduped.len().to_string().cyan());
    println!("  Connected nodes:   {}", connected.len().to_string().cyan());
    println!("  Isolated nodes:    {}", isolated.len().to_string().cyan());
    println!();

    match select_root(&graph.nodes, None) {
        Ok(root_id) => {
            if let Some(root) = graph.nodes.iter().find(|n| n.id == root_id) {
                println!("{}", "Root Candidate".blue().bold());
                println!("  {}", root.display_value.white().bold());
                println!(
                    "  {} links",
                    root.link_count.to_string().cyan()
                );
                println!();
            }
        }
        Err(_) => {
            println!("{} No root candidate: nothing was admitted.", "•".yellow());
            println!();
            return Ok(());
        }
    }

    let mut by_degree: Vec<&GraphNode> = graph.nodes.iter().collect();
    by_degree.sort_by(|a, b| b.link_count.cmp(&a.link_count).then(a.id.cmp(&b.id)));

    println!("{}", "Most Connected".blue().bold());
    for (i, node) in by_degree.iter().take(5).enumerate() {
        let rank = format!("{}.", i + 1);
        println!(
            "  {} {} {}",
            rank.blue(),
            node.display_value.white().bold(),
            format!("({} links)", node.link_count).dimmed()
        );
    }

    println!();
    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
