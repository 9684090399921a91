use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};

use crate::filters::{Query, filter_entries, parse_conditions};
use crate::loader::{Catalog, DataSource, load_catalog};
use crate::models::RepoEntry;
use crate::sort::{SortDirection, SortField, SortState, sort_entries};
use crate::tui::run_interactive;
use crate::utils::resolve_data_location;

#[derive(Parser)]
#[command(name = "stargazer")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search a snapshot of starred GitHub repositories", long_about = None)]
pub struct Cli {
    /// Snapshot location: a directory or an HTTP base URL
    #[arg(long, global = true)]
    pub data: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the catalog interactively
    Browse,
    /// Print repositories matching a query
    Search {
        /// Free-text query matched against repository key and description
        query: Option<String>,
        /// Conditions, e.g. "stars:greater_than:100 AND lists:includes:ml"
        #[arg(long)]
        filter: Option<String>,
        /// Sort field: stars, name, updated_at, created_at, pushed_at,
        /// starred_at, arxiv_published, arxiv_updated
        #[arg(long, default_value = "starred_at")]
        sort: String,
        /// Sort direction: asc or desc
        #[arg(long, default_value = "desc")]
        direction: String,
        /// Print at most this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show statistics about the snapshot
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Browse) => {
            let catalog = load(&cli)?;
            run_interactive(catalog)?;
        }
        Some(Commands::Search { query, filter, sort, direction, limit }) => {
            let catalog = load(&cli)?;
            run_search(
                &catalog,
                query.as_deref(),
                filter.as_deref(),
                sort,
                direction,
                *limit,
            )?;
        }
        Some(Commands::Stats) => {
            let location = resolve_data_location(cli.data.as_deref());
            let catalog = load(&cli)?;
            show_stats(&catalog, &location);
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

fn load(cli: &Cli) -> Result<Catalog> {
    let location = resolve_data_location(cli.data.as_deref());
    let source = DataSource::parse(&location);
    load_catalog(&source)
}

fn run_search(
    catalog: &Catalog,
    query_text: Option<&str>,
    filter: Option<&str>,
    sort: &str,
    direction: &str,
    limit: Option<usize>,
) -> Result<()> {
    let conditions = match filter {
        Some(expr) => parse_conditions(expr)?,
        None => Vec::new(),
    };
    let field = SortField::parse(sort).ok_or_else(|| anyhow!("Unknown sort field: '{}'", sort))?;
    let dir = SortDirection::parse(direction)
        .ok_or_else(|| anyhow!("Unknown sort direction: '{}' (use asc or desc)", direction))?;

    let query = Query { text: query_text.unwrap_or_default().to_string(), conditions };
    let mut indices = filter_entries(&catalog.entries, &catalog.papers, &query);
    sort_entries(&mut indices, &catalog.entries, &catalog.papers, SortState {
        field,
        direction: dir,
    });

    let total = indices.len();
    let shown = limit.map_or(total, |n| total.min(n));
    for &idx in &indices[..shown] {
        println!("{}", search_row(&catalog.entries[idx]));
    }

    if shown < total {
        println!("\n{} of {} matching repositories shown", shown, total);
    } else {
        println!("\n{} matching repositories", total);
    }

    Ok(())
}

/// One search result line: key, stars, language, tags, arXiv id
fn search_row(entry: &RepoEntry) -> String {
    let meta = &entry.repo.metadata;
    let mut segments = vec![format!("★{}", meta.stars)];

    segments.push(meta.language.clone().unwrap_or_else(|| "-".to_string()));

    if !entry.repo.lists.is_empty() {
        segments.push(format!("[{}]", entry.repo.lists.join(",")));
    }

    if let Some(id) = &entry.arxiv_id {
        segments.push(format!("arXiv:{}", id));
    }

    format!("{} | {}", entry.key, segments.join(" | "))
}

fn show_stats(catalog: &Catalog, location: &str) {
    let linked = catalog.entries.iter().filter(|e| e.arxiv_id.is_some()).count();

    println!("Starred Repository Statistics");
    println!("================================");
    println!("Total repositories: {}", catalog.len());
    println!("  With arXiv papers: {}", linked);
    println!("  Paper records: {}", catalog.papers.len());
    println!();
    println!("Data location: {}", location);

    if let Some(updated) = &catalog.last_updated {
        println!("Snapshot updated: {}", updated.format("%Y-%m-%d %H:%M:%S"));
    }

    print_top("Top languages", catalog.entries.iter().filter_map(|e| {
        e.repo.metadata.language.as_deref().filter(|l| !l.is_empty())
    }));
    print_top(
        "Top lists",
        catalog.entries.iter().flat_map(|e| e.repo.lists.iter().map(String::as_str)),
    );

    let newest = catalog
        .entries
        .iter()
        .filter_map(|e| e.repo.metadata.starred_at.map(|ts| (ts, &e.key)))
        .max_by_key(|(ts, _)| *ts);
    let oldest = catalog
        .entries
        .iter()
        .filter_map(|e| e.repo.metadata.starred_at.map(|ts| (ts, &e.key)))
        .min_by_key(|(ts, _)| *ts);

    if let Some((ts, key)) = newest {
        println!();
        println!("Newest star: {} ({})", key, ts.format("%Y-%m-%d"));
    }
    if let Some((ts, key)) = oldest {
        println!("Oldest star: {} ({})", key, ts.format("%Y-%m-%d"));
    }
}

/// Print the five most frequent values with counts
fn print_top<'a>(heading: &str, values: impl Iterator<Item = &'a str>) {
    let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    if counts.is_empty() {
        return;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!();
    println!("{}:", heading);
    for (value, count) in ranked.into_iter().take(5) {
        println!("  {}: {}", value, count);
    }
}
