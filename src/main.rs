//! `websearch` command line: build the index, query it, or serve it over HTTP

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use websearch::utils::{DEFAULT_INDEX_DIR, DEFAULT_START_URL};
use websearch::{CrawlConfig, SearchEngine, SearchQuery};

#[derive(Parser)]
#[command(name = "websearch", version)]
#[command(about = "Crawl a site, build a full-text index and serve ranked search")]
struct Cli {
    #[command(flatten)]
    options: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ConfigArgs {
    /// JSON config file; flags given on the command line override it
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page the crawl starts from
    #[arg(long, global = true)]
    start_url: Option<String>,

    /// Crawl budget, also the cap on candidates per query
    #[arg(long, global = true)]
    max_pages: Option<usize>,

    /// Index location
    #[arg(long, global = true)]
    index_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl and build the index (no-op if it already holds documents)
    Build,

    /// Run one query against the index
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Build the index if needed, then serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },
}

impl ConfigArgs {
    fn load(&self) -> Result<CrawlConfig> {
        let mut builder = match &self.config {
            Some(path) => CrawlConfig::from_json_file(path)?.into_builder(),
            None => CrawlConfig::builder()
                .index_dir(DEFAULT_INDEX_DIR)
                .start_url(DEFAULT_START_URL),
        };

        if let Some(url) = &self.start_url {
            builder = builder.replace_start_url(url.as_str());
        }
        if let Some(dir) = &self.index_dir {
            builder = builder.replace_index_dir(dir.clone());
        }
        if let Some(max_pages) = self.max_pages {
            builder = builder.max_pages(max_pages);
        }

        builder.build().context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.options.load()?;

    match cli.command {
        Command::Build => {
            let report = websearch::build_index(&config).await?;
            if report.already_built {
                println!("Index at {:?} is already built", config.index_dir());
            } else {
                println!(
                    "Indexed {} pages ({} skipped) into {:?}",
                    report.indexed,
                    report.skipped,
                    config.index_dir()
                );
            }
        }
        Command::Search { query } => run_search(&config, &query.join(" "))?,
        Command::Serve { addr } => websearch::serve(config, addr).await?,
    }

    Ok(())
}

fn run_search(config: &CrawlConfig, input: &str) -> Result<()> {
    let engine = SearchEngine::open_or_create(config)?;
    if !engine.is_index_built() {
        tracing::warn!(index_dir = ?config.index_dir(), "Index is not built, run `websearch build` first");
    }

    let query = SearchQuery::parse(input)?;
    let results = engine.search(&query)?;

    for (rank, entry) in results.iter().enumerate() {
        println!(
            "{:>3}. [{}] {} <{}>\n     {}",
            rank + 1,
            entry.occurrence_count,
            entry.title,
            entry.url,
            entry.context_snippet
        );
    }
    if results.is_empty() {
        println!("No results for \"{query}\"");
    }

    let suggestion = websearch::search::suggest(&engine, &query);
    if !suggestion.is_empty() {
        println!("Did you mean: {suggestion}");
    }
    Ok(())
}
