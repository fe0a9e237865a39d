// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (bad arguments exit with 2)
// 2. Set up logging to stderr, so stdout only carries the tree
// 3. Build the crawl configuration and run the crawl
// 4. Print the link tree and exit (0 = done, 1 = unexpected error)
// =============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use url_finder::cli::Cli;
use url_finder::{crawl, render_json, render_text, CrawlConfig};

#[tokio::main]
async fn main() {
    // Parse before anything else; on bad input clap prints the usage
    // message and exits with code 2
    let cli = Cli::parse();

    init_logging();

    let result = run(&cli).await;
    match &result {
        Ok(output) => print!("{}", output),
        Err(e) => eprintln!("Error: {:#}", e),
    }

    std::process::exit(exit_code(&result));
}

// Logs go to stderr. RUST_LOG overrides the default, e.g.
//   RUST_LOG=url_finder=debug url-finder https://example.com 10 2 true
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("url_finder=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Runs the crawl and returns what goes to stdout.
async fn run(cli: &Cli) -> Result<String> {
    let config = CrawlConfig::from_cli(cli).context("could not resolve the output directory")?;

    let report = crawl(config).await?;

    // A seed that can't be crawled prints an empty tree, not an error
    let Some(tree) = report.tree else {
        return Ok(String::new());
    };

    if cli.json {
        Ok(format!("{}\n", render_json(&tree)?))
    } else {
        Ok(render_text(&tree))
    }
}

fn exit_code<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
