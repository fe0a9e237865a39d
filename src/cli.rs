// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The crawler takes four positional arguments, in this order:
//
//   url-finder <initialURL> <maxUrls> <maxDepth> <uniqueness>
//
// plus a few optional flags for the output directory, the size of the
// download pool, the request timeout and JSON output.
//
// Any missing or unparseable argument makes clap print the usage message and
// exit with code 2 before a single request is made.
// =============================================================================

use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use url::Url;

use crate::config::DEFAULT_CONCURRENCY;

// #[derive(Parser)] tells clap to generate the parsing code.
// Fields without #[arg(long)] are positional and parsed in declaration order.
// A bool field is a flag by default, so `uniqueness` asks for ArgAction::Set
// to take a value instead.
#[derive(Parser, Debug)]
#[command(
    name = "url-finder",
    version = "0.1.0",
    about = "Crawl a website to a bounded depth, save every page and print the link tree",
    long_about = "url-finder downloads the seed page, follows up to <maxUrls> links per page \
                  down to <maxDepth> levels, saves each page under <output-dir>/<depth>/ \
                  and prints the tree of pages it reached.",
    after_help = "Example: url-finder https://www.example.com 100 2 true"
)]
pub struct Cli {
    /// The seed URL crawled at depth 0 (must be http or https)
    #[arg(value_name = "initialURL", value_parser = parse_seed_url)]
    pub initial_url: String,

    /// Maximum number of links followed from a single page
    ///
    /// Negative numbers are taken as values (not flags) so that they are
    /// rejected with a proper error message.
    #[arg(value_name = "maxUrls", allow_negative_numbers = true)]
    pub max_urls: usize,

    /// Deepest level to crawl; the seed is depth 0
    #[arg(value_name = "maxDepth", allow_negative_numbers = true)]
    pub max_depth: usize,

    /// true: every URL is crawled at most once.
    /// false: a page file name is used at most once per depth.
    #[arg(value_name = "uniqueness", action = ArgAction::Set, value_parser = parse_uniqueness)]
    pub uniqueness: bool,

    /// Directory that receives the <depth>/ subdirectories
    /// (default: current working directory)
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum number of pages downloading at the same time (at least 1)
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_CONCURRENCY,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub concurrency: usize,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 100)]
    pub timeout: u64,

    /// Print the tree as JSON instead of the indented text form
    #[arg(long)]
    pub json: bool,
}

// Accepts "true" / "false" in any letter case.
fn parse_uniqueness(value: &str) -> Result<bool, String> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("expected 'true' or 'false', got '{}'", value))
    }
}

// The seed must be an absolute http(s) URL. We keep the string exactly as
// typed so the printed tree shows what the user asked for.
fn parse_seed_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{}': {}", value, e))?;
    match url.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(format!("unsupported scheme '{}', expected http or https", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("url-finder").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments() {
        let cli = parse(&["https://example.com", "100", "2", "true"]).unwrap();
        assert_eq!(cli.initial_url, "https://example.com");
        assert_eq!(cli.max_urls, 100);
        assert_eq!(cli.max_depth, 2);
        assert!(cli.uniqueness);
        assert!(!cli.json);
        assert_eq!(cli.concurrency, DEFAULT_CONCURRENCY);
        assert_eq!(cli.timeout, 100);
        assert!(cli.output_dir.is_none());
    }

    #[test]
    fn test_uniqueness_is_case_insensitive() {
        assert!(parse(&["https://example.com", "1", "1", "TRUE"]).unwrap().uniqueness);
        assert!(!parse(&["https://example.com", "1", "1", "False"]).unwrap().uniqueness);
    }

    #[test]
    fn test_rejects_bad_uniqueness() {
        assert!(parse(&["https://example.com", "1", "1", "yes"]).is_err());
    }

    #[test]
    fn test_rejects_missing_arguments() {
        let err = parse(&["https://example.com", "1", "1"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_rejects_negative_numbers() {
        assert!(parse(&["https://example.com", "-1", "1", "true"]).is_err());
        assert!(parse(&["https://example.com", "1", "-3", "true"]).is_err());
    }

    #[test]
    fn test_rejects_non_numeric_counts() {
        assert!(parse(&["https://example.com", "many", "1", "true"]).is_err());
    }

    #[test]
    fn test_rejects_non_http_seed() {
        assert!(parse(&["ftp://example.com", "1", "1", "true"]).is_err());
        assert!(parse(&["not a url", "1", "1", "true"]).is_err());
    }

    #[test]
    fn test_optional_flags() {
        let cli = parse(&[
            "https://example.com",
            "3",
            "1",
            "false",
            "--json",
            "--concurrency",
            "4",
            "--output-dir",
            "/tmp/out",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.concurrency, 4);
        assert_eq!(cli.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_concurrency_parses_as_usize() {
        let cli = parse(&["https://example.com", "1", "1", "true", "--concurrency", "4096"]).unwrap();
        assert_eq!(cli.concurrency, 4096usize);
        assert!(parse(&["https://example.com", "1", "1", "true", "--concurrency", "-2"]).is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        assert!(parse(&["https://example.com", "1", "1", "true", "--concurrency", "0"]).is_err());
    }
}
