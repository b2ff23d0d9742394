//! lm-page - Main Entry Point
//!
//! Loads a landing page, boots its behaviors, replays scripted clicks and
//! prints every tracked event as one JSON record per line.

use anyhow::{Context, Result};
use clap::Parser;
use lm_page::{Config, DataLayer, Page};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "lm-page", version, about)]
struct Cli {
    /// HTML file to load
    html: PathBuf,

    /// URL the page is served from; its `ab_*` query parameters select variants
    #[arg(short, long, default_value = "about:blank")]
    url: String,

    /// JSON file overriding copy strings, class names and timings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Click the first element matching SELECTOR (repeatable, in order)
    #[arg(long = "click", value_name = "SELECTOR")]
    clicks: Vec<String>,

    /// Advance the page clock by this many milliseconds after the clicks
    #[arg(long, value_name = "MS")]
    wait: Option<u64>,

    /// Print the final document markup after the events
    #[arg(long)]
    print_html: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;
    let html = std::fs::read_to_string(&cli.html)
        .with_context(|| format!("Failed to read {}", cli.html.display()))?;

    let document = lm_html::parse_with_url(&html, &cli.url);
    let layer = DataLayer::new();
    let mut page = Page::new(document, layer.clone(), config);
    page.ready();

    for selector in &cli.clicks {
        match page.click_selector(selector) {
            Some(outcome) => {
                for error in &outcome.errors {
                    tracing::warn!("click on {:?}: {}", selector, error);
                }
            }
            None => tracing::warn!("no element matches {:?}", selector),
        }
    }
    if let Some(ms) = cli.wait {
        page.advance(Duration::from_millis(ms));
    }

    for event in layer.drain() {
        println!("{}", serde_json::to_string(&event)?);
    }
    if cli.print_html {
        let doc = page.document();
        println!("{}", lm_dom::to_html(&doc.tree, doc.root()));
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
