//! Bookdredge main entry point
//!
//! This is the command-line interface for the Bookdredge book-metadata
//! harvester.

use clap::Parser;
use std::path::PathBuf;

use bookdredge::config::load_config_with_hash;
use bookdredge::crawler::crawl;
use tracing_subscriber::EnvFilter;

/// Bookdredge: a concurrent book-metadata harvester
///
/// Bookdredge crawls a book site from a seed URL, following listing pages to
/// detail pages and appending one CSV row per harvested book record.
#[derive(Parser, Debug)]
#[command(name = "bookdredge")]
#[command(version = "1.0.0")]
#[command(about = "A concurrent book-metadata harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (cfg, hash)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &config_hash);
        return Ok(());
    }

    // A sink failure inside the crawl aborts the process with a non-zero
    // code from the worker; errors surfaced here are startup failures.
    match crawl(config).await {
        Ok(()) => {
            tracing::info!("Crawl completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookdredge=info,warn"),
            1 => EnvFilter::new("bookdredge=debug,info"),
            2 => EnvFilter::new("bookdredge=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &bookdredge::Config, config_hash: &str) {
    println!("=== Bookdredge Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Workers: {}", config.crawler.workers);
    println!("  Idle timeout: {}s", config.crawler.idle_timeout_secs);
    println!(
        "  Fetch timeouts: {}s connect / {}s read",
        config.crawler.connect_timeout_secs, config.crawler.read_timeout_secs
    );

    println!("\nSite:");
    println!("  Seed URL: {}", config.site.seed_url);
    println!("  Detail path fragment: {}", config.site.detail_path_fragment);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Export: {}", config.output.export_path);
    println!("  Failure log: {}", config.output.failure_log_path);

    println!("\n✓ Configuration is valid (hash: {})", config_hash);
    println!("✓ Would start crawling from {}", config.site.seed_url);
}
