//! search-relay CLI - run searches through the configured provider.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use search_relay::{config, server, Dispatcher, ProviderKind, Settings};

/// search-relay - forward queries to a configured search backend
#[derive(Parser)]
#[command(name = "search-relay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search
    Search(SearchArgs),

    /// List available providers and the settings they need
    Providers,

    /// Serve the HTTP search endpoint
    Serve(ServeArgs),
}

#[derive(Parser)]
struct SearchArgs {
    /// Search query (a URL for crawling providers)
    query: String,

    /// Provider to use, overriding SEARCH_PROVIDER
    #[arg(short, long)]
    provider: Option<String>,

    /// Maximum number of results to display
    #[arg(short, long, default_value = "10")]
    limit: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8000")]
    addr: SocketAddr,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::from_env();

    match cli.command {
        Commands::Search(args) => run_search(settings, args).await,
        Commands::Providers => list_providers(&settings),
        Commands::Serve(args) => run_server(settings, args).await,
    }
}

fn list_providers(settings: &Settings) -> Result<()> {
    println!("Available providers:\n");
    for kind in ProviderKind::ALL {
        let marker = if kind.as_str() == settings.provider_name() { "*" } else { " " };
        println!("  {} {:<11} - {}", marker, kind.as_str(), kind.description());
        if let Some(setting) = kind.required_setting() {
            let state = if settings.get(setting).is_some() { "set" } else { "missing" };
            println!("                  requires {} ({})", setting, state);
        }
    }
    println!();
    println!(
        "Select with {}=<name> (default: {}).",
        config::SEARCH_PROVIDER,
        config::DEFAULT_PROVIDER
    );
    println!("Set {} to cache results for two hours.", config::REDIS_URL);
    Ok(())
}

async fn run_search(mut settings: Settings, args: SearchArgs) -> Result<()> {
    if let Some(provider) = &args.provider {
        settings.set(config::SEARCH_PROVIDER, provider.as_str());
    }
    let provider_name = settings.provider_name().to_string();

    let dispatcher = Dispatcher::from_settings(settings)?;
    let results = dispatcher.perform_search(&args.query).await?;

    match args.format {
        OutputFormat::Text => {
            println!(
                "\nResults for \"{}\" from {} ({} results):\n",
                args.query,
                provider_name,
                results.len()
            );

            for (i, result) in results.items().iter().take(args.limit).enumerate() {
                println!("{}. {}", i + 1, result.title);
                println!("   URL: {}", result.url);
                if !result.content.is_empty() {
                    println!("   {}", truncate(&result.content, 150));
                }
                if !result.links.is_empty() {
                    println!("   Links: {}", result.links.len());
                }
                println!();
            }
        }
        OutputFormat::Json => {
            let output: Vec<_> = results.items().iter().take(args.limit).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Compact => {
            for result in results.items().iter().take(args.limit) {
                println!("{}\t{}", result.title, result.url);
            }
        }
    }

    Ok(())
}

async fn run_server(settings: Settings, args: ServeArgs) -> Result<()> {
    let dispatcher = Dispatcher::from_settings(settings)?;
    server::serve(args.addr, Arc::new(dispatcher)).await?;
    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
