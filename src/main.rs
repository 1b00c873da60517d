//! Voter Central CLI
//!
//! Runs a page-load flow against the backend and prints the rendered page
//! containers as HTML:
//! - Election directory for an address (or all elections)
//! - Candidate detail
//! - Polling location lookup
//! - Any page URL of the site
//!
//! Logs go to stderr so stdout carries only HTML.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use voter_central::api::{BackendClient, ReqwestFetcher};
use voter_central::config::{generate_default_config, Config, LoggingConfig};
use voter_central::pages::{load_page, load_polling_location, Page, PageOutcome};

#[derive(Parser)]
#[command(name = "voter-central")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render election, candidate and polling-location pages from the civic backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: searched in standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend URL, overriding the config file
    #[arg(long, global = true)]
    pub backend_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the election directory
    Directory {
        /// Address to find elections for
        #[arg(short, long)]
        address: Option<String>,
        /// List every election instead of those relevant to the address
        #[arg(long)]
        all: bool,
        /// Two-letter state code narrowing --all ("--" for none)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Render a candidate's detail page
    Candidate {
        /// Candidate ID
        id: String,
        /// Election the candidate is running in
        #[arg(short, long)]
        election: Option<String>,
    },

    /// Look up the polling location for an address
    Polling {
        /// Street address
        address: String,
    },

    /// Render any page of the site from its URL (e.g. "directory.html?address=...")
    Page {
        /// Page URL or path with query string
        url: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.backend_url {
        config.backend.base_url = url;
    }

    init_logging(&config.logging);
    tracing::info!("Voter Central v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Backend: {}", config.backend.base_url);

    let fetcher = ReqwestFetcher::new(config.backend.request_timeout())?;
    let client = BackendClient::new(config.backend.base_url.clone(), fetcher);

    let (page, outcome, shell) = match cli.command {
        Commands::Directory {
            address,
            all,
            state,
        } => {
            let query = directory_query_string(address.as_deref(), all, state.as_deref());
            run(Page::Directory, &client, &config, &query).await
        }
        Commands::Candidate { id, election } => {
            let mut query = format!("candidateId={}", urlencoding::encode(&id));
            if let Some(election) = election {
                query.push_str(&format!("&electionName={}", urlencoding::encode(&election)));
            }
            run(Page::Candidate, &client, &config, &query).await
        }
        Commands::Polling { address } => {
            let mut shell = Page::PollingLocation.shell();
            let outcome = load_polling_location(&client, &address, &mut shell).await;
            (Page::PollingLocation, outcome, shell)
        }
        Commands::Page { url } => {
            let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
            let page = Page::from_path(path)
                .with_context(|| format!("Not a page of the site: {}", path))?;
            run(page, &client, &config, query).await
        }
        Commands::Config { output } => return write_default_config(output),
    };

    println!("{}", shell.to_html());

    match outcome {
        PageOutcome::Rendered => Ok(()),
        PageOutcome::NoData => {
            tracing::info!("No data for this {} request", page.name());
            Ok(())
        }
        PageOutcome::Failed(failure) => {
            Err(anyhow::Error::new(failure).context(format!("{} page failed to load", page.name())))
        }
    }
}

async fn run(
    page: Page,
    client: &BackendClient<ReqwestFetcher>,
    config: &Config,
    query: &str,
) -> (Page, PageOutcome, voter_central::PageShell) {
    let mut shell = page.shell();
    let outcome = load_page(page, client, &config.render, query, &mut shell).await;
    (page, outcome, shell)
}

fn write_default_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {:?}", path))?;
            eprintln!("Config written to {:?}", path);
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn directory_query_string(address: Option<&str>, all: bool, state: Option<&str>) -> String {
    let mut query = format!(
        "address={}&listAllElections={}",
        urlencoding::encode(address.unwrap_or_default()),
        all
    );
    if let Some(state) = state {
        query.push_str(&format!("&stateFilter={}", urlencoding::encode(state)));
    }
    query
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("voter_central={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
