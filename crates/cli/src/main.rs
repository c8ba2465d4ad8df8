use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use placelore_core::env_string_with_default;
use placelore_llm::{GenerationClient, DEFAULT_MODEL};
use placelore_search::SearchClient;
use placelore_storage::RecordStore;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "placelore")]
#[command(about = "Place-history service backed by web search and LLM inference", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        #[arg(short, long, default_value = "5000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// One-shot: print the history of a place.
    History { place: String },
    /// One-shot: print the historical sites near a place.
    Places { place: String },
}

fn default_database_url() -> String {
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("placelore")
        .join("placelore.db");
    format!("sqlite://{}?mode=rwc", path.display())
}

fn database_url() -> String {
    env_string_with_default("PLACELORE_DATABASE_URL", &default_database_url())
}

fn ensure_db_dir() -> Result<()> {
    if std::env::var("PLACELORE_DATABASE_URL").is_ok() {
        // Custom URL: the caller owns the path.
        return Ok(());
    }
    let dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("placelore");
    std::fs::create_dir_all(dir)?;
    Ok(())
}

fn search_api_key() -> Result<String> {
    std::env::var("TAVILY_API_KEY")
        .map_err(|_| anyhow::anyhow!("TAVILY_API_KEY environment variable must be set"))
}

fn search_url() -> String {
    env_string_with_default("PLACELORE_SEARCH_URL", placelore_search::DEFAULT_SEARCH_URL)
}

fn engine_url() -> String {
    env_string_with_default("PLACELORE_ENGINE_URL", "http://127.0.0.1:8080")
}

fn model_name() -> String {
    env_string_with_default("PLACELORE_MODEL", DEFAULT_MODEL)
}

pub(crate) struct Services {
    pub history: Arc<placelore_service::HistoryService>,
    pub places: Arc<placelore_service::PlacesService>,
}

async fn build_services() -> Result<Services> {
    ensure_db_dir()?;
    let url = database_url();
    let store = Arc::new(RecordStore::new(&url).await?);
    let search = Arc::new(SearchClient::new(search_api_key()?, search_url())?);
    let engine = Arc::new(GenerationClient::new(engine_url(), model_name())?);
    tracing::info!(database_url = %url, model = engine.model(), "placelore initialized");
    Ok(Services {
        history: Arc::new(placelore_service::HistoryService::new(
            store.clone(),
            search.clone(),
            engine.clone(),
        )),
        places: Arc::new(placelore_service::PlacesService::new(store, search, engine)),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let services = build_services().await?;

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(services, host, port).await?,
        Commands::History { place } => commands::lore::history(&services, &place).await?,
        Commands::Places { place } => commands::lore::places(&services, &place).await?,
    }

    Ok(())
}
