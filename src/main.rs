use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::signal;

use boutiq::catalog::{CatalogService, CatalogStore};
use boutiq::core::{config, init_logger};
use boutiq::customers::CustomerRegistry;
use boutiq::genai::{GroqClient, Personas, TextGenerator};
use boutiq::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use boutiq::web::{start_web_server, AppState};

/// Main entry point for the shop backend
///
/// Starts the REST API server and, when a bot token is configured, the
/// Telegram dispatcher. Both share one catalog service so HTTP requests and
/// chat commands observe a consistent catalog.
///
/// # Errors
/// Returns an error if initialization fails (logging, HTTP client, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present
    let _ = dotenv();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;
    log::info!("Starting boutiq v{}", env!("CARGO_PKG_VERSION"));

    let catalog = Arc::new(CatalogService::new(CatalogStore::new(&*config::PRODUCTS_FILE)));
    let customers = Arc::new(CustomerRegistry::new());
    let personas = Personas::load(config::ROLES_DIR.as_deref());
    let generator: Arc<dyn TextGenerator> = Arc::new(GroqClient::from_env()?);

    // Touch the catalog once so a missing file is created at startup.
    let initial = catalog.list().await;
    log::info!(
        "Catalog file: {} ({} products)",
        &*config::PRODUCTS_FILE,
        initial.len()
    );

    let state = AppState {
        catalog: Arc::clone(&catalog),
        customers,
        generator: Arc::clone(&generator),
        personas: personas.clone(),
    };
    let web_task = tokio::spawn(async move {
        if let Err(e) = start_web_server(*config::WEB_PORT, state).await {
            log::error!("Web server exited with error: {}", e);
        }
    });

    if config::BOT_TOKEN.is_empty() {
        log::warn!("TELOXIDE_TOKEN is not set; the Telegram bot will not be started");
        signal::ctrl_c().await?;
        log::info!("Received Ctrl+C, shutting down");
        web_task.abort();
        return Ok(());
    }

    let bot = create_bot()?;
    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let deps = HandlerDeps::new(catalog, generator, personas);
    log::info!("Telegram bot launched");

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    web_task.abort();
    log::info!("Shutting down");
    Ok(())
}
