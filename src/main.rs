mod actor_framework;
mod app_system;
mod book_actor;
mod bot;
mod channels;
mod clients;
mod domain;
mod ledger;
mod storage;

#[cfg(test)]
mod mock_framework;

use std::sync::Arc;
use tracing::{info, Instrument};
use crate::app_system::{setup_tracing, BotConfig, CookieSystem};
use crate::bot::CookieBot;
use crate::channels::{run_console, ConsoleMessenger};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Arc::new(BotConfig::from_env().map_err(|e| e.to_string())?);
    info!(admin_id = config.admin_id, data_dir = %config.data_dir.display(), "Starting cookie pre-order bot");

    let system = CookieSystem::start(&config).await?;
    let messenger = Arc::new(ConsoleMessenger::new());
    let bot = CookieBot::new(system.book_client.clone(), messenger.clone(), config.clone());

    let span = tracing::info_span!("console_channel");
    async {
        info!("Reading updates from stdin");
        run_console(&bot, &messenger).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Bot stopped");
    Ok(())
}
