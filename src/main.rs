//! XP Bot
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::Context;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use xpbot::handlers::{self, Classifier};
use xpbot::services::ServiceFactory;
use xpbot::utils::logging;
use xpbot::Settings;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging);

    info!(version = xpbot::VERSION, "Starting XP Bot...");

    // Initialize bot and services
    let bot = Bot::new(settings.bot.token.clone());
    let services = ServiceFactory::new(bot.clone(), settings)?;

    // Fail fast when the score store is unreachable
    info!("Connecting to Redis...");
    services
        .ledger
        .ping()
        .await
        .context("Failed to ping Redis")?;

    let classifier = Classifier::new()?;

    info!("Setting up bot handlers...");

    let mut dispatcher = Dispatcher::builder(bot, create_handler())
        .dependencies(dptree::deps![Arc::new(services), Arc::new(classifier)])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd);
        })
        .enable_ctrlc_handler()
        .build();

    info!("XP Bot is ready, starting polling...");
    dispatcher.dispatch().await;

    info!("XP Bot has been shut down.");

    Ok(())
}

/// Create the main update handler
fn create_handler() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    use teloxide::dispatching::UpdateFilterExt;

    dptree::entry().branch(Update::filter_message().endpoint(handle_update))
}

/// Handle one inbound message; a failure abandons this event only.
async fn handle_update(
    msg: Message,
    services: Arc<ServiceFactory>,
    classifier: Arc<Classifier>,
) -> HandlerResult {
    if let Err(e) = handlers::route(msg, &classifier, &services).await {
        error!(error = %e, "Error handling message");
        return Err(e.into());
    }

    Ok(())
}
