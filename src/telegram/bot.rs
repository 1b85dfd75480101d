//! Bot construction and command definitions.

use teloxide::prelude::Requester;
use teloxide::utils::command::BotCommands;

use crate::core::config;

/// The bot type used across the application.
pub type Bot = teloxide::Bot;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the welcome menu")]
    Start,
    #[command(description = "list the available products")]
    Shop,
    #[command(description = "regenerate the product database (admin)")]
    Updatedb,
    #[command(description = "learn about the shop AI")]
    Aboutai,
    #[command(description = "show the help message")]
    Help,
    #[command(rename = "send_topic", description = "send a topic to the support group")]
    SendTopic(String),
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Failed to create bot (missing token, invalid URL)
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN.clone();
    if token.is_empty() {
        return Err(anyhow::anyhow!("TELOXIDE_TOKEN environment variable not set"));
    }

    let client = reqwest::ClientBuilder::new()
        .timeout(config::network::timeout())
        .build()?;

    // Check if a local Bot API server is configured
    let bot = if let Ok(bot_api_url) = std::env::var("BOT_API_URL") {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(&bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        Bot::with_client(token, client).set_api_url(url)
    } else {
        Bot::with_client(token, client)
    };

    Ok(bot)
}

/// Sets up bot commands in the Telegram UI
///
/// # Errors
/// Returns `RequestError` if the Telegram API call fails.
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}
