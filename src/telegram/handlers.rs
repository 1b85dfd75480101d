//! Dispatcher schema and handler implementations.
//!
//! Every command is a thin call into the catalog service; free text that is
//! not a command is relayed to the text-generation collaborator with the
//! assistant persona. No conversation state is kept between messages.

use std::sync::Arc;

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, Message, ParseMode};

use crate::catalog::{CatalogService, Product};
use crate::core::config;
use crate::core::utils::html_escape;
use crate::genai::{GenerationOptions, Personas, TextGenerator};
use crate::telegram::bot::{Bot, Command};

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

const WELCOME_MESSAGE: &str = "Hello! 👋 Welcome to our online shop.\n\
How can I help you today? 😊 Ask me anything about our products, your orders, \
or anything else — I'm here to guide you.";

const ABOUT_AI_MESSAGE: &str = "I'm an AI assistant powered by Groq language models \
(Llama 3 and Gemma). I can help with product information, suggestions, and answer \
your questions.";

const HELP_MESSAGE: &str = "Here are the commands you can use:\n\
/start - show the welcome menu\n\
/shop - list the available products\n\
/updatedb - (admin) regenerate the product database\n\
/aboutai - learn about the shop AI\n\
/send_topic [your topic] - send a topic to the support group\n\
/help - show this message";

const GENERATION_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while processing your request. Please try again later.";

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub catalog: Arc<CatalogService>,
    pub generator: Arc<dyn TextGenerator>,
    pub personas: Personas,
    /// Group chat that receives `/send_topic` relays; `None` disables them.
    pub support_group: Option<ChatId>,
}

impl HandlerDeps {
    pub fn new(
        catalog: Arc<CatalogService>,
        generator: Arc<dyn TextGenerator>,
        personas: Personas,
    ) -> Self {
        Self {
            catalog,
            generator,
            personas,
            support_group: (*config::TARGET_GROUP_ID).map(ChatId),
        }
    }
}

/// Creates the main dispatcher schema for the Telegram bot.
///
/// The same schema is used in production and in integration tests.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_text = deps.clone();
    let deps_callback = deps;

    dptree::entry()
        // Command handler
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                    let deps = deps_commands.clone();
                    async move { handle_command(&bot, &msg, cmd, &deps).await }
                }),
        )
        // Free-text handler for everything that is not a command
        .branch(
            Update::filter_message()
                .filter(|msg: Message| msg.text().map(|t| !t.starts_with('/')).unwrap_or(false))
                .endpoint(move |bot: Bot, msg: Message| {
                    let deps = deps_text.clone();
                    async move { handle_free_text(&bot, &msg, &deps).await }
                }),
        )
        // Inline keyboard callbacks from the /start menu
        .branch(
            Update::filter_callback_query().endpoint(move |bot: Bot, q: CallbackQuery| {
                let deps = deps_callback.clone();
                async move { handle_callback(&bot, q, &deps).await }
            }),
        )
}

/// Dispatch a parsed command to its handler.
async fn handle_command(
    bot: &Bot,
    msg: &Message,
    cmd: Command,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    log::debug!("Command {:?} from chat {}", cmd, msg.chat.id);
    match cmd {
        Command::Start => handle_start(bot, msg).await?,
        Command::Shop => send_product_list(bot, msg.chat.id, deps).await?,
        Command::Updatedb => handle_updatedb(bot, msg, deps).await?,
        Command::Aboutai => {
            bot.send_message(msg.chat.id, ABOUT_AI_MESSAGE).await?;
        }
        Command::Help => {
            bot.send_message(msg.chat.id, HELP_MESSAGE).await?;
        }
        Command::SendTopic(topic) => handle_send_topic(bot, msg, topic.trim(), deps).await?,
    }
    Ok(())
}

/// Handle /start: welcome message with the inline menu.
async fn handle_start(bot: &Bot, msg: &Message) -> Result<(), HandlerError> {
    let keyboard = InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback("🛒 View products", "show_products")],
        vec![InlineKeyboardButton::callback("🤖 About the AI", "about_ai")],
        vec![InlineKeyboardButton::callback("❓ Help & commands", "show_help")],
    ]);
    bot.send_message(msg.chat.id, WELCOME_MESSAGE)
        .reply_markup(keyboard)
        .await?;
    Ok(())
}

/// Format the catalog for a chat reply (HTML parse mode).
fn product_list_text(products: &[Product]) -> String {
    let list: String = products
        .iter()
        .map(|p| {
            format!(
                "<b>{}</b>\nPrice: {}€\nStock: {}\n",
                html_escape(&p.name),
                p.price,
                p.stock
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("Here are our available products:\n\n{list}")
}

/// Send the product list, shared by /shop and the menu callback.
async fn send_product_list(bot: &Bot, chat_id: ChatId, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let products = deps.catalog.list().await;
    if products.is_empty() {
        bot.send_message(
            chat_id,
            "No products available right now. An administrator can run /updatedb to add some.",
        )
        .await?;
        return Ok(());
    }
    bot.send_message(chat_id, product_list_text(&products))
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}

/// Handle /updatedb: replace the catalog with fresh random products.
async fn handle_updatedb(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    bot.send_message(msg.chat.id, "Updating the product database...").await?;
    match deps.catalog.regenerate(config::catalog::REGENERATE_COUNT).await {
        Ok(products) => {
            bot.send_message(
                msg.chat.id,
                format!(
                    "Product database updated with {} new random products.",
                    products.len()
                ),
            )
            .await?;
        }
        Err(e) => {
            log::error!("Catalog regeneration failed: {}", e);
            bot.send_message(
                msg.chat.id,
                "Sorry, the product database could not be updated right now.",
            )
            .await?;
        }
    }
    Ok(())
}

/// Handle /send_topic: relay the text to the configured support group.
async fn handle_send_topic(
    bot: &Bot,
    msg: &Message,
    topic: &str,
    deps: &HandlerDeps,
) -> Result<(), HandlerError> {
    if topic.is_empty() {
        bot.send_message(
            msg.chat.id,
            "Please provide a topic to send. Example: /send_topic Delivery problem.",
        )
        .await?;
        return Ok(());
    }

    let Some(group) = deps.support_group else {
        bot.send_message(
            msg.chat.id,
            "The support group is not configured. Please contact the administrator.",
        )
        .await?;
        return Ok(());
    };

    let first_name = msg
        .from
        .as_ref()
        .map(|u| u.first_name.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let username = msg
        .from
        .as_ref()
        .and_then(|u| u.username.clone())
        .unwrap_or_else(|| "N/A".to_string());

    let relay = format!("New topic from {first_name} ({username}):\n\n{topic}");
    match bot.send_message(group, relay).await {
        Ok(_) => {
            bot.send_message(msg.chat.id, "Your topic has been sent to the support group.")
                .await?;
        }
        Err(e) => {
            log::error!("Failed to relay topic to group {}: {}", group, e);
            bot.send_message(
                msg.chat.id,
                "Sorry, I could not send your topic to the group. Please try again later.",
            )
            .await?;
        }
    }
    Ok(())
}

/// Forward non-command text to the text-generation collaborator.
async fn handle_free_text(bot: &Bot, msg: &Message, deps: &HandlerDeps) -> Result<(), HandlerError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    bot.send_chat_action(msg.chat.id, ChatAction::Typing).await?;

    let options = GenerationOptions::chat(deps.personas.assistant.clone());
    match deps.generator.generate(text, &options).await {
        Ok(reply) => {
            bot.send_message(msg.chat.id, reply).await?;
        }
        Err(e) => {
            log::error!("Chat reply generation failed: {}", e);
            bot.send_message(msg.chat.id, GENERATION_FAILURE_MESSAGE).await?;
        }
    }
    Ok(())
}

/// Handle inline keyboard callbacks from the /start menu.
async fn handle_callback(bot: &Bot, q: CallbackQuery, deps: &HandlerDeps) -> Result<(), HandlerError> {
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    match q.data.as_deref() {
        Some("show_products") => send_product_list(bot, chat_id, deps).await?,
        Some("about_ai") => {
            bot.send_message(chat_id, ABOUT_AI_MESSAGE).await?;
        }
        Some("show_help") => {
            bot.send_message(chat_id, HELP_MESSAGE).await?;
        }
        other => {
            log::debug!("Ignoring unknown callback data: {:?}", other);
        }
    }
    Ok(())
}
