//! Telegram storefront bot: commands over the catalog plus AI free text.

pub mod bot;
pub mod handlers;

pub use bot::{create_bot, setup_bot_commands, Bot, Command};
pub use handlers::{schema, HandlerDeps, HandlerError};
