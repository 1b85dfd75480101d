//! Persona preambles and prompt construction.
//!
//! Personas can be overridden by JSON role files in `ROLES_DIR`
//! (`roles-system.json` / `roles-assistant.json`, each shaped like
//! `{"system": {"content": "..."}}`). Missing or malformed files fall back
//! to built-in defaults with a logged warning.

use serde_json::Value;
use std::path::Path;

/// Default system persona (REST content endpoints).
const DEFAULT_SYSTEM: &str = "You are a helpful general assistant for an e-commerce store.";

/// Default assistant persona (Telegram free-text replies).
const DEFAULT_ASSISTANT: &str = "You are a specialized e-commerce assistant, focused on sales, \
     customer support, and product information. Reply concisely and in a friendly tone.";

/// Loaded persona preambles.
#[derive(Debug, Clone)]
pub struct Personas {
    pub system: String,
    pub assistant: String,
}

impl Default for Personas {
    fn default() -> Self {
        Self {
            system: DEFAULT_SYSTEM.to_string(),
            assistant: DEFAULT_ASSISTANT.to_string(),
        }
    }
}

impl Personas {
    /// Load personas from a roles directory, defaulting per file on failure.
    pub fn load(roles_dir: Option<&str>) -> Self {
        let Some(dir) = roles_dir else {
            return Self::default();
        };
        let dir = Path::new(dir);
        Self {
            system: read_role(&dir.join("roles-system.json"), "system")
                .unwrap_or_else(|| DEFAULT_SYSTEM.to_string()),
            assistant: read_role(&dir.join("roles-assistant.json"), "assistant")
                .unwrap_or_else(|| DEFAULT_ASSISTANT.to_string()),
        }
    }
}

/// Read `{key: {content: "..."}}` from a role file.
fn read_role(path: &Path, key: &str) -> Option<String> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!(
                "Role file {} unreadable ({}), using built-in default",
                path.display(),
                e
            );
            return None;
        }
    };
    let value: Value = match serde_json::from_str(&data) {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "Role file {} is not valid JSON ({}), using built-in default",
                path.display(),
                e
            );
            return None;
        }
    };
    let content = value.get(key)?.get("content")?.as_str()?;
    if content.is_empty() {
        return None;
    }
    Some(content.to_string())
}

/// Prompt for the product-description endpoint.
pub fn description_prompt(product_name: &str, product_details: &str) -> String {
    if product_details.is_empty() {
        format!(
            "Write an appealing, concise product description for a product named \
             \"{product_name}\". It should encourage a purchase."
        )
    } else {
        format!(
            "Write an appealing, concise product description for a product named \
             \"{product_name}\" with the following details: {product_details}. \
             It should encourage a purchase."
        )
    }
}

/// Prompt for the business-plan endpoint.
pub fn business_plan_prompt(project_details: &str) -> String {
    format!(
        "Create a simple business plan for the following project: {project_details}. \
         Include a summary, a market analysis, a marketing strategy, and a basic \
         financial plan."
    )
}
