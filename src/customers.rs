//! In-memory customer registry.
//!
//! Process-lifetime only; lost on restart. Owned repository object injected
//! into handlers — constructed once per process, or fresh per test.

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::core::error::{AppError, AppResult};
use crate::core::utils::unique_id;

/// A customer record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Input for creating a customer.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct NewCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Append-only registry of customers.
pub struct CustomerRegistry {
    customers: RwLock<Vec<Customer>>,
}

impl Default for CustomerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerRegistry {
    pub fn new() -> Self {
        Self {
            customers: RwLock::new(Vec::new()),
        }
    }

    /// All customers in insertion order.
    pub async fn list(&self) -> Vec<Customer> {
        self.customers.read().await.clone()
    }

    /// Create a customer. Requires non-empty `name` and `email`.
    pub async fn create(&self, input: NewCustomer) -> AppResult<Customer> {
        let name = input
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::validation("Customer name and email are required."))?
            .to_string();
        let email = input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| AppError::validation("Customer name and email are required."))?
            .to_string();

        let customer = Customer {
            id: unique_id("cust"),
            name,
            email,
            phone: input.phone.unwrap_or_default(),
        };

        self.customers.write().await.push(customer.clone());
        log::info!("Registered customer {} ({})", customer.id, customer.email);
        Ok(customer)
    }
}
