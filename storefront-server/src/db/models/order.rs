//! Order Model
//!
//! A persisted checkout attempt. Line items are price/quantity
//! snapshots copied from the client's cart view at creation time and
//! never re-read from the live cart.
//!
//! Status only moves forward:
//!
//! ```text
//! created --(signature verified)--> paid      [terminal]
//! created --(signature mismatch)--> failed    [terminal]
//! ```

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

use super::serde_thing;

pub type OrderId = Thing;

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Created,
    Paid,
    Failed,
}

impl OrderStatus {
    /// Terminal states admit no further transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Failed)
    }
}

/// One line of an order: product reference plus quantity and the unit
/// price at time of purchase. Immutable after order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: String,
    pub quantity: i64,
    pub price: f64,
}

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        with = "serde_thing::option",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub id: Option<OrderId>,
    pub user: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Gateway order id, set once the gateway accepts the intent
    pub gateway_order_id: Option<String>,
    /// Gateway payment id, set on verified payment
    pub gateway_payment_id: Option<String>,
    /// Gateway signature, set on verified payment
    pub gateway_signature: Option<String>,
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Order for creation (server fills ids, status and timestamps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub user: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Created).unwrap(),
            "\"created\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Paid).unwrap(),
            "\"paid\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Failed).unwrap(),
            "\"failed\""
        );
    }

    #[test]
    fn terminal_states() {
        assert!(!OrderStatus::Created.is_terminal());
        assert!(OrderStatus::Paid.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
    }
}
