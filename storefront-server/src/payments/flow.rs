//! Order/payment reconciliation flow
//!
//! The most stateful sequence in the server:
//!
//! 1. `checkout` persists a pending order and asks the gateway for a
//!    payment intent.
//! 2. The client completes payment against the gateway out-of-band.
//! 3. `verify` authenticates the gateway callback by signature, moves
//!    the order to its terminal status, and clears the buyer's cart.
//!
//! There is no distributed transaction across the order store, the
//! cart store and the gateway; every step is an independently
//! re-runnable write. A failed gateway call leaves the order in
//! `created` with no gateway ids, and a retried checkout creates a new
//! order rather than reusing the orphan.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tracing::{info, warn};

use crate::db::models::{Order, OrderCreate, OrderItem};
use crate::db::repository::{CartRepository, OrderRepository};
use crate::payments::gateway::{GatewayOrderRequest, PaymentGateway};
use crate::payments::money::to_minor_units;
use crate::payments::signature::compute_signature;
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResult};

/// Checkout request: the client's cart snapshot plus its total.
///
/// `items` and `total_amount` are optional at the wire level so that a
/// body missing either still deserializes and fails with the structured
/// validation error instead of an extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Option<Vec<OrderItem>>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Checkout response: everything the client needs for the gateway's
/// client-side payment step
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// The gateway's order id (the client pays against this)
    pub order_id: String,
    /// Amount in minor units, as confirmed by the gateway
    pub amount: i64,
    pub currency: String,
    pub order: Order,
}

/// Gateway callback relay from the client after payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub gateway_order_id: String,
    pub gateway_payment_id: String,
    pub gateway_signature: String,
}

/// Successful verification result
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub message: String,
    pub order: Order,
}

/// Orchestrates order creation, gateway handoff, signature-verified
/// confirmation and post-payment cart clearing.
pub struct PaymentFlow {
    orders: OrderRepository,
    cart: CartRepository,
    gateway: Arc<dyn PaymentGateway>,
    /// Server-held gateway key secret, injected from config
    key_secret: String,
}

impl PaymentFlow {
    pub fn new(db: Surreal<Db>, gateway: Arc<dyn PaymentGateway>, key_secret: String) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            cart: CartRepository::new(db),
            gateway,
            key_secret,
        }
    }

    /// Create an order and request a gateway payment intent for it.
    ///
    /// Validation happens before any persistence. If the gateway call
    /// fails the order stays in `created` with no gateway ids; the
    /// caller may retry checkout, which creates a fresh order.
    pub async fn checkout(&self, user: &str, request: CheckoutRequest) -> AppResult<CheckoutResponse> {
        let (items, total_amount) = match (request.items, request.total_amount) {
            (Some(items), Some(total)) if !items.is_empty() => (items, total),
            _ => return Err(AppError::validation("Missing items or total amount")),
        };
        if total_amount <= 0.0 {
            return Err(AppError::validation("Total amount must be positive"));
        }
        for item in &items {
            validate_quantity(item.quantity, "item quantity")?;
        }

        let currency = request.currency.unwrap_or_else(|| "USD".to_string());
        let amount_minor = to_minor_units(total_amount)?;

        let order = self
            .orders
            .create(OrderCreate {
                user: user.to_string(),
                items,
                total_amount,
                currency: currency.clone(),
            })
            .await?;

        let order_id = order
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("Created order has no id"))?;

        info!(order_id = %order_id, amount_minor, %currency, "Requesting gateway payment intent");

        let gateway_order = self
            .gateway
            .create_order(GatewayOrderRequest {
                amount: amount_minor,
                currency,
                receipt: order_id.clone(),
            })
            .await
            .map_err(|e| {
                warn!(order_id = %order_id, error = %e, "Gateway order creation failed");
                AppError::from(e)
            })?;

        let order = self
            .orders
            .set_gateway_order(&order_id, &gateway_order.id)
            .await?;

        info!(
            order_id = %order_id,
            gateway_order_id = %gateway_order.id,
            "Order handed off to gateway"
        );

        Ok(CheckoutResponse {
            order_id: gateway_order.id,
            amount: gateway_order.amount,
            currency: gateway_order.currency,
            order,
        })
    }

    /// Verify a relayed gateway callback and settle the order.
    ///
    /// On signature mismatch the order is marked `failed` before the
    /// error is reported; the cart is never touched. On match the order
    /// goes to `paid` and every cart item of the order's user is
    /// removed. Re-verifying an already-paid order with the same valid
    /// payload is harmless.
    pub async fn verify(&self, request: VerifyRequest) -> AppResult<VerifyResponse> {
        let order = self
            .orders
            .find_by_gateway_order_id(&request.gateway_order_id)
            .await?
            .ok_or_else(|| AppError::not_found("Order not found"))?;

        let order_id = order
            .id
            .as_ref()
            .map(|id| id.to_string())
            .ok_or_else(|| AppError::internal("Stored order has no id"))?;

        let expected = compute_signature(
            &self.key_secret,
            &request.gateway_order_id,
            &request.gateway_payment_id,
        );

        if expected != request.gateway_signature {
            warn!(
                order_id = %order_id,
                gateway_order_id = %request.gateway_order_id,
                "Payment signature mismatch"
            );
            self.orders.mark_failed(&order_id).await?;
            return Err(AppError::invalid_signature("Invalid signature"));
        }

        // Cart wipe is scoped by the order's stored user id, then the
        // paid transition persists. Both writes are idempotent.
        self.cart.clear_user(&order.user).await?;
        let order = self
            .orders
            .mark_paid(
                &order_id,
                &request.gateway_payment_id,
                &request.gateway_signature,
            )
            .await?;

        info!(
            order_id = %order_id,
            gateway_payment_id = %request.gateway_payment_id,
            "Payment verified, cart cleared"
        );

        Ok(VerifyResponse {
            message: "Payment verified successfully".to_string(),
            order,
        })
    }
}
