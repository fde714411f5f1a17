//! Payment gateway adapter
//!
//! [`PaymentGateway`] is the seam between the checkout flow and the
//! third-party provider: the flow only ever asks for a remote order to
//! be created against an amount/receipt pair. The production
//! implementation talks to Razorpay's REST API over HTTPS with basic
//! auth; tests substitute an in-process mock.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::core::GatewayConfig;

/// Gateway adapter errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gateway rejected the request (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Malformed gateway response: {0}")]
    Malformed(String),
}

/// Request to reserve a payment intent at the gateway
#[derive(Debug, Clone, Serialize)]
pub struct GatewayOrderRequest {
    /// Amount in minor currency units (cents)
    pub amount: i64,
    pub currency: String,
    /// Our order id, echoed back on the gateway's receipt
    pub receipt: String,
}

/// The gateway's payment intent, as confirmed by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
}

/// Outbound payment gateway interface
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a remote order (payment intent) for the given amount
    async fn create_order(&self, request: GatewayOrderRequest)
    -> Result<GatewayOrder, GatewayError>;
}

/// Razorpay Orders API client
pub struct RazorpayGateway {
    http: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
            base_url: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        let url = format!("{}/orders", self.base_url);
        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| GatewayError::Malformed(e.to_string()))?;
        Ok(order)
    }
}
