//! Payments Module
//!
//! Order/payment reconciliation: checkout handoff to the third-party
//! gateway and signature-verified settlement.

pub mod flow;
pub mod gateway;
pub mod money;
pub mod signature;

pub use flow::{CheckoutRequest, CheckoutResponse, PaymentFlow, VerifyRequest, VerifyResponse};
pub use gateway::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway, RazorpayGateway};
