//! Payment API Handlers
//!
//! Thin wrappers over [`PaymentFlow`]; the flow owns the semantics.

use axum::{Json, extract::State};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::payments::{CheckoutRequest, CheckoutResponse, VerifyRequest, VerifyResponse};
use crate::utils::AppResult;

/// POST /api/payments/order - create an order and a gateway payment intent
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<CheckoutResponse>> {
    let flow = state.payment_flow();
    let response = flow.checkout(&user.id, payload).await?;
    Ok(Json(response))
}

/// POST /api/payments/verify - verify a relayed gateway callback
pub async fn verify_payment(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<VerifyResponse>> {
    let flow = state.payment_flow();
    let response = flow.verify(payload).await?;
    Ok(Json(response))
}
