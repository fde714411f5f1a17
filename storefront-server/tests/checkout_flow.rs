//! End-to-end checkout and settlement flow against an embedded
//! database and an in-process mock gateway.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use storefront_server::db::DbService;
use storefront_server::db::models::{OrderItem, OrderStatus};
use storefront_server::db::repository::{CartRepository, OrderRepository};
use storefront_server::payments::signature::compute_signature;
use storefront_server::payments::{
    CheckoutRequest, GatewayError, GatewayOrder, GatewayOrderRequest, PaymentFlow, PaymentGateway,
    VerifyRequest,
};
use storefront_server::utils::AppError;

const KEY_SECRET: &str = "test_key_secret";

/// Mock gateway: hands out sequential ids, optionally fails.
struct MockGateway {
    counter: AtomicUsize,
    fail: AtomicBool,
}

impl MockGateway {
    fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.fail.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_order(
        &self,
        request: GatewayOrderRequest,
    ) -> Result<GatewayOrder, GatewayError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 503,
                message: "gateway down".to_string(),
            });
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(GatewayOrder {
            id: format!("gw_{n}"),
            amount: request.amount,
            currency: request.currency,
        })
    }
}

struct TestEnv {
    _dir: tempfile::TempDir,
    flow: PaymentFlow,
    gateway: Arc<MockGateway>,
    orders: OrderRepository,
    cart: CartRepository,
}

async fn setup() -> TestEnv {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().to_str().expect("utf8 path").to_string();
    let service = DbService::new(&path).await.expect("open db");
    let gateway = Arc::new(MockGateway::new());
    let flow = PaymentFlow::new(
        service.db.clone(),
        gateway.clone() as Arc<dyn PaymentGateway>,
        KEY_SECRET.to_string(),
    );
    TestEnv {
        _dir: dir,
        flow,
        gateway,
        orders: OrderRepository::new(service.db.clone()),
        cart: CartRepository::new(service.db.clone()),
    }
}

fn sample_items() -> Vec<OrderItem> {
    vec![
        OrderItem {
            product: "product:p1".to_string(),
            quantity: 2,
            price: 9.99,
        },
        OrderItem {
            product: "product:p2".to_string(),
            quantity: 1,
            price: 5.02,
        },
    ]
}

fn sample_checkout() -> CheckoutRequest {
    CheckoutRequest {
        items: Some(sample_items()),
        total_amount: Some(25.0),
        currency: None,
    }
}

#[tokio::test]
async fn checkout_creates_order_and_hands_off_to_gateway() {
    let env = setup().await;

    let response = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout");

    assert_eq!(response.order_id, "gw_1");
    assert_eq!(response.amount, 2500);
    assert_eq!(response.currency, "USD");
    assert_eq!(response.order.status, OrderStatus::Created);
    assert_eq!(response.order.user, "user_a");
    assert_eq!(response.order.gateway_order_id.as_deref(), Some("gw_1"));
    assert!(response.order.gateway_payment_id.is_none());
    assert!(response.order.gateway_signature.is_none());
}

#[tokio::test]
async fn checkout_rejects_empty_items_and_bad_totals() {
    let env = setup().await;

    let empty = CheckoutRequest {
        items: Some(vec![]),
        total_amount: Some(25.0),
        currency: None,
    };
    assert!(matches!(
        env.flow.checkout("user_a", empty).await,
        Err(AppError::Validation(_))
    ));

    let zero_total = CheckoutRequest {
        items: Some(sample_items()),
        total_amount: Some(0.0),
        currency: None,
    };
    assert!(matches!(
        env.flow.checkout("user_a", zero_total).await,
        Err(AppError::Validation(_))
    ));

    let bad_quantity = CheckoutRequest {
        items: Some(vec![OrderItem {
            product: "product:p1".to_string(),
            quantity: 0,
            price: 9.99,
        }]),
        total_amount: Some(25.0),
        currency: None,
    };
    assert!(matches!(
        env.flow.checkout("user_a", bad_quantity).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn checkout_body_missing_fields_is_a_validation_error() {
    let env = setup().await;

    // A body without total_amount still deserializes; the presence
    // check fires inside the flow where the error envelope applies.
    let no_total: CheckoutRequest = serde_json::from_str(
        r#"{"items": [{"product": "product:p1", "quantity": 1, "price": 9.99}]}"#,
    )
    .expect("deserialize");
    assert!(matches!(
        env.flow.checkout("user_a", no_total).await,
        Err(AppError::Validation(_))
    ));

    let no_items: CheckoutRequest =
        serde_json::from_str(r#"{"total_amount": 25.0}"#).expect("deserialize");
    assert!(matches!(
        env.flow.checkout("user_a", no_items).await,
        Err(AppError::Validation(_))
    ));

    // Nothing was persisted for either rejection.
    let orders = env.orders.find_by_user("user_a").await.expect("list");
    assert!(orders.is_empty());
}

#[tokio::test]
async fn gateway_failure_leaves_order_without_gateway_ids() {
    let env = setup().await;
    env.gateway.set_failing(true);

    let result = env.flow.checkout("user_a", sample_checkout()).await;
    assert!(matches!(result, Err(AppError::Gateway(_))));

    // Exactly one order survives the failed handoff, still in
    // `created` and with no gateway ids attached.
    let orders = env.orders.find_by_user("user_a").await.expect("list");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Created);
    assert!(orders[0].gateway_order_id.is_none());
    assert!(orders[0].gateway_payment_id.is_none());
    assert!(orders[0].gateway_signature.is_none());

    // A retry after recovery creates a fresh order, not a reuse.
    env.gateway.set_failing(false);
    let response = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("retry checkout");
    assert_eq!(response.order_id, "gw_1");

    let orders = env.orders.find_by_user("user_a").await.expect("list");
    assert_eq!(orders.len(), 2);
    assert_eq!(
        orders
            .iter()
            .filter(|o| o.gateway_order_id.as_deref() == Some("gw_1"))
            .count(),
        1
    );
}

#[tokio::test]
async fn verify_with_valid_signature_marks_paid_and_clears_cart() {
    let env = setup().await;

    env.cart
        .add_or_merge("user_a", "product:p1", 2)
        .await
        .expect("seed cart");
    env.cart
        .add_or_merge("user_b", "product:p1", 1)
        .await
        .expect("seed other cart");

    let checkout = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout");

    let payment_id = "pay_123";
    let signature = compute_signature(KEY_SECRET, &checkout.order_id, payment_id);

    let verified = env
        .flow
        .verify(VerifyRequest {
            gateway_order_id: checkout.order_id.clone(),
            gateway_payment_id: payment_id.to_string(),
            gateway_signature: signature,
        })
        .await
        .expect("verify");

    assert_eq!(verified.order.status, OrderStatus::Paid);
    assert_eq!(verified.order.gateway_payment_id.as_deref(), Some(payment_id));
    assert!(verified.order.gateway_signature.is_some());

    // Only the buyer's cart is wiped.
    let cart_a = env.cart.find_by_user("user_a").await.expect("cart a");
    assert!(cart_a.is_empty());
    let cart_b = env.cart.find_by_user("user_b").await.expect("cart b");
    assert_eq!(cart_b.len(), 1);
}

#[tokio::test]
async fn verify_with_bad_signature_fails_order_and_keeps_cart() {
    let env = setup().await;

    env.cart
        .add_or_merge("user_a", "product:p1", 2)
        .await
        .expect("seed cart");

    let checkout = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout");

    let result = env
        .flow
        .verify(VerifyRequest {
            gateway_order_id: checkout.order_id.clone(),
            gateway_payment_id: "pay_123".to_string(),
            gateway_signature: "bogus".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::InvalidSignature(_))));

    let order = env
        .orders
        .find_by_gateway_order_id(&checkout.order_id)
        .await
        .expect("query")
        .expect("order exists");
    assert_eq!(order.status, OrderStatus::Failed);

    // Cart is untouched on a failed verification.
    let cart = env.cart.find_by_user("user_a").await.expect("cart");
    assert_eq!(cart.len(), 1);
}

#[tokio::test]
async fn verify_unknown_gateway_order_is_not_found() {
    let env = setup().await;

    let result = env
        .flow
        .verify(VerifyRequest {
            gateway_order_id: "gw_missing".to_string(),
            gateway_payment_id: "pay_123".to_string(),
            gateway_signature: "anything".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn verify_is_idempotent_for_a_paid_order() {
    let env = setup().await;

    let checkout = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout");

    let payment_id = "pay_123";
    let request = VerifyRequest {
        gateway_order_id: checkout.order_id.clone(),
        gateway_payment_id: payment_id.to_string(),
        gateway_signature: compute_signature(KEY_SECRET, &checkout.order_id, payment_id),
    };

    let first = env.flow.verify(request.clone()).await.expect("first verify");
    let second = env.flow.verify(request).await.expect("second verify");

    assert_eq!(first.order.status, OrderStatus::Paid);
    assert_eq!(second.order.status, OrderStatus::Paid);
    assert_eq!(
        second.order.gateway_payment_id.as_deref(),
        Some(payment_id)
    );
}

#[tokio::test]
async fn paid_orders_listing_excludes_created_and_failed() {
    let env = setup().await;

    // Order 1: paid.
    let first = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout 1");
    let signature = compute_signature(KEY_SECRET, &first.order_id, "pay_1");
    env.flow
        .verify(VerifyRequest {
            gateway_order_id: first.order_id.clone(),
            gateway_payment_id: "pay_1".to_string(),
            gateway_signature: signature,
        })
        .await
        .expect("verify 1");

    // Order 2: stays created.
    env.flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout 2");

    // Order 3: failed verification.
    let third = env
        .flow
        .checkout("user_a", sample_checkout())
        .await
        .expect("checkout 3");
    let _ = env
        .flow
        .verify(VerifyRequest {
            gateway_order_id: third.order_id.clone(),
            gateway_payment_id: "pay_3".to_string(),
            gateway_signature: "bogus".to_string(),
        })
        .await;

    let paid = env
        .orders
        .find_paid_by_user("user_a")
        .await
        .expect("list paid");
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].gateway_order_id.as_deref(), Some(first.order_id.as_str()));
}
