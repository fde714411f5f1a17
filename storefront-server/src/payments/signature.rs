//! Gateway callback signature verification
//!
//! The gateway signs its payment callback as
//! `hex(HMAC-SHA256(secret, "{gateway_order_id}|{gateway_payment_id}"))`.
//! Verification recomputes the signature with the server-held secret
//! and compares for exact equality. The secret is passed in explicitly;
//! nothing here reads process environment.

use ring::hmac;

/// Compute the expected callback signature for an order/payment pair
pub fn compute_signature(secret: &str, gateway_order_id: &str, gateway_payment_id: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let payload = format!("{gateway_order_id}|{gateway_payment_id}");
    let tag = hmac::sign(&key, payload.as_bytes());
    hex::encode(tag.as_ref())
}

/// Check a supplied signature against the recomputed one
pub fn verify_signature(
    secret: &str,
    gateway_order_id: &str,
    gateway_payment_id: &str,
    supplied: &str,
) -> bool {
    compute_signature(secret, gateway_order_id, gateway_payment_id) == supplied
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known-answer vector: HMAC-SHA256("secret", "gw_1|pay_1")
    const KNOWN_SIG: &str = "f0445713f52cc7a544782743689c6cee0fe12c4ee3bb0a112ecef36d4066c89d";

    #[test]
    fn known_answer() {
        assert_eq!(compute_signature("secret", "gw_1", "pay_1"), KNOWN_SIG);
    }

    #[test]
    fn known_answer_second_vector() {
        assert_eq!(
            compute_signature("test_key_secret", "order_abc123", "pay_xyz789"),
            "e29a1d7d351b3e0a3e074ec580bf80c43ee115a0f0ee65ee2184995f28ac3ac8"
        );
    }

    #[test]
    fn output_is_lowercase_hex() {
        let sig = compute_signature("k", "a", "b");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn verify_accepts_matching_signature() {
        assert!(verify_signature("secret", "gw_1", "pay_1", KNOWN_SIG));
    }

    #[test]
    fn verify_rejects_bogus_signature() {
        assert!(!verify_signature("secret", "gw_1", "pay_1", "bogus"));
    }

    #[test]
    fn different_secret_changes_signature() {
        assert_ne!(
            compute_signature("secret", "gw_1", "pay_1"),
            compute_signature("other", "gw_1", "pay_1")
        );
    }

    #[test]
    fn separator_is_part_of_the_payload() {
        // "a|bc" vs "ab|c" must not collide
        assert_ne!(
            compute_signature("k", "a", "bc"),
            compute_signature("k", "ab", "c")
        );
    }
}
