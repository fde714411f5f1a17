//! Money conversion helpers
//!
//! Order totals are stored in major currency units as `f64`. The
//! gateway wants minor units (cents). Going through `Decimal` avoids
//! the classic `19.99 * 100 = 1998.9999...` truncation.

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::utils::{AppError, AppResult};

/// Convert a major-unit amount to gateway minor units (x100, rounded)
pub fn to_minor_units(amount: f64) -> AppResult<i64> {
    let decimal = Decimal::from_f64(amount)
        .ok_or_else(|| AppError::validation(format!("Invalid amount: {amount}")))?;
    (decimal * Decimal::from(100))
        .round()
        .to_i64()
        .ok_or_else(|| AppError::validation(format!("Amount out of range: {amount}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_amounts() {
        assert_eq!(to_minor_units(20.0).unwrap(), 2000);
        assert_eq!(to_minor_units(0.0).unwrap(), 0);
    }

    #[test]
    fn fractional_amounts() {
        assert_eq!(to_minor_units(10.99).unwrap(), 1099);
        assert_eq!(to_minor_units(0.01).unwrap(), 1);
    }

    #[test]
    fn float_representation_drift_is_absorbed() {
        // 19.99 is not exactly representable; naive *100 then truncate
        // would yield 1998
        assert_eq!(to_minor_units(19.99).unwrap(), 1999);
        assert_eq!(to_minor_units(0.1 + 0.2).unwrap(), 30);
    }

    #[test]
    fn nan_is_rejected() {
        assert!(to_minor_units(f64::NAN).is_err());
    }
}
