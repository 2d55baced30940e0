//! Money bounds and overflow-checked arithmetic

use rust_decimal::Decimal;

use crate::error::{AppError, AppResult};

/// Largest amount (in reais) accepted for any single money input
pub const MAX_AMOUNT: i64 = 1_000_000_000;

pub fn is_valid_amount(value: &Decimal) -> bool {
    *value >= Decimal::ZERO && *value <= Decimal::from(MAX_AMOUNT)
}

/// Reject negative or oversized amounts
pub fn check_amount(label: &str, value: &Decimal) -> AppResult<()> {
    if is_valid_amount(value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{} must be between 0 and {}",
            label, MAX_AMOUNT
        )))
    }
}

fn out_of_range() -> AppError {
    AppError::Validation("Amount out of range".to_string())
}

pub fn checked_sum<I>(values: I) -> AppResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(out_of_range)
}

pub fn checked_mul(a: Decimal, b: Decimal) -> AppResult<Decimal> {
    a.checked_mul(b).ok_or_else(out_of_range)
}

pub fn checked_sub(a: Decimal, b: Decimal) -> AppResult<Decimal> {
    a.checked_sub(b).ok_or_else(out_of_range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn huge() -> Decimal {
        "50000000000000000000000000000".parse().unwrap()
    }

    #[test]
    fn test_amount_bounds() {
        assert!(is_valid_amount(&Decimal::ZERO));
        assert!(is_valid_amount(&Decimal::from(MAX_AMOUNT)));
        assert!(!is_valid_amount(&Decimal::new(-1, 2)));
        assert!(!is_valid_amount(&huge()));
        assert!(matches!(check_amount("Desconto", &huge()), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(checked_sum([huge(), huge()]), Err(AppError::Validation(_))));
        assert!(matches!(checked_mul(huge(), Decimal::from(2)), Err(AppError::Validation(_))));
        assert_eq!(checked_sum([Decimal::new(150, 2), Decimal::ONE]).unwrap(), Decimal::new(250, 2));
    }
}
