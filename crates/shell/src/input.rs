//! Conversion of raw prompt answers into domain inputs.

use stockledger_core::{DomainError, DomainResult};

/// Parse a decimal price. Range checks (finite, positive) are left to `Price`.
///
/// A comma is accepted as the decimal separator (`15,00`). Thousands
/// separators are not: input holding both `,` and `.` is rejected.
pub fn parse_price(raw: &str) -> DomainResult<f64> {
    let raw = raw.trim();
    if raw.contains(',') && raw.contains('.') {
        return Err(DomainError::validation(format!(
            "invalid price: {raw:?} (use a single decimal separator, no thousands separator)"
        )));
    }
    raw.replace(',', ".")
        .parse::<f64>()
        .map_err(|_| DomainError::validation(format!("invalid price: {raw:?}")))
}

/// Parse an integer quantity. Sign checks are left to the domain.
pub fn parse_quantity(raw: &str) -> DomainResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| DomainError::validation(format!("invalid quantity: {:?}", raw.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_dot_and_comma() {
        assert_eq!(parse_price(" 1.5 ").unwrap(), 1.5);
        assert_eq!(parse_price("15,00").unwrap(), 15.0);
    }

    #[test]
    fn price_with_thousands_separator_is_rejected_with_hint() {
        let err = parse_price("1,000.50").unwrap_err();
        match err {
            DomainError::Validation(msg) => {
                assert!(msg.contains("\"1,000.50\""));
                assert!(msg.contains("single decimal separator"));
            }
            _ => panic!("Expected Validation error for mixed separators"),
        }
        assert!(parse_price("1.000,50").is_err());
    }

    #[test]
    fn price_rejects_text() {
        assert!(matches!(parse_price("abc"), Err(DomainError::Validation(_))));
        assert!(parse_price("").is_err());
    }

    #[test]
    fn quantity_rejects_fractions_and_text() {
        assert_eq!(parse_quantity("10").unwrap(), 10);
        assert_eq!(parse_quantity("-4").unwrap(), -4);
        assert!(parse_quantity("2.5").is_err());
        assert!(parse_quantity("ten").is_err());
    }
}
