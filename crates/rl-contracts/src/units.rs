//! Conversions between decimal AVAX amounts and 18-decimal wei.

use primitive_types::U256;
use thiserror::Error;

pub const DECIMALS: usize = 18;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitsError {
    #[error("invalid amount '{0}'")]
    Invalid(String),
    #[error("amount '{0}' has more than 18 decimals")]
    TooPrecise(String),
    #[error("amount '{0}' overflows uint256")]
    Overflow(String),
}

fn one_ether() -> U256 {
    U256::exp10(DECIMALS)
}

/// Parses `"1.5"` into `1_500_000_000_000_000_000` wei.
pub fn parse_ether(amount: &str) -> Result<U256, UnitsError> {
    let trimmed = amount.trim();
    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

    let all_digits = |part: &str| part.bytes().all(|byte| byte.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::Invalid(amount.to_owned()));
    }
    if fraction.len() > DECIMALS {
        return Err(UnitsError::TooPrecise(amount.to_owned()));
    }

    let overflow = || UnitsError::Overflow(amount.to_owned());
    let whole = if whole.is_empty() {
        U256::zero()
    } else {
        U256::from_dec_str(whole).map_err(|_| overflow())?
    };
    let fraction = if fraction.is_empty() {
        U256::zero()
    } else {
        let padded = format!("{fraction:0<width$}", width = DECIMALS);
        U256::from_dec_str(&padded).map_err(|_| overflow())?
    };

    whole
        .checked_mul(one_ether())
        .and_then(|wei| wei.checked_add(fraction))
        .ok_or_else(overflow)
}

/// Formats wei as a decimal AVAX amount, always keeping one fractional
/// digit (`"1.0"`, `"0.25"`).
pub fn format_ether(wei: U256) -> String {
    let whole = wei / one_ether();
    let fraction = wei % one_ether();
    let digits = format!("{:0>width$}", fraction.to_string(), width = DECIMALS);
    let trimmed = digits.trim_end_matches('0');
    if trimmed.is_empty() {
        format!("{whole}.0")
    } else {
        format!("{whole}.{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_whole_and_fractional_amounts() {
        assert_eq!(parse_ether("1").unwrap(), one_ether());
        assert_eq!(parse_ether("1.5").unwrap(), U256::from(1_500_000_000_000_000_000u64));
        assert_eq!(parse_ether(".25").unwrap(), U256::from(250_000_000_000_000_000u64));
        assert_eq!(parse_ether("0.000000000000000001").unwrap(), U256::one());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_ether(""), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_ether("abc"), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_ether("-1"), Err(UnitsError::Invalid(_))));
        assert!(matches!(parse_ether("1.2.3"), Err(UnitsError::Invalid(_))));
        assert!(matches!(
            parse_ether("0.0000000000000000001"),
            Err(UnitsError::TooPrecise(_))
        ));
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_ether(one_ether()), "1.0");
        assert_eq!(format_ether(U256::zero()), "0.0");
        assert_eq!(format_ether(U256::from(250_000_000_000_000_000u64)), "0.25");
        assert_eq!(format_ether(U256::from(12) * one_ether() + U256::one()), "12.000000000000000001");
    }
}
