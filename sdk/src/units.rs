//! Human-readable token amounts.
//!
//! On-chain amounts are integers in the token's smallest unit; these
//! helpers move between that and decimal strings like `"1.2345"`. The
//! conversion is done on digit strings, so any `decimals` value works and
//! nothing is ever rounded: [`format_shares`] truncates, and
//! [`parse_amount`] drops digits past `decimals`.

use alloy::primitives::U256;
use thiserror::Error;

use crate::config::{DEFAULT_DECIMALS, DEFAULT_PRECISION};

/// Errors raised while parsing amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitsError {
    /// The string is not a non-negative decimal number.
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
}

/// Formats `amount` with `decimals` implied decimal places, keeping at most
/// `precision` fractional digits.
///
/// Extra digits are cut, not rounded. When the kept fractional digits are
/// all zero (or `precision` is 0) only the whole part is printed.
///
/// ```
/// use alloy::primitives::U256;
/// use elitra_sdk::units::format_shares;
///
/// let shares = U256::from(1_234_567_890_000_000_000u64);
/// assert_eq!(format_shares(shares, 18, 4), "1.2345");
/// assert_eq!(format_shares(U256::from(2_000_000u64), 6, 4), "2");
/// ```
pub fn format_shares(amount: U256, decimals: u8, precision: usize) -> String {
    let decimals = decimals as usize;
    let digits = amount.to_string();

    // Guarantee at least one whole digit.
    let padded = if digits.len() <= decimals {
        format!("{digits:0>width$}", width = decimals + 1)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = &fraction[..precision.min(decimals)];

    if fraction.bytes().all(|b| b == b'0') {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// [`format_shares`] with 18 decimals and 4 digits of precision.
pub fn format_shares_default(amount: U256) -> String {
    format_shares(amount, DEFAULT_DECIMALS, DEFAULT_PRECISION)
}

/// Parses a decimal string into smallest units.
///
/// Splits on the first `.`, pads or truncates the fractional part to
/// exactly `decimals` digits and parses the concatenation as a base-10
/// integer. Signs, a second `.`, or any other non-digit make the integer
/// parse fail.
///
/// ```
/// use alloy::primitives::U256;
/// use elitra_sdk::units::parse_amount;
///
/// assert_eq!(parse_amount("100.5", 6).unwrap(), U256::from(100_500_000u64));
/// assert!(parse_amount("-1", 6).is_err());
/// ```
pub fn parse_amount(text: &str, decimals: u8) -> Result<U256, UnitsError> {
    let decimals = decimals as usize;
    let (whole, fraction) = text.split_once('.').unwrap_or((text, ""));

    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(whole);
    let kept: String = fraction.chars().take(decimals).collect();
    let kept_len = kept.chars().count();
    digits.push_str(&kept);
    digits.extend(std::iter::repeat('0').take(decimals - kept_len));

    if digits.is_empty() {
        return Ok(U256::ZERO);
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UnitsError::InvalidAmount(text.to_string()));
    }
    U256::from_str_radix(&digits, 10).map_err(|_| UnitsError::InvalidAmount(text.to_string()))
}

/// [`parse_amount`] with 18 decimals.
pub fn parse_amount_default(text: &str) -> Result<U256, UnitsError> {
    parse_amount(text, DEFAULT_DECIMALS)
}
