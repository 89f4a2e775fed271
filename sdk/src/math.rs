//! # Share Math
//!
//! Pure arithmetic mirroring the vault's own accounting: share/asset
//! conversion, price per share, and an annualized yield figure for
//! display. No I/O.
//!
//! All on-chain quantities are `U256`. Products are computed with
//! `checked_mul`; an overflow is an error, never a wrapped value. Division
//! truncates toward zero, the same way the contract rounds.
//!
//! Two zero-supply policies apply:
//!
//! - an empty vault converts assets to shares 1:1, and
//! - an empty vault prices a share at exactly [`PPS_SCALE`] (1.0).

use alloy::primitives::U256;
use thiserror::Error;

use crate::config::{PPS_SCALE, SECONDS_PER_YEAR};

/// Errors raised by the share math helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// An intermediate product exceeded 256 bits.
    #[error("arithmetic overflow in share math")]
    Overflow,

    /// Shares exist but the vault reports no assets. The contract never
    /// produces this state; seeing it means the inputs are inconsistent.
    #[error("inconsistent vault totals: supply {total_supply} with zero assets")]
    InconsistentSupply {
        /// The non-zero share supply that came with zero assets.
        total_supply: U256,
    },
}

/// Shares minted for `assets` at the given vault totals.
///
/// Returns `assets` unchanged when `total_supply` is zero.
pub fn convert_to_shares(
    assets: U256,
    total_assets: U256,
    total_supply: U256,
) -> Result<U256, MathError> {
    if total_supply.is_zero() {
        return Ok(assets);
    }
    if total_assets.is_zero() {
        return Err(MathError::InconsistentSupply { total_supply });
    }
    let product = assets.checked_mul(total_supply).ok_or(MathError::Overflow)?;
    Ok(product / total_assets)
}

/// Assets redeemable for `shares` at the given vault totals.
///
/// Returns zero when `total_supply` is zero.
pub fn convert_to_assets(
    shares: U256,
    total_assets: U256,
    total_supply: U256,
) -> Result<U256, MathError> {
    if total_supply.is_zero() {
        return Ok(U256::ZERO);
    }
    let product = shares.checked_mul(total_assets).ok_or(MathError::Overflow)?;
    Ok(product / total_supply)
}

/// Price of one share in asset units, scaled by 10^18.
pub fn price_per_share(total_assets: U256, total_supply: U256) -> Result<U256, MathError> {
    if total_supply.is_zero() {
        return Ok(PPS_SCALE);
    }
    let scaled = total_assets.checked_mul(PPS_SCALE).ok_or(MathError::Overflow)?;
    Ok(scaled / total_supply)
}

/// Annualized yield, in percent, implied by a price-per-share move over
/// `time_delta_secs`.
///
/// Compounds the period return `(new - old) / old` over
/// `SECONDS_PER_YEAR / time_delta_secs` periods. Returns `0.0` when
/// `old_pps` or `time_delta_secs` is zero.
///
/// This is a reporting figure computed in `f64`. It goes negative when the
/// price falls and explodes for very short windows; do not settle on it.
pub fn calculate_apy(old_pps: U256, new_pps: U256, time_delta_secs: u64) -> f64 {
    if old_pps.is_zero() || time_delta_secs == 0 {
        return 0.0;
    }

    let price_change = if new_pps >= old_pps {
        to_f64(new_pps - old_pps)
    } else {
        -to_f64(old_pps - new_pps)
    };
    let period_return = price_change / to_f64(old_pps);
    let periods_per_year = SECONDS_PER_YEAR / time_delta_secs as f64;

    ((1.0 + period_return).powf(periods_per_year) - 1.0) * 100.0
}

/// Nearest `f64` to a `U256`. Values past `f64::MAX` cannot occur for
/// 256-bit inputs, so the fallback is never taken in practice.
fn to_f64(value: U256) -> f64 {
    value.to_string().parse().unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn e18(v: u64) -> U256 {
        U256::from(v) * PPS_SCALE
    }

    // -----------------------------------------------------------------------
    // Conversion
    // -----------------------------------------------------------------------

    #[test]
    fn proportional_conversion() {
        assert_eq!(convert_to_shares(u(100), u(1000), u(500)).unwrap(), u(50));
        assert_eq!(convert_to_assets(u(50), u(1000), u(500)).unwrap(), u(100));
    }

    #[test]
    fn empty_vault_policies() {
        assert_eq!(convert_to_shares(u(12_345), u(0), u(0)).unwrap(), u(12_345));
        assert_eq!(convert_to_shares(u(12_345), u(999), u(0)).unwrap(), u(12_345));
        assert_eq!(convert_to_assets(u(12_345), u(999), u(0)).unwrap(), U256::ZERO);
    }

    #[test]
    fn conversion_truncates() {
        // 10 * 3 / 7 = 4.28...
        assert_eq!(convert_to_shares(u(10), u(7), u(3)).unwrap(), u(4));
        // 10 * 7 / 3 = 23.33...
        assert_eq!(convert_to_assets(u(10), u(7), u(3)).unwrap(), u(23));
    }

    #[test]
    fn shares_without_assets_is_rejected() {
        let err = convert_to_shares(u(1), U256::ZERO, u(10)).unwrap_err();
        assert_eq!(err, MathError::InconsistentSupply { total_supply: u(10) });
    }

    #[test]
    fn overflow_is_reported() {
        assert_eq!(
            convert_to_shares(U256::MAX, u(1), u(2)).unwrap_err(),
            MathError::Overflow
        );
        assert_eq!(
            convert_to_assets(U256::MAX, u(2), u(1)).unwrap_err(),
            MathError::Overflow
        );
    }

    // -----------------------------------------------------------------------
    // Price per share
    // -----------------------------------------------------------------------

    #[test]
    fn pps_of_empty_vault_is_one() {
        assert_eq!(price_per_share(U256::ZERO, U256::ZERO).unwrap(), PPS_SCALE);
        assert_eq!(price_per_share(u(5_000), U256::ZERO).unwrap(), PPS_SCALE);
    }

    #[test]
    fn pps_tracks_ratio() {
        // 1_050 assets over 1_000 shares = 1.05
        let pps = price_per_share(u(1_050), u(1_000)).unwrap();
        assert_eq!(pps, u(1_050_000_000_000_000_000));
    }

    #[test]
    fn pps_with_mixed_decimals() {
        // 100 USDC (6 decimals) backing 100 shares (18 decimals).
        let pps = price_per_share(u(100_000_000), e18(100)).unwrap();
        assert_eq!(pps, u(1_000_000));
    }

    // -----------------------------------------------------------------------
    // APY
    // -----------------------------------------------------------------------

    #[test]
    fn flat_price_is_zero_apy() {
        assert_eq!(calculate_apy(e18(1), e18(1), 86_400), 0.0);
        assert_eq!(calculate_apy(e18(1), e18(1), 1), 0.0);
    }

    #[test]
    fn guards_return_zero() {
        assert_eq!(calculate_apy(U256::ZERO, e18(2), 86_400), 0.0);
        assert_eq!(calculate_apy(U256::ZERO, U256::ZERO, 0), 0.0);
        assert_eq!(calculate_apy(e18(1), e18(2), 0), 0.0);
    }

    #[test]
    fn one_year_of_five_percent() {
        let old = e18(100);
        let new = e18(105);
        let apy = calculate_apy(old, new, SECONDS_PER_YEAR as u64);
        assert!((apy - 5.0).abs() < 1e-9, "apy = {apy}");
    }

    #[test]
    fn daily_gain_compounds() {
        // 0.01% per day compounds to roughly 3.72% a year.
        let old = u(1_000_000_000_000_000_000);
        let new = u(1_000_100_000_000_000_000);
        let apy = calculate_apy(old, new, 86_400);
        assert!(apy > 3.6 && apy < 3.8, "apy = {apy}");
    }

    #[test]
    fn falling_price_is_negative() {
        let apy = calculate_apy(e18(100), e18(95), SECONDS_PER_YEAR as u64);
        assert!((apy + 5.0).abs() < 1e-9, "apy = {apy}");
    }
}
