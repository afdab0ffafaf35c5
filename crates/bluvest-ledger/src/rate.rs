// crates/bluvest-ledger/src/rate.rs
//
// Redemption-rate oracle: the vesting completion percentage as a pure
// function of the reward token's current total supply.
//
// The rate is truncated to whole percentage points. The truncation is a
// deliberate, observable property of the scheme: supply growth below 1%
// of the cap produces no change in any schedule's redeemable amount.

use bluvest_core::token::Amount;

/// Compute the vesting completion percentage for the given total supply.
///
/// Returns a value in `0..=100`: 100 once `total_supply` reaches `cap`,
/// otherwise `floor(total_supply * 100 / cap)`.
///
/// Side-effect free; callers must evaluate it against a fresh supply
/// reading rather than a cached one.
pub fn redemption_percent(total_supply: Amount, cap: Amount) -> u8 {
    if total_supply >= cap {
        return 100;
    }
    // total_supply < cap, so the quotient is strictly below 100.
    (total_supply.saturating_mul(100) / cap) as u8
}

/// Apply a completion percentage to a schedule's total entitlement:
/// `floor(amount_total * percent / 100)` in integer arithmetic.
pub fn apply_percent(amount_total: Amount, percent: u8) -> Amount {
    amount_total.saturating_mul(percent as Amount) / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use bluvest_core::token::VESTING_SUPPLY_CAP;

    #[test]
    fn test_zero_supply_is_zero_percent() {
        assert_eq!(redemption_percent(0, VESTING_SUPPLY_CAP), 0);
    }

    #[test]
    fn test_supply_below_one_percent_truncates_to_zero() {
        assert_eq!(redemption_percent(VESTING_SUPPLY_CAP / 100 - 1, VESTING_SUPPLY_CAP), 0);
    }

    #[test]
    fn test_one_percent_of_cap() {
        assert_eq!(redemption_percent(VESTING_SUPPLY_CAP / 100, VESTING_SUPPLY_CAP), 1);
    }

    #[test]
    fn test_fractional_percent_truncates_down() {
        // 1.9% of the cap still reads as 1%
        let supply = VESTING_SUPPLY_CAP / 100 * 19 / 10;
        assert_eq!(redemption_percent(supply, VESTING_SUPPLY_CAP), 1);
    }

    #[test]
    fn test_cap_is_fully_vested() {
        assert_eq!(redemption_percent(VESTING_SUPPLY_CAP, VESTING_SUPPLY_CAP), 100);
    }

    #[test]
    fn test_above_cap_stays_fully_vested() {
        assert_eq!(redemption_percent(VESTING_SUPPLY_CAP * 3, VESTING_SUPPLY_CAP), 100);
    }

    #[test]
    fn test_apply_percent_floors() {
        assert_eq!(apply_percent(100_000, 1), 1_000);
        assert_eq!(apply_percent(100_000, 10), 10_000);
        assert_eq!(apply_percent(100_000, 100), 100_000);
        // 999 * 1 / 100 floors to 9
        assert_eq!(apply_percent(999, 1), 9);
    }

    #[test]
    fn test_idempotent_for_same_supply() {
        let supply = VESTING_SUPPLY_CAP / 4;
        assert_eq!(
            redemption_percent(supply, VESTING_SUPPLY_CAP),
            redemption_percent(supply, VESTING_SUPPLY_CAP)
        );
    }

    #[test]
    fn test_monotone_in_supply() {
        let mut last = 0;
        for step in 0..=100 {
            let supply = VESTING_SUPPLY_CAP / 100 * step;
            let pct = redemption_percent(supply, VESTING_SUPPLY_CAP);
            assert!(pct >= last);
            last = pct;
        }
        assert_eq!(last, 100);
    }
}
