// crates/bluvest-core/src/token.rs
//
// BLU reward-token units and supply constants.
//
// The smallest unit of BLU is the base unit. 1 BLU = 10^18 base units.
// All internal accounting uses base units to avoid floating-point
// precision issues in redemption calculations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Decimal places of the BLU reward token.
pub const DECIMALS: u32 = 18;

/// Number of base units in one BLU. 1 BLU = 10^18 base units.
pub const UNITS_PER_BLU: u128 = 1_000_000_000_000_000_000;

/// Reward-token total supply at which vesting completes:
/// 100,000,000 BLU, expressed in base units.
pub const VESTING_SUPPLY_CAP: u128 = 100_000_000 * UNITS_PER_BLU;

/// Type alias for base units — the smallest unit of BLU.
pub type Amount = u128;

/// A BLU token amount.
///
/// Wraps an amount in base units (the smallest denomination).
/// All arithmetic is performed in integer base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Blu {
    /// Amount in base units (1 BLU = 10^18 base units).
    pub units: Amount,
}

impl Blu {
    /// Create a Blu amount from a whole-token value.
    ///
    /// # Example
    /// ```
    /// use bluvest_core::token::{Blu, UNITS_PER_BLU};
    /// let amount = Blu::from_blu(3);
    /// assert_eq!(amount.units, 3 * UNITS_PER_BLU);
    /// ```
    pub fn from_blu(whole: u64) -> Self {
        Self {
            units: whole as Amount * UNITS_PER_BLU,
        }
    }

    /// Create a Blu amount from a base-unit value.
    pub fn from_units(units: Amount) -> Self {
        Self { units }
    }

    /// Convert this amount to whole BLU as a floating-point value.
    pub fn to_blu(&self) -> f64 {
        self.units as f64 / UNITS_PER_BLU as f64
    }

    /// Returns zero BLU.
    pub fn zero() -> Self {
        Self { units: 0 }
    }
}

impl Add for Blu {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units.saturating_add(rhs.units),
        }
    }
}

impl Sub for Blu {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units.saturating_sub(rhs.units),
        }
    }
}

impl fmt::Display for Blu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.units / UNITS_PER_BLU;
        let frac = self.units % UNITS_PER_BLU;
        if frac == 0 {
            write!(f, "{} BLU", whole)
        } else {
            // Display up to 18 decimal places, trimming trailing zeros
            let frac_str = format!("{:018}", frac);
            let trimmed = frac_str.trim_end_matches('0');
            write!(f, "{}.{} BLU", whole, trimmed)
        }
    }
}
