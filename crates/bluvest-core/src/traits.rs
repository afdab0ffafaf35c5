// crates/bluvest-core/src/traits.rs

use crate::id::Address;
use crate::token::Amount;

/// Read contract of the claim-token (eBLU) service.
///
/// Consulted once at schedule creation: a redeemer's claim-token balance is
/// the entitlement proof backing the schedule's total amount.
pub trait ClaimToken: Send + Sync {
    /// Current claim-token balance of the holder, in base units.
    fn balance_of(&self, holder: &Address) -> Amount;
}

/// Contract of the reward-token (BLU) service.
///
/// `total_supply` drives the redemption-rate oracle and is re-read on every
/// evaluation (never cached). `transfer` performs the payout and may report
/// failure without panicking; the engine treats a `false` return as a
/// failed operation and rolls its bookkeeping back.
pub trait RewardToken: Send + Sync {
    /// Current total supply of the reward token, in base units.
    fn total_supply(&self) -> Amount;

    /// Transfer `amount` base units to `to`. Returns `false` if the token
    /// service rejected the transfer.
    fn transfer(&self, to: &Address, amount: Amount) -> bool;
}
