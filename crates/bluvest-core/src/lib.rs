// crates/bluvest-core/src/lib.rs
//
// bluvest-core: Core types, errors, and collaborator contracts for the
// bluvest vesting ledger.
//
// This is the leaf crate the ledger builds on. It defines the canonical
// token units, schedule-identifier derivation, the error type, and the
// trait interfaces for the external claim-token (eBLU) and reward-token
// (BLU) services.

pub mod error;
pub mod id;
pub mod token;
pub mod traits;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use bluvest_core::Amount;`

pub use error::LedgerError;
pub use id::{schedule_id, Address, ScheduleId};
pub use token::{Amount, Blu, DECIMALS, UNITS_PER_BLU, VESTING_SUPPLY_CAP};
pub use traits::{ClaimToken, RewardToken};
