// crates/bluvest-ledger/src/lib.rs
//
// bluvest-ledger: the supply-driven vesting/redemption ledger for the
// eBLU -> BLU compensation scheme.
//
// Schedules vest as the BLU reward token's total supply grows toward a
// fixed cap, not with elapsed time. The engine pays each unit of vested
// value out at most once, and an administrator may revoke revocable
// schedules (vested remainder paid, unvested remainder forfeited).

pub mod config;
pub mod engine;
pub mod events;
pub mod rate;
pub mod schedule;

// Re-export key types for ergonomic access from downstream crates.
pub use config::LedgerConfig;
pub use engine::VestingEngine;
pub use events::LedgerEvent;
pub use rate::{apply_percent, redemption_percent};
pub use schedule::{ScheduleStore, VestingSchedule};
