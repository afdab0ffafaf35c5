// crates/bluvest-core/src/id.rs
//
// Schedule-identifier derivation.
//
// A schedule id is a pure function of (holder, per-holder creation index):
// SHA-256(holder || index as big-endian u64). Ids are collision-free as
// long as each holder's indices are assigned monotonically from zero, so
// no separate id counter needs to be persisted.

use sha2::{Digest, Sha256};

/// Opaque 32-byte account identifier.
pub type Address = [u8; 32];

/// 32-byte vesting-schedule identifier.
pub type ScheduleId = [u8; 32];

/// Derive the schedule identifier for the given holder and per-holder index.
pub fn schedule_id(holder: &Address, index: u64) -> ScheduleId {
    let mut hasher = Sha256::new();
    hasher.update(holder);
    hasher.update(index.to_be_bytes());
    let result = hasher.finalize();
    let mut id = [0u8; 32];
    id.copy_from_slice(&result);
    id
}

/// Render a 32-byte identifier or address as lowercase hex, for log and
/// error messages.
pub fn hex(bytes: &[u8; 32]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
