// crates/bluvest-ledger/src/events.rs
//
// Ledger events recorded for external indexers.
//
// The engine appends events to an in-order journal; callers drain it with
// `VestingEngine::take_events`. `RedemptionAttempted` is recorded before
// the reward-token transfer is invoked and survives a failed transfer, so
// an off-ledger reconciler can pair attempts with completions.

use serde::{Deserialize, Serialize};

use bluvest_core::id::{Address, ScheduleId};
use bluvest_core::token::Amount;

/// Events emitted by the vesting engine during schedule mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// A schedule was created for `redeemer`.
    ScheduleCreated {
        id: ScheduleId,
        redeemer: Address,
        amount_total: Amount,
        revocable: bool,
    },
    /// A redemption is about to invoke the reward-token transfer.
    RedemptionAttempted { redeemer: Address, amount: Amount },
    /// Vested reward tokens were paid out to `redeemer`.
    ScheduleRedeemed { redeemer: Address, amount: Amount },
    /// A schedule was revoked; `forfeited` is the unvested remainder.
    ScheduleRevoked {
        id: ScheduleId,
        redeemer: Address,
        forfeited: Amount,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_round_trip_as_json() {
        let event = LedgerEvent::ScheduleRedeemed {
            redeemer: [9u8; 32],
            amount: 1_000,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: LedgerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_attempt_event_names_redeemer_and_amount() {
        let event = LedgerEvent::RedemptionAttempted {
            redeemer: [3u8; 32],
            amount: 42,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("RedemptionAttempted"));
        assert!(json.contains("42"));
    }
}
