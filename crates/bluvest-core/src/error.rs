// crates/bluvest-core/src/error.rs

use thiserror::Error;

/// Ledger-wide error types for the bluvest vesting ledger.
///
/// Every failure is surfaced to the caller immediately; there is no
/// internal retry, and no recovery path other than the caller retrying
/// the whole operation with corrected inputs.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Operation referenced a schedule identifier that was never created.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation (other than creation) targeted an already-revoked schedule.
    #[error("Revoked: {0}")]
    Revoked(String),

    /// Caller lacks the capability required for the operation.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Schedule creation for a non-positive amount, or for a redeemer whose
    /// claim-token balance does not back the requested entitlement.
    #[error("Insufficient entitlement: {0}")]
    InsufficientEntitlement(String),

    /// Release requested for more than is currently vested and unpaid.
    #[error("Insufficient vested: {0}")]
    InsufficientVested(String),

    /// Redeem invoked with nothing new to pay out.
    #[error("Already claimed: nothing redeemable beyond what was already paid")]
    AlreadyClaimed,

    /// The reward-token transfer reported failure. No bookkeeping change
    /// persists when this is returned.
    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    /// Revocation attempted on a schedule created as non-revocable.
    #[error("Not revocable: {0}")]
    NotRevocable(String),
}
