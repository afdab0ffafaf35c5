// crates/bluvest-ledger/src/engine.rs
//
// The redemption engine: schedule creation, supply-driven redemption, and
// administrative revocation over an owned ScheduleStore.
//
// Mutating operations take the caller address explicitly and check it
// against the administrator or the schedule's redeemer. Bookkeeping is
// committed before the external reward-token transfer is invoked; a
// transfer that reports failure rolls the bookkeeping back, so callers
// never observe a partial commit.

use std::sync::Arc;

use bluvest_core::error::LedgerError;
use bluvest_core::id::{hex, Address, ScheduleId};
use bluvest_core::token::Amount;
use bluvest_core::traits::{ClaimToken, RewardToken};

use crate::config::LedgerConfig;
use crate::events::LedgerEvent;
use crate::rate::{apply_percent, redemption_percent};
use crate::schedule::{ScheduleStore, VestingSchedule};

/// The vesting/redemption engine.
///
/// Owns the schedule store and consults the external claim-token and
/// reward-token services through their trait contracts. One instance per
/// ledger; tests construct isolated instances with mock services.
pub struct VestingEngine {
    store: ScheduleStore,
    claim_token: Arc<dyn ClaimToken>,
    reward_token: Arc<dyn RewardToken>,
    /// The single privileged caller, fixed at construction.
    admin: Address,
    /// Reward-token supply at which vesting completes, in base units.
    cap: Amount,
    events: Vec<LedgerEvent>,
}

impl VestingEngine {
    /// Create an engine with the default configuration (18 decimals,
    /// 100,000,000-token cap).
    pub fn new(
        admin: Address,
        claim_token: Arc<dyn ClaimToken>,
        reward_token: Arc<dyn RewardToken>,
    ) -> Self {
        Self::with_config(admin, claim_token, reward_token, &LedgerConfig::default())
    }

    /// Create an engine with an explicit configuration.
    pub fn with_config(
        admin: Address,
        claim_token: Arc<dyn ClaimToken>,
        reward_token: Arc<dyn RewardToken>,
        config: &LedgerConfig,
    ) -> Self {
        Self {
            store: ScheduleStore::new(),
            claim_token,
            reward_token,
            admin,
            cap: config.cap_units(),
            events: Vec::new(),
        }
    }

    // -----------------------------------------------------------------
    // Mutating operations
    // -----------------------------------------------------------------

    /// Create a vesting schedule for `redeemer` at their next index.
    ///
    /// Administrator-only. The redeemer's claim-token balance is the
    /// entitlement proof and must cover `amount`; the caller is expected
    /// to have issued that many claim tokens to the redeemer beforehand.
    ///
    /// # Errors
    /// Returns `LedgerError::Unauthorized` if `caller` is not the
    /// administrator, and `LedgerError::InsufficientEntitlement` if
    /// `amount` is zero or exceeds the redeemer's claim-token balance.
    pub fn create_schedule(
        &mut self,
        caller: &Address,
        redeemer: Address,
        revocable: bool,
        amount: Amount,
    ) -> Result<ScheduleId, LedgerError> {
        self.require_admin(caller, "create a vesting schedule")?;

        if amount == 0 {
            return Err(LedgerError::InsufficientEntitlement(
                "schedule amount must be positive".to_string(),
            ));
        }
        let balance = self.claim_token.balance_of(&redeemer);
        if balance < amount {
            return Err(LedgerError::InsufficientEntitlement(format!(
                "claim-token balance {} of {} does not cover the requested entitlement {}",
                balance,
                hex(&redeemer),
                amount
            )));
        }

        let id = self.store.insert_new(VestingSchedule {
            redeemer,
            revocable,
            amount_total: amount,
            redeemed: 0,
            revoked: false,
        });
        self.events.push(LedgerEvent::ScheduleCreated {
            id,
            redeemer,
            amount_total: amount,
            revocable,
        });
        tracing::info!(
            "Created vesting schedule {} for {} ({} base units, revocable={})",
            hex(&id),
            hex(&redeemer),
            amount,
            revocable
        );
        Ok(id)
    }

    /// Pay out `amount` base units from a schedule.
    ///
    /// Caller must be the schedule's redeemer or the administrator. The
    /// amount must not exceed the currently-vested-but-unpaid delta, so
    /// `redeemed` can never exceed the computed redemption amount.
    ///
    /// # Errors
    /// `NotFound`, `Revoked`, `Unauthorized`, `InsufficientVested`, or
    /// `TransferFailed` (in which case no state change persists).
    pub fn release(
        &mut self,
        caller: &Address,
        id: &ScheduleId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let percent = redemption_percent(self.reward_token.total_supply(), self.cap);
        self.release_at_percent(caller, id, amount, percent)
    }

    /// Release mechanics against an already-read completion percentage.
    ///
    /// `revoke` calls this with the percentage it sized the final payout
    /// from, so one logically-atomic operation never reads the external
    /// supply twice.
    fn release_at_percent(
        &mut self,
        caller: &Address,
        id: &ScheduleId,
        amount: Amount,
        percent: u8,
    ) -> Result<(), LedgerError> {
        let (redeemer, releasable) = {
            let schedule = self.schedule_or_not_found(id)?;
            if schedule.revoked {
                return Err(LedgerError::Revoked(format!(
                    "schedule {} has been revoked",
                    hex(id)
                )));
            }
            if caller != &schedule.redeemer && caller != &self.admin {
                return Err(LedgerError::Unauthorized(format!(
                    "caller {} is neither the redeemer nor the administrator",
                    hex(caller)
                )));
            }
            let redeemable = apply_percent(schedule.amount_total, percent);
            (schedule.redeemer, redeemable.saturating_sub(schedule.redeemed))
        };

        if amount > releasable {
            return Err(LedgerError::InsufficientVested(format!(
                "requested {} exceeds the {} base units currently vested and unpaid",
                amount, releasable
            )));
        }

        // Bookkeeping commits before the external transfer.
        self.commit_payout(id, amount);
        if !self.reward_token.transfer(&redeemer, amount) {
            self.rollback_payout(id, amount);
            tracing::warn!(
                "Reward-token transfer of {} base units to {} failed; release rolled back",
                amount,
                hex(&redeemer)
            );
            return Err(LedgerError::TransferFailed(format!(
                "reward token rejected transfer of {} base units to {}",
                amount,
                hex(&redeemer)
            )));
        }

        self.events.push(LedgerEvent::ScheduleRedeemed { redeemer, amount });
        tracing::info!(
            "Released {} base units from schedule {} to {}",
            amount,
            hex(id),
            hex(&redeemer)
        );
        Ok(())
    }

    /// Redeem the full outstanding vested delta of the redeemer's
    /// most-recently-created schedule.
    ///
    /// Convenience entry point: it always targets the last schedule
    /// (`index = holder_count - 1`) and ignores any earlier schedules;
    /// use [`release`](Self::release) for those. Caller must be the
    /// redeemer or the administrator. On success the paid delta is
    /// accumulated into `redeemed`, which afterwards equals the computed
    /// redemption amount.
    ///
    /// Records a `RedemptionAttempted` event before invoking the transfer;
    /// that event persists even when the transfer fails, so off-ledger
    /// reconcilers can pair attempts with completions.
    ///
    /// # Errors
    /// `NotFound` (no schedules for the redeemer), `Revoked`,
    /// `Unauthorized`, `AlreadyClaimed` (nothing vested beyond what was
    /// already paid), or `TransferFailed` (bookkeeping rolled back).
    pub fn redeem(&mut self, caller: &Address, redeemer: &Address) -> Result<Amount, LedgerError> {
        let count = self.store.holder_count(redeemer);
        if count == 0 {
            return Err(LedgerError::NotFound(format!(
                "no vesting schedules exist for holder {}",
                hex(redeemer)
            )));
        }
        let id = self.store.id_for_holder_index(redeemer, count - 1);
        let percent = redemption_percent(self.reward_token.total_supply(), self.cap);

        let amount = {
            let schedule = self.schedule_or_not_found(&id)?;
            if schedule.revoked {
                return Err(LedgerError::Revoked(format!(
                    "schedule {} has been revoked",
                    hex(&id)
                )));
            }
            if caller != redeemer && caller != &self.admin {
                return Err(LedgerError::Unauthorized(format!(
                    "caller {} is neither the redeemer nor the administrator",
                    hex(caller)
                )));
            }
            let redeemable = apply_percent(schedule.amount_total, percent);
            if redeemable <= schedule.redeemed {
                return Err(LedgerError::AlreadyClaimed);
            }
            redeemable - schedule.redeemed
        };

        self.events.push(LedgerEvent::RedemptionAttempted {
            redeemer: *redeemer,
            amount,
        });

        // Bookkeeping commits before the external transfer.
        self.commit_payout(&id, amount);
        if !self.reward_token.transfer(redeemer, amount) {
            self.rollback_payout(&id, amount);
            tracing::warn!(
                "Reward-token transfer of {} base units to {} failed; redeem rolled back",
                amount,
                hex(redeemer)
            );
            return Err(LedgerError::TransferFailed(format!(
                "reward token rejected transfer of {} base units to {}",
                amount,
                hex(redeemer)
            )));
        }

        self.events.push(LedgerEvent::ScheduleRedeemed {
            redeemer: *redeemer,
            amount,
        });
        tracing::info!(
            "Redeemed {} base units from schedule {} to {}",
            amount,
            hex(&id),
            hex(redeemer)
        );
        Ok(amount)
    }

    /// Revoke a revocable schedule.
    ///
    /// Administrator-only. Pays out the currently-vested-but-unpaid
    /// remainder through the release mechanics (a failed transfer aborts
    /// the whole revocation), forfeits the unvested remainder from the
    /// outstanding total, and freezes the schedule: its redeemable amount
    /// is zero forever after.
    ///
    /// # Errors
    /// `Unauthorized`, `NotFound`, `Revoked` (already revoked),
    /// `NotRevocable`, or `TransferFailed` from the final payout.
    pub fn revoke(&mut self, caller: &Address, id: &ScheduleId) -> Result<(), LedgerError> {
        self.require_admin(caller, "revoke a vesting schedule")?;
        let percent = redemption_percent(self.reward_token.total_supply(), self.cap);

        let (redeemer, unreleased) = {
            let schedule = self.schedule_or_not_found(id)?;
            if schedule.revoked {
                return Err(LedgerError::Revoked(format!(
                    "schedule {} has already been revoked",
                    hex(id)
                )));
            }
            if !schedule.revocable {
                return Err(LedgerError::NotRevocable(format!(
                    "schedule {} was created as non-revocable",
                    hex(id)
                )));
            }
            let vested = apply_percent(schedule.amount_total, percent);
            (schedule.redeemer, vested.saturating_sub(schedule.redeemed))
        };

        if unreleased > 0 {
            let admin = self.admin;
            self.release_at_percent(&admin, id, unreleased, percent)?;
        }

        // The vested remainder is paid; whatever is still unredeemed is
        // the unvested forfeit.
        let forfeited = {
            let schedule = match self.store.get_mut(id) {
                Some(schedule) => schedule,
                None => {
                    return Err(LedgerError::NotFound(format!(
                        "no vesting schedule with id {}",
                        hex(id)
                    )))
                }
            };
            let forfeited = schedule.unredeemed();
            schedule.revoked = true;
            forfeited
        };
        self.store.sub_outstanding(forfeited);

        self.events.push(LedgerEvent::ScheduleRevoked {
            id: *id,
            redeemer,
            forfeited,
        });
        tracing::info!(
            "Revoked schedule {} of {} (forfeited {} base units)",
            hex(id),
            hex(&redeemer),
            forfeited
        );
        Ok(())
    }

    // -----------------------------------------------------------------
    // Read-only queries
    // -----------------------------------------------------------------

    /// Compute the currently-redeemable amount for a schedule:
    /// `floor(amount_total * percent / 100)` with the percentage taken
    /// from a fresh reward-token supply reading.
    ///
    /// # Errors
    /// `NotFound` if the id was never created, `Revoked` once the
    /// schedule has been revoked (permanently).
    pub fn redeemable_amount(&self, id: &ScheduleId) -> Result<Amount, LedgerError> {
        let schedule = self.schedule_or_not_found(id)?;
        if schedule.revoked {
            return Err(LedgerError::Revoked(format!(
                "schedule {} has been revoked",
                hex(id)
            )));
        }
        let percent = redemption_percent(self.reward_token.total_supply(), self.cap);
        Ok(apply_percent(schedule.amount_total, percent))
    }

    /// Number of schedules ever created for the holder.
    pub fn holder_schedule_count(&self, holder: &Address) -> u64 {
        self.store.holder_count(holder)
    }

    /// Look up a schedule by id.
    pub fn schedule(&self, id: &ScheduleId) -> Option<&VestingSchedule> {
        self.store.get(id)
    }

    /// Look up a schedule by (holder, creation index).
    pub fn schedule_by_holder_index(
        &self,
        holder: &Address,
        index: u64,
    ) -> Option<&VestingSchedule> {
        self.store.get(&self.store.id_for_holder_index(holder, index))
    }

    /// Identifier the holder's next schedule would receive.
    pub fn next_id_for_holder(&self, holder: &Address) -> ScheduleId {
        self.store.next_id_for_holder(holder)
    }

    /// The holder's most-recently-created schedule, if any.
    pub fn last_schedule_for_holder(
        &self,
        holder: &Address,
    ) -> Option<(ScheduleId, &VestingSchedule)> {
        self.store.last_for_holder(holder)
    }

    /// Sum of `amount_total - redeemed` across non-revoked schedules.
    pub fn total_outstanding(&self) -> Amount {
        self.store.total_outstanding()
    }

    /// Total number of schedules ever created.
    pub fn schedule_count(&self) -> usize {
        self.store.len()
    }

    /// Schedule id at the given position in global creation order.
    pub fn schedule_id_at(&self, index: usize) -> Option<ScheduleId> {
        self.store.id_at(index)
    }

    /// Events recorded so far, in order.
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Drain and return the recorded events, oldest first.
    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn require_admin(&self, caller: &Address, action: &str) -> Result<(), LedgerError> {
        if caller != &self.admin {
            return Err(LedgerError::Unauthorized(format!(
                "caller {} may not {}; administrator only",
                hex(caller),
                action
            )));
        }
        Ok(())
    }

    fn schedule_or_not_found(&self, id: &ScheduleId) -> Result<&VestingSchedule, LedgerError> {
        self.store.get(id).ok_or_else(|| {
            LedgerError::NotFound(format!("no vesting schedule with id {}", hex(id)))
        })
    }

    /// Record a payout in the store: bump `redeemed` and shrink the
    /// outstanding total. Runs before the external transfer.
    fn commit_payout(&mut self, id: &ScheduleId, amount: Amount) {
        if let Some(schedule) = self.store.get_mut(id) {
            schedule.redeemed += amount;
        }
        self.store.sub_outstanding(amount);
    }

    /// Undo `commit_payout` after a failed transfer.
    fn rollback_payout(&mut self, id: &ScheduleId, amount: Amount) {
        if let Some(schedule) = self.store.get_mut(id) {
            schedule.redeemed -= amount;
        }
        self.store.add_outstanding(amount);
    }
}
