// crates/bluvest-ledger/src/schedule.rs
//
// Vesting schedule records and the owned schedule store.
//
// The store is the durable side of the ledger: a presence-checked map from
// schedule id to record, the global enumeration order, per-holder creation
// counts, and the outstanding-amount aggregate. Presence in the map is the
// existence signal; there is no "initialized" sentinel on the record.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use bluvest_core::id::{schedule_id, Address, ScheduleId};
use bluvest_core::token::Amount;

/// A single vesting schedule binding a redeemer to a fixed total entitlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Beneficiary entitled to the vested reward tokens.
    pub redeemer: Address,
    /// Whether an administrator may revoke the remaining entitlement.
    pub revocable: bool,
    /// Full entitlement in base units; fixed at creation, never zero.
    pub amount_total: Amount,
    /// Cumulative amount already paid out; never decreases.
    pub redeemed: Amount,
    /// Set once by revocation; freezes further redemption.
    pub revoked: bool,
}

impl VestingSchedule {
    /// Entitlement not yet paid out.
    pub fn unredeemed(&self) -> Amount {
        self.amount_total.saturating_sub(self.redeemed)
    }
}

/// Owned store of all vesting schedules.
///
/// Schedules are never deleted; revoked schedules stay in the store for
/// auditability. Per-holder indices are dense, assigned in creation order
/// starting at 0, and the holder count is never decremented.
#[derive(Debug, Default)]
pub struct ScheduleStore {
    schedules: HashMap<ScheduleId, VestingSchedule>,
    /// All schedule ids in creation order, for enumeration.
    ids: Vec<ScheduleId>,
    /// Number of schedules ever created per holder.
    holder_counts: HashMap<Address, u64>,
    /// Sum of `amount_total - redeemed` across non-revoked schedules.
    total_outstanding: Amount,
}

impl ScheduleStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly created schedule at the redeemer's next index and
    /// return its derived identifier.
    ///
    /// Bumps the holder count, appends the id to the enumeration order,
    /// and adds the full entitlement to the outstanding total. The id is
    /// a pure function of (redeemer, index), so it cannot collide with an
    /// existing schedule.
    pub(crate) fn insert_new(&mut self, schedule: VestingSchedule) -> ScheduleId {
        let count = self.holder_count(&schedule.redeemer);
        let id = schedule_id(&schedule.redeemer, count);
        debug_assert!(!self.schedules.contains_key(&id));

        self.total_outstanding = self.total_outstanding.saturating_add(schedule.amount_total);
        self.holder_counts.insert(schedule.redeemer, count + 1);
        self.ids.push(id);
        self.schedules.insert(id, schedule);
        id
    }

    /// Look up a schedule by id. `None` means the id was never created.
    pub fn get(&self, id: &ScheduleId) -> Option<&VestingSchedule> {
        self.schedules.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &ScheduleId) -> Option<&mut VestingSchedule> {
        self.schedules.get_mut(id)
    }

    /// Number of schedules ever created for the holder.
    pub fn holder_count(&self, holder: &Address) -> u64 {
        self.holder_counts.get(holder).copied().unwrap_or(0)
    }

    /// Identifier the holder's next schedule would receive.
    pub fn next_id_for_holder(&self, holder: &Address) -> ScheduleId {
        schedule_id(holder, self.holder_count(holder))
    }

    /// Identifier of the holder's schedule at the given creation index.
    pub fn id_for_holder_index(&self, holder: &Address, index: u64) -> ScheduleId {
        schedule_id(holder, index)
    }

    /// The holder's most-recently-created schedule, if any.
    pub fn last_for_holder(&self, holder: &Address) -> Option<(ScheduleId, &VestingSchedule)> {
        let count = self.holder_count(holder);
        if count == 0 {
            return None;
        }
        let id = schedule_id(holder, count - 1);
        self.schedules.get(&id).map(|schedule| (id, schedule))
    }

    /// Schedule id at the given position in global creation order.
    pub fn id_at(&self, index: usize) -> Option<ScheduleId> {
        self.ids.get(index).copied()
    }

    /// Total number of schedules ever created.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when no schedule has ever been created.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sum of `amount_total - redeemed` across non-revoked schedules.
    ///
    /// An audit aggregate; redemption math never consumes it.
    pub fn total_outstanding(&self) -> Amount {
        self.total_outstanding
    }

    pub(crate) fn sub_outstanding(&mut self, amount: Amount) {
        self.total_outstanding = self.total_outstanding.saturating_sub(amount);
    }

    pub(crate) fn add_outstanding(&mut self, amount: Amount) {
        self.total_outstanding = self.total_outstanding.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holder(n: u8) -> Address {
        [n; 32]
    }

    fn make_schedule(redeemer: Address, amount_total: Amount) -> VestingSchedule {
        VestingSchedule {
            redeemer,
            revocable: true,
            amount_total,
            redeemed: 0,
            revoked: false,
        }
    }

    #[test]
    fn test_empty_store() {
        let store = ScheduleStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.holder_count(&holder(1)), 0);
        assert_eq!(store.total_outstanding(), 0);
        assert!(store.last_for_holder(&holder(1)).is_none());
    }

    #[test]
    fn test_insert_assigns_dense_indices() {
        let mut store = ScheduleStore::new();
        let first = store.insert_new(make_schedule(holder(1), 100));
        let second = store.insert_new(make_schedule(holder(1), 200));

        assert_eq!(first, schedule_id(&holder(1), 0));
        assert_eq!(second, schedule_id(&holder(1), 1));
        assert_eq!(store.holder_count(&holder(1)), 2);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_tracks_outstanding_total() {
        let mut store = ScheduleStore::new();
        store.insert_new(make_schedule(holder(1), 100));
        store.insert_new(make_schedule(holder(2), 250));
        assert_eq!(store.total_outstanding(), 350);
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = ScheduleStore::new();
        assert!(store.get(&schedule_id(&holder(1), 0)).is_none());
    }

    #[test]
    fn test_next_id_advances_with_creations() {
        let mut store = ScheduleStore::new();
        let predicted = store.next_id_for_holder(&holder(1));
        let actual = store.insert_new(make_schedule(holder(1), 100));
        assert_eq!(predicted, actual);
        assert_ne!(store.next_id_for_holder(&holder(1)), actual);
    }

    #[test]
    fn test_last_for_holder_is_most_recent() {
        let mut store = ScheduleStore::new();
        store.insert_new(make_schedule(holder(1), 100));
        let second = store.insert_new(make_schedule(holder(1), 200));

        let (id, schedule) = store.last_for_holder(&holder(1)).unwrap();
        assert_eq!(id, second);
        assert_eq!(schedule.amount_total, 200);
    }

    #[test]
    fn test_enumeration_in_creation_order() {
        let mut store = ScheduleStore::new();
        let a = store.insert_new(make_schedule(holder(1), 100));
        let b = store.insert_new(make_schedule(holder(2), 100));
        assert_eq!(store.id_at(0), Some(a));
        assert_eq!(store.id_at(1), Some(b));
        assert_eq!(store.id_at(2), None);
    }

    #[test]
    fn test_unredeemed() {
        let mut schedule = make_schedule(holder(1), 1_000);
        assert_eq!(schedule.unredeemed(), 1_000);
        schedule.redeemed = 400;
        assert_eq!(schedule.unredeemed(), 600);
    }
}
