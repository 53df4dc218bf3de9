//! Concurrent batch-to-units map with per-unit observer channels.

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::countdown::{CountdownSnapshot, CountdownUnit};
use crate::error::{Result, TimerError};

/// One live unit plus the channel its observers watch.
///
/// The sender holds the latest snapshot, so a late subscriber immediately
/// observes the current value. Dropping the slot drops the sender, which
/// closes every subscriber's receiver.
#[derive(Debug)]
struct UnitSlot {
    unit: CountdownUnit,
    updates: watch::Sender<CountdownSnapshot>,
}

impl UnitSlot {
    fn new(unit: CountdownUnit) -> Self {
        let (updates, _) = watch::channel(unit.snapshot());
        Self { unit, updates }
    }

    fn publish(&self) {
        self.updates.send_replace(self.unit.snapshot());
    }
}

/// All units registered for one batch, in schedule order.
#[derive(Debug)]
struct BatchEntry {
    units: Vec<UnitSlot>,
}

/// Read-only view of a batch's registered units.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub batch_id: String,
    pub units: Vec<CountdownUnit>,
}

/// Concurrent map of live batches and their countdown units.
///
/// The map is sharded, so batch registration and removal never block a tick
/// pass over other batches; mutation of one batch's units happens under
/// that entry's shard lock.
#[derive(Debug, Default)]
pub struct CountdownRegistry {
    batches: DashMap<String, BatchEntry>,
}

impl CountdownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a batch's units. Adding a batch id that is already present
    /// is a no-op retaining the first call's units.
    pub fn add_batch(&self, batch_id: impl Into<String>, units: Vec<CountdownUnit>) {
        let batch_id = batch_id.into();
        match self.batches.entry(batch_id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                warn!(batch_id = %batch_id, "Batch already registered, keeping existing units");
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                debug!(batch_id = %batch_id, unit_count = units.len(), "Registering batch");
                vacant.insert(BatchEntry {
                    units: units.into_iter().map(UnitSlot::new).collect(),
                });
            }
        }
    }

    /// Drop a batch and all of its units. Removing an absent batch is a
    /// no-op. Observers of the removed units see their channels close.
    pub fn remove_batch(&self, batch_id: &str) {
        if self.batches.remove(batch_id).is_some() {
            debug!(batch_id = %batch_id, "Removed batch");
        }
    }

    /// Snapshot a batch's units in schedule order.
    pub fn find_by_batch(&self, batch_id: &str) -> Option<BatchSummary> {
        self.batches.get(batch_id).map(|entry| BatchSummary {
            batch_id: batch_id.to_string(),
            units: entry.units.iter().map(|slot| slot.unit.clone()).collect(),
        })
    }

    /// Units of a batch belonging to the given group.
    ///
    /// `None` means the batch is unknown; an empty vec means the batch
    /// exists but has no units in that group.
    pub fn find_units_by_group(&self, batch_id: &str, group_id: &str) -> Option<Vec<CountdownUnit>> {
        self.batches.get(batch_id).map(|entry| {
            entry
                .units
                .iter()
                .filter(|slot| slot.unit.group_id == group_id)
                .map(|slot| slot.unit.clone())
                .collect()
        })
    }

    /// Look up a single unit by batch and unit id.
    pub fn find_unit(&self, batch_id: &str, unit_id: &str) -> Option<CountdownUnit> {
        self.batches.get(batch_id).and_then(|entry| {
            entry
                .units
                .iter()
                .find(|slot| slot.unit.id == unit_id)
                .map(|slot| slot.unit.clone())
        })
    }

    /// Subscribe to a unit's snapshot stream. The receiver's current value
    /// is the unit's present snapshot.
    pub fn subscribe_unit(
        &self,
        batch_id: &str,
        unit_id: &str,
    ) -> Result<watch::Receiver<CountdownSnapshot>> {
        let entry = self
            .batches
            .get(batch_id)
            .ok_or_else(|| TimerError::batch_not_found(batch_id))?;
        entry
            .units
            .iter()
            .find(|slot| slot.unit.id == unit_id)
            .map(|slot| slot.updates.subscribe())
            .ok_or_else(|| TimerError::unit_not_found(batch_id, unit_id))
    }

    /// Mutate one unit under its batch's lock, publish the new snapshot to
    /// observers, and return it.
    pub fn with_unit_mut<F>(&self, batch_id: &str, unit_id: &str, f: F) -> Result<CountdownSnapshot>
    where
        F: FnOnce(&mut CountdownUnit),
    {
        let mut entry = self
            .batches
            .get_mut(batch_id)
            .ok_or_else(|| TimerError::batch_not_found(batch_id))?;
        let slot = entry
            .units
            .iter_mut()
            .find(|slot| slot.unit.id == unit_id)
            .ok_or_else(|| TimerError::unit_not_found(batch_id, unit_id))?;
        f(&mut slot.unit);
        slot.publish();
        Ok(slot.unit.snapshot())
    }

    /// Visit every running unit across all batches, publishing each one's
    /// snapshot after the visitor returns.
    pub fn for_each_running<F>(&self, mut f: F)
    where
        F: FnMut(&str, &mut CountdownUnit),
    {
        for mut entry in self.batches.iter_mut() {
            let batch_id = entry.key().clone();
            for slot in entry.value_mut().units.iter_mut() {
                if slot.unit.state.is_active() {
                    f(&batch_id, &mut slot.unit);
                    slot.publish();
                }
            }
        }
    }

    /// Count units currently running, across all batches.
    pub fn running_unit_count(&self) -> usize {
        self.batches
            .iter()
            .map(|entry| {
                entry
                    .units
                    .iter()
                    .filter(|slot| slot.unit.state.is_active())
                    .count()
            })
            .sum()
    }

    /// Number of registered batches.
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }
}
