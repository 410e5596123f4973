use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use bevy::prelude::*;

use crate::topology::IntersectionId;

use super::axis::Axis;

/// Result of [`PhaseStates::get_or_init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseRead {
    pub axis: Axis,
    /// True only for the call that created the entry.
    pub initialized: bool,
}

/// Per-intersection active axis, shared between concurrent decision tasks.
///
/// The outer map lock is only held to find or create an entry; each entry has
/// its own mutex, so reads and writes of one intersection's axis are atomic
/// without serializing unrelated intersections. There is no atomicity across
/// a whole resolve-then-write sequence.
#[derive(Debug, Default)]
pub struct PhaseStates {
    entries: RwLock<HashMap<IntersectionId, Arc<Mutex<Axis>>>>,
}

impl PhaseStates {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, id: &str) -> Option<Arc<Mutex<Axis>>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Current axis for `id`, creating it as `X` on first observation.
    pub fn get_or_init(&self, id: &str) -> PhaseRead {
        if let Some(slot) = self.entry(id) {
            let axis = *slot.lock().unwrap_or_else(PoisonError::into_inner);
            return PhaseRead {
                axis,
                initialized: false,
            };
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another task may have created it between the two locks.
        if let Some(slot) = entries.get(id) {
            let axis = *slot.lock().unwrap_or_else(PoisonError::into_inner);
            return PhaseRead {
                axis,
                initialized: false,
            };
        }
        entries.insert(IntersectionId::from(id), Arc::new(Mutex::new(Axis::X)));
        PhaseRead {
            axis: Axis::X,
            initialized: true,
        }
    }

    /// Stored axis, without initializing.
    pub fn get(&self, id: &str) -> Option<Axis> {
        self.entry(id)
            .map(|slot| *slot.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Overwrite the axis for `id`. Restricted to the coordination engine.
    pub(crate) fn store(&self, id: &str, axis: Axis) {
        if let Some(slot) = self.entry(id) {
            *slot.lock().unwrap_or_else(PoisonError::into_inner) = axis;
            return;
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let slot = entries
            .entry(IntersectionId::from(id))
            .or_insert_with(|| Arc::new(Mutex::new(axis)));
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = axis;
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of every entry, ordered by id.
    pub fn to_map(&self) -> BTreeMap<IntersectionId, Axis> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(id, slot)| (id.clone(), *slot.lock().unwrap_or_else(PoisonError::into_inner)))
            .collect()
    }
}

/// Resource handing the shared phase container to decision tasks.
#[derive(Resource, Debug, Clone, Default)]
pub struct PhaseStatesHandle(pub Arc<PhaseStates>);
