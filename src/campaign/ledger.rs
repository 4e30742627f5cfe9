//! Bookkeeping tables reconciling entity activation across phase transitions.
use std::collections::{HashMap, HashSet};

use bevy::prelude::Entity;

/// Baseline and override tables, keyed by generational entity handles.
#[derive(Debug, Default, Clone)]
pub struct ActivationLedger {
    initial: HashMap<Entity, bool>,
    persistent: HashMap<Entity, bool>,
    touched: HashSet<Entity>,
}

impl ActivationLedger {
    pub fn clear(&mut self) {
        self.initial.clear();
        self.persistent.clear();
        self.touched.clear();
    }

    /// Records `current` as the factory baseline unless one is already known.
    pub fn capture_initial(&mut self, entity: Entity, current: bool) {
        self.initial.entry(entity).or_insert(current);
    }

    /// Persistent override first, then the captured initial state.
    pub fn baseline(&self, entity: Entity) -> Option<bool> {
        self.persistent
            .get(&entity)
            .or_else(|| self.initial.get(&entity))
            .copied()
    }

    pub fn record_persistent(&mut self, entity: Entity, active: bool) {
        self.persistent.insert(entity, active);
    }

    pub fn mark_touched(&mut self, entity: Entity) {
        self.touched.insert(entity);
    }

    /// Empties the touched set, returning its previous contents.
    pub fn take_touched(&mut self) -> Vec<Entity> {
        self.touched.drain().collect()
    }

    pub fn persistent_entries(&self) -> Vec<(Entity, bool)> {
        self.persistent
            .iter()
            .map(|(entity, active)| (*entity, *active))
            .collect()
    }

    /// Drops every table entry for an entity that no longer exists.
    pub fn forget(&mut self, entity: Entity) {
        self.initial.remove(&entity);
        self.persistent.remove(&entity);
        self.touched.remove(&entity);
    }

    pub fn initial_state(&self, entity: Entity) -> Option<bool> {
        self.initial.get(&entity).copied()
    }

    pub fn persistent_state(&self, entity: Entity) -> Option<bool> {
        self.persistent.get(&entity).copied()
    }

    pub fn is_touched(&self, entity: Entity) -> bool {
        self.touched.contains(&entity)
    }

    pub fn touched_len(&self) -> usize {
        self.touched.len()
    }

    pub fn persistent_len(&self) -> usize {
        self.persistent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.initial.is_empty() && self.persistent.is_empty() && self.touched.is_empty()
    }
}
