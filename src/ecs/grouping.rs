//! Named same-species views over the world's creatures
//!
//! A grouping only lists ids; the world owns the creatures and keeps every
//! grouping in step with the master list.

use crate::core::types::{EntityId, Species};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grouping {
    pub name: String,
    pub species: Species,
    members: Vec<EntityId>,
}

impl Grouping {
    pub fn new(name: impl Into<String>, species: Species) -> Self {
        Self {
            name: name.into(),
            species,
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[EntityId] {
        &self.members
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.members.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Add a member once; returns false if it was already listed
    pub(crate) fn add(&mut self, id: EntityId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.members.push(id);
        true
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        self.members.retain(|&id| keep(id));
    }
}
