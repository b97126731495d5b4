use std::fmt;
use std::sync::Arc;

use crate::interfaces::{Cartesian, SubId};

type StateFn = dyn Fn(&mut [bool], &[Cartesian], &[SubId]) + Send + Sync;
type PositionFn = dyn Fn(&mut [Cartesian], &[SubId]) + Send + Sync;

/// Changes which sites are part of the system: `(is_valid, positions, sublattice_ids)`
pub struct SiteStateModifier {
    apply: Box<StateFn>,
}

impl SiteStateModifier {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut [bool], &[Cartesian], &[SubId]) + Send + Sync + 'static,
    {
        Self {
            apply: Box::new(apply),
        }
    }

    pub fn apply(&self, is_valid: &mut [bool], positions: &[Cartesian], sublattices: &[SubId]) {
        (self.apply)(is_valid, positions, sublattices)
    }
}

impl fmt::Debug for SiteStateModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteStateModifier").finish_non_exhaustive()
    }
}

/// Moves sites: `(positions, sublattice_ids)`
pub struct PositionModifier {
    apply: Box<PositionFn>,
}

impl PositionModifier {
    pub fn new<F>(apply: F) -> Self
    where
        F: Fn(&mut [Cartesian], &[SubId]) + Send + Sync + 'static,
    {
        Self {
            apply: Box::new(apply),
        }
    }

    pub fn apply(&self, positions: &mut [Cartesian], sublattices: &[SubId]) {
        (self.apply)(positions, sublattices)
    }
}

impl fmt::Debug for PositionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PositionModifier").finish_non_exhaustive()
    }
}

/// Push `modifier` unless the same handle is already in `list`
pub(crate) fn add_unique<T: ?Sized>(list: &mut Vec<Arc<T>>, modifier: Arc<T>) -> bool {
    if list.iter().any(|m| Arc::ptr_eq(m, &modifier)) {
        return false;
    }
    list.push(modifier);
    true
}

/// Ordered modifiers applied while a system is built; insertion order is application order
#[derive(Debug, Clone, Default)]
pub struct SystemModifiers {
    pub state: Vec<Arc<SiteStateModifier>>,
    pub position: Vec<Arc<PositionModifier>>,
}

impl SystemModifiers {
    pub fn add_state(&mut self, modifier: Arc<SiteStateModifier>) -> bool {
        add_unique(&mut self.state, modifier)
    }

    pub fn add_position(&mut self, modifier: Arc<PositionModifier>) -> bool {
        add_unique(&mut self.position, modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty() && self.position.is_empty()
    }

    pub fn clear(&mut self) {
        self.state.clear();
        self.position.clear();
    }
}
