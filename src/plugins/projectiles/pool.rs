//! Generic reusable-instance pool.
//!
//! Ownership model: every instance the pool has ever created is in exactly one
//! of two places until `clear` destroys it:
//! - `inactive`: a LIFO stack of parked instances (last released, first reused)
//! - `active`: instances currently handed out to a caller
//!
//! The pool only does bookkeeping. Creating, activating, parking and destroying
//! an instance is delegated to a [`PoolHooks`] implementation passed into each
//! call, so an ECS caller can build hooks around a `Commands` borrow that only
//! lives for one system run.
//!
//! Single-thread only: there is no internal synchronization.

use std::fmt::Debug;
use std::hash::Hash;

use bevy::platform::collections::HashSet;
use bevy::prelude::*;

/// Lifecycle callbacks for pooled instances.
pub trait PoolHooks<T> {
    /// Factory. Returning `None` is a configuration error and aborts.
    fn create(&mut self) -> Option<T>;

    /// Called when an instance moves into the active set.
    fn on_get(&mut self, item: T);

    /// Called when an instance moves back into the inactive stack
    /// (including prewarmed instances).
    fn on_release(&mut self, item: T);

    /// Called once per tracked instance by `Pool::clear`.
    fn on_destroy(&mut self, item: T);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseError {
    /// Not handed out by this pool, or already released.
    NotActive,
}

#[derive(Debug)]
pub struct Pool<T> {
    active: HashSet<T>,
    inactive: Vec<T>,
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self {
            active: HashSet::default(),
            inactive: Vec::new(),
        }
    }
}

impl<T: Copy + Eq + Hash + Debug> Pool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `count` instances straight into the inactive stack.
    ///
    /// They run the release hook but never enter the active set.
    pub fn prewarm(&mut self, count: usize, hooks: &mut impl PoolHooks<T>) {
        self.inactive.reserve(count);
        for _ in 0..count {
            let item = Self::create_checked(hooks);
            hooks.on_release(item);
            self.inactive.push(item);
        }
    }

    /// Hand out an instance, reusing the most recently released one first.
    pub fn get(&mut self, hooks: &mut impl PoolHooks<T>) -> T {
        let item = match self.inactive.pop() {
            Some(item) => item,
            None => {
                debug!("pool exhausted, growing past {} instances", self.total_count());
                Self::create_checked(hooks)
            }
        };

        self.active.insert(item);
        hooks.on_get(item);
        item
    }

    /// Return an active instance to the inactive stack.
    ///
    /// Foreign or already-released instances are rejected and nothing changes.
    pub fn release(&mut self, item: T, hooks: &mut impl PoolHooks<T>) -> Result<(), ReleaseError> {
        if !self.active.remove(&item) {
            warn!("rejected release of {item:?}: not active in this pool");
            return Err(ReleaseError::NotActive);
        }

        hooks.on_release(item);
        self.inactive.push(item);
        Ok(())
    }

    /// Destroy every tracked instance, active ones included.
    pub fn clear(&mut self, hooks: &mut impl PoolHooks<T>) {
        for item in self.active.drain() {
            hooks.on_destroy(item);
        }
        for item in self.inactive.drain(..) {
            hooks.on_destroy(item);
        }
    }

    #[inline]
    pub fn is_active(&self, item: &T) -> bool {
        self.active.contains(item)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn inactive_count(&self) -> usize {
        self.inactive.len()
    }

    #[inline]
    pub fn total_count(&self) -> usize {
        self.active.len() + self.inactive.len()
    }

    pub fn active(&self) -> impl Iterator<Item = T> + '_ {
        self.active.iter().copied()
    }

    fn create_checked(hooks: &mut impl PoolHooks<T>) -> T {
        match hooks.create() {
            Some(item) => item,
            None => panic!("pool factory returned no instance; the pool is misconfigured"),
        }
    }
}
