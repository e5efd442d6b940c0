//! Scroll Lock
//!
//! The page behind an open overlay must not scroll. Every open overlay holds
//! a [`ScrollLockGuard`]; the page is locked while at least one guard is
//! alive. Guards release on drop, so an overlay dropped while open cannot
//! leave the page locked.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Reference-counted page scroll lock
///
/// Cloning shares the same counter.
#[derive(Clone, Debug, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    /// Create an unlocked scroll lock
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a hold on the lock
    #[must_use = "the lock is released as soon as the guard is dropped"]
    pub fn acquire(&self) -> ScrollLockGuard {
        self.holders.fetch_add(1, Ordering::SeqCst);
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    /// Whether page scrolling is currently suppressed
    pub fn is_locked(&self) -> bool {
        self.holders() > 0
    }

    /// Number of live guards
    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::SeqCst)
    }
}

/// A hold on a [`ScrollLock`], released on drop
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.holders.fetch_sub(1, Ordering::SeqCst);
    }
}
