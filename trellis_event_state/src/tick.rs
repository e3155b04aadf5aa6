// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame update subscriptions that tolerate mutation during iteration.
//!
//! While a frame is being ticked, the active list is frozen:
//!
//! - [`TickRegistry::subscribe`] buffers into a pending-add list, which is
//!   appended after the frame, so newcomers tick starting next frame.
//! - [`TickRegistry::unsubscribe`] does nothing. Subscribers that want to
//!   leave mid-frame are instead flagged by their owner and swept by the
//!   predicate passed to [`TickRegistry::end`].
//!
//! The owner drives a frame either with [`TickRegistry::tick`], or manually
//! with [`TickRegistry::begin`], indexed [`TickRegistry::get`], and
//! [`TickRegistry::end`] when callbacks need mutable access to other state.

use alloc::vec::Vec;

/// Ordered set of tick subscribers.
#[derive(Clone, Debug)]
pub struct TickRegistry<K> {
    active: Vec<K>,
    pending: Vec<K>,
    in_tick: bool,
}

impl<K> Default for TickRegistry<K> {
    fn default() -> Self {
        Self {
            active: Vec::new(),
            pending: Vec::new(),
            in_tick: false,
        }
    }
}

impl<K: Copy + Eq> TickRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `k`. Duplicates are ignored.
    ///
    /// Returns `true` if `k` was added (or buffered during a frame).
    pub fn subscribe(&mut self, k: K) -> bool {
        if self.active.contains(&k) {
            return false;
        }
        if self.in_tick {
            if self.pending.contains(&k) {
                return false;
            }
            self.pending.push(k);
        } else {
            self.active.push(k);
        }
        true
    }

    /// Unsubscribe `k`. Does nothing during a frame.
    pub fn unsubscribe(&mut self, k: K) -> bool {
        if self.in_tick {
            return false;
        }
        let before = self.active.len();
        self.active.retain(|&a| a != k);
        self.active.len() != before
    }

    /// Drop every subscription for which `dead` returns `true`.
    ///
    /// Outside a frame this removes from both lists; during a frame only the
    /// pending buffer is touched and the active list is left to
    /// [`TickRegistry::end`].
    pub fn forget(&mut self, mut dead: impl FnMut(K) -> bool) {
        self.pending.retain(|&k| !dead(k));
        if !self.in_tick {
            self.active.retain(|&k| !dead(k));
        }
    }

    /// Start a frame and return the number of subscribers to visit.
    pub fn begin(&mut self) -> usize {
        self.in_tick = true;
        self.active.len()
    }

    /// The `i`-th active subscriber.
    pub fn get(&self, i: usize) -> Option<K> {
        self.active.get(i).copied()
    }

    /// Finish a frame.
    ///
    /// Sweeps active entries for which `is_pending` returns `true` in one pass,
    /// then appends subscribers buffered during the frame. Returns the number
    /// of swept entries.
    pub fn end(&mut self, mut is_pending: impl FnMut(K) -> bool) -> usize {
        let before = self.active.len();
        self.active.retain(|&k| !is_pending(k));
        let swept = before - self.active.len();
        self.active.append(&mut self.pending);
        self.in_tick = false;
        swept
    }

    /// Run a whole frame, visiting subscribers in subscription order.
    pub fn tick(&mut self, mut f: impl FnMut(K), is_pending: impl FnMut(K) -> bool) -> usize {
        let len = self.begin();
        for i in 0..len {
            if let Some(k) = self.get(i) {
                f(k);
            }
        }
        self.end(is_pending)
    }

    /// Active subscribers, in tick order.
    pub fn active(&self) -> &[K] {
        &self.active
    }

    /// Subscribers buffered during the current frame.
    pub fn pending(&self) -> &[K] {
        &self.pending
    }

    /// Returns `true` between [`TickRegistry::begin`] and [`TickRegistry::end`].
    pub fn is_in_tick(&self) -> bool {
        self.in_tick
    }

    /// Number of active subscribers.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Returns `true` if nothing is subscribed.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.pending.is_empty()
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.active.clear();
        self.pending.clear();
        self.in_tick = false;
    }
}
