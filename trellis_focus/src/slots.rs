// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus, capture, and exclusive-input holders.

/// Outcome of moving a slot from one holder to another.
///
/// Callers notify `lost` before `gained`. Both are `None` when nothing changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SlotChange<K> {
    /// Previous holder, to be told it lost the slot.
    pub lost: Option<K>,
    /// New holder, to be told it gained the slot.
    pub gained: Option<K>,
}

impl<K> SlotChange<K> {
    const NONE: Self = Self {
        lost: None,
        gained: None,
    };

    /// Returns `true` if the slot did not change hands.
    pub fn is_noop(&self) -> bool {
        self.lost.is_none() && self.gained.is_none()
    }
}

/// Holders of the three input-routing slots.
///
/// - **Focus**: receives keyboard and character input.
/// - **Capture**: intercepts pointer routing ahead of the hit-tested widget.
/// - **Exclusive**: receives *all* input, bypassing everything else.
///
/// At most one holder exists per slot. The slots never own their holders;
/// when a node dies, call [`InputSlots::forget`] (or rely on liveness checks at
/// the use site).
///
/// ```
/// use trellis_focus::InputSlots;
///
/// let mut slots = InputSlots::new();
/// let change = slots.set_focus(Some(1_u32));
/// assert_eq!((change.lost, change.gained), (None, Some(1)));
///
/// let change = slots.set_focus(Some(2));
/// assert_eq!((change.lost, change.gained), (Some(1), Some(2)));
/// assert_eq!(slots.focus(), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct InputSlots<K> {
    focus: Option<K>,
    capture: Option<K>,
    exclusive: Option<K>,
}

impl<K> Default for InputSlots<K> {
    fn default() -> Self {
        Self {
            focus: None,
            capture: None,
            exclusive: None,
        }
    }
}

impl<K: Copy + Eq> InputSlots<K> {
    /// Create empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current focus holder.
    pub fn focus(&self) -> Option<K> {
        self.focus
    }

    /// Current capture holder.
    pub fn capture(&self) -> Option<K> {
        self.capture
    }

    /// Current exclusive-input widget.
    pub fn exclusive(&self) -> Option<K> {
        self.exclusive
    }

    /// Move keyboard focus to `new`; `None` clears it.
    ///
    /// Re-focusing the current holder is not a transition.
    pub fn set_focus(&mut self, new: Option<K>) -> SlotChange<K> {
        Self::swap(&mut self.focus, new)
    }

    /// Move input capture to `new`; `None` releases it.
    pub fn set_capture(&mut self, new: Option<K>) -> SlotChange<K> {
        Self::swap(&mut self.capture, new)
    }

    /// Enter exclusive-input mode for `widget`.
    ///
    /// `None` is ignored, so exclusive mode can only be left through
    /// [`InputSlots::leave_exclusive`]. Returns `true` if the slot was set.
    pub fn enter_exclusive(&mut self, widget: Option<K>) -> bool {
        match widget {
            Some(w) => {
                self.exclusive = Some(w);
                true
            }
            None => false,
        }
    }

    /// Leave exclusive-input mode, returning the widget that held it.
    pub fn leave_exclusive(&mut self) -> Option<K> {
        self.exclusive.take()
    }

    /// Drop `node` from every slot it holds, without producing transitions.
    pub fn forget(&mut self, node: K) {
        for slot in [&mut self.focus, &mut self.capture, &mut self.exclusive] {
            if *slot == Some(node) {
                *slot = None;
            }
        }
    }

    /// Drop every holder for which `dead` returns `true`.
    pub fn clear_if(&mut self, mut dead: impl FnMut(K) -> bool) {
        for slot in [&mut self.focus, &mut self.capture, &mut self.exclusive] {
            if let Some(k) = *slot
                && dead(k)
            {
                *slot = None;
            }
        }
    }

    /// Empty all slots.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn swap(slot: &mut Option<K>, new: Option<K>) -> SlotChange<K> {
        if *slot == new {
            return SlotChange::NONE;
        }
        let lost = core::mem::replace(slot, new);
        SlotChange { lost, gained: new }
    }
}
