// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: which widget contains the pointer.
//!
//! Hover is flat: only the innermost widget under the pointer is tracked, and
//! moving into a child leaves the parent.

/// Leave / enter pair produced by a hover change. Deliver `leave` first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HoverChange<K> {
    /// Widget the pointer left.
    pub leave: Option<K>,
    /// Widget the pointer entered.
    pub enter: Option<K>,
}

/// The widget currently containing the pointer.
#[derive(Clone, Debug)]
pub struct Hover<K> {
    current: Option<K>,
}

impl<K> Default for Hover<K> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<K: Copy + Eq> Hover<K> {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The hovered widget.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Store a new hit result.
    ///
    /// Returns `None` when the hovered widget did not change.
    ///
    /// ```
    /// use trellis_responder::hover::{Hover, HoverChange};
    ///
    /// let mut hover = Hover::new();
    /// assert_eq!(hover.update(Some(1_u32)), Some(HoverChange { leave: None, enter: Some(1) }));
    /// assert_eq!(hover.update(Some(1)), None);
    /// assert_eq!(hover.update(None), Some(HoverChange { leave: Some(1), enter: None }));
    /// ```
    pub fn update(&mut self, new: Option<K>) -> Option<HoverChange<K>> {
        if self.current == new {
            return None;
        }
        let leave = core::mem::replace(&mut self.current, new);
        Some(HoverChange { leave, enter: new })
    }

    /// Forget the hovered widget without producing a leave.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Forget the hovered widget if `dead` says it no longer exists.
    pub fn clear_if(&mut self, dead: impl FnOnce(K) -> bool) {
        if let Some(k) = self.current
            && dead(k)
        {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_between_widgets_leaves_then_enters() {
        let mut hover = Hover::new();
        hover.update(Some(1_u32));
        let change = hover.update(Some(2)).unwrap();
        assert_eq!(change.leave, Some(1));
        assert_eq!(change.enter, Some(2));
        assert_eq!(hover.current(), Some(2));
    }

    #[test]
    fn clear_if_drops_dead_widget_silently() {
        let mut hover = Hover::new();
        hover.update(Some(3_u32));
        hover.clear_if(|k| k == 4);
        assert_eq!(hover.current(), Some(3));
        hover.clear_if(|k| k == 3);
        assert_eq!(hover.current(), None);
        assert!(hover.update(None).is_none());
    }
}
