// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag gesture recognition.
//!
//! A drag moves through three phases:
//!
//! 1. **Armed**: a left press landed on a draggable widget. The press point is
//!    remembered as the grab point.
//! 2. **Fired**: the cursor travelled further than the threshold from the grab
//!    point and the owner accepted the drag (typically by handing the source to
//!    a drag ghost).
//! 3. **Idle**: the drag was stopped, or the press was released before firing.
//!
//! A fired drag can be *frozen*, which makes [`DragState::stop`] refuse until
//! the freeze is lifted.
//!
//! ```
//! use trellis_event_state::drag::DragState;
//! use kurbo::{Point, Vec2};
//!
//! let mut drag: DragState<u32> = DragState::new();
//! drag.arm(7, Point::new(10.0, 10.0));
//!
//! // Exactly at the threshold is not enough.
//! assert!(drag.check_threshold(Point::new(18.0, 10.0)).is_none());
//! let (source, grab) = drag.check_threshold(Point::new(18.5, 10.0)).unwrap();
//! assert_eq!((source, grab), (7, Point::new(10.0, 10.0)));
//!
//! drag.fire(source, Vec2::new(3.0, 4.0));
//! assert!(drag.is_fired());
//! assert!(drag.stop(|| true));
//! assert!(!drag.is_armed());
//! ```

use kurbo::{Point, Vec2};

/// Default drag threshold in pixels.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 8.0;

/// Drag gesture state machine for a single pointer.
#[derive(Clone, Debug)]
pub struct DragState<K> {
    source: Option<K>,
    grab: Point,
    offset: Vec2,
    armed: bool,
    fired: bool,
    frozen: bool,
    /// Distance the cursor must exceed, strictly, before an armed drag fires.
    pub threshold: f64,
}

impl<K> Default for DragState<K> {
    fn default() -> Self {
        Self {
            source: None,
            grab: Point::ZERO,
            offset: Vec2::ZERO,
            armed: false,
            fired: false,
            frozen: false,
            threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl<K: Copy> DragState<K> {
    /// Create an idle drag machine with the default threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an idle drag machine with a custom threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Arm a drag from `source`, grabbed at `grab` (world space).
    ///
    /// Ignored while a drag has already fired.
    pub fn arm(&mut self, source: K, grab: Point) {
        if self.fired {
            return;
        }
        self.source = Some(source);
        self.grab = grab;
        self.armed = true;
    }

    /// Cancel an armed drag that has not fired.
    ///
    /// A fired drag is only ended through [`DragState::stop`].
    pub fn disarm(&mut self) {
        if self.fired {
            return;
        }
        self.armed = false;
        self.source = None;
    }

    /// Check whether the cursor has left the threshold circle.
    ///
    /// Returns the source and grab point when an armed, unfired drag should
    /// start. The caller then either calls [`DragState::fire`] or
    /// [`DragState::disarm`].
    pub fn check_threshold(&self, cursor: Point) -> Option<(K, Point)> {
        if !self.armed || self.fired {
            return None;
        }
        let source = self.source?;
        (cursor.distance(self.grab) > self.threshold).then_some((source, self.grab))
    }

    /// Mark a drag from `source` as fired, with the grab offset in source-local space.
    ///
    /// A drag may fire without having been armed first.
    pub fn fire(&mut self, source: K, offset: Vec2) {
        self.source = Some(source);
        self.armed = true;
        self.fired = true;
        self.offset = offset;
    }

    /// Freeze or thaw a drag. A frozen drag cannot be stopped.
    pub fn set_freeze(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    /// Try to end the drag.
    ///
    /// `ghost_stop` is consulted only for a fired drag; it returns `true` once
    /// the drag ghost has finished (dropped or cancelled). Fails while frozen.
    /// Returns `true` when the machine is back to idle.
    pub fn stop(&mut self, ghost_stop: impl FnOnce() -> bool) -> bool {
        if self.frozen {
            return false;
        }
        if self.fired {
            self.fired = !ghost_stop();
        }
        if !self.fired {
            self.frozen = false;
            self.source = None;
            self.armed = false;
        }
        !self.fired
    }

    /// Clear all state, keeping the threshold.
    pub fn reset(&mut self) {
        *self = Self::with_threshold(self.threshold);
    }

    /// The widget the drag started from.
    pub fn source(&self) -> Option<K> {
        self.source
    }

    /// World-space point where the press landed.
    pub fn grab_point(&self) -> Point {
        self.grab
    }

    /// Grab offset in source-local space, valid once fired.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns `true` while a press is armed or a drag is running.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` once the drag has started.
    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` while the drag is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let mut drag: DragState<u32> = DragState::new();
        drag.arm(1, Point::new(0.0, 0.0));
        assert!(drag.check_threshold(Point::new(8.0, 0.0)).is_none());
        assert!(drag.check_threshold(Point::new(6.0, 6.0)).is_some());
    }

    #[test]
    fn unarmed_or_fired_never_reports() {
        let mut drag: DragState<u32> = DragState::with_threshold(1.0);
        assert!(drag.check_threshold(Point::new(100.0, 0.0)).is_none());
        drag.arm(1, Point::ZERO);
        drag.fire(1, Vec2::ZERO);
        assert!(drag.check_threshold(Point::new(100.0, 0.0)).is_none());
    }

    #[test]
    fn disarm_cannot_cancel_a_fired_drag() {
        let mut drag: DragState<u32> = DragState::new();
        drag.arm(1, Point::ZERO);
        drag.disarm();
        assert!(!drag.is_armed());
        assert_eq!(drag.source(), None);

        drag.arm(2, Point::ZERO);
        drag.fire(2, Vec2::new(1.0, 1.0));
        drag.disarm();
        assert!(drag.is_fired());
        assert_eq!(drag.source(), Some(2));
    }

    #[test]
    fn freeze_blocks_stop() {
        let mut drag: DragState<u32> = DragState::new();
        drag.arm(1, Point::ZERO);
        drag.fire(1, Vec2::ZERO);
        drag.set_freeze(true);
        let mut asked = false;
        assert!(!drag.stop(|| {
            asked = true;
            true
        }));
        assert!(!asked);
        assert!(drag.is_fired());

        drag.set_freeze(false);
        assert!(drag.stop(|| true));
        assert!(!drag.is_fired() && !drag.is_armed() && !drag.is_frozen());
    }

    #[test]
    fn stays_fired_while_ghost_is_busy() {
        let mut drag: DragState<u32> = DragState::new();
        drag.arm(1, Point::ZERO);
        drag.fire(1, Vec2::ZERO);
        assert!(!drag.stop(|| false));
        assert!(drag.is_fired());
        assert_eq!(drag.source(), Some(1));
    }

    #[test]
    fn stopping_an_armed_drag_just_disarms() {
        let mut drag: DragState<u32> = DragState::new();
        drag.arm(1, Point::ZERO);
        assert!(drag.stop(|| unreachable!("ghost is not consulted before firing")));
        assert!(!drag.is_armed());
    }
}
