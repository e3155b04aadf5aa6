// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget tree: node identifiers, flags, and widget descriptions.

use alloc::string::String;
use kurbo::{Point, Rect, Size};

/// Identifier for a node in the tree (generational).
///
/// A `NodeId` never keeps a node alive. Once the node is removed its slot may be
/// reused, but with a bumped generation, so the stale id stops resolving instead
/// of aliasing the newcomer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Per-widget capability and state flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// Widget is visible (participates in drawing and hit resolution).
        const VISIBLE                  = 0b0000_0001;
        /// Widget accepts input.
        const ENABLED                  = 0b0000_0010;
        /// Widget can receive keyboard focus, by click or by Tab cycling.
        const TAB_STOP                 = 0b0000_0100;
        /// A left-button press on this widget may start a drag.
        const DRAGGABLE                = 0b0000_1000;
        /// Widget may be the target of a drop.
        const ACCEPTS_DROP             = 0b0001_0000;
        /// Hovering this widget arms the tooltip timer.
        const HAS_TOOLTIP              = 0b0010_0000;
        /// Widget asked to leave the tick list at the end of the current frame.
        const TICK_UNSUBSCRIBE_PENDING = 0b0100_0000;
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::ENABLED
    }
}

/// Description of a widget to insert into the tree.
///
/// `bounds` is expressed relative to the parent's origin; `x0`/`y0` is the
/// widget's position and the rect's size is the widget's size.
#[derive(Clone, Debug)]
pub struct WidgetDesc {
    /// Name of the widget; unique among its siblings.
    pub name: String,
    /// Position and size relative to the parent.
    pub bounds: Rect,
    /// Capability and state flags.
    pub flags: WidgetFlags,
}

impl WidgetDesc {
    /// Create a visible, enabled description with empty bounds.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Rect::ZERO,
            flags: WidgetFlags::default(),
        }
    }

    /// Set the bounds from a position and a size.
    pub fn at(mut self, position: Point, size: Size) -> Self {
        self.bounds = Rect::from_origin_size(position, size);
        self
    }

    /// Set the bounds directly.
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Add flags on top of the current ones.
    pub fn with_flags(mut self, flags: WidgetFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Replace the flags.
    pub fn flags(mut self, flags: WidgetFlags) -> Self {
        self.flags = flags;
        self
    }
}
