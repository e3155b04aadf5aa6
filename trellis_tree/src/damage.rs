// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damage summary drained from [`crate::Tree::take_damage`].

use alloc::vec::Vec;
use kurbo::Rect;

use crate::types::NodeId;

/// Widgets invalidated since the last drain, with their world-space bounds.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    /// Invalidated widgets, in invalidation order, without duplicates.
    pub nodes: Vec<NodeId>,
    /// World-space rectangles that should be repainted. A widget that moved
    /// between invalidations contributes both its old and new bounds.
    pub dirty_rects: Vec<Rect>,
}

impl Damage {
    /// Returns the union of all damage rects.
    pub fn union_rect(&self) -> Option<Rect> {
        let mut it = self.dirty_rects.iter().copied();
        let first = it.next()?;
        Some(it.fold(first, |acc, r| acc.union(r)))
    }

    /// Returns `true` if nothing was invalidated.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn record(&mut self, id: NodeId, rect: Rect) {
        if !self.nodes.contains(&id) {
            self.nodes.push(id);
        }
        if rect.width() > 0.0 && rect.height() > 0.0 && !self.dirty_rects.contains(&rect) {
            self.dirty_rects.push(rect);
        }
    }
}
