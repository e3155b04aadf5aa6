// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};
use trellis_tree::{NodeId, Tree, WidgetFlags};

use crate::widget::Widget;

/// The floating proxy that follows the cursor during a drag.
///
/// The ghost is never hit: it sits on top of everything while a drag runs, and
/// hit resolution must see through it to find the drop target below.
#[derive(Clone, Debug, Default)]
pub struct DragGhost {
    source: Option<NodeId>,
    offset: Vec2,
    target: Option<NodeId>,
}

impl DragGhost {
    /// The widget being dragged.
    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    /// Where the source was grabbed, in source-local space.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// The widget that would receive the drop right now.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Returns `true` while carrying a source.
    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    pub(crate) fn start(&mut self, tree: &Tree, source: NodeId, offset: Vec2) -> bool {
        if !tree.is_alive(source) {
            return false;
        }
        self.source = Some(source);
        self.offset = offset;
        self.target = None;
        true
    }

    /// Re-evaluate the drop target for the widget under the cursor.
    pub(crate) fn update(&mut self, tree: &Tree, hovered: Option<NodeId>) {
        self.target = match (self.source, hovered) {
            (Some(source), Some(hovered)) => drop_target(tree, source, hovered),
            _ => None,
        };
    }

    /// Let go: returns the source and the drop target, then resets.
    pub(crate) fn finish(&mut self) -> Option<(NodeId, Option<NodeId>)> {
        let source = self.source.take()?;
        let target = self.target.take();
        self.offset = Vec2::ZERO;
        Some((source, target))
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Widget for DragGhost {
    fn hit_test(&self, _point: Point, _world_bounds: Rect) -> bool {
        false
    }
}

/// Nearest drop-accepting widget at or above `hovered`, outside the source's subtree.
fn drop_target(tree: &Tree, source: NodeId, hovered: NodeId) -> Option<NodeId> {
    tree.ancestors(hovered).find(|&n| {
        n != source
            && !tree.is_ancestor_of(source, n)
            && tree.has_flags(n, WidgetFlags::ACCEPTS_DROP)
    })
}
