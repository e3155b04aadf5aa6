// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Front-to-back hit resolution.
//!
//! The resolver is the single answer to "what widget is under the cursor". It
//! walks the children of a level from the topmost to the back-most; the first
//! visible child that accepts the point wins that level and is searched
//! recursively. If none of its children accept the point, the child itself is
//! the result. A miss at the top level means the point fell on the root's
//! background and yields `None`.

use kurbo::{Point, Rect, Vec2};

use crate::tree::Tree;
use crate::types::{NodeId, WidgetFlags};

impl Tree {
    /// Resolve the topmost widget below `root` containing a world-space point.
    ///
    /// Only visible nodes are considered; containment uses the node's world
    /// bounds. `root` itself is never returned.
    pub fn resolve_target(&self, root: NodeId, point: Point) -> Option<NodeId> {
        self.resolve_target_with(root, point, |_, pt, bounds| bounds.contains(pt))
    }

    /// Like [`Tree::resolve_target`], with a caller-supplied shape test.
    ///
    /// `hit` receives the candidate, the world-space point, and the candidate's
    /// world bounds. It lets widgets declare non-rectangular shapes, or opt out
    /// of hit resolution entirely.
    pub fn resolve_target_with<F>(&self, root: NodeId, point: Point, mut hit: F) -> Option<NodeId>
    where
        F: FnMut(NodeId, Point, Rect) -> bool,
    {
        if !self.is_alive(root) {
            return None;
        }
        let offset = self.child_offset(root);
        self.resolve_level(root, offset, point, &mut hit)
    }

    fn resolve_level<F>(
        &self,
        parent: NodeId,
        offset: Vec2,
        point: Point,
        hit: &mut F,
    ) -> Option<NodeId>
    where
        F: FnMut(NodeId, Point, Rect) -> bool,
    {
        for &child in self.node(parent).children.iter().rev() {
            let node = self.node(child);
            if !node.flags.contains(WidgetFlags::VISIBLE) {
                continue;
            }
            let world = node.bounds + offset;
            if hit(child, point, world) {
                let inner = world.origin().to_vec2();
                return self
                    .resolve_level(child, inner, point, hit)
                    .or(Some(child));
            }
        }
        None
    }
}
