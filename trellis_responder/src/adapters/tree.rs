// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for the Trellis widget tree.
//!
//! Enable with `tree_adapter`.

use alloc::vec::Vec;

use trellis_tree::{NodeId, Tree};

use crate::router::propagation_path;
use crate::types::ParentLookup;

impl ParentLookup<NodeId> for Tree {
    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        Tree::parent_of(self, *node)
    }
}

/// Build the target → root bubbling path for `start` within `tree`.
///
/// A stale `start` yields an empty path.
pub fn bubble_path(tree: &Tree, start: NodeId) -> Vec<NodeId> {
    if !tree.is_alive(start) {
        return Vec::new();
    }
    propagation_path(start, tree, tree.slot_count())
}
