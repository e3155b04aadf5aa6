// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by structural tree operations.

use crate::types::NodeId;

/// Errors returned by [`Tree::add`](crate::Tree::add) and friends.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The identifier does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// Linking would make a node its own ancestor.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// Requested parent.
        parent: NodeId,
        /// Node being attached.
        child: NodeId,
    },
    /// Another child of the parent already uses this name.
    #[error("{parent:?} already has a child named {name:?}")]
    DuplicateName {
        /// Requested parent.
        parent: NodeId,
        /// Conflicting name.
        name: alloc::string::String,
    },
}
