// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared responder types.

/// Propagation control returned by handlers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Not handled; offer the event to the next node.
    Continue,
    /// Handled; stop propagation.
    Stop,
}

impl From<bool> for Outcome {
    /// `true` (handled) maps to [`Outcome::Stop`].
    fn from(handled: bool) -> Self {
        if handled { Self::Stop } else { Self::Continue }
    }
}

/// Parent lookup used to build parent-ward propagation paths.
pub trait ParentLookup<K> {
    /// Return the parent of `node`, or `None` at a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}
