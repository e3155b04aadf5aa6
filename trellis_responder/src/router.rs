// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Target selection and propagation paths.
//!
//! Routing is a strict precedence:
//!
//! 1. An exclusive-input widget receives everything, alone.
//! 2. Otherwise the capture holder is the start of bubbling.
//! 3. Otherwise the preferred target (the widget under the pointer for
//!    pointer events, the focus holder for keyboard events).
//! 4. Otherwise the root.
//!
//! The router does not hit test; callers resolve the preferred target first.

use alloc::vec::Vec;

use crate::types::ParentLookup;

/// Where an event goes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Route<K> {
    /// Deliver to this node only, with no bubbling.
    Exclusive(K),
    /// Deliver to this node, then to each ancestor until handled.
    Bubble(K),
}

impl<K: Copy> Route<K> {
    /// The first node that receives the event.
    pub fn target(&self) -> K {
        match *self {
            Self::Exclusive(k) | Self::Bubble(k) => k,
        }
    }
}

/// Pick the route for an event.
///
/// ```
/// use trellis_responder::router::{Route, route};
///
/// assert_eq!(route(Some(9), Some(1), Some(2), 0), Route::Exclusive(9));
/// assert_eq!(route(None, Some(1), Some(2), 0), Route::Bubble(1));
/// assert_eq!(route(None, None, Some(2), 0), Route::Bubble(2));
/// assert_eq!(route::<u32>(None, None, None, 0), Route::Bubble(0));
/// ```
pub fn route<K>(
    exclusive: Option<K>,
    capture: Option<K>,
    preferred: Option<K>,
    root: K,
) -> Route<K> {
    match exclusive {
        Some(k) => Route::Exclusive(k),
        None => Route::Bubble(bubble_start(capture, preferred, root)),
    }
}

/// The bubbling start node, ignoring exclusive mode.
pub fn bubble_start<K>(capture: Option<K>, preferred: Option<K>, root: K) -> K {
    capture.or(preferred).unwrap_or(root)
}

/// Build the target → root propagation path for `start`.
///
/// The walk is capped at `limit` nodes so a corrupt parent lookup cannot loop.
pub fn propagation_path<K: Copy + Eq>(
    start: K,
    parents: &impl ParentLookup<K>,
    limit: usize,
) -> Vec<K> {
    let mut path = Vec::new();
    let mut cur = Some(start);
    while let Some(k) = cur {
        if path.len() >= limit || path.contains(&k) {
            break;
        }
        path.push(k);
        cur = parents.parent_of(&k);
    }
    path
}
