// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a propagation path and honor stop outcomes.
//!
//! - Entries are visited in order, target first.
//! - [`Outcome::Stop`] aborts propagation immediately.
//! - The return value reports the node that stopped propagation, if any.
//!
//! Paths are typically produced by
//! [`propagation_path`](crate::router::propagation_path).
//!
//! ```
//! use trellis_responder::dispatcher;
//! use trellis_responder::types::Outcome;
//!
//! // Target 3, bubbling through 2 to the root 1.
//! let path = [3_u32, 2, 1];
//! let mut visited = Vec::new();
//! let stopped = dispatcher::run(&path, |k| {
//!     visited.push(k);
//!     Outcome::from(k == 2)
//! });
//! assert_eq!(stopped, Some(2));
//! assert_eq!(visited, vec![3, 2]);
//! ```

use crate::types::Outcome;

/// Run `handler` over `path` until one returns [`Outcome::Stop`].
///
/// Returns the node that stopped propagation, or `None` if the whole path was
/// visited without anyone handling the event.
pub fn run<K: Copy>(path: &[K], mut handler: impl FnMut(K) -> Outcome) -> Option<K> {
    path.iter()
        .copied()
        .find(|&k| handler(k) == Outcome::Stop)
}

/// Like [`run`], reporting only whether the event was handled.
pub fn bubble<K: Copy>(path: &[K], handler: impl FnMut(K) -> Outcome) -> bool {
    run(path, handler).is_some()
}
