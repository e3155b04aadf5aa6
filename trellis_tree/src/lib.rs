// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Tree: the widget ownership hierarchy behind Trellis input routing.
//!
//! - Owns widget nodes in a generational arena; parents own ordered child lists.
//! - Child order is z-order: the last child is topmost, hit-tested first and drawn last.
//! - Resolves "what is under the cursor" with a front-to-back recursive search.
//! - Provides wrapping sibling traversal for Tab cycling, and damage for invalidation.
//!
//! ## Where this fits
//!
//! The tree stores structure, geometry, and capability flags only. Widget
//! behavior (callbacks) lives with the owner of the tree, which maps each
//! [`NodeId`] to its behavior. Focus, capture, drag, and tooltip state are kept
//! elsewhere and refer to nodes by [`NodeId`], which never extends a node's
//! lifetime: once a node is removed, every id pointing at it goes stale.
//!
//! ## Geometry
//!
//! Bounds are axis-aligned and expressed relative to the parent's origin.
//! [`Tree::origin`] and [`Tree::world_bounds`] accumulate ancestor positions;
//! [`Tree::to_local`] maps a world point into a widget's own space.
//!
//! ## API overview
//!
//! - [`Tree::insert`] / [`Tree::insert_child`] → [`NodeId`]
//! - [`Tree::add`] reparents (rejecting cycles and duplicate sibling names).
//! - [`Tree::remove`] cascades to the whole subtree.
//! - [`Tree::rise`] moves a node to the front of its siblings.
//! - [`Tree::resolve_target`] and [`Tree::resolve_target_with`] for hit resolution.
//! - [`Tree::next_sibling`] / [`Tree::prev_sibling`] wrap within the parent.
//! - [`Tree::find`] looks a widget up by name.
//! - [`Tree::invalidate`] / [`Tree::take_damage`] collect repaint regions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod damage;
mod error;
mod hit;
mod tree;
mod types;

pub use damage::Damage;
pub use error::TreeError;
pub use tree::{NodePath, Tree};
pub use types::{NodeId, WidgetDesc, WidgetFlags};
