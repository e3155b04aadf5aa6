// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Responder: where an input event goes, and how far it travels.
//!
//! ## Overview
//!
//! This crate answers two questions for an already hit-tested event:
//!
//! - **Who first?** [`router::route`] applies the precedence exclusive →
//!   capture → preferred (hover or focus) → root.
//! - **Who next?** [`router::propagation_path`] walks parents from the target
//!   to the root, and [`dispatcher::run`] offers the event along that path
//!   until a handler returns [`Outcome::Stop`](types::Outcome::Stop).
//!
//! [`hover::Hover`] tracks the widget containing the pointer and reports
//! leave-then-enter pairs when it changes.
//!
//! It does not perform hit testing.
//!
//! ## Adapters
//!
//! - **Tree Adapter** (`tree_adapter` feature): implements
//!   [`ParentLookup`](types::ParentLookup) for the Trellis widget tree and
//!   builds bubbling paths from it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod hover;
pub mod router;
pub mod types;
