// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Event State: small interaction state machines.
//!
//! Each machine here is plain data plus transitions. None of them touch the
//! widget tree or call widgets; the owner feeds events in and applies the
//! reported outcome.
//!
//! - [`drag::DragState`]: arm on press, fire past a distance threshold, stop
//!   with cooperation from a drag ghost, optional freeze.
//! - [`tooltip::TooltipTimer`]: show after a hover delay, hide after an
//!   optional lifetime.
//! - [`tick::TickRegistry`]: per-frame subscriptions with buffered adds and
//!   deferred removal.
//! - [`modifiers::Modifiers`]: held Shift / Control / Menu keys.
//!
//! Machines are generic over a key `K` identifying widgets.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod drag;
pub mod modifiers;
pub mod tick;
pub mod tooltip;
