// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus: who receives input when the pointer is not the deciding factor.
//!
//! This crate holds two small pieces:
//!
//! - [`InputSlots`]: the focus, capture, and exclusive-input holders. Moving a
//!   slot yields a [`SlotChange`] describing which holder lost it and which
//!   gained it; the caller delivers the notifications loss-first.
//! - [`next_tab_stop`]: bounded keyboard cycling over siblings, with recursive
//!   descent into containers that are not tab stops themselves.
//!
//! Slots are generic over a key `K: Copy + Eq` and never own their holders.
//! Tab search works over [`trellis_tree::Tree`] and its capability flags.
//!
//! This crate is `no_std`.

#![no_std]

mod slots;
mod tab;

pub use slots::{InputSlots, SlotChange};
pub use tab::{Navigation, is_eligible, next_tab_stop};
