// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to other Trellis crates.

#[cfg(feature = "tree_adapter")]
pub mod tree;
