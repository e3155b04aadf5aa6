// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Held system keys.

bitflags::bitflags! {
    /// System (modifier) keys currently held down.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 1 << 0;
        /// Either Control key.
        const CONTROL = 1 << 1;
        /// Either Alt (menu) key.
        const MENU = 1 << 2;
    }
}

impl Modifiers {
    /// Set or clear `keys` according to a press or release.
    pub fn apply(&mut self, keys: Self, down: bool) {
        self.set(keys, down);
    }
}
