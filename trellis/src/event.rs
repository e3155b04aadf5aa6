// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input events as delivered by the host.

use trellis_event_state::modifiers::Modifiers;

/// Mouse buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button; the only one that starts drags.
    Left,
    /// Middle button or wheel press.
    Middle,
    /// Secondary button.
    Right,
}

impl MouseButton {
    /// Map a host button index (0 = left, 1 = middle, 2 = right).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// Press or release.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Pressed.
    Down,
    /// Released.
    Up,
}

impl ButtonState {
    /// Returns `true` for [`ButtonState::Down`].
    pub fn is_down(self) -> bool {
        self == Self::Down
    }
}

/// Keyboard keys the session interprets.
///
/// Everything else arrives as [`Key::Other`] with the host's key code and is
/// passed to widgets untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Tab; cycles focus.
    Tab,
    /// Shift, side unspecified.
    Shift,
    /// Left Shift.
    LShift,
    /// Right Shift.
    RShift,
    /// Control, side unspecified.
    Control,
    /// Left Control.
    LControl,
    /// Right Control.
    RControl,
    /// Alt, side unspecified.
    Menu,
    /// Left Alt.
    LMenu,
    /// Right Alt.
    RMenu,
    /// Escape.
    Escape,
    /// Enter.
    Return,
    /// Any other key, by host key code.
    Other(u32),
}

impl Key {
    /// The modifier bit this key toggles, if it is a system key.
    pub fn modifier(self) -> Option<Modifiers> {
        match self {
            Self::Shift | Self::LShift | Self::RShift => Some(Modifiers::SHIFT),
            Self::Control | Self::LControl | Self::RControl => Some(Modifiers::CONTROL),
            Self::Menu | Self::LMenu | Self::RMenu => Some(Modifiers::MENU),
            _ => None,
        }
    }
}

/// A raw input event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RawEvent {
    /// The cursor moved to a position in GUI space.
    MouseMove {
        /// Horizontal position.
        x: f64,
        /// Vertical position.
        y: f64,
    },
    /// The wheel turned.
    MouseWheel {
        /// Signed wheel steps.
        delta: i32,
    },
    /// A mouse button changed state.
    MouseButton {
        /// Which button.
        button: MouseButton,
        /// Pressed or released.
        state: ButtonState,
    },
    /// A double click.
    MouseDouble {
        /// Which button.
        button: MouseButton,
    },
    /// A key changed state.
    Keyboard {
        /// Which key.
        key: Key,
        /// Pressed or released.
        state: ButtonState,
    },
    /// Text input.
    Char {
        /// Character code.
        code: u32,
    },
    /// The host window lost focus.
    FocusLost,
    /// The host viewport changed size.
    ViewportResize,
}
