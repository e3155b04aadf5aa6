// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis: the input routing and interaction core of an embedded game GUI.
//!
//! A [`System`] owns one widget tree and turns raw host input into widget
//! callbacks:
//!
//! - Pointer events go to the exclusive-input widget if there is one, else to
//!   the capture holder, else to the topmost widget under the cursor, and
//!   bubble up the ancestor chain until a handler reports them handled.
//! - Keyboard and text input go to the focus holder. Tab cycles focus among
//!   sibling tab stops.
//! - Pressing a draggable widget and moving past the drag threshold starts a
//!   drag; releasing drops it on the nearest accepting widget under the
//!   cursor.
//! - Hovering a widget with a tooltip for the configured delay shows the
//!   shared tooltip.
//! - Widgets subscribed to ticks get `on_tick` once per [`System::tick`].
//!
//! Widget behavior implements [`Widget`]. Callbacks receive an [`EventCx`] that
//! reads the session state and queues [`Request`]s; the session applies them
//! in order as soon as the callback returns.
//!
//! The pieces underneath are usable on their own:
//! [`trellis_tree`] (hierarchy and hit resolution), [`trellis_focus`] (focus
//! slots and Tab order), [`trellis_event_state`] (drag, tooltip, tick, and
//! modifier state machines), and [`trellis_responder`] (routing and bubbling).
//!
//! ## Logging
//!
//! The session reports through [`tracing`] under these targets:
//! `trellis::system` (lifecycle and layout loading), `trellis::dispatch`,
//! `trellis::focus`, `trellis::drag`, `trellis::tooltip`, `trellis::tick`,
//! and `trellis::script`.

mod config;
mod context;
mod error;
mod event;
pub mod host;
mod system;
mod widget;
pub mod widgets;

pub use config::{DEFAULT_MENU_LAYOUT, SystemConfig};
pub use context::{EventCx, Request};
pub use error::{LoadError, Result, SystemError};
pub use event::{ButtonState, Key, MouseButton, RawEvent};
pub use system::System;
pub use widget::Widget;

pub use trellis_event_state::modifiers::Modifiers;
pub use trellis_tree::{Damage, NodeId, Tree, TreeError, WidgetDesc, WidgetFlags};
