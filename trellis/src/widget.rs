// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-widget capability surface.

use core::any::Any;
use core::fmt::Debug;

use kurbo::{Point, Rect};
use trellis_tree::NodeId;

use crate::context::EventCx;
use crate::event::{ButtonState, Key, MouseButton};

/// Behavior attached to a tree node.
///
/// Every callback has a default that does nothing and reports the event as
/// unhandled, so a widget only overrides what it reacts to. Handlers that
/// return `bool` take part in bubbling: `true` stops propagation.
///
/// Structural traits (tab stop, draggable, enabled, tooltip) are tree flags,
/// not methods; see [`trellis_tree::WidgetFlags`].
#[allow(unused_variables, reason = "Default implementations ignore their arguments.")]
pub trait Widget: Any + Debug {
    /// The cursor moved over (or while captured by) this widget.
    fn on_mouse_move(&mut self, cx: &mut EventCx<'_>) -> bool {
        false
    }

    /// The wheel turned.
    fn on_mouse_wheel(&mut self, cx: &mut EventCx<'_>, delta: i32) -> bool {
        false
    }

    /// A mouse button was pressed or released.
    fn on_mouse_button(
        &mut self,
        cx: &mut EventCx<'_>,
        button: MouseButton,
        state: ButtonState,
    ) -> bool {
        false
    }

    /// A double click.
    fn on_mouse_double(&mut self, cx: &mut EventCx<'_>, button: MouseButton) -> bool {
        false
    }

    /// A key was pressed or released while this widget had focus.
    fn on_keyboard_button(&mut self, cx: &mut EventCx<'_>, key: Key, state: ButtonState) -> bool {
        false
    }

    /// Text input while this widget had focus.
    fn on_char(&mut self, cx: &mut EventCx<'_>, ch: char) -> bool {
        false
    }

    /// The pointer started hovering this widget.
    fn on_mouse_enter(&mut self, cx: &mut EventCx<'_>) {}

    /// The pointer stopped hovering this widget.
    fn on_mouse_leave(&mut self, cx: &mut EventCx<'_>) {}

    /// This widget gained keyboard focus.
    fn on_focus_gained(&mut self, cx: &mut EventCx<'_>) {}

    /// This widget lost keyboard focus to `next`.
    fn on_focus_lost(&mut self, cx: &mut EventCx<'_>, next: Option<NodeId>) {}

    /// This widget captured the pointer.
    fn on_capture_gained(&mut self, cx: &mut EventCx<'_>) {}

    /// This widget lost the pointer capture.
    fn on_capture_lost(&mut self, cx: &mut EventCx<'_>) {}

    /// This widget's tooltip is being shown.
    fn on_tooltip_show(&mut self, cx: &mut EventCx<'_>) {}

    /// This widget's tooltip is being hidden.
    fn on_tooltip_hide(&mut self, cx: &mut EventCx<'_>) {}

    /// One frame elapsed (`delta` in seconds). Only called while subscribed.
    fn on_tick(&mut self, cx: &mut EventCx<'_>, delta: f64) {}

    /// This widget was resized by the session; `auto_scaled` when caused by a
    /// renderer scaling change.
    fn on_sized(&mut self, cx: &mut EventCx<'_>, auto_scaled: bool) {}

    /// A named game event, such as `"On_Init"`.
    fn on_game_event(&mut self, cx: &mut EventCx<'_>, name: &str) -> bool {
        false
    }

    /// `source` was dropped on this widget. Return `true` to accept.
    fn on_drop(&mut self, cx: &mut EventCx<'_>, source: NodeId) -> bool {
        false
    }

    /// Does this widget's shape contain `point`?
    ///
    /// Both arguments are in world space. Returning `false` makes the widget
    /// transparent to hit resolution.
    fn hit_test(&self, point: Point, world_bounds: Rect) -> bool {
        world_bounds.contains(point)
    }
}

pub(crate) fn downcast_ref<T: Widget>(widget: &dyn Widget) -> Option<&T> {
    let any: &dyn Any = widget;
    any.downcast_ref::<T>()
}

pub(crate) fn downcast_mut<T: Widget>(widget: &mut dyn Widget) -> Option<&mut T> {
    let any: &mut dyn Any = widget;
    any.downcast_mut::<T>()
}
