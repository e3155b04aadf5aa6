// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw event handling.
//!
//! Routing order for every pointer and key event:
//!
//! 1. An exclusive-input widget receives the event directly and nothing else
//!    sees it.
//! 2. Otherwise the capture holder, else the hovered widget, else the root is
//!    the target, and the event bubbles up its ancestor chain until a handler
//!    returns `true`.
//!
//! Keyboard and text input skip bubbling and go straight to the focus holder.

use kurbo::Point;
use tracing::{debug, trace};
use trellis_event_state::modifiers::Modifiers;
use trellis_focus::{Navigation, is_eligible, next_tab_stop};
use trellis_responder::adapters::tree::bubble_path;
use trellis_responder::dispatcher;
use trellis_responder::router::{Route, bubble_start, route};
use trellis_responder::types::Outcome;
use trellis_tree::{NodeId, WidgetFlags};

use super::System;
use crate::context::{EventCx, Request};
use crate::event::{ButtonState, Key, MouseButton, RawEvent};
use crate::widget::Widget;

impl System {
    /// Process one raw input event.
    ///
    /// Returns `true` if some widget handled it; the host should then not
    /// forward it to the game.
    pub fn handle_event(&mut self, event: RawEvent) -> bool {
        trace!(target: "trellis::dispatch", ?event, "raw event");
        match event {
            RawEvent::MouseMove { x, y } => self.handle_mouse_move(Point::new(x, y)),
            RawEvent::MouseWheel { delta } => self.handle_mouse_wheel(delta),
            RawEvent::MouseButton { button, state } => self.handle_mouse_button(button, state),
            RawEvent::MouseDouble { button } => self.handle_mouse_double(button),
            RawEvent::Keyboard { key, state } => self.handle_keyboard(key, state),
            RawEvent::Char { code } => self.handle_char(code),
            RawEvent::FocusLost => {
                self.handle_focus_lost();
                false
            }
            RawEvent::ViewportResize => {
                self.handle_viewport_change();
                false
            }
        }
    }

    fn handle_mouse_move(&mut self, pos: Point) -> bool {
        if let Some(exclusive) = self.exclusive() {
            return self.deliver(exclusive, |w, cx| w.on_mouse_move(cx));
        }
        self.cursor = pos;
        self.viewport.set_cursor_position(pos);

        if self.drag.is_armed() && self.drag.source().is_some() {
            if self.capture().is_some() {
                self.query_capture_input(None);
            }
            if let Some((source, grab)) = self.drag.check_threshold(pos) {
                let offset = self.tree.to_local(source, grab).map(Point::to_vec2);
                let started = offset.is_some_and(|offset| self.start_drag(source, offset));
                if !started {
                    debug!(target: "trellis::drag", ?source, "drag did not start");
                    self.drag.disarm();
                }
            }
        }

        let hit = self.target_at(pos);
        if self.drag.is_fired() {
            self.update_ghost(hit);
        }
        if self.capture().is_none() {
            self.update_hover(hit);
        }
        let target = self.pointer_target();
        self.bubble(target, |w, cx| w.on_mouse_move(cx))
    }

    fn update_hover(&mut self, hit: Option<NodeId>) {
        if self.hover.current() == hit {
            return;
        }
        self.dismiss_tooltip();
        let Some(change) = self.hover.update(hit) else {
            return;
        };
        if let Some(old) = change.leave {
            self.call(old, |w, cx| w.on_mouse_leave(cx));
        }
        if let Some(new) = change.enter {
            if self.tree.has_flags(new, WidgetFlags::HAS_TOOLTIP) {
                self.tooltip_timer.arm();
            }
            self.call(new, |w, cx| w.on_mouse_enter(cx));
        }
    }

    fn handle_mouse_wheel(&mut self, delta: i32) -> bool {
        let target = match self.pointer_route() {
            Route::Exclusive(exclusive) => {
                return self.deliver(exclusive, |w, cx| w.on_mouse_wheel(cx, delta));
            }
            Route::Bubble(target) => target,
        };
        self.dismiss_tooltip();
        self.bubble(target, |w, cx| w.on_mouse_wheel(cx, delta))
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ButtonState) -> bool {
        let target = match self.pointer_route() {
            Route::Exclusive(exclusive) => {
                return self.deliver(exclusive, |w, cx| w.on_mouse_button(cx, button, state));
            }
            Route::Bubble(target) => target,
        };
        self.dismiss_tooltip();

        if self.focus() != Some(target) {
            let next = is_eligible(&self.tree, target).then_some(target);
            self.query_input_focus(next);
        }

        if button == MouseButton::Left {
            if state.is_down() {
                if !self.drag.is_fired()
                    && target != self.root
                    && self.capture() != Some(target)
                    && self.tree.has_flags(target, WidgetFlags::DRAGGABLE)
                {
                    self.drag.arm(target, self.cursor);
                }
            } else if self.drag.is_armed() && !self.drag.is_fired() {
                self.drag.disarm();
            }
        }
        let completes_drag =
            button == MouseButton::Left && !state.is_down() && self.drag.is_fired();

        self.tree.rise(target);
        if target != self.menu && !self.tree.is_ancestor_of(self.menu, target) {
            self.close_context_menu();
        }

        let handled = self.bubble(target, |w, cx| w.on_mouse_button(cx, button, state));
        if completes_drag {
            self.stop_drag();
        }
        handled
    }

    fn handle_mouse_double(&mut self, button: MouseButton) -> bool {
        let target = match self.pointer_route() {
            Route::Exclusive(exclusive) => {
                return self.deliver(exclusive, |w, cx| w.on_mouse_double(cx, button));
            }
            Route::Bubble(target) => target,
        };
        self.dismiss_tooltip();
        self.tree.rise(target);
        self.bubble(target, |w, cx| w.on_mouse_double(cx, button))
    }

    fn handle_keyboard(&mut self, key: Key, state: ButtonState) -> bool {
        self.process_system_key(key, state);
        let focus = self
            .focus()
            .filter(|&f| self.tree.has_flags(f, WidgetFlags::ENABLED));
        let target = route(self.exclusive(), None, focus, self.root).target();
        self.deliver(target, |w, cx| w.on_keyboard_button(cx, key, state))
    }

    /// Tab navigation and held-modifier bookkeeping. Runs for every key event,
    /// even in exclusive mode.
    fn process_system_key(&mut self, key: Key, state: ButtonState) {
        if let Some(keys) = key.modifier() {
            self.modifiers.apply(keys, state.is_down());
            return;
        }
        if key == Key::Tab
            && state.is_down()
            && let Some(focus) = self.focus()
        {
            let nav = if self.modifiers.contains(Modifiers::SHIFT) {
                Navigation::Prev
            } else {
                Navigation::Next
            };
            let next = next_tab_stop(&self.tree, focus, nav);
            trace!(target: "trellis::focus", ?focus, ?next, ?nav, "tab navigation");
            self.query_input_focus(Some(next));
        }
    }

    fn handle_char(&mut self, code: u32) -> bool {
        let ch = char::from_u32(code);
        if let Some(exclusive) = self.exclusive() {
            return ch.is_some_and(|ch| self.deliver(exclusive, |w, cx| w.on_char(cx, ch)));
        }
        let Some(focus) = self.focus() else {
            return false;
        };
        // Control codes are consumed by keyboard handling.
        if code <= 31 {
            return false;
        }
        ch.is_some_and(|ch| self.deliver(focus, |w, cx| w.on_char(cx, ch)))
    }

    fn handle_focus_lost(&mut self) {
        debug!(target: "trellis::dispatch", "host window lost focus");
        self.query_capture_input(None);
        self.query_input_focus(None);
    }

    fn handle_viewport_change(&mut self) {
        if !self.config.auto_scale {
            let size = self.viewport.viewport_size();
            self.update_size(size);
        }
    }

    fn pointer_target(&self) -> NodeId {
        bubble_start(self.capture(), self.contains_mouse(), self.root)
    }

    fn pointer_route(&self) -> Route<NodeId> {
        route(self.exclusive(), self.capture(), self.contains_mouse(), self.root)
    }

    /// Deliver to one widget, no bubbling.
    fn deliver(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>) -> bool,
    ) -> bool {
        self.call(id, f).unwrap_or(false)
    }

    /// Offer an event to `start` and then each ancestor until one handles it.
    fn bubble(
        &mut self,
        start: NodeId,
        mut f: impl FnMut(&mut dyn Widget, &mut EventCx<'_>) -> bool,
    ) -> bool {
        let path = bubble_path(&self.tree, start);
        let handled_by = dispatcher::run(&path, |id| {
            Outcome::from(self.call(id, &mut f).unwrap_or(false))
        });
        if let Some(id) = handled_by {
            trace!(target: "trellis::dispatch", ?id, "event handled");
        }
        handled_by.is_some()
    }

    /// Run one callback on a live widget, then apply what it requested.
    ///
    /// Returns `None` for stale ids.
    pub(super) fn call<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>) -> R,
    ) -> Option<R> {
        if !self.tree.is_alive(id) {
            return None;
        }
        let widget = self.widgets.get_mut(&id)?;
        let mut cx = EventCx {
            node: id,
            tree: &self.tree,
            slots: &self.slots,
            cursor: self.cursor,
            modifiers: self.modifiers,
            requests: &mut self.requests,
        };
        let out = f(widget.as_mut(), &mut cx);
        self.apply_requests();
        Some(out)
    }

    /// Hold queued requests until `f` returns, then apply them.
    ///
    /// Keeps a multi-callback transition atomic: nothing a callback asks for
    /// lands between the loss and gain notifications of one change.
    pub(super) fn batched<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let outer = core::mem::replace(&mut self.applying, true);
        let out = f(self);
        self.applying = outer;
        if !outer {
            self.apply_requests();
        }
        out
    }

    fn apply_requests(&mut self) {
        if self.applying {
            return;
        }
        self.applying = true;
        while let Some(request) = self.requests.pop_front() {
            self.apply(request);
        }
        self.applying = false;
    }

    fn apply(&mut self, request: Request) {
        trace!(target: "trellis::dispatch", ?request, "applying request");
        match request {
            Request::Focus(widget) => {
                self.query_input_focus(widget);
            }
            Request::Capture(widget) => {
                self.query_capture_input(widget);
            }
            Request::EnterExclusive(widget) => self.enter_exclusive_input_mode(Some(widget)),
            Request::LeaveExclusive => self.leave_exclusive_input_mode(),
            Request::SubscribeTick(widget) => {
                self.subscribe_tick(widget);
            }
            Request::UnsubscribeTick(widget) => {
                self.unsubscribe_tick(widget);
            }
            Request::MarkTickUnsubscribe(widget) => {
                self.tree
                    .set_flag(widget, WidgetFlags::TICK_UNSUBSCRIBE_PENDING, true);
            }
            Request::StopDrag => {
                self.stop_drag();
            }
            Request::FreezeDrag(frozen) => self.set_drag_freeze(frozen),
            Request::Invalidate(widget) => self.tree.invalidate(widget),
            Request::Rise(widget) => self.tree.rise(widget),
        }
    }
}
