// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for session tests.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kurbo::{Point, Size};
use trellis_tree::{NodeId, WidgetDesc};

use super::System;
use crate::config::SystemConfig;
use crate::context::EventCx;
use crate::event::{ButtonState, Key, MouseButton, RawEvent};
use crate::host::{FixedViewport, NoFactory};
use crate::widget::Widget;

pub(crate) type Journal = Rc<RefCell<Vec<String>>>;

type Reaction = Box<dyn Fn(&mut EventCx<'_>)>;

/// Writes every callback it receives to a shared journal as `name:event`.
pub(crate) struct Recorder {
    name: &'static str,
    log: Journal,
    consume: bool,
    accept_drops: bool,
    reactions: Vec<(&'static str, Reaction)>,
}

impl fmt::Debug for Recorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recorder")
            .field("name", &self.name)
            .field("consume", &self.consume)
            .finish_non_exhaustive()
    }
}

impl Recorder {
    pub(crate) fn new(name: &'static str, log: &Journal) -> Self {
        Self {
            name,
            log: log.clone(),
            consume: false,
            accept_drops: false,
            reactions: Vec::new(),
        }
    }

    /// Report bubbling events as handled.
    pub(crate) fn consuming(mut self) -> Self {
        self.consume = true;
        self
    }

    pub(crate) fn accepting_drops(mut self) -> Self {
        self.accept_drops = true;
        self
    }

    /// Run `reaction` whenever `event` is recorded.
    pub(crate) fn on(
        mut self,
        event: &'static str,
        reaction: impl Fn(&mut EventCx<'_>) + 'static,
    ) -> Self {
        self.reactions.push((event, Box::new(reaction)));
        self
    }

    fn record(&self, cx: &mut EventCx<'_>, event: &str) {
        self.log.borrow_mut().push(format!("{}:{event}", self.name));
        for (_, reaction) in self.reactions.iter().filter(|(e, _)| *e == event) {
            reaction(cx);
        }
    }
}

impl Widget for Recorder {
    fn on_mouse_move(&mut self, cx: &mut EventCx<'_>) -> bool {
        self.record(cx, "move");
        self.consume
    }

    fn on_mouse_wheel(&mut self, cx: &mut EventCx<'_>, _delta: i32) -> bool {
        self.record(cx, "wheel");
        self.consume
    }

    fn on_mouse_button(
        &mut self,
        cx: &mut EventCx<'_>,
        _button: MouseButton,
        state: ButtonState,
    ) -> bool {
        self.record(cx, if state.is_down() { "down" } else { "up" });
        self.consume
    }

    fn on_mouse_double(&mut self, cx: &mut EventCx<'_>, _button: MouseButton) -> bool {
        self.record(cx, "double");
        self.consume
    }

    fn on_keyboard_button(&mut self, cx: &mut EventCx<'_>, _key: Key, _state: ButtonState) -> bool {
        self.record(cx, "key");
        self.consume
    }

    fn on_char(&mut self, cx: &mut EventCx<'_>, ch: char) -> bool {
        self.record(cx, &format!("char({ch})"));
        self.consume
    }

    fn on_mouse_enter(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "enter");
    }

    fn on_mouse_leave(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "leave");
    }

    fn on_focus_gained(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "focus+");
    }

    fn on_focus_lost(&mut self, cx: &mut EventCx<'_>, _next: Option<NodeId>) {
        self.record(cx, "focus-");
    }

    fn on_capture_gained(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "capture+");
    }

    fn on_capture_lost(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "capture-");
    }

    fn on_tooltip_show(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "tip+");
    }

    fn on_tooltip_hide(&mut self, cx: &mut EventCx<'_>) {
        self.record(cx, "tip-");
    }

    fn on_tick(&mut self, cx: &mut EventCx<'_>, _delta: f64) {
        self.record(cx, "tick");
    }

    fn on_sized(&mut self, cx: &mut EventCx<'_>, _auto_scaled: bool) {
        self.record(cx, "sized");
    }

    fn on_game_event(&mut self, cx: &mut EventCx<'_>, name: &str) -> bool {
        self.record(cx, &format!("game({name})"));
        self.consume
    }

    fn on_drop(&mut self, cx: &mut EventCx<'_>, _source: NodeId) -> bool {
        self.record(cx, "drop");
        self.accept_drops
    }
}

pub(crate) fn journal() -> Journal {
    Journal::default()
}

/// Drain the journal.
pub(crate) fn take(log: &Journal) -> Vec<String> {
    core::mem::take(&mut *log.borrow_mut())
}

/// An 800x600 session without a menu layout.
pub(crate) fn session() -> System {
    session_with(SystemConfig::default())
}

pub(crate) fn session_with(config: SystemConfig) -> System {
    let viewport = FixedViewport::new(Size::new(800.0, 600.0));
    System::new(viewport, NoFactory, config.with_menu_layout(None::<String>))
        .expect("system widgets are always constructible")
}

pub(crate) fn rect(name: &str, x: f64, y: f64, w: f64, h: f64) -> WidgetDesc {
    WidgetDesc::new(name).at(Point::new(x, y), Size::new(w, h))
}

pub(crate) fn move_to(gui: &mut System, x: f64, y: f64) -> bool {
    gui.handle_event(RawEvent::MouseMove { x, y })
}

pub(crate) fn left(gui: &mut System, state: ButtonState) -> bool {
    gui.handle_event(RawEvent::MouseButton {
        button: MouseButton::Left,
        state,
    })
}

pub(crate) fn key(gui: &mut System, key: Key, state: ButtonState) -> bool {
    gui.handle_event(RawEvent::Keyboard { key, state })
}
