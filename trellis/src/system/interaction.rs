// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction state transitions: focus, capture, exclusive input, drag and
//! drop, tooltips, the context menu, and ticks.

use kurbo::{Point, Size, Vec2};
use tracing::{debug, trace};
use trellis_event_state::tooltip::TooltipTransition;
use trellis_tree::{NodeId, WidgetFlags};

use super::System;
use crate::widget::downcast_mut;
use crate::widgets::{ContextMenu, DragGhost, TooltipWidget};

impl System {
    /// Move keyboard focus to `widget`, or clear it with `None`.
    ///
    /// The old holder hears `on_focus_lost` before the new one hears
    /// `on_focus_gained`; both are repainted. Stale ids count as `None`.
    /// Returns `true` if focus changed hands.
    pub fn query_input_focus(&mut self, widget: Option<NodeId>) -> bool {
        let widget = self.live(widget);
        let change = self.slots.set_focus(widget);
        if change.is_noop() {
            return false;
        }
        debug!(
            target: "trellis::focus",
            lost = ?change.lost,
            gained = ?change.gained,
            "focus moved"
        );
        self.batched(|s| {
            if let Some(old) = change.lost {
                s.call(old, |w, cx| w.on_focus_lost(cx, widget));
                s.tree.invalidate(old);
            }
            if let Some(new) = change.gained {
                s.call(new, |w, cx| w.on_focus_gained(cx));
                s.tree.invalidate(new);
            }
        });
        true
    }

    /// Route all pointer input to `widget`, or release with `None`.
    ///
    /// Returns `true` if the capture changed hands.
    pub fn query_capture_input(&mut self, widget: Option<NodeId>) -> bool {
        let widget = self.live(widget);
        let change = self.slots.set_capture(widget);
        if change.is_noop() {
            return false;
        }
        debug!(
            target: "trellis::focus",
            lost = ?change.lost,
            gained = ?change.gained,
            "capture moved"
        );
        self.batched(|s| {
            if let Some(old) = change.lost {
                s.call(old, |w, cx| w.on_capture_lost(cx));
            }
            if let Some(new) = change.gained {
                s.call(new, |w, cx| w.on_capture_gained(cx));
            }
        });
        true
    }

    /// Route all input to `widget`, bypassing hit resolution and focus.
    ///
    /// `None` and stale ids are ignored; leave with
    /// [`System::leave_exclusive_input_mode`].
    pub fn enter_exclusive_input_mode(&mut self, widget: Option<NodeId>) {
        let widget = self.live(widget);
        if self.slots.enter_exclusive(widget) {
            debug!(target: "trellis::focus", ?widget, "entered exclusive input mode");
        }
    }

    /// Return to normal routing.
    pub fn leave_exclusive_input_mode(&mut self) {
        if let Some(widget) = self.slots.leave_exclusive() {
            debug!(target: "trellis::focus", ?widget, "left exclusive input mode");
        }
    }

    /// Start calling `on_tick` on `widget` every frame.
    ///
    /// Subscribing during a tick takes effect from the next one.
    pub fn subscribe_tick(&mut self, widget: NodeId) -> bool {
        if !self.tree.is_alive(widget) {
            return false;
        }
        self.tree
            .set_flag(widget, WidgetFlags::TICK_UNSUBSCRIBE_PENDING, false);
        self.ticks.subscribe(widget)
    }

    /// Stop calling `on_tick` on `widget`.
    ///
    /// Ignored while a tick runs; mark the widget with
    /// [`WidgetFlags::TICK_UNSUBSCRIBE_PENDING`] instead.
    pub fn unsubscribe_tick(&mut self, widget: NodeId) -> bool {
        self.ticks.unsubscribe(widget)
    }

    /// Advance one frame by `delta` seconds.
    ///
    /// Calls `on_tick` on every subscriber, sweeps subscribers marked for
    /// removal, then advances the tooltip timer.
    pub fn tick(&mut self, delta: f64) {
        let count = self.ticks.begin();
        for i in 0..count {
            let Some(widget) = self.ticks.get(i) else {
                break;
            };
            self.call(widget, |w, cx| w.on_tick(cx, delta));
        }
        let tree = &mut self.tree;
        let swept = self.ticks.end(|widget| {
            if !tree.is_alive(widget) {
                return true;
            }
            let pending = tree.has_flags(widget, WidgetFlags::TICK_UNSUBSCRIBE_PENDING);
            if pending {
                tree.set_flag(widget, WidgetFlags::TICK_UNSUBSCRIBE_PENDING, false);
            }
            pending
        });
        if swept > 0 {
            trace!(target: "trellis::tick", swept, "tick subscribers removed");
        }

        match self.tooltip_timer.advance(delta) {
            TooltipTransition::Show => self.show_tooltip(),
            TooltipTransition::Hide => self.hide_tooltip(true),
            TooltipTransition::None => {}
        }
    }

    /// Begin dragging `source`, grabbed at `offset` in its local space.
    ///
    /// Normally started by the session once an armed press moves past the
    /// drag threshold. Fails for stale or non-draggable sources.
    pub fn start_drag(&mut self, source: NodeId, offset: Vec2) -> bool {
        if !self.tree.is_alive(source) {
            return false;
        }
        let ghost = self.drag_ghost;
        self.tree.rise(ghost);
        if !self.tree.has_flags(source, WidgetFlags::DRAGGABLE) {
            debug!(target: "trellis::drag", ?source, "source is not draggable");
            return false;
        }
        let started = self
            .widgets
            .get_mut(&ghost)
            .and_then(|w| downcast_mut::<DragGhost>(w.as_mut()))
            .is_some_and(|g| g.start(&self.tree, source, offset));
        if !started {
            debug!(target: "trellis::drag", ?source, "drag ghost refused the source");
            return false;
        }

        let size = self.tree.bounds(source).map_or(Size::ZERO, |r| r.size());
        self.tree.set_size(ghost, size);
        self.place_ghost(offset);
        self.tree.set_flag(ghost, WidgetFlags::VISIBLE, true);
        self.drag.fire(source, offset);
        let hit = self.target_at(self.cursor);
        self.update_ghost(hit);
        debug!(target: "trellis::drag", ?source, ?offset, "drag started");
        true
    }

    /// End the running drag, delivering `on_drop` to the current drop target.
    ///
    /// Returns `false` only while the drag is frozen.
    pub fn stop_drag(&mut self) -> bool {
        if self.drag.is_frozen() {
            debug!(target: "trellis::drag", "drag is frozen, not stopping");
            return false;
        }
        let ghost = self.drag_ghost;
        let widgets = &mut self.widgets;
        let mut dropped = None;
        let stopped = self.drag.stop(|| {
            if let Some(g) = widgets
                .get_mut(&ghost)
                .and_then(|w| downcast_mut::<DragGhost>(w.as_mut()))
            {
                dropped = g.finish();
            }
            true
        });
        if !stopped {
            return false;
        }
        if self.tree.has_flags(ghost, WidgetFlags::VISIBLE) {
            self.tree.invalidate(ghost);
            self.tree.set_flag(ghost, WidgetFlags::VISIBLE, false);
        }

        match dropped {
            Some((source, Some(target))) => {
                let accepted = self
                    .call(target, |w, cx| w.on_drop(cx, source))
                    .unwrap_or(false);
                debug!(target: "trellis::drag", ?source, ?target, accepted, "dropped");
            }
            Some((source, None)) => {
                debug!(target: "trellis::drag", ?source, "drag ended without a drop target");
            }
            None => {}
        }
        true
    }

    /// Freeze the running drag so that releasing the button does not end it.
    pub fn set_drag_freeze(&mut self, frozen: bool) {
        self.drag.set_freeze(frozen);
    }

    /// Follow the cursor and re-evaluate the drop target.
    pub(super) fn update_ghost(&mut self, hit: Option<NodeId>) {
        self.place_ghost(self.drag.offset());
        let ghost = self.drag_ghost;
        if let Some(g) = self
            .widgets
            .get_mut(&ghost)
            .and_then(|w| downcast_mut::<DragGhost>(w.as_mut()))
        {
            g.update(&self.tree, hit);
        }
    }

    fn place_ghost(&mut self, offset: Vec2) {
        let ghost = self.drag_ghost;
        self.tree.invalidate(ghost);
        let at = self.root_local(self.cursor - offset);
        self.tree.set_position(ghost, at);
        self.tree.invalidate(ghost);
    }

    /// Cancel a pending tooltip and hide one that is up.
    pub(super) fn dismiss_tooltip(&mut self) {
        let was_shown = self.tooltip_timer.disarm();
        self.hide_tooltip(was_shown);
    }

    fn show_tooltip(&mut self) {
        let Some(owner) = self.contains_mouse() else {
            return;
        };
        if !self.tree.has_flags(owner, WidgetFlags::HAS_TOOLTIP) {
            return;
        }
        self.call(owner, |w, cx| w.on_tooltip_show(cx));
        if let Some(tooltip) = self.system_widget_mut::<TooltipWidget>(self.tooltip) {
            tooltip.show(owner);
        }
        let at = self.root_local(self.cursor);
        self.tree.set_position(self.tooltip, at);
        self.tree.set_flag(self.tooltip, WidgetFlags::VISIBLE, true);
        self.tree.rise(self.tooltip);
        self.tree.invalidate(self.tooltip);
        trace!(target: "trellis::tooltip", ?owner, "tooltip shown");
    }

    /// Take the tooltip down; the owner hears `on_tooltip_hide` if it was up.
    pub(super) fn hide_tooltip(&mut self, was_shown: bool) {
        let owner = self
            .system_widget_mut::<TooltipWidget>(self.tooltip)
            .and_then(|tooltip| {
                let owner = tooltip.owner();
                tooltip.reset();
                owner
            });
        if self.tree.has_flags(self.tooltip, WidgetFlags::VISIBLE) {
            self.tree.invalidate(self.tooltip);
            self.tree.set_flag(self.tooltip, WidgetFlags::VISIBLE, false);
        }
        if was_shown && let Some(owner) = owner {
            self.call(owner, |w, cx| w.on_tooltip_hide(cx));
            trace!(target: "trellis::tooltip", ?owner, "tooltip hidden");
        }
    }

    /// Open the context menu at `at` (GUI space) on behalf of `owner`.
    pub fn show_context_menu(&mut self, owner: Option<NodeId>, at: Point) {
        let owner = self.live(owner);
        if let Some(menu) = self.system_widget_mut::<ContextMenu>(self.menu) {
            menu.open(owner);
        }
        let local = self.root_local(at);
        self.tree.set_position(self.menu, local);
        self.tree.set_flag(self.menu, WidgetFlags::VISIBLE, true);
        self.tree.rise(self.menu);
        self.tree.invalidate(self.menu);
        debug!(target: "trellis::system", ?owner, "context menu opened");
    }

    /// Close the context menu if it is open.
    pub fn close_context_menu(&mut self) {
        if let Some(menu) = self.system_widget_mut::<ContextMenu>(self.menu) {
            menu.reset();
        }
        if self.tree.has_flags(self.menu, WidgetFlags::VISIBLE) {
            self.tree.invalidate(self.menu);
            self.tree.set_flag(self.menu, WidgetFlags::VISIBLE, false);
        }
    }

    /// `point` relative to the root's origin.
    fn root_local(&self, point: Point) -> Point {
        self.tree.to_local(self.root, point).unwrap_or(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SystemConfig;
    use crate::context::Request;
    use crate::event::{ButtonState, RawEvent};
    use crate::system::testing::{
        Recorder, journal, left, move_to, rect, session, session_with, take,
    };
    use trellis_tree::WidgetDesc;

    fn draggable(name: &str) -> WidgetDesc {
        rect(name, 0.0, 0.0, 50.0, 50.0).with_flags(WidgetFlags::DRAGGABLE)
    }

    #[test]
    fn drag_fires_only_past_the_threshold() {
        let log = journal();
        let mut gui = session();
        let item = gui
            .add_widget(gui.root(), draggable("item"), Recorder::new("item", &log))
            .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        assert!(gui.is_dragging());
        assert!(!gui.is_drag_fired());

        move_to(&mut gui, 18.0, 10.0);
        assert!(!gui.is_drag_fired());

        move_to(&mut gui, 18.5, 10.0);
        assert!(gui.is_drag_fired());
        let ghost = gui.drag_ghost();
        assert!(gui.tree().has_flags(ghost, WidgetFlags::VISIBLE));
        assert_eq!(gui.tree().bounds(ghost), Some(kurbo::Rect::new(8.5, 0.0, 58.5, 50.0)));
        let state = gui.widget::<DragGhost>(ghost).unwrap();
        assert_eq!(state.source(), Some(item));
        assert_eq!(state.offset(), Vec2::new(10.0, 10.0));
        // Over the source itself, the drop falls through to the root.
        assert_eq!(state.target(), Some(gui.root()));
    }

    #[test]
    fn grab_offset_is_local_to_an_offset_source() {
        let log = journal();
        let mut gui = session();
        let desc = rect("item", 10.0, 10.0, 50.0, 50.0).with_flags(WidgetFlags::DRAGGABLE);
        let item = gui
            .add_widget(gui.root(), desc, Recorder::new("item", &log))
            .unwrap();

        move_to(&mut gui, 15.0, 15.0);
        left(&mut gui, ButtonState::Down);
        move_to(&mut gui, 24.0, 15.0);
        assert!(gui.is_drag_fired());

        let ghost = gui.drag_ghost();
        let state = gui.widget::<DragGhost>(ghost).unwrap();
        assert_eq!(state.source(), Some(item));
        assert_eq!(state.offset(), Vec2::new(5.0, 5.0));
        assert_eq!(
            gui.tree().bounds(ghost),
            Some(kurbo::Rect::new(19.0, 10.0, 69.0, 60.0))
        );
    }

    #[test]
    fn moving_ghost_damages_where_it_lands() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), draggable("item"), Recorder::new("item", &log))
            .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        move_to(&mut gui, 30.0, 10.0);
        assert!(gui.is_drag_fired());
        gui.take_damage();

        move_to(&mut gui, 400.0, 400.0);
        let damage = gui.take_damage();
        let landed = kurbo::Rect::new(390.0, 390.0, 440.0, 440.0);
        assert!(damage.nodes.contains(&gui.drag_ghost()));
        assert!(damage.dirty_rects.contains(&kurbo::Rect::new(20.0, 0.0, 70.0, 50.0)));
        assert!(damage.dirty_rects.contains(&landed));
    }

    #[test]
    fn release_before_the_threshold_disarms() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), draggable("item"), Recorder::new("item", &log)).unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        move_to(&mut gui, 12.0, 12.0);
        left(&mut gui, ButtonState::Up);
        assert!(!gui.is_dragging());
        move_to(&mut gui, 40.0, 40.0);
        assert!(!gui.is_drag_fired());
    }

    #[test]
    fn plain_widgets_and_the_root_never_arm() {
        let log = journal();
        let mut gui = session();
        gui
            .add_widget(
                gui.root(),
                rect("plain", 0.0, 0.0, 50.0, 50.0),
                Recorder::new("plain", &log),
            )
            .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        assert!(!gui.is_dragging());
        left(&mut gui, ButtonState::Up);

        move_to(&mut gui, 400.0, 400.0);
        left(&mut gui, ButtonState::Down);
        assert!(!gui.is_dragging());
    }

    #[test]
    fn dropping_on_an_accepting_widget() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), draggable("item"), Recorder::new("item", &log)).unwrap();
        let bin = gui
            .add_widget(
                gui.root(),
                rect("bin", 200.0, 0.0, 100.0, 100.0).with_flags(WidgetFlags::ACCEPTS_DROP),
                Recorder::new("bin", &log).accepting_drops(),
            )
            .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        move_to(&mut gui, 250.0, 50.0);
        assert_eq!(gui.contains_mouse(), Some(bin));
        let target = gui.widget::<DragGhost>(gui.drag_ghost()).and_then(DragGhost::target);
        assert_eq!(target, Some(bin));

        take(&log);
        left(&mut gui, ButtonState::Up);
        assert_eq!(take(&log), ["bin:up", "bin:drop"]);
        assert!(!gui.is_drag_fired());
        assert!(!gui.is_dragging());
        assert!(!gui.tree().has_flags(gui.drag_ghost(), WidgetFlags::VISIBLE));
    }

    #[test]
    fn widgets_without_drop_support_are_skipped() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), draggable("item"), Recorder::new("item", &log)).unwrap();
        gui.add_widget(
            gui.root(),
            rect("wall", 200.0, 0.0, 100.0, 100.0),
            Recorder::new("wall", &log).accepting_drops(),
        )
        .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        move_to(&mut gui, 250.0, 50.0);
        let target = gui.widget::<DragGhost>(gui.drag_ghost()).and_then(DragGhost::target);
        assert_eq!(target, Some(gui.root()));
        take(&log);
        left(&mut gui, ButtonState::Up);
        assert_eq!(take(&log), ["wall:up"]);
        assert!(!gui.is_drag_fired());
    }

    #[test]
    fn frozen_drags_survive_release() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), draggable("item"), Recorder::new("item", &log)).unwrap();

        move_to(&mut gui, 10.0, 10.0);
        left(&mut gui, ButtonState::Down);
        move_to(&mut gui, 100.0, 100.0);
        gui.set_drag_freeze(true);
        left(&mut gui, ButtonState::Up);
        assert!(gui.is_drag_fired());
        assert!(!gui.stop_drag());

        gui.set_drag_freeze(false);
        assert!(gui.stop_drag());
        assert!(!gui.is_drag_fired());
    }

    #[test]
    fn arming_a_drag_releases_the_capture() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(
            gui.root(),
            draggable("item"),
            Recorder::new("item", &log).on("down", |cx| cx.capture_pointer()),
        )
        .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        take(&log);
        left(&mut gui, ButtonState::Down);
        assert_eq!(take(&log), ["item:down", "item:capture+"]);

        move_to(&mut gui, 12.0, 10.0);
        assert_eq!(take(&log), ["item:capture-", "item:move"]);
        assert_eq!(gui.capture(), None);
        assert!(gui.is_dragging());
    }

    #[test]
    fn drag_can_be_started_directly() {
        let log = journal();
        let mut gui = session();
        let item = gui
            .add_widget(gui.root(), draggable("item"), Recorder::new("item", &log))
            .unwrap();
        let plain = gui
            .add_widget(gui.root(), WidgetDesc::new("plain"), Recorder::new("plain", &log))
            .unwrap();

        assert!(!gui.start_drag(plain, Vec2::ZERO));
        assert!(gui.start_drag(item, Vec2::new(5.0, 5.0)));
        assert!(gui.is_drag_fired());
        assert!(gui.stop_drag());
        assert!(!gui.is_drag_fired());
    }

    fn tipped(name: &str) -> WidgetDesc {
        rect(name, 0.0, 0.0, 50.0, 50.0).with_flags(WidgetFlags::HAS_TOOLTIP)
    }

    #[test]
    fn tooltip_shows_after_the_delay() {
        let log = journal();
        let mut gui = session();
        let a = gui.add_widget(gui.root(), tipped("a"), Recorder::new("a", &log)).unwrap();

        move_to(&mut gui, 10.0, 10.0);
        take(&log);
        gui.tick(1.0);
        assert!(take(&log).is_empty());
        gui.tick(1.0);
        assert_eq!(take(&log), ["a:tip+"]);

        let tooltip = gui.tooltip();
        assert!(gui.tree().has_flags(tooltip, WidgetFlags::VISIBLE));
        assert_eq!(gui.widget::<TooltipWidget>(tooltip).and_then(TooltipWidget::owner), Some(a));
        assert_eq!(gui.tree().origin(tooltip), Some(Point::new(10.0, 10.0)));

        move_to(&mut gui, 400.0, 400.0);
        assert_eq!(take(&log), ["a:tip-", "a:leave"]);
        assert!(!gui.tree().has_flags(tooltip, WidgetFlags::VISIBLE));
        assert!(gui.widget::<TooltipWidget>(tooltip).is_some_and(|t| !t.is_shown()));
    }

    #[test]
    fn leaving_early_cancels_the_tooltip() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), tipped("a"), Recorder::new("a", &log)).unwrap();
        gui
            .add_widget(gui.root(), rect("b", 100.0, 0.0, 50.0, 50.0), Recorder::new("b", &log))
            .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        gui.tick(1.5);
        move_to(&mut gui, 110.0, 10.0);
        gui.tick(5.0);
        assert_eq!(take(&log), ["a:enter", "a:move", "a:leave", "b:enter", "b:move"]);
    }

    #[test]
    fn tooltip_lifetime_hides_it() {
        let log = journal();
        let mut gui = session_with(SystemConfig::default().with_tooltip_lifetime(3.0));
        gui.add_widget(gui.root(), tipped("a"), Recorder::new("a", &log)).unwrap();

        move_to(&mut gui, 10.0, 10.0);
        gui.tick(2.0);
        take(&log);
        gui.tick(2.9);
        assert!(take(&log).is_empty());
        gui.tick(0.2);
        assert_eq!(take(&log), ["a:tip-"]);
        assert!(!gui.tree().has_flags(gui.tooltip(), WidgetFlags::VISIBLE));

        // Staying on the widget does not bring it back.
        move_to(&mut gui, 11.0, 10.0);
        gui.tick(10.0);
        assert_eq!(take(&log), ["a:move"]);
    }

    #[test]
    fn short_lifetimes_never_expire() {
        let log = journal();
        let mut gui = session_with(SystemConfig::default().with_tooltip_lifetime(1.0));
        gui.add_widget(gui.root(), tipped("a"), Recorder::new("a", &log)).unwrap();

        move_to(&mut gui, 10.0, 10.0);
        gui.tick(2.0);
        take(&log);
        gui.tick(100.0);
        assert!(take(&log).is_empty());
        assert!(gui.tree().has_flags(gui.tooltip(), WidgetFlags::VISIBLE));
    }

    #[test]
    fn wheel_dismisses_the_tooltip() {
        let log = journal();
        let mut gui = session();
        gui.add_widget(gui.root(), tipped("a"), Recorder::new("a", &log)).unwrap();

        move_to(&mut gui, 10.0, 10.0);
        gui.tick(2.0);
        take(&log);
        gui.handle_event(RawEvent::MouseWheel { delta: 1 });
        assert_eq!(take(&log), ["a:tip-", "a:wheel"]);
    }

    #[test]
    fn widgets_without_tooltips_never_show_one() {
        let log = journal();
        let mut gui = session();
        gui
            .add_widget(gui.root(), rect("a", 0.0, 0.0, 50.0, 50.0), Recorder::new("a", &log))
            .unwrap();

        move_to(&mut gui, 10.0, 10.0);
        gui.tick(10.0);
        assert_eq!(take(&log), ["a:enter", "a:move"]);
        assert!(!gui.tree().has_flags(gui.tooltip(), WidgetFlags::VISIBLE));
    }

    #[test]
    fn deferred_unsubscribe_takes_effect_after_the_tick() {
        let log = journal();
        let mut gui = session();
        let a = gui
            .add_widget(
                gui.root(),
                WidgetDesc::new("a"),
                Recorder::new("a", &log).on("tick", |cx| cx.unsubscribe_tick_deferred()),
            )
            .unwrap();
        let b = gui.add_widget(gui.root(), WidgetDesc::new("b"), Recorder::new("b", &log)).unwrap();
        assert!(gui.subscribe_tick(a));
        assert!(gui.subscribe_tick(b));
        assert!(!gui.subscribe_tick(b));

        gui.tick(0.016);
        assert_eq!(take(&log), ["a:tick", "b:tick"]);
        assert!(!gui.tree().has_flags(a, WidgetFlags::TICK_UNSUBSCRIBE_PENDING));
        gui.tick(0.016);
        assert_eq!(take(&log), ["b:tick"]);
    }

    #[test]
    fn subscriptions_made_during_a_tick_start_next_frame() {
        let log = journal();
        let mut gui = session();
        let c = gui.add_widget(gui.root(), WidgetDesc::new("c"), Recorder::new("c", &log)).unwrap();
        let a = gui
            .add_widget(
                gui.root(),
                WidgetDesc::new("a"),
                Recorder::new("a", &log)
                    .on("tick", move |cx| cx.request(Request::SubscribeTick(c))),
            )
            .unwrap();
        gui.subscribe_tick(a);

        gui.tick(0.016);
        assert_eq!(take(&log), ["a:tick"]);
        gui.tick(0.016);
        assert_eq!(take(&log), ["a:tick", "c:tick"]);
    }

    #[test]
    fn immediate_unsubscribe_is_ignored_during_a_tick() {
        let log = journal();
        let mut gui = session();
        let a = gui
            .add_widget(
                gui.root(),
                WidgetDesc::new("a"),
                Recorder::new("a", &log).on("tick", |cx| cx.unsubscribe_tick()),
            )
            .unwrap();
        gui.subscribe_tick(a);

        gui.tick(0.016);
        gui.tick(0.016);
        assert_eq!(take(&log), ["a:tick", "a:tick"]);

        assert!(gui.unsubscribe_tick(a));
        gui.tick(0.016);
        assert!(take(&log).is_empty());
    }

    #[test]
    fn exclusive_mode_ignores_stale_ids() {
        let log = journal();
        let mut gui = session();
        let a = gui.add_widget(gui.root(), WidgetDesc::new("a"), Recorder::new("a", &log)).unwrap();
        gui.remove_widget(a);

        gui.enter_exclusive_input_mode(Some(a));
        assert_eq!(gui.exclusive(), None);
        gui.enter_exclusive_input_mode(None);
        assert_eq!(gui.exclusive(), None);
        assert!(!gui.subscribe_tick(a));
        assert!(!gui.query_input_focus(Some(a)));
    }
}
