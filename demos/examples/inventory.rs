// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted inventory screen driven through a Trellis session.
//!
//! Replays a short sequence of host input against a small widget tree:
//! - a text field that takes focus on click and collects typed characters,
//! - an item that shows a tooltip and can be dragged into a bag slot,
//! - a pulsing indicator that ticks a fixed number of frames.
//!
//! Run:
//! - `cargo run -p trellis_demos --example inventory`
//! - `RUST_LOG=trellis=trace cargo run -p trellis_demos --example inventory`

use kurbo::{Point, Size};
use tracing_subscriber::EnvFilter;
use trellis::host::{FixedViewport, NoFactory};
use trellis::widgets::Panel;
use trellis::{
    ButtonState, EventCx, Key, MouseButton, NodeId, RawEvent, System, SystemConfig, Widget,
    WidgetDesc, WidgetFlags,
};

#[derive(Debug, Default)]
struct TextField {
    text: String,
}

impl Widget for TextField {
    fn on_char(&mut self, _cx: &mut EventCx<'_>, ch: char) -> bool {
        self.text.push(ch);
        true
    }

    fn on_keyboard_button(&mut self, cx: &mut EventCx<'_>, key: Key, state: ButtonState) -> bool {
        if key == Key::Escape && state.is_down() {
            cx.resign_focus();
            return true;
        }
        false
    }
}

#[derive(Debug)]
struct Item {
    label: &'static str,
}

impl Widget for Item {
    fn on_tooltip_show(&mut self, _cx: &mut EventCx<'_>) {
        println!("  tooltip: {}", self.label);
    }
}

#[derive(Debug, Default)]
struct BagSlot {
    contents: Option<NodeId>,
}

impl Widget for BagSlot {
    fn on_drop(&mut self, cx: &mut EventCx<'_>, source: NodeId) -> bool {
        if self.contents.is_some() {
            return false;
        }
        self.contents = Some(source);
        cx.invalidate();
        true
    }
}

#[derive(Debug, Default)]
struct Pulse {
    frames: u32,
}

impl Widget for Pulse {
    fn on_tick(&mut self, cx: &mut EventCx<'_>, _delta: f64) {
        self.frames += 1;
        if self.frames == 3 {
            cx.unsubscribe_tick_deferred();
        }
    }
}

fn at(name: &str, x: f64, y: f64, w: f64, h: f64) -> WidgetDesc {
    WidgetDesc::new(name).at(Point::new(x, y), Size::new(w, h))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trellis=debug")),
        )
        .init();

    let viewport = FixedViewport::new(Size::new(800.0, 600.0));
    let config = SystemConfig::default().with_tooltip_delay(0.5);
    let mut gui = System::new(viewport, NoFactory, config).expect("system widgets");
    let root = gui.root();

    let window = gui.add_widget(root, at("inventory", 100.0, 100.0, 400.0, 300.0), Panel).unwrap();
    let field = gui
        .add_widget(
            window,
            at("search", 10.0, 10.0, 200.0, 24.0).with_flags(WidgetFlags::TAB_STOP),
            TextField::default(),
        )
        .unwrap();
    let sword = gui
        .add_widget(
            window,
            at("sword", 10.0, 50.0, 40.0, 40.0)
                .with_flags(WidgetFlags::DRAGGABLE | WidgetFlags::HAS_TOOLTIP),
            Item { label: "Rusty sword" },
        )
        .unwrap();
    let slot = gui
        .add_widget(
            window,
            at("bag", 300.0, 50.0, 40.0, 40.0).with_flags(WidgetFlags::ACCEPTS_DROP),
            BagSlot::default(),
        )
        .unwrap();
    let pulse = gui
        .add_widget(window, at("pulse", 380.0, 10.0, 10.0, 10.0), Pulse::default())
        .unwrap();
    gui.subscribe_tick(pulse);
    gui.init();

    let left = |state| RawEvent::MouseButton { button: MouseButton::Left, state };

    println!("typing into the search field");
    gui.handle_event(RawEvent::MouseMove { x: 120.0, y: 120.0 });
    gui.handle_event(left(ButtonState::Down));
    gui.handle_event(left(ButtonState::Up));
    for ch in "sword".chars() {
        gui.handle_event(RawEvent::Char { code: ch.into() });
    }
    gui.handle_event(RawEvent::Keyboard { key: Key::Escape, state: ButtonState::Down });
    println!(
        "  text = {:?}, focus = {:?}",
        gui.widget::<TextField>(field).map(|f| f.text.as_str()),
        gui.focus()
    );

    println!("hovering the sword");
    gui.handle_event(RawEvent::MouseMove { x: 125.0, y: 165.0 });
    for _ in 0..4 {
        gui.tick(1.0 / 6.0);
    }

    println!("dragging the sword into the bag");
    gui.handle_event(left(ButtonState::Down));
    gui.handle_event(RawEvent::MouseMove { x: 200.0, y: 165.0 });
    println!("  drag fired = {}", gui.is_drag_fired());
    gui.handle_event(RawEvent::MouseMove { x: 415.0, y: 165.0 });
    gui.handle_event(left(ButtonState::Up));
    println!(
        "  bag holds sword = {}",
        gui.widget::<BagSlot>(slot).and_then(|s| s.contents) == Some(sword)
    );

    for _ in 0..5 {
        gui.tick(1.0 / 60.0);
    }
    println!(
        "pulse ticked {} frames",
        gui.widget::<Pulse>(pulse).map_or(0, |p| p.frames)
    );

    if let Some(damage) = gui.take_damage().union_rect() {
        println!("repaint {damage:?}");
    }
}
