// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The GUI session: one widget tree plus all interaction state.

mod dispatch;
mod interaction;
#[cfg(test)]
mod testing;

use std::collections::VecDeque;
use std::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect, Size};
use tracing::{debug, error, info, warn};
use trellis_event_state::drag::DragState;
use trellis_event_state::modifiers::Modifiers;
use trellis_event_state::tick::TickRegistry;
use trellis_event_state::tooltip::TooltipTimer;
use trellis_focus::InputSlots;
use trellis_responder::hover::Hover;
use trellis_tree::{Damage, NodeId, Tree, WidgetDesc, WidgetFlags};

use crate::config::SystemConfig;
use crate::context::Request;
use crate::error::{Result, SystemError};
use crate::host::{ScriptHost, Viewport, WidgetFactory, WidgetTemplate};
use crate::widget::{Widget, downcast_mut, downcast_ref};
use crate::widgets::{
    ContextMenu, DRAG_GHOST_NAME, DragGhost, MENU_NAME, Panel, ROOT_NAME, TOOLTIP_NAME,
    TooltipWidget,
};

/// Ids of the root and the permanent system widgets.
#[derive(Copy, Clone, Debug)]
struct SystemNodes {
    root: NodeId,
    drag_ghost: NodeId,
    tooltip: NodeId,
    menu: NodeId,
}

/// A GUI session.
///
/// Owns the widget tree, each widget's behavior, and every piece of
/// interaction state: focus, capture, exclusive input, hover, the drag
/// gesture, the tooltip timer, held system keys, and tick subscriptions.
///
/// Feed host input through [`System::handle_event`] and call
/// [`System::tick`] once per frame.
///
/// ```
/// use kurbo::{Point, Size};
/// use trellis::host::{FixedViewport, NoFactory};
/// use trellis::widgets::Panel;
/// use trellis::{RawEvent, System, SystemConfig, WidgetDesc};
///
/// let viewport = FixedViewport::new(Size::new(640.0, 480.0));
/// let mut gui = System::new(viewport, NoFactory, SystemConfig::default()).unwrap();
/// let panel = gui
///     .add_widget(
///         gui.root(),
///         WidgetDesc::new("panel").at(Point::new(10.0, 10.0), Size::new(100.0, 50.0)),
///         Panel,
///     )
///     .unwrap();
///
/// gui.handle_event(RawEvent::MouseMove { x: 20.0, y: 20.0 });
/// assert_eq!(gui.contains_mouse(), Some(panel));
/// assert!(gui.is_mouse_in_gui());
/// ```
pub struct System {
    tree: Tree,
    widgets: HashMap<NodeId, Box<dyn Widget>>,
    root: NodeId,
    drag_ghost: NodeId,
    tooltip: NodeId,
    menu: NodeId,
    slots: InputSlots<NodeId>,
    hover: Hover<NodeId>,
    drag: DragState<NodeId>,
    tooltip_timer: TooltipTimer,
    ticks: TickRegistry<NodeId>,
    modifiers: Modifiers,
    cursor: Point,
    config: SystemConfig,
    requests: VecDeque<Request>,
    applying: bool,
    viewport: Box<dyn Viewport>,
    factory: Box<dyn WidgetFactory>,
    scripts: Option<Box<dyn ScriptHost>>,
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("System")
            .field("tree", &self.tree)
            .field("root", &self.root)
            .field("slots", &self.slots)
            .field("hover", &self.hover)
            .field("drag", &self.drag)
            .field("tooltip_timer", &self.tooltip_timer)
            .field("ticks", &self.ticks)
            .field("modifiers", &self.modifiers)
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl System {
    /// Start a session and build the initial tree.
    ///
    /// Fails only if a permanent system widget cannot be created.
    pub fn new(
        viewport: impl Viewport + 'static,
        factory: impl WidgetFactory + 'static,
        config: SystemConfig,
    ) -> Result<Self> {
        info!(target: "trellis::system", "GUI system initialization started");
        let mut viewport: Box<dyn Viewport> = Box::new(viewport);
        viewport.set_auto_scale(config.auto_scale);
        let mut tree = Tree::new();
        let mut widgets = HashMap::new();
        let nodes = install_system_widgets(&mut tree, &mut widgets, viewport.size())?;
        let mut system = Self {
            tree,
            widgets,
            root: nodes.root,
            drag_ghost: nodes.drag_ghost,
            tooltip: nodes.tooltip,
            menu: nodes.menu,
            slots: InputSlots::new(),
            hover: Hover::new(),
            drag: DragState::with_threshold(config.drag_threshold),
            tooltip_timer: TooltipTimer::with_timing(config.tooltip_delay, config.tooltip_lifetime),
            ticks: TickRegistry::new(),
            modifiers: Modifiers::empty(),
            cursor: Point::ZERO,
            config,
            requests: VecDeque::new(),
            applying: false,
            viewport,
            factory: Box::new(factory),
            scripts: None,
        };
        info!(target: "trellis::system", "GUI system initialization ended");
        system.load_menu_layout();
        info!(target: "trellis::system", "GUI subsystem is ready");
        Ok(system)
    }

    /// Attach a scripting binding.
    pub fn set_script_host(&mut self, host: impl ScriptHost + 'static) {
        self.scripts = Some(Box::new(host));
    }

    /// Rebuild the tree from scratch and clear all interaction state.
    ///
    /// Every previously issued [`NodeId`] becomes stale. Held system keys and
    /// the cursor position survive.
    pub fn reset(&mut self) -> Result<()> {
        info!(target: "trellis::system", "resetting widget tree");
        self.tree.clear();
        self.widgets.clear();
        self.ticks.clear();
        self.slots.clear();
        self.hover.clear();
        self.drag.reset();
        self.tooltip_timer.disarm();
        self.requests.clear();
        let size = self.viewport.size();
        let nodes = install_system_widgets(&mut self.tree, &mut self.widgets, size)?;
        self.root = nodes.root;
        self.drag_ghost = nodes.drag_ghost;
        self.tooltip = nodes.tooltip;
        self.menu = nodes.menu;
        self.load_menu_layout();
        info!(target: "trellis::system", "GUI subsystem is ready");
        Ok(())
    }

    /// Send `"On_Init"` to the root widget.
    pub fn init(&mut self) -> bool {
        self.send_game_event(self.root, "On_Init")
    }

    /// Deliver a named game event to one widget.
    pub fn send_game_event(&mut self, widget: NodeId, name: &str) -> bool {
        self.call(widget, |w, cx| w.on_game_event(cx, name))
            .unwrap_or(false)
    }

    /// Run a script file through the attached script host.
    ///
    /// Failures are logged, not returned.
    pub fn execute_script(&mut self, path: &str) -> bool {
        let Some(host) = self.scripts.as_mut() else {
            error!(target: "trellis::script", path, "no script host attached");
            return false;
        };
        match host.execute_file(path) {
            Ok(()) => true,
            Err(message) => {
                error!(target: "trellis::script", path, %message, "unable to execute script");
                false
            }
        }
    }

    /// Insert a widget as the topmost child of `parent`.
    pub fn add_widget(
        &mut self,
        parent: NodeId,
        desc: WidgetDesc,
        widget: impl Widget,
    ) -> Result<NodeId> {
        self.install(parent, WidgetTemplate::new(desc, widget))
    }

    /// Insert a template tree as the topmost child of `parent`.
    ///
    /// Nothing is left behind if any node of the template is rejected.
    pub fn install(&mut self, parent: NodeId, template: WidgetTemplate) -> Result<NodeId> {
        let WidgetTemplate {
            desc,
            widget,
            children,
        } = template;
        let id = self.tree.insert_child(parent, desc)?;
        self.widgets.insert(id, widget);
        for child in children {
            if let Err(err) = self.install(id, child) {
                self.remove_subtree(id);
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Ask the factory for a widget of `kind` and add it under `parent`.
    ///
    /// Returns `None` if the factory does not know `kind` or the widget cannot
    /// be placed.
    pub fn create_widget(&mut self, parent: NodeId, name: &str, kind: &str) -> Option<NodeId> {
        if !self.tree.is_alive(parent) {
            return None;
        }
        let Some(template) = self.factory.create(kind, name) else {
            debug!(target: "trellis::system", name, kind, "factory has no such widget kind");
            return None;
        };
        match self.install(parent, template) {
            Ok(id) => Some(id),
            Err(err) => {
                warn!(target: "trellis::system", name, kind, %err, "couldn't add widget");
                None
            }
        }
    }

    /// Load a layout through the factory and add it under `parent`.
    ///
    /// Load failures are logged as warnings and yield `None`.
    pub fn load_layout(&mut self, parent: NodeId, path: &str) -> Option<NodeId> {
        info!(target: "trellis::system", path, "loading layout");
        let template = match self.factory.load(path) {
            Ok(template) => template,
            Err(err) => {
                warn!(target: "trellis::system", path, %err, "layout failed to load");
                return None;
            }
        };
        match self.install(parent, template) {
            Ok(id) => {
                info!(target: "trellis::system", path, "layout successfully loaded");
                Some(id)
            }
            Err(err) => {
                warn!(target: "trellis::system", path, %err, "layout failed to load");
                None
            }
        }
    }

    /// Remove a widget and its subtree.
    ///
    /// Focus, capture, exclusive input, hover, tick subscriptions, and a drag
    /// referring to removed widgets are dropped silently. The root and the
    /// system widgets cannot be removed; returns `false` for them and for
    /// stale ids.
    pub fn remove_widget(&mut self, id: NodeId) -> bool {
        if self.is_permanent(id) || !self.tree.is_alive(id) {
            return false;
        }
        self.remove_subtree(id);
        true
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let removed = self.tree.remove(id);
        if removed.is_empty() {
            return;
        }
        for node in &removed {
            self.widgets.remove(node);
        }
        let tree = &self.tree;
        let dead = |n: NodeId| !tree.is_alive(n);
        self.slots.clear_if(dead);
        self.hover.clear_if(dead);
        self.ticks.forget(dead);
        let drag_lost = self.drag.source().is_some_and(dead);
        let tooltip_lost = self
            .system_widget::<TooltipWidget>(self.tooltip)
            .and_then(TooltipWidget::owner)
            .is_some_and(dead);

        if tooltip_lost || (self.hover.current().is_none() && self.tooltip_timer.is_armed()) {
            self.tooltip_timer.disarm();
            self.hide_tooltip(false);
        }
        if drag_lost {
            self.drag.reset();
            if let Some(ghost) = self.system_widget_mut::<DragGhost>(self.drag_ghost) {
                ghost.reset();
            }
            self.tree.set_flag(self.drag_ghost, WidgetFlags::VISIBLE, false);
        }
        debug!(target: "trellis::system", count = removed.len(), "removed widgets");
    }

    fn is_permanent(&self, id: NodeId) -> bool {
        [self.root, self.drag_ghost, self.tooltip, self.menu].contains(&id)
    }

    fn load_menu_layout(&mut self) {
        if let Some(path) = self.config.menu_layout.clone() {
            self.load_layout(self.menu, &path);
        }
    }

    /// Look a widget up by name anywhere below the root.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.tree.find(self.root, name)
    }

    /// The topmost hittable widget at `point`, if any.
    pub fn target_at(&self, point: Point) -> Option<NodeId> {
        let widgets = &self.widgets;
        self.tree
            .resolve_target_with(self.root, point, |id, pt, bounds| match widgets.get(&id) {
                Some(widget) => widget.hit_test(pt, bounds),
                None => bounds.contains(pt),
            })
    }

    /// Behavior of a widget, downcast to its concrete type.
    pub fn widget<T: Widget>(&self, id: NodeId) -> Option<&T> {
        self.system_widget(id)
    }

    /// Mutable behavior of a widget, downcast to its concrete type.
    pub fn widget_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.system_widget_mut(id)
    }

    fn system_widget<T: Widget>(&self, id: NodeId) -> Option<&T> {
        self.widgets.get(&id).and_then(|w| downcast_ref::<T>(w.as_ref()))
    }

    fn system_widget_mut<T: Widget>(&mut self, id: NodeId) -> Option<&mut T> {
        self.widgets
            .get_mut(&id)
            .and_then(|w| downcast_mut::<T>(w.as_mut()))
    }

    /// The widget tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Set or clear flags on a widget, scheduling a repaint.
    pub fn set_flag(&mut self, id: NodeId, flags: WidgetFlags, on: bool) {
        self.tree.set_flag(id, flags, on);
        self.tree.invalidate(id);
    }

    /// Move or resize a widget (parent-relative), scheduling repaints.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        self.tree.invalidate(id);
        self.tree.set_bounds(id, bounds);
        self.tree.invalidate(id);
    }

    /// Drain repaint damage.
    pub fn take_damage(&mut self) -> Damage {
        self.tree.take_damage()
    }

    /// The session root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The drag ghost node.
    pub fn drag_ghost(&self) -> NodeId {
        self.drag_ghost
    }

    /// The tooltip node.
    pub fn tooltip(&self) -> NodeId {
        self.tooltip
    }

    /// The context menu node.
    pub fn menu(&self) -> NodeId {
        self.menu
    }

    /// Keyboard focus holder.
    pub fn focus(&self) -> Option<NodeId> {
        self.live(self.slots.focus())
    }

    /// Pointer capture holder.
    pub fn capture(&self) -> Option<NodeId> {
        self.live(self.slots.capture())
    }

    /// Exclusive-input widget.
    pub fn exclusive(&self) -> Option<NodeId> {
        self.live(self.slots.exclusive())
    }

    /// The widget containing the mouse.
    pub fn contains_mouse(&self) -> Option<NodeId> {
        self.live(self.hover.current())
    }

    /// Returns `true` while a press is armed for dragging or a drag runs.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_armed()
    }

    /// Returns `true` once a drag has started.
    pub fn is_drag_fired(&self) -> bool {
        self.drag.is_fired()
    }

    /// Returns `true` if any of `keys` is held.
    pub fn is_sys_key_pressed(&self, keys: Modifiers) -> bool {
        self.modifiers.intersects(keys)
    }

    /// Held system keys.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Last cursor position.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Returns `true` if the mouse is over some widget other than the root.
    pub fn is_mouse_in_gui(&self) -> bool {
        self.contains_mouse().is_some_and(|w| w != self.root)
    }

    /// Returns `true` if `point` would land on a widget, or if exclusive
    /// input mode swallows everything anyway.
    pub fn is_mouse_in_gui_at(&self, point: Point) -> bool {
        if self.exclusive().is_some() {
            return true;
        }
        self.target_at(point).is_some_and(|w| w != self.root)
    }

    /// Active configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Change the hover delay.
    pub fn set_tooltip_delay(&mut self, delay: f64) {
        self.config.tooltip_delay = delay;
        self.tooltip_timer.delay = delay;
    }

    /// Change how long tooltips stay up.
    pub fn set_tooltip_lifetime(&mut self, lifetime: f64) {
        self.config.tooltip_lifetime = lifetime;
        self.tooltip_timer.lifetime = lifetime;
    }

    /// Change the drag threshold.
    pub fn set_drag_threshold(&mut self, threshold: f64) {
        self.config.drag_threshold = threshold;
        self.drag.threshold = threshold;
    }

    /// Turn renderer scaling on or off and refit the root.
    pub fn set_auto_scale(&mut self, auto_scale: bool) {
        self.config.auto_scale = auto_scale;
        self.viewport.set_auto_scale(auto_scale);
        let size = self.viewport.size();
        self.tree.set_size(self.root, size);
        self.call(self.root, |w, cx| w.on_sized(cx, true));
    }

    /// Resize the root.
    pub fn update_size(&mut self, size: Size) {
        self.tree.set_size(self.root, size);
        self.call(self.root, |w, cx| w.on_sized(cx, false));
    }

    fn live(&self, id: Option<NodeId>) -> Option<NodeId> {
        id.filter(|&n| self.tree.is_alive(n))
    }
}

fn install_system_widgets(
    tree: &mut Tree,
    widgets: &mut HashMap<NodeId, Box<dyn Widget>>,
    size: Size,
) -> Result<SystemNodes> {
    let root = tree.insert(
        WidgetDesc::new(ROOT_NAME)
            .at(Point::ZERO, size)
            .with_flags(WidgetFlags::ACCEPTS_DROP),
    );
    widgets.insert(root, Box::new(Panel));
    let drag_ghost = install_permanent(tree, widgets, root, DRAG_GHOST_NAME, DragGhost::default())?;
    let tooltip = install_permanent(tree, widgets, root, TOOLTIP_NAME, TooltipWidget::default())?;
    let menu = install_permanent(tree, widgets, root, MENU_NAME, ContextMenu::default())?;
    Ok(SystemNodes {
        root,
        drag_ghost,
        tooltip,
        menu,
    })
}

/// Permanent widgets start hidden.
fn install_permanent(
    tree: &mut Tree,
    widgets: &mut HashMap<NodeId, Box<dyn Widget>>,
    root: NodeId,
    name: &'static str,
    widget: impl Widget,
) -> Result<NodeId> {
    let id = tree
        .insert_child(root, WidgetDesc::new(name).flags(WidgetFlags::ENABLED))
        .map_err(|source| SystemError::Construction {
            widget: name,
            source,
        })?;
    widgets.insert(id, Box::new(widget));
    Ok(id)
}
