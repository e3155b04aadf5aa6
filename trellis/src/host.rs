// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators supplied by the host application.
//!
//! The session never renders, parses markup, or runs scripts itself. It talks
//! to the renderer through [`Viewport`], builds widgets through
//! [`WidgetFactory`], and forwards script execution to [`ScriptHost`].

use kurbo::{Point, Size};
use trellis_tree::WidgetDesc;

use crate::error::LoadError;
use crate::widget::Widget;

/// The renderer's view of the screen.
pub trait Viewport {
    /// Size of the GUI area, after scaling.
    fn size(&self) -> Size;

    /// Size of the physical viewport.
    fn viewport_size(&self) -> Size;

    /// Move the rendered cursor.
    fn set_cursor_position(&mut self, _position: Point) {}

    /// Turn renderer-side scaling on or off.
    fn set_auto_scale(&mut self, _auto_scale: bool) {}
}

/// A viewport with fixed sizes, for hosts without a renderer and for tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedViewport {
    /// Reported GUI size.
    pub size: Size,
    /// Reported physical viewport size.
    pub viewport_size: Size,
    /// Last cursor position pushed by the session.
    pub cursor: Point,
    /// Last auto-scale setting pushed by the session.
    pub auto_scale: bool,
}

impl FixedViewport {
    /// A viewport whose GUI and physical sizes are both `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            viewport_size: size,
            cursor: Point::ZERO,
            auto_scale: true,
        }
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> Size {
        self.size
    }

    fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    fn set_cursor_position(&mut self, position: Point) {
        self.cursor = position;
    }

    fn set_auto_scale(&mut self, auto_scale: bool) {
        self.auto_scale = auto_scale;
    }
}

/// A widget ready to be installed: its tree description, its behavior, and its children.
#[derive(Debug)]
pub struct WidgetTemplate {
    /// Name, geometry, and flags.
    pub desc: WidgetDesc,
    /// Callbacks.
    pub widget: Box<dyn Widget>,
    /// Children, back to front.
    pub children: Vec<WidgetTemplate>,
}

impl WidgetTemplate {
    /// A template without children.
    pub fn new(desc: WidgetDesc, widget: impl Widget) -> Self {
        Self {
            desc,
            widget: Box::new(widget),
            children: Vec::new(),
        }
    }

    /// Append a child on top of the existing ones.
    pub fn with_child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// Builds widgets by kind and loads layouts.
pub trait WidgetFactory {
    /// Build a single widget of `kind` named `name`.
    fn create(&mut self, kind: &str, name: &str) -> Option<WidgetTemplate>;

    /// Load a layout file into a template tree.
    fn load(&mut self, path: &str) -> Result<WidgetTemplate, LoadError>;
}

/// A factory that knows no widgets and no layouts.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoFactory;

impl WidgetFactory for NoFactory {
    fn create(&mut self, _kind: &str, _name: &str) -> Option<WidgetTemplate> {
        None
    }

    fn load(&mut self, path: &str) -> Result<WidgetTemplate, LoadError> {
        Err(LoadError::NotFound(path.to_owned()))
    }
}

/// Scripting binding.
pub trait ScriptHost {
    /// Run a script file, reporting the interpreter's error message on failure.
    fn execute_file(&mut self, path: &str) -> Result<(), String>;
}
