// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in widgets.
//!
//! [`Panel`] is the plain container used for the root and for any node that
//! needs no behavior. The other three are the permanent system widgets every
//! session owns.

mod drag_ghost;
mod menu;
mod tooltip;

pub use drag_ghost::DragGhost;
pub use menu::ContextMenu;
pub use tooltip::TooltipWidget;

use crate::widget::Widget;

/// Name of the session root.
pub const ROOT_NAME: &str = "systemroot";
/// Name of the drag ghost.
pub const DRAG_GHOST_NAME: &str = "systemdrag";
/// Name of the tooltip.
pub const TOOLTIP_NAME: &str = "systemtooltip";
/// Name of the context menu.
pub const MENU_NAME: &str = "systemmenu";

/// A widget with no behavior of its own.
#[derive(Copy, Clone, Debug, Default)]
pub struct Panel;

impl Widget for Panel {}
