// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use trellis_event_state::drag::DEFAULT_DRAG_THRESHOLD;
use trellis_event_state::tooltip::DEFAULT_TOOLTIP_DELAY;

/// Layout loaded into the context menu on every reset.
pub const DEFAULT_MENU_LAYOUT: &str = "base/menu.xml";

/// Tunables for a [`System`](crate::System).
///
/// ```
/// use trellis::SystemConfig;
///
/// let config = SystemConfig::default()
///     .with_drag_threshold(4.0)
///     .with_tooltip_delay(0.5);
/// assert_eq!(config.drag_threshold, 4.0);
/// assert!(config.auto_scale);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SystemConfig {
    /// Pixels the cursor must travel, strictly, before a press becomes a drag.
    pub drag_threshold: f64,
    /// Seconds of hovering before a tooltip appears.
    pub tooltip_delay: f64,
    /// Seconds a tooltip stays up; 1.0 or less means until the pointer leaves.
    pub tooltip_lifetime: f64,
    /// Whether the renderer scales the GUI to the viewport.
    ///
    /// When disabled, viewport resizes resize the root widget instead.
    pub auto_scale: bool,
    /// Layout installed into the context menu on reset, if any.
    pub menu_layout: Option<String>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            tooltip_delay: DEFAULT_TOOLTIP_DELAY,
            tooltip_lifetime: 0.0,
            auto_scale: true,
            menu_layout: Some(DEFAULT_MENU_LAYOUT.to_owned()),
        }
    }
}

impl SystemConfig {
    /// Set the drag threshold.
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the tooltip delay.
    pub fn with_tooltip_delay(mut self, delay: f64) -> Self {
        self.tooltip_delay = delay;
        self
    }

    /// Set the tooltip lifetime.
    pub fn with_tooltip_lifetime(mut self, lifetime: f64) -> Self {
        self.tooltip_lifetime = lifetime;
        self
    }

    /// Enable or disable auto-scaling.
    pub fn with_auto_scale(mut self, auto_scale: bool) -> Self {
        self.auto_scale = auto_scale;
        self
    }

    /// Set (or clear) the context-menu layout.
    pub fn with_menu_layout(mut self, layout: Option<impl Into<String>>) -> Self {
        self.menu_layout = layout.map(Into::into);
        self
    }
}
