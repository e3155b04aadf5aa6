// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tooltip timing.
//!
//! The timer is armed when the pointer enters a widget that has a tooltip and
//! disarmed by any pointer button, wheel, or containment change. Time only
//! advances through [`TooltipTimer::advance`], which the owner calls once per
//! frame and which reports when to show or hide.

/// Default hover time before a tooltip appears, in seconds.
pub const DEFAULT_TOOLTIP_DELAY: f64 = 2.0;

/// What the owner should do after [`TooltipTimer::advance`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TooltipTransition {
    /// Nothing changed.
    None,
    /// The delay elapsed; show the tooltip.
    Show,
    /// The lifetime elapsed; hide the tooltip.
    Hide,
}

/// Hidden → Armed → Shown → Hidden.
#[derive(Clone, Debug)]
pub struct TooltipTimer {
    armed: bool,
    shown: bool,
    elapsed: f64,
    /// Seconds of hovering before [`TooltipTransition::Show`].
    pub delay: f64,
    /// Seconds a shown tooltip stays up. Values of 1.0 or less never expire.
    pub lifetime: f64,
}

impl Default for TooltipTimer {
    fn default() -> Self {
        Self::with_timing(DEFAULT_TOOLTIP_DELAY, 0.0)
    }
}

impl TooltipTimer {
    /// A disarmed timer with the default delay and no expiry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A disarmed timer with explicit delay and lifetime.
    pub fn with_timing(delay: f64, lifetime: f64) -> Self {
        Self {
            armed: false,
            shown: false,
            elapsed: 0.0,
            delay,
            lifetime,
        }
    }

    /// Start counting towards the show delay.
    pub fn arm(&mut self) {
        self.armed = true;
        self.elapsed = 0.0;
    }

    /// Stop counting and hide.
    ///
    /// Returns `true` if the tooltip was shown, so the owner knows whether a
    /// hide notification is due.
    pub fn disarm(&mut self) -> bool {
        let was_shown = self.shown;
        self.armed = false;
        self.shown = false;
        self.elapsed = 0.0;
        was_shown
    }

    /// Advance the clock by `delta` seconds.
    ///
    /// The lifetime clock starts from zero on the frame the tooltip is shown.
    pub fn advance(&mut self, delta: f64) -> TooltipTransition {
        if self.armed {
            self.elapsed += delta;
            if self.elapsed >= self.delay {
                self.armed = false;
                self.shown = true;
                self.elapsed = 0.0;
                return TooltipTransition::Show;
            }
        }
        if self.shown && self.lifetime > 1.0 {
            self.elapsed += delta;
            if self.elapsed >= self.lifetime {
                self.shown = false;
                self.elapsed = 0.0;
                return TooltipTransition::Hide;
            }
        }
        TooltipTransition::None
    }

    /// Returns `true` while counting towards the delay.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Returns `true` while the tooltip is up.
    pub fn is_shown(&self) -> bool {
        self.shown
    }
}
