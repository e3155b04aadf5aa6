// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trellis_tree::NodeId;

use crate::widget::Widget;

/// The shared tooltip popup.
///
/// The session shows it for the hovered widget once the hover delay elapses;
/// the owner fills in content from its `on_tooltip_show` callback.
#[derive(Clone, Debug, Default)]
pub struct TooltipWidget {
    owner: Option<NodeId>,
}

impl TooltipWidget {
    /// Widget whose tooltip is up.
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    /// Returns `true` while showing a tooltip.
    pub fn is_shown(&self) -> bool {
        self.owner.is_some()
    }

    pub(crate) fn show(&mut self, owner: NodeId) {
        self.owner = Some(owner);
    }

    pub(crate) fn reset(&mut self) {
        self.owner = None;
    }
}

impl Widget for TooltipWidget {}
