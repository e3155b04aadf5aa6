// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use trellis_tree::NodeId;

use crate::widget::Widget;

/// The session's context menu.
///
/// Its entries come from the configured menu layout. Any click outside the
/// menu closes it.
#[derive(Clone, Debug, Default)]
pub struct ContextMenu {
    owner: Option<NodeId>,
    open: bool,
}

impl ContextMenu {
    /// Returns `true` while the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Widget the menu was opened for.
    pub fn owner(&self) -> Option<NodeId> {
        self.owner
    }

    pub(crate) fn open(&mut self, owner: Option<NodeId>) {
        self.owner = owner;
        self.open = true;
    }

    pub(crate) fn reset(&mut self) {
        self.owner = None;
        self.open = false;
    }
}

impl Widget for ContextMenu {}
