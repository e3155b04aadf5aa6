// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The context handed to widget callbacks.
//!
//! Callbacks can read the tree and the input state, but every state change
//! they want goes through a request queue. The session applies queued
//! requests in order once the callback has returned, so a widget can never
//! re-enter event handling or observe a half-applied transition.

use std::collections::VecDeque;

use kurbo::Point;
use trellis_event_state::modifiers::Modifiers;
use trellis_focus::InputSlots;
use trellis_tree::{NodeId, Tree};

/// A state change queued by a widget callback.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Request {
    /// Move keyboard focus (`None` clears it).
    Focus(Option<NodeId>),
    /// Move input capture (`None` releases it).
    Capture(Option<NodeId>),
    /// Route all input to this widget.
    EnterExclusive(NodeId),
    /// Leave exclusive-input mode.
    LeaveExclusive,
    /// Start receiving `on_tick`.
    SubscribeTick(NodeId),
    /// Stop receiving `on_tick`; ignored during a tick.
    UnsubscribeTick(NodeId),
    /// Leave the tick list at the end of the current (or next) tick.
    MarkTickUnsubscribe(NodeId),
    /// End the running drag.
    StopDrag,
    /// Freeze or thaw the running drag.
    FreezeDrag(bool),
    /// Schedule a repaint of this widget.
    Invalidate(NodeId),
    /// Move this widget to the front of its siblings.
    Rise(NodeId),
}

/// Read access plus a request queue, for the duration of one callback.
#[derive(Debug)]
pub struct EventCx<'a> {
    pub(crate) node: NodeId,
    pub(crate) tree: &'a Tree,
    pub(crate) slots: &'a InputSlots<NodeId>,
    pub(crate) cursor: Point,
    pub(crate) modifiers: Modifiers,
    pub(crate) requests: &'a mut VecDeque<Request>,
}

impl EventCx<'_> {
    /// The widget receiving the callback.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The widget tree.
    pub fn tree(&self) -> &Tree {
        self.tree
    }

    /// Cursor position in GUI space.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Cursor position in this widget's local space.
    pub fn local_cursor(&self) -> Option<Point> {
        self.tree.to_local(self.node, self.cursor)
    }

    /// Held system keys.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Current focus holder.
    pub fn focus(&self) -> Option<NodeId> {
        self.slots.focus()
    }

    /// Returns `true` if this widget has keyboard focus.
    pub fn has_focus(&self) -> bool {
        self.slots.focus() == Some(self.node)
    }

    /// Current capture holder.
    pub fn capture(&self) -> Option<NodeId> {
        self.slots.capture()
    }

    /// Queue an arbitrary request.
    pub fn request(&mut self, request: Request) {
        self.requests.push_back(request);
    }

    /// Take keyboard focus.
    pub fn request_focus(&mut self) {
        self.request(Request::Focus(Some(self.node)));
    }

    /// Drop keyboard focus if this widget holds it.
    pub fn resign_focus(&mut self) {
        if self.has_focus() {
            self.request(Request::Focus(None));
        }
    }

    /// Capture all pointer input.
    pub fn capture_pointer(&mut self) {
        self.request(Request::Capture(Some(self.node)));
    }

    /// Release the pointer if this widget captured it.
    pub fn release_pointer(&mut self) {
        if self.slots.capture() == Some(self.node) {
            self.request(Request::Capture(None));
        }
    }

    /// Route all input to this widget.
    pub fn enter_exclusive(&mut self) {
        self.request(Request::EnterExclusive(self.node));
    }

    /// Leave exclusive-input mode.
    pub fn leave_exclusive(&mut self) {
        self.request(Request::LeaveExclusive);
    }

    /// Start receiving `on_tick`.
    pub fn subscribe_tick(&mut self) {
        self.request(Request::SubscribeTick(self.node));
    }

    /// Stop receiving `on_tick` immediately. Ignored while a tick is running;
    /// use [`EventCx::unsubscribe_tick_deferred`] from inside `on_tick`.
    pub fn unsubscribe_tick(&mut self) {
        self.request(Request::UnsubscribeTick(self.node));
    }

    /// Stop receiving `on_tick` once the current tick completes.
    pub fn unsubscribe_tick_deferred(&mut self) {
        self.request(Request::MarkTickUnsubscribe(self.node));
    }

    /// End the running drag.
    pub fn stop_drag(&mut self) {
        self.request(Request::StopDrag);
    }

    /// Freeze or thaw the running drag.
    pub fn freeze_drag(&mut self, frozen: bool) {
        self.request(Request::FreezeDrag(frozen));
    }

    /// Schedule a repaint of this widget.
    pub fn invalidate(&mut self) {
        self.request(Request::Invalidate(self.node));
    }

    /// Move this widget to the front of its siblings.
    pub fn rise(&mut self) {
        self.request(Request::Rise(self.node));
    }
}
