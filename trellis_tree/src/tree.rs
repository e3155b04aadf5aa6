// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, z-order, geometry, traversal.

use alloc::{string::String, vec, vec::Vec};
use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::damage::Damage;
use crate::error::TreeError;
use crate::types::{NodeId, WidgetDesc, WidgetFlags};

/// Root→node path buffer; most widget trees are shallow.
pub type NodePath = SmallVec<[NodeId; 8]>;

/// Ownership hierarchy of widgets.
///
/// Each node owns an ordered list of children. The order is the z-order: the
/// last child is the topmost one (hit-tested first, drawn last), the first child
/// is drawn first. Parents are tracked as plain [`NodeId`] back-links and never
/// keep anything alive.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use trellis_tree::{Tree, WidgetDesc};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(WidgetDesc::new("root").with_bounds(Rect::new(0.0, 0.0, 100.0, 100.0)));
/// let a = tree
///     .insert_child(root, WidgetDesc::new("a").with_bounds(Rect::new(10.0, 10.0, 50.0, 50.0)))
///     .unwrap();
///
/// assert_eq!(tree.resolve_target(root, Point::new(20.0, 20.0)), Some(a));
/// assert_eq!(tree.resolve_target(root, Point::new(90.0, 90.0)), None);
/// ```
pub struct Tree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    damage: Damage,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("damage", &self.damage.nodes.len())
            .finish_non_exhaustive()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    name: String,
    pub(crate) bounds: Rect,
    pub(crate) flags: WidgetFlags,
}

impl Node {
    fn new(generation: u32, desc: WidgetDesc) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            name: desc.name,
            bounds: desc.bounds,
            flags: desc.flags,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            damage: Damage::default(),
        }
    }

    /// Insert a detached node (a root of its own subtree).
    ///
    /// Attach it with [`Tree::add`], or use [`Tree::insert_child`] to do both.
    pub fn insert(&mut self, desc: WidgetDesc) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, desc));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, desc)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Insert a node and attach it as the topmost child of `parent`.
    ///
    /// On failure the freshly inserted node is discarded again.
    pub fn insert_child(&mut self, parent: NodeId, desc: WidgetDesc) -> Result<NodeId, TreeError> {
        let id = self.insert(desc);
        if let Err(err) = self.add(parent, id) {
            self.remove(id);
            return Err(err);
        }
        Ok(id)
    }

    /// Reparent `child` under `parent`, as its topmost child.
    ///
    /// The child is first removed from its previous parent. Adding a node under
    /// itself or under one of its descendants is rejected, as is a name that
    /// another child of `parent` already uses.
    pub fn add(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.is_alive(parent) {
            return Err(TreeError::StaleNode(parent));
        }
        if !self.is_alive(child) {
            return Err(TreeError::StaleNode(child));
        }
        if parent == child || self.is_ancestor_of(child, parent) {
            return Err(TreeError::WouldCycle { parent, child });
        }
        let name = &self.node(child).name;
        let clash = self
            .node(parent)
            .children
            .iter()
            .any(|&c| c != child && self.node(c).name == *name);
        if clash {
            return Err(TreeError::DuplicateName {
                parent,
                name: name.clone(),
            });
        }
        if let Some(old) = self.node(child).parent {
            self.unlink_parent(child, old);
        }
        self.link_parent(child, parent);
        Ok(())
    }

    /// Remove a node and its whole subtree.
    ///
    /// Returns every removed identifier (the node first, then its descendants
    /// depth-first). Stale identifiers yield an empty list.
    pub fn remove(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.is_alive(id) {
            return Vec::new();
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let Some(node) = self.nodes[n.idx()].take() else {
                continue;
            };
            // Keep siblings in z-order on the way down.
            stack.extend(node.children.iter().rev().copied());
            self.free_list.push(n.idx());
            self.damage.nodes.retain(|d| *d != n);
            removed.push(n);
        }
        removed
    }

    /// Move `id` to the front of its parent's z-order (topmost among siblings).
    ///
    /// Parent and children are unchanged. Roots and stale ids are ignored.
    pub fn rise(&mut self, id: NodeId) {
        let Some(parent) = self.parent_of(id) else {
            return;
        };
        let siblings = &mut self.node_mut(parent).children;
        if siblings.last() == Some(&id) {
            return;
        }
        siblings.retain(|c| *c != id);
        siblings.push(id);
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Returns the parent of a node if live, or `None` for roots or stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|node| node.parent)
    }

    /// Get the children of a node in z-order (back to front), or an empty slice if stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// Returns the name of a live node.
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).map(|node| node.name.as_str())
    }

    /// Returns the flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<WidgetFlags> {
        self.node_opt(id).map(|node| node.flags)
    }

    /// Returns `true` if the node is live and has every flag in `flags`.
    pub fn has_flags(&self, id: NodeId, flags: WidgetFlags) -> bool {
        self.flags(id).is_some_and(|f| f.contains(flags))
    }

    /// Replace the flags of a node.
    pub fn set_flags(&mut self, id: NodeId, flags: WidgetFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags = flags;
        }
    }

    /// Set or clear individual flags.
    pub fn set_flag(&mut self, id: NodeId, flags: WidgetFlags, on: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.flags.set(flags, on);
        }
    }

    /// Returns the bounds of a node relative to its parent.
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.node_opt(id).map(|node| node.bounds)
    }

    /// Update the bounds of a node relative to its parent.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.bounds = bounds;
        }
    }

    /// Move a node, keeping its size.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        if let Some(n) = self.node_opt_mut(id) {
            n.bounds = Rect::from_origin_size(position, n.bounds.size());
        }
    }

    /// Resize a node, keeping its position.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.bounds = Rect::from_origin_size(n.bounds.origin(), size);
        }
    }

    /// World-space origin of a node: its position plus every ancestor's position.
    pub fn origin(&self, id: NodeId) -> Option<Point> {
        let mut node = self.node_opt(id)?;
        let mut offset = node.bounds.origin().to_vec2();
        while let Some(parent) = node.parent {
            node = self.node(parent);
            offset += node.bounds.origin().to_vec2();
        }
        Some(offset.to_point())
    }

    /// World-space bounds of a node.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let origin = self.origin(id)?;
        let size = self.node(id).bounds.size();
        Some(Rect::from_origin_size(origin, size))
    }

    /// Convert a world-space point into the node's local space (relative to its own origin).
    pub fn to_local(&self, id: NodeId, world: Point) -> Option<Point> {
        let origin = self.origin(id)?;
        Some(world - origin.to_vec2())
    }

    /// Convert a local point of `id` into world space.
    pub fn to_world(&self, id: NodeId, local: Point) -> Option<Point> {
        let origin = self.origin(id)?;
        Some(local + origin.to_vec2())
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent_of(node);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent_of(p);
        }
        false
    }

    /// Iterate from `id` up to its root, inclusive on both ends.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.is_alive(id).then_some(id);
        core::iter::successors(start, move |&n| self.parent_of(n))
    }

    /// Path from the root down to `id` (inclusive).
    pub fn path_to(&self, id: NodeId) -> NodePath {
        let mut path: NodePath = self.ancestors(id).collect();
        path.reverse();
        path
    }

    /// Direct child of `parent` with the given name.
    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children_of(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).name == name)
    }

    /// Depth-first search below `root` (excluding `root` itself) for a node named `name`.
    ///
    /// Topmost siblings are searched first. No match is a normal outcome.
    pub fn find(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children_of(root).to_vec();
        while let Some(id) = stack.pop() {
            let node = self.node(id);
            if node.name == name {
                return Some(id);
            }
            stack.extend(node.children.iter().copied());
        }
        None
    }

    /// Next sibling in z-order (toward the front), wrapping to the back-most sibling.
    ///
    /// A root, or a node without siblings, returns itself. Stale ids yield `None`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_step(id, true)
    }

    /// Previous sibling in z-order (toward the back), wrapping to the topmost sibling.
    ///
    /// A root, or a node without siblings, returns itself. Stale ids yield `None`.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.sibling_step(id, false)
    }

    /// Record a node's current world bounds as damaged.
    pub fn invalidate(&mut self, id: NodeId) {
        if let Some(rect) = self.world_bounds(id) {
            self.damage.record(id, rect);
        }
    }

    /// Drain the damage recorded since the last call.
    pub fn take_damage(&mut self) -> Damage {
        core::mem::take(&mut self.damage)
    }

    /// Number of arena slots, live or free. An upper bound on any node's depth.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Returns `true` if the tree holds no live node.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every node and all damage. Previously issued ids all become stale.
    pub fn clear(&mut self) {
        for (idx, slot) in self.nodes.iter_mut().enumerate() {
            if slot.take().is_some() {
                self.free_list.push(idx);
            }
        }
        self.damage = Damage::default();
    }
}

impl Tree {
    // --- internals ---

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    /// Access a node mutably; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn sibling_step(&self, id: NodeId, forward: bool) -> Option<NodeId> {
        let node = self.node_opt(id)?;
        let Some(parent) = node.parent else {
            return Some(id);
        };
        let siblings = &self.node(parent).children;
        let pos = siblings.iter().position(|&c| c == id)?;
        let len = siblings.len();
        let next = if forward {
            (pos + 1) % len
        } else {
            (pos + len - 1) % len
        };
        Some(siblings[next])
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        let p = self.node_mut(parent);
        p.children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
    }

    /// Offset to add to a child's local bounds to get world bounds.
    pub(crate) fn child_offset(&self, parent: NodeId) -> Vec2 {
        self.origin(parent)
            .map(|p| p.to_vec2())
            .unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(name: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> WidgetDesc {
        WidgetDesc::new(name).with_bounds(Rect::new(x0, y0, x1, y1))
    }

    fn small_tree() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(desc("root", 0.0, 0.0, 200.0, 200.0));
        let a = tree
            .insert_child(root, desc("a", 10.0, 10.0, 60.0, 60.0))
            .unwrap();
        let b = tree
            .insert_child(root, desc("b", 40.0, 40.0, 120.0, 120.0))
            .unwrap();
        (tree, root, a, b)
    }

    #[test]
    fn add_appends_as_topmost() {
        let (tree, root, a, b) = small_tree();
        assert_eq!(tree.children_of(root), &[a, b]);
        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.parent_of(root), None);
    }

    #[test]
    fn add_reparents_from_previous_parent() {
        let (mut tree, root, a, b) = small_tree();
        tree.add(a, b).unwrap();
        assert_eq!(tree.children_of(root), &[a]);
        assert_eq!(tree.children_of(a), &[b]);
        assert_eq!(tree.parent_of(b), Some(a));
    }

    #[test]
    fn add_rejects_cycles_and_self() {
        let (mut tree, root, a, b) = small_tree();
        tree.add(a, b).unwrap();
        assert_eq!(
            tree.add(b, root),
            Err(TreeError::WouldCycle {
                parent: b,
                child: root
            })
        );
        assert!(matches!(tree.add(a, a), Err(TreeError::WouldCycle { .. })));
        // Structure untouched.
        assert_eq!(tree.parent_of(b), Some(a));
        assert_eq!(tree.parent_of(root), None);
    }

    #[test]
    fn add_rejects_duplicate_sibling_names() {
        let (mut tree, root, _a, _b) = small_tree();
        let err = tree.insert_child(root, desc("a", 0.0, 0.0, 1.0, 1.0));
        assert!(matches!(err, Err(TreeError::DuplicateName { .. })));
        assert_eq!(tree.children_of(root).len(), 2);
        assert_eq!(tree.len(), 3, "rejected node must not linger");
    }

    #[test]
    fn rise_moves_to_front_only() {
        let (mut tree, root, a, b) = small_tree();
        let child = tree
            .insert_child(a, desc("child", 0.0, 0.0, 5.0, 5.0))
            .unwrap();
        tree.rise(a);
        assert_eq!(tree.children_of(root), &[b, a]);
        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.children_of(a), &[child]);
        // Rising the topmost node and a root are no-ops.
        tree.rise(a);
        tree.rise(root);
        assert_eq!(tree.children_of(root), &[b, a]);
    }

    #[test]
    fn remove_cascades_and_invalidates_ids() {
        let (mut tree, root, a, b) = small_tree();
        let child = tree
            .insert_child(a, desc("child", 0.0, 0.0, 5.0, 5.0))
            .unwrap();
        let removed = tree.remove(a);
        assert_eq!(removed, vec![a, child]);
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(child));
        assert_eq!(tree.children_of(root), &[b]);

        // Slot reuse bumps the generation; the stale id stays dead.
        let c = tree.insert(desc("c", 0.0, 0.0, 1.0, 1.0));
        assert!(tree.is_alive(c));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(child));
        assert!(tree.remove(a).is_empty());
    }

    #[test]
    fn origin_and_local_conversion() {
        let (mut tree, _root, a, _b) = small_tree();
        let child = tree
            .insert_child(a, desc("child", 5.0, 5.0, 15.0, 15.0))
            .unwrap();
        assert_eq!(tree.origin(child), Some(Point::new(15.0, 15.0)));
        assert_eq!(
            tree.world_bounds(child),
            Some(Rect::new(15.0, 15.0, 25.0, 25.0))
        );
        assert_eq!(
            tree.to_local(child, Point::new(20.0, 17.0)),
            Some(Point::new(5.0, 2.0))
        );
        assert_eq!(
            tree.to_world(child, Point::new(5.0, 2.0)),
            Some(Point::new(20.0, 17.0))
        );
    }

    #[test]
    fn siblings_wrap() {
        let (mut tree, root, a, b) = small_tree();
        let c = tree
            .insert_child(root, desc("c", 0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(tree.next_sibling(a), Some(b));
        assert_eq!(tree.next_sibling(c), Some(a));
        assert_eq!(tree.prev_sibling(a), Some(c));
        assert_eq!(tree.prev_sibling(b), Some(a));
        assert_eq!(tree.next_sibling(root), Some(root));
    }

    #[test]
    fn find_by_name() {
        let (mut tree, root, a, _b) = small_tree();
        let child = tree
            .insert_child(a, desc("deep", 0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(tree.find(root, "deep"), Some(child));
        assert_eq!(tree.find_child(root, "a"), Some(a));
        assert_eq!(tree.find_child(root, "deep"), None);
        assert_eq!(tree.find(root, "missing"), None);
        assert_eq!(tree.find(root, "root"), None);
    }

    #[test]
    fn damage_lists_each_node_once() {
        let (mut tree, _root, a, b) = small_tree();
        tree.invalidate(a);
        tree.invalidate(a);
        tree.invalidate(b);
        let damage = tree.take_damage();
        assert_eq!(damage.nodes, vec![a, b]);
        assert_eq!(damage.dirty_rects.len(), 2);
        assert_eq!(damage.union_rect(), Some(Rect::new(10.0, 10.0, 120.0, 120.0)));
        assert!(tree.take_damage().is_empty());
    }

    #[test]
    fn damage_covers_old_and_new_position_of_a_moved_node() {
        let (mut tree, _root, a, _b) = small_tree();
        let before = tree.world_bounds(a).unwrap();
        tree.invalidate(a);
        tree.set_bounds(a, Rect::new(100.0, 100.0, 110.0, 110.0));
        tree.invalidate(a);

        let damage = tree.take_damage();
        assert_eq!(damage.nodes, vec![a]);
        assert_eq!(
            damage.dirty_rects,
            vec![before, Rect::new(100.0, 100.0, 110.0, 110.0)]
        );
        assert!(damage.union_rect().unwrap().contains(Point::new(105.0, 105.0)));
    }

    #[test]
    fn path_runs_root_to_node() {
        let (mut tree, root, a, _b) = small_tree();
        let child = tree
            .insert_child(a, desc("child", 0.0, 0.0, 1.0, 1.0))
            .unwrap();
        assert_eq!(tree.path_to(child).as_slice(), &[root, a, child]);
        assert!(tree.is_ancestor_of(root, child));
        assert!(!tree.is_ancestor_of(child, root));
    }
}
