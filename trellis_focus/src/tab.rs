// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tab-stop search over the widget tree.

use trellis_tree::{NodeId, Tree, WidgetFlags};

/// Direction of keyboard focus cycling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Tab: forward through siblings in z-order.
    Next,
    /// Shift+Tab: backward through siblings in z-order.
    Prev,
}

/// Find the tab stop after (or before) `origin` among its siblings.
///
/// Siblings are visited in `nav` order with wrap-around, each at most once. A
/// sibling that is not itself a tab stop is searched for an eligible
/// descendant, visiting children in the same direction. Returns `origin`
/// when no other candidate exists, or when `origin` is a root or stale.
///
/// A node is eligible when it has [`WidgetFlags::TAB_STOP`],
/// [`WidgetFlags::VISIBLE`], and [`WidgetFlags::ENABLED`]. Hidden or disabled
/// subtrees are not entered.
///
/// ```
/// use trellis_focus::{Navigation, next_tab_stop};
/// use trellis_tree::{Tree, WidgetDesc, WidgetFlags};
///
/// let mut tree = Tree::new();
/// let root = tree.insert(WidgetDesc::new("root"));
/// let stop = |name| WidgetDesc::new(name).with_flags(WidgetFlags::TAB_STOP);
/// let a = tree.insert_child(root, stop("a")).unwrap();
/// let _label = tree.insert_child(root, WidgetDesc::new("label")).unwrap();
/// let c = tree.insert_child(root, stop("c")).unwrap();
///
/// assert_eq!(next_tab_stop(&tree, a, Navigation::Next), c);
/// assert_eq!(next_tab_stop(&tree, c, Navigation::Next), a);
/// assert_eq!(next_tab_stop(&tree, a, Navigation::Prev), c);
/// ```
pub fn next_tab_stop(tree: &Tree, origin: NodeId, nav: Navigation) -> NodeId {
    let step = |id| match nav {
        Navigation::Next => tree.next_sibling(id),
        Navigation::Prev => tree.prev_sibling(id),
    };
    let Some(parent) = tree.parent_of(origin) else {
        return origin;
    };
    // Visit each sibling at most once.
    let mut remaining = tree.children_of(parent).len();
    let mut cursor = origin;
    while remaining > 1 {
        remaining -= 1;
        let Some(candidate) = step(cursor) else {
            break;
        };
        if candidate == origin {
            break;
        }
        if is_eligible(tree, candidate) {
            return candidate;
        }
        if let Some(found) = first_in_subtree(tree, candidate, nav) {
            return found;
        }
        cursor = candidate;
    }
    origin
}

/// Returns `true` if `id` can take focus through keyboard cycling.
pub fn is_eligible(tree: &Tree, id: NodeId) -> bool {
    tree.has_flags(
        id,
        WidgetFlags::TAB_STOP | WidgetFlags::VISIBLE | WidgetFlags::ENABLED,
    )
}

fn first_in_subtree(tree: &Tree, id: NodeId, nav: Navigation) -> Option<NodeId> {
    if !tree.has_flags(id, WidgetFlags::VISIBLE | WidgetFlags::ENABLED) {
        return None;
    }
    let children = tree.children_of(id);
    let mut visit = |&child: &NodeId| {
        if is_eligible(tree, child) {
            Some(child)
        } else {
            first_in_subtree(tree, child, nav)
        }
    };
    match nav {
        Navigation::Next => children.iter().find_map(&mut visit),
        Navigation::Prev => children.iter().rev().find_map(&mut visit),
    }
}
