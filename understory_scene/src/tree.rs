// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, layout updates, queries, adorner layers.

use alloc::vec::Vec;
use hashbrown::HashMap;
use kurbo::{Affine, Point, Rect, Size};

use crate::layer::AdornerLayer;
use crate::types::{LocalNode, NodeFlags, NodeId};

/// A retained scene tree.
///
/// Nodes carry a render size, a transform into their parent's space, and flags.
/// Queries read the current layout directly; there is no commit step, so a query
/// issued right after a mutation already observes it.
///
/// Each tree root owns an [`AdornerLayer`] holding handles of type `A`. The layer
/// is created on first access and dropped together with its root.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use understory_scene::{LocalNode, Tree};
///
/// let mut tree: Tree = Tree::new();
/// let window = tree.insert(None, LocalNode::at(0.0, 0.0, 800.0, 600.0));
/// let button = tree.insert(Some(window), LocalNode::at(100.0, 100.0, 50.0, 20.0).interactive());
///
/// let hit = tree.hit_test_point(window, Point::new(110.0, 105.0)).unwrap();
/// assert_eq!(hit.node, button);
/// assert_eq!(tree.world_bounds(button), Some(Rect::new(100.0, 100.0, 150.0, 120.0)));
/// ```
pub struct Tree<A = u64> {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
    layers: HashMap<NodeId, AdornerLayer<A>>,
}

impl<A> core::fmt::Debug for Tree<A> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl<A> Default for Tree<A> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            layers: HashMap::new(),
        }
    }
}

/// Result of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The topmost node under the point.
    pub node: NodeId,
    /// Path from the queried root to node (inclusive).
    pub path: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
}

impl<A> Tree<A> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new node as the topmost child of `parent` (or as a root if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let node = Node {
            generation: 0,
            parent: None,
            children: Vec::new(),
            local,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node { generation, ..node });
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node { generation, ..node }));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let id = NodeId::new(idx as u32, generation);
        if let Some(p) = parent.filter(|p| self.is_alive(*p)) {
            self.node_mut(p).children.push(id);
            self.node_mut(id).parent = Some(p);
        }
        id
    }

    /// Remove a node and its subtree.
    ///
    /// Removing a root also drops its adorner layer. Stale ids are ignored.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|c| *c != id);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.remove_subtree(child);
        }
        self.layers.remove(&id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Update the render size of a node.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.size = size;
        }
    }

    /// Update the transform of a node into its parent's space.
    pub fn set_transform(&mut self, id: NodeId, transform: Affine) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.transform = transform;
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.local.flags = flags;
        }
    }

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .is_some_and(|n| n.generation == id.1)
    }

    /// Returns the parent of a node, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a node in paint order (bottom first), or an empty slice if stale.
    pub fn children_of(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| &n.children)
    }

    /// The root of the tree containing `id`.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        if !self.is_alive(current) {
            return None;
        }
        while let Some(parent) = self.parent_of(current) {
            current = parent;
        }
        Some(current)
    }

    /// Render size of a live node.
    pub fn size(&self, id: NodeId) -> Option<Size> {
        self.node_opt(id).map(|n| n.local.size)
    }

    /// Flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Transform mapping `id`'s local space into `ancestor`'s local space.
    ///
    /// Returns [`Affine::IDENTITY`] when `id == ancestor`, and `None` if either id is
    /// stale or `ancestor` is not an ancestor of `id`.
    pub fn transform_to_ancestor(&self, id: NodeId, ancestor: NodeId) -> Option<Affine> {
        if !self.is_alive(ancestor) {
            return None;
        }
        let mut transform = Affine::IDENTITY;
        let mut current = id;
        while current != ancestor {
            let node = self.node_opt(current)?;
            transform = node.local.transform * transform;
            current = node.parent?;
        }
        Some(transform)
    }

    /// Transform from a node's local space into its root's local space.
    pub fn world_transform(&self, id: NodeId) -> Option<Affine> {
        self.transform_to_ancestor(id, self.root_of(id)?)
    }

    /// Axis-aligned bounds of a node in its root's local space.
    ///
    /// Loose under rotation or shear: the box contains the transformed bounds but
    /// need not be tight.
    pub fn world_bounds(&self, id: NodeId) -> Option<Rect> {
        let local = self.node_opt(id)?.local.local_bounds();
        Some(self.world_transform(id)?.transform_rect_bbox(local))
    }

    /// Hit test a point given in `root`'s local space.
    ///
    /// Walks the subtree of `root` front to back: later siblings paint above earlier
    /// ones and children paint above their parent. Invisible nodes hide their whole
    /// subtree; nodes without [`NodeFlags::HIT_TEST_VISIBLE`] are skipped but their
    /// children can still be hit. Children are not clipped to their parent's bounds.
    pub fn hit_test_point(&self, root: NodeId, point: Point) -> Option<Hit> {
        if !self.is_alive(root) {
            return None;
        }
        let mut path = Vec::new();
        if !self.hit_local(root, point, &mut path) {
            return None;
        }
        path.reverse();
        Some(Hit {
            node: *path.last()?,
            path,
        })
    }

    /// Returns true if `point` (in `id`'s local space) hits `id` or a descendant,
    /// leaving the node→`id` path in `path` (innermost first).
    fn hit_local(&self, id: NodeId, point: Point, path: &mut Vec<NodeId>) -> bool {
        let node = self.node(id);
        if !node.local.flags.contains(NodeFlags::VISIBLE) {
            return false;
        }
        for &child in node.children.iter().rev() {
            let child_point = self.node(child).local.transform.inverse() * point;
            if self.hit_local(child, child_point, path) {
                path.push(id);
                return true;
            }
        }
        if node.local.flags.contains(NodeFlags::HIT_TEST_VISIBLE)
            && node.local.local_bounds().contains(point)
        {
            path.push(id);
            return true;
        }
        false
    }

    /// The adorner layer above `root`'s tree, if one has been created.
    ///
    /// Any node of the tree may be passed; its root is looked up.
    pub fn layer(&self, root: NodeId) -> Option<&AdornerLayer<A>> {
        self.layers.get(&self.root_of(root)?)
    }

    /// The adorner layer above `root`'s tree, created on first access.
    ///
    /// Returns `None` only for stale ids.
    pub fn layer_mut(&mut self, root: NodeId) -> Option<&mut AdornerLayer<A>> {
        let root = self.root_of(root)?;
        Some(self.layers.entry(root).or_default())
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    fn window_with_button() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new();
        let window = tree.insert(None, LocalNode::at(0.0, 0.0, 800.0, 600.0));
        let button = tree.insert(
            Some(window),
            LocalNode::at(100.0, 100.0, 50.0, 20.0).interactive(),
        );
        (tree, window, button)
    }

    #[test]
    fn insert_and_hit_test() {
        let (tree, window, button) = window_with_button();
        let hit = tree
            .hit_test_point(window, Point::new(110.0, 105.0))
            .unwrap();
        assert_eq!(hit.node, button);
        assert_eq!(hit.path, [window, button]);

        let background = tree.hit_test_point(window, Point::new(5.0, 5.0)).unwrap();
        assert_eq!(background.node, window, "window background is hit-testable");
        assert!(tree.hit_test_point(window, Point::new(900.0, 5.0)).is_none());
    }

    #[test]
    fn later_sibling_wins() {
        let mut tree: Tree = Tree::new();
        let root = tree.insert(None, LocalNode::at(0.0, 0.0, 200.0, 200.0));
        let _a = tree.insert(Some(root), LocalNode::at(10.0, 10.0, 100.0, 100.0));
        let b = tree.insert(Some(root), LocalNode::at(50.0, 50.0, 100.0, 100.0));
        let hit = tree.hit_test_point(root, Point::new(60.0, 60.0)).unwrap();
        assert_eq!(hit.node, b, "last child paints on top");
    }

    #[test]
    fn hidden_subtree_and_hit_test_invisible_node() {
        let (mut tree, window, button) = window_with_button();
        let label = tree.insert(Some(button), LocalNode::at(5.0, 5.0, 20.0, 10.0));

        tree.set_flags(label, NodeFlags::VISIBLE);
        let hit = tree
            .hit_test_point(window, Point::new(106.0, 106.0))
            .unwrap();
        assert_eq!(hit.node, button, "label is not hit-test visible");

        tree.set_flags(button, NodeFlags::empty());
        let hit = tree
            .hit_test_point(window, Point::new(106.0, 106.0))
            .unwrap();
        assert_eq!(hit.node, window, "invisible button hides its subtree");
    }

    #[test]
    fn transform_to_ancestor_composes() {
        let (mut tree, window, button) = window_with_button();
        let icon = tree.insert(Some(button), LocalNode::at(2.0, 3.0, 10.0, 10.0));
        let tf = tree.transform_to_ancestor(icon, window).unwrap();
        assert_eq!(tf * Point::ORIGIN, Point::new(102.0, 103.0));
        assert_eq!(
            tree.transform_to_ancestor(icon, icon),
            Some(Affine::IDENTITY)
        );
        assert_eq!(tree.transform_to_ancestor(window, icon), None);

        let other = tree.insert(None, LocalNode::at(0.0, 0.0, 10.0, 10.0));
        assert_eq!(tree.transform_to_ancestor(icon, other), None);
    }

    #[test]
    fn scaled_child_bounds_and_hit() {
        let (mut tree, window, button) = window_with_button();
        tree.set_transform(
            button,
            Affine::translate(Vec2::new(100.0, 100.0)) * Affine::scale(2.0),
        );
        assert_eq!(
            tree.world_bounds(button),
            Some(Rect::new(100.0, 100.0, 200.0, 140.0))
        );
        let hit = tree
            .hit_test_point(window, Point::new(190.0, 130.0))
            .unwrap();
        assert_eq!(hit.node, button);
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let (mut tree, window, button) = window_with_button();
        tree.remove(button);
        assert!(!tree.is_alive(button));
        assert!(tree.children_of(window).is_empty());
        assert_eq!(tree.size(button), None);

        let reused = tree.insert(Some(window), LocalNode::at(0.0, 0.0, 1.0, 1.0));
        assert!(tree.is_alive(reused));
        assert!(!tree.is_alive(button));
        if reused.0 == button.0 {
            assert!(reused.1 > button.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn parent_and_root_lookup() {
        let (mut tree, window, button) = window_with_button();
        let icon = tree.insert(Some(button), LocalNode::at(2.0, 3.0, 10.0, 10.0));
        assert_eq!(tree.parent_of(icon), Some(button));
        assert_eq!(tree.parent_of(window), None);
        assert_eq!(tree.root_of(icon), Some(window));
        assert_eq!(tree.children_of(window), [button]);
    }

    #[test]
    fn layers_are_per_root_and_dropped_with_it() {
        let (mut tree, window, button) = window_with_button();
        assert!(tree.layer(window).is_none(), "layers are created lazily");
        tree.layer_mut(button).unwrap().add(7);
        assert!(tree.layer(window).unwrap().contains(7));

        tree.remove(window);
        assert!(tree.layer_mut(window).is_none());
        assert!(!tree.is_alive(button), "subtree removed with root");
    }
}
