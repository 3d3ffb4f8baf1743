// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contract for Understory Scene.
//!
//! ## Feature
//!
//! Enable with `scene_adapter`.
//!
//! ## Notes
//!
//! A [`Tree`] whose adorner handles are [`OverlayId`]s is a complete host: hit
//! testing, parent walks, and transforms come from the tree, and each root's
//! adorner layer serves as its overlay layer. Only tree roots have an overlay
//! layer: overlay geometry is measured in the root passed to activation, so a
//! nested node would not match the layer's frame. Nodes marked
//! [`NodeFlags::INTERACTIVE`] are the controls that get highlighted.
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_highlight::adapters::scene::is_interactive;
//! use understory_highlight::{Highlighter, OverlayId};
//! use understory_scene::{LocalNode, Tree};
//!
//! let mut tree: Tree<OverlayId> = Tree::new();
//! let window = tree.insert(None, LocalNode::at(0.0, 0.0, 800.0, 600.0));
//! tree.insert(Some(window), LocalNode::at(100.0, 100.0, 50.0, 20.0).interactive());
//!
//! let mut highlighter: Highlighter<Tree<OverlayId>> = Highlighter::new(is_interactive);
//! let id = highlighter
//!     .activate(&mut tree, window, Point::new(110.0, 105.0), Duration::ZERO)
//!     .unwrap();
//! assert!(tree.layer(window).unwrap().contains(id));
//! ```

use kurbo::{Affine, Point, Size};
use understory_scene::{AdornerLayer, NodeFlags, NodeId, Tree};

use crate::scene::{OverlayLayer, SceneGraph};
use crate::types::OverlayId;

impl OverlayLayer for AdornerLayer<OverlayId> {
    fn add(&mut self, overlay: OverlayId) {
        Self::add(self, overlay);
    }

    fn remove(&mut self, overlay: OverlayId) -> bool {
        Self::remove(self, overlay)
    }

    fn contains(&self, overlay: OverlayId) -> bool {
        Self::contains(self, overlay)
    }
}

impl SceneGraph for Tree<OverlayId> {
    type Node = NodeId;
    type Layer = AdornerLayer<OverlayId>;

    fn hit_test(&self, root: NodeId, point: Point) -> Option<NodeId> {
        self.hit_test_point(root, point).map(|hit| hit.node)
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        Self::parent_of(self, node)
    }

    fn render_size(&self, node: NodeId) -> Option<Size> {
        self.size(node)
    }

    fn transform_to_ancestor(&self, node: NodeId, ancestor: NodeId) -> Option<Affine> {
        Self::transform_to_ancestor(self, node, ancestor)
    }

    fn overlay_layer(&mut self, root: NodeId) -> Option<&mut AdornerLayer<OverlayId>> {
        if self.root_of(root)? != root {
            return None;
        }
        self.layer_mut(root)
    }
}

/// Interactive predicate for [`Tree`]: the node carries [`NodeFlags::INTERACTIVE`].
///
/// Stale nodes are never interactive.
pub fn is_interactive(tree: &Tree<OverlayId>, node: NodeId) -> bool {
    tree.flags(node)
        .is_some_and(|flags| flags.contains(NodeFlags::INTERACTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_scene::LocalNode;

    #[test]
    fn interactive_flag_drives_the_predicate() {
        let mut tree: Tree<OverlayId> = Tree::new();
        let root = tree.insert(None, LocalNode::at(0.0, 0.0, 100.0, 100.0));
        let button = tree.insert(Some(root), LocalNode::at(10.0, 10.0, 20.0, 20.0).interactive());
        assert!(!is_interactive(&tree, root));
        assert!(is_interactive(&tree, button));
        tree.remove(button);
        assert!(!is_interactive(&tree, button), "stale ids are not interactive");
    }

    #[test]
    fn only_roots_have_an_overlay_layer() {
        let mut tree: Tree<OverlayId> = Tree::new();
        let root = tree.insert(None, LocalNode::at(0.0, 0.0, 100.0, 100.0));
        let child = tree.insert(Some(root), LocalNode::at(10.0, 10.0, 20.0, 20.0));
        let id = OverlayId::new(0, 1);
        assert!(tree.overlay_layer(child).is_none(), "nested nodes have no layer");
        OverlayLayer::add(tree.overlay_layer(root).unwrap(), id);
        assert!(OverlayLayer::contains(tree.overlay_layer(root).unwrap(), id));
        tree.remove(root);
        assert!(tree.overlay_layer(root).is_none(), "layer goes away with its root");
    }

    #[test]
    fn projection_goes_through_nested_transforms() {
        let mut tree: Tree<OverlayId> = Tree::new();
        let root = tree.insert(None, LocalNode::at(0.0, 0.0, 800.0, 600.0));
        let panel = tree.insert(Some(root), LocalNode::at(50.0, 40.0, 300.0, 300.0));
        let button = tree.insert(Some(panel), LocalNode::at(10.0, 20.0, 50.0, 20.0));
        let rect = crate::geometry::project(&tree, button, root).unwrap();
        assert_eq!(rect, kurbo::Rect::new(60.0, 60.0, 110.0, 80.0));
        assert_eq!(
            crate::geometry::project(&tree, root, button),
            Err(crate::HighlightError::DegenerateGeometry(
                crate::error::DegenerateReason::NotDescendant
            ))
        );
    }
}
