// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scene --heading-base-level=0

//! Understory Scene: a Kurbo-native retained scene tree with adorner layers.
//!
//! - Represents a hierarchy of visuals with render sizes, local transforms, and flags.
//! - Hit tests in paint order and walks parent links to resolve ancestors.
//! - Maps any node's local space into an ancestor's space.
//! - Keeps one [`AdornerLayer`] per tree root for transient visuals painted above content.
//!
//! ## Not a layout engine
//!
//! This crate does not measure or arrange anything.
//! Upstream code computes sizes and positions and writes them into the tree; queries
//! always observe the latest values.
//!
//! ## API overview
//!
//! - [`Tree`]: container of nodes and their adorner layers.
//! - [`LocalNode`]: per-node render size, transform, and [`NodeFlags`].
//! - [`NodeFlags`]: visibility, hit-test visibility, and the interactive-control marker.
//! - [`NodeId`]: generational handle of a node.
//! - [`AdornerLayer`]: ordered render list of adorner handles.
//!
//! Key operations:
//! - [`Tree::insert`] → [`NodeId`]
//! - [`Tree::hit_test_point`] → [`Hit`] with the root→node path.
//! - [`Tree::parent_of`], [`Tree::children_of`], [`Tree::root_of`]
//! - [`Tree::size`], [`Tree::transform_to_ancestor`], [`Tree::world_bounds`]
//! - [`Tree::layer`] / [`Tree::layer_mut`]
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod layer;
mod tree;
mod types;

pub use layer::AdornerLayer;
pub use tree::{Hit, Tree};
pub use types::{LocalNode, NodeFlags, NodeId};
