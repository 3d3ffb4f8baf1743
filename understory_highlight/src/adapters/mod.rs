// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters that implement the host contract for other Understory crates.
//!
//! Each adapter is gated behind a feature flag so the core stays independent of
//! any particular scene graph.
//!
//! ## Available Adapters
//!
//! - [`scene`] (`scene_adapter` feature): [`SceneGraph`](crate::SceneGraph) and
//!   [`OverlayLayer`](crate::OverlayLayer) for [`understory_scene::Tree`], using the
//!   tree's per-root adorner layers as overlay layers.

#[cfg(feature = "scene_adapter")]
pub mod scene;
