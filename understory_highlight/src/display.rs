// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording [`Painter`] that captures paint commands as a flat display list.

use alloc::vec::Vec;

use kurbo::{BezPath, Rect, Stroke};

use crate::scene::Painter;
use crate::types::Rgba8;

/// One recorded paint command.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayItem {
    /// A filled path with no stroke.
    Fill {
        /// Path to fill.
        path: BezPath,
        /// Fill color.
        color: Rgba8,
    },
    /// A stroked rectangle outline with no fill.
    Stroke {
        /// Rectangle whose outline is stroked.
        rect: Rect,
        /// Stroke width.
        width: f64,
        /// Stroke color.
        color: Rgba8,
    },
}

/// Paint commands in the order they were issued.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
}

impl DisplayList {
    /// Create an empty display list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded commands, oldest first.
    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Forget all recorded commands, typically at the start of a frame.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl Painter for DisplayList {
    fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.items.push(DisplayItem::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke, color: Rgba8) {
        self.items.push(DisplayItem::Stroke {
            rect,
            width: stroke.width,
            color,
        });
    }
}
