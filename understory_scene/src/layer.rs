// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adorner layers: render lists painted above a root's regular content.

use alloc::vec::Vec;

/// An ordered render list of adorners layered above a tree root.
///
/// Adorners do not participate in layout or hit testing. Later entries paint on
/// top of earlier ones. The handle type `A` is chosen by whoever owns the adorners;
/// the layer only stores and orders them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdornerLayer<A> {
    adorners: Vec<A>,
}

impl<A> Default for AdornerLayer<A> {
    fn default() -> Self {
        Self {
            adorners: Vec::new(),
        }
    }
}

impl<A: Copy + Eq> AdornerLayer<A> {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an adorner on top of the existing ones.
    ///
    /// Adding an adorner that is already present moves it to the top.
    pub fn add(&mut self, adorner: A) {
        self.adorners.retain(|a| *a != adorner);
        self.adorners.push(adorner);
    }

    /// Remove an adorner. Returns `false` if it was not present.
    pub fn remove(&mut self, adorner: A) -> bool {
        let before = self.adorners.len();
        self.adorners.retain(|a| *a != adorner);
        self.adorners.len() != before
    }

    /// Whether `adorner` is currently in this layer.
    pub fn contains(&self, adorner: A) -> bool {
        self.adorners.contains(&adorner)
    }

    /// Adorners in paint order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = A> + '_ {
        self.adorners.iter().copied()
    }

    /// Number of adorners in the layer.
    pub fn len(&self) -> usize {
        self.adorners.len()
    }

    /// Whether the layer is empty.
    pub fn is_empty(&self) -> bool {
        self.adorners.is_empty()
    }
}
