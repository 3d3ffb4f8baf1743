// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Execution-context checks.
//!
//! All scene-graph reads and writes must happen on the one context that owns the
//! render surface. A [`Highlighter`](crate::Highlighter) asks its
//! [`ExecutionContext`] before every operation and fails with
//! [`HighlightError::WrongExecutionContext`](crate::HighlightError::WrongExecutionContext)
//! instead of touching the scene from the wrong place.

/// Tells whether the caller is on the scene graph's owning context.
pub trait ExecutionContext {
    /// `true` if the current caller may touch the scene graph.
    fn is_current(&self) -> bool;
}

/// Accepts every caller. For hosts that are single-threaded by construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Unchecked;

impl ExecutionContext for Unchecked {
    fn is_current(&self) -> bool {
        true
    }
}

#[cfg(feature = "std")]
pub use affinity::ThreadAffinity;

#[cfg(feature = "std")]
mod affinity {
    use std::thread::{self, ThreadId};

    use super::ExecutionContext;

    /// Accepts only the thread that created it.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ThreadAffinity {
        owner: ThreadId,
    }

    impl ThreadAffinity {
        /// Bind to the calling thread.
        pub fn current() -> Self {
            Self {
                owner: thread::current().id(),
            }
        }

        /// The owning thread.
        pub fn owner(&self) -> ThreadId {
            self.owner
        }
    }

    impl Default for ThreadAffinity {
        fn default() -> Self {
            Self::current()
        }
    }

    impl ExecutionContext for ThreadAffinity {
        fn is_current(&self) -> bool {
            thread::current().id() == self.owner
        }
    }

}
