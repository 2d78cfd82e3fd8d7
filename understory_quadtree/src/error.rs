// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! The tree itself reports out-of-bounds inserts and missing ids with `bool`
//! and `Option` results. These types back the validated constructors and the
//! [`NodeRegistry`](crate::NodeRegistry) layer.

use thiserror::Error;

/// Why a region cannot be used as the root of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RegionError {
    /// A coordinate is NaN or infinite.
    #[error("region has non-finite coordinates")]
    NonFinite,
    /// `min` exceeds `max` on some axis.
    #[error("region is inverted (min > max)")]
    Inverted,
    /// Zero width or height; splits would produce degenerate quadrants.
    #[error("region has zero width or height")]
    Degenerate,
}

/// Errors reported by [`NodeRegistry`](crate::NodeRegistry).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum QuadTreeError {
    /// The box does not fit inside the root region.
    #[error("node {0} does not fit inside the tree region")]
    OutOfBounds(u32),
    /// No node with this id is stored.
    #[error("node {0} not found")]
    NotFound(u32),
    /// A node with this id is already stored.
    #[error("node {0} is already present")]
    DuplicateId(u32),
    /// The root region is invalid.
    #[error(transparent)]
    Region(#[from] RegionError),
}
