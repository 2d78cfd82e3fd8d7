// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types: boxes, stored nodes, and quadrants.

use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::{Point, Rect, Size};

/// Axis-aligned bounding box in 2D.
///
/// Well-formed boxes have `min.x <= max.x` and `min.y <= max.y`.
/// Boxes are plain values; moving a node replaces its box wholesale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner (left, top).
    pub min: Point,
    /// Maximum corner (right, bottom).
    pub max: Point,
}

impl Aabb {
    /// The empty box at the origin.
    pub const ZERO: Self = Self::new(Point::ORIGIN, Point::ORIGIN);

    /// Create a new AABB from min/max corners.
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create an AABB from an origin and a size.
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self::new(Point::new(x, y), Point::new(x + w, y + h))
    }

    /// Width of the box (may be negative if inverted).
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Height of the box (may be negative if inverted).
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center point.
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Return true if the box is inverted on either axis. Assumes no NaN.
    pub fn is_inverted(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Return true if the box has no area (zero or negative extent on an axis).
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }

    /// Return true if all coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Whether the two boxes share any space.
    ///
    /// Boxes that merely touch along an edge or corner overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        !(other.max.x < self.min.x
            || other.min.x > self.max.x
            || other.max.y < self.min.y
            || other.min.y > self.max.y)
    }

    /// Whether `other` lies entirely within this box, edges inclusive.
    pub fn contains(&self, other: &Self) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Whether the point lies within this box, edges inclusive.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.x <= self.max.x && p.y <= self.max.y
    }

    /// The quadrant of this box obtained by cutting both axes at their midpoint.
    pub fn quadrant(&self, quadrant: Quadrant) -> Self {
        let mid = Point::new(
            self.min.x + self.width() / 2.0,
            self.min.y + self.height() / 2.0,
        );
        match quadrant {
            Quadrant::TopLeft => Self::new(self.min, mid),
            Quadrant::TopRight => {
                Self::new(Point::new(mid.x, self.min.y), Point::new(self.max.x, mid.y))
            }
            Quadrant::BottomLeft => {
                Self::new(Point::new(self.min.x, mid.y), Point::new(mid.x, self.max.y))
            }
            Quadrant::BottomRight => Self::new(mid, self.max),
        }
    }

    /// Convert to a Kurbo rectangle for drawing.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.min, self.max)
    }

    /// Width and height as a Kurbo size.
    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }
}

impl From<Rect> for Aabb {
    fn from(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.origin(), Point::new(rect.x1, rect.y1))
    }
}

impl From<Aabb> for Rect {
    fn from(aabb: Aabb) -> Self {
        aabb.to_rect()
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min x:{} y:{} | max x:{} y:{}",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

/// A box stored in the tree, tagged with a caller-assigned id.
///
/// Ids are expected to be unique among nodes currently in a tree; the tree
/// never generates them (see [`IdAllocator`](crate::IdAllocator)).
/// Equality and hashing consider the id only, never the geometry.
#[derive(Copy, Clone, Debug)]
pub struct Node {
    /// Caller-assigned identifier.
    pub id: u32,
    /// Current bounds.
    pub aabb: Aabb,
}

impl Node {
    /// Create a new node.
    pub const fn new(id: u32, aabb: Aabb) -> Self {
        Self { id, aabb }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One of the four children of a split level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Minimum x, minimum y.
    TopLeft,
    /// Maximum x, minimum y.
    TopRight,
    /// Minimum x, maximum y.
    BottomLeft,
    /// Maximum x, maximum y.
    BottomRight,
}

impl Quadrant {
    /// All quadrants, in child order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
    ];

    /// Position of this quadrant in a level's child array.
    pub const fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}
