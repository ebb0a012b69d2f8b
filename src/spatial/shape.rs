//! Neighbourhood shapes describing which surrounding pixels take part in a comparison
//!
//! A shape is a fixed, ordered list of relative offsets. It carries no
//! absolute position and is reused against every centre pixel of a run.

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_parameter};

/// Relative displacement from a centre pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    /// Horizontal displacement (positive to the right)
    pub dx: i32,
    /// Vertical displacement (positive downwards)
    pub dy: i32,
}

impl Offset {
    /// Create an offset from its components
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// The zero displacement
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Apply this offset to an absolute position
    ///
    /// Returns `None` when either resulting coordinate would be negative or
    /// overflow; upper bounds are the grid's concern.
    pub const fn apply(self, (x, y): (usize, usize)) -> Option<(usize, usize)> {
        match (
            x.checked_add_signed(self.dx as isize),
            y.checked_add_signed(self.dy as isize),
        ) {
            (Some(ax), Some(ay)) => Some((ax, ay)),
            _ => None,
        }
    }

    /// Whether this offset precedes the origin in row-major scan order
    pub const fn precedes_origin(self) -> bool {
        self.dy < 0 || (self.dy == 0 && self.dx < 0)
    }
}

/// Which offset pattern a shape was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Full `(2r+1)²` block, origin included
    Square,
    /// Rows above the origin plus the columns left of it on its own row
    CausalEll,
}

/// Ordered set of offsets used to build a comparison context around a pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighbourhoodShape {
    kind: ShapeKind,
    radius: u32,
    offsets: Vec<Offset>,
}

impl NeighbourhoodShape {
    /// Full square of edge `2 * radius + 1`
    ///
    /// Suited to refining an existing target, where pixels not yet visited
    /// already hold approximate values worth comparing against.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `radius` exceeds [`MAX_GRID_DIMENSION`]
    pub fn square(radius: u32) -> Result<Self> {
        Self::build(ShapeKind::Square, radius, |_| true)
    }

    /// Half square holding only offsets that precede the origin in scan order
    ///
    /// Suited to growing a blank canvas in row-major order: every offset
    /// points at a pixel that was committed before the centre.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `radius` exceeds [`MAX_GRID_DIMENSION`]
    pub fn causal_ell(radius: u32) -> Result<Self> {
        Self::build(ShapeKind::CausalEll, radius, Offset::precedes_origin)
    }

    fn build(kind: ShapeKind, radius: u32, keep: impl Fn(Offset) -> bool) -> Result<Self> {
        let r = i32::try_from(radius)
            .ok()
            .filter(|&r| r.unsigned_abs() as usize <= MAX_GRID_DIMENSION)
            .ok_or_else(|| {
                invalid_parameter(
                    "radius",
                    &radius,
                    &format!("radius must not exceed {MAX_GRID_DIMENSION}"),
                )
            })?;
        let side = 2 * r.unsigned_abs() as usize + 1;
        let mut offsets = Vec::with_capacity(side * side);

        // Row-major: dy outer, dx inner
        for dy in -r..=r {
            for dx in -r..=r {
                let offset = Offset::new(dx, dy);
                if keep(offset) {
                    offsets.push(offset);
                }
            }
        }

        Ok(Self {
            kind,
            radius,
            offsets,
        })
    }

    /// Pattern this shape was built from
    pub const fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Radius the shape was built with
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Offsets in iteration order
    pub const fn offsets(&self) -> &[Offset] {
        self.offsets.as_slice()
    }

    /// Number of offsets
    pub const fn len(&self) -> usize {
        self.offsets.len()
    }

    /// True for a shape with no offsets (causal shape of radius zero)
    pub const fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
