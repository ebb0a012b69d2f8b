//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Pixel storage with per-pixel validity
//! - Relative neighbourhood shapes

/// Pixel grid with validity tracking
pub mod grid;
/// Neighbourhood offset shapes
pub mod shape;

pub use grid::{ChannelMode, PixelGrid};
pub use shape::{NeighbourhoodShape, Offset};
