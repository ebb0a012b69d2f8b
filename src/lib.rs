//! Example-based texture synthesis by greedy best-neighbourhood matching
//!
//! Every pixel of a target grid is filled, in row-major order, with the
//! value of the source pixel whose surrounding neighbourhood most closely
//! resembles the target pixel's already-known neighbourhood. A target can be
//! refined from an existing image or grown on a blank canvas.

#![forbid(unsafe_code)]

/// Synthesis engine, best-match search and cancellation
pub mod algorithm;
/// Image codec boundary, command line, configuration and error handling
pub mod io;
/// Pixel and region distance metrics
pub mod math;
/// Pixel grids and neighbourhood shapes
pub mod spatial;

pub use io::error::{Result, SynthesisError};
