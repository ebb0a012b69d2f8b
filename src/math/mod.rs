//! Colour-space and region distance metrics

/// Pixel and region distances used to score candidate matches
pub mod distance;
