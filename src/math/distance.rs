//! Pixel-to-pixel and region-to-region distances
//!
//! Pixel distance is the squared Euclidean distance in channel space. The
//! square root is never taken: only the ordering of candidates matters.

use crate::io::error::Result;
use crate::spatial::grid::PixelGrid;
use crate::spatial::shape::Offset;

/// Sum of squared channel differences between two pixels
///
/// Both pixels must carry the same number of channels. Callers guarantee
/// this by converting grids to a common [`ChannelMode`] first; a length
/// mismatch is a contract violation, checked in debug builds.
///
/// [`ChannelMode`]: crate::spatial::grid::ChannelMode
pub fn pixel_distance(a: &[u8], b: &[u8]) -> u32 {
    debug_assert_eq!(a.len(), b.len(), "pixels must share a channel count");
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let diff = u32::from(x.abs_diff(y));
            diff * diff
        })
        .sum()
}

/// Mean pixel distance between two regions sampled over a shared offset list
///
/// Each offset is evaluated as `source[source_centre + offset]` against
/// `target[target_centre + offset]`. An empty offset list yields
/// `f64::INFINITY`, so a candidate with no comparable context never beats
/// one that has some.
///
/// # Errors
///
/// Returns `OutOfRange` if any offset leaves either grid
pub fn region_distance(
    source: &PixelGrid,
    target: &PixelGrid,
    source_centre: (usize, usize),
    target_centre: (usize, usize),
    offsets: &[Offset],
) -> Result<f64> {
    if offsets.is_empty() {
        return Ok(f64::INFINITY);
    }

    let mut total: u64 = 0;
    for &offset in offsets {
        let source_pixel = source.get(shifted(source, source_centre, offset))?;
        let target_pixel = target.get(shifted(target, target_centre, offset))?;
        total += u64::from(pixel_distance(source_pixel, target_pixel));
    }

    Ok(total as f64 / offsets.len() as f64)
}

// Positions that underflow are mapped past the grid so `get` reports them
fn shifted(grid: &PixelGrid, centre: (usize, usize), offset: Offset) -> (usize, usize) {
    offset
        .apply(centre)
        .unwrap_or((grid.width(), grid.height()))
}
