//! Brute-force best-match search for a single target pixel
//!
//! Every source pixel is scored against the target pixel's context and the
//! lowest mean distance wins. Ties go to the first source pixel in row-major
//! scan order. The parallel path splits the source into contiguous row bands
//! and reduces the per-band winners in band order, which preserves that rule.

use std::ops::Range;

use crate::io::configuration::PARALLEL_MIN_SOURCE_PIXELS;
use crate::io::error::{Result, computation_error};
use crate::math::distance::region_distance;
use crate::spatial::grid::PixelGrid;
use crate::spatial::shape::Offset;

/// Winning source pixel for one target pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Source position as (x, y)
    pub position: (usize, usize),
    /// Mean pixel distance over the shared context (`INFINITY` when empty)
    pub score: f64,
}

impl Candidate {
    // Strict comparison keeps the earlier candidate on ties
    fn improves_on(&self, best: Option<&Self>) -> bool {
        best.is_none_or(|b| self.score < b.score)
    }
}

/// Find the source pixel whose neighbourhood best matches `target_centre`
///
/// `target_context` is the shape already trimmed against the target's bounds
/// and validity; each source centre trims it again against the source.
/// `threads` above one enables the banded parallel search for sources of at
/// least [`PARALLEL_MIN_SOURCE_PIXELS`] pixels.
///
/// # Errors
///
/// Returns an error if:
/// - A distance evaluation leaves either grid (`OutOfRange`)
/// - A search worker panics (`Computation`)
pub fn best_match(
    source: &PixelGrid,
    target: &PixelGrid,
    target_centre: (usize, usize),
    target_context: &[Offset],
    threads: usize,
) -> Result<Candidate> {
    let rows = source.height();
    let bands = threads.clamp(1, rows);

    let best = if bands == 1 || source.len() < PARALLEL_MIN_SOURCE_PIXELS {
        search_rows(source, target, target_centre, target_context, 0..rows)?
    } else {
        search_bands(source, target, target_centre, target_context, bands)?
    };

    best.ok_or_else(|| computation_error("best match search", &"source grid has no pixels"))
}

/// Stable arg-min over the source rows in `rows`
///
/// Returns `None` only for an empty row range.
///
/// # Errors
///
/// Returns `OutOfRange` if a distance evaluation leaves either grid
pub fn search_rows(
    source: &PixelGrid,
    target: &PixelGrid,
    target_centre: (usize, usize),
    target_context: &[Offset],
    rows: Range<usize>,
) -> Result<Option<Candidate>> {
    let mut context = Vec::with_capacity(target_context.len());
    let mut best: Option<Candidate> = None;

    for y in rows {
        for x in 0..source.width() {
            let position = (x, y);
            source.filter_neighbourhood_into(position, target_context, &mut context);
            let candidate = Candidate {
                position,
                score: region_distance(source, target, position, target_centre, &context)?,
            };

            if candidate.improves_on(best.as_ref()) {
                best = Some(candidate);
            }
        }
    }

    Ok(best)
}

fn search_bands(
    source: &PixelGrid,
    target: &PixelGrid,
    target_centre: (usize, usize),
    target_context: &[Offset],
    bands: usize,
) -> Result<Option<Candidate>> {
    let band_results = crossbeam_utils::thread::scope(|scope| {
        let handles: Vec<_> = band_ranges(source.height(), bands)
            .into_iter()
            .map(|rows| {
                scope.spawn(move |_| {
                    search_rows(source, target, target_centre, target_context, rows)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|e| {
                    Err(computation_error(
                        "parallel search",
                        &format!("worker panicked: {e:?}"),
                    ))
                })
            })
            .collect::<Vec<_>>()
    })
    .map_err(|e| computation_error("parallel search", &format!("search scope panicked: {e:?}")))?;

    // Bands are in scan order, so a strict reduce keeps the earliest tie
    let mut best: Option<Candidate> = None;
    for result in band_results {
        if let Some(candidate) = result?
            && candidate.improves_on(best.as_ref())
        {
            best = Some(candidate);
        }
    }

    Ok(best)
}

/// Split `rows` into at most `bands` contiguous, ordered, non-empty ranges
pub fn band_ranges(rows: usize, bands: usize) -> Vec<Range<usize>> {
    let bands = bands.clamp(1, rows.max(1));
    let band_height = rows.div_ceil(bands);

    (0..rows)
        .step_by(band_height.max(1))
        .map(|start| start..(start + band_height).min(rows))
        .collect()
}
