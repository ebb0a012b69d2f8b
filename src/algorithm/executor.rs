use crate::{
    algorithm::cancel::CancellationToken,
    algorithm::search::best_match,
    io::configuration::{DEFAULT_RADIUS, MAX_GRID_DIMENSION},
    io::error::{Result, invalid_parameter},
    spatial::grid::PixelGrid,
    spatial::shape::{NeighbourhoodShape, Offset},
};

/// Engine parameters shared by both synthesis modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Neighbourhood radius in pixels
    pub radius: u32,
    /// Worker threads for the per-pixel source search (1 = calling thread only)
    pub threads: usize,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            threads: 1,
        }
    }
}

impl SynthesisConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `threads` is zero
    /// - `radius` exceeds [`MAX_GRID_DIMENSION`]
    pub fn validate(&self) -> Result<()> {
        if self.radius as usize > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                "radius",
                &self.radius,
                &format!("radius must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
        if self.threads == 0 {
            return Err(invalid_parameter(
                "threads",
                &self.threads,
                &"at least one thread is required",
            ));
        }
        Ok(())
    }
}

/// How the target canvas was prepared
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Target supplied with approximate values to refine; square shape
    Targeted,
    /// Blank canvas grown in scan order; causal shape
    Generative,
}

/// Snapshot passed to progress observers after every committed pixel
pub struct ProgressUpdate<'a> {
    /// Pixels synthesized so far in this run
    pub synthesized: usize,
    /// Pixels the run will visit in total
    pub total: usize,
    /// Target position that was just committed
    pub position: (usize, usize),
    /// Target grid in its current, partially synthesized state
    pub target: &'a PixelGrid,
}

/// Receives progress from [`TextureExpander::run`]
pub trait SynthesisProgress {
    /// Called once per committed target pixel
    fn update(&mut self, info: ProgressUpdate<'_>);
}

impl<F> SynthesisProgress for F
where
    F: FnMut(ProgressUpdate<'_>),
{
    fn update(&mut self, info: ProgressUpdate<'_>) {
        self(info);
    }
}

/// Progress observer that ignores every update
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl SynthesisProgress for NoProgress {
    fn update(&mut self, _info: ProgressUpdate<'_>) {}
}

/// Summary of a finished or interrupted run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SynthesisOutcome {
    /// Pixels synthesized
    pub synthesized: usize,
    /// Pixels in the target
    pub total: usize,
    /// Whether the run stopped on a cancellation request
    pub cancelled: bool,
}

impl SynthesisOutcome {
    /// True when every target pixel was visited
    pub const fn is_complete(&self) -> bool {
        self.synthesized == self.total
    }
}

/// Greedy per-pixel texture synthesis engine
///
/// Visits every target pixel once in row-major order. For each one the shape
/// is trimmed against the target's bounds and validity, every source pixel
/// is scored over the offsets valid in both grids, and the best source value
/// is written and committed. A partially run expander holds a consistent
/// grid: pixels before the cursor are committed, pixels after it are
/// untouched.
pub struct TextureExpander {
    source: PixelGrid,
    target: PixelGrid,
    shape: NeighbourhoodShape,
    mode: SynthesisMode,
    config: SynthesisConfig,
    /// Scan index of the next target pixel
    cursor: usize,
    /// Pre-allocated buffer to reduce allocations in hot path
    context_buffer: Vec<Offset>,
}

impl TextureExpander {
    /// Prepare targeted synthesis that refines `target` using `source`
    ///
    /// The target is converted to the source's channel mode first so every
    /// pixel comparison sees equal-length values.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid
    pub fn targeted(source: PixelGrid, target: PixelGrid, config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        let target = if target.mode() == source.mode() {
            target
        } else {
            target.to_mode(source.mode())
        };
        let shape = NeighbourhoodShape::square(config.radius)?;
        Ok(Self::with_parts(
            source,
            target,
            shape,
            SynthesisMode::Targeted,
            config,
        ))
    }

    /// Prepare generative synthesis on a blank `scale_factor ×` canvas
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - `scale_factor` is zero
    /// - The canvas would exceed [`MAX_GRID_DIMENSION`] on either side
    pub fn generative(
        source: PixelGrid,
        scale_factor: usize,
        config: SynthesisConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (width, height) = canvas_size(source.dimensions(), scale_factor)?;
        let target = PixelGrid::blank(width, height, source.mode())?;
        let shape = NeighbourhoodShape::causal_ell(config.radius)?;
        Ok(Self::with_parts(
            source,
            target,
            shape,
            SynthesisMode::Generative,
            config,
        ))
    }

    fn with_parts(
        source: PixelGrid,
        target: PixelGrid,
        shape: NeighbourhoodShape,
        mode: SynthesisMode,
        config: SynthesisConfig,
    ) -> Self {
        log::debug!(
            "{mode:?} synthesis: source {}x{}, target {}x{}, {:?} shape r={} ({} offsets), {} thread(s)",
            source.width(),
            source.height(),
            target.width(),
            target.height(),
            shape.kind(),
            shape.radius(),
            shape.len(),
            config.threads
        );

        let context_buffer = Vec::with_capacity(shape.len());
        Self {
            source,
            target,
            shape,
            mode,
            config,
            cursor: 0,
            context_buffer,
        }
    }

    /// Source exemplar
    pub const fn source(&self) -> &PixelGrid {
        &self.source
    }

    /// Target grid in its current state
    pub const fn target(&self) -> &PixelGrid {
        &self.target
    }

    /// Shape used for comparisons
    pub const fn shape(&self) -> &NeighbourhoodShape {
        &self.shape
    }

    /// Mode this expander was prepared for
    pub const fn mode(&self) -> SynthesisMode {
        self.mode
    }

    /// Engine parameters
    pub const fn config(&self) -> SynthesisConfig {
        self.config
    }

    /// Number of target pixels synthesized so far
    pub const fn synthesized(&self) -> usize {
        self.cursor
    }

    /// Number of target pixels the run visits
    pub fn total(&self) -> usize {
        self.target.len()
    }

    /// Next target position to synthesize, `None` once finished
    pub fn next_position(&self) -> Option<(usize, usize)> {
        self.target.position_of(self.cursor)
    }

    /// True once every target pixel has been visited
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.total()
    }

    /// Synthesize the next target pixel in scan order
    ///
    /// Returns `Ok(false)` without doing anything once the scan is finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the search or the commit fails; both indicate a
    /// broken grid invariant rather than bad input
    pub fn step(&mut self) -> Result<bool> {
        let Some(position) = self.next_position() else {
            return Ok(false);
        };

        self.target
            .filter_neighbourhood_into(position, self.shape.offsets(), &mut self.context_buffer);

        let winner = best_match(
            &self.source,
            &self.target,
            position,
            &self.context_buffer,
            self.config.threads,
        )?;

        let value = self.source.get(winner.position)?;
        self.target.set(position, value)?;
        self.target.mark_valid(position)?;
        self.cursor += 1;

        if position.0 + 1 == self.target.width() {
            log::trace!("Row {} synthesized", position.1);
        }

        Ok(true)
    }

    /// Synthesize until finished or cancelled
    ///
    /// Cancellation is checked before every target pixel. A cancelled run
    /// leaves the remaining pixels untouched (and, in generative mode,
    /// invalid); the target stays fully inspectable.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::step`]
    pub fn run(
        &mut self,
        cancel: &CancellationToken,
        progress: &mut dyn SynthesisProgress,
    ) -> Result<SynthesisOutcome> {
        let total = self.total();
        let mut cancelled = false;

        loop {
            if cancel.is_cancelled() {
                cancelled = !self.is_finished();
                break;
            }

            let Some(position) = self.next_position() else {
                break;
            };

            if !self.step()? {
                break;
            }

            progress.update(ProgressUpdate {
                synthesized: self.cursor,
                total,
                position,
                target: &self.target,
            });
        }

        let outcome = SynthesisOutcome {
            synthesized: self.cursor,
            total,
            cancelled,
        };

        if outcome.cancelled {
            log::warn!(
                "Synthesis cancelled after {} of {} pixels",
                outcome.synthesized,
                outcome.total
            );
        } else {
            log::info!("Synthesized {} pixels", outcome.synthesized);
        }

        Ok(outcome)
    }

    /// Consume the expander and return the target grid
    pub fn into_target(self) -> PixelGrid {
        self.target
    }
}

/// Canvas size for generative synthesis: `scale_factor ×` the source size
///
/// # Errors
///
/// Returns an error if `scale_factor` is zero, the product overflows, or
/// either side exceeds [`MAX_GRID_DIMENSION`]
pub fn canvas_size(
    (width, height): (usize, usize),
    scale_factor: usize,
) -> Result<(usize, usize)> {
    if scale_factor == 0 {
        return Err(invalid_parameter(
            "scale",
            &scale_factor,
            &"scale factor must be positive",
        ));
    }

    let scaled = width
        .checked_mul(scale_factor)
        .zip(height.checked_mul(scale_factor))
        .filter(|&(w, h)| w <= MAX_GRID_DIMENSION && h <= MAX_GRID_DIMENSION);

    scaled.ok_or_else(|| {
        invalid_parameter(
            "scale",
            &scale_factor,
            &format!(
                "canvas for a {width}x{height} source would exceed {MAX_GRID_DIMENSION} pixels per side"
            ),
        )
    })
}
