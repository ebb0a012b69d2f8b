//! Pixel grid with per-pixel validity tracking
//!
//! Pixels are stored as fixed-size records in a 2D array addressed by
//! `(row, col) = (y, x)`; the validity mask is a bitset using the same
//! row-major order. All public accessors take `(x, y)` and are bounds-checked.
//! Writing a value and raising its validity flag are separate operations so
//! a value can sit provisionally until the caller commits it.

use bitvec::vec::BitVec;
use ndarray::Array2;

use crate::io::error::{Result, SynthesisError, invalid_parameter};
use crate::spatial::shape::Offset;

/// Widest pixel record stored per grid cell
pub const MAX_CHANNELS: usize = 4;

type PixelRecord = [u8; MAX_CHANNELS];

/// Channel layout of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Three channels, no alpha
    Rgb,
    /// Four channels, alpha last
    Rgba,
}

impl ChannelMode {
    /// Number of channels per pixel
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Mode for an alpha-capable or opaque source
    pub const fn from_alpha(alpha_capable: bool) -> Self {
        if alpha_capable { Self::Rgba } else { Self::Rgb }
    }

    /// Whether the mode carries an alpha channel
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// Dense 2D grid of pixels plus a parallel validity mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pixels: Array2<PixelRecord>,
    valid: BitVec,
    mode: ChannelMode,
}

impl PixelGrid {
    /// Allocate a blank canvas: every pixel zero, every validity flag false
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn blank(width: usize, height: usize, mode: ChannelMode) -> Result<Self> {
        check_dimensions(width, height)?;

        Ok(Self {
            pixels: Array2::from_elem((height, width), [0; MAX_CHANNELS]),
            valid: BitVec::repeat(false, width * height),
            mode,
        })
    }

    /// Build a fully valid grid from an interleaved row-major byte buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The buffer length is not `width * height * channels`
    pub fn from_raw(width: usize, height: usize, mode: ChannelMode, bytes: &[u8]) -> Result<Self> {
        check_dimensions(width, height)?;

        let channels = mode.channels();
        let expected = width * height * channels;
        if bytes.len() != expected {
            return Err(SynthesisError::InvalidBuffer {
                expected,
                actual: bytes.len(),
            });
        }

        let mut records = Vec::with_capacity(width * height);
        for chunk in bytes.chunks_exact(channels) {
            let mut record = [0; MAX_CHANNELS];
            for (slot, &byte) in record.iter_mut().zip(chunk) {
                *slot = byte;
            }
            records.push(record);
        }

        let pixels = Array2::from_shape_vec((height, width), records).map_err(|e| {
            SynthesisError::Computation {
                operation: "pixel grid construction",
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            pixels,
            valid: BitVec::repeat(true, width * height),
            mode,
        })
    }

    /// Grid width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Grid height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Dimensions as (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false; grids have positive dimensions
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Channel layout
    pub const fn mode(&self) -> ChannelMode {
        self.mode
    }

    /// Channels per pixel
    pub const fn channels(&self) -> usize {
        self.mode.channels()
    }

    /// True iff `0 <= x < width` and `0 <= y < height`
    pub fn in_bounds(&self, (x, y): (usize, usize)) -> bool {
        x < self.width() && y < self.height()
    }

    /// Row-major scan index of a position, if in bounds
    ///
    /// This is the single place where positions map to linear indices.
    pub fn index_of(&self, position: (usize, usize)) -> Option<usize> {
        self.in_bounds(position)
            .then(|| position.1 * self.width() + position.0)
    }

    /// Position of a row-major scan index, if in range
    pub fn position_of(&self, index: usize) -> Option<(usize, usize)> {
        (index < self.len()).then(|| (index % self.width(), index / self.width()))
    }

    /// Absolute position of `centre + offset`, if it lands inside the grid
    pub fn locate(&self, centre: (usize, usize), offset: Offset) -> Option<(usize, usize)> {
        offset.apply(centre).filter(|&p| self.in_bounds(p))
    }

    /// Pixel value at a position
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position is outside the grid
    pub fn get(&self, position: (usize, usize)) -> Result<&[u8]> {
        let channels = self.channels();
        self.pixels
            .get((position.1, position.0))
            .and_then(|record| record.get(..channels))
            .ok_or_else(|| self.out_of_range(position))
    }

    /// Overwrite the pixel value at a position without touching its validity
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The position is outside the grid (`OutOfRange`)
    /// - `pixel.len()` differs from the channel count (`ChannelMismatch`)
    pub fn set(&mut self, position: (usize, usize), pixel: &[u8]) -> Result<()> {
        let channels = self.channels();
        if pixel.len() != channels {
            return Err(SynthesisError::ChannelMismatch {
                expected: channels,
                actual: pixel.len(),
            });
        }

        let out_of_range = self.out_of_range(position);
        let record = self
            .pixels
            .get_mut((position.1, position.0))
            .ok_or(out_of_range)?;
        for (slot, &byte) in record.iter_mut().zip(pixel) {
            *slot = byte;
        }
        Ok(())
    }

    /// Whether the pixel at a position is committed
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position is outside the grid
    pub fn is_valid(&self, position: (usize, usize)) -> Result<bool> {
        self.index_of(position)
            .and_then(|index| self.valid.get(index).map(|bit| *bit))
            .ok_or_else(|| self.out_of_range(position))
    }

    /// Raise the validity flag at a position; no-op if already raised
    ///
    /// # Errors
    ///
    /// Returns `OutOfRange` if the position is outside the grid
    pub fn mark_valid(&mut self, position: (usize, usize)) -> Result<()> {
        let index = self
            .index_of(position)
            .ok_or_else(|| self.out_of_range(position))?;
        self.valid.set(index, true);
        Ok(())
    }

    /// Number of committed pixels
    pub fn valid_count(&self) -> usize {
        self.valid.count_ones()
    }

    /// True when every pixel is committed
    pub fn is_complete(&self) -> bool {
        self.valid.all()
    }

    /// Offsets of `shape` that land on an in-bounds, valid pixel around `centre`
    ///
    /// Order follows `shape`.
    pub fn filter_neighbourhood(&self, centre: (usize, usize), shape: &[Offset]) -> Vec<Offset> {
        let mut kept = Vec::with_capacity(shape.len());
        self.filter_neighbourhood_into(centre, shape, &mut kept);
        kept
    }

    /// Same as [`Self::filter_neighbourhood`], writing into a reused buffer
    ///
    /// The buffer is cleared first.
    pub fn filter_neighbourhood_into(
        &self,
        centre: (usize, usize),
        shape: &[Offset],
        kept: &mut Vec<Offset>,
    ) {
        kept.clear();
        kept.extend(shape.iter().copied().filter(|&offset| {
            self.locate(centre, offset)
                .and_then(|p| self.index_of(p))
                .and_then(|index| self.valid.get(index).map(|bit| *bit))
                .unwrap_or(false)
        }));
    }

    /// Copy of this grid in another channel mode
    ///
    /// Alpha is padded with 255 when widening and dropped when narrowing.
    /// Validity flags are preserved.
    #[must_use]
    pub fn to_mode(&self, mode: ChannelMode) -> Self {
        if mode == self.mode {
            return self.clone();
        }

        let pixels = self.pixels.mapv(|mut record| {
            if let Some(alpha) = record.get_mut(3) {
                *alpha = if mode.has_alpha() { u8::MAX } else { 0 };
            }
            record
        });

        Self {
            pixels,
            valid: self.valid.clone(),
            mode,
        }
    }

    /// Interleaved row-major bytes, `channels` per pixel
    pub fn to_raw(&self) -> Vec<u8> {
        let channels = self.channels();
        let mut bytes = Vec::with_capacity(self.len() * channels);
        for record in &self.pixels {
            bytes.extend(record.iter().take(channels));
        }
        bytes
    }

    fn out_of_range(&self, position: (usize, usize)) -> SynthesisError {
        SynthesisError::OutOfRange {
            position,
            dimensions: self.dimensions(),
        }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "dimensions",
            &format!("{width}x{height}"),
            &"grid dimensions must be positive",
        ));
    }
    Ok(())
}
