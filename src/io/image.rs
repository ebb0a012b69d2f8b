//! Image decoding into pixel grids and encoding back to files

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};

use crate::io::error::{Result, SynthesisError, computation_error, invalid_parameter};
use crate::spatial::grid::{ChannelMode, PixelGrid};

/// Channel mode a decoded image is canonicalised to
///
/// Anything with an alpha channel becomes RGBA. Palette images with a
/// transparent entry are already expanded to an alpha colour type by the
/// decoder, so they land here as alpha-capable too.
pub fn channel_mode_of(image: &DynamicImage) -> ChannelMode {
    ChannelMode::from_alpha(image.color().has_alpha())
}

/// Convert a decoded image into a fully valid grid
///
/// # Errors
///
/// Returns an error if the image has a zero dimension
pub fn grid_from_image(image: &DynamicImage) -> Result<PixelGrid> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let mode = channel_mode_of(image);

    let bytes = match mode {
        ChannelMode::Rgba => image.to_rgba8().into_raw(),
        ChannelMode::Rgb => image.to_rgb8().into_raw(),
    };

    PixelGrid::from_raw(width, height, mode, &bytes)
}

/// Convert a grid back into an image in the grid's channel mode
///
/// # Errors
///
/// Returns an error if the grid is too large for the image crate
pub fn grid_to_image(grid: &PixelGrid) -> Result<DynamicImage> {
    let width = to_u32("width", grid.width())?;
    let height = to_u32("height", grid.height())?;
    let bytes = grid.to_raw();

    let image = match grid.mode() {
        ChannelMode::Rgba => RgbaImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgba8),
        ChannelMode::Rgb => RgbImage::from_raw(width, height, bytes).map(DynamicImage::ImageRgb8),
    };

    image.ok_or_else(|| {
        computation_error("image conversion", &"pixel buffer does not fill the image")
    })
}

/// Decode an image file into a grid
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or is not a supported image format
/// - The image has a zero dimension
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<PixelGrid> {
    let path_buf = path.as_ref().to_path_buf();
    let image = image::open(&path_buf).map_err(|e| SynthesisError::ImageLoad {
        path: path_buf,
        source: e,
    })?;

    grid_from_image(&image)
}

/// Decode an in-memory encoded image into a grid
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image or the image has
/// a zero dimension
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelGrid> {
    let image = image::load_from_memory(bytes)?;
    grid_from_image(&image)
}

/// Encode a grid to a file, choosing the format from the extension
///
/// The image is fully encoded in memory before anything touches the disk,
/// so a failed encode leaves no partial file behind.
///
/// # Errors
///
/// Returns an error if:
/// - The extension names no supported format, or the format cannot store
///   the grid's channel mode
/// - The parent directory cannot be created
/// - The file cannot be written
pub fn encode_file<P: AsRef<Path>>(grid: &PixelGrid, path: P) -> Result<()> {
    let path = path.as_ref();
    let export_error = |source| SynthesisError::ImageExport {
        path: path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(path).map_err(export_error)?;
    let image = grid_to_image(grid)?;

    let mut encoded = Cursor::new(Vec::new());
    image.write_to(&mut encoded, format).map_err(export_error)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SynthesisError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(path, encoded.into_inner()).map_err(|e| SynthesisError::FileSystem {
        path: path.to_path_buf(),
        operation: "write image",
        source: e,
    })
}

fn to_u32(parameter: &'static str, value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|e| invalid_parameter(parameter, &value, &format!("exceeds the image size limit: {e}")))
}
