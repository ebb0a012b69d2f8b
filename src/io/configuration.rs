//! Synthesis constants and runtime configuration defaults

/// Default neighbourhood radius in pixels
pub const DEFAULT_RADIUS: u32 = 2;

/// Default canvas multiplier for generative synthesis
pub const DEFAULT_SCALE_FACTOR: usize = 2;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Spawning workers costs more than scanning a small source
/// Source pixel count below which the search stays on the calling thread
pub const PARALLEL_MIN_SOURCE_PIXELS: usize = 4096;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_expanded";

/// Log level used when neither `RUST_LOG` nor `--log-level` is given
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log level used with `--quiet`
pub const QUIET_LOG_LEVEL: &str = "warn";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
