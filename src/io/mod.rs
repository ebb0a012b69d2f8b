//! Input/output, configuration and error handling

/// Command-line parsing and run orchestration
pub mod cli;
/// Named constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Image decoding and encoding
pub mod image;
/// Logger bootstrap
pub mod logging;
/// Terminal progress display
pub mod progress;
