//! Input/output, configuration and error handling

/// Command-line interface for batch processing
pub mod cli;
/// Constants and validation limits
pub mod configuration;
/// JSON documents for atlases and maps
pub mod document;
/// Error types and result alias
pub mod error;
/// Image decoding, resizing, encoding and map previews
pub mod image;
/// Structured log setup
pub mod logging;
/// Progress display for batch runs
pub mod progress;
/// In-memory atlas and map storage
pub mod store;
