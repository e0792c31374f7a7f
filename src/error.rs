//! Error types for slidezone.
//!
//! The layout core itself never fails: missing geometry, missing page
//! dimensions and empty slides all degrade to conservative defaults. These
//! errors are raised only at the ingestion, configuration and rendering
//! boundaries.

use std::io;
use thiserror::Error;

/// Result type alias for slidezone operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the layout core.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON input.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is well-formed JSON but does not describe a deck.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Slide number is out of range.
    #[error("Slide {0} is out of range (deck has {1} slides)")]
    SlideOutOfRange(u32, u32),
}
