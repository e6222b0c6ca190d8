//! Error types for canvas and document operations.
//!
//! Session-level failures (page assembly, encoding, I/O) are returned as
//! `Err`. Per-operation drawing failures never surface here, they are
//! swallowed by the canvas and reported through its diagnostics hook.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or serializing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The PDF object model rejected a page or stream
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error while writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Finalizing the document before serialization failed
    #[error("failed to finish document: {0}")]
    Finish(#[source] Box<Error>),

    /// No backend factory registered under the requested name
    #[error("no backend registered under name {0:?}")]
    UnknownBackend(String),

    /// Pixel buffer length does not match the declared image dimensions
    #[error("invalid image buffer: expected {expected} bytes for {width}x{height}, found {found}")]
    InvalidImageBuffer {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
        /// Expected buffer length in bytes
        expected: usize,
        /// Actual buffer length in bytes
        found: usize,
    },

    /// Encoded image bytes could not be decoded
    #[cfg(feature = "images")]
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// A drawing operation arrived before `begin()`
    #[error("canvas is not initialized, call begin() first")]
    NotInitialized,

    /// A linear or radial gradient brush carries no color stops
    #[error("gradient brush has no color stops")]
    EmptyGradient,
}
