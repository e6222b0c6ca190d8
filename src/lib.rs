//! # pdfcanvas
//!
//! pdfcanvas is a PDF export backend for recorded 2D vector-drawing
//! commands: paths, solid and gradient fills, strokes, clips, images
//! and text, drawn in a top-left y-down coordinate system and written
//! out as self-contained PDF files.
//!
//! # Getting started
//!
//! Backends are looked up by name through a [`Registry`], so hosts can
//! pick their export format at runtime:
//!
//! ```no_run
//! use pdfcanvas::{register_pdf, Brush, Canvas, FileBackend, FillRule, Path, Registry, Rgba};
//!
//! # fn main() -> Result<(), pdfcanvas::Error> {
//! let mut registry = Registry::new();
//! register_pdf(&mut registry);
//!
//! let mut backend = registry.create("pdf")?;
//! backend.begin(595.0, 842.0)?;
//!
//! let triangle = Path::new()
//!     .move_to(100.0, 100.0)
//!     .line_to(300.0, 100.0)
//!     .line_to(200.0, 250.0)
//!     .close();
//! backend.fill_path(&triangle, &Brush::solid(Rgba::rgb(220, 30, 30)), FillRule::NonZero);
//!
//! backend.end()?;
//! backend.save_to_file("triangle.pdf".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! For multi-page output use a [`PdfDocument`] and add pages to it,
//! or replay stored [`Recording`]s with
//! [`PdfDocument::playback`].

mod canvas;
mod color;
mod error;
mod font;
mod glob_defines;
mod graphics;
mod image;
mod matrix;
mod ops;
mod pdf_canvas;
mod pdf_document;
mod registry;
mod serialize;
mod shading;
mod utils;

pub use crate::canvas::{Canvas, ExportBackend, FileBackend, WriterBackend};
pub use crate::color::{Brush, GradientStop, Rgba};
pub use crate::error::{Error, Result};
pub use crate::font::{BuiltinFont, DEFAULT_FONT_SIZE};
pub use crate::graphics::{
    FillRule, FontFace, ImageOptions, LineCap, LineJoin, Path, PathElement, Point, Rect, Stroke,
};
pub use crate::image::{RawImage, RawImageFormat};
pub use crate::matrix::{PdfMatrix, Transform};
pub use crate::ops::{DrawOp, Recording};
pub use crate::pdf_canvas::{DiagnosticsHook, PdfCanvas};
pub use crate::pdf_document::{DocumentInfo, PdfDocument};
pub use crate::registry::{register_pdf, BackendFactory, Registry, PDF_BACKEND_NAME};
pub use crate::serialize::SaveOptions;
