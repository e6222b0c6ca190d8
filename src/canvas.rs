//! Backend-facing drawing interface.
//!
//! A [`Canvas`] receives a linear stream of drawing calls between
//! `begin` and `end`. Calls outside an open session are invalid;
//! backends swallow them and report through their diagnostics hook
//! instead of failing the whole export.

use crate::{
    color::Brush,
    error::Result,
    graphics::{FillRule, FontFace, ImageOptions, Path, Rect, Stroke},
    image::RawImage,
    matrix::Transform,
};

/// A drawing surface for one page.
///
/// Coordinates are in points with the origin in the top-left corner
/// and the y axis pointing down.
pub trait Canvas {
    /// Opens a drawing session on a fresh page of the given size.
    fn begin(&mut self, width: f64, height: f64) -> Result<()>;

    /// Closes the session. Unbalanced [`save`](Canvas::save) calls are
    /// unwound, never an error.
    fn end(&mut self) -> Result<()>;

    /// Pushes the current transform and clip onto the state stack.
    fn save(&mut self);

    /// Pops the most recent [`save`](Canvas::save). Without a matching
    /// save this does nothing.
    fn restore(&mut self);

    /// Replaces the current transform. The new transform is absolute,
    /// not concatenated onto the previous one.
    fn set_transform(&mut self, transform: Transform);

    /// Intersects the current clip with `path`. The clip participates
    /// in save/restore like the transform.
    fn set_clip(&mut self, path: &Path, rule: FillRule);

    /// Present for interface compatibility: PDF offers no way to widen
    /// an established clip, so this does nothing. Use
    /// [`save`](Canvas::save)/[`restore`](Canvas::restore) scoping
    /// instead.
    fn clear_clip(&mut self);

    /// Fills `path` with `brush` using the given fill rule.
    fn fill_path(&mut self, path: &Path, brush: &Brush, rule: FillRule);

    /// Strokes `path` with `brush` and the line settings in `stroke`.
    fn stroke_path(&mut self, path: &Path, brush: &Brush, stroke: &Stroke);

    /// Fills an axis-aligned rectangle with `brush`.
    fn fill_rect(&mut self, rect: Rect, brush: &Brush);

    /// Draws `image` scaled into `dst`. The `src` rectangle is carried
    /// for interface compatibility; the whole image is always mapped
    /// into `dst`.
    fn draw_image(&mut self, image: &RawImage, src: Rect, dst: Rect, options: ImageOptions);

    /// Draws a single line of text with its baseline origin at
    /// `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, face: Option<&FontFace>, brush: &Brush);
}

/// Canvases that can serialize the finished document to a writer.
pub trait WriterBackend: Canvas {
    /// Writes the document. Ends the session first if it is still
    /// open.
    fn write_to(&mut self, w: &mut dyn std::io::Write) -> Result<()>;
}

/// Canvases that can serialize the finished document to a file.
pub trait FileBackend: Canvas {
    /// Saves the document to `path`. Ends the session first if it is
    /// still open.
    fn save_to_file(&mut self, path: &std::path::Path) -> Result<()>;
}

/// Everything a registered export backend has to provide.
pub trait ExportBackend: WriterBackend + FileBackend {}

impl<T: WriterBackend + FileBackend> ExportBackend for T {}
