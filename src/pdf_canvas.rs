//! The PDF canvas: translates drawing calls into content stream
//! operations.
//!
//! Drawing coordinates have their origin in the top-left corner with y
//! pointing down, PDF user space has it in the bottom-left with y
//! pointing up. A fixed flip matrix bridges the two and every drawing
//! operation is emitted inside its own `q`/`Q` bracket carrying the
//! combined device matrix, so no operation can leak coordinate state
//! into the next one.

use std::{
    collections::BTreeSet,
    fmt,
    fs::File,
    io::{BufWriter, Write},
};

use lopdf::content::Operation;
use lopdf::{Object, StringFormat};

use crate::{
    canvas::{Canvas, FileBackend, WriterBackend},
    color::{Brush, GradientStop, PdfColor, Rgba},
    error::{Error, Result},
    font::{encode_win_ansi, BuiltinFont, DEFAULT_FONT_SIZE},
    glob_defines::{
        OP_COLOR_SET_FILL_COLOR_ICC, OP_COLOR_SET_FILL_CS, OP_PATH_CONST_4BEZIER,
        OP_PATH_CONST_CLOSE_SUBPATH, OP_PATH_CONST_LINE_TO, OP_PATH_CONST_MOVE_TO,
        OP_PATH_CONST_RECT, OP_PATH_PAINT_END, OP_PATH_PAINT_FILL_NZ, OP_PATH_PAINT_STROKE,
        OP_PATH_STATE_SET_GS_FROM_PARAM_DICT, OP_PATH_STATE_SET_LINE_DASH,
        OP_PATH_STATE_SET_LINE_WIDTH, OP_PATH_STATE_SET_MITER_LIMIT, OP_STATE_RESTORE,
        OP_STATE_SAVE, OP_TEXT_BEGIN, OP_TEXT_END, OP_TEXT_POSITION_SET_MATRIX, OP_TEXT_SHOW,
        OP_TEXT_STATE_SET_FONT, OP_XOBJECT_DO,
    },
    graphics::{FillRule, FontFace, ImageOptions, Path, PathElement, Point, Rect, Stroke},
    image::RawImage,
    matrix::{PdfMatrix, Transform},
    serialize::{self, SaveOptions},
    shading::{ExtGState, ShadingGeometry, ShadingPattern},
    DocumentInfo,
};

/// Callback receiving errors from swallowed per-operation failures.
pub type DiagnosticsHook = Box<dyn FnMut(&Error)>;

/// Resources referenced by a page's content stream, materialized into
/// the page `/Resources` dictionary at serialization time.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PageResources {
    pub fonts: BTreeSet<BuiltinFont>,
    pub xobjects: Vec<(String, RawImage)>,
    pub patterns: Vec<(String, ShadingPattern)>,
    pub ext_gstates: Vec<(String, ExtGState)>,
}

impl PageResources {
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
            && self.xobjects.is_empty()
            && self.patterns.is_empty()
            && self.ext_gstates.is_empty()
    }
}

/// A single PDF page accepting drawing commands.
///
/// Used standalone it produces a one-page document; [`PdfDocument`]
/// aggregates several canvases into one file.
///
/// [`PdfDocument`]: crate::PdfDocument
pub struct PdfCanvas {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) ops: Vec<Operation>,
    pub(crate) resources: PageResources,
    initialized: bool,
    current: Transform,
    saved: Vec<Transform>,
    diagnostics: Option<DiagnosticsHook>,
}

impl fmt::Debug for PdfCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PdfCanvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("initialized", &self.initialized)
            .field("ops", &self.ops.len())
            .finish()
    }
}

impl Default for PdfCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfCanvas {
    /// Creates a canvas without an open session. Call
    /// [`begin`](Canvas::begin) before drawing.
    pub fn new() -> Self {
        PdfCanvas {
            width: 0.0,
            height: 0.0,
            ops: Vec::new(),
            resources: PageResources::default(),
            initialized: false,
            current: Transform::identity(),
            saved: Vec::new(),
            diagnostics: None,
        }
    }

    /// Creates a canvas with an already open session, the form
    /// [`PdfDocument::add_page`](crate::PdfDocument::add_page) hands
    /// out.
    pub fn with_page_size(width: f64, height: f64) -> Self {
        let mut canvas = Self::new();
        canvas.width = width;
        canvas.height = height;
        canvas.initialized = true;
        canvas
    }

    /// Page width in points.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Page height in points.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Installs a callback that receives every error swallowed by a
    /// drawing operation. Errors are logged either way.
    pub fn set_diagnostics(&mut self, hook: impl FnMut(&Error) + 'static) {
        self.diagnostics = Some(Box::new(hook));
    }

    pub(crate) fn is_open(&self) -> bool {
        self.initialized
    }

    fn report(&mut self, err: Error) {
        log::warn!("pdf backend: {err}");
        if let Some(hook) = self.diagnostics.as_mut() {
            hook(&err);
        }
    }

    /// Drawing operations outside an open session are swallowed.
    fn ready(&mut self) -> bool {
        if self.initialized {
            true
        } else {
            self.report(Error::NotInitialized);
            false
        }
    }

    /// The matrix taking drawing coordinates to PDF user space: the
    /// current transform followed by the y flip.
    fn device_matrix(&self) -> PdfMatrix {
        PdfMatrix::combine(self.current.to_pdf_matrix(), PdfMatrix::flip(self.height))
    }

    fn begin_drawing(&mut self) {
        self.ops.push(Operation::new(OP_STATE_SAVE, vec![]));
        let m = self.device_matrix();
        self.ops.push(m.into());
    }

    fn end_drawing(&mut self) {
        self.ops.push(Operation::new(OP_STATE_RESTORE, vec![]));
    }

    fn add_ext_gstate(&mut self, gs: ExtGState) -> String {
        let name = format!("GS{}", self.resources.ext_gstates.len() + 1);
        self.resources.ext_gstates.push((name.clone(), gs));
        name
    }

    /// Writes path construction operators for `path` in drawing
    /// coordinates. Quadratic segments are degree-elevated to cubics.
    fn push_path(&mut self, path: &Path) {
        let mut current = Point::default();
        let mut subpath_start = Point::default();
        for element in &path.elements {
            match element {
                PathElement::MoveTo { to } => {
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_MOVE_TO,
                        vec![real(to.x), real(to.y)],
                    ));
                    current = *to;
                    subpath_start = *to;
                }
                PathElement::LineTo { to } => {
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_LINE_TO,
                        vec![real(to.x), real(to.y)],
                    ));
                    current = *to;
                }
                PathElement::QuadTo { ctrl, to } => {
                    let (c1, c2) = elevate_quad(current, *ctrl, *to);
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_4BEZIER,
                        vec![
                            real(c1.x),
                            real(c1.y),
                            real(c2.x),
                            real(c2.y),
                            real(to.x),
                            real(to.y),
                        ],
                    ));
                    current = *to;
                }
                PathElement::CubicTo { ctrl1, ctrl2, to } => {
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_4BEZIER,
                        vec![
                            real(ctrl1.x),
                            real(ctrl1.y),
                            real(ctrl2.x),
                            real(ctrl2.y),
                            real(to.x),
                            real(to.y),
                        ],
                    ));
                    current = *to;
                }
                PathElement::Close => {
                    self.ops
                        .push(Operation::new(OP_PATH_CONST_CLOSE_SUBPATH, vec![]));
                    current = subpath_start;
                }
            }
        }
    }

    /// Like [`push_path`](Self::push_path) but with every point mapped
    /// through `matrix` first. Clip paths are written this way because
    /// they must not sit inside a `q`/`Q` bracket, so the device
    /// transform cannot come from a `cm`.
    fn push_path_transformed(&mut self, path: &Path, matrix: PdfMatrix) {
        let map = |p: Point| {
            let (x, y) = matrix.apply(p.x, p.y);
            Point::new(x, y)
        };
        let mut current = Point::default();
        let mut subpath_start = Point::default();
        for element in &path.elements {
            match element {
                PathElement::MoveTo { to } => {
                    let d = map(*to);
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_MOVE_TO,
                        vec![real(d.x), real(d.y)],
                    ));
                    current = *to;
                    subpath_start = *to;
                }
                PathElement::LineTo { to } => {
                    let d = map(*to);
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_LINE_TO,
                        vec![real(d.x), real(d.y)],
                    ));
                    current = *to;
                }
                PathElement::QuadTo { ctrl, to } => {
                    let (c1, c2) = elevate_quad(current, *ctrl, *to);
                    let (c1, c2, d) = (map(c1), map(c2), map(*to));
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_4BEZIER,
                        vec![
                            real(c1.x),
                            real(c1.y),
                            real(c2.x),
                            real(c2.y),
                            real(d.x),
                            real(d.y),
                        ],
                    ));
                    current = *to;
                }
                PathElement::CubicTo { ctrl1, ctrl2, to } => {
                    let (c1, c2, d) = (map(*ctrl1), map(*ctrl2), map(*to));
                    self.ops.push(Operation::new(
                        OP_PATH_CONST_4BEZIER,
                        vec![
                            real(c1.x),
                            real(c1.y),
                            real(c2.x),
                            real(c2.y),
                            real(d.x),
                            real(d.y),
                        ],
                    ));
                    current = *to;
                }
                PathElement::Close => {
                    self.ops
                        .push(Operation::new(OP_PATH_CONST_CLOSE_SUBPATH, vec![]));
                    current = subpath_start;
                }
            }
        }
    }

    /// Sets the non-stroking paint for the following fill. Gradients
    /// register a shading pattern, translucent solids an `ExtGState`.
    fn apply_fill_brush(&mut self, brush: &Brush) {
        match brush {
            Brush::Solid { color } => self.apply_solid_fill(*color),
            Brush::LinearGradient { start, end, stops } => {
                let geometry = ShadingGeometry::Axial {
                    coords: [start.x, start.y, end.x, end.y],
                };
                self.apply_gradient_fill(geometry, stops);
            }
            Brush::RadialGradient {
                center,
                start_radius,
                focus,
                end_radius,
                stops,
            } => {
                let geometry = ShadingGeometry::Radial {
                    coords: [
                        center.x,
                        center.y,
                        *start_radius,
                        focus.x,
                        focus.y,
                        *end_radius,
                    ],
                };
                self.apply_gradient_fill(geometry, stops);
            }
            // No PDF equivalent. Degrades to a solid fill with the
            // first stop color, always opaque.
            Brush::SweepGradient { stops, .. } => {
                let color = stops.first().map(|s| s.color).unwrap_or(Rgba::BLACK);
                self.ops
                    .push(PdfColor::Fill(Rgba::rgb(color.r, color.g, color.b)).into());
            }
        }
    }

    fn apply_solid_fill(&mut self, color: Rgba) {
        if !color.is_opaque() {
            let name = self.add_ext_gstate(ExtGState::fill_alpha(color.alpha_component()));
            self.ops.push(Operation::new(
                OP_PATH_STATE_SET_GS_FROM_PARAM_DICT,
                vec![Object::Name(name.into())],
            ));
        }
        self.ops.push(PdfColor::Fill(color).into());
    }

    fn apply_gradient_fill(&mut self, geometry: ShadingGeometry, stops: &[GradientStop]) {
        match stops {
            [] => {
                self.report(Error::EmptyGradient);
                self.apply_solid_fill(Rgba::BLACK);
            }
            [single] => self.apply_solid_fill(single.color),
            _ => {
                let name = format!("P{}", self.resources.patterns.len() + 1);
                let matrix = self.device_matrix();
                self.resources.patterns.push((
                    name.clone(),
                    ShadingPattern {
                        geometry,
                        stops: stops.to_vec(),
                        matrix,
                    },
                ));
                self.ops.push(Operation::new(
                    OP_COLOR_SET_FILL_CS,
                    vec![Object::Name("Pattern".into())],
                ));
                self.ops.push(Operation::new(
                    OP_COLOR_SET_FILL_COLOR_ICC,
                    vec![Object::Name(name.into())],
                ));
            }
        }
    }

    /// Sets the stroking color. Strokes are always opaque; gradient
    /// brushes reduce to their first stop.
    fn apply_stroke_brush(&mut self, brush: &Brush) {
        let color = brush.solid_color();
        self.ops
            .push(PdfColor::Outline(Rgba::rgb(color.r, color.g, color.b)).into());
    }

    fn apply_stroke_settings(&mut self, stroke: &Stroke) {
        self.ops.push(Operation::new(
            OP_PATH_STATE_SET_LINE_WIDTH,
            vec![real(stroke.width)],
        ));
        self.ops.push(stroke.cap.into());
        self.ops.push(stroke.join.into());
        if stroke.miter_limit > 0.0 {
            self.ops.push(Operation::new(
                OP_PATH_STATE_SET_MITER_LIMIT,
                vec![real(stroke.miter_limit)],
            ));
        }
        if !stroke.dash_pattern.is_empty() {
            let dashes = stroke.dash_pattern.iter().map(|d| real(*d)).collect();
            self.ops.push(Operation::new(
                OP_PATH_STATE_SET_LINE_DASH,
                vec![Object::Array(dashes), real(stroke.dash_offset)],
            ));
        }
    }

    fn serialize_single_page(&self) -> Result<lopdf::Document> {
        serialize::serialize_document(
            std::slice::from_ref(self),
            &DocumentInfo::default(),
            &SaveOptions::default(),
        )
    }
}

impl Canvas for PdfCanvas {
    fn begin(&mut self, width: f64, height: f64) -> Result<()> {
        self.width = width;
        self.height = height;
        self.ops.clear();
        self.resources = PageResources::default();
        self.current = Transform::identity();
        self.saved.clear();
        self.initialized = true;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(Error::NotInitialized);
        }
        // Unwind unbalanced saves so the content stream stays valid.
        while self.saved.pop().is_some() {
            self.ops.push(Operation::new(OP_STATE_RESTORE, vec![]));
        }
        self.initialized = false;
        Ok(())
    }

    fn save(&mut self) {
        if !self.ready() {
            return;
        }
        self.ops.push(Operation::new(OP_STATE_SAVE, vec![]));
        self.saved.push(self.current);
    }

    fn restore(&mut self) {
        if !self.ready() {
            return;
        }
        // A restore without a matching save does nothing at all, it
        // must not emit an unbalanced Q.
        if let Some(previous) = self.saved.pop() {
            self.ops.push(Operation::new(OP_STATE_RESTORE, vec![]));
            self.current = previous;
        }
    }

    fn set_transform(&mut self, transform: Transform) {
        if !self.ready() {
            return;
        }
        // Absolute replacement. The new value takes effect through the
        // per-operation device matrix, no operator is emitted here.
        self.current = transform;
    }

    fn set_clip(&mut self, path: &Path, rule: FillRule) {
        if !self.ready() || path.is_empty() {
            return;
        }
        // The clip has to survive until the enclosing restore, so it
        // is written outside any q/Q bracket with pre-transformed
        // coordinates.
        let matrix = self.device_matrix();
        self.push_path_transformed(path, matrix);
        self.ops.push(Operation::new(rule.get_clip_op(), vec![]));
        self.ops.push(Operation::new(OP_PATH_PAINT_END, vec![]));
    }

    fn clear_clip(&mut self) {
        // PDF can only intersect clip regions, widening one again is
        // impossible without restoring an earlier graphics state.
    }

    fn fill_path(&mut self, path: &Path, brush: &Brush, rule: FillRule) {
        if !self.ready() || path.is_empty() {
            return;
        }
        self.begin_drawing();
        self.apply_fill_brush(brush);
        self.push_path(path);
        self.ops.push(Operation::new(rule.get_fill_op(), vec![]));
        self.end_drawing();
    }

    fn stroke_path(&mut self, path: &Path, brush: &Brush, stroke: &Stroke) {
        if !self.ready() || path.is_empty() {
            return;
        }
        self.begin_drawing();
        self.apply_stroke_brush(brush);
        self.apply_stroke_settings(stroke);
        self.push_path(path);
        self.ops.push(Operation::new(OP_PATH_PAINT_STROKE, vec![]));
        self.end_drawing();
    }

    fn fill_rect(&mut self, rect: Rect, brush: &Brush) {
        if !self.ready() {
            return;
        }
        self.begin_drawing();
        self.apply_fill_brush(brush);
        self.ops.push(Operation::new(
            OP_PATH_CONST_RECT,
            vec![
                real(rect.x),
                real(rect.y),
                real(rect.width),
                real(rect.height),
            ],
        ));
        self.ops
            .push(Operation::new(OP_PATH_PAINT_FILL_NZ, vec![]));
        self.end_drawing();
    }

    fn draw_image(&mut self, image: &RawImage, _src: Rect, dst: Rect, options: ImageOptions) {
        if !self.ready() {
            return;
        }
        let expected = image.width * image.height * image.format.bytes_per_pixel();
        if image.pixels.len() != expected {
            self.report(Error::InvalidImageBuffer {
                width: image.width,
                height: image.height,
                expected,
                found: image.pixels.len(),
            });
            return;
        }

        let name = format!("Im{}", self.resources.xobjects.len() + 1);
        self.resources.xobjects.push((name.clone(), image.clone()));

        self.begin_drawing();
        if options.alpha < 1.0 {
            let gs = self.add_ext_gstate(ExtGState::fill_alpha(options.alpha));
            self.ops.push(Operation::new(
                OP_PATH_STATE_SET_GS_FROM_PARAM_DICT,
                vec![Object::Name(gs.into())],
            ));
        }
        // Maps the image unit square into dst, flipped so the first
        // pixel row lands at the top.
        let placement = PdfMatrix([
            dst.width,
            0.0,
            0.0,
            -dst.height,
            dst.x,
            dst.y + dst.height,
        ]);
        self.ops.push(placement.into());
        self.ops.push(Operation::new(
            OP_XOBJECT_DO,
            vec![Object::Name(name.into())],
        ));
        self.end_drawing();
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, face: Option<&FontFace>, brush: &Brush) {
        if !self.ready() || text.is_empty() {
            return;
        }
        let size = face.map(FontFace::resolve_size).unwrap_or(DEFAULT_FONT_SIZE);
        // TODO: pick the builtin font from a face family once faces
        // carry one, instead of hardcoding Helvetica.
        let font = BuiltinFont::default();
        self.resources.fonts.insert(font);

        let color = brush.solid_color();

        self.begin_drawing();
        self.ops
            .push(PdfColor::Fill(Rgba::rgb(color.r, color.g, color.b)).into());
        self.ops.push(Operation::new(OP_TEXT_BEGIN, vec![]));
        self.ops.push(Operation::new(
            OP_TEXT_STATE_SET_FONT,
            vec![Object::Name(font.get_pdf_id().into()), real(size)],
        ));
        // The device matrix flips y so drawing coordinates land right,
        // which would also mirror the glyphs. A -1 in the text matrix
        // flips them back while keeping the baseline position.
        self.ops.push(Operation::new(
            OP_TEXT_POSITION_SET_MATRIX,
            vec![
                real(1.0),
                real(0.0),
                real(0.0),
                real(-1.0),
                real(x),
                real(y),
            ],
        ));
        self.ops.push(Operation::new(
            OP_TEXT_SHOW,
            vec![Object::String(encode_win_ansi(text), StringFormat::Hexadecimal)],
        ));
        self.ops.push(Operation::new(OP_TEXT_END, vec![]));
        self.end_drawing();
    }
}

impl WriterBackend for PdfCanvas {
    fn write_to(&mut self, w: &mut dyn Write) -> Result<()> {
        if self.initialized {
            self.end().map_err(|e| Error::Finish(Box::new(e)))?;
        }
        let mut doc = self.serialize_single_page()?;
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        w.write_all(&bytes)?;
        Ok(())
    }
}

impl FileBackend for PdfCanvas {
    fn save_to_file(&mut self, path: &std::path::Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

/// Degree elevation of a quadratic bezier from `from` over `ctrl` to
/// `to` into the equivalent cubic control points.
fn elevate_quad(from: Point, ctrl: Point, to: Point) -> (Point, Point) {
    let c1 = Point::new(
        from.x + 2.0 / 3.0 * (ctrl.x - from.x),
        from.y + 2.0 / 3.0 * (ctrl.y - from.y),
    );
    let c2 = Point::new(
        to.x + 2.0 / 3.0 * (ctrl.x - to.x),
        to.y + 2.0 / 3.0 * (ctrl.y - to.y),
    );
    (c1, c2)
}
