//! Drawing-space vocabulary: points, rectangles, paths, fill rules,
//! stroke parameters and text faces.

use lopdf::content::Operation;
use serde_derive::{Deserialize, Serialize};

use crate::glob_defines::{
    OP_PATH_CONST_CLIP_EO, OP_PATH_CONST_CLIP_NZ, OP_PATH_PAINT_FILL_EO, OP_PATH_PAINT_FILL_NZ,
    OP_PATH_STATE_SET_LINE_CAP, OP_PATH_STATE_SET_LINE_JOIN,
};

/// A point in drawing space (top-left origin, Y down), in points.
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl PartialEq for Point {
    // custom compare function because of floating point inaccuracy
    fn eq(&self, other: &Point) -> bool {
        if self.x.is_finite() && self.y.is_finite() && other.x.is_finite() && other.y.is_finite() {
            (self.x * 1000.0).round() == (other.x * 1000.0).round()
                && (self.y * 1000.0).round() == (other.y * 1000.0).round()
        } else {
            false
        }
    }
}

/// An axis-aligned rectangle in drawing space, anchored at its top-left
/// corner.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

/// One segment of a [`Path`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PathElement {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

/// A sequence of path segments in drawing space.
///
/// Quadratic segments are degree-elevated to cubics when the path is
/// written out, since PDF content streams only know cubic beziers.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub elements: Vec<PathElement>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    /// A closed rectangular path, useful for clips and simple fills.
    pub fn from_rect(rect: Rect) -> Self {
        Path::new()
            .move_to(rect.x, rect.y)
            .line_to(rect.x + rect.width, rect.y)
            .line_to(rect.x + rect.width, rect.y + rect.height)
            .line_to(rect.x, rect.y + rect.height)
            .close()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.elements.push(PathElement::MoveTo {
            to: Point::new(x, y),
        });
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.elements.push(PathElement::LineTo {
            to: Point::new(x, y),
        });
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.elements.push(PathElement::QuadTo {
            ctrl: Point::new(cx, cy),
            to: Point::new(x, y),
        });
        self
    }

    pub fn cubic_to(mut self, c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64) -> Self {
        self.elements.push(PathElement::CubicTo {
            ctrl1: Point::new(c1x, c1y),
            ctrl2: Point::new(c2x, c2y),
            to: Point::new(x, y),
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.elements.push(PathElement::Close);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Rule deciding which regions of a path count as inside.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    /// Even-odd rule
    EvenOdd,
    /// Non-zero winding number (default)
    #[default]
    NonZero,
}

impl FillRule {
    /// Gets the operator for a clip path under this rule
    pub fn get_clip_op(&self) -> &'static str {
        match self {
            FillRule::NonZero => OP_PATH_CONST_CLIP_NZ,
            FillRule::EvenOdd => OP_PATH_CONST_CLIP_EO,
        }
    }

    /// Gets the operator for painting the inside of a path under this rule
    pub fn get_fill_op(&self) -> &'static str {
        match self {
            FillRule::NonZero => OP_PATH_PAINT_FILL_NZ,
            FillRule::EvenOdd => OP_PATH_PAINT_FILL_EO,
        }
    }
}

/// Line cap (ending) style, PDF 32000-1 Table 54.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn id(&self) -> i64 {
        match self {
            LineCap::Butt => 0,
            LineCap::Round => 1,
            LineCap::Square => 2,
        }
    }
}

impl From<LineCap> for Operation {
    fn from(val: LineCap) -> Self {
        Operation::new(OP_PATH_STATE_SET_LINE_CAP, vec![val.id().into()])
    }
}

/// Line join style, PDF 32000-1 Table 55.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn id(&self) -> i64 {
        match self {
            LineJoin::Miter => 0,
            LineJoin::Round => 1,
            LineJoin::Bevel => 2,
        }
    }
}

impl From<LineJoin> for Operation {
    fn from(val: LineJoin) -> Self {
        Operation::new(OP_PATH_STATE_SET_LINE_JOIN, vec![val.id().into()])
    }
}

/// Stroke parameters for outlining a path.
///
/// The dash pattern is only written when non-empty and the miter limit
/// only when positive, so a default `Stroke` emits just width, cap and
/// join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Stroke {
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub dash_pattern: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            cap: LineCap::default(),
            join: LineJoin::default(),
            // PDF default miter limit, PDF 32000-1 8.4.3.5
            miter_limit: 10.0,
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

impl Stroke {
    pub fn new(width: f64) -> Self {
        Stroke {
            width,
            ..Default::default()
        }
    }
}

/// Font sizing information supplied with a text draw call.
///
/// The effective size is `size` when positive, else `line_height` when
/// positive, else 12.0.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontFace {
    pub size: f64,
    pub line_height: f64,
}

impl FontFace {
    pub fn with_size(size: f64) -> Self {
        FontFace {
            size,
            line_height: 0.0,
        }
    }

    /// Resolves the effective font size in points.
    pub fn resolve_size(&self) -> f64 {
        if self.size > 0.0 {
            self.size
        } else if self.line_height > 0.0 {
            self.line_height
        } else {
            crate::font::DEFAULT_FONT_SIZE
        }
    }
}

/// Options for drawing an image.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Constant alpha applied to the whole image, 0.0 to 1.0
    pub alpha: f64,
}

impl Default for ImageOptions {
    fn default() -> Self {
        ImageOptions { alpha: 1.0 }
    }
}
