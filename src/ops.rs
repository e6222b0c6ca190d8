//! Serializable drawing commands.
//!
//! A [`Recording`] is the host-side representation of one page:
//! command list plus page size. Recordings can be stored as JSON and
//! replayed onto any [`Canvas`] later, which is also how the
//! integration tests drive backends.

use serde_derive::{Deserialize, Serialize};

use crate::{
    canvas::Canvas,
    color::Brush,
    error::Result,
    graphics::{FillRule, FontFace, ImageOptions, Path, Rect, Stroke},
    image::RawImage,
    matrix::Transform,
};

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "type", content = "data")]
pub enum DrawOp {
    /// Pushes the current transform and clip
    Save,
    /// Pops the most recent save, no-op on an empty stack
    Restore,
    /// Replaces the current transform
    SetTransform { transform: Transform },
    /// Intersects the current clip with a path
    SetClip { path: Path, rule: FillRule },
    /// Carried for interface compatibility, does nothing
    ClearClip,
    /// Fills a path with a brush
    FillPath {
        path: Path,
        brush: Brush,
        rule: FillRule,
    },
    /// Strokes a path outline
    StrokePath {
        path: Path,
        brush: Brush,
        stroke: Stroke,
    },
    /// Fills an axis-aligned rectangle
    FillRect { rect: Rect, brush: Brush },
    /// Draws a bitmap scaled into a destination rectangle
    DrawImage {
        image: RawImage,
        src: Rect,
        dst: Rect,
        options: ImageOptions,
    },
    /// Draws one line of text at a baseline position
    DrawText {
        text: String,
        x: f64,
        y: f64,
        face: Option<FontFace>,
        brush: Brush,
    },
}

/// A recorded page: size in points plus the commands drawn on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<DrawOp>,
}

impl Recording {
    pub fn new(width: f64, height: f64) -> Self {
        Recording {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    /// Replays the recording as one full session: `begin`, every
    /// command in order, then `end`.
    pub fn replay(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.begin(self.width, self.height)?;
        for op in &self.ops {
            match op {
                DrawOp::Save => canvas.save(),
                DrawOp::Restore => canvas.restore(),
                DrawOp::SetTransform { transform } => canvas.set_transform(*transform),
                DrawOp::SetClip { path, rule } => canvas.set_clip(path, *rule),
                DrawOp::ClearClip => canvas.clear_clip(),
                DrawOp::FillPath { path, brush, rule } => canvas.fill_path(path, brush, *rule),
                DrawOp::StrokePath {
                    path,
                    brush,
                    stroke,
                } => canvas.stroke_path(path, brush, stroke),
                DrawOp::FillRect { rect, brush } => canvas.fill_rect(*rect, brush),
                DrawOp::DrawImage {
                    image,
                    src,
                    dst,
                    options,
                } => canvas.draw_image(image, *src, *dst, *options),
                DrawOp::DrawText {
                    text,
                    x,
                    y,
                    face,
                    brush,
                } => canvas.draw_text(text, *x, *y, face.as_ref(), brush),
            }
        }
        canvas.end()
    }
}
