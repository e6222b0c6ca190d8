//! Colors, gradient stops and brushes.

use lopdf::content::Operation;
use serde_derive::{Deserialize, Serialize};

use crate::glob_defines::{OP_COLOR_SET_FILL_CS_DEVICERGB, OP_COLOR_SET_STROKE_CS_DEVICERGB};
use crate::graphics::Point;

/// An 8-bit RGBA color.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba { r, g, b, a }
    }

    /// Fully opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 255 }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// RGB channels scaled into the 0.0 to 1.0 range PDF expects.
    pub(crate) fn rgb_components(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Alpha channel scaled into the 0.0 to 1.0 range.
    pub(crate) fn alpha_component(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

/// One color stop of a gradient, at `offset` in the 0.0 to 1.0 range.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba,
}

impl GradientStop {
    pub const fn new(offset: f64, color: Rgba) -> Self {
        GradientStop { offset, color }
    }
}

/// A paint source for fills, strokes and text.
///
/// Linear and radial gradients keep their stops in the order given.
/// Sweep (angular) gradients have no PDF equivalent and always degrade
/// to a solid fill of their first stop's color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Brush {
    Solid {
        color: Rgba,
    },
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: Point,
        start_radius: f64,
        focus: Point,
        end_radius: f64,
        stops: Vec<GradientStop>,
    },
    SweepGradient {
        center: Point,
        stops: Vec<GradientStop>,
    },
}

impl Brush {
    pub fn solid(color: Rgba) -> Self {
        Brush::Solid { color }
    }

    /// Reduces the brush to a single color: the solid color itself, or
    /// the first gradient stop. Brushes without any usable color reduce
    /// to black.
    pub fn solid_color(&self) -> Rgba {
        match self {
            Brush::Solid { color } => *color,
            Brush::LinearGradient { stops, .. }
            | Brush::RadialGradient { stops, .. }
            | Brush::SweepGradient { stops, .. } => {
                stops.first().map(|s| s.color).unwrap_or(Rgba::BLACK)
            }
        }
    }
}

impl Default for Brush {
    fn default() -> Self {
        Brush::Solid { color: Rgba::BLACK }
    }
}

/// Wrapper around a color bound to a painting role, so it can turn into
/// the right color operator.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum PdfColor {
    Fill(Rgba),
    Outline(Rgba),
}

impl From<PdfColor> for Operation {
    fn from(val: PdfColor) -> Self {
        use lopdf::Object::Real;
        let (operator, color) = match val {
            PdfColor::Fill(c) => (OP_COLOR_SET_FILL_CS_DEVICERGB, c),
            PdfColor::Outline(c) => (OP_COLOR_SET_STROKE_CS_DEVICERGB, c),
        };
        let operands = color.rgb_components().iter().map(|v| Real(*v)).collect();
        Operation::new(operator, operands)
    }
}
