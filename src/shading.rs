//! Shading patterns and graphics state parameter dictionaries.
//!
//! Gradient fills become `/Pattern` color spaces referencing a
//! `PatternType 2` (shading) pattern. The pattern matrix maps pattern
//! space to the default space of the page, so the device transform
//! active at fill time is baked in here instead of relying on the CTM.

use lopdf::{Dictionary as LoDictionary, Object, Object::*};

use crate::{color::GradientStop, matrix::PdfMatrix};

/// Geometry of a shading, in the coordinates the stops were given in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShadingGeometry {
    /// Axial shading along the line `(x0, y0)` to `(x1, y1)`.
    Axial { coords: [f64; 4] },
    /// Radial shading between a start and an end circle, stored in
    /// PDF operand order `[x0 y0 r0 x1 y1 r1]`.
    Radial { coords: [f64; 6] },
}

/// A fully resolved shading pattern, ready to serialize.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ShadingPattern {
    pub geometry: ShadingGeometry,
    pub stops: Vec<GradientStop>,
    pub matrix: PdfMatrix,
}

impl ShadingPattern {
    /// Builds the `/Pattern` dictionary, with the shading and its
    /// color function inlined.
    pub fn to_pattern_dict(&self) -> LoDictionary {
        let (shading_type, coords): (i64, Vec<Object>) = match &self.geometry {
            ShadingGeometry::Axial { coords } => {
                (2, coords.iter().map(|c| Real(*c as f32)).collect())
            }
            ShadingGeometry::Radial { coords } => {
                (3, coords.iter().map(|c| Real(*c as f32)).collect())
            }
        };

        let stops = normalize_stops(&self.stops);
        let shading = LoDictionary::from_iter(vec![
            ("ShadingType", Integer(shading_type)),
            ("ColorSpace", Name("DeviceRGB".into())),
            ("Coords", Array(coords)),
            ("Function", Dictionary(stops_to_function(&stops))),
            ("Extend", Array(vec![Boolean(true), Boolean(true)])),
        ]);

        LoDictionary::from_iter(vec![
            ("Type", Name("Pattern".into())),
            ("PatternType", Integer(2)),
            ("Matrix", self.matrix.into()),
            ("Shading", Dictionary(shading)),
        ])
    }
}

/// Optional overrides for the `gs` operator, keyed into the page
/// `/ExtGState` dictionary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ExtGState {
    pub fill_alpha: Option<f64>,
    pub stroke_alpha: Option<f64>,
}

impl ExtGState {
    pub fn fill_alpha(alpha: f64) -> Self {
        ExtGState {
            fill_alpha: Some(alpha),
            stroke_alpha: None,
        }
    }

    pub fn to_dict(&self) -> LoDictionary {
        let mut dict = LoDictionary::from_iter(vec![("Type", Name("ExtGState".into()))]);
        if let Some(ca) = self.fill_alpha {
            dict.set("ca", Real(ca as f32));
        }
        if let Some(ca) = self.stroke_alpha {
            dict.set("CA", Real(ca as f32));
        }
        dict
    }
}

// The function domain is [0, 1] over the whole axis. Pad the stop list
// so it starts at offset 0 and ends at offset 1, duplicating the edge
// colors where needed.
fn normalize_stops(stops: &[GradientStop]) -> Vec<GradientStop> {
    let mut out: Vec<GradientStop> = Vec::with_capacity(stops.len() + 2);
    match stops {
        [] => {}
        [single] => {
            out.push(GradientStop {
                offset: 0.0,
                color: single.color,
            });
            out.push(GradientStop {
                offset: 1.0,
                color: single.color,
            });
        }
        [first, .., last] => {
            if first.offset > 0.0 {
                out.push(GradientStop {
                    offset: 0.0,
                    color: first.color,
                });
            }
            out.extend(stops.iter().cloned());
            if last.offset < 1.0 {
                out.push(GradientStop {
                    offset: 1.0,
                    color: last.color,
                });
            }
        }
    }
    out
}

fn stops_to_function(stops: &[GradientStop]) -> LoDictionary {
    if stops.len() <= 2 {
        let start = stops.first().map(|s| s.color).unwrap_or_default();
        let end = stops.last().map(|s| s.color).unwrap_or_default();
        return exponential_function(start, end);
    }

    // Type 3 stitching function over one exponential segment per
    // adjacent stop pair.
    let functions: Vec<Object> = stops
        .windows(2)
        .map(|pair| Dictionary(exponential_function(pair[0].color, pair[1].color)))
        .collect();
    let bounds: Vec<Object> = stops[1..stops.len() - 1]
        .iter()
        .map(|s| Real(s.offset as f32))
        .collect();
    let encode: Vec<Object> = stops
        .windows(2)
        .flat_map(|_| vec![Real(0.0), Real(1.0)])
        .collect();

    LoDictionary::from_iter(vec![
        ("FunctionType", Integer(3)),
        ("Domain", Array(vec![Real(0.0), Real(1.0)])),
        ("Functions", Array(functions)),
        ("Bounds", Array(bounds)),
        ("Encode", Array(encode)),
    ])
}

fn exponential_function(start: crate::color::Rgba, end: crate::color::Rgba) -> LoDictionary {
    let c0: Vec<Object> = start
        .rgb_components()
        .iter()
        .map(|c| Real(*c))
        .collect();
    let c1: Vec<Object> = end.rgb_components().iter().map(|c| Real(*c)).collect();
    LoDictionary::from_iter(vec![
        ("FunctionType", Integer(2)),
        ("Domain", Array(vec![Real(0.0), Real(1.0)])),
        ("C0", Array(c0)),
        ("C1", Array(c1)),
        ("N", Real(1.0)),
    ])
}
