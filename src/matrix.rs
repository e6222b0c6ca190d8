//! Affine transforms: the drawing-space matrix set by the host and the
//! PDF-space matrix written into content streams.

use lopdf::content::Operation;
use serde_derive::{Deserialize, Serialize};

use crate::glob_defines::OP_STATE_CONCAT_MATRIX;

/// A 2D affine transform in drawing space (top-left origin, Y down).
///
/// Row-major layout `[a b c; d e f]`, so a point maps as
/// `x' = a*x + b*y + c` and `y' = d*x + e*y + f`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: 1.0,
            f: 0.0,
        }
    }

    /// Translation by `(tx, ty)`.
    pub fn translate(tx: f64, ty: f64) -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: tx,
            d: 0.0,
            e: 1.0,
            f: ty,
        }
    }

    /// Scale by `(sx, sy)` around the origin.
    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: sy,
            f: 0.0,
        }
    }

    /// Rotation by `theta` radians around the origin.
    pub fn rotate(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Transform {
            a: cos,
            b: -sin,
            c: 0.0,
            d: sin,
            e: cos,
            f: 0.0,
        }
    }

    /// Composes two transforms: the result applies `other` first, then
    /// `self` (the matrix product `self × other`).
    pub fn then(&self, other: &Transform) -> Self {
        Transform {
            a: self.a.mul_add(other.a, self.b * other.d),
            b: self.a.mul_add(other.b, self.b * other.e),
            c: self.a.mul_add(other.c, self.b.mul_add(other.f, self.c)),
            d: self.d.mul_add(other.a, self.e * other.d),
            e: self.d.mul_add(other.b, self.e * other.e),
            f: self.d.mul_add(other.c, self.e.mul_add(other.f, self.f)),
        }
    }

    /// Maps a drawing-space point through this transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a.mul_add(x, self.b.mul_add(y, self.c)),
            self.d.mul_add(x, self.e.mul_add(y, self.f)),
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::identity()
    }

    /// Reorders the row-major drawing matrix into PDF operand order.
    ///
    /// PDF matrices are written `[a b c d e f]` for the matrix
    /// `[a c e; b d f; 0 0 1]` applied to row vectors, so the linear part
    /// transposes: `pdf = [A, D, B, E, C, F]`.
    pub fn to_pdf_matrix(&self) -> PdfMatrix {
        PdfMatrix([self.a, self.d, self.b, self.e, self.c, self.f])
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}

/// A PDF transformation matrix, `[a b c d e f]` in operand order.
///
/// Points are mapped as row vectors: `x' = a*x + c*y + e` and
/// `y' = b*x + d*y + f`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PdfMatrix(pub [f64; 6]);

impl PdfMatrix {
    pub const IDENTITY: PdfMatrix = PdfMatrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    /// The top-left to bottom-left coordinate flip for a page of the
    /// given height: translate by the height, then mirror the Y axis.
    pub fn flip(height: f64) -> Self {
        PdfMatrix([1.0, 0.0, 0.0, -1.0, 0.0, height])
    }

    pub fn as_array(&self) -> [f64; 6] {
        self.0
    }

    /// Combines two matrices into the one that applies `a` first and
    /// then `b` (row-vector convention, `a × b`).
    pub fn combine(a: PdfMatrix, b: PdfMatrix) -> PdfMatrix {
        let (a, b) = (a.0, b.0);

        let a = [
            [a[0], a[1], 0.0, 0.0],
            [a[2], a[3], 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [a[4], a[5], 0.0, 1.0],
        ];

        let b = [
            [b[0], b[1], 0.0, 0.0],
            [b[2], b[3], 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [b[4], b[5], 0.0, 1.0],
        ];

        let result = [
            [
                a[0][0].mul_add(b[0][0], a[0][1].mul_add(b[1][0], a[0][2].mul_add(b[2][0], a[0][3] * b[3][0]))),
                a[0][0].mul_add(b[0][1], a[0][1].mul_add(b[1][1], a[0][2].mul_add(b[2][1], a[0][3] * b[3][1]))),
            ],
            [
                a[1][0].mul_add(b[0][0], a[1][1].mul_add(b[1][0], a[1][2].mul_add(b[2][0], a[1][3] * b[3][0]))),
                a[1][0].mul_add(b[0][1], a[1][1].mul_add(b[1][1], a[1][2].mul_add(b[2][1], a[1][3] * b[3][1]))),
            ],
            [
                a[3][0].mul_add(b[0][0], a[3][1].mul_add(b[1][0], a[3][2].mul_add(b[2][0], a[3][3] * b[3][0]))),
                a[3][0].mul_add(b[0][1], a[3][1].mul_add(b[1][1], a[3][2].mul_add(b[2][1], a[3][3] * b[3][1]))),
            ],
        ];

        PdfMatrix([
            result[0][0],
            result[0][1],
            result[1][0],
            result[1][1],
            result[2][0],
            result[2][1],
        ])
    }

    /// Maps a point through this matrix (row-vector convention).
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = self.0;
        (
            m[0].mul_add(x, m[2].mul_add(y, m[4])),
            m[1].mul_add(x, m[3].mul_add(y, m[5])),
        )
    }
}

impl From<PdfMatrix> for Operation {
    fn from(val: PdfMatrix) -> Self {
        use lopdf::Object::Real;
        let matrix = val.0.iter().map(|v| Real(*v as f32)).collect();
        Operation::new(OP_STATE_CONCAT_MATRIX, matrix)
    }
}

impl From<PdfMatrix> for lopdf::Object {
    fn from(val: PdfMatrix) -> Self {
        use lopdf::Object::{Array, Real};
        Array(val.0.iter().map(|v| Real(*v as f32)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_identity_maps_to_unit_pdf_matrix() {
        let m = Transform::identity().to_pdf_matrix();
        assert_eq!(m.as_array(), [1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_field_reordering_transposes_linear_part() {
        // row-major [1 2 3; 4 5 6] becomes [1 4 2 5 3 6] in operand order
        let m = Transform {
            a: 1.0,
            b: 2.0,
            c: 3.0,
            d: 4.0,
            e: 5.0,
            f: 6.0,
        };
        assert_eq!(m.to_pdf_matrix().as_array(), [1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_translate_and_scale_arrays() {
        let t = Transform::translate(150.0, 50.0).to_pdf_matrix();
        assert_eq!(t.as_array(), [1.0, 0.0, 0.0, 1.0, 150.0, 50.0]);

        let s = Transform::scale(2.0, 4.0).to_pdf_matrix();
        assert_eq!(s.as_array(), [2.0, 0.0, 0.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_then_applies_right_hand_side_first() {
        // scale by 2, then translate by 10: x = 1 maps to 12
        let m = Transform::translate(10.0, 0.0).then(&Transform::scale(2.0, 2.0));
        let (x, y) = m.apply(1.0, 1.0);
        assert_eq!((x, y), (12.0, 2.0));
    }

    #[test]
    fn test_flip_mirrors_y() {
        let flip = PdfMatrix::flip(100.0);
        assert_eq!(flip.apply(10.0, 30.0), (10.0, 70.0));
        assert_eq!(flip.apply(0.0, 0.0), (0.0, 100.0));
    }

    #[test]
    fn test_flip_equals_translate_then_mirror() {
        let composed = Transform::translate(0.0, 100.0)
            .then(&Transform::scale(1.0, -1.0))
            .to_pdf_matrix();
        assert_eq!(composed, PdfMatrix::flip(100.0));
    }

    #[test]
    fn test_combine_applies_left_hand_side_first() {
        let translate = Transform::translate(10.0, 20.0).to_pdf_matrix();
        let flip = PdfMatrix::flip(100.0);
        let device = PdfMatrix::combine(translate, flip);
        // (0, 0) translates to (10, 20), the flip lands it at (10, 80)
        assert_eq!(device.apply(0.0, 0.0), (10.0, 80.0));
    }

    #[test]
    fn test_combine_with_identity_is_flip() {
        let device = PdfMatrix::combine(PdfMatrix::IDENTITY, PdfMatrix::flip(200.0));
        assert_eq!(device, PdfMatrix::flip(200.0));
        // a drawing-space point (x, y) lands at (x, height - y)
        assert_eq!(device.apply(15.0, 40.0), (15.0, 160.0));
    }
}
