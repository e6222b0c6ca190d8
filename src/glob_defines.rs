#![allow(dead_code)]

//! PDF operator mnemonics, collected to reduce typing mistakes

/// ## Special graphics state

/// Save the current graphics state on the state stack
pub(crate) const OP_STATE_SAVE: &str = "q";
/// Restore the graphics state from the state stack
pub(crate) const OP_STATE_RESTORE: &str = "Q";
/// Concatenate matrix to the current transformation matrix
pub(crate) const OP_STATE_CONCAT_MATRIX: &str = "cm";

/// ## General graphics state

/// Set line width
pub(crate) const OP_PATH_STATE_SET_LINE_WIDTH: &str = "w";
/// Set line cap (PDF 32000-1 Table 57: capital J)
pub(crate) const OP_PATH_STATE_SET_LINE_CAP: &str = "J";
/// Set line join (lowercase j)
pub(crate) const OP_PATH_STATE_SET_LINE_JOIN: &str = "j";
/// Set miter limit
pub(crate) const OP_PATH_STATE_SET_MITER_LIMIT: &str = "M";
/// Set line dash pattern
pub(crate) const OP_PATH_STATE_SET_LINE_DASH: &str = "d";
/// (PDF 1.2) Set graphics state from parameter dictionary
pub(crate) const OP_PATH_STATE_SET_GS_FROM_PARAM_DICT: &str = "gs";

/// ## Color

/// non-stroking color space (PDF 1.1)
pub(crate) const OP_COLOR_SET_FILL_CS: &str = "cs";
/// stroking color space (PDF 1.1)
pub(crate) const OP_COLOR_SET_STROKE_CS: &str = "CS";
/// set fill color (PDF 1.2) with support for patterns
pub(crate) const OP_COLOR_SET_FILL_COLOR_ICC: &str = "scn";
/// set stroking color (PDF 1.2) with support for patterns
pub(crate) const OP_COLOR_SET_STROKE_COLOR_ICC: &str = "SCN";
/// Set the fill color space to DeviceRGB
pub(crate) const OP_COLOR_SET_FILL_CS_DEVICERGB: &str = "rg";
/// Set the stroking color space to DeviceRGB
pub(crate) const OP_COLOR_SET_STROKE_CS_DEVICERGB: &str = "RG";

/// ## Path construction

/// Move to point
pub(crate) const OP_PATH_CONST_MOVE_TO: &str = "m";
/// Straight line to point
pub(crate) const OP_PATH_CONST_LINE_TO: &str = "l";
/// Cubic bezier over four following points
pub(crate) const OP_PATH_CONST_4BEZIER: &str = "c";
/// Add rectangle to the path: x y width height re
pub(crate) const OP_PATH_CONST_RECT: &str = "re";
/// Close current sub-path
pub(crate) const OP_PATH_CONST_CLOSE_SUBPATH: &str = "h";
/// Current path is a clip path, non-zero winding order
pub(crate) const OP_PATH_CONST_CLIP_NZ: &str = "W";
/// Current path is a clip path, even-odd rule
pub(crate) const OP_PATH_CONST_CLIP_EO: &str = "W*";

/// ## Path painting

/// Stroke path
pub(crate) const OP_PATH_PAINT_STROKE: &str = "S";
/// Fill path using nonzero winding number rule
pub(crate) const OP_PATH_PAINT_FILL_NZ: &str = "f";
/// Fill path using even-odd rule
pub(crate) const OP_PATH_PAINT_FILL_EO: &str = "f*";
/// End path without filling or stroking
pub(crate) const OP_PATH_PAINT_END: &str = "n";

/// ## XObjects

/// Invoke named XObject
pub(crate) const OP_XOBJECT_DO: &str = "Do";

/// ## Text

/// Begin a text object
pub(crate) const OP_TEXT_BEGIN: &str = "BT";
/// End a text object
pub(crate) const OP_TEXT_END: &str = "ET";
/// Set text font and size
pub(crate) const OP_TEXT_STATE_SET_FONT: &str = "Tf";
/// Set the text matrix
pub(crate) const OP_TEXT_POSITION_SET_MATRIX: &str = "Tm";
/// Show a text string
pub(crate) const OP_TEXT_SHOW: &str = "Tj";
