//! Built-in PDF fonts and text encoding.
//!
//! Text is rendered with the 14 standard Type 1 fonts that every PDF
//! viewer ships. They need no embedding, only a small font dictionary
//! per page, which keeps the output self-contained.

use lopdf::{Dictionary as LoDictionary, Object::Name};
use serde_derive::{Deserialize, Serialize};

/// Font size in points used when a text call carries no usable face.
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

/// The 14 built-in fonts prescribed by the PDF specification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinFont {
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierOblique,
    CourierBold,
    CourierBoldOblique,
    Symbol,
    ZapfDingbats,
}

impl Default for BuiltinFont {
    fn default() -> Self {
        BuiltinFont::Helvetica
    }
}

impl BuiltinFont {
    /// Returns the PostScript `BaseFont` name.
    pub fn get_id(&self) -> &'static str {
        use self::BuiltinFont::*;
        match self {
            TimesRoman => "Times-Roman",
            TimesBold => "Times-Bold",
            TimesItalic => "Times-Italic",
            TimesBoldItalic => "Times-BoldItalic",
            Helvetica => "Helvetica",
            HelveticaBold => "Helvetica-Bold",
            HelveticaOblique => "Helvetica-Oblique",
            HelveticaBoldOblique => "Helvetica-BoldOblique",
            Courier => "Courier",
            CourierOblique => "Courier-Oblique",
            CourierBold => "Courier-Bold",
            CourierBoldOblique => "Courier-BoldOblique",
            Symbol => "Symbol",
            ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Returns the resource name the font is registered under in the
    /// page `/Font` dictionary.
    pub fn get_pdf_id(&self) -> &'static str {
        use self::BuiltinFont::*;
        match self {
            TimesRoman => "F1",
            TimesBold => "F2",
            TimesItalic => "F3",
            TimesBoldItalic => "F4",
            Helvetica => "F5",
            HelveticaBold => "F6",
            HelveticaOblique => "F7",
            HelveticaBoldOblique => "F8",
            Courier => "F9",
            CourierOblique => "F10",
            CourierBold => "F11",
            CourierBoldOblique => "F12",
            Symbol => "F13",
            ZapfDingbats => "F14",
        }
    }

    /// Parses a `BaseFont` name back into the enum.
    pub fn from_id(s: &str) -> Option<Self> {
        use self::BuiltinFont::*;
        match s {
            "Times-Roman" => Some(TimesRoman),
            "Times-Bold" => Some(TimesBold),
            "Times-Italic" => Some(TimesItalic),
            "Times-BoldItalic" => Some(TimesBoldItalic),
            "Helvetica" => Some(Helvetica),
            "Helvetica-Bold" => Some(HelveticaBold),
            "Helvetica-Oblique" => Some(HelveticaOblique),
            "Helvetica-BoldOblique" => Some(HelveticaBoldOblique),
            "Courier" => Some(Courier),
            "Courier-Oblique" => Some(CourierOblique),
            "Courier-Bold" => Some(CourierBold),
            "Courier-BoldOblique" => Some(CourierBoldOblique),
            "Symbol" => Some(Symbol),
            "ZapfDingbats" => Some(ZapfDingbats),
            _ => None,
        }
    }

    /// Symbolic fonts carry their own built-in encoding and must not
    /// be remapped to WinAnsi.
    pub(crate) fn is_symbolic(&self) -> bool {
        matches!(self, BuiltinFont::Symbol | BuiltinFont::ZapfDingbats)
    }

    /// Builds the Type 1 font dictionary for this font.
    pub(crate) fn to_font_dict(self) -> LoDictionary {
        let mut dict = LoDictionary::from_iter(vec![
            ("Type", Name("Font".into())),
            ("Subtype", Name("Type1".into())),
            ("BaseFont", Name(self.get_id().into())),
        ]);
        if !self.is_symbolic() {
            dict.set("Encoding", Name("WinAnsiEncoding".into()));
        }
        dict
    }
}

/// Encodes text as WinAnsi (Windows-1252) bytes for a `Tj` operand.
///
/// Characters outside the codepage are replaced with `?` rather than
/// dropped, so string lengths stay stable.
pub(crate) fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    let cp = c as u32;
    match c {
        _ if cp < 0x80 => cp as u8,
        '\u{20AC}' => 0x80, // euro sign
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ if (0xA0..=0xFF).contains(&cp) => cp as u8,
        _ => b'?',
    }
}
