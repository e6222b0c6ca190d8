//! Raw bitmap images and their PDF image XObject form.

use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pixel layout of a [`RawImage`] buffer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RawImageFormat {
    /// 8-bit RGB, 3 bytes per pixel.
    Rgb8,
    /// 8-bit RGBA, 4 bytes per pixel.
    Rgba8,
    /// 8-bit greyscale, 1 byte per pixel.
    Gray8,
}

impl RawImageFormat {
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            RawImageFormat::Rgb8 => 3,
            RawImageFormat::Rgba8 => 4,
            RawImageFormat::Gray8 => 1,
        }
    }

    pub(crate) fn has_alpha(&self) -> bool {
        matches!(self, RawImageFormat::Rgba8)
    }

    fn pdf_color_space(&self) -> &'static str {
        match self {
            RawImageFormat::Rgb8 | RawImageFormat::Rgba8 => "DeviceRGB",
            RawImageFormat::Gray8 => "DeviceGray",
        }
    }
}

/// A decoded bitmap, tightly packed rows without padding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    pub width: usize,
    pub height: usize,
    pub format: RawImageFormat,
    pub pixels: Vec<u8>,
}

impl RawImage {
    /// Wraps a pixel buffer, checking that its length matches the
    /// dimensions and format.
    pub fn new(
        width: usize,
        height: usize,
        format: RawImageFormat,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        let expected = width * height * format.bytes_per_pixel();
        if pixels.len() != expected {
            return Err(Error::InvalidImageBuffer {
                width,
                height,
                expected,
                found: pixels.len(),
            });
        }
        Ok(RawImage {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Decodes an encoded image (PNG, JPEG, ...) into raw pixels.
    ///
    /// Which formats are available depends on the enabled decoder
    /// features of this crate.
    #[cfg(feature = "images")]
    pub fn decode_from_bytes(bytes: &[u8]) -> Result<Self> {
        use image::DynamicImage;

        let decoded = image::load_from_memory(bytes)?;
        let width = decoded.width() as usize;
        let height = decoded.height() as usize;
        let (format, pixels) = match decoded {
            DynamicImage::ImageLuma8(buf) => (RawImageFormat::Gray8, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (RawImageFormat::Rgb8, buf.into_raw()),
            other => (RawImageFormat::Rgba8, other.to_rgba8().into_raw()),
        };
        Ok(RawImage {
            width,
            height,
            format,
            pixels,
        })
    }
}

/// Builds the image XObject stream for `im`, registering a separate
/// greyscale `/SMask` stream in `doc` when the image has an alpha
/// channel.
pub(crate) fn image_to_stream(im: RawImage, doc: &mut lopdf::Document) -> lopdf::Stream {
    use lopdf::Object::*;

    let (opaque, alpha) = split_into_color_plus_alpha(im);

    let mut dict = lopdf::Dictionary::from_iter(vec![
        ("Type", Name("XObject".into())),
        ("Subtype", Name("Image".into())),
        ("Width", Integer(opaque.width as i64)),
        ("Height", Integer(opaque.height as i64)),
        ("BitsPerComponent", Integer(8)),
        ("ColorSpace", Name(opaque.format.pdf_color_space().into())),
        ("Interpolate", Boolean(false)),
    ]);

    if let Some(alpha) = alpha {
        let smask_dict = lopdf::Dictionary::from_iter(vec![
            ("Type", Name("XObject".into())),
            ("Subtype", Name("Image".into())),
            ("Width", Integer(opaque.width as i64)),
            ("Height", Integer(opaque.height as i64)),
            ("BitsPerComponent", Integer(8)),
            ("ColorSpace", Name("DeviceGray".into())),
            ("Interpolate", Boolean(false)),
        ]);

        let mut stream = lopdf::Stream::new(smask_dict, alpha).with_compression(true);

        let _ = stream.compress();

        dict.set("SMask", Reference(doc.add_object(stream)));
    }

    let mut s = lopdf::Stream::new(dict, opaque.pixels).with_compression(true);

    let _ = s.compress();

    s
}

// Peels the alpha channel off into its own buffer for the `/SMask`
// entry, leaving an opaque image behind.
fn split_into_color_plus_alpha(im: RawImage) -> (RawImage, Option<Vec<u8>>) {
    if !im.format.has_alpha() {
        return (im, None);
    }
    let (rgb, alpha) = crate::utils::rgba_to_rgb(im.pixels);
    (
        RawImage {
            width: im.width,
            height: im.height,
            format: RawImageFormat::Rgb8,
            pixels: rgb,
        },
        Some(alpha),
    )
}
