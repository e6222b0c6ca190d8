//! Multi-page document assembly.

use std::{
    fs::File,
    io::{BufWriter, Write},
};

use time::OffsetDateTime;

use crate::{
    canvas::Canvas,
    error::{Error, Result},
    ops::Recording,
    pdf_canvas::PdfCanvas,
    serialize::{serialize_document, SaveOptions},
};

/// Entries of the document `/Info` dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub keywords: Vec<String>,
    pub creator: String,
    pub producer: String,
    pub creation_date: OffsetDateTime,
    pub modification_date: OffsetDateTime,
}

impl Default for DocumentInfo {
    fn default() -> Self {
        let now = OffsetDateTime::now_utc();
        DocumentInfo {
            title: String::new(),
            author: String::new(),
            subject: String::new(),
            keywords: Vec::new(),
            creator: env!("CARGO_PKG_NAME").to_string(),
            producer: concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION")).to_string(),
            creation_date: now,
            modification_date: now,
        }
    }
}

/// A multi-page PDF document.
///
/// Pages are added one at a time and can have different sizes. The
/// document is finished at the latest when it is written out.
///
/// ```no_run
/// use pdfcanvas::{Brush, Canvas, PdfDocument, Rect, Rgba};
///
/// # fn main() -> Result<(), pdfcanvas::Error> {
/// let mut doc = PdfDocument::new();
/// let page = doc.add_page(595.0, 842.0);
/// page.fill_rect(Rect::new(50.0, 50.0, 100.0, 100.0), &Brush::solid(Rgba::BLACK));
/// doc.save_to_file("out.pdf".as_ref())?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PdfDocument {
    pages: Vec<PdfCanvas>,
    info: DocumentInfo,
    finished: bool,
}

impl PdfDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_info(info: DocumentInfo) -> Self {
        PdfDocument {
            info,
            ..Self::default()
        }
    }

    /// Appends a page of the given size in points and returns its
    /// canvas with an open drawing session.
    pub fn add_page(&mut self, width: f64, height: f64) -> &mut PdfCanvas {
        self.pages.push(PdfCanvas::with_page_size(width, height));
        // Just pushed, cannot be empty.
        self.pages.last_mut().unwrap()
    }

    /// Replays `recording` onto a fresh page with the recording's
    /// dimensions.
    pub fn playback(&mut self, recording: &Recording) -> Result<()> {
        let canvas = self.add_page(recording.width, recording.height);
        recording.replay(canvas)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut PdfCanvas> {
        self.pages.get_mut(index)
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.info.title = title.into();
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.info.author = author.into();
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.info.subject = subject.into();
    }

    pub fn set_keywords(&mut self, keywords: Vec<String>) {
        self.info.keywords = keywords;
    }

    pub fn info(&self) -> &DocumentInfo {
        &self.info
    }

    /// Closes every page that still has an open session. Idempotent,
    /// called automatically by the write methods.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        for page in &mut self.pages {
            if page.is_open() {
                page.end()?;
            }
        }
        self.finished = true;
        Ok(())
    }

    /// Serializes the document with explicit options.
    pub fn to_bytes_with_options(&mut self, opts: &SaveOptions) -> Result<Vec<u8>> {
        self.finish().map_err(|e| Error::Finish(Box::new(e)))?;
        let mut doc = serialize_document(&self.pages, &self.info, opts)?;
        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.to_bytes_with_options(&SaveOptions::default())
    }

    /// Writes the finished document. Finishes it first if needed.
    pub fn write_to(&mut self, w: &mut dyn Write) -> Result<()> {
        let bytes = self.to_bytes()?;
        w.write_all(&bytes)?;
        Ok(())
    }

    /// Saves the finished document to `path`. Finishes it first if
    /// needed.
    pub fn save_to_file(&mut self, path: &std::path::Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
