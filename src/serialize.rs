//! Turns buffered pages into a `lopdf::Document`.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::Dictionary as LoDictionary;
use lopdf::Object::*;
use lopdf::Stream as LoStream;
use lopdf::StringFormat::Literal;

use crate::error::Result;
use crate::font::BuiltinFont;
use crate::image::image_to_stream;
use crate::pdf_canvas::PdfCanvas;
use crate::pdf_document::DocumentInfo;
use crate::utils;

pub struct SaveOptions {
    /// Compresses content streams and performs object cleanup.
    /// Disabled in debug builds so the output stays greppable.
    pub optimize: bool,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            optimize: !(std::cfg!(debug_assertions)),
        }
    }
}

/// Assembles the full PDF object graph for the given pages.
pub(crate) fn serialize_document(
    pages: &[PdfCanvas],
    info: &DocumentInfo,
    opts: &SaveOptions,
) -> Result<lopdf::Document> {
    let mut doc = lopdf::Document::with_version("1.3");
    let pages_id = doc.new_object_id();

    let catalog = LoDictionary::from_iter(vec![
        ("Type", "Catalog".into()),
        ("PageLayout", "OneColumn".into()),
        ("PageMode", "UseNone".into()),
        ("Pages", Reference(pages_id)),
    ]);

    // Font dictionaries are shared across pages, interned on first use.
    let mut font_ids: BTreeMap<BuiltinFont, lopdf::ObjectId> = BTreeMap::new();

    let mut page_ids = Vec::with_capacity(pages.len());
    for page in pages {
        let mut p = LoDictionary::from_iter(vec![
            ("Type", "Page".into()),
            ("Rotate", Integer(0)),
            (
                "MediaBox",
                vec![
                    0.into(),
                    0.into(),
                    Real(page.width as f32),
                    Real(page.height as f32),
                ]
                .into(),
            ),
            ("Parent", Reference(pages_id)),
        ]);

        let resources = collect_page_resources(page, &mut doc, &mut font_ids);
        if !resources.is_empty() {
            let resources_id = doc.add_object(Dictionary(resources));
            p.set("Resources", Reference(resources_id));
        }

        let content = Content {
            operations: page.ops.clone(),
        };
        let content_stream = LoStream::new(LoDictionary::new(), content.encode()?);
        let content_id = doc.add_object(content_stream);
        p.set("Contents", Reference(content_id));

        page_ids.push(Reference(doc.add_object(p)));
    }

    let pages_dict = LoDictionary::from_iter(vec![
        ("Type", "Pages".into()),
        ("Count", Integer(page_ids.len() as i64)),
        ("Kids", Array(page_ids)),
    ]);
    doc.objects.insert(pages_id, Dictionary(pages_dict));

    let catalog_id = doc.add_object(catalog);
    let document_info_id = doc.add_object(Dictionary(docinfo_to_dict(info)));
    let instance_id = utils::random_character_string_32();
    let document_id = utils::random_character_string_32();

    doc.trailer.set("Root", Reference(catalog_id));
    doc.trailer.set("Info", Reference(document_info_id));
    doc.trailer.set(
        "ID",
        Array(vec![
            String(document_id.into_bytes(), Literal),
            String(instance_id.into_bytes(), Literal),
        ]),
    );

    if opts.optimize {
        doc.compress();
    }

    Ok(doc)
}

fn collect_page_resources(
    page: &PdfCanvas,
    doc: &mut lopdf::Document,
    font_ids: &mut BTreeMap<BuiltinFont, lopdf::ObjectId>,
) -> LoDictionary {
    let mut resources = LoDictionary::new();

    if !page.resources.fonts.is_empty() {
        let mut fonts = LoDictionary::new();
        for font in &page.resources.fonts {
            let font_id = *font_ids
                .entry(*font)
                .or_insert_with(|| doc.add_object(Dictionary(font.to_font_dict())));
            fonts.set(font.get_pdf_id(), Reference(font_id));
        }
        resources.set("Font", Dictionary(fonts));
    }

    if !page.resources.xobjects.is_empty() {
        let mut xobjects = LoDictionary::new();
        for (name, image) in &page.resources.xobjects {
            let stream = image_to_stream(image.clone(), doc);
            xobjects.set(name.as_bytes(), Reference(doc.add_object(stream)));
        }
        resources.set("XObject", Dictionary(xobjects));
    }

    if !page.resources.patterns.is_empty() {
        let mut patterns = LoDictionary::new();
        for (name, pattern) in &page.resources.patterns {
            let pattern_id = doc.add_object(Dictionary(pattern.to_pattern_dict()));
            patterns.set(name.as_bytes(), Reference(pattern_id));
        }
        resources.set("Pattern", Dictionary(patterns));
    }

    if !page.resources.ext_gstates.is_empty() {
        let mut gstates = LoDictionary::new();
        for (name, gs) in &page.resources.ext_gstates {
            gstates.set(name.as_bytes(), Dictionary(gs.to_dict()));
        }
        resources.set("ExtGState", Dictionary(gstates));
    }

    resources
}

fn docinfo_to_dict(m: &DocumentInfo) -> LoDictionary {
    let info_mod_date = utils::to_pdf_time_stamp_metadata(&m.modification_date);
    let info_create_date = utils::to_pdf_time_stamp_metadata(&m.creation_date);

    LoDictionary::from_iter(vec![
        ("CreationDate", String(info_create_date.into_bytes(), Literal)),
        ("ModDate", String(info_mod_date.into_bytes(), Literal)),
        ("Title", String(m.title.as_bytes().to_vec(), Literal)),
        ("Author", String(m.author.as_bytes().to_vec(), Literal)),
        ("Creator", String(m.creator.as_bytes().to_vec(), Literal)),
        ("Producer", String(m.producer.as_bytes().to_vec(), Literal)),
        ("Subject", String(m.subject.as_bytes().to_vec(), Literal)),
        ("Keywords", String(m.keywords.join(",").as_bytes().to_vec(), Literal)),
    ])
}
