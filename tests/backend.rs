// Drives the PDF backend through the registry and the Canvas trait,
// then parses the produced bytes back with lopdf to check what
// actually landed in the document.

use std::cell::RefCell;
use std::rc::Rc;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object};

use pdfcanvas::{
    register_pdf, Brush, Canvas, Error, ExportBackend, FileBackend, FillRule, FontFace,
    GradientStop, ImageOptions, LineCap, LineJoin, Path, PdfCanvas, Point, RawImage,
    RawImageFormat, Rect, Registry, Rgba, Stroke, WriterBackend, PDF_BACKEND_NAME,
};

fn pdf_backend() -> Box<dyn ExportBackend> {
    let mut registry = Registry::new();
    register_pdf(&mut registry);
    registry.create(PDF_BACKEND_NAME).unwrap()
}

fn write_out(backend: &mut Box<dyn ExportBackend>) -> Vec<u8> {
    let mut buf = Vec::new();
    backend.write_to(&mut buf).unwrap();
    buf
}

fn parse(bytes: &[u8]) -> lopdf::Document {
    lopdf::Document::load_mem(bytes).unwrap()
}

fn first_page_id(doc: &lopdf::Document) -> lopdf::ObjectId {
    *doc.get_pages().values().next().unwrap()
}

fn page_ops(bytes: &[u8]) -> Vec<Operation> {
    let doc = parse(bytes);
    let content = doc.get_page_content(first_page_id(&doc)).unwrap();
    Content::decode(&content).unwrap().operations
}

fn operators(ops: &[Operation]) -> Vec<String> {
    ops.iter().map(|op| op.operator.clone()).collect()
}

fn find_op<'a>(ops: &'a [Operation], operator: &str) -> &'a Operation {
    ops.iter()
        .find(|op| op.operator == operator)
        .unwrap_or_else(|| panic!("no {operator} operator in content stream"))
}

// Integers and reals are interchangeable in PDF content, the writer
// picks whichever is shorter.
fn to_f64(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => *r as f64,
        _ => 0.0,
    }
}

fn operands_f64(op: &Operation) -> Vec<f64> {
    op.operands.iter().map(to_f64).collect()
}

fn resolve_dict<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Dictionary {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap().as_dict().unwrap(),
        Object::Dictionary(dict) => dict,
        other => panic!("expected dictionary, got {other:?}"),
    }
}

fn page_resources(doc: &lopdf::Document) -> &Dictionary {
    let page = doc
        .get_object(first_page_id(doc))
        .unwrap()
        .as_dict()
        .unwrap();
    resolve_dict(doc, page.get(b"Resources").unwrap())
}

#[test]
fn test_backend_registration() {
    let mut registry = Registry::new();
    register_pdf(&mut registry);

    assert!(registry.contains(PDF_BACKEND_NAME));
    assert!(registry.create(PDF_BACKEND_NAME).is_ok());

    match registry.create("svg") {
        Err(Error::UnknownBackend(name)) => assert_eq!(name, "svg"),
        other => panic!("expected UnknownBackend, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_backend_lifecycle() {
    let mut backend = pdf_backend();

    backend.begin(800.0, 600.0).unwrap();
    backend.end().unwrap();

    // A second end has no open session to close.
    assert!(matches!(backend.end(), Err(Error::NotInitialized)));
}

#[test]
fn test_save_restore() {
    let mut backend = pdf_backend();
    backend.begin(800.0, 600.0).unwrap();

    backend.save();
    backend.set_transform(pdfcanvas::Transform::translate(100.0, 100.0));
    backend.restore();

    backend.save();
    backend.save();
    backend.restore();
    backend.restore();

    // Restore on an empty stack must be a no-op, not an unbalanced Q.
    backend.restore();

    backend.end().unwrap();

    let ops = page_ops(&write_out(&mut backend));
    let operators = operators(&ops);
    let saves = operators.iter().filter(|o| *o == "q").count();
    let restores = operators.iter().filter(|o| *o == "Q").count();
    assert_eq!(saves, 3);
    assert_eq!(restores, 3);
}

#[test]
fn test_fill_path() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let path = Path::from_rect(Rect::new(50.0, 50.0, 100.0, 80.0));
    let brush = Brush::solid(Rgba::rgb(255, 0, 0));
    backend.fill_path(&path, &brush, FillRule::NonZero);

    backend.end().unwrap();
    let bytes = write_out(&mut backend);
    assert!(!bytes.is_empty());

    let doc = parse(&bytes);
    assert_eq!(doc.get_pages().len(), 1);
    let page = doc
        .get_object(first_page_id(&doc))
        .unwrap()
        .as_dict()
        .unwrap();
    let media_box: Vec<f64> = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(to_f64)
        .collect();
    assert_eq!(media_box, vec![0.0, 0.0, 400.0, 300.0]);

    let ops = page_ops(&bytes);
    pretty_assertions::assert_eq!(
        operators(&ops),
        vec!["q", "cm", "rg", "m", "l", "l", "l", "h", "f", "Q"]
    );
    assert_eq!(operands_f64(find_op(&ops, "rg")), vec![1.0, 0.0, 0.0]);
    assert_eq!(operands_f64(find_op(&ops, "m")), vec![50.0, 50.0]);
    // The device matrix flips y over the page height.
    assert_eq!(
        operands_f64(find_op(&ops, "cm")),
        vec![1.0, 0.0, 0.0, -1.0, 0.0, 300.0]
    );
}

#[test]
fn test_stroke_path() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let path = Path::new()
        .move_to(100.0, 50.0)
        .line_to(150.0, 150.0)
        .line_to(50.0, 150.0)
        .close();
    let brush = Brush::solid(Rgba::rgb(0, 0, 255));
    let stroke = Stroke {
        width: 2.0,
        cap: LineCap::Round,
        join: LineJoin::Round,
        miter_limit: 4.0,
        ..Default::default()
    };
    backend.stroke_path(&path, &brush, &stroke);

    backend.end().unwrap();
    let ops = page_ops(&write_out(&mut backend));
    pretty_assertions::assert_eq!(
        operators(&ops),
        vec!["q", "cm", "RG", "w", "J", "j", "M", "m", "l", "l", "h", "S", "Q"]
    );
    assert_eq!(operands_f64(find_op(&ops, "RG")), vec![0.0, 0.0, 1.0]);
    assert_eq!(operands_f64(find_op(&ops, "w")), vec![2.0]);
    assert_eq!(operands_f64(find_op(&ops, "J")), vec![1.0]);
    assert_eq!(operands_f64(find_op(&ops, "j")), vec![1.0]);
    assert_eq!(operands_f64(find_op(&ops, "M")), vec![4.0]);
}

#[test]
fn test_fill_rect_translucent() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    backend.fill_rect(
        Rect::new(20.0, 20.0, 160.0, 120.0),
        &Brush::solid(Rgba::new(0, 255, 0, 200)),
    );

    backend.end().unwrap();
    let bytes = write_out(&mut backend);

    let ops = page_ops(&bytes);
    pretty_assertions::assert_eq!(
        operators(&ops),
        vec!["q", "cm", "gs", "rg", "re", "f", "Q"]
    );
    assert_eq!(
        operands_f64(find_op(&ops, "re")),
        vec![20.0, 20.0, 160.0, 120.0]
    );
    assert_eq!(
        find_op(&ops, "gs").operands,
        vec![Object::Name(b"GS1".to_vec())]
    );

    let doc = parse(&bytes);
    let gstates = page_resources(&doc).get(b"ExtGState").unwrap();
    let gs1 = resolve_dict(&doc, gstates.as_dict().unwrap().get(b"GS1").unwrap());
    let ca = to_f64(gs1.get(b"ca").unwrap());
    assert!((ca - 200.0 / 255.0).abs() < 1e-4);
}

#[test]
fn test_linear_gradient() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let path = Path::from_rect(Rect::new(50.0, 50.0, 200.0, 150.0));
    let brush = Brush::LinearGradient {
        start: Point::new(50.0, 50.0),
        end: Point::new(250.0, 200.0),
        stops: vec![
            GradientStop::new(0.0, Rgba::rgb(255, 0, 0)),
            GradientStop::new(0.5, Rgba::rgb(0, 255, 0)),
            GradientStop::new(1.0, Rgba::rgb(0, 0, 255)),
        ],
    };
    backend.fill_path(&path, &brush, FillRule::NonZero);

    backend.end().unwrap();
    let bytes = write_out(&mut backend);

    let ops = page_ops(&bytes);
    assert_eq!(
        find_op(&ops, "cs").operands,
        vec![Object::Name(b"Pattern".to_vec())]
    );
    assert_eq!(
        find_op(&ops, "scn").operands,
        vec![Object::Name(b"P1".to_vec())]
    );

    let doc = parse(&bytes);
    let patterns = page_resources(&doc).get(b"Pattern").unwrap();
    let p1 = resolve_dict(&doc, patterns.as_dict().unwrap().get(b"P1").unwrap());
    assert_eq!(p1.get(b"PatternType").unwrap(), &Object::Integer(2));
    let matrix: Vec<f64> = p1
        .get(b"Matrix")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(to_f64)
        .collect();
    assert_eq!(matrix, vec![1.0, 0.0, 0.0, -1.0, 0.0, 300.0]);

    let shading = p1.get(b"Shading").unwrap().as_dict().unwrap();
    assert_eq!(shading.get(b"ShadingType").unwrap(), &Object::Integer(2));
    let coords: Vec<f64> = shading
        .get(b"Coords")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(to_f64)
        .collect();
    assert_eq!(coords, vec![50.0, 50.0, 250.0, 200.0]);

    // Three stops need a stitching function over two segments.
    let function = shading.get(b"Function").unwrap().as_dict().unwrap();
    assert_eq!(function.get(b"FunctionType").unwrap(), &Object::Integer(3));
    let functions = function.get(b"Functions").unwrap().as_array().unwrap();
    assert_eq!(functions.len(), 2);
    let bounds: Vec<f64> = function
        .get(b"Bounds")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(to_f64)
        .collect();
    assert_eq!(bounds, vec![0.5]);
}

#[test]
fn test_radial_gradient() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let path = Path::from_rect(Rect::new(100.0, 50.0, 200.0, 200.0));
    let brush = Brush::RadialGradient {
        center: Point::new(200.0, 150.0),
        start_radius: 0.0,
        focus: Point::new(200.0, 150.0),
        end_radius: 100.0,
        stops: vec![
            GradientStop::new(0.0, Rgba::rgb(255, 255, 0)),
            GradientStop::new(1.0, Rgba::rgb(255, 0, 0)),
        ],
    };
    backend.fill_path(&path, &brush, FillRule::NonZero);

    backend.end().unwrap();
    let bytes = write_out(&mut backend);

    let doc = parse(&bytes);
    let patterns = page_resources(&doc).get(b"Pattern").unwrap();
    let p1 = resolve_dict(&doc, patterns.as_dict().unwrap().get(b"P1").unwrap());
    let shading = p1.get(b"Shading").unwrap().as_dict().unwrap();
    assert_eq!(shading.get(b"ShadingType").unwrap(), &Object::Integer(3));
    let coords: Vec<f64> = shading
        .get(b"Coords")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(to_f64)
        .collect();
    // Start circle at the center, end circle around the focus.
    assert_eq!(coords, vec![200.0, 150.0, 0.0, 200.0, 150.0, 100.0]);

    let function = shading.get(b"Function").unwrap().as_dict().unwrap();
    assert_eq!(function.get(b"FunctionType").unwrap(), &Object::Integer(2));
    let c0: Vec<f64> = function
        .get(b"C0")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(to_f64)
        .collect();
    assert_eq!(c0, vec![1.0, 1.0, 0.0]);
}

#[test]
fn test_dashed_stroke() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let path = Path::new().move_to(50.0, 150.0).line_to(350.0, 150.0);
    let brush = Brush::solid(Rgba::BLACK);
    let stroke = Stroke {
        width: 3.0,
        cap: LineCap::Butt,
        join: LineJoin::Miter,
        miter_limit: 4.0,
        dash_pattern: vec![10.0, 5.0, 3.0, 5.0],
        dash_offset: 0.0,
    };
    backend.stroke_path(&path, &brush, &stroke);

    backend.end().unwrap();
    let ops = page_ops(&write_out(&mut backend));
    let dash = find_op(&ops, "d");
    match &dash.operands[0] {
        Object::Array(pattern) => {
            let pattern: Vec<f64> = pattern.iter().map(to_f64).collect();
            assert_eq!(pattern, vec![10.0, 5.0, 3.0, 5.0]);
        }
        other => panic!("expected dash array, got {other:?}"),
    }
    assert_eq!(to_f64(&dash.operands[1]), 0.0);
    assert_eq!(operands_f64(find_op(&ops, "J")), vec![0.0]);
    assert_eq!(operands_f64(find_op(&ops, "j")), vec![0.0]);
}

#[test]
fn test_clip_persists_across_operations() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let clip = Path::from_rect(Rect::new(100.0, 50.0, 200.0, 200.0));
    backend.set_clip(&clip, FillRule::NonZero);
    backend.fill_rect(
        Rect::new(0.0, 0.0, 400.0, 300.0),
        &Brush::solid(Rgba::rgb(255, 100, 100)),
    );

    backend.end().unwrap();
    let ops = page_ops(&write_out(&mut backend));
    // The clip path stays outside any q/Q bracket so it applies to
    // everything that follows.
    pretty_assertions::assert_eq!(
        operators(&ops),
        vec!["m", "l", "l", "l", "h", "W", "n", "q", "cm", "rg", "re", "f", "Q"]
    );
    // Clip coordinates are pre-flipped into device space.
    assert_eq!(operands_f64(find_op(&ops, "m")), vec![100.0, 250.0]);
}

#[test]
fn test_even_odd_clip() {
    let mut backend = pdf_backend();
    backend.begin(200.0, 200.0).unwrap();

    let clip = Path::from_rect(Rect::new(10.0, 10.0, 100.0, 100.0));
    backend.set_clip(&clip, FillRule::EvenOdd);
    backend.fill_rect(
        Rect::new(0.0, 0.0, 200.0, 200.0),
        &Brush::solid(Rgba::BLACK),
    );

    backend.end().unwrap();
    let ops = page_ops(&write_out(&mut backend));
    let operators = operators(&ops);
    assert!(operators.contains(&"W*".to_string()));
    assert!(!operators.contains(&"W".to_string()));
}

#[test]
fn test_transforms() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let transforms = [
        pdfcanvas::Transform::translate(100.0, 50.0),
        pdfcanvas::Transform::scale(2.0, 2.0),
        pdfcanvas::Transform::rotate(0.5),
        pdfcanvas::Transform::identity(),
    ];
    for transform in transforms {
        backend.save();
        backend.set_transform(transform);
        backend.fill_path(
            &Path::from_rect(Rect::new(10.0, 10.0, 30.0, 30.0)),
            &Brush::solid(Rgba::rgb(100, 100, 255)),
            FillRule::NonZero,
        );
        backend.restore();
    }

    backend.end().unwrap();
    let ops = page_ops(&write_out(&mut backend));
    let operators = operators(&ops);
    let saves = operators.iter().filter(|o| *o == "q").count();
    let restores = operators.iter().filter(|o| *o == "Q").count();
    assert_eq!(saves, 8);
    assert_eq!(restores, 8);

    // The first drawing block carries the translate baked into its
    // device matrix: [1 0 0 -1 100 250] on a 300pt page.
    assert_eq!(
        operands_f64(find_op(&ops, "cm")),
        vec![1.0, 0.0, 0.0, -1.0, 100.0, 250.0]
    );
}

#[test]
fn test_save_to_file() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();
    backend.fill_path(
        &Path::from_rect(Rect::new(50.0, 50.0, 300.0, 200.0)),
        &Brush::solid(Rgba::rgb(100, 150, 200)),
        FillRule::NonZero,
    );
    backend.end().unwrap();

    let path = std::env::temp_dir().join(format!("pdfcanvas-backend-{}.pdf", std::process::id()));
    backend.save_to_file(&path).unwrap();

    let data = std::fs::read(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert!(!data.is_empty());
    assert!(data.starts_with(b"%PDF-"));
}

#[test]
fn test_draw_text() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    backend.draw_text(
        "Hello World",
        72.0,
        96.0,
        Some(&FontFace::with_size(18.0)),
        &Brush::solid(Rgba::BLACK),
    );

    backend.end().unwrap();
    let bytes = write_out(&mut backend);

    let ops = page_ops(&bytes);
    pretty_assertions::assert_eq!(
        operators(&ops),
        vec!["q", "cm", "rg", "BT", "Tf", "Tm", "Tj", "ET", "Q"]
    );
    let tf = find_op(&ops, "Tf");
    assert_eq!(tf.operands[0], Object::Name(b"F5".to_vec()));
    assert_eq!(to_f64(&tf.operands[1]), 18.0);
    // The text matrix un-mirrors the glyphs under the flipped device
    // matrix while keeping the baseline at (72, 96).
    assert_eq!(
        operands_f64(find_op(&ops, "Tm")),
        vec![1.0, 0.0, 0.0, -1.0, 72.0, 96.0]
    );
    match &find_op(&ops, "Tj").operands[0] {
        Object::String(text, _) => assert_eq!(text, b"Hello World"),
        other => panic!("expected string operand, got {other:?}"),
    }

    let doc = parse(&bytes);
    let fonts = page_resources(&doc).get(b"Font").unwrap();
    let f5 = resolve_dict(&doc, fonts.as_dict().unwrap().get(b"F5").unwrap());
    assert_eq!(f5.get(b"BaseFont").unwrap(), &Object::Name(b"Helvetica".to_vec()));
    assert_eq!(f5.get(b"Subtype").unwrap(), &Object::Name(b"Type1".to_vec()));
    assert_eq!(
        f5.get(b"Encoding").unwrap(),
        &Object::Name(b"WinAnsiEncoding".to_vec())
    );
}

#[test]
fn test_text_encoding() {
    let mut backend = pdf_backend();
    backend.begin(200.0, 100.0).unwrap();
    backend.draw_text("Café", 10.0, 50.0, None, &Brush::solid(Rgba::BLACK));
    backend.end().unwrap();

    let ops = page_ops(&write_out(&mut backend));
    match &find_op(&ops, "Tj").operands[0] {
        Object::String(text, _) => assert_eq!(text, &vec![b'C', b'a', b'f', 0xE9]),
        other => panic!("expected string operand, got {other:?}"),
    }
    // No face given, the default size applies.
    assert_eq!(to_f64(&find_op(&ops, "Tf").operands[1]), 12.0);
}

#[test]
fn test_draw_image() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let image = RawImage::new(2, 2, RawImageFormat::Rgb8, vec![0xFF; 12]).unwrap();
    backend.draw_image(
        &image,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(10.0, 20.0, 100.0, 50.0),
        ImageOptions::default(),
    );

    backend.end().unwrap();
    let bytes = write_out(&mut backend);

    let ops = page_ops(&bytes);
    pretty_assertions::assert_eq!(operators(&ops), vec!["q", "cm", "cm", "Do", "Q"]);
    assert_eq!(
        find_op(&ops, "Do").operands,
        vec![Object::Name(b"Im1".to_vec())]
    );
    // The placement matrix maps the image unit square into dst, with
    // the first pixel row at the top.
    let placement = ops.iter().filter(|op| op.operator == "cm").nth(1).unwrap();
    assert_eq!(
        operands_f64(placement),
        vec![100.0, 0.0, 0.0, -50.0, 10.0, 70.0]
    );

    let doc = parse(&bytes);
    let xobjects = page_resources(&doc).get(b"XObject").unwrap();
    let im1 = xobjects.as_dict().unwrap().get(b"Im1").unwrap();
    let stream = doc
        .get_object(im1.as_reference().unwrap())
        .unwrap()
        .as_stream()
        .unwrap();
    assert_eq!(stream.dict.get(b"Subtype").unwrap(), &Object::Name(b"Image".to_vec()));
    assert_eq!(to_f64(stream.dict.get(b"Width").unwrap()), 2.0);
    assert_eq!(to_f64(stream.dict.get(b"Height").unwrap()), 2.0);
    assert_eq!(
        stream.dict.get(b"ColorSpace").unwrap(),
        &Object::Name(b"DeviceRGB".to_vec())
    );
    assert!(stream.dict.get(b"SMask").is_err());
}

#[test]
fn test_draw_image_with_alpha() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let image = RawImage::new(2, 2, RawImageFormat::Rgba8, vec![0x80; 16]).unwrap();
    backend.draw_image(
        &image,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(0.0, 0.0, 50.0, 50.0),
        ImageOptions { alpha: 0.5 },
    );

    backend.end().unwrap();
    let bytes = write_out(&mut backend);

    let ops = page_ops(&bytes);
    pretty_assertions::assert_eq!(operators(&ops), vec!["q", "cm", "gs", "cm", "Do", "Q"]);

    let doc = parse(&bytes);
    let resources = page_resources(&doc);
    let gstates = resources.get(b"ExtGState").unwrap();
    let gs1 = resolve_dict(&doc, gstates.as_dict().unwrap().get(b"GS1").unwrap());
    assert!((to_f64(gs1.get(b"ca").unwrap()) - 0.5).abs() < 1e-4);

    // The alpha channel splits off into a soft mask.
    let xobjects = resources.get(b"XObject").unwrap();
    let im1 = xobjects.as_dict().unwrap().get(b"Im1").unwrap();
    let stream = doc
        .get_object(im1.as_reference().unwrap())
        .unwrap()
        .as_stream()
        .unwrap();
    assert!(stream.dict.get(b"SMask").is_ok());
}

#[test]
fn test_invalid_image_is_skipped() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();

    let mut canvas = PdfCanvas::new();
    canvas.set_diagnostics(move |err| sink.borrow_mut().push(err.to_string()));
    canvas.begin(100.0, 100.0).unwrap();

    let broken = RawImage {
        width: 2,
        height: 2,
        format: RawImageFormat::Rgb8,
        pixels: vec![0; 5],
    };
    canvas.draw_image(
        &broken,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(0.0, 0.0, 10.0, 10.0),
        ImageOptions::default(),
    );
    canvas.end().unwrap();

    assert_eq!(seen.borrow().len(), 1);
    assert!(seen.borrow()[0].contains("invalid image buffer"));

    let mut buf = Vec::new();
    canvas.write_to(&mut buf).unwrap();
    let operators = operators(&page_ops(&buf));
    assert!(!operators.contains(&"Do".to_string()));
}

#[test]
fn test_sweep_gradient_falls_back_to_first_stop() {
    let mut backend = pdf_backend();
    backend.begin(400.0, 300.0).unwrap();

    let brush = Brush::SweepGradient {
        center: Point::new(200.0, 150.0),
        stops: vec![
            GradientStop::new(0.0, Rgba::rgb(255, 0, 0)),
            GradientStop::new(1.0, Rgba::rgb(0, 255, 0)),
        ],
    };
    backend.fill_path(
        &Path::from_rect(Rect::new(100.0, 50.0, 200.0, 200.0)),
        &brush,
        FillRule::NonZero,
    );

    backend.end().unwrap();
    let ops = page_ops(&write_out(&mut backend));
    let operators = operators(&ops);
    assert!(!operators.contains(&"scn".to_string()));
    assert_eq!(operands_f64(find_op(&ops, "rg")), vec![1.0, 0.0, 0.0]);
}

#[test]
fn test_drawing_outside_a_session_is_reported() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();

    let mut canvas = PdfCanvas::new();
    canvas.set_diagnostics(move |err| sink.borrow_mut().push(err.to_string()));

    // No begin yet, every drawing call is swallowed and reported.
    canvas.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &Brush::default());
    canvas.save();
    canvas.restore();

    assert_eq!(seen.borrow().len(), 3);
    assert!(seen.borrow()[0].contains("not initialized"));
}
