//! Integration tests for drawing export (mathink-renderer).
//!
//! Exports real drawings through the tiny-skia backend and inspects the
//! decoded pixels.

use image::RgbaImage;
use mathink_core::{Drawing, Point, Stroke, StrokeRecorder};
use mathink_renderer::{
    DrawingExporter, ExportConfig, ExportWarning, ImageFormat, RenderError,
};

/// Create a black stroke through the given points.
fn stroke(width: f32, points: &[(f32, f32)]) -> Stroke {
    Stroke::new("#000000", width).with_points(points.iter().copied().map(Point::from))
}

fn decode(bytes: &[u8]) -> RgbaImage {
    image::load_from_memory(bytes).expect("decode").to_rgba8()
}

fn is_white(img: &RgbaImage, x: u32, y: u32) -> bool {
    img.get_pixel(x, y).0[..3].iter().all(|&c| c == 255)
}

fn is_dark(img: &RgbaImage, x: u32, y: u32) -> bool {
    img.get_pixel(x, y).0[..3].iter().all(|&c| c < 128)
}

/// Two horizontal bars spanning a 200x100 bounding box, placed away from the
/// canvas origin.
fn wide_drawing() -> Drawing {
    Drawing::from_strokes([
        stroke(10.0, &[(300.0, 500.0), (500.0, 500.0)]),
        stroke(10.0, &[(300.0, 600.0), (500.0, 600.0)]),
    ])
}

// ==========================================================================
// Letterbox placement
// ==========================================================================

#[test]
fn test_wide_drawing_is_letterboxed() {
    let exported = DrawingExporter::with_defaults()
        .export(&wide_drawing())
        .expect("export");

    assert_eq!(exported.layout.scale, 2.0);
    assert_eq!(exported.layout.offset_x, 0.0);
    assert_eq!(exported.layout.offset_y, 100.0);

    let img = decode(&exported.image.bytes);
    assert_eq!(img.dimensions(), (400, 400));

    // Padding bands above and below the content stay background.
    for x in [5, 200, 395] {
        assert!(is_white(&img, x, 50), "top band at x={x}");
        assert!(is_white(&img, x, 350), "bottom band at x={x}");
    }
    // The top bar (half clipped by the crop) lands just below offset_y.
    assert!(is_dark(&img, 200, 104));
    // The bottom bar lands just above the lower padding.
    assert!(is_dark(&img, 200, 296));
    // Between the bars is empty.
    assert!(is_white(&img, 200, 200));
}

#[test]
fn test_position_on_canvas_does_not_matter() {
    let shifted = Drawing::from_strokes([
        stroke(10.0, &[(0.0, 0.0), (200.0, 0.0)]),
        stroke(10.0, &[(0.0, 100.0), (200.0, 100.0)]),
    ]);
    let exporter = DrawingExporter::with_defaults();
    let a = exporter.export(&wide_drawing()).expect("a");
    let b = exporter.export(&shifted).expect("b");
    assert_eq!(decode(&a.image.bytes), decode(&b.image.bytes));
}

// ==========================================================================
// Determinism
// ==========================================================================

#[test]
fn test_export_is_deterministic() {
    let exporter = DrawingExporter::with_defaults();
    let drawing = wide_drawing();

    let first = exporter.export(&drawing).expect("first");
    let second = exporter.export(&drawing).expect("second");

    assert_eq!((first.image.width, first.image.height), (400, 400));
    assert_eq!((second.image.width, second.image.height), (400, 400));
    assert_eq!(decode(&first.image.bytes), decode(&second.image.bytes));
}

// ==========================================================================
// Edge cases
// ==========================================================================

#[test]
fn test_horizontal_line_exports() {
    let drawing = Drawing::from_strokes([stroke(3.0, &[(20.0, 80.0), (220.0, 80.0)])]);
    let exported = DrawingExporter::with_defaults()
        .export(&drawing)
        .expect("degenerate bounds still export");

    assert_eq!(
        exported.warnings,
        vec![ExportWarning::DegenerateBounds {
            width: 200.0,
            height: 0.0
        }]
    );
    assert_eq!(exported.layout.scale, 2.0);
    assert_eq!(exported.layout.offset_y, 199.0);

    let img = decode(&exported.image.bytes);
    assert_eq!(img.dimensions(), (400, 400));
    // The line fills the two-pixel band centred on the output.
    for x in [10, 200, 390] {
        assert!(is_dark(&img, x, 199), "band at x={x}");
        assert!(is_dark(&img, x, 200), "band at x={x}");
    }
    assert!(is_white(&img, 200, 150));
    assert!(is_white(&img, 200, 250));
}

#[test]
fn test_vertical_line_exports() {
    let drawing = Drawing::from_strokes([stroke(3.0, &[(50.0, 0.0), (50.0, 300.0)])]);
    let exported = DrawingExporter::with_defaults().export(&drawing).expect("export");
    assert_eq!(
        exported.warnings,
        vec![ExportWarning::DegenerateBounds {
            width: 0.0,
            height: 300.0
        }]
    );
    assert_eq!(exported.layout.scale, 400.0 / 300.0);

    let img = decode(&exported.image.bytes);
    assert_eq!(img.dimensions(), (400, 400));
    for y in [20, 200, 380] {
        assert!(
            (198..=201).any(|x| is_dark(&img, x, y)),
            "no dark pixel near the centre column at y={y}"
        );
    }
    assert!(is_white(&img, 150, 200));
    assert!(is_white(&img, 250, 200));
}

#[test]
fn test_single_point_stroke_exports() {
    let drawing = Drawing::from_strokes([stroke(3.0, &[(50.0, 50.0), (50.0, 50.0)])]);
    assert_eq!(drawing.len(), 1);

    let exported = DrawingExporter::with_defaults()
        .export(&drawing)
        .expect("a dot still exports");
    assert_eq!(
        exported.warnings,
        vec![ExportWarning::DegenerateBounds {
            width: 0.0,
            height: 0.0
        }]
    );
    assert_eq!(exported.layout.source_pixels(), (1, 1));
    assert_eq!(exported.layout.scale, 400.0);
    assert_eq!(decode(&exported.image.bytes).dimensions(), (400, 400));
}

#[test]
fn test_far_apart_points_export_without_huge_surface() {
    let drawing = Drawing::from_strokes([
        stroke(3.0, &[(0.0, 0.0), (1.0, 1.0)]),
        stroke(3.0, &[(2.0e6, 2.0e6), (2.0e6 + 1.0, 2.0e6 + 1.0)]),
    ]);
    let exported = DrawingExporter::with_defaults().export(&drawing).expect("export");

    let (w, h) = exported.layout.source_pixels();
    assert!(w <= 4096 && h <= 4096, "crop surface {w}x{h}");
    assert_eq!(decode(&exported.image.bytes).dimensions(), (400, 400));
}

#[test]
fn test_oversized_output_is_an_error() {
    let exporter = DrawingExporter::new(ExportConfig {
        width: 1_000_000,
        height: 1_000_000,
        ..ExportConfig::default()
    });
    let err = exporter.export(&wide_drawing()).expect_err("too large");
    assert!(matches!(err, RenderError::Surface(_)));
}

#[test]
fn test_empty_drawing_produces_nothing() {
    let err = DrawingExporter::with_defaults()
        .export(&Drawing::new())
        .expect_err("empty");
    assert!(matches!(err, RenderError::EmptyInput));
}

// ==========================================================================
// Formats and configuration
// ==========================================================================

#[test]
fn test_jpeg_export() {
    let exporter = DrawingExporter::new(ExportConfig {
        format: ImageFormat::Jpeg,
        ..ExportConfig::default()
    });
    let exported = exporter.export(&wide_drawing()).expect("jpeg");
    assert_eq!(exported.image.bytes[0], 0xFF);
    assert_eq!(exported.image.bytes[1], 0xD8);
    assert_eq!(exported.image.mime_type(), "image/jpeg");
    assert_eq!(decode(&exported.image.bytes).dimensions(), (400, 400));
}

#[test]
fn test_custom_output_size() {
    let exporter = DrawingExporter::new(ExportConfig {
        width: 256,
        height: 128,
        ..ExportConfig::default()
    });
    let exported = exporter.export(&wide_drawing()).expect("export");
    // 200x100 fits 256x128 at 1.28x with no padding.
    assert!((exported.layout.scale - 1.28).abs() < 1e-6);
    assert!(exported.layout.offset_x.abs() < 1e-4);
    assert!(exported.layout.offset_y.abs() < 1e-4);
    assert_eq!(decode(&exported.image.bytes).dimensions(), (256, 128));
}

#[test]
fn test_data_uri_export() {
    let exported = DrawingExporter::with_defaults()
        .export(&wide_drawing())
        .expect("export");
    assert!(exported
        .image
        .to_data_uri()
        .starts_with("data:image/png;base64,iVBORw0KGgo"));
}

// ==========================================================================
// Recorder to exporter
// ==========================================================================

#[test]
fn test_recorded_gesture_exports() {
    let mut drawing = Drawing::new();
    let mut recorder = StrokeRecorder::with_brush("rgba(0, 0, 0, 1)", 6.0).expect("brush");

    recorder.on_gesture_start(Point::new(10.0, 10.0));
    recorder.on_gesture_move(Point::new(60.0, 60.0));
    recorder.on_gesture_move(Point::new(110.0, 10.0));
    assert!(recorder.on_gesture_end(&mut drawing));

    let exported = DrawingExporter::with_defaults().export(&drawing).expect("export");
    let img = decode(&exported.image.bytes);
    assert_eq!(img.dimensions(), (400, 400));
    assert!(img.pixels().any(|p| p.0[0] < 128));
}
