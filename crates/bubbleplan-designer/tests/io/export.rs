use bubbleplan_designer::export::{render_dxf, ExportScene};
use bubbleplan_designer::geometry::signed_area_px;
use bubbleplan_designer::{
    export_document, Document, ExportFormat, ExportOptions, OutlineStyle, Point, Shape, ZonePalette,
};

fn doc_with_l_shape() -> Document {
    let mut doc = Document::new("Export Test", Default::default());
    let id = doc.add_space("Living", 15.0, "Public").unwrap();
    doc.place_space(&id, Point::new(40.0, 60.0), 0).unwrap();
    let space = doc.space_mut(&id).unwrap();
    // 100 x 100 px minus a 50 x 40 px notch: 8000 px² = 20 m².
    space.shape = Shape::Polygon(vec![
        Point::new(0.0, 0.0),
        Point::new(100.0, 0.0),
        Point::new(100.0, 60.0),
        Point::new(50.0, 60.0),
        Point::new(50.0, 100.0),
        Point::new(0.0, 100.0),
    ]);
    space.width = 100.0;
    space.height = 100.0;
    space.area = 20.0;
    doc
}

/// LWPOLYLINE vertices from DXF text, in file order.
fn polyline_vertices(dxf: &str) -> Vec<Vec<Point>> {
    let lines: Vec<&str> = dxf.lines().collect();
    let mut polylines = Vec::new();
    let mut i = 0;
    while i + 1 < lines.len() {
        if lines[i] == "0" && lines[i + 1] == "LWPOLYLINE" {
            let mut points = Vec::new();
            let mut j = i + 2;
            while j + 1 < lines.len() && lines[j] != "0" {
                if lines[j] == "10" && j + 3 < lines.len() && lines[j + 2] == "20" {
                    let x: f64 = lines[j + 1].parse().unwrap();
                    let y: f64 = lines[j + 3].parse().unwrap();
                    points.push(Point::new(x, y));
                    j += 4;
                } else {
                    j += 2;
                }
            }
            polylines.push(points);
            i = j;
        } else {
            i += 2;
        }
    }
    polylines
}

#[test]
fn test_exported_area_matches_label() {
    let doc = doc_with_l_shape();
    let options = ExportOptions::default();
    let palette = ZonePalette::default();

    let svg = export_document(&doc, ExportFormat::Svg, &options, &palette).unwrap();
    let svg = String::from_utf8(svg.bytes).unwrap();
    assert!(svg.contains(">20 m²</text>"));

    let scene = ExportScene::build(&doc, &options, &palette).unwrap();
    let dxf = render_dxf(&scene);
    assert!(dxf.contains("20 m\\U+00B2"));
    let polylines = polyline_vertices(&dxf);
    assert_eq!(polylines.len(), 1);
    assert_eq!(polylines[0].len(), 6);
    // DXF is in meters, so the shoelace area is directly in m².
    assert!((signed_area_px(&polylines[0]).abs() - 20.0).abs() < 1e-6);
}

#[test]
fn test_bubble_outline_is_sampled_in_dxf() {
    let mut doc = doc_with_l_shape();
    let id = doc.spaces()[0].id.clone();
    doc.space_mut(&id).unwrap().outline = OutlineStyle::Bubble;
    let scene = ExportScene::build(&doc, &ExportOptions::default(), &ZonePalette::default()).unwrap();
    let polylines = polyline_vertices(&render_dxf(&scene));
    // Six cubic segments, ten samples each.
    assert_eq!(polylines[0].len(), 60);
}

#[test]
fn test_export_with_nothing_placed_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("plan.svg");
    let mut doc = Document::default();
    doc.add_space("Unplaced", 12.0, "Public").unwrap();

    for format in [ExportFormat::Svg, ExportFormat::Dxf, ExportFormat::Png, ExportFormat::Json] {
        let result = export_document(&doc, format, &ExportOptions::default(), &ZonePalette::default())
            .map(|artifact| std::fs::write(&out, artifact.bytes));
        let err = result.unwrap_err();
        assert!(err.is_export_precondition(), "{format}: {err}");
    }
    assert!(!out.exists());
}

#[test]
fn test_export_targets_requested_floor() {
    let mut doc = doc_with_l_shape();
    let upper = doc.add_floor(None);
    let id = doc.add_space("Attic", 9.0, "Storage").unwrap();
    doc.place_space(&id, Point::new(0.0, 0.0), upper).unwrap();

    let options = ExportOptions {
        floor: Some(upper),
        ..ExportOptions::default()
    };
    let svg = export_document(&doc, ExportFormat::Svg, &options, &ZonePalette::default()).unwrap();
    let svg = String::from_utf8(svg.bytes).unwrap();
    assert!(svg.contains(">Attic</text>"));
    assert!(!svg.contains(">Living</text>"));
}

#[test]
fn test_deleted_space_leaves_no_connection_in_export() {
    let mut doc = Document::default();
    let a = doc.add_space("A", 10.0, "Public").unwrap();
    let b = doc.add_space("B", 10.0, "Public").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(200.0, 0.0), 0).unwrap();
    doc.connect(&a, &b).unwrap();
    doc.remove_space(&b).unwrap();

    let artifact = export_document(&doc, ExportFormat::Svg, &ExportOptions::default(), &ZonePalette::default())
        .unwrap();
    let svg = String::from_utf8(artifact.bytes).unwrap();
    assert!(svg.contains("<g id=\"connections\">\n</g>"));
    assert!(!svg.contains(">B</text>"));
}

#[test]
fn test_png_export_is_supersampled_frame() {
    let doc = doc_with_l_shape();
    let options = ExportOptions {
        supersample: 2,
        ..ExportOptions::default()
    };
    let palette = ZonePalette::default();
    let scene = ExportScene::build(&doc, &options, &palette).unwrap();
    let artifact = export_document(&doc, ExportFormat::Png, &options, &palette).unwrap();
    let image = image::load_from_memory(&artifact.bytes).unwrap();
    assert_eq!(image.width(), (scene.frame.width() * 2.0).ceil() as u32);
    assert_eq!(image.height(), (scene.frame.height() * 2.0).ceil() as u32);
}

#[test]
fn test_pdf_layout_carries_svg_without_scale_bar() {
    let doc = doc_with_l_shape();
    let artifact = export_document(&doc, ExportFormat::PdfLayout, &ExportOptions::default(), &ZonePalette::default())
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&artifact.bytes).unwrap();
    assert_eq!(value["layout"]["pageWidthMm"], 297.0);
    assert_eq!(value["layout"]["scaleBar"]["label"], "10 m");
    let svg = value["svg"].as_str().unwrap();
    assert!(svg.contains("20 m²"));
    assert!(!svg.contains("scale-bar"));
}
