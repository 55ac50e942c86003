use bubbleplan_core::{Color, SnapshotError};
use bubbleplan_designer::{
    document_from_json, load_from_file, save_to_file, Annotation, AnnotationKind, Document, OutlineStyle,
    Point, Shape, SpaceStyle,
};

fn sample_document() -> Document {
    let mut doc = Document::new("Courtyard House", Default::default());
    let upper = doc.add_floor(Some("Mezzanine".into()));
    let a = doc.add_space("Living", 36.0, "Public").unwrap();
    let b = doc.add_space("Study", 9.0, "Work").unwrap();
    let c = doc.add_space("Loft", 25.0, "Private").unwrap();
    doc.add_space("Pantry", 4.0, "Service").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(200.0, 40.0), 0).unwrap();
    doc.place_space(&c, Point::new(10.0, 10.0), upper).unwrap();
    doc.connect(&a, &b).unwrap();
    doc.set_description(&b, Some("Quiet corner".into())).unwrap();

    let study = doc.space_mut(&b).unwrap();
    study.materialize_polygon();
    study.outline = OutlineStyle::Bubble;
    study.style = Some(SpaceStyle {
        fill: Some(Color::rgb(0xaa, 0xbb, 0xcc)),
        border: None,
    });

    doc.zone_colors.insert("Public".into(), Color::rgb(0xff, 0xee, 0x00));
    doc.add_annotation(Annotation::new(
        0,
        AnnotationKind::Text {
            position: Point::new(5.0, 300.0),
            text: "North".into(),
            font_size: 14.0,
        },
    ));
    doc.set_current_floor(upper).unwrap();
    doc
}

#[test]
fn test_file_round_trip_preserves_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("house.json");
    let doc = sample_document();
    save_to_file(&doc, &path).unwrap();

    let (loaded, report) = load_from_file(&path).unwrap();
    assert!(report.is_clean());
    assert_eq!(loaded.project_name, "Courtyard House");
    assert_eq!(loaded.floors().len(), 2);
    assert_eq!(loaded.current_floor(), 1);
    assert_eq!(loaded.spaces(), doc.spaces());
    assert_eq!(loaded.connections(), doc.connections());
    assert_eq!(loaded.zone_colors, doc.zone_colors);
    assert_eq!(loaded.annotations, doc.annotations);
    assert_eq!(loaded.settings, doc.settings);
    assert_eq!(loaded.style, doc.style);

    let study = loaded.spaces().iter().find(|s| s.name == "Study").unwrap();
    assert!(matches!(study.shape, Shape::Polygon(ref p) if p.len() == 4));
    assert_eq!(study.outline, OutlineStyle::Bubble);
    assert_eq!(study.description.as_deref(), Some("Quiet corner"));
}

#[test]
fn test_snapshot_field_names() {
    let json = bubbleplan_designer::document_to_json(&sample_document()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], "2.0");
    assert!(value["timestamp"].is_string());
    assert_eq!(value["projectName"], "Courtyard House");
    assert_eq!(value["rooms"][0]["isPlaced"], true);
    assert_eq!(value["zoneColors"]["Public"], "#ffee00");
    assert!(value["appSettings"]["pixelsPerMeter"].is_number());
    assert_eq!(value["currentFloor"], 1);
}

#[test]
fn test_legacy_snapshot_with_dangling_connection() {
    let json = r##"{
        "version": "1.3",
        "projectName": "Legacy",
        "rooms": [
            {"id": 1, "name": "Hall", "area": 9, "zone": "Circulation", "isPlaced": true, "x": 0, "y": 0},
            {"id": 2, "name": "Broken", "area": -3, "zone": "Public"},
            {"id": 3, "name": "Upstairs", "area": 16, "zone": "Private", "isPlaced": true, "floor": 2}
        ],
        "connections": [
            {"id": "c1", "fromId": 1, "toId": 3},
            {"id": "c2", "fromId": 1, "toId": 99},
            {"fromId": 1, "toId": 1}
        ],
        "zoneColors": {"Circulation": {"bg": "#fecaca"}, "Bogus": 42}
    }"##;
    let (doc, report) = document_from_json(json).unwrap();
    assert_eq!(doc.spaces().len(), 2);
    assert_eq!(report.rejected_rooms.len(), 1);
    assert_eq!(report.rejected_rooms[0].index, 1);
    assert_eq!(report.dropped_connections, 2);
    assert_eq!(report.skipped_entries, 1);
    assert_eq!(doc.connections().len(), 1);
    assert_eq!(doc.connections()[0].id, "c1");
    // Floor 2 is referenced by a room and gets created.
    assert!(doc.floor(2).is_some());
    assert_eq!(doc.zone_colors.get("Circulation"), Some(&Color::rgb(0xfe, 0xca, 0xca)));
}

#[test]
fn test_future_major_version_is_refused() {
    let err = document_from_json(r#"{"version": "3.0", "rooms": []}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::UnsupportedVersion { ref version } if version == "3.0"));
}

#[test]
fn test_non_object_is_a_parse_error() {
    assert!(matches!(document_from_json("not json"), Err(SnapshotError::Parse(_))));
    assert!(load_from_file("/definitely/not/here.json").is_err());
}

#[test]
fn test_malformed_colors_are_skipped_not_fatal() {
    let json = r##"{
        "version": "2.0",
        "rooms": [
            {"id": "a", "name": "Hall", "area": 9, "zone": "Circulation", "isPlaced": true,
             "style": {"fill": "#aéaaa"}}
        ],
        "zoneColors": {"Circulation": "#aéaaa", "Public": "#fde68a"},
        "annotations": [
            {"id": "n1", "type": "text", "position": {"x": 0, "y": 0}, "text": "N", "color": "#aéaaa"}
        ]
    }"##;
    let (doc, report) = document_from_json(json).unwrap();
    assert_eq!(doc.spaces().len(), 1);
    assert_eq!(doc.spaces()[0].style, None);
    assert_eq!(doc.zone_colors.len(), 1);
    assert!(doc.annotations.is_empty());
    assert_eq!(report.skipped_entries, 2);
}

#[test]
fn test_unusable_scale_falls_back_to_default() {
    let json = r#"{
        "version": "2.0",
        "appSettings": {"pixelsPerMeter": 0, "gridStepM": -2, "circulationFactor": 0.9},
        "rooms": [{"id": "a", "name": "Living", "area": 25, "zone": "Public", "isPlaced": true}]
    }"#;
    let (doc, report) = document_from_json(json).unwrap();
    assert_eq!(doc.pixels_per_meter(), 20.0);
    assert_eq!(doc.settings.grid_step_m, 1.0);
    assert_eq!(doc.settings.circulation_factor, 0.5);
    assert_eq!(report.settings_warnings.len(), 2);
    assert!(report.settings_warnings[0].starts_with("pixelsPerMeter"));
    assert!(!report.is_clean());
    assert_eq!(doc.spaces()[0].width, 100.0);
}

#[test]
fn test_duplicate_room_ids_keep_the_first() {
    let json = r#"{"rooms": [
        {"id": 5, "name": "Bed", "area": 16, "zone": "Private"},
        {"id": "5", "name": "Twin", "area": 12, "zone": "Private"}
    ]}"#;
    let (doc, report) = document_from_json(json).unwrap();
    assert_eq!(doc.spaces().len(), 1);
    assert_eq!(doc.spaces()[0].name, "Bed");
    assert_eq!(report.rejected_rooms.len(), 1);
    assert_eq!(report.rejected_rooms[0].index, 1);
}
