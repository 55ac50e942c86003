use bubbleplan_core::{Color, ColorMode};
use bubbleplan_designer::colors::hashed_zone_colors;
use bubbleplan_designer::{aggregate_zones, zone_totals, Document, Point, ZonePalette, ZoneScope};

fn two_floor_doc() -> Document {
    let mut doc = Document::default();
    let upstairs = doc.add_floor(Some("Upper".into()));
    let a = doc.add_space("Living", 30.0, "Public").unwrap();
    let b = doc.add_space("Bed", 12.0, "Private").unwrap();
    let c = doc.add_space("Bed 2", 12.0, "Private").unwrap();
    doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
    doc.place_space(&b, Point::new(200.0, 0.0), 0).unwrap();
    doc.place_space(&c, Point::new(0.0, 0.0), upstairs).unwrap();
    doc
}

#[test]
fn test_zones_are_per_floor() {
    let doc = two_floor_doc();
    let ground = aggregate_zones(&doc, 0, ZoneScope::Placed);
    assert_eq!(ground.iter().map(|z| z.zone.as_str()).collect::<Vec<_>>(), ["Public", "Private"]);
    let private = &ground[1];
    assert_eq!(private.space_ids.len(), 1);
    assert_eq!(private.net_area, 12.0);
    assert_eq!(private.hull.len(), 4);

    let upper = aggregate_zones(&doc, 1, ZoneScope::Placed);
    assert_eq!(upper.len(), 1);
    assert_eq!(upper[0].zone, "Private");
}

#[test]
fn test_circulation_factor_drives_gross() {
    let mut doc = two_floor_doc();
    doc.settings.set_circulation_factor(0.5);
    let totals = zone_totals(&aggregate_zones(&doc, 0, ZoneScope::All));
    assert_eq!(totals.net_area, 54.0);
    assert_eq!(totals.circulation_area, 27.0);
    assert_eq!(totals.gross_area, 81.0);
    assert_eq!(totals.space_count, 3);
}

#[test]
fn test_zone_colors_resolution_order() {
    let mut doc = Document::default();
    let palette = ZonePalette::default();

    let resolver = doc.color_resolver(palette.clone());
    assert_eq!(resolver.zone_colors("Public").fill, Color::rgb(0xfd, 0xe6, 0x8a));
    // Keyword match inside a longer label.
    assert_eq!(
        resolver.zone_colors("Guest Bedroom Wing"),
        resolver.zone_colors("private")
    );
    // Unknown labels hash deterministically, ignoring case and padding.
    assert_eq!(resolver.zone_colors("Zone Q"), hashed_zone_colors("zone q"));
    assert_eq!(resolver.zone_colors(" ZONE Q "), resolver.zone_colors("Zone Q"));

    doc.zone_colors.insert("Public".into(), Color::rgb(10, 20, 30));
    doc.style.color_mode = ColorMode::Monochrome;
    let resolver = doc.color_resolver(palette);
    let colors = resolver.zone_colors("public");
    assert_eq!(colors.fill, Color::rgb(10, 20, 30).grayscale());
    assert_eq!(colors.fill.r, colors.fill.g);
}

#[test]
fn test_rename_zone_moves_override() {
    let mut doc = two_floor_doc();
    doc.zone_colors.insert("Private".into(), Color::rgb(1, 2, 3));
    assert_eq!(doc.rename_zone("Private", "Sleeping"), 2);
    assert!(doc.zone_colors.contains_key("Sleeping"));
    assert_eq!(doc.zones(), vec!["Public".to_string(), "Sleeping".to_string()]);
}
