//! Zone aggregation: per-zone convex hulls and area totals.

use bubbleplan_core::constants::ZONE_HULL_RADIUS;

use crate::document::Document;
use crate::geometry::{convex_hull, rounded_polygon_path, PathData};
use crate::model::{Point, Space, SpaceId};

/// Which spaces count toward a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneScope {
    /// Placed spaces on the floor (canvas view).
    #[default]
    Placed,
    /// Every space in the program; hulls still use placed spaces only.
    All,
}

/// One zone's aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSummary {
    pub zone: String,
    pub space_ids: Vec<SpaceId>,
    /// Sum of declared areas, m².
    pub net_area: f64,
    pub circulation_area: f64,
    pub gross_area: f64,
    /// Convex hull of the placed members' world vertices.
    pub hull: Vec<Point>,
}

impl ZoneSummary {
    /// Dashed-region outline drawn behind the spaces.
    pub fn hull_path(&self) -> PathData {
        rounded_polygon_path(&self.hull, ZONE_HULL_RADIUS)
    }
}

/// Totals across zones.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneTotals {
    pub net_area: f64,
    pub circulation_area: f64,
    pub gross_area: f64,
    pub space_count: usize,
}

/// Groups spaces by zone label in first-seen order.
pub fn aggregate_zones(doc: &Document, floor: usize, scope: ZoneScope) -> Vec<ZoneSummary> {
    let members: Vec<&Space> = match scope {
        ZoneScope::Placed => doc.spaces_on_floor(floor).collect(),
        ZoneScope::All => doc.spaces().iter().collect(),
    };
    let factor = doc.settings.circulation_factor;

    let mut order: Vec<String> = Vec::new();
    for space in &members {
        if !order.contains(&space.zone) {
            order.push(space.zone.clone());
        }
    }

    order
        .into_iter()
        .map(|zone| {
            let group: Vec<&&Space> = members.iter().filter(|s| s.zone == zone).collect();
            let net_area: f64 = group.iter().map(|s| s.area).sum();
            let circulation_area = net_area * factor;
            let vertices: Vec<Point> = group
                .iter()
                .filter(|s| s.placed && s.floor == floor)
                .flat_map(|s| s.world_vertices())
                .collect();
            ZoneSummary {
                space_ids: group.iter().map(|s| s.id.clone()).collect(),
                net_area,
                circulation_area,
                gross_area: net_area + circulation_area,
                hull: convex_hull(&vertices),
                zone,
            }
        })
        .collect()
}

pub fn zone_totals(zones: &[ZoneSummary]) -> ZoneTotals {
    zones.iter().fold(ZoneTotals::default(), |acc, z| ZoneTotals {
        net_area: acc.net_area + z.net_area,
        circulation_area: acc.circulation_area + z.circulation_area,
        gross_area: acc.gross_area + z.gross_area,
        space_count: acc.space_count + z.space_ids.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::default();
        let a = doc.add_space("Living", 25.0, "Public").unwrap();
        let b = doc.add_space("Dining", 25.0, "Public").unwrap();
        let c = doc.add_space("Bed", 16.0, "Private").unwrap();
        doc.add_space("Store", 4.0, "Service").unwrap();
        doc.place_space(&a, Point::new(0.0, 0.0), 0).unwrap();
        doc.place_space(&b, Point::new(200.0, 50.0), 0).unwrap();
        doc.place_space(&c, Point::new(0.0, 300.0), 0).unwrap();
        doc
    }

    #[test]
    fn test_placed_scope() {
        let zones = aggregate_zones(&doc(), 0, ZoneScope::Placed);
        assert_eq!(zones.len(), 2);
        let public = &zones[0];
        assert_eq!(public.zone, "Public");
        assert_eq!(public.net_area, 50.0);
        assert_eq!(public.circulation_area, 12.5);
        assert_eq!(public.gross_area, 62.5);
        // Eight corners; the two inner ones on each side fall inside the hull.
        assert_eq!(public.hull.len(), 6);
        assert!(!public.hull_path().is_empty());
    }

    #[test]
    fn test_all_scope_counts_inventory() {
        let zones = aggregate_zones(&doc(), 0, ZoneScope::All);
        assert_eq!(zones.len(), 3);
        let service = zones.iter().find(|z| z.zone == "Service").unwrap();
        assert_eq!(service.net_area, 4.0);
        assert!(service.hull.is_empty());
        let totals = zone_totals(&zones);
        assert_eq!(totals.net_area, 70.0);
        assert_eq!(totals.gross_area, 87.5);
        assert_eq!(totals.space_count, 4);
    }
}
