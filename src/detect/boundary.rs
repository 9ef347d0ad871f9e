//! Site boundary checks.

use crate::clash::{Clash, ClashDetails, EdgeViolation, SiteEdge};
use crate::spatial::{BoundingBox, bounding_box};
use crate::types::{Building, BuildingId, SitePlan};

/// Report every building whose footprint leaves `[0, width] x [0, length]`.
///
/// One clash per building, listing each crossed edge. The boundary itself is
/// inside the site.
pub fn detect_out_of_bounds(buildings: &[Building], site_plan: &SitePlan) -> Vec<Clash> {
    buildings
        .iter()
        .enumerate()
        .filter_map(|(idx, building)| {
            let bbox = bounding_box(building);
            let violations = edge_violations(&bbox, site_plan);
            if violations.is_empty() {
                return None;
            }

            let edges: Vec<String> = violations.iter().map(ToString::to_string).collect();
            let description = format!(
                "Building \"{}\" outside site boundaries: {}",
                building.name,
                edges.join(", ")
            );

            Some(Clash::single(
                BuildingId(idx),
                &building.name,
                description,
                ClashDetails::OutOfBounds {
                    violations,
                    bbox,
                    site_plan: *site_plan,
                },
            ))
        })
        .collect()
}

/// Site edges crossed by `bbox`, in left, bottom, right, top order.
pub fn edge_violations(bbox: &BoundingBox, site_plan: &SitePlan) -> Vec<EdgeViolation> {
    let mut violations = Vec::new();

    if bbox.x_min() < 0.0 {
        violations.push(EdgeViolation::new(SiteEdge::Left, bbox.x_min(), 0.0));
    }
    if bbox.y_min() < 0.0 {
        violations.push(EdgeViolation::new(SiteEdge::Bottom, bbox.y_min(), 0.0));
    }
    if bbox.x_max() > site_plan.width {
        violations.push(EdgeViolation::new(
            SiteEdge::Right,
            bbox.x_max(),
            site_plan.width,
        ));
    }
    if bbox.y_max() > site_plan.length {
        violations.push(EdgeViolation::new(
            SiteEdge::Top,
            bbox.y_max(),
            site_plan.length,
        ));
    }

    violations
}
