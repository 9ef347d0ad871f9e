//! Overlap and clearance checks between pairs of buildings.
//!
//! Candidates come from a [`StaticIndex`] queried with each footprint grown by
//! the clearance distance, so any building closer than the clearance shows up
//! even when the two footprints do not overlap. Each unordered pair is
//! classified once: overlap first, then clearance.

use crate::clash::{Clash, ClashDetails};
use crate::error::Result;
use crate::spatial::{bounding_box, intersects, min_distance};
use crate::spatial_index::StaticIndex;
use crate::types::{Building, BuildingId, DetectionConfig};
use rustc_hash::FxHashSet;

/// Report overlapping buildings and buildings closer than the clearance distance.
///
/// Every unordered pair yields at most one clash. Pairs whose footprints only
/// touch (distance exactly 0 with no shared area) are not reported.
pub fn detect_proximity(buildings: &[Building], config: &DetectionConfig) -> Result<Vec<Clash>> {
    let clearance = config.clearance_distance;
    let boxes: Vec<_> = buildings.iter().map(bounding_box).collect();

    let items = boxes
        .iter()
        .enumerate()
        .map(|(idx, bbox)| (*bbox, BuildingId(idx)))
        .collect();
    let index = StaticIndex::build(items, config.index_fan_out)?;

    let mut clashes = Vec::new();
    let mut processed: FxHashSet<(BuildingId, BuildingId)> = FxHashSet::default();

    for (idx, building) in buildings.iter().enumerate() {
        let id = BuildingId(idx);
        let bbox = &boxes[idx];

        for &other_id in index.query(&bbox.expand(clearance)) {
            if other_id == id {
                continue;
            }
            if !processed.insert(pair_key(id, other_id)) {
                continue;
            }

            let other = &buildings[other_id.0];
            let other_bbox = &boxes[other_id.0];

            if intersects(bbox, other_bbox) {
                clashes.push(Clash::pair(
                    (id, building.name.as_str()),
                    (other_id, other.name.as_str()),
                    format!(
                        "Buildings \"{}\" and \"{}\" overlap.",
                        building.name, other.name
                    ),
                    ClashDetails::Overlap,
                ));
                continue;
            }

            let distance = min_distance(bbox, other_bbox);
            if distance > 0.0 && distance < clearance {
                clashes.push(Clash::pair(
                    (id, building.name.as_str()),
                    (other_id, other.name.as_str()),
                    format!(
                        "Buildings \"{}\" and \"{}\" are closer than minimum clearance of {} units.",
                        building.name, other.name, clearance
                    ),
                    ClashDetails::ClearanceViolation {
                        distance,
                        required: clearance,
                    },
                ));
            }
        }
    }

    Ok(clashes)
}

/// Order-independent key for an unordered building pair.
pub fn pair_key(a: BuildingId, b: BuildingId) -> (BuildingId, BuildingId) {
    if a <= b { (a, b) } else { (b, a) }
}
