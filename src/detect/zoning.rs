//! Minimum-separation rules between building categories.

use crate::clash::{Clash, ClashDetails};
use crate::spatial::distance_between;
use crate::types::{Building, BuildingCategory, BuildingId};
use rustc_hash::FxHashMap;

/// Buildings of category `first` must be at least `min_distance` away from
/// buildings of category `second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoningRule {
    pub first: BuildingCategory,
    pub second: BuildingCategory,
    pub min_distance: f64,
}

impl ZoningRule {
    pub fn new(first: BuildingCategory, second: BuildingCategory, min_distance: f64) -> Self {
        Self {
            first,
            second,
            min_distance,
        }
    }
}

/// Apply every rule to the full cross product of its two category groups.
///
/// Rules are evaluated independently: a pair matching several rules is
/// reported once per rule. Buildings of unknown category never match a rule.
/// A rule pairing a category with itself compares distinct buildings only.
pub fn detect_zoning(buildings: &[Building], rules: &[ZoningRule]) -> Vec<Clash> {
    let mut groups: FxHashMap<BuildingCategory, Vec<BuildingId>> = FxHashMap::default();
    for (idx, building) in buildings.iter().enumerate() {
        if building.category == BuildingCategory::Unknown {
            continue;
        }
        groups
            .entry(building.category)
            .or_default()
            .push(BuildingId(idx));
    }

    let mut clashes = Vec::new();
    for rule in rules {
        let (Some(firsts), Some(seconds)) = (groups.get(&rule.first), groups.get(&rule.second))
        else {
            continue;
        };

        for &first_id in firsts {
            for &second_id in seconds {
                if first_id == second_id {
                    continue;
                }
                let first = &buildings[first_id.0];
                let second = &buildings[second_id.0];

                let distance = distance_between(first, second);
                if distance < rule.min_distance {
                    clashes.push(violation(rule, (first_id, first), (second_id, second), distance));
                }
            }
        }
    }

    clashes
}

fn violation(
    rule: &ZoningRule,
    (first_id, first): (BuildingId, &Building),
    (second_id, second): (BuildingId, &Building),
    distance: f64,
) -> Clash {
    let description = format!(
        "{} \"{}\" is too close to {} \"{}\" ({:.1} units, minimum {} required).",
        capitalize(rule.first.label()),
        first.name,
        rule.second.label(),
        second.name,
        distance,
        rule.min_distance
    );

    Clash::pair(
        (first_id, first.name.as_str()),
        (second_id, second.name.as_str()),
        description,
        ClashDetails::ZoningViolation {
            distance,
            required: rule.min_distance,
            categories: (rule.first, rule.second),
        },
    )
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
