//! Clash findings and the detection result returned to callers.

use crate::error::Result;
use crate::spatial::BoundingBox;
use crate::types::{BuildingCategory, BuildingId, SitePlan};
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of conflict found between buildings and the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ClashKind {
    OutOfBounds,
    Overlap,
    ClearanceViolation,
    ZoningViolation,
}

impl fmt::Display for ClashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClashKind::OutOfBounds => "OutOfBounds",
            ClashKind::Overlap => "Overlap",
            ClashKind::ClearanceViolation => "ClearanceViolation",
            ClashKind::ZoningViolation => "ZoningViolation",
        };
        f.write_str(name)
    }
}

/// Side of the site plan a building crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteEdge {
    Left,
    Bottom,
    Right,
    Top,
}

/// One violated site edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeViolation {
    pub edge: SiteEdge,
    /// Coordinate of the offending building edge
    pub position: f64,
    /// Site limit that was crossed
    pub limit: f64,
    /// How far the building extends past the limit
    pub overshoot: f64,
}

impl EdgeViolation {
    pub fn new(edge: SiteEdge, position: f64, limit: f64) -> Self {
        Self {
            edge,
            position,
            limit,
            overshoot: (position - limit).abs(),
        }
    }
}

impl fmt::Display for EdgeViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.edge {
            SiteEdge::Left => write!(f, "left edge (x < 0)"),
            SiteEdge::Bottom => write!(f, "bottom edge (y < 0)"),
            SiteEdge::Right => write!(f, "right edge (x = {} > {})", self.position, self.limit),
            SiteEdge::Top => write!(f, "top edge (y = {} > {})", self.position, self.limit),
        }
    }
}

/// Kind-specific detail attached to a clash.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "details", rename_all_fields = "camelCase")]
pub enum ClashDetails {
    OutOfBounds {
        violations: Vec<EdgeViolation>,
        bbox: BoundingBox,
        site_plan: SitePlan,
    },
    Overlap,
    ClearanceViolation {
        distance: f64,
        required: f64,
    },
    ZoningViolation {
        distance: f64,
        required: f64,
        categories: (BuildingCategory, BuildingCategory),
    },
}

impl ClashDetails {
    pub fn kind(&self) -> ClashKind {
        match self {
            ClashDetails::OutOfBounds { .. } => ClashKind::OutOfBounds,
            ClashDetails::Overlap => ClashKind::Overlap,
            ClashDetails::ClearanceViolation { .. } => ClashKind::ClearanceViolation,
            ClashDetails::ZoningViolation { .. } => ClashKind::ZoningViolation,
        }
    }

    /// Measured distance, for the kinds that carry one.
    pub fn distance(&self) -> Option<f64> {
        match self {
            ClashDetails::ClearanceViolation { distance, .. }
            | ClashDetails::ZoningViolation { distance, .. } => Some(*distance),
            _ => None,
        }
    }

    /// Required minimum distance, for the kinds that carry one.
    pub fn required(&self) -> Option<f64> {
        match self {
            ClashDetails::ClearanceViolation { required, .. }
            | ClashDetails::ZoningViolation { required, .. } => Some(*required),
            _ => None,
        }
    }
}

/// A single conflict involving one or two buildings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clash {
    /// Names of the buildings involved, for display
    pub buildings: SmallVec<[String; 2]>,
    /// Input positions of the buildings involved
    #[serde(skip)]
    pub building_ids: SmallVec<[BuildingId; 2]>,
    pub description: String,
    #[serde(flatten)]
    pub details: ClashDetails,
}

impl Clash {
    pub fn single(id: BuildingId, name: &str, description: String, details: ClashDetails) -> Self {
        Self {
            buildings: SmallVec::from_iter([name.to_string()]),
            building_ids: SmallVec::from_iter([id]),
            description,
            details,
        }
    }

    pub fn pair(
        (first_id, first_name): (BuildingId, &str),
        (second_id, second_name): (BuildingId, &str),
        description: String,
        details: ClashDetails,
    ) -> Self {
        Self {
            buildings: SmallVec::from_iter([first_name.to_string(), second_name.to_string()]),
            building_ids: SmallVec::from_iter([first_id, second_id]),
            description,
            details,
        }
    }

    pub fn kind(&self) -> ClashKind {
        self.details.kind()
    }

    /// Whether this clash names the building at `id`.
    pub fn involves(&self, id: BuildingId) -> bool {
        self.building_ids.contains(&id)
    }
}

/// Clash counts for a detection run. Kinds that never occur are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClashSummary {
    pub total_clashes: usize,
    pub by_type: BTreeMap<ClashKind, usize>,
}

impl ClashSummary {
    pub fn from_clashes(clashes: &[Clash]) -> Self {
        let mut by_type = BTreeMap::new();
        for clash in clashes {
            *by_type.entry(clash.kind()).or_insert(0) += 1;
        }

        Self {
            total_clashes: clashes.len(),
            by_type,
        }
    }

    pub fn count(&self, kind: ClashKind) -> usize {
        self.by_type.get(&kind).copied().unwrap_or(0)
    }
}

/// Outcome of a detection request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ClashDetectionResult {
    /// The input was rejected; no detection was performed.
    #[serde(rename_all = "camelCase")]
    ValidationFailed { validation_errors: Vec<String> },
    Detected {
        summary: ClashSummary,
        clashes: Vec<Clash>,
    },
}

impl ClashDetectionResult {
    pub fn from_clashes(clashes: Vec<Clash>) -> Self {
        ClashDetectionResult::Detected {
            summary: ClashSummary::from_clashes(&clashes),
            clashes,
        }
    }

    /// True when the caller sent malformed input and should fix it.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ClashDetectionResult::ValidationFailed { .. })
    }

    pub fn validation_errors(&self) -> &[String] {
        match self {
            ClashDetectionResult::ValidationFailed { validation_errors } => validation_errors,
            ClashDetectionResult::Detected { .. } => &[],
        }
    }

    pub fn clashes(&self) -> &[Clash] {
        match self {
            ClashDetectionResult::Detected { clashes, .. } => clashes,
            ClashDetectionResult::ValidationFailed { .. } => &[],
        }
    }

    pub fn summary(&self) -> Option<&ClashSummary> {
        match self {
            ClashDetectionResult::Detected { summary, .. } => Some(summary),
            ClashDetectionResult::ValidationFailed { .. } => None,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
