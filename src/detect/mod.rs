//! Clash detectors.
//!
//! Each detector is a pure function of the building list (and, for the
//! boundary detector, the site plan). None reads another's output, so the
//! orchestrator simply runs them in [`DetectorKind::ORDERED`] and concatenates
//! the findings.

pub mod boundary;
pub mod proximity;
pub mod zoning;

use crate::clash::Clash;
use crate::error::Result;
use crate::types::{Building, DetectionConfig, SitePlan};

pub use boundary::detect_out_of_bounds;
pub use proximity::detect_proximity;
pub use zoning::{ZoningRule, detect_zoning};

/// The detectors known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectorKind {
    Boundary,
    Proximity,
    Zoning,
}

impl DetectorKind {
    /// Order in which the engine runs the detectors and reports their clashes.
    pub const ORDERED: [DetectorKind; 3] = [
        DetectorKind::Boundary,
        DetectorKind::Proximity,
        DetectorKind::Zoning,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DetectorKind::Boundary => "boundary",
            DetectorKind::Proximity => "proximity",
            DetectorKind::Zoning => "zoning",
        }
    }

    /// Run this detector over a validated layout.
    pub fn run(
        &self,
        buildings: &[Building],
        site_plan: &SitePlan,
        config: &DetectionConfig,
    ) -> Result<Vec<Clash>> {
        let clashes = match self {
            DetectorKind::Boundary => detect_out_of_bounds(buildings, site_plan),
            DetectorKind::Proximity => detect_proximity(buildings, config)?,
            DetectorKind::Zoning => detect_zoning(buildings, &config.zoning_rules()),
        };

        log::debug!("{} detector found {} clashes", self.name(), clashes.len());
        Ok(clashes)
    }
}
