//! Detection orchestrator.
//!
//! Validates a request, runs every detector in order over the validated
//! layout, and summarises the findings.

use crate::clash::{Clash, ClashDetectionResult};
use crate::detect::DetectorKind;
use crate::error::{ClashError, Result};
use crate::types::{Building, BuildingSpec, DetectionConfig, LayoutRequest, SitePlan, SitePlanSpec};
use crate::validation::validate;
use rustc_hash::FxHashSet;

/// Clash detection engine.
///
/// Holds only configuration; every call builds its own working state, so one
/// engine can serve any number of requests.
///
/// # Example
///
/// ```rust
/// use siteclash::{BuildingCategory, BuildingSpec, ClashEngine, ClashKind, SitePlanSpec};
///
/// let engine = ClashEngine::default();
/// let building = |name: &str, x: f64| BuildingSpec {
///     name: Some(name.to_string()),
///     category: Some(BuildingCategory::Office),
///     width: Some(100.0),
///     length: Some(100.0),
///     x: Some(x),
///     y: Some(0.0),
/// };
///
/// let result = engine.detect(
///     &[building("A", 0.0), building("B", 105.0)],
///     &SitePlanSpec::new(1000.0, 500.0),
/// )?;
///
/// let summary = result.summary().unwrap();
/// assert_eq!(summary.total_clashes, 1);
/// assert_eq!(summary.count(ClashKind::ClearanceViolation), 1);
/// # Ok::<(), siteclash::ClashError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClashEngine {
    config: DetectionConfig,
}

impl ClashEngine {
    /// Create an engine with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClashError::InvalidConfig`] if the configuration does not validate.
    pub fn new(config: DetectionConfig) -> Result<Self> {
        config.validate().map_err(ClashError::InvalidConfig)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Validate the input and, if it is well formed, detect clashes.
    ///
    /// Validation problems are returned as
    /// [`ClashDetectionResult::ValidationFailed`] without running any
    /// detector. `Err` is reserved for unexpected failures.
    pub fn detect(
        &self,
        buildings: &[BuildingSpec],
        site_plan: &SitePlanSpec,
    ) -> Result<ClashDetectionResult> {
        let errors = validate(buildings, site_plan);
        if !errors.is_empty() {
            log::debug!("Rejecting layout with {} validation errors", errors.len());
            return Ok(ClashDetectionResult::ValidationFailed {
                validation_errors: errors.into_iter().map(|e| e.message).collect(),
            });
        }

        let buildings = buildings
            .iter()
            .map(BuildingSpec::to_building)
            .collect::<Result<Vec<_>>>()?;
        let site_plan = site_plan.to_site_plan()?;

        self.detect_validated(&buildings, &site_plan)
    }

    pub fn detect_request(&self, request: &LayoutRequest) -> Result<ClashDetectionResult> {
        self.detect(&request.buildings, &request.site_plan)
    }

    /// Parse a JSON request, detect clashes, and serialise the result.
    ///
    /// A body that does not parse fails with [`ClashError::MalformedRequest`];
    /// see [`ClashError::is_client_error`].
    pub fn detect_json(&self, json: &str) -> Result<String> {
        let request = LayoutRequest::from_json(json)?;
        self.detect_request(&request)?.to_json()
    }

    /// Detect clashes in a layout that has already been validated.
    ///
    /// Clashes are reported in detector order (boundary, proximity, zoning),
    /// each detector's clashes in the order it found them.
    pub fn detect_validated(
        &self,
        buildings: &[Building],
        site_plan: &SitePlan,
    ) -> Result<ClashDetectionResult> {
        log::debug!(
            "Detecting clashes for {} buildings on a {}x{} site",
            buildings.len(),
            site_plan.width,
            site_plan.length
        );
        warn_duplicate_names(buildings);

        let mut clashes: Vec<Clash> = Vec::new();
        for detector in DetectorKind::ORDERED {
            clashes.extend(detector.run(buildings, site_plan, &self.config)?);
        }

        log::debug!("Detection finished with {} clashes", clashes.len());
        Ok(ClashDetectionResult::from_clashes(clashes))
    }
}

fn warn_duplicate_names(buildings: &[Building]) {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for building in buildings {
        if !seen.insert(building.name.as_str()) {
            log::warn!(
                "Duplicate building name \"{}\"; clashes are matched by input position",
                building.name
            );
        }
    }
}
