//! Domain types, request payloads and detection configuration.
//!
//! Request payloads (`LayoutRequest`, `SitePlanSpec`, `BuildingSpec`) mirror the
//! JSON accepted from callers and keep every field optional, so that missing
//! values surface as validation messages instead of parse errors. Once
//! validated they convert into the strongly typed [`Building`] and [`SitePlan`].

use crate::detect::zoning::ZoningRule;
use crate::error::{ClashError, Result};
use crate::spatial_index::DEFAULT_FAN_OUT;
use serde::de::{Error, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Building categories known to the zoning rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildingCategory {
    School,
    Nightclub,
    Stadium,
    ResidentialBuilding,
    Office,
    /// Any category string not listed above. Excluded from zoning rules.
    #[serde(other)]
    Unknown,
}

impl BuildingCategory {
    /// Lower-case label used in clash descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            BuildingCategory::School => "school",
            BuildingCategory::Nightclub => "nightclub",
            BuildingCategory::Stadium => "stadium",
            BuildingCategory::ResidentialBuilding => "residential building",
            BuildingCategory::Office => "office",
            BuildingCategory::Unknown => "building",
        }
    }
}

impl fmt::Display for BuildingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Synthetic identity of a building within one detection run: its position
/// in the input list. Names are display-only and may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub usize);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A validated building placed on the site, origin at its lower-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    #[serde(rename = "type")]
    pub category: BuildingCategory,
    pub width: f64,
    pub length: f64,
    pub x: f64,
    pub y: f64,
}

impl Building {
    pub fn new(
        name: impl Into<String>,
        category: BuildingCategory,
        width: f64,
        length: f64,
        x: f64,
        y: f64,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            width,
            length,
            x,
            y,
        }
    }
}

/// A validated site plan covering `[0, width] x [0, length]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SitePlan {
    pub width: f64,
    pub length: f64,
}

impl SitePlan {
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }
}

/// Building as received from a caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        rename = "type",
        deserialize_with = "deserialize_category",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<BuildingCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl BuildingSpec {
    /// Convert into a [`Building`].
    ///
    /// # Errors
    ///
    /// Returns [`ClashError::InvalidInput`] if a field is missing. Callers are
    /// expected to run [`crate::validation::validate`] first, so this only
    /// fires when validation was skipped.
    pub fn to_building(&self) -> Result<Building> {
        let name = self
            .name
            .clone()
            .ok_or_else(|| ClashError::InvalidInput("building is missing a name".to_string()))?;
        let missing = |field: &str| {
            ClashError::InvalidInput(format!("building \"{}\" is missing {}", name, field))
        };

        Ok(Building {
            category: self.category.ok_or_else(|| missing("a type"))?,
            width: self.width.ok_or_else(|| missing("a width"))?,
            length: self.length.ok_or_else(|| missing("a length"))?,
            x: self.x.ok_or_else(|| missing("an x position"))?,
            y: self.y.ok_or_else(|| missing("a y position"))?,
            name,
        })
    }
}

/// An empty `type` string counts as absent rather than as an unknown category.
fn deserialize_category<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<BuildingCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(label) if !label.is_empty() => {
            BuildingCategory::deserialize(label.into_deserializer()).map(Some)
        }
        _ => Ok(None),
    }
}

impl From<&Building> for BuildingSpec {
    fn from(building: &Building) -> Self {
        Self {
            name: Some(building.name.clone()),
            category: Some(building.category),
            width: Some(building.width),
            length: Some(building.length),
            x: Some(building.x),
            y: Some(building.y),
        }
    }
}

/// Site plan as received from a caller, before validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SitePlanSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl SitePlanSpec {
    pub fn new(width: f64, length: f64) -> Self {
        Self {
            width: Some(width),
            length: Some(length),
        }
    }

    /// Convert into a [`SitePlan`]. See [`BuildingSpec::to_building`].
    pub fn to_site_plan(&self) -> Result<SitePlan> {
        match (self.width, self.length) {
            (Some(width), Some(length)) => Ok(SitePlan { width, length }),
            _ => Err(ClashError::InvalidInput(
                "site plan is missing a dimension".to_string(),
            )),
        }
    }
}

impl From<SitePlan> for SitePlanSpec {
    fn from(site_plan: SitePlan) -> Self {
        Self::new(site_plan.width, site_plan.length)
    }
}

/// Detection request payload: `{ "sitePlan": {...}, "buildings": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    #[serde(default)]
    pub site_plan: SitePlanSpec,
    #[serde(default)]
    pub buildings: Vec<BuildingSpec>,
}

impl LayoutRequest {
    pub fn new(site_plan: SitePlanSpec, buildings: Vec<BuildingSpec>) -> Self {
        Self {
            site_plan,
            buildings,
        }
    }

    /// Parse a request from its JSON representation.
    ///
    /// ```rust
    /// use siteclash::LayoutRequest;
    ///
    /// let request = LayoutRequest::from_json(r#"{
    ///     "sitePlan": { "width": 1000, "length": 500 },
    ///     "buildings": [
    ///         { "name": "A", "type": "Office", "width": 100, "length": 100, "x": 0, "y": 0 }
    ///     ]
    /// }"#)?;
    /// assert_eq!(request.buildings.len(), 1);
    /// # Ok::<(), siteclash::ClashError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ClashError::MalformedRequest`] if `json` is not valid JSON or
    /// a field has the wrong type. Missing fields are left to validation.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ClashError::MalformedRequest)
    }
}

/// Detection configuration
///
/// All distances share the unit of the building coordinates. Every field has
/// a default, so partial documents are accepted.
///
/// # Example
///
/// ```rust
/// use siteclash::DetectionConfig;
///
/// let config = DetectionConfig::default();
/// assert_eq!(config.clearance_distance, 10.0);
///
/// let json = r#"{ "clearance_distance": 25 }"#;
/// let config = DetectionConfig::from_json(json).unwrap();
/// assert_eq!(config.clearance_distance, 25.0);
/// assert_eq!(config.nightclub_school_distance, 200.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Minimum gap between any two non-overlapping buildings
    #[serde(default = "DetectionConfig::default_clearance_distance")]
    pub clearance_distance: f64,

    /// Minimum distance between a nightclub and a school
    #[serde(default = "DetectionConfig::default_nightclub_school_distance")]
    pub nightclub_school_distance: f64,

    /// Minimum distance between a stadium and a residential building
    #[serde(default = "DetectionConfig::default_stadium_residential_distance")]
    pub stadium_residential_distance: f64,

    /// Minimum distance between a nightclub and a residential building
    #[serde(default = "DetectionConfig::default_nightclub_residential_distance")]
    pub nightclub_residential_distance: f64,

    /// Maximum children per node of the proximity index
    #[serde(default = "DetectionConfig::default_index_fan_out")]
    pub index_fan_out: usize,
}

impl DetectionConfig {
    const fn default_clearance_distance() -> f64 {
        10.0
    }

    const fn default_nightclub_school_distance() -> f64 {
        200.0
    }

    const fn default_stadium_residential_distance() -> f64 {
        150.0
    }

    const fn default_nightclub_residential_distance() -> f64 {
        150.0
    }

    const fn default_index_fan_out() -> usize {
        DEFAULT_FAN_OUT
    }

    pub fn with_clearance_distance(mut self, distance: f64) -> Self {
        self.clearance_distance = distance;
        self
    }

    pub fn with_nightclub_school_distance(mut self, distance: f64) -> Self {
        self.nightclub_school_distance = distance;
        self
    }

    pub fn with_stadium_residential_distance(mut self, distance: f64) -> Self {
        self.stadium_residential_distance = distance;
        self
    }

    pub fn with_nightclub_residential_distance(mut self, distance: f64) -> Self {
        self.nightclub_residential_distance = distance;
        self
    }

    pub fn with_index_fan_out(mut self, fan_out: usize) -> Self {
        self.index_fan_out = fan_out;
        self
    }

    /// The zoning rule table, in evaluation order.
    pub fn zoning_rules(&self) -> [ZoningRule; 3] {
        [
            ZoningRule::new(
                BuildingCategory::Nightclub,
                BuildingCategory::School,
                self.nightclub_school_distance,
            ),
            ZoningRule::new(
                BuildingCategory::Stadium,
                BuildingCategory::ResidentialBuilding,
                self.stadium_residential_distance,
            ),
            ZoningRule::new(
                BuildingCategory::Nightclub,
                BuildingCategory::ResidentialBuilding,
                self.nightclub_residential_distance,
            ),
        ]
    }

    /// Validate configuration values
    pub fn validate(&self) -> std::result::Result<(), String> {
        let distances = [
            ("Clearance distance", self.clearance_distance),
            ("Nightclub-school distance", self.nightclub_school_distance),
            (
                "Stadium-residential distance",
                self.stadium_residential_distance,
            ),
            (
                "Nightclub-residential distance",
                self.nightclub_residential_distance,
            ),
        ];

        for (label, value) in distances {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got: {}", label, value));
            }
            if value < 0.0 {
                return Err(format!("{} must not be negative, got: {}", label, value));
            }
        }

        if self.index_fan_out < 2 {
            return Err(format!(
                "Index fan-out must be at least 2, got: {}",
                self.index_fan_out
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: DetectionConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: DetectionConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            clearance_distance: Self::default_clearance_distance(),
            nightclub_school_distance: Self::default_nightclub_school_distance(),
            stadium_residential_distance: Self::default_stadium_residential_distance(),
            nightclub_residential_distance: Self::default_nightclub_residential_distance(),
            index_fan_out: Self::default_index_fan_out(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = DetectionConfig::default();

        assert_eq!(config.clearance_distance, 10.0);
        assert_eq!(config.nightclub_school_distance, 200.0);
        assert_eq!(config.stadium_residential_distance, 150.0);
        assert_eq!(config.nightclub_residential_distance, 150.0);
        assert_eq!(config.index_fan_out, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        assert!(
            DetectionConfig::default()
                .with_clearance_distance(-1.0)
                .validate()
                .is_err()
        );
        assert!(
            DetectionConfig::default()
                .with_nightclub_school_distance(f64::NAN)
                .validate()
                .is_err()
        );
        assert!(
            DetectionConfig::default()
                .with_index_fan_out(1)
                .validate()
                .is_err()
        );
        assert!(
            DetectionConfig::default()
                .with_clearance_distance(0.0)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = DetectionConfig::default()
            .with_clearance_distance(12.5)
            .with_index_fan_out(8);

        let json = config.to_json().unwrap();
        assert_eq!(DetectionConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_from_json_rejects_invalid() {
        assert!(DetectionConfig::from_json(r#"{ "index_fan_out": 0 }"#).is_err());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_config_toml() {
        let config = DetectionConfig::from_toml("clearance_distance = 5.0\n").unwrap();
        assert_eq!(config.clearance_distance, 5.0);
        assert_eq!(config.index_fan_out, 4);
        assert!(config.to_toml().unwrap().contains("clearance_distance"));
    }

    #[test]
    fn test_zoning_rules_follow_config() {
        let config = DetectionConfig::default().with_stadium_residential_distance(300.0);
        let rules = config.zoning_rules();

        assert_eq!(rules[0].first, BuildingCategory::Nightclub);
        assert_eq!(rules[0].second, BuildingCategory::School);
        assert_eq!(rules[0].min_distance, 200.0);
        assert_eq!(rules[1].min_distance, 300.0);
        assert_eq!(rules[2].second, BuildingCategory::ResidentialBuilding);
    }

    #[test]
    fn test_unknown_category_deserializes() {
        let spec: BuildingSpec =
            serde_json::from_str(r#"{ "name": "Depot", "type": "Warehouse" }"#).unwrap();
        assert_eq!(spec.category, Some(BuildingCategory::Unknown));
    }

    #[test]
    fn test_empty_category_deserializes_as_missing() {
        let spec: BuildingSpec = serde_json::from_str(r#"{ "name": "A", "type": "" }"#).unwrap();
        assert_eq!(spec.category, None);

        let spec: BuildingSpec = serde_json::from_str(r#"{ "name": "A", "type": null }"#).unwrap();
        assert_eq!(spec.category, None);

        let spec: BuildingSpec =
            serde_json::from_str(r#"{ "name": "A", "type": "Nightclub" }"#).unwrap();
        assert_eq!(spec.category, Some(BuildingCategory::Nightclub));
    }

    #[test]
    fn test_building_spec_conversion() {
        let building = Building::new("A", BuildingCategory::School, 10.0, 20.0, 1.0, 2.0);
        let spec = BuildingSpec::from(&building);
        assert_eq!(spec.to_building().unwrap(), building);

        let incomplete = BuildingSpec {
            name: Some("B".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            incomplete.to_building(),
            Err(ClashError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_layout_request_from_json() {
        let request = LayoutRequest::from_json(
            r#"{
                "sitePlan": { "width": 1000, "length": 500 },
                "buildings": [
                    { "name": "A", "type": "School", "width": 100, "length": 50, "x": 10, "y": 20 },
                    { "name": "B" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(request.site_plan, SitePlanSpec::new(1000.0, 500.0));
        assert_eq!(request.buildings.len(), 2);
        assert_eq!(request.buildings[0].category, Some(BuildingCategory::School));
        assert_eq!(request.buildings[1].width, None);
    }

    #[test]
    fn test_layout_request_wrong_field_type() {
        let result = LayoutRequest::from_json(
            r#"{ "buildings": [ { "name": "A", "type": "Office", "width": "ten" } ] }"#,
        );

        let err = result.unwrap_err();
        assert!(matches!(err, ClashError::MalformedRequest(_)));
        assert!(err.is_client_error());
    }
}
