//! Input validation for detection requests.
//!
//! Every problem is collected rather than stopping at the first one, so a
//! caller can fix the whole payload in one pass.

use crate::types::{BuildingSpec, SitePlanSpec};
use thiserror::Error;

/// A human-readable problem with the request payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validate a site plan and its buildings.
///
/// Requires positive site plan dimensions, and for every building a name, a
/// type, positive width and length, and non-negative x and y. Non-finite
/// numbers are rejected.
///
/// # Examples
///
/// ```
/// use siteclash::validation::validate;
/// use siteclash::{BuildingSpec, SitePlanSpec};
///
/// let errors = validate(&[BuildingSpec::default()], &SitePlanSpec::new(1000.0, 500.0));
/// assert_eq!(errors[0].message, "Building at index 0 is missing a name");
/// ```
pub fn validate(buildings: &[BuildingSpec], site_plan: &SitePlanSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !is_positive(site_plan.width) {
        errors.push(ValidationError::new(
            "Site plan width must be a positive number",
        ));
    }
    if !is_positive(site_plan.length) {
        errors.push(ValidationError::new(
            "Site plan length must be a positive number",
        ));
    }

    for (idx, building) in buildings.iter().enumerate() {
        let name = match building.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                errors.push(ValidationError::new(format!(
                    "Building at index {} is missing a name",
                    idx
                )));
                format!("Building at index {}", idx)
            }
        };

        if building.category.is_none() {
            errors.push(ValidationError::new(format!(
                "Building \"{}\" is missing a type",
                name
            )));
        }
        if !is_positive(building.width) {
            errors.push(ValidationError::new(format!(
                "Building \"{}\" width must be positive",
                name
            )));
        }
        if !is_positive(building.length) {
            errors.push(ValidationError::new(format!(
                "Building \"{}\" length must be positive",
                name
            )));
        }
        if !is_non_negative(building.x) {
            errors.push(ValidationError::new(format!(
                "Building \"{}\" x position must be >=0",
                name
            )));
        }
        if !is_non_negative(building.y) {
            errors.push(ValidationError::new(format!(
                "Building \"{}\" y position must be >=0",
                name
            )));
        }
    }

    errors
}

fn is_positive(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite() && v > 0.0)
}

fn is_non_negative(value: Option<f64>) -> bool {
    matches!(value, Some(v) if v.is_finite() && v >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuildingCategory;

    fn valid_building(name: &str) -> BuildingSpec {
        BuildingSpec {
            name: Some(name.to_string()),
            category: Some(BuildingCategory::Office),
            width: Some(100.0),
            length: Some(100.0),
            x: Some(0.0),
            y: Some(0.0),
        }
    }

    fn messages(errors: Vec<ValidationError>) -> Vec<String> {
        errors.into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn test_valid_input() {
        let errors = validate(&[valid_building("A")], &SitePlanSpec::new(1000.0, 500.0));
        assert!(errors.is_empty());
    }

    #[test]
    fn test_invalid_site_plan() {
        let errors = validate(&[], &SitePlanSpec::new(0.0, -5.0));
        assert_eq!(
            messages(errors),
            vec![
                "Site plan width must be a positive number",
                "Site plan length must be a positive number",
            ]
        );

        let errors = validate(&[], &SitePlanSpec::default());
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_missing_name_uses_index() {
        let building = BuildingSpec {
            name: None,
            ..valid_building("")
        };
        let errors = validate(
            &[valid_building("A"), building],
            &SitePlanSpec::new(1000.0, 500.0),
        );

        assert_eq!(
            messages(errors),
            vec!["Building at index 1 is missing a name"]
        );
    }

    #[test]
    fn test_all_building_errors() {
        let building = BuildingSpec {
            name: Some("Broken".to_string()),
            category: None,
            width: Some(0.0),
            length: None,
            x: Some(-1.0),
            y: Some(f64::NAN),
        };
        let errors = validate(&[building], &SitePlanSpec::new(1000.0, 500.0));

        assert_eq!(
            messages(errors),
            vec![
                "Building \"Broken\" is missing a type",
                "Building \"Broken\" width must be positive",
                "Building \"Broken\" length must be positive",
                "Building \"Broken\" x position must be >=0",
                "Building \"Broken\" y position must be >=0",
            ]
        );
    }

    #[test]
    fn test_empty_name_is_missing() {
        let errors = validate(&[valid_building("")], &SitePlanSpec::new(1000.0, 500.0));
        assert_eq!(
            messages(errors),
            vec!["Building at index 0 is missing a name"]
        );
    }

    #[test]
    fn test_empty_type_is_missing() {
        let building: BuildingSpec = serde_json::from_str(
            r#"{ "name": "A", "type": "", "width": 10, "length": 10, "x": 0, "y": 0 }"#,
        )
        .unwrap();
        let errors = validate(&[building], &SitePlanSpec::new(1000.0, 500.0));

        assert_eq!(messages(errors), vec!["Building \"A\" is missing a type"]);
    }

    #[test]
    fn test_unnamed_building_errors_use_fallback_name() {
        let building = BuildingSpec {
            width: Some(-3.0),
            ..valid_building("")
        };
        let errors = validate(&[building], &SitePlanSpec::new(1000.0, 500.0));

        assert_eq!(
            messages(errors),
            vec![
                "Building at index 0 is missing a name",
                "Building \"Building at index 0\" width must be positive",
            ]
        );
    }
}
