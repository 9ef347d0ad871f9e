//! Clash detection for site layouts: buildings leaving the site, overlapping or
//! crowding each other, and category pairs placed closer than zoning allows.
//!
//! ```rust
//! use siteclash::{ClashEngine, ClashKind};
//!
//! let engine = ClashEngine::default();
//! let result = engine.detect_request(&siteclash::LayoutRequest::from_json(r#"{
//!     "sitePlan": { "width": 1000, "length": 500 },
//!     "buildings": [
//!         { "name": "Club", "type": "Nightclub", "width": 50, "length": 50, "x": 0, "y": 0 },
//!         { "name": "School", "type": "School", "width": 50, "length": 50, "x": 200, "y": 0 }
//!     ]
//! }"#)?)?;
//!
//! assert_eq!(result.summary().unwrap().count(ClashKind::ZoningViolation), 1);
//! # Ok::<(), siteclash::ClashError>(())
//! ```

pub mod clash;
pub mod detect;
pub mod engine;
pub mod error;
pub mod spatial;
pub mod spatial_index;
pub mod types;
pub mod validation;

pub use clash::{
    Clash, ClashDetails, ClashDetectionResult, ClashKind, ClashSummary, EdgeViolation, SiteEdge,
};
pub use detect::{DetectorKind, ZoningRule};
pub use engine::ClashEngine;
pub use error::{ClashError, Result};

pub use spatial::{BoundingBox, bounding_box, intersects, min_distance, union_bounds};

pub use spatial_index::StaticIndex;

pub use types::{
    Building, BuildingCategory, BuildingId, BuildingSpec, DetectionConfig, LayoutRequest,
    SitePlan, SitePlanSpec,
};

pub use validation::{ValidationError, validate};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ClashEngine, ClashError, DetectionConfig, Result};

    pub use crate::{Building, BuildingCategory, BuildingSpec, LayoutRequest, SitePlan, SitePlanSpec};

    pub use crate::{Clash, ClashDetails, ClashDetectionResult, ClashKind, ClashSummary};

    pub use crate::spatial::{BoundingBox, intersects, min_distance};
}
