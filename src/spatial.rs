//! Geometry kernel over axis-aligned building footprints.
//!
//! Every footprint is an axis-aligned rectangle, so all predicates here are
//! closed-form comparisons on the box extents. Boxes wrap a `geo::Rect` so
//! they interoperate with the rest of the `geo` ecosystem.

use crate::error::{ClashError, Result};
use crate::types::Building;
use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box `[x_min, x_max] x [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "BoundsRepr", from = "BoundsRepr")]
pub struct BoundingBox {
    rect: Rect,
}

/// Wire shape of a bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BoundsRepr {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl From<BoundingBox> for BoundsRepr {
    fn from(bbox: BoundingBox) -> Self {
        Self {
            x_min: bbox.x_min(),
            x_max: bbox.x_max(),
            y_min: bbox.y_min(),
            y_max: bbox.y_max(),
        }
    }
}

impl From<BoundsRepr> for BoundingBox {
    fn from(repr: BoundsRepr) -> Self {
        BoundingBox::new(repr.x_min, repr.y_min, repr.x_max, repr.y_max)
    }
}

impl BoundingBox {
    /// Create a box from its extents. Swapped extents are normalised.
    ///
    /// ```
    /// use siteclash::spatial::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(bbox.x_max(), 100.0);
    /// assert_eq!(bbox.y_max(), 50.0);
    /// ```
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            rect: Rect::new(
                geo::coord! { x: x_min, y: y_min },
                geo::coord! { x: x_max, y: y_max },
            ),
        }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn x_min(&self) -> f64 {
        self.rect.min().x
    }

    pub fn y_min(&self) -> f64 {
        self.rect.min().y
    }

    pub fn x_max(&self) -> f64 {
        self.rect.max().x
    }

    pub fn y_max(&self) -> f64 {
        self.rect.max().y
    }

    pub fn center(&self) -> Point {
        self.rect.center().into()
    }

    /// Grow the box by `amount` on all four sides.
    pub fn expand(&self, amount: f64) -> Self {
        Self::new(
            self.x_min() - amount,
            self.y_min() - amount,
            self.x_max() + amount,
            self.y_max() + amount,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.x_min(), self.y_min(), self.x_max(), self.y_max()]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Footprint of a building: its lower-left corner plus width and length.
pub fn bounding_box(building: &Building) -> BoundingBox {
    BoundingBox::new(
        building.x,
        building.y,
        building.x + building.width,
        building.y + building.length,
    )
}

/// Check whether two boxes share interior area.
///
/// Boxes that only share an edge or a corner do not intersect.
///
/// ```
/// use siteclash::spatial::{BoundingBox, intersects};
///
/// let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
/// let b = BoundingBox::new(50.0, 50.0, 150.0, 150.0);
/// let touching = BoundingBox::new(100.0, 0.0, 200.0, 100.0);
///
/// assert!(intersects(&a, &b));
/// assert!(!intersects(&a, &touching));
/// ```
pub fn intersects(a: &BoundingBox, b: &BoundingBox) -> bool {
    !(b.x_min() >= a.x_max()
        || b.x_max() <= a.x_min()
        || b.y_min() >= a.y_max()
        || b.y_max() <= a.y_min())
}

/// Euclidean distance between the nearest edges of two boxes.
///
/// The gap on an axis is zero when the boxes overlap or touch on that axis,
/// so overlapping and edge-touching boxes are at distance 0.
///
/// ```
/// use siteclash::spatial::{BoundingBox, min_distance};
///
/// let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
/// let b = BoundingBox::new(103.0, 104.0, 200.0, 200.0);
/// assert_eq!(min_distance(&a, &b), 5.0);
/// ```
pub fn min_distance(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let dx = axis_gap(a.x_min(), a.x_max(), b.x_min(), b.x_max());
    let dy = axis_gap(a.y_min(), a.y_max(), b.y_min(), b.y_max());
    (dx * dx + dy * dy).sqrt()
}

fn axis_gap(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    if a_max < b_min {
        b_min - a_max
    } else if b_max < a_min {
        a_min - b_max
    } else {
        0.0
    }
}

/// Distance between the footprints of two buildings.
pub fn distance_between(a: &Building, b: &Building) -> f64 {
    min_distance(&bounding_box(a), &bounding_box(b))
}

/// Smallest box enclosing every box in `boxes`.
///
/// # Errors
///
/// Returns [`ClashError::EmptyInput`] if `boxes` is empty.
pub fn union_bounds<'a, I>(boxes: I) -> Result<BoundingBox>
where
    I: IntoIterator<Item = &'a BoundingBox>,
{
    let mut iter = boxes.into_iter();
    let first = iter.next().ok_or(ClashError::EmptyInput)?;

    let (mut x_min, mut y_min, mut x_max, mut y_max) =
        (first.x_min(), first.y_min(), first.x_max(), first.y_max());
    for bbox in iter {
        x_min = x_min.min(bbox.x_min());
        y_min = y_min.min(bbox.y_min());
        x_max = x_max.max(bbox.x_max());
        y_max = y_max.max(bbox.y_max());
    }

    Ok(BoundingBox::new(x_min, y_min, x_max, y_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuildingCategory;

    fn building(x: f64, y: f64, width: f64, length: f64) -> Building {
        Building::new("b", BuildingCategory::Office, width, length, x, y)
    }

    #[test]
    fn test_bounding_box_from_building() {
        let bbox = bounding_box(&building(10.0, 20.0, 30.0, 40.0));

        assert_eq!(bbox.x_min(), 10.0);
        assert_eq!(bbox.y_min(), 20.0);
        assert_eq!(bbox.x_max(), 40.0);
        assert_eq!(bbox.y_max(), 60.0);
    }

    #[test]
    fn test_intersects_overlapping() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(50.0, 50.0, 150.0, 150.0);

        assert!(intersects(&a, &b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_intersects_contained() {
        let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = BoundingBox::new(10.0, 10.0, 20.0, 20.0);

        assert!(intersects(&outer, &inner));
        assert!(intersects(&inner, &outer));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let right = BoundingBox::new(100.0, 0.0, 200.0, 100.0);
        let above = BoundingBox::new(0.0, 100.0, 100.0, 200.0);
        let corner = BoundingBox::new(100.0, 100.0, 200.0, 200.0);

        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &above));
        assert!(!intersects(&a, &corner));
    }

    #[test]
    fn test_min_distance_horizontal_gap() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let b = BoundingBox::new(105.0, 0.0, 205.0, 100.0);

        assert_eq!(min_distance(&a, &b), 5.0);
        assert_eq!(min_distance(&b, &a), 5.0);
    }

    #[test]
    fn test_min_distance_diagonal_gap() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(13.0, 14.0, 20.0, 20.0);

        assert!((min_distance(&a, &b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_distance_zero_for_overlap_and_touch() {
        let a = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let overlapping = BoundingBox::new(50.0, 50.0, 150.0, 150.0);
        let touching = BoundingBox::new(100.0, 20.0, 200.0, 80.0);

        assert_eq!(min_distance(&a, &overlapping), 0.0);
        assert_eq!(min_distance(&a, &touching), 0.0);
    }

    #[test]
    fn test_union_bounds() {
        let boxes = [
            BoundingBox::new(0.0, 5.0, 10.0, 10.0),
            BoundingBox::new(-5.0, 0.0, 3.0, 3.0),
            BoundingBox::new(2.0, 2.0, 20.0, 8.0),
        ];

        let bounds = union_bounds(&boxes).unwrap();
        assert_eq!(bounds, BoundingBox::new(-5.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_union_bounds_empty() {
        let boxes: Vec<BoundingBox> = Vec::new();
        assert!(matches!(union_bounds(&boxes), Err(ClashError::EmptyInput)));
    }

    #[test]
    fn test_expand() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0).expand(5.0);
        assert_eq!(bbox, BoundingBox::new(-5.0, -5.0, 15.0, 15.0));
    }

    #[test]
    fn test_bbox_json_shape() {
        let json = serde_json::to_value(BoundingBox::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "xMin": 1.0, "xMax": 3.0, "yMin": 2.0, "yMax": 4.0 })
        );
    }
}
