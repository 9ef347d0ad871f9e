//! Static bulk-loaded R-tree over bounding boxes.
//!
//! The index is built once from a complete item set and never mutated. Items
//! are sorted by the center of their boxes (x first, then y), packed into
//! groups of at most `fan_out` leaves, and the groups are packed again level by
//! level until a single root remains.
//!
//! ## Performance Characteristics
//!
//! - **Build**: O(n log n) for the sort, O(n) for the packing passes
//! - **Query**: O(log n + k) for well-separated data, degrading to O(n) when the
//!   one-dimensional sort produces long, thin nodes that overlap the query
//!
//! There is no insert or delete. Rebuild the index when the item set changes.
//!
//! ## Example
//!
//! ```rust
//! use siteclash::spatial::BoundingBox;
//! use siteclash::spatial_index::StaticIndex;
//!
//! let items = vec![
//!     (BoundingBox::new(0.0, 0.0, 10.0, 10.0), "a"),
//!     (BoundingBox::new(50.0, 50.0, 60.0, 60.0), "b"),
//! ];
//! let index = StaticIndex::build(items, 4)?;
//!
//! let hits = index.query(&BoundingBox::new(5.0, 5.0, 20.0, 20.0));
//! assert_eq!(hits, vec![&"a"]);
//! # Ok::<(), siteclash::ClashError>(())
//! ```

use crate::error::{ClashError, Result};
use crate::spatial::{BoundingBox, intersects, union_bounds};
use smallvec::SmallVec;
use std::cmp::Ordering;

/// Default maximum number of children per node.
pub const DEFAULT_FAN_OUT: usize = 4;

/// Center x coordinates closer than this are ordered by center y instead.
const CENTER_TOLERANCE: f64 = 0.001;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Leaf { item: usize },
    Branch { children: SmallVec<[NodeId; DEFAULT_FAN_OUT]> },
}

#[derive(Debug, Clone)]
struct Node {
    bbox: BoundingBox,
    kind: NodeKind,
}

/// Read-only spatial index mapping bounding boxes to payloads.
#[derive(Debug, Clone)]
pub struct StaticIndex<T> {
    arena: Vec<Node>,
    items: Vec<T>,
    root: Option<NodeId>,
    height: usize,
}

impl<T> StaticIndex<T> {
    /// Bulk-load an index from `(bbox, payload)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`ClashError::InvalidConfig`] if `fan_out` is smaller than 2.
    pub fn build(items: Vec<(BoundingBox, T)>, fan_out: usize) -> Result<Self> {
        if fan_out < 2 {
            return Err(ClashError::InvalidConfig(format!(
                "Index fan-out must be at least 2, got: {}",
                fan_out
            )));
        }

        let mut entries: Vec<(BoundingBox, T)> = items;
        entries.sort_by(|(a, _), (b, _)| center_order(a, b));

        let mut arena = Vec::with_capacity(entries.len() * 2);
        let mut payloads = Vec::with_capacity(entries.len());
        let mut level: Vec<NodeId> = Vec::with_capacity(entries.len());

        for (bbox, payload) in entries {
            let item = payloads.len();
            payloads.push(payload);
            level.push(NodeId(arena.len()));
            arena.push(Node {
                bbox,
                kind: NodeKind::Leaf { item },
            });
        }

        if level.is_empty() {
            return Ok(Self {
                arena,
                items: payloads,
                root: None,
                height: 0,
            });
        }

        let mut height = 1;
        while level.len() > 1 {
            let mut parents = Vec::with_capacity(level.len().div_ceil(fan_out));
            for group in level.chunks(fan_out) {
                let bbox = union_bounds(group.iter().map(|id| &arena[id.0].bbox))?;
                parents.push(NodeId(arena.len()));
                arena.push(Node {
                    bbox,
                    kind: NodeKind::Branch {
                        children: group.iter().copied().collect(),
                    },
                });
            }
            level = parents;
            height += 1;
        }

        log::debug!(
            "Built static index: {} items, {} nodes, height {}",
            payloads.len(),
            arena.len(),
            height
        );

        Ok(Self {
            arena,
            items: payloads,
            root: level.first().copied(),
            height,
        })
    }

    /// Payloads whose boxes intersect `query`.
    ///
    /// Subtrees whose box does not intersect the query are skipped. Boxes that
    /// only touch the query edge are not returned. A query with non-finite
    /// coordinates returns nothing.
    pub fn query(&self, query: &BoundingBox) -> Vec<&T> {
        let mut results = Vec::new();

        if !query.is_finite() {
            log::warn!("Rejecting bounding box query with non-finite coordinates");
            return results;
        }

        let Some(root) = self.root else {
            return results;
        };

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.arena[id.0];
            if !intersects(&node.bbox, query) {
                continue;
            }
            match &node.kind {
                NodeKind::Leaf { item } => results.push(&self.items[*item]),
                // Reversed so children are visited in packing order.
                NodeKind::Branch { children } => stack.extend(children.iter().rev()),
            }
        }

        results
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of levels, counting the leaf level. Zero for an empty index.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Box enclosing every item, if any.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.root.map(|id| self.arena[id.0].bbox)
    }
}

/// Order boxes by center x, falling back to center y when the x centers lie
/// within [`CENTER_TOLERANCE`] of each other.
///
/// Centers are bucketed by the tolerance so the comparison stays a total order.
fn center_order(a: &BoundingBox, b: &BoundingBox) -> Ordering {
    let (ca, cb) = (a.center(), b.center());
    let bucket = |x: f64| (x / CENTER_TOLERANCE).round();

    bucket(ca.x())
        .total_cmp(&bucket(cb.x()))
        .then_with(|| ca.y().total_cmp(&cb.y()))
}
