use crate::error::{CloudError, Result};
use crate::node::{KNearestSearch, PartitionNode};
use crate::point::Point;
use tracing::debug;

/// A k-d tree built over a snapshot of a point buffer.
///
/// The tree reorders the buffer while building and afterwards only refers to it through index
/// ranges. It stays valid as long as the buffer is neither reordered nor resized. Queries check
/// the buffer length and report [`CloudError::NotBuilt`] on a mismatch, reordering cannot be
/// detected and is the caller's responsibility.
#[derive(Debug)]
pub struct KdTree {
    root: Option<PartitionNode>,
    len: usize,
    leaf_capacity: usize,
}

impl KdTree {
    /// Builds a tree over all of `points`. An empty buffer gives a tree without root.
    pub fn build<T: Point>(points: &mut [T], leaf_capacity: usize) -> Self {
        let len = points.len();
        let root = if len == 0 {
            None
        } else {
            Some(PartitionNode::build(points, 0, len, leaf_capacity))
        };

        let tree = KdTree { root, len, leaf_capacity };
        debug!(
            points = len,
            leaf_capacity,
            depth = tree.depth(),
            leaves = tree.leaf_count(),
            "built k-d tree"
        );
        tree
    }

    pub fn root(&self) -> Option<&PartitionNode> {
        self.root.as_ref()
    }

    /// Number of points the tree was built over.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn leaf_capacity(&self) -> usize {
        self.leaf_capacity
    }

    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, PartitionNode::depth)
    }

    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, PartitionNode::leaf_count)
    }

    fn check<T>(&self, points: &[T]) -> Result<()> {
        if points.len() != self.len {
            return Err(CloudError::NotBuilt);
        }
        Ok(())
    }

    /// The `k` points of `points` nearest to `query` as `(dist_sq, index)` pairs, nearest first.
    ///
    /// Returns fewer than `k` pairs if the buffer holds fewer points, and none for `k == 0`.
    pub fn find_k_nearest<T: Point>(
        &self,
        points: &[T],
        query: &[f64; 3],
        k: usize,
    ) -> Result<Vec<(f64, usize)>> {
        self.check(points)?;

        let mut search = KNearestSearch::new(k);
        if let Some(root) = &self.root {
            root.find_k_nearest(points, query, &mut search);
        }
        Ok(search.into_candidates())
    }

    /// Calls `visitor(index, dist_sq)` for every point within squared distance `radius2` of
    /// `center`.
    pub fn find_in_radius<T: Point, F>(
        &self,
        points: &[T],
        center: &[f64; 3],
        radius2: f64,
        mut visitor: F,
    ) -> Result<()>
    where
        F: FnMut(usize, f64),
    {
        self.check(points)?;

        if let Some(root) = &self.root {
            root.find_in_radius(points, center, radius2, &mut visitor);
        }
        Ok(())
    }
}
