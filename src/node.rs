use crate::bounds::BoundingBox;
use crate::point::Point;
use std::ops::Range;

/// Default number of points a node may hold before it splits into two children.
pub const LEAF_CAPACITY: usize = 50;

#[derive(Debug)]
enum NodeKind {
    /// Holds the points `[begin, end)` of the buffer directly.
    Leaf { begin: usize, end: usize },
    /// Owns two children covering the lower and upper half of the node's range.
    Internal {
        left: Box<PartitionNode>,
        right: Box<PartitionNode>,
    },
}

/// A node of the k-d tree.
///
/// Each node covers a contiguous index range of the point buffer it was built over and stores
/// the tightest bounding box around those points. Nodes never hold point data themselves, so a
/// tree is only meaningful together with the exact buffer (order included) it was built from.
#[derive(Debug)]
pub struct PartitionNode {
    bounds: BoundingBox,
    kind: NodeKind,
}

impl PartitionNode {
    /// Builds the subtree over `points[begin..end]`, reordering that range in place.
    ///
    /// Ranges of more than `leaf_capacity` points are split at their median along the axis of
    /// greatest extent: after the split every point left of the median is `<=` the median on that
    /// axis and every point right of it is `>=`. No order is established within either side.
    ///
    /// # Panics
    ///
    /// Panics if the range is empty or `leaf_capacity` is zero.
    pub fn build<T: Point>(
        points: &mut [T],
        begin: usize,
        end: usize,
        leaf_capacity: usize,
    ) -> Self {
        assert!(leaf_capacity > 0, "leaf capacity must be at least 1");
        let bounds = BoundingBox::from_points(points, begin, end);

        let count = end - begin;
        if count <= leaf_capacity {
            return PartitionNode {
                bounds,
                kind: NodeKind::Leaf { begin, end },
            };
        }

        // Median split
        let axis = bounds.split_axis();
        let mid = begin + count / 2;
        points[begin..end].select_nth_unstable_by(count / 2, |a, b| {
            let va = a.position()[axis];
            let vb = b.position()[axis];
            va.total_cmp(&vb)
        });

        let left = Box::new(PartitionNode::build(points, begin, mid, leaf_capacity));
        let right = Box::new(PartitionNode::build(points, mid, end, leaf_capacity));

        PartitionNode {
            bounds,
            kind: NodeKind::Internal { left, right },
        }
    }

    /// The bounding box of all points below this node.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// The `(left, right)` children of an internal node, `None` for a leaf.
    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Internal { left, right } => Some((&**left, &**right)),
        }
    }

    /// The buffer range held by a leaf, `None` for an internal node.
    pub fn leaf_range(&self) -> Option<Range<usize>> {
        match self.kind {
            NodeKind::Leaf { begin, end } => Some(begin..end),
            NodeKind::Internal { .. } => None,
        }
    }

    /// The buffer range covered by this subtree.
    pub fn range(&self) -> Range<usize> {
        match &self.kind {
            NodeKind::Leaf { begin, end } => *begin..*end,
            NodeKind::Internal { left, right } => left.range().start..right.range().end,
        }
    }

    /// Number of levels in this subtree, a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { .. } => 1,
            NodeKind::Internal { left, right } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves().count()
    }

    /// Iterates over the leaf ranges of this subtree, from the lowest buffer index upwards.
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }

    /// Offers every point of this subtree that may improve `search` to it.
    ///
    /// Children are visited nearest box first. A child is skipped entirely when its box is not
    /// closer than the current bound of the search, which shrinks as candidates accumulate.
    pub fn find_k_nearest<T: Point>(
        &self,
        points: &[T],
        query: &[f64; 3],
        search: &mut KNearestSearch,
    ) {
        if search.k == 0 {
            return;
        }

        match &self.kind {
            NodeKind::Leaf { begin, end } => {
                for i in *begin..*end {
                    search.offer(points[i].distance2(query), i);
                }
            }
            NodeKind::Internal { left, right } => {
                let dl = left.bounds.distance2(query);
                let dr = right.bounds.distance2(query);

                // Visit nearest child first
                let ((first, d_first), (second, d_second)) = if dl <= dr {
                    ((left, dl), (right, dr))
                } else {
                    ((right, dr), (left, dl))
                };

                if d_first < search.bound {
                    first.find_k_nearest(points, query, search);
                }
                // The bound may have shrunk while visiting the first child.
                if d_second < search.bound {
                    second.find_k_nearest(points, query, search);
                }
            }
        }
    }

    /// Calls `visitor(index, dist_sq)` for every point within squared distance `radius2` of
    /// `center`, boundary included. Enumeration order is unspecified.
    pub fn find_in_radius<T: Point, F>(
        &self,
        points: &[T],
        center: &[f64; 3],
        radius2: f64,
        visitor: &mut F,
    ) where
        F: FnMut(usize, f64),
    {
        match &self.kind {
            NodeKind::Leaf { begin, end } => {
                for i in *begin..*end {
                    let d2 = points[i].distance2(center);
                    if d2 <= radius2 {
                        visitor(i, d2);
                    }
                }
            }
            NodeKind::Internal { left, right } => {
                if left.bounds.distance2(center) <= radius2 {
                    left.find_in_radius(points, center, radius2, visitor);
                }
                if right.bounds.distance2(center) <= radius2 {
                    right.find_in_radius(points, center, radius2, visitor);
                }
            }
        }
    }
}

/// Iterator over the leaf ranges of a subtree, see [`PartitionNode::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a PartitionNode>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match &node.kind {
                NodeKind::Leaf { begin, end } => return Some(*begin..*end),
                NodeKind::Internal { left, right } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

/// State of a single k-nearest query.
///
/// Holds up to `k` candidates sorted by ascending squared distance and the current bound: the
/// distance of the worst candidate once `k` are known, `+inf` before that. Every query needs its
/// own instance, sharing one between queries corrupts their pruning.
#[derive(Clone, Debug)]
pub struct KNearestSearch {
    k: usize,
    candidates: Vec<(f64, usize)>,
    bound: f64,
}

impl KNearestSearch {
    pub fn new(k: usize) -> Self {
        KNearestSearch {
            k,
            candidates: Vec::with_capacity(k.saturating_add(1).min(1024)),
            bound: f64::INFINITY,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Squared distance a point must stay strictly below to be accepted.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// `(dist_sq, index)` pairs found so far, nearest first.
    pub fn candidates(&self) -> &[(f64, usize)] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<(f64, usize)> {
        self.candidates
    }

    /// Offers the point at buffer `index` with squared distance `dist_sq`.
    ///
    /// Equal distances keep their offer order: a new candidate is placed after existing ones with
    /// the same distance, and a candidate exactly at the bound is rejected.
    pub fn offer(&mut self, dist_sq: f64, index: usize) {
        // Also rejects NaN.
        if self.k == 0 || !(dist_sq < self.bound) {
            return;
        }

        let pos = self.candidates.partition_point(|&(d, _)| d <= dist_sq);
        self.candidates.insert(pos, (dist_sq, index));

        if self.candidates.len() > self.k {
            self.candidates.pop();
        }
        if self.candidates.len() == self.k {
            self.bound = self.candidates[self.k - 1].0;
        }
    }
}
