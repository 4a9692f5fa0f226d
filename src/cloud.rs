use crate::bounds::BoundingBox;
use crate::config::CloudConfig;
use crate::error::{CloudError, Result};
use crate::point::{Point, Point3};
use crate::tree::KdTree;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use tracing::{debug, trace};

/// A collection of 3D points with a k-d tree for neighbor queries.
///
/// The cloud owns its points and the tree built over them. Every mutation discards the tree,
/// queries then fail with [`CloudError::NotBuilt`] until [`rebuild_tree`](Self::rebuild_tree)
/// is called again. Rebuilding reorders the stored points.
///
/// ```
/// use kdcloud::{Point3, PointCloud};
///
/// let mut cloud = PointCloud::new();
/// cloud.set_items(vec![Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 0.0, 0.0)]);
/// assert!(cloud.find_k_nearest(&[1.0, 0.0, 0.0], 1).is_err());
///
/// cloud.rebuild_tree();
/// let nearest = cloud.find_k_nearest(&[1.0, 0.0, 0.0], 1).unwrap();
/// assert_eq!(nearest[0], Point3::new(0.0, 0.0, 0.0));
/// assert_eq!(nearest[0].cached_distance2(), 1.0);
/// ```
#[derive(Debug)]
pub struct PointCloud<T: Point> {
    points: Vec<T>,
    tree: Option<KdTree>,
    config: CloudConfig,
}

impl<T: Point> PointCloud<T> {
    pub fn new() -> Self {
        Self::with_config(CloudConfig::default())
    }

    pub fn with_config(config: CloudConfig) -> Self {
        PointCloud {
            points: Vec::new(),
            tree: None,
            config,
        }
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// All points, in the order the last build left them.
    pub fn points(&self) -> &[T] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if queries can be answered without rebuilding.
    pub fn is_built(&self) -> bool {
        self.tree.is_some()
    }

    /// The current tree, `None` if the cloud changed since the last build.
    pub fn tree(&self) -> Option<&KdTree> {
        self.tree.as_ref()
    }

    fn invalidate(&mut self) {
        if self.tree.take().is_some() {
            debug!(points = self.points.len(), "point cloud modified, k-d tree discarded");
        }
    }

    /// Removes all points.
    pub fn clear(&mut self) {
        self.invalidate();
        self.points.clear();
    }

    /// Replaces all points with `items`.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.invalidate();
        self.points = items;
    }

    /// Appends `items` to the existing points.
    pub fn add_items<I: IntoIterator<Item = T>>(&mut self, items: I) {
        self.invalidate();
        self.points.extend(items);
    }

    /// Appends a single point.
    pub fn add_item(&mut self, item: T) {
        self.invalidate();
        self.points.push(item);
    }

    /// Discards the current tree and builds a new one over all points.
    ///
    /// Call this once after the last modification and before querying.
    pub fn rebuild_tree(&mut self) {
        self.tree = None;
        self.tree = Some(KdTree::build(&mut self.points, self.config.leaf_capacity()));
    }

    fn built_tree(&self) -> Result<&KdTree> {
        self.tree.as_ref().ok_or(CloudError::NotBuilt)
    }

    /// The `k` points nearest to `query`, nearest first.
    ///
    /// Every returned copy carries its squared distance to `query` (see
    /// [`Point::cache_distance2`]). Fewer than `k` points are returned if the cloud is smaller,
    /// none for `k == 0`. Among points at equal distance the choice follows tree order.
    pub fn find_k_nearest(&self, query: &[f64; 3], k: usize) -> Result<Vec<T>> {
        let mut result = Vec::new();
        self.find_k_nearest_into(query, k, &mut result)?;
        Ok(result)
    }

    /// Like [`find_k_nearest`](Self::find_k_nearest) but fills `result`, which is cleared first.
    pub fn find_k_nearest_into(
        &self,
        query: &[f64; 3],
        k: usize,
        result: &mut Vec<T>,
    ) -> Result<()> {
        result.clear();
        let tree = self.built_tree()?;

        let candidates = tree.find_k_nearest(&self.points, query, k)?;
        result.extend(candidates.into_iter().map(|(dist_sq, i)| {
            let mut point = self.points[i].clone();
            point.cache_distance2(dist_sq);
            point
        }));

        trace!(k, found = result.len(), "k-nearest query");
        Ok(())
    }

    /// All points within squared distance `radius2` of `center`, boundary included, in no
    /// particular order.
    ///
    /// The copies carry their squared distance, so they can be ordered afterwards:
    ///
    /// ```
    /// use kdcloud::{smaller_distance, Point3, PointCloud};
    ///
    /// let mut cloud: PointCloud<Point3> =
    ///     (0..5).map(|i| Point3::new(i as f64, 0.0, 0.0)).collect();
    /// cloud.rebuild_tree();
    ///
    /// let mut nearby = cloud.find_in_radius(&[2.2, 0.0, 0.0], 2.0).unwrap();
    /// nearby.sort_by(smaller_distance);
    /// let xs: Vec<f64> = nearby.iter().map(|p| p.x).collect();
    /// assert_eq!(xs, vec![2.0, 3.0, 1.0]);
    /// ```
    pub fn find_in_radius(&self, center: &[f64; 3], radius2: f64) -> Result<Vec<T>> {
        let mut result = Vec::new();
        self.find_in_radius_into(center, radius2, &mut result)?;
        Ok(result)
    }

    /// Like [`find_in_radius`](Self::find_in_radius) but fills `result`, which is cleared first.
    pub fn find_in_radius_into(
        &self,
        center: &[f64; 3],
        radius2: f64,
        result: &mut Vec<T>,
    ) -> Result<()> {
        result.clear();
        let tree = self.built_tree()?;

        tree.find_in_radius(&self.points, center, radius2, |i, dist_sq| {
            let mut point = self.points[i].clone();
            point.cache_distance2(dist_sq);
            result.push(point);
        })?;

        trace!(radius2, found = result.len(), "radius query");
        Ok(())
    }
}

impl<T: Point> Default for PointCloud<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Point> FromIterator<T> for PointCloud<T> {
    /// Collects points into an unbuilt cloud with the default configuration.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut cloud = Self::new();
        cloud.add_items(iter);
        cloud
    }
}

impl PointCloud<Point3> {
    /// Replaces all points with `count` points drawn uniformly from `bounds`.
    pub fn random_points(&mut self, count: usize, bounds: &BoundingBox) {
        let mut rng = StdRng::seed_from_u64(get_seed());
        let [w, h, d] = bounds.extent();

        let points = (0..count)
            .map(|_| {
                Point3::new(
                    bounds.min[0] + rng.r#gen::<f64>() * w,
                    bounds.min[1] + rng.r#gen::<f64>() * h,
                    bounds.min[2] + rng.r#gen::<f64>() * d,
                )
            })
            .collect();
        self.set_items(points);
    }
}

fn get_seed() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        (js_sys::Math::random() * 4294967296.0) as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        123456789 // Fixed seed for tests
    }
}
