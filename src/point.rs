use std::cmp::Ordering;

/// A point that can be stored in a [`PointCloud`](crate::PointCloud).
///
/// Implementors only have to expose their position. Any extra payload carried by the type is
/// never inspected by the index, it is simply moved around during builds and cloned into query
/// results.
pub trait Point: Clone {
    /// The `[x, y, z]` coordinates of the point.
    fn position(&self) -> [f64; 3];

    /// Squared euclidean distance to `other`.
    #[inline]
    fn distance2(&self, other: &[f64; 3]) -> f64 {
        let p = self.position();
        let dx = other[0] - p[0];
        let dy = other[1] - p[1];
        let dz = other[2] - p[2];
        dx * dx + dy * dy + dz * dz
    }

    /// Stores the squared distance to the last query point.
    ///
    /// Called on the copies handed out by queries. The default discards the value, types that
    /// want to keep it (like [`Point3`]) override this.
    #[inline]
    fn cache_distance2(&mut self, _dist_sq: f64) {}
}

/// A plain point in 3D space.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    // Scratch value written by queries, only meaningful right after the query that wrote it.
    dist_sq: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, dist_sq: 0.0 }
    }

    /// Squared distance to the query point of the query that produced this copy.
    pub fn cached_distance2(&self) -> f64 {
        self.dist_sq
    }
}

impl From<[f64; 3]> for Point3 {
    fn from(p: [f64; 3]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

// Two points are equal when their coordinates are, the cached distance is ignored.
impl PartialEq for Point3 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}

impl Point for Point3 {
    #[inline]
    fn position(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    fn cache_distance2(&mut self, dist_sq: f64) {
        self.dist_sq = dist_sq;
    }
}

/// Orders two [`Point3`] copies by their cached squared distance.
pub fn smaller_distance(a: &Point3, b: &Point3) -> Ordering {
    a.dist_sq.partial_cmp(&b.dist_sq).unwrap_or(Ordering::Equal)
}
