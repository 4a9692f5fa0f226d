use crate::bounds::BoundingBox;
use crate::cloud::PointCloud;
use crate::config::CloudConfig;
use crate::point::Point3;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(typescript_custom_section)]
const TS_CONSTANTS_CLOUD: &'static str = r#"
export const LEAF_CAPACITY = 50;
"#;

/// WASM wrapper for a point cloud of plain 3D points.
///
/// Points are passed in and returned as flat `[x0, y0, z0, x1, y1, z1, ...]` arrays.
#[wasm_bindgen]
pub struct PointCloud3D {
    inner: PointCloud<Point3>,
}

#[wasm_bindgen]
impl PointCloud3D {
    #[wasm_bindgen(constructor)]
    pub fn new() -> PointCloud3D {
        PointCloud3D { inner: PointCloud::new() }
    }

    #[wasm_bindgen(js_name = withLeafCapacity)]
    pub fn with_leaf_capacity(leaf_capacity: usize) -> Result<PointCloud3D, JsError> {
        let config = CloudConfig::new(leaf_capacity)?;
        Ok(PointCloud3D { inner: PointCloud::with_config(config) })
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn is_built(&self) -> bool {
        self.inner.is_built()
    }

    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        flatten(self.inner.points())
    }

    pub fn set_points(&mut self, coords: &[f64]) {
        self.inner.set_items(unflatten(coords));
    }

    pub fn add_points(&mut self, coords: &[f64]) {
        self.inner.add_items(unflatten(coords));
    }

    pub fn add_point(&mut self, x: f64, y: f64, z: f64) {
        self.inner.add_item(Point3::new(x, y, z));
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn random_points(&mut self, count: usize, min_x: f64, min_y: f64, min_z: f64, max_x: f64, max_y: f64, max_z: f64) {
        let bounds = BoundingBox::new([min_x, min_y, min_z], [max_x, max_y, max_z]);
        self.inner.random_points(count, &bounds);
    }

    pub fn rebuild_tree(&mut self) {
        self.inner.rebuild_tree();
    }

    /// Flat coordinates of the `k` nearest points, nearest first.
    pub fn find_k_nearest(&self, x: f64, y: f64, z: f64, k: usize) -> Result<Vec<f64>, JsError> {
        let result = self.inner.find_k_nearest(&[x, y, z], k)?;
        Ok(flatten(&result))
    }

    /// Flat coordinates of all points within squared distance `radius2`, unordered.
    pub fn find_in_radius(&self, x: f64, y: f64, z: f64, radius2: f64) -> Result<Vec<f64>, JsError> {
        let result = self.inner.find_in_radius(&[x, y, z], radius2)?;
        Ok(flatten(&result))
    }
}

impl Default for PointCloud3D {
    fn default() -> Self {
        Self::new()
    }
}

// A trailing incomplete triple is ignored.
fn unflatten(coords: &[f64]) -> Vec<Point3> {
    coords
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect()
}

fn flatten(points: &[Point3]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y, p.z]).collect()
}
