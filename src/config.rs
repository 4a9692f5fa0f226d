use crate::error::{CloudError, Result};
use crate::node::LEAF_CAPACITY;

/// Build parameters for the k-d tree of a [`PointCloud`](crate::PointCloud).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloudConfig {
    leaf_capacity: usize,
}

impl CloudConfig {
    /// Creates a configuration with the given leaf capacity.
    ///
    /// Nodes holding at most `leaf_capacity` points become leaves. Smaller values give deeper
    /// trees with tighter boxes, larger values give shallower trees with longer linear scans.
    pub fn new(leaf_capacity: usize) -> Result<Self> {
        if leaf_capacity == 0 {
            return Err(CloudError::InvalidLeafCapacity(leaf_capacity));
        }
        Ok(Self { leaf_capacity })
    }

    pub fn leaf_capacity(&self) -> usize {
        self.leaf_capacity
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self { leaf_capacity: LEAF_CAPACITY }
    }
}
