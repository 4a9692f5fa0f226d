use thiserror::Error;

/// Result type alias for point cloud operations.
pub type Result<T> = std::result::Result<T, CloudError>;

/// Errors reported by [`PointCloud`](crate::PointCloud) and its configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudError {
    /// A query was issued while no tree matches the current points.
    /// Recoverable by calling `rebuild_tree()`.
    #[error("k-d tree is not built, call rebuild_tree() after modifying the point cloud")]
    NotBuilt,

    /// A leaf must be allowed to hold at least one point.
    #[error("invalid leaf capacity {0}, must be at least 1")]
    InvalidLeafCapacity(usize),
}
