use kdcloud::{BoundingBox, PointCloud};

fn main() {
    // Define bounds for the point cloud
    let bounds = BoundingBox::new([0.0, 0.0, 0.0], [100.0, 100.0, 100.0]);

    // Generate a large number of random points to stress the build
    let mut cloud = PointCloud::new();
    cloud.random_points(1_000_000, &bounds);

    // Build once, then run many queries (this is the hot path)
    cloud.rebuild_tree();

    let mut result = Vec::new();
    let mut total = 0;
    for i in 0..10_000 {
        let v = (i % 100) as f64;
        if cloud.find_k_nearest_into(&[v, 100.0 - v, v * 0.5], 16, &mut result).is_ok() {
            total += result.len();
        }
    }
    println!("collected {} neighbors", total);
}
