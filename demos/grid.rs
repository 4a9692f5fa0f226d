use kdcloud::{Point, PointCloud};
use tracing::info;
use tracing_subscriber::EnvFilter;

// A point type with extra payload. The cloud only looks at the position.
#[derive(Clone, Debug)]
struct MeasuredPoint {
    position: [f64; 3],
    variance: f64,
}

impl MeasuredPoint {
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { position: [x, y, z], variance: 0.0 }
    }
}

impl Point for MeasuredPoint {
    fn position(&self) -> [f64; 3] {
        self.position
    }
}

fn grid(sign: f64) -> Vec<MeasuredPoint> {
    let mut points = Vec::new();
    for a in 0..10 {
        for b in 0..10 {
            for c in 0..10 {
                let mut p = MeasuredPoint::new(sign * a as f64, sign * b as f64, sign * c as f64);
                p.variance = (a + b + c) as f64 * 0.1;
                points.push(p);
            }
        }
    }
    points
}

fn main() {
    // RUST_LOG=debug also shows the tree statistics.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut cloud = PointCloud::new();

    // Set the positive grid, then append its mirror image.
    cloud.set_items(grid(1.0));
    cloud.add_items(grid(-1.0));

    // Once the data set is complete, build the tree once. Queries fail before that.
    cloud.rebuild_tree();

    let p = [0.0, 0.0, 0.0];
    let square_radius = 2.0 * 2.0;

    match cloud.find_in_radius(&p, square_radius) {
        Ok(result) => info!(count = result.len(), "found items in radius"),
        Err(e) => info!(error = %e, "radius query failed"),
    }

    match cloud.find_k_nearest(&p, 10) {
        Ok(result) => {
            info!(count = result.len(), "found nearest items");
            for point in &result {
                info!(position = ?point.position, variance = point.variance, "neighbor");
            }
        }
        Err(e) => info!(error = %e, "k-nearest query failed"),
    }
}
