use kdcloud::{CloudConfig, CloudError, KdTree, PartitionNode, Point, Point3, PointCloud};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(seed: u64, count: usize) -> Vec<Point3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point3::new(rng.gen_range(0.0..10.0), rng.gen_range(0.0..20.0), rng.gen_range(0.0..5.0)))
        .collect()
}

fn built_cloud(points: Vec<Point3>, leaf_capacity: usize) -> PointCloud<Point3> {
    let mut cloud = PointCloud::with_config(CloudConfig::new(leaf_capacity).unwrap());
    cloud.set_items(points);
    cloud.rebuild_tree();
    cloud
}

fn all_nodes(root: &PartitionNode) -> Vec<&PartitionNode> {
    let mut nodes = vec![root];
    let mut i = 0;
    while i < nodes.len() {
        let node = nodes[i];
        if let Some((left, right)) = node.children() {
            nodes.push(left);
            nodes.push(right);
        }
        i += 1;
    }
    nodes
}

fn sorted_positions(points: &[Point3]) -> Vec<[f64; 3]> {
    let mut positions: Vec<[f64; 3]> = points.iter().map(|p| p.position()).collect();
    positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
    positions
}

#[test]
fn test_leaves_partition_the_buffer() {
    let points = random_points(1, 1000);
    let cloud = built_cloud(points.clone(), 16);
    let tree = cloud.tree().expect("tree should be built");

    let mut expected_start = 0;
    for range in tree.root().unwrap().leaves() {
        assert_eq!(range.start, expected_start, "gap or overlap between leaves");
        assert!(!range.is_empty());
        assert!(range.len() <= 16);
        expected_start = range.end;
    }
    assert_eq!(expected_start, 1000);
    assert_eq!(tree.len(), 1000);

    // Building only permutes the buffer.
    assert_eq!(sorted_positions(cloud.points()), sorted_positions(&points));
}

#[test]
fn test_depth_is_logarithmic() {
    let cloud = built_cloud(random_points(2, 6400), 50);
    let tree = cloud.tree().unwrap();

    // 6400 points split in halves until at most 50 remain: 128 leaves, 8 levels.
    assert_eq!(tree.leaf_count(), 128);
    assert_eq!(tree.depth(), 8);
}

#[test]
fn test_median_split_along_longest_axis() {
    let cloud = built_cloud(random_points(3, 2000), 10);
    let points = cloud.points();

    for node in all_nodes(cloud.tree().unwrap().root().unwrap()) {
        let Some((left, right)) = node.children() else { continue };
        let axis = node.bounding_box().split_axis();

        let left_max = points[left.range()].iter().map(|p| p.position()[axis]).fold(f64::NEG_INFINITY, f64::max);
        let right_min = points[right.range()].iter().map(|p| p.position()[axis]).fold(f64::INFINITY, f64::min);
        assert!(left_max <= right_min);

        let count = node.range().len();
        assert_eq!(left.range().len(), count / 2);
        assert_eq!(right.range().len(), count - count / 2);
    }
}

#[test]
fn test_boxes_are_tight_and_sound() {
    let cloud = built_cloud(random_points(4, 400), 8);
    let points = cloud.points();
    let mut rng = StdRng::seed_from_u64(44);

    let queries: Vec<[f64; 3]> = (0..30)
        .map(|_| [rng.gen_range(-5.0..15.0), rng.gen_range(-5.0..25.0), rng.gen_range(-5.0..10.0)])
        .collect();

    for node in all_nodes(cloud.tree().unwrap().root().unwrap()) {
        let bounds = node.bounding_box();
        let members = &points[node.range()];

        for axis in 0..3 {
            let lo = members.iter().map(|p| p.position()[axis]).fold(f64::INFINITY, f64::min);
            let hi = members.iter().map(|p| p.position()[axis]).fold(f64::NEG_INFINITY, f64::max);
            assert_eq!(bounds.min[axis], lo);
            assert_eq!(bounds.max[axis], hi);
        }

        for query in &queries {
            let box_d2 = bounds.distance2(query);
            for p in members {
                assert!(box_d2 <= p.distance2(query));
            }
        }
    }
}

#[test]
fn test_same_input_same_shape() {
    let a = built_cloud(random_points(5, 3000), 20);
    let b = built_cloud(random_points(5, 3000), 20);

    let leaves_a: Vec<_> = a.tree().unwrap().root().unwrap().leaves().collect();
    let leaves_b: Vec<_> = b.tree().unwrap().root().unwrap().leaves().collect();
    assert_eq!(leaves_a, leaves_b);
    assert_eq!(a.points(), b.points());
}

#[test]
fn test_rebuild_is_idempotent() {
    let mut cloud = built_cloud(random_points(6, 1500), 12);
    let query = [5.0, 10.0, 2.5];

    let nearest_before = cloud.find_k_nearest(&query, 25).unwrap();
    let radius_before = cloud.find_in_radius(&query, 4.0).unwrap();

    cloud.rebuild_tree();

    assert_eq!(cloud.find_k_nearest(&query, 25).unwrap(), nearest_before);
    assert_eq!(sorted_positions(&cloud.find_in_radius(&query, 4.0).unwrap()), sorted_positions(&radius_before));
}

#[test]
fn test_mutations_invalidate_tree() {
    let mut cloud = built_cloud(random_points(7, 100), 10);
    let query = [1.0, 1.0, 1.0];
    assert!(cloud.find_k_nearest(&query, 1).is_ok());

    cloud.add_item(Point3::new(1.0, 1.0, 1.0));
    assert!(!cloud.is_built());
    assert_eq!(cloud.find_k_nearest(&query, 1), Err(CloudError::NotBuilt));
    assert_eq!(cloud.find_in_radius(&query, 1.0), Err(CloudError::NotBuilt));
    cloud.rebuild_tree();
    assert_eq!(cloud.find_k_nearest(&query, 1).unwrap(), vec![Point3::new(1.0, 1.0, 1.0)]);

    cloud.add_items(random_points(8, 10));
    assert_eq!(cloud.find_k_nearest(&query, 1), Err(CloudError::NotBuilt));
    cloud.rebuild_tree();
    assert_eq!(cloud.len(), 111);

    cloud.set_items(random_points(9, 5));
    assert_eq!(cloud.find_in_radius(&query, 1.0), Err(CloudError::NotBuilt));
    cloud.rebuild_tree();
    assert!(cloud.find_in_radius(&query, 1.0).is_ok());

    cloud.clear();
    assert!(cloud.is_empty());
    assert_eq!(cloud.find_k_nearest(&query, 1), Err(CloudError::NotBuilt));
    assert!(cloud.tree().is_none());
}

#[test]
fn test_tree_rejects_resized_buffer() {
    let mut points = random_points(10, 300);
    let tree = KdTree::build(&mut points, 16);
    assert!(tree.find_k_nearest(&points, &[0.0; 3], 3).is_ok());

    points.push(Point3::new(0.0, 0.0, 0.0));
    assert_eq!(tree.find_k_nearest(&points, &[0.0; 3], 3), Err(CloudError::NotBuilt));
    assert_eq!(tree.find_in_radius(&points, &[0.0; 3], 1.0, |_, _| {}), Err(CloudError::NotBuilt));
}

#[test]
fn test_zero_leaf_capacity_rejected() {
    assert_eq!(CloudConfig::new(0), Err(CloudError::InvalidLeafCapacity(0)));
}
