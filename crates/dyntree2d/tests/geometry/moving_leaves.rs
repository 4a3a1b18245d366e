use approx::assert_relative_eq;
use dyntree2d::bounding_volume::{Aabb, BoundingVolume};
use dyntree2d::partitioning::DynamicTree;
use nalgebra::{Point2, Vector2};

fn unit_box_at(x: f32, y: f32) -> Aabb {
    Aabb::new(Point2::new(x, y), Point2::new(x + 1.0, y + 1.0))
}

fn translate(aabb: &mut Aabb, shift: Vector2<f32>) {
    aabb.mins += shift;
    aabb.maxs += shift;
}

#[test]
fn moving_less_than_the_margin_keeps_the_tree_shape() {
    let mut tree = DynamicTree::new(1.0, 16);
    let handles: Vec<_> = (0..6)
        .map(|i| tree.add(i, unit_box_at(i as f32 * 4.0, 0.0)))
        .collect();
    let moved = handles[2];
    let fat_before = *tree.fat_aabb(moved).unwrap();
    let parents_before: Vec<_> = tree.raw_nodes().iter().map(|n| n.parent()).collect();

    translate(tree.tight_aabb_mut(moved).unwrap(), Vector2::new(0.5, -0.75));
    assert_eq!(tree.update(), 0);

    assert_eq!(*tree.fat_aabb(moved).unwrap(), fat_before);
    let parents_after: Vec<_> = tree.raw_nodes().iter().map(|n| n.parent()).collect();
    assert_eq!(parents_before, parents_after);
    tree.assert_well_formed();
}

#[test]
fn moving_more_than_the_margin_refreshes_the_fat_box() {
    let mut tree = DynamicTree::new(0.1, 16);
    let a = tree.add(0, unit_box_at(0.0, 0.0));
    let b = tree.add(1, unit_box_at(0.5, 0.5));
    let _c = tree.add(2, unit_box_at(10.0, 10.0));
    assert_eq!(tree.query(a).unwrap(), vec![1]);

    translate(tree.tight_aabb_mut(b).unwrap(), Vector2::new(9.75, 9.75));
    assert_eq!(tree.update(), 1);
    tree.assert_well_formed();

    let fat = *tree.fat_aabb(b).unwrap();
    assert_relative_eq!(fat.mins, Point2::new(10.15, 10.15), epsilon = 1.0e-5);
    assert_relative_eq!(fat.maxs, Point2::new(11.35, 11.35), epsilon = 1.0e-5);
    assert!(fat.contains(tree.tight_aabb(b).unwrap()));

    assert!(tree.query(a).unwrap().is_empty());
    assert_eq!(tree.query(b).unwrap(), vec![2]);
}

#[test]
fn simulation_steps_keep_queries_exact() {
    let mut tree = DynamicTree::new(0.5, 8);
    let mut velocities = Vec::new();
    let mut rng = oorandom::Rand32::new(1234);

    for i in 0..40 {
        let pos = Point2::new(rng.rand_float() * 100.0, rng.rand_float() * 100.0);
        let handle = tree.add(i, Aabb::from_pos_dim(pos, Vector2::new(2.0, 2.0)));
        let vel = Vector2::new(rng.rand_float() - 0.5, rng.rand_float() - 0.5);
        velocities.push((handle, vel));
    }

    for _ in 0..50 {
        for (handle, vel) in &velocities {
            translate(tree.tight_aabb_mut(*handle).unwrap(), *vel);
        }

        let _ = tree.update();
        tree.assert_well_formed();

        for (handle, _) in &velocities {
            let fat = *tree.fat_aabb(*handle).unwrap();
            let mut expected: Vec<_> = velocities
                .iter()
                .filter(|(other, _)| {
                    other != handle && fat.intersects(tree.fat_aabb(*other).unwrap())
                })
                .map(|(other, _)| *tree.owner(*other).unwrap())
                .collect();
            let mut found = tree.query(*handle).unwrap();
            expected.sort();
            found.sort();
            assert_eq!(found, expected);
        }
    }
}
