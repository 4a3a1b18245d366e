use dyntree2d::bounding_volume::{Aabb, BoundingVolume};
use dyntree2d::partitioning::DynamicTree;
use dyntree2d::utils::SortedPair;
use nalgebra::{Point2, Vector2};

fn aabb(x1: f32, y1: f32, x2: f32, y2: f32) -> Aabb {
    Aabb::new(Point2::new(x1, y1), Point2::new(x2, y2))
}

#[test]
fn distant_boxes_are_not_candidates() {
    let mut tree = DynamicTree::new(1.0, 16);
    let a = tree.add(1u32, aabb(0.0, 0.0, 1.0, 1.0));
    let b = tree.add(2u32, aabb(5.0, 5.0, 6.0, 6.0));

    assert!(tree.query(a).unwrap().is_empty());
    assert!(tree.query(b).unwrap().is_empty());
    assert!(tree.overlapping_pairs().is_empty());
}

#[test]
fn overlapping_boxes_report_each_other_once() {
    let mut tree = DynamicTree::new(1.0, 16);
    let a = tree.add(1u32, aabb(0.0, 0.0, 1.0, 1.0));
    let b = tree.add(2u32, aabb(0.5, 0.5, 1.5, 1.5));

    assert_eq!(tree.query(a).unwrap(), vec![2]);
    assert_eq!(tree.query(b).unwrap(), vec![1]);
    assert_eq!(tree.overlapping_pairs(), vec![SortedPair::new(a, b)]);
}

#[test]
fn fat_boxes_produce_near_miss_candidates() {
    // One unit apart, but both fat boxes grow by 0.75 on every side.
    let mut tree = DynamicTree::new(0.75, 16);
    let a = tree.add("a", aabb(0.0, 0.0, 1.0, 1.0));
    let b = tree.add("b", aabb(2.0, 0.0, 3.0, 1.0));

    assert!(!tree
        .tight_aabb(a)
        .unwrap()
        .intersects(tree.tight_aabb(b).unwrap()));
    assert_eq!(tree.query(a).unwrap(), vec!["b"]);
}

#[test]
fn tile_grid_queries() {
    // A 16x16 grid of 16px tiles, laid out with the position + dimension convention.
    let mut tree = DynamicTree::new(0.0, 4);
    let tile = Vector2::new(16.0, 16.0);

    for i in 0..16 {
        for j in 0..16 {
            let pos = Point2::new(i as f32 * 16.0, j as f32 * 16.0);
            let _ = tree.add((i, j), Aabb::from_pos_dim(pos, tile));
        }
    }

    tree.assert_well_formed();
    assert_eq!(tree.leaf_count(), 256);
    assert_eq!(tree.size(), 511);

    // Adjacent tiles only touch: no candidates.
    assert!(tree.overlapping_pairs().is_empty());

    // A sprite straddling four tiles.
    let sprite = tree.add((100, 100), Aabb::from_pos_dim(Point2::new(40.0, 40.0), tile));
    let mut found = tree.query(sprite).unwrap();
    found.sort();
    assert_eq!(found, vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
    assert_eq!(tree.overlapping_pairs().len(), 4);

    let region = Aabb::from_pos_dim(Point2::new(0.0, 0.0), Vector2::new(32.0, 17.0));
    let mut owners: Vec<_> = tree
        .intersect_aabb(&region)
        .map(|handle| *tree.owner(handle).unwrap())
        .collect();
    owners.sort();
    assert_eq!(owners, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn root_bounds_every_leaf() {
    let mut tree = DynamicTree::with_margin(0.5);
    let boxes = [
        aabb(-3.0, 2.0, -1.0, 4.0),
        aabb(10.0, -7.0, 12.0, -6.0),
        aabb(0.0, 0.0, 0.0, 0.0),
        aabb(4.0, 4.0, 8.0, 5.0),
    ];

    for (i, b) in boxes.iter().enumerate() {
        let _ = tree.add(i, *b);
    }

    let root = tree.root_aabb().unwrap();
    assert!(boxes.iter().all(|b| root.contains(&b.loosened(0.5))));
    assert_eq!(root, aabb(-3.5, -7.5, 12.5, 5.5));
}
