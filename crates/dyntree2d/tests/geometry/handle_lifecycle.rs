use dyntree2d::bounding_volume::Aabb;
use dyntree2d::partitioning::{DynamicTree, DynamicTreeError, DEFAULT_CAPACITY, DEFAULT_MARGIN};
use nalgebra::Point2;

fn unit_box_at(x: f32, y: f32) -> Aabb {
    Aabb::new(Point2::new(x, y), Point2::new(x + 1.0, y + 1.0))
}

#[test]
fn default_tree() {
    let tree = DynamicTree::<u32>::default();
    assert!(tree.is_empty());
    assert_eq!(tree.size(), 0);
    assert_eq!(tree.capacity(), DEFAULT_CAPACITY);
    assert_eq!(tree.margin(), DEFAULT_MARGIN);
    assert_eq!(tree.root_aabb(), None);
    assert_eq!(tree.depth(), 0);
}

#[test]
fn remove_the_middle_box_then_add() {
    let mut tree = DynamicTree::new(1.0, 16);
    let a = tree.add('a', unit_box_at(0.0, 0.0));
    let b = tree.add('b', unit_box_at(3.0, 0.0));
    let c = tree.add('c', unit_box_at(6.0, 0.0));

    assert_eq!(tree.remove(b), Ok('b'));
    tree.assert_well_formed();
    assert_eq!(tree.size(), 3);

    let d = tree.add('d', unit_box_at(3.0, 3.0));
    tree.assert_well_formed();
    assert_eq!(tree.size(), 5);
    assert_eq!(d.index(), b.index());

    assert_eq!(tree.owner(b), Err(DynamicTreeError::StaleHandle(b)));
    assert_eq!(tree.owner(d), Ok(&'d'));

    let mut owners: Vec<_> = tree.iter().map(|(_, owner)| *owner).collect();
    owners.sort();
    assert_eq!(owners, vec!['a', 'c', 'd']);

    assert_eq!(tree.remove(a), Ok('a'));
    assert_eq!(tree.remove(c), Ok('c'));
    assert_eq!(tree.remove(d), Ok('d'));
    assert!(tree.is_empty());
    tree.assert_well_formed();
}

#[test]
fn double_remove_is_an_error() {
    let mut tree = DynamicTree::new(0.1, 4);
    let a = tree.add(0, unit_box_at(0.0, 0.0));
    let _b = tree.add(1, unit_box_at(1.0, 0.0));

    assert_eq!(tree.remove(a), Ok(0));
    assert_eq!(tree.remove(a), Err(DynamicTreeError::StaleHandle(a)));
    assert_eq!(tree.leaf_count(), 1);
    tree.assert_well_formed();
}

#[test]
fn errors_display_the_offending_handle() {
    let mut tree = DynamicTree::new(0.1, 4);
    let a = tree.add(0, unit_box_at(0.0, 0.0));
    let _ = tree.remove(a).unwrap();

    let err = tree.fat_aabb(a).unwrap_err();
    assert!(err.to_string().contains("no longer exists"));
}

#[test]
fn the_pool_grows_by_doubling() {
    let mut tree = DynamicTree::new(0.1, 2);

    for i in 0..5 {
        let _ = tree.add(i, unit_box_at(i as f32 * 2.0, 0.0));
    }

    // 5 leaves use 9 slots: 2 -> 4 -> 8 -> 16.
    assert_eq!(tree.size(), 9);
    assert_eq!(tree.capacity(), 16);
    tree.assert_well_formed();
}

#[test]
fn owners_can_be_mutated_in_place() {
    let mut tree = DynamicTree::new(0.1, 4);
    let a = tree.add(String::from("a"), unit_box_at(0.0, 0.0));
    tree.owner_mut(a).unwrap().push('!');
    assert_eq!(tree.owner(a).unwrap(), "a!");
    assert_eq!(tree.leaf_handle(a.index()), Some(a));
}
