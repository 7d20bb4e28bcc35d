//! Integration tests for device relocation
//!
//! Relocation must be structural - every constituent moves through its own
//! contract - and logically transparent: a relocated node evaluates to the
//! same values as its source.

use maskr::condition::Mask;
use maskr::field::{Field, FieldLike};
use maskr::grid::{Grid, Location};
use maskr::ops::{conditional, materialize};
use maskr::runtime::cpu::{CpuDevice, CpuRuntime};
use maskr::runtime::{Device, Relocate};

#[test]
fn test_field_relocation_preserves_values() {
    let device = CpuDevice::new();
    let grid = Grid::<CpuRuntime>::new([2, 2, 1], 0, &device);
    let field = Field::from_slice(&grid, Location::CENTERED, &[1.0, 2.0, 3.0, 4.0]).unwrap();

    let target = CpuDevice::with_id(2);
    let moved = field.to_device(&target).unwrap();

    assert_eq!(moved.grid().device().id(), 2);
    assert!(moved.grid().same_grid(field.grid()));
    assert_eq!(moved.to_vec(), field.to_vec());
}

#[test]
fn test_node_relocation_equivalence_with_mask() {
    let device = CpuDevice::new();
    let grid = Grid::<CpuRuntime>::new([2, 2, 1], 0, &device);
    let field = Field::from_slice(&grid, Location::CENTERED, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let mask = Mask::from_slice(&grid, &[true, false, false, true]).unwrap();

    let node = conditional(field)
        .with_transform(|v: f64| v * 2.0)
        .with_mask(mask)
        .unwrap()
        .with_fill(-1.0);

    let moved = node.to_device(&CpuDevice::with_id(1)).unwrap();

    for i in 0..2 {
        for j in 0..2 {
            assert_eq!(moved.evaluate(i, j, 0), node.evaluate(i, j, 0));
        }
    }
    assert_eq!(moved.grid().device().id(), 1);
}

#[test]
fn test_node_relocation_equivalence_with_predicate() {
    let device = CpuDevice::new();
    let grid = Grid::<CpuRuntime>::new([3, 1, 1], 0, &device);
    let field = Field::from_slice(&grid, Location::CENTERED, &[1.0, 2.0, 3.0]).unwrap();

    let node = conditional(field)
        .with_predicate(|i, _, _, _| i != 1)
        .with_fill(0.0);
    let moved = node.to_device(&CpuDevice::with_id(3)).unwrap();

    for i in 0..3 {
        assert_eq!(moved.evaluate(i, 0, 0), node.evaluate(i, 0, 0));
    }
}

#[test]
fn test_relocation_does_not_mutate_source() {
    let device = CpuDevice::new();
    let grid = Grid::<CpuRuntime>::new([2, 1, 1], 0, &device);
    let field = Field::from_slice(&grid, Location::CENTERED, &[5.0, 6.0]).unwrap();
    let node = conditional(field);

    let _moved = node.to_device(&CpuDevice::with_id(1)).unwrap();

    assert_eq!(node.grid().device().id(), 0);
    assert_eq!(node.evaluate(0, 0, 0), 5.0);
}

#[test]
fn test_relocated_node_counts_and_materializes() {
    let device = CpuDevice::new();
    let grid = Grid::<CpuRuntime>::new([2, 2, 1], 0, &device);
    let field = Field::from_slice(&grid, Location::CENTERED, &[1.0, 2.0, 3.0, 4.0]).unwrap();
    let mask = Mask::from_slice(&grid, &[true, true, false, false]).unwrap();

    let node = conditional(field).with_mask(mask).unwrap();
    let moved = node.to_device(&CpuDevice::with_id(1)).unwrap();

    assert_eq!(moved.count(), node.count());

    let a = materialize(&node).unwrap();
    let b = materialize(&moved).unwrap();
    assert_eq!(a.to_vec(), b.to_vec());
    assert_eq!(b.grid().device().id(), 1);
}

#[test]
fn test_window_and_location_survive_relocation() {
    let device = CpuDevice::new();
    let grid = Grid::<CpuRuntime>::new([4, 3, 2], 1, &device);
    let loc = [Location::Center, Location::Face, Location::Center];
    let field = Field::<_, f64>::zeros(&grid, loc).unwrap();
    let node = conditional(field);

    let moved = node.to_device(&CpuDevice::with_id(5)).unwrap();
    assert_eq!(moved.axes(), node.axes());
    assert_eq!(moved.location(), loc);
}
