//! Integration tests for the counting reduction specialization
//!
//! Counting substitutes a constant-one operand and reuses the ordinary
//! summation primitive; these tests pin down that the count depends only on
//! the condition and the window.

use maskr::condition::Mask;
use maskr::field::{ConstantField, Field};
use maskr::grid::{Grid, Location};
use maskr::ops::{conditional, sum};
use maskr::runtime::cpu::{CpuDevice, CpuRuntime};

#[test]
fn test_ones_field_sums_to_cell_count() {
    let grid = Grid::<CpuRuntime>::new([3, 2, 1], 0, &CpuDevice::new());
    let ones = ConstantField::<_, f64>::ones(&grid, Location::CENTERED);
    assert_eq!(sum(&ones), 6.0);
}

#[test]
fn test_count_matches_true_cells() {
    let grid = Grid::<CpuRuntime>::new([2, 2, 2], 0, &CpuDevice::new());
    let field = Field::from_slice(&grid, Location::CENTERED, &[9.0; 8]).unwrap();

    let flags = [true, false, true, false, false, false, true, false];
    let mask = Mask::from_slice(&grid, &flags).unwrap();

    let node = conditional(field).with_mask(mask).unwrap();
    assert_eq!(node.count(), 3.0);
}

#[test]
fn test_count_ignores_transform_operand_and_fill() {
    let grid = Grid::<CpuRuntime>::new([2, 1, 1], 0, &CpuDevice::new());
    let field = Field::from_slice(&grid, Location::CENTERED, &[123.0, -7.0]).unwrap();
    let mask = Mask::from_slice(&grid, &[true, false]).unwrap();

    let node = conditional(field)
        .with_transform(|v: f64| v * 1000.0)
        .with_mask(mask)
        .unwrap()
        .with_fill(99.0);

    assert_eq!(node.count(), 1.0);
}

#[test]
fn test_count_with_predicate_condition() {
    let grid = Grid::<CpuRuntime>::new([4, 4, 1], 0, &CpuDevice::new());
    let field = Field::<_, f64>::zeros(&grid, Location::CENTERED).unwrap();

    let node = conditional(field).with_predicate(|i, j, _, _| i <= j);
    // upper triangle of a 4x4 plane, diagonal included
    assert_eq!(node.count(), 10.0);
}

#[test]
fn test_count_is_windowed() {
    // all mask cells true, but only the interior is in-window
    let grid = Grid::<CpuRuntime>::new([2, 2, 1], 1, &CpuDevice::new());
    let field = Field::<_, f64>::zeros(&grid, Location::CENTERED).unwrap();
    let mask = Mask::from_fn(&grid, |_, _, _| true).unwrap();

    let node = conditional(field).with_mask(mask).unwrap();
    assert_eq!(node.count(), 4.0);
}

#[test]
fn test_count_along_axes() {
    let grid = Grid::<CpuRuntime>::new([2, 3, 1], 0, &CpuDevice::new());
    let field = Field::<_, f64>::zeros(&grid, Location::CENTERED).unwrap();

    // true where j is even: columns 0 and 2
    let node = conditional(field).with_predicate(|_, j, _, _| j % 2 == 0);

    // reduce over i: per-column counts
    let per_column = node.count_along(&[0]).unwrap();
    assert_eq!(per_column.to_vec(), vec![2.0, 0.0, 2.0]);

    // reduce over j: per-row counts
    let per_row = node.count_along(&[1]).unwrap();
    assert_eq!(per_row.to_vec(), vec![2.0, 2.0]);

    // reduce over everything: matches the scalar count
    let total = node.count_along(&[0, 1, 2]).unwrap();
    assert_eq!(total.to_vec(), vec![node.count()]);
}

#[test]
fn test_count_integer_elements() {
    let grid = Grid::<CpuRuntime>::new([3, 1, 1], 0, &CpuDevice::new());
    let field = Field::from_slice(&grid, Location::CENTERED, &[5i64, 5, 5]).unwrap();
    let mask = Mask::from_slice(&grid, &[true, true, false]).unwrap();

    let node = conditional(field).with_mask(mask).unwrap();
    assert_eq!(node.count(), 2i64);
}

#[test]
fn test_counting_node_has_unit_values() {
    let grid = Grid::<CpuRuntime>::new([2, 1, 1], 0, &CpuDevice::new());
    let field = Field::from_slice(&grid, Location::CENTERED, &[42.0, 42.0]).unwrap();
    let mask = Mask::from_slice(&grid, &[true, false]).unwrap();

    let counting = conditional(field)
        .with_mask(mask)
        .unwrap()
        .with_fill(7.0)
        .as_counting(0.0);

    // satisfied cells evaluate to one, unsatisfied to the counting fill
    assert_eq!(counting.evaluate(0, 0, 0), 1.0);
    assert_eq!(counting.evaluate(1, 0, 0), 0.0);
}
