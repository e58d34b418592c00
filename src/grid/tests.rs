// Copyright 2016 Joe Wilm, The Alacritty Project Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tests for the Grid

use super::{Error, Grid, Lifetime, Owned};
use crate::alloc::{Counting, Limited, System};
use crate::index::{Column, Line, Linear, Point};

const VALUES: [i32; 10] = [0, 9, 1, 8, 2, 7, 3, 6, 4, 5];

#[test]
fn bounded_access() {
    let grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    // Offset 1 * 5 + 2 = 7
    assert_eq!(grid.get((1, 2)), Ok(&6));
    assert_eq!(grid.get((1, 1)), Ok(&3));
    assert_eq!(grid.size(), 10);
    assert_eq!(grid.rows(), Line(2));
    assert_eq!(grid.cols(), Column(5));
    assert_eq!(grid.lifetime(), Lifetime::Bounded);
}

#[test]
fn row_major_order() {
    let grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    let visited: Vec<_> = grid.iter().map(|indexed| (indexed.point(), *indexed.inner)).collect();
    assert_eq!(visited.len(), 10);
    assert_eq!(visited[0], (Point::new(Line(0), Column(0)), 0));
    assert_eq!(visited[4], (Point::new(Line(0), Column(4)), 2));
    assert_eq!(visited[5], (Point::new(Line(1), Column(0)), 7));
    assert_eq!(visited[9], (Point::new(Line(1), Column(4)), 5));

    let values: Vec<i32> = grid.iter().map(|indexed| **indexed).collect();
    assert_eq!(values, VALUES.to_vec());

    // A second traversal starts from the beginning again
    assert_eq!(grid.iter().next().map(|indexed| *indexed.inner), Some(0));
}

#[test]
fn iteration_covers_every_point_once() {
    let grid = Grid::bounded(Line(3), Column(4), [0u8; 12]).unwrap();

    let mut points: Vec<Point> = grid.iter().map(|indexed| indexed.point()).collect();
    let before = points.clone();
    points.sort();
    points.dedup();

    assert_eq!(points, before);
    assert_eq!(points.len(), 12);
}

#[test]
fn write_then_read() {
    let mut grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    *grid.get_mut((0, 3)).unwrap() = 42;

    assert_eq!(grid.get((0, 3)), Ok(&42));
    for indexed in grid.iter() {
        if indexed.point() != Point::from((0, 3)) {
            let offset = grid.offset(indexed.point()).unwrap();
            assert_eq!(*indexed.inner, VALUES[offset.0]);
        }
    }
}

#[test]
fn unchecked_access() {
    let mut grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    unsafe {
        assert_eq!(*grid.get_unchecked(Point::from((1, 1))), 3);
        assert_eq!(*grid.get_unchecked(Point::from((1, 2))), 6);
        *grid.get_unchecked_mut(Point::from((0, 4))) = -1;
    }

    assert_eq!(grid.get((0, 4)), Ok(&-1));
    assert_eq!(grid[Linear(4)], -1);
    assert_eq!(grid.get((1, 0)), Ok(&7));
}

#[test]
fn bounded_grids_copy_by_value() {
    let original = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    let mut copy = original;
    copy[Point::from((0, 0))] = 42;

    assert_eq!(copy.get((0, 0)), Ok(&42));
    assert_eq!(original.get((0, 0)), Ok(&0));
    assert_eq!(original.as_slice(), &VALUES[..]);
}

#[test]
fn reads_are_idempotent() {
    let grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    let first = grid.get((1, 4)).map(|value| *value);
    let second = grid.get((1, 4)).map(|value| *value);

    assert_eq!(first, second);
    assert_eq!(grid.as_slice(), &VALUES[..]);
}

#[test]
fn sequence_poke() {
    let mut sequence = Grid::sequence([0, 10, 9, 1, 8, 2, 7, 3, 6, 4, 5]);
    assert_eq!(sequence.rows(), Line(1));
    assert_eq!(sequence.cols(), Column(11));

    {
        let mut view = sequence.view_mut();
        assert_eq!(view.lifetime(), Lifetime::Borrowed);
        view[Linear(1)] = -99;
    }

    assert_eq!(sequence.as_slice(), &[0, -99, 9, 1, 8, 2, 7, 3, 6, 4, 5]);
}

#[test]
fn views_share_elements() {
    let grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    let view = grid.view();
    assert_eq!(view.lifetime(), Lifetime::Borrowed);
    assert_eq!(view.rows(), grid.rows());
    assert_eq!(view.get((1, 2)), grid.get((1, 2)));
    assert_eq!(view.as_slice().as_ptr(), grid.as_slice().as_ptr());

    let slice: &[i32] = &VALUES;
    let borrowed = Grid::from_storage(Line(5), Column(2), slice).unwrap();
    assert_eq!(borrowed[Point::from((2, 1))], 7);
}

#[test]
fn nested_matches_flat() {
    let nested = Grid::nested([[0, 9, 1, 8, 2], [7, 3, 6, 4, 5]]);
    let flat = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    assert_eq!(nested.rows(), Line(2));
    assert_eq!(nested.cols(), Column(5));
    assert_eq!(nested.as_slice(), flat.as_slice());
    assert_eq!(nested.get((1, 2)), Ok(&6));
    assert_eq!(nested[Point::from((1, 1))], 3);
}

#[test]
fn shape_mismatch() {
    match Grid::bounded(Line(3), Column(3), VALUES) {
        Err(Error::ShapeMismatch { rows: Line(3), cols: Column(3), len: 10 }) => (),
        other => panic!("expected shape mismatch, got {:?}", other),
    }

    let slice: &[i32] = &VALUES[..7];
    assert!(Grid::from_storage(Line(2), Column(5), slice).is_err());
}

#[test]
fn overflow() {
    let slice: &[u8] = &[];
    match Grid::from_storage(Line(usize::max_value()), Column(2), slice) {
        Err(Error::Overflow { .. }) => (),
        other => panic!("expected overflow, got {:?}", other),
    }

    match Grid::<Owned<u8>>::owned(Line(usize::max_value()), Column(usize::max_value())) {
        Err(Error::Overflow { .. }) => (),
        other => panic!("expected overflow, got {:?}", other),
    }
}

#[test]
fn out_of_range() {
    let mut grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    let expected =
        Error::IndexOutOfRange { point: Point::from((2, 0)), rows: Line(2), cols: Column(5) };
    assert_eq!(grid.get((2, 0)), Err(expected));

    // In bounds for the storage, but not for the line
    assert!(grid.get((0, 5)).is_err());
    assert!(grid.get_mut((0, 5)).is_err());
    assert_eq!(grid.as_slice(), &VALUES[..]);
}

#[test]
#[should_panic]
fn index_out_of_range_panics() {
    let grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();
    let _ = grid[Point::from((0, 7))];
}

#[test]
fn empty_owned() {
    let counting = Counting::new(System);
    let grid = Grid::<Owned<i32, _>>::owned_in(Line(0), Column(0), &counting).unwrap();

    assert_eq!(grid.size(), 0);
    assert_eq!(grid.iter().count(), 0);
    assert_eq!(grid.lines().count(), 0);
    assert!(grid.get((0, 0)).is_err());
    assert_eq!(grid.point(Linear(0)), None);

    grid.release();
    assert_eq!(counting.allocations(), 0);
}

#[test]
fn owned_create_copy_release() {
    let counting = Counting::new(System);
    let source = Grid::bounded(Line(2), Column(5), VALUES).unwrap();

    let mut grid = Grid::<Owned<i32, _>>::owned_in(Line(2), Column(5), &counting).unwrap();
    assert_eq!(grid.lifetime(), Lifetime::OwnedDynamic);
    assert!(grid.as_slice().iter().all(|&value| value == 0));

    grid.copy_from_slice(source.as_slice()).unwrap();
    assert_eq!(grid.get((1, 2)), Ok(&6));
    assert_eq!(counting.outstanding(), 1);

    grid.release();
    assert_eq!(counting.outstanding(), 0);
    assert_eq!(counting.releases(), 1);
}

#[test]
fn owned_from_and_to_owned() {
    let counting = Counting::new(System);

    let grid = Grid::owned_from(Line(2), Column(5), &VALUES[..], &counting).unwrap();
    let copy = grid.view().to_owned_in(&counting).unwrap();
    assert_eq!(counting.outstanding(), 2);
    assert_eq!(copy.as_slice(), grid.as_slice());

    assert!(Grid::owned_from(Line(3), Column(5), &VALUES[..], &counting).is_err());

    drop(grid);
    drop(copy);
    assert_eq!(counting.outstanding(), 0);
}

#[test]
fn owned_copy_failure_is_an_error() {
    let counting = Counting::new(Limited::new(System, Some(16)));

    let grid = Grid::owned_from(Line(1), Column(4), &[1, 2, 3, 4], &counting).unwrap();
    let wide = Grid::bounded(Line(1), Column(5), [0i32; 5]).unwrap();

    match wide.to_owned_in(&counting) {
        Err(Error::AllocationFailure { elements: 5, bytes: Some(20) }) => (),
        other => panic!("expected allocation failure, got {:?}", other),
    }

    let copy = grid.to_owned_in(&counting).unwrap();
    assert_eq!(copy.as_slice(), grid.as_slice());
    assert_eq!(counting.outstanding(), 2);
    assert_eq!(counting.failures(), 1);

    copy.release();
    grid.release();
    assert_eq!(counting.outstanding(), 0);
}

#[test]
fn owned_allocation_failure() {
    let allocator = Limited::new(System, Some(8));

    match Grid::<Owned<i32, _>>::owned_in(Line(2), Column(5), allocator) {
        Err(Error::AllocationFailure { elements: 10, bytes: Some(40) }) => (),
        other => panic!("expected allocation failure, got {:?}", other),
    }
}

#[test]
fn copy_lines_overlapping() {
    let mut grid = Grid::nested([[1, 1], [2, 2], [3, 3], [4, 4]]);

    grid.copy_lines_within(Line(0)..Line(3), Line(1)).unwrap();
    assert_eq!(grid.as_slice(), &[1, 1, 1, 1, 2, 2, 3, 3]);

    grid.copy_lines_within(Line(2)..Line(4), Line(0)).unwrap();
    assert_eq!(grid.as_slice(), &[2, 2, 3, 3, 2, 2, 3, 3]);

    assert!(grid.copy_lines_within(Line(1)..Line(3), Line(3)).is_err());
    assert!(grid.copy_lines_within(Line(0)..Line(5), Line(0)).is_err());
}

#[test]
fn copy_lines_destination_overflow() {
    let mut grid = Grid::nested([[1, 2], [3, 4]]);

    let expected = Error::IndexOutOfRange {
        point: Point::new(Line(usize::max_value()), Column(0)),
        rows: Line(2),
        cols: Column(2),
    };
    assert_eq!(grid.copy_lines_within(Line(0)..Line(1), Line(usize::max_value())), Err(expected));
    assert!(grid.copy_lines_within(Line(0)..Line(2), Line(usize::max_value() - 1)).is_err());
    assert_eq!(grid.as_slice(), &[1, 2, 3, 4]);

    // An empty range may start at the end of the grid
    assert_eq!(grid.copy_lines_within(Line(1)..Line(1), Line(2)), Ok(()));
}

#[test]
fn iter_mut_and_fill() {
    let mut grid = Grid::bounded(Line(2), Column(3), [0usize; 6]).unwrap();

    for indexed in grid.iter_mut() {
        *indexed.inner = indexed.line.0 * 10 + indexed.column.0;
    }
    assert_eq!(grid.as_slice(), &[0, 1, 2, 10, 11, 12]);
    assert_eq!(&grid[Line(1)], &[10, 11, 12]);

    grid.fill(7);
    assert!(grid.iter().all(|indexed| *indexed.inner == 7));
}

#[test]
fn point_offset_inverse() {
    let grid = Grid::bounded(Line(3), Column(4), [0u16; 12]).unwrap();

    for offset in 0..grid.size() {
        let point = grid.point(Linear(offset)).unwrap();
        assert_eq!(grid.offset(point), Some(Linear(offset)));
    }

    assert_eq!(grid.point(Linear(12)), None);
    assert_eq!(grid.offset(Point::from((0, 4))), None);
}

#[test]
fn display() {
    let grid = Grid::bounded(Line(2), Column(5), VALUES).unwrap();
    assert_eq!(grid.to_string(), "0 | 9 | 1 | 8 | 2\n7 | 3 | 6 | 4 | 5\n");

    let floats = Grid::sequence([0.5f64, 1.]);
    assert_eq!(floats.to_string(), "0.5 | 1\n");
}
