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

//! A 2d grid flattened into one contiguous run of numeric elements.
//!
//! Element `(line, col)` lives at offset `line * cols + col` of the storage.
//! The storage itself is pluggable: a fixed-size array held by value, a
//! borrowed slice, or memory owned through an allocator. The mapping does
//! not change with the backend.
use std::fmt;
use std::ops::{Deref, DerefMut, Index, IndexMut, Range};
use std::slice;

use crate::alloc::{Allocator, System};
use crate::index::{Column, Line, Linear, Point};

mod owned;
mod storage;

#[cfg(test)]
mod tests;

pub use self::owned::Owned;
pub use self::storage::{Element, Lifetime, Storage, StorageMut};

/// Errors occurring while building or accessing a grid
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Error {
    /// The allocator could not provide the requested memory
    ///
    /// `bytes` is `None` when the byte count does not even fit in `usize`.
    AllocationFailure { elements: usize, bytes: Option<usize> },

    /// Initializer length does not match `rows * cols`
    ShapeMismatch { rows: Line, cols: Column, len: usize },

    /// `rows * cols` does not fit in `usize`
    Overflow { rows: Line, cols: Column },

    /// Point outside of the grid
    IndexOutOfRange { point: Point, rows: Line, cols: Column },
}

impl ::std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::AllocationFailure { elements, bytes: Some(bytes) } => {
                write!(f, "Unable to allocate {} elements ({} bytes)", elements, bytes)
            },
            Error::AllocationFailure { elements, bytes: None } => {
                write!(f, "Unable to allocate {} elements: size overflows", elements)
            },
            Error::ShapeMismatch { rows, cols, len } => write!(
                f,
                "Expected {} elements for a {} x {} grid, got {}",
                *rows * *cols,
                rows,
                cols,
                len
            ),
            Error::Overflow { rows, cols } => {
                write!(f, "A {} x {} grid has too many elements", rows, cols)
            },
            Error::IndexOutOfRange { point, rows, cols } => {
                write!(f, "Point {} is outside of the {} x {} grid", point, rows, cols)
            },
        }
    }
}

/// Result from grid operations
pub type Result<T> = ::std::result::Result<T, Error>;

/// An item in the grid along with its Line and Column.
#[derive(Debug, Eq, PartialEq)]
pub struct Indexed<T> {
    pub inner: T,
    pub line: Line,
    pub column: Column,
}

impl<T> Indexed<T> {
    #[inline]
    pub fn point(&self) -> Point {
        Point::new(self.line, self.column)
    }
}

impl<T> Deref for Indexed<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for Indexed<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

/// Row-major grid over contiguous storage
///
/// ```notrust
///            cols
///   ┌───┬───┬───┬───┬───┐
///   │ 0 │ 1 │ 2 │ 3 │ 4 │  line 0
///   ├───┼───┼───┼───┼───┤
///   │ 5 │ 6 │ 7 │ 8 │ 9 │  line 1
///   └───┴───┴───┴───┴───┘
///
///   raw: 0 1 2 3 4 5 6 7 8 9
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid<S> {
    /// Elements in row-major order.
    ///
    /// Invariant: raw.len() == lines * cols
    raw: S,

    /// Number of lines
    lines: Line,

    /// Number of columns
    cols: Column,
}

/// Number of elements in a `lines x cols` grid
#[inline]
fn checked_size(lines: Line, cols: Column) -> Result<usize> {
    lines.0.checked_mul(cols.0).ok_or(Error::Overflow { rows: lines, cols })
}

impl<S: Storage> Grid<S> {
    /// Wrap `raw` as a grid with the given shape
    ///
    /// The storage must hold exactly `lines * cols` elements.
    pub fn from_storage(lines: Line, cols: Column, raw: S) -> Result<Grid<S>> {
        let size = checked_size(lines, cols)?;
        if raw.len() != size {
            return Err(Error::ShapeMismatch { rows: lines, cols, len: raw.len() });
        }

        debug!("New {} x {} grid over {} storage", lines, cols, raw.lifetime());

        Ok(Grid { raw, lines, cols })
    }

    #[inline]
    pub fn rows(&self) -> Line {
        self.lines
    }

    #[inline]
    pub fn cols(&self) -> Column {
        self.cols
    }

    /// Total number of elements
    #[inline]
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    #[inline]
    pub fn lifetime(&self) -> Lifetime {
        self.raw.lifetime()
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        self.lines > point.line && self.cols > point.col
    }

    /// Physical offset of `point`
    #[inline]
    pub fn offset(&self, point: Point) -> Option<Linear> {
        if self.contains(point) {
            Some(Linear(self.raw_offset(point)))
        } else {
            None
        }
    }

    /// Logical point stored at `offset`
    #[inline]
    pub fn point(&self, offset: Linear) -> Option<Point> {
        if offset.0 < self.size() {
            Some(Point::new(Line(offset.0 / self.cols.0), Column(offset.0 % self.cols.0)))
        } else {
            None
        }
    }

    /// Checked element access
    pub fn get<P: Into<Point>>(&self, point: P) -> Result<&S::Item> {
        let point = point.into();
        match self.offset(point) {
            Some(offset) => Ok(&self.raw.as_slice()[offset.0]),
            None => Err(self.out_of_range(point)),
        }
    }

    /// Element access without bounds checking
    ///
    /// # Safety
    ///
    /// `point` must be inside the grid; see `contains`. A column past the end
    /// of a line may still land inside the storage and silently alias another
    /// element, so checking against `size` alone is not enough.
    #[inline]
    pub unsafe fn get_unchecked(&self, point: Point) -> &S::Item {
        self.raw.as_slice().get_unchecked(self.raw_offset(point))
    }

    /// Row-major iterator over every element with its position
    ///
    /// Every call starts a fresh traversal from the first element.
    #[inline]
    pub fn iter(&self) -> GridIterator<'_, S::Item> {
        GridIterator { inner: self.raw.as_slice().iter(), cols: self.cols, offset: 0 }
    }

    /// Iterator over the lines of the grid, as slices
    #[inline]
    pub fn lines(&self) -> Lines<'_, S::Item> {
        Lines { raw: self.raw.as_slice(), cols: self.cols.0, remaining: self.lines.0 }
    }

    /// Flat view over the storage
    #[inline]
    pub fn as_slice(&self) -> &[S::Item] {
        self.raw.as_slice()
    }

    /// Borrowed grid with the same shape
    #[inline]
    pub fn view(&self) -> Grid<&[S::Item]> {
        Grid { raw: self.raw.as_slice(), lines: self.lines, cols: self.cols }
    }

    /// Copy the elements into dynamic storage from `allocator`
    pub fn to_owned_in<A: Allocator>(&self, allocator: A) -> Result<Grid<Owned<S::Item, A>>> {
        let raw = Owned::from_slice_in(self.raw.as_slice(), allocator)?;

        debug!("Copied {} x {} grid into owned storage", self.lines, self.cols);

        Ok(Grid { raw, lines: self.lines, cols: self.cols })
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.raw
    }

    #[inline]
    pub fn into_storage(self) -> S {
        self.raw
    }

    /// Row-major mapping shared by every point accessor
    #[inline]
    fn raw_offset(&self, point: Point) -> usize {
        point.line.0 * self.cols.0 + point.col.0
    }

    fn out_of_range(&self, point: Point) -> Error {
        Error::IndexOutOfRange { point, rows: self.lines, cols: self.cols }
    }
}

impl<S: StorageMut> Grid<S> {
    /// Checked mutable element access
    pub fn get_mut<P: Into<Point>>(&mut self, point: P) -> Result<&mut S::Item> {
        let point = point.into();
        match self.offset(point) {
            Some(offset) => Ok(&mut self.raw.as_mut_slice()[offset.0]),
            None => Err(self.out_of_range(point)),
        }
    }

    /// Mutable element access without bounds checking
    ///
    /// # Safety
    ///
    /// Same contract as `get_unchecked`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, point: Point) -> &mut S::Item {
        let offset = self.raw_offset(point);
        self.raw.as_mut_slice().get_unchecked_mut(offset)
    }

    #[inline]
    pub fn iter_mut(&mut self) -> GridIterMut<'_, S::Item> {
        GridIterMut { inner: self.raw.as_mut_slice().iter_mut(), cols: self.cols, offset: 0 }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S::Item] {
        self.raw.as_mut_slice()
    }

    /// Mutably borrowed grid with the same shape
    #[inline]
    pub fn view_mut(&mut self) -> Grid<&mut [S::Item]> {
        let (lines, cols) = (self.lines, self.cols);
        Grid { raw: self.raw.as_mut_slice(), lines, cols }
    }

    /// Overwrite every element with `value`
    pub fn fill(&mut self, value: S::Item) {
        for cell in self.raw.as_mut_slice() {
            *cell = value;
        }
    }

    /// Bulk copy `values` into the grid
    ///
    /// `values` must hold exactly `size()` elements in row-major order.
    pub fn copy_from_slice(&mut self, values: &[S::Item]) -> Result<()> {
        if values.len() != self.size() {
            return Err(Error::ShapeMismatch { rows: self.lines, cols: self.cols, len: values.len() });
        }

        self.raw.as_mut_slice().copy_from_slice(values);

        Ok(())
    }

    /// Copy the lines in `src` so that they start at `dest`
    ///
    /// Source and destination may overlap; the copy behaves as if the source
    /// lines were first moved to a temporary buffer.
    pub fn copy_lines_within(&mut self, src: Range<Line>, dest: Line) -> Result<()> {
        if src.start > src.end || src.end > self.lines {
            return Err(self.out_of_range(Point::new(src.end, Column(0))));
        }

        let count = src.end - src.start;
        let end = match dest.0.checked_add(count.0) {
            Some(end) if end <= self.lines.0 => end,
            Some(end) => return Err(self.out_of_range(Point::new(Line(end), Column(0)))),
            None => return Err(self.out_of_range(Point::new(dest, Column(0)))),
        };

        trace!("Copying lines {}..{} to {}..{}", src.start, src.end, dest, end);

        let cols = self.cols.0;
        let range = (src.start.0 * cols)..(src.end.0 * cols);
        self.raw.as_mut_slice().copy_within(range, dest.0 * cols);

        Ok(())
    }
}

impl<T: Element, const N: usize> Grid<[T; N]> {
    /// Bounded grid holding its elements by value
    ///
    /// `N` must equal `lines * cols`.
    #[inline]
    pub fn bounded(lines: Line, cols: Column, values: [T; N]) -> Result<Grid<[T; N]>> {
        Grid::from_storage(lines, cols, values)
    }

    /// Bounded grid with a single line
    #[inline]
    pub fn sequence(values: [T; N]) -> Grid<[T; N]> {
        debug!("New 1 x {} bounded sequence", N);
        Grid { raw: values, lines: Line(1), cols: Column(N) }
    }
}

impl<T: Element, const C: usize, const R: usize> Grid<[[T; C]; R]> {
    /// Bounded grid over a nested fixed-shape array
    ///
    /// The shape comes from the array type, so it cannot mismatch.
    #[inline]
    pub fn nested(values: [[T; C]; R]) -> Grid<[[T; C]; R]> {
        debug!("New {} x {} nested grid", R, C);
        Grid { raw: values, lines: Line(R), cols: Column(C) }
    }
}

impl<T: Element> Grid<Owned<T, System>> {
    /// Zeroed grid on the C heap
    #[inline]
    pub fn owned(lines: Line, cols: Column) -> Result<Grid<Owned<T, System>>> {
        Grid::owned_in(lines, cols, System)
    }
}

impl<T: Element, A: Allocator> Grid<Owned<T, A>> {
    /// Zeroed grid in memory requested from `allocator`
    pub fn owned_in(lines: Line, cols: Column, allocator: A) -> Result<Grid<Owned<T, A>>> {
        let size = checked_size(lines, cols)?;
        let raw = Owned::new_in(size, allocator)?;

        debug!("New {} x {} owned grid", lines, cols);

        Ok(Grid { raw, lines, cols })
    }

    /// Dynamic grid initialized with a copy of `values`
    pub fn owned_from(
        lines: Line,
        cols: Column,
        values: &[T],
        allocator: A,
    ) -> Result<Grid<Owned<T, A>>> {
        let size = checked_size(lines, cols)?;
        if values.len() != size {
            return Err(Error::ShapeMismatch { rows: lines, cols, len: values.len() });
        }

        let raw = Owned::from_slice_in(values, allocator)?;

        debug!("New {} x {} owned grid from {} values", lines, cols, size);

        Ok(Grid { raw, lines, cols })
    }

    /// Give the memory back to its allocator
    ///
    /// Dropping the grid does the same; this just makes the point of release
    /// explicit.
    #[inline]
    pub fn release(self) {
        trace!("Releasing {} x {} grid", self.lines, self.cols);
        self.raw.release();
    }
}

impl<S: Storage> fmt::Display for Grid<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            for (i, cell) in line.iter().enumerate() {
                if i > 0 {
                    f.write_str(" | ")?;
                }
                write!(f, "{}", cell)?;
            }
            f.write_str("\n")?;
        }

        Ok(())
    }
}

impl<S: Storage> Index<Point> for Grid<S> {
    type Output = S::Item;

    #[inline]
    fn index(&self, point: Point) -> &S::Item {
        match self.offset(point) {
            Some(offset) => &self.raw.as_slice()[offset.0],
            None => panic!("{}", self.out_of_range(point)),
        }
    }
}

impl<S: StorageMut> IndexMut<Point> for Grid<S> {
    #[inline]
    fn index_mut(&mut self, point: Point) -> &mut S::Item {
        match self.offset(point) {
            Some(offset) => &mut self.raw.as_mut_slice()[offset.0],
            None => panic!("{}", self.out_of_range(point)),
        }
    }
}

impl<S: Storage> Index<Linear> for Grid<S> {
    type Output = S::Item;

    #[inline]
    fn index(&self, index: Linear) -> &S::Item {
        &self.raw.as_slice()[index.0]
    }
}

impl<S: StorageMut> IndexMut<Linear> for Grid<S> {
    #[inline]
    fn index_mut(&mut self, index: Linear) -> &mut S::Item {
        &mut self.raw.as_mut_slice()[index.0]
    }
}

impl<S: Storage> Index<Line> for Grid<S> {
    type Output = [S::Item];

    #[inline]
    fn index(&self, index: Line) -> &[S::Item] {
        assert!(index < self.lines, "line {} out of range for {} lines", index, self.lines);
        let cols = self.cols.0;
        &self.raw.as_slice()[index.0 * cols..(index.0 + 1) * cols]
    }
}

impl<S: StorageMut> IndexMut<Line> for Grid<S> {
    #[inline]
    fn index_mut(&mut self, index: Line) -> &mut [S::Item] {
        assert!(index < self.lines, "line {} out of range for {} lines", index, self.lines);
        let cols = self.cols.0;
        &mut self.raw.as_mut_slice()[index.0 * cols..(index.0 + 1) * cols]
    }
}

/// Row-major iterator over a grid
pub struct GridIterator<'a, T: 'a> {
    inner: slice::Iter<'a, T>,
    cols: Column,
    offset: usize,
}

impl<'a, T> Iterator for GridIterator<'a, T> {
    type Item = Indexed<&'a T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.next()?;
        let offset = self.offset;
        self.offset += 1;

        Some(Indexed { inner, line: Line(offset / self.cols.0), column: Column(offset % self.cols.0) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for GridIterator<'a, T> {}

/// Mutable row-major iterator over a grid
pub struct GridIterMut<'a, T: 'a> {
    inner: slice::IterMut<'a, T>,
    cols: Column,
    offset: usize,
}

impl<'a, T> Iterator for GridIterMut<'a, T> {
    type Item = Indexed<&'a mut T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner.next()?;
        let offset = self.offset;
        self.offset += 1;

        Some(Indexed { inner, line: Line(offset / self.cols.0), column: Column(offset % self.cols.0) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for GridIterMut<'a, T> {}

impl<'a, S: Storage> IntoIterator for &'a Grid<S> {
    type Item = Indexed<&'a S::Item>;
    type IntoIter = GridIterator<'a, S::Item>;

    #[inline]
    fn into_iter(self) -> GridIterator<'a, S::Item> {
        self.iter()
    }
}

impl<'a, S: StorageMut> IntoIterator for &'a mut Grid<S> {
    type Item = Indexed<&'a mut S::Item>;
    type IntoIter = GridIterMut<'a, S::Item>;

    #[inline]
    fn into_iter(self) -> GridIterMut<'a, S::Item> {
        self.iter_mut()
    }
}

/// Iterator over the lines of a grid
pub struct Lines<'a, T: 'a> {
    raw: &'a [T],
    cols: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Lines<'a, T> {
    type Item = &'a [T];

    #[inline]
    fn next(&mut self) -> Option<&'a [T]> {
        if self.remaining == 0 {
            return None;
        }

        let (line, rest) = self.raw.split_at(self.cols);
        self.raw = rest;
        self.remaining -= 1;

        Some(line)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Lines<'a, T> {}
