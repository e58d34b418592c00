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

//! Dynamically allocated grid storage
//!
//! `Owned` is the only way to hold memory obtained from an `Allocator`. A
//! value of this type always points at live memory: a failed allocation
//! never produces one, and releasing consumes it. The element count lives
//! next to the pointer, since the memory itself does not remember its size.
use std::alloc::Layout;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;
use std::slice;

use static_assertions::assert_eq_size;

use super::storage::{Element, Lifetime, Storage, StorageMut};
use super::{Error, Result};
use crate::alloc::{Allocator, System};
use crate::index::{Column, Line};

/// Owning handle to `len` elements of dynamic memory
pub struct Owned<T, A: Allocator = System> {
    ptr: NonNull<T>,
    len: usize,
    allocator: A,
    _marker: PhantomData<T>,
}

impl<T: Element> Owned<T, System> {
    /// Allocate `len` zeroed elements on the C heap
    pub fn new(len: usize) -> Result<Owned<T, System>> {
        Owned::new_in(len, System)
    }
}

impl<T: Element, A: Allocator> Owned<T, A> {
    /// Allocate `len` zeroed elements from `allocator`
    ///
    /// Zero elements never reach the allocator; the handle then points at a
    /// dangling, well-aligned address and releasing it is a no-op.
    pub fn new_in(len: usize, allocator: A) -> Result<Owned<T, A>> {
        assert_eq_size!(Owned<u8, System>, [usize; 2]);

        let layout = Layout::array::<T>(len)
            .map_err(|_| Error::AllocationFailure { elements: len, bytes: None })?;

        if layout.size() == 0 {
            return Ok(Owned { ptr: NonNull::dangling(), len, allocator, _marker: PhantomData });
        }

        let ptr = allocator
            .allocate(layout)
            .ok_or(Error::AllocationFailure { elements: len, bytes: Some(layout.size()) })?;

        trace!("Allocated {} elements ({} bytes)", len, layout.size());

        Ok(Owned { ptr: ptr.cast(), len, allocator, _marker: PhantomData })
    }

    /// Allocate and fill with a copy of `values`
    pub fn from_slice_in(values: &[T], allocator: A) -> Result<Owned<T, A>> {
        let mut owned = Owned::new_in(values.len(), allocator)?;
        owned.as_mut_slice().copy_from_slice(values);
        Ok(owned)
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Bulk copy `values` into the storage
    ///
    /// The source must have exactly `len` elements. The borrow checker
    /// guarantees `values` cannot overlap the storage, so a plain
    /// non-overlapping copy is used.
    pub fn copy_from_slice(&mut self, values: &[T]) -> Result<()> {
        if values.len() != self.len {
            return Err(Error::ShapeMismatch {
                rows: Line(1),
                cols: Column(self.len),
                len: values.len(),
            });
        }

        self.as_mut_slice().copy_from_slice(values);

        Ok(())
    }

    /// Release the memory now
    ///
    /// Equivalent to dropping the handle. The handle is consumed, so it can
    /// be neither used nor released again:
    ///
    /// ```compile_fail
    /// use rowgrid::grid::Owned;
    ///
    /// let owned = Owned::<i32>::new(4).unwrap();
    /// owned.release();
    /// owned.len();
    /// ```
    #[inline]
    pub fn release(self) {
        mem::drop(self);
    }
}

impl<T, A: Allocator> Drop for Owned<T, A> {
    fn drop(&mut self) {
        let size = mem::size_of::<T>() * self.len;
        if size == 0 {
            return;
        }

        let layout = match Layout::from_size_align(size, mem::align_of::<T>()) {
            Ok(layout) => layout,
            Err(_) => return,
        };

        trace!("Releasing {} elements ({} bytes)", self.len, size);

        unsafe { self.allocator.release(self.ptr.cast(), layout) };
    }
}

impl<T: Element, A: Allocator> Storage for Owned<T, A> {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    fn lifetime(&self) -> Lifetime {
        Lifetime::OwnedDynamic
    }
}

impl<T: Element, A: Allocator> StorageMut for Owned<T, A> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T: Element, A: Allocator> fmt::Debug for Owned<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owned").field("len", &self.len).field("inner", &self.as_slice()).finish()
    }
}

impl<T: Element, A: Allocator> PartialEq for Owned<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

// The handle is the only path to its memory, just like `Box`.
unsafe impl<T: Send, A: Allocator + Send> Send for Owned<T, A> {}

#[cfg(test)]
mod tests {
    use super::Owned;
    use crate::alloc::{Counting, Limited, System};
    use crate::grid::storage::{Lifetime, Storage, StorageMut};
    use crate::grid::Error;

    #[test]
    fn create_then_release() {
        let counting = Counting::new(System);

        let owned = Owned::<i32, _>::new_in(11, &counting).unwrap();
        assert_eq!(owned.len(), 11);
        assert_eq!(owned.lifetime(), Lifetime::OwnedDynamic);
        assert!(owned.as_slice().iter().all(|&value| value == 0));
        assert_eq!(counting.outstanding(), 1);

        owned.release();

        assert_eq!(counting.allocations(), 1);
        assert_eq!(counting.releases(), 1);
        assert_eq!(counting.outstanding(), 0);
    }

    #[test]
    fn drop_releases_once() {
        let counting = Counting::new(System);

        {
            let mut owned = Owned::<f64, _>::new_in(3, &counting).unwrap();
            owned.as_mut_slice()[2] = 1.5;
            assert_eq!(owned.as_slice(), &[0., 0., 1.5]);
        }

        assert_eq!(counting.releases(), 1);
        assert_eq!(counting.outstanding(), 0);
    }

    #[test]
    fn empty_skips_allocator() {
        let counting = Counting::new(System);

        let owned = Owned::<u8, _>::new_in(0, &counting).unwrap();
        assert!(owned.is_empty());
        assert!(owned.as_slice().is_empty());
        owned.release();

        assert_eq!(counting.allocations(), 0);
        assert_eq!(counting.releases(), 0);
    }

    #[test]
    fn allocation_failure() {
        let counting = Counting::new(Limited::new(System, Some(16)));

        match Owned::<i32, _>::new_in(10, &counting) {
            Err(Error::AllocationFailure { elements: 10, bytes: Some(40) }) => (),
            other => panic!("expected allocation failure, got {:?}", other),
        }

        assert_eq!(counting.failures(), 1);
        assert_eq!(counting.outstanding(), 0);
    }

    #[test]
    fn size_overflow() {
        match Owned::<u64>::new(usize::max_value()) {
            Err(Error::AllocationFailure { bytes: None, .. }) => (),
            other => panic!("expected allocation failure, got {:?}", other),
        }
    }

    #[test]
    fn copy_from_slice() {
        let values = [0, 10, 9, 1, 8, 2, 7, 3, 6, 4, 5];
        let mut owned = Owned::<i32>::new(values.len()).unwrap();

        owned.copy_from_slice(&values).unwrap();
        assert_eq!(owned.as_slice(), &values[..]);

        match owned.copy_from_slice(&values[..3]) {
            Err(Error::ShapeMismatch { len: 3, .. }) => (),
            other => panic!("expected shape mismatch, got {:?}", other),
        }
    }
}
