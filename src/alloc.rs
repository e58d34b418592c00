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

//! Allocators backing dynamically owned grid storage
use std::alloc::Layout;
use std::cell::Cell;
use std::ptr::NonNull;

use errno::errno;

/// Source of dynamic memory
///
/// Every successful `allocate` must be matched by exactly one `release` with
/// the same layout. `grid::Owned` takes care of the pairing.
pub trait Allocator {
    /// Request zero-filled memory for `layout`
    ///
    /// Returns `None` when the request cannot be satisfied. Never called with
    /// a zero-sized layout.
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>>;

    /// Give memory back
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator with the same
    /// `layout`, and must not have been released already.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

impl<'a, A: Allocator + ?Sized> Allocator for &'a A {
    #[inline]
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        (**self).release(ptr, layout)
    }
}

/// The C heap
///
/// Memory comes from `calloc`, which is aligned for every numeric element
/// type, and goes back through `free`.
#[derive(Debug, Default, Copy, Clone)]
pub struct System;

impl Allocator for System {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0);
        debug_assert!(layout.align() <= 2 * std::mem::size_of::<usize>());

        let ptr = unsafe { libc::calloc(1, layout.size()) } as *mut u8;
        match NonNull::new(ptr) {
            Some(ptr) => {
                trace!("calloc {} bytes at {:p}", layout.size(), ptr);
                Some(ptr)
            },
            None => {
                warn!("calloc of {} bytes failed: {}", layout.size(), errno());
                None
            },
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        trace!("free {} bytes at {:p}", layout.size(), ptr);
        libc::free(ptr.as_ptr() as *mut libc::c_void);
    }
}

/// Allocator wrapper keeping track of outstanding allocations
#[derive(Debug, Default)]
pub struct Counting<A> {
    inner: A,
    allocations: Cell<usize>,
    releases: Cell<usize>,
    failures: Cell<usize>,
}

impl<A: Allocator> Counting<A> {
    pub fn new(inner: A) -> Counting<A> {
        Counting {
            inner,
            allocations: Cell::new(0),
            releases: Cell::new(0),
            failures: Cell::new(0),
        }
    }

    /// Successful allocations so far
    #[inline]
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    #[inline]
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Requests the inner allocator refused
    #[inline]
    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    /// Allocations not released yet
    #[inline]
    pub fn outstanding(&self) -> usize {
        self.allocations() - self.releases()
    }
}

impl<A: Allocator> Allocator for Counting<A> {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        match self.inner.allocate(layout) {
            Some(ptr) => {
                self.allocations.set(self.allocations.get() + 1);
                Some(ptr)
            },
            None => {
                self.failures.set(self.failures.get() + 1);
                None
            },
        }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.releases.set(self.releases.get() + 1);
        self.inner.release(ptr, layout);
    }
}

/// Allocator wrapper refusing any request above a byte limit
#[derive(Debug, Copy, Clone)]
pub struct Limited<A> {
    inner: A,
    limit: Option<usize>,
}

impl<A: Allocator> Limited<A> {
    /// Wrap `inner`; `None` disables the limit
    pub fn new(inner: A, limit: Option<usize>) -> Limited<A> {
        Limited { inner, limit }
    }

    #[inline]
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

impl<A: Allocator> Allocator for Limited<A> {
    fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
        match self.limit {
            Some(limit) if layout.size() > limit => {
                warn!("Refusing {} byte allocation, limit is {}", layout.size(), limit);
                None
            },
            _ => self.inner.allocate(layout),
        }
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.inner.release(ptr, layout)
    }
}
