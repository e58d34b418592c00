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

//! Contiguous storage backends for a grid
//!
//! A grid never touches its memory directly. Everything goes through the
//! flat slice handed out by a `Storage` implementation, so the index mapping
//! is the same no matter who owns the elements or how long they live.
//!
//! Because the slice carries its own length, a backend can never be passed
//! around without its size. There is no pointer-plus-count pair anywhere in
//! the public API.
use std::fmt;
use std::mem;
use std::slice;

use serde::Serialize;

/// Numeric element stored in a grid
///
/// # Safety
///
/// Implementors must be plain numeric types for which the all-zero bit
/// pattern is a valid value. Dynamic storage is handed out zero-filled and
/// read without further initialization.
pub unsafe trait Element:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + Serialize + 'static
{
}

macro_rules! element {
    ($($ty:ty),*) => {
        $(unsafe impl Element for $ty {})*
    };
}

element!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

/// How the memory behind a grid is obtained and released
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifetime {
    /// Fixed capacity held by value, released when the owner goes out of scope
    Bounded,

    /// Requested from an allocator and released exactly once
    OwnedDynamic,

    /// Reference to elements owned elsewhere
    Borrowed,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Lifetime::Bounded => f.write_str("bounded"),
            Lifetime::OwnedDynamic => f.write_str("owned dynamic"),
            Lifetime::Borrowed => f.write_str("borrowed"),
        }
    }
}

/// Read access to a contiguous run of elements
pub trait Storage {
    type Item: Element;

    /// Flat view over every element, in physical order
    fn as_slice(&self) -> &[Self::Item];

    fn lifetime(&self) -> Lifetime;

    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Write access to a contiguous run of elements
pub trait StorageMut: Storage {
    fn as_mut_slice(&mut self) -> &mut [Self::Item];
}

impl<T: Element, const N: usize> Storage for [T; N] {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        &self[..]
    }

    #[inline]
    fn lifetime(&self) -> Lifetime {
        Lifetime::Bounded
    }
}

impl<T: Element, const N: usize> StorageMut for [T; N] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self[..]
    }
}

// Nested arrays have no padding between the inner arrays, so `[[T; C]; R]`
// is laid out exactly like `[T; R * C]`.
impl<T: Element, const C: usize, const R: usize> Storage for [[T; C]; R] {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        debug_assert_eq!(mem::size_of::<[[T; C]; R]>(), mem::size_of::<T>() * R * C);
        unsafe { slice::from_raw_parts(self.as_ptr() as *const T, R * C) }
    }

    #[inline]
    fn lifetime(&self) -> Lifetime {
        Lifetime::Bounded
    }
}

impl<T: Element, const C: usize, const R: usize> StorageMut for [[T; C]; R] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr() as *mut T, R * C) }
    }
}

impl<'a, T: Element> Storage for &'a [T] {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }

    #[inline]
    fn lifetime(&self) -> Lifetime {
        Lifetime::Borrowed
    }
}

impl<'a, T: Element> Storage for &'a mut [T] {
    type Item = T;

    #[inline]
    fn as_slice(&self) -> &[T] {
        self
    }

    #[inline]
    fn lifetime(&self) -> Lifetime {
        Lifetime::Borrowed
    }
}

impl<'a, T: Element> StorageMut for &'a mut [T] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }
}

#[test]
fn nested_arrays_flatten_row_major() {
    let mut nested = [[0, 9, 1, 8, 2], [7, 3, 6, 4, 5]];

    assert_eq!(Storage::as_slice(&nested), &[0, 9, 1, 8, 2, 7, 3, 6, 4, 5]);

    StorageMut::as_mut_slice(&mut nested)[6] = -1;
    assert_eq!(nested[1][1], -1);
}

#[test]
fn lifetimes() {
    let mut values = [1u8, 2, 3];
    assert_eq!(values.lifetime(), Lifetime::Bounded);
    assert_eq!((&values[..]).lifetime(), Lifetime::Borrowed);

    let view: &mut [u8] = &mut values[..];
    assert_eq!(view.lifetime(), Lifetime::Borrowed);
    assert_eq!(Storage::len(&view), 3);
}
