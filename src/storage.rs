//! Backing storage the engine reorders in place.
//!
//! A paginator sorts a key lane and, optionally, a parallel value lane in lockstep. Each lane is
//! either an exclusive borrow of caller memory or a vector the paginator owns (for keys it had to
//! synthesize, like [`Indexed`](crate::Indexed) keys for stable ordering).

use crate::error::{Result, verify_arg};
use std::ops::{Deref, DerefMut};

/// One contiguous lane of elements, borrowed or owned.
#[derive(Debug)]
pub enum Lane<'a, T> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T> Deref for Lane<'_, T> {
    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &[T] {
        match self {
            Lane::Borrowed(slice) => slice,
            Lane::Owned(vec) => vec,
        }
    }
}

impl<T> DerefMut for Lane<'_, T> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut [T] {
        match self {
            Lane::Borrowed(slice) => slice,
            Lane::Owned(vec) => vec,
        }
    }
}

impl<'a, T> From<&'a mut [T]> for Lane<'a, T> {
    fn from(slice: &'a mut [T]) -> Self {
        Lane::Borrowed(slice)
    }
}

impl<'a, T> From<&'a mut Vec<T>> for Lane<'a, T> {
    fn from(vec: &'a mut Vec<T>) -> Self {
        Lane::Borrowed(vec.as_mut_slice())
    }
}

impl<'a, T, const N: usize> From<&'a mut [T; N]> for Lane<'a, T> {
    fn from(array: &'a mut [T; N]) -> Self {
        Lane::Borrowed(array.as_mut_slice())
    }
}

impl<T> From<Vec<T>> for Lane<'_, T> {
    fn from(vec: Vec<T>) -> Self {
        Lane::Owned(vec)
    }
}

impl<T> FromIterator<T> for Lane<'_, T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Lane::Owned(iter.into_iter().collect())
    }
}

/// Storage the paginator can reorder: a key lane to compare and an item lane to hand out.
///
/// `swap` must move keys and items together so that position `i` always pairs the key and the
/// item that started out together.
pub trait SortStorage {
    type Key;
    type Item;

    /// Number of elements. Keys and items always have the same length.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn keys(&self) -> &[Self::Key];

    fn items(&self) -> &[Self::Item];

    fn swap(&mut self, a: usize, b: usize);
}

/// A single lane whose elements are both the keys and the items.
#[derive(Debug)]
pub struct Direct<'a, T> {
    items: Lane<'a, T>,
}

impl<'a, T> Direct<'a, T> {
    pub fn new(items: impl Into<Lane<'a, T>>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn into_lane(self) -> Lane<'a, T> {
        self.items
    }
}

impl<T> SortStorage for Direct<'_, T> {
    type Key = T;
    type Item = T;

    #[inline(always)]
    fn len(&self) -> usize {
        self.items.len()
    }

    #[inline(always)]
    fn keys(&self) -> &[T] {
        &self.items
    }

    #[inline(always)]
    fn items(&self) -> &[T] {
        &self.items
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.items.swap(a, b);
    }
}

/// Separate key and value lanes of equal length, permuted in lockstep.
#[derive(Debug)]
pub struct Paired<'a, K, V> {
    keys: Lane<'a, K>,
    values: Lane<'a, V>,
}

impl<'a, K, V> Paired<'a, K, V> {
    /// Pairs the lanes, failing with [`Error::InvalidArgument`](crate::Error::InvalidArgument)
    /// if their lengths differ.
    pub fn new(keys: impl Into<Lane<'a, K>>, values: impl Into<Lane<'a, V>>) -> Result<Self> {
        let keys = keys.into();
        let values = values.into();
        verify_arg(
            keys.len() == values.len(),
            "values",
            "keys and values must have the same length",
        )?;
        Ok(Self { keys, values })
    }

    // Callers guarantee equal lengths.
    pub(crate) fn from_lanes(keys: Lane<'a, K>, values: Lane<'a, V>) -> Self {
        debug_assert_eq!(keys.len(), values.len());
        Self { keys, values }
    }

    pub fn into_parts(self) -> (Lane<'a, K>, Lane<'a, V>) {
        (self.keys, self.values)
    }
}

impl<K, V> SortStorage for Paired<'_, K, V> {
    type Key = K;
    type Item = V;

    #[inline(always)]
    fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline(always)]
    fn keys(&self) -> &[K] {
        &self.keys
    }

    #[inline(always)]
    fn items(&self) -> &[V] {
        &self.values
    }

    #[inline(always)]
    fn swap(&mut self, a: usize, b: usize) {
        self.keys.swap(a, b);
        self.values.swap(a, b);
    }
}
