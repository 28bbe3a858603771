//! Core traits and types for pagesort.
//!
//! This module defines:
//! - [`Comparer`]: the two-way ordering capability the engine sorts with.
//! - The comparer strategies: [`NaturalOrder`], [`NullsFirst`], [`OptionOrder`], [`Stable`],
//!   [`FnComparer`] and [`Reverse`].
//! - [`Indexed`]: a key paired with its original position, used for stable ordering.

use std::cmp::Ordering;

/// A two-way ordering predicate over keys.
///
/// The engine only ever needs to know the direction between two keys, so the capability is
/// expressed as `less_than` / `greater_than` rather than a three-way compare. Implementations
/// must define a strict weak ordering. A comparer that does not is detected while partitioning
/// and reported as [`Error::InconsistentComparer`](crate::Error::InconsistentComparer).
///
/// # Examples
///
/// ```
/// use pagesort::Comparer;
///
/// /// Orders strings by length only.
/// struct ByLen;
///
/// impl Comparer<String> for ByLen {
///     fn less_than(&self, x: &String, y: &String) -> bool {
///         x.len() < y.len()
///     }
///
///     fn greater_than(&self, x: &String, y: &String) -> bool {
///         x.len() > y.len()
///     }
/// }
///
/// assert!(ByLen.less_than(&"ab".to_string(), &"abc".to_string()));
/// ```
pub trait Comparer<K: ?Sized> {
    /// Returns `true` if `x` orders strictly before `y`.
    fn less_than(&self, x: &K, y: &K) -> bool;

    /// Returns `true` if `x` orders strictly after `y`.
    #[inline(always)]
    fn greater_than(&self, x: &K, y: &K) -> bool {
        self.less_than(y, x)
    }

    /// Name used in error messages.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl<K: ?Sized, C: Comparer<K> + ?Sized> Comparer<K> for &C {
    #[inline(always)]
    fn less_than(&self, x: &K, y: &K) -> bool {
        (**self).less_than(x, y)
    }

    #[inline(always)]
    fn greater_than(&self, x: &K, y: &K) -> bool {
        (**self).greater_than(x, y)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Ordering defined by the key's own `PartialOrd`. Keys are assumed to be present.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: PartialOrd + ?Sized> Comparer<K> for NaturalOrder {
    #[inline(always)]
    fn less_than(&self, x: &K, y: &K) -> bool {
        x < y
    }

    #[inline(always)]
    fn greater_than(&self, x: &K, y: &K) -> bool {
        x > y
    }
}

/// Null-checked ordering over `Option<K>`.
///
/// `None` sorts before any `Some`. The inner comparer is only consulted when both sides are
/// present.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullsFirst<C> {
    inner: C,
}

impl<C> NullsFirst<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<K, C: Comparer<K>> Comparer<Option<K>> for NullsFirst<C> {
    #[inline(always)]
    fn less_than(&self, x: &Option<K>, y: &Option<K>) -> bool {
        match (x, y) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(x), Some(y)) => self.inner.less_than(x, y),
        }
    }

    #[inline(always)]
    fn greater_than(&self, x: &Option<K>, y: &Option<K>) -> bool {
        match (x, y) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(x), Some(y)) => self.inner.greater_than(x, y),
        }
    }
}

/// Natural ordering for optional values, `None` first.
pub type OptionOrder = NullsFirst<NaturalOrder>;

/// Stable ordering over [`Indexed`] keys.
///
/// Compares by the wrapped ordering first and by original index ascending on ties, which turns
/// any unstable sort into a stable one.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stable<C> {
    inner: C,
}

impl<C> Stable<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<K, C: Comparer<K>> Comparer<Indexed<K>> for Stable<C> {
    #[inline(always)]
    fn less_than(&self, x: &Indexed<K>, y: &Indexed<K>) -> bool {
        if self.inner.less_than(&x.value, &y.value) {
            true
        } else if self.inner.greater_than(&x.value, &y.value) {
            false
        } else {
            x.index < y.index
        }
    }

    #[inline(always)]
    fn greater_than(&self, x: &Indexed<K>, y: &Indexed<K>) -> bool {
        if self.inner.greater_than(&x.value, &y.value) {
            true
        } else if self.inner.less_than(&x.value, &y.value) {
            false
        } else {
            x.index > y.index
        }
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// Bridges a caller-supplied three-way comparison into a [`Comparer`].
#[derive(Clone, Copy)]
pub struct FnComparer<F> {
    compare: F,
}

impl<F> FnComparer<F> {
    pub fn new<K: ?Sized>(compare: F) -> Self
    where
        F: Fn(&K, &K) -> Ordering,
    {
        Self { compare }
    }
}

impl<F> std::fmt::Debug for FnComparer<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnComparer").finish_non_exhaustive()
    }
}

impl<K: ?Sized, F: Fn(&K, &K) -> Ordering> Comparer<K> for FnComparer<F> {
    #[inline(always)]
    fn less_than(&self, x: &K, y: &K) -> bool {
        (self.compare)(x, y) == Ordering::Less
    }

    #[inline(always)]
    fn greater_than(&self, x: &K, y: &K) -> bool {
        (self.compare)(x, y) == Ordering::Greater
    }
}

/// Reverses the wrapped ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct Reverse<C> {
    inner: C,
}

impl<C> Reverse<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<K: ?Sized, C: Comparer<K>> Comparer<K> for Reverse<C> {
    #[inline(always)]
    fn less_than(&self, x: &K, y: &K) -> bool {
        self.inner.greater_than(x, y)
    }

    #[inline(always)]
    fn greater_than(&self, x: &K, y: &K) -> bool {
        self.inner.less_than(x, y)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

/// A key paired with its position in the input.
#[derive(Clone, Copy, Debug)]
pub struct Indexed<K> {
    pub value: K,
    pub index: usize,
}

impl<K> Indexed<K> {
    pub fn new(value: K, index: usize) -> Self {
        Self { value, index }
    }

    pub fn into_value(self) -> K {
        self.value
    }

    /// Pairs every item with its position.
    pub fn collect<I: IntoIterator<Item = K>>(items: I) -> Vec<Indexed<K>> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, value)| Indexed { value, index })
            .collect()
    }
}

impl<K: PartialEq> PartialEq for Indexed<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.index == other.index
    }
}

impl<K: Eq> Eq for Indexed<K> {}

impl<K: Ord> PartialOrd for Indexed<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for Indexed<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then_with(|| self.index.cmp(&other.index))
    }
}
