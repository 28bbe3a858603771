//! Partitioning and sorting primitives.
//!
//! Everything here works on a [`SortStorage`] so that a separate value lane moves in lockstep
//! with the keys:
//! - [`partition`]: one quickselect step (median-of-three or Tukey's ninther pivot, Hoare scan)
//!   that also detects comparers which are not strict weak orderings.
//! - [`introsort`]: quicksort built on [`partition`], falling back to heapsort when the depth
//!   budget runs out and to insertion sort for small ranges.
//!
//! The public entry points are [`sort`] and [`sort_slice`], which fully order a storage.

use crate::config::{Tuning, depth_limit};
use crate::core::{Comparer, NaturalOrder};
use crate::error::{Error, Result};
use crate::storage::{Direct, SortStorage};

/// Fully sorts `storage` with `comparer`.
///
/// Fails with [`Error::InconsistentComparer`] if the comparer is detected not to be a strict
/// weak ordering; the storage then holds some permutation of its input.
///
/// # Examples
///
/// ```
/// use pagesort::algo::sort;
/// use pagesort::{NaturalOrder, Paired};
///
/// let mut keys = vec![3, 1, 2];
/// let mut names = vec!["c", "a", "b"];
/// {
///     let mut storage = Paired::new(&mut keys, &mut names).unwrap();
///     sort(&mut storage, &NaturalOrder).unwrap();
/// }
///
/// assert_eq!(names, vec!["a", "b", "c"]);
/// ```
pub fn sort<S, C>(storage: &mut S, comparer: &C) -> Result<()>
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    let len = storage.len();
    if len < 2 {
        return Ok(());
    }
    introsort(
        storage,
        comparer,
        0,
        len - 1,
        depth_limit(len),
        &Tuning::default(),
    )
}

/// Sorts a slice by its natural order.
///
/// ```
/// use pagesort::algo::sort_slice;
///
/// let mut data = vec![5, 3, 1, 4, 2];
/// sort_slice(&mut data).unwrap();
/// assert_eq!(data, vec![1, 2, 3, 4, 5]);
/// ```
pub fn sort_slice<T: PartialOrd>(data: &mut [T]) -> Result<()> {
    sort(&mut Direct::new(data), &NaturalOrder)
}

#[inline(always)]
fn less<S, C>(storage: &S, comparer: &C, a: usize, b: usize) -> bool
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    let keys = storage.keys();
    comparer.less_than(&keys[a], &keys[b])
}

#[inline(always)]
fn greater<S, C>(storage: &S, comparer: &C, a: usize, b: usize) -> bool
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    let keys = storage.keys();
    comparer.greater_than(&keys[a], &keys[b])
}

/// Orders the keys at `first`, `mid` and `last` so that `mid` holds their median.
fn median_of_three<S, C>(storage: &mut S, comparer: &C, first: usize, mid: usize, last: usize)
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    if greater(storage, comparer, first, mid) {
        storage.swap(first, mid);
    }
    if greater(storage, comparer, mid, last) {
        storage.swap(mid, last);
        if greater(storage, comparer, first, mid) {
            storage.swap(first, mid);
        }
    }
}

/// Partitions the inclusive range `[first, last]` around a pivot and returns the pivot's final
/// index `k`.
///
/// On success every key in `[first, k)` is not greater than the pivot and every key in
/// `(k, last]` is not less than it. For `last - first >= 2` the returned index satisfies
/// `first < k < last`.
///
/// The scan cursors are bounded by the median-of-three sentinels. A cursor that runs into the
/// range boundary can only happen with a comparer that is not a strict weak ordering, which is
/// reported as [`Error::InconsistentComparer`] instead of continuing with a corrupt order.
pub(crate) fn partition<S, C>(
    storage: &mut S,
    comparer: &C,
    first: usize,
    last: usize,
    tuning: &Tuning,
) -> Result<usize>
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    debug_assert!(first < last && last < storage.len());

    let count = last - first;
    let mid = first + count / 2;
    if count > tuning.ninther_threshold {
        // Tukey's ninther: the three medians end up at first, mid and last.
        let step = (count + 1) / 8;
        median_of_three(storage, comparer, first + step, first, first + step * 2);
        median_of_three(storage, comparer, mid - step, mid, mid + step);
        median_of_three(storage, comparer, last - step * 2, last, last - step);
    }
    median_of_three(storage, comparer, first, mid, last);

    let pivot = last - 1;
    storage.swap(mid, pivot);

    // Scan (first, pivot); `first` and `last` already sit on the correct sides.
    let mut left = first;
    let mut right = pivot;
    while left < right {
        left += 1;
        while greater(storage, comparer, pivot, left) {
            if left == last {
                return Err(Error::inconsistent_comparer(comparer.name()));
            }
            left += 1;
        }

        right -= 1;
        while less(storage, comparer, pivot, right) {
            if right == first {
                return Err(Error::inconsistent_comparer(comparer.name()));
            }
            right -= 1;
        }

        if left < right {
            storage.swap(left, right);
        }
    }

    // Only reachable when the pivot compared greater than itself.
    if left == last {
        return Err(Error::inconsistent_comparer(comparer.name()));
    }

    storage.swap(pivot, left);
    Ok(left)
}

/// Sorts the inclusive range `[lo, hi]` with at most `depth_limit` levels of quicksort
/// recursion before switching to heapsort.
pub(crate) fn introsort<S, C>(
    storage: &mut S,
    comparer: &C,
    lo: usize,
    mut hi: usize,
    mut depth_limit: usize,
    tuning: &Tuning,
) -> Result<()>
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    while hi > lo {
        let size = hi - lo + 1;
        if size <= tuning.insertion_threshold {
            return insertion_sort(storage, comparer, lo, hi);
        }

        if depth_limit == 0 {
            return heapsort(storage, comparer, lo, hi);
        }
        depth_limit -= 1;

        let p = partition(storage, comparer, lo, hi, tuning)?;
        introsort(storage, comparer, p + 1, hi, depth_limit, tuning)?;
        hi = p - 1;
    }
    Ok(())
}

/// Fails if the key at `at` compares strictly before or after itself.
///
/// Insertion sort and heapsort have no scan boundary for a bad comparer to run into; this is
/// their only consistency check.
#[inline]
fn check_irreflexive<S, C>(storage: &S, comparer: &C, at: usize) -> Result<()>
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    if less(storage, comparer, at, at) || greater(storage, comparer, at, at) {
        return Err(Error::inconsistent_comparer(comparer.name()));
    }
    Ok(())
}

fn insertion_sort<S, C>(storage: &mut S, comparer: &C, lo: usize, hi: usize) -> Result<()>
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    check_irreflexive(storage, comparer, lo)?;
    for i in lo + 1..=hi {
        let mut j = i;
        while j > lo && less(storage, comparer, j, j - 1) {
            storage.swap(j, j - 1);
            j -= 1;
        }
    }
    Ok(())
}

fn heapsort<S, C>(storage: &mut S, comparer: &C, lo: usize, hi: usize) -> Result<()>
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    check_irreflexive(storage, comparer, lo)?;
    let n = hi - lo + 1;
    for i in (0..n / 2).rev() {
        sift_down(storage, comparer, lo, i, n);
    }
    for end in (1..n).rev() {
        storage.swap(lo, lo + end);
        sift_down(storage, comparer, lo, 0, end);
    }
    Ok(())
}

// Max-heap rooted at `lo`, `n` elements, restoring the property below `i`.
fn sift_down<S, C>(storage: &mut S, comparer: &C, lo: usize, mut i: usize, n: usize)
where
    S: SortStorage,
    C: Comparer<S::Key> + ?Sized,
{
    loop {
        let mut child = 2 * i + 1;
        if child >= n {
            break;
        }
        if child + 1 < n && less(storage, comparer, lo + child, lo + child + 1) {
            child += 1;
        }
        if !less(storage, comparer, lo + i, lo + child) {
            break;
        }
        storage.swap(lo + i, lo + child);
        i = child;
    }
}
