//! The paginator: sorted pages on demand over a fixed collection.
//!
//! A [`Paginator`] owns (or exclusively borrows) its backing storage and answers
//! "elements `offset..offset + length` in sorted order" requests. Each request only does the
//! partitioning work needed to settle its window, and the partition tree remembers what has
//! been settled so that later requests never redo it.
//!
//! # Per-request algorithm
//!
//! 1. The play margin is `length` clamped to `[min_play, max_play]`.
//! 2. Split phase: every pending leaf intersecting the window is split with a quickselect step
//!    until it is small, out of depth budget, or does not extend more than the play margin past
//!    the window. The resulting leaf is queued.
//! 3. Sort phase: index-adjacent queued leaves are merged into runs and each run is
//!    introsorted once. Every leaf of a run is marked sorted.
//!
//! Any failure in steps 2 and 3 faults the paginator permanently.

use crate::algo;
use crate::config::{Tuning, depth_limit};
use crate::core::{Comparer, FnComparer, Indexed, NaturalOrder, OptionOrder, Stable};
use crate::error::{Error, Result};
use crate::partition::{NodeId, PartitionTree};
use crate::storage::{Direct, Lane, Paired, SortStorage};
use std::any::Any;
use std::cmp::Ordering;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};
use std::panic::{self, AssertUnwindSafe};

/// Whether a paginator can still serve pages.
///
/// The transition to `Faulted` happens at most once and is never undone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PaginatorState {
    #[default]
    Usable,
    /// Holds the error every later request returns.
    Faulted(Error),
}

/// A page boundary, counted from either end of the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    FromStart(usize),
    FromEnd(usize),
}

impl Position {
    /// Absolute index for a collection of `count` elements, or `None` if a from-end position
    /// reaches before the start.
    pub fn resolve(self, count: usize) -> Option<usize> {
        match self {
            Position::FromStart(index) => Some(index),
            Position::FromEnd(back) => count.checked_sub(back),
        }
    }
}

/// A half-open page range whose bounds may be relative to the end.
///
/// Any std range over `usize` converts into a `PageRange`:
///
/// ```
/// use pagesort::{PageRange, Position};
///
/// assert_eq!(
///     PageRange::from(2..),
///     PageRange::new(Position::FromStart(2), Position::FromEnd(0))
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRange {
    pub start: Position,
    pub end: Position,
}

impl PageRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// The last `n` elements.
    pub fn last(n: usize) -> Self {
        Self::new(Position::FromEnd(n), Position::FromEnd(0))
    }
}

impl From<Range<usize>> for PageRange {
    fn from(range: Range<usize>) -> Self {
        Self::new(
            Position::FromStart(range.start),
            Position::FromStart(range.end),
        )
    }
}

impl From<RangeInclusive<usize>> for PageRange {
    fn from(range: RangeInclusive<usize>) -> Self {
        let (start, end) = range.into_inner();
        Self::new(
            Position::FromStart(start),
            Position::FromStart(end.saturating_add(1)),
        )
    }
}

impl From<RangeFrom<usize>> for PageRange {
    fn from(range: RangeFrom<usize>) -> Self {
        Self::new(Position::FromStart(range.start), Position::FromEnd(0))
    }
}

impl From<RangeTo<usize>> for PageRange {
    fn from(range: RangeTo<usize>) -> Self {
        Self::new(Position::FromStart(0), Position::FromStart(range.end))
    }
}

impl From<RangeToInclusive<usize>> for PageRange {
    fn from(range: RangeToInclusive<usize>) -> Self {
        Self::new(
            Position::FromStart(0),
            Position::FromStart(range.end.saturating_add(1)),
        )
    }
}

impl From<RangeFull> for PageRange {
    fn from(_: RangeFull) -> Self {
        Self::new(Position::FromStart(0), Position::FromEnd(0))
    }
}

/// Lazily sorted pages over a [`SortStorage`].
///
/// Pages are slices of the backing item lane, so a page borrows the paginator until it is
/// dropped. The storage is reordered in place across calls; only windows that have been
/// requested are guaranteed to be in sorted order.
///
/// # Examples
///
/// ```
/// use pagesort::Paginator;
///
/// let mut data = vec![5, 3, 1, 4, 2];
/// let mut paginator = Paginator::direct(&mut data);
///
/// assert_eq!(paginator.get_page(2, 2).unwrap(), &[3, 4]);
/// assert_eq!(paginator.get_page(0, 5).unwrap(), &[1, 2, 3, 4, 5]);
/// ```
#[derive(Debug)]
pub struct Paginator<S, C> {
    storage: S,
    comparer: C,
    // Owned sub-range of the storage is `base..base + count`.
    base: usize,
    count: usize,
    tree: PartitionTree,
    tuning: Tuning,
    state: PaginatorState,
    pending: Vec<NodeId>,
}

impl<S, C> Paginator<S, C>
where
    S: SortStorage,
    C: Comparer<S::Key>,
{
    /// Paginates the whole storage.
    pub fn new(storage: S, comparer: C) -> Self {
        let count = storage.len();
        Self::with_bounds(storage, comparer, 0, count)
    }

    /// Paginates `storage[offset..offset + length]`, leaving the rest untouched.
    ///
    /// Page offsets are relative to `offset`.
    pub fn with_range(storage: S, comparer: C, offset: usize, length: usize) -> Result<Self> {
        let len = storage.len();
        match offset.checked_add(length) {
            Some(end) if end <= len => Ok(Self::with_bounds(storage, comparer, offset, length)),
            _ => Err(Error::out_of_range(
                "length",
                format!("offset {offset} + length {length} exceeds storage length {len}"),
            )),
        }
    }

    fn with_bounds(storage: S, comparer: C, base: usize, count: usize) -> Self {
        Self {
            storage,
            comparer,
            base,
            count,
            tree: PartitionTree::new(base, base + count),
            tuning: Tuning::default(),
            state: PaginatorState::Usable,
            pending: Vec::with_capacity(16),
        }
    }

    /// Replaces the default thresholds.
    pub fn with_tuning(mut self, tuning: Tuning) -> Result<Self> {
        tuning.validate()?;
        self.tuning = tuning;
        Ok(self)
    }

    /// Number of elements being paginated.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn state(&self) -> &PaginatorState {
        &self.state
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.state, PaginatorState::Faulted(_))
    }

    /// Partitions settled so far, in absolute storage indices.
    pub fn partitions(&self) -> &PartitionTree {
        &self.tree
    }

    /// Gives the backing storage back.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Returns the elements at sorted positions `offset..offset + length`.
    ///
    /// Fails with [`Error::OutOfRange`] if the window does not fit in [`count`](Self::count);
    /// the paginator stays usable. Fails with [`Error::InvalidOperation`] if the comparer
    /// misbehaves, after which every call fails the same way.
    pub fn get_page(&mut self, offset: usize, length: usize) -> Result<&[S::Item]> {
        let end = match offset.checked_add(length) {
            Some(end) if end <= self.count => end,
            _ => {
                return Err(Error::out_of_range(
                    "length",
                    format!(
                        "offset {offset} + length {length} exceeds count {}",
                        self.count
                    ),
                ));
            }
        };
        self.resolve(offset, end)?;
        Ok(&self.storage.items()[self.base + offset..self.base + end])
    }

    /// Returns the elements in `range` of the sorted order.
    ///
    /// ```
    /// use pagesort::{PageRange, Paginator};
    ///
    /// let mut data = vec![9, 7, 8, 1, 3, 2];
    /// let mut paginator = Paginator::direct(&mut data);
    ///
    /// assert_eq!(paginator.get_range(PageRange::last(2)).unwrap(), &[8, 9]);
    /// assert_eq!(paginator.get_range(..2).unwrap(), &[1, 2]);
    /// ```
    pub fn get_range(&mut self, range: impl Into<PageRange>) -> Result<&[S::Item]> {
        let range = range.into();
        let count = self.count;
        let (Some(start), Some(end)) = (range.start.resolve(count), range.end.resolve(count))
        else {
            return Err(Error::out_of_range(
                "range",
                format!("{range:?} reaches before the start of {count} elements"),
            ));
        };
        if start > end || end > count {
            return Err(Error::out_of_range(
                "range",
                format!("{start}..{end} is not within {count} elements"),
            ));
        }
        self.get_page(start, end - start)
    }

    fn resolve(&mut self, start: usize, end: usize) -> Result<()> {
        if let PaginatorState::Faulted(err) = &self.state {
            return Err(err.clone());
        }
        if start == end {
            return Ok(());
        }

        let play = self.tuning.play(end - start);
        let (start, end) = (self.base + start, self.base + end);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.divide_and_sort(start, end, play)
        }));

        let cause = match outcome {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(err)) => err,
            Err(payload) => Error::ComparerPanicked {
                message: panic_message(&*payload),
            },
        };
        let err = Error::faulted(cause);
        log::warn!("paginator faulted while resolving [{start}, {end}): {err}");
        self.state = PaginatorState::Faulted(err.clone());
        Err(err)
    }

    fn divide_and_sort(&mut self, start: usize, end: usize, play: usize) -> Result<()> {
        let splits = self.split_partitions(start, end, play)?;
        let runs = self.sort_partitions()?;
        log::debug!(
            "resolved [{start}, {end}) with play {play}: {splits} splits, {runs} runs sorted, {} leaves",
            self.tree.leaf_count()
        );
        Ok(())
    }

    /// Splits every pending leaf covering `[start, end)` down to sortable size and queues it.
    fn split_partitions(&mut self, start: usize, end: usize, play: usize) -> Result<usize> {
        let depth_budget = depth_limit(self.count);
        let mut splits = 0;
        self.pending.clear();

        let mut position = start;
        while position < end {
            let mut id = self.tree.find(position);
            if self.tree.get(id).is_sorted() {
                position = self.tree.get(id).end();
                continue;
            }

            loop {
                let node = self.tree.get(id);
                let within_play = node.end() <= end.saturating_add(play)
                    && start <= node.start().saturating_add(play);
                if node.depth() >= depth_budget
                    || node.len() <= self.tuning.insertion_threshold
                    || within_play
                {
                    break;
                }

                let k = algo::partition(
                    &mut self.storage,
                    &self.comparer,
                    node.start(),
                    node.end() - 1,
                    &self.tuning,
                )?;
                let (left, right) = self.tree.split(id, k);
                splits += 1;
                id = if position < k { left } else { right };
            }

            self.pending.push(id);
            position = self.tree.get(id).end();
        }
        Ok(splits)
    }

    /// Introsorts the queued leaves, one call per run of index-adjacent leaves.
    fn sort_partitions(&mut self) -> Result<usize> {
        let pending = std::mem::take(&mut self.pending);
        let mut runs = 0;

        let mut i = 0;
        while i < pending.len() {
            let run_start = self.tree.get(pending[i]).start();
            let mut run_end = self.tree.get(pending[i]).end();
            let mut j = i + 1;
            while j < pending.len() && self.tree.get(pending[j]).start() == run_end {
                run_end = self.tree.get(pending[j]).end();
                j += 1;
            }

            let len = run_end - run_start;
            if len > 1 {
                algo::introsort(
                    &mut self.storage,
                    &self.comparer,
                    run_start,
                    run_end - 1,
                    depth_limit(len),
                    &self.tuning,
                )?;
            }
            for &id in &pending[i..j] {
                self.tree.mark_sorted(id);
            }
            runs += 1;
            i = j;
        }

        self.pending = pending;
        self.pending.clear();
        Ok(runs)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl<'a, T: PartialOrd> Paginator<Direct<'a, T>, NaturalOrder> {
    /// Paginates `items` by their natural order.
    pub fn direct(items: impl Into<Lane<'a, T>>) -> Self {
        Self::new(Direct::new(items), NaturalOrder)
    }
}

impl<'a, T, F> Paginator<Direct<'a, T>, FnComparer<F>>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Paginates `items` ordered by `compare`.
    pub fn direct_by(items: impl Into<Lane<'a, T>>, compare: F) -> Self {
        Self::new(Direct::new(items), FnComparer::new(compare))
    }
}

impl<'a, T: PartialOrd> Paginator<Direct<'a, Option<T>>, OptionOrder> {
    /// Paginates optional items by natural order, `None` first.
    pub fn nulls_first(items: impl Into<Lane<'a, Option<T>>>) -> Self {
        Self::new(Direct::new(items), OptionOrder::default())
    }
}

impl<'a, K: PartialOrd, V> Paginator<Paired<'a, K, V>, NaturalOrder> {
    /// Paginates `values` by the natural order of the parallel `keys`.
    pub fn paired(keys: impl Into<Lane<'a, K>>, values: impl Into<Lane<'a, V>>) -> Result<Self> {
        Ok(Self::new(Paired::new(keys, values)?, NaturalOrder))
    }

    /// Paginates `items` by a key computed once per item.
    pub fn by_key(items: impl Into<Lane<'a, V>>, key: impl FnMut(&V) -> K) -> Self {
        let items = items.into();
        let keys: Vec<K> = items.iter().map(key).collect();
        Self::new(Paired::from_lanes(keys.into(), items), NaturalOrder)
    }
}

impl<'a, K, V, F> Paginator<Paired<'a, K, V>, FnComparer<F>>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Paginates `values` by the parallel `keys` ordered with `compare`.
    pub fn paired_by(
        keys: impl Into<Lane<'a, K>>,
        values: impl Into<Lane<'a, V>>,
        compare: F,
    ) -> Result<Self> {
        Ok(Self::new(
            Paired::new(keys, values)?,
            FnComparer::new(compare),
        ))
    }
}

impl<'a, T: PartialOrd + Clone> Paginator<Paired<'a, Indexed<T>, T>, Stable<NaturalOrder>> {
    /// Paginates `items` by natural order, keeping equal items in input order.
    pub fn stable(items: impl Into<Lane<'a, T>>) -> Self {
        let items = items.into();
        let keys = Indexed::collect(items.iter().cloned());
        Self::new(
            Paired::from_lanes(keys.into(), items),
            Stable::new(NaturalOrder),
        )
    }
}

impl<'a, K: PartialOrd, V> Paginator<Paired<'a, Indexed<K>, V>, Stable<NaturalOrder>> {
    /// Paginates `items` by a computed key, keeping items with equal keys in input order.
    pub fn stable_by_key(items: impl Into<Lane<'a, V>>, key: impl FnMut(&V) -> K) -> Self {
        let items = items.into();
        let keys = Indexed::collect(items.iter().map(key));
        Self::new(
            Paired::from_lanes(keys.into(), items),
            Stable::new(NaturalOrder),
        )
    }
}

impl<'a, T: Clone, F> Paginator<Paired<'a, Indexed<T>, T>, Stable<FnComparer<F>>>
where
    F: Fn(&T, &T) -> Ordering,
{
    /// Paginates `items` ordered by `compare`, keeping equal items in input order.
    pub fn stable_by(items: impl Into<Lane<'a, T>>, compare: F) -> Self {
        let items = items.into();
        let keys = Indexed::collect(items.iter().cloned());
        Self::new(
            Paired::from_lanes(keys.into(), items),
            Stable::new(FnComparer::new(compare)),
        )
    }
}
