//! Tunable thresholds for the partition and sort engine.
//!
//! None of these affect correctness. They trade present work against future work and
//! comparison counts against bookkeeping.

use crate::error::{Result, verify_arg};
use cuneiform::cuneiform;

/// Ranges at or below this size are finished with insertion sort.
pub const INSERTION_SORT_THRESHOLD: usize = 16;

/// Ranges above this size pick their pivot with Tukey's ninther instead of median-of-three.
pub const TUKEY_NINTHER_THRESHOLD: usize = 40;

/// Lower bound of the play margin around a requested page.
pub const PARTITION_MINIMUM_PLAY: usize = 10;

/// Upper bound of the play margin around a requested page.
pub const PARTITION_MAXIMUM_PLAY: usize = 40;

// One per paginator, read on every partition and sort step.
#[cuneiform]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    pub insertion_threshold: usize,
    pub ninther_threshold: usize,
    pub min_play: usize,
    pub max_play: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            insertion_threshold: INSERTION_SORT_THRESHOLD,
            ninther_threshold: TUKEY_NINTHER_THRESHOLD,
            min_play: PARTITION_MINIMUM_PLAY,
            max_play: PARTITION_MAXIMUM_PLAY,
        }
    }
}

impl Tuning {
    pub fn validate(&self) -> Result<()> {
        // A partition step needs at least three elements to place a pivot strictly inside.
        verify_arg(
            self.insertion_threshold >= 2,
            "insertion_threshold",
            "insertion_threshold >= 2",
        )?;
        verify_arg(
            self.ninther_threshold >= 8,
            "ninther_threshold",
            "ninther_threshold >= 8",
        )?;
        verify_arg(self.min_play <= self.max_play, "min_play", "min_play <= max_play")
    }

    /// Margin around a page of `length` elements within which partitions are settled eagerly.
    #[inline]
    pub fn play(&self, length: usize) -> usize {
        length.clamp(self.min_play, self.max_play)
    }
}

/// Recursion budget for a range of `len` elements: twice its bit length.
#[inline]
pub fn depth_limit(len: usize) -> usize {
    2 * (usize::BITS - len.leading_zeros()) as usize
}
