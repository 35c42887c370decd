//! The operations every sorting algorithm is written against
//!
//! Algorithms are implemented once, generic over `Primitives`. The two
//! backends decide what a step looks like:
//! - `Animated` - swaps and writes highlight and suspend, marks are shown,
//!   the run ends with the completion animation
//! - `Silent` - the same value moves, no suspension, states never touched

use std::cmp::Ordering;

use crate::error::Result;
use crate::model::{ElementState, Sequence};

/// Operation counters for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortStats {
    pub comparisons: u64,
    pub swaps: u64,
    pub writes: u64,
}

/// Primitive operations over a sequence
#[allow(async_fn_in_trait)]
pub trait Primitives {
    fn len(&self) -> usize;

    fn value(&self, index: usize) -> Result<u32>;

    fn compare(&mut self, i: usize, j: usize) -> Result<Ordering>;

    /// Compare two values already read out of the sequence
    fn compare_values(&mut self, a: u32, b: u32) -> Ordering;

    async fn swap(&mut self, i: usize, j: usize) -> Result<()>;

    async fn set(&mut self, index: usize, value: u32) -> Result<()>;

    /// Put a value back without pausing or counting it
    ///
    /// Only for unwinding an interrupted run, so the sequence stays a
    /// permutation.
    fn restore(&mut self, index: usize, value: u32) -> Result<()>;

    /// Show `state` on a slot, silent backends ignore it
    fn mark(&mut self, index: usize, state: ElementState) -> Result<()>;

    /// End of the run
    async fn finish(&mut self) -> Result<()>;

    fn stats(&self) -> SortStats;
}

/// Backend that animates every mutation
pub struct Animated<'a> {
    seq: &'a mut Sequence,
    stats: SortStats,
}

impl<'a> Animated<'a> {
    pub fn new(seq: &'a mut Sequence) -> Self {
        Self {
            seq,
            stats: SortStats::default(),
        }
    }
}

impl Primitives for Animated<'_> {
    fn len(&self) -> usize {
        self.seq.len()
    }

    fn value(&self, index: usize) -> Result<u32> {
        Ok(self.seq.get(index)?.value())
    }

    fn compare(&mut self, i: usize, j: usize) -> Result<Ordering> {
        self.stats.comparisons += 1;
        self.seq.compare_values(i, j)
    }

    fn compare_values(&mut self, a: u32, b: u32) -> Ordering {
        self.stats.comparisons += 1;
        a.cmp(&b)
    }

    async fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.stats.swaps += 1;
        self.seq.swap(i, j, true).await
    }

    async fn set(&mut self, index: usize, value: u32) -> Result<()> {
        self.stats.writes += 1;
        self.seq.set(index, value, true).await
    }

    fn restore(&mut self, index: usize, value: u32) -> Result<()> {
        self.seq.overwrite(index, value)
    }

    fn mark(&mut self, index: usize, state: ElementState) -> Result<()> {
        self.seq.set_state(index, state)
    }

    async fn finish(&mut self) -> Result<()> {
        self.seq.finish().await
    }

    fn stats(&self) -> SortStats {
        self.stats
    }
}

/// Backend that only moves values
pub struct Silent<'a> {
    seq: &'a mut Sequence,
    stats: SortStats,
}

impl<'a> Silent<'a> {
    pub fn new(seq: &'a mut Sequence) -> Self {
        Self {
            seq,
            stats: SortStats::default(),
        }
    }
}

impl Primitives for Silent<'_> {
    fn len(&self) -> usize {
        self.seq.len()
    }

    fn value(&self, index: usize) -> Result<u32> {
        Ok(self.seq.get(index)?.value())
    }

    fn compare(&mut self, i: usize, j: usize) -> Result<Ordering> {
        self.stats.comparisons += 1;
        self.seq.compare_values(i, j)
    }

    fn compare_values(&mut self, a: u32, b: u32) -> Ordering {
        self.stats.comparisons += 1;
        a.cmp(&b)
    }

    async fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.stats.swaps += 1;
        self.seq.swap(i, j, false).await
    }

    async fn set(&mut self, index: usize, value: u32) -> Result<()> {
        self.stats.writes += 1;
        self.seq.set(index, value, false).await
    }

    fn restore(&mut self, index: usize, value: u32) -> Result<()> {
        self.seq.overwrite(index, value)
    }

    fn mark(&mut self, index: usize, _state: ElementState) -> Result<()> {
        // Still validate, so both backends fail on the same indices
        self.seq.get(index).map(|_| ())
    }

    async fn finish(&mut self) -> Result<()> {
        Ok(())
    }

    fn stats(&self) -> SortStats {
        self.stats
    }
}
