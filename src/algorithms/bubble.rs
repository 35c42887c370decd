//! Bubble sort
//!
//! Adjacent compare-swap passes. Each pass fixes the largest remaining value
//! at the end of the unsorted prefix, which is marked done. A pass without
//! swaps means the prefix is already in order and the sort stops early.

use std::cmp::Ordering;

use tracing::debug;

use super::Primitives;
use crate::error::Result;
use crate::model::ElementState;

pub async fn sort<P: Primitives>(p: &mut P) -> Result<()> {
    let n = p.len();

    for pass in 0..n {
        let last = n - pass - 1;
        let mut swapped = false;

        for j in 0..last {
            p.mark(j, ElementState::Active)?;
            if p.compare(j, j + 1)? == Ordering::Greater {
                p.swap(j, j + 1).await?;
                swapped = true;
            }
            p.mark(j, ElementState::Inactive)?;
        }
        p.mark(last, ElementState::Done)?;

        if !swapped {
            debug!(pass, "bubble: no swaps, prefix already sorted");
            for k in 0..last {
                p.mark(k, ElementState::Done)?;
            }
            break;
        }
    }

    p.finish().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Animated, Silent};
    use crate::model::Sequence;
    use futures_util::FutureExt;

    #[test]
    fn test_sorts_example() {
        let mut seq = Sequence::from_values(&[5, 3, 4, 1, 2]).unwrap();
        sort(&mut Silent::new(&mut seq))
            .now_or_never()
            .unwrap()
            .unwrap();
        assert_eq!(seq.values(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_sorted_input_needs_no_swaps() {
        let mut seq = Sequence::ordered(6).unwrap();
        let mut backend = Silent::new(&mut seq);
        sort(&mut backend).now_or_never().unwrap().unwrap();
        assert_eq!(backend.stats().swaps, 0);
        // One pass over five adjacent pairs, then the early exit
        assert_eq!(backend.stats().comparisons, 5);
        assert_eq!(seq.values(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reversed_input_animated() {
        let mut seq = Sequence::from_values(&[4, 3, 2, 1]).unwrap();
        let mut backend = Animated::new(&mut seq);
        sort(&mut backend).await.unwrap();
        assert_eq!(backend.stats().swaps, 6);
        assert_eq!(seq.values(), vec![1, 2, 3, 4]);
        assert!(seq.states().iter().all(|s| *s == ElementState::Inactive));
    }
}
