//! Quicksort with Lomuto partitioning
//!
//! The rightmost slot of each range is the pivot. Values not greater than the
//! pivot are moved left of a boundary, then the pivot is swapped onto the
//! boundary, which is its final position.

use std::cmp::Ordering;

use super::Primitives;
use crate::error::Result;
use crate::model::ElementState;

pub async fn sort<P: Primitives>(p: &mut P) -> Result<()> {
    let n = p.len();
    if n > 0 {
        sort_range(p, 0, n - 1).await?;
    }
    p.finish().await
}

/// Sort `[l, r]`, recursing into the smaller side of each partition and
/// looping on the larger one so nesting stays logarithmic in the range length
async fn sort_range<P: Primitives>(p: &mut P, mut l: usize, mut r: usize) -> Result<()> {
    loop {
        if l > r {
            return Ok(());
        }
        if l == r {
            p.mark(l, ElementState::Done)?;
            return Ok(());
        }

        let pivot = partition(p, l, r).await?;
        p.mark(pivot, ElementState::Done)?;

        if pivot - l < r - pivot {
            if pivot > l {
                Box::pin(sort_range(p, l, pivot - 1)).await?;
            }
            l = pivot + 1;
        } else {
            // pivot > l here, the left side is at least as long as the right
            Box::pin(sort_range(p, pivot + 1, r)).await?;
            r = pivot - 1;
        }
    }
}

/// Partition `[l, r]` around the value at `r`, returning the pivot's final
/// index
pub async fn partition<P: Primitives>(p: &mut P, l: usize, r: usize) -> Result<usize> {
    p.mark(r, ElementState::Active)?;

    let mut boundary = l;
    for j in l..r {
        if p.compare(j, r)? != Ordering::Greater {
            if j != boundary {
                p.swap(boundary, j).await?;
            }
            boundary += 1;
        }
    }

    p.mark(r, ElementState::Inactive)?;
    if boundary != r {
        p.swap(boundary, r).await?;
    }
    Ok(boundary)
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
    fn test_presorted_large_inputs() {
        let n = 10_000;
        let reversed: Vec<u32> = (1..=n).rev().collect();
        for mut seq in [
            Sequence::ordered(n as usize).unwrap(),
            Sequence::from_values(&reversed).unwrap(),
        ] {
            sort(&mut Silent::new(&mut seq))
                .now_or_never()
                .unwrap()
                .unwrap();
            assert!(seq.is_sorted());
        }
    }

    #[test]
    fn test_partition_places_pivot() {
        let mut seq = Sequence::from_values(&[2, 8, 7, 1, 3, 5, 6, 4]).unwrap();
        let pivot = partition(&mut Silent::new(&mut seq), 0, 7)
            .now_or_never()
            .unwrap()
            .unwrap();

        assert_eq!(pivot, 3);
        let values = seq.values();
        assert_eq!(values[3], 4);
        assert!(values[..3].iter().all(|&v| v <= 4));
        assert!(values[4..].iter().all(|&v| v > 4));
        assert_eq!(values, vec![2, 1, 3, 4, 7, 5, 6, 8]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animated_partition_leaves_pivot_slot_inactive() {
        let mut seq = Sequence::from_values(&[3, 1, 2]).unwrap();
        let pivot = partition(&mut Animated::new(&mut seq), 0, 2).await.unwrap();
        assert_eq!(pivot, 1);
        assert_eq!(seq.values(), vec![1, 2, 3]);
        assert!(seq.states().iter().all(|s| *s == ElementState::Inactive));
    }
}
