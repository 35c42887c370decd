//! Heap sort over a max-heap
//!
//! The heap is built bottom-up in place, then the root (current maximum) is
//! repeatedly swapped to the end of the shrinking heap and marked done.

use std::cmp::Ordering;

use super::Primitives;
use crate::error::Result;
use crate::model::ElementState;

pub async fn sort<P: Primitives>(p: &mut P) -> Result<()> {
    let n = p.len();

    if n > 0 {
        for root in (0..=n / 2).rev() {
            sift_down(p, root, n).await?;
        }
    }

    for end in (1..n).rev() {
        p.swap(0, end).await?;
        p.mark(end, ElementState::Done)?;
        sift_down(p, 0, end).await?;
    }

    if n > 0 {
        p.mark(0, ElementState::Done)?;
    }

    p.finish().await
}

/// Restore the heap property below `root` within the first `size` slots
async fn sift_down<P: Primitives>(p: &mut P, mut root: usize, size: usize) -> Result<()> {
    loop {
        let left = 2 * root + 1;
        if left >= size {
            return Ok(());
        }

        // Larger child wins, the left one on ties
        let right = left + 1;
        let mut largest = left;
        if right < size && p.compare(right, left)? == Ordering::Greater {
            largest = right;
        }

        if p.compare(largest, root)? != Ordering::Greater {
            return Ok(());
        }

        p.mark(root, ElementState::Active)?;
        p.swap(root, largest).await?;
        p.mark(root, ElementState::Inactive)?;
        root = largest;
    }
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
    fn test_build_produces_max_heap() {
        let mut seq = Sequence::from_values(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
        let n = seq.len();
        let mut backend = Silent::new(&mut seq);
        async {
            for root in (0..=n / 2).rev() {
                sift_down(&mut backend, root, n).await?;
            }
            Ok::<_, crate::error::SortError>(())
        }
        .now_or_never()
        .unwrap()
        .unwrap();

        let values = seq.values();
        assert_eq!(values[0], 7);
        for i in 1..values.len() {
            assert!(values[(i - 1) / 2] >= values[i], "heap broken at {}", i);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_animated_two_elements() {
        let mut seq = Sequence::from_values(&[2, 1]).unwrap();
        sort(&mut Animated::new(&mut seq)).await.unwrap();
        assert_eq!(seq.values(), vec![1, 2]);
        assert!(seq.states().iter().all(|s| *s == ElementState::Inactive));
    }
}
