//! Top-down merge sort
//!
//! Splits `[l, r]` at the midpoint, sorts both halves and writes the merged
//! run back with `set`. The left half wins ties. Slots written by the
//! outermost merge hold their final values and are marked done as they land.

use std::cmp::Ordering;

use super::Primitives;
use crate::error::Result;
use crate::model::ElementState;

pub async fn sort<P: Primitives>(p: &mut P) -> Result<()> {
    let n = p.len();
    if n > 1 {
        sort_range(p, 0, n - 1, n).await?;
    }
    p.finish().await
}

async fn sort_range<P: Primitives>(p: &mut P, l: usize, r: usize, n: usize) -> Result<()> {
    if l >= r {
        return Ok(());
    }

    let m = l + (r - l) / 2;
    Box::pin(sort_range(p, l, m, n)).await?;
    Box::pin(sort_range(p, m + 1, r, n)).await?;

    let outermost = l == 0 && r == n - 1;
    merge(p, l, m, r, outermost).await
}

/// Merge the sorted runs `[l, m]` and `[m + 1, r]`
async fn merge<P: Primitives>(
    p: &mut P,
    l: usize,
    m: usize,
    r: usize,
    mark_done: bool,
) -> Result<()> {
    let left = (l..=m).map(|i| p.value(i)).collect::<Result<Vec<_>>>()?;
    let right = (m + 1..=r).map(|i| p.value(i)).collect::<Result<Vec<_>>>()?;

    let (mut i, mut j) = (0, 0);
    let mut k = l;

    while i < left.len() || j < right.len() {
        let take_right = if i == left.len() {
            true
        } else if j == right.len() {
            false
        } else {
            p.compare_values(right[j], left[i]) == Ordering::Less
        };

        let value = if take_right {
            j += 1;
            right[j - 1]
        } else {
            i += 1;
            left[i - 1]
        };

        if let Err(e) = p.set(k, value).await {
            // Interrupted with the rest of the run still buffered
            let rest = std::iter::once(value)
                .chain(left[i..].iter().copied())
                .chain(right[j..].iter().copied());
            for (slot, v) in (k..).zip(rest) {
                p.restore(slot, v)?;
            }
            return Err(e);
        }
        if mark_done {
            p.mark(k, ElementState::Done)?;
        }
        k += 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Animated, Silent};
    use crate::error::SortError;
    use crate::events::SequenceEvent;
    use crate::model::Sequence;
    use crate::timing::CancelFlag;
    use futures_util::FutureExt;
    use std::time::Duration;

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
    fn test_odd_and_even_lengths() {
        for values in [vec![2, 1], vec![3, 1, 2], vec![6, 2, 5, 1, 4, 3, 7]] {
            let mut seq = Sequence::from_values(&values).unwrap();
            sort(&mut Silent::new(&mut seq))
                .now_or_never()
                .unwrap()
                .unwrap();
            assert!(seq.is_sorted(), "failed on {:?}", values);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_outermost_merge_marks_done_in_order() {
        let mut seq = Sequence::from_values(&[4, 2, 3, 1]).unwrap();
        let mut rx = seq.subscribe();
        sort(&mut Animated::new(&mut seq)).await.unwrap();

        let done: Vec<usize> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|ev| match ev {
                SequenceEvent::StateChanged {
                    index,
                    state: ElementState::Done,
                } => Some(index),
                _ => None,
            })
            .collect();
        assert_eq!(done, vec![0, 1, 2, 3]);
        assert_eq!(seq.values(), vec![1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_merge_writes_back_buffered_values() {
        let cancel = CancelFlag::new();
        let mut seq = Sequence::from_values(&[4, 2, 3, 1])
            .unwrap()
            .with_cancel_flag(cancel.clone());

        // Third write (value 1 into slot 2) lands at 80ms, its pause ends at 120ms
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(85)).await;
            cancel.cancel();
        });

        let outcome = sort(&mut Animated::new(&mut seq)).await;
        canceller.await.unwrap();

        assert_eq!(outcome, Err(SortError::Cancelled));
        assert_eq!(seq.values(), vec![2, 4, 1, 3]);
    }
}
