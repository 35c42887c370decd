//! Insertion sort

use std::cmp::Ordering;

use super::Primitives;
use crate::error::Result;
use crate::model::ElementState;

/// Grow a sorted prefix one slot at a time, walking each new value left while
/// its left neighbour is strictly larger
pub async fn sort<P: Primitives>(p: &mut P) -> Result<()> {
    let n = p.len();
    if n > 0 {
        p.mark(0, ElementState::Done)?;
    }

    for i in 1..n {
        p.mark(i, ElementState::Done)?;

        let mut j = i;
        while j > 0 && p.compare(j - 1, j)? == Ordering::Greater {
            p.swap(j - 1, j).await?;
            j -= 1;
        }
    }

    p.finish().await
}
