//! The array being sorted
//!
//! A `Sequence` owns its elements and a `Pacer`. Reads (`get`,
//! `compare_values`) never suspend and never touch state. The two mutations
//! (`swap`, `set`) come in an animated flavour that highlights the touched
//! slots and suspends for one step, and a silent flavour that only moves
//! values.
//!
//! States belong to slots, not to values: swapping exchanges values and
//! leaves each index with the state it had before the call.

use std::cmp::Ordering;

use tracing::{debug, trace};

use super::{Element, ElementState};
use crate::error::{Result, SortError};
use crate::events::{self, EventReceiver, EventSender, SequenceEvent};
use crate::timing::{CancelFlag, Pacer, Timing};

/// Ordered collection of elements, index order is the sort order
#[derive(Debug)]
pub struct Sequence {
    elements: Vec<Element>,
    capacity: u32,
    pacer: Pacer,
    events: Option<EventSender>,
}

impl Sequence {
    /// Build `1..=length` in ascending order, every element sharing
    /// `capacity = length`
    pub fn ordered(length: usize) -> Result<Self> {
        let capacity = u32::try_from(length).map_err(|_| {
            SortError::Configuration(format!("sequence length {} is too large", length))
        })?;

        let elements = (1..=capacity)
            .map(|value| Element::new(value, capacity))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            elements,
            capacity,
            pacer: Pacer::default(),
            events: None,
        })
    }

    /// Build a sequence from an existing permutation of `1..=N`
    pub fn from_values(values: &[u32]) -> Result<Self> {
        let capacity = u32::try_from(values.len()).map_err(|_| {
            SortError::Configuration(format!("sequence length {} is too large", values.len()))
        })?;

        let mut seen = vec![false; values.len()];
        for &value in values {
            let slot = (value as usize).checked_sub(1);
            match slot.and_then(|s| seen.get_mut(s)) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(SortError::Configuration(format!(
                        "values must be a permutation of 1..={}, found {}",
                        capacity, value
                    )));
                }
            }
        }

        let elements = values
            .iter()
            .map(|&value| Element::new(value, capacity))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            elements,
            capacity,
            pacer: Pacer::default(),
            events: None,
        })
    }

    /// Use `timing` for animated primitives
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.pacer.set_timing(timing);
        self
    }

    /// Guard animated primitives with `cancel`
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.pacer.set_cancel_flag(cancel);
        self
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.pacer.set_timing(timing);
    }

    pub fn set_cancel_flag(&mut self, cancel: CancelFlag) {
        self.pacer.set_cancel_flag(cancel);
    }

    /// Attach a renderer, replacing any previous one
    pub fn subscribe(&mut self) -> EventReceiver {
        let (tx, rx) = events::channel();
        self.events = Some(tx);
        rx
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Current values in index order
    pub fn values(&self) -> Vec<u32> {
        self.elements.iter().map(Element::value).collect()
    }

    /// Current states in index order
    pub fn states(&self) -> Vec<ElementState> {
        self.elements.iter().map(Element::state).collect()
    }

    pub fn is_sorted(&self) -> bool {
        self.elements.windows(2).all(|w| w[0].value() <= w[1].value())
    }

    pub fn get(&self, index: usize) -> Result<&Element> {
        self.elements.get(index).ok_or(SortError::Index {
            index,
            len: self.elements.len(),
        })
    }

    /// Compare the values at `i` and `j`
    pub fn compare_values(&self, i: usize, j: usize) -> Result<Ordering> {
        let a = self.get(i)?.value();
        let b = self.get(j)?.value();
        Ok(a.cmp(&b))
    }

    /// Exchange the values at `i` and `j`
    ///
    /// Animated: both slots show `Swapping` for one step, then get their
    /// previous state back.
    pub async fn swap(&mut self, i: usize, j: usize, animated: bool) -> Result<()> {
        if !animated {
            return self.exchange(i, j);
        }

        let a = self.get(i)?.value();
        let b = self.get(j)?.value();
        self.pacer.check()?;
        let before_i = self.elements[i].state();
        let before_j = self.elements[j].state();

        self.set_state(i, ElementState::Swapping)?;
        self.set_state(j, ElementState::Swapping)?;
        self.write_value(i, b);
        self.write_value(j, a);

        let paused = self.pacer.step().await;

        self.set_state(i, before_i)?;
        self.set_state(j, before_j)?;
        paused
    }

    /// Overwrite the value at `index`
    pub async fn set(&mut self, index: usize, value: u32, animated: bool) -> Result<()> {
        if !animated {
            return self.overwrite(index, value);
        }

        self.check_write(index, value)?;
        self.pacer.check()?;
        let before = self.elements[index].state();
        self.set_state(index, ElementState::Swapping)?;
        self.write_value(index, value);

        let paused = self.pacer.step().await;

        self.set_state(index, before)?;
        paused
    }

    /// Silent swap: exchange values, no state change, no suspension
    pub fn exchange(&mut self, i: usize, j: usize) -> Result<()> {
        let a = self.get(i)?.value();
        let b = self.get(j)?.value();
        self.write_value(i, b);
        self.write_value(j, a);
        Ok(())
    }

    /// Silent set: overwrite a value, no state change, no suspension
    pub fn overwrite(&mut self, index: usize, value: u32) -> Result<()> {
        self.check_write(index, value)?;
        self.write_value(index, value);
        Ok(())
    }

    pub fn set_state(&mut self, index: usize, state: ElementState) -> Result<()> {
        let len = self.elements.len();
        let elem = self
            .elements
            .get_mut(index)
            .ok_or(SortError::Index { index, len })?;
        if elem.state() != state {
            elem.set_state(state);
            self.emit(SequenceEvent::StateChanged { index, state });
        }
        Ok(())
    }

    /// Set a state from its renderer tag
    pub fn set_state_tag(&mut self, index: usize, tag: &str) -> Result<()> {
        let state = tag.parse::<ElementState>()?;
        self.set_state(index, state)
    }

    /// Return every element to `Inactive`
    pub fn reset_states(&mut self) {
        for elem in &mut self.elements {
            elem.set_state(ElementState::Inactive);
        }
        self.emit(SequenceEvent::StatesReset);
    }

    /// Completion animation: one long pause, then a full reset
    pub async fn finish(&mut self) -> Result<()> {
        self.pacer.finish().await?;
        self.reset_states();
        self.emit(SequenceEvent::Finished);
        debug!(len = self.len(), "Sequence finished");
        Ok(())
    }

    fn check_write(&self, index: usize, value: u32) -> Result<()> {
        self.get(index)?;
        if value == 0 || value > self.capacity {
            return Err(SortError::Configuration(format!(
                "value {} outside 1..={}",
                value, self.capacity
            )));
        }
        Ok(())
    }

    fn write_value(&mut self, index: usize, value: u32) {
        self.elements[index].set_value(value);
        trace!(index, value, "value written");
        self.emit(SequenceEvent::ValueChanged { index, value });
    }

    fn emit(&mut self, event: SequenceEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                // Renderer went away, stop producing events
                self.events = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: &[u32]) -> Sequence {
        Sequence::from_values(values)
            .unwrap()
            .with_timing(Timing::from_millis(10, 50).unwrap())
    }

    #[test]
    fn test_get_out_of_range() {
        let s = seq(&[2, 1, 3]);
        assert_eq!(s.get(2).unwrap().value(), 3);
        assert_eq!(s.get(3).unwrap_err(), SortError::Index { index: 3, len: 3 });
    }

    #[test]
    fn test_compare_values() {
        let s = seq(&[2, 1, 3]);
        assert_eq!(s.compare_values(0, 1), Ok(Ordering::Greater));
        assert_eq!(s.compare_values(1, 2), Ok(Ordering::Less));
        assert_eq!(s.compare_values(2, 2), Ok(Ordering::Equal));
        assert!(s.compare_values(0, 9).is_err());
    }

    #[test]
    fn test_from_values_rejects_non_permutation() {
        assert!(Sequence::from_values(&[1, 1, 2]).is_err());
        assert!(Sequence::from_values(&[1, 4, 2]).is_err());
        assert!(Sequence::from_values(&[0]).is_err());
        assert!(Sequence::from_values(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_ordered_shares_capacity() {
        let s = Sequence::ordered(6).unwrap();
        assert_eq!(s.values(), vec![1, 2, 3, 4, 5, 6]);
        assert!(s.iter().all(|e| e.capacity() == 6));
    }

    #[tokio::test(start_paused = true)]
    async fn test_silent_swap_leaves_states() {
        let mut s = seq(&[3, 1, 2]);
        s.set_state(0, ElementState::Done).unwrap();
        let start = tokio::time::Instant::now();

        s.swap(0, 1, false).await.unwrap();

        assert_eq!(s.values(), vec![1, 3, 2]);
        assert_eq!(s.get(0).unwrap().state(), ElementState::Done);
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_animated_swap_restores_previous_state() {
        let mut s = seq(&[3, 1, 2]);
        s.set_state(2, ElementState::Done).unwrap();
        let mut rx = s.subscribe();
        let start = tokio::time::Instant::now();

        s.swap(1, 2, true).await.unwrap();

        assert_eq!(start.elapsed(), std::time::Duration::from_millis(10));
        assert_eq!(s.values(), vec![3, 2, 1]);
        assert_eq!(
            s.states(),
            vec![ElementState::Inactive, ElementState::Inactive, ElementState::Done]
        );

        let mut seen = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            seen.push(ev);
        }
        assert_eq!(
            seen.first(),
            Some(&SequenceEvent::StateChanged {
                index: 1,
                state: ElementState::Swapping
            })
        );
        assert!(seen.contains(&SequenceEvent::ValueChanged { index: 2, value: 1 }));
        assert_eq!(
            seen.last(),
            Some(&SequenceEvent::StateChanged {
                index: 2,
                state: ElementState::Done
            })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_swap_rejects_bad_index_before_mutating() {
        let mut s = seq(&[2, 1]);
        assert_eq!(
            s.swap(0, 5, true).await,
            Err(SortError::Index { index: 5, len: 2 })
        );
        assert_eq!(s.values(), vec![2, 1]);
        assert!(s.states().iter().all(|st| *st == ElementState::Inactive));
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_animated_and_silent() {
        let mut s = seq(&[1, 2, 3]);
        s.set(0, 3, true).await.unwrap();
        assert_eq!(s.get(0).unwrap().value(), 3);
        assert_eq!(s.get(0).unwrap().state(), ElementState::Inactive);

        s.set(0, 1, false).await.unwrap();
        assert_eq!(s.values(), vec![1, 2, 3]);

        assert!(s.set(3, 1, false).await.is_err());
        assert!(s.set(0, 4, false).await.is_err());
    }

    #[test]
    fn test_state_tags() {
        let mut s = seq(&[1, 2]);
        s.set_state_tag(1, "active").unwrap();
        assert_eq!(s.get(1).unwrap().state(), ElementState::Active);
        assert_eq!(
            s.set_state_tag(1, "glowing"),
            Err(SortError::InvalidState("glowing".into()))
        );
        assert!(s.set_state_tag(2, "done").is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish_resets_states() {
        let mut s = seq(&[1, 2, 3]);
        s.set_state(0, ElementState::Done).unwrap();
        s.set_state(1, ElementState::Active).unwrap();
        let mut rx = s.subscribe();
        let start = tokio::time::Instant::now();

        s.finish().await.unwrap();

        assert_eq!(start.elapsed(), std::time::Duration::from_millis(50));
        assert!(s.states().iter().all(|st| *st == ElementState::Inactive));
        assert_eq!(rx.try_recv(), Ok(SequenceEvent::StatesReset));
        assert_eq!(rx.try_recv(), Ok(SequenceEvent::Finished));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_renderer_is_ignored() {
        let mut s = seq(&[2, 1]);
        drop(s.subscribe());
        s.swap(0, 1, true).await.unwrap();
        assert_eq!(s.values(), vec![1, 2]);
    }
}
