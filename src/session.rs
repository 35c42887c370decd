//! Caller-owned visualizer session
//!
//! Holds the active sequence and the active algorithm so that controllers
//! pass one explicit object around instead of sharing process-wide state.
//! A session runs one sort at a time, `&mut self` on every run enforces it.

use tracing::{debug, info};

use crate::algorithms::{Algorithm, SortReport};
use crate::error::{Result, SortError};
use crate::events::EventReceiver;
use crate::model::Sequence;
use crate::settings::Settings;
use crate::shuffle;
use crate::timing::CancelFlag;

pub struct Session {
    settings: Settings,
    active_sequence: Option<Sequence>,
    active_algorithm: Algorithm,
    cancel: CancelFlag,
}

impl Session {
    /// Create a session, nothing is built until `refresh`
    pub fn new(settings: Settings) -> Self {
        Self {
            active_algorithm: settings.algorithm,
            settings,
            active_sequence: None,
            cancel: CancelFlag::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn active_algorithm(&self) -> Algorithm {
        self.active_algorithm
    }

    pub fn active_sequence(&self) -> Option<&Sequence> {
        self.active_sequence.as_ref()
    }

    /// Handle a controller can use to stop the running sort
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Select the algorithm for the next run by name
    pub fn select(&mut self, name: &str) -> Result<Algorithm> {
        let algorithm = name.parse::<Algorithm>()?;
        if algorithm != self.active_algorithm {
            debug!(from = %self.active_algorithm, to = %algorithm, "Algorithm selected");
        }
        self.active_algorithm = algorithm;
        Ok(algorithm)
    }

    /// Discard the current sequence and build a fresh shuffled one
    ///
    /// `size` is clamped to the configured bounds, like the size input of the
    /// controller.
    pub fn refresh(&mut self, size: usize) -> Result<&Sequence> {
        let size = self.settings.array.clamp_size(size);
        let timing = self.settings.animation.timing()?;
        let mode = self.settings.array.shuffle_mode;

        let seq = match self.settings.array.seed {
            Some(seed) => shuffle::build_seeded(size, mode, seed)?,
            None => shuffle::build_with(size, mode, &mut rand::rng())?,
        };

        self.cancel.reset();
        info!(size, ?mode, "Sequence refreshed");
        let seq = seq.with_timing(timing).with_cancel_flag(self.cancel.clone());
        let seq: &Sequence = self.active_sequence.insert(seq);
        Ok(seq)
    }

    /// Attach a renderer to the active sequence
    pub fn subscribe(&mut self) -> Result<EventReceiver> {
        self.active_sequence
            .as_mut()
            .map(Sequence::subscribe)
            .ok_or(SortError::NoSequence)
    }

    /// Animate the active algorithm over the active sequence
    pub async fn run_animated(&mut self) -> Result<SortReport> {
        let algorithm = self.active_algorithm;
        let seq = self.active_sequence.as_mut().ok_or(SortError::NoSequence)?;
        algorithm.animate(seq).await
    }

    /// Sort the active sequence immediately
    pub fn run_silent(&mut self) -> Result<SortReport> {
        let algorithm = self.active_algorithm;
        let seq = self.active_sequence.as_mut().ok_or(SortError::NoSequence)?;
        algorithm.sort_silently(seq)
    }
}
