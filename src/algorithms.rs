//! Sorting algorithm library
//!
//! Every algorithm is implemented once against `Primitives` and runs in two
//! flavours:
//! - `Algorithm::animate` - animated backend, suspends on every swap/write and
//!   ends with the completion pause and a state reset
//! - `Algorithm::sort_silently` - silent backend, completes synchronously
//!
//! Both flavours perform the same sequence of value moves.

pub mod bubble;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod primitives;
pub mod quick;

use std::str::FromStr;
use std::time::Duration;

use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::error::{Result, SortError};
use crate::model::Sequence;

pub use primitives::{Animated, Primitives, Silent, SortStats};

/// Classic sorts this build recognises but deliberately does not ship
const NOT_SHIPPED: &[&str] = &["selection", "shell", "counting", "radix", "bogo"];

/// Available sorting algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Bubble,
    Insertion,
    Merge,
    Heap,
    Quick,
}

impl Algorithm {
    /// Get all algorithms
    pub fn all() -> &'static [Algorithm] {
        &[
            Algorithm::Bubble,
            Algorithm::Insertion,
            Algorithm::Merge,
            Algorithm::Heap,
            Algorithm::Quick,
        ]
    }

    /// Name accepted by `FromStr`
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Quick => "quick",
        }
    }

    /// Get display name for the algorithm
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Quick => "Quick Sort",
        }
    }

    /// Run this algorithm over any primitives backend
    pub async fn run<P: Primitives>(self, p: &mut P) -> Result<()> {
        match self {
            Algorithm::Bubble => bubble::sort(p).await,
            Algorithm::Insertion => insertion::sort(p).await,
            Algorithm::Merge => merge::sort(p).await,
            Algorithm::Heap => heap::sort(p).await,
            Algorithm::Quick => quick::sort(p).await,
        }
    }

    /// Sort with animation, completing once the completion pause has run
    pub async fn animate(self, seq: &mut Sequence) -> Result<SortReport> {
        info!(algorithm = %self, len = seq.len(), "Starting animated sort");
        let start = Instant::now();

        let mut backend = Animated::new(seq);
        let outcome = self.run(&mut backend).await;
        let stats = backend.stats();

        if let Err(e) = &outcome {
            warn!(algorithm = %self, ?stats, "Animated sort aborted: {}", e);
        }
        outcome?;

        let report = SortReport {
            algorithm: self,
            stats,
            elapsed: start.elapsed(),
        };
        info!(algorithm = %self, stats = ?report.stats, elapsed = ?report.elapsed, "Animated sort finished");
        Ok(report)
    }

    /// Sort immediately, without suspending or touching element states
    pub fn sort_silently(self, seq: &mut Sequence) -> Result<SortReport> {
        let start = Instant::now();

        let mut backend = Silent::new(seq);
        complete_now(self.run(&mut backend))?;

        let report = SortReport {
            algorithm: self,
            stats: backend.stats(),
            elapsed: start.elapsed(),
        };
        tracing::debug!(algorithm = %self, stats = ?report.stats, "Silent sort finished");
        Ok(report)
    }
}

/// Poll a run once, a backend that suspends is a configuration fault
fn complete_now<F: Future<Output = Result<()>>>(run: F) -> Result<()> {
    run.now_or_never().unwrap_or_else(|| {
        Err(SortError::Configuration(
            "silent run suspended, use an animated run for paced sorting".to_string(),
        ))
    })
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();

        if let Some(algorithm) = Algorithm::all().iter().find(|a| a.name() == name) {
            return Ok(*algorithm);
        }
        if NOT_SHIPPED.contains(&name.as_str()) {
            return Err(SortError::NotImplemented(name));
        }
        Err(SortError::UnknownAlgorithm(s.to_string()))
    }
}

/// Outcome of one completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortReport {
    pub algorithm: Algorithm,
    pub stats: SortStats,
    /// Wall time, including every animated pause
    pub elapsed: Duration,
}

/// Animate the algorithm named `name` over `seq`
pub async fn run_animated(name: &str, seq: &mut Sequence) -> Result<SortReport> {
    let algorithm = name.parse::<Algorithm>()?;
    algorithm.animate(seq).await
}

/// Sort `seq` with the algorithm named `name`, without animation
pub fn run_silent(name: &str, seq: &mut Sequence) -> Result<SortReport> {
    let algorithm = name.parse::<Algorithm>()?;
    algorithm.sort_silently(seq)
}
