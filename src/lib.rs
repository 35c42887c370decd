//! Sortle - an animated sorting engine
//!
//! Steps classic comparison sorts over an observable array so a renderer can
//! show every compare, swap and write as it happens.
//!
//! ```no_run
//! # async fn demo() -> sortle::Result<()> {
//! let mut seq = sortle::shuffle::build(32)?;
//! let events = seq.subscribe();
//! sortle::run_animated("heap", &mut seq).await?;
//! # drop(events);
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod error;
pub mod events;
pub mod model;
pub mod session;
pub mod settings;
pub mod shuffle;
pub mod timing;

pub use algorithms::{Algorithm, SortReport, SortStats, run_animated, run_silent};
pub use error::{Result, SortError};
pub use events::SequenceEvent;
pub use model::{Element, ElementState, Sequence};
pub use session::Session;
pub use settings::Settings;
pub use timing::{CancelFlag, Timing};

/// Build a shuffled sequence of `1..=size`
pub fn build_sequence(size: usize) -> Result<Sequence> {
    shuffle::build(size)
}
