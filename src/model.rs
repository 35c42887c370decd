//! Observable array model
//!
//! `Element` is one visualised slot, `Sequence` owns the ordered elements and
//! exposes the indexed reads and timed mutations the algorithms work with.

pub mod element;
pub mod sequence;
pub mod state;

pub use element::{DEFAULT_BAR_UNIT, Element};
pub use sequence::Sequence;
pub use state::ElementState;
