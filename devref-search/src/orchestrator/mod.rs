//! Search orchestrator: provider fan-out and result fusion.
//!
//! [`fanout`] queries every provider with every synthesized query and
//! absorbs failures; [`fusion`] deduplicates the concatenated candidates
//! by URL and caps the pool handed to ranking.

pub mod fanout;
pub mod fusion;

pub use fanout::{fan_out, FanOutOutcome};
pub use fusion::{fuse, DEFAULT_MAX_POOL};
