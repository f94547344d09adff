//! Comment understanding: what a comment is about and what to search for.
//!
//! [`extract`] maps free text onto canonical topics, stack keywords and
//! intent labels using the static tables in [`dictionary`]. [`synthesize`]
//! expands topics and intents into search queries.

pub mod dictionary;
pub mod extract;
pub mod queries;

pub use extract::{extract, normalize, ExtractionResult};
pub use queries::synthesize;
