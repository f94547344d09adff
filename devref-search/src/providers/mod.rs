//! Source provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::SearchProvider`].

pub mod google;
pub mod internal;
pub mod youtube;

pub use google::GoogleProvider;
pub use internal::{InternalProvider, SeedEntry, SeedTopic};
pub use youtube::YouTubeProvider;
