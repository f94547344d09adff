//! devref: learn while you fix.
//!
//! Turns a free-text review comment into a short list of learning
//! resources:
//!
//! ```text
//! comment + tags → topic extraction → query synthesis → providers (fan-out)
//!               → fusion → ranking → [{title, url, source}]
//! ```
//!
//! # Architecture
//!
//! - **nlp**: dictionary-driven topic/intent extraction and query templates
//! - **devref-search**: internal fixtures, Google and YouTube providers,
//!   concurrent fan-out and URL-based fusion
//! - **rerank**: lexical overlap, or sentence embeddings via ONNX Runtime
//!   when the `semantic` feature is on and the model loads
//! - **recommender**: the per-request pipeline, which never fails
//! - **server**: axum HTTP surface (`POST /process-comment`, `GET /health`)

pub mod config;
pub mod error;
pub mod nlp;
pub mod recommender;
pub mod request;
pub mod rerank;
pub mod server;

pub use config::DevrefConfig;
pub use error::{DevrefError, Result};
pub use recommender::{QueryPlan, Recommender};
pub use request::{RecommendRequest, RecommendResponse, Recommendation, RequestSettings};
pub use rerank::{LexicalRanker, Ranker, ScoredCandidate};
pub use server::Server;
