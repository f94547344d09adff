//! MiniLM sentence vectors on ONNX Runtime.
//!
//! The first load pulls `sentence-transformers/all-MiniLM-L6-v2` through
//! `hf-hub`, which keeps the files in its cache for later runs. Each call
//! tokenizes a padded batch, runs the model once and mean-pools the token
//! states under the attention mask before normalising to unit length.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ort::session::{Session, SessionInputValue, SessionInputs};
use ort::value::Tensor;
use tokenizers::{Encoding, Tokenizer, TruncationParams};
use tracing::{debug, info};

use crate::error::{DevrefError, Result};

const HUB_REPO: &str = "sentence-transformers/all-MiniLM-L6-v2";
const ONNX_PATH: &str = "onnx/model.onnx";
const TOKENIZER_PATH: &str = "tokenizer.json";

/// Width of every vector the engine returns.
pub const EMBEDDING_DIM: usize = 384;

/// Review comments and snippets are short; anything longer is cut here.
const TOKEN_LIMIT: usize = 256;

fn load_err(what: &str, e: impl std::fmt::Display) -> DevrefError {
    DevrefError::Model(format!("{what}: {e}"))
}

fn infer_err(what: &str, e: impl std::fmt::Display) -> DevrefError {
    DevrefError::Rerank(format!("{what}: {e}"))
}

/// Local paths of the model and its tokenizer.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub onnx: PathBuf,
    pub tokenizer: PathBuf,
}

impl ModelFiles {
    /// Resolve both files through the hub cache, downloading on a miss.
    pub fn fetch() -> Result<Self> {
        info!(repo = HUB_REPO, "resolving embedding model");
        let api = hf_hub::api::sync::Api::new()
            .map_err(|e| load_err("hub client", e))?;
        let repo = api.model(HUB_REPO.to_owned());
        let get = |file: &str| {
            repo.get(file)
                .map_err(|e| load_err(&format!("fetching {file}"), e))
        };
        Ok(Self {
            onnx: get(ONNX_PATH)?,
            tokenizer: get(TOKENIZER_PATH)?,
        })
    }
}

/// MiniLM encoder. Inference takes `&mut self`, so callers that share one
/// engine keep it behind a lock.
pub struct EmbeddingEngine {
    session: Session,
    tokenizer: Tokenizer,
}

impl std::fmt::Debug for EmbeddingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingEngine")
            .field("repo", &HUB_REPO)
            .field("dim", &EMBEDDING_DIM)
            .finish_non_exhaustive()
    }
}

impl EmbeddingEngine {
    /// Build an engine from files that are already on disk.
    pub fn new(onnx: &Path, tokenizer: &Path) -> Result<Self> {
        debug!(path = %onnx.display(), "opening ONNX session");
        let session = Session::builder()
            .and_then(|builder| builder.with_intra_threads(2))
            .and_then(|builder| builder.commit_from_file(onnx))
            .map_err(|e| load_err("ONNX session", e))?;

        let mut tok = Tokenizer::from_file(tokenizer)
            .map_err(|e| load_err("tokenizer", e))?;
        tok.with_truncation(Some(TruncationParams {
            max_length: TOKEN_LIMIT,
            ..TruncationParams::default()
        }))
        .map_err(|e| load_err("tokenizer truncation", e))?;
        // `TokenBatch` pads.
        tok.with_padding(None);

        info!(dim = EMBEDDING_DIM, "embedding model loaded");
        Ok(Self {
            session,
            tokenizer: tok,
        })
    }

    /// [`ModelFiles::fetch`] followed by [`EmbeddingEngine::new`].
    pub fn download_and_load() -> Result<Self> {
        let files = ModelFiles::fetch()?;
        Self::new(&files.onnx, &files.tokenizer)
    }

    /// Unit vector for a single text.
    pub fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed_batch(&[text])?;
        vectors
            .pop()
            .ok_or_else(|| DevrefError::Rerank("model returned an empty batch".into()))
    }

    /// Unit vectors for `texts`, in input order, from one model run.
    pub fn embed_batch(&mut self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut encodings = Vec::with_capacity(texts.len());
        for text in texts {
            let encoding = self
                .tokenizer
                .encode(*text, true)
                .map_err(|e| infer_err("tokenize", e))?;
            encodings.push(encoding);
        }
        let batch = TokenBatch::from_encodings(&encodings);

        let outputs = self
            .session
            .run(SessionInputs::from(batch.inputs()?))
            .map_err(|e| infer_err("inference", e))?;
        // Hidden states, shape [rows, width, EMBEDDING_DIM].
        let (_, hidden) = outputs[0_usize]
            .try_extract_tensor::<f32>()
            .map_err(|e| infer_err("reading model output", e))?;

        let per_row = batch.width * EMBEDDING_DIM;
        if hidden.len() < batch.rows * per_row {
            return Err(DevrefError::Rerank(format!(
                "model output has {} values, batch {}x{} needs {}",
                hidden.len(),
                batch.rows,
                batch.width,
                batch.rows * per_row
            )));
        }

        let vectors = hidden
            .chunks_exact(per_row)
            .take(batch.rows)
            .enumerate()
            .map(|(row, states)| unit(mean_pool(states, batch.mask_row(row), EMBEDDING_DIM)))
            .collect();
        Ok(vectors)
    }
}

/// Row-major `[rows, width]` model inputs, zero padded on the right.
struct TokenBatch {
    rows: usize,
    width: usize,
    ids: Vec<i64>,
    mask: Vec<i64>,
    types: Vec<i64>,
}

impl TokenBatch {
    fn from_encodings(encodings: &[Encoding]) -> Self {
        let rows = encodings.len();
        let width = encodings.iter().map(|e| e.len()).max().unwrap_or(0);
        let mut batch = Self {
            rows,
            width,
            ids: vec![0; rows * width],
            mask: vec![0; rows * width],
            types: vec![0; rows * width],
        };
        for (row, encoding) in encodings.iter().enumerate() {
            let start = row * width;
            let n = encoding.len();
            copy_widened(&mut batch.ids[start..start + n], encoding.get_ids());
            copy_widened(&mut batch.mask[start..start + n], encoding.get_attention_mask());
            copy_widened(&mut batch.types[start..start + n], encoding.get_type_ids());
        }
        batch
    }

    fn mask_row(&self, row: usize) -> &[i64] {
        let start = row * self.width;
        &self.mask[start..start + self.width]
    }

    fn inputs(&self) -> Result<HashMap<String, SessionInputValue<'static>>> {
        let shape = [self.rows, self.width];
        let mut named = HashMap::with_capacity(3);
        for (name, data) in [
            ("input_ids", &self.ids),
            ("attention_mask", &self.mask),
            ("token_type_ids", &self.types),
        ] {
            let tensor = Tensor::from_array((shape, data.clone()))
                .map_err(|e| infer_err(name, e))?;
            named.insert(name.to_owned(), tensor.into());
        }
        Ok(named)
    }
}

fn copy_widened(dst: &mut [i64], src: &[u32]) {
    for (d, &s) in dst.iter_mut().zip(src) {
        *d = i64::from(s);
    }
}

/// Mean of the `dim`-wide token rows in `states` whose mask is set.
fn mean_pool(states: &[f32], mask: &[i64], dim: usize) -> Vec<f32> {
    let mut sum = vec![0.0f32; dim];
    let mut kept = 0usize;
    let live = states
        .chunks_exact(dim)
        .zip(mask)
        .filter_map(|(row, &m)| (m != 0).then_some(row));
    for row in live {
        sum.iter_mut().zip(row).for_each(|(acc, v)| *acc += v);
        kept += 1;
    }
    if kept > 0 {
        let n = kept as f32;
        sum.iter_mut().for_each(|acc| *acc /= n);
    }
    sum
}

fn magnitude(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale to length one. Near-zero vectors are returned as they are.
fn unit(v: Vec<f32>) -> Vec<f32> {
    let len = magnitude(&v);
    if len < 1e-12 {
        v
    } else {
        v.into_iter().map(|x| x / len).collect()
    }
}

/// Cosine of the angle between `a` and `b`, clamped to `[-1, 1]`.
/// Zero when either side has no length.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    let lengths = magnitude(a) * magnitude(b);
    if lengths < 1e-12 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    (dot / lengths).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn unit_scales_to_length_one() {
        let v = unit(vec![3.0, 4.0]);
        assert!(close(v[0], 0.6) && close(v[1], 0.8), "{v:?}");
        assert_eq!(unit(vec![0.0; 3]), vec![0.0; 3]);
    }

    #[test]
    fn pooling_ignores_masked_tokens() {
        // Three tokens of width two; the third is padding.
        let states = [1.0, 2.0, 3.0, 4.0, 99.0, 99.0];
        assert_eq!(mean_pool(&states, &[1, 1, 0], 2), vec![2.0, 3.0]);
        assert_eq!(mean_pool(&states[..4], &[0, 0], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn cosine_covers_same_orthogonal_opposite_and_zero() {
        let x = [1.0, 0.0];
        assert!(close(cosine_similarity(&x, &x), 1.0));
        assert!(close(cosine_similarity(&x, &[0.0, 1.0]), 0.0));
        assert!(close(cosine_similarity(&x, &[-2.0, 0.0]), -1.0));
        assert_eq!(cosine_similarity(&x, &[0.0, 0.0]), 0.0);
    }

    fn engine() -> EmbeddingEngine {
        EmbeddingEngine::download_and_load().expect("model available")
    }

    #[test]
    #[ignore] // downloads ~23 MB
    fn vectors_are_unit_length_and_full_width() {
        let v = engine().embed("jetpack compose state hoisting").expect("embed");
        assert_eq!(v.len(), EMBEDDING_DIM);
        assert!((magnitude(&v) - 1.0).abs() < 1e-4);
    }

    #[test]
    #[ignore] // downloads ~23 MB
    fn related_pair_beats_unrelated() {
        let vs = engine()
            .embed_batch(&[
                "migrate from xml layouts to jetpack compose",
                "Migrating views to Compose. Step by step interop guide",
                "Banana bread recipe with walnuts",
            ])
            .expect("batch");
        assert!(cosine_similarity(&vs[0], &vs[1]) > cosine_similarity(&vs[0], &vs[2]));
    }

    #[test]
    #[ignore] // downloads ~23 MB
    fn padding_does_not_change_vectors() {
        let mut engine = engine();
        let texts = ["kotlin coroutines", "room database migrations tutorial"];
        let batched = engine.embed_batch(&texts).expect("batch");
        let alone = engine.embed(texts[0]).expect("single");
        assert!(cosine_similarity(&batched[0], &alone) > 0.99);
    }
}
