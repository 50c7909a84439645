//! # Embedding Providers
//!
//! ONNX-backed text and audio encoders behind two small traits, so the
//! alignment code never depends on a concrete model.

pub mod audio;
pub mod manager;
pub mod text;

use anyhow::Result;
use std::path::Path;

use crate::core::Embedding;

pub use audio::AudioModel;
pub use manager::{load_audio, load_text};
pub use text::TextModel;

/// Text side of the embedding provider.
///
/// Must be deterministic for a fixed input and model version.
pub trait TextEncoder {
	fn embed_text(&self, text: &str) -> Result<Embedding>;
}

/// Audio side of the embedding provider.
pub trait AudioEncoder {
	fn embed_audio(&self, path: &Path) -> Result<Embedding>;
}
