//! Application configuration and constants

use std::path::{Path, PathBuf};

// === Model Files ===
pub const TEXT_MODEL: &str = "text_model.onnx";
pub const TOKENIZER: &str = "tokenizer.json";
pub const AUDIO_MODEL: &str = "yamnet.onnx";

// === Model Parameters ===
pub const TEXT_EMBEDDING_DIM: usize = 384;
pub const AUDIO_EMBEDDING_DIM: usize = 1024;
pub const SAMPLE_RATE: u32 = 16_000;

// === Labels ===
pub const DEFAULT_LABELS: &[&str] = &["drums", "keys"];

// === Storage ===
pub const DEFAULT_INDEX_DIR: &str = "indexing/indices";
pub const INDEX_EXT: &str = "index";
pub const METADATA_SUFFIX: &str = "_metadata.json";
pub const PROTOTYPE_INDEX: &str = "prototype_audio_index";
pub const LINEAR_INDEX: &str = "linear_projection_index";
pub const CONTRASTIVE_INDEX: &str = "contrastive_audio_index";
pub const CONTRASTIVE_WEIGHTS: &str = "contrastive_text_projection.msgpack";

// === File Extensions ===
pub const AUDIO_EXTENSIONS: &[&str] = &["wav"];

// === Query Defaults ===
pub const DEFAULT_TOP_K: usize = 5;

/// Get models directory: explicit override, then CUE_MODELS_DIR, then a
/// `models` directory next to the executable
pub fn models_dir(custom: Option<&Path>) -> Option<PathBuf> {
	if let Some(custom) = custom {
		crate::ui::debug(&format!("Using custom model dir: {}", custom.display()));
		return Some(custom.to_path_buf());
	}

	if let Ok(env_path) = std::env::var("CUE_MODELS_DIR") {
		let path = PathBuf::from(&env_path);
		if path.is_dir() {
			crate::ui::debug(&format!("Using CUE_MODELS_DIR: {}", env_path));
			return Some(path);
		}
	}

	if let Ok(exe) = std::env::current_exe() {
		if let Some(dir) = exe.parent() {
			let models = dir.join("models");
			if models.is_dir() {
				crate::ui::debug(&format!("Found models at: {}", models.display()));
				return Some(models);
			}
		}
	}

	None
}

/// Get index directory: explicit override, then CUE_INDEX_DIR, then the
/// default relative directory
pub fn index_dir(custom: Option<&Path>) -> PathBuf {
	if let Some(custom) = custom {
		return custom.to_path_buf();
	}

	match std::env::var("CUE_INDEX_DIR") {
		Ok(env_path) if !env_path.is_empty() => PathBuf::from(env_path),
		_ => PathBuf::from(DEFAULT_INDEX_DIR),
	}
}

/// Paths resolved once at startup and handed to whoever needs them
#[derive(Debug, Clone)]
pub struct Paths {
	pub models: Option<PathBuf>,
	pub indices: PathBuf,
}

impl Paths {
	pub fn resolve(models: Option<&Path>, indices: Option<&Path>) -> Self {
		Self {
			models: models_dir(models),
			indices: index_dir(indices),
		}
	}

	pub fn model_file(&self, name: &str) -> Option<PathBuf> {
		self.models.as_ref().map(|d| d.join(name))
	}
}
