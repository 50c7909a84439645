//! Model file resolution and loading

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{self, Paths};
use crate::runtime::Provider;

use super::{AudioModel, TextModel};

fn resolve(paths: &Paths, file: &str, what: &str) -> Result<PathBuf> {
	let path = paths
		.model_file(file)
		.context(format!("{} not found. Set --models or CUE_MODELS_DIR so {} can be located", what, file))?;

	if !path.exists() {
		anyhow::bail!("{} file does not exist: {}", what, path.display());
	}
	Ok(path)
}

/// Load the sentence encoder and its tokenizer
pub fn load_text(paths: &Paths, provider: Provider) -> Result<TextModel> {
	let model_path = resolve(paths, config::TEXT_MODEL, "Text model")?;
	let tokenizer_path = resolve(paths, config::TOKENIZER, "Tokenizer")?;

	crate::ui::debug(&format!("Loading text model: {}", model_path.display()));
	let model = TextModel::load(&model_path, &tokenizer_path, provider)?;
	crate::ui::success("Text model loaded");
	Ok(model)
}

/// Load the audio embedding model
pub fn load_audio(paths: &Paths, provider: Provider) -> Result<AudioModel> {
	let model_path = resolve(paths, config::AUDIO_MODEL, "Audio model")?;

	crate::ui::debug(&format!("Loading audio model: {}", model_path.display()));
	let model = AudioModel::load(&model_path, provider)?;
	crate::ui::success("Audio model loaded");
	Ok(model)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_models_dir_is_reported() {
		let paths = Paths {
			models: None,
			indices: PathBuf::from(config::DEFAULT_INDEX_DIR),
		};
		let err = resolve(&paths, config::TEXT_MODEL, "Text model").unwrap_err();
		assert!(err.to_string().contains("CUE_MODELS_DIR"));
	}

	#[test]
	fn missing_model_file_is_reported() {
		let dir = tempfile::tempdir().unwrap();
		let paths = Paths {
			models: Some(dir.path().to_path_buf()),
			indices: PathBuf::from(config::DEFAULT_INDEX_DIR),
		};
		let err = resolve(&paths, config::AUDIO_MODEL, "Audio model").unwrap_err();
		assert!(err.to_string().contains("does not exist"));
	}
}
