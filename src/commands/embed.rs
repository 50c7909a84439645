//! Embed command - turn labeled WAV samples into an embedding batch

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

use crate::config::AUDIO_EXTENSIONS;
use crate::models::{self, AudioEncoder};
use crate::storage::EmbeddingBatch;
use crate::ui;

use super::Context;

/// Audio files directly inside `dir`, sorted by name
pub fn collect_samples(dir: &Path) -> Vec<PathBuf> {
	let mut files: Vec<PathBuf> = WalkDir::new(dir)
		.min_depth(1)
		.max_depth(1)
		.into_iter()
		.filter_map(|e| e.ok())
		.filter(|e| e.file_type().is_file())
		.map(|e| e.into_path())
		.filter(|p| {
			p.extension()
				.and_then(|e| e.to_str())
				.is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|a| a.eq_ignore_ascii_case(ext)))
		})
		.collect();
	files.sort();
	files
}

/// Embed every class directory into one batch; failures are counted, not fatal
pub fn embed_classes(encoder: &dyn AudioEncoder, ctx: &Context, dir: &Path) -> Result<(EmbeddingBatch, usize)> {
	let mut batch = EmbeddingBatch::new();
	let mut errors = 0;

	for class in ctx.labels.iter() {
		let class_dir = dir.join(class);
		let files = collect_samples(&class_dir);
		if files.is_empty() {
			ui::warn(&format!("No samples found in {}", class_dir.display()));
			continue;
		}
		ui::info(&format!("Embedding {} {} samples", files.len(), class));

		for path in files {
			let start = Instant::now();
			let filename = path
				.file_name()
				.and_then(|n| n.to_str())
				.unwrap_or_default()
				.to_string();

			match encoder.embed_audio(&path) {
				Ok(embedding) => {
					batch.push(filename, class, embedding.into_vec())?;
					if ui::Log::is_verbose() {
						ui::file_processed(&path, class, start.elapsed().as_millis());
					}
				}
				Err(e) => {
					ui::error(&format!("Encode failed for {}: {:#}", filename, e));
					errors += 1;
				}
			}
		}
	}

	Ok((batch, errors))
}

pub fn run(ctx: &Context, dir: &Path, output: &Path) -> Result<()> {
	let start = Instant::now();
	ui::info(&format!("Scanning: {}", dir.display()));

	let model = models::load_audio(&ctx.paths, ctx.provider)?;
	let (batch, errors) = embed_classes(&model, ctx, dir)?;

	if batch.is_empty() {
		anyhow::bail!("No samples were embedded from {}", dir.display());
	}

	batch
		.save(output)
		.with_context(|| format!("Failed to save {}", output.display()))?;

	println!();
	ui::success(&format!(
		"Embedded {} samples (dim {}) in {:.1}s -> {}",
		batch.len(),
		batch.dim(),
		start.elapsed().as_secs_f32(),
		output.display()
	));
	if errors > 0 {
		ui::warn(&format!("{} errors", errors));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::Paths;
	use crate::core::{Embedding, LabelSet};
	use crate::runtime::Provider;
	use std::fs;

	struct NameLength;

	impl AudioEncoder for NameLength {
		fn embed_audio(&self, path: &Path) -> Result<Embedding> {
			let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
			if name.starts_with("broken") {
				anyhow::bail!("malformed audio");
			}
			Ok(Embedding::new(vec![name.len() as f32, 1.0]))
		}
	}

	fn context() -> Context {
		Context {
			paths: Paths {
				models: None,
				indices: PathBuf::from("indices"),
			},
			provider: Provider::Cpu,
			labels: LabelSet::default(),
		}
	}

	#[test]
	fn collects_sorted_wavs_only() {
		let dir = tempfile::tempdir().unwrap();
		for name in ["b.wav", "a.WAV", "notes.txt"] {
			fs::write(dir.path().join(name), b"").unwrap();
		}
		let names: Vec<_> = collect_samples(dir.path())
			.iter()
			.map(|p| p.file_name().unwrap().to_string_lossy().to_string())
			.collect();
		assert_eq!(names, vec!["a.WAV", "b.wav"]);
	}

	#[test]
	fn embeds_each_class_and_counts_failures() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("drums")).unwrap();
		fs::create_dir_all(dir.path().join("keys")).unwrap();
		fs::write(dir.path().join("drums/drums_01.wav"), b"").unwrap();
		fs::write(dir.path().join("drums/broken.wav"), b"").unwrap();
		fs::write(dir.path().join("keys/keys_01.wav"), b"").unwrap();

		let (batch, errors) = embed_classes(&NameLength, &context(), dir.path()).unwrap();
		assert_eq!(batch.len(), 2);
		assert_eq!(errors, 1);

		let index = batch.into_index(&LabelSet::default()).unwrap();
		assert_eq!(index.record(0).unwrap().class, "drums");
		assert_eq!(index.record(1).unwrap().filename, "keys_01.wav");
	}
}
