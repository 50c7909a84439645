//! Build command - index an embedding batch for one strategy

use anyhow::{Context as _, Result};
use std::path::Path;
use std::time::Instant;

use crate::retrieval::Strategy;
use crate::storage::EmbeddingBatch;
use crate::ui;

use super::Context;

pub fn run(ctx: &Context, mode: Strategy, embeddings: &Path, name: Option<&str>) -> Result<()> {
	let start = Instant::now();
	let name = name.unwrap_or(mode.index_name());

	ui::info(&format!("Building {} index from {}", mode, embeddings.display()));

	let batch = EmbeddingBatch::load(embeddings)?;
	if batch.is_empty() {
		ui::warn("Embedding batch is empty, building an empty index");
	}

	let index = batch.into_index(&ctx.labels).context("Failed to build index")?;
	index
		.persist(&ctx.paths.indices, name)
		.with_context(|| format!("Failed to write index to {}", ctx.paths.indices.display()))?;

	for label in ctx.labels.iter() {
		let count = index.records().iter().filter(|r| r.class == label).count();
		ui::debug(&format!("{}: {} samples", label, count));
	}

	ui::success(&format!(
		"Index '{}' built: {} vectors, dim {} ({}ms)",
		name,
		index.len(),
		index.dim(),
		start.elapsed().as_millis()
	));
	Ok(())
}
