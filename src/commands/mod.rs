//! # Command Implementations
//!
//! Each submodule handles one CLI command (embed, build, query, evaluate).

pub mod build;
pub mod embed;
pub mod evaluate;
pub mod query;

use anyhow::{Context as _, Result};

use crate::alignment::{AffineMap, ContrastiveProjection, LinearProjection, PrototypeAlignment};
use crate::cli::WeightArgs;
use crate::config::{Paths, CONTRASTIVE_WEIGHTS};
use crate::core::LabelSet;
use crate::models::TextEncoder;
use crate::retrieval::{RetrievalService, Strategy};
use crate::runtime::Provider;
use crate::storage::SimilarityIndex;

/// Everything resolved once at startup and shared by the commands
pub struct Context {
	pub paths: Paths,
	pub provider: Provider,
	pub labels: LabelSet,
}

/// Load the persisted index for `strategy`
pub fn load_index(ctx: &Context, strategy: Strategy, name: Option<&str>) -> Result<SimilarityIndex> {
	let name = name.unwrap_or(strategy.index_name());
	let index = SimilarityIndex::load(&ctx.paths.indices, name)
		.with_context(|| format!("Run 'cue build {}' first", strategy))?;
	crate::ui::debug(&format!("Index '{}': {} samples, dim {}", name, index.len(), index.dim()));
	Ok(index)
}

/// Construct the concrete strategy behind a retrieval service
pub fn service<'a>(
	ctx: &Context,
	strategy: Strategy,
	encoder: &'a dyn TextEncoder,
	index: &'a SimilarityIndex,
	weights: &WeightArgs,
) -> Result<RetrievalService<'a>> {
	let service = match strategy {
		Strategy::Prototype => RetrievalService::new(PrototypeAlignment::new(encoder, index, &ctx.labels)?),
		Strategy::Projection => {
			let map = weights
				.linear
				.as_deref()
				.map(AffineMap::load)
				.transpose()
				.context("Failed to load linear projection weights")?;
			RetrievalService::new(LinearProjection::new(encoder, index, map)?)
		}
		Strategy::Contrastive => {
			let path = weights
				.contrastive
				.clone()
				.unwrap_or_else(|| ctx.paths.indices.join(CONTRASTIVE_WEIGHTS));
			let map = AffineMap::load(&path)
				.with_context(|| format!("Failed to load contrastive weights from {}", path.display()))?;
			RetrievalService::new(ContrastiveProjection::new(encoder, index, map)?)
		}
	};
	Ok(service)
}
