//! Evaluate command - confusion matrices per strategy

use anyhow::{Context as _, Result};
use colored::*;
use std::path::Path;

use crate::cli::WeightArgs;
use crate::core::EvalQuery;
use crate::evaluation::{self, ConfusionMatrix, Evaluator};
use crate::models;
use crate::retrieval::Selection;
use crate::ui;

use super::Context;

pub fn run(
	ctx: &Context,
	modes: &[Selection],
	top_k: usize,
	queries: Option<&Path>,
	quick: bool,
	weights: &WeightArgs,
) -> Result<()> {
	let queries: Vec<EvalQuery> = match queries {
		Some(path) => evaluation::load_queries(path)?,
		None if quick => evaluation::quick_queries(),
		None => evaluation::benchmark_queries(),
	};
	let modes = Selection::expand(modes);

	ui::info(&format!(
		"Evaluating {} strategies on {} queries (top-{})",
		modes.len(),
		queries.len(),
		top_k
	));

	let encoder = models::load_text(&ctx.paths, ctx.provider)?;
	let evaluator = Evaluator::new(ctx.labels.clone()).with_top_k(top_k);

	let mut summary = Vec::with_capacity(modes.len());
	for mode in modes {
		let index = super::load_index(ctx, mode, None)?;
		let service = super::service(ctx, mode, &encoder, &index, weights)?;

		let matrix = evaluator
			.evaluate_service(&service, &queries)
			.with_context(|| format!("Evaluation of {} failed", service.name()))?;

		print_matrix(service.name(), &matrix);
		summary.push((service.name().to_string(), matrix.accuracy()));
	}

	if summary.len() > 1 {
		ui::header("Accuracy");
		for (name, accuracy) in summary {
			println!("  {:<36} {}", name, format!("{:.1}%", accuracy * 100.0).bright_white());
		}
		println!();
	}
	Ok(())
}

fn print_matrix(name: &str, matrix: &ConfusionMatrix) {
	let rule = "=".repeat(55);
	println!();
	println!("{}", rule.bright_blue());
	println!("{}", format!("{} Confusion Matrix", name).bright_blue().bold());
	println!("{}", rule.bright_blue());
	print!("{}", matrix);

	for label in matrix.labels().iter() {
		if let Some(recall) = matrix.recall(label) {
			println!("  {} {:.0}%", format!("{} recall:", label).dimmed(), recall * 100.0);
		}
	}
	println!(
		"  {} {}/{} ({:.1}%)",
		"Accuracy:".bright_blue(),
		matrix.correct(),
		matrix.total(),
		matrix.accuracy() * 100.0
	);
	println!("{}", rule.bright_blue());
}
