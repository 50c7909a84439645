//! Query command - print ranked samples for a text description

use anyhow::Result;
use colored::*;
use std::time::Instant;

use crate::cli::WeightArgs;
use crate::core::QueryResult;
use crate::models;
use crate::retrieval::Strategy;
use crate::ui;

use super::Context;

pub fn run(ctx: &Context, mode: Strategy, text: &str, top_k: usize, name: Option<&str>, weights: &WeightArgs) -> Result<()> {
	let index = super::load_index(ctx, mode, name)?;
	let encoder = models::load_text(&ctx.paths, ctx.provider)?;
	let service = super::service(ctx, mode, &encoder, &index, weights)?;

	ui::info(&format!("Searching for: \"{}\" ({})", text, service.name()));
	let start = Instant::now();
	let results = service.query(text, top_k)?;

	if results.is_empty() {
		ui::warn("No matches found");
		return Ok(());
	}

	ui::header("Results");
	for (i, result) in results.iter().enumerate() {
		println!("{}", format_row(i, result));
	}
	println!();

	ui::success(&format!(
		"Found {} matches in {:.0}ms",
		results.len(),
		start.elapsed().as_millis()
	));
	Ok(())
}

fn format_row(i: usize, result: &QueryResult) -> String {
	let score = match result.score {
		Some(score) => format!("{:.3}", score).dimmed().to_string(),
		None => "routed".dimmed().italic().to_string(),
	};
	format!(
		"{}. {} {} {}",
		format!("{:2}", i + 1).bright_blue().bold(),
		result.filename.bright_white(),
		format!("[{}]", result.class).yellow(),
		score
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rows_show_score_or_routing() {
		colored::control::set_override(false);
		let scored = QueryResult {
			filename: "drums_03.wav".into(),
			class: "drums".into(),
			score: Some(0.8123),
		};
		assert_eq!(format_row(0, &scored), " 1. drums_03.wav [drums] 0.812");

		let routed = QueryResult { score: None, ..scored };
		assert!(format_row(1, &routed).ends_with("routed"));
	}
}
