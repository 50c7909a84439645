//! Labeled benchmark query sets

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::EvalQuery;

const QUICK: &[(&str, &str)] = &[
	("drum samples", "drums"),
	("drum loop", "drums"),
	("percussion beat", "drums"),
	("kick snare rhythm", "drums"),
	("drums only", "drums"),
	("keys melody", "keys"),
	("piano chords", "keys"),
	("keyboard harmony", "keys"),
	("soft piano music", "keys"),
	("keys loop", "keys"),
];

const BENCHMARK: &[(&str, &str)] = &[
	// drums
	("drum samples", "drums"),
	("drum loop", "drums"),
	("percussion beat", "drums"),
	("kick snare rhythm", "drums"),
	("drums only", "drums"),
	("fast drum pattern", "drums"),
	("electronic drum beat", "drums"),
	("rhythmic percussion sounds", "drums"),
	("heavy kick and snare", "drums"),
	("tight drum groove", "drums"),
	// descriptive
	("high energy drum loop for dance music", "drums"),
	("percussive rhythm without melody", "drums"),
	("looped drum pattern with strong beat", "drums"),
	("drum sounds used for rhythm section", "drums"),
	("short percussive hits and beats", "drums"),
	// hard
	("percussive elements driving the tempo", "drums"),
	("rhythm focused loop with no harmonic content", "drums"),
	("beat oriented audio sample", "drums"),
	// keys
	("keys melody", "keys"),
	("piano chords", "keys"),
	("keyboard harmony", "keys"),
	("soft piano music", "keys"),
	("keys loop", "keys"),
	("melodic piano line", "keys"),
	("harmonic keyboard progression", "keys"),
	("smooth piano melody", "keys"),
	("synth keys pad", "keys"),
	("keyboard arpeggio", "keys"),
	// descriptive
	("soft melodic piano chords", "keys"),
	("keyboard based harmonic loop", "keys"),
	("gentle keys progression with melody", "keys"),
	("musical chord progression played on keys", "keys"),
	("sustained keyboard tones with harmony", "keys"),
	// hard
	("melody driven musical loop", "keys"),
	("harmonic content without strong rhythm", "keys"),
	("tonal keyboard sounds for background music", "keys"),
];

fn to_queries(pairs: &[(&str, &str)]) -> Vec<EvalQuery> {
	pairs.iter().map(|(text, class)| EvalQuery::new(*text, *class)).collect()
}

/// Ten short queries, five per class
pub fn quick_queries() -> Vec<EvalQuery> {
	to_queries(QUICK)
}

/// Full benchmark: short, descriptive and deliberately hard phrasings
pub fn benchmark_queries() -> Vec<EvalQuery> {
	to_queries(BENCHMARK)
}

/// Load a JSON array of `{"text": ..., "class": ...}`
pub fn load_queries(path: &Path) -> Result<Vec<EvalQuery>> {
	let json = fs::read_to_string(path)
		.with_context(|| format!("Failed to read queries from {}", path.display()))?;
	let queries: Vec<EvalQuery> = serde_json::from_str(&json).context("Failed to parse eval queries")?;
	if queries.is_empty() {
		anyhow::bail!("{} contains no queries", path.display());
	}
	Ok(queries)
}
