use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::core::LabelSet;
use crate::retrieval::{Selection, Strategy};
use crate::runtime::Provider;

fn parse_top_k(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid count", s))?;
	if val == 0 {
		Err("top-k must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn parse_labels(s: &str) -> Result<LabelSet, String> {
	s.parse().map_err(|e: crate::Error| e.to_string())
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "cue",
	author,
	version,
	about = "Text-to-audio sample retrieval",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {cue} {embed}     {embed_args}   {embed_desc}
  {cue} {build}     {build_args}   {build_desc}
  {cue} {query}     {query_args}           {query_desc}
  {cue} {evaluate}  {evaluate_args}                        {evaluate_desc}",
		title = "Examples:".bright_blue().bold(),
		cue = "cue".bright_blue(),
		embed = "embed".yellow(),
		embed_args = "-d data/processed -o audio.msgpack",
		embed_desc = "Embed labeled samples".dimmed(),
		build = "build".yellow(),
		build_args = "prototype -e audio.msgpack    ",
		build_desc = "Build an index".dimmed(),
		query = "query".yellow(),
		query_args = "prototype \"drum loop\"",
		query_desc = "Find samples".dimmed(),
		evaluate = "evaluate".yellow(),
		evaluate_args = "all",
		evaluate_desc = "Confusion matrices".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Execution provider: auto, cpu, cuda, tensorrt, coreml, xnnpack
	#[arg(short = 'p', long = "provider", global = true, default_value = "auto")]
	pub provider: Provider,

	/// Directory holding the ONNX models and tokenizer
	#[arg(long = "models", global = true, value_name = "DIR")]
	pub models: Option<PathBuf>,

	/// Directory holding persisted indices
	#[arg(long = "indices", global = true, value_name = "DIR")]
	pub indices: Option<PathBuf>,

	/// Closed label set, comma-separated
	#[arg(long = "labels", global = true, default_value = "drums,keys", value_parser = parse_labels)]
	pub labels: LabelSet,

	#[command(subcommand)]
	pub command: Command,
}

/// Projection parameter files
#[derive(Args, Debug, Clone, Default)]
pub struct WeightArgs {
	/// Optional affine map applied by the projection strategy
	#[arg(long = "linear-weights", value_name = "PATH")]
	pub linear: Option<PathBuf>,

	/// Contrastive text projection (default: <indices>/contrastive_text_projection.msgpack)
	#[arg(long = "contrastive-weights", value_name = "PATH")]
	pub contrastive: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Embed labeled WAV samples (<dir>/<class>/*.wav) into a batch file
	Embed {
		/// Directory with one sub-directory per class
		#[arg(short = 'd', long = "dir", default_value = "data/processed")]
		directory: PathBuf,

		/// Output batch file
		#[arg(short = 'o', long = "output", default_value = "embeddings/saved/audio_embeddings.msgpack")]
		output: PathBuf,
	},

	/// Build and persist the index for one strategy
	Build {
		/// Strategy whose index to build
		#[arg(value_enum)]
		mode: Strategy,

		/// Embedding batch to index
		#[arg(short = 'e', long = "embeddings", value_name = "PATH")]
		embeddings: PathBuf,

		/// Index name (default depends on the strategy)
		#[arg(short = 'n', long = "name")]
		name: Option<String>,
	},

	/// Retrieve samples for a text query
	Query {
		#[arg(value_enum)]
		mode: Strategy,

		/// Search query (text description)
		#[arg(value_name = "QUERY")]
		text: String,

		/// Number of results
		#[arg(short = 'k', long = "top-k", default_value_t = crate::config::DEFAULT_TOP_K, value_parser = parse_top_k)]
		top_k: usize,

		/// Index name (default depends on the strategy)
		#[arg(short = 'n', long = "name")]
		name: Option<String>,

		#[command(flatten)]
		weights: WeightArgs,
	},

	/// Evaluate strategies on a labeled query set
	Evaluate {
		/// Strategies to evaluate, or `all` (the default)
		#[arg(value_enum)]
		modes: Vec<Selection>,

		/// Results per query used for the majority vote
		#[arg(short = 'k', long = "top-k", default_value_t = crate::config::DEFAULT_TOP_K, value_parser = parse_top_k)]
		top_k: usize,

		/// JSON file with [{"text": ..., "class": ...}]
		#[arg(short = 'q', long = "queries", value_name = "PATH", conflicts_with = "quick")]
		queries: Option<PathBuf>,

		/// Use the short ten-query set
		#[arg(long = "quick")]
		quick: bool,

		#[command(flatten)]
		weights: WeightArgs,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}

#[cfg(test)]
mod tests {
	use super::*;
	use clap::CommandFactory;

	#[test]
	fn cli_definition_is_valid() {
		Cli::command().debug_assert();
	}

	#[test]
	fn parses_query_with_defaults() {
		let cli = Cli::try_parse_from(["cue", "query", "prototype", "drum loop"]).unwrap();
		match cli.command {
			Command::Query { mode, text, top_k, .. } => {
				assert_eq!(mode, Strategy::Prototype);
				assert_eq!(text, "drum loop");
				assert_eq!(top_k, 5);
			}
			other => panic!("unexpected command {:?}", other),
		}
		assert_eq!(cli.labels, LabelSet::default());
	}

	#[test]
	fn rejects_zero_top_k() {
		assert!(Cli::try_parse_from(["cue", "query", "projection", "piano", "-k", "0"]).is_err());
	}

	#[test]
	fn evaluate_accepts_several_modes() {
		let cli = Cli::try_parse_from(["cue", "evaluate", "prototype", "contrastive", "--quick"]).unwrap();
		match cli.command {
			Command::Evaluate { modes, quick, .. } => {
				assert_eq!(modes, vec![Selection::Prototype, Selection::Contrastive]);
				assert!(quick);
			}
			other => panic!("unexpected command {:?}", other),
		}
	}

	#[test]
	fn evaluate_accepts_all() {
		let cli = Cli::try_parse_from(["cue", "evaluate", "all", "-k", "3"]).unwrap();
		match cli.command {
			Command::Evaluate { modes, top_k, .. } => {
				assert_eq!(modes, vec![Selection::All]);
				assert_eq!(Selection::expand(&modes), Strategy::ALL.to_vec());
				assert_eq!(top_k, 3);
			}
			other => panic!("unexpected command {:?}", other),
		}
	}
}
