//! Cue - text-to-audio sample retrieval
//!
//! Embeds labeled samples, builds one index per alignment strategy, answers
//! free-text queries and benchmarks the strategies against each other.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cue::cli::{Cli, Command};
use cue::commands::{self, Context};
use cue::config::Paths;
use cue::ui;

fn main() {
	if let Err(e) = run() {
		ui::error(&format!("{:#}", e));
		std::process::exit(1);
	}
}

fn run() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);

	let ctx = Context {
		paths: Paths::resolve(cli.models.as_deref(), cli.indices.as_deref()),
		provider: cli.provider,
		labels: cli.labels,
	};
	ui::debug(&format!("Labels: {}", ctx.labels));
	ui::debug(&format!("Indices: {}", ctx.paths.indices.display()));

	match cli.command {
		Command::Embed { directory, output } => {
			ui::print_logo();
			commands::embed::run(&ctx, &directory, &output)
		}
		Command::Build { mode, embeddings, name } => {
			commands::build::run(&ctx, mode, &embeddings, name.as_deref())
		}
		Command::Query {
			mode,
			text,
			top_k,
			name,
			weights,
		} => commands::query::run(&ctx, mode, &text, top_k, name.as_deref(), &weights),
		Command::Evaluate {
			modes,
			top_k,
			queries,
			quick,
			weights,
		} => {
			ui::print_logo();
			commands::evaluate::run(&ctx, &modes, top_k, queries.as_deref(), quick, &weights)
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			match subcommand.as_deref().and_then(|s| cmd.find_subcommand_mut(s)) {
				Some(sub) => sub.print_help()?,
				None => {
					if let Some(sub) = &subcommand {
						ui::warn(&format!("Unknown subcommand: {}", sub));
					}
					cmd.print_help()?
				}
			}
			Ok(())
		}
	}
}
