//! Unified logging system

use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
   ________  _____
  / ___/ / / / _ \
 / /__/ /_/ /  __/
 \___/\__,_/\___/ "#;

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!("{}", "Find the sample you can only describe".dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

/// Clickable file path (OSC 8 terminal hyperlink)
pub fn path_link(path: &std::path::Path, max_len: usize) -> String {
	let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

	let uri = if cfg!(windows) {
		let path_str = absolute.to_string_lossy();
		let cleaned = path_str.strip_prefix(r"\\?\").unwrap_or(&path_str);
		format!("file:///{}", cleaned.replace('\\', "/"))
	} else {
		format!("file://{}", absolute.display())
	};

	let filename = path
		.file_name()
		.and_then(|n| n.to_str())
		.unwrap_or("unknown");

	format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", uri, shorten(filename, max_len))
}

/// Middle-truncate long names, keeping both ends readable
fn shorten(name: &str, max_len: usize) -> String {
	let chars: Vec<char> = name.chars().collect();
	if chars.len() <= max_len || max_len < 8 {
		return name.to_string();
	}
	let head = max_len / 2;
	let tail = max_len - head - 3;
	let start: String = chars[..head].iter().collect();
	let end: String = chars[chars.len() - tail..].iter().collect();
	format!("{}...{}", start, end)
}

/// Log an embedded file with its class and dimmed time
pub fn file_processed(path: &std::path::Path, class: &str, duration_ms: u128) {
	let link = path_link(path, 60);
	info(&format!(
		"{} {} {}",
		link.bright_white(),
		format!("[{}]", class).yellow(),
		format!("{}ms", duration_ms).dimmed()
	));
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn short_names_are_untouched() {
		assert_eq!(shorten("drums_01.wav", 60), "drums_01.wav");
	}

	#[test]
	fn long_names_keep_both_ends() {
		let name = "an_extremely_long_sample_name_for_a_keys_loop.wav";
		let short = shorten(name, 20);
		assert_eq!(short.chars().count(), 20);
		assert!(short.starts_with("an_extreme"));
		assert!(short.ends_with("oop.wav"));
	}
}
