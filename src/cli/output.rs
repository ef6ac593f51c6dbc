//! CLI output formatting.
//!
//! Human-readable text with colored symbols, or one JSON document per
//! command when `--json` is set.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use serde::Serialize;

/// Output settings shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool) -> Self {
        Self { json }
    }
}

static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Apply output settings. Only the first call takes effect.
pub fn configure(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

#[must_use]
pub fn is_json() -> bool {
    OUTPUT_CONFIG.get().copied().unwrap_or_default().json
}

/// Print the application header with name and version.
pub fn header() {
    if is_json() {
        return;
    }
    println!("{} {}", "gmx-allocator".bold(), env!("CARGO_PKG_VERSION").dimmed());
    println!();
}

/// Print a section header.
pub fn section(title: &str) {
    if is_json() {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    if is_json() {
        return;
    }
    println!("  {:<16} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    if is_json() {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    if is_json() {
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr. Shown in JSON mode too.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", serde_json::json!({ "error": message }));
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a dimmed note.
pub fn note(message: &str) {
    if is_json() {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    if is_json() {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a value as a single JSON document.
pub fn json<T: Serialize>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a signed amount green when non-negative, red otherwise.
pub fn signed(value: impl Display, negative: bool) -> String {
    if negative {
        format!("{}", value.red())
    } else {
        format!("{}", value.green())
    }
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    format!("{}", value.cyan())
}
