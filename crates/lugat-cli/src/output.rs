//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use anyhow::Result;
use lugat_core::Entry;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single entry (with its note)
    pub fn print_entry(&self, entry: &Entry) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("ID:        {}", entry.id);
                println!("Word:      {}", entry.word);
                println!("URL:       {}", entry.url);
                println!(
                    "Looked up: {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M")
                );
                println!(
                    "Favorite:  {} {}",
                    entry.favorite_icon(),
                    if entry.is_favorite { "yes" } else { "no" }
                );

                if entry.has_note() {
                    println!();
                    println!("── Note ──");
                    println!("{}", entry.notes);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entry)?);
            }
            OutputFormat::Quiet => {
                println!("{}", entry.id);
            }
        }
        Ok(())
    }

    /// Print a list of entries
    pub fn print_entries(&self, entries: &[&Entry], empty_message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                if entries.is_empty() {
                    println!("{}", empty_message);
                    return Ok(());
                }
                for entry in entries {
                    let note_indicator = if entry.has_note() {
                        format!(" ✎ {}", truncate_line(&entry.notes, 30))
                    } else {
                        String::new()
                    };
                    println!(
                        "{} {} | {} | {}{}",
                        short_id(entry),
                        entry.favorite_icon(),
                        entry.timestamp.format("%Y-%m-%d %H:%M"),
                        truncate(&entry.word, 35),
                        note_indicator
                    );
                }
                println!("\n{} entr{}", entries.len(), if entries.len() == 1 { "y" } else { "ies" });
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(entries)?);
            }
            OutputFormat::Quiet => {
                for entry in entries {
                    println!("{}", entry.id);
                }
            }
        }
        Ok(())
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning to stderr (suppressed in quiet mode)
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("⚠ {}", message),
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"warning": message}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// First eight characters of the entry ID
pub fn short_id(entry: &Entry) -> String {
    entry.id.to_string()[..8].to_string()
}

/// Truncate a string to max characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Truncate to first line and max length
pub fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_should_prompt_only_for_humans() {
        assert!(Output::new(OutputFormat::Human).should_prompt());
        assert!(!Output::new(OutputFormat::Json).should_prompt());
        assert!(!Output::new(OutputFormat::Quiet).should_prompt());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("İSTİKBAL", 8), "İSTİKBAL");
        assert_eq!(truncate("GÜZEL SÖZLER", 8), "GÜZEL...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
        assert_eq!(
            truncate_line("very long single line here", 10),
            "very lo..."
        );
    }

    #[test]
    fn test_short_id() {
        let entry = Entry::new("KALEM", "https://lugatim.com/s/KALEM");
        assert_eq!(short_id(&entry).len(), 8);
        assert!(entry.id.to_string().starts_with(&short_id(&entry)));
    }
}
