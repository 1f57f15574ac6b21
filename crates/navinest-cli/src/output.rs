//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use navinest_core::{Category, LinkItem};

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

    /// Print a single link
    pub fn print_link(&self, link: &LinkItem) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:          {}", link.id);
                println!("Name:        {}", link.name);
                println!("URL:         {}", link.url);
                if !link.icon.is_empty() {
                    println!("Icon:        {}", link.icon);
                }
                if !link.description.is_empty() {
                    println!("Description: {}", link.description);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(link).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print a flat list of links
    pub fn print_links(&self, links: &[&LinkItem]) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for link in links {
                    println!(
                        "{} | {} | {}",
                        short_id(&link.id),
                        truncate(&link.name, 30),
                        truncate(&link.url, 50)
                    );
                }
                println!("\n{} link(s)", links.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(links).unwrap());
            }
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print the category list with their links
    pub fn print_categories(&self, categories: &[Category]) {
        match self.format {
            OutputFormat::Human => {
                if categories.is_empty() {
                    println!("No categories.");
                    return;
                }
                for category in categories {
                    println!("{} | {} ({} links)", short_id(&category.id), category.name, category.items.len());
                    for link in &category.items {
                        println!(
                            "  {} | {} | {}",
                            short_id(&link.id),
                            truncate(&link.name, 30),
                            truncate(&link.url, 50)
                        );
                    }
                }
                println!("\n{} categor(ies)", categories.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(categories).unwrap());
            }
            OutputFormat::Quiet => {
                for category in categories {
                    println!("{}", category.id);
                }
            }
        }
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

/// First eight characters of an id, or the whole thing if shorter
///
/// Imported ids are arbitrary strings, so cut on a char boundary.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max length, adding "..." if truncated
///
/// Names and URLs can contain multibyte characters, so the cut falls on
/// the last char boundary at or before the target width.
fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut cut = max_len.saturating_sub(3);
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}
