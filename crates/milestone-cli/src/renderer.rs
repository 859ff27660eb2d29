//! Terminal output for plans and reports.
//!
//! Markdown produced by the core display types is printed through a
//! termimad skin when colors are enabled. Headers keep their `#` markers and
//! timeline rows that overlap their predecessor are highlighted. With
//! `--no-color` the markdown is printed unchanged.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const HEADER: &str = "\x1b[34m";
const WARNING: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// How a single line of markdown is printed in rich mode.
#[derive(Debug, PartialEq, Eq)]
enum LineStyle {
    Header,
    Warning,
    Inline,
}

fn classify(line: &str) -> LineStyle {
    if line.starts_with('#') {
        LineStyle::Header
    } else if line.contains('⚠') || line.starts_with("Error:") {
        LineStyle::Warning
    } else {
        LineStyle::Inline
    }
}

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            if !markdown.ends_with('\n') {
                println!();
            }
            return Ok(());
        }

        for line in markdown.lines() {
            match classify(line) {
                LineStyle::Header => println!("{HEADER}{line}{RESET}"),
                LineStyle::Warning => println!("{WARNING}{line}{RESET}"),
                LineStyle::Inline => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
        assert!(renderer.render("No plans found.").is_ok());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().rich_enabled);
    }

    #[test]
    fn test_line_classification() {
        assert_eq!(classify("# Progress: 40%"), LineStyle::Header);
        assert_eq!(classify("## Finance"), LineStyle::Header);
        assert_eq!(
            classify("- `··██··` 4. Close books (2025-01-10 → 2025-01-15, 6 days) after #3 ⚠ overlaps predecessor"),
            LineStyle::Warning
        );
        assert_eq!(classify("Error: Plan with ID 9 not found"), LineStyle::Warning);
        assert_eq!(classify("- **Status:** pending"), LineStyle::Inline);
    }
}
