use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// Result of running the highlighter over a document.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlighted {
    pub html: String,
    /// Detected (or hint-resolved) language identifier, lowercase.
    /// `None` when the text was rendered as plain text.
    pub language: Option<String>,
}

/// Boundary contract for the highlighting engine.
///
/// Implementations must never fail observably: an unsupported hint or
/// an internal error degrades to automatic detection, and in the worst
/// case to escaped plain text.
pub trait Highlighter {
    fn highlight(&self, text: &str, hint: Option<&str>) -> Highlighted;
}

/// Escapes HTML tag characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('>', "&gt;")
        .replace('<', "&lt;")
        .replace('"', "&quot;")
}

const THEME_NAME: &str = "InspiredGitHub";

/// Syntect-backed highlighter producing standalone HTML.
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
        }
    }

    /// Resolve a hint token (language name or extension) to a syntax.
    fn syntax_for_hint(&self, hint: &str) -> Option<&SyntaxReference> {
        self.syntaxes.find_syntax_by_token(hint)
    }

    /// Automatic detection: first line (shebang etc.), else plain text.
    fn detect(&self, text: &str) -> &SyntaxReference {
        let first_line = text.lines().next().unwrap_or("");
        self.syntaxes
            .find_syntax_by_first_line(first_line)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }

    fn language_id(&self, syntax: &SyntaxReference) -> Option<String> {
        if syntax.name == self.syntaxes.find_syntax_plain_text().name {
            None
        } else {
            Some(syntax.name.to_lowercase())
        }
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, hint: Option<&str>) -> Highlighted {
        let syntax = hint
            .and_then(|h| self.syntax_for_hint(h))
            .unwrap_or_else(|| self.detect(text));

        let theme = &self.themes.themes[THEME_NAME];
        match highlighted_html_for_string(text, &self.syntaxes, syntax, theme) {
            Ok(html) => Highlighted {
                html,
                language: self.language_id(syntax),
            },
            // Engine failure stays behind this boundary.
            Err(_) => Highlighted {
                html: html_escape(text),
                language: None,
            },
        }
    }
}
