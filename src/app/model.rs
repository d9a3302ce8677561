use super::document::{Document, Generation};
use super::highlight::{Highlighter, html_escape};
use super::store::StoreError;

/// Lifecycle of the current document.
///
/// `Empty` is both the initial state and re-enterable via `create`;
/// `Pending` means a save or load request is in flight; `Locked` means
/// the document has a server key and is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Empty,
    Pending,
    Locked,
}

/// Why a save/load could not be started. Not an error: no state
/// changed, no network was contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The current document is locked.
    Locked,
    /// Another request is already in flight.
    InFlight,
}

/// Language resolution for a load, derived from the URL extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageHint {
    /// No usable extension: let the engine detect the language.
    Auto,
    /// Plain-text sentinel: skip highlighting, escape and render as-is.
    Plain,
    /// Bias highlighting toward this language identifier.
    Language(String),
}

/// Rendered view of a locked document, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub html: String,
    pub key: String,
    pub language: Option<String>,
    pub line_count: usize,
}

/// In-flight save request. Carries the generation it was issued under
/// and the originally submitted text, which is what gets rendered on
/// completion.
#[derive(Debug)]
pub struct SaveTicket {
    generation: Generation,
    text: String,
}

impl SaveTicket {
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// In-flight load request.
#[derive(Debug)]
pub struct LoadTicket {
    generation: Generation,
    key: String,
    hint: LanguageHint,
}

impl LoadTicket {
    pub fn key(&self) -> &str {
        &self.key
    }
}

#[derive(Debug, PartialEq)]
pub enum SaveCompletion {
    Saved(RenderedDocument),
    /// Request failed; the message is ready for the notification banner.
    Failed(String),
    /// The ticket belongs to a superseded document; nothing changed.
    Stale,
}

#[derive(Debug, PartialEq)]
pub enum LoadCompletion {
    Loaded(RenderedDocument),
    /// Key missing or server error; caller policy is to fall back to a
    /// fresh document.
    Missing,
    /// The ticket belongs to a superseded document; nothing changed.
    Stale,
}

/// Count of newline-delimited segments ("" counts as one line).
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Owns the current document and drives its lifecycle.
///
/// Network operations are split into a `begin_*` phase, which validates
/// preconditions and hands out a ticket, and a `complete_*` phase fed
/// with the store's outcome. The ticket pins the generation current at
/// begin time; a completion whose generation no longer matches (the
/// document was replaced by `create` in between) is discarded without
/// touching any state.
pub struct DocumentModel {
    document: Document,
    lifecycle: Lifecycle,
    generation: u64,
}

impl Default for DocumentModel {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentModel {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            lifecycle: Lifecycle::Empty,
            generation: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_locked(&self) -> bool {
        self.lifecycle == Lifecycle::Locked
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Replace the current document with a fresh unlocked one. Any
    /// request still in flight is orphaned: its completion will compare
    /// generations and discard itself.
    pub fn create(&mut self) -> Generation {
        self.document = Document::new();
        self.lifecycle = Lifecycle::Empty;
        self.generation += 1;
        Generation(self.generation)
    }

    /// Start saving `text`. Rejects a locked document outright (no
    /// network call) and refuses to overlap requests.
    pub fn begin_save(&mut self, text: &str) -> Result<SaveTicket, Rejection> {
        match self.lifecycle {
            Lifecycle::Locked => Err(Rejection::Locked),
            Lifecycle::Pending => Err(Rejection::InFlight),
            Lifecycle::Empty => {
                self.lifecycle = Lifecycle::Pending;
                Ok(SaveTicket {
                    generation: Generation(self.generation),
                    text: text.to_string(),
                })
            }
        }
    }

    /// Apply the store's outcome for a save. On success the originally
    /// submitted text is highlighted with no hint (auto-detect) and the
    /// document locks with the server-issued key. On failure the model
    /// returns to `Empty`.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        outcome: Result<String, StoreError>,
        highlighter: &dyn Highlighter,
    ) -> SaveCompletion {
        if ticket.generation.0 != self.generation || self.lifecycle != Lifecycle::Pending {
            return SaveCompletion::Stale;
        }
        match outcome {
            Ok(key) => {
                let high = highlighter.highlight(&ticket.text, None);
                let rendered = RenderedDocument {
                    html: high.html,
                    key: key.clone(),
                    language: high.language.clone(),
                    line_count: line_count(&ticket.text),
                };
                self.document.lock(key, ticket.text, high.language);
                self.lifecycle = Lifecycle::Locked;
                SaveCompletion::Saved(rendered)
            }
            Err(err) => {
                self.lifecycle = Lifecycle::Empty;
                SaveCompletion::Failed(err.to_string())
            }
        }
    }

    /// Start loading the document stored under `key`.
    pub fn begin_load(&mut self, key: &str, hint: LanguageHint) -> Result<LoadTicket, Rejection> {
        match self.lifecycle {
            Lifecycle::Locked => Err(Rejection::Locked),
            Lifecycle::Pending => Err(Rejection::InFlight),
            Lifecycle::Empty => {
                self.lifecycle = Lifecycle::Pending;
                Ok(LoadTicket {
                    generation: Generation(self.generation),
                    key: key.to_string(),
                    hint,
                })
            }
        }
    }

    /// Apply the store's outcome for a load. The hint resolved from the
    /// URL extension biases highlighting; the plain-text sentinel skips
    /// the engine entirely and escapes the raw text.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<String, StoreError>,
        highlighter: &dyn Highlighter,
    ) -> LoadCompletion {
        if ticket.generation.0 != self.generation || self.lifecycle != Lifecycle::Pending {
            return LoadCompletion::Stale;
        }
        match outcome {
            Ok(data) => {
                let (html, language) = match &ticket.hint {
                    LanguageHint::Plain => (html_escape(&data), None),
                    LanguageHint::Language(lang) => {
                        let high = highlighter.highlight(&data, Some(lang));
                        // Echo the hint when the engine reports nothing.
                        let language = high.language.or_else(|| Some(lang.clone()));
                        (high.html, language)
                    }
                    LanguageHint::Auto => {
                        let high = highlighter.highlight(&data, None);
                        (high.html, high.language)
                    }
                };
                let rendered = RenderedDocument {
                    html,
                    key: ticket.key.clone(),
                    language: language.clone(),
                    line_count: line_count(&data),
                };
                self.document.lock(ticket.key, data, language);
                self.lifecycle = Lifecycle::Locked;
                LoadCompletion::Loaded(rendered)
            }
            Err(_) => {
                self.lifecycle = Lifecycle::Empty;
                LoadCompletion::Missing
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::highlight::Highlighted;
    use std::cell::Cell;

    /// Records invocations; reports a fixed language and wraps the text.
    struct FakeHighlighter {
        language: Option<&'static str>,
        calls: Cell<usize>,
    }

    impl FakeHighlighter {
        fn new(language: Option<&'static str>) -> Self {
            Self { language, calls: Cell::new(0) }
        }
    }

    impl Highlighter for FakeHighlighter {
        fn highlight(&self, text: &str, _hint: Option<&str>) -> Highlighted {
            self.calls.set(self.calls.get() + 1);
            Highlighted {
                html: format!("<hl>{}</hl>", text),
                language: self.language.map(str::to_string),
            }
        }
    }

    #[test]
    fn test_fresh_model_is_empty_and_unlocked() {
        let model = DocumentModel::new();
        assert_eq!(model.lifecycle(), Lifecycle::Empty);
        assert!(!model.is_locked());
        assert!(model.document().key().is_none());
        assert_eq!(model.document().data(), "");
    }

    #[test]
    fn test_save_success_locks_and_reports_line_count() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(Some("python"));
        let ticket = model.begin_save("line1\nline2").unwrap();
        assert_eq!(model.lifecycle(), Lifecycle::Pending);

        match model.complete_save(ticket, Ok("k1".to_string()), &hl) {
            SaveCompletion::Saved(r) => {
                assert_eq!(r.key, "k1");
                assert_eq!(r.line_count, 2);
                assert_eq!(r.language.as_deref(), Some("python"));
                assert_eq!(r.html, "<hl>line1\nline2</hl>");
            }
            other => panic!("unexpected completion: {:?}", other),
        }
        assert!(model.is_locked());
        assert_eq!(model.document().key(), Some("k1"));
        assert_eq!(model.document().data(), "line1\nline2");
    }

    #[test]
    fn test_save_on_locked_document_is_rejected_without_side_effects() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(None);
        let ticket = model.begin_save("data").unwrap();
        model.complete_save(ticket, Ok("k1".to_string()), &hl);

        let before = model.document().clone();
        assert!(matches!(model.begin_save("other"), Err(Rejection::Locked)));
        assert_eq!(model.document(), &before);
        assert!(model.is_locked());
    }

    #[test]
    fn test_overlapping_requests_are_rejected() {
        let mut model = DocumentModel::new();
        let _ticket = model.begin_save("data").unwrap();
        assert!(matches!(model.begin_save("more"), Err(Rejection::InFlight)));
        assert!(matches!(
            model.begin_load("k", LanguageHint::Auto),
            Err(Rejection::InFlight)
        ));
    }

    #[test]
    fn test_save_failure_returns_to_empty_with_message() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(None);
        let ticket = model.begin_save("data").unwrap();
        let completion = model.complete_save(
            ticket,
            Err(StoreError::Rejected("Length must be > 0".to_string())),
            &hl,
        );
        assert_eq!(completion, SaveCompletion::Failed("Length must be > 0".to_string()));
        assert_eq!(model.lifecycle(), Lifecycle::Empty);
        assert!(!model.is_locked());
    }

    #[test]
    fn test_load_success_locks_with_hint_language() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(None);
        let ticket = model
            .begin_load("k1", LanguageHint::Language("python".to_string()))
            .unwrap();
        match model.complete_load(ticket, Ok("a\nb\nc".to_string()), &hl) {
            LoadCompletion::Loaded(r) => {
                assert_eq!(r.line_count, 3);
                assert_eq!(r.key, "k1");
                // Engine reported nothing, so the hint is echoed.
                assert_eq!(r.language.as_deref(), Some("python"));
            }
            other => panic!("unexpected completion: {:?}", other),
        }
        assert!(model.is_locked());
        assert_eq!(model.document().data(), "a\nb\nc");
    }

    #[test]
    fn test_load_plain_text_never_invokes_highlighter() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(Some("python"));
        let ticket = model.begin_load("k1", LanguageHint::Plain).unwrap();
        match model.complete_load(ticket, Ok("<b>raw</b>".to_string()), &hl) {
            LoadCompletion::Loaded(r) => {
                assert_eq!(r.html, "&lt;b&gt;raw&lt;/b&gt;");
                assert!(r.language.is_none());
            }
            other => panic!("unexpected completion: {:?}", other),
        }
        assert_eq!(hl.calls.get(), 0);
    }

    #[test]
    fn test_load_failure_produces_no_document() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(None);
        let ticket = model.begin_load("nope", LanguageHint::Auto).unwrap();
        let completion = model.complete_load(ticket, Err(StoreError::NotFound), &hl);
        assert_eq!(completion, LoadCompletion::Missing);
        assert_eq!(model.lifecycle(), Lifecycle::Empty);
        assert!(model.document().key().is_none());
    }

    #[test]
    fn test_stale_save_completion_is_discarded() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(None);
        let ticket = model.begin_save("old text").unwrap();

        // The user started a new document while the request was in flight.
        model.create();
        assert_eq!(model.lifecycle(), Lifecycle::Empty);

        let completion = model.complete_save(ticket, Ok("k-old".to_string()), &hl);
        assert_eq!(completion, SaveCompletion::Stale);
        assert_eq!(model.lifecycle(), Lifecycle::Empty);
        assert!(model.document().key().is_none());
        assert_eq!(model.document().data(), "");
    }

    #[test]
    fn test_stale_load_completion_is_discarded() {
        let mut model = DocumentModel::new();
        let hl = FakeHighlighter::new(None);
        let ticket = model.begin_load("k1", LanguageHint::Auto).unwrap();
        model.create();

        let completion = model.complete_load(ticket, Ok("stale data".to_string()), &hl);
        assert_eq!(completion, LoadCompletion::Stale);
        assert!(!model.is_locked());
        assert_eq!(model.document().data(), "");
    }

    #[test]
    fn test_create_bumps_generation() {
        let mut model = DocumentModel::new();
        let g0 = model.generation();
        let g1 = model.create();
        let g2 = model.create();
        assert_ne!(g0, g1);
        assert_ne!(g1, g2);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(line_count(""), 1);
        assert_eq!(line_count("one"), 1);
        assert_eq!(line_count("line1\nline2"), 2);
        assert_eq!(line_count("a\nb\nc"), 3);
        assert_eq!(line_count("trailing\n"), 2);
    }
}
