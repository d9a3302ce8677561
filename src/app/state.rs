use super::actions::{Action, ActionContext, ActionRegistry, KeyEvent, enabled_actions};
use super::languages::ExtensionRegistry;
use super::highlight::Highlighter;
use super::model::{
    DocumentModel, LanguageHint, LoadCompletion, RenderedDocument, SaveCompletion,
};
use super::store::DocumentStore;
use crate::settings::AppSettings;

/// Contract between the core and the presentation layer. The core never
/// touches a rendering surface directly; everything user-visible goes
/// through this trait.
pub trait Presenter {
    /// Page/window title.
    fn set_title(&mut self, title: &str);
    /// History/location update; `path` starts with '/'.
    fn push_location(&mut self, path: &str);
    /// Transient, auto-dismissing notification.
    fn show_error(&mut self, message: &str);
    /// Display a locked document's rendered HTML.
    fn show_document(&mut self, html: &str, line_count: usize);
    /// Display the editable input, seeded with `text`.
    fn show_editor(&mut self, text: &str);
    /// The enabled-action set changed (fires on every lock transition).
    fn update_actions(&mut self, enabled: &[Action]);
    /// Navigate to an external URL (raw view, share intent).
    fn open_url(&mut self, url: &str);
}

/// Main application coordinator: owns the document model and wires the
/// action registry, the extension table, the store and the highlighter
/// to a presenter.
pub struct AppState {
    model: DocumentModel,
    registry: ActionRegistry,
    languages: ExtensionRegistry,
    store: Box<dyn DocumentStore>,
    highlighter: Box<dyn Highlighter>,
    presenter: Box<dyn Presenter>,
    settings: AppSettings,
    server_base: String,
}

impl AppState {
    pub fn new(
        settings: AppSettings,
        store: Box<dyn DocumentStore>,
        highlighter: Box<dyn Highlighter>,
        presenter: Box<dyn Presenter>,
    ) -> Self {
        let server_base = settings.server_url.trim_end_matches('/').to_string();
        Self {
            model: DocumentModel::new(),
            registry: ActionRegistry::new(),
            languages: ExtensionRegistry::new(),
            store,
            highlighter,
            presenter,
            settings,
            server_base,
        }
    }

    pub fn model(&self) -> &DocumentModel {
        &self.model
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn context(&self) -> ActionContext {
        ActionContext {
            locked: self.model.is_locked(),
            share_enabled: self.settings.share_enabled,
        }
    }

    /// Absolute URL of the current document, with the preferred
    /// extension for its language. `None` until locked.
    pub fn document_url(&self) -> Option<String> {
        let doc = self.model.document();
        doc.key()
            .map(|key| format!("{}{}", self.server_base, self.document_path(key, doc.language())))
    }

    fn document_path(&self, key: &str, language: Option<&str>) -> String {
        match language {
            Some(lang) => format!("/{}.{}", key, self.languages.extension_for_language(lang)),
            None => format!("/{}", key),
        }
    }

    /// Discard the current document and set up for a new one.
    pub fn new_document(&mut self, push_history: bool) {
        self.model.create();
        if push_history {
            self.presenter.push_location("/");
        }
        let title = self.settings.app_name.clone();
        self.presenter.set_title(&title);
        self.presenter.show_editor("");
        self.refresh_actions();
    }

    /// Save the editor contents and lock the document. A blank input is
    /// a no-op; a locked or busy document rejects silently.
    pub fn save_current(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        let ticket = match self.model.begin_save(text) {
            Ok(ticket) => ticket,
            Err(_) => return,
        };
        let outcome = self.store.save(ticket.text());
        match self.model.complete_save(ticket, outcome, self.highlighter.as_ref()) {
            SaveCompletion::Saved(rendered) => self.apply_locked_view(&rendered, true),
            SaveCompletion::Failed(message) => self.presenter.show_error(&message),
            SaveCompletion::Stale => {}
        }
    }

    /// Load and show a stored document. `key_spec` may carry an
    /// extension (`"k1.py"`) that biases highlighting; a missing or
    /// failed key falls back to a fresh document.
    pub fn load_document(&mut self, key_spec: &str) {
        let mut parts = key_spec.split('.');
        let key = parts.next().unwrap_or(key_spec).to_string();
        let hint = match parts.next() {
            None => LanguageHint::Auto,
            Some(ext) => {
                let language = self.languages.language_for_extension(ext);
                if language.is_empty() {
                    LanguageHint::Plain
                } else {
                    LanguageHint::Language(language.to_string())
                }
            }
        };

        self.model.create();
        let ticket = match self.model.begin_load(&key, hint) {
            Ok(ticket) => ticket,
            Err(_) => return,
        };
        let outcome = self.store.load(ticket.key());
        match self.model.complete_load(ticket, outcome, self.highlighter.as_ref()) {
            LoadCompletion::Loaded(rendered) => self.apply_locked_view(&rendered, false),
            LoadCompletion::Missing => self.new_document(true),
            LoadCompletion::Stale => {}
        }
    }

    /// Copy a locked document's text into a fresh editable one.
    pub fn duplicate(&mut self) {
        if !self.model.is_locked() {
            return;
        }
        let data = self.model.document().data().to_string();
        self.new_document(true);
        self.presenter.show_editor(&data);
    }

    /// Dispatch a key-down event through the action table. Returns true
    /// when an action fired and the event's default handling must be
    /// suppressed.
    pub fn handle_key(&mut self, event: &KeyEvent, editor_text: &str) -> bool {
        let ctx = self.context();
        match self.registry.dispatch(event, &ctx) {
            Some(action) => {
                self.handle_action(action, editor_text);
                true
            }
            None => false,
        }
    }

    pub fn handle_action(&mut self, action: Action, editor_text: &str) {
        match action {
            Action::Save => self.save_current(editor_text),
            Action::New => {
                // Keep the history entry when leaving a saved document.
                let push = self.model.document().key().is_some();
                self.new_document(push);
            }
            Action::Duplicate => self.duplicate(),
            Action::Raw => {
                if let Some(key) = self.model.document().key().map(str::to_string) {
                    let url = format!("{}/raw/{}", self.server_base, key);
                    self.presenter.open_url(&url);
                }
            }
            Action::Share => {
                if !self.settings.share_enabled {
                    return;
                }
                if let Some(document_url) = self.document_url() {
                    let url = format!("{}{}", self.settings.share_base_url, document_url);
                    self.presenter.open_url(&url);
                }
            }
        }
    }

    fn apply_locked_view(&mut self, rendered: &RenderedDocument, push_history: bool) {
        let title = format!("{} - {}", self.settings.app_name, rendered.key);
        self.presenter.set_title(&title);
        if push_history {
            let path = self.document_path(&rendered.key, rendered.language.as_deref());
            self.presenter.push_location(&path);
        }
        self.presenter.show_document(&rendered.html, rendered.line_count);
        self.refresh_actions();
    }

    fn refresh_actions(&mut self) {
        let enabled = enabled_actions(&self.context());
        self.presenter.update_actions(&enabled);
    }
}
