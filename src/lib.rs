pub mod app;
pub mod settings;

pub use app::{AppState, DocumentModel, ExtensionRegistry, Presenter, SyntectHighlighter};
pub use settings::AppSettings;
