//! Application core - the document lifecycle and everything derived
//! from it.
//!
//! # Structure
//!
//! - `document` - Domain type (Document, lock invariant, Generation)
//! - `languages` - Extension <-> language registry
//! - `highlight` - Highlighter boundary + syntect implementation
//! - `store` - Save/load protocol (DocumentStore, HttpStore)
//! - `model` - DocumentModel lifecycle state machine
//! - `actions` - Action registry, shortcuts, enablement derivation
//! - `state` - AppState coordinator and the Presenter contract
//! - `error` - AppError and the crate Result alias

pub mod actions;
pub mod document;
pub mod error;
pub mod highlight;
pub mod languages;
pub mod model;
pub mod state;
pub mod store;

// Re-exports for convenient external access
pub use actions::{Action, ActionContext, ActionRegistry, KeyEvent, enabled_actions};
pub use document::{Document, Generation};
pub use error::{AppError, Result};
pub use highlight::{Highlighted, Highlighter, SyntectHighlighter, html_escape};
pub use languages::ExtensionRegistry;
pub use model::{
    DocumentModel, LanguageHint, Lifecycle, LoadCompletion, Rejection, RenderedDocument,
    SaveCompletion,
};
pub use state::{AppState, Presenter};
pub use store::{DocumentStore, HttpStore, StoreError};
