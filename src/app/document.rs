/// Identity of a document instance, bumped every time the current
/// document is replaced. Completion callbacks compare generations so a
/// response for a superseded document can be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(pub u64);

/// The single text artifact managed by the client.
///
/// A document is either *unlocked* (no key, data editable) or *locked*
/// (server-issued key, data and key frozen). There is no partially
/// locked state: `lock` is the only transition and it is crate-private,
/// so outside this crate a locked document cannot be mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    key: Option<String>,
    data: String,
    locked: bool,
    language: Option<String>,
}

impl Document {
    /// A fresh, unlocked document with no key and empty data.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Highlighting language recorded on the last successful save/load.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Freeze this document with its server-issued key. Called exactly
    /// once per instance, by the model, on save/load completion.
    pub(crate) fn lock(&mut self, key: String, data: String, language: Option<String>) {
        debug_assert!(!self.locked, "document locked twice");
        self.key = Some(key);
        self.data = data;
        self.language = language;
        self.locked = true;
    }
}
