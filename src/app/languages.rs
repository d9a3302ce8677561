/// Map of common extensions to highlighting language identifiers.
///
/// The list does not need to include anything that IS its own extension:
/// both lookups fall back to returning their argument unchanged. Order
/// matters for the reverse lookup (first matching entry wins), so the
/// table is kept as an ordered slice, not a hash map. An empty language
/// value is the plain-text sentinel: render escaped, do not highlight.
const DEFAULT_TABLE: &[(&str, &str)] = &[
    ("rb", "ruby"),
    ("py", "python"),
    ("pl", "perl"),
    ("php", "php"),
    ("scala", "scala"),
    ("go", "go"),
    ("xml", "xml"),
    ("html", "xml"),
    ("htm", "xml"),
    ("css", "css"),
    ("js", "javascript"),
    ("vbs", "vbscript"),
    ("lua", "lua"),
    ("pas", "delphi"),
    ("java", "java"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("m", "objectivec"),
    ("vala", "vala"),
    ("sql", "sql"),
    ("sm", "smalltalk"),
    ("lisp", "lisp"),
    ("ini", "ini"),
    ("diff", "diff"),
    ("bash", "bash"),
    ("sh", "bash"),
    ("tex", "tex"),
    ("erl", "erlang"),
    ("hs", "haskell"),
    ("md", "markdown"),
    ("txt", ""),
    ("coffee", "coffee"),
    ("json", "javascript"),
    ("swift", "swift"),
];

/// Bidirectional extension <-> language table with identity fallback.
pub struct ExtensionRegistry {
    table: Vec<(String, String)>,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::with_table(DEFAULT_TABLE.iter().map(|&(e, l)| (e.to_string(), l.to_string())))
    }

    /// Build a registry from a custom ordered table.
    pub fn with_table(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            table: pairs.into_iter().collect(),
        }
    }

    /// Look up the language for a given extension.
    /// If not found, return the extension - which we'll attempt to use
    /// as the language. An empty result means plain text.
    pub fn language_for_extension<'a>(&'a self, ext: &'a str) -> &'a str {
        self.table
            .iter()
            .find(|(e, _)| e == ext)
            .map(|(_, lang)| lang.as_str())
            .unwrap_or(ext)
    }

    /// Look up the extension preferred for a language.
    /// If not found, return the language itself - which we'll place as
    /// the extension. First table entry with a matching value wins.
    pub fn extension_for_language<'a>(&'a self, language: &'a str) -> &'a str {
        self.table
            .iter()
            .find(|(_, lang)| lang == language)
            .map(|(ext, _)| ext.as_str())
            .unwrap_or(language)
    }

    /// Whether an extension resolves to the plain-text sentinel.
    pub fn is_plain_text(&self, ext: &str) -> bool {
        self.language_for_extension(ext).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_to_language() {
        let reg = ExtensionRegistry::new();
        assert_eq!(reg.language_for_extension("py"), "python");
        assert_eq!(reg.language_for_extension("rb"), "ruby");
        assert_eq!(reg.language_for_extension("sh"), "bash");
        assert_eq!(reg.language_for_extension("json"), "javascript");
    }

    #[test]
    fn test_unknown_extension_falls_back_to_itself() {
        let reg = ExtensionRegistry::new();
        assert_eq!(reg.language_for_extension("x"), "x");
        assert_eq!(reg.language_for_extension("rs"), "rs");
    }

    #[test]
    fn test_language_to_extension() {
        let reg = ExtensionRegistry::new();
        assert_eq!(reg.extension_for_language("python"), "py");
        assert_eq!(reg.extension_for_language("ruby"), "rb");
    }

    #[test]
    fn test_reverse_lookup_first_match_wins() {
        let reg = ExtensionRegistry::new();
        // xml, html and htm all map to xml; bash and sh both map to bash;
        // js and json both map to javascript. The earliest entry wins.
        assert_eq!(reg.extension_for_language("xml"), "xml");
        assert_eq!(reg.extension_for_language("bash"), "bash");
        assert_eq!(reg.extension_for_language("javascript"), "js");
        assert_eq!(reg.extension_for_language("cpp"), "cpp");
    }

    #[test]
    fn test_unknown_language_falls_back_to_itself() {
        let reg = ExtensionRegistry::new();
        assert_eq!(reg.extension_for_language("brainfuck"), "brainfuck");
    }

    #[test]
    fn test_plain_text_sentinel() {
        let reg = ExtensionRegistry::new();
        assert!(reg.is_plain_text("txt"));
        assert!(!reg.is_plain_text("py"));
        assert!(!reg.is_plain_text("unknown"));
    }

    #[test]
    fn test_custom_table() {
        let reg = ExtensionRegistry::with_table(vec![
            ("foo".to_string(), "bar".to_string()),
            ("baz".to_string(), "bar".to_string()),
        ]);
        assert_eq!(reg.language_for_extension("foo"), "bar");
        assert_eq!(reg.extension_for_language("bar"), "foo");
        assert_eq!(reg.language_for_extension("py"), "py");
    }
}
