//! Parser/Builder configuration knobs (`spec.md` §9, "The `null` extension").

/// Options accepted by `Parser::new`'s `config` argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Whether the `null` literal is accepted. Default `true`; set to
    /// `false` to reject it for stricter TOML v0.4.0 compatibility.
    pub allow_null: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { allow_null: true }
    }
}

/// Options accepted by [`crate::Builder::with_config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Number of spaces an emitted value is indented by. Cosmetic only;
    /// the grammar does not require it.
    pub indent_width: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}
