//! Dialect options controlling which relaxations of strict JSON are accepted.
//!
//! Every flag defaults to `false`, in which case both the scanner and the builder behave as a
//! strict JSON reader. The same [DialectOptions] value is handed unchanged to both stages.

/// The set of opt-in grammar relaxations
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct DialectOptions {
    /// Accept `/* block */` and `// line` comments anywhere whitespace is allowed
    pub allow_comments: bool,
    /// Accept a single comma directly ahead of a closing `}` or `]`
    pub allow_trailing_commas: bool,
    /// Accept `'single quoted'` strings, both as values and as keys
    pub allow_single_quoted_strings: bool,
    /// Accept bare identifiers such as `key` as object keys
    pub allow_unquoted_property_names: bool,
}

impl DialectOptions {
    /// Strict JSON, no relaxations
    pub const fn strict() -> Self {
        DialectOptions {
            allow_comments: false,
            allow_trailing_commas: false,
            allow_single_quoted_strings: false,
            allow_unquoted_property_names: false,
        }
    }

    /// Every relaxation switched on
    pub const fn lenient() -> Self {
        DialectOptions {
            allow_comments: true,
            allow_trailing_commas: true,
            allow_single_quoted_strings: true,
            allow_unquoted_property_names: true,
        }
    }

    pub const fn with_comments(mut self, allow: bool) -> Self {
        self.allow_comments = allow;
        self
    }

    pub const fn with_trailing_commas(mut self, allow: bool) -> Self {
        self.allow_trailing_commas = allow;
        self
    }

    pub const fn with_single_quoted_strings(mut self, allow: bool) -> Self {
        self.allow_single_quoted_strings = allow;
        self
    }

    pub const fn with_unquoted_property_names(mut self, allow: bool) -> Self {
        self.allow_unquoted_property_names = allow;
        self
    }

    /// True if no relaxation is enabled
    pub fn is_strict(&self) -> bool {
        *self == Self::strict()
    }
}
