//! Token types shared between the scanner and the builder
use crate::coords::Span;

/// Enumeration of the lexical token kinds produced by the scanner
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `{`
    StartObject,
    /// `}`
    EndObject,
    /// `[`
    StartArray,
    /// `]`
    EndArray,
    Colon,
    Comma,
    /// A single or double quoted string, quotes included in the lexeme
    Str,
    /// A run of numeric characters, not yet converted
    Num,
    /// `true` or `false`
    Bool,
    Null,
    /// A bare word, only produced when unquoted property names are allowed
    Identifier,
}

/// A token consists of a [TokenKind], the exact source text it was produced from, and the
/// [Span] that text occupies in the input
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: &'a str,
    pub span: Span,
}

/// Convenience macro for packing tokens along with their positional information
#[macro_export]
macro_rules! packed_token {
    ($k:expr, $l:expr, $s:expr, $e:expr) => {
        $crate::tokens::Token {
            kind: $k,
            lexeme: $l,
            span: $crate::coords::Span { start: $s, end: $e },
        }
    };
    ($k:expr, $l:expr, $s:expr) => {
        $crate::tokens::Token {
            kind: $k,
            lexeme: $l,
            span: $crate::coords::Span { start: $s, end: $s },
        }
    };
}
