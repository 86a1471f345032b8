//! The builder consumes the token sequence produced by the scanner and constructs a
//! [JsonValue] tree by recursive descent, with a single token of lookahead.
//!
//! Tokens are read through an index-based cursor over an immutable slice. Recursion depth
//! follows the nesting depth of the input and is bounded by a configurable limit.
use indexmap::IndexMap;

use crate::builder_error;
use crate::coords::Coords;
use crate::errors::{Details, Error, ParserResult, Stage};
use crate::options::DialectOptions;
use crate::tokens::{Token, TokenKind};
use crate::JsonValue;

/// Default limit on the nesting depth of arrays and objects
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Build a [JsonValue] from a complete token sequence using the default depth limit
pub fn build(tokens: &[Token], options: DialectOptions) -> ParserResult<JsonValue> {
    Builder::new(tokens, options).build()
}

/// Recursive descent value builder over a slice of [Token]s
pub struct Builder<'t, 'a> {
    /// The full token sequence
    tokens: &'t [Token<'a>],
    /// Dialect extensions in force
    options: DialectOptions,
    /// Index of the next unconsumed token
    position: usize,
    /// Current array/object nesting depth
    depth: usize,
    /// Maximum permitted nesting depth
    max_depth: usize,
}

impl<'t, 'a> Builder<'t, 'a> {
    pub fn new(tokens: &'t [Token<'a>], options: DialectOptions) -> Self {
        Builder {
            tokens,
            options,
            position: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the default nesting limit
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Build a single top-level value. Any tokens left over once that value is complete are
    /// reported as unexpected.
    pub fn build(mut self) -> ParserResult<JsonValue> {
        let value = self.parse_value()?;
        match self.peek() {
            Some(token) => builder_error!(
                Details::UnexpectedToken(token.lexeme.to_string()),
                token.span.start
            ),
            None => Ok(value),
        }
    }

    #[inline]
    fn peek(&self) -> Option<&'t Token<'a>> {
        self.tokens.get(self.position)
    }

    #[inline]
    fn next_is(&self, kind: TokenKind) -> bool {
        matches!(self.peek(), Some(token) if token.kind == kind)
    }

    #[inline]
    fn consume(&mut self) -> Option<&'t Token<'a>> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    /// Coordinates just past the final token, used when the tokens run out
    fn end_coords(&self) -> Option<Coords> {
        self.tokens.last().map(|token| token.span.end)
    }

    fn exhausted<T>(&self, details: Details) -> ParserResult<T> {
        Err(Error {
            stage: Stage::Builder,
            details,
            coords: self.end_coords(),
        })
    }

    fn enter(&mut self, token: &Token) -> ParserResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return builder_error!(Details::NestingTooDeep(self.max_depth), token.span.start);
        }
        Ok(())
    }

    fn parse_value(&mut self) -> ParserResult<JsonValue> {
        let token = match self.consume() {
            Some(token) => token,
            None => return self.exhausted(Details::UnexpectedEndOfInput),
        };
        match token.kind {
            TokenKind::StartObject => {
                self.enter(token)?;
                let object = self.parse_object()?;
                self.depth -= 1;
                Ok(object)
            }
            TokenKind::StartArray => {
                self.enter(token)?;
                let array = self.parse_array()?;
                self.depth -= 1;
                Ok(array)
            }
            TokenKind::Str => Ok(JsonValue::String(unquote(token)?)),
            TokenKind::Num => Ok(JsonValue::Number(convert_number(token)?)),
            TokenKind::Bool => Ok(JsonValue::Boolean(token.lexeme == "true")),
            TokenKind::Null => Ok(JsonValue::Null),
            TokenKind::EndObject
            | TokenKind::EndArray
            | TokenKind::Colon
            | TokenKind::Comma
            | TokenKind::Identifier => builder_error!(
                Details::UnexpectedToken(token.lexeme.to_string()),
                token.span.start
            ),
        }
    }

    /// An object is a list of comma separated key/value pairs. The opening brace has already
    /// been consumed.
    fn parse_object(&mut self) -> ParserResult<JsonValue> {
        let mut pairs = IndexMap::new();
        if self.next_is(TokenKind::EndObject) {
            self.consume();
            return Ok(JsonValue::Object(pairs));
        }
        loop {
            let key = self.parse_key()?;
            match self.consume() {
                Some(token) if token.kind == TokenKind::Colon => (),
                Some(token) => {
                    return builder_error!(
                        Details::ExpectedColon(token.lexeme.to_string()),
                        token.span.start
                    )
                }
                None => return self.exhausted(Details::UnterminatedObject),
            }
            if self.peek().is_none() {
                return self.exhausted(Details::UnterminatedObject);
            }
            let value = self.parse_value()?;
            pairs.insert(key, value);

            match self.consume() {
                Some(token) if token.kind == TokenKind::EndObject => {
                    return Ok(JsonValue::Object(pairs))
                }
                Some(token) if token.kind == TokenKind::Comma => {
                    if self.options.allow_trailing_commas && self.next_is(TokenKind::EndObject) {
                        self.consume();
                        return Ok(JsonValue::Object(pairs));
                    }
                }
                Some(token) => {
                    return builder_error!(
                        Details::UnexpectedToken(token.lexeme.to_string()),
                        token.span.start
                    )
                }
                None => return self.exhausted(Details::UnterminatedObject),
            }
        }
    }

    /// Keys are strings, or bare words when unquoted property names are allowed
    fn parse_key(&mut self) -> ParserResult<String> {
        let token = match self.consume() {
            Some(token) => token,
            None => return self.exhausted(Details::UnterminatedObject),
        };
        match token.kind {
            TokenKind::Str => unquote(token),
            TokenKind::Identifier | TokenKind::Bool | TokenKind::Null
                if self.options.allow_unquoted_property_names =>
            {
                Ok(token.lexeme.to_string())
            }
            _ => builder_error!(
                Details::ExpectedPropertyKey(token.lexeme.to_string()),
                token.span.start
            ),
        }
    }

    /// An array is a list of comma separated values. The opening bracket has already been
    /// consumed.
    fn parse_array(&mut self) -> ParserResult<JsonValue> {
        let mut values = vec![];
        if self.next_is(TokenKind::EndArray) {
            self.consume();
            return Ok(JsonValue::Array(values));
        }
        loop {
            if self.peek().is_none() {
                return self.exhausted(Details::UnterminatedArray);
            }
            values.push(self.parse_value()?);

            match self.consume() {
                Some(token) if token.kind == TokenKind::EndArray => {
                    return Ok(JsonValue::Array(values))
                }
                Some(token) if token.kind == TokenKind::Comma => {
                    if self.options.allow_trailing_commas && self.next_is(TokenKind::EndArray) {
                        self.consume();
                        return Ok(JsonValue::Array(values));
                    }
                }
                Some(token) => {
                    return builder_error!(
                        Details::UnexpectedToken(token.lexeme.to_string()),
                        token.span.start
                    )
                }
                None => return self.exhausted(Details::UnterminatedArray),
            }
        }
    }
}

/// Convert a numeric lexeme. Values which overflow to infinity are rejected.
#[cfg(not(feature = "lexical_numerics"))]
fn convert_number(token: &Token) -> ParserResult<f64> {
    match fast_float::parse::<f64, _>(token.lexeme) {
        Ok(n) if n.is_finite() => Ok(n),
        _ => builder_error!(
            Details::InvalidNumber(token.lexeme.to_string()),
            token.span.start
        ),
    }
}

/// Convert a numeric lexeme. Values which overflow to infinity are rejected.
#[cfg(feature = "lexical_numerics")]
fn convert_number(token: &Token) -> ParserResult<f64> {
    match lexical::parse::<f64, _>(token.lexeme.as_bytes()) {
        Ok(n) if n.is_finite() => Ok(n),
        _ => builder_error!(
            Details::InvalidNumber(token.lexeme.to_string()),
            token.span.start
        ),
    }
}

/// Strip the surrounding quotes from a string lexeme and decode any escape sequences
fn unquote(token: &Token) -> ParserResult<String> {
    let lexeme = token.lexeme;
    let quote = lexeme.chars().next();
    let inner = match (quote, lexeme.get(1..lexeme.len().saturating_sub(1))) {
        (Some(quote @ ('"' | '\'')), Some(inner)) if lexeme.ends_with(quote) => inner,
        _ => {
            return builder_error!(
                Details::UnexpectedToken(lexeme.to_string()),
                token.span.start
            )
        }
    };
    if !inner.contains('\\') {
        return Ok(inner.to_string());
    }

    let mut buffer = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            buffer.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => buffer.push('"'),
            Some('\\') => buffer.push('\\'),
            Some('/') => buffer.push('/'),
            Some('b') => buffer.push('\u{0008}'),
            Some('f') => buffer.push('\u{000c}'),
            Some('n') => buffer.push('\n'),
            Some('r') => buffer.push('\r'),
            Some('t') => buffer.push('\t'),
            Some('\'') if quote == Some('\'') => buffer.push('\''),
            Some('u') => buffer.push(decode_unicode_escape(&mut chars, token)?),
            Some(other) => {
                return builder_error!(
                    Details::InvalidEscapeSequence(format!("\\{}", other)),
                    token.span.start
                )
            }
            None => {
                return builder_error!(
                    Details::InvalidEscapeSequence("\\".to_string()),
                    token.span.start
                )
            }
        }
    }
    Ok(buffer)
}

/// Read the four hex digits following `\u`
fn read_hex_quad(chars: &mut std::str::Chars, token: &Token) -> ParserResult<u16> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return builder_error!(
            Details::InvalidUnicodeEscapeSequence(format!("\\u{}", digits)),
            token.span.start
        );
    }
    match u16::from_str_radix(&digits, 16) {
        Ok(unit) => Ok(unit),
        Err(_) => builder_error!(
            Details::InvalidUnicodeEscapeSequence(format!("\\u{}", digits)),
            token.span.start
        ),
    }
}

/// Decode a `\uXXXX` escape, pairing UTF-16 surrogates where required. The leading `\u` has
/// already been consumed.
fn decode_unicode_escape(chars: &mut std::str::Chars, token: &Token) -> ParserResult<char> {
    let high = read_hex_quad(chars, token)?;
    let code = match high {
        0xD800..=0xDBFF => {
            let rest = chars.as_str();
            if !rest.starts_with("\\u") {
                return builder_error!(
                    Details::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", high)),
                    token.span.start
                );
            }
            chars.nth(1);
            let low = read_hex_quad(chars, token)?;
            if !(0xDC00..=0xDFFF).contains(&low) {
                return builder_error!(
                    Details::InvalidUnicodeEscapeSequence(format!(
                        "\\u{:04x}\\u{:04x}",
                        high, low
                    )),
                    token.span.start
                );
            }
            0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
        }
        0xDC00..=0xDFFF => {
            return builder_error!(
                Details::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", high)),
                token.span.start
            )
        }
        _ => u32::from(high),
    };
    match char::from_u32(code) {
        Some(c) => Ok(c),
        None => builder_error!(
            Details::InvalidUnicodeEscapeSequence(format!("\\u{:04x}", high)),
            token.span.start
        ),
    }
}
