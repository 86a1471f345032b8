//! The scanner converts raw input text into a flat sequence of [Token]s, honouring whichever
//! dialect extensions have been enabled.
//!
//! Scanning is a single left-to-right pass with an explicit cursor and no backtracking. At each
//! cursor position the scanner tries, in order: whitespace, comments, single-quoted strings,
//! bare identifiers, structural punctuation, double-quoted strings, literal keywords, and
//! finally numbers. The dialect-specific checks come first so that they take priority on
//! ambiguous characters such as `'` or `/`.
//!
//! Strings are *not* unescaped here. The lexeme of a string token is the raw source text
//! including its quotes, and escape processing is left to the builder.
use crate::coords::Coords;
use crate::errors::{Details, ParserResult};
use crate::options::DialectOptions;
use crate::tokens::{Token, TokenKind};
use crate::{packed_token, scanner_error};

const TRUE_LITERAL: &str = "true";
const FALSE_LITERAL: &str = "false";
const NULL_LITERAL: &str = "null";

/// Scan the whole of `input` into a vector of tokens, failing on the first lexical error
pub fn scan(input: &str, options: DialectOptions) -> ParserResult<Vec<Token>> {
    let tokens = Scanner::new(input, options).collect::<ParserResult<Vec<Token>>>()?;
    tracing::trace!(tokens = tokens.len(), "scanned input");
    Ok(tokens)
}

/// Whitespace that may separate tokens
#[inline]
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline]
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// The permissive character class used for numbers. Malformed runs such as `1.2.3` are
/// accepted here and rejected later during conversion.
#[inline]
fn is_numeric_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')
}

/// A scanner over a borrowed input string. Yields tokens through [Iterator], and stops after
/// the first error it reports.
pub struct Scanner<'a> {
    /// The complete input
    input: &'a str,
    /// Dialect extensions in force
    options: DialectOptions,
    /// Byte offset of the cursor within `input`
    offset: usize,
    /// Coordinates of the character under the cursor
    coords: Coords,
    /// Coordinates of the most recently consumed character
    last: Coords,
    /// Set once the input is exhausted or an error has been produced
    finished: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, options: DialectOptions) -> Self {
        Scanner {
            input,
            options,
            offset: 0,
            coords: Coords::default(),
            last: Coords::default(),
            finished: false,
        }
    }

    /// The unconsumed remainder of the input
    #[inline]
    fn remaining(&self) -> &'a str {
        &self.input[self.offset..]
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    #[inline]
    fn peek_second(&self) -> Option<char> {
        self.remaining().chars().nth(1)
    }

    /// Consume a single character, updating the cursor coordinates
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        self.last = self.coords;
        self.coords = self.coords.advance(c);
        Some(c)
    }

    /// Consume characters for as long as `pred` holds
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    /// Produce the next token, or `None` at the end of the input
    pub fn next_token(&mut self) -> ParserResult<Option<Token<'a>>> {
        loop {
            let c = match self.peek() {
                Some(c) => c,
                None => return Ok(None),
            };
            match c {
                c if is_whitespace(c) => {
                    self.advance();
                }
                '/' if self.options.allow_comments
                    && matches!(self.peek_second(), Some('*') | Some('/')) =>
                {
                    self.skip_comment()?;
                }
                '\'' if self.options.allow_single_quoted_strings => {
                    return self.match_string('\'').map(Some);
                }
                c if self.options.allow_unquoted_property_names && is_identifier_start(c) => {
                    return Ok(Some(self.match_identifier()));
                }
                '{' => return Ok(Some(self.match_single(TokenKind::StartObject))),
                '}' => return Ok(Some(self.match_single(TokenKind::EndObject))),
                '[' => return Ok(Some(self.match_single(TokenKind::StartArray))),
                ']' => return Ok(Some(self.match_single(TokenKind::EndArray))),
                ':' => return Ok(Some(self.match_single(TokenKind::Colon))),
                ',' => return Ok(Some(self.match_single(TokenKind::Comma))),
                '"' => return self.match_string('"').map(Some),
                't' if self.remaining().starts_with(TRUE_LITERAL) => {
                    return Ok(Some(self.match_literal(TokenKind::Bool, TRUE_LITERAL)));
                }
                'f' if self.remaining().starts_with(FALSE_LITERAL) => {
                    return Ok(Some(self.match_literal(TokenKind::Bool, FALSE_LITERAL)));
                }
                'n' if self.remaining().starts_with(NULL_LITERAL) => {
                    return Ok(Some(self.match_literal(TokenKind::Null, NULL_LITERAL)));
                }
                c if c.is_ascii_digit() => return Ok(Some(self.match_number())),
                '-' if matches!(self.peek_second(), Some(d) if d.is_ascii_digit()) => {
                    return Ok(Some(self.match_number()));
                }
                c => return scanner_error!(Details::UnexpectedCharacter(c), self.coords),
            }
        }
    }

    /// Skip a block or line comment. The cursor sits on the leading `/`.
    fn skip_comment(&mut self) -> ParserResult<()> {
        let start = self.coords;
        self.advance();
        match self.advance() {
            Some('*') => loop {
                match self.advance() {
                    Some('*') if self.peek() == Some('/') => {
                        self.advance();
                        return Ok(());
                    }
                    Some(_) => (),
                    None => return scanner_error!(Details::UnterminatedComment, start),
                }
            },
            _ => {
                self.advance_while(|c| c != '\n');
                Ok(())
            }
        }
    }

    fn match_single(&mut self, kind: TokenKind) -> Token<'a> {
        let start_offset = self.offset;
        let start = self.coords;
        self.advance();
        packed_token!(kind, &self.input[start_offset..self.offset], start)
    }

    fn match_literal(&mut self, kind: TokenKind, literal: &'static str) -> Token<'a> {
        let start = self.coords;
        for _ in literal.chars() {
            self.advance();
        }
        packed_token!(kind, literal, start, self.last)
    }

    /// Match a quoted string delimited by `quote`. A backslash always escapes the character that
    /// follows it, whatever that character is.
    fn match_string(&mut self, quote: char) -> ParserResult<Token<'a>> {
        let start_offset = self.offset;
        let start = self.coords;
        self.advance();
        loop {
            match self.advance() {
                Some('\\') => {
                    if self.advance().is_none() {
                        return scanner_error!(Details::UnterminatedString, start);
                    }
                }
                Some(c) if c == quote => break,
                Some(_) => (),
                None => return scanner_error!(Details::UnterminatedString, start),
            }
        }
        Ok(packed_token!(
            TokenKind::Str,
            &self.input[start_offset..self.offset],
            start,
            self.last
        ))
    }

    /// Match a bare word. Words spelling out one of the literal keywords keep their literal kind
    /// so that `true`, `false` and `null` remain usable as values.
    fn match_identifier(&mut self) -> Token<'a> {
        let start_offset = self.offset;
        let start = self.coords;
        self.advance();
        self.advance_while(is_identifier_char);
        let word = &self.input[start_offset..self.offset];
        let kind = match word {
            TRUE_LITERAL | FALSE_LITERAL => TokenKind::Bool,
            NULL_LITERAL => TokenKind::Null,
            _ => TokenKind::Identifier,
        };
        packed_token!(kind, word, start, self.last)
    }

    fn match_number(&mut self) -> Token<'a> {
        let start_offset = self.offset;
        let start = self.coords;
        self.advance();
        self.advance_while(is_numeric_char);
        packed_token!(
            TokenKind::Num,
            &self.input[start_offset..self.offset],
            start,
            self.last
        )
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = ParserResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
