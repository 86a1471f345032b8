//! The core pipeline operates over text, but the [crate::dom::Parser] front door also accepts raw
//! bytes and files. Those are turned into `char`s by a decoder taken from `chisel-decoders`.
//!
//! The [DecoderSelector] implemented within this module is used to instantiate new `char`
//! iterators, based on different encodings. (Currently only ASCII and UTF-8 are supported).
use chisel_decoders::{ascii::AsciiDecoder, utf8::Utf8Decoder};
use std::io::{BufRead, BufReader};

use crate::errors::{Details, ParserResult};
use crate::input_error;

/// Enumeration of different supported encoding types
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Ascii,
}

/// A struct that is essentially a factory for creating new instances of [char] iterators,
/// based on a specified encoding type
#[derive(Debug, Default)]
pub(crate) struct DecoderSelector {}

impl DecoderSelector {
    /// Create and return an instance of a given byte decoder / char iterator based on a specific
    /// encoding
    pub fn new_decoder<'a, Buffer: BufRead>(
        &'a self,
        buffer: &'a mut Buffer,
        encoding: Encoding,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match encoding {
            Encoding::Ascii => Box::new(AsciiDecoder::new(buffer)),
            Encoding::Utf8 => Box::new(Utf8Decoder::new(buffer)),
        }
    }

    /// Check that `bytes` are valid for `encoding`, then drain them through the matching
    /// decoder to produce the text the scanner will run over. The decoders stop quietly at the
    /// first bad byte, so invalid input is rejected up front rather than being truncated.
    pub fn decode_bytes(&self, bytes: &[u8], encoding: Encoding) -> ParserResult<String> {
        match encoding {
            Encoding::Utf8 => {
                if let Err(err) = std::str::from_utf8(bytes) {
                    return input_error!(Details::NonUtf8InputDetected(err.valid_up_to()));
                }
            }
            Encoding::Ascii => {
                if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
                    return input_error!(Details::NonAsciiInputDetected(offset));
                }
            }
        }
        let mut reader = BufReader::new(bytes);
        Ok(self.new_decoder(&mut reader, encoding).collect())
    }
}
