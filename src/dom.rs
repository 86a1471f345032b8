//! The DOM parser
//!
//! [Parser] is the configurable front door to the scanner/builder pipeline. It carries the
//! dialect, the byte encoding and the nesting limit, and accepts input as a string slice, a
//! byte slice or a file path. Empty or whitespace-only input is rejected up front.
use std::fs;
use std::path::Path;

use crate::builder::{Builder, DEFAULT_MAX_DEPTH};
use crate::decoders::{DecoderSelector, Encoding};
use crate::errors::{Details, ParserResult};
use crate::input_error;
use crate::options::DialectOptions;
use crate::scanner::scan;
use crate::JsonValue;

/// Main JSON parser struct
#[derive(Debug)]
pub struct Parser {
    decoders: DecoderSelector,
    encoding: Encoding,
    dialect: DialectOptions,
    max_depth: usize,
}

impl Default for Parser {
    /// The default encoding is Utf-8, the default dialect is strict JSON
    fn default() -> Self {
        Self {
            decoders: Default::default(),
            encoding: Default::default(),
            dialect: Default::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    /// Create a new instance of the parser using a specific [Encoding]
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Default::default()
        }
    }

    /// Switch on the dialect extensions given by `dialect`
    pub fn with_dialect(mut self, dialect: DialectOptions) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the maximum nesting depth of arrays and objects
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn dialect(&self) -> DialectOptions {
        self.dialect
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Parse the contents of a file. Missing or unreadable files are reported as
    /// [Details::InvalidFile]
    pub fn parse_file<PathLike: AsRef<Path>>(&self, path: PathLike) -> ParserResult<JsonValue> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "parsing file");
        match fs::read(path) {
            Ok(bytes) => self.parse_bytes(&bytes),
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "unable to read file");
                input_error!(Details::InvalidFile(path.display().to_string()))
            }
        }
    }

    /// Decode and parse a byte slice using the configured [Encoding]. Bytes which are invalid
    /// for that encoding are reported as input errors
    pub fn parse_bytes(&self, bytes: &[u8]) -> ParserResult<JsonValue> {
        let text = self.decoders.decode_bytes(bytes, self.encoding)?;
        self.parse_str(&text)
    }

    /// Parse a string slice
    pub fn parse_str(&self, str: &str) -> ParserResult<JsonValue> {
        tracing::debug!(length = str.len(), dialect = ?self.dialect, "parsing input");
        if str.trim().is_empty() {
            return input_error!(Details::ZeroLengthInput);
        }
        let result = scan(str, self.dialect).and_then(|tokens| {
            Builder::new(&tokens, self.dialect)
                .with_max_depth(self.max_depth)
                .build()
        });
        if let Err(err) = &result {
            tracing::debug!(error = %err, "parse failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use crate::decoders::Encoding;
    use crate::dom::Parser;
    use crate::errors::{Details, Stage};
    use crate::options::DialectOptions;
    use crate::{object_of, relative_file, JsonValue};
    use bytesize::ByteSize;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Instant;

    #[test]
    fn should_parse_strings_directly() {
        let source = r#"{
            "test" : 1232.0,
            "some other" : "thasdasd",
            "a bool" : true,
            "an array" : [1,2,3,4,5.8,6,7.2,7,8,10]
        }"#;
        let parsed = Parser::default().parse_str(source).unwrap();
        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["test"], JsonValue::Number(1232.0));
        assert_eq!(object["an array"].as_array().unwrap().len(), 10);
    }

    #[test]
    fn should_parse_bytes() {
        let parser = Parser::with_encoding(Encoding::Ascii);
        assert_eq!(
            parser.parse_bytes(b"{\"k\": [true, null]}").unwrap(),
            object_of! { "k" => JsonValue::Array(vec![JsonValue::Boolean(true), JsonValue::Null]) }
        );
    }

    #[test]
    fn should_reject_bytes_invalid_for_the_encoding() {
        let err = Parser::default()
            .parse_bytes(b"{\"a\": 1}\xff garbage")
            .unwrap_err();
        assert_eq!(err.stage, Stage::Input);
        assert_eq!(err.details, Details::NonUtf8InputDetected(8));

        let err = Parser::default()
            .parse_bytes(b"[1, 2, \"\xff\xfe\", 3]")
            .unwrap_err();
        assert_eq!(err.stage, Stage::Input);
        assert_eq!(err.details, Details::NonUtf8InputDetected(8));

        let err = Parser::with_encoding(Encoding::Ascii)
            .parse_bytes("[\"é\"]".as_bytes())
            .unwrap_err();
        assert_eq!(err.stage, Stage::Input);
        assert_eq!(err.details, Details::NonAsciiInputDetected(2));
        assert!(Parser::default().parse_bytes("[\"é\"]".as_bytes()).is_ok());
    }

    #[test]
    fn should_reject_blank_input() {
        for input in ["", "   ", "\n\t\r\n"] {
            let err = Parser::default().parse_str(input).unwrap_err();
            assert_eq!(err.stage, Stage::Input);
            assert_eq!(err.details, Details::ZeroLengthInput);
        }
        let err = Parser::default().parse_bytes(b"").unwrap_err();
        assert_eq!(err.details, Details::ZeroLengthInput);
    }

    #[test]
    fn should_report_missing_files() {
        let path = relative_file!("fixtures/json/does_not_exist.json");
        let err = Parser::default().parse_file(&path).unwrap_err();
        assert_eq!(err.stage, Stage::Input);
        assert!(matches!(err.details, Details::InvalidFile(_)));
    }

    #[test]
    fn should_apply_dialect_and_depth() {
        let parser = Parser::default()
            .with_dialect(DialectOptions::lenient())
            .with_max_depth(1);
        assert_eq!(parser.dialect(), DialectOptions::lenient());
        assert_eq!(parser.encoding(), Encoding::Utf8);
        assert_eq!(
            parser.parse_str("{k: 'v',}").unwrap(),
            object_of! { "k" => JsonValue::String("v".to_string()) }
        );
        let err = parser.parse_str("{k: [1]}").unwrap_err();
        assert_eq!(err.details, Details::NestingTooDeep(1));
    }

    #[test]
    fn should_parse_valid_fixtures() {
        for f in fs::read_dir(relative_file!("fixtures/json/valid")).unwrap() {
            let path = f.unwrap().path();
            if path.is_file() {
                let len = fs::metadata(&path).unwrap().len();
                let start = Instant::now();
                let parsed = Parser::default().parse_file(&path);
                if parsed.is_err() {
                    println!("Parse of {:?} failed with {:?}", &path, &parsed);
                }
                assert!(parsed.is_ok());
                println!(
                    "Parsed {} in {:?} [{:?}]",
                    ByteSize(len),
                    start.elapsed(),
                    path,
                );
            }
        }
    }

    #[test]
    fn should_parse_lenient_fixtures_only_with_extensions() {
        for f in fs::read_dir(relative_file!("fixtures/json/lenient")).unwrap() {
            let path = f.unwrap().path();
            if path.is_file() {
                assert!(Parser::default().parse_file(&path).is_err());
                let lenient = Parser::default().with_dialect(DialectOptions::lenient());
                let parsed = lenient.parse_file(&path);
                if parsed.is_err() {
                    println!("Parse of {:?} failed with {:?}", &path, &parsed);
                }
                assert!(parsed.is_ok());
            }
        }
    }

    #[test]
    fn should_reject_invalid_fixtures() {
        for f in fs::read_dir(relative_file!("fixtures/json/invalid")).unwrap() {
            let path = f.unwrap().path();
            if path.is_file() {
                let parsed = Parser::default()
                    .with_dialect(DialectOptions::lenient())
                    .parse_file(&path);
                println!("Parse of {:?} = {:?}", &path, &parsed);
                assert!(parsed.is_err());
            }
        }
    }
}
