use std::env;
use std::process::ExitCode;
use std::time::Instant;

use chisel_lenient_json::dom::Parser;
use chisel_lenient_json::errors::Stage;
use chisel_lenient_json::DialectOptions;

/// Parse a (possibly legacy-format) JSON file named on the command line, with every dialect
/// extension switched on, and dump the resulting value
fn main() -> ExitCode {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "fixtures/json/lenient/legacy_format.json".to_string());
    let start = Instant::now();
    let parser = Parser::default().with_dialect(DialectOptions::lenient());
    match parser.parse_file(&path) {
        Ok(value) => {
            println!("Parsed {} in {:?}", path, start.elapsed());
            println!("{:#?}", value);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error parsing JSON file: {}", err);
            if err.stage != Stage::Input {
                eprintln!("Invalid JSON syntax");
            }
            ExitCode::FAILURE
        }
    }
}
