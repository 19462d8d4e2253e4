//! Print the OpenAPI document as pretty JSON on stdout.

use std::io::{self, Write};
use std::process::ExitCode;

use shelter::ApiDoc;
use utoipa::OpenApi;

fn main() -> ExitCode {
    let document = match ApiDoc::openapi().to_pretty_json() {
        Ok(document) => document,
        Err(err) => {
            eprintln!("failed to serialise OpenAPI document: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut stdout = io::stdout().lock();
    match writeln!(stdout, "{document}") {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("failed to write OpenAPI document: {err}");
            ExitCode::FAILURE
        }
    }
}
