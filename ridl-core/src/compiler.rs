//! Compiler orchestration: the one entry point tying the pipeline
//! together. The core consumes a source string and produces an output
//! string; reading and writing files is the caller's business.

use crate::codegen::generate;
use crate::error::ScanError;
use crate::parser::parse;

/// Compile an IDL document to C++ header text.
///
/// `source_name` is only echoed into the generated preamble so readers
/// of the output can find the file it was generated from. The first
/// malformed-input condition aborts with a [`ScanError`]; there is no
/// partial output.
pub fn compile(source: &str, source_name: &str) -> Result<String, ScanError> {
    let module = parse(source)?;
    Ok(generate(&module, source_name))
}
