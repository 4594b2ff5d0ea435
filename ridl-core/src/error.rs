use thiserror::Error;

/// The single error kind of the pipeline.
///
/// Every malformed-input condition, lexical or grammatical, surfaces
/// through this type: the byte offset at which the failing expectation
/// was discovered plus a short description of what was expected. The
/// first error aborts the whole compilation; there is no recovery and
/// no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("scan error at byte {position}: {message}")]
pub struct ScanError {
    /// Byte offset into the source string.
    pub position: usize,
    /// What was expected, e.g. `expected separator '('`.
    pub message: String,
}
