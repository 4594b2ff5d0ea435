//! Core pipeline for the RIDL interface-definition language.
//!
//! This crate turns an IDL document describing modules of interfaces
//! of typed functions into C++ header text implementing a
//! remote/virtual dispatch binding. The pipeline is roughly:
//!
//!   source .ridl
//!     -> scanner   (backtracking cursor over the source string)
//!     -> parser    (recursive descent, AST)
//!     -> codegen   (virtual interfaces, client stubs, dispatch switches)
//!
//! The whole run is synchronous and pure: one source string in, one
//! output string out, with a single error kind carrying a byte offset.
//! Higher-level tools (the CLI) should depend on this crate rather
//! than reimplementing the pipeline.

// ---------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------

pub mod error;

// ---------------------------------------------------------------------
// Front-end: scanning and parsing
// ---------------------------------------------------------------------

pub mod scan;
pub mod parser;
pub mod ast;

// ---------------------------------------------------------------------
// Back-end: code generation and compiler orchestration
// ---------------------------------------------------------------------

pub mod codegen;
pub mod compiler;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use compiler::compile;
pub use error::ScanError;
