//! Recursive-descent parser for the IDL grammar.
//!
//! ```text
//! module   := "module" namespacedIdent include* iface*
//! include  := "include" stringLiteral
//! iface    := ident "{" func* "}"
//! func     := ident "(" (arg ("," arg)*)? ")" "->" type
//! arg      := ident ":" type
//! ```
//!
//! Every rule is built from the scanner's save/restore combinators, so
//! failed alternatives never move the cursor. Parsing is fail-fast: the
//! first unmet expectation aborts with the offset at time of failure.

use crate::ast::{Func, Iface, Module};
use crate::error::ScanError;
use crate::scan::{Scanner, Token};

/// Parse a whole IDL document into a [`Module`].
pub fn parse(source: &str) -> Result<Module, ScanError> {
    let mut s = Scanner::new(source);
    parse_module(&mut s)
}

fn parse_module(s: &mut Scanner) -> Result<Module, ScanError> {
    s.expect_keyword("module")?;
    let mut module = Module::new(parse_namespaced_ident(s)?.text);
    while s.try_skip_keyword("include") {
        module.includes.push(parse_string(s)?.text);
    }
    loop {
        s.skip_whitespace();
        if s.at_end() {
            break;
        }
        let iface = parse_iface(s)?;
        module.insert_iface(iface);
    }
    Ok(module)
}

fn parse_iface(s: &mut Scanner) -> Result<Iface, ScanError> {
    let mut iface = Iface::new(parse_ident(s)?.text);
    s.expect_separator("{")?;
    while !s.try_skip_separator("}") {
        let func = parse_func(s)?;
        iface.insert_func(func);
        s.expect_separator(",")?;
    }
    Ok(iface)
}

fn parse_func(s: &mut Scanner) -> Result<Func, ScanError> {
    let name = parse_ident(s)?.text;
    s.expect_separator("(")?;
    let mut args = Vec::new();
    while !s.try_skip_separator(")") {
        let arg_name = parse_ident(s)?.text;
        s.expect_separator(":")?;
        let arg_type = parse_type(s)?.text;
        args.push((arg_type, arg_name));
        s.try_skip_separator(",");
    }
    s.expect_separator("->")?;
    let res = parse_type(s)?.text;
    Ok(Func { name, args, res })
}

/// `ident`: alphabetic start, then alphanumerics or underscores.
/// Surrounding whitespace is consumed; the capture excludes it.
fn parse_ident(s: &mut Scanner) -> Result<Token, ScanError> {
    s.skip_whitespace();
    if !s.current().is_alphabetic() {
        return Err(s.error("expected identifier"));
    }
    s.mark();
    skip_ident_chars(s);
    let ident = s.capture();
    s.skip_whitespace();
    Ok(ident)
}

/// `namespacedIdent`: an ident optionally followed by `::`-separated
/// idents, captured as one token spanning the whole chain.
fn parse_namespaced_ident(s: &mut Scanner) -> Result<Token, ScanError> {
    s.skip_whitespace();
    if !s.current().is_alphabetic() {
        return Err(s.error("expected identifier"));
    }
    s.mark();
    skip_ident_chars(s);
    while s.try_skip_literal("::") {
        if !s.current().is_alphabetic() {
            return Err(s.error("expected identifier"));
        }
        skip_ident_chars(s);
    }
    Ok(s.capture())
}

fn skip_ident_chars(s: &mut Scanner) {
    while s.current().is_alphanumeric() || s.current() == '_' {
        s.advance();
    }
}

fn bracket_pair(ch: char) -> Option<(&'static str, &'static str)> {
    match ch {
        '{' => Some(("{", "}")),
        '[' => Some(("[", "]")),
        '(' => Some(("(", ")")),
        '<' => Some(("<", ">")),
        _ => None,
    }
}

/// `type`: everything up to (but not consuming) the next top-level `,`
/// or `)`. Bracket pairs nest, so separators inside a nested type
/// expression do not terminate the capture early. The text is opaque to
/// the compiler and copied verbatim into the output.
fn parse_type(s: &mut Scanner) -> Result<Token, ScanError> {
    s.mark();
    while !s.at_end() && !s.check_separator(",") && !s.check_separator(")") {
        if let Some((open, close)) = bracket_pair(s.current()) {
            skip_brackets(s, open, close)?;
        } else {
            s.advance();
        }
    }
    Ok(s.capture())
}

fn skip_brackets(s: &mut Scanner, open: &str, close: &str) -> Result<(), ScanError> {
    s.expect_separator(open)?;
    while !s.at_end() && !s.try_skip_separator(close) {
        if let Some((inner_open, inner_close)) = bracket_pair(s.current()) {
            skip_brackets(s, inner_open, inner_close)?;
        } else {
            s.advance();
        }
    }
    Ok(())
}

/// The opening delimiter of a string literal: one or more repeated `'`
/// or `"` characters. A delimiter longer than one character makes the
/// literal raw (backslash has no escaping role).
fn parse_quotes(s: &mut Scanner) -> Result<(String, bool), ScanError> {
    let first = s.current();
    if first != '"' && first != '\'' {
        return Err(s.error("expected quotes"));
    }
    s.mark();
    while s.current() == first {
        s.advance();
    }
    let quotes = s.capture().text;
    let raw = quotes.len() > 1;
    Ok((quotes, raw))
}

/// `stringLiteral`: text delimited by the quote sequence returned by
/// [`parse_quotes`]. In non-raw literals a backslash and the following
/// character are consumed as an opaque pair; the captured text keeps
/// both unprocessed. The capture excludes the delimiters.
fn parse_string(s: &mut Scanner) -> Result<Token, ScanError> {
    let (quotes, raw) = parse_quotes(s)?;
    s.mark();
    while !s.at_end() && !s.check_literal(&quotes) {
        if s.current() == '\\' && !raw {
            s.advance();
            if s.at_end() {
                return Err(s.error("expected escape sequence"));
            }
        }
        s.advance();
    }
    let tok = s.capture();
    s.try_skip_literal(&quotes);
    Ok(tok)
}
