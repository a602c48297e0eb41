//! The closed error taxonomy (§7) as a single `enum`, following the shape of
//! the teacher's own `ResourceError`: one variant per taxon, a hand-written
//! `Display` with a fixed message template per variant, and a blanket
//! `std::error::Error` impl. No `anyhow`/`thiserror` — the taxonomy is closed
//! and every message needs to stay a predictable, testable shape.

use std::fmt;

/// One of the nine closed error taxa from SPEC_FULL.md §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostfixError {
    /// Module file missing or unreadable.
    Io { path: String, reason: String },
    /// Malformed section content, unknown token kind, unquoted string, bad
    /// return kind, duplicate variable/label.
    Decl { message: String },
    /// Reference to an unknown variable, label, or function.
    Name { message: String },
    /// Read of an uninitialized variable.
    Uninit { name: String },
    /// Operand kinds violate an operator's contract, or a param/return kind mismatch.
    Type { message: String },
    /// Division or modulo by zero.
    Arith { operator: String },
    /// `s2i`/`s2f` failed to parse its input.
    Conv { message: String },
    /// Stack underflow, or the recursion-depth guard tripped (§5).
    Stack { message: String },
    /// Jump to an undefined label.
    Label { name: String },
}

impl fmt::Display for PostfixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => write!(f, "IOError: cannot read module '{path}': {reason}"),
            Self::Decl { message } => write!(f, "DeclError: {message}"),
            Self::Name { message } => write!(f, "NameError: {message}"),
            Self::Uninit { name } => write!(f, "UninitError: variable '{name}' read before assignment"),
            Self::Type { message } => write!(f, "TypeError: {message}"),
            Self::Arith { operator } => write!(f, "ArithError: '{operator}' by zero"),
            Self::Conv { message } => write!(f, "ConvError: {message}"),
            Self::Stack { message } => write!(f, "StackError: {message}"),
            Self::Label { name } => write!(f, "LabelError: undefined label '{name}'"),
        }
    }
}

impl std::error::Error for PostfixError {}

/// A `PostfixError` plus the execution context it was raised at: `(kind,
/// message, pc, module-name, source-line-approximation)` from §7.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: PostfixError,
    pub module: String,
    pub pc: usize,
    /// 1-based approximate source line, derived from the module's
    /// `.code(` offset plus `pc`. Diagnostic-only, not load-bearing.
    pub line: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (module '{}', pc {}, near line {})", self.error, self.module, self.pc, self.line)
    }
}

impl std::error::Error for Diagnostic {}

/// Result alias used throughout the loader and executor.
pub type PResult<T> = Result<T, Diagnostic>;
