//! The tagged value model: every stack entry and every stored variable is a
//! `(payload, kind)` pair. `Kind` is the closed set from the data model; `Value`
//! carries the matching payload.

use std::fmt;

use strum::{Display, EnumString};

/// Declared or runtime type tag for a value.
///
/// The four `int|float|bool|string` kinds are declarable (they appear in
/// `.vars`/`.funcs` sections); `LVal`/`RVal`/`Label` are syntactic kinds that
/// only ever appear transiently on the operand stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Kind {
    Int,
    Float,
    Bool,
    String,
    LVal,
    RVal,
    Label,
}

impl Kind {
    /// Whether this kind may be declared on a variable or function return type.
    #[must_use]
    pub fn is_declarable(self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Bool | Self::String)
    }

    /// Whether this kind participates in `math_op`/`pow_op`.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Float)
    }
}

/// A function's declared return type, which additionally allows `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ReturnKind {
    Int,
    Float,
    Bool,
    String,
    Void,
}

impl ReturnKind {
    /// Converts to the matching declarable `Kind`, if any (`Void` has none).
    #[must_use]
    pub fn as_kind(self) -> Option<Kind> {
        match self {
            Self::Int => Some(Kind::Int),
            Self::Float => Some(Kind::Float),
            Self::Bool => Some(Kind::Bool),
            Self::String => Some(Kind::String),
            Self::Void => None,
        }
    }
}

/// A tagged stack entry / stored variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    /// Identifier awaiting assignment (`assign_op` left operand).
    LVal(String),
    /// Identifier awaiting dereference through the scope chain.
    RVal(String),
    /// Identifier awaiting a jump/colon consumer.
    Label(String),
}

impl Value {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Bool(_) => Kind::Bool,
            Self::Str(_) => Kind::String,
            Self::LVal(_) => Kind::LVal,
            Self::RVal(_) => Kind::RVal,
            Self::Label(_) => Kind::Label,
        }
    }

    /// The identifier text carried by `LVal`/`RVal`/`Label`, if this is one of those.
    #[must_use]
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::LVal(name) | Self::RVal(name) | Self::Label(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// Human-readable rendering used by `out_op` and the trace sink.
    ///
    /// Floats use Rust's round-trippable `Display`; bools print lowercase
    /// `true`/`false` (see SPEC_FULL.md §9 Open Question 3).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::LVal(n) | Self::RVal(n) | Self::Label(n) => write!(f, "{n}"),
        }
    }
}
