//! Closed token-kind set read from `.code(` lines, plus the operator
//! sub-enums each operator kind's lexeme is parsed into.

use strum::{Display, EnumString};

/// The closed set of token kinds that may appear as the second column of a
/// `.code(` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum TokenKind {
    #[strum(serialize = "int")]
    Int,
    #[strum(serialize = "float")]
    Float,
    #[strum(serialize = "bool")]
    Bool,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "l-val")]
    LVal,
    #[strum(serialize = "r-val")]
    RVal,
    #[strum(serialize = "label")]
    Label,
    #[strum(serialize = "colon")]
    Colon,
    #[strum(serialize = "assign_op")]
    AssignOp,
    #[strum(serialize = "math_op")]
    MathOp,
    #[strum(serialize = "pow_op")]
    PowOp,
    #[strum(serialize = "rel_op")]
    RelOp,
    #[strum(serialize = "out_op")]
    OutOp,
    #[strum(serialize = "inp_op")]
    InpOp,
    #[strum(serialize = "conv")]
    Conv,
    #[strum(serialize = "bool_op")]
    BoolOp,
    #[strum(serialize = "cat_op")]
    CatOp,
    #[strum(serialize = "stack_op")]
    StackOp,
    #[strum(serialize = "jf")]
    Jf,
    #[strum(serialize = "jump")]
    Jump,
    #[strum(serialize = "CALL")]
    Call,
    #[strum(serialize = "RET")]
    Ret,
}

/// `math_op` lexemes (unary `NEG`, binary `+ - * / %`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum MathOp {
    #[strum(serialize = "NEG")]
    Neg,
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
    #[strum(serialize = "*")]
    Mul,
    #[strum(serialize = "/")]
    Div,
    #[strum(serialize = "%")]
    Mod,
}

impl MathOp {
    #[must_use]
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Neg)
    }
}

/// `rel_op` lexemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum RelOp {
    #[strum(serialize = ">")]
    Gt,
    #[strum(serialize = "<")]
    Lt,
    #[strum(serialize = ">=")]
    Ge,
    #[strum(serialize = "<=")]
    Le,
    #[strum(serialize = "==")]
    Eq,
    #[strum(serialize = "!=")]
    Ne,
}

/// `bool_op` lexemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum BoolOp {
    #[strum(serialize = "NOT")]
    Not,
    #[strum(serialize = "AND")]
    And,
    #[strum(serialize = "OR")]
    Or,
}

impl BoolOp {
    #[must_use]
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }
}

/// `conv` lexemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ConvOp {
    #[strum(serialize = "i2f")]
    I2F,
    #[strum(serialize = "f2i")]
    F2I,
    #[strum(serialize = "i2s")]
    I2S,
    #[strum(serialize = "s2i")]
    S2I,
    #[strum(serialize = "f2s")]
    F2S,
    #[strum(serialize = "s2f")]
    S2F,
    #[strum(serialize = "i2b")]
    I2B,
    #[strum(serialize = "b2i")]
    B2I,
}

/// `stack_op` lexemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum StackOp {
    #[strum(serialize = "POP")]
    Pop,
    #[strum(serialize = "DUP")]
    Dup,
    #[strum(serialize = "SWAP")]
    Swap,
    #[strum(serialize = "NOP")]
    Nop,
}
