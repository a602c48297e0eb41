//! Normalized instructions: the `code_parser` output that the executor
//! dispatches on directly, instead of re-deriving meaning from `(lexeme,
//! token-kind)` pairs on every step.

use strum::Display;

use crate::token::{BoolOp, ConvOp, MathOp, RelOp, StackOp};

/// One normalized instruction in a module's instruction stream.
#[derive(Debug, Clone, PartialEq, Display)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum Instruction {
    PushInt(i64),
    PushFloat(f64),
    PushBool(bool),
    PushStr(String),
    PushLVal(String),
    PushRVal(String),
    PushLabel(String),
    Colon,
    Assign,
    Math(MathOp),
    Pow,
    Rel(RelOp),
    Out,
    Inp,
    Conv(ConvOp),
    Bool(BoolOp),
    Cat,
    Stack(StackOp),
    Jf,
    Jump,
    Call(String),
    Ret,
}
