//! Code parser (§4.1 normalization rules): converts raw `<lexeme>
//! <token-kind>` lines into normalized [`Instruction`]s, and in
//! symbolic-label mode records label positions by scanning for
//! `label`-then-`colon` pairs in the normalized stream.

use ahash::AHashMap;

use crate::error::{Diagnostic, PResult, PostfixError};
use crate::instr::Instruction;
use crate::token::{BoolOp, ConvOp, MathOp, RelOp, StackOp, TokenKind};

fn decl_err(module: &str, line_no: usize, message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        error: PostfixError::Decl { message: message.into() },
        module: module.to_owned(),
        pc: 0,
        line: line_no,
    }
}

/// Splits one already-comment-stripped code line into its lexeme and
/// token-kind columns, honoring `"…"` quoting so a quoted lexeme may
/// contain whitespace.
fn split_columns(module: &str, line_no: usize, line: &str) -> PResult<(String, String)> {
    if line == "RET" {
        return Ok(("RET".to_owned(), "RET".to_owned()));
    }
    if let Some(rest) = line.strip_prefix('"') {
        let end = rest.find('"').ok_or_else(|| decl_err(module, line_no, format!("unterminated string literal: '{line}'")))?;
        let lexeme = rest[..end].to_owned();
        let kind_str = rest[end + 1..].trim().to_owned();
        return Ok((lexeme, kind_str));
    }
    let mut parts = line.splitn(2, char::is_whitespace);
    let lexeme = parts.next().unwrap_or_default().to_owned();
    let kind_str = parts.next().unwrap_or_default().trim().to_owned();
    Ok((lexeme, kind_str))
}

/// Parses one normalized `code` line into an [`Instruction`].
fn parse_instruction(module: &str, line_no: usize, lexeme: &str, kind: TokenKind) -> PResult<Instruction> {
    let err = |message: String| decl_err(module, line_no, message);
    match kind {
        TokenKind::Int => lexeme
            .parse()
            .map(Instruction::PushInt)
            .map_err(|_| err(format!("invalid int literal '{lexeme}'"))),
        TokenKind::Float => lexeme
            .parse()
            .map(Instruction::PushFloat)
            .map_err(|_| err(format!("invalid float literal '{lexeme}'"))),
        TokenKind::Bool => match lexeme.to_ascii_uppercase().as_str() {
            "TRUE" => Ok(Instruction::PushBool(true)),
            "FALSE" => Ok(Instruction::PushBool(false)),
            _ => Err(err(format!("invalid bool literal '{lexeme}'"))),
        },
        TokenKind::String => Ok(Instruction::PushStr(lexeme.to_owned())),
        TokenKind::LVal => Ok(Instruction::PushLVal(lexeme.to_owned())),
        TokenKind::RVal => Ok(Instruction::PushRVal(lexeme.to_owned())),
        TokenKind::Label => Ok(Instruction::PushLabel(lexeme.to_owned())),
        TokenKind::Colon => Ok(Instruction::Colon),
        TokenKind::AssignOp => Ok(Instruction::Assign),
        TokenKind::MathOp => lexeme
            .parse()
            .map(Instruction::Math)
            .map_err(|_| err(format!("unknown math_op lexeme '{lexeme}'"))),
        TokenKind::PowOp => Ok(Instruction::Pow),
        TokenKind::RelOp => lexeme
            .parse()
            .map(Instruction::Rel)
            .map_err(|_| err(format!("unknown rel_op lexeme '{lexeme}'"))),
        TokenKind::OutOp => Ok(Instruction::Out),
        TokenKind::InpOp => Ok(Instruction::Inp),
        TokenKind::Conv => lexeme
            .parse()
            .map(Instruction::Conv)
            .map_err(|_| err(format!("unknown conv lexeme '{lexeme}'"))),
        TokenKind::BoolOp => lexeme
            .parse()
            .map(Instruction::Bool)
            .map_err(|_| err(format!("unknown bool_op lexeme '{lexeme}'"))),
        TokenKind::CatOp => Ok(Instruction::Cat),
        TokenKind::StackOp => lexeme
            .parse()
            .map(Instruction::Stack)
            .map_err(|_| err(format!("unknown stack_op lexeme '{lexeme}'"))),
        TokenKind::Jf => Ok(Instruction::Jf),
        TokenKind::Jump => Ok(Instruction::Jump),
        TokenKind::Call => Ok(Instruction::Call(lexeme.to_owned())),
        TokenKind::Ret => Ok(Instruction::Ret),
    }
}

/// Result of parsing a module's `.code(` section.
pub struct ParsedCode {
    pub instructions: Vec<Instruction>,
    /// Populated only in symbolic-label mode; empty otherwise.
    pub symbolic_labels: AHashMap<String, usize>,
}

/// Parses every raw code line, reporting the first malformed one. When
/// `symbolic_labels` is set, also scans the resulting stream for
/// `label`-then-`colon` pairs to populate the label table (§4.1,
/// §9 Open Question 1: duplicates are a `DeclError`).
pub fn parse_code(module: &str, lines: &[String], code_start_offset: usize, symbolic_labels: bool) -> PResult<ParsedCode> {
    let mut instructions = Vec::with_capacity(lines.len());
    for (offset, line) in lines.iter().enumerate() {
        let line_no = code_start_offset + offset + 1;
        let (lexeme, kind_str) = split_columns(module, line_no, line)?;
        let kind: TokenKind = kind_str
            .parse()
            .map_err(|_| decl_err(module, line_no, format!("unknown token kind '{kind_str}'")))?;
        instructions.push(parse_instruction(module, line_no, &lexeme, kind)?);
    }

    let mut table = AHashMap::default();
    if symbolic_labels {
        for i in 0..instructions.len().saturating_sub(1) {
            if let (Instruction::PushLabel(name), Instruction::Colon) = (&instructions[i], &instructions[i + 1]) {
                if table.insert(name.clone(), i).is_some() {
                    return Err(decl_err(module, code_start_offset, format!("duplicate symbolic label '{name}'")));
                }
            }
        }
    }

    Ok(ParsedCode { instructions, symbolic_labels: table })
}
