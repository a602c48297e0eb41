//! Declaration parser (§4.1, second half): turns the raw lines of
//! `vars`/`labels`/`globVarList`/`funcs` into the declaration tables a
//! [`crate::module::ModuleDef`] stores.

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::error::{Diagnostic, PResult, PostfixError};
use crate::value::{Kind, ReturnKind};

/// A declared function's signature: return kind plus positional parameter count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct FuncSig {
    pub return_kind: ReturnKind,
    pub param_count: usize,
}

fn decl_err(module: &str, message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        error: PostfixError::Decl { message: message.into() },
        module: module.to_owned(),
        pc: 0,
        line: 0,
    }
}

/// Parses `.vars(` lines: `<name> <kind>`, duplicate name is a `DeclError`.
pub fn parse_vars(module: &str, lines: &[String]) -> PResult<IndexMap<String, Kind>> {
    let mut table = IndexMap::new();
    for line in lines {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| decl_err(module, format!("empty vars line: '{line}'")))?;
        let kind_str = parts
            .next()
            .ok_or_else(|| decl_err(module, format!("vars line missing kind: '{line}'")))?;
        let kind: Kind = kind_str
            .parse()
            .map_err(|_| decl_err(module, format!("unknown variable kind '{kind_str}' for '{name}'")))?;
        if !kind.is_declarable() {
            return Err(decl_err(module, format!("kind '{kind_str}' is not declarable for variable '{name}'")));
        }
        if table.insert(name.to_owned(), kind).is_some() {
            return Err(decl_err(module, format!("duplicate variable declaration '{name}'")));
        }
    }
    Ok(table)
}

/// Parses `.labels(` lines (numeric-label mode only): `<name> <index>`.
pub fn parse_labels(module: &str, lines: &[String]) -> PResult<AHashMap<String, usize>> {
    let mut table = AHashMap::default();
    for line in lines {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| decl_err(module, format!("empty labels line: '{line}'")))?;
        let index_str = parts
            .next()
            .ok_or_else(|| decl_err(module, format!("labels line missing index: '{line}'")))?;
        let index: usize = index_str
            .parse()
            .map_err(|_| decl_err(module, format!("label '{name}' has non-integer index '{index_str}'")))?;
        if table.insert(name.to_owned(), index).is_some() {
            return Err(decl_err(module, format!("duplicate label declaration '{name}'")));
        }
    }
    Ok(table)
}

/// Parses `.globVarList(` lines: one identifier per line, order preserved.
pub fn parse_glob_var_list(lines: &[String]) -> Vec<String> {
    lines.iter().map(|l| l.trim().to_owned()).collect()
}

/// Parses `.funcs(` lines: `<name> <return-kind> <param-count>`.
pub fn parse_funcs(module: &str, lines: &[String]) -> PResult<IndexMap<String, FuncSig>> {
    let mut table = IndexMap::new();
    for line in lines {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or_else(|| decl_err(module, format!("empty funcs line: '{line}'")))?;
        let return_str = parts
            .next()
            .ok_or_else(|| decl_err(module, format!("func '{name}' missing return kind")))?;
        let param_str = parts
            .next()
            .ok_or_else(|| decl_err(module, format!("func '{name}' missing param count")))?;
        let return_kind: ReturnKind = return_str
            .parse()
            .map_err(|_| decl_err(module, format!("func '{name}' has unknown return kind '{return_str}'")))?;
        let param_count: usize = param_str
            .parse()
            .map_err(|_| decl_err(module, format!("func '{name}' has non-integer param count '{param_str}'")))?;
        if table.insert(name.to_owned(), FuncSig { return_kind, param_count }).is_some() {
            return Err(decl_err(module, format!("duplicate function declaration '{name}'")));
        }
    }
    Ok(table)
}
