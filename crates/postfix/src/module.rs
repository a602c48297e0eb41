//! `ModuleDef` (§3 "Module frame", the static half): the parsed,
//! immutable declarations and instruction stream shared by every
//! invocation of a module. Runtime-only fields (`pc`, `stack`, `parent`,
//! `enclosing_module`) live in [`crate::scope::Scope`] /
//! [`crate::vm::Activation`] instead, since a single `ModuleDef` may be
//! shared by many concurrently-active invocations (recursion).

use ahash::AHashMap;
use indexmap::IndexMap;

use crate::error::PResult;
use crate::instr::Instruction;
use crate::parse::{self, FuncSig};
use crate::value::Kind;

/// The parsed declarations and normalized code of one `.postfix` file.
#[derive(Debug)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleDef {
    pub name: String,
    pub variable_types: IndexMap<String, Kind>,
    pub labels: AHashMap<String, usize>,
    pub globals: Vec<String>,
    pub functions: IndexMap<String, FuncSig>,
    pub instructions: Vec<Instruction>,
    /// The module this one is lexically nested inside, derived from the
    /// `$`-segmented file name (§9, structural nesting detection), not
    /// re-derived from the caller at `CALL` time.
    pub lexical_parent: Option<String>,
    /// 1-based source line of the `.code(` marker, used only to compute
    /// an approximate line number in diagnostics.
    pub code_start_offset: usize,
}

impl ModuleDef {
    /// Parses `text` (the contents of `<name>.postfix`) into a `ModuleDef`.
    ///
    /// `symbolic_labels` selects whether labels come from the `.labels(`
    /// section (numeric mode) or are scanned out of the code stream
    /// (symbolic mode, §4.1).
    pub fn parse(name: &str, text: &str, symbolic_labels: bool) -> PResult<Self> {
        let sections = parse::read_sections(name, text)?;
        let variable_types = parse::parse_vars(name, &sections.vars)?;
        let globals = parse::parse_glob_var_list(&sections.glob_var_list);
        let functions = parse::parse_funcs(name, &sections.funcs)?;
        let parsed_code = parse::parse_code(name, &sections.code, sections.code_start_offset, symbolic_labels)?;

        let labels = if symbolic_labels {
            parsed_code.symbolic_labels
        } else {
            parse::parse_labels(name, &sections.labels)?.into_iter().collect()
        };

        Ok(Self {
            name: name.to_owned(),
            variable_types,
            labels,
            globals,
            functions,
            instructions: parsed_code.instructions,
            lexical_parent: lexical_parent_of(name),
            code_start_offset: sections.code_start_offset,
        })
    }

    /// Serializes this module's declarations and normalized instructions
    /// to `postcard` bytes, mirroring the teacher crate's
    /// `Runner::dump`/`Runner::load` parsed-state cache (§10.6). Never
    /// required for normal execution; a loader may use this to skip
    /// re-parsing a module file that has not changed.
    #[cfg(feature = "serialize")]
    pub fn dump(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Deserializes a `ModuleDef` previously produced by [`Self::dump`].
    #[cfg(feature = "serialize")]
    pub fn load_dump(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}

/// Derives the lexical parent module name from a `$`-segmented module
/// name: `"A$B$C"` is nested in `"A$B"`, which is nested in `"A"`; a name
/// with no `$` has no lexical parent.
pub fn lexical_parent_of(name: &str) -> Option<String> {
    name.rsplit_once('$').map(|(parent, _)| parent.to_owned())
}

/// The conventional file name (without extension) for a function nested
/// directly inside module `outer` (§6 "Nested-function naming").
pub fn nested_module_name(outer: &str, func: &str) -> String {
    format!("{outer}${func}")
}
