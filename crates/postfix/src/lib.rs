//! Interpreter for a small, statically typed, stack-oriented postfix
//! module language (SPEC_FULL.md §1–§9).
//!
//! The crate is split along the component table in §2: [`parse`] (module
//! source reader + declaration parser + code parser), [`module`] (the
//! parsed `ModuleDef`), [`scope`] (the scope chain), [`vm`] (the executor
//! and call/return machinery), [`tracer`] (the debug sink), and [`io`]
//! (the host I/O pair). [`loader`] ties parsing to a host-supplied
//! [`ModuleSource`].

pub mod error;
pub mod instr;
pub mod io;
pub mod loader;
pub mod module;
mod parse;
pub mod scope;
pub mod token;
pub mod tracer;
pub mod value;
pub mod vm;

pub use error::{Diagnostic, PResult, PostfixError};
pub use instr::Instruction;
pub use io::{CollectOutput, FixedInput, InputSource, NullOutput, OutputSink, StdInput, StdOutput};
pub use loader::{DirectorySource, MapSource, ModuleSource, Program};
pub use module::ModuleDef;
pub use parse::FuncSig;
pub use scope::{CallChain, Scope, ScopeHandle};
pub use token::{BoolOp, ConvOp, MathOp, RelOp, StackOp, TokenKind};
pub use tracer::{NoopTracer, StderrTracer, Tracer};
pub use value::{Kind, ReturnKind, Value};
pub use vm::RunConfig;

use std::rc::Rc;

/// Loads `module_name` from `source` and runs it to completion.
///
/// This is the entry point a host (the CLI, a test) calls once it has
/// assembled its [`ModuleSource`], [`Tracer`], [`OutputSink`] and
/// [`InputSource`]. Returns `Ok(())` on normal termination; any runtime
/// or load error comes back as a [`Diagnostic`] (§7 propagation policy:
/// the caller is expected to report it and exit nonzero).
pub fn run<T: Tracer, O: OutputSink, I: InputSource>(
    source: &dyn ModuleSource,
    module_name: &str,
    symbolic_labels: bool,
    config: &RunConfig,
    tracer: &mut T,
    output: &mut O,
    input: &mut I,
) -> PResult<()> {
    let program = Program::new(source, symbolic_labels);
    let root_def = program.load(module_name)?;
    let root_scope = Scope::new(root_def);
    let mut chain = CallChain::new(Rc::clone(&root_scope));
    vm::run_frame(&program, &mut chain, &root_scope, None, 0, config, tracer, output, input)?;
    Ok(())
}
