//! Debug/trace sink (§4.4): a zero-cost trait, monomorphized over the
//! executor, the same shape as the teacher crate's `VmTracer`/`NoopTracer`/
//! `StderrTracer`. `--debug` is a type parameter, not a branch inside the
//! dispatch loop.

use crate::instr::Instruction;
use crate::value::Value;

/// Hook points the executor calls during the dispatch loop.
///
/// All methods default to no-ops so `NoopTracer` compiles away entirely.
pub trait Tracer {
    /// Called before an instruction is dispatched.
    #[inline(always)]
    fn on_instruction(&mut self, _module: &str, _pc: usize, _instr: &Instruction) {}

    /// Called after an instruction has updated the stack.
    #[inline(always)]
    fn on_stack(&mut self, _module: &str, _stack: &[Value]) {}

    /// Called whenever a variable is written through the scope chain.
    #[inline(always)]
    fn on_variable_set(&mut self, _module: &str, _name: &str, _value: &Value) {}

    /// Called when a `jump`/`jf` resolves a label to an instruction index.
    #[inline(always)]
    fn on_label_resolved(&mut self, _module: &str, _label: &str, _target_pc: usize, _taken: bool) {}

    /// Called when a `CALL` spawns a child frame.
    #[inline(always)]
    fn on_call(&mut self, _caller_module: &str, _callee_module: &str, _depth: usize) {}

    /// Called when a `RET` tears down a child frame.
    #[inline(always)]
    fn on_return(&mut self, _module: &str, _depth: usize) {}
}

/// Zero-cost production default: every hook inlines to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {}

/// Human-readable execution trace to stderr, enabled by `--debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrTracer;

impl Tracer for StderrTracer {
    fn on_instruction(&mut self, module: &str, pc: usize, instr: &Instruction) {
        eprintln!("[{module}:{pc:>4}] {instr}");
    }

    fn on_stack(&mut self, module: &str, stack: &[Value]) {
        let rendered: Vec<String> = stack.iter().map(|v| format!("{v:?}")).collect();
        eprintln!("  stack[{module}] = [{}]", rendered.join(", "));
    }

    fn on_variable_set(&mut self, module: &str, name: &str, value: &Value) {
        eprintln!("  {module}.{name} := {value}");
    }

    fn on_label_resolved(&mut self, module: &str, label: &str, target_pc: usize, taken: bool) {
        let verb = if taken { "taken" } else { "fallthrough" };
        eprintln!("  label '{label}' in {module} -> pc {target_pc} ({verb})");
    }

    fn on_call(&mut self, caller_module: &str, callee_module: &str, depth: usize) {
        let indent = "  ".repeat(depth);
        eprintln!("{indent}>>> CALL {callee_module} (from {caller_module}) depth={depth}");
    }

    fn on_return(&mut self, module: &str, depth: usize) {
        let indent = "  ".repeat(depth.saturating_sub(1));
        eprintln!("{indent}<<< RET {module} depth={depth}");
    }
}
