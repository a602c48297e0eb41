//! Executor (§4.3) and call/return machinery (§5): the operand-stack
//! dispatch loop, and the `CALL`/`RET` child-frame spawner built on top of
//! the scope chain in [`crate::scope`].

use crate::error::{Diagnostic, PResult, PostfixError};
use crate::instr::Instruction;
use crate::loader::Program;
use crate::scope::{self, CallChain, Scope, ScopeHandle};
use crate::token::{BoolOp, MathOp};
use crate::tracer::Tracer;
use crate::value::{ReturnKind, Value};
use crate::io::{InputSource, OutputSink};

/// Execution-wide limits not carried in the spec's closed value model.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// Maximum live `CALL` depth before a `StackError` is raised (§5).
    pub max_call_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { max_call_depth: 4096 }
    }
}

fn diag(module: &str, pc: usize, line: usize, error: PostfixError) -> Diagnostic {
    Diagnostic { error, module: module.to_owned(), pc, line }
}

fn pop(stack: &mut Vec<Value>, module: &str, pc: usize, line: usize) -> PResult<Value> {
    stack
        .pop()
        .ok_or_else(|| diag(module, pc, line, PostfixError::Stack { message: "stack underflow".to_owned() }))
}

/// Resolves an `r-val` marker through the scope chain; any other value
/// passes through unchanged (§4.3, "resolve r-val(s)").
fn resolve_operand(chain: &CallChain, scope: &ScopeHandle, value: Value) -> PResult<Value> {
    match value {
        Value::RVal(name) => scope::get(chain, scope, &name),
        other => Ok(other),
    }
}

/// Runs one frame (root or function) to completion.
///
/// `return_kind` is `None` for the root frame (no `RET` contract to
/// enforce) and `Some(..)` for a function frame, carrying the declared
/// return kind the caller's `.funcs` entry recorded for it.
#[allow(clippy::too_many_arguments)]
pub fn run_frame<T: Tracer, O: OutputSink, I: InputSource>(
    program: &Program,
    chain: &mut CallChain,
    scope: &ScopeHandle,
    return_kind: Option<ReturnKind>,
    depth: usize,
    config: &RunConfig,
    tracer: &mut T,
    output: &mut O,
    input: &mut I,
) -> PResult<Option<Value>> {
    let module_name = scope.module.name.clone();
    let mut stack: Vec<Value> = Vec::new();
    let mut pc: usize = 0;

    loop {
        let Some(instr) = scope.module.instructions.get(pc).cloned() else {
            return Ok(None);
        };
        let line = scope.module.code_start_offset + pc + 1;
        tracer.on_instruction(&module_name, pc, &instr);
        let mut advance = true;

        match instr {
            Instruction::PushInt(n) => stack.push(Value::Int(n)),
            Instruction::PushFloat(x) => stack.push(Value::Float(x)),
            Instruction::PushBool(b) => stack.push(Value::Bool(b)),
            Instruction::PushStr(s) => stack.push(Value::Str(s)),
            Instruction::PushLVal(name) => stack.push(Value::LVal(name)),
            Instruction::PushRVal(name) => stack.push(Value::RVal(name)),
            Instruction::PushLabel(name) => stack.push(Value::Label(name)),

            Instruction::Colon => {
                let top = pop(&mut stack, &module_name, pc, line)?;
                if !matches!(top, Value::Label(_)) {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "colon requires a label on top of the stack".to_owned() }));
                }
            }

            Instruction::Assign => {
                // `<value> <name> l-val assign_op`: the l-val target was
                // pushed last, so it sits on top.
                let target = pop(&mut stack, &module_name, pc, line)?;
                let raw_value = pop(&mut stack, &module_name, pc, line)?;
                let Value::LVal(name) = target else {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "assign_op target is not an l-val".to_owned() }));
                };
                let value = resolve_operand(chain, scope, raw_value)?;
                let declared = scope::type_of(chain, scope, &name)?;
                if value.kind() != declared {
                    return Err(diag(
                        &module_name,
                        pc,
                        line,
                        PostfixError::Type { message: format!("cannot assign {} to '{name}' declared {declared}", value.kind()) },
                    ));
                }
                scope::set(chain, scope, &name, value.clone())?;
                tracer.on_variable_set(&module_name, &name, &value);
            }

            Instruction::Math(op) => {
                if op.is_unary() {
                    let raw = pop(&mut stack, &module_name, pc, line)?;
                    let v = resolve_operand(chain, scope, raw)?;
                    if !v.kind().is_numeric() {
                        return Err(diag(&module_name, pc, line, PostfixError::Type { message: "NEG requires a numeric operand".to_owned() }));
                    }
                    stack.push(match v {
                        Value::Int(n) => Value::Int(-n),
                        Value::Float(x) => Value::Float(-x),
                        _ => unreachable!("checked numeric above"),
                    });
                } else {
                    let raw_right = pop(&mut stack, &module_name, pc, line)?;
                    let raw_left = pop(&mut stack, &module_name, pc, line)?;
                    let right = resolve_operand(chain, scope, raw_right)?;
                    let left = resolve_operand(chain, scope, raw_left)?;
                    if left.kind() != right.kind() || !left.kind().is_numeric() {
                        return Err(diag(&module_name, pc, line, PostfixError::Type { message: format!("math_op '{op}' requires matching numeric operands") }));
                    }
                    stack.push(apply_math(&module_name, pc, line, op, left, right)?);
                }
            }

            Instruction::Pow => {
                let raw_right = pop(&mut stack, &module_name, pc, line)?;
                let raw_left = pop(&mut stack, &module_name, pc, line)?;
                let right = resolve_operand(chain, scope, raw_right)?;
                let left = resolve_operand(chain, scope, raw_left)?;
                let (Value::Float(l), Value::Float(r)) = (left, right) else {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "pow_op requires two float operands".to_owned() }));
                };
                stack.push(Value::Float(l.powf(r)));
            }

            Instruction::Rel(op) => {
                let raw_right = pop(&mut stack, &module_name, pc, line)?;
                let raw_left = pop(&mut stack, &module_name, pc, line)?;
                let right = resolve_operand(chain, scope, raw_right)?;
                let left = resolve_operand(chain, scope, raw_left)?;
                if left.kind() != right.kind() {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: format!("rel_op '{op}' requires matching operand kinds") }));
                }
                stack.push(Value::Bool(apply_rel(&module_name, pc, line, op, &left, &right)?));
            }

            Instruction::Bool(op) => {
                if op.is_unary() {
                    let raw = pop(&mut stack, &module_name, pc, line)?;
                    let v = resolve_operand(chain, scope, raw)?;
                    let Value::Bool(b) = v else {
                        return Err(diag(&module_name, pc, line, PostfixError::Type { message: "NOT requires a bool operand".to_owned() }));
                    };
                    stack.push(Value::Bool(!b));
                } else {
                    let raw_right = pop(&mut stack, &module_name, pc, line)?;
                    let raw_left = pop(&mut stack, &module_name, pc, line)?;
                    let right = resolve_operand(chain, scope, raw_right)?;
                    let left = resolve_operand(chain, scope, raw_left)?;
                    let (Value::Bool(l), Value::Bool(r)) = (left, right) else {
                        return Err(diag(&module_name, pc, line, PostfixError::Type { message: format!("bool_op '{op}' requires two bool operands") }));
                    };
                    stack.push(Value::Bool(match op {
                        BoolOp::And => l && r,
                        BoolOp::Or => l || r,
                        BoolOp::Not => unreachable!("unary handled above"),
                    }));
                }
            }

            Instruction::Cat => {
                let raw_right = pop(&mut stack, &module_name, pc, line)?;
                let raw_left = pop(&mut stack, &module_name, pc, line)?;
                let right = resolve_operand(chain, scope, raw_right)?;
                let left = resolve_operand(chain, scope, raw_left)?;
                let (Value::Str(l), Value::Str(r)) = (left, right) else {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "cat_op requires two string operands".to_owned() }));
                };
                stack.push(Value::Str(l + &r));
            }

            Instruction::Conv(op) => {
                let raw = pop(&mut stack, &module_name, pc, line)?;
                let v = resolve_operand(chain, scope, raw)?;
                stack.push(apply_conv(&module_name, pc, line, op, v)?);
            }

            Instruction::Out => {
                let raw = pop(&mut stack, &module_name, pc, line)?;
                let v = resolve_operand(chain, scope, raw)?;
                output
                    .write_line(&v.to_string())
                    .map_err(|e| diag(&module_name, pc, line, PostfixError::Io { path: "<stdout>".to_owned(), reason: e.to_string() }))?;
            }

            Instruction::Inp => {
                let line_text = input
                    .read_line()
                    .map_err(|e| diag(&module_name, pc, line, PostfixError::Io { path: "<stdin>".to_owned(), reason: e.to_string() }))?
                    .unwrap_or_default();
                stack.push(Value::Str(line_text));
            }

            Instruction::Stack(op) => apply_stack_op(&mut stack, &module_name, pc, line, op)?,

            Instruction::Jf => {
                // Push order is `<condition> <label> jf` (the example in
                // §8 computes the condition, then pushes the label).
                let label_v = pop(&mut stack, &module_name, pc, line)?;
                let raw_cond = pop(&mut stack, &module_name, pc, line)?;
                let Value::Label(label) = label_v else {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "jf requires a label on top of the stack".to_owned() }));
                };
                let cond = resolve_operand(chain, scope, raw_cond)?;
                let Value::Bool(taken_on_false) = cond else {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "jf condition must be bool".to_owned() }));
                };
                let target = *scope
                    .module
                    .labels
                    .get(&label)
                    .ok_or_else(|| diag(&module_name, pc, line, PostfixError::Label { name: label.clone() }))?;
                let taken = !taken_on_false;
                tracer.on_label_resolved(&module_name, &label, target, taken);
                if taken {
                    pc = target;
                    advance = false;
                }
            }

            Instruction::Jump => {
                let label_v = pop(&mut stack, &module_name, pc, line)?;
                let Value::Label(label) = label_v else {
                    return Err(diag(&module_name, pc, line, PostfixError::Type { message: "jump requires a label on top of the stack".to_owned() }));
                };
                let target = *scope
                    .module
                    .labels
                    .get(&label)
                    .ok_or_else(|| diag(&module_name, pc, line, PostfixError::Label { name: label.clone() }))?;
                tracer.on_label_resolved(&module_name, &label, target, true);
                pc = target;
                advance = false;
            }

            Instruction::Call(func_name) => {
                let result = dispatch_call(
                    program, chain, scope, &module_name, &func_name, &mut stack, depth, config, tracer, output, input, pc, line,
                )?;
                if let Some(value) = result {
                    stack.push(value);
                }
            }

            Instruction::Ret => {
                tracer.on_stack(&module_name, &stack);
                return resolve_return(chain, scope, &module_name, pc, line, return_kind, &mut stack);
            }
        }

        tracer.on_stack(&module_name, &stack);
        if advance {
            pc += 1;
        }
    }
}

fn apply_math(module: &str, pc: usize, line: usize, op: MathOp, left: Value, right: Value) -> PResult<Value> {
    let zero_div = |operator: &str| diag(module, pc, line, PostfixError::Arith { operator: operator.to_owned() });
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => Ok(Value::Int(match op {
            MathOp::Add => l + r,
            MathOp::Sub => l - r,
            MathOp::Mul => l * r,
            MathOp::Div => {
                if r == 0 {
                    return Err(zero_div("/"));
                }
                l / r
            }
            MathOp::Mod => {
                if r == 0 {
                    return Err(zero_div("%"));
                }
                l % r
            }
            MathOp::Neg => unreachable!("unary handled by caller"),
        })),
        (Value::Float(l), Value::Float(r)) => Ok(Value::Float(match op {
            MathOp::Add => l + r,
            MathOp::Sub => l - r,
            MathOp::Mul => l * r,
            MathOp::Div => {
                if r == 0.0 {
                    return Err(zero_div("/"));
                }
                l / r
            }
            MathOp::Mod => {
                if r == 0.0 {
                    return Err(zero_div("%"));
                }
                l % r
            }
            MathOp::Neg => unreachable!("unary handled by caller"),
        })),
        _ => unreachable!("caller already checked matching numeric kinds"),
    }
}

fn apply_rel(module: &str, pc: usize, line: usize, op: crate::token::RelOp, left: &Value, right: &Value) -> PResult<bool> {
    use crate::token::RelOp;
    let ordering = match (left, right) {
        (Value::Int(l), Value::Int(r)) => l.partial_cmp(r),
        (Value::Float(l), Value::Float(r)) => l.partial_cmp(r),
        (Value::Bool(l), Value::Bool(r)) => l.partial_cmp(r),
        _ => {
            return Err(diag(module, pc, line, PostfixError::Type { message: "rel_op requires int, float, or bool operands".to_owned() }));
        }
    };
    let Some(ordering) = ordering else {
        return Err(diag(module, pc, line, PostfixError::Type { message: "rel_op comparison is not well-ordered (NaN?)".to_owned() }));
    };
    Ok(match op {
        RelOp::Gt => ordering.is_gt(),
        RelOp::Lt => ordering.is_lt(),
        RelOp::Ge => ordering.is_ge(),
        RelOp::Le => ordering.is_le(),
        RelOp::Eq => ordering.is_eq(),
        RelOp::Ne => ordering.is_ne(),
    })
}

fn apply_conv(module: &str, pc: usize, line: usize, op: crate::token::ConvOp, v: Value) -> PResult<Value> {
    use crate::token::ConvOp;
    let type_err = |message: String| diag(module, pc, line, PostfixError::Type { message });
    let conv_err = |message: String| diag(module, pc, line, PostfixError::Conv { message });
    match op {
        ConvOp::I2F => match v {
            Value::Int(n) => Ok(Value::Float(n as f64)),
            other => Err(type_err(format!("i2f requires int, got {}", other.kind()))),
        },
        ConvOp::F2I => match v {
            Value::Float(x) => Ok(Value::Int(x as i64)),
            other => Err(type_err(format!("f2i requires float, got {}", other.kind()))),
        },
        ConvOp::I2S => match v {
            Value::Int(n) => Ok(Value::Str(n.to_string())),
            other => Err(type_err(format!("i2s requires int, got {}", other.kind()))),
        },
        ConvOp::S2I => match v {
            Value::Str(s) => s.trim().parse().map(Value::Int).map_err(|_| conv_err(format!("s2i: cannot parse '{s}' as int"))),
            other => Err(type_err(format!("s2i requires string, got {}", other.kind()))),
        },
        ConvOp::F2S => match v {
            Value::Float(x) => Ok(Value::Str(x.to_string())),
            other => Err(type_err(format!("f2s requires float, got {}", other.kind()))),
        },
        ConvOp::S2F => match v {
            Value::Str(s) => s.trim().parse().map(Value::Float).map_err(|_| conv_err(format!("s2f: cannot parse '{s}' as float"))),
            other => Err(type_err(format!("s2f requires string, got {}", other.kind()))),
        },
        ConvOp::I2B => match v {
            Value::Int(n) => Ok(Value::Bool(n != 0)),
            other => Err(type_err(format!("i2b requires int, got {}", other.kind()))),
        },
        ConvOp::B2I => match v {
            Value::Bool(b) => Ok(Value::Int(i64::from(b))),
            other => Err(type_err(format!("b2i requires bool, got {}", other.kind()))),
        },
    }
}

fn apply_stack_op(stack: &mut Vec<Value>, module: &str, pc: usize, line: usize, op: crate::token::StackOp) -> PResult<()> {
    use crate::token::StackOp;
    match op {
        StackOp::Pop => {
            pop(stack, module, pc, line)?;
        }
        StackOp::Dup => {
            let top = stack
                .last()
                .cloned()
                .ok_or_else(|| diag(module, pc, line, PostfixError::Stack { message: "DUP on empty stack".to_owned() }))?;
            stack.push(top);
        }
        StackOp::Swap => {
            let a = pop(stack, module, pc, line)?;
            let b = pop(stack, module, pc, line)?;
            stack.push(a);
            stack.push(b);
        }
        StackOp::Nop => {}
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn dispatch_call<T: Tracer, O: OutputSink, I: InputSource>(
    program: &Program,
    chain: &mut CallChain,
    scope: &ScopeHandle,
    module_name: &str,
    func_name: &str,
    stack: &mut Vec<Value>,
    depth: usize,
    config: &RunConfig,
    tracer: &mut T,
    output: &mut O,
    input: &mut I,
    pc: usize,
    line: usize,
) -> PResult<Option<Value>> {
    let sig = *scope
        .module
        .functions
        .get(func_name)
        .ok_or_else(|| diag(module_name, pc, line, PostfixError::Name { message: format!("undefined function '{func_name}'") }))?;

    if depth + 1 > config.max_call_depth {
        return Err(diag(module_name, pc, line, PostfixError::Stack { message: "maximum call depth exceeded".to_owned() }));
    }

    let callee_name = Program::nested_name(module_name, func_name);
    let callee_def = program.load(&callee_name)?;

    if stack.len() < sig.param_count {
        return Err(diag(module_name, pc, line, PostfixError::Stack { message: format!("call to '{func_name}' needs {} argument(s)", sig.param_count) }));
    }
    let args = stack.split_off(stack.len() - sig.param_count);

    let child_scope = Scope::new(callee_def);
    for (i, raw_arg) in args.into_iter().enumerate() {
        let arg = resolve_operand(chain, scope, raw_arg)?;
        let (param_name, &param_kind) = child_scope.module.variable_types.get_index(i).ok_or_else(|| {
            diag(module_name, pc, line, PostfixError::Decl { message: format!("'{func_name}' has fewer declared params than its signature") })
        })?;
        if arg.kind() != param_kind {
            return Err(diag(module_name, pc, line, PostfixError::Type { message: format!("parameter {i} of '{func_name}' expects {param_kind}, got {}", arg.kind()) }));
        }
        child_scope.bind_local(param_name, arg);
    }

    tracer.on_call(module_name, &callee_name, depth + 1);
    chain.push(std::rc::Rc::clone(&child_scope));
    let result = run_frame(program, chain, &child_scope, Some(sig.return_kind), depth + 1, config, tracer, output, input);
    chain.pop();
    tracer.on_return(&callee_name, depth + 1);
    let returned = result?;

    match sig.return_kind {
        ReturnKind::Void => Ok(None),
        _ => {
            let Some(value) = returned else {
                return Err(diag(module_name, pc, line, PostfixError::Type { message: format!("'{func_name}' returned without a value") }));
            };
            Ok(Some(value))
        }
    }
}

fn resolve_return(
    chain: &CallChain,
    scope: &ScopeHandle,
    module_name: &str,
    pc: usize,
    line: usize,
    return_kind: Option<ReturnKind>,
    stack: &mut Vec<Value>,
) -> PResult<Option<Value>> {
    match return_kind {
        None | Some(ReturnKind::Void) => Ok(None),
        Some(rk) => {
            let raw = pop(stack, module_name, pc, line)?;
            let value = resolve_operand(chain, scope, raw)?;
            let want = rk.as_kind().expect("non-void ReturnKind always maps to a Kind");
            if value.kind() != want {
                return Err(diag(module_name, pc, line, PostfixError::Type { message: format!("RET expects {want}, got {}", value.kind()) }));
            }
            Ok(Some(value))
        }
    }
}
