//! §7 error taxonomy / §8 scenario 6 (division by zero).

use postfix::{CollectOutput, FixedInput, MapSource, NoopTracer, PostfixError, RunConfig};

fn run_err(module_text: &str) -> postfix::Diagnostic {
    let source = MapSource::new().with("main", module_text);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input).unwrap_err()
}

#[test]
fn division_by_zero_is_an_arith_error() {
    let module = r#"
.code(
1 int
0 int
/ math_op
RET
)
"#;
    let err = run_err(module);
    assert!(matches!(err.error, PostfixError::Arith { ref operator } if operator == "/"));
}

#[test]
fn modulo_by_zero_is_an_arith_error() {
    let module = r#"
.code(
1 int
0 int
% math_op
RET
)
"#;
    let err = run_err(module);
    assert!(matches!(err.error, PostfixError::Arith { ref operator } if operator == "%"));
}

#[test]
fn popping_an_empty_stack_is_a_stack_error() {
    let module = r#"
.code(
POP stack_op
RET
)
"#;
    let err = run_err(module);
    assert!(matches!(err.error, PostfixError::Stack { .. }));
}

#[test]
fn jump_to_an_undefined_label_is_a_label_error() {
    let module = r#"
.labels(
)
.code(
GHOST label
JUMP jump
RET
)
"#;
    let err = run_err(module);
    assert!(matches!(err.error, PostfixError::Label { .. }));
}

#[test]
fn s2i_parse_failure_is_a_conv_error() {
    let module = r#"
.code(
"not a number" string
s2i conv
RET
)
"#;
    let err = run_err(module);
    assert!(matches!(err.error, PostfixError::Conv { .. }));
}

/// Each self-recursive `CALL` mints a new, deeper `$`-qualified module
/// name (§6), so an unbounded recursive function never reuses the same
/// module name twice; this source serves identical text for every name
/// past the entry module to model that.
struct RecursiveSource;

const ROOT_TEXT: &str = r#"
.funcs(
loop void 0
)
.code(
loop CALL
RET
)
"#;

const BODY_TEXT: &str = r#"
.funcs(
loop void 0
)
.code(
loop CALL
RET
)
"#;

impl postfix::ModuleSource for RecursiveSource {
    fn read(&self, module_name: &str) -> postfix::PResult<String> {
        Ok(if module_name == "main" { ROOT_TEXT } else { BODY_TEXT }.to_owned())
    }
}

#[test]
fn unbounded_recursion_trips_the_call_depth_guard() {
    let source = RecursiveSource;
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    let config = postfix::RunConfig { max_call_depth: 64 };
    let err = postfix::run(&source, "main", false, &config, &mut NoopTracer, &mut output, &mut input).unwrap_err();
    assert!(matches!(err.error, PostfixError::Stack { .. }));
}
