//! §4.2 scope chain precedence and its failure modes.

use postfix::{CollectOutput, FixedInput, MapSource, NoopTracer, PostfixError, RunConfig};

fn run(module_text: &str) -> Result<Vec<String>, postfix::Diagnostic> {
    let source = MapSource::new().with("main", module_text);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input)?;
    Ok(output.lines().to_vec())
}

#[test]
fn a_local_shadows_a_global_of_the_same_name() {
    // `show` declares its own local `n` and does not list it in
    // `globVarList`, so step 1 (local `variable_types`) resolves it
    // entirely within `show`'s own frame; the root's global `n` of the
    // same name is never touched (invariant 1, §3).
    let root = r#"
.vars(
n int
)
.funcs(
show void 0
)
.code(
1 int
n l-val
ASSIGN assign_op
show CALL
n r-val
OUT out_op
RET
)
"#;
    let show = r#"
.vars(
n int
)
.code(
2 int
n l-val
ASSIGN assign_op
n r-val
OUT out_op
RET
)
"#;
    let source = MapSource::new().with("main", root).with("main$show", show);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input).unwrap();
    assert_eq!(output.lines(), &["2", "1"]);
}

#[test]
fn reading_an_uninitialized_variable_is_an_uninit_error() {
    let module = r#"
.vars(
x int
)
.code(
x r-val
OUT out_op
RET
)
"#;
    let err = run(module).unwrap_err();
    assert!(matches!(err.error, PostfixError::Uninit { .. }));
}

#[test]
fn referencing_an_undeclared_name_is_a_name_error() {
    let module = r#"
.code(
ghost r-val
OUT out_op
RET
)
"#;
    let err = run(module).unwrap_err();
    assert!(matches!(err.error, PostfixError::Name { .. }));
}
