//! §8 scenario 4: a nested function reading and writing a root global
//! across two calls, exercising `CALL`/`RET` and the globals half of the
//! scope chain (§4.2).

use postfix::{CollectOutput, FixedInput, MapSource, NoopTracer, RunConfig};

#[test]
fn inc_reads_and_writes_the_root_global_across_calls() {
    let root = r#"
.vars(
g int
)
.funcs(
inc int 1
)
.code(
10 int
g l-val
ASSIGN assign_op
5 int
inc CALL
OUT out_op
7 int
inc CALL
OUT out_op
RET
)
"#;
    let inc = r#"
.vars(
delta int
)
.globVarList(
g
)
.code(
g r-val
delta r-val
+ math_op
g l-val
ASSIGN assign_op
g r-val
RET
)
"#;
    let source = MapSource::new().with("main", root).with("main$inc", inc);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input).unwrap();
    assert_eq!(output.lines(), &["15", "22"]);
}

#[test]
fn void_function_returns_nothing_to_the_caller_stack() {
    let root = r#"
.funcs(
announce void 1
)
.code(
"hello" string
announce CALL
RET
)
"#;
    let announce = r#"
.vars(
text string
)
.code(
text r-val
OUT out_op
RET
)
"#;
    let source = MapSource::new().with("main", root).with("main$announce", announce);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input).unwrap();
    assert_eq!(output.lines(), &["hello"]);
}

#[test]
fn deeply_nested_function_reaches_its_lexical_parents_locals() {
    // `main` calls `outer`, which calls its own nested `inner`, which
    // reads a local declared in `outer` (not in `main`) through the
    // `enclosing_module` link (§4.2 step 3).
    let root = r#"
.funcs(
outer int 0
)
.code(
outer CALL
OUT out_op
RET
)
"#;
    let outer = r#"
.vars(
base int
)
.funcs(
inner int 0
)
.code(
100 int
base l-val
ASSIGN assign_op
inner CALL
RET
)
"#;
    let inner = r#"
.code(
base r-val
1 int
+ math_op
RET
)
"#;
    let source = MapSource::new().with("main", root).with("main$outer", outer).with("main$outer$inner", inner);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input).unwrap();
    assert_eq!(output.lines(), &["101"]);
}
