//! §8 scenario 1 plus a few extra `math_op`/`pow_op`/`rel_op` edge cases.

use postfix::{CollectOutput, FixedInput, MapSource, NoopTracer, RunConfig};

fn run(module_text: &str) -> Result<Vec<String>, postfix::Diagnostic> {
    let source = MapSource::new().with("main", module_text);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input)?;
    Ok(output.lines().to_vec())
}

#[test]
fn adds_two_ints_and_prints_the_result() {
    let module = r#"
.vars(
x int
)
.code(
3 int
4 int
+ math_op
x l-val
ASSIGN assign_op
x r-val
OUT out_op
RET
)
"#;
    assert_eq!(run(module).unwrap(), vec!["7"]);
}

#[test]
fn integer_division_truncates_toward_zero() {
    let module = r#"
.vars(
x int
)
.code(
7 int
2 int
/ math_op
x l-val
ASSIGN assign_op
x r-val
OUT out_op
RET
)
"#;
    assert_eq!(run(module).unwrap(), vec!["3"]);
}

#[test]
fn pow_op_requires_float_operands() {
    let module = r#"
.code(
2.0 float
3.0 float
^ pow_op
OUT out_op
RET
)
"#;
    assert_eq!(run(module).unwrap(), vec!["8"]);
}

#[test]
fn neg_negates_a_float() {
    let module = r#"
.code(
1.5 float
NEG math_op
OUT out_op
RET
)
"#;
    assert_eq!(run(module).unwrap(), vec!["-1.5"]);
}
