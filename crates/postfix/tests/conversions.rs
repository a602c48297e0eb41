//! §8 scenario 5 (string round-trip + `cat_op`) and the `conv` round-trip
//! properties from §8's universal properties.

use postfix::{CollectOutput, FixedInput, MapSource, NoopTracer, RunConfig};

fn run_with_input(module_text: &str, lines: Vec<&str>) -> Vec<String> {
    let source = MapSource::new().with("main", module_text);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(lines);
    postfix::run(&source, "main", false, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input).unwrap();
    output.lines().to_vec()
}

#[test]
fn reads_converts_adds_and_concatenates() {
    let module = r#"
.code(
IN inp_op
s2i conv
8 int
+ math_op
i2s conv
" items" string
CAT cat_op
OUT out_op
RET
)
"#;
    assert_eq!(run_with_input(module, vec!["42"]), vec!["50 items"]);
}

#[test]
fn i2s_then_s2i_is_identity() {
    let module = r#"
.code(
123 int
i2s conv
s2i conv
OUT out_op
RET
)
"#;
    assert_eq!(run_with_input(module, vec![]), vec!["123"]);
}

#[test]
fn i2f_then_f2i_is_identity_for_exactly_representable_ints() {
    let module = r#"
.code(
9 int
i2f conv
f2i conv
OUT out_op
RET
)
"#;
    assert_eq!(run_with_input(module, vec![]), vec!["9"]);
}

#[test]
fn i2b_and_b2i_round_trip_nonzero_and_zero() {
    let module = r#"
.code(
5 int
i2b conv
b2i conv
OUT out_op
0 int
i2b conv
b2i conv
OUT out_op
RET
)
"#;
    assert_eq!(run_with_input(module, vec![]), vec!["1", "0"]);
}
