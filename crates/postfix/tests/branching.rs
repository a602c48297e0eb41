//! §8 scenarios 2 (branching) and 3 (countdown loop), using symbolic-label
//! mode so labels come from `label`/`colon` pairs in the code stream
//! instead of a `.labels(` section.

use postfix::{CollectOutput, FixedInput, MapSource, NoopTracer, RunConfig};

fn run_symbolic(module_text: &str) -> Result<Vec<String>, postfix::Diagnostic> {
    let source = MapSource::new().with("main", module_text);
    let mut output = CollectOutput::new();
    let mut input = FixedInput::new(Vec::<String>::new());
    postfix::run(&source, "main", true, &RunConfig::default(), &mut NoopTracer, &mut output, &mut input)?;
    Ok(output.lines().to_vec())
}

#[test]
fn jf_falls_through_on_true_and_prints_positive() {
    let module = r#"
.code(
5 int
0 int
> rel_op
L1 label
JF jf
"positive" string
OUT out_op
END label
JMP jump
L1 label
COLON colon
"nonpositive" string
OUT out_op
END label
COLON colon
RET
)
"#;
    assert_eq!(run_symbolic(module).unwrap(), vec!["positive"]);
}

#[test]
fn jf_taken_on_false_and_prints_nonpositive() {
    let module = r#"
.code(
0 int
0 int
> rel_op
L1 label
JF jf
"positive" string
OUT out_op
END label
JMP jump
L1 label
COLON colon
"nonpositive" string
OUT out_op
END label
COLON colon
RET
)
"#;
    assert_eq!(run_symbolic(module).unwrap(), vec!["nonpositive"]);
}

#[test]
fn countdown_loop_prints_three_two_one() {
    let module = r#"
.vars(
i int
)
.code(
3 int
i l-val
ASSIGN assign_op
LOOP label
COLON colon
i r-val
0 int
!= rel_op
END label
JF jf
i r-val
OUT out_op
i r-val
1 int
- math_op
i l-val
ASSIGN assign_op
LOOP label
JMP jump
END label
COLON colon
RET
)
"#;
    assert_eq!(run_symbolic(module).unwrap(), vec!["3", "2", "1"]);
}
