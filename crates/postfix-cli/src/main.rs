//! Command-line front end (§6): a small hand-rolled loop over
//! `std::env::args()`, matching the teacher crate's own CLI, which does
//! not reach for an argument-parsing crate either.

use std::process::ExitCode;

use postfix::{DirectorySource, NoopTracer, RunConfig, StdInput, StdOutput, StderrTracer};

struct Config {
    path: String,
    module: String,
    debug: bool,
    symbolic_labels: bool,
}

fn parse_args() -> Result<Config, String> {
    let mut path = None;
    let mut module = None;
    let mut debug = false;
    let mut symbolic_labels = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--path" => path = Some(args.next().ok_or("--path requires a value")?),
            "--module" => module = Some(args.next().ok_or("--module requires a value")?),
            "--debug" => debug = true,
            "--symbolic-labels" => symbolic_labels = true,
            other => return Err(format!("unrecognized argument '{other}'")),
        }
    }

    Ok(Config {
        path: path.ok_or("--path is required")?,
        module: module.ok_or("--module is required")?,
        debug,
        symbolic_labels,
    })
}

fn usage() {
    eprintln!("usage: postfix --path <dir> --module <name> [--debug] [--symbolic-labels]");
}

fn main() -> ExitCode {
    let config = match parse_args() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {message}");
            usage();
            return ExitCode::from(2);
        }
    };

    let source = DirectorySource::new(&config.path);
    let run_config = RunConfig::default();
    let mut output = StdOutput;
    let mut input = StdInput;

    let result = if config.debug {
        postfix::run(&source, &config.module, config.symbolic_labels, &run_config, &mut StderrTracer, &mut output, &mut input)
    } else {
        postfix::run(&source, &config.module, config.symbolic_labels, &run_config, &mut NoopTracer, &mut output, &mut input)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            ExitCode::FAILURE
        }
    }
}

