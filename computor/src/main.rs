use computor_core::value::Value;
use computor_core::{parse, resolver};

use rustyline::error::ReadlineError;
use rustyline::Editor;

struct Opts {
    program: Option<String>,
}

fn get_opts() -> Opts {
    let matches = clap::App::new(clap::crate_name!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .author(clap::crate_authors!())
        .arg(
            clap::Arg::with_name("expression")
                .help("Expression to evaluate. Omit to start an interactive prompt.")
                .required(false),
        )
        .get_matches();

    Opts {
        program: matches.value_of("expression").map(str::to_string),
    }
}

/// Evaluates one line and returns the text that should be printed for it: `solution_text` for a
/// polynomial result (the `=` form), or the bare value otherwise. Errors are translated to their
/// user-facing message and never propagated past this boundary.
fn eval_line(line: &str) -> String {
    match parse(line) {
        Ok(Value::Polynomial(poly)) => resolver::solution_text(&poly),
        Ok(value) => value.to_string(),
        Err(err) => err.to_string(),
    }
}

fn run_once(program: &str) {
    println!("{}", eval_line(program));
}

fn run_interactive() {
    let mut editor = Editor::<()>::new().expect("failed to initialize line editor");
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line);
                println!("{}", eval_line(line));
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                println!("Bye!");
                break;
            }
            Err(err) => {
                eprintln!("readline error: {}", err);
                std::process::exit(1);
            }
        }
    }
}

fn main() {
    let opts = get_opts();
    match opts.program {
        Some(program) => run_once(&program),
        None => run_interactive(),
    }
}
