use std::{
    fs,
    io::{self, Stdout},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use slate::{Interpreter, Options, ast::Node, interpreter::render::AstGraph};
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// slate is a small typed scripting language with an optimizing tree-walking
/// interpreter.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Runs a script file instead of starting the interactive prompt.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Prints the token stream before evaluating.
    #[arg(short, long)]
    verbose: bool,

    /// Skips writing the syntax tree diagram.
    #[arg(long)]
    hide_tree: bool,

    /// Where the syntax tree diagram is written, as Graphviz DOT.
    #[arg(long, default_value = "ast.dot")]
    tree_output: PathBuf,

    /// Evaluates the tree exactly as parsed.
    #[arg(long)]
    no_optimize: bool,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();

    let args = Args::parse();

    match &args.file {
        Some(path) => run_file(&args, path),
        None => run_prompt(&args),
    }
}

fn run_file(args: &Args, path: &Path) -> ExitCode {
    let Ok(script) = fs::read_to_string(path) else {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  path.display());
        return ExitCode::FAILURE;
    };

    let options = Options { optimize: !args.no_optimize,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(io::stdout(), options);

    let program = parse(&mut interpreter, args, &script);
    interpreter.evaluate(&program);

    let diagnostics = interpreter.take_diagnostics();
    for diagnostic in &diagnostics {
        eprintln!("{diagnostic}");
    }

    if diagnostics.is_empty() { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Reads one statement per line into a single interpreter.
fn run_prompt(args: &Args) -> ExitCode {
    // Later lines may read names bound by earlier ones.
    let options = Options { optimize: !args.no_optimize,
                            eliminate_dead_code: false,
                            echo_diagnostics: true,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(io::stdout(), options);

    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(error) => {
            eprintln!("Failed to start the prompt: {error}");
            return ExitCode::FAILURE;
        },
    };

    loop {
        match editor.readline("slate> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(error) = editor.add_history_entry(line.as_str()) {
                    warn!(%error, "failed to record history");
                }

                let program = parse(&mut interpreter, args, &line);
                interpreter.evaluate(&program);
                interpreter.take_diagnostics();
            },
            Err(ReadlineError::Interrupted) => {},
            Err(ReadlineError::Eof) => return ExitCode::SUCCESS,
            Err(error) => {
                eprintln!("Error: {error}");
                return ExitCode::FAILURE;
            },
        }
    }
}

/// Tokenizes, parses and optimizes a source, dumping tokens and writing the
/// diagram as requested.
fn parse(interpreter: &mut Interpreter<Stdout>, args: &Args, source: &str) -> Node {
    let tokens = interpreter.tokenize(source);
    if args.verbose {
        for (token, line) in &tokens {
            println!("{line}: {token:?}");
        }
    }

    let program = interpreter.parse_tokens(&tokens);
    let program = interpreter.optimize(program);

    if !args.hide_tree {
        let dot = AstGraph::from_program(&program).to_dot();
        if let Err(error) = fs::write(&args.tree_output, dot) {
            warn!(%error, path = %args.tree_output.display(), "failed to write the tree diagram");
        }
    }

    program
}
