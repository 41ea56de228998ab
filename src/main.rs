use clap::Parser;
use lisp_interpreter::config::{DEFAULT_HISTORY_FILE, PROMPT, VERSION, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use lisp_interpreter::interpreter::Interpreter;
use lisp_interpreter::parser::is_balanced;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// A tree-walking Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "lisp-interpreter")]
#[command(version = VERSION)]
#[command(about = "A tree-walking Lisp interpreter")]
struct Cli {
    /// Forms to evaluate silently before anything else, for seeding definitions
    #[arg(long = "bootstrap", value_name = "FILE")]
    bootstrap: Option<PathBuf>,

    /// Program file to evaluate non-interactively
    #[arg(value_name = "FILE")]
    program: Option<PathBuf>,

    /// Start the interactive REPL even when a program file is absent
    #[arg(short, long)]
    interactive: bool,

    /// History file for the interactive REPL
    #[arg(long = "history", value_name = "FILE")]
    history: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Cli::parse();
    let mut interp = Interpreter::new();

    if let Some(bootstrap_path) = &args.bootstrap {
        match std::fs::read_to_string(bootstrap_path) {
            Ok(source) => interp.run_source(&source),
            Err(e) => {
                eprintln!("Cannot read bootstrap file {}: {}", bootstrap_path.display(), e);
                drop(interp);
                return ExitCode::FAILURE;
            }
        }
    }

    let exit = if let Some(program_path) = &args.program {
        match interp.interpret_program(program_path) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Cannot read program file {}: {}", program_path.display(), e);
                ExitCode::FAILURE
            }
        }
    } else if args.interactive {
        let history_path = args
            .history
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));
        run_repl(&mut interp, &history_path);
        ExitCode::SUCCESS
    } else {
        match read_stdin() {
            Ok(source) => {
                interp.run_source(&source);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Cannot read standard input: {e}");
                ExitCode::FAILURE
            }
        }
    };

    drop(interp);
    exit
}

fn read_stdin() -> std::io::Result<String> {
    use std::io::Read;
    let mut source = String::new();
    std::io::stdin().read_to_string(&mut source)?;
    Ok(source)
}

/// Interactive loop: prompt, read a possibly multi-line form (continuing
/// until parentheses balance), evaluate, print, repeat until input ends.
fn run_repl(interp: &mut Interpreter, history_path: &Path) {
    let config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<(), DefaultHistory> = match Editor::with_config(config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to initialize REPL: {e}");
            return;
        }
    };
    let _ = rl.load_history(history_path);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { PROMPT } else { "  ... " };
        match rl.readline(prompt) {
            Ok(line) => {
                if buffer.is_empty() && (line.trim() == "(quit)" || line.trim() == "(exit)") {
                    println!("Goodbye!");
                    break;
                }
                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                if is_balanced(&buffer) {
                    let form = std::mem::take(&mut buffer);
                    if !form.trim().is_empty() {
                        if let Some(result) = interp.interpret_expression(&form) {
                            println!("=> {result}");
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_path);
}
