use chalet::frontend::{KeywordTable, Lexer, Parser as ProgramParser, ParserError};
use chalet::interpreter::{Environment, Interpreter, Object};
use chalet::run_source;

use clap::{ArgEnum, Parser};
use log::debug;
use std::io::{self, BufRead, Write};
use std::{fs, process};

/// Runs chalet scripts, or an interactive prompt when no script is given.
#[derive(Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Script to run.
    script: Option<String>,

    /// Keyword spellings to accept.
    #[clap(long, arg_enum, default_value = "quebecois")]
    syntax: Syntax,

    /// Print the parsed program instead of running it.
    #[clap(long)]
    print_ast: bool,

    /// Print the token stream instead of running.
    #[clap(long)]
    print_tokens: bool,
}

#[derive(ArgEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Syntax {
    Quebecois,
    Classic,
}

impl Syntax {
    fn keywords(self) -> KeywordTable {
        match self {
            Syntax::Quebecois => KeywordTable::quebecois(),
            Syntax::Classic => KeywordTable::classic(),
        }
    }
}

type RunResult = Result<Option<Object>, Vec<String>>;

fn main() {
    env_logger::init();
    let args = Args::parse();

    match &args.script {
        Some(path) => run_file(path, &args),
        None => run_prompt(&args),
    }
}

fn run_prompt(args: &Args) {
    let mut interpreter = Interpreter::new();
    let env = Environment::new();
    let stdin = io::stdin();

    loop {
        print!(">> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("Failed to read line: {}", e);
                break;
            }
        }

        match run(&mut interpreter, &env, &input, args) {
            Ok(Some(value)) => println!("{}", value),
            Ok(None) => {}
            Err(errors) => report_errors(&errors),
        }
    }
}

fn run_file(path: &str, args: &Args) {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Failed to read {}: {}", path, e);
            process::exit(64);
        }
    };
    debug!("running {} with {:?} keywords", path, args.syntax);

    let mut interpreter = Interpreter::new();
    let env = Environment::new();

    match run(&mut interpreter, &env, &contents, args) {
        Ok(Some(Object::Error(err))) => {
            eprintln!("Error: {}", err);
            process::exit(70);
        }
        Ok(_) => {}
        Err(errors) => {
            report_errors(&errors);
            process::exit(65);
        }
    }
}

fn run(
    interpreter: &mut Interpreter<io::Stdout>,
    env: &Environment,
    source: &str,
    args: &Args,
) -> RunResult {
    let keywords = args.syntax.keywords();

    if args.print_tokens {
        for token in Lexer::with_keywords(source, keywords).iter() {
            println!("{}", token);
        }
        return Ok(None);
    }

    if args.print_ast {
        let parser = ProgramParser::new(Lexer::with_keywords(source, keywords));
        let program = parser.parse().map_err(render_errors)?;
        debug!("parsed {} statements", program.statements.len());
        println!("{}", program);
        return Ok(None);
    }

    let value = run_source(source, keywords, interpreter, env).map_err(render_errors)?;
    Ok(Some(value))
}

fn render_errors(errors: Vec<ParserError>) -> Vec<String> {
    errors.iter().map(|e| e.render()).collect()
}

fn report_errors(errors: &[String]) {
    for error in errors.iter() {
        eprintln!("{}", error);
    }
}
