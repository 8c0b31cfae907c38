mod cli;
mod repl;

use std::{path::PathBuf, rc::Rc, time::Instant};

use clap::{ArgAction, Parser, Subcommand};
use cli::{
    print_error, print_evaluated, print_evaluating, print_interrupted, print_loaded, print_loading
};
use galaxy_core::{
    bridge::prelude::Rendered,
    environment::prelude::SymbolTable,
    eval::prelude::Evaluator,
    loader::prelude::{load, Program},
    parser::prelude::parse_expression,
    utils::prelude::{Error, Warning, WarningEmitterIO}
};
use log::{warn, LevelFilter};

#[derive(Parser)]
#[command(name = "galaxyc", about = "Evaluator for galaxy combinator programs")]
struct Cli {
    /// Log more: `-v` for debug output, `-vv` to trace every reduction
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Loads a program and reports its definitions
    Check {
        /// Path of program file
        path: PathBuf,
        /// Print every definition in canonical form
        #[arg(short, long, default_value_t = false)]
        print: bool,
    },
    /// Evaluates an expression, optionally against a program
    Eval {
        /// Path of program file
        #[arg(short, long)]
        program: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Expression tokens, as one argument or several
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// Runs Read Eval Print Loop
    Repl {
        /// Path of program file
        #[arg(short, long)]
        program: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logger(cli.verbose);

    // Nothing bounds an evaluation, so Ctrl-C is the way out of a diverging one.
    if let Err(err) = ctrlc::set_handler(|| {
        print_interrupted();
        std::process::exit(130);
    }) {
        warn!("could not install the interrupt handler: {err}");
    }

    let result = match cli.command {
        Command::Check { path, print } => check(path, print),
        Command::Eval { program, json, expression } => evaluate(program, json, expression),
        Command::Repl { program } => {
            let definitions = match program {
                Some(path) => load_program(path).map(|program| program.definitions),
                None => Ok(vec![]),
            };

            definitions.and_then(|definitions| repl::start(definitions).map_err(Error::from))
        }
    };

    if let Err(err) = result {
        print_error(&err);
        std::process::exit(1);
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_program(path: PathBuf) -> Result<Program, Error> {
    let warning_emitter = Rc::new(ConsoleWarningEmitter);

    print_loading(&path.to_string_lossy());
    let start = Instant::now();

    let program = load(path, warning_emitter)?;

    print_loaded(Instant::now() - start, program.definitions.len());

    Ok(program)
}

fn check(path: PathBuf, print: bool) -> Result<(), Error> {
    let program = load_program(path)?;

    if print {
        for definition in &program.definitions {
            println!("{definition}");
        }
    } else {
        println!("{} definition(s), {} name(s)", program.definitions.len(), program.table.len());
    }

    Ok(())
}

fn evaluate(program: Option<PathBuf>, json: bool, expression: Vec<String>) -> Result<(), Error> {
    let table = match program {
        Some(path) => load_program(path)?.table,
        None => SymbolTable::new(),
    };

    let src = expression.join(" ");
    let expr = parse_expression(&src).map_err(|error| Error::Parse {
        path: PathBuf::from("<expression>"),
        src: src.clone(),
        error,
    })?;

    print_evaluating(&src);
    let start = Instant::now();

    let evaluator = Evaluator::new(&table);
    let value = evaluator.reduce(&expr)?;

    print_evaluated(Instant::now() - start, evaluator.steps());

    let rendered = Rendered::from_expr(&value);

    if json {
        let text = serde_json::to_string(&rendered).map_err(std::io::Error::from)?;
        println!("{text}");
    } else {
        println!("{rendered}");
    }

    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
