use std::{
    fs,
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use colored::Colorize;
use tern::{
    Error,
    interpreter::evaluator::core::{Config, Interpreter},
    run,
};
use tracing_subscriber::EnvFilter;

/// Exit status for a command line that could not be acted on.
const EX_USAGE: u8 = 64;

/// tern runs scripts written in a small C-like language with closures.
/// Without a script it starts an interactive session.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tern to look at a file instead of a script.
    #[arg(short, long, requires = "contents")]
    file: bool,

    /// Prints the value of every expression statement, as the interactive
    /// session does.
    #[arg(short, long)]
    echo: bool,

    /// The script to run, or its path when `--file` is given.
    contents: Option<String>,
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let Some(contents) = args.contents else {
        return repl();
    };

    let script = if args.file {
        match fs::read_to_string(&contents) {
            Ok(script) => script,
            Err(error) => {
                let message = format!("Failed to read the input file '{contents}': {error}");
                eprintln!("{}", message.red());
                return ExitCode::from(EX_USAGE);
            },
        }
    } else {
        contents
    };

    let config = Config { echo_expressions: args.echo,
                          ..Config::default() };
    let mut interpreter = Interpreter::new(config);
    match run(&script, &mut interpreter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);
            ExitCode::from(error.exit_code())
        },
    }
}

/// Reads and runs one line at a time until end of input. Errors are reported
/// and the session carries on with its globals intact.
fn repl() -> ExitCode {
    let mut interpreter = Interpreter::new(Config::interactive());

    loop {
        print!("> ");
        if let Err(error) = io::stdout().flush() {
            tracing::debug!(%error, "could not flush prompt");
        }

        let Some(line) = interpreter.read_line() else {
            println!();
            return ExitCode::SUCCESS;
        };

        if let Err(error) = run(&line, &mut interpreter) {
            report(&error);
        }
    }
}

fn report(error: &Error) {
    eprintln!("{}", error.to_string().red());
}

/// Installs a stderr subscriber when `TERN_LOG` holds a filter such as
/// `tern=debug`. Logging stays off otherwise.
fn init_tracing() {
    let Ok(filter) = EnvFilter::try_from_env("TERN_LOG") else {
        return;
    };
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(io::stderr)
                             .init();
}
