//! The Monkey REPL: read a line, parse it as a whole program, evaluate it
//! against a session-persistent environment, print the result.

use std::error::Error;
use std::io::{self, Write};

use clap::{Parser, ValueEnum};

use monkey_lang::environment::Environment;
use monkey_lang::{eval, parse};

const PROMPT: &str = ">> ";

/// CLI arguments for the Monkey REPL.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log verbosity of the interpreter's internal diagnostics.
    #[arg(value_enum, short, long, default_value_t = LogLevel::default())]
    verbosity: LogLevel,
}

/// Log level exposed to the REPL's `-v`/`--verbosity` flag.
#[derive(ValueEnum, Clone, Default, Debug)]
enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<&LogLevel> for log::Level {
    fn from(value: &LogLevel) -> Self {
        match value {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    simple_logger::init_with_level((&cli.verbosity).into())?;

    let env = Environment::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{PROMPT}");
        stdout.flush()?;

        let mut line = String::new();
        let bytes_read = stdin.read_line(&mut line)?;
        if bytes_read == 0 {
            // EOF on stdin.
            break;
        }

        let (program, errors) = parse(&line);
        if !errors.is_empty() {
            print_parse_errors(&mut stdout, &errors)?;
            continue;
        }

        let result = eval(&program, &env);
        if !matches!(result.as_ref(), monkey_lang::object::Object::Null) {
            writeln!(stdout, "{}", result.inspect())?;
        }
    }

    Ok(())
}

fn print_parse_errors(out: &mut impl Write, errors: &[String]) -> io::Result<()> {
    writeln!(out, "Woops! We ran into some monkey business here!")?;
    writeln!(out, " parser errors:")?;
    for err in errors {
        writeln!(out, "\t{err}")?;
    }
    Ok(())
}
