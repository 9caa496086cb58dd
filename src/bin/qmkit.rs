//! Quine-McCluskey minimizer - Command Line Interface
//!
//! Reads a truth table and the names of its variables, then prints the minimization report.

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use qmkit::efmt::{FormatterConfig, DEFAULT_FMT_CFG, INFIX_FMT_CFG, LOWERCASE_FMT_CFG};
use qmkit::{QmError, Report, TruthTable, VarNames};
use std::io::{self, BufRead, Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Notation {
    /// a.b' + c
    Default,
    /// a & !b | c
    Infix,
    /// a and not b or c
    Lowercase,
}

impl Notation {
    fn config(self) -> &'static FormatterConfig<'static> {
        match self {
            Notation::Default => &DEFAULT_FMT_CFG,
            Notation::Infix => &INFIX_FMT_CFG,
            Notation::Lowercase => &LOWERCASE_FMT_CFG,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for simplelog::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => simplelog::LevelFilter::Off,
            LogLevel::Error => simplelog::LevelFilter::Error,
            LogLevel::Warn => simplelog::LevelFilter::Warn,
            LogLevel::Info => simplelog::LevelFilter::Info,
            LogLevel::Debug => simplelog::LevelFilter::Debug,
            LogLevel::Trace => simplelog::LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "qmkit")]
#[command(about = "Minimize a Boolean function with the Quine-McCluskey method", long_about = None)]
#[command(version)]
struct Args {
    /// Truth table, e.g. "1x10" (asked on the console if missing)
    #[arg(value_name = "TABLE")]
    table: Option<String>,

    /// Variable names, most significant first (asked on the console if missing)
    #[arg(value_name = "NAMES")]
    names: Vec<String>,

    /// Show the merge generations and the reduction of the chart
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Only print the final expression
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,

    #[arg(long = "log-level", value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Notation of the expressions
    #[arg(short = 'f', long = "format", value_enum, default_value = "default")]
    format: Notation,
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    simplelog::TermLogger::init(
        args.log_level.into(),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let table = match args.table {
        Some(t) => t,
        None => prompt("Truth table: ")?,
    };
    let table: TruthTable = table
        .parse()
        .wrap_err_with(|| format!("Could not read the truth table '{}'", table))?;

    let names = if args.names.is_empty() {
        let example = VarNames::generic(table.width());
        prompt(&format!("Variable names (e.g. \"{}\", empty for default): ", example))?
    } else {
        args.names.join(" ")
    };
    let names = match names.is_empty() {
        true => VarNames::generic(table.width()),
        false => names.parse::<VarNames>()?,
    };

    let cfg = args.format.config();
    if args.quiet {
        names.check_width(table.width())?;
        let expression = match qmkit::minimize(&table) {
            Ok(m) => m.cover().expression(&names, cfg)?,
            Err(QmError::EmptyFunction) => cfg.constant(false).to_string(),
            Err(e) => return Err(e.into()),
        };
        println!("{}", expression);
        return Ok(());
    }

    let report = Report::new(&table, &names)?
        .verbose(args.verbose)
        .notation(cfg);
    print!("{}", report);
    Ok(())
}
