use std::{fs, process::ExitCode, str::FromStr};

use clap::Parser;
use ruleval::{EvalOptions, Expression, ParseVariableError, Value, Variables, tokenize};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Environment variable read for the log filter when `--log-level` is absent.
const LOG_ENV: &str = "RULEVAL_LOG";

/// ruleval evaluates a rule expression against command-line bindings and
/// prints the result.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binds a variable, written as NAME=VALUE. Repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, Value)>,

    /// Registers a constant, written as NAME=VALUE. Variables of the same
    /// name take precedence. Repeatable.
    #[arg(long = "const", value_name = "NAME=VALUE", value_parser = parse_binding)]
    constants: Vec<(String, Value)>,

    /// Treats the expression argument as a path and reads the expression
    /// from that file.
    #[arg(short, long)]
    file: bool,

    /// Prints the token stream instead of evaluating.
    #[arg(short, long)]
    tokens: bool,

    /// Rejects unclosed parentheses and trailing tokens.
    #[arg(long)]
    strict: bool,

    /// Skips the right operand of `and`/`or` once the result is decided.
    #[arg(long)]
    short_circuit: bool,

    /// Maximum nesting depth of groups, call arguments and `not` prefixes.
    #[arg(long, default_value_t = ruleval::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Log filter such as `debug` or `ruleval=trace`. Falls back to the
    /// RULEVAL_LOG environment variable, then to `warn`.
    #[arg(long)]
    log_level: Option<String>,

    expression: String,
}

/// Splits a `NAME=VALUE` argument and reads the value as a literal.
fn parse_binding(input: &str) -> Result<(String, Value), ParseVariableError> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            let Ok(value) = Value::from_str(value);
            Ok((name.trim().to_owned(), value))
        },
        _ => Err(ParseVariableError { input: input.to_owned() }),
    }
}

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level.as_deref());

    let source = if args.file {
        match fs::read_to_string(&args.expression) {
            Ok(text) => text.trim_end_matches(['\r', '\n']).to_owned(),
            Err(e) => {
                error!(path = %args.expression, "failed to read expression file");
                eprintln!("Failed to read the input file '{}': {e}", args.expression);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.expression
    };

    if args.tokens {
        for token in tokenize(&source) {
            println!("{:>4}  {}", token.offset, token.kind);
        }
        return ExitCode::SUCCESS;
    }

    let options = EvalOptions::default().with_max_depth(args.max_depth)
                                        .with_strict(args.strict)
                                        .with_short_circuit(args.short_circuit);

    let mut engine = Expression::with_standard_functions().with_options(options);
    engine.constants_mut().extend(args.constants);

    let variables: Variables = args.vars.into_iter().collect();
    debug!(variables = variables.len(), "evaluating from command line");

    match engine.evaluate(&source, &variables) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}
