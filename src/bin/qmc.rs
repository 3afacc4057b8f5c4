//! QMC Logic - Command Line Interface
//!
//! Minimizes boolean expressions or truth table columns and prints the result
//! in one of the supported notations.

use clap::Parser;
use log::{debug, info, warn};
use qmc_logic::format::{ExpressionFormat, FormatProfile, LatexFormat};
use qmc_logic::qmc::{SelectorKind, DEFAULT_EXACT_THRESHOLD};
use qmc_logic::{
    GateForm, Minimizable, MinimizeError, MinimizerConfig, NamedExpression, Parser as ExprParser,
    Ternary, TruthTable,
};
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "qmc")]
#[command(about = "Quine-McCluskey boolean expression minimizer", long_about = None)]
#[command(version)]
struct Args {
    /// Expressions to minimize, e.g. "a*b + a*!b" or "let y = a ^ b; let z = !a"
    #[arg(value_name = "EXPR")]
    expressions: Vec<String>,

    /// Input variables of a truth table given with --values, most significant first
    #[arg(short = 'i', long = "inputs", value_delimiter = ',')]
    inputs: Vec<String>,

    /// Truth table column as a string of 0, 1 and - (don't care), one per row
    #[arg(long = "values", requires = "inputs")]
    values: Vec<String>,

    /// Print the truth table of every input
    #[arg(short = 't', long = "table")]
    table: bool,

    /// Output notation: unicode, unicode-noand, derive, java, cupl, logisim, short, shorter or latex
    #[arg(short = 'f', long = "format", default_value = "short")]
    format: String,

    /// Prime selector: default, brute-force, brute-force-all or largest-first
    #[arg(short = 's', long = "selector", default_value_t = SelectorKind::Default)]
    selector: SelectorKind,

    /// Prime count below which the default selector searches exhaustively
    #[arg(long = "exact-threshold", default_value_t = DEFAULT_EXACT_THRESHOLD)]
    exact_threshold: usize,

    /// Always search exhaustively; fails on instances with too many primes
    #[arg(short = 'x', long = "exact")]
    exact: bool,

    /// Target gates: and-or, nand or nor
    #[arg(short = 'g', long = "gates", default_value_t = GateForm::AndOr)]
    gates: GateForm,

    /// Maximum number of inputs per gate
    #[arg(long = "fan-in")]
    fan_in: Option<usize>,

    /// Keep dominated primes (skip the dominance reduction)
    #[arg(long = "keep-dominated")]
    keep_dominated: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn formatter(name: &str) -> Option<Box<dyn ExpressionFormat>> {
    if name.eq_ignore_ascii_case("latex") {
        return Some(Box::new(LatexFormat::new()));
    }
    FormatProfile::by_name(name).map(|profile| Box::new(profile) as Box<dyn ExpressionFormat>)
}

fn parse_column(text: &str) -> Result<Vec<Ternary>, MinimizeError> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '0' => Ok(Ternary::Zero),
            '1' => Ok(Ternary::One),
            '-' | 'x' | 'X' | '2' => Ok(Ternary::DontCare),
            other => Err(MinimizeError::InvalidInput {
                message: format!("Invalid truth table value '{}'", other),
            }),
        })
        .collect()
}

/// One truth table per parsed expression plus one for `--values`
///
/// A syntax error drops only the list member it occurs in; the error is
/// reported and counted, the remaining members are still tabulated.
fn collect_tables(args: &Args) -> Result<(Vec<TruthTable>, usize), MinimizeError> {
    let mut tables = Vec::new();
    let mut failed = 0;

    for input in &args.expressions {
        for item in ExprParser::new(input).parse_all() {
            let named = match item {
                Ok(named) => named,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    failed += 1;
                    continue;
                }
            };
            let mut table = TruthTable::new(named.expression.collect_variables())?;
            let name = named.name.as_deref().unwrap_or("Y");
            table.add_expression(name, &named.expression)?;
            tables.push(table);
        }
    }

    if !args.values.is_empty() {
        let mut table = TruthTable::new(&args.inputs)?;
        for (index, column) in args.values.iter().enumerate() {
            let name = if args.values.len() == 1 {
                "Y".to_string()
            } else {
                format!("Y{}", index)
            };
            table.add_output(&name, parse_column(column)?)?;
        }
        tables.push(table);
    }

    Ok((tables, failed))
}

/// Minimize and print every input; returns the number of members that failed to parse
fn run(args: &Args) -> Result<usize, MinimizeError> {
    let format = formatter(&args.format).ok_or_else(|| MinimizeError::InvalidInput {
        message: format!("Unknown format '{}'", args.format),
    })?;
    let config = MinimizerConfig {
        selector: args.selector,
        exact_threshold: args.exact_threshold,
        remove_dominated: !args.keep_dominated,
        gate_form: args.gates,
        fan_in: args.fan_in,
        ..MinimizerConfig::default()
    };
    debug!("Configuration: {:?}", config);

    let (tables, failed) = collect_tables(args)?;
    if tables.is_empty() && failed == 0 {
        return Err(MinimizeError::InvalidInput {
            message: "Nothing to minimize: give an expression or --values".to_string(),
        });
    }

    for table in &tables {
        if args.table {
            print!("{}", table);
        }
        info!(
            "Minimizing {} output(s) over {} variable(s)",
            table.outputs().len(),
            table.variables().len()
        );
        let results: Vec<NamedExpression> = if args.exact {
            table.minimize_exact_with_config(&config)?
        } else {
            table.minimize_with_config(&config)?
        };
        for named in &results {
            println!("{}", format.format_named(named));
        }
    }
    Ok(failed)
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let log_config = ConfigBuilder::new().set_time_level(LevelFilter::Off).build();
    if let Err(e) = TermLogger::init(level, log_config, TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    match run(&args) {
        Ok(0) => {}
        Ok(failed) => {
            warn!("{} expression(s) could not be parsed", failed);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("qmc").chain(argv.iter().copied()))
    }

    #[test]
    fn test_syntax_error_skips_only_its_member() {
        let args = args(&["let y = a +; let z = a*b*c + a*b", "c * d"]);
        let (tables, failed) = collect_tables(&args).unwrap();
        assert_eq!(failed, 1);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].outputs()[0].name(), "z");
        assert_eq!(tables[1].outputs()[0].name(), "Y");
        assert_eq!(run(&args).unwrap(), 1);
    }

    #[test]
    fn test_clean_input_has_no_failures() {
        let args = args(&["a*b + a*!b", "--inputs", "A,B", "--values", "01-1"]);
        let (tables, failed) = collect_tables(&args).unwrap();
        assert_eq!(failed, 0);
        assert_eq!(tables.len(), 2);
        assert_eq!(run(&args).unwrap(), 0);
    }

    #[test]
    fn test_nothing_to_minimize() {
        assert!(matches!(
            run(&args(&[])),
            Err(MinimizeError::InvalidInput { .. })
        ));
    }
}
