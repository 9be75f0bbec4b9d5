//! Shared flag parsing and run loop for the four CLI binaries. Each
//! binary differs only in which default `(mode, parallel)` pair it
//! hands to [`run_cli`]; `-heuristic`/`-parallel` on the command line
//! can still override those defaults at runtime.

use std::time::{SystemTime, UNIX_EPOCH};
use treewidth::{AnytimeReporter, CardinalityStrategy, Config, Mode, RngHandle, TerminationFlag, TreeDecomposition};

pub const HELP_TEXT: &str = "\
Usage: <binary> [options] < input.gr > output.td

Reads a PACE/DIMACS graph from stdin, writes a tree decomposition to stdout.

Options:
  -s <seed>   set the RNG seed (default 0)
  -h          print this help and exit
  -log        emit anytime `c status <width+1> <epoch-ms>` progress lines
  -tikz       render the decomposition as TikZ instead of PACE text
  -parallel   enable the worker-pool parallel path
  -heuristic  force heuristic mode regardless of the binary invoked
  -e <name>   cardinality encoding: binomial | sequential | binary | commander
";

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub seed: u64,
    pub log: bool,
    pub tikz: bool,
    pub parallel: bool,
    pub heuristic: bool,
    pub cardinality_strategy: CardinalityStrategy,
    pub help: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        CliOptions {
            seed: 0,
            log: false,
            tikz: false,
            parallel: false,
            heuristic: false,
            cardinality_strategy: CardinalityStrategy::default(),
            help: false,
        }
    }
}

fn parse_cardinality_strategy(name: &str) -> Result<CardinalityStrategy, String> {
    match name.to_ascii_lowercase().as_str() {
        "binomial" => Ok(CardinalityStrategy::Binomial),
        "sequential" => Ok(CardinalityStrategy::Sequential),
        "binary" => Ok(CardinalityStrategy::Binary),
        "commander" => Ok(CardinalityStrategy::Commander),
        other => Err(format!("unknown cardinality encoding '{other}'")),
    }
}

/// Parses the flags documented in [`HELP_TEXT`]. Unknown flags and
/// missing values for `-s`/`-e` are reported as `Err` rather than
/// silently ignored, so a malformed invocation exits non-zero with a
/// message on stderr instead of running with a guessed default.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" => options.help = true,
            "-log" => options.log = true,
            "-tikz" => options.tikz = true,
            "-parallel" => options.parallel = true,
            "-heuristic" => options.heuristic = true,
            "-s" => {
                let value = iter.next().ok_or("-s requires a seed value")?;
                options.seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed '{value}'"))?;
            }
            "-e" => {
                let value = iter.next().ok_or("-e requires an encoding name")?;
                options.cardinality_strategy = parse_cardinality_strategy(&value)?;
            }
            other => return Err(format!("unrecognized flag '{other}'")),
        }
    }
    Ok(options)
}

/// Writes `c status <width+1> <epoch-ms>` lines when `-log` was passed;
/// a no-op reporter otherwise, so the anytime channel costs nothing
/// when the flag is absent.
pub struct StdoutReporter {
    enabled: bool,
}

impl StdoutReporter {
    pub fn new(enabled: bool) -> Self {
        StdoutReporter { enabled }
    }
}

impl AnytimeReporter for StdoutReporter {
    fn report(&mut self, decomposition: &TreeDecomposition) {
        if !self.enabled {
            return;
        }
        let epoch_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        println!("c status {} {}", decomposition.width() + 1, epoch_ms);
    }
}

/// Shared entry point for all four binaries: parse flags, read a graph
/// from stdin, run the orchestrator, write the decomposition to stdout.
/// Returns the process exit code: `0` on success, non-zero on a
/// flag-parsing or I/O failure.
pub fn run_cli(default_mode: Mode, default_parallel: bool) -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprint!("{HELP_TEXT}");
            return 1;
        }
    };

    if options.help {
        print!("{HELP_TEXT}");
        return 0;
    }

    env_logger::init();

    let graph = match treewidth_graph_io::read_graph(std::io::stdin()) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("error: {err}");
            return 1;
        }
    };

    let mode = if options.heuristic {
        Mode::Heuristic
    } else {
        default_mode
    };
    let config = Config {
        mode,
        parallel: options.parallel || default_parallel,
        seed: options.seed,
        cardinality_strategy: options.cardinality_strategy,
        ..Config::default()
    };

    let mut rng = RngHandle::from_seed(config.seed);
    let mut reporter = StdoutReporter::new(options.log);
    let terminate = TerminationFlag::new();

    let decomposition = treewidth::run(&graph, &config, &mut rng, &mut reporter, &terminate);

    let rendered = if options.tikz {
        decomposition.to_tikz_string()
    } else {
        decomposition.to_pace_string()
    };
    print!("{rendered}");

    0
}
