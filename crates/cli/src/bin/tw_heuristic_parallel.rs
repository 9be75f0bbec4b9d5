//! Parallel heuristic decomposer entry point: one worker per portfolio
//! member, each on its own graph and RNG stream.

fn main() {
    std::process::exit(treewidth_cli::run_cli(treewidth::Mode::Heuristic, true));
}
