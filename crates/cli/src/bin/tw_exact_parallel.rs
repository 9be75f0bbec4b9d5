//! Parallel exact SAT decomposer entry point: lb and heuristic-ub
//! computation run concurrently ahead of the single-threaded SAT search.

fn main() {
    std::process::exit(treewidth_cli::run_cli(treewidth::Mode::Exact, true));
}
