//! Sequential exact SAT decomposer entry point.

fn main() {
    std::process::exit(treewidth_cli::run_cli(treewidth::Mode::Exact, false));
}
