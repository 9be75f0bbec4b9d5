//! Orchestrator: mode dispatch between the exact and heuristic
//! decomposers, lb/ub combination, the bounded worker pool for
//! `-parallel` runs, a time-budget watchdog, and cancellation handling.
//!
//! Every entry point here accepts a [`TerminationFlag`] and an
//! [`AnytimeReporter`] so the CLI's `c status` stream and SIGTERM/time
//! budget handling are plumbed the same way whether the caller picked
//! exact or heuristic, sequential or parallel.

use crate::config::{Config, Mode};
use crate::decomposition::{DecompositionQuality, TreeDecomposition};
use crate::exact::solve_exact;
use crate::graph::Graph;
use crate::heuristics::{self, AnytimeReporter, HeuristicKind, NullReporter};
use crate::lower_bounds::best_lower_bound;
use crate::rng::RngHandle;
use crate::sat::TerminationFlag;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Spawns the watchdog thread that signals `terminate` once
/// `config.time_budget` elapses, if one was set. Returns `None` when no
/// budget is configured, so callers can skip the `thread::scope` join
/// point entirely in the common unlimited-time case.
fn spawn_watchdog<'scope>(
    scope: &'scope std::thread::Scope<'scope, '_>,
    config: &Config,
    terminate: &TerminationFlag,
) -> Option<std::thread::ScopedJoinHandle<'scope, ()>> {
    let budget = config.time_budget?;
    let terminate = terminate.clone();
    Some(scope.spawn(move || {
        let start = std::time::Instant::now();
        while !terminate.is_set() {
            if start.elapsed() >= budget {
                terminate.signal();
                return;
            }
            std::thread::sleep(Duration::from_millis(10).min(budget));
        }
    }))
}

/// The number of heuristic workers to spawn in parallel mode:
/// `config.worker_count` if set, else one per portfolio member.
fn worker_count(config: &Config) -> usize {
    config
        .worker_count
        .unwrap_or(HEURISTIC_PORTFOLIO.len())
        .max(1)
}

const HEURISTIC_PORTFOLIO: [HeuristicKind; 4] = [
    HeuristicKind::MinDegree,
    HeuristicKind::MinFill,
    HeuristicKind::Mcs,
    HeuristicKind::MmwSeeded,
];

fn quality_for(mode: Mode) -> DecompositionQuality {
    match mode {
        Mode::Exact => DecompositionQuality::Exact,
        Mode::Heuristic => DecompositionQuality::Heuristic,
    }
}

/// Top-level dispatch: the one function the CLI binaries call. Dispatches
/// on `config.mode`/`config.parallel`; every path honors `terminate` and
/// never returns an invalid decomposition. If `config.time_budget` is
/// set, a watchdog thread signals `terminate` once it elapses.
pub fn run(
    graph: &Graph,
    config: &Config,
    rng: &mut RngHandle,
    reporter: &mut dyn AnytimeReporter,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    if graph.vertex_count() == 0 {
        return TreeDecomposition::trivial(graph.copy(), quality_for(config.mode));
    }

    std::thread::scope(|scope| {
        let watchdog = spawn_watchdog(scope, config, terminate);

        let result = match (config.mode, config.parallel) {
            (Mode::Heuristic, false) => run_heuristic_sequential(graph, config, rng, reporter, terminate),
            (Mode::Heuristic, true) => run_heuristic_parallel(graph, config, rng, terminate),
            (Mode::Exact, false) => run_exact_sequential(graph, config, rng, reporter, terminate),
            (Mode::Exact, true) => run_exact_parallel(graph, config, rng, terminate),
        };

        // Wake the watchdog so it doesn't outlive this call by up to its
        // own poll interval; harmless to set even though the work is
        // already done and nothing downstream re-reads `terminate`.
        if let Some(watchdog) = watchdog {
            terminate.signal();
            watchdog.join().expect("watchdog thread panicked");
        }

        result
    })
}

/// Seeds `kind`'s permutation and polishes it with a tabu search - the
/// unit of work every heuristic worker (sequential or parallel) runs.
fn run_one_heuristic(
    graph: &Graph,
    kind: HeuristicKind,
    config: &Config,
    rng: &mut RngHandle,
    reporter: &mut dyn AnytimeReporter,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let seed = heuristics::run_heuristic(kind, graph, rng);
    heuristics::tabu::tabu_search(graph, &seed, &config.tabu, rng, reporter, terminate)
}

/// Forwards a report to `inner` only when it strictly improves on every
/// width reported so far across the whole portfolio - without this, the
/// `c status` stream would regress every time a new portfolio member
/// starts from a worse seed than the previous member's polished result.
struct IncumbentReporter<'a> {
    inner: &'a mut dyn AnytimeReporter,
    best_width: usize,
}

impl<'a> AnytimeReporter for IncumbentReporter<'a> {
    fn report(&mut self, decomposition: &TreeDecomposition) {
        if decomposition.width() < self.best_width {
            self.best_width = decomposition.width();
            self.inner.report(decomposition);
        }
    }
}

fn run_heuristic_sequential(
    graph: &Graph,
    config: &Config,
    rng: &mut RngHandle,
    reporter: &mut dyn AnytimeReporter,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let mut incumbent = IncumbentReporter {
        inner: reporter,
        best_width: usize::MAX,
    };
    let mut best: Option<TreeDecomposition> = None;

    for &kind in HEURISTIC_PORTFOLIO.iter() {
        if terminate.is_set() {
            break;
        }
        let mut worker_rng = rng.fork();
        let candidate = run_one_heuristic(graph, kind, config, &mut worker_rng, &mut incumbent, terminate);
        best = Some(match best {
            Some(current) if current.width() <= candidate.width() => current,
            _ => candidate,
        });
    }

    best.unwrap_or_else(|| TreeDecomposition::trivial(graph.copy(), DecompositionQuality::Heuristic))
}

/// Runs the portfolio concurrently across [`worker_count`] threads, each
/// on its own forked RNG stream and reading the shared graph immutably -
/// `Graph` is cheap enough to clone per-decomposition inside `eliminate`
/// that workers only need a shared `&Graph`, not a clone apiece.
///
/// The task list is the portfolio, cycled to fill out `worker_count`
/// tasks when more workers are configured than portfolio members (spare
/// capacity becomes extra restarts of earlier members against fresh RNG
/// forks) and chunked round-robin across fewer threads than tasks when
/// `worker_count` is smaller than the portfolio. `best_width` is a
/// monotonic shared register, published via `fetch_min` as each worker
/// finishes; nothing currently reads it back mid-search, so it is
/// observational only rather than feeding pruning into `best_move`.
fn run_heuristic_parallel(
    graph: &Graph,
    config: &Config,
    rng: &mut RngHandle,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let workers = worker_count(config);
    let task_count = HEURISTIC_PORTFOLIO.len().max(workers);
    let tasks: Vec<(HeuristicKind, RngHandle)> = (0..task_count)
        .map(|i| (HEURISTIC_PORTFOLIO[i % HEURISTIC_PORTFOLIO.len()], rng.fork()))
        .collect();

    let mut per_worker: Vec<Vec<(HeuristicKind, RngHandle)>> = (0..workers).map(|_| Vec::new()).collect();
    for (i, task) in tasks.into_iter().enumerate() {
        per_worker[i % workers].push(task);
    }

    let best_width = AtomicUsize::new(usize::MAX);

    let results: Vec<Option<TreeDecomposition>> = std::thread::scope(|scope| {
        let handles: Vec<_> = per_worker
            .into_iter()
            .map(|worker_tasks| {
                let best_width = &best_width;
                scope.spawn(move || {
                    let mut local_best: Option<TreeDecomposition> = None;
                    for (kind, mut worker_rng) in worker_tasks {
                        if terminate.is_set() {
                            break;
                        }
                        let mut reporter = NullReporter;
                        let decomposition =
                            run_one_heuristic(graph, kind, config, &mut worker_rng, &mut reporter, terminate);
                        best_width.fetch_min(decomposition.width(), Ordering::SeqCst);
                        local_best = Some(match local_best {
                            Some(current) if current.width() <= decomposition.width() => current,
                            _ => decomposition,
                        });
                    }
                    local_best
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("heuristic worker panicked"))
            .collect()
    });

    results
        .into_iter()
        .flatten()
        .min_by_key(TreeDecomposition::width)
        .unwrap_or_else(|| TreeDecomposition::trivial(graph.copy(), DecompositionQuality::Heuristic))
}

/// Picks whichever of `exact_result` or `fallback` has the smaller
/// width - used after a (possibly terminated) exact search, since a
/// cancelled `solve_exact` falls back to the trivial `n - 1` bag and
/// must never regress below an upper bound already in hand.
fn better_of(exact_result: TreeDecomposition, fallback: TreeDecomposition) -> TreeDecomposition {
    if exact_result.width() <= fallback.width() {
        exact_result
    } else {
        fallback
    }
}

fn run_exact_sequential(
    graph: &Graph,
    config: &Config,
    rng: &mut RngHandle,
    reporter: &mut dyn AnytimeReporter,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let mut lb_rng = rng.fork();
    let lb = best_lower_bound(graph, &mut lb_rng, graph.vertex_count());
    let ub_decomposition = run_heuristic_sequential(graph, config, rng, reporter, terminate);

    if terminate.is_set() || lb >= ub_decomposition.width() {
        return ub_decomposition;
    }

    let exact_result = solve_exact(graph, ub_decomposition.width(), config, terminate);
    better_of(exact_result, ub_decomposition)
}

/// As `run_exact_sequential`, but lb computation and the heuristic ub
/// sweep run on their own threads concurrently with each other; the
/// SAT search itself stays single-threaded on the calling thread,
/// since `CdclSolver` has no internal parallel back-end.
fn run_exact_parallel(
    graph: &Graph,
    config: &Config,
    rng: &mut RngHandle,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let mut lb_rng = rng.fork();
    let mut ub_rng = rng.fork();
    let clique_step_budget = graph.vertex_count();

    let (lb, ub_decomposition) = std::thread::scope(|scope| {
        let lb_handle = scope.spawn(|| best_lower_bound(graph, &mut lb_rng, clique_step_budget));
        let ub_handle = scope.spawn(|| run_heuristic_parallel(graph, config, &mut ub_rng, terminate));
        (
            lb_handle.join().expect("lower-bound worker panicked"),
            ub_handle.join().expect("heuristic worker panicked"),
        )
    });

    if terminate.is_set() || lb >= ub_decomposition.width() {
        return ub_decomposition;
    }

    let exact_result = solve_exact(graph, ub_decomposition.width(), config, terminate);
    better_of(exact_result, ub_decomposition)
}
