//! Tabu local search: starting from a seed permutation,
//! repeatedly relocate vertices to the position of a neighboring bag's
//! creator, accepting only strictly cost-improving moves, with a short
//! tabu queue to avoid immediately undoing a move and a random "kick"
//! when no improving move exists.
//!
//! `eliminate`'s bags are created in permutation order and never removed
//! afterward (`connect_components` only adds edges), so the bag created
//! for permutation index `i` is always `NodeIndex::new(i)` - this lets
//! the search map "vertex at position `i`" to "its bag" without
//! threading a separate lookup through [`crate::elimination::eliminate`].

use super::AnytimeReporter;
use crate::config::TabuConfig;
use crate::decomposition::{DecompositionQuality, TreeDecomposition};
use crate::elimination::eliminate;
use crate::graph::Graph;
use crate::rng::RngHandle;
use crate::sat::TerminationFlag;
use crate::vertex::VertexId;
use petgraph::graph::NodeIndex;
use rand::seq::IteratorRandom;
use rand::Rng;
use std::collections::VecDeque;

/// `Sigma |Bag|^2 + (maxBag * n)^2` - width dominates lexicographically
/// (the squared max-bag term swamps any sum-of-squares difference),
/// sum-of-squares breaks ties toward more small bags.
fn cost(decomposition: &TreeDecomposition) -> u64 {
    let n = decomposition.n() as u64;
    let mut sum_of_squares = 0u64;
    let mut max_bag = 0u64;
    for (_, bag) in decomposition.bags() {
        let len = bag.len() as u64;
        sum_of_squares += len * len;
        max_bag = max_bag.max(len);
    }
    let penalty = max_bag * n;
    sum_of_squares + penalty * penalty
}

fn move_vertex(permutation: &[VertexId], from: usize, to: usize) -> Vec<VertexId> {
    let mut next = permutation.to_vec();
    let v = next.remove(from);
    let clamped = to.min(next.len());
    next.insert(clamped, v);
    next
}

/// The best strictly-cost-improving relocation of any non-tabu vertex,
/// evaluated via its bag's smallest-indexed successor bag and
/// largest-indexed predecessor bag (`minSucc`/`maxPred`).
fn best_move(
    graph: &Graph,
    permutation: &[VertexId],
    current_cost: u64,
    tabu: &VecDeque<VertexId>,
) -> Option<(usize, Vec<VertexId>, u64)> {
    let decomposition = eliminate(graph, permutation, DecompositionQuality::Heuristic);
    let mut best: Option<(usize, Vec<VertexId>, u64)> = None;

    for (i, &v) in permutation.iter().enumerate() {
        if tabu.contains(&v) {
            continue;
        }
        let bag_id = NodeIndex::new(i);
        let neighbor_positions: Vec<usize> = decomposition
            .bag_neighbors(bag_id)
            .into_iter()
            .map(|id| id.index())
            .collect();

        let min_succ = neighbor_positions.iter().copied().filter(|&p| p > i).min();
        let max_pred = neighbor_positions.iter().copied().filter(|&p| p < i).max();

        for candidate_position in [min_succ, max_pred].into_iter().flatten() {
            let candidate = move_vertex(permutation, i, candidate_position);
            let candidate_cost = cost(&eliminate(graph, &candidate, DecompositionQuality::Heuristic));
            if candidate_cost < current_cost {
                let better_than_best = best
                    .as_ref()
                    .map(|(_, _, c)| candidate_cost < *c)
                    .unwrap_or(true);
                if better_than_best {
                    best = Some((i, candidate, candidate_cost));
                }
            }
        }
    }

    best
}

/// Runs up to `config.max_rounds` rounds of up to `config.max_steps_per_round`
/// steps each, starting from `seed`. Returns the best decomposition found,
/// reporting every strict width improvement through `reporter`.
pub fn tabu_search(
    graph: &Graph,
    seed: &[VertexId],
    config: &TabuConfig,
    rng: &mut RngHandle,
    reporter: &mut dyn AnytimeReporter,
    terminate: &TerminationFlag,
) -> TreeDecomposition {
    let mut best_permutation = seed.to_vec();
    let mut best_decomposition = eliminate(graph, &best_permutation, DecompositionQuality::Heuristic);
    let mut best_width = best_decomposition.width();
    reporter.report(&best_decomposition);

    if graph.vertex_count() < 2 {
        return best_decomposition;
    }

    let mut current_permutation = best_permutation.clone();
    let mut current_cost = cost(&best_decomposition);
    let mut tabu: VecDeque<VertexId> = VecDeque::new();

    for _round in 0..config.max_rounds {
        for _step in 0..config.max_steps_per_round {
            if terminate.is_set() {
                return best_decomposition;
            }
            match best_move(graph, &current_permutation, current_cost, &tabu) {
                Some((moved_index, candidate, candidate_cost)) => {
                    let moved_vertex = current_permutation[moved_index];
                    current_permutation = candidate;
                    current_cost = candidate_cost;
                    tabu.push_back(moved_vertex);
                    if tabu.len() > config.tabu_queue_len {
                        tabu.pop_front();
                    }
                }
                None => {
                    // Local optimum: kick a random non-tabu vertex to a
                    // uniformly random new position.
                    let non_tabu: Vec<usize> = (0..current_permutation.len())
                        .filter(|&i| !tabu.contains(&current_permutation[i]))
                        .collect();
                    let Some(&from) = non_tabu.iter().choose(rng.inner_mut()) else {
                        break;
                    };
                    let to = rng.inner_mut().gen_range(0..current_permutation.len());
                    let moved_vertex = current_permutation[from];
                    current_permutation = move_vertex(&current_permutation, from, to);
                    current_cost = cost(&eliminate(
                        graph,
                        &current_permutation,
                        DecompositionQuality::Heuristic,
                    ));
                    tabu.push_back(moved_vertex);
                    if tabu.len() > config.tabu_queue_len {
                        tabu.pop_front();
                    }
                }
            }

            let candidate_decomposition =
                eliminate(graph, &current_permutation, DecompositionQuality::Heuristic);
            if candidate_decomposition.width() < best_width {
                best_width = candidate_decomposition.width();
                best_permutation = current_permutation.clone();
                best_decomposition = candidate_decomposition;
                reporter.report(&best_decomposition);
            }
        }
    }

    best_decomposition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{NullReporter, VecReporter};

    fn cycle_graph(n: u32) -> Graph {
        let mut g = Graph::with_vertices(n as usize);
        for i in 1..n {
            g.add_edge(VertexId(i), VertexId(i + 1));
        }
        g.add_edge(VertexId(n), VertexId(1));
        g
    }

    #[test]
    fn never_returns_a_worse_width_than_the_seed() {
        let g = cycle_graph(6);
        let seed: Vec<_> = (1..=6u32).map(VertexId).collect();
        let seed_width = eliminate(&g, &seed, DecompositionQuality::Heuristic).width();

        let mut rng = RngHandle::from_seed(13);
        let config = TabuConfig {
            tabu_queue_len: 3,
            max_rounds: 4,
            max_steps_per_round: 8,
        };
        let mut reporter = NullReporter;
        let terminate = TerminationFlag::new();
        let result = tabu_search(&g, &seed, &config, &mut rng, &mut reporter, &terminate);
        assert!(result.width() <= seed_width);
        assert!(result.is_valid());
    }

    #[test]
    fn reports_at_least_the_initial_decomposition() {
        let g = cycle_graph(5);
        let seed: Vec<_> = (1..=5u32).map(VertexId).collect();
        let mut rng = RngHandle::from_seed(1);
        let config = TabuConfig {
            tabu_queue_len: 7,
            max_rounds: 2,
            max_steps_per_round: 4,
        };
        let mut reporter = VecReporter::default();
        let terminate = TerminationFlag::new();
        tabu_search(&g, &seed, &config, &mut rng, &mut reporter, &terminate);
        assert!(!reporter.widths.is_empty());
    }

    #[test]
    fn single_vertex_graph_terminates_immediately() {
        let g = Graph::with_vertices(1);
        let seed = vec![VertexId(1)];
        let mut rng = RngHandle::from_seed(0);
        let config = TabuConfig::default();
        let mut reporter = NullReporter;
        let terminate = TerminationFlag::new();
        let result = tabu_search(&g, &seed, &config, &mut rng, &mut reporter, &terminate);
        assert_eq!(result.width(), 0);
    }
}
