use super::config::{ResourceLimits, SearchConfig, SearchStrategy};
use super::graph::{NodeId, SurfaceGraph};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::trace;

const NO_NODE: u32 = u32::MAX;

/// Result of one shortest-path search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Minimum path cost and, when recording is enabled, the node chain from source to target.
    Found { cost: f64, path: Vec<NodeId> },
    /// No path connects the two nodes.
    Unreachable,
    /// Every remaining path is longer than the configured cutoff.
    BeyondCutoff,
}

/// The search settled more nodes than the configured limit allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionLimitReached {
    pub limit: usize,
}

#[derive(Debug, Clone, Copy)]
struct Frontier {
    priority: f64,
    cost: f64,
    node: NodeId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so that `BinaryHeap` pops the lowest priority, then the lowest node index.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Shortest-path search over a shared, read-only surface graph.
///
/// A `PathSearch` holds no mutable state; every call to [`PathSearch::run`] allocates its
/// own distance and predecessor buffers, so searches may run concurrently.
pub struct PathSearch<'g> {
    graph: &'g SurfaceGraph,
    strategy: SearchStrategy,
    max_distance: Option<f64>,
    max_expansions: usize,
    record_path: bool,
}

impl<'g> PathSearch<'g> {
    pub fn new(graph: &'g SurfaceGraph, search: &SearchConfig, limits: &ResourceLimits) -> Self {
        Self {
            graph,
            strategy: search.strategy,
            max_distance: search.max_distance,
            max_expansions: limits.max_search_expansions,
            record_path: search.record_paths,
        }
    }

    pub fn run(&self, source: NodeId, target: NodeId) -> Result<SearchOutcome, ExpansionLimitReached> {
        if source == target {
            return Ok(SearchOutcome::Found {
                cost: 0.0,
                path: if self.record_path { vec![source] } else { Vec::new() },
            });
        }

        let node_count = self.graph.node_count();
        let target_position = self.graph.position(target);
        let heuristic = |node: NodeId| match self.strategy {
            SearchStrategy::Dijkstra => 0.0,
            SearchStrategy::AStar => nalgebra::distance(&self.graph.position(node), &target_position),
        };

        let mut best = vec![f64::INFINITY; node_count];
        let mut previous = vec![NO_NODE; node_count];
        let mut settled = vec![false; node_count];
        let mut heap = BinaryHeap::new();
        let mut expansions = 0usize;

        best[source as usize] = 0.0;
        heap.push(Frontier {
            priority: heuristic(source),
            cost: 0.0,
            node: source,
        });

        while let Some(Frontier {
            priority,
            cost,
            node,
        }) = heap.pop()
        {
            if settled[node as usize] {
                continue;
            }
            if self.max_distance.is_some_and(|max| priority > max) {
                trace!(expansions, "Search frontier passed the distance cutoff.");
                return Ok(SearchOutcome::BeyondCutoff);
            }
            if node == target {
                trace!(expansions, cost, "Search reached target.");
                return Ok(SearchOutcome::Found {
                    cost,
                    path: if self.record_path {
                        self.trace_back(&previous, source, target)
                    } else {
                        Vec::new()
                    },
                });
            }

            settled[node as usize] = true;
            expansions += 1;
            if expansions > self.max_expansions {
                return Err(ExpansionLimitReached {
                    limit: self.max_expansions,
                });
            }

            for (neighbor, weight) in self.graph.neighbors(node) {
                if settled[neighbor as usize] {
                    continue;
                }
                let candidate = cost + weight;
                if candidate < best[neighbor as usize] {
                    best[neighbor as usize] = candidate;
                    previous[neighbor as usize] = node;
                    heap.push(Frontier {
                        priority: candidate + heuristic(neighbor),
                        cost: candidate,
                        node: neighbor,
                    });
                }
            }
        }

        trace!(expansions, "Search exhausted the reachable surface.");
        Ok(SearchOutcome::Unreachable)
    }

    fn trace_back(&self, previous: &[u32], source: NodeId, target: NodeId) -> Vec<NodeId> {
        let mut path = vec![target];
        let mut node = target;
        while node != source {
            node = previous[node as usize];
            if node == NO_NODE {
                break;
            }
            path.push(node);
        }
        path.reverse();
        path
    }
}
