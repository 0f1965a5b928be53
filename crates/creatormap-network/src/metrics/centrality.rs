use std::collections::VecDeque;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::{Deadline, Graph, OmissionReason};

pub const PAGERANK_DAMPING: f64 = 0.85;
pub const PAGERANK_MAX_ITERATIONS: usize = 100;
/// Per-node convergence tolerance; the L1 change must fall below `n * tol`.
const PAGERANK_TOLERANCE: f64 = 1e-6;

/// Neighbour lists with edge weights, indexed like the graph's nodes.
fn weighted_adjacency(g: &Graph) -> Vec<Vec<(usize, f64)>> {
    g.node_indices()
        .map(|ix| {
            g.edges(ix)
                .map(|edge| {
                    let other = if edge.source() == ix { edge.target() } else { edge.source() };
                    (other.index(), edge.weight().weight)
                })
                .collect()
        })
        .collect()
}

/// `degree / (n - 1)`; every node gets 1.0 in a single-node graph.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn degree_centrality(g: &Graph, deadline: Deadline) -> Result<Vec<f64>, OmissionReason> {
    deadline.check()?;
    let n = g.node_count();
    if n == 0 {
        return Err(OmissionReason::EmptyGraph);
    }
    if n == 1 {
        return Ok(vec![1.0]);
    }

    let scale = 1.0 / (n as f64 - 1.0);
    Ok(g
        .node_indices()
        .map(|ix| g.edges(ix).count() as f64 * scale)
        .collect())
}

/// Brandes betweenness over unweighted shortest paths, normalised by
/// `(n - 1)(n - 2)` when `n > 2`.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn betweenness_centrality(
    g: &Graph,
    deadline: Deadline,
) -> Result<Vec<f64>, OmissionReason> {
    deadline.check()?;
    let n = g.node_count();
    if n == 0 {
        return Err(OmissionReason::EmptyGraph);
    }

    let adjacency: Vec<Vec<usize>> = g
        .node_indices()
        .map(|ix| g.neighbors(ix).map(NodeIndex::index).collect())
        .collect();

    let mut centrality = vec![0.0; n];
    let mut stack = Vec::with_capacity(n);
    let mut queue = VecDeque::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0_f64; n];
    let mut distance: Vec<Option<usize>> = vec![None; n];
    let mut delta = vec![0.0_f64; n];

    for source in 0..n {
        deadline.check()?;

        stack.clear();
        for preds in &mut predecessors {
            preds.clear();
        }
        sigma.fill(0.0);
        distance.fill(None);
        delta.fill(0.0);

        sigma[source] = 1.0;
        distance[source] = Some(0);
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = distance[v].unwrap_or_default();
            for &w in &adjacency[v] {
                if distance[w].is_none() {
                    distance[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if distance[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
            }
            if w != source {
                centrality[w] += delta[w];
            }
        }
    }

    // Each unordered pair was counted from both ends, which the
    // (n - 1)(n - 2) normaliser already accounts for.
    if n > 2 {
        let scale = 1.0 / ((n as f64 - 1.0) * (n as f64 - 2.0));
        for value in &mut centrality {
            *value *= scale;
        }
    }
    Ok(centrality)
}

/// Weighted PageRank by power iteration.
///
/// Edge weights split each node's outgoing mass; isolated nodes spread theirs
/// uniformly. Fails with [`OmissionReason::NotConverged`] if the L1 change is
/// still at or above `n * 1e-6` after [`PAGERANK_MAX_ITERATIONS`] rounds.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn pagerank(g: &Graph, deadline: Deadline) -> Result<Vec<f64>, OmissionReason> {
    deadline.check()?;
    let n = g.node_count();
    if n == 0 {
        return Err(OmissionReason::EmptyGraph);
    }

    let adjacency = weighted_adjacency(g);
    let out_weight: Vec<f64> = adjacency
        .iter()
        .map(|nbrs| nbrs.iter().map(|&(_, w)| w).sum())
        .collect();
    let dangling: Vec<usize> = (0..n).filter(|&i| out_weight[i] <= 0.0).collect();

    let uniform = 1.0 / n as f64;
    let mut ranks = vec![uniform; n];
    let mut next = vec![0.0; n];

    for _ in 0..PAGERANK_MAX_ITERATIONS {
        deadline.check()?;

        next.fill(0.0);
        let dangling_mass: f64 =
            PAGERANK_DAMPING * dangling.iter().map(|&i| ranks[i]).sum::<f64>();

        for (v, nbrs) in adjacency.iter().enumerate() {
            if out_weight[v] <= 0.0 {
                continue;
            }
            let share = PAGERANK_DAMPING * ranks[v] / out_weight[v];
            for &(w, weight) in nbrs {
                next[w] += share * weight;
            }
        }
        for value in &mut next {
            *value += dangling_mass * uniform + (1.0 - PAGERANK_DAMPING) * uniform;
        }

        let change: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut ranks, &mut next);
        if change < n as f64 * PAGERANK_TOLERANCE {
            return Ok(ranks);
        }
    }

    Err(OmissionReason::NotConverged {
        iterations: PAGERANK_MAX_ITERATIONS,
    })
}
