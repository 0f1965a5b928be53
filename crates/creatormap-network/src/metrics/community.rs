//! Clauset-Newman-Moore greedy modularity communities on the unweighted graph.

use std::collections::BTreeMap;

use petgraph::graph::NodeIndex;

use super::{Deadline, Graph, OmissionReason};

/// Best merge among all adjacent community pairs: highest modularity gain,
/// then lowest first id, then lowest second id.
fn best_merge(dq: &[BTreeMap<usize, f64>]) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for (u, row) in dq.iter().enumerate() {
        for (&v, &gain) in row {
            let better = match best {
                None => true,
                Some((bu, bv, bg)) => gain > bg || (gain == bg && (u, v) < (bu, bv)),
            };
            if better {
                best = Some((u, v, gain));
            }
        }
    }
    best
}

/// Communities found by greedily merging the pair with the largest modularity
/// gain while that gain is non-negative.
///
/// Each community is returned as its member node indices. Requires at least
/// one edge.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn greedy_modularity_communities(
    g: &Graph,
    deadline: Deadline,
) -> Result<Vec<Vec<NodeIndex>>, OmissionReason> {
    deadline.check()?;
    let n = g.node_count();
    if n == 0 {
        return Err(OmissionReason::EmptyGraph);
    }
    let m = g.edge_count();
    if m == 0 {
        return Err(OmissionReason::NoEdges);
    }

    let q0 = 1.0 / (2.0 * m as f64);
    let degree: Vec<f64> = g
        .node_indices()
        .map(|ix| g.neighbors(ix).count() as f64)
        .collect();

    // a[i]: fraction of edge ends attached to community i.
    let mut a: Vec<f64> = degree.iter().map(|k| k * q0).collect();
    // dq[i][j]: modularity change from merging communities i and j, kept
    // symmetric and only for adjacent pairs.
    let mut dq: Vec<BTreeMap<usize, f64>> = g
        .node_indices()
        .map(|u| {
            g.neighbors(u)
                .filter(|&v| v != u)
                .map(|v| {
                    let gain = 2.0 * q0 - 2.0 * degree[u.index()] * degree[v.index()] * q0 * q0;
                    (v.index(), gain)
                })
                .collect()
        })
        .collect();
    let mut members: Vec<Vec<NodeIndex>> = g.node_indices().map(|ix| vec![ix]).collect();

    while let Some((u, v, gain)) = best_merge(&dq) {
        deadline.check()?;
        if gain < 0.0 {
            break;
        }

        // Merge u into v.
        let u_row = std::mem::take(&mut dq[u]);
        let v_row = std::mem::take(&mut dq[v]);
        let mut merged = BTreeMap::new();
        for (&w, &dq_uw) in &u_row {
            if w == v {
                continue;
            }
            let value = match v_row.get(&w) {
                Some(&dq_vw) => dq_uw + dq_vw,
                None => dq_uw - 2.0 * a[v] * a[w],
            };
            merged.insert(w, value);
        }
        for (&w, &dq_vw) in &v_row {
            if w == u || u_row.contains_key(&w) {
                continue;
            }
            merged.insert(w, dq_vw - 2.0 * a[u] * a[w]);
        }

        for &w in u_row.keys() {
            dq[w].remove(&u);
        }
        for (&w, &value) in &merged {
            dq[w].insert(v, value);
        }
        dq[v] = merged;

        a[v] += a[u];
        a[u] = 0.0;
        let moved = std::mem::take(&mut members[u]);
        members[v].extend(moved);
    }

    Ok(members.into_iter().filter(|c| !c.is_empty()).collect())
}
