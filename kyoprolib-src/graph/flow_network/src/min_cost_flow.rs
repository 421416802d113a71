use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{FlowNetwork, NegativeCycle};

// (distance, predecessor arc) per vertex
type ShortestPaths = (Vec<Option<i64>>, Vec<(usize, usize)>);

#[derive(Eq, PartialEq)]
struct RevFst<F, S>(F, S);

impl<F: Ord, S: Eq> Ord for RevFst<F, S> {
    fn cmp(&self, other: &Self) -> Ordering { self.0.cmp(&other.0).reverse() }
}

impl<F: Ord, S: Eq> PartialOrd for RevFst<F, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FlowNetwork {
    /// Successive shortest paths, each found by Bellman-Ford, until `limit`
    /// units are sent or `t` is unreachable. Returns `(flow, cost)`.
    ///
    /// Costs may be negative. Fails if a residual cycle of negative cost is
    /// reachable from `s`; cycles not reachable from `s` go unnoticed.
    /// Flow pushed by earlier rounds stays in the network on failure.
    pub fn min_cost_flow_bellman_ford(
        &mut self,
        s: usize,
        t: usize,
        limit: i64,
    ) -> Result<(i64, i64), NegativeCycle> {
        assert_ne!(s, t, "source and sink must differ");
        let (mut flow, mut cost) = (0, 0);
        for round in 1.. {
            if flow >= limit {
                break;
            }
            let (dist, prev) = self.bellman_ford(s)?;
            let Some(d) = dist[t] else { break };
            let path = trace_back(&prev, s, t);
            let pushed = self.augment(&path, limit - flow);
            log::debug!("bellman-ford round {round}: {pushed} units at {d} each");
            flow += pushed;
            cost += pushed * d;
        }
        Ok((flow, cost))
    }

    /// Successive shortest paths with Dijkstra on potential-reduced costs.
    ///
    /// Without `has_negative_cost` every cost must be non-negative. With it,
    /// the first round runs Bellman-Ford to set up the potentials, and a
    /// negative cycle reachable from `s` makes the run fail.
    pub fn min_cost_flow_dijkstra(
        &mut self,
        s: usize,
        t: usize,
        limit: i64,
        has_negative_cost: bool,
    ) -> Result<(i64, i64), NegativeCycle> {
        assert_ne!(s, t, "source and sink must differ");
        let mut potential = vec![0; self.len()];
        let (mut flow, mut cost) = (0, 0);
        for round in 1.. {
            if flow >= limit {
                break;
            }
            let (dist, prev) = if round == 1 && has_negative_cost {
                self.bellman_ford(s)?
            } else {
                self.dijkstra(s, &potential)
            };
            if dist[t].is_none() {
                break;
            }
            // vertices unreachable now stay unreachable, so their
            // potentials are never read again
            for (h, d) in potential.iter_mut().zip(&dist) {
                if let Some(d) = d {
                    *h += d;
                }
            }
            let d = potential[t] - potential[s];
            let path = trace_back(&prev, s, t);
            let pushed = self.augment(&path, limit - flow);
            log::debug!("dijkstra round {round}: {pushed} units at {d} each");
            flow += pushed;
            cost += pushed * d;
        }
        Ok((flow, cost))
    }

    fn bellman_ford(&self, s: usize) -> Result<ShortestPaths, NegativeCycle> {
        let n = self.len();
        let mut dist = vec![None; n];
        let mut prev = vec![(s, 0); n];
        dist[s] = Some(0);
        // a shortest path has at most n - 1 arcs, so an update in round n
        // means a negative cycle
        for round in 1..=n {
            let mut updated = false;
            for v in 0..n {
                let Some(dv) = dist[v] else { continue };
                for (j, arc) in self.g[v].iter().enumerate() {
                    if arc.cap == 0 {
                        continue;
                    }
                    let nd = dv + arc.cost;
                    if dist[arc.to].map_or(true, |cur| nd < cur) {
                        dist[arc.to] = Some(nd);
                        prev[arc.to] = (v, j);
                        updated = true;
                    }
                }
            }
            if !updated {
                break;
            }
            if round == n {
                log::warn!("negative cycle reachable from vertex {s}");
                return Err(NegativeCycle);
            }
        }
        Ok((dist, prev))
    }

    fn dijkstra(&self, s: usize, potential: &[i64]) -> ShortestPaths {
        let n = self.len();
        let mut dist = vec![None; n];
        let mut prev = vec![(s, 0); n];
        let mut heap = BinaryHeap::new();
        dist[s] = Some(0);
        heap.push(RevFst(0, s));
        while let Some(RevFst(d, v)) = heap.pop() {
            if dist[v] != Some(d) {
                continue;
            }
            for (j, arc) in self.g[v].iter().enumerate() {
                if arc.cap == 0 {
                    continue;
                }
                let nd = d + arc.cost + potential[v] - potential[arc.to];
                if dist[arc.to].map_or(true, |cur| nd < cur) {
                    dist[arc.to] = Some(nd);
                    prev[arc.to] = (v, j);
                    heap.push(RevFst(nd, arc.to));
                }
            }
        }
        (dist, prev)
    }
}

fn trace_back(prev: &[(usize, usize)], s: usize, t: usize) -> Vec<(usize, usize)> {
    let mut path = vec![];
    let mut v = t;
    while v != s {
        path.push(prev[v]);
        v = prev[v].0;
    }
    path.reverse();
    path
}
