//! Residual networks for maximum flow and minimum-cost flow.
//!
//! Each added edge is stored as a pair of arcs, the forward one holding the
//! remaining capacity and the reverse one holding the flow pushed so far.

use std::{collections::VecDeque, fmt};

mod max_flow;
mod min_cost_flow;

#[derive(Clone, Debug)]
struct Arc {
    to: usize,
    // position of the paired arc in `g[to]`
    rev: usize,
    cap: i64,
    cost: i64,
}

/// An added edge, as seen from outside.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub cap: i64,
    pub flow: i64,
    pub cost: i64,
}

/// A cost-flow run found a cycle of negative total cost in the residual
/// graph, reachable from the source.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NegativeCycle;

impl NegativeCycle {
    /// `(flow, cost)` reported in place of a result by callers that want a
    /// plain pair.
    pub const SENTINEL: (i64, i64) = (-1, 0);
}

impl fmt::Display for NegativeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "negative cycle reachable from the source")
    }
}

impl std::error::Error for NegativeCycle {}

/// # Examples
/// ```
/// use flow_network::FlowNetwork;
///
/// let mut g = FlowNetwork::new(4);
/// g.add_edge(0, 1, 2);
/// g.add_edge(0, 2, 2);
/// g.add_edge(1, 3, 2);
/// g.add_edge(2, 3, 1);
/// assert_eq!(g.max_flow_dinic(0, 3), 3);
/// assert_eq!(g.min_cut(0), [true, false, true, false]);
/// ```
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    g: Vec<Vec<Arc>>,
    // `(from, position in g[from])` of each added edge's forward arc
    pos: Vec<(usize, usize)>,
}

impl FlowNetwork {
    pub fn new(n: usize) -> Self { Self { g: vec![vec![]; n], pos: vec![] } }

    pub fn len(&self) -> usize { self.g.len() }
    pub fn is_empty(&self) -> bool { self.g.is_empty() }
    pub fn edge_count(&self) -> usize { self.pos.len() }

    /// Adds an edge of unit cost.
    pub fn add_edge(&mut self, from: usize, to: usize, cap: i64) -> usize {
        self.add_edge_with_cost(from, to, cap, 1)
    }

    pub fn add_edge_with_cost(
        &mut self,
        from: usize,
        to: usize,
        cap: i64,
        cost: i64,
    ) -> usize {
        let n = self.len();
        assert!(from < n, "vertex {from} out of range for {n} vertices");
        assert!(to < n, "vertex {to} out of range for {n} vertices");
        assert!(cap >= 0, "negative capacity {cap}");

        let from_pos = self.g[from].len();
        let to_pos = self.g[to].len() + (from == to) as usize;
        self.g[from].push(Arc { to, rev: to_pos, cap, cost });
        self.g[to].push(Arc { to: from, rev: from_pos, cap: 0, cost: -cost });
        self.pos.push((from, from_pos));
        self.pos.len() - 1
    }

    pub fn edge(&self, i: usize) -> Edge {
        let (from, j) = self.pos[i];
        let arc = &self.g[from][j];
        let back = &self.g[arc.to][arc.rev];
        Edge {
            from,
            to: arc.to,
            cap: arc.cap + back.cap,
            flow: back.cap,
            cost: arc.cost,
        }
    }

    pub fn edges(&self) -> Vec<Edge> {
        (0..self.edge_count()).map(|i| self.edge(i)).collect()
    }

    /// Vertices reachable from `s` through arcs with remaining capacity.
    ///
    /// After a maximum flow from `s` has been pushed, these form the source
    /// side of a minimum cut.
    pub fn min_cut(&self, s: usize) -> Vec<bool> {
        let mut seen = vec![false; self.len()];
        seen[s] = true;
        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            for arc in &self.g[v] {
                if arc.cap > 0 && !seen[arc.to] {
                    seen[arc.to] = true;
                    queue.push_back(arc.to);
                }
            }
        }
        seen
    }

    fn push(&mut self, v: usize, j: usize, amount: i64) {
        let Arc { to, rev, .. } = self.g[v][j];
        self.g[v][j].cap -= amount;
        self.g[to][rev].cap += amount;
    }

    /// Pushes the bottleneck (capped by `limit`) along `path`, a sequence
    /// of `(vertex, arc position)`.
    fn augment(&mut self, path: &[(usize, usize)], limit: i64) -> i64 {
        let amount = path
            .iter()
            .map(|&(v, j)| self.g[v][j].cap)
            .fold(limit, i64::min);
        for &(v, j) in path {
            self.push(v, j, amount);
        }
        amount
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn diamond() {
        let mut g = FlowNetwork::new(4);
        g.add_edge(0, 1, 2);
        g.add_edge(1, 3, 2);
        g.add_edge(0, 2, 2);
        g.add_edge(2, 3, 2);
        let mut h = g.clone();

        assert_eq!(g.max_flow_ford_fulkerson(0, 3), 4);
        assert_eq!(h.max_flow_dinic(0, 3), 4);
        for g in [g, h] {
            for e in g.edges() {
                assert_eq!((e.cap, e.flow), (2, 2));
            }
            assert_eq!(g.min_cut(0), [true, false, false, false]);
        }
    }

    #[test]
    fn edge_view() {
        let mut g = FlowNetwork::new(3);
        assert_eq!(g.add_edge_with_cost(0, 1, 5, -3), 0);
        assert_eq!(g.add_edge(1, 1, 4), 1);
        assert_eq!(g.add_edge(1, 2, 2), 2);
        assert_eq!(g.edge_count(), 3);

        assert_eq!(g.max_flow_dinic(0, 2), 2);
        assert_eq!(g.edge(0), Edge { from: 0, to: 1, cap: 5, flow: 2, cost: -3 });
        assert_eq!(g.edge(1), Edge { from: 1, to: 1, cap: 4, flow: 0, cost: 1 });
        assert_eq!(g.edge(2), Edge { from: 1, to: 2, cap: 2, flow: 2, cost: 1 });
    }

    #[test]
    fn disconnected() {
        let mut g = FlowNetwork::new(4);
        g.add_edge(0, 1, 3);
        g.add_edge(2, 3, 3);
        assert_eq!(g.clone().max_flow_ford_fulkerson(0, 3), 0);
        assert_eq!(g.clone().max_flow_dinic(0, 3), 0);
        assert_eq!(g.min_cost_flow_bellman_ford(0, 3, 10), Ok((0, 0)));
    }

    #[test]
    #[should_panic = "negative capacity"]
    fn negative_capacity() { FlowNetwork::new(2).add_edge(0, 1, -1); }

    #[test]
    #[should_panic = "out of range"]
    fn vertex_out_of_range() { FlowNetwork::new(2).add_edge(0, 2, 1); }
}
