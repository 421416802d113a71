use std::collections::VecDeque;

use crate::FlowNetwork;

const UNREACHED: usize = usize::MAX;

impl FlowNetwork {
    /// Augments along any path found by depth-first search until none is
    /// left. The number of rounds is bounded by the flow value.
    pub fn max_flow_ford_fulkerson(&mut self, s: usize, t: usize) -> i64 {
        assert_ne!(s, t, "source and sink must differ");
        let mut flow = 0;
        while let Some(path) = self.any_path(s, t) {
            let pushed = self.augment(&path, i64::MAX);
            log::trace!("ford-fulkerson: pushed {pushed} along {} arcs", path.len());
            flow += pushed;
        }
        log::debug!("ford-fulkerson: max flow {s} -> {t} is {flow}");
        flow
    }

    fn any_path(&self, s: usize, t: usize) -> Option<Vec<(usize, usize)>> {
        let n = self.len();
        let mut seen = vec![false; n];
        let mut next = vec![0; n];
        let mut path = vec![];
        seen[s] = true;
        let mut v = s;
        while v != t {
            let arcs = &self.g[v];
            let found = (next[v]..arcs.len())
                .find(|&j| arcs[j].cap > 0 && !seen[arcs[j].to]);
            match found {
                Some(j) => {
                    next[v] = j + 1;
                    path.push((v, j));
                    v = arcs[j].to;
                    seen[v] = true;
                }
                None => {
                    next[v] = arcs.len();
                    v = path.pop()?.0;
                }
            }
        }
        Some(path)
    }

    /// Dinic's algorithm: blocking flows over BFS layers.
    pub fn max_flow_dinic(&mut self, s: usize, t: usize) -> i64 {
        assert_ne!(s, t, "source and sink must differ");
        let mut flow = 0;
        for phase in 1.. {
            let level = self.levels(s);
            if level[t] == UNREACHED {
                break;
            }
            let mut iter = vec![0; self.len()];
            let mut phase_flow = 0;
            while let Some(path) = self.layered_path(s, t, &level, &mut iter) {
                phase_flow += self.augment(&path, i64::MAX);
            }
            log::debug!(
                "dinic phase {phase}: distance {}, pushed {phase_flow}",
                level[t],
            );
            flow += phase_flow;
        }
        flow
    }

    fn levels(&self, s: usize) -> Vec<usize> {
        let mut level = vec![UNREACHED; self.len()];
        level[s] = 0;
        let mut queue = VecDeque::from([s]);
        while let Some(v) = queue.pop_front() {
            for arc in &self.g[v] {
                if arc.cap > 0 && level[arc.to] == UNREACHED {
                    level[arc.to] = level[v] + 1;
                    queue.push_back(arc.to);
                }
            }
        }
        level
    }

    // `iter[v]` only moves past arcs that cannot lead to `t` in this phase
    fn layered_path(
        &self,
        s: usize,
        t: usize,
        level: &[usize],
        iter: &mut [usize],
    ) -> Option<Vec<(usize, usize)>> {
        let mut path: Vec<(usize, usize)> = vec![];
        let mut v = s;
        while v != t {
            let arcs = &self.g[v];
            while iter[v] < arcs.len() {
                let arc = &arcs[iter[v]];
                if arc.cap > 0 && level[arc.to] == level[v] + 1 {
                    break;
                }
                iter[v] += 1;
            }
            if iter[v] < arcs.len() {
                path.push((v, iter[v]));
                v = arcs[iter[v]].to;
            } else {
                let (u, _) = path.pop()?;
                iter[u] += 1;
                v = u;
            }
        }
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;
    use randgen::{Digraph, Gen};

    use crate::*;

    fn init_logger() { let _ = env_logger::builder().is_test(true).try_init(); }

    fn assert_feasible(g: &FlowNetwork, s: usize, t: usize, flow: i64) {
        let mut excess = vec![0; g.len()];
        for e in g.edges() {
            assert!(0 <= e.flow && e.flow <= e.cap);
            excess[e.from] -= e.flow;
            excess[e.to] += e.flow;
        }
        for v in 0..g.len() {
            let expected = match v {
                _ if v == s => -flow,
                _ if v == t => flow,
                _ => 0,
            };
            assert_eq!(excess[v], expected, "conservation at {v}");
        }
    }

    fn cut_capacity(g: &FlowNetwork, side: &[bool]) -> i64 {
        g.edges()
            .iter()
            .filter(|e| side[e.from] && !side[e.to])
            .map(|e| e.cap)
            .sum()
    }

    #[test]
    fn random_agreement() {
        init_logger();
        let mut rng = ChaCha20Rng::from_seed([0xF1; 32]);
        for _ in 0..300 {
            let n = rng.gen_range(2..10);
            let m = rng.gen_range(0..30);
            let edges = Digraph { n, m, cap: 0..10, cost: 0..1, acyclic: false }
                .generate(&mut rng);
            let mut g = FlowNetwork::new(n);
            for &(from, to, cap, _) in &edges {
                g.add_edge(from, to, cap);
            }
            let s = rng.gen_range(0..n);
            let t = (s + rng.gen_range(1..n)) % n;

            let mut ff = g.clone();
            let mut dinic = g;
            let flow = ff.max_flow_ford_fulkerson(s, t);
            assert_eq!(dinic.max_flow_dinic(s, t), flow);

            for g in [&ff, &dinic] {
                assert_feasible(g, s, t, flow);
                let side = g.min_cut(s);
                assert!(side[s] && !side[t]);
                assert_eq!(cut_capacity(g, &side), flow);
            }
        }
    }

    #[test]
    fn long_path() {
        init_logger();
        let n = 200_000;
        let mut g = FlowNetwork::new(n);
        for v in 1..n {
            g.add_edge(v - 1, v, 1 + (v % 7) as i64);
        }
        assert_eq!(g.clone().max_flow_ford_fulkerson(0, n - 1), 1);
        assert_eq!(g.max_flow_dinic(0, n - 1), 1);
    }

    #[test]
    fn repeated_runs_add_nothing() {
        let mut g = FlowNetwork::new(3);
        g.add_edge(0, 1, 5);
        g.add_edge(1, 2, 3);
        assert_eq!(g.max_flow_dinic(0, 2), 3);
        assert_eq!(g.max_flow_dinic(0, 2), 0);
        assert_eq!(g.max_flow_ford_fulkerson(0, 2), 0);
        // pushing back from the sink undoes the flow
        assert_eq!(g.max_flow_ford_fulkerson(2, 0), 3);
        assert!(g.edges().iter().all(|e| e.flow == 0));
    }
}
