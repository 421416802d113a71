//! Building blocks for competitive programming, one crate per algorithm.
//!
//! ```
//! use kyoprolib::{ds::OrderedTree, graph::FlowNetwork};
//!
//! let tree: OrderedTree<_> = vec![3, 1, 2].into();
//! assert_eq!(tree.get(0), Some(&1));
//!
//! let mut g = FlowNetwork::new(2);
//! g.add_edge(0, 1, 7);
//! assert_eq!(g.max_flow_dinic(0, 1), 7);
//! ```

pub use ds;
pub use graph;
pub use naive;
pub use ops;
pub use random;
