//! Network simplex layer assignment for directed acyclic graphs.
//!
//! Given a graph of nodes and weighted, minimum-length edges, the engine
//! assigns every node an integer layer such that each edge spans at least its
//! minimum length, while minimizing the total weighted edge length. This is
//! the layering method of Emden R. Gansner, Eleftherios Koutsofios, Stephen
//! C. North and Kiem-Phong Vo, "A technique for drawing directed graphs",
//! IEEE Transactions on Software Engineering 19(3), pp. 214-230, 1993.
//!
//! The input graph must be weakly connected and free of directed cycles.
//! Neither precondition is re-verified by the engine itself;
//! [`Graph::make_connected`] and [`Graph::is_acyclic`] are provided to
//! establish them beforehand.
//!
//! ```
//! use beluga::{Edge, Graph, NetworkSimplex};
//!
//! let mut g: Graph = Graph::new();
//! let a = g.add_node();
//! let b = g.add_node();
//! let c = g.add_node();
//! Edge::builder().source(a).target(b).add_to(&mut g)?;
//! Edge::builder().source(b).target(c).add_to(&mut g)?;
//!
//! NetworkSimplex::for_graph(&mut g).execute();
//!
//! assert_eq!(g.node(a).layer, 0);
//! assert_eq!(g.node(b).layer, 1);
//! assert_eq!(g.node(c).layer, 2);
//! # Ok::<(), beluga::Error>(())
//! ```

pub mod error;
pub mod graph;
pub mod progress;
pub mod simplex;

pub use error::{Error, Result};
pub use graph::{Edge, EdgeBuilder, EdgeId, Graph, Node, NodeId};
pub use progress::{BasicProgressMonitor, ProgressMonitor};
pub use simplex::NetworkSimplex;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
