pub mod arbitrary;
pub mod digraph;
pub mod error;
pub mod factory;
pub mod traversal;
pub mod visit;

use std::fmt::Debug;
use std::hash::Hash;

/// Anything that can act as a vertex.  Vertices are identified by equality,
/// the graph never looks inside them.
pub trait Vertex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> Vertex for T {}

pub use arbitrary::{arb_digraph, DiGraphStrategy};
pub use digraph::DiGraph;
pub use error::{Error, Result};
pub use factory::{dag, full_graph, list_graph, star_graph};
pub use visit::{LogOrder, LogQuery, VertexLog, Visit};
