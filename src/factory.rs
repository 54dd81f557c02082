//! Ready-made graph shapes.

use crate::error::{Error, Result};
use crate::{DiGraph, Vertex};

/// Every vertex links to every vertex, itself included.
pub fn full_graph<V: Vertex>(vertices: &[V]) -> DiGraph<V> {
    let mut g = DiGraph::new();
    for v in vertices {
        g.add_vertex(v.clone());
    }
    for v in vertices {
        for w in vertices {
            g.insert_edge(v, w.clone());
        }
    }
    g
}

/// A DAG over `vertices` taken in topological order: each vertex links to
/// all the vertices after it.  Never contains self-loops.
pub fn dag<V: Vertex>(vertices: &[V]) -> DiGraph<V> {
    let mut g = DiGraph::new();
    for v in vertices {
        g.add_vertex(v.clone());
    }
    for (i, v) in vertices.iter().enumerate() {
        for w in &vertices[i + 1..] {
            if v != w {
                g.insert_edge(v, w.clone());
            }
        }
    }
    g
}

fn check_size(n: i64) -> Result<()> {
    if n < 0 {
        return Err(Error::InvalidArgument(format!("found negative size: {}", n)));
    }
    Ok(())
}

/// `1 -> 2 -> ... -> n`.  Empty for `n == 0`.
pub fn list_graph(n: i64) -> Result<DiGraph<i64>> {
    check_size(n)?;
    let mut g = DiGraph::new();
    for i in 1..=n {
        g.add_vertex(i);
    }
    for i in 1..n {
        g.insert_edge(&i, i + 1);
    }
    Ok(g)
}

/// Vertex 1 in the center linking to each of `2..=n`.  For `n = 4`:
///
/// ```text
///         3
///         ^
///         |
///    2 <- 1 -> 4
/// ```
///
/// Empty for `n == 0`.
pub fn star_graph(n: i64) -> Result<DiGraph<i64>> {
    check_size(n)?;
    let mut g = DiGraph::new();
    for i in 1..=n {
        g.add_vertex(i);
    }
    for i in 2..=n {
        g.insert_edge(&1, i);
    }
    Ok(g)
}
