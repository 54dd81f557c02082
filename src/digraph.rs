//! Directed graphs stored as adjacency lists keyed by arbitrary vertex values.
//!
//! Vertices can be of any type implementing [`crate::Vertex`].  To keep the
//! data model simple, a vertex *is* its label: there are no separate handles
//! or indices, identity is plain equality.
//!
//! There are a couple of rules worth knowing up front:
//!
//! 1. Adding a vertex or an edge that is already present does nothing.
//! 1. Referencing a vertex that isn't registered fails with
//!    [`Error::NotFound`], so both endpoints of an edge must be added first.
//! 1. Vertices and each adjacency list keep insertion order, so traversals
//!    are repeatable, but [`PartialEq`] compares neighbours as *sets*:
//!    `a -> [b, c]` equals `a -> [c, b]`.
//! 1. Self-loops are allowed.
//!
//! ## Anti-features
//!
//! * No parallel edges.
//! * No weights on either edges or vertices.
//! * No serde impls.  [`DiGraph::iter_edges`] gives you everything needed to
//!   store a graph with a library of your choosing.
//!
//! # Entry points
//!
//! See either [`DiGraph::new`], [`DiGraph::from_adjacency`], or
//! [`DiGraph::from_edges_iter`].  Ready-made shapes live in [`crate::factory`].

use std::collections::HashSet;
use std::fmt::{self, Display};
use std::io::Write;

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::Vertex;

/// A mutable, single-threaded directed graph.
#[derive(Clone)]
pub struct DiGraph<V: Vertex> {
    adjacency: IndexMap<V, Vec<V>>,
}

impl<V: Vertex> Default for DiGraph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> fmt::Debug for DiGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<(&V, &Vec<V>)> = self.adjacency.iter().collect();
        write!(f, "DiGraph::from_adjacency(vec!{:?})", entries)
    }
}

impl<V: Vertex> PartialEq for DiGraph<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.adjacency.len() != other.adjacency.len() {
            return false;
        }
        self.adjacency.iter().all(|(vertex, targets)| {
            let Some(other_targets) = other.adjacency.get(vertex) else {
                return false;
            };
            let targets: HashSet<&V> = targets.iter().collect();
            let other_targets: HashSet<&V> = other_targets.iter().collect();
            targets == other_targets
        })
    }
}

impl<V: Vertex> Eq for DiGraph<V> {}

impl<V: Vertex> DiGraph<V> {
    /// Constructs a graph without any vertices.
    pub fn new() -> Self {
        Self {
            adjacency: IndexMap::new(),
        }
    }

    /// Shorthand construction from `(source, targets)` pairs.
    ///
    /// Every source and every target gets registered as a vertex, then the
    /// edges are added in iteration order.  Duplicates are ignored.
    ///
    /// ```
    /// use visit_graphs::DiGraph;
    ///
    /// let g = DiGraph::from_adjacency(vec![('a', vec!['b', 'c']), ('b', vec!['b'])]);
    /// assert!(g.has_edge(&'a', &'c').unwrap());
    /// assert!(g.has_vertex(&'c'));
    /// ```
    pub fn from_adjacency<I, T>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (V, T)>,
        T: IntoIterator<Item = V>,
    {
        let mut graph = Self::new();
        for (source, targets) in adjacency {
            graph.add_vertex(source.clone());
            for target in targets {
                graph.add_vertex(target.clone());
                graph.insert_edge(&source, target);
            }
        }
        graph
    }

    /// Constructs a graph from an iterator of edges, registering both
    /// endpoints of every edge.
    pub fn from_edges_iter<I: IntoIterator<Item = (V, V)>>(edges: I) -> Self {
        let mut graph = Self::new();
        for (source, target) in edges {
            graph.add_vertex(source.clone());
            graph.add_vertex(target.clone());
            graph.insert_edge(&source, target);
        }
        graph
    }

    /// Registers `vertex`.  Does nothing if it already exists.
    pub fn add_vertex(&mut self, vertex: V) {
        self.adjacency.entry(vertex).or_default();
    }

    pub fn has_vertex(&self, vertex: &V) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Returns the set of vertices of the graph.
    pub fn vertices(&self) -> HashSet<V> {
        self.adjacency.keys().cloned().collect()
    }

    /// Iterates over the vertices in insertion order.
    pub fn iter_vertices(&self) -> impl Iterator<Item = &V> + '_ {
        self.adjacency.keys()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Removes `vertex` together with every edge pointing at it, and returns
    /// its former adjacency list.
    ///
    /// Incoming edges are stripped first, so a self-loop on `vertex` is not
    /// part of the returned list.
    pub fn remove_vertex(&mut self, vertex: &V) -> Result<Vec<V>> {
        let mut removed = self
            .adjacency
            .shift_remove(vertex)
            .ok_or_else(|| Error::not_found(vertex))?;
        removed.retain(|target| target != vertex);
        for targets in self.adjacency.values_mut() {
            targets.retain(|target| target != vertex);
        }
        tracing::debug!(?vertex, "removed vertex");
        Ok(removed)
    }

    /// Adds an edge from `source` to `target`.
    ///
    /// Both vertices must already be registered.  If the edge exists already,
    /// exits silently.
    pub fn add_edge(&mut self, source: V, target: V) -> Result<()> {
        if !self.has_vertex(&source) {
            return Err(Error::not_found(&source));
        }
        if !self.has_vertex(&target) {
            return Err(Error::not_found(&target));
        }
        if !self.insert_edge(&source, target) {
            cov_mark::hit!(duplicate_edge_ignored);
        }
        Ok(())
    }

    /// Appends `target` to the adjacency list of `source` unless it's
    /// already there.  Returns whether the edge was new.
    ///
    /// Requires `source` to be registered; a missing `source` is a no-op.
    pub(crate) fn insert_edge(&mut self, source: &V, target: V) -> bool {
        match self.adjacency.get_mut(source) {
            Some(targets) if !targets.contains(&target) => {
                targets.push(target);
                true
            }
            _ => false,
        }
    }

    pub fn has_edge(&self, source: &V, target: &V) -> Result<bool> {
        let targets = self.neighbours(source)?;
        if !self.has_vertex(target) {
            return Err(Error::not_found(target));
        }
        Ok(targets.contains(target))
    }

    /// Returns the vertices adjacent to `vertex`, in insertion order.
    ///
    /// The list is a fresh copy: modifying it has no effect on the graph.
    pub fn adj(&self, vertex: &V) -> Result<Vec<V>> {
        Ok(self.neighbours(vertex)?.to_vec())
    }

    /// Borrowing version of [`Self::adj`].
    pub fn neighbours(&self, vertex: &V) -> Result<&[V]> {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::not_found(vertex))
    }

    /// Iterates over all edges `(source, target)` in insertion order.
    pub fn iter_edges(&self) -> impl Iterator<Item = (&V, &V)> + '_ {
        self.adjacency
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |target| (source, target)))
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Reverses the direction of all the edges, in place.
    ///
    /// The new edges are computed from the old adjacency lists as a whole,
    /// never from the half-reversed graph.  Vertex order is kept and the
    /// new adjacency lists follow the order of the old sources.
    pub fn reverse(&mut self) {
        let old_adjacency = std::mem::take(&mut self.adjacency);
        for vertex in old_adjacency.keys() {
            self.add_vertex(vertex.clone());
        }
        for (source, targets) in old_adjacency {
            for target in targets {
                self.insert_edge(&target, source.clone());
            }
        }
        tracing::debug!(edges = self.edge_count(), "reversed graph");
    }

    /// Returns `true` if some vertex links to itself.
    pub fn has_self_loops(&self) -> bool {
        self.adjacency
            .iter()
            .any(|(vertex, targets)| targets.contains(vertex))
    }

    /// Removes all the self-loop edges.  Vertices stay.
    pub fn remove_self_loops(&mut self) {
        for (vertex, targets) in self.adjacency.iter_mut() {
            targets.retain(|target| target != vertex);
        }
        tracing::debug!("removed self loops");
    }

    /// A graph is empty when it has no vertices, and hence no edges.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}

impl<V: Vertex + Ord + Display> DiGraph<V> {
    fn sorted_adjacency(&self) -> Vec<(&V, &Vec<V>)> {
        let mut entries: Vec<(&V, &Vec<V>)> = self.adjacency.iter().collect();
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));
        entries
    }

    /// Outputs the graph in the [Graphviz DOT](https://graphviz.org/) format.
    pub fn to_dot<W: Write>(&self, output: &mut W) -> std::result::Result<(), std::io::Error> {
        writeln!(output, "digraph {{")?;

        let entries = self.sorted_adjacency();
        for (vertex, _) in &entries {
            writeln!(output, "\t{:?};", vertex.to_string())?;
        }

        writeln!(output)?;

        for (source, targets) in &entries {
            for target in targets.iter() {
                writeln!(output, "\t{:?} -> {:?};", source.to_string(), target.to_string())?;
            }
        }

        writeln!(output, "}}")?;
        Ok(())
    }
}

/// One line per vertex in sorted order, labels padded to the same width:
///
/// ```text
/// a: [b, c]
/// b: [b]
/// c: []
/// ```
impl<V: Vertex + Ord + Display> Display for DiGraph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "DiGraph()");
        }

        let labels: Vec<String> = self.adjacency.keys().map(ToString::to_string).collect();
        let width = labels.iter().map(|label| label.chars().count()).max().unwrap_or(0);

        for (index, (source, targets)) in self.sorted_adjacency().into_iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            let targets: Vec<String> = targets.iter().map(ToString::to_string).collect();
            write!(f, "{:<width$}: [{}]", source.to_string(), targets.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::arb_digraph;

    #[test]
    fn duplicate_edge_is_stored_once() {
        let mut g = DiGraph::new();
        g.add_vertex('a');
        g.add_vertex('b');
        g.add_edge('a', 'b').unwrap();
        {
            cov_mark::check!(duplicate_edge_ignored);
            g.add_edge('a', 'b').unwrap();
        }
        assert_eq!(g.adj(&'a').unwrap(), vec!['b']);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn duplicate_vertex_keeps_edges() {
        let mut g = DiGraph::from_adjacency(vec![(1, vec![2])]);
        g.add_vertex(1);
        assert_eq!(g.adj(&1).unwrap(), vec![2]);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn missing_endpoints_are_reported() {
        let mut g = DiGraph::new();
        g.add_vertex("a");
        assert_eq!(g.add_edge("a", "z"), Err(Error::NotFound("\"z\"".into())));
        assert_eq!(g.add_edge("z", "a"), Err(Error::NotFound("\"z\"".into())));
        assert!(matches!(g.has_edge(&"a", &"z"), Err(Error::NotFound(_))));
        assert!(matches!(g.has_edge(&"z", &"a"), Err(Error::NotFound(_))));
        assert!(matches!(g.adj(&"z"), Err(Error::NotFound(_))));
        assert!(matches!(g.remove_vertex(&"z"), Err(Error::NotFound(_))));
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn adj_returns_a_copy() {
        let g = DiGraph::from_adjacency(vec![('a', vec!['b', 'c'])]);
        let mut neighbours = g.adj(&'a').unwrap();
        neighbours.push('a');
        neighbours.clear();
        assert_eq!(g.adj(&'a').unwrap(), vec!['b', 'c']);
    }

    #[test]
    fn remove_vertex_strips_incoming_edges() {
        let mut g = DiGraph::from_adjacency(vec![
            ('a', vec!['b', 'c']),
            ('b', vec!['c', 'a']),
            ('c', vec!['c']),
        ]);
        assert_eq!(g.remove_vertex(&'c').unwrap(), Vec::<char>::new());
        assert!(!g.has_vertex(&'c'));
        assert_eq!(g.adj(&'a').unwrap(), vec!['b']);
        assert_eq!(g.adj(&'b').unwrap(), vec!['a']);

        assert_eq!(g.remove_vertex(&'b').unwrap(), vec!['a']);
        assert_eq!(g, DiGraph::from_adjacency(vec![('a', vec![])]));
    }

    #[test]
    fn equality_ignores_adjacency_order() {
        let left = DiGraph::from_adjacency(vec![('a', vec!['b', 'c'])]);
        let right = DiGraph::from_adjacency(vec![('a', vec!['c', 'b'])]);
        assert_eq!(left, right);

        let missing_edge = DiGraph::from_adjacency(vec![('a', vec!['c']), ('b', vec![])]);
        assert_ne!(left, missing_edge);

        let extra_vertex = DiGraph::from_adjacency(vec![('a', vec!['b', 'c']), ('d', vec![])]);
        assert_ne!(left, extra_vertex);

        let other_vertex = DiGraph::from_adjacency(vec![('a', vec!['b', 'd'])]);
        assert_ne!(left, other_vertex);
    }

    #[test]
    fn reverse_flips_every_edge_once() {
        let mut g = DiGraph::from_adjacency(vec![
            (1, vec![2, 3]),
            (2, vec![3, 1]),
            (3, vec![3]),
        ]);
        g.reverse();
        let expected = DiGraph::from_adjacency(vec![
            (1, vec![2]),
            (2, vec![1]),
            (3, vec![1, 2, 3]),
        ]);
        assert_eq!(g, expected);
        assert_eq!(g.edge_count(), 5);
    }

    #[test]
    fn reverse_orders_neighbours_by_old_sources() {
        let mut g = DiGraph::from_adjacency(vec![(1, vec![0]), (2, vec![0]), (3, vec![0])]);
        g.reverse();
        assert_eq!(g.adj(&0).unwrap(), vec![1, 2, 3]);
        assert_eq!(g.iter_vertices().copied().collect::<Vec<i32>>(), vec![1, 0, 2, 3]);
        assert_eq!(g.dfs(&0).unwrap().vertices(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn remove_vertex_keeps_vertex_order() {
        let mut g = DiGraph::from_adjacency(vec![('a', vec![]), ('b', vec![]), ('c', vec![])]);
        g.remove_vertex(&'b').unwrap();
        assert_eq!(g.iter_vertices().copied().collect::<Vec<char>>(), vec!['a', 'c']);
    }

    #[test]
    fn reverse_keeps_isolated_vertices() {
        let mut g = DiGraph::from_adjacency(vec![(1, vec![2]), (3, vec![])]);
        g.reverse();
        assert!(g.has_vertex(&3));
        assert!(g.has_edge(&2, &1).unwrap());
        assert!(!g.has_edge(&1, &2).unwrap());
    }

    #[test]
    fn self_loops() {
        let mut g = DiGraph::from_adjacency(vec![('a', vec!['a', 'b']), ('b', vec!['a', 'b'])]);
        assert!(g.has_self_loops());
        g.remove_self_loops();
        assert!(!g.has_self_loops());
        assert!(!g.has_edge(&'a', &'a').unwrap());
        assert!(g.has_vertex(&'a'));
        assert_eq!(g.adj(&'b').unwrap(), vec!['a']);
    }

    #[test]
    fn empty_graph() {
        let mut g: DiGraph<u32> = DiGraph::new();
        assert!(g.is_empty());
        g.add_vertex(7);
        assert!(!g.is_empty());
        g.remove_vertex(&7).unwrap();
        assert!(g.is_empty());
        assert_eq!(g, DiGraph::default());
    }

    #[test]
    fn display_pads_labels() {
        let g = DiGraph::from_adjacency(vec![
            ("b", vec!["b"]),
            ("a", vec!["b", "ccc"]),
            ("ccc", vec!["a"]),
        ]);
        assert_eq!(g.to_string(), "a  : [b, ccc]\nb  : [b]\nccc: [a]");
        assert_eq!(DiGraph::<u8>::new().to_string(), "DiGraph()");
    }

    #[test]
    fn dot_output() {
        let g = DiGraph::from_adjacency(vec![(2, vec![1]), (1, vec![2, 1])]);
        let mut output = Vec::new();
        g.to_dot(&mut output).unwrap();
        let expected = "digraph {\n\t\"1\";\n\t\"2\";\n\n\t\"1\" -> \"2\";\n\t\"1\" -> \"1\";\n\t\"2\" -> \"1\";\n}\n";
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    proptest! {
        #[test]
        fn reverse_is_an_involution(g in arb_digraph(0..12)) {
            let mut twice = g.clone();
            twice.reverse();
            twice.reverse();
            prop_assert_eq!(twice, g);
        }

        #[test]
        fn reverse_preserves_edge_count(g in arb_digraph(0..12)) {
            let mut reversed = g.clone();
            reversed.reverse();
            prop_assert_eq!(reversed.edge_count(), g.edge_count());
            for (source, target) in g.iter_edges() {
                prop_assert!(reversed.has_edge(target, source).unwrap());
            }
        }

        #[test]
        fn equality_is_insertion_order_independent(g in arb_digraph(0..12)) {
            let mut edges: Vec<(u16, u16)> = g.iter_edges().map(|(u, v)| (*u, *v)).collect();
            edges.reverse();
            let mut rebuilt = DiGraph::new();
            for vertex in g.iter_vertices() {
                rebuilt.add_vertex(*vertex);
            }
            for (source, target) in edges {
                rebuilt.add_edge(source, target).unwrap();
            }
            prop_assert_eq!(rebuilt, g);
        }

        #[test]
        fn add_edge_twice_keeps_one_copy(g in arb_digraph(1..12), source in 0u16..12, target in 0u16..12) {
            let mut g = g;
            let vertex_count = g.vertex_count() as u16;
            let (source, target) = (source % vertex_count, target % vertex_count);
            g.add_edge(source, target).unwrap();
            g.add_edge(source, target).unwrap();
            let count = g.adj(&source).unwrap().into_iter().filter(|v| *v == target).count();
            prop_assert_eq!(count, 1);
        }
    }
}
