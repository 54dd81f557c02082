//! [proptest](https://docs.rs/proptest) support: random graphs that shrink
//! towards fewer edges.
//!
//! Vertices are `0..vertex_count`.  Edges are drawn independently with a
//! fixed probability and kept as bits of a row-major `vertex_count x
//! vertex_count` adjacency matrix, so self-loops are generated too.

use std::ops::Range;

use proptest::prelude::*;
use proptest::strategy::{NewTree, ValueTree};
use proptest::test_runner::{Reason, TestRunner};
use rand::distributions::Uniform;
use rand::prelude::Distribution;
use roaring::RoaringBitmap;

use crate::DiGraph;

#[inline]
fn adjacency_matrix_capacity(vertex_count: u16) -> u32 {
    u32::from(vertex_count) * u32::from(vertex_count)
}

#[inline]
fn row_column_from_index(index: u32, vertex_count: u16) -> (u16, u16) {
    let size = u32::from(vertex_count);
    // Both fit: index < size * size.
    ((index / size) as u16, (index % size) as u16)
}

/// Random graphs with a vertex count drawn uniformly from `vertex_count`.
pub fn arb_digraph(vertex_count: impl Into<Range<u16>>) -> DiGraphStrategy {
    DiGraphStrategy {
        vertex_count: vertex_count.into(),
        edge_probability: 0.3,
    }
}

#[derive(Clone, Debug)]
pub struct DiGraphStrategy {
    vertex_count: Range<u16>,
    edge_probability: f64,
}

impl DiGraphStrategy {
    /// Probability of each possible edge being present.  Defaults to 0.3.
    pub fn with_edge_probability(self, edge_probability: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&edge_probability),
            "edge probability needs to be between 0 and 1, got {}",
            edge_probability
        );
        Self {
            edge_probability,
            ..self
        }
    }
}

impl Strategy for DiGraphStrategy {
    type Tree = DiGraphValueTree;

    type Value = DiGraph<u16>;

    fn new_tree(&self, runner: &mut TestRunner) -> NewTree<Self> {
        if self.vertex_count.is_empty() {
            panic!(
                "Invalid use of empty size range. (hint: did you \
                 accidentally write {}..{} where you meant {}..={} \
                 somewhere?)",
                self.vertex_count.start,
                self.vertex_count.end,
                self.vertex_count.start,
                self.vertex_count.end
            );
        }
        let vertex_count =
            Uniform::new(self.vertex_count.start, self.vertex_count.end).sample(runner.rng());
        let capacity = adjacency_matrix_capacity(vertex_count);
        let edge_probability = self.edge_probability;
        let iter = (0..capacity).filter(|_| runner.rng().gen_bool(edge_probability));
        let edges =
            RoaringBitmap::from_sorted_iter(iter).map_err(|e| Reason::from(e.to_string()))?;

        Ok(DiGraphValueTree::new(vertex_count, edges))
    }
}

/// Shrinks by dropping edges one at a time in matrix order.  An edge whose
/// removal makes the failure go away is put back and skipped from then on.
#[derive(Clone, Debug)]
pub struct DiGraphValueTree {
    vertex_count: u16,
    edges: RoaringBitmap,
    next_candidate: u32,
    last_removed: Option<u32>,
}

impl DiGraphValueTree {
    pub fn new(vertex_count: u16, edges: RoaringBitmap) -> Self {
        Self {
            vertex_count,
            edges,
            next_candidate: 0,
            last_removed: None,
        }
    }
}

impl ValueTree for DiGraphValueTree {
    type Value = DiGraph<u16>;

    fn current(&self) -> Self::Value {
        let mut g = DiGraph::new();
        for vertex in 0..self.vertex_count {
            g.add_vertex(vertex);
        }
        for index in self.edges.iter() {
            let (source, target) = row_column_from_index(index, self.vertex_count);
            g.insert_edge(&source, target);
        }
        g
    }

    fn simplify(&mut self) -> bool {
        let candidate = self.edges.iter().find(|index| *index >= self.next_candidate);
        match candidate {
            Some(index) => {
                self.edges.remove(index);
                self.last_removed = Some(index);
                self.next_candidate = index + 1;
                true
            }
            None => {
                self.last_removed = None;
                false
            }
        }
    }

    fn complicate(&mut self) -> bool {
        match self.last_removed.take() {
            Some(index) => {
                self.edges.insert(index);
                true
            }
            None => false,
        }
    }
}
