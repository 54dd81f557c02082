use std::collections::{HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::visit::Visit;
use crate::{DiGraph, Vertex};

impl<V: Vertex> DiGraph<V> {
    /// Depth-first search from `source`.
    ///
    /// Every vertex reachable from `source` gets a discovery and a finish
    /// time, and every one except `source` a parent.  Timestamps nest like
    /// parentheses: a descendant is discovered after and finished before its
    /// ancestors.
    pub fn dfs(&self, source: &V) -> Result<Visit<V>> {
        let mut visit = Visit::new();
        self.dfs_with(source, &mut visit)?;
        Ok(visit)
    }

    /// Depth-first search from `source` continuing an existing `visit`.
    ///
    /// Neighbours already discovered in `visit` are not entered again and the
    /// clock carries on from [`Visit::last_time`], so calling this once per
    /// undiscovered vertex builds a DFS forest covering the whole graph.
    ///
    /// ```
    /// use visit_graphs::{DiGraph, Visit};
    ///
    /// let g = DiGraph::from_adjacency(vec![(1, vec![2]), (3, vec![])]);
    /// let mut visit = Visit::new();
    /// g.dfs_with(&1, &mut visit).unwrap();
    /// g.dfs_with(&3, &mut visit).unwrap();
    /// assert_eq!(visit.vertices(), vec![1, 2, 3]);
    /// assert_eq!(visit.last_time(), 6);
    /// ```
    pub fn dfs_with(&self, source: &V, visit: &mut Visit<V>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::EmptyGraph("DFS"));
        }
        tracing::debug!(?source, "starting depth-first search");

        // Explicit stack of (vertex, its remaining neighbours).  Timestamps
        // and parents come out exactly as with the recursive formulation.
        let mut to_visit = vec![(source, self.neighbours(source)?.iter())];
        visit.discover(source.clone());

        while let Some((vertex, neighbours)) = to_visit.last_mut() {
            let vertex: &V = *vertex;
            match neighbours.next() {
                Some(neighbour) => {
                    if visit.is_discovered(neighbour) {
                        cov_mark::hit!(dfs_skips_discovered_neighbour);
                        continue;
                    }
                    visit.log(neighbour.clone()).set_parent(Some(vertex.clone()));
                    visit.discover(neighbour.clone());
                    to_visit.push((neighbour, self.neighbours(neighbour)?.iter()));
                }
                None => {
                    visit.finish(vertex.clone());
                    to_visit.pop();
                }
            }
        }

        tracing::debug!(?source, last_time = visit.last_time(), "finished depth-first search");
        Ok(())
    }

    /// Breadth-first search from `source`.
    ///
    /// Only discovery times and parents are recorded, finish times stay
    /// unset.  The parent tree is a shortest-path tree: when a vertex can be
    /// reached from several vertices of the same layer, the first one to
    /// enqueue it becomes its parent.
    pub fn bfs(&self, source: &V) -> Result<Visit<V>> {
        if self.is_empty() {
            return Err(Error::EmptyGraph("BFS"));
        }
        self.breadth_first(source, false)
    }

    /// Returns, for every vertex of the graph, the minimal number of edges
    /// needed to go from `source` to it, or `None` if it is unreachable.
    ///
    /// `source` is at distance 0 from itself.
    ///
    /// ```
    /// let g = visit_graphs::list_graph(3).unwrap();
    /// let distances = g.distances(&2).unwrap();
    /// assert_eq!(distances[&1], None);
    /// assert_eq!(distances[&2], Some(0));
    /// assert_eq!(distances[&3], Some(1));
    /// ```
    pub fn distances(&self, source: &V) -> Result<HashMap<V, Option<usize>>> {
        let visit = self.breadth_first(source, true)?;

        let mut distances: HashMap<V, Option<usize>> = self
            .iter_vertices()
            .map(|vertex| (vertex.clone(), None))
            .collect();
        for log in visit.logs() {
            distances.insert(log.vertex().clone(), log.distance());
        }
        Ok(distances)
    }

    fn breadth_first(&self, source: &V, track_distance: bool) -> Result<Visit<V>> {
        if !self.has_vertex(source) {
            return Err(Error::not_found(source));
        }
        tracing::debug!(?source, track_distance, "starting breadth-first search");

        let mut visit = Visit::new();
        if track_distance {
            visit.log(source.clone()).set_distance(Some(0));
        }

        // A vertex may be enqueued several times before it is first dequeued,
        // only the first dequeue discovers it.
        let mut to_visit: VecDeque<&V> = VecDeque::from([source]);
        while let Some(vertex) = to_visit.pop_front() {
            if visit.is_discovered(vertex) {
                continue;
            }
            visit.discover(vertex.clone());
            let distance = visit.log(vertex.clone()).distance().map(|d| d + 1);

            for neighbour in self.neighbours(vertex)? {
                let discovered = visit.is_discovered(neighbour);
                let log = visit.log(neighbour.clone());
                if neighbour != source {
                    if log.parent().is_none() {
                        log.set_parent(Some(vertex.clone()));
                        if track_distance {
                            log.set_distance(distance);
                        }
                    } else if !discovered {
                        cov_mark::hit!(bfs_keeps_first_parent);
                    }
                }
                to_visit.push_back(neighbour);
            }
        }

        tracing::debug!(?source, discovered = visit.logs().len(), "finished breadth-first search");
        Ok(visit)
    }
}
