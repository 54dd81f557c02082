//! Per-vertex bookkeeping produced by a traversal.
//!
//! A [`Visit`] maps every vertex a traversal touched to a [`VertexLog`] and
//! owns the logical clock used to timestamp discovery and finish events.
//! Timestamps start at 1 and are strictly increasing across the whole
//! `Visit`, whichever vertex or traversal step assigns them.

use std::cmp::Ordering;
use std::fmt;

use indexmap::IndexMap;

use crate::Vertex;

/// The visit log of a single vertex.
///
/// `None` stands for "not yet": an undiscovered vertex has no discovery
/// time, an unfinished one no finish time, an unreached one no distance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VertexLog<V> {
    vertex: V,
    discovery_time: Option<usize>,
    finish_time: Option<usize>,
    parent: Option<V>,
    distance: Option<usize>,
}

impl<V> VertexLog<V> {
    fn new(vertex: V) -> Self {
        Self {
            vertex,
            discovery_time: None,
            finish_time: None,
            parent: None,
            distance: None,
        }
    }

    pub fn vertex(&self) -> &V {
        &self.vertex
    }

    pub fn discovery_time(&self) -> Option<usize> {
        self.discovery_time
    }

    pub fn finish_time(&self) -> Option<usize> {
        self.finish_time
    }

    /// The vertex this one was discovered from.  Resolve it to a log with
    /// [`Visit::parent_log`].
    pub fn parent(&self) -> Option<&V> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Option<V>) {
        self.parent = parent;
    }

    /// Only filled in by distance queries.
    pub fn distance(&self) -> Option<usize> {
        self.distance
    }

    pub fn set_distance(&mut self, distance: Option<usize>) {
        self.distance = distance;
    }

    pub fn is_discovered(&self) -> bool {
        self.discovery_time.is_some()
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }
}

/// The field logs are sorted by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogOrder {
    #[default]
    Discovery,
    Finish,
    Distance,
}

impl LogOrder {
    fn key<V>(self, log: &VertexLog<V>) -> Option<usize> {
        match self {
            LogOrder::Discovery => log.discovery_time,
            LogOrder::Finish => log.finish_time,
            LogOrder::Distance => log.distance,
        }
    }
}

/// Which logs [`Visit::logs_with`] returns, and in what order.
///
/// The default returns discovered logs only, in ascending discovery order.
/// Logs lacking the sort field sort first.
///
/// ```
/// use visit_graphs::{LogOrder, LogQuery};
///
/// let query = LogQuery::by(LogOrder::Finish).descending().all();
/// assert!(query.descending && query.include_undiscovered);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub order: LogOrder,
    pub descending: bool,
    pub include_undiscovered: bool,
}

impl LogQuery {
    pub fn by(order: LogOrder) -> Self {
        Self {
            order,
            ..Default::default()
        }
    }

    pub fn descending(self) -> Self {
        Self {
            descending: true,
            ..self
        }
    }

    /// Also return logs of vertices that were touched but never discovered.
    pub fn all(self) -> Self {
        Self {
            include_undiscovered: true,
            ..self
        }
    }
}

/// The result of a traversal: a log for each vertex it touched.
///
/// A `Visit` can be handed to several traversals in a row (see
/// [`crate::DiGraph::dfs_with`]); the clock keeps running across them.
#[derive(Clone, PartialEq, Eq)]
pub struct Visit<V: Vertex> {
    logs: IndexMap<V, VertexLog<V>>,
    last_time: usize,
}

impl<V: Vertex> Default for Visit<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> Visit<V> {
    pub fn new() -> Self {
        Self {
            logs: IndexMap::new(),
            last_time: 0,
        }
    }

    /// Returns the log of `vertex`, creating a blank one if there is none yet.
    pub fn log(&mut self, vertex: V) -> &mut VertexLog<V> {
        self.logs
            .entry(vertex)
            .or_insert_with_key(|vertex| VertexLog::new(vertex.clone()))
    }

    /// Returns the log of `vertex` without creating it.
    pub fn get(&self, vertex: &V) -> Option<&VertexLog<V>> {
        self.logs.get(vertex)
    }

    /// The log of the vertex `vertex` was discovered from.
    pub fn parent_log(&self, vertex: &V) -> Option<&VertexLog<V>> {
        let parent = self.get(vertex)?.parent()?;
        self.get(parent)
    }

    pub fn is_discovered(&self, vertex: &V) -> bool {
        self.logs.get(vertex).is_some_and(VertexLog::is_discovered)
    }

    /// The greatest discovery or finish time handed out so far, 0 if none.
    pub fn last_time(&self) -> usize {
        self.last_time
    }

    fn tick(&mut self) -> usize {
        self.last_time += 1;
        self.last_time
    }

    /// Stamps `vertex` as discovered at `last_time() + 1` and returns the
    /// new time.
    pub fn discover(&mut self, vertex: V) -> usize {
        let time = self.tick();
        tracing::trace!(?vertex, time, "discovered");
        self.log(vertex).discovery_time = Some(time);
        time
    }

    /// Stamps `vertex` as finished at `last_time() + 1` and returns the new
    /// time.
    pub fn finish(&mut self, vertex: V) -> usize {
        let time = self.tick();
        tracing::trace!(?vertex, time, "finished");
        self.log(vertex).finish_time = Some(time);
        time
    }

    /// Number of logs, discovered or not.
    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    /// Discovered logs in discovery order.
    pub fn logs(&self) -> Vec<&VertexLog<V>> {
        self.logs_with(LogQuery::default())
    }

    pub fn logs_with(&self, query: LogQuery) -> Vec<&VertexLog<V>> {
        self.logs_by_key(query.include_undiscovered, query.descending, |log| {
            query.order.key(log)
        })
    }

    /// Like [`Self::logs_with`] with a caller supplied sort key.  Logs with
    /// equal keys keep the order in which they were created.
    pub fn logs_by_key<K, F>(
        &self,
        include_undiscovered: bool,
        descending: bool,
        mut key: F,
    ) -> Vec<&VertexLog<V>>
    where
        K: Ord,
        F: FnMut(&VertexLog<V>) -> K,
    {
        let mut logs: Vec<&VertexLog<V>> = self
            .logs
            .values()
            .filter(|log| include_undiscovered || log.is_discovered())
            .collect();
        logs.sort_by(|left, right| {
            let ordering: Ordering = key(*left).cmp(&key(*right));
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        logs
    }

    /// Discovered vertices in discovery order.
    pub fn vertices(&self) -> Vec<V> {
        self.vertices_with(LogQuery::default())
    }

    pub fn vertices_with(&self, query: LogQuery) -> Vec<V> {
        self.logs_with(query)
            .into_iter()
            .map(|log| log.vertex.clone())
            .collect()
    }

    /// Follows parent links from `vertex` back to the root of its traversal
    /// tree and returns the vertices from the root down to `vertex`.
    ///
    /// Returns `None` if `vertex` was never discovered.
    pub fn path_to(&self, vertex: &V) -> Option<Vec<V>> {
        if !self.is_discovered(vertex) {
            return None;
        }
        let mut path = vec![vertex.clone()];
        let mut current = self.get(vertex)?;
        while let Some(parent) = current.parent() {
            // Parent links form a tree, more steps than logs means a cycle
            // was written in by hand.
            if path.len() > self.logs.len() {
                return None;
            }
            path.push(parent.clone());
            current = self.get(parent)?;
        }
        path.reverse();
        Some(path)
    }
}

impl<V: Vertex> fmt::Debug for Visit<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visit")
            .field("last_time", &self.last_time)
            .field("logs", &self.logs_with(LogQuery::default().all()))
            .finish()
    }
}

impl<V: Vertex> fmt::Display for Visit<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Visit:")?;
        for log in self.logs() {
            write!(f, "\n    {:?}", log)?;
        }
        Ok(())
    }
}
