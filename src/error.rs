use std::fmt::Debug;

use thiserror::Error;

/// Everything that can go wrong when querying, mutating or traversing a
/// [`crate::DiGraph`].
///
/// Adding a vertex or an edge that is already present is *not* an error, it
/// is silently ignored.  Only references to vertices the graph doesn't know
/// about, traversals of empty graphs and bad factory arguments fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A vertex was referenced that is not registered in the graph.  Holds
    /// the `Debug` rendering of the vertex.
    #[error("couldn't find vertex {0}")]
    NotFound(String),

    /// A traversal was requested on a graph without vertices.
    #[error("cannot perform {0} on an empty graph")]
    EmptyGraph(&'static str),

    /// A graph factory was called with an argument it can't build from.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    pub(crate) fn not_found<V: Debug>(vertex: &V) -> Self {
        Error::NotFound(format!("{:?}", vertex))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_culprit() {
        assert_eq!(Error::not_found(&"a").to_string(), "couldn't find vertex \"a\"");
        assert_eq!(
            Error::EmptyGraph("DFS").to_string(),
            "cannot perform DFS on an empty graph"
        );
        assert_eq!(
            Error::InvalidArgument("found negative size: -1".into()).to_string(),
            "invalid argument: found negative size: -1"
        );
    }
}
