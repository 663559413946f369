//! Node ids and undirected edges produced by the generator.

use std::fmt;

/// Point / node identifier: index into the sampled radius and angle arrays.
pub type Node = u32;

/// An undirected edge between two sampled points.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Edge(pub Node, pub Node);

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl fmt::Debug for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
