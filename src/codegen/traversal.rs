use crate::graph::{Graph, Node};
use ahash::{AHashMap, AHashSet};
use tracing::debug;

/// One step of a traversal: the node, where it was discovered from, and the
/// position of the discovering edge among the parent's outgoing edges.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'g> {
    pub node: &'g Node,
    pub parent: Option<&'g str>,
    pub rank: usize,
}

/// The ordered node sequence produced by [`traverse`].
#[derive(Debug, Clone)]
pub struct Traversal<'g> {
    visits: Vec<Visit<'g>>,
    rooted: bool,
}

impl<'g> Traversal<'g> {
    pub fn visits(&self) -> &[Visit<'g>] {
        &self.visits
    }

    pub fn nodes(&self) -> impl Iterator<Item = &'g Node> + '_ {
        self.visits.iter().map(|v| v.node)
    }

    pub fn ids(&self) -> Vec<&'g str> {
        self.visits.iter().map(|v| v.node.id.as_str()).collect()
    }

    /// False when the graph had no start node and the sequence is just the
    /// node collection in insertion order.
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }
}

/// Depth-first pre-order walk from the start node.
///
/// Outgoing edges are followed in insertion order and every node is visited
/// at most once, so cycles terminate. Nodes unreachable from the start node
/// are left out. Without a start node the nodes come back in insertion order.
pub fn traverse(graph: &Graph) -> Traversal<'_> {
    let Some(start) = graph.start_node() else {
        debug!(nodes = graph.nodes().len(), "no start node, using insertion order");
        return Traversal {
            visits: graph
                .nodes()
                .iter()
                .map(|node| Visit {
                    node,
                    parent: None,
                    rank: 0,
                })
                .collect(),
            rooted: false,
        };
    };

    let by_id: AHashMap<&str, &Node> = graph.nodes().iter().map(|n| (n.id.as_str(), n)).collect();
    let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in graph.edges() {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut visits = Vec::new();
    let mut stack: Vec<(&str, Option<&str>, usize)> = vec![(start.id.as_str(), None, 0)];

    while let Some((id, parent, rank)) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Some(node) = by_id.get(id).copied() else {
            continue;
        };
        visits.push(Visit { node, parent, rank });

        if let Some(targets) = adjacency.get(id) {
            // Reversed so the first edge is popped first.
            for (rank, target) in targets.iter().enumerate().rev() {
                if !visited.contains(target) {
                    stack.push((*target, Some(id), rank));
                }
            }
        }
    }

    debug!(
        visited = visits.len(),
        total = graph.nodes().len(),
        "traversed graph from start node"
    );
    Traversal {
        visits,
        rooted: true,
    }
}
