use super::canvas::Graph;
use super::definition::{Edge, Node};
use crate::error::GraphConversionError;
use serde::{Deserialize, Serialize};

/// A trait for custom data models that can be converted into a rigboard `Graph`.
///
/// Implement it for whatever your canvas front-end saves, and the code
/// generator can consume it without knowing the format.
///
/// # Example
///
/// ```rust
/// use rigboard::error::GraphConversionError;
/// use rigboard::graph::{Edge, Graph, IntoGraph, Node, NodeKind};
///
/// struct Flowchart { steps: Vec<String> }
///
/// impl IntoGraph for Flowchart {
///     fn into_graph(self) -> Result<Graph, GraphConversionError> {
///         let mut graph = Graph::new();
///         graph.add_node(Node::new("start", NodeKind::Start))?;
///         let mut previous = "start".to_string();
///         for (i, step) in self.steps.into_iter().enumerate() {
///             let id = format!("step-{i}");
///             graph.add_node(Node::new(&id, NodeKind::Output).with_attribute("value", step))?;
///             graph.connect(Edge::new("", &previous, &id))?;
///             previous = id;
///         }
///         Ok(graph)
///     }
/// }
///
/// let graph = Flowchart { steps: vec!["1".into()] }.into_graph().unwrap();
/// assert_eq!(graph.nodes().len(), 2);
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a validated graph.
    fn into_graph(self) -> Result<Graph, GraphConversionError>;
}

/// The JSON document the canvas front-end exchanges with the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CanvasDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default, alias = "connections")]
    pub edges: Vec<Edge>,
}

impl CanvasDocument {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl IntoGraph for CanvasDocument {
    fn into_graph(self) -> Result<Graph, GraphConversionError> {
        let mut graph = Graph::new();
        for node in self.nodes {
            graph.add_node(node)?;
        }
        for edge in self.edges {
            graph.connect(edge)?;
        }
        Ok(graph)
    }
}

impl IntoGraph for Graph {
    fn into_graph(self) -> Result<Graph, GraphConversionError> {
        Ok(self)
    }
}

impl From<&Graph> for CanvasDocument {
    fn from(graph: &Graph) -> Self {
        Self {
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
        }
    }
}
