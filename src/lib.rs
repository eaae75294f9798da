//! # rigboard - Canvas Graph Code Generation
//!
//! **rigboard** is the backend of a visual-programming canvas. Users drop
//! flowchart-style code blocks (start, variable, input, output, operation,
//! condition, loop, function, end) onto a canvas and wire them together;
//! rigboard stores the canvas and turns the wiring into source code.
//!
//! The same server also hosts a small storefront demo (catalogue, session
//! cart, accounts and checkout) rendered as server-side HTML.
//!
//! ## Core Workflow
//!
//! 1.  **Build a Graph**: Add [`graph::Node`]s and [`graph::Edge`]s to a [`graph::Graph`], or
//!     convert your own format by implementing [`graph::IntoGraph`].
//! 2.  **Traverse**: [`codegen::traverse`] walks the graph depth-first from its start node.
//! 3.  **Generate**: A [`codegen::CodeGenerator`] renders the traversal through a
//!     per-language template table.
//!
//! ## Quick Start
//!
//! ```rust
//! use rigboard::prelude::*;
//!
//! let mut graph = Graph::new();
//! graph.add_node(Node::new("start", NodeKind::Start)).unwrap();
//! graph
//!     .add_node(
//!         Node::new("greet", NodeKind::Output).with_attribute("value", "\"hello\""),
//!     )
//!     .unwrap();
//! graph.connect(Edge::new("e1", "start", "greet")).unwrap();
//!
//! let generator = CodeGenerator::builder().build();
//! let generated = generator.generate(&graph, "python").unwrap();
//! assert_eq!(generated.code, "print(\"hello\")\n");
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod prelude;
pub mod server;
pub mod shop;
pub mod store;
