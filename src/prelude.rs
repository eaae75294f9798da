//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the rigboard crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use rigboard::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/canvas.json")?;
//! let graph = CanvasDocument::from_json(&json)?.into_graph()?;
//!
//! let generator = CodeGenerator::builder()
//!     .with_indent_strategy(IndentStrategy::Structured)
//!     .build();
//! let generated = generator.generate(&graph, "javascript")?;
//! println!("{}", generated.code);
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{CanvasDocument, Edge, Graph, IntoGraph, Node, NodeKind, Position};

// Code generation
pub use crate::codegen::{
    CodeGenerator, GeneratedCode, IndentStrategy, LanguageTemplate, Traversal, traverse,
};

// Storage and storefront
pub use crate::shop::{Cart, Shop};
pub use crate::store::CanvasStore;

// Error types
pub use crate::error::{CodegenError, GraphConversionError, GraphError, ShopError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
