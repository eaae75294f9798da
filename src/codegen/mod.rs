use crate::error::CodegenError;
use crate::graph::Graph;
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

mod emitter;
pub mod templates;
pub mod traversal;

use emitter::Emitter;
pub use templates::LanguageTemplate;
use templates::{create_template_by_name, register_default_templates};
pub use traversal::{Traversal, Visit, traverse};

/// How the emitter decides the indentation of each line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentStrategy {
    /// Nesting follows the traversal tree and blocks are closed explicitly.
    #[default]
    Structured,
    /// Indent after block openers, dedent when the next node is not a direct
    /// successor. Kept for canvases saved against the old behaviour.
    Successor,
}

impl FromStr for IndentStrategy {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "structured" => Ok(IndentStrategy::Structured),
            "successor" => Ok(IndentStrategy::Successor),
            _ => Err(CodegenError::UnknownIndentStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for IndentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndentStrategy::Structured => f.write_str("structured"),
            IndentStrategy::Successor => f.write_str("successor"),
        }
    }
}

/// Output of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedCode {
    pub language: String,
    pub file_extension: String,
    pub code: String,
    /// Node ids in the order they were emitted. Matches the traversal except
    /// where a node joining two condition branches is moved after the block.
    pub order: Vec<String>,
    /// False when the graph had no start node.
    pub rooted: bool,
}

pub struct CodeGenerator {
    registry: AHashMap<String, Box<dyn LanguageTemplate>>,
    strategy: IndentStrategy,
}

pub struct CodeGeneratorBuilder {
    registry: AHashMap<String, Box<dyn LanguageTemplate>>,
    strategy: IndentStrategy,
}

impl CodeGeneratorBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn LanguageTemplate>> = AHashMap::new();
        register_default_templates(&mut registry);
        Self {
            registry,
            strategy: IndentStrategy::default(),
        }
    }

    /// Makes a built-in language available under another name, e.g. `"py"`.
    pub fn with_language_alias(mut self, alias: &str, language: &str) -> Self {
        if let Some(template) = create_template_by_name(language) {
            self.registry.insert(alias.to_ascii_lowercase(), template);
        }
        self
    }

    pub fn with_custom_template(mut self, template: Box<dyn LanguageTemplate>) -> Self {
        self.registry
            .insert(template.language().to_ascii_lowercase(), template);
        self
    }

    pub fn with_indent_strategy(mut self, strategy: IndentStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn build(self) -> CodeGenerator {
        CodeGenerator {
            registry: self.registry,
            strategy: self.strategy,
        }
    }
}

impl Default for CodeGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        CodeGeneratorBuilder::new().build()
    }
}

impl CodeGenerator {
    pub fn builder() -> CodeGeneratorBuilder {
        CodeGeneratorBuilder::new()
    }

    pub fn strategy(&self) -> IndentStrategy {
        self.strategy
    }

    /// Registered language identifiers, sorted.
    pub fn languages(&self) -> Vec<&str> {
        self.registry.keys().map(String::as_str).sorted().collect()
    }

    pub fn supports(&self, language: &str) -> bool {
        self.registry.contains_key(&language.to_ascii_lowercase())
    }

    /// Generates code using the generator's configured indentation strategy.
    pub fn generate(&self, graph: &Graph, language: &str) -> Result<GeneratedCode, CodegenError> {
        self.generate_with(graph, language, self.strategy)
    }

    pub fn generate_with(
        &self,
        graph: &Graph,
        language: &str,
        strategy: IndentStrategy,
    ) -> Result<GeneratedCode, CodegenError> {
        let template = self
            .registry
            .get(&language.to_ascii_lowercase())
            .ok_or_else(|| CodegenError::UnknownLanguage(language.to_string()))?;

        let traversal = traverse(graph);
        let (code, order) = Emitter::new(template.as_ref(), strategy, graph).emit(&traversal);
        debug!(
            language = template.language(),
            %strategy,
            nodes = traversal.len(),
            bytes = code.len(),
            "generated code"
        );

        Ok(GeneratedCode {
            language: template.language().to_string(),
            file_extension: template.file_extension().to_string(),
            code,
            order,
            rooted: traversal.is_rooted(),
        })
    }
}
