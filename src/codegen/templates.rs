use crate::graph::{Node, NodeKind};
use ahash::AHashMap;

/// Defines how each node kind is written out in one target language.
pub trait LanguageTemplate: Send + Sync {
    /// Identifier the generator is looked up by, e.g. `"python"`.
    fn language(&self) -> &str;
    fn file_extension(&self) -> &str;
    /// The line pattern for a kind; `None` means the kind emits nothing.
    /// `{key}` placeholders are filled from the node's attributes.
    fn pattern(&self, kind: NodeKind) -> Option<&str>;
    /// Line that closes a block, for languages that need one.
    fn block_close(&self) -> Option<&str>;
    /// Line that separates the two branches of a condition.
    fn else_line(&self) -> &str;

    /// Line written into a block that would otherwise be empty, for
    /// languages where an empty block does not parse.
    fn empty_body(&self) -> Option<&str> {
        None
    }

    fn indent_unit(&self) -> &str {
        "    "
    }

    /// Renders a node into a single line without indentation.
    fn render(&self, node: &Node) -> Option<String> {
        self.pattern(node.kind)
            .map(|pattern| fill_placeholders(pattern, node))
    }
}

/// Substitutes `{key}` placeholders. Values are inserted verbatim; missing
/// attributes fall back to a per-kind placeholder value.
pub fn fill_placeholders(pattern: &str, node: &Node) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_placeholder(&after[..close]) => {
                let key = &after[..close];
                let value = node
                    .attribute(key)
                    .unwrap_or_else(|| default_attribute(node.kind, key));
                out.push_str(value);
                rest = &after[close + 1..];
            }
            _ => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn is_placeholder(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Values used when a node is missing an attribute its pattern refers to.
pub fn default_attribute(kind: NodeKind, key: &str) -> &'static str {
    match (kind, key) {
        (NodeKind::Variable, "name") => "x",
        (NodeKind::Variable, "value") => "0",
        (NodeKind::Input, "name") => "value",
        (NodeKind::Input, "prompt") => "Enter a value",
        (NodeKind::Output, "value") => "x",
        (NodeKind::Operation, "left") => "a",
        (NodeKind::Operation, "operator") => "+",
        (NodeKind::Operation, "right") => "b",
        (NodeKind::Operation, "result") => "result",
        (NodeKind::Condition, "condition") => "x > 0",
        (NodeKind::Loop, "condition") => "i < 10",
        (NodeKind::Function, "name") => "my_function",
        _ => "",
    }
}

/// Defines the built-in language templates, their registration, and lookup by name.
macro_rules! define_language_templates {
    ( $( $struct_name:ident {
        language: $language:literal,
        extension: $extension:literal,
        block_close: $block_close:expr,
        else_line: $else_line:expr,
        $( empty_body: $empty_body:expr, )?
        patterns: { $( $kind:ident => $pattern:expr ),* $(,)? } $(,)?
    } ),* $(,)? ) => {
        $(
            pub struct $struct_name;
            impl LanguageTemplate for $struct_name {
                fn language(&self) -> &str { $language }
                fn file_extension(&self) -> &str { $extension }
                fn block_close(&self) -> Option<&str> { $block_close }
                fn else_line(&self) -> &str { $else_line }
                $( fn empty_body(&self) -> Option<&str> { $empty_body } )?
                fn pattern(&self, kind: NodeKind) -> Option<&str> {
                    match kind {
                        $( NodeKind::$kind => Some($pattern), )*
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*

        pub(super) fn register_default_templates(registry: &mut AHashMap<String, Box<dyn LanguageTemplate>>) {
            $( registry.insert($language.to_string(), Box::new($struct_name)); )*
        }

        pub(super) fn create_template_by_name(name: &str) -> Option<Box<dyn LanguageTemplate>> {
            match name {
                $( $language => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_language_templates! {
    PythonTemplate {
        language: "python",
        extension: "py",
        block_close: None,
        else_line: "else:",
        empty_body: Some("pass"),
        patterns: {
            Variable => "{name} = {value}",
            Input => "{name} = input(\"{prompt}\")",
            Output => "print({value})",
            Operation => "{result} = {left} {operator} {right}",
            Condition => "if {condition}:",
            Loop => "while {condition}:",
            Function => "def {name}({params}):",
            End => "# end of program",
        },
    },
    JavaScriptTemplate {
        language: "javascript",
        extension: "js",
        block_close: Some("}"),
        else_line: "} else {",
        patterns: {
            Variable => "let {name} = {value};",
            Input => "let {name} = prompt(\"{prompt}\");",
            Output => "console.log({value});",
            Operation => "{result} = {left} {operator} {right};",
            Condition => "if ({condition}) {",
            Loop => "while ({condition}) {",
            Function => "function {name}({params}) {",
            End => "// end of program",
        },
    },
    JavaTemplate {
        language: "java",
        extension: "java",
        block_close: Some("}"),
        else_line: "} else {",
        patterns: {
            Variable => "var {name} = {value};",
            Input => "System.out.print(\"{prompt}\"); String {name} = scanner.nextLine();",
            Output => "System.out.println({value});",
            Operation => "{result} = {left} {operator} {right};",
            Condition => "if ({condition}) {",
            Loop => "while ({condition}) {",
            Function => "static void {name}({params}) {",
            End => "// end of program",
        },
    },
    CppTemplate {
        language: "cpp",
        extension: "cpp",
        block_close: Some("}"),
        else_line: "} else {",
        patterns: {
            Variable => "auto {name} = {value};",
            Input => "std::string {name}; std::cout << \"{prompt}\"; std::cin >> {name};",
            Output => "std::cout << {value} << std::endl;",
            Operation => "{result} = {left} {operator} {right};",
            Condition => "if ({condition}) {",
            Loop => "while ({condition}) {",
            Function => "void {name}({params}) {",
            End => "// end of program",
        },
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_use_attributes_then_defaults() {
        let node = Node::new("v", NodeKind::Variable).with_attribute("name", "count");
        assert_eq!(PythonTemplate.render(&node).unwrap(), "count = 0");
    }

    #[test]
    fn values_are_inserted_verbatim() {
        let node = Node::new("o", NodeKind::Output).with_attribute("value", "\"a\" + {b}");
        assert_eq!(
            JavaScriptTemplate.render(&node).unwrap(),
            "console.log(\"a\" + {b});"
        );
    }

    #[test]
    fn literal_braces_survive() {
        let node = Node::new("c", NodeKind::Condition).with_attribute("condition", "ok");
        assert_eq!(CppTemplate.render(&node).unwrap(), "if (ok) {");
    }

    #[test]
    fn start_emits_nothing() {
        assert!(JavaTemplate.render(&Node::new("s", NodeKind::Start)).is_none());
    }
}
