//! End-to-end tests for code generation across languages and strategies.
mod common;
use common::*;
use rigboard::prelude::*;

fn generate(graph: &Graph, language: &str) -> String {
    CodeGenerator::default()
        .generate(graph, language)
        .unwrap()
        .code
}

fn generate_successor(graph: &Graph, language: &str) -> String {
    CodeGenerator::default()
        .generate_with(graph, language, IndentStrategy::Successor)
        .unwrap()
        .code
}

#[test]
fn test_linear_graph_to_python() {
    let generated = CodeGenerator::default()
        .generate(&create_linear_graph(), "python")
        .unwrap();

    assert_eq!(
        generated.code,
        "x = 5\ny = x * 2\nprint(y)\n# end of program\n"
    );
    assert_eq!(generated.language, "python");
    assert_eq!(generated.file_extension, "py");
    assert!(generated.rooted);
    assert_eq!(
        generated.order,
        vec!["start", "assign", "double", "show", "end"]
    );
}

#[test]
fn test_loop_graph_to_javascript() {
    assert_eq!(
        generate(&create_loop_graph(), "javascript"),
        "let i = 0;\nwhile (i < 3) {\n    console.log(i);\n    i = i + 1;\n}\n// end of program\n"
    );
}

#[test]
fn test_branch_graph_to_python() {
    assert_eq!(
        generate(&create_branch_graph(), "python"),
        "x = input(\"Number\")\nif x > 0:\n    print(\"positive\")\nelse:\n    print(\"non-positive\")\n# end of program\n"
    );
}

#[test]
fn test_branch_graph_to_javascript() {
    assert_eq!(
        generate(&create_branch_graph(), "javascript"),
        "let x = prompt(\"Number\");\nif (x > 0) {\n    console.log(\"positive\");\n} else {\n    console.log(\"non-positive\");\n}\n// end of program\n"
    );
}

#[test]
fn test_nested_blocks_to_cpp() {
    assert_eq!(
        generate(&create_nested_graph(), "cpp"),
        "void greet(name) {\n    while (n > 0) {\n        std::cout << name << std::endl;\n        n = n - 1;\n    }\n}\nstd::cout << greet(\"bob\") << std::endl;\n"
    );
}

#[test]
fn test_java_uses_its_own_patterns() {
    let code = generate(&create_linear_graph(), "java");
    assert!(code.starts_with("var x = 5;\n"));
    assert!(code.contains("System.out.println(y);"));
}

#[test]
fn test_successor_strategy_handles_simple_loops() {
    assert_eq!(
        generate_successor(&create_loop_graph(), "python"),
        "i = 0\nwhile i < 3:\n    print(i)\n    i = i + 1\n# end of program\n"
    );
}

#[test]
fn test_successor_strategy_flattens_else_branch() {
    // The legacy heuristic has no notion of an else branch.
    assert_eq!(
        generate_successor(&create_branch_graph(), "python"),
        "x = input(\"Number\")\nif x > 0:\n    print(\"positive\")\nprint(\"non-positive\")\n# end of program\n"
    );
}

#[test]
fn test_successor_strategy_never_closes_blocks() {
    let code = generate_successor(&create_loop_graph(), "javascript");
    assert!(!code.lines().any(|line| line.trim() == "}"));
}

#[test]
fn test_start_only_graph_is_empty() {
    let graph = build_graph(vec![Node::new("start", NodeKind::Start)], &[]);
    assert_eq!(generate(&graph, "python"), "");
}

#[test]
fn test_start_and_end() {
    let graph = build_graph(
        vec![
            Node::new("start", NodeKind::Start),
            Node::new("end", NodeKind::End),
        ],
        &[("start", "end")],
    );
    assert_eq!(generate(&graph, "python"), "# end of program\n");
}

#[test]
fn test_unreachable_nodes_produce_nothing() {
    let graph = build_graph(
        vec![
            Node::new("start", NodeKind::Start),
            Node::new("lonely", NodeKind::Output).with_attribute("value", "1"),
        ],
        &[],
    );
    assert_eq!(generate(&graph, "python"), "");
}

#[test]
fn test_graph_without_start_uses_defaults_in_insertion_order() {
    let graph = build_graph(
        vec![
            Node::new("v", NodeKind::Variable),
            Node::new("o", NodeKind::Output),
        ],
        &[],
    );
    let generated = CodeGenerator::default().generate(&graph, "python").unwrap();
    assert!(!generated.rooted);
    assert_eq!(generated.code, "x = 0\nprint(x)\n");
}

#[test]
fn test_unknown_language_is_an_error() {
    let err = CodeGenerator::default()
        .generate(&create_linear_graph(), "cobol")
        .unwrap_err();
    assert_eq!(err, CodegenError::UnknownLanguage("cobol".to_string()));
}

#[test]
fn test_language_lookup_is_case_insensitive_and_aliasable() {
    let generator = CodeGenerator::builder()
        .with_language_alias("py", "python")
        .build();
    assert!(generator.supports("PYTHON"));
    assert!(generator.supports("py"));
    assert_eq!(
        generator.generate(&create_linear_graph(), "Py").unwrap().code,
        generate(&create_linear_graph(), "python")
    );
    assert_eq!(
        CodeGenerator::default().languages(),
        vec!["cpp", "java", "javascript", "python"]
    );
}

#[test]
fn test_builder_strategy_is_the_default_for_generate() {
    let generator = CodeGenerator::builder()
        .with_indent_strategy(IndentStrategy::Successor)
        .build();
    assert_eq!(generator.strategy(), IndentStrategy::Successor);
    assert_eq!(
        generator.generate(&create_branch_graph(), "python").unwrap().code,
        generate_successor(&create_branch_graph(), "python")
    );
}

struct RubyTemplate;

impl LanguageTemplate for RubyTemplate {
    fn language(&self) -> &str {
        "ruby"
    }
    fn file_extension(&self) -> &str {
        "rb"
    }
    fn pattern(&self, kind: NodeKind) -> Option<&str> {
        match kind {
            NodeKind::Variable => Some("{name} = {value}"),
            NodeKind::Output => Some("puts {value}"),
            NodeKind::Loop => Some("while {condition}"),
            _ => None,
        }
    }
    fn block_close(&self) -> Option<&str> {
        Some("end")
    }
    fn else_line(&self) -> &str {
        "else"
    }
    fn indent_unit(&self) -> &str {
        "  "
    }
}

#[test]
fn test_custom_template() {
    let generator = CodeGenerator::builder()
        .with_custom_template(Box::new(RubyTemplate))
        .build();
    let generated = generator.generate(&create_loop_graph(), "ruby").unwrap();
    assert_eq!(generated.file_extension, "rb");
    assert_eq!(generated.code, "i = 0\nwhile i < 3\n  puts i\nend\n");
}

#[test]
fn test_indent_strategy_parsing() {
    assert_eq!(
        "Successor".parse::<IndentStrategy>().unwrap(),
        IndentStrategy::Successor
    );
    assert_eq!(IndentStrategy::default(), IndentStrategy::Structured);
    assert!("tabs".parse::<IndentStrategy>().is_err());
}

#[test]
fn test_branches_that_meet_continue_after_the_block() {
    let generated = CodeGenerator::default()
        .generate(&create_diamond_graph(), "python")
        .unwrap();
    assert_eq!(
        generated.code,
        "if x > 0:\n    print(1)\nelse:\n    print(2)\nprint(3)\n"
    );
    assert_eq!(generated.order, vec!["start", "check", "yes", "no", "after"]);

    assert_eq!(
        generate(&create_diamond_graph(), "javascript"),
        "if (x > 0) {\n    console.log(1);\n} else {\n    console.log(2);\n}\nconsole.log(3);\n"
    );
}

#[test]
fn test_merge_below_a_longer_branch() {
    let mut graph = create_diamond_graph();
    graph
        .add_node(Node::new("more", NodeKind::Output).with_attribute("value", "4"))
        .unwrap();
    graph.disconnect("e5").unwrap();
    graph.connect(Edge::new("e6", "no", "more")).unwrap();
    graph.connect(Edge::new("e7", "more", "after")).unwrap();

    assert_eq!(
        generate(&graph, "python"),
        "if x > 0:\n    print(1)\nelse:\n    print(2)\n    print(4)\nprint(3)\n"
    );
}

#[test]
fn test_then_branch_leading_to_else_branch() {
    // check -> yes -> no, check -> no: `no` runs on both paths.
    let graph = build_graph(
        vec![
            Node::new("start", NodeKind::Start),
            Node::new("check", NodeKind::Condition).with_attribute("condition", "ok"),
            Node::new("yes", NodeKind::Output).with_attribute("value", "1"),
            Node::new("no", NodeKind::Output).with_attribute("value", "2"),
        ],
        &[("start", "check"), ("check", "yes"), ("check", "no"), ("yes", "no")],
    );
    assert_eq!(generate(&graph, "python"), "if ok:\n    print(1)\nprint(2)\n");
}

#[test]
fn test_empty_blocks_get_a_placeholder_body_in_python() {
    // The condition's first edge leads back to an already emitted node.
    let graph = build_graph(
        vec![
            Node::new("start", NodeKind::Start),
            Node::new("v", NodeKind::Variable)
                .with_attribute("name", "x")
                .with_attribute("value", "1"),
            Node::new("check", NodeKind::Condition).with_attribute("condition", "x > 0"),
            Node::new("o", NodeKind::Output).with_attribute("value", "2"),
        ],
        &[("start", "v"), ("v", "check"), ("check", "start"), ("check", "o")],
    );
    assert_eq!(
        generate(&graph, "python"),
        "x = 1\nif x > 0:\n    pass\nelse:\n    print(2)\n"
    );
    assert_eq!(
        generate(&graph, "javascript"),
        "let x = 1;\nif (x > 0) {\n} else {\n    console.log(2);\n}\n"
    );
}

#[test]
fn test_bodyless_loop_and_function() {
    let graph = build_graph(
        vec![
            Node::new("start", NodeKind::Start),
            Node::new("f", NodeKind::Function).with_attribute("name", "noop"),
        ],
        &[("start", "f")],
    );
    assert_eq!(generate(&graph, "python"), "def noop():\n    pass\n");
    assert_eq!(generate(&graph, "java"), "static void noop() {\n}\n");
}
