//! Common test utilities for building canvas graphs.
use rigboard::prelude::*;

fn node(id: &str, kind: NodeKind, attributes: &[(&str, &str)]) -> Node {
    attributes
        .iter()
        .fold(Node::new(id, kind), |n, (k, v)| n.with_attribute(*k, *v))
}

/// Builds a graph from nodes and `(source, target)` pairs, in order.
#[allow(dead_code)]
pub fn build_graph(nodes: Vec<Node>, edges: &[(&str, &str)]) -> Graph {
    let mut graph = Graph::new();
    for n in nodes {
        graph.add_node(n).expect("duplicate node in fixture");
    }
    for (i, (source, target)) in edges.iter().enumerate() {
        graph
            .connect(Edge::new(format!("e{}", i + 1), *source, *target))
            .expect("invalid edge in fixture");
    }
    graph
}

/// start -> x = 5 -> y = x * 2 -> print(y) -> end
#[allow(dead_code)]
pub fn create_linear_graph() -> Graph {
    build_graph(
        vec![
            node("start", NodeKind::Start, &[]),
            node("assign", NodeKind::Variable, &[("name", "x"), ("value", "5")]),
            node(
                "double",
                NodeKind::Operation,
                &[("result", "y"), ("left", "x"), ("operator", "*"), ("right", "2")],
            ),
            node("show", NodeKind::Output, &[("value", "y")]),
            node("end", NodeKind::End, &[]),
        ],
        &[
            ("start", "assign"),
            ("assign", "double"),
            ("double", "show"),
            ("show", "end"),
        ],
    )
}

/// A counting loop. The loop's first edge is its body, the body wires back
/// into the loop, and the loop's second edge leads to the end.
#[allow(dead_code)]
pub fn create_loop_graph() -> Graph {
    build_graph(
        vec![
            node("start", NodeKind::Start, &[]),
            node("init", NodeKind::Variable, &[("name", "i"), ("value", "0")]),
            node("loop", NodeKind::Loop, &[("condition", "i < 3")]),
            node("body", NodeKind::Output, &[("value", "i")]),
            node(
                "inc",
                NodeKind::Operation,
                &[("result", "i"), ("left", "i"), ("operator", "+"), ("right", "1")],
            ),
            node("end", NodeKind::End, &[]),
        ],
        &[
            ("start", "init"),
            ("init", "loop"),
            ("loop", "body"),
            ("body", "inc"),
            ("inc", "loop"),
            ("loop", "end"),
        ],
    )
}

/// An if/else: the condition's first edge is the then-branch, the second the
/// else-branch, and the third continues after the block.
#[allow(dead_code)]
pub fn create_branch_graph() -> Graph {
    build_graph(
        vec![
            node("start", NodeKind::Start, &[]),
            node("read", NodeKind::Input, &[("name", "x"), ("prompt", "Number")]),
            node("check", NodeKind::Condition, &[("condition", "x > 0")]),
            node("yes", NodeKind::Output, &[("value", "\"positive\"")]),
            node("no", NodeKind::Output, &[("value", "\"non-positive\"")]),
            node("end", NodeKind::End, &[]),
        ],
        &[
            ("start", "read"),
            ("read", "check"),
            ("check", "yes"),
            ("check", "no"),
            ("check", "end"),
        ],
    )
}

/// A function containing a loop, followed by a call at the top level.
#[allow(dead_code)]
pub fn create_nested_graph() -> Graph {
    build_graph(
        vec![
            node("start", NodeKind::Start, &[]),
            node("func", NodeKind::Function, &[("name", "greet"), ("params", "name")]),
            node("loop", NodeKind::Loop, &[("condition", "n > 0")]),
            node("say", NodeKind::Output, &[("value", "name")]),
            node(
                "dec",
                NodeKind::Operation,
                &[("result", "n"), ("left", "n"), ("operator", "-"), ("right", "1")],
            ),
            node("call", NodeKind::Output, &[("value", "greet(\"bob\")")]),
        ],
        &[
            ("start", "func"),
            ("func", "loop"),
            ("loop", "say"),
            ("say", "dec"),
            ("func", "call"),
        ],
    )
}

#[allow(dead_code)]
pub const CANVAS_JSON: &str = r#"{
    "nodes": [
        { "id": "s", "type": "start", "position": { "x": 10, "y": 20 } },
        { "id": "v", "kind": "variable", "attributes": { "name": "total", "value": 3 } },
        { "id": "o", "type": "output", "attributes": { "value": "total", "note": null } }
    ],
    "connections": [
        { "id": "c1", "sourceId": "s", "targetId": "v" },
        { "from": "v", "to": "o" }
    ]
}"#;

/// An if/else whose branches meet again: check -> yes -> after and
/// check -> no -> after.
#[allow(dead_code)]
pub fn create_diamond_graph() -> Graph {
    build_graph(
        vec![
            node("start", NodeKind::Start, &[]),
            node("check", NodeKind::Condition, &[("condition", "x > 0")]),
            node("yes", NodeKind::Output, &[("value", "1")]),
            node("no", NodeKind::Output, &[("value", "2")]),
            node("after", NodeKind::Output, &[("value", "3")]),
        ],
        &[
            ("start", "check"),
            ("check", "yes"),
            ("check", "no"),
            ("yes", "after"),
            ("no", "after"),
        ],
    )
}
