use super::templates::LanguageTemplate;
use super::traversal::{Traversal, Visit};
use super::IndentStrategy;
use crate::graph::{Graph, Node, NodeKind};
use ahash::AHashSet;
use tracing::trace;

/// Writes a graph out as source text in one language.
pub(super) struct Emitter<'a, 'g> {
    template: &'a dyn LanguageTemplate,
    strategy: IndentStrategy,
    graph: &'g Graph,
    lines: Vec<String>,
    placed: AHashSet<&'g str>,
    order: Vec<String>,
}

impl<'a, 'g> Emitter<'a, 'g> {
    pub(super) fn new(
        template: &'a dyn LanguageTemplate,
        strategy: IndentStrategy,
        graph: &'g Graph,
    ) -> Self {
        Self {
            template,
            strategy,
            graph,
            lines: Vec::new(),
            placed: AHashSet::new(),
            order: Vec::new(),
        }
    }

    /// Returns the code and the ids of the nodes in the order they were placed.
    pub(super) fn emit(mut self, traversal: &Traversal<'g>) -> (String, Vec<String>) {
        match self.strategy {
            IndentStrategy::Successor => self.emit_successor(traversal.visits()),
            IndentStrategy::Structured => match traversal.visits().first() {
                Some(root) if traversal.is_rooted() => self.emit_sequence(root.node, 0, &[]),
                _ => self.emit_flat(traversal.visits()),
            },
        }
        if self.lines.is_empty() {
            return (String::new(), self.order);
        }
        let mut code = self.lines.join("\n");
        code.push('\n');
        (code, self.order)
    }

    /// Indents after every block opener and dedents one level whenever the
    /// next node is not a direct successor. Wrong for nested or branching
    /// blocks, and never emits closing lines.
    fn emit_successor(&mut self, visits: &[Visit<'g>]) {
        let mut indent = 0usize;
        for (i, visit) in visits.iter().enumerate() {
            self.place(visit.node, indent);
            if visit.node.kind.is_block_opener() {
                indent += 1;
            } else if let Some(next) = visits.get(i + 1) {
                if !self.graph.has_edge(&visit.node.id, &next.node.id) {
                    indent = indent.saturating_sub(1);
                }
            }
        }
    }

    /// Without a start node there is no structure to follow: every node goes
    /// at the top level and blocks are left empty.
    fn emit_flat(&mut self, visits: &[Visit<'g>]) {
        for visit in visits {
            self.place(visit.node, 0);
            if visit.node.kind.is_block_opener() {
                self.emit_body(None, 1, &[]);
                self.close_block(0);
            }
        }
    }

    /// Emits a chain of nodes at one depth. The first edge out of a block
    /// opener is its body; a condition's second edge is its else branch.
    /// Every other edge continues at the current depth, in edge order.
    ///
    /// `stops` holds merge points of enclosing conditions; the chain ends
    /// there so the merge is written once, after its block.
    fn emit_sequence(&mut self, first: &'g Node, depth: usize, stops: &[&'g str]) {
        let mut current = Some(first);
        while let Some(node) = current.take() {
            let id = node.id.as_str();
            if self.placed.contains(id) || stops.contains(&id) {
                return;
            }
            self.place(node, depth);

            let successors = self.successors(node);
            let (rest, merge) = match node.kind {
                NodeKind::Condition => {
                    let merge = self.emit_condition(&successors, depth, stops);
                    (successors.get(2..).unwrap_or_default(), merge)
                }
                NodeKind::Loop | NodeKind::Function => {
                    self.emit_body(successors.first().copied(), depth + 1, stops);
                    self.close_block(depth);
                    (successors.get(1..).unwrap_or_default(), None)
                }
                _ => (&successors[..], None),
            };

            let mut next: Vec<&'g Node> = rest.to_vec();
            next.extend(merge);
            if let Some((last, others)) = next.split_last() {
                for other in others {
                    self.emit_sequence(other, depth, stops);
                }
                current = Some(*last);
            }
        }
    }

    /// Writes both branches of a condition and closes it. Returns the node
    /// both branches lead to, if any; the caller writes it after the block.
    fn emit_condition(
        &mut self,
        successors: &[&'g Node],
        depth: usize,
        stops: &[&'g str],
    ) -> Option<&'g Node> {
        let then_branch = successors.first().copied();
        let else_branch = successors.get(1).copied();
        let merge = match (then_branch, else_branch) {
            (Some(then_branch), Some(else_branch)) => {
                self.find_merge(then_branch, else_branch, stops)
            }
            _ => None,
        };

        let mut inner: Vec<&'g str> = stops.to_vec();
        inner.extend(merge.map(|m| m.id.as_str()));

        self.emit_body(then_branch, depth + 1, &inner);
        if let Some(else_branch) = else_branch {
            let id = else_branch.id.as_str();
            if !self.placed.contains(id) && !inner.contains(&id) {
                let template = self.template;
                self.push_line(depth, template.else_line());
                self.emit_body(Some(else_branch), depth + 1, &inner);
            }
        }
        self.close_block(depth);
        merge
    }

    /// The first node of the then-branch, in walk order, that the else branch
    /// also reaches.
    fn find_merge(
        &self,
        then_branch: &'g Node,
        else_branch: &'g Node,
        stops: &[&'g str],
    ) -> Option<&'g Node> {
        let from_else: AHashSet<&str> = self
            .reachable(else_branch, stops)
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        self.reachable(then_branch, stops)
            .into_iter()
            .find(|n| from_else.contains(n.id.as_str()))
    }

    /// Unplaced nodes reachable from `entry` without crossing a stop, in
    /// depth-first pre-order.
    fn reachable(&self, entry: &'g Node, stops: &[&'g str]) -> Vec<&'g Node> {
        let mut seen: AHashSet<&'g str> = AHashSet::new();
        let mut found = Vec::new();
        let mut stack = vec![entry];
        while let Some(node) = stack.pop() {
            let id = node.id.as_str();
            if self.placed.contains(id) || stops.contains(&id) || !seen.insert(id) {
                continue;
            }
            found.push(node);
            stack.extend(self.successors(node).into_iter().rev());
        }
        found
    }

    /// Writes a block body, or the template's empty-body line when nothing in
    /// it produced output.
    fn emit_body(&mut self, entry: Option<&'g Node>, depth: usize, stops: &[&'g str]) {
        let before = self.lines.len();
        if let Some(entry) = entry {
            self.emit_sequence(entry, depth, stops);
        }
        if self.lines.len() == before {
            let template = self.template;
            if let Some(line) = template.empty_body() {
                self.push_line(depth, line);
            }
        }
    }

    fn close_block(&mut self, depth: usize) {
        let template = self.template;
        if let Some(close) = template.block_close() {
            self.push_line(depth, close);
        }
    }

    fn successors(&self, node: &Node) -> Vec<&'g Node> {
        let graph = self.graph;
        graph
            .edges()
            .iter()
            .filter(|e| e.source == node.id)
            .filter_map(|e| graph.node(&e.target))
            .collect()
    }

    fn place(&mut self, node: &'g Node, depth: usize) {
        trace!(node = %node.id, depth, "placing node");
        self.placed.insert(node.id.as_str());
        self.order.push(node.id.clone());
        if let Some(line) = self.template.render(node) {
            self.push_line(depth, &line);
        }
    }

    fn push_line(&mut self, depth: usize, line: &str) {
        self.lines
            .push(format!("{}{}", self.template.indent_unit().repeat(depth), line));
    }
}
