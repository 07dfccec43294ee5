use std::collections::HashMap;

use petgraph::{
    dot::{Config, Dot},
    graph::{DiGraph, NodeIndex},
};

use crate::ast::{Node, NodeKind};

/// Receiver of the drawing calls made by [`Node::draw`].
///
/// Identifiers are the strings produced by the nodes' [`NodeId`]s plus a
/// suffix for the value and operator sub-nodes of leaves.
///
/// [`NodeId`]: crate::ast::NodeId
pub trait GraphSink {
    /// Adds a labeled node.
    fn add_node(&mut self, id: &str, label: &str);

    /// Adds an edge between two nodes that were already added.
    fn add_edge(&mut self, parent: &str, child: &str);
}

impl Node {
    /// Draws this subtree into `sink`.
    ///
    /// Emits a node labeled with the kind, an edge from `parent` when there
    /// is one, a sub-node holding the value or operator of leaves and
    /// operations, and then the children in source order.
    ///
    /// # Example
    /// ```
    /// use slate::{ast::NodeIdAllocator, interpreter::{lexer::tokenize, parser::core::parse_program, render::AstGraph}};
    ///
    /// let mut ids = NodeIdAllocator::default();
    /// let (tokens, _) = tokenize("print(1)");
    /// let (program, _) = parse_program(&tokens, &mut ids);
    ///
    /// let graph = AstGraph::from_program(&program);
    /// assert!(graph.to_dot().contains("Print"));
    /// ```
    pub fn draw<S>(&self, sink: &mut S, parent: Option<&str>)
        where S: GraphSink
    {
        let id = self.id.to_string();
        sink.add_node(&id, self.label());
        if let Some(parent) = parent {
            sink.add_edge(parent, &id);
        }

        if let Some(detail) = self.detail() {
            let detail_id = format!("{id}_detail");
            sink.add_node(&detail_id, &detail);
            sink.add_edge(&id, &detail_id);
        }

        for child in self.children() {
            child.draw(sink, Some(&id));
        }
    }

    const fn label(&self) -> &'static str {
        match self.kind {
            NodeKind::Program { .. } => "Program",
            NodeKind::Block { .. } => "Block",
            NodeKind::InstructionBlock { .. } => "InstructionBlock",
            NodeKind::Condition { .. } => "Condition",
            NodeKind::While { .. } => "While",
            NodeKind::For { .. } => "For",
            NodeKind::Relation { .. } => "Relation",
            NodeKind::Operator { .. } => "Operator",
            NodeKind::Print { .. } => "Print",
            NodeKind::Assign { .. } => "Assign",
            NodeKind::TypeDeclare { .. } => "TypeDeclare",
            NodeKind::AssignWithType { .. } => "AssignWithType",
            NodeKind::Cast { .. } => "Cast",
            NodeKind::Args { .. } => "Args",
            NodeKind::ArgsVal { .. } => "ArgsVal",
            NodeKind::Function { .. } => "Function",
            NodeKind::Call { .. } => "Call",
            NodeKind::MathFunction { .. } => "MathFunction",
            NodeKind::Comment { .. } => "Comment",
            NodeKind::IntVal(_) => "IntVal",
            NodeKind::FloatVal(_) => "FloatVal",
            NodeKind::StringVal(_) => "StringVal",
            NodeKind::BoolVal(_) => "BoolVal",
            NodeKind::NameVal(_) => "NameVal",
            NodeKind::KeyVal(_) => "KeyVal",
            NodeKind::TypeVal(_) => "TypeVal",
            NodeKind::Pi => "Pi",
        }
    }

    /// Text of the sub-node shown under leaves and operations.
    fn detail(&self) -> Option<String> {
        let detail = match &self.kind {
            NodeKind::Relation { op, .. } => op.to_string(),
            NodeKind::Operator { op, .. } => op.to_string(),
            NodeKind::MathFunction { function, .. } => function.to_string(),
            NodeKind::Comment { text } => text.clone(),
            NodeKind::IntVal(value) => value.to_string(),
            NodeKind::FloatVal(value) => format!("{value:?}"),
            NodeKind::StringVal(value) => format!("\"{value}\""),
            NodeKind::BoolVal(value) => value.to_string(),
            NodeKind::NameVal(name) | NodeKind::KeyVal(name) => name.clone(),
            NodeKind::TypeVal(ty) => ty.to_string(),
            NodeKind::Pi => "PI".to_string(),
            _ => return None,
        };
        Some(detail)
    }
}

/// A [`GraphSink`] that collects the drawing into a `petgraph` graph.
#[derive(Debug, Default)]
pub struct AstGraph {
    graph: DiGraph<String, &'static str>,
    nodes: HashMap<String, NodeIndex>,
}

impl AstGraph {
    /// Draws a whole program.
    #[must_use]
    pub fn from_program(program: &Node) -> Self {
        let mut graph = Self::default();
        program.draw(&mut graph, None);
        graph
    }

    /// Number of drawn nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of drawn edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Renders the drawing as Graphviz DOT text.
    #[must_use]
    pub fn to_dot(&self) -> String {
        Dot::with_config(&self.graph, &[Config::EdgeNoLabel]).to_string()
    }
}

impl GraphSink for AstGraph {
    fn add_node(&mut self, id: &str, label: &str) {
        if self.nodes.contains_key(id) {
            return;
        }
        let index = self.graph.add_node(label.to_string());
        self.nodes.insert(id.to_string(), index);
    }

    fn add_edge(&mut self, parent: &str, child: &str) {
        if let (Some(&parent), Some(&child)) = (self.nodes.get(parent), self.nodes.get(child)) {
            self.graph.add_edge(parent, child, "");
        }
    }
}
