use std::collections::HashSet;

use tracing::debug;

use crate::ast::{Node, NodeKind};

/// Removes bindings and functions that are never used, until nothing more
/// can be removed.
///
/// Liveness is tracked per block. A binding declared in a block is used if a
/// name it binds is read or called inside that block, including its nested
/// blocks, so a sibling block reading the same name does not keep it alive.
/// Function bodies run wherever they are called, so every name called
/// anywhere or read inside any function body counts as used in every block.
/// Plain assignments to a name the block does not declare also look at the
/// uses of the enclosing blocks. Removing one binding can make another one
/// dead, so the sweep repeats until it removes nothing.
///
/// A binding survives regardless of use when:
/// - its value may have effects (it contains a call or a print);
/// - it is the last statement of a block whose value is observed (the
///   program, a function body, or a block nested in such a tail) and the
///   statement before it produces a value, which would otherwise become the
///   block's value.
pub fn eliminate_dead_code(mut program: Node) -> Node {
    loop {
        let mut global = HashSet::new();
        collect_global(&program, false, &mut global);

        let mut sweeper = Sweeper { global:  &global,
                                    removed: 0, };
        program = sweeper.sweep(program, &HashSet::new(), true);
        if sweeper.removed == 0 {
            return program;
        }
        debug!(removed = sweeper.removed, "removed dead statements");
    }
}

/// Collects the names used from everywhere: every called name and every name
/// read inside a function body.
fn collect_global(node: &Node, in_function: bool, global: &mut HashSet<String>) {
    match &node.kind {
        NodeKind::KeyVal(name) if in_function => {
            global.insert(name.clone());
        },
        NodeKind::Call { name, .. } => {
            global.extend(name.name().map(str::to_string));
        },
        _ => {},
    }

    let in_function = in_function || matches!(node.kind, NodeKind::Function { .. });
    for child in node.children() {
        collect_global(child, in_function, global);
    }
}

/// Collects every name that is read or called below `node`.
///
/// Targets of assignments that must stay because of their value count as
/// used, so their declarations stay too.
fn collect_used(node: &Node, used: &mut HashSet<String>) {
    match &node.kind {
        NodeKind::KeyVal(name) => {
            used.insert(name.clone());
        },
        NodeKind::Call { name, .. } => {
            used.extend(name.name().map(str::to_string));
        },
        NodeKind::Assign { name, value } if !is_pure(value) => {
            used.extend(name.name().map(str::to_string));
        },
        _ => {},
    }

    for child in node.children() {
        collect_used(child, used);
    }
}

/// Used names as seen from one block.
struct Liveness {
    /// Global uses plus the uses inside the block and its header.
    local:    HashSet<String>,
    /// `local` plus the uses of every enclosing block.
    visible:  HashSet<String>,
    /// Names declared by the block's own statements.
    declared: HashSet<String>,
}

impl Liveness {
    fn new(global: &HashSet<String>,
           outer: &HashSet<String>,
           header: &[&Node],
           statements: &[Node])
           -> Self {
        let mut local = global.clone();
        for node in header.iter().copied().chain(statements) {
            collect_used(node, &mut local);
        }
        let visible = outer.union(&local).cloned().collect();
        let declared = statements.iter()
                                 .filter(|s| !matches!(s.kind, NodeKind::Assign { .. }))
                                 .filter_map(Node::target)
                                 .map(str::to_string)
                                 .collect();

        Self { local,
               visible,
               declared }
    }

    fn is_dead(&self, statement: &Node) -> bool {
        let Some(name) = statement.target() else {
            return false;
        };

        match &statement.kind {
            NodeKind::TypeDeclare { .. } | NodeKind::Function { .. } => !self.local.contains(name),
            NodeKind::AssignWithType { value, .. } => !self.local.contains(name) && is_pure(value),
            NodeKind::Assign { value, .. } => {
                let used = if self.declared.contains(name) { &self.local } else { &self.visible };
                !used.contains(name) && is_pure(value)
            },
            _ => false,
        }
    }
}

/// One pass over the program, dropping dead statements.
struct Sweeper<'a> {
    global:  &'a HashSet<String>,
    removed: usize,
}

impl Sweeper<'_> {
    /// Drops dead statements from every block reachable through statement
    /// positions.
    ///
    /// # Parameters
    /// - `outer`: Names used by the enclosing blocks.
    /// - `observable`: Whether the value of this node is observed, which pins
    ///   the last statement of its block.
    fn sweep(&mut self, node: Node, outer: &HashSet<String>, observable: bool) -> Node {
        let Node { id, line, kind } = node;

        let kind = match kind {
            NodeKind::Program { block } => {
                NodeKind::Program { block: self.body(block, outer, &[], true) }
            },
            NodeKind::InstructionBlock { block } => {
                NodeKind::InstructionBlock { block: self.body(block, outer, &[], observable) }
            },
            NodeKind::Condition { guard, body } => {
                let body = self.body(body, outer, &[&*guard], observable);
                NodeKind::Condition { guard, body }
            },
            NodeKind::While { guard, body } => {
                let body = self.body(body, outer, &[&*guard], observable);
                NodeKind::While { guard, body }
            },
            NodeKind::For { init,
                            guard,
                            step,
                            body, } => {
                let body = self.body(body, outer, &[&*init, &*guard, &*step], observable);
                NodeKind::For { init,
                                guard,
                                step,
                                body }
            },
            NodeKind::Function { name, params, body } => {
                let body = self.body(body, outer, &[], true);
                NodeKind::Function { name, params, body }
            },
            kind => kind,
        };

        Node { id, line, kind }
    }

    /// Sweeps the block under a compound statement. `header` holds the parts
    /// of the statement that run alongside the block, such as a loop guard.
    fn body(&mut self,
            block: Box<Node>,
            outer: &HashSet<String>,
            header: &[&Node],
            observable: bool)
            -> Box<Node> {
        let Node { id, line, kind } = *block;
        let NodeKind::Block { statements } = kind else {
            return Box::new(self.sweep(Node { id, line, kind }, outer, observable));
        };

        let liveness = Liveness::new(self.global, outer, header, &statements);
        let count = statements.len();
        let mut kept: Vec<Node> = Vec::with_capacity(count);
        for (index, statement) in statements.into_iter().enumerate() {
            let tail = observable && index + 1 == count;
            let pinned = tail && !kept.last().is_none_or(is_valueless);
            if !pinned && liveness.is_dead(&statement) {
                self.removed += 1;
                continue;
            }
            kept.push(self.sweep(statement, &liveness.visible, tail));
        }

        Box::new(Node { id,
                        line,
                        kind: NodeKind::Block { statements: kept } })
    }
}

/// Whether a statement never produces a value when evaluated.
const fn is_valueless(statement: &Node) -> bool {
    matches!(statement.kind,
             NodeKind::Assign { .. }
             | NodeKind::TypeDeclare { .. }
             | NodeKind::AssignWithType { .. }
             | NodeKind::Function { .. }
             | NodeKind::Print { .. })
}

/// Whether evaluating `node` can only produce a value or a diagnostic.
fn is_pure(node: &Node) -> bool {
    matches!(node.kind,
             NodeKind::IntVal(_)
             | NodeKind::FloatVal(_)
             | NodeKind::StringVal(_)
             | NodeKind::BoolVal(_)
             | NodeKind::NameVal(_)
             | NodeKind::KeyVal(_)
             | NodeKind::TypeVal(_)
             | NodeKind::Pi
             | NodeKind::Operator { .. }
             | NodeKind::Relation { .. }
             | NodeKind::MathFunction { .. }
             | NodeKind::Cast { .. })
    && node.children().into_iter().all(is_pure)
}
