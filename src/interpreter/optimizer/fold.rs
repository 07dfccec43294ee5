use crate::{
    ast::{ArithmeticOperator, Node, NodeId, NodeKind},
    interpreter::{
        optimizer::core::Optimizer,
        value::{arithmetic::apply_arithmetic, core::Value},
    },
};

/// An algebraic identity that applies to `literal op variable` or
/// `variable op literal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Identity {
    /// The variable alone: `x + 0`, `1 * x`, `x ^ 1`.
    Operand,
    /// The literal alone: `x * 0`.
    Literal,
    /// `1` of the literal's kind: `x ^ 0`.
    One,
    /// `x + x`: `2 * x`.
    Double,
    /// `x * x`: `x ^ 2`.
    Square,
    /// `x * 0.5`: `x / 2.0`.
    Halve,
}

impl Optimizer<'_> {
    /// Rewrites a subtree bottom-up.
    ///
    /// Children are rewritten first, so a fold of the children can enable an
    /// identity on the parent in the same pass. Comment statements are
    /// dropped from every block.
    pub(super) fn rewrite(&mut self, node: Node) -> Node {
        let Node { id, line, kind } = node.map_children(&mut |child| self.rewrite(child));

        match kind {
            NodeKind::Block { statements } => {
                let statements = statements.into_iter()
                                           .filter(|s| !matches!(s.kind, NodeKind::Comment { .. }))
                                           .collect();
                Node { id,
                       line,
                       kind: NodeKind::Block { statements } }
            },
            NodeKind::Operator { op, left, right } => self.simplify_operator(id, line, op, *left, *right),
            kind => Node { id, line, kind },
        }
    }

    /// Folds or simplifies one arithmetic node whose operands are already
    /// rewritten.
    ///
    /// Two literals of the same kind are folded through the runtime's own
    /// arithmetic; a fold that would fail at runtime is left in place so the
    /// error is still reported. Identities only apply between a numeric
    /// literal and a variable read.
    fn simplify_operator(&mut self,
                         id: NodeId,
                         line: usize,
                         op: ArithmeticOperator,
                         left: Node,
                         right: Node)
                         -> Node {
        if let Some(kind) = fold(op, &left, &right) {
            return self.node(line, kind);
        }

        let literal_left = left.is_numeric_literal() && matches!(right.kind, NodeKind::KeyVal(_));
        let literal_right = right.is_numeric_literal() && matches!(left.kind, NodeKind::KeyVal(_));

        let identity = if literal_left {
            left_identity(op, &left)
        } else if literal_right {
            right_identity(op, &right)
        } else {
            None
        };

        let Some(identity) = identity else {
            return Node { id,
                          line,
                          kind: NodeKind::Operator { op,
                                                     left: Box::new(left),
                                                     right: Box::new(right) } };
        };

        let (operand, literal) = if literal_left { (right, left) } else { (left, right) };
        self.apply_identity(identity, line, operand, literal)
    }

    fn apply_identity(&mut self, identity: Identity, line: usize, operand: Node, literal: Node) -> Node {
        match identity {
            Identity::Operand => operand,
            Identity::Literal => literal,
            Identity::One => {
                let kind = match literal.kind {
                    NodeKind::FloatVal(_) => NodeKind::FloatVal(1.0),
                    _ => NodeKind::IntVal(1),
                };
                self.node(line, kind)
            },
            Identity::Double => self.duplicate(ArithmeticOperator::Add, line, operand),
            Identity::Square => self.duplicate(ArithmeticOperator::Mul, line, operand),
            Identity::Halve => {
                let half = self.node(literal.line, NodeKind::FloatVal(0.5));
                self.node(line,
                          NodeKind::Operator { op:    ArithmeticOperator::Mul,
                                               left:  Box::new(operand),
                                               right: Box::new(half), })
            },
        }
    }

    /// Builds `operand op operand`; the copy gets its own id.
    fn duplicate(&mut self, op: ArithmeticOperator, line: usize, operand: Node) -> Node {
        let copy = self.node(operand.line, operand.kind.clone());
        self.node(line,
                  NodeKind::Operator { op,
                                       left: Box::new(operand),
                                       right: Box::new(copy) })
    }
}

/// Computes `left op right` for two literals of the same numeric kind.
///
/// # Returns
/// The literal to replace the operation with, or `None` when the operands
/// are not both int or both float, when the operation fails, or when a float
/// result is not finite.
fn fold(op: ArithmeticOperator, left: &Node, right: &Node) -> Option<NodeKind> {
    let (left, right) = match (&left.kind, &right.kind) {
        (NodeKind::IntVal(a), NodeKind::IntVal(b)) => (Value::Integer(*a), Value::Integer(*b)),
        (NodeKind::FloatVal(a), NodeKind::FloatVal(b)) => (Value::Float(*a), Value::Float(*b)),
        _ => return None,
    };

    match apply_arithmetic(op, &left, &right).ok()? {
        Value::Integer(i) => Some(NodeKind::IntVal(i)),
        Value::Float(x) if x.is_finite() => Some(NodeKind::FloatVal(x)),
        _ => None,
    }
}

/// Identities for `literal op x`. Powers with a literal base are left alone.
fn left_identity(op: ArithmeticOperator, literal: &Node) -> Option<Identity> {
    match op {
        ArithmeticOperator::Add if is_literal(literal, 0) => Some(Identity::Operand),
        ArithmeticOperator::Mul if is_literal(literal, 0) => Some(Identity::Literal),
        ArithmeticOperator::Mul if is_literal(literal, 1) => Some(Identity::Operand),
        ArithmeticOperator::Mul if is_literal(literal, 2) => Some(Identity::Double),
        _ => None,
    }
}

/// Identities for `x op literal`.
fn right_identity(op: ArithmeticOperator, literal: &Node) -> Option<Identity> {
    match op {
        ArithmeticOperator::Add | ArithmeticOperator::Sub if is_literal(literal, 0) => Some(Identity::Operand),
        ArithmeticOperator::Mul if is_literal(literal, 0) => Some(Identity::Literal),
        ArithmeticOperator::Mul if is_literal(literal, 1) => Some(Identity::Operand),
        ArithmeticOperator::Mul if is_literal(literal, 2) => Some(Identity::Double),
        // Int division yields a float, so only a float divisor keeps the operand's kind.
        ArithmeticOperator::Div if literal.kind == NodeKind::FloatVal(1.0) => Some(Identity::Operand),
        ArithmeticOperator::Div if literal.kind == NodeKind::FloatVal(2.0) => Some(Identity::Halve),
        ArithmeticOperator::Pow if is_literal(literal, 0) => Some(Identity::One),
        ArithmeticOperator::Pow if is_literal(literal, 1) => Some(Identity::Operand),
        ArithmeticOperator::Pow if is_literal(literal, 2) => Some(Identity::Square),
        _ => None,
    }
}

/// Whether `node` is the int or float literal `n`.
#[allow(clippy::float_cmp)]
fn is_literal(node: &Node, n: i32) -> bool {
    match node.kind {
        NodeKind::IntVal(value) => value == i64::from(n),
        NodeKind::FloatVal(value) => value == f64::from(n),
        _ => false,
    }
}
