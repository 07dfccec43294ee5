use std::{fmt, str::FromStr};

use crate::error::DeclarationError;

/// Identifier of a single AST node.
///
/// Ids are handed out by a [`NodeIdAllocator`] while the tree is built and are
/// unique for everything built through the same allocator. The renderer uses
/// them as graph node identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node{}", self.0)
    }
}

/// Hands out [`NodeId`]s in construction order.
///
/// One allocator is owned by each interpreter so that independent
/// interpreters (and tests) produce deterministic ids.
///
/// # Example
/// ```
/// use slate::ast::NodeIdAllocator;
///
/// let mut ids = NodeIdAllocator::default();
/// assert_eq!(ids.next_id().to_string(), "Node0");
/// assert_eq!(ids.next_id().to_string(), "Node1");
/// ```
#[derive(Debug, Default)]
pub struct NodeIdAllocator {
    next: usize,
}

impl NodeIdAllocator {
    /// Returns a fresh id.
    pub const fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn allocated(&self) -> usize {
        self.next
    }
}

/// One of the four primitive types of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// `int`, a 64-bit signed integer.
    Int,
    /// `float`, a 64-bit floating-point number.
    Float,
    /// `string`, an immutable text value.
    String,
    /// `bool`, `true` or `false`.
    Bool,
}

impl FromStr for Type {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "string" => Ok(Self::String),
            "bool" => Ok(Self::Bool),
            _ => Err(DeclarationError::InvalidType { type_name: s.to_string() }),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::String => "string",
            Self::Bool => "bool",
        };
        write!(f, "{name}")
    }
}

/// Binary arithmetic operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithmeticOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^` or `**`)
    Pow,
}

/// Relational operator; always produces a `bool`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RelationalOperator {
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

/// Built-in math function. Results are rounded to five decimal places.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MathFunction {
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `exp`
    Exp,
    /// `sqrt`
    Sqrt,
    /// `log`, the natural logarithm.
    Log,
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for RelationalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for MathFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
        };
        write!(f, "{name}")
    }
}

/// A node of the abstract syntax tree.
///
/// Every node owns its children exclusively; the tree has no sharing and no
/// back edges.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier assigned at construction.
    pub id:   NodeId,
    /// Line number in the source code.
    pub line: usize,
    /// What kind of node this is.
    pub kind: NodeKind,
}

/// The closed catalog of node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Root of every parsed source, wrapping exactly one top-level block.
    Program {
        /// The top-level [`NodeKind::Block`].
        block: Box<Node>,
    },
    /// An ordered sequence of statements. Does not open a scope by itself.
    Block {
        /// Statements in source order.
        statements: Vec<Node>,
    },
    /// `{ ... }` used as a statement; opens its own scope.
    InstructionBlock {
        /// The wrapped [`NodeKind::Block`].
        block: Box<Node>,
    },
    /// `if (guard) { body }`
    Condition {
        /// Must evaluate to a `bool`.
        guard: Box<Node>,
        /// Evaluated in a fresh scope when the guard holds.
        body:  Box<Node>,
    },
    /// `while (guard) { body }`
    While {
        /// Re-checked before every iteration.
        guard: Box<Node>,
        /// Loop body.
        body:  Box<Node>,
    },
    /// `for (init; guard; step) { body }`
    For {
        /// Evaluated once inside the loop scope.
        init:  Box<Node>,
        /// Re-checked before every iteration.
        guard: Box<Node>,
        /// Evaluated after every iteration.
        step:  Box<Node>,
        /// Loop body.
        body:  Box<Node>,
    },
    /// Comparison of two operands.
    Relation {
        /// The comparison.
        op:    RelationalOperator,
        /// Left operand.
        left:  Box<Node>,
        /// Right operand.
        right: Box<Node>,
    },
    /// Binary arithmetic.
    Operator {
        /// The operator.
        op:    ArithmeticOperator,
        /// Left operand.
        left:  Box<Node>,
        /// Right operand.
        right: Box<Node>,
    },
    /// `print(value)`
    Print {
        /// The printed statement.
        value: Box<Node>,
    },
    /// `name = value`, assignment to an existing variable.
    Assign {
        /// A [`NodeKind::NameVal`].
        name:  Box<Node>,
        /// The assigned statement.
        value: Box<Node>,
    },
    /// `name: type`, declaration without a value.
    TypeDeclare {
        /// A [`NodeKind::NameVal`].
        name:      Box<Node>,
        /// A [`NodeKind::TypeVal`].
        type_name: Box<Node>,
    },
    /// `name := value`, declaration with an inferred type.
    AssignWithType {
        /// A [`NodeKind::NameVal`].
        name:  Box<Node>,
        /// The initial value.
        value: Box<Node>,
    },
    /// `static_cast(value, type)`
    Cast {
        /// Converted statement.
        value:     Box<Node>,
        /// A [`NodeKind::TypeVal`].
        type_name: Box<Node>,
    },
    /// Parameter list of a function definition: `(name, type)` pairs of
    /// [`NodeKind::NameVal`] and [`NodeKind::TypeVal`].
    Args {
        /// Parameters in declaration order.
        params: Vec<(Node, Node)>,
    },
    /// Argument expressions of a call.
    ArgsVal {
        /// Arguments in call order.
        values: Vec<Node>,
    },
    /// `function name(params) = { body }`
    Function {
        /// A [`NodeKind::NameVal`].
        name:   Box<Node>,
        /// A [`NodeKind::Args`], absent for `function name()`.
        params: Option<Box<Node>>,
        /// The body [`NodeKind::Block`].
        body:   Box<Node>,
    },
    /// `name(args)` or `name()`.
    Call {
        /// A [`NodeKind::NameVal`].
        name: Box<Node>,
        /// A [`NodeKind::ArgsVal`], absent for `name()`.
        args: Option<Box<Node>>,
    },
    /// One of the built-in math functions applied to an expression.
    MathFunction {
        /// Which function.
        function: MathFunction,
        /// Its argument.
        argument: Box<Node>,
    },
    /// `# ...`, kept by the parser and removed by the optimizer.
    Comment {
        /// Text after the `#`.
        text: String,
    },
    /// Integer literal.
    IntVal(i64),
    /// Float literal.
    FloatVal(f64),
    /// String literal without its quotes.
    StringVal(String),
    /// Boolean literal.
    BoolVal(bool),
    /// A name in binding position (assignment target, function name, parameter).
    NameVal(String),
    /// A variable read.
    KeyVal(String),
    /// A type name.
    TypeVal(Type),
    /// The `PI` constant.
    Pi,
}

impl Node {
    /// Creates a node with a fresh id.
    pub fn new(ids: &mut NodeIdAllocator, line: usize, kind: NodeKind) -> Self {
        Self { id: ids.next_id(),
               line,
               kind }
    }

    /// Returns the name carried by a [`NodeKind::NameVal`] or
    /// [`NodeKind::KeyVal`].
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::NameVal(name) | NodeKind::KeyVal(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the name a declaration, assignment or function definition binds.
    ///
    /// # Example
    /// ```
    /// use slate::ast::{Node, NodeIdAllocator, NodeKind};
    ///
    /// let mut ids = NodeIdAllocator::default();
    /// let name = Node::new(&mut ids, 1, NodeKind::NameVal("x".into()));
    /// let value = Node::new(&mut ids, 1, NodeKind::IntVal(1));
    /// let node = Node::new(&mut ids,
    ///                      1,
    ///                      NodeKind::AssignWithType { name:  Box::new(name),
    ///                                                 value: Box::new(value), });
    ///
    /// assert_eq!(node.target(), Some("x"));
    /// ```
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Assign { name, .. }
            | NodeKind::TypeDeclare { name, .. }
            | NodeKind::AssignWithType { name, .. }
            | NodeKind::Function { name, .. } => name.name(),
            _ => None,
        }
    }

    /// Returns the statements of a [`NodeKind::Block`].
    #[must_use]
    pub fn statements(&self) -> Option<&[Node]> {
        match &self.kind {
            NodeKind::Block { statements } => Some(statements),
            _ => None,
        }
    }

    /// Whether this node is an int or float literal.
    #[must_use]
    pub const fn is_numeric_literal(&self) -> bool {
        matches!(self.kind, NodeKind::IntVal(_) | NodeKind::FloatVal(_))
    }

    /// Direct children in source order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match &self.kind {
            NodeKind::Program { block }
            | NodeKind::InstructionBlock { block }
            | NodeKind::Print { value: block } => vec![block.as_ref()],
            NodeKind::Block { statements } => statements.iter().collect(),
            NodeKind::Condition { guard, body } | NodeKind::While { guard, body } => {
                vec![guard.as_ref(), body.as_ref()]
            },
            NodeKind::For { init,
                            guard,
                            step,
                            body, } => vec![init.as_ref(), guard.as_ref(), step.as_ref(), body.as_ref()],
            NodeKind::Relation { left, right, .. } | NodeKind::Operator { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            },
            NodeKind::Assign { name, value } | NodeKind::AssignWithType { name, value } => {
                vec![name.as_ref(), value.as_ref()]
            },
            NodeKind::TypeDeclare { name, type_name } => vec![name.as_ref(), type_name.as_ref()],
            NodeKind::Cast { value, type_name } => vec![value.as_ref(), type_name.as_ref()],
            NodeKind::Args { params } => params.iter().flat_map(|(name, ty)| [name, ty]).collect(),
            NodeKind::ArgsVal { values } => values.iter().collect(),
            NodeKind::Function { name, params, body } => {
                let mut children = vec![name.as_ref()];
                children.extend(params.as_deref());
                children.push(body.as_ref());
                children
            },
            NodeKind::Call { name, args } => {
                let mut children = vec![name.as_ref()];
                children.extend(args.as_deref());
                children
            },
            NodeKind::MathFunction { argument, .. } => vec![argument.as_ref()],
            NodeKind::Comment { .. }
            | NodeKind::IntVal(_)
            | NodeKind::FloatVal(_)
            | NodeKind::StringVal(_)
            | NodeKind::BoolVal(_)
            | NodeKind::NameVal(_)
            | NodeKind::KeyVal(_)
            | NodeKind::TypeVal(_)
            | NodeKind::Pi => Vec::new(),
        }
    }

    /// Number of nodes in this subtree, the node itself included.
    #[must_use]
    pub fn size(&self) -> usize {
        1 + self.children().into_iter().map(Self::size).sum::<usize>()
    }
}
