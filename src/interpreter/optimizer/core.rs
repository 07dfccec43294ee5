use tracing::debug;

use crate::{
    ast::{Node, NodeIdAllocator, NodeKind},
    interpreter::optimizer::dead_code::eliminate_dead_code,
};

/// Rewrites a parsed program into an equivalent, smaller one.
///
/// New nodes created by a rewrite take fresh ids from the interpreter's
/// allocator. Nodes that are left alone keep their ids, so optimizing an
/// already optimized tree returns an identical tree.
///
/// # Example
/// ```
/// use slate::{
///     ast::{NodeIdAllocator, NodeKind},
///     interpreter::{lexer::tokenize, optimizer::core::Optimizer, parser::core::parse_program},
/// };
///
/// let mut ids = NodeIdAllocator::default();
/// let (tokens, _) = tokenize("print(2 * 3 + 1)");
/// let (program, _) = parse_program(&tokens, &mut ids);
///
/// let optimized = Optimizer::new(&mut ids, true).optimize(program);
///
/// let print = &optimized.children()[0].statements().unwrap()[0];
/// assert_eq!(print.children()[0].kind, NodeKind::IntVal(7));
/// ```
#[derive(Debug)]
pub struct Optimizer<'ids> {
    ids:                 &'ids mut NodeIdAllocator,
    eliminate_dead_code: bool,
}

impl<'ids> Optimizer<'ids> {
    /// Creates an optimizer drawing new node ids from `ids`.
    ///
    /// # Parameters
    /// - `ids`: The allocator the program was parsed with.
    /// - `eliminate_dead_code`: Whether unused bindings are removed. Turn
    ///   this off when later input may still read the names.
    pub const fn new(ids: &'ids mut NodeIdAllocator, eliminate_dead_code: bool) -> Self {
        Self { ids,
               eliminate_dead_code }
    }

    /// Optimizes a whole program.
    pub fn optimize(&mut self, program: Node) -> Node {
        let before = program.size();

        let mut program = self.rewrite(program);
        if self.eliminate_dead_code {
            program = eliminate_dead_code(program);
        }

        debug!(before, after = program.size(), "optimized program");
        program
    }

    /// Builds a new node with a fresh id.
    pub(super) fn node(&mut self, line: usize, kind: NodeKind) -> Node {
        Node::new(self.ids, line, kind)
    }
}

impl Node {
    /// Rebuilds this node with every direct child replaced by `f(child)`.
    ///
    /// The node keeps its id and line.
    pub(super) fn map_children(self, f: &mut impl FnMut(Self) -> Self) -> Self {
        let Self { id, line, kind } = self;

        let kind = match kind {
            NodeKind::Program { block } => NodeKind::Program { block: map_box(block, f) },
            NodeKind::Block { statements } => {
                NodeKind::Block { statements: statements.into_iter().map(|s| f(s)).collect() }
            },
            NodeKind::InstructionBlock { block } => {
                NodeKind::InstructionBlock { block: map_box(block, f) }
            },
            NodeKind::Condition { guard, body } => NodeKind::Condition { guard: map_box(guard, f),
                                                                         body:  map_box(body, f), },
            NodeKind::While { guard, body } => NodeKind::While { guard: map_box(guard, f),
                                                                 body:  map_box(body, f), },
            NodeKind::For { init,
                            guard,
                            step,
                            body, } => NodeKind::For { init:  map_box(init, f),
                                                       guard: map_box(guard, f),
                                                       step:  map_box(step, f),
                                                       body:  map_box(body, f), },
            NodeKind::Relation { op, left, right } => NodeKind::Relation { op,
                                                                           left: map_box(left, f),
                                                                           right: map_box(right, f) },
            NodeKind::Operator { op, left, right } => NodeKind::Operator { op,
                                                                           left: map_box(left, f),
                                                                           right: map_box(right, f) },
            NodeKind::Print { value } => NodeKind::Print { value: map_box(value, f) },
            NodeKind::Assign { name, value } => NodeKind::Assign { name:  map_box(name, f),
                                                                   value: map_box(value, f), },
            NodeKind::TypeDeclare { name, type_name } => {
                NodeKind::TypeDeclare { name:      map_box(name, f),
                                        type_name: map_box(type_name, f), }
            },
            NodeKind::AssignWithType { name, value } => {
                NodeKind::AssignWithType { name:  map_box(name, f),
                                           value: map_box(value, f), }
            },
            NodeKind::Cast { value, type_name } => NodeKind::Cast { value:     map_box(value, f),
                                                                    type_name: map_box(type_name, f), },
            NodeKind::Args { params } => {
                NodeKind::Args { params: params.into_iter().map(|(name, ty)| (f(name), f(ty))).collect() }
            },
            NodeKind::ArgsVal { values } => {
                NodeKind::ArgsVal { values: values.into_iter().map(|v| f(v)).collect() }
            },
            NodeKind::Function { name, params, body } => {
                NodeKind::Function { name:   map_box(name, f),
                                     params: params.map(|params| map_box(params, f)),
                                     body:   map_box(body, f), }
            },
            NodeKind::Call { name, args } => NodeKind::Call { name: map_box(name, f),
                                                              args: args.map(|args| map_box(args, f)), },
            NodeKind::MathFunction { function, argument } => {
                NodeKind::MathFunction { function,
                                         argument: map_box(argument, f) }
            },
            leaf @ (NodeKind::Comment { .. }
                    | NodeKind::IntVal(_)
                    | NodeKind::FloatVal(_)
                    | NodeKind::StringVal(_)
                    | NodeKind::BoolVal(_)
                    | NodeKind::NameVal(_)
                    | NodeKind::KeyVal(_)
                    | NodeKind::TypeVal(_)
                    | NodeKind::Pi) => leaf,
        };

        Self { id, line, kind }
    }
}

fn map_box(node: Box<Node>, f: &mut impl FnMut(Node) -> Node) -> Box<Node> {
    Box::new(f(*node))
}
