use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::{Node, NodeIdAllocator, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{binary::parse_relational, block::parse_block},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// State shared by every parse function for one source text.
///
/// Holds the id allocator nodes are created with and the errors recorded
/// while recovering from syntax errors.
pub struct ParseState<'ids> {
    /// Allocator for node ids.
    pub ids:    &'ids mut NodeIdAllocator,
    /// Errors recorded so far.
    pub errors: Vec<ParseError>,
    /// Line of the last token, reported when the input ends early.
    end_line:   usize,
}

impl<'ids> ParseState<'ids> {
    /// Creates the state for a token stream whose last token is on `end_line`.
    pub const fn new(ids: &'ids mut NodeIdAllocator, end_line: usize) -> Self {
        Self { ids,
               errors: Vec::new(),
               end_line }
    }

    /// Creates a node with a fresh id.
    pub fn node(&mut self, line: usize, kind: NodeKind) -> Node {
        Node::new(self.ids, line, kind)
    }

    /// The error for running out of tokens.
    #[must_use]
    pub const fn end_of_input(&self) -> ParseError {
        ParseError::UnexpectedEndOfInput { line: self.end_line }
    }

    /// Records an error; a premature end of input is only recorded once.
    pub fn record(&mut self, error: ParseError) {
        if matches!(error, ParseError::UnexpectedEndOfInput { .. })
           && matches!(self.errors.last(), Some(ParseError::UnexpectedEndOfInput { .. }))
        {
            return;
        }
        debug!(%error, "syntax error");
        self.errors.push(error);
    }
}

/// Parses a whole token stream into a `Program` node.
///
/// Parsing never fails as a whole: the result always is one `Program`
/// wrapping one top-level `Block`, together with every syntax error that was
/// recovered from.
///
/// # Parameters
/// - `tokens`: The `(Token, line)` pairs produced by the lexer.
/// - `ids`: Allocator for node ids.
///
/// # Returns
/// The program and the recorded errors.
///
/// # Example
/// ```
/// use slate::{
///     ast::{NodeIdAllocator, NodeKind},
///     interpreter::{lexer::tokenize, parser::core::parse_program},
/// };
///
/// let (tokens, _) = tokenize("x := 1 print(x)");
/// let mut ids = NodeIdAllocator::default();
/// let (program, errors) = parse_program(&tokens, &mut ids);
///
/// assert!(errors.is_empty());
/// let NodeKind::Program { block } = &program.kind else { unreachable!() };
/// assert_eq!(block.statements().map(<[_]>::len), Some(2));
/// ```
pub fn parse_program(tokens: &[(Token, usize)],
                     ids: &mut NodeIdAllocator)
                     -> (Node, Vec<ParseError>) {
    let end_line = tokens.last().map_or(1, |(_, line)| *line);
    let mut state = ParseState::new(ids, end_line);
    let mut iter = tokens.iter().peekable();

    let block = parse_block(&mut iter, &mut state, false);
    let program = state.node(1, NodeKind::Program { block: Box::new(block) });

    debug!(tokens = tokens.len(),
           nodes = state.ids.allocated(),
           errors = state.errors.len(),
           "parsed program");

    (program, state.errors)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, relations, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := relational`
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_relational(tokens, state)
}
