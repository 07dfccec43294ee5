use std::iter::Peekable;

use crate::{
    ast::{Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, ParseState},
            statement::parse_statement,
            utils::expect,
        },
    },
};

/// Parses statements into a `Block` until the input ends or, when `nested`,
/// a `}` is reached.
///
/// This is where the parser recovers from syntax errors. A statement that
/// fails is recorded and dropped; if it did not consume any token, the
/// offending token is skipped so parsing always moves forward. A `}` is never
/// skipped inside a nested block because it closes that block. Semicolons
/// between statements are ignored.
///
/// Grammar: `block := (statement ";"?)*`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first statement.
/// - `state`: Parse state collecting the recovered errors.
/// - `nested`: Whether the block is enclosed in braces.
///
/// # Returns
/// A `Block` node holding the statements that parsed.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState, nested: bool) -> Node
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = tokens.peek().map_or(1, |(_, line)| *line);
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            None => break,
            Some((Token::RBrace, _)) if nested => break,
            Some((Token::Semicolon, _)) => {
                tokens.next();
                continue;
            },
            Some(_) => {},
        }

        // Tokens are borrowed from one slice, so an unchanged address means
        // nothing was consumed.
        let before = tokens.peek().copied().map(std::ptr::from_ref);
        match parse_statement(tokens, state) {
            Ok(statement) => statements.push(statement),
            Err(error) => {
                state.record(error);
                let closes_block = nested && matches!(tokens.peek(), Some((Token::RBrace, _)));
                let stalled = tokens.peek().copied().map(std::ptr::from_ref) == before;
                if stalled && !closes_block {
                    tokens.next();
                }
            },
        }
    }

    state.node(line, NodeKind::Block { statements })
}

/// Parses `{ block }` and returns the inner `Block`.
///
/// Grammar: `braced := "{" block "}"`
///
/// # Errors
/// - `UnexpectedToken` if the opening brace is missing.
/// - `UnexpectedEndOfInput` if the input ends before the closing brace.
pub fn parse_braced_block<'a, I>(tokens: &mut Peekable<I>,
                                 state: &mut ParseState)
                                 -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, state, &Token::LBrace)?;
    let block = parse_block(tokens, state, true);
    expect(tokens, state, &Token::RBrace)?;
    Ok(block)
}
