use std::iter::Peekable;

use crate::{
    ast::{Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{
            block::{parse_block, parse_braced_block},
            core::{ParseResult, ParseState, parse_expression},
            utils::{expect, expect_identifier, expect_type},
        },
    },
};

/// Parses a single statement.
///
/// Statements are recognized by their first token:
/// - `{ block }`: an instruction block with its own scope.
/// - `# ...`: a comment.
/// - `print(statement)`.
/// - `if (statement) { block }` and `while (statement) { block }`.
/// - `for (statement; statement; statement) { block }`.
/// - `function name(params) = { block }`.
/// - `name = statement`, `name := statement` and `name: type`, told apart by
///   the token after the name.
///
/// Anything else is parsed as an expression.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the start of the statement.
/// - `state`: Parse state.
///
/// # Returns
/// The parsed statement node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(state.end_of_input());
    };
    let line = *line;

    match token {
        Token::LBrace => {
            tokens.next();
            let block = parse_block(tokens, state, true);
            expect(tokens, state, &Token::RBrace)?;
            Ok(state.node(line, NodeKind::InstructionBlock { block: Box::new(block) }))
        },
        Token::Comment(text) => {
            tokens.next();
            Ok(state.node(line, NodeKind::Comment { text: text.clone() }))
        },
        Token::Print => {
            tokens.next();
            let value = parse_parenthesized(tokens, state)?;
            Ok(state.node(line, NodeKind::Print { value: Box::new(value) }))
        },
        Token::If => {
            tokens.next();
            let (guard, body) = parse_guarded_body(tokens, state)?;
            Ok(state.node(line,
                          NodeKind::Condition { guard: Box::new(guard),
                                                body:  Box::new(body), }))
        },
        Token::While => {
            tokens.next();
            let (guard, body) = parse_guarded_body(tokens, state)?;
            Ok(state.node(line,
                          NodeKind::While { guard: Box::new(guard),
                                            body:  Box::new(body), }))
        },
        Token::For => {
            tokens.next();
            parse_for(tokens, state, line)
        },
        Token::Function => {
            tokens.next();
            parse_function(tokens, state, line)
        },
        Token::Identifier(name) => {
            let mut lookahead = tokens.clone();
            lookahead.next();
            match lookahead.peek() {
                Some((Token::Equals, _)) => {
                    tokens.next();
                    tokens.next();
                    let target = state.node(line, NodeKind::NameVal(name.clone()));
                    let value = parse_statement(tokens, state)?;
                    Ok(state.node(line,
                                  NodeKind::Assign { name:  Box::new(target),
                                                     value: Box::new(value), }))
                },
                Some((Token::ColonEquals, _)) => {
                    tokens.next();
                    tokens.next();
                    let target = state.node(line, NodeKind::NameVal(name.clone()));
                    let value = parse_statement(tokens, state)?;
                    Ok(state.node(line,
                                  NodeKind::AssignWithType { name:  Box::new(target),
                                                             value: Box::new(value), }))
                },
                Some((Token::Colon, _)) => {
                    let (target, type_name) = parse_typed_name(tokens, state)?;
                    Ok(state.node(line,
                                  NodeKind::TypeDeclare { name:      Box::new(target),
                                                          type_name: Box::new(type_name), }))
                },
                _ => parse_expression(tokens, state),
            }
        },
        _ => parse_expression(tokens, state),
    }
}

/// Parses `( statement )`.
pub(in crate::interpreter::parser) fn parse_parenthesized<'a, I>(tokens: &mut Peekable<I>,
                                                                 state: &mut ParseState)
                                                                 -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, state, &Token::LParen)?;
    let inner = parse_statement(tokens, state)?;
    expect(tokens, state, &Token::RParen)?;
    Ok(inner)
}

/// Parses the `(guard) { body }` tail shared by `if` and `while`.
fn parse_guarded_body<'a, I>(tokens: &mut Peekable<I>,
                             state: &mut ParseState)
                             -> ParseResult<(Node, Node)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let guard = parse_parenthesized(tokens, state)?;
    let body = parse_braced_block(tokens, state)?;
    Ok((guard, body))
}

/// Parses `(init; guard; step) { body }` after the `for` keyword.
fn parse_for<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, state, &Token::LParen)?;
    let init = parse_statement(tokens, state)?;
    expect(tokens, state, &Token::Semicolon)?;
    let guard = parse_statement(tokens, state)?;
    expect(tokens, state, &Token::Semicolon)?;
    let step = parse_statement(tokens, state)?;
    expect(tokens, state, &Token::RParen)?;
    let body = parse_braced_block(tokens, state)?;

    Ok(state.node(line,
                  NodeKind::For { init:  Box::new(init),
                                  guard: Box::new(guard),
                                  step:  Box::new(step),
                                  body:  Box::new(body), }))
}

/// Parses `name(params) = { body }` after the `function` keyword.
///
/// Grammar:
/// ```text
///     function := "function" NAME "(" (param ("," param)*)? ")" "=" "{" block "}"
///     param    := NAME ":" TYPE
/// ```
/// An empty parameter list leaves the `params` child absent.
fn parse_function<'a, I>(tokens: &mut Peekable<I>,
                         state: &mut ParseState,
                         line: usize)
                         -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, name_line) = expect_identifier(tokens, state)?;
    let name = state.node(name_line, NodeKind::NameVal(name));

    let params_line = expect(tokens, state, &Token::LParen)?;
    let params = if matches!(tokens.peek(), Some((Token::RParen, _))) {
        tokens.next();
        None
    } else {
        let mut params = vec![parse_typed_name(tokens, state)?];
        loop {
            match tokens.peek() {
                Some((Token::Comma, _)) => {
                    tokens.next();
                    params.push(parse_typed_name(tokens, state)?);
                },
                _ => {
                    expect(tokens, state, &Token::RParen)?;
                    break;
                },
            }
        }
        Some(Box::new(state.node(params_line, NodeKind::Args { params })))
    };

    expect(tokens, state, &Token::Equals)?;
    let body = parse_braced_block(tokens, state)?;

    Ok(state.node(line,
                  NodeKind::Function { name: Box::new(name),
                                       params,
                                       body: Box::new(body) }))
}

/// Parses `name: type` into a `NameVal` and a `TypeVal` node.
fn parse_typed_name<'a, I>(tokens: &mut Peekable<I>,
                           state: &mut ParseState)
                           -> ParseResult<(Node, Node)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = expect_identifier(tokens, state)?;
    expect(tokens, state, &Token::Colon)?;
    let (ty, type_line) = expect_type(tokens, state)?;

    Ok((state.node(line, NodeKind::NameVal(name)), state.node(type_line, NodeKind::TypeVal(ty))))
}
