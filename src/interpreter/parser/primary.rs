use std::iter::Peekable;

use crate::{
    ast::{Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, ParseState, parse_expression},
            statement::parse_statement,
            utils::{expect, expect_type, unexpected},
        },
    },
};

/// Parses a primary expression: the operands of every operator.
///
/// Supports:
/// - Literals (`1`, `2.5`, `"text"`, `true`) and `PI`.
/// - Variable references (`x`).
/// - Calls of user functions (`f()`, `f(a, b)`).
/// - Math functions (`sqrt(x)`).
/// - Casts (`static_cast(statement, type)`).
/// - Parenthesized expressions (`(a + b)`).
///
/// # Errors
/// - `UnexpectedToken` if the next token cannot start an expression. The token
///   is left in the stream.
/// - `UnexpectedEndOfInput` if the stream is exhausted.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.peek().copied() else {
        return Err(state.end_of_input());
    };
    let line = *line;

    let kind = match token {
        Token::Integer(value) => NodeKind::IntVal(*value),
        Token::Float(value) => NodeKind::FloatVal(*value),
        Token::Str(value) => NodeKind::StringVal(value.clone()),
        Token::Bool(value) => NodeKind::BoolVal(*value),
        Token::Pi => NodeKind::Pi,
        Token::Identifier(name) => {
            tokens.next();
            if matches!(tokens.peek(), Some((Token::LParen, _))) {
                return parse_call(tokens, state, name, line);
            }
            return Ok(state.node(line, NodeKind::KeyVal(name.clone())));
        },
        Token::MathFunction(function) => {
            tokens.next();
            expect(tokens, state, &Token::LParen)?;
            let argument = parse_expression(tokens, state)?;
            expect(tokens, state, &Token::RParen)?;
            return Ok(state.node(line,
                                 NodeKind::MathFunction { function: *function,
                                                          argument: Box::new(argument), }));
        },
        Token::StaticCast => {
            tokens.next();
            return parse_cast(tokens, state, line);
        },
        Token::LParen => {
            tokens.next();
            let inner = parse_expression(tokens, state)?;
            expect(tokens, state, &Token::RParen)?;
            return Ok(inner);
        },
        _ => return Err(unexpected(token, line)),
    };

    tokens.next();
    Ok(state.node(line, kind))
}

/// Parses the argument list of a call, positioned at `(`.
///
/// Grammar: `call := NAME "(" (expression ("," expression)*)? ")"`
fn parse_call<'a, I>(tokens: &mut Peekable<I>,
                     state: &mut ParseState,
                     name: &str,
                     line: usize)
                     -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let args_line = expect(tokens, state, &Token::LParen)?;
    let target = state.node(line, NodeKind::NameVal(name.to_string()));

    let args = if matches!(tokens.peek(), Some((Token::RParen, _))) {
        tokens.next();
        None
    } else {
        let mut values = vec![parse_expression(tokens, state)?];
        while matches!(tokens.peek(), Some((Token::Comma, _))) {
            tokens.next();
            values.push(parse_expression(tokens, state)?);
        }
        expect(tokens, state, &Token::RParen)?;
        Some(Box::new(state.node(args_line, NodeKind::ArgsVal { values })))
    };

    Ok(state.node(line,
                  NodeKind::Call { name: Box::new(target),
                                   args }))
}

/// Parses `(statement, type)` after `static_cast`.
fn parse_cast<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState, line: usize) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, state, &Token::LParen)?;
    let value = parse_statement(tokens, state)?;
    expect(tokens, state, &Token::Comma)?;
    let (ty, type_line) = expect_type(tokens, state)?;
    expect(tokens, state, &Token::RParen)?;

    let type_name = state.node(type_line, NodeKind::TypeVal(ty));
    Ok(state.node(line,
                  NodeKind::Cast { value:     Box::new(value),
                                   type_name: Box::new(type_name), }))
}
