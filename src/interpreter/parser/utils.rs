use std::iter::Peekable;

use crate::{
    ast::{ArithmeticOperator, RelationalOperator, Type},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::core::{ParseResult, ParseState},
    },
};

/// Consumes the next token if it equals `expected`.
///
/// # Returns
/// The line of the consumed token.
///
/// # Errors
/// - `UnexpectedToken` if another token comes next; it is not consumed.
/// - `UnexpectedEndOfInput` if the stream is exhausted.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    state: &ParseState,
                                                    expected: &Token)
                                                    -> ParseResult<usize>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek().copied() {
        Some((token, line)) if token == expected => {
            tokens.next();
            Ok(*line)
        },
        Some((token, line)) => Err(unexpected(token, *line)),
        None => Err(state.end_of_input()),
    }
}

/// Consumes an identifier and returns its name and line.
pub(in crate::interpreter::parser) fn expect_identifier<'a, I>(tokens: &mut Peekable<I>,
                                                               state: &ParseState)
                                                               -> ParseResult<(String, usize)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek().copied() {
        Some((Token::Identifier(name), line)) => {
            tokens.next();
            Ok((name.clone(), *line))
        },
        Some((token, line)) => Err(unexpected(token, *line)),
        None => Err(state.end_of_input()),
    }
}

/// Consumes a type name.
pub(in crate::interpreter::parser) fn expect_type<'a, I>(tokens: &mut Peekable<I>,
                                                         state: &ParseState)
                                                         -> ParseResult<(Type, usize)>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek().copied() {
        Some((Token::TypeName(ty), line)) => {
            tokens.next();
            Ok((*ty, *line))
        },
        Some((token, line)) => Err(unexpected(token, *line)),
        None => Err(state.end_of_input()),
    }
}

/// Builds the error for a token that cannot start or continue the current
/// construct.
pub(in crate::interpreter::parser) fn unexpected(token: &Token, line: usize) -> ParseError {
    ParseError::UnexpectedToken { token: token.to_string(),
                                  line }
}

/// Maps a token to its arithmetic operator.
pub(in crate::interpreter::parser) const fn token_to_arithmetic_operator(
    token: &Token)
    -> Option<ArithmeticOperator> {
    match token {
        Token::Plus => Some(ArithmeticOperator::Add),
        Token::Minus => Some(ArithmeticOperator::Sub),
        Token::Star => Some(ArithmeticOperator::Mul),
        Token::Slash => Some(ArithmeticOperator::Div),
        Token::Caret => Some(ArithmeticOperator::Pow),
        _ => None,
    }
}

/// Maps a token to its relational operator.
pub(in crate::interpreter::parser) const fn token_to_relational_operator(
    token: &Token)
    -> Option<RelationalOperator> {
    match token {
        Token::Less => Some(RelationalOperator::Less),
        Token::Greater => Some(RelationalOperator::Greater),
        Token::LessEqual => Some(RelationalOperator::LessEqual),
        Token::GreaterEqual => Some(RelationalOperator::GreaterEqual),
        Token::EqualEqual => Some(RelationalOperator::Equal),
        Token::BangEqual => Some(RelationalOperator::NotEqual),
        _ => None,
    }
}
