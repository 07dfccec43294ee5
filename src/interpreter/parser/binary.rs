use std::iter::Peekable;

use crate::{
    ast::{ArithmeticOperator, Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, ParseState},
            primary::parse_primary,
            utils::{token_to_arithmetic_operator, token_to_relational_operator},
        },
    },
};

/// Parses relations, the lowest precedence level.
///
/// Handles left-associative operators: `<`, `>`, `<=`, `>=`, `==`, `!=`.
///
/// The rule is: `relational := additive (RELATION additive)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
/// - `state`: Parse state.
///
/// # Returns
/// A `Relation` tree, or the additive expression if no relation follows.
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_additive(tokens, state)?;
    while let Some((token, line)) = tokens.peek().copied()
          && let Some(op) = token_to_relational_operator(token)
    {
        tokens.next();
        let right = parse_additive(tokens, state)?;
        left = state.node(*line,
                          NodeKind::Relation { op,
                                               left: Box::new(left),
                                               right: Box::new(right) });
    }
    Ok(left)
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_multiplicative(tokens, state)?;
    loop {
        if let Some((token, line)) = tokens.peek().copied()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Add | ArithmeticOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens, state)?;
            left = operator(state, *line, op, left, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*` and `/`.
///
/// The rule is: `multiplicative := exponent (("*" | "/") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>,
                                   state: &mut ParseState)
                                   -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_exponent(tokens, state)?;
    loop {
        if let Some((token, line)) = tokens.peek().copied()
           && let Some(op) = token_to_arithmetic_operator(token)
           && matches!(op, ArithmeticOperator::Mul | ArithmeticOperator::Div)
        {
            tokens.next();
            let right = parse_exponent(tokens, state)?;
            left = operator(state, *line, op, left, right);
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ^ b ^ c` parses as
/// `a ^ (b ^ c)`, so the right operand recurses into this level again.
///
/// The rule is: `exponent := primary ("^" exponent)?`
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>, state: &mut ParseState) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens, state)?;
    if let Some((Token::Caret, line)) = tokens.peek().copied() {
        tokens.next();
        let exponent = parse_exponent(tokens, state)?;
        return Ok(operator(state, *line, ArithmeticOperator::Pow, base, exponent));
    }
    Ok(base)
}

fn operator(state: &mut ParseState,
            line: usize,
            op: ArithmeticOperator,
            left: Node,
            right: Node)
            -> Node {
    state.node(line,
               NodeKind::Operator { op,
                                    left: Box::new(left),
                                    right: Box::new(right) })
}
