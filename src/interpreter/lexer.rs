use std::fmt;

use logos::Logos;

use crate::{
    ast::{MathFunction, Type},
    error::ParseError,
};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
///
/// Keyword tokens are literal matches, which logos prefers over the
/// identifier regex for a match of equal length. `iffy` is therefore one
/// identifier and `if` is always the keyword.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Float literal tokens, such as `3.14` or `.5`.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    #[regex(r"\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// Boolean literal tokens, such as `true`.
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// `static_cast`
    #[token("static_cast")]
    StaticCast,
    /// `if`
    #[token("if")]
    If,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `function`
    #[token("function")]
    Function,
    /// `print`
    #[token("print")]
    Print,
    /// One of the type names `int`, `float`, `string` or `bool`.
    #[token("int", type_name)]
    #[token("float", type_name)]
    #[token("string", type_name)]
    #[token("bool", type_name)]
    TypeName(Type),
    /// One of the built-in math function names.
    #[token("sin", |_| MathFunction::Sin)]
    #[token("cos", |_| MathFunction::Cos)]
    #[token("exp", |_| MathFunction::Exp)]
    #[token("sqrt", |_| MathFunction::Sqrt)]
    #[token("log", |_| MathFunction::Log)]
    MathFunction(MathFunction),
    /// `PI`
    #[token("PI")]
    Pi,
    /// `# Comments.` The text after `#` is kept.
    #[regex(r"#[^\n\r]*", |lex| lex.slice()[1..].to_string(), allow_greedy = true)]
    Comment(String),
    /// String literal tokens, such as `"hello"`. Quotes are stripped.
    #[regex(r#""[^"\n]*""#, |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    }, allow_greedy = true)]
    Str(String),
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `:=`
    #[token(":=")]
    ColonEquals,
    /// `:`
    #[token(":")]
    Colon,
    /// `=`
    #[token("=")]
    Equals,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`, also written `**`.
    #[token("^")]
    #[token("**")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,

    /// Line breaks; only counted.
    #[regex(r"\r?\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces and tabs.
    #[regex(r"[ \t]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::StaticCast => write!(f, "static_cast"),
            Self::If => write!(f, "if"),
            Self::While => write!(f, "while"),
            Self::For => write!(f, "for"),
            Self::Function => write!(f, "function"),
            Self::Print => write!(f, "print"),
            Self::TypeName(ty) => write!(f, "{ty}"),
            Self::MathFunction(function) => write!(f, "{function}"),
            Self::Pi => write!(f, "PI"),
            Self::Comment(text) => write!(f, "#{text}"),
            Self::Str(text) => write!(f, "\"{text}\""),
            Self::Identifier(name) => write!(f, "{name}"),
            Self::ColonEquals => write!(f, ":="),
            Self::Colon => write!(f, ":"),
            Self::Equals => write!(f, "="),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Caret => write!(f, "^"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Semicolon => write!(f, ";"),
            Self::LBrace => write!(f, "{{"),
            Self::RBrace => write!(f, "}}"),
            Self::Comma => write!(f, ","),
            Self::EqualEqual => write!(f, "=="),
            Self::BangEqual => write!(f, "!="),
            Self::LessEqual => write!(f, "<="),
            Self::GreaterEqual => write!(f, ">="),
            Self::Less => write!(f, "<"),
            Self::Greater => write!(f, ">"),
            Self::NewLine => writeln!(f),
            Self::Ignored => write!(f, " "),
        }
    }
}

/// Splits `source` into tokens paired with their line numbers.
///
/// Lexing never fails as a whole. An illegal character is reported and
/// exactly that character is skipped before lexing resumes.
///
/// # Parameters
/// - `source`: The full source text.
///
/// # Returns
/// The tokens in source order and every lexical error encountered.
///
/// # Example
/// ```
/// use slate::interpreter::lexer::{Token, tokenize};
///
/// let (tokens, errors) = tokenize("x := 2 ** 3 $");
///
/// assert_eq!(tokens[0], (Token::Identifier("x".into()), 1));
/// assert_eq!(tokens[3], (Token::Caret, 1));
/// assert_eq!(errors.len(), 1);
/// ```
pub fn tokenize(source: &str) -> (Vec<(Token, usize)>, Vec<ParseError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut rest = source;
    let mut line = 1;

    'restart: loop {
        let mut lexer = Token::lexer_with_extras(rest, LexerExtras { line });

        while let Some(token) = lexer.next() {
            if let Ok(tok) = token {
                tokens.push((tok, lexer.extras.line));
                continue;
            }

            let slice = lexer.slice();
            if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
                errors.push(ParseError::IntegerOutOfRange { literal: slice.to_string(),
                                                            line:    lexer.extras.line, });
                continue;
            }

            let start = lexer.span().start;
            let Some(character) = rest[start..].chars().next() else {
                break 'restart;
            };
            line = lexer.extras.line;
            errors.push(ParseError::IllegalCharacter { character, line });
            rest = &rest[start + character.len_utf8()..];
            continue 'restart;
        }

        break;
    }

    (tokens, errors)
}

/// Parses a floating-point literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(f64)`: The parsed floating-point value if successful.
/// - `None`: If the token slice is not a valid float.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Resolves a type keyword through [`Type`]'s `FromStr`.
fn type_name(lex: &logos::Lexer<Token>) -> Option<Type> {
    lex.slice().parse().ok()
}

/// Parses an integer literal from the current token slice.
///
/// Literals that do not fit in an `i64` fail to lex; [`tokenize`] reports the
/// whole digit run as one `IntegerOutOfRange` error.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
