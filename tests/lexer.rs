use slate::{
    ast::{MathFunction, Type},
    error::{DeclarationError, ParseError},
    interpreter::lexer::{Token, tokenize},
};

fn tokens(src: &str) -> Vec<Token> {
    let (tokens, errors) = tokenize(src);
    assert!(errors.is_empty(), "Unexpected lex errors: {errors:?}");
    tokens.into_iter().map(|(token, _)| token).collect()
}

#[test]
fn literals() {
    assert_eq!(tokens("42 2.75 .5 \"hi there\" true false"),
               vec![Token::Integer(42),
                    Token::Float(2.75),
                    Token::Float(0.5),
                    Token::Str("hi there".into()),
                    Token::Bool(true),
                    Token::Bool(false),]);
}

#[test]
fn reserved_words_win_over_identifiers() {
    assert_eq!(tokens("if while for function print static_cast PI"),
               vec![Token::If,
                    Token::While,
                    Token::For,
                    Token::Function,
                    Token::Print,
                    Token::StaticCast,
                    Token::Pi,]);
    assert_eq!(tokens("int float string bool"),
               vec![Token::TypeName(Type::Int),
                    Token::TypeName(Type::Float),
                    Token::TypeName(Type::String),
                    Token::TypeName(Type::Bool),]);
    assert_eq!(tokens("sin cos exp sqrt log"),
               vec![Token::MathFunction(MathFunction::Sin),
                    Token::MathFunction(MathFunction::Cos),
                    Token::MathFunction(MathFunction::Exp),
                    Token::MathFunction(MathFunction::Sqrt),
                    Token::MathFunction(MathFunction::Log),]);
}

#[test]
fn longer_words_stay_identifiers() {
    assert_eq!(tokens("iffy printer integer _x1"),
               vec![Token::Identifier("iffy".into()),
                    Token::Identifier("printer".into()),
                    Token::Identifier("integer".into()),
                    Token::Identifier("_x1".into()),]);
}

#[test]
fn operators_and_punctuation() {
    assert_eq!(tokens(":= : = + - * / ^ ** ( ) ; { } ,"),
               vec![Token::ColonEquals,
                    Token::Colon,
                    Token::Equals,
                    Token::Plus,
                    Token::Minus,
                    Token::Star,
                    Token::Slash,
                    Token::Caret,
                    Token::Caret,
                    Token::LParen,
                    Token::RParen,
                    Token::Semicolon,
                    Token::LBrace,
                    Token::RBrace,
                    Token::Comma,]);
    assert_eq!(tokens("< > <= >= == !="),
               vec![Token::Less,
                    Token::Greater,
                    Token::LessEqual,
                    Token::GreaterEqual,
                    Token::EqualEqual,
                    Token::BangEqual,]);
}

#[test]
fn comments_are_kept() {
    assert_eq!(tokens("x # note\ny"),
               vec![Token::Identifier("x".into()),
                    Token::Comment(" note".into()),
                    Token::Identifier("y".into()),]);
}

#[test]
fn lines_are_counted() {
    let (tokens, _) = tokenize("a\nb\r\n\nc");
    let lines: Vec<_> = tokens.iter().map(|(_, line)| *line).collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn illegal_characters_are_skipped_one_at_a_time() {
    let (tokens, errors) = tokenize("a @\n$$ b");

    assert_eq!(tokens,
               vec![(Token::Identifier("a".into()), 1), (Token::Identifier("b".into()), 2)]);
    assert_eq!(errors,
               vec![ParseError::IllegalCharacter { character: '@', line: 1 },
                    ParseError::IllegalCharacter { character: '$', line: 2 },
                    ParseError::IllegalCharacter { character: '$', line: 2 },]);
}

#[test]
fn oversized_integers_are_skipped_whole() {
    let (tokens, errors) = tokenize("a 99999999999999999999 b\n9223372036854775807");

    assert_eq!(tokens,
               vec![(Token::Identifier("a".into()), 1),
                    (Token::Identifier("b".into()), 1),
                    (Token::Integer(i64::MAX), 2),]);
    assert_eq!(errors,
               vec![ParseError::IntegerOutOfRange { literal: "99999999999999999999".into(),
                                                    line:    1, }]);
}

#[test]
fn type_names_resolve_through_from_str() {
    assert_eq!(tokens("int float string bool"),
               vec![Token::TypeName(Type::Int),
                    Token::TypeName(Type::Float),
                    Token::TypeName(Type::String),
                    Token::TypeName(Type::Bool),]);
    assert_eq!("float".parse::<Type>(), Ok(Type::Float));
    assert_eq!("none".parse::<Type>(),
               Err(DeclarationError::InvalidType { type_name: "none".into() }));
}

#[test]
fn display_gives_the_lexeme() {
    let rendered: Vec<_> = tokens("x := 2.0 ** \"s\"").iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["x", ":=", "2.0", "^", "\"s\""]);
}
