use std::collections::HashSet;

use slate::{
    ast::{ArithmeticOperator, Node, NodeIdAllocator, NodeKind, RelationalOperator, Type},
    error::ParseError,
    interpreter::{lexer::tokenize, parser::core::parse_program},
};

fn parse(src: &str) -> (Node, Vec<ParseError>) {
    let (tokens, lex_errors) = tokenize(src);
    assert!(lex_errors.is_empty(), "Unexpected lex errors: {lex_errors:?}");
    let mut ids = NodeIdAllocator::default();
    parse_program(&tokens, &mut ids)
}

fn statements(src: &str) -> Vec<Node> {
    let (program, errors) = parse(src);
    assert!(errors.is_empty(), "Unexpected syntax errors: {errors:?}");
    let NodeKind::Program { block } = program.kind else {
        panic!("root is not a program");
    };
    let NodeKind::Block { statements } = block.kind else {
        panic!("program does not wrap a block");
    };
    statements
}

fn expression(src: &str) -> Node {
    let mut statements = statements(src);
    assert_eq!(statements.len(), 1);
    statements.remove(0)
}

/// Writes an expression fully parenthesized.
fn shape(node: &Node) -> String {
    match &node.kind {
        NodeKind::Operator { op, left, right } => format!("({} {op} {})", shape(left), shape(right)),
        NodeKind::Relation { op, left, right } => format!("({} {op} {})", shape(left), shape(right)),
        NodeKind::IntVal(value) => value.to_string(),
        NodeKind::KeyVal(name) => name.clone(),
        other => format!("{other:?}"),
    }
}

#[test]
fn precedence() {
    assert_eq!(shape(&expression("1 + 2 * 3")), "(1 + (2 * 3))");
    assert_eq!(shape(&expression("1 * 2 + 3")), "((1 * 2) + 3)");
    assert_eq!(shape(&expression("2 * 3 ^ 2")), "(2 * (3 ^ 2))");
    assert_eq!(shape(&expression("a + 1 < b * 2")), "((a + 1) < (b * 2))");
    assert_eq!(shape(&expression("(1 + 2) * 3")), "((1 + 2) * 3)");
}

#[test]
fn associativity() {
    assert_eq!(shape(&expression("8 - 4 - 2")), "((8 - 4) - 2)");
    assert_eq!(shape(&expression("8 / 4 / 2")), "((8 / 4) / 2)");
    assert_eq!(shape(&expression("2 ^ 3 ^ 2")), "(2 ^ (3 ^ 2))");
    assert_eq!(shape(&expression("2 ** 3 ** 2")), "(2 ^ (3 ^ 2))");
    assert_eq!(shape(&expression("a < b == c")), "((a < b) == c)");
}

#[test]
fn statement_forms() {
    let kinds: Vec<_> = statements("x := 1; y: int; y = x; print(y); # done")
        .into_iter()
        .map(|node| node.kind)
        .collect();

    assert!(matches!(kinds[0], NodeKind::AssignWithType { .. }));
    assert!(matches!(kinds[1], NodeKind::TypeDeclare { .. }));
    assert!(matches!(kinds[2], NodeKind::Assign { .. }));
    assert!(matches!(kinds[3], NodeKind::Print { .. }));
    assert!(matches!(&kinds[4], NodeKind::Comment { text } if text == " done"));
}

#[test]
fn typed_declaration_children() {
    let node = expression("flag: bool");
    let NodeKind::TypeDeclare { name, type_name } = node.kind else {
        panic!("expected a declaration");
    };
    assert_eq!(name.kind, NodeKind::NameVal("flag".into()));
    assert_eq!(type_name.kind, NodeKind::TypeVal(Type::Bool));
}

#[test]
fn function_definitions() {
    let node = expression("function f(a: int, b: float) = { a }");
    let NodeKind::Function { name, params, body } = node.kind else {
        panic!("expected a function");
    };
    assert_eq!(name.kind, NodeKind::NameVal("f".into()));

    let Some(NodeKind::Args { params }) = params.map(|p| p.kind) else {
        panic!("expected parameters");
    };
    let params: Vec<_> = params.into_iter().map(|(name, ty)| (name.kind, ty.kind)).collect();
    assert_eq!(params,
               vec![(NodeKind::NameVal("a".into()), NodeKind::TypeVal(Type::Int)),
                    (NodeKind::NameVal("b".into()), NodeKind::TypeVal(Type::Float)),]);
    assert_eq!(body.statements().map(<[_]>::len), Some(1));

    let node = expression("function g() = { 1 }");
    assert!(matches!(node.kind, NodeKind::Function { params: None, .. }));
}

#[test]
fn calls() {
    assert!(matches!(expression("f()").kind, NodeKind::Call { args: None, .. }));

    let NodeKind::Call { args: Some(args), .. } = expression("f(1, x + 1)").kind else {
        panic!("expected a call with arguments");
    };
    assert!(matches!(&args.kind, NodeKind::ArgsVal { values } if values.len() == 2));
}

#[test]
fn control_flow() {
    assert!(matches!(expression("if (x > 1) { print(x) }").kind, NodeKind::Condition { .. }));
    assert!(matches!(expression("while (true) { }").kind, NodeKind::While { .. }));

    let NodeKind::For { init, guard, step, body } =
        expression("for (i := 0; i < 10; i = i + 1) { print(i) }").kind
    else {
        panic!("expected a for loop");
    };
    assert!(matches!(init.kind, NodeKind::AssignWithType { .. }));
    assert!(matches!(guard.kind, NodeKind::Relation { op: RelationalOperator::Less, .. }));
    assert!(matches!(step.kind, NodeKind::Assign { .. }));
    assert!(matches!(body.kind, NodeKind::Block { .. }));
}

#[test]
fn casts_and_math_functions() {
    let NodeKind::Cast { value, type_name } = expression("static_cast(2.5, int)").kind else {
        panic!("expected a cast");
    };
    assert_eq!(value.kind, NodeKind::FloatVal(2.5));
    assert_eq!(type_name.kind, NodeKind::TypeVal(Type::Int));

    assert!(matches!(expression("sqrt(x * 2)").kind,
                     NodeKind::MathFunction { argument, .. }
                         if matches!(argument.kind, NodeKind::Operator { op: ArithmeticOperator::Mul, .. })));
    assert_eq!(expression("PI").kind, NodeKind::Pi);
}

#[test]
fn nested_braces_nest_blocks() {
    let node = expression("{ { x := 1 } }");
    let NodeKind::InstructionBlock { block } = node.kind else {
        panic!("expected an instruction block");
    };
    let inner = &block.statements().expect("block")[0];
    assert!(matches!(inner.kind, NodeKind::InstructionBlock { .. }));
}

#[test]
fn empty_source_is_an_empty_program() {
    assert!(statements("").is_empty());
    assert!(statements(";;").is_empty());
}

#[test]
fn node_ids_are_unique() {
    let (program, _) = parse("function f(a: int) = { a * 2 }\nx := f(3)\nwhile (x > 0) { x = x - 1 }");

    let mut seen = HashSet::new();
    let mut stack = vec![&program];
    while let Some(node) = stack.pop() {
        assert!(seen.insert(node.id), "duplicate id {}", node.id);
        stack.extend(node.children());
    }
    assert_eq!(seen.len(), program.size());
}

#[test]
fn recovers_at_the_next_statement() {
    let (program, errors) = parse("x := 1\n)\nprint(x)");

    assert_eq!(errors,
               vec![ParseError::UnexpectedToken { token: ")".into(),
                                                  line:  2, }]);
    let NodeKind::Program { block } = program.kind else {
        panic!("root is not a program");
    };
    let kinds: Vec<_> = block.statements().expect("block").iter().map(|s| &s.kind).collect();
    assert!(matches!(kinds[..], [NodeKind::AssignWithType { .. }, NodeKind::Print { .. }]));
}

#[test]
fn stray_tokens_are_skipped_one_by_one() {
    let source = format!("{}\nprint(1)", ") ".repeat(2000));
    let (program, errors) = parse(&source);

    assert_eq!(errors.len(), 2000);
    assert!(errors.iter().all(|e| matches!(e, ParseError::UnexpectedToken { line: 1, .. })));
    let NodeKind::Program { block } = program.kind else {
        panic!("root is not a program");
    };
    assert!(matches!(block.statements().expect("block"), [Node { kind: NodeKind::Print { .. }, .. }]));
}

#[test]
fn closing_brace_is_not_skipped() {
    let (program, errors) = parse("{ x := }\nprint(1)");

    assert_eq!(errors.len(), 1);
    let NodeKind::Program { block } = program.kind else {
        panic!("root is not a program");
    };
    assert_eq!(block.statements().map(<[_]>::len), Some(2));
}

#[test]
fn premature_end_is_reported_once() {
    let (_, errors) = parse("if (true) {\n    print(1");
    assert_eq!(errors, vec![ParseError::UnexpectedEndOfInput { line: 2 }]);
}
