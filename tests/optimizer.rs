use proptest::prelude::*;
use slate::{
    Interpreter, Options,
    ast::{Node, NodeIdAllocator, NodeKind},
    interpreter::{lexer::tokenize, optimizer::core::Optimizer, parser::core::parse_program},
};

fn optimized(src: &str, eliminate_dead_code: bool) -> Node {
    let mut ids = NodeIdAllocator::default();
    let (tokens, _) = tokenize(src);
    let (program, errors) = parse_program(&tokens, &mut ids);
    assert!(errors.is_empty(), "Unexpected syntax errors: {errors:?}");
    Optimizer::new(&mut ids, eliminate_dead_code).optimize(program)
}

fn top_level(program: &Node) -> &[Node] {
    program.children()[0].statements().expect("program block")
}

/// Names bound by the top-level statements, in order.
fn targets(program: &Node) -> Vec<&str> {
    top_level(program).iter().filter_map(Node::target).collect()
}

fn output_of(src: &str, optimize: bool) -> String {
    let options = Options { optimize,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run(src);
    String::from_utf8_lossy(&interpreter.into_output()).into_owned()
}

#[test]
fn unused_declarations_are_removed() {
    let program = optimized("x := 1\ny := 2\nz: int\nprint(y)", true);
    assert_eq!(targets(&program), vec!["y"]);
}

#[test]
fn declaration_used_in_a_nested_block_survives() {
    let program = optimized("x := 1\n{\n    {\n        print(x)\n    }\n}", true);
    assert_eq!(targets(&program), vec!["x"]);
}

fn block_of(statement: &Node) -> &[Node] {
    let NodeKind::InstructionBlock { block } = &statement.kind else {
        panic!("expected a block, got {:?}", statement.kind);
    };
    block.statements().expect("block")
}

#[test]
fn sibling_blocks_do_not_keep_each_other_alive() {
    let program = optimized("{ t := 1 }\n{ t := 2\n    print(t) }", true);
    let blocks = top_level(&program);

    assert!(block_of(&blocks[0]).is_empty());
    let second: Vec<_> = block_of(&blocks[1]).iter().filter_map(Node::target).collect();
    assert_eq!(second, vec!["t"]);
    assert_eq!(output_of("{ t := 1 }\n{ t := 2\n    print(t) }", true), "2\n");
}

#[test]
fn names_read_by_functions_stay_alive_everywhere() {
    let src = "function show() = { print(t) }\n{ t := 1\n    show() }";
    let program = optimized(src, true);

    let inner: Vec<_> = block_of(&top_level(&program)[1]).iter().filter_map(Node::target).collect();
    assert_eq!(inner, vec!["t"]);
    assert_eq!(output_of(src, true), output_of(src, false));
}

#[test]
fn removal_repeats_until_nothing_changes() {
    let program = optimized("a := 1\nb := a + 1\nc := b\nprint(2)", true);
    assert!(targets(&program).is_empty());
    assert_eq!(top_level(&program).len(), 1);
}

#[test]
fn functions_are_kept_only_when_called() {
    let program = optimized("function unused() = { 1 }\nfunction used() = { 2 }\nprint(used())", true);
    assert_eq!(targets(&program), vec!["used"]);
}

#[test]
fn values_with_calls_are_kept() {
    let program = optimized("function f() = { print(1) }\nx := f()\ny: int\ny = f()\nprint(2)", true);
    assert_eq!(targets(&program), vec!["f", "x", "y", "y"]);
}

#[test]
fn block_results_are_preserved() {
    let program = optimized("3\nx := 1", true);
    assert_eq!(top_level(&program).len(), 2);

    let program = optimized("print(3)\nx := 1", true);
    assert_eq!(top_level(&program).len(), 1);

    let program = optimized("function f() = { 5\n    t := 1\n}\nprint(f())", true);
    let NodeKind::Function { body, .. } = &top_level(&program)[0].kind else {
        panic!("expected a function");
    };
    assert_eq!(body.statements().map(<[_]>::len), Some(2));
}

#[test]
fn comments_are_removed() {
    let program = optimized("# first\nprint(1)\n# last", false);
    assert_eq!(top_level(&program).len(), 1);
}

#[test]
fn dead_code_elimination_can_be_disabled() {
    let program = optimized("x := 1\ny := 2\nprint(3)", false);
    assert_eq!(targets(&program), vec!["x", "y"]);
}

#[test]
fn identities_and_folding_compose() {
    let program = optimized("x := 2\nprint((0 + x) * (3 - 2))", true);
    let NodeKind::Print { value } = &top_level(&program)[1].kind else {
        panic!("expected a print");
    };
    assert_eq!(value.kind, NodeKind::KeyVal("x".into()));
}

#[test]
fn optimization_is_idempotent_on_examples() {
    let sources = ["x := 4\nprint(x * 2 + 0)",
                   "y := 2.0\nprint(y / 2.0)\nprint(y ^ 2)",
                   "function f(n: int) = { n ^ 1 }\nprint(f(3))\nunused := 1 + 2",
                   "for (i := 0; i < 3; i = i + 1) { t := i\n    print(i) }"];

    for src in sources {
        let mut ids = NodeIdAllocator::default();
        let (tokens, _) = tokenize(src);
        let (program, _) = parse_program(&tokens, &mut ids);

        let once = Optimizer::new(&mut ids, true).optimize(program);
        let twice = Optimizer::new(&mut ids, true).optimize(once.clone());
        assert_eq!(once, twice, "Second optimization changed:\n{src}");
    }
}

fn int_expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![Just("x".to_string()),
                           Just("y".to_string()),
                           (0i64..6).prop_map(|n| n.to_string()),];
    leaf.prop_recursive(4, 24, 2, |inner| {
            (inner.clone(), prop_oneof![Just("+"), Just("-"), Just("*"), Just("^")], inner)
                .prop_map(|(left, op, right)| format!("({left} {op} {right})"))
        })
}

proptest! {
    #[test]
    fn folding_integer_literals_is_exact(a in 0i64..1_000_000,
                                         b in 0i64..1_000_000,
                                         op in prop_oneof![Just('+'), Just('-'), Just('*')]) {
        let src = format!("{a} {op} {b}");
        let program = optimized(&src, true);

        let expected = match op {
            '+' => a + b,
            '-' => a - b,
            _ => a * b,
        };
        prop_assert_eq!(&top_level(&program)[0].kind, &NodeKind::IntVal(expected));

        let mut interpreter = Interpreter::new(Vec::new());
        let folded = interpreter.evaluate(&program);
        let unfolded = Interpreter::with_options(Vec::new(), Options { optimize: false, ..Options::default() }).run(&src);
        prop_assert_eq!(folded, unfolded);
    }

    #[test]
    fn optimization_preserves_output(expr in int_expression()) {
        let src = format!("x := 3\ny := 4\nprint({expr})");
        prop_assert_eq!(output_of(&src, true), output_of(&src, false));
    }

    #[test]
    fn optimization_is_idempotent(expr in int_expression()) {
        let src = format!("x := 3\ny := 4\nz := {expr}\nprint({expr})");
        let mut ids = NodeIdAllocator::default();
        let (tokens, _) = tokenize(&src);
        let (program, _) = parse_program(&tokens, &mut ids);

        let once = Optimizer::new(&mut ids, true).optimize(program);
        let twice = Optimizer::new(&mut ids, true).optimize(once.clone());
        prop_assert_eq!(once, twice);
    }
}
