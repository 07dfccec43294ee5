use std::fs;

use slate::{
    Interpreter, Options, RunReport,
    error::{DeclarationError, Diagnostic, ParseError, RuntimeError},
    interpreter::value::core::Value,
    run_source,
};
use walkdir::WalkDir;

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "sl"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let report = run_source(&content);
        assert!(report.succeeded(),
                "Demo {:?} failed:\n{}\nDiagnostics: {:?}",
                path,
                content,
                report.diagnostics);
        assert!(!report.output.is_empty(), "Demo {path:?} printed nothing");
    }

    assert!(count > 0, "No demo scripts found in demos/");
}

fn assert_output(src: &str, expected: &str) {
    let report = run_source(src);
    assert!(report.succeeded(), "Script failed: {:?}", report.diagnostics);
    assert_eq!(report.output, expected, "Unexpected output for:\n{src}");
}

fn assert_failure(src: &str) -> RunReport {
    let report = run_source(src);
    assert!(!report.succeeded(), "Script succeeded but was expected to fail:\n{src}");
    report
}

fn runtime_errors(report: &RunReport) -> Vec<&RuntimeError> {
    report.diagnostics.iter().filter_map(Diagnostic::runtime).collect()
}

#[test]
fn declarations_and_arithmetic() {
    assert_output("x := 2; y := 3; print(x + y)", "5\n");
    assert_output("x := 7\ny := 9\nprint(x * y)", "63\n");
    assert_output("a := 8\nprint(a - 5)", "3\n");
    assert_output("a := 7\nprint(a / 2)", "3.5\n");
    assert_output("a := 7.0\nprint(a / 2.0)", "3.5\n");
    assert_output("print(2.5 * 2.0)", "5.0\n");
    assert_output("print(\"con\" + \"cat\")", "concat\n");
}

#[test]
fn integer_division_yields_a_float() {
    assert_output("print(7 / 2)", "3.5\n");
    assert_output("print(8 / 4)", "2.0\n");
    assert_output("n := 9\nprint(n / 3)", "3.0\n");
    assert_eq!(run_source("x := 5\nx / 1").value, Some(Value::Float(5.0)));

    let options = Options { optimize: false,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    assert_eq!(interpreter.run("7 / 2"), Some(Value::Float(3.5)));
}

#[test]
fn precedence_and_associativity() {
    assert_output("print(1 + 2 * 3)", "7\n");
    assert_output("print((1 + 2) * 3)", "9\n");
    assert_output("print(2 ^ 3 ^ 2)", "512\n");
    assert_output("print(2 ** 3)", "8\n");
    assert_output("print(10 - 4 - 3)", "3\n");
    assert_output("print(1 + 1 == 2)", "true\n");
}

#[test]
fn typed_declarations() {
    assert_output("x: int\nx = 4\nprint(x)", "4\n");
    assert_output("s: string\ns = \"hi\"\nprint(s)", "hi\n");
    assert_output("x: float\nprint(x)", "none\n");
}

#[test]
fn assignment_type_mismatch_continues() {
    let report = assert_failure("x: int\nx = \"a\"\nprint(x)\nprint(\"still running\")");

    assert_eq!(report.output, "none\nstill running\n");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::TypeMismatch { .. }]));
    assert_eq!(report.diagnostics[0].line(), 2);
}

#[test]
fn mismatch_is_reported_without_optimization() {
    let options = Options { optimize: false,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run("x: int\nx = \"a\"");

    assert!(matches!(interpreter.diagnostics(),
                     [Diagnostic::Runtime { error: RuntimeError::TypeMismatch { .. },
                                            line:  2, }]));
}

#[test]
fn bindings_without_a_value_are_reported() {
    let options = Options { optimize: false,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run("y: int\nx := y\nz: int\nz = y\nfunction f() = { t := 1 }\nw := f()");

    let errors: Vec<_> = interpreter.diagnostics()
                                    .iter()
                                    .map(|d| (d.line(), d.runtime().cloned()))
                                    .collect();
    assert!(matches!(&errors[..],
                     [(2, Some(RuntimeError::Declaration(DeclarationError::InvalidType { .. }))),
                      (4, Some(RuntimeError::TypeMismatch { .. })),
                      (6, Some(RuntimeError::Declaration(DeclarationError::InvalidType { .. })))]));
    assert!(interpreter.context().scopes.get("x").is_err());
    assert!(interpreter.context().scopes.get("w").is_err());
}

#[test]
fn failing_values_are_reported_once() {
    let options = Options { optimize: false,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run("x := missing\nprint(\"after\")");

    assert_eq!(String::from_utf8_lossy(interpreter.output()), "after\n");
    let errors: Vec<_> = interpreter.diagnostics().iter().filter_map(Diagnostic::runtime).collect();
    assert!(matches!(errors[..], [RuntimeError::UndeclaredName { .. }]));
}

#[test]
fn operand_type_mismatch() {
    let report = assert_failure("print(1 + 2.0)");
    assert_eq!(report.output, "none\n");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::TypeMismatch { .. }]));

    assert_failure("print(\"a\" - \"b\")");
    assert_failure("print(1 < \"b\")");
}

#[test]
fn division_by_zero() {
    let report = assert_failure("print(1 / 0)\nprint(2)");
    assert_eq!(report.output, "none\n2\n");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::Arithmetic { .. }]));
}

#[test]
fn redeclaration_keeps_the_first_binding() {
    let report = assert_failure("x := 1\nx := 2\nprint(x)");

    assert_eq!(report.output, "1\n");
    assert!(matches!(runtime_errors(&report)[0],
                     RuntimeError::Declaration(DeclarationError::AlreadyExists { .. })));
}

#[test]
fn reserved_words_are_case_insensitive() {
    let report = assert_failure("If := 1\nprint(If)");

    assert!(matches!(runtime_errors(&report)[0],
                     RuntimeError::Declaration(DeclarationError::KeywordOrTypeName { .. })));
}

#[test]
fn nested_blocks_read_but_do_not_write_enclosing_scopes() {
    let src = "{\n    y := 2\n    {\n        print(y)\n        y = 5\n    }\n}";
    let report = assert_failure(src);

    assert_eq!(report.output, "2\n");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::UndeclaredName { .. }]));
}

#[test]
fn globals_are_writable_from_nested_blocks() {
    assert_output("x := 1\n{\n    {\n        x = 2\n    }\n}\nprint(x)", "2\n");
}

#[test]
fn control_flow() {
    assert_output("if (1 < 2) { print(\"yes\") }", "yes\n");
    assert_output("if (1 > 2) { print(\"yes\") }\nprint(\"done\")", "done\n");
    assert_output("i := 0\nwhile (i < 3) {\n    print(i)\n    i = i + 1\n}", "0\n1\n2\n");
    assert_output("for (i := 0; i < 3; i = i + 1) { print(i) }", "0\n1\n2\n");
    assert_output("while (false) { print(1) }\nprint(2)", "2\n");
}

#[test]
fn guards_must_be_boolean() {
    let report = assert_failure("if (1) { print(\"no\") }");
    assert_eq!(report.output, "");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::TypeMismatch { .. }]));

    let report = assert_failure("while (\"x\") { print(\"no\") }\nprint(\"after\")");
    assert_eq!(report.output, "after\n");
}

#[test]
fn user_functions() {
    assert_output("function square(n: int) = { n * n }\nprint(square(4))", "16\n");
    assert_output("function add(a: int, b: int) = { a + b }\nprint(add(2, 3))", "5\n");
    assert_output("function seven() = { 7 }\nprint(seven())", "7\n");
    assert_output("function half(x: float) = { x / 2.0 }\nprint(half(3))", "1.5\n");
    assert_output("function countdown(n: int) = {\n    print(n)\n    if (n > 0) { countdown(n - 1) }\n}\ncountdown(2)",
                  "2\n1\n0\n");
}

#[test]
fn function_errors() {
    let report = assert_failure("function f(a: int) = { a }\nprint(f(1, 2))");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::ArityError { expected: 1, found: 2, .. }]));

    let report = assert_failure("print(g())");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::FunctionNotDefined { .. }]));

    let report = assert_failure("function f() = { 1 }\nfunction f() = { 2 }\nprint(f())");
    assert_eq!(report.output, "1\n");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::Redefinition { .. }]));

    let report = assert_failure("x := 1\nfunction x() = { 2 }\nprint(x)");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::Redefinition { .. }]));

    let report = assert_failure("function f(a: int) = { a }\nprint(f(\"one\"))");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::TypeMismatch { .. }]));
}

#[test]
fn call_scope_is_popped_after_errors() {
    let mut interpreter = Interpreter::new(Vec::new());
    interpreter.run("function f(a: int) = { a + \"s\" }\nf(1)\nf(2)");

    assert_eq!(interpreter.context().scopes.depth(), 1);
    assert_eq!(interpreter.diagnostics().len(), 2);
}

#[test]
fn recursion_is_bounded() {
    let options = Options { max_call_depth: 16,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run("function forever(n: int) = { forever(n + 1) }\nforever(0)");

    let errors: Vec<_> = interpreter.diagnostics().iter().filter_map(Diagnostic::runtime).collect();
    assert!(matches!(errors[..], [RuntimeError::RecursionLimit { limit: 16, .. }]));
    assert_eq!(interpreter.context().scopes.depth(), 1);
}

#[test]
fn casts_and_math() {
    assert_output("print(static_cast(3.7, int))", "3\n");
    assert_output("print(static_cast(3, float))", "3.0\n");
    assert_output("print(static_cast(\" 42 \", int))", "42\n");
    assert_output("print(static_cast(0, bool))", "false\n");
    assert_output("print(static_cast(2.5, string) + \"!\")", "2.5!\n");
    assert_output("print(sqrt(16))", "4.0\n");
    assert_output("print(sqrt(2))", "1.41421\n");
    assert_output("print(sin(PI))", "0.0\n");
    assert_output("print(log(1))", "0.0\n");

    let report = assert_failure("print(sqrt(0 - 1))");
    assert!(matches!(runtime_errors(&report)[..], [RuntimeError::Arithmetic { .. }]));
    assert_failure("print(static_cast(\"abc\", int))");
}

#[test]
fn comments_do_not_change_results() {
    assert_output("# a comment\nprint(1) # trailing", "1\n");
    assert_eq!(run_source("1 + 1\n# done").value, Some(Value::Integer(2)));
}

#[test]
fn last_statement_is_the_result() {
    assert_eq!(run_source("x := 4\nx * 2").value, Some(Value::Integer(8)));
    assert_eq!(run_source("x := 4").value, None);
    assert_eq!(run_source("").value, None);
}

#[test]
fn syntax_errors_are_recovered() {
    let report = assert_failure("x := )\nprint(2)");
    assert_eq!(report.output, "2\n");
    assert!(matches!(report.diagnostics[0], Diagnostic::Parse(ParseError::UnexpectedToken { line: 1, .. })));

    let report = assert_failure("print(1");
    assert!(matches!(report.diagnostics[..], [Diagnostic::Parse(ParseError::UnexpectedEndOfInput { .. })]));
}

#[test]
fn illegal_characters_are_skipped() {
    let report = assert_failure("x := 1 $\nprint(x)");

    assert_eq!(report.output, "1\n");
    assert!(matches!(report.diagnostics[..],
                     [Diagnostic::Parse(ParseError::IllegalCharacter { character: '$', line: 1 })]));
}

#[test]
fn oversized_integer_literals_are_reported_once() {
    let report = assert_failure("print(1)\n99999999999999999999\nprint(2)");

    assert_eq!(report.output, "1\n2\n");
    assert!(matches!(&report.diagnostics[..],
                     [Diagnostic::Parse(ParseError::IntegerOutOfRange { line: 2, .. })]));
    assert_eq!(report.diagnostics[0].to_string(),
               "Error on line 2: Integer literal 99999999999999999999 is out of range.");
}

#[test]
fn diagnostics_use_line_format() {
    let report = assert_failure("\n\nprint(missing)");
    assert_eq!(report.diagnostics[0].to_string(),
               "Error on line 3: Undeclared name 'missing'.");
}

#[test]
fn state_persists_between_runs() {
    let options = Options { eliminate_dead_code: false,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run("x := 20");
    interpreter.run("function double(n: int) = { n * 2 }");
    interpreter.run("print(double(x + 1))");

    assert!(interpreter.diagnostics().is_empty());
    assert_eq!(String::from_utf8_lossy(interpreter.output()), "42\n");
}

#[test]
fn echoed_diagnostics_go_to_output() {
    let options = Options { echo_diagnostics: true,
                            ..Options::default() };
    let mut interpreter = Interpreter::with_options(Vec::new(), options);
    interpreter.run("print(nope)");

    assert_eq!(String::from_utf8_lossy(interpreter.output()),
               "Error on line 1: Undeclared name 'nope'.\nnone\n");
}
