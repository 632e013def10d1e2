use std::{
    cell::RefCell,
    fs,
    io::{self, Cursor, Write},
    rc::Rc,
};

use pretty_assertions::assert_eq;
use tern::{
    Error,
    error::RuntimeError,
    get_result,
    interpreter::evaluator::core::{Config, Interpreter},
    run,
};
use walkdir::WalkDir;

/// An output sink the test keeps a handle to after the interpreter takes
/// ownership of its clone.
#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

fn interpreter_with(config: Config, input: &str) -> (Interpreter, SharedBuffer) {
    let output = SharedBuffer::default();
    let interpreter = Interpreter::with_io(config,
                                           Box::new(output.clone()),
                                           Box::new(Cursor::new(input.as_bytes().to_vec())));
    (interpreter, output)
}

fn run_capturing(src: &str, input: &str) -> (Result<(), Error>, String) {
    let (mut interpreter, output) = interpreter_with(Config::default(), input);
    let result = run(src, &mut interpreter);
    (result, output.contents())
}

fn assert_output(src: &str, expected: &[&str]) {
    let (result, output) = run_capturing(src, "");
    if let Err(e) = result {
        panic!("Script failed: {e}\n{src}");
    }
    assert_eq!(output.lines().collect::<Vec<_>>(), expected);
}

fn runtime_error(src: &str) -> (RuntimeError, String) {
    match run_capturing(src, "") {
        (Err(Error::Runtime(error)), output) => (error, output),
        (other, _) => panic!("expected a runtime error, got {other:?}"),
    }
}

fn syntax_errors(src: &str) -> Vec<String> {
    match run_capturing(src, "") {
        (Err(Error::Syntax(errors)), output) => {
            assert_eq!(output, "", "nothing may run after a syntax error");
            errors.iter().map(ToString::to_string).collect()
        },
        (other, _) => panic!("expected syntax errors, got {other:?}"),
    }
}

#[test]
fn example_scripts_match_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "tern"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("expected");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });

        count += 1;
        let (result, output) = run_capturing(&source, "");
        if let Err(e) = result {
            panic!("Script {path:?} failed:\n{source}\nError: {e}");
        }
        assert_eq!(output, expected, "output of {path:?}");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

#[test]
fn get_result_reports_failures() {
    assert!(get_result("var a = 1; a = a + 1;", false).is_ok());
    assert!(matches!(get_result("print missing;", false), Err(Error::Runtime(_))));
    assert!(matches!(get_result("var;", false), Err(Error::Syntax(_))));
}

#[test]
fn arithmetic_follows_doubles() {
    assert_output("print 1 + 2; print 7 / 2; print 7 % 3; print 2 - 5; print 1.5 * 4;",
                  &["3", "3.5", "1", "-3", "6"]);
    assert_output("print 0.1 + 0.2;", &["0.30000000000000004"]);
}

#[test]
fn division_by_zero_is_nil() {
    assert_output("print 1 / 0; print -3 / 0; print 0 / 0;", &["nil", "nil", "nil"]);
    assert_output("var x = 1 / 0; print x == nil;", &["true"]);
}

#[test]
fn compound_division_by_zero_is_infinite() {
    assert_output("var x = 1; x /= 0; print x;", &["Infinity"]);
}

#[test]
fn power_precedence_and_associativity() {
    assert_output("print 2 ** 3 ** 2; print 2 * 3 ** 2; print -2 ** 2;",
                  &["64", "18", "4"]);
}

#[test]
fn block_shadowing_does_not_leak() {
    assert_output("var a = 1; { var a = 2; print a; } print a;", &["2", "1"]);
    assert_output("var a = 1; { a = 2; } print a;", &["2"]);
}

#[test]
fn redeclaration_shadows_silently() {
    assert_output("var a = 1; var a = \"one\"; print a;", &["one"]);
}

#[test]
fn closures_capture_by_reference() {
    assert_output("fun makeCounter() { var i = 0; fun inc() { i = i + 1; return i; } return inc; }
                   var c = makeCounter(); print c(); print c();",
                  &["1", "2"]);
}

#[test]
fn closures_share_their_defining_frame() {
    assert_output("var get; var set;
                   fun pair() {
                       var secret = 1;
                       fun g() { return secret; }
                       fun s(v) { secret = v; }
                       get = g; set = s;
                   }
                   pair(); set(42); print get();",
                  &["42"]);
}

#[test]
fn functions_see_their_defining_scope_not_the_callers() {
    assert_output("var x = \"global\";
                   fun show() { print x; }
                   { var x = \"local\"; show(); }",
                  &["global"]);
}

#[test]
fn for_loop_matches_its_while_form() {
    let (for_result, for_output) = run_capturing("for (var i = 0; i < 4; i++) print i * i;", "");
    let (while_result, while_output) =
        run_capturing("{ var i = 0; while (i < 4) { print i * i; i++; } }", "");

    assert!(for_result.is_ok() && while_result.is_ok());
    assert_eq!(for_output, while_output);
    assert_eq!(for_output, "0\n1\n4\n9\n");
}

#[test]
fn for_loop_variable_is_scoped_to_the_loop() {
    let (error, output) = runtime_error("for (var i = 0; i < 2; i = i + 1) {} print i;");
    assert_eq!(output, "");
    assert!(matches!(error, RuntimeError::UndefinedVariable { ref name, .. } if name == "i"));
}

#[test]
fn for_loop_without_condition_runs_until_return() {
    assert_output("fun firstOver(n) { for (var i = 0;; i++) { if (i * i > n) return i; } }
                   print firstOver(50);",
                  &["8"]);
}

#[test]
fn do_while_runs_at_least_once() {
    assert_output("var n = 10; do { print n; n++; } while (n < 3);", &["10"]);
    assert_output("var n = 0; do n++; while (n < 3); print n;", &["3"]);
}

#[test]
fn if_else_uses_truthiness() {
    assert_output("if (0) print \"zero\"; else print \"falsy\";
                   if (\"\") print \"empty text is truthy\";
                   if (nil) print \"nil\"; else print \"nil is falsy\";",
                  &["falsy", "empty text is truthy", "nil is falsy"]);
}

#[test]
fn postfix_increment_and_decrement() {
    assert_output("var x = 5; x++; print x;", &["6"]);
    assert_output("var x = 5; x--; x--; print x;", &["3"]);
    assert_output("var x = 2; x += 3; x *= 4; x -= 1; print x;", &["19"]);
}

#[test]
fn compound_assignment_returns_new_value() {
    assert_output("var x = 1; print x += 2; print x;", &["3", "3"]);
}

#[test]
fn compound_assignment_type_error_keeps_old_value() {
    let (mut interpreter, output) = interpreter_with(Config::default(), "");

    let error = run("var s = \"a\"; s += 1;", &mut interpreter).unwrap_err();
    assert!(matches!(error, Error::Runtime(RuntimeError::TypeMismatch { line: 1, .. })));

    run("print s;", &mut interpreter).unwrap();
    assert_eq!(output.contents(), "a\n");
}

#[test]
fn ternary_dispatches_statements() {
    assert_output("true ? print \"yes\" : print \"no\";", &["yes"]);
    assert_output("false ? print \"yes\" : print \"no\";", &["no"]);
    assert_output("var x = 0; 1 > 2 ? x = 1 : x = 2; print x;", &["2"]);
    assert_output("var x = 0; x == 0 ? print \"zero\" : x = 5; print x;", &["zero", "0"]);
}

#[test]
fn calls_and_returns() {
    assert_output("fun add(a, b) { return a + b; } print add(2, 3);", &["5"]);
    assert_output("fun nothing() {} print nothing();", &["nil"]);
    assert_output("fun early() { return; print \"unreachable\"; } print early();", &["nil"]);
}

#[test]
fn return_unwinds_nested_loops_and_blocks() {
    assert_output("fun find() {
                       var i = 0;
                       while (true) {
                           { i++; if (i == 3) { return i * 10; } }
                       }
                   }
                   print find(); print \"after\";",
                  &["30", "after"]);
}

#[test]
fn recursion() {
    assert_output("fun fib(n) { if (n < 2) return n; return fib(n - 1) + fib(n - 2); }
                   print fib(15);",
                  &["610"]);
}

#[test]
fn arity_mismatch_never_runs_the_body() {
    for call in ["f(1);", "f(1, 2, 3);"] {
        let src = format!("fun f(a, b) {{ print \"ran\"; }} {call}");
        let (error, output) = runtime_error(&src);
        assert_eq!(output, "");
        assert!(matches!(error, RuntimeError::ArityMismatch { expected: 2, .. }),
                "{error:?}");
    }
}

#[test]
fn arity_mismatch_message() {
    let (error, _) = runtime_error("fun f(a) {}\nf();");
    assert_eq!(error.to_string(), "Error on line 2: Expected 1 arguments but got 0.");
}

#[test]
fn calling_a_non_function_fails() {
    let (error, _) = runtime_error("var s = \"text\"; s();");
    assert!(matches!(error, RuntimeError::NotCallable { line: 1 }));
}

#[test]
fn callee_and_arguments_are_evaluated_before_the_check() {
    let (error, output) = runtime_error("fun noisy() { print \"arg\"; return 1; } nil(noisy());");
    assert_eq!(output, "arg\n");
    assert!(matches!(error, RuntimeError::NotCallable { .. }));
}

#[test]
fn undefined_variables() {
    let (error, _) = runtime_error("print x;");
    assert_eq!(error.to_string(), "Error on line 1: Undefined variable 'x'.");

    let (error, _) = runtime_error("\n\ny = 1;");
    assert!(matches!(error, RuntimeError::UndefinedVariable { line: 3, .. }));
}

#[test]
fn runtime_error_stops_the_run() {
    let (error, output) = runtime_error("print 1; print -\"a\"; print 2;");
    assert_eq!(output, "1\n");
    assert_eq!(error.to_string(), "Error on line 1: Operand must be a number.");
}

#[test]
fn operator_type_errors() {
    let cases = [("print 1 + \"a\";", "Operands must be two numbers or two strings."),
                 ("print 1 < \"a\";", "Operands must be numbers."),
                 ("print true * 2;", "Operands must be numbers."),
                 ("print nil ** 2;", "Operands must be numbers.")];

    for (src, message) in cases {
        let (error, _) = runtime_error(src);
        assert_eq!(error.to_string(), format!("Error on line 1: {message}"), "{src}");
    }
}

#[test]
fn string_operators() {
    assert_output("print \"a\" + \"b\";", &["ab"]);
    assert_output("print 1 +. 2; print \"n=\" +. 3.0; print \"v: \" +. nil +. true;",
                  &["12", "n=3", "v: niltrue"]);
}

#[test]
fn equality_is_by_value_and_type() {
    assert_output("print 1 == 1; print 1 == \"1\"; print nil == nil; print nil == false;
                   print \"a\" == \"a\"; print 1 != 2;",
                  &["true", "false", "true", "false", "true", "true"]);
}

#[test]
fn numbers_compare_structurally() {
    assert_output("var n = -1 ** 0.5; print n; print n == n; print n != -4 ** 0.5;
                   print 0 == -0; print -0 == -0; print 0 < -0 or 0 > -0;",
                  &["NaN", "true", "false", "false", "true", "false"]);
}

#[test]
fn functions_compare_by_identity() {
    assert_output("fun f() {} var g = f; print f == g;
                   fun make() { fun inner() {} return inner; }
                   print make() == make();",
                  &["true", "false"]);
}

#[test]
fn logical_operators_return_the_deciding_operand() {
    assert_output("print nil or \"default\"; print 0 and \"skipped\"; print 1 and 2; print false or nil;",
                  &["default", "0", "2", "nil"]);
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("fun side() { print \"evaluated\"; return true; }
                   print true or side(); print false and side();",
                  &["true", "false"]);
}

#[test]
fn values_display_canonically() {
    assert_output("fun f() {} print f; print time; print 3.0; print 3.5; print -0.5; print true;",
                  &["<fn f>", "<native fn>", "3", "3.5", "-0.5", "true"]);
}

#[test]
fn conversion_natives() {
    assert_output("print string(3.0); print string(3.5); print number(\"42\") + 1;
                   print number(\"nope\"); print bool(\"TRUE\"); print bool(\"1\");",
                  &["3", "3.5", "43", "nil", "true", "false"]);
}

#[test]
fn type_native() {
    assert_output("fun f() {}
                   print type(1); print type(false); print type(\"s\"); print type(nil);
                   print type(f); print type(time);",
                  &["Number", "Bool", "String", "String", "<fn f>", "<native fn>"]);
}

#[test]
fn input_reads_injected_lines() {
    let (mut interpreter, output) = interpreter_with(Config::default(), "Ada\r\nLovelace\n");
    run("print \"hi \" + input(); print input(); print input();",
        &mut interpreter).unwrap();
    assert_eq!(output.contents(), "hi Ada\nLovelace\nnil\n");
}

#[test]
fn echo_mode_prints_expression_statements() {
    let (mut interpreter, output) = interpreter_with(Config::interactive(), "");
    run("1 + 2; var x = 4; x; print \"p\";", &mut interpreter).unwrap();
    assert_eq!(output.contents(), "3\n4\np\n");
}

#[test]
fn globals_persist_between_runs() {
    let (mut interpreter, output) = interpreter_with(Config::default(), "");
    run("var total = 1; fun bump() { total += 1; }", &mut interpreter).unwrap();
    run("bump(); bump(); print total;", &mut interpreter).unwrap();
    assert_eq!(output.contents(), "3\n");
}

#[test]
fn deep_recursion_hits_the_call_depth_limit() {
    let config = Config { max_call_depth: 64,
                          ..Config::default() };
    let (mut interpreter, _) = interpreter_with(config, "");

    let error = run("fun down(n) { return down(n + 1); } down(0);", &mut interpreter).unwrap_err();
    assert!(matches!(error, Error::Runtime(RuntimeError::StackOverflow { limit: 64, .. })));

    // The interpreter is still usable afterwards.
    run("fun ok(n) { if (n == 0) return 0; return ok(n - 1); } ok(50);",
        &mut interpreter).unwrap();
}

#[test]
fn default_depth_limit_is_reachable_without_crashing() {
    let (error, _) = runtime_error("fun down(n) { return down(n + 1); } down(0);");
    assert!(matches!(error, RuntimeError::StackOverflow { limit: 1024, .. }));
}

#[test]
fn long_operator_chains_do_not_overflow() {
    let sum = format!("print 0{};", " + 1".repeat(100_000));
    assert_output(&sum, &["100000"]);
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 20_000;
    let grouped = format!("print {}1{};", "(".repeat(depth), ")".repeat(depth));
    assert_output(&grouped, &["1"]);

    let blocks = format!("{}print 2;{}", "{".repeat(depth), "}".repeat(depth));
    assert_output(&blocks, &["2"]);
}

#[test]
fn syntax_errors_are_all_reported() {
    assert_eq!(syntax_errors("var = 1;\nprint (2;\nprint 3;\nvar ok = 4 +;"),
               vec!["Error on line 1 at '=': Expect variable name.",
                    "Error on line 2 at ';': Expect ')' after expression.",
                    "Error on line 4 at ';': Expect expression."]);
}

#[test]
fn invalid_assignment_target_is_reported() {
    assert_eq!(syntax_errors("var a = 1; var b = 2; a + b = 3;"),
               vec!["Error on line 1 at '=': Invalid assignment target."]);
    assert_eq!(syntax_errors("1++;"),
               vec!["Error on line 1 at '++': Invalid assignment target."]);
}

#[test]
fn lexical_errors_prevent_execution() {
    assert_eq!(syntax_errors("print 1;\nprint \"open"),
               vec!["Error on line 2: Unterminated string.",
                    "Error on line 2 at end: Expect expression."]);
    assert_eq!(syntax_errors("print 1 # 2;"),
               vec!["Error on line 1: Unexpected character.",
                    "Error on line 1 at '2': Expect ';' after value."]);
}

#[test]
fn comments_are_ignored() {
    assert_output("// leading\nprint 1; // trailing\n// print 2;", &["1"]);
}

#[test]
fn strings_may_span_lines() {
    assert_output("print \"one\ntwo\";", &["one", "two"]);

    let (error, _) = runtime_error("print \"a\nb\"; print x;");
    assert_eq!(error.line(), 2);
}
