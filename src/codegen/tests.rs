//! Unit tests for code generation.

use std::rc::Rc;

use crate::{
    analyzer::analyzer::analyze, lexer::lexer::tokenize, optimizer::optimizer::optimize_program,
    parser::parser::parse,
};

use super::codegen::{generate, make_op};

fn generate_source(source: &str) -> Vec<String> {
    let tokens = tokenize(source.to_string(), Some("test.lark".to_string())).unwrap();
    let mut program = parse(tokens, Rc::new("test.lark".to_string())).unwrap();
    let context = analyze(&mut program).unwrap();
    let program = optimize_program(program);

    let mut lines: Vec<String> = vec![];
    generate(&program, &context, &mut lines, "    ");
    lines
}

/// Generated lines after the two builtin stubs.
fn user_lines(source: &str) -> Vec<String> {
    generate_source(source)[2..].to_vec()
}

#[test]
fn test_make_op() {
    assert_eq!(make_op("not"), "!");
    assert_eq!(make_op("and"), "&&");
    assert_eq!(make_op("or"), "||");
    assert_eq!(make_op("=="), "===");
    assert_eq!(make_op("!="), "!==");
    assert_eq!(make_op("+"), "+");
    assert_eq!(make_op("<="), "<=");
    assert_eq!(make_op("%"), "%");
}

#[test]
fn test_builtin_stubs_come_first() {
    let lines = generate_source("x := 1");
    assert_eq!(lines[0], "function print_1(_) {console.log(_);}");
    assert_eq!(lines[1], "function sqrt_2(_) {return Math.sqrt(_);}");
}

#[test]
fn test_generate_bindings() {
    assert_eq!(user_lines("x := 3"), vec!["const x_3 = 3;"]);
    assert_eq!(user_lines("x = 3"), vec!["let x_3 = 3;"]);
    assert_eq!(
        user_lines("x = 1\nx = 2"),
        vec!["let x_3 = 1;", "x_3 = 2;"]
    );
}

#[test]
fn test_generate_multi_name_binding_destructures() {
    assert_eq!(
        user_lines("a, b := 1, 2"),
        vec!["const [a_3, b_4] = [1, 2];"]
    );
}

#[test]
fn test_generate_swap_stays_simultaneous() {
    assert_eq!(
        user_lines("a = 1\nb = 2\na, b = b, a"),
        vec![
            "let a_3 = 1;",
            "let b_4 = 2;",
            "[a_3, b_4] = [b_4, a_3];",
        ]
    );
}

#[test]
fn test_generate_mixed_mutable_binding_stays_simultaneous() {
    // `y`'s initializer reads the value `x` held before this statement
    assert_eq!(
        user_lines("x = 1\nx, y = 5, x"),
        vec!["let x_3 = 1;", "let y_4;", "[x_3, y_4] = [5, x_3];"]
    );
}

#[test]
fn test_generate_hygienic_names_for_shadowing() {
    let source = "x := 1\nwhile true:\n    x := 2\n    print(x)\nprint(x)";
    assert_eq!(
        user_lines(source),
        vec![
            "const x_3 = 1;",
            "while (true) {",
            "    const x_4 = 2;",
            "    print_1(x_4);",
            "}",
            "print_1(x_3);",
        ]
    );
}

#[test]
fn test_generate_if_elif_else() {
    let source = "a := 1\nif a == 1:\n    print(1)\nelif a == 2:\n    print(2)\nelse:\n    print(3)";
    assert_eq!(
        user_lines(source),
        vec![
            "const a_3 = 1;",
            "if ((a_3 === 1)) {",
            "    print_1(1);",
            "} else if ((a_3 === 2)) {",
            "    print_1(2);",
            "} else {",
            "    print_1(3);",
            "}",
        ]
    );
}

#[test]
fn test_generate_fn_decl_and_call() {
    let source = "fn add(a: int, b: int) -> int:\n    return a + b\nprint(add(1, 2))";
    assert_eq!(
        user_lines(source),
        vec![
            "function add_3(a_4, b_5) {",
            "    return (a_4 + b_5);",
            "}",
            "print_1(add_3(1, 2));",
        ]
    );
}

#[test]
fn test_generate_operators_and_literals() {
    assert_eq!(
        user_lines("x := true\nprint(not x)"),
        vec!["const x_3 = true;", "print_1((!x_3));"]
    );
    assert_eq!(user_lines("print(none)"), vec!["print_1(null);"]);
    assert_eq!(
        user_lines("print(\"a\\nb\")"),
        vec!["print_1(\"a\\nb\");"]
    );
}

#[test]
fn test_generate_composites() {
    assert_eq!(user_lines("print((1, 2))"), vec!["print_1([1, 2]);"]);
    assert_eq!(user_lines("print([1, 2])"), vec!["print_1([1, 2]);"]);
    assert_eq!(
        user_lines("print({1, 2})"),
        vec!["print_1(new Set([1, 2]));"]
    );
    assert_eq!(
        user_lines("print({\"k\": 1})"),
        vec!["print_1({[\"k\"]: 1});"]
    );
}

#[test]
fn test_generate_template() {
    assert_eq!(
        user_lines("x := 1\nprint(`x is ${x}`)"),
        vec!["const x_3 = 1;", "print_1(`x is ${x_3}`);"]
    );
}

#[test]
fn test_generate_nested_indentation() {
    let source = "while true:\n    while true:\n        print(1)";
    assert_eq!(
        user_lines(source),
        vec![
            "while (true) {",
            "    while (true) {",
            "        print_1(1);",
            "    }",
            "}",
        ]
    );
}

#[test]
fn test_generate_custom_indent_unit() {
    let tokens = tokenize(
        "while true:\n    print(1)".to_string(),
        Some("test.lark".to_string()),
    )
    .unwrap();
    let mut program = parse(tokens, Rc::new("test.lark".to_string())).unwrap();
    let context = analyze(&mut program).unwrap();
    let program = optimize_program(program);

    let mut lines: Vec<String> = vec![];
    generate(&program, &context, &mut lines, "\t");
    assert_eq!(lines[2], "while (true) {");
    assert_eq!(lines[3], "\tprint_1(1);");
}
