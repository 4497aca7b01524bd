//! Unit tests for the parser module.

use std::rc::Rc;

use crate::{
    ast::{
        expressions::{Expr, TemplateSegment},
        statements::{Program, Stmt},
        types::Type,
    },
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.lark".to_string())).unwrap();
    parse(tokens, Rc::new("test.lark".to_string())).unwrap()
}

fn parse_error(source: &str) -> String {
    let tokens = tokenize(source.to_string(), Some("test.lark".to_string())).unwrap();
    let error = parse(tokens, Rc::new("test.lark".to_string())).unwrap_err();
    error.get_error_name().to_string()
}

fn first_expression(program: &Program) -> &Expr {
    match &program.block.statements[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_literals() {
    let program = parse_source("42");
    match first_expression(&program) {
        Expr::Int(literal) => assert_eq!(literal.value, 42),
        other => panic!("expected int literal, got {:?}", other),
    }

    let program = parse_source("3.5");
    match first_expression(&program) {
        Expr::Float(literal) => assert_eq!(literal.value, 3.5),
        other => panic!("expected float literal, got {:?}", other),
    }

    let program = parse_source("true");
    match first_expression(&program) {
        Expr::Bool(literal) => assert!(literal.value),
        other => panic!("expected bool literal, got {:?}", other),
    }

    let program = parse_source("\"hi\"");
    match first_expression(&program) {
        Expr::Str(literal) => assert_eq!(literal.value, "hi"),
        other => panic!("expected string literal, got {:?}", other),
    }

    let program = parse_source("none");
    assert!(matches!(first_expression(&program), Expr::None(_)));
}

#[test]
fn test_parse_binary_precedence() {
    let program = parse_source("1 + 2 * 3");
    match first_expression(&program) {
        Expr::Binary(binary) => {
            assert_eq!(binary.op, "+");
            assert!(matches!(binary.left, Expr::Int(_)));
            match &binary.right {
                Expr::Binary(inner) => assert_eq!(inner.op, "*"),
                other => panic!("expected binary rhs, got {:?}", other),
            }
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_binary_left_associativity() {
    let program = parse_source("10 - 4 - 3");
    match first_expression(&program) {
        Expr::Binary(binary) => {
            assert_eq!(binary.op, "-");
            assert!(matches!(binary.left, Expr::Binary(_)));
            assert!(matches!(binary.right, Expr::Int(_)));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_prefix_binds_tighter_than_binary() {
    let program = parse_source("-a + b");
    match first_expression(&program) {
        Expr::Binary(binary) => {
            assert_eq!(binary.op, "+");
            assert!(matches!(binary.left, Expr::Unary(_)));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_logical_and_relational() {
    let program = parse_source("a < b and c >= d");
    match first_expression(&program) {
        Expr::Binary(binary) => {
            assert_eq!(binary.op, "and");
            match (&binary.left, &binary.right) {
                (Expr::Binary(left), Expr::Binary(right)) => {
                    assert_eq!(left.op, "<");
                    assert_eq!(right.op, ">=");
                }
                other => panic!("expected relational operands, got {:?}", other),
            }
        }
        other => panic!("expected logical expression, got {:?}", other),
    }
}

#[test]
fn test_parse_grouping_and_tuples() {
    let program = parse_source("(1 + 2) * 3");
    match first_expression(&program) {
        Expr::Binary(binary) => assert_eq!(binary.op, "*"),
        other => panic!("expected binary expression, got {:?}", other),
    }

    let program = parse_source("(1, 2, 3)");
    match first_expression(&program) {
        Expr::Tuple(tuple) => assert_eq!(tuple.values.len(), 3),
        other => panic!("expected tuple, got {:?}", other),
    }

    let program = parse_source("()");
    match first_expression(&program) {
        Expr::Tuple(tuple) => assert!(tuple.values.is_empty()),
        other => panic!("expected empty tuple, got {:?}", other),
    }
}

#[test]
fn test_parse_matrix_set_and_dictionary() {
    let program = parse_source("[1, 2, 3]");
    match first_expression(&program) {
        Expr::Matrix(matrix) => assert_eq!(matrix.values.len(), 3),
        other => panic!("expected matrix, got {:?}", other),
    }

    let program = parse_source("{1, 2}");
    match first_expression(&program) {
        Expr::Set(set) => assert_eq!(set.values.len(), 2),
        other => panic!("expected set, got {:?}", other),
    }

    let program = parse_source("{\"a\": 1, \"b\": 2}");
    match first_expression(&program) {
        Expr::Dictionary(dictionary) => assert_eq!(dictionary.pairs.len(), 2),
        other => panic!("expected dictionary, got {:?}", other),
    }

    // Empty curly literal reads as a dictionary
    let program = parse_source("{}");
    match first_expression(&program) {
        Expr::Dictionary(dictionary) => assert!(dictionary.pairs.is_empty()),
        other => panic!("expected empty dictionary, got {:?}", other),
    }
}

#[test]
fn test_parse_template_string() {
    let program = parse_source("`sum: ${1 + 2}!`");
    match first_expression(&program) {
        Expr::Template(template) => {
            assert_eq!(template.segments.len(), 3);
            assert!(matches!(&template.segments[0], TemplateSegment::Text(text) if text == "sum: "));
            match &template.segments[1] {
                TemplateSegment::Interpolation(Expr::Binary(binary)) => {
                    assert_eq!(binary.op, "+")
                }
                other => panic!("expected interpolation, got {:?}", other),
            }
            assert!(matches!(&template.segments[2], TemplateSegment::Text(text) if text == "!"));
        }
        other => panic!("expected template, got {:?}", other),
    }
}

#[test]
fn test_parse_call() {
    let program = parse_source("print(1, 2)");
    match first_expression(&program) {
        Expr::Call(call) => {
            assert_eq!(call.callee, "print");
            assert_eq!(call.arguments.len(), 2);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_immutable_binding() {
    let program = parse_source("x := 3");
    match &program.block.statements[0] {
        Stmt::Binding(binding) => {
            assert!(!binding.mutable);
            assert_eq!(binding.targets.len(), 1);
            assert_eq!(binding.targets[0].name, "x");
            assert_eq!(binding.values.len(), 1);
        }
        other => panic!("expected binding, got {:?}", other),
    }
}

#[test]
fn test_parse_multi_name_binding() {
    let program = parse_source("a, b = 1, 2");
    match &program.block.statements[0] {
        Stmt::Binding(binding) => {
            assert!(binding.mutable);
            assert_eq!(binding.targets.len(), 2);
            assert_eq!(binding.targets[0].name, "a");
            assert_eq!(binding.targets[1].name, "b");
            assert_eq!(binding.values.len(), 2);
        }
        other => panic!("expected binding, got {:?}", other),
    }
}

#[test]
fn test_parse_while() {
    let program = parse_source("while x < 10:\n    x = x + 1");
    match &program.block.statements[0] {
        Stmt::While(while_stmt) => {
            assert!(matches!(while_stmt.condition, Expr::Binary(_)));
            assert_eq!(while_stmt.body.statements.len(), 1);
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_parse_if_elif_else() {
    let source = "if a:\n    x := 1\nelif b:\n    y := 2\nelse:\n    z := 3";
    let program = parse_source(source);
    match &program.block.statements[0] {
        Stmt::If(if_stmt) => {
            assert_eq!(if_stmt.cases.len(), 2);
            assert_eq!(if_stmt.cases[0].body.len(), 1);
            assert_eq!(if_stmt.cases[1].body.len(), 1);
            assert_eq!(if_stmt.alternate.as_ref().unwrap().len(), 1);
        }
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_parse_fn_decl() {
    let program = parse_source("fn add(a: int, b: int) -> int:\n    return a + b");
    match &program.block.statements[0] {
        Stmt::FnDecl(fn_decl) => {
            assert_eq!(fn_decl.name, "add");
            assert_eq!(fn_decl.params.len(), 2);
            assert_eq!(fn_decl.params[0].name, "a");
            assert_eq!(fn_decl.params[0].ty, Type::Int);
            assert_eq!(fn_decl.return_type, Type::Int);
            assert_eq!(fn_decl.body.statements.len(), 1);
            assert!(matches!(fn_decl.body.statements[0], Stmt::Return(_)));
        }
        other => panic!("expected fn declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_fn_decl_defaults_to_none_return() {
    let program = parse_source("fn noop():\n    return");
    match &program.block.statements[0] {
        Stmt::FnDecl(fn_decl) => assert_eq!(fn_decl.return_type, Type::None),
        other => panic!("expected fn declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_nested_blocks() {
    let source = "while a:\n    while b:\n        x = 1\ny := 2";
    let program = parse_source(source);

    assert_eq!(program.block.statements.len(), 2);
    match &program.block.statements[0] {
        Stmt::While(outer) => {
            assert_eq!(outer.body.statements.len(), 1);
            assert!(matches!(outer.body.statements[0], Stmt::While(_)));
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_parse_unknown_type_error() {
    assert_eq!(
        parse_error("fn f(a: quux):\n    return"),
        "UnknownType"
    );
}

#[test]
fn test_parse_binding_target_must_be_name() {
    assert_eq!(parse_error("1 := 2"), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_missing_suite_errors() {
    assert_eq!(parse_error("while x"), "UnexpectedToken");
}
