//! Unit tests for semantic analysis.

use std::rc::Rc;

use crate::{
    analyzer::{analyzer::analyze, context::Context},
    ast::{
        expressions::Expr,
        statements::{Program, Stmt},
        types::Type,
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

fn analyze_source(source: &str) -> Result<(Program, Context), crate::errors::errors::Error> {
    let tokens = tokenize(source.to_string(), Some("test.lark".to_string()))?;
    let mut program = parse(tokens, Rc::new("test.lark".to_string()))?;
    let context = analyze(&mut program)?;
    Ok((program, context))
}

fn analysis_error(source: &str) -> String {
    analyze_source(source)
        .err()
        .expect("expected analysis to fail")
        .get_error_name()
        .to_string()
}

#[test]
fn test_analyze_binding_attaches_entity_and_type() {
    let (program, context) = analyze_source("x := 3\nx").unwrap();

    let entity = match &program.block.statements[0] {
        Stmt::Binding(binding) => {
            assert!(binding.targets[0].is_declaration);
            binding.targets[0].entity.unwrap()
        }
        other => panic!("expected binding, got {:?}", other),
    };
    assert_eq!(context.entity(entity).ty, Type::Int);
    assert!(!context.entity(entity).mutable);

    match &program.block.statements[1] {
        Stmt::Expression(stmt) => match &stmt.expression {
            Expr::Variable(variable) => {
                assert_eq!(variable.referent.unwrap(), entity);
                assert_eq!(variable.ty.unwrap(), Type::Int);
            }
            other => panic!("expected variable, got {:?}", other),
        },
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_analyze_unresolved_identifier() {
    assert_eq!(analysis_error("y"), "UnresolvedIdentifier");
}

#[test]
fn test_analyze_immutable_redeclaration_rejected() {
    assert_eq!(analysis_error("x := 1\nx := 2"), "Redeclaration");
}

#[test]
fn test_analyze_mutable_rebinding_allowed() {
    assert!(analyze_source("x = 1\nx = 2").is_ok());
}

#[test]
fn test_analyze_mutable_rebinding_reuses_entity() {
    let (program, _context) = analyze_source("x = 1\nx = 2").unwrap();

    let first = match &program.block.statements[0] {
        Stmt::Binding(binding) => {
            assert!(binding.targets[0].is_declaration);
            binding.targets[0].entity.unwrap()
        }
        other => panic!("expected binding, got {:?}", other),
    };
    match &program.block.statements[1] {
        Stmt::Binding(binding) => {
            assert!(!binding.targets[0].is_declaration);
            assert_eq!(binding.targets[0].entity.unwrap(), first);
        }
        other => panic!("expected binding, got {:?}", other),
    }
}

#[test]
fn test_analyze_mutable_rebinding_requires_compatible_type() {
    assert_eq!(analysis_error("x = 1\nx = \"text\""), "TypeMismatch");
}

#[test]
fn test_analyze_initializer_sees_outer_binding() {
    // The inner `x := x` initializer resolves to the outer x, so the two
    // targets end up as distinct entities.
    let source = "x := 1\nif true:\n    x := x";
    let (program, _context) = analyze_source(source).unwrap();

    let outer = match &program.block.statements[0] {
        Stmt::Binding(binding) => binding.targets[0].entity.unwrap(),
        other => panic!("expected binding, got {:?}", other),
    };
    match &program.block.statements[1] {
        Stmt::If(if_stmt) => match &if_stmt.cases[0].body[0] {
            Stmt::Binding(binding) => {
                let inner = binding.targets[0].entity.unwrap();
                assert_ne!(inner, outer);
                match &binding.values[0] {
                    Expr::Variable(variable) => assert_eq!(variable.referent.unwrap(), outer),
                    other => panic!("expected variable initializer, got {:?}", other),
                }
            }
            other => panic!("expected binding, got {:?}", other),
        },
        other => panic!("expected if, got {:?}", other),
    }
}

#[test]
fn test_analyze_binding_arity_mismatch() {
    assert_eq!(analysis_error("a, b := 1"), "BindingArityMismatch");
    assert_eq!(analysis_error("a := 1, 2"), "BindingArityMismatch");
}

#[test]
fn test_analyze_shadowing_in_inner_scope() {
    let source = "x := 1\nwhile true:\n    x := \"inner\"\n    x";
    let (program, context) = analyze_source(source).unwrap();

    match &program.block.statements[1] {
        Stmt::While(while_stmt) => {
            let inner = match &while_stmt.body.statements[0] {
                Stmt::Binding(binding) => binding.targets[0].entity.unwrap(),
                other => panic!("expected binding, got {:?}", other),
            };
            assert_eq!(context.entity(inner).ty, Type::String);
            match &while_stmt.body.statements[1] {
                Stmt::Expression(stmt) => match &stmt.expression {
                    Expr::Variable(variable) => assert_eq!(variable.referent.unwrap(), inner),
                    other => panic!("expected variable, got {:?}", other),
                },
                other => panic!("expected expression statement, got {:?}", other),
            }
        }
        other => panic!("expected while, got {:?}", other),
    }
}

#[test]
fn test_analyze_block_scope_does_not_leak() {
    assert_eq!(
        analysis_error("while true:\n    y := 1\ny"),
        "UnresolvedIdentifier"
    );
}

#[test]
fn test_analyze_else_statements_each_get_own_scope() {
    // A name declared by one alternate statement is invisible to the next
    let source = "if false:\n    a := 1\nelse:\n    b := 1\n    b";
    assert_eq!(analysis_error(source), "UnresolvedIdentifier");
}

#[test]
fn test_analyze_while_condition_must_be_bool() {
    assert_eq!(analysis_error("while 1:\n    x := 2"), "TypeMismatch");
}

#[test]
fn test_analyze_relational_operands_must_be_int() {
    assert_eq!(analysis_error("true < false"), "TypeMismatch");
    assert_eq!(analysis_error("\"a\" < 1"), "TypeMismatch");
    let (program, _context) = analyze_source("1 < 2").unwrap();
    match &program.block.statements[0] {
        Stmt::Expression(stmt) => assert_eq!(stmt.expression.get_type().unwrap(), Type::Bool),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_analyze_equality_requires_mutual_compatibility() {
    assert_eq!(analysis_error("1 == \"one\""), "TypeMismatch");
    assert!(analyze_source("\"a\" == \"b\"").is_ok());
}

#[test]
fn test_analyze_logical_operands_must_be_bool() {
    assert_eq!(analysis_error("1 and 2"), "TypeMismatch");
    assert!(analyze_source("true and false").is_ok());
}

#[test]
fn test_analyze_arithmetic_is_integer() {
    assert_eq!(analysis_error("\"a\" + \"b\""), "TypeMismatch");
    let (program, _context) = analyze_source("1 + 2 * 3").unwrap();
    match &program.block.statements[0] {
        Stmt::Expression(stmt) => assert_eq!(stmt.expression.get_type().unwrap(), Type::Int),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_analyze_unary_takes_operand_type() {
    let (program, _context) = analyze_source("-3.5").unwrap();
    match &program.block.statements[0] {
        Stmt::Expression(stmt) => assert_eq!(stmt.expression.get_type().unwrap(), Type::Float),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_analyze_call_arity() {
    assert_eq!(analysis_error("print()"), "ArgumentArityMismatch");
    assert_eq!(analysis_error("print(1, 2)"), "ArgumentArityMismatch");
    assert!(analyze_source("print(1)").is_ok());
}

#[test]
fn test_analyze_calling_a_variable_rejected() {
    assert_eq!(analysis_error("x := 1\nx(2)"), "NotCallable");
}

#[test]
fn test_analyze_fn_decl_and_recursion() {
    let source = "fn f(n: int) -> int:\n    return f(n - 1)\nf(3)";
    assert!(analyze_source(source).is_ok());
}

#[test]
fn test_analyze_return_outside_function() {
    assert_eq!(analysis_error("return 1"), "ReturnOutsideFunction");
}

#[test]
fn test_analyze_return_inside_nested_block_of_function() {
    let source = "fn f() -> int:\n    while true:\n        return 1\nf()";
    assert!(analyze_source(source).is_ok());
}

#[test]
fn test_analyze_composite_elements_are_resolved() {
    assert_eq!(analysis_error("[missing]"), "UnresolvedIdentifier");
    assert_eq!(analysis_error("`${missing}`"), "UnresolvedIdentifier");
    assert!(analyze_source("x := 1\n[x, \"mixed\", true]").is_ok());
}

#[test]
fn test_analyze_composite_types() {
    let (program, _context) = analyze_source("(1, 2)\n[1]\n{1, 2}\n{\"k\": 1}").unwrap();

    let types = program
        .block
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Expression(stmt) => stmt.expression.get_type().unwrap(),
            other => panic!("expected expression statement, got {:?}", other),
        })
        .collect::<Vec<Type>>();
    assert_eq!(
        types,
        vec![Type::Tuple, Type::Matrix, Type::Set, Type::Dictionary]
    );
}

#[test]
fn test_context_declare_and_resolve() {
    let mut context = Context::new();
    let id = context
        .declare("x", Type::Int, false, None, &Position::null())
        .unwrap();

    assert_eq!(context.resolve("x").unwrap(), id);
    assert!(context.resolve("y").is_none());

    context.child_for_block();
    assert_eq!(context.resolve("x").unwrap(), id);
    let shadow = context
        .declare("x", Type::String, false, None, &Position::null())
        .unwrap();
    assert_ne!(shadow, id);
    assert_eq!(context.resolve("x").unwrap(), shadow);

    context.exit();
    assert_eq!(context.resolve("x").unwrap(), id);
    // The shadowing entity outlives its scope
    assert_eq!(context.entity(shadow).ty, Type::String);
}
