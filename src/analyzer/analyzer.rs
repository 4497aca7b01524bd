use crate::{
    ast::{
        expressions::{Expr, TemplateSegment},
        statements::{BlockStmt, Case, Program, Stmt},
        types::Type,
    },
    codegen::stdlib,
    errors::errors::{Error, ErrorImpl},
};

use super::context::Context;

/// Analyzes a whole program: seeds the builtin library into a fresh root
/// context, then walks the tree root-to-leaf. Returns the context so the
/// generator can resolve referent handles and builtin names.
pub fn analyze(program: &mut Program) -> Result<Context, Error> {
    let mut context = Context::new();
    stdlib::register_builtins(&mut context)?;
    analyze_block(&mut context, &mut program.block)?;
    Ok(context)
}

pub fn analyze_block(context: &mut Context, block: &mut BlockStmt) -> Result<(), Error> {
    context.child_for_block();
    for stmt in block.statements.iter_mut() {
        analyze_stmt(context, stmt)?;
    }
    context.exit();
    Ok(())
}

pub fn analyze_stmt(context: &mut Context, stmt: &mut Stmt) -> Result<(), Error> {
    match stmt {
        Stmt::Binding(binding) => {
            if binding.targets.len() != binding.values.len() {
                return Err(Error::new(
                    ErrorImpl::BindingArityMismatch {
                        names: binding.targets.len(),
                        values: binding.values.len(),
                    },
                    binding.span.start.clone(),
                ));
            }

            // The declared names must not come into scope until after the
            // whole binding line, so all initializers are analyzed first:
            // `x := x` sees the outer x, never the one being introduced.
            let mut value_types = vec![];
            for value in binding.values.iter_mut() {
                value_types.push(analyze_expr(context, value)?);
            }

            for (target, value_type) in binding.targets.iter_mut().zip(value_types) {
                if binding.mutable {
                    // Assignment-to-existing-or-new-mutable-slot: reuse the
                    // nearest mutable entity if there is one, otherwise
                    // declare a fresh mutable slot in this scope.
                    let existing = context
                        .resolve(&target.name)
                        .filter(|id| context.entity(*id).mutable);
                    if let Some(id) = existing {
                        value_type.must_be_mutually_compatible_with(
                            context.entity(id).ty,
                            &target.span.start,
                        )?;
                        target.entity = Some(id);
                        target.is_declaration = false;
                        continue;
                    }
                }
                let id = context.declare(
                    &target.name,
                    value_type,
                    binding.mutable,
                    None,
                    &target.span.start,
                )?;
                target.entity = Some(id);
                target.is_declaration = true;
            }
            Ok(())
        }
        Stmt::Expression(expression) => {
            analyze_expr(context, &mut expression.expression)?;
            Ok(())
        }
        Stmt::Return(ret) => {
            if let Some(value) = ret.value.as_mut() {
                analyze_expr(context, value)?;
            }
            context.assert_in_function(&ret.span.start)
        }
        Stmt::While(while_stmt) => {
            let condition_type = analyze_expr(context, &mut while_stmt.condition)?;
            condition_type.must_be(Type::Bool, &while_stmt.condition.get_span().start)?;
            analyze_block(context, &mut while_stmt.body)
        }
        Stmt::If(if_stmt) => {
            for case in if_stmt.cases.iter_mut() {
                analyze_case(context, case)?;
            }
            if let Some(alternate) = if_stmt.alternate.as_mut() {
                // Each alternate statement gets its own child scope, so a
                // name declared there is invisible to its siblings.
                for stmt in alternate.iter_mut() {
                    context.child_for_block();
                    let result = analyze_stmt(context, stmt);
                    context.exit();
                    result?;
                }
            }
            Ok(())
        }
        Stmt::FnDecl(fn_decl) => {
            let id = context.declare(
                &fn_decl.name,
                fn_decl.return_type,
                false,
                Some(fn_decl.params.len()),
                &fn_decl.span.start,
            )?;
            fn_decl.entity = Some(id);

            context.child_for_function();
            for param in fn_decl.params.iter_mut() {
                let param_id =
                    context.declare(&param.name, param.ty, false, None, &param.span.start)?;
                param.entity = Some(param_id);
            }
            let result = analyze_block(context, &mut fn_decl.body);
            context.exit();
            result
        }
    }
}

fn analyze_case(context: &mut Context, case: &mut Case) -> Result<(), Error> {
    context.child_for_block();
    let result = analyze_case_inner(context, case);
    context.exit();
    result
}

fn analyze_case_inner(context: &mut Context, case: &mut Case) -> Result<(), Error> {
    analyze_expr(context, &mut case.test)?;
    context.child_for_block();
    for stmt in case.body.iter_mut() {
        let result = analyze_stmt(context, stmt);
        if result.is_err() {
            context.exit();
            return result;
        }
    }
    context.exit();
    Ok(())
}

pub fn analyze_expr(context: &mut Context, expr: &mut Expr) -> Result<Type, Error> {
    match expr {
        Expr::Bool(_) => Ok(Type::Bool),
        Expr::Int(_) => Ok(Type::Int),
        Expr::Float(_) => Ok(Type::Float),
        Expr::Str(_) => Ok(Type::String),
        Expr::None(_) => Ok(Type::None),
        Expr::Variable(variable) => {
            let id = context.lookup(&variable.name, &variable.span.start)?;
            let ty = context.entity(id).ty;
            variable.referent = Some(id);
            variable.ty = Some(ty);
            Ok(ty)
        }
        Expr::Binary(binary) => {
            let left_type = analyze_expr(context, &mut binary.left)?;
            let right_type = analyze_expr(context, &mut binary.right)?;
            let position = &binary.span.start;

            let ty = if ["<", "<=", ">=", ">"].contains(&binary.op.as_str()) {
                left_type.must_be(Type::Int, position)?;
                right_type.must_be(Type::Int, position)?;
                Type::Bool
            } else if ["==", "!="].contains(&binary.op.as_str()) {
                left_type.must_be_mutually_compatible_with(right_type, position)?;
                Type::Bool
            } else if ["and", "or"].contains(&binary.op.as_str()) {
                left_type.must_be(Type::Bool, position)?;
                right_type.must_be(Type::Bool, position)?;
                Type::Bool
            } else {
                // All other binary operators are integer arithmetic
                left_type.must_be(Type::Int, position)?;
                right_type.must_be(Type::Int, position)?;
                Type::Int
            };

            binary.ty = Some(ty);
            Ok(ty)
        }
        Expr::Unary(unary) => {
            // No operand constraint; the node takes its operand's type.
            let ty = analyze_expr(context, &mut unary.operand)?;
            unary.ty = Some(ty);
            Ok(ty)
        }
        Expr::Call(call) => {
            let id = context.lookup(&call.callee, &call.span.start)?;
            let entity = context.entity(id);
            let ty = entity.ty;
            let arity = entity.arity.ok_or_else(|| {
                Error::new(
                    ErrorImpl::NotCallable {
                        name: call.callee.clone(),
                    },
                    call.span.start.clone(),
                )
            })?;
            if call.arguments.len() != arity {
                return Err(Error::new(
                    ErrorImpl::ArgumentArityMismatch {
                        function: call.callee.clone(),
                        expected: arity,
                        received: call.arguments.len(),
                    },
                    call.span.start.clone(),
                ));
            }
            for argument in call.arguments.iter_mut() {
                analyze_expr(context, argument)?;
            }
            call.referent = Some(id);
            call.ty = Some(ty);
            Ok(ty)
        }
        // Composite literals carry their type from construction. Their
        // elements are analyzed so names resolve, but no element-type
        // uniformity is enforced.
        Expr::Tuple(tuple) => {
            for value in tuple.values.iter_mut() {
                analyze_expr(context, value)?;
            }
            Ok(Type::Tuple)
        }
        Expr::Matrix(matrix) => {
            for value in matrix.values.iter_mut() {
                analyze_expr(context, value)?;
            }
            Ok(Type::Matrix)
        }
        Expr::Set(set) => {
            for value in set.values.iter_mut() {
                analyze_expr(context, value)?;
            }
            Ok(Type::Set)
        }
        Expr::Dictionary(dictionary) => {
            for pair in dictionary.pairs.iter_mut() {
                analyze_expr(context, &mut pair.key)?;
                analyze_expr(context, &mut pair.value)?;
            }
            Ok(Type::Dictionary)
        }
        Expr::Template(template) => {
            for segment in template.segments.iter_mut() {
                if let TemplateSegment::Interpolation(value) = segment {
                    analyze_expr(context, value)?;
                }
            }
            Ok(Type::TemplateLiteral)
        }
    }
}
