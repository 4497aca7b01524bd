use crate::{
    ast::{
        expressions::{
            BinaryExpr, BoolLiteral, CallExpr, DictionaryExpr, Expr, FloatLiteral, IntLiteral,
            KeyValuePair, MatrixExpr, SetExpr, TemplateExpr, TemplateSegment, TupleExpr,
            UnaryExpr,
        },
        statements::{
            BindingStmt, BlockStmt, Case, ExpressionStmt, FnDeclStmt, IfStmt, Program, ReturnStmt,
            Stmt, WhileStmt,
        },
    },
    Span,
};

pub fn optimize_program(program: Program) -> Program {
    Program {
        block: optimize_block(program.block),
    }
}

pub fn optimize_block(block: BlockStmt) -> BlockStmt {
    BlockStmt {
        statements: optimize_stmt_list(block.statements),
        span: block.span,
    }
}

fn optimize_stmt_list(statements: Vec<Stmt>) -> Vec<Stmt> {
    statements.into_iter().filter_map(optimize_stmt).collect()
}

/// Returns None for statements the optimizer removes outright; everything
/// else comes back rebuilt.
pub fn optimize_stmt(stmt: Stmt) -> Option<Stmt> {
    match stmt {
        Stmt::Binding(binding) => Some(Stmt::Binding(BindingStmt {
            targets: binding.targets,
            mutable: binding.mutable,
            values: binding.values.into_iter().map(optimize_expr).collect(),
            span: binding.span,
        })),
        Stmt::Expression(expression) => Some(Stmt::Expression(ExpressionStmt {
            expression: optimize_expr(expression.expression),
            span: expression.span,
        })),
        Stmt::Return(ret) => Some(Stmt::Return(ReturnStmt {
            value: ret.value.map(optimize_expr),
            span: ret.span,
        })),
        Stmt::While(while_stmt) => {
            let condition = optimize_expr(while_stmt.condition);
            if matches!(condition, Expr::Bool(BoolLiteral { value: false, .. })) {
                return None;
            }
            Some(Stmt::While(WhileStmt {
                condition,
                body: optimize_block(while_stmt.body),
                span: while_stmt.span,
            }))
        }
        // Cases are never elided, even with a constant test, so the
        // declared entities inside them stay aligned with analysis.
        Stmt::If(if_stmt) => {
            let cases = if_stmt
                .cases
                .into_iter()
                .map(|case| Case {
                    test: optimize_expr(case.test),
                    body: optimize_stmt_list(case.body),
                    span: case.span,
                })
                .collect();
            let alternate = if_stmt.alternate.map(optimize_stmt_list);
            Some(Stmt::If(IfStmt {
                cases,
                alternate,
                span: if_stmt.span,
            }))
        }
        Stmt::FnDecl(fn_decl) => Some(Stmt::FnDecl(FnDeclStmt {
            name: fn_decl.name,
            params: fn_decl.params,
            return_type: fn_decl.return_type,
            body: optimize_block(fn_decl.body),
            entity: fn_decl.entity,
            span: fn_decl.span,
        })),
    }
}

pub fn optimize_expr(expr: Expr) -> Expr {
    match expr {
        Expr::Binary(binary) => {
            let BinaryExpr {
                op,
                left,
                right,
                ty,
                span,
            } = *binary;
            fold_binary(BinaryExpr {
                op,
                left: optimize_expr(left),
                right: optimize_expr(right),
                ty,
                span,
            })
        }
        Expr::Unary(unary) => {
            let UnaryExpr {
                op,
                operand,
                ty,
                span,
            } = *unary;
            fold_unary(UnaryExpr {
                op,
                operand: optimize_expr(operand),
                ty,
                span,
            })
        }
        Expr::Call(call) => Expr::Call(CallExpr {
            callee: call.callee,
            referent: call.referent,
            arguments: call.arguments.into_iter().map(optimize_expr).collect(),
            ty: call.ty,
            span: call.span,
        }),
        Expr::Tuple(tuple) => Expr::Tuple(TupleExpr {
            values: tuple.values.into_iter().map(optimize_expr).collect(),
            span: tuple.span,
        }),
        Expr::Matrix(matrix) => Expr::Matrix(MatrixExpr {
            values: matrix.values.into_iter().map(optimize_expr).collect(),
            span: matrix.span,
        }),
        Expr::Set(set) => Expr::Set(SetExpr {
            values: set.values.into_iter().map(optimize_expr).collect(),
            span: set.span,
        }),
        Expr::Dictionary(dictionary) => Expr::Dictionary(DictionaryExpr {
            pairs: dictionary
                .pairs
                .into_iter()
                .map(|pair| KeyValuePair {
                    key: optimize_expr(pair.key),
                    value: optimize_expr(pair.value),
                    span: pair.span,
                })
                .collect(),
            span: dictionary.span,
        }),
        Expr::Template(template) => Expr::Template(TemplateExpr {
            segments: template
                .segments
                .into_iter()
                .map(|segment| match segment {
                    TemplateSegment::Text(text) => TemplateSegment::Text(text),
                    TemplateSegment::Interpolation(value) => {
                        TemplateSegment::Interpolation(optimize_expr(value))
                    }
                })
                .collect(),
            span: template.span,
        }),
        other => other,
    }
}

fn fold_binary(binary: BinaryExpr) -> Expr {
    let folded = match (binary.op.as_str(), &binary.left, &binary.right) {
        (op, Expr::Int(left), Expr::Int(right)) => {
            fold_int_op(op, left.value, right.value, &binary.span)
        }
        (op, Expr::Bool(left), Expr::Bool(right)) => {
            fold_bool_op(op, left.value, right.value, &binary.span)
        }
        (op, Expr::Str(left), Expr::Str(right)) => {
            fold_string_op(op, &left.value, &right.value, &binary.span)
        }
        _ => None,
    };

    match folded {
        Some(expr) => expr,
        None => Expr::Binary(Box::new(binary)),
    }
}

fn fold_int_op(op: &str, left: i64, right: i64, span: &Span) -> Option<Expr> {
    let int = |value| {
        Some(Expr::Int(IntLiteral {
            value,
            span: span.clone(),
        }))
    };
    let boolean = |value| {
        Some(Expr::Bool(BoolLiteral {
            value,
            span: span.clone(),
        }))
    };

    match op {
        "+" => left.checked_add(right).and_then(int),
        "-" => left.checked_sub(right).and_then(int),
        "*" => left.checked_mul(right).and_then(int),
        // Only exact divisions fold; anything else is evaluated at runtime
        "/" => match left.checked_rem(right) {
            Some(0) => left.checked_div(right).and_then(int),
            _ => None,
        },
        "%" => left.checked_rem(right).and_then(int),
        "<" => boolean(left < right),
        "<=" => boolean(left <= right),
        ">" => boolean(left > right),
        ">=" => boolean(left >= right),
        "==" => boolean(left == right),
        "!=" => boolean(left != right),
        _ => None,
    }
}

fn fold_bool_op(op: &str, left: bool, right: bool, span: &Span) -> Option<Expr> {
    let value = match op {
        "and" => left && right,
        "or" => left || right,
        "==" => left == right,
        "!=" => left != right,
        _ => return None,
    };

    Some(Expr::Bool(BoolLiteral {
        value,
        span: span.clone(),
    }))
}

fn fold_string_op(op: &str, left: &str, right: &str, span: &Span) -> Option<Expr> {
    let value = match op {
        "==" => left == right,
        "!=" => left != right,
        _ => return None,
    };

    Some(Expr::Bool(BoolLiteral {
        value,
        span: span.clone(),
    }))
}

fn fold_unary(unary: UnaryExpr) -> Expr {
    match (unary.op.as_str(), &unary.operand) {
        ("-", Expr::Int(operand)) => match operand.value.checked_neg() {
            Some(value) => Expr::Int(IntLiteral {
                value,
                span: unary.span,
            }),
            None => Expr::Unary(Box::new(unary)),
        },
        ("-", Expr::Float(operand)) => Expr::Float(FloatLiteral {
            value: -operand.value,
            span: unary.span,
        }),
        ("not", Expr::Bool(operand)) => Expr::Bool(BoolLiteral {
            value: !operand.value,
            span: unary.span,
        }),
        _ => Expr::Unary(Box::new(unary)),
    }
}
