use crate::{
    ast::{
        expressions::Expr,
        statements::{
            BindingStmt, BindingTarget, BlockStmt, Case, ExpressionStmt, FnDeclStmt, IfStmt,
            Param, ReturnStmt, Stmt, WhileStmt,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    parse_binding_or_expression_stmt(parser)
}

/// A statement starting with an expression is either a binding
/// (`a, b := 1, 2` / `a = 1`) or a bare expression statement. Which one is
/// only known once the token after the expression list is seen.
pub fn parse_binding_or_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let first = parse_expr(parser, BindingPower::Default)?;

    match parser.current_token_kind() {
        TokenKind::Comma | TokenKind::Bind | TokenKind::Assignment => {
            parse_binding_stmt(parser, first)
        }
        _ => {
            let span = first.get_span().clone();
            expect_end_of_statement(parser)?;
            Ok(Stmt::Expression(ExpressionStmt {
                expression: first,
                span,
            }))
        }
    }
}

fn parse_binding_stmt(parser: &mut Parser, first: Expr) -> Result<Stmt, Error> {
    let mut names = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        names.push(parse_expr(parser, BindingPower::Default)?);
    }

    let operator = parser.current_token().clone();
    let mutable = match operator.kind {
        TokenKind::Bind => false,
        TokenKind::Assignment => true,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator.value.clone(),
                },
                operator.span.start.clone(),
            ))
        }
    };
    parser.advance();

    let mut targets = vec![];
    for name in names {
        match name {
            Expr::Variable(variable) => targets.push(BindingTarget {
                name: variable.name,
                entity: None,
                is_declaration: false,
                span: variable.span,
            }),
            other => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: operator.value.clone(),
                        message: String::from("binding targets must be plain names"),
                    },
                    other.get_span().start.clone(),
                ))
            }
        }
    }

    let mut values = vec![parse_expr(parser, BindingPower::Default)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        values.push(parse_expr(parser, BindingPower::Default)?);
    }

    let span = Span {
        start: targets.first().unwrap().span.start.clone(),
        end: values.last().unwrap().get_span().end.clone(),
    };
    expect_end_of_statement(parser)?;

    Ok(Stmt::Binding(BindingStmt {
        targets,
        mutable,
        values,
        span,
    }))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let condition = parse_expr(parser, BindingPower::Default)?;
    let body = parse_suite(parser)?;

    let span = Span {
        start,
        end: body.span.end.clone(),
    };
    Ok(Stmt::While(WhileStmt {
        condition,
        body,
        span,
    }))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let mut cases = vec![parse_case(parser)?];
    let mut alternate = None;
    let mut end = cases.last().unwrap().span.end.clone();

    loop {
        match parser.current_token_kind() {
            TokenKind::Elif => {
                parser.advance();
                let case = parse_case(parser)?;
                end = case.span.end.clone();
                cases.push(case);
            }
            TokenKind::Else => {
                parser.advance();
                let block = parse_suite(parser)?;
                end = block.span.end.clone();
                alternate = Some(block.statements);
                break;
            }
            _ => break,
        }
    }

    Ok(Stmt::If(IfStmt {
        cases,
        alternate,
        span: Span { start, end },
    }))
}

fn parse_case(parser: &mut Parser) -> Result<Case, Error> {
    let test = parse_expr(parser, BindingPower::Default)?;
    let start = test.get_span().start.clone();
    let body = parse_suite(parser)?;

    Ok(Case {
        span: Span {
            start,
            end: body.span.end.clone(),
        },
        test,
        body: body.statements,
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let token = parser.advance().clone();

    let value = if matches!(
        parser.current_token_kind(),
        TokenKind::Newline | TokenKind::EOF
    ) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    let end = match value.as_ref() {
        Some(value) => value.get_span().end.clone(),
        None => token.span.end.clone(),
    };
    expect_end_of_statement(parser)?;

    Ok(Stmt::Return(ReturnStmt {
        value,
        span: Span {
            start: token.span.start.clone(),
            end,
        },
    }))
}

pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let error = Error::new(
        ErrorImpl::UnexpectedTokenDetailed {
            token: parser.current_token().value.clone(),
            message: String::from("expected function name"),
        },
        parser.get_position(),
    );
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        let name_token = parser.expect(TokenKind::Identifier)?;
        parser.expect(TokenKind::Colon)?;
        let ty = parse_type(parser)?;
        params.push(Param {
            name: name_token.value,
            ty,
            entity: None,
            span: name_token.span,
        });

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_type = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        parse_type(parser)?
    } else {
        Type::None
    };

    let body = parse_suite(parser)?;
    let span = Span {
        start,
        end: body.span.end.clone(),
    };

    Ok(Stmt::FnDecl(FnDeclStmt {
        name,
        params,
        return_type,
        body,
        entity: None,
        span,
    }))
}

pub fn parse_type(parser: &mut Parser) -> Result<Type, Error> {
    let token = parser.advance().clone();
    match token.kind {
        // `none` lexes as a reserved word, not an identifier
        TokenKind::None => Ok(Type::None),
        TokenKind::Identifier => Type::for_name(&token.value).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: token.value.clone(),
                },
                token.span.start.clone(),
            )
        }),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )),
    }
}

/// Parses an indented block: a colon, a newline, an Indent, statements,
/// and the matching Dedent.
pub fn parse_suite(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let colon = parser.expect(TokenKind::Colon)?;
    parser.expect(TokenKind::Newline)?;
    parser.expect(TokenKind::Indent)?;

    let mut statements = vec![];
    loop {
        parser.skip_newlines();
        if parser.current_token_kind() == TokenKind::Dedent || !parser.has_tokens() {
            break;
        }
        statements.push(parse_stmt(parser)?);
    }

    let dedent = parser.expect(TokenKind::Dedent)?;
    Ok(BlockStmt {
        statements,
        span: Span {
            start: colon.span.start.clone(),
            end: dedent.span.end.clone(),
        },
    })
}

fn expect_end_of_statement(parser: &mut Parser) -> Result<(), Error> {
    if parser.current_token_kind() == TokenKind::EOF {
        return Ok(());
    }
    parser.expect(TokenKind::Newline)?;
    Ok(())
}
