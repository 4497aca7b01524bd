use crate::{
    ast::expressions::{
        BinaryExpr, BoolLiteral, CallExpr, DictionaryExpr, Expr, FloatLiteral, IntLiteral,
        KeyValuePair, MatrixExpr, NoneLiteral, SetExpr, StringLiteral, TemplateExpr,
        TemplateSegment, TupleExpr, UnaryExpr, VariableExpr,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::tokenize, tokens::TokenKind},
    Span,
};

use super::{
    lookups::{create_token_lookups, BindingPower},
    parser::Parser,
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    if !parser.get_nud_lookup().contains_key(&token_kind) {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    let nud = *parser.get_nud_lookup().get(&token_kind).unwrap();
    let mut left = nud(parser)?;

    // While LED and current BP is greater than BP of current token, continue parsing lhs
    while *parser
        .get_bp_lookup()
        .get(&parser.current_token_kind())
        .unwrap_or(&BindingPower::Default)
        > bp
    {
        let token_kind = parser.current_token_kind();
        if !parser.get_led_lookup().contains_key(&token_kind) {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: parser.current_token().value.clone(),
                },
                parser.get_position(),
            ));
        }

        let operator_bp = *parser.get_bp_lookup().get(&token_kind).unwrap();
        let led = *parser.get_led_lookup().get(&token_kind).unwrap();
        left = led(parser, left, operator_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parser.current_token().value.clone();
            if value.contains('.') {
                let result = value.parse::<f64>();
                match result {
                    Ok(float) => Ok(Expr::Float(FloatLiteral {
                        value: float,
                        span: parser.advance().span.clone(),
                    })),
                    Err(_) => Err(Error::new(
                        ErrorImpl::NumberParseError { token: value },
                        parser.get_position(),
                    )),
                }
            } else {
                let result = value.parse::<i64>();
                match result {
                    Ok(int) => Ok(Expr::Int(IntLiteral {
                        value: int,
                        span: parser.advance().span.clone(),
                    })),
                    Err(_) => Err(Error::new(
                        ErrorImpl::NumberParseError { token: value },
                        parser.get_position(),
                    )),
                }
            }
        }
        TokenKind::String => Ok(Expr::Str(StringLiteral {
            value: parser.current_token().value.clone(),
            span: parser.advance().span.clone(),
        })),
        TokenKind::Identifier => Ok(Expr::Variable(VariableExpr {
            name: parser.current_token().value.clone(),
            referent: None,
            ty: None,
            span: parser.advance().span.clone(),
        })),
        TokenKind::True => Ok(Expr::Bool(BoolLiteral {
            value: true,
            span: parser.advance().span.clone(),
        })),
        TokenKind::False => Ok(Expr::Bool(BoolLiteral {
            value: false,
            span: parser.advance().span.clone(),
        })),
        TokenKind::None => Ok(Expr::None(NoneLiteral {
            span: parser.advance().span.clone(),
        })),
        _ => Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: parser.current_token().value.clone(),
            },
            parser.get_position(),
        )),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(Box::new(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        op: operator_token.value,
        left,
        right,
        ty: None,
    })))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(Box::new(UnaryExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: operand.get_span().end.clone(),
        },
        op: operator_token.value,
        operand,
        ty: None,
    })))
}

/// `()` is the empty tuple, `(a)` is just `a`, and `(a,)` or `(a, b)` are
/// tuples.
pub fn parse_grouping_or_tuple_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    if parser.current_token_kind() == TokenKind::CloseParen {
        let close = parser.advance().clone();
        return Ok(Expr::Tuple(TupleExpr {
            values: vec![],
            span: Span {
                start: open.span.start.clone(),
                end: close.span.end.clone(),
            },
        }));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() != TokenKind::Comma {
        parser.expect(TokenKind::CloseParen)?;
        return Ok(first);
    }

    let mut values = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        if parser.current_token_kind() == TokenKind::CloseParen {
            break;
        }
        values.push(parse_expr(parser, BindingPower::Default)?);
    }

    let close = parser.expect(TokenKind::CloseParen)?;
    Ok(Expr::Tuple(TupleExpr {
        values,
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
    }))
}

pub fn parse_matrix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    let mut values = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        values.push(parse_expr(parser, BindingPower::Default)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseBracket)?;
    Ok(Expr::Matrix(MatrixExpr {
        values,
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
    }))
}

/// Curly literals are sets unless a colon follows the first element, in
/// which case the whole literal is a dictionary. `{}` is an empty
/// dictionary.
pub fn parse_set_or_dictionary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let open = parser.advance().clone();

    if parser.current_token_kind() == TokenKind::CloseCurly {
        let close = parser.advance().clone();
        return Ok(Expr::Dictionary(DictionaryExpr {
            pairs: vec![],
            span: Span {
                start: open.span.start.clone(),
                end: close.span.end.clone(),
            },
        }));
    }

    let first = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        let mut pairs = vec![KeyValuePair {
            span: Span {
                start: first.get_span().start.clone(),
                end: value.get_span().end.clone(),
            },
            key: first,
            value,
        }];

        while parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            let key = parse_expr(parser, BindingPower::Default)?;
            parser.expect(TokenKind::Colon)?;
            let value = parse_expr(parser, BindingPower::Default)?;
            pairs.push(KeyValuePair {
                span: Span {
                    start: key.get_span().start.clone(),
                    end: value.get_span().end.clone(),
                },
                key,
                value,
            });
        }

        let close = parser.expect(TokenKind::CloseCurly)?;
        return Ok(Expr::Dictionary(DictionaryExpr {
            pairs,
            span: Span {
                start: open.span.start.clone(),
                end: close.span.end.clone(),
            },
        }));
    }

    let mut values = vec![first];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        values.push(parse_expr(parser, BindingPower::Default)?);
    }

    let close = parser.expect(TokenKind::CloseCurly)?;
    Ok(Expr::Set(SetExpr {
        values,
        span: Span {
            start: open.span.start.clone(),
            end: close.span.end.clone(),
        },
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();

    let callee = match left {
        Expr::Variable(variable) => variable,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("("),
                    message: String::from("calls must name a function directly"),
                },
                parser.get_position(),
            ))
        }
    };

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        arguments.push(parse_expr(parser, BindingPower::Default)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        }
    }

    let close = parser.expect(TokenKind::CloseParen)?;
    Ok(Expr::Call(CallExpr {
        span: Span {
            start: callee.span.start.clone(),
            end: close.span.end.clone(),
        },
        callee: callee.name,
        referent: None,
        arguments,
        ty: None,
    }))
}

/// Splits a raw template into text segments and `${...}` interpolations.
/// Each interpolation is tokenized and parsed on its own; positions inside
/// it are relative to the snippet.
pub fn parse_template_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let mut segments = vec![];
    let mut text = String::new();
    let mut chars = token.value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next();
            if !text.is_empty() {
                segments.push(TemplateSegment::Text(std::mem::take(&mut text)));
            }

            let mut inner = String::new();
            let mut depth = 1;
            for c in chars.by_ref() {
                if c == '{' {
                    depth += 1;
                } else if c == '}' {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                inner.push(c);
            }

            segments.push(TemplateSegment::Interpolation(parse_interpolation(
                parser, inner,
            )?));
        } else {
            text.push(ch);
        }
    }

    if !text.is_empty() {
        segments.push(TemplateSegment::Text(text));
    }

    Ok(Expr::Template(TemplateExpr {
        segments,
        span: token.span,
    }))
}

fn parse_interpolation(parser: &Parser, source: String) -> Result<Expr, Error> {
    let file = parser.get_file();
    let tokens = tokenize(source, Some((*file).clone()))?;

    let mut sub_parser = Parser::new(tokens, file);
    create_token_lookups(&mut sub_parser);
    parse_expr(&mut sub_parser, BindingPower::Default)
}
