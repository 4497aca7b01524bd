use crate::{analyzer::context::EntityId, Span};

use super::{expressions::Expr, types::Type};

/// The closed set of statement node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Binding(BindingStmt),
    Expression(ExpressionStmt),
    Return(ReturnStmt),
    While(WhileStmt),
    If(IfStmt),
    FnDecl(FnDeclStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Binding(s) => &s.span,
            Stmt::Expression(s) => &s.span,
            Stmt::Return(s) => &s.span,
            Stmt::While(s) => &s.span,
            Stmt::If(s) => &s.span,
            Stmt::FnDecl(s) => &s.span,
        }
    }
}

/// An ordered sequence of statements analyzed in one fresh child scope.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

/// One target name of a binding. `entity` and `is_declaration` are filled
/// in by the analyzer: mutable bindings to an already-declared mutable name
/// become assignments to that entity instead of declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingTarget {
    pub name: String,
    pub entity: Option<EntityId>,
    pub is_declaration: bool,
    pub span: Span,
}

/// `a, b := 1, 2` (immutable) or `a, b = 1, 2` (mutable).
#[derive(Debug, Clone, PartialEq)]
pub struct BindingStmt {
    pub targets: Vec<BindingTarget>,
    pub mutable: bool,
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: BlockStmt,
    pub span: Span,
}

/// `if`/`elif` cases in order, plus the optional `else` statements.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub cases: Vec<Case>,
    pub alternate: Option<Vec<Stmt>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Case {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    pub entity: Option<EntityId>,
    pub span: Span,
}

/// `fn name(a: int, b: string) -> int: ...`. The function entity is
/// declared before the body is analyzed, so recursive calls resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclStmt {
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Type,
    pub body: BlockStmt,
    pub entity: Option<EntityId>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub block: BlockStmt,
}
