use crate::{analyzer::context::EntityId, Span};

use super::types::Type;

/// The closed set of expression node kinds. Every pass over the tree
/// (analyze, optimize, generate) matches on this exhaustively, so adding a
/// kind is a compile-time obligation in each pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Bool(BoolLiteral),
    Int(IntLiteral),
    Float(FloatLiteral),
    Str(StringLiteral),
    None(NoneLiteral),
    Variable(VariableExpr),
    Binary(Box<BinaryExpr>),
    Unary(Box<UnaryExpr>),
    Call(CallExpr),
    Tuple(TupleExpr),
    Matrix(MatrixExpr),
    Set(SetExpr),
    Dictionary(DictionaryExpr),
    Template(TemplateExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Bool(e) => &e.span,
            Expr::Int(e) => &e.span,
            Expr::Float(e) => &e.span,
            Expr::Str(e) => &e.span,
            Expr::None(e) => &e.span,
            Expr::Variable(e) => &e.span,
            Expr::Binary(e) => &e.span,
            Expr::Unary(e) => &e.span,
            Expr::Call(e) => &e.span,
            Expr::Tuple(e) => &e.span,
            Expr::Matrix(e) => &e.span,
            Expr::Set(e) => &e.span,
            Expr::Dictionary(e) => &e.span,
            Expr::Template(e) => &e.span,
        }
    }

    /// The resolved type attached during analysis. Literal and composite
    /// kinds carry their type intrinsically; reference and operator kinds
    /// have it filled in by the analyzer (None before analysis).
    pub fn get_type(&self) -> Option<Type> {
        match self {
            Expr::Bool(_) => Some(Type::Bool),
            Expr::Int(_) => Some(Type::Int),
            Expr::Float(_) => Some(Type::Float),
            Expr::Str(_) => Some(Type::String),
            Expr::None(_) => Some(Type::None),
            Expr::Variable(e) => e.ty,
            Expr::Binary(e) => e.ty,
            Expr::Unary(e) => e.ty,
            Expr::Call(e) => e.ty,
            Expr::Tuple(_) => Some(Type::Tuple),
            Expr::Matrix(_) => Some(Type::Matrix),
            Expr::Set(_) => Some(Type::Set),
            Expr::Dictionary(_) => Some(Type::Dictionary),
            Expr::Template(_) => Some(Type::TemplateLiteral),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLiteral {
    pub value: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatLiteral {
    pub value: f64,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringLiteral {
    pub value: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoneLiteral {
    pub span: Span,
}

/// A name use. `referent` is the identity handle of the entity the name
/// resolved to; it is established once during analysis and reused at
/// generation time, never re-resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableExpr {
    pub name: String,
    pub referent: Option<EntityId>,
    pub ty: Option<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: String,
    pub left: Expr,
    pub right: Expr,
    pub ty: Option<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: String,
    pub operand: Expr,
    pub ty: Option<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub referent: Option<EntityId>,
    pub arguments: Vec<Expr>,
    pub ty: Option<Type>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleExpr {
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatrixExpr {
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetExpr {
    pub values: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictionaryExpr {
    pub pairs: Vec<KeyValuePair>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValuePair {
    pub key: Expr,
    pub value: Expr,
    pub span: Span,
}

/// A backtick template: literal text segments interleaved with
/// interpolated expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExpr {
    pub segments: Vec<TemplateSegment>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    Text(String),
    Interpolation(Expr),
}
