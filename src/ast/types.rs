use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// The closed set of Lark types. Each name maps to exactly one value, so
/// type identity is plain equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Bool,
    Int,
    Float,
    String,
    None,
    Tuple,
    Matrix,
    Dictionary,
    Set,
    TemplateLiteral,
}

impl Type {
    pub fn for_name(name: &str) -> Option<Type> {
        match name {
            "bool" => Some(Type::Bool),
            "int" => Some(Type::Int),
            "float" => Some(Type::Float),
            "string" => Some(Type::String),
            "none" => Some(Type::None),
            "tuple" => Some(Type::Tuple),
            "matrix" => Some(Type::Matrix),
            "dictionary" => Some(Type::Dictionary),
            "set" => Some(Type::Set),
            "templateliteral" => Some(Type::TemplateLiteral),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Type::Bool => "bool",
            Type::Int => "int",
            Type::Float => "float",
            Type::String => "string",
            Type::None => "none",
            Type::Tuple => "tuple",
            Type::Matrix => "matrix",
            Type::Dictionary => "dictionary",
            Type::Set => "set",
            Type::TemplateLiteral => "templateliteral",
        }
    }

    /// In more sophisticated languages, compatibility would be more complex.
    pub fn is_compatible_with(self, other: Type) -> bool {
        self == other
    }

    pub fn must_be(self, target: Type, position: &Position) -> Result<(), Error> {
        if !self.is_compatible_with(target) {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from(target.name()),
                    received: String::from(self.name()),
                },
                position.clone(),
            ));
        }
        Ok(())
    }

    /// Kept distinct from plain equality so a future widening rule only has
    /// to change this one place, not its call sites.
    pub fn must_be_mutually_compatible_with(
        self,
        other: Type,
        position: &Position,
    ) -> Result<(), Error> {
        if !(self.is_compatible_with(other) || other.is_compatible_with(self)) {
            return Err(Error::new(
                ErrorImpl::TypeMismatch {
                    expected: String::from(self.name()),
                    received: String::from(other.name()),
                },
                position.clone(),
            ));
        }
        Ok(())
    }
}
