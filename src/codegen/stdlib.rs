//! The builtin library.
//!
//! Builtins are declared into the root scope before analysis so user
//! code can call them, and their JavaScript stubs are emitted ahead of
//! user code so every call site has a definition to reach. Each builtin
//! is an ordinary entity and goes through the same hygienic renaming as
//! user declarations.

use crate::{
    analyzer::context::Context,
    ast::types::Type,
    errors::errors::Error,
    Position,
};

use super::codegen::Generator;

pub struct Builtin {
    pub name: &'static str,
    pub arity: usize,
    pub return_type: Type,
    pub params: &'static str,
    pub body: &'static str,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "print",
        arity: 1,
        return_type: Type::None,
        params: "_",
        body: "console.log(_);",
    },
    Builtin {
        name: "sqrt",
        arity: 1,
        return_type: Type::Float,
        params: "_",
        body: "return Math.sqrt(_);",
    },
];

/// Declares every builtin into the root scope of a fresh context.
pub fn register_builtins(context: &mut Context) -> Result<(), Error> {
    for builtin in BUILTINS {
        context.declare(
            builtin.name,
            builtin.return_type,
            false,
            Some(builtin.arity),
            &Position::null(),
        )?;
    }
    Ok(())
}

/// Emits the stub definitions, in declaration order. This runs before
/// any user code is generated, so builtins always take the first name
/// suffixes.
pub fn generate_library(generator: &mut Generator) {
    for builtin in BUILTINS {
        let id = generator.get_context().resolve(builtin.name).unwrap();
        let name = generator.js_name(id);
        generator.emit(
            0,
            format!("function {}({}) {{{}}}", name, builtin.params, builtin.body),
        );
    }
}
