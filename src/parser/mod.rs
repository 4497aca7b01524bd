//! Parser for building the syntax tree.
//!
//! A Pratt parser: NUD (null denotation) handlers start an expression,
//! LED (left denotation) handlers extend one, and binding powers decide
//! how far an infix operator reaches. Statement forms dispatch through a
//! lookup table keyed on the leading token.
//!
//! Blocks are delimited by Indent/Dedent tokens from the lexer, so the
//! parser itself never inspects whitespace.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
