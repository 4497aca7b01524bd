//! Code generation module.
//!
//! Transforms the analyzed and optimized tree into JavaScript source
//! text, one line at a time. It handles:
//!
//! - Hygienic renaming of every entity via numeric suffixes
//! - Operator spelling differences between the two languages
//! - Emitting the builtin library ahead of user code
//! - Block indentation through a configurable indent unit
//!
//! Generation never fails; analysis has already rejected every program
//! this module cannot express.

pub mod codegen;
pub mod expr;
pub mod stdlib;
pub mod stmt;

#[cfg(test)]
mod tests;
