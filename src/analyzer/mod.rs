//! Semantic analysis module.
//!
//! This module checks the parsed tree for type and scope correctness and
//! binds every name use to its declaring entity. It handles:
//!
//! - The lexical scope chain with shadowing and outward lookup
//! - Declaration rules (immutable names declare once per scope)
//! - Per-node-kind type rules for operators and constructs
//! - Attaching `type` and `referent` annotations for later passes
//! - Rejecting `return` outside a function body
//!
//! Analysis is the only pass that can fail; the first violation in
//! tree-walk order aborts the compilation.

pub mod analyzer;
pub mod context;

#[cfg(test)]
mod tests;
