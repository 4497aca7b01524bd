//! Tree optimization module.
//!
//! Rewrites the analyzed tree by value: every node is rebuilt bottom-up,
//! constant subexpressions are folded, and `while` loops with a literal
//! false condition are dropped. Optimization never fails and never
//! changes observable semantics, so folds that could differ at runtime
//! (division by zero, integer overflow) are left alone.

pub mod optimizer;
