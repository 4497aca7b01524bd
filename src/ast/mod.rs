/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for the statement node kinds
/// - types: The Lark type registry and compatibility rules
pub mod expressions;
pub mod statements;
pub mod types;
