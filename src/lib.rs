//! # AST Mutation Core
//!
//! The engine at the heart of a mutation testing tool: given a parsed syntax
//! tree, a mutation operator, and an occurrence index, it rewrites exactly one
//! eligible node and leaves the rest of the tree untouched.
//!
//! This library provides:
//! - A strongly-typed syntax tree the external parser hands in
//! - A depth-first traversal contract shared by every operator
//! - An activation core that selects the Nth eligible site of a pass
//! - A counting core that discovers how many eligible sites a tree contains
//! - The operator catalog (literal flips, loop-control swaps, relational
//!   operator substitution, and friends)
//!
//! Parsing, rendering mutants back to source, running test suites against
//! them, and reporting all belong to the outer harness.
//!
//! ## Example
//!
//! ```rust
//! use ast_mutation::ast::Node;
//! use ast_mutation::mutation::{apply_mutation, count_mutation_sites};
//! use ast_mutation::operators::BooleanReplacer;
//!
//! fn main() -> Result<(), ast_mutation::MutationError> {
//!     // True
//!     let tree = Node::Module {
//!         body: vec![Node::Expr {
//!             value: Box::new(Node::Bool { value: true }),
//!         }],
//!     };
//!
//!     assert_eq!(count_mutation_sites(&BooleanReplacer, &tree)?, 1);
//!
//!     let (mutant, record) = apply_mutation(&BooleanReplacer, 0, &tree)?;
//!     assert!(record.is_some());
//!     assert_ne!(mutant, tree);
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod core;
pub mod error;
pub mod mutation;
pub mod operators;
pub mod visit;

pub use error::{MutationError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::ast::{BinOpKind, BoolOpKind, CmpOp, Node};
    pub use crate::core::{
        ActivationCore, ActivationRecord, CountingCore, MutationCore, MutationSite,
    };
    pub use crate::error::{MutationError, Result};
    pub use crate::mutation::{apply_mutation, count_mutation_sites};
    pub use crate::operators::{all_operators, Operator};
    pub use crate::visit::MutationVisitor;
}
