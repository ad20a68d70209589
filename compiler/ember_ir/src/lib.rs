//! Identifiers, pattern syntax, scope-frame shape, and the expression arena
//! shared by the rest of the Ember interpreter.
//!
//! # Design
//! - Intern identifiers into a dense [`Name`] rather than comparing strings.
//! - Flatten the expression tree into an append-only [`ExprArena`] indexed by
//!   [`ExprId`], so function bodies can be shared by many closures without
//!   cloning the tree.
//! - Scope frames ([`Frame`]) are reference-counted layer stacks forming a
//!   tree, never a graph, so closures can hold a lexical-parent link without
//!   creating a cycle.

mod expr;
mod free_vars;
mod interner;
mod name;
mod pattern;
mod scope;

pub use expr::{Expr, ExprArena, ExprId, PathDef};
pub use free_vars::{free_vars, path_free_vars};
pub use interner::StringInterner;
pub use name::Name;
pub use pattern::{LiteralValue, Pattern};
pub use scope::{Frame, Layer};
