//! The evaluator's work-stack elements ("continuation-as-cells").
//!
//! A [`Cell`] is one pending step of evaluation. The driver pops cells off a
//! stack and visits them one at a time, so the depth of user-level recursion
//! never grows the host Rust call stack — only this stack.

use ember_ir::{ExprId, Pattern};
use ember_patterns::{FunctionObject, Object};
use std::rc::Rc;

/// One pending step of evaluation.
pub enum Cell {
    /// Push `value` directly onto the value stack.
    Literal(Object),
    /// Resolve a variable reference against the current scope and push its value.
    VarRef(ember_ir::Name),
    /// Evaluate a call's callee, then dispatch its arguments via [`Cell::FunArgs`].
    FunInit { callee: ExprId, args: Vec<ExprId> },
    /// A function value is on top of the value stack; apply it to `args`.
    ///
    /// Handles over- and under-application uniformly: only
    /// `f.effective_arity()` arguments are consumed by the forthcoming
    /// [`Cell::FunCall`]; anything left over is re-dispatched against the
    /// call's result once that result appears on the value stack.
    FunArgs { args: Vec<ExprId> },
    /// `arity` already-evaluated arguments are on top of the value stack;
    /// dispatch them against `f`.
    FunCall { f: Rc<FunctionObject>, arity: usize },
    /// Restore the caller's scope frame after a call's body has produced its result.
    FunCleanup { restore_frame: ember_ir::Frame },
    /// Evaluate a `let` binding's value, then bind it via [`Cell::LetBind`].
    LetInit {
        pattern: Pattern,
        value: ExprId,
        body: ExprId,
    },
    /// A value is on top of the value stack; match it against `pattern`,
    /// open a new scope, bind the results, and evaluate `body`.
    LetBind { pattern: Pattern, body: ExprId },
    /// Pop the innermost scope layer opened by a `let`.
    ScopePop,
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Literal(object) => write!(f, "Literal({object:?})"),
            Cell::VarRef(name) => write!(f, "VarRef({name:?})"),
            Cell::FunInit { callee, args } => {
                write!(f, "FunInit {{ callee: {callee:?}, args: {args:?} }}")
            }
            Cell::FunArgs { args } => write!(f, "FunArgs {{ args: {args:?} }}"),
            Cell::FunCall { arity, .. } => write!(f, "FunCall {{ arity: {arity} }}"),
            Cell::FunCleanup { .. } => write!(f, "FunCleanup"),
            Cell::LetInit { value, body, .. } => {
                write!(f, "LetInit {{ value: {value:?}, body: {body:?} }}")
            }
            Cell::LetBind { body, .. } => write!(f, "LetBind {{ body: {body:?} }}"),
            Cell::ScopePop => write!(f, "ScopePop"),
        }
    }
}
