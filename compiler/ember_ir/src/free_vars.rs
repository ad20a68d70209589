//! Free-variable computation over the expression arena.
//!
//! Free variables of a node are the identifiers it references but does not
//! itself bind (via a `let` pattern, a function parameter pattern, or the
//! node itself). This is a pure traversal; it recurses on AST shape, which
//! can nest arbitrarily deeply, so each recursive step runs under
//! [`ember_stack::ensure_sufficient_stack`].

use super::{Expr, ExprArena, ExprId, Name, PathDef};
use rustc_hash::FxHashSet;

/// Free variables referenced by the expression at `id`.
pub fn free_vars(arena: &ExprArena, id: ExprId) -> FxHashSet<Name> {
    ember_stack::ensure_sufficient_stack(|| free_vars_inner(arena, id))
}

fn free_vars_inner(arena: &ExprArena, id: ExprId) -> FxHashSet<Name> {
    match arena.get(id) {
        Expr::IntLit(_) | Expr::BoolLit(_) => FxHashSet::default(),
        Expr::Var(name) => FxHashSet::from_iter([*name]),
        Expr::Call { callee, args } => {
            let mut set = free_vars(arena, *callee);
            for arg in args {
                set.extend(free_vars(arena, *arg));
            }
            set
        }
        Expr::FunDef { paths } => {
            let mut set = FxHashSet::default();
            for path in paths {
                set.extend(path_free_vars(arena, path));
            }
            set
        }
        Expr::Let {
            pattern,
            value,
            body,
        } => {
            let mut set = free_vars(arena, *value);
            let mut body_free = free_vars(arena, *body);
            let mut bound = Vec::new();
            pattern.bound_names(&mut bound);
            for name in bound {
                body_free.remove(&name);
            }
            set.extend(body_free);
            set
        }
    }
}

/// Free variables of a function path: free variables of its body, minus the
/// identifiers its input patterns bind. This is what a closure's snapshot
/// must capture.
pub fn path_free_vars(arena: &ExprArena, path: &PathDef) -> FxHashSet<Name> {
    let mut body_free = free_vars(arena, path.body);
    let mut bound = Vec::new();
    for pattern in &path.input_patterns {
        pattern.bound_names(&mut bound);
    }
    for name in bound {
        body_free.remove(&name);
    }
    body_free
}
