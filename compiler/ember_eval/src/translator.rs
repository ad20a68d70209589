//! Translation from an [`Expr`] node to the [`Cell`] that begins evaluating it.

use crate::cell::Cell;
use crate::errors::{self, EvalError};
use ember_ir::{Expr, ExprArena, ExprId, StringInterner};
use ember_patterns::{Evaluable, FunctionObject, FunctionPath, WellKnownTags};
use ember_store::Store;

/// Read-only context threaded through translation: the expression arena, the
/// well-known primitive tags, and the string interner. Bundled because every
/// translation step needs all three and they never change mid-run.
pub struct Ctx<'a> {
    pub arena: &'a ExprArena,
    pub tags: &'a WellKnownTags,
    pub interner: &'a StringInterner,
}

/// Translate `id` into the cell that begins evaluating it against `store`'s
/// current scope.
pub fn translate(ctx: &Ctx<'_>, store: &Store, id: ExprId) -> Result<Cell, EvalError> {
    match ctx.arena.get(id) {
        Expr::IntLit(v) => Ok(Cell::Literal(ctx.tags.int(*v))),
        Expr::BoolLit(v) => Ok(Cell::Literal(ctx.tags.bool(*v))),
        Expr::Var(name) => Ok(Cell::VarRef(*name)),
        Expr::Call { callee, args } => Ok(Cell::FunInit {
            callee: *callee,
            args: args.clone(),
        }),
        Expr::FunDef { paths } => {
            let function = build_function_object(ctx, store, paths)?;
            Ok(Cell::Literal(ctx.tags.function(function)))
        }
        Expr::Let { pattern, value, body } => Ok(Cell::LetInit {
            pattern: pattern.clone(),
            value: *value,
            body: *body,
        }),
    }
}

/// Build a `FunctionObject` from a `FunDef`'s declared paths, snapshotting
/// each path's free variables out of `store`'s current scope.
fn build_function_object(
    ctx: &Ctx<'_>,
    store: &Store,
    paths: &[ember_ir::PathDef],
) -> Result<FunctionObject, EvalError> {
    let arity = paths
        .first()
        .map(ember_ir::PathDef::arity)
        .ok_or_else(|| errors::malformed_ast("function definition with no paths"))?;
    if paths.iter().any(|p| p.arity() != arity) {
        return Err(errors::malformed_ast(
            "every path of a function definition must declare the same arity",
        ));
    }

    let captured_frame = store.current_frame();
    let mut built_paths = Vec::with_capacity(paths.len());
    for path in paths {
        let free = ember_ir::path_free_vars(ctx.arena, path);
        let snapshot = store
            .lookup_all(free)
            .map_err(|name| errors::unbound_variable(ctx.interner, name))?;
        built_paths.push(FunctionPath {
            input_patterns: path.input_patterns.clone(),
            output_pattern: path.output_pattern.clone(),
            body: Evaluable::Closure {
                body: path.body,
                snapshot,
                captured_frame: captured_frame.clone(),
            },
        });
    }
    Ok(FunctionObject::new(built_paths, arity))
}
