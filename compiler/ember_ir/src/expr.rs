//! Flat, append-only expression arena.
//!
//! Function definitions are referenced from multiple call sites and their
//! bodies are shared by every closure created from them, so expression
//! subtrees live in one contiguous, shared, acyclic arena indexed by
//! [`ExprId`] rather than behind per-node `Box`.

use super::{Name, Pattern};

/// Index into an [`ExprArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ExprId(u32);

impl ExprId {
    #[inline]
    const fn new(index: u32) -> Self {
        ExprId(index)
    }

    #[inline]
    const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Debug for ExprId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExprId({})", self.0)
    }
}

/// One alternative of a multi-path function definition, as written in source.
///
/// Mirrors [`crate::Pattern`]'s independence from arena sharing: each path
/// belongs to exactly one `FunDef` node, so patterns are owned trees here too.
#[derive(Clone, Debug)]
pub struct PathDef {
    pub input_patterns: Vec<Pattern>,
    pub output_pattern: Pattern,
    pub body: ExprId,
}

impl PathDef {
    pub fn arity(&self) -> usize {
        self.input_patterns.len()
    }
}

/// An AST node.
#[derive(Clone, Debug)]
pub enum Expr {
    IntLit(i64),
    BoolLit(bool),
    Var(Name),
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    FunDef {
        paths: Vec<PathDef>,
    },
    Let {
        pattern: Pattern,
        value: ExprId,
        body: ExprId,
    },
}

/// Flat, append-only storage for [`Expr`] nodes.
#[derive(Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self { exprs: Vec::new() }
    }

    /// Append `expr`, returning a stable id for it.
    pub fn push(&mut self, expr: Expr) -> ExprId {
        let index = u32::try_from(self.exprs.len())
            .unwrap_or_else(|_| panic!("expression arena exceeded {} entries", u32::MAX));
        let id = ExprId::new(index);
        self.exprs.push(expr);
        id
    }

    pub fn get(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }
}
