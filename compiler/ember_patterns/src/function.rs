//! Function paths, function objects, and the evaluables their bodies run.

use crate::Object;
use ember_ir::{ExprId, Frame, Name, Pattern};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// The two ways division or modulo can fail; the only built-in failure mode
/// the spec names outright.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArithmeticErrorKind {
    DivisionByZero,
    ModuloByZero,
}

impl std::fmt::Display for ArithmeticErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticErrorKind::DivisionByZero => write!(f, "division by zero"),
            ArithmeticErrorKind::ModuloByZero => write!(f, "modulo by zero"),
        }
    }
}

/// A native action can fail with a division/modulo error, or — defensively,
/// since the pattern layer is expected to have already ruled this out — with
/// a type mismatch if its declared pattern signature was somehow violated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativeError {
    Arithmetic(ArithmeticErrorKind),
    TypeMismatch { expected_kind: &'static str, got: Object },
}

pub type NativeResult = Result<Object, NativeError>;

/// A native action: reads its arguments and computes one result object.
pub type NativeFn = Rc<dyn Fn(&[Object]) -> NativeResult>;

/// The body a function path reduces to once its patterns match.
#[derive(Clone)]
pub enum Evaluable {
    /// An AST body plus a snapshot of the free variables it captured at
    /// definition time (name → store slab index), and the frame it was
    /// lexically defined under.
    Closure {
        body: ExprId,
        snapshot: FxHashMap<Name, usize>,
        captured_frame: Frame,
    },
    /// A built-in action, given the matched argument objects in declaration order.
    Native(NativeFn),
}

impl std::fmt::Debug for Evaluable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Evaluable::Closure { body, .. } => {
                f.debug_struct("Closure").field("body", body).finish()
            }
            Evaluable::Native(_) => f.write_str("Native(..)"),
        }
    }
}

/// One alternative of a multi-path function.
#[derive(Clone, Debug)]
pub struct FunctionPath {
    pub input_patterns: Vec<Pattern>,
    /// Carried per the data model but not verified at `FunCleanup`; see
    /// `SPEC_FULL.md` §9 for why this stays an inert extension point.
    pub output_pattern: Pattern,
    pub body: Evaluable,
}

impl FunctionPath {
    pub fn arity(&self) -> usize {
        self.input_patterns.len()
    }
}

/// A multi-path function with a fixed declared arity.
///
/// `bound` holds arguments already supplied by a prior partial application;
/// a function object's *effective* arity for dispatch purposes is
/// `arity - bound.len()`. An ordinary (non-curried) function has an empty
/// `bound` list.
#[derive(Clone, Debug)]
pub struct FunctionObject {
    pub paths: Vec<FunctionPath>,
    pub arity: usize,
    pub bound: Vec<Object>,
}

impl FunctionObject {
    /// # Panics
    /// Panics if any path's arity disagrees with `arity` (a `MalformedAst`
    /// condition the translator is responsible for rejecting before this
    /// constructor is ever reached).
    pub fn new(paths: Vec<FunctionPath>, arity: usize) -> Self {
        debug_assert!(
            paths.iter().all(|p| p.arity() == arity),
            "all paths of a function object must agree on arity"
        );
        FunctionObject {
            paths,
            arity,
            bound: Vec::new(),
        }
    }

    pub fn effective_arity(&self) -> usize {
        self.arity - self.bound.len()
    }

    /// A residual function object carrying `extra` appended to `bound`.
    pub fn apply_partial(&self, extra: &[Object]) -> FunctionObject {
        let mut bound = self.bound.clone();
        bound.extend(extra.iter().cloned());
        FunctionObject {
            paths: self.paths.clone(),
            arity: self.arity,
            bound,
        }
    }
}
