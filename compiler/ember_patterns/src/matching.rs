//! The `match(p, o, acc)` algebra: structural matching of patterns against
//! runtime objects, plus `match` lifted to function paths and function
//! objects for call dispatch.

use crate::{FunctionObject, FunctionPath, Object};
use ember_ir::{LiteralValue, Name, Pattern};
use rustc_hash::FxHashMap;

/// Why a single pattern failed to match a single object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchError {
    /// A variable pattern bound the same name twice within one pattern (linear patterns only).
    DuplicateBinding(Name),
    /// Tag mismatch between pattern and object.
    TagMismatch { expected: Name, got: Name },
    /// Omega/composite shape mismatch (e.g. a literal pattern against a composite object).
    KindMismatch,
    /// Same tag and kind, but the literal payload differs.
    ValueMismatch,
    /// Same tag, composite shape, but child-count mismatch.
    ArityMismatch { expected: usize, got: usize },
}

/// Accumulated bindings produced by a successful match.
pub type Bindings = FxHashMap<Name, Object>;

/// Match `pattern` against `object`, recording bindings into `acc`.
///
/// Recurses on pattern/object shape (including arbitrarily deep self-loop
/// wrapping), so each recursive step runs under
/// [`ember_stack::ensure_sufficient_stack`].
pub fn match_pattern(pattern: &Pattern, object: &Object, acc: &mut Bindings) -> Result<(), MatchError> {
    ember_stack::ensure_sufficient_stack(|| match_pattern_inner(pattern, object, acc))
}

fn match_pattern_inner(pattern: &Pattern, object: &Object, acc: &mut Bindings) -> Result<(), MatchError> {
    match pattern {
        Pattern::Variable(name) => {
            if acc.contains_key(name) {
                return Err(MatchError::DuplicateBinding(*name));
            }
            acc.insert(*name, object.clone());
            Ok(())
        }
        Pattern::Literal { tag, value } => {
            if object.tag != *tag {
                return Err(MatchError::TagMismatch {
                    expected: *tag,
                    got: object.tag,
                });
            }
            let payload = object.payload().ok_or(MatchError::KindMismatch)?;
            let matches = match (value, payload) {
                (LiteralValue::Int(v), crate::Primitive::Int(o)) => v == o,
                (LiteralValue::Bool(v), crate::Primitive::Bool(o)) => v == o,
                _ => false,
            };
            if matches {
                Ok(())
            } else {
                Err(MatchError::ValueMismatch)
            }
        }
        Pattern::Object { tag, children } => {
            if object.tag != *tag {
                return Err(MatchError::TagMismatch {
                    expected: *tag,
                    got: object.tag,
                });
            }
            if object.is_omega() {
                // Self-loop rule: `Int n` binds `n` to the whole `Int k` object,
                // so `Int (Int n)` still matches `Int k`.
                if children.len() == 1 {
                    match_pattern(&children[0], object, acc)
                } else {
                    Err(MatchError::ArityMismatch {
                        expected: children.len(),
                        got: 1,
                    })
                }
            } else {
                let kids = object.children();
                if kids.len() != children.len() {
                    return Err(MatchError::ArityMismatch {
                        expected: children.len(),
                        got: kids.len(),
                    });
                }
                for (child_pattern, child_object) in children.iter().zip(kids) {
                    match_pattern(child_pattern, child_object, acc)?;
                }
                Ok(())
            }
        }
    }
}

/// Why a whole function path was rejected, citing the first incompatible argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathMismatch {
    Arity { expected: usize, got: usize },
    Pattern { arg_index: usize, reason: MatchError },
}

/// Match a function path's input patterns against `objs` positionally.
pub fn match_path(path: &FunctionPath, objs: &[Object]) -> Result<Bindings, PathMismatch> {
    if path.input_patterns.len() != objs.len() {
        return Err(PathMismatch::Arity {
            expected: path.input_patterns.len(),
            got: objs.len(),
        });
    }
    let mut acc = Bindings::default();
    for (index, (pattern, object)) in path.input_patterns.iter().zip(objs).enumerate() {
        match_pattern(pattern, object, &mut acc)
            .map_err(|reason| PathMismatch::Pattern { arg_index: index, reason })?;
    }
    Ok(acc)
}

/// Try each path of `f` in declared order; return the first that matches.
///
/// On total failure, returns one [`PathMismatch`] per path (in declared
/// order) so the caller can build a `NoPatternMatch` diagnostic citing every
/// rejected alternative.
pub fn match_function<'f>(
    f: &'f FunctionObject,
    objs: &[Object],
) -> Result<(Bindings, &'f FunctionPath), Vec<PathMismatch>> {
    let mut failures = Vec::with_capacity(f.paths.len());
    for path in &f.paths {
        match match_path(path, objs) {
            Ok(bindings) => return Ok((bindings, path)),
            Err(mismatch) => failures.push(mismatch),
        }
    }
    Err(failures)
}
