//! The closed set of error kinds the evaluator can raise.
//!
//! One `#[cold]` constructor function per kind, in the style this codebase's
//! evaluator crate funnels its error construction through (many small
//! `#[cold]` functions building a shared error type), rather than calling
//! `EvalError`'s variants directly at every call site.

use crate::diagnostics::{describe_object, describe_pattern};
use ember_ir::{Name, StringInterner};
use ember_patterns::{ArithmeticErrorKind, NativeError, PathMismatch};

/// One rejected path's reason, already rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFailure {
    pub path_index: usize,
    pub rendered: String,
}

/// Per-path breakdown for a failed function dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoPatternMatchDiagnostics(pub Vec<PathFailure>);

impl std::fmt::Display for NoPatternMatchDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for failure in &self.0 {
            writeln!(f, "  path {}: {}", failure.path_index, failure.rendered)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error("unbound variable: {0}")]
    UnboundVariable(String),

    #[error("no path matched the given arguments:\n{0}")]
    NoPatternMatch(NoPatternMatchDiagnostics),

    #[error("arity mismatch: expected {expected}, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("type mismatch: expected {expected_kind}, got {got}")]
    TypeMismatch { expected_kind: &'static str, got: String },

    #[error("arithmetic error: {0}")]
    ArithmeticError(ArithmeticErrorKind),

    #[error("duplicate binding: {0}")]
    DuplicateBinding(String),

    #[error("malformed AST: {0}")]
    MalformedAst(String),

    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
}

#[cold]
pub fn unbound_variable(interner: &StringInterner, name: Name) -> EvalError {
    EvalError::UnboundVariable(interner.resolve(name).to_owned())
}

#[cold]
pub fn no_pattern_match(
    interner: &StringInterner,
    failures: &[(usize, &ember_patterns::FunctionPath, PathMismatch)],
) -> EvalError {
    let rendered = failures
        .iter()
        .map(|&(index, path, ref mismatch)| PathFailure {
            path_index: index,
            rendered: render_mismatch(interner, path, mismatch),
        })
        .collect();
    EvalError::NoPatternMatch(NoPatternMatchDiagnostics(rendered))
}

fn render_mismatch(
    interner: &StringInterner,
    path: &ember_patterns::FunctionPath,
    mismatch: &PathMismatch,
) -> String {
    match mismatch {
        PathMismatch::Arity { expected, got } => {
            format!("arity mismatch (expected {expected} arguments, got {got})")
        }
        PathMismatch::Pattern { arg_index, reason } => {
            let pattern = &path.input_patterns[*arg_index];
            let pattern_text = describe_pattern(interner, pattern);
            match reason {
                ember_patterns::MatchError::DuplicateBinding(name) => format!(
                    "argument {arg_index}: duplicate binding of `{}` within one pattern",
                    interner.resolve(*name)
                ),
                ember_patterns::MatchError::TagMismatch { got, .. } => format!(
                    "argument {arg_index}: incompatible with {pattern_text} (got tag `{}`)",
                    interner.resolve(*got)
                ),
                _ => format!("argument {arg_index}: incompatible with {pattern_text}"),
            }
        }
    }
}

#[cold]
pub fn arity_mismatch(expected: usize, got: usize) -> EvalError {
    EvalError::ArityMismatch { expected, got }
}

#[cold]
pub fn duplicate_binding(interner: &StringInterner, name: Name) -> EvalError {
    EvalError::DuplicateBinding(interner.resolve(name).to_owned())
}

#[cold]
pub fn malformed_ast(message: impl Into<String>) -> EvalError {
    EvalError::MalformedAst(message.into())
}

#[cold]
pub fn resource_exhausted(max_cells: usize) -> EvalError {
    EvalError::ResourceExhausted(format!("exceeded {max_cells} driver steps"))
}

#[cold]
pub fn from_native_error(interner: &StringInterner, error: NativeError) -> EvalError {
    match error {
        NativeError::Arithmetic(kind) => EvalError::ArithmeticError(kind),
        NativeError::TypeMismatch { expected_kind, got } => EvalError::TypeMismatch {
            expected_kind,
            got: describe_object(interner, &got),
        },
    }
}

#[cfg(test)]
mod error_tests {
    use super::*;

    #[test]
    fn unbound_variable_message_cites_the_name() {
        let interner = StringInterner::new();
        let name = interner.intern("x");
        let err = unbound_variable(&interner, name);
        assert_eq!(err.to_string(), "unbound variable: x");
    }

    #[test]
    fn arithmetic_error_displays_the_native_kind() {
        let err = EvalError::ArithmeticError(ArithmeticErrorKind::DivisionByZero);
        assert_eq!(err.to_string(), "arithmetic error: division by zero");
    }
}
