//! Runtime object model and the pattern-matching algebra that dispatches
//! function calls over it.

mod contains;
mod function;
mod matching;
mod object;

pub use contains::contains;
pub use function::{
    ArithmeticErrorKind, Evaluable, FunctionObject, FunctionPath, NativeError, NativeFn, NativeResult,
};
pub use matching::{match_function, match_path, match_pattern, Bindings, MatchError, PathMismatch};
pub use object::{Content, Object, Primitive, WellKnownTags};
