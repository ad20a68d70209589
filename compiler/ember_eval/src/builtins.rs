//! Installs the primitive built-in functions into a fresh store's root scope.

use ember_ir::StringInterner;
use ember_patterns::{ArithmeticErrorKind, Evaluable, FunctionObject, FunctionPath, NativeError, Object, WellKnownTags};
use ember_store::Store;
use std::rc::Rc;

fn expect_int(obj: &Object) -> Result<i64, NativeError> {
    obj.as_int().ok_or_else(|| NativeError::TypeMismatch {
        expected_kind: "Int",
        got: obj.clone(),
    })
}

fn expect_bool(obj: &Object) -> Result<bool, NativeError> {
    obj.as_bool().ok_or_else(|| NativeError::TypeMismatch {
        expected_kind: "Bool",
        got: obj.clone(),
    })
}

fn int_binary(
    tags: Rc<WellKnownTags>,
    op: impl Fn(i64, i64) -> Result<i64, NativeError> + 'static,
) -> ember_patterns::NativeFn {
    Rc::new(move |args: &[Object]| {
        let a = expect_int(&args[0])?;
        let b = expect_int(&args[1])?;
        op(a, b).map(|v| tags.int(v))
    })
}

fn int_compare(tags: Rc<WellKnownTags>, op: impl Fn(i64, i64) -> bool + 'static) -> ember_patterns::NativeFn {
    Rc::new(move |args: &[Object]| {
        let a = expect_int(&args[0])?;
        let b = expect_int(&args[1])?;
        Ok(tags.bool(op(a, b)))
    })
}

fn bool_binary(tags: Rc<WellKnownTags>, op: impl Fn(bool, bool) -> bool + 'static) -> ember_patterns::NativeFn {
    Rc::new(move |args: &[Object]| {
        let a = expect_bool(&args[0])?;
        let b = expect_bool(&args[1])?;
        Ok(tags.bool(op(a, b)))
    })
}

/// Build a binary native function object whose parameters are each matched
/// against `<tag a> <tag b>` (the self-loop rule still binds the whole
/// matched object to `a`/`b`, so the native body's `full_args` reads are
/// unaffected), so a type-wrong operand is rejected by dispatch itself
/// (`NoPatternMatch`) rather than reaching the native body's own type check.
fn binary_native_typed(interner: &StringInterner, tag: ember_ir::Name, native: ember_patterns::NativeFn) -> FunctionObject {
    let a = interner.intern("__a");
    let b = interner.intern("__b");
    let path = FunctionPath {
        input_patterns: vec![
            ember_ir::Pattern::object(tag, vec![ember_ir::Pattern::variable(a)]),
            ember_ir::Pattern::object(tag, vec![ember_ir::Pattern::variable(b)]),
        ],
        output_pattern: ember_ir::Pattern::variable(a),
        body: Evaluable::Native(native),
    };
    FunctionObject::new(vec![path], 2)
}

/// Build a unary native function object whose one parameter is matched
/// against `<tag a>`, same rationale as [`binary_native_typed`].
fn unary_native_typed(interner: &StringInterner, tag: ember_ir::Name, native: ember_patterns::NativeFn) -> FunctionObject {
    let a = interner.intern("__a");
    let path = FunctionPath {
        input_patterns: vec![ember_ir::Pattern::object(tag, vec![ember_ir::Pattern::variable(a)])],
        output_pattern: ember_ir::Pattern::variable(a),
        body: Evaluable::Native(native),
    };
    FunctionObject::new(vec![path], 1)
}

/// Build a unary native function object over one variable-pattern parameter.
/// Used only by `trace`, which must accept any object, not just `Int`/`Bool`.
fn unary_native_any(interner: &StringInterner, native: ember_patterns::NativeFn) -> FunctionObject {
    let a = interner.intern("__a");
    let path = FunctionPath {
        input_patterns: vec![ember_ir::Pattern::variable(a)],
        output_pattern: ember_ir::Pattern::variable(a),
        body: Evaluable::Native(native),
    };
    FunctionObject::new(vec![path], 1)
}

/// Register `+ - * / % < <= > >= == && || not neg trace` into `store`'s
/// current (root) scope, so ordinary variable lookup resolves them.
pub fn install_builtins(store: &mut Store, interner: &StringInterner, tags: &WellKnownTags) {
    let tags_rc = Rc::new(WellKnownTags {
        int: tags.int,
        bool_: tags.bool_,
        function: tags.function,
    });

    let add = int_binary(tags_rc.clone(), |a, b| Ok(a.wrapping_add(b)));
    let sub = int_binary(tags_rc.clone(), |a, b| Ok(a.wrapping_sub(b)));
    let mul = int_binary(tags_rc.clone(), |a, b| Ok(a.wrapping_mul(b)));
    let div = int_binary(tags_rc.clone(), |a, b| {
        if b == 0 {
            Err(NativeError::Arithmetic(ArithmeticErrorKind::DivisionByZero))
        } else {
            Ok(a / b)
        }
    });
    let rem = int_binary(tags_rc.clone(), |a, b| {
        if b == 0 {
            Err(NativeError::Arithmetic(ArithmeticErrorKind::ModuloByZero))
        } else {
            Ok(a % b)
        }
    });
    let lt = int_compare(tags_rc.clone(), |a, b| a < b);
    let le = int_compare(tags_rc.clone(), |a, b| a <= b);
    let gt = int_compare(tags_rc.clone(), |a, b| a > b);
    let ge = int_compare(tags_rc.clone(), |a, b| a >= b);
    let eq = int_compare(tags_rc.clone(), |a, b| a == b);
    let and = bool_binary(tags_rc.clone(), |a, b| a && b);
    let or = bool_binary(tags_rc.clone(), |a, b| a || b);

    let tags_for_not = tags_rc.clone();
    let not = Rc::new(move |args: &[Object]| -> ember_patterns::NativeResult {
        let a = expect_bool(&args[0])?;
        Ok(tags_for_not.bool(!a))
    });

    let tags_for_neg = tags_rc.clone();
    let neg = Rc::new(move |args: &[Object]| -> ember_patterns::NativeResult {
        let a = expect_int(&args[0])?;
        Ok(tags_for_neg.int(-a))
    });

    let trace = Rc::new(move |args: &[Object]| -> ember_patterns::NativeResult {
        tracing::info!(value = ?args[0], "trace");
        Ok(args[0].clone())
    });

    let mut define = |name: &str, function: FunctionObject| {
        let sym = interner.intern(name);
        store.bind(sym, tags.function(function));
    };

    define("+", binary_native_typed(interner, tags.int, add));
    define("-", binary_native_typed(interner, tags.int, sub));
    define("*", binary_native_typed(interner, tags.int, mul));
    define("/", binary_native_typed(interner, tags.int, div));
    define("%", binary_native_typed(interner, tags.int, rem));
    define("<", binary_native_typed(interner, tags.int, lt));
    define("<=", binary_native_typed(interner, tags.int, le));
    define(">", binary_native_typed(interner, tags.int, gt));
    define(">=", binary_native_typed(interner, tags.int, ge));
    define("==", binary_native_typed(interner, tags.int, eq));
    define("&&", binary_native_typed(interner, tags.bool_, and));
    define("||", binary_native_typed(interner, tags.bool_, or));
    define("not", unary_native_typed(interner, tags.bool_, not));
    define("neg", unary_native_typed(interner, tags.int, neg));
    define("trace", unary_native_any(interner, trace));
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod builtins_tests {
    use super::*;

    fn setup() -> (Store, StringInterner, WellKnownTags) {
        let interner = StringInterner::new();
        let tags = WellKnownTags::new(&interner);
        let mut store = Store::new();
        install_builtins(&mut store, &interner, &tags);
        (store, interner, tags)
    }

    fn call(store: &Store, interner: &StringInterner, name: &str, args: &[Object]) -> Object {
        let sym = interner.intern(name);
        let index = store.lookup(sym).unwrap();
        let f = store.get(index).as_function().unwrap().clone();
        match &f.paths[0].body {
            Evaluable::Native(native) => native(args).unwrap(),
            Evaluable::Closure { .. } => panic!("expected a native built-in"),
        }
    }

    #[test]
    fn add_sums_two_ints() {
        let (store, interner, tags) = setup();
        let result = call(&store, &interner, "+", &[tags.int(2), tags.int(3)]);
        assert_eq!(result.as_int(), Some(5));
    }

    #[test]
    fn division_by_zero_is_an_arithmetic_error() {
        let (store, interner, tags) = setup();
        let sym = interner.intern("/");
        let index = store.lookup(sym).unwrap();
        let f = store.get(index).as_function().unwrap().clone();
        let Evaluable::Native(native) = &f.paths[0].body else {
            panic!("expected native");
        };
        let err = native(&[tags.int(1), tags.int(0)]).unwrap_err();
        assert_eq!(err, NativeError::Arithmetic(ArithmeticErrorKind::DivisionByZero));
    }

    #[test]
    fn not_negates_a_bool() {
        let (store, interner, tags) = setup();
        let result = call(&store, &interner, "not", &[tags.bool(true)]);
        assert_eq!(result.as_bool(), Some(false));
    }

    #[test]
    fn less_than_compares_ints() {
        let (store, interner, tags) = setup();
        let result = call(&store, &interner, "<", &[tags.int(1), tags.int(2)]);
        assert_eq!(result.as_bool(), Some(true));
    }
}
