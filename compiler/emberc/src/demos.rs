//! Sample programs built directly from `ember_ir`/`ember_patterns`
//! constructors. There is no lexer or parser in this workspace, so the CLI's
//! `run` subcommand dispatches to one of these pre-built ASTs by name rather
//! than reading a source file.

use ember_ir::{Expr, ExprArena, ExprId, Pattern, PathDef, StringInterner};
use ember_patterns::WellKnownTags;

/// One runnable sample: its name, a one-line description, and the arena it
/// was built in plus the entry point to evaluate.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    pub arena: ExprArena,
    pub interner: StringInterner,
    pub entry: ExprId,
}

/// All demos, in declaration order.
pub fn all() -> Vec<Demo> {
    vec![
        int_literal(),
        bool_literal(),
        bool_via_dispatch(),
        boolean_and(),
        second_path_dispatch(),
        let_arithmetic(),
        self_loop_unwrap(),
        closure_capture(),
    ]
}

/// Look up one demo by name.
pub fn find(name: &str) -> Option<Demo> {
    all().into_iter().find(|demo| demo.name == name)
}

fn int_literal() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let entry = arena.push(Expr::IntLit(7));
    Demo {
        name: "int-literal",
        description: "Int 7",
        arena,
        interner,
        entry,
    }
}

fn bool_literal() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let entry = arena.push(Expr::BoolLit(false));
    Demo {
        name: "bool-literal",
        description: "Bool false",
        arena,
        interner,
        entry,
    }
}

/// A two-path function dispatching on `Bool` to produce `Bool false` either way.
fn bool_via_dispatch() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let tags = WellKnownTags::new(&interner);

    let true_body = arena.push(Expr::BoolLit(false));
    let false_body = arena.push(Expr::BoolLit(false));
    let paths = vec![
        PathDef {
            input_patterns: vec![Pattern::literal(tags.bool_, ember_ir::LiteralValue::Bool(true))],
            output_pattern: Pattern::literal(tags.bool_, ember_ir::LiteralValue::Bool(false)),
            body: true_body,
        },
        PathDef {
            input_patterns: vec![Pattern::literal(tags.bool_, ember_ir::LiteralValue::Bool(false))],
            output_pattern: Pattern::literal(tags.bool_, ember_ir::LiteralValue::Bool(false)),
            body: false_body,
        },
    ];
    let fun_def = arena.push(Expr::FunDef { paths });
    let arg = arena.push(Expr::BoolLit(true));
    let entry = arena.push(Expr::Call {
        callee: fun_def,
        args: vec![arg],
    });
    Demo {
        name: "bool-dispatch",
        description: "a two-path function dispatching on Bool, applied to true",
        arena,
        interner,
        entry,
    }
}

/// `true && false` = `Bool false`, calling the built-in `&&` directly.
fn boolean_and() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let and = interner.intern("&&");

    let callee = arena.push(Expr::Var(and));
    let t = arena.push(Expr::BoolLit(true));
    let f = arena.push(Expr::BoolLit(false));
    let entry = arena.push(Expr::Call {
        callee,
        args: vec![t, f],
    });
    Demo {
        name: "boolean-and",
        description: "true && false",
        arena,
        interner,
        entry,
    }
}

/// `(fn (<Int a> <Int b>) -> a+b | (<Bool a> <Bool b>) -> a && b)(true, false)`,
/// exercising dispatch to the second path of a multi-path function.
fn second_path_dispatch() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let tags = WellKnownTags::new(&interner);
    let a = interner.intern("a");
    let b = interner.intern("b");
    let plus = interner.intern("+");
    let and = interner.intern("&&");

    let plus_callee = arena.push(Expr::Var(plus));
    let var_a1 = arena.push(Expr::Var(a));
    let var_b1 = arena.push(Expr::Var(b));
    let int_body = arena.push(Expr::Call {
        callee: plus_callee,
        args: vec![var_a1, var_b1],
    });
    let int_path = PathDef {
        input_patterns: vec![
            Pattern::object(tags.int, vec![Pattern::variable(a)]),
            Pattern::object(tags.int, vec![Pattern::variable(b)]),
        ],
        output_pattern: Pattern::variable(a),
        body: int_body,
    };

    let and_callee = arena.push(Expr::Var(and));
    let var_a2 = arena.push(Expr::Var(a));
    let var_b2 = arena.push(Expr::Var(b));
    let bool_body = arena.push(Expr::Call {
        callee: and_callee,
        args: vec![var_a2, var_b2],
    });
    let bool_path = PathDef {
        input_patterns: vec![
            Pattern::object(tags.bool_, vec![Pattern::variable(a)]),
            Pattern::object(tags.bool_, vec![Pattern::variable(b)]),
        ],
        output_pattern: Pattern::variable(a),
        body: bool_body,
    };

    let fun_def = arena.push(Expr::FunDef {
        paths: vec![int_path, bool_path],
    });
    let t = arena.push(Expr::BoolLit(true));
    let f = arena.push(Expr::BoolLit(false));
    let entry = arena.push(Expr::Call {
        callee: fun_def,
        args: vec![t, f],
    });
    Demo {
        name: "second-path-dispatch",
        description: "a two-path function where the Bool path is selected over the Int path",
        arena,
        interner,
        entry,
    }
}

/// `let x := 5 in x * (x + 1)` = `Int 30`.
fn let_arithmetic() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let plus = interner.intern("+");
    let star = interner.intern("*");

    let five = arena.push(Expr::IntLit(5));
    let var_x1 = arena.push(Expr::Var(x));
    let one = arena.push(Expr::IntLit(1));
    let plus_callee = arena.push(Expr::Var(plus));
    let sum = arena.push(Expr::Call {
        callee: plus_callee,
        args: vec![var_x1, one],
    });
    let var_x2 = arena.push(Expr::Var(x));
    let star_callee = arena.push(Expr::Var(star));
    let product = arena.push(Expr::Call {
        callee: star_callee,
        args: vec![var_x2, sum],
    });
    let entry = arena.push(Expr::Let {
        pattern: Pattern::variable(x),
        value: five,
        body: product,
    });
    Demo {
        name: "let-arithmetic",
        description: "let x := 5 in x * (x + 1)",
        arena,
        interner,
        entry,
    }
}

/// `(fn (Int (Int n)) -> n)(42)`, exercising the self-loop matching rule.
fn self_loop_unwrap() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let tags = WellKnownTags::new(&interner);
    let n = interner.intern("n");

    let body = arena.push(Expr::Var(n));
    let path = PathDef {
        input_patterns: vec![Pattern::object(
            tags.int,
            vec![Pattern::object(tags.int, vec![Pattern::variable(n)])],
        )],
        output_pattern: Pattern::variable(n),
        body,
    };
    let fun_def = arena.push(Expr::FunDef { paths: vec![path] });
    let arg = arena.push(Expr::IntLit(42));
    let entry = arena.push(Expr::Call {
        callee: fun_def,
        args: vec![arg],
    });
    Demo {
        name: "self-loop",
        description: "(fn (Int (Int n)) -> n)(42), exercising the self-loop rule",
        arena,
        interner,
        entry,
    }
}

/// `let k := 10 in (fn (x) -> x + k)(5)` = `Int 15`, exercising closure capture.
fn closure_capture() -> Demo {
    let mut arena = ExprArena::new();
    let interner = StringInterner::new();
    let k = interner.intern("k");
    let x = interner.intern("x");
    let plus = interner.intern("+");

    let ten = arena.push(Expr::IntLit(10));
    let var_x = arena.push(Expr::Var(x));
    let var_k = arena.push(Expr::Var(k));
    let plus_callee = arena.push(Expr::Var(plus));
    let body = arena.push(Expr::Call {
        callee: plus_callee,
        args: vec![var_x, var_k],
    });
    let path = PathDef {
        input_patterns: vec![Pattern::variable(x)],
        output_pattern: Pattern::variable(x),
        body,
    };
    let fun_def = arena.push(Expr::FunDef { paths: vec![path] });
    let five = arena.push(Expr::IntLit(5));
    let call = arena.push(Expr::Call {
        callee: fun_def,
        args: vec![five],
    });
    let entry = arena.push(Expr::Let {
        pattern: Pattern::variable(k),
        value: ten,
        body: call,
    });
    Demo {
        name: "closure-capture",
        description: "let k := 10 in (fn (x) -> x + k)(5)",
        arena,
        interner,
        entry,
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod demos_tests {
    use super::*;

    #[test]
    fn every_demo_name_is_findable() {
        for demo in all() {
            assert!(find(demo.name).is_some());
        }
    }

    #[test]
    fn unknown_name_is_not_found() {
        assert!(find("no-such-demo").is_none());
    }

    #[test]
    fn let_arithmetic_evaluates_to_thirty() {
        let demo = find("let-arithmetic").unwrap();
        let result = ember_eval::evaluate(&demo.arena, &demo.interner, demo.entry).unwrap();
        assert_eq!(result.as_int(), Some(30));
    }

    #[test]
    fn boolean_and_evaluates_to_false() {
        let demo = find("boolean-and").unwrap();
        let result = ember_eval::evaluate(&demo.arena, &demo.interner, demo.entry).unwrap();
        assert_eq!(result.as_bool(), Some(false));
    }

    #[test]
    fn second_path_dispatch_selects_the_bool_path() {
        let demo = find("second-path-dispatch").unwrap();
        let result = ember_eval::evaluate(&demo.arena, &demo.interner, demo.entry).unwrap();
        assert_eq!(result.as_bool(), Some(false));
    }
}
