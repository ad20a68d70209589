//! The explicit-stack evaluation driver.
//!
//! Runs a cell stack to completion: each step pops one [`Cell`], visits it
//! (possibly pushing further cells and/or values), until the cell stack is
//! empty and the value stack holds exactly the final result.

use crate::cell::Cell;
use crate::config::Config;
use crate::errors::{self, EvalError};
use crate::translator::{self, Ctx};
use ember_ir::{ExprArena, ExprId, StringInterner};
use ember_patterns::{match_function, Evaluable, FunctionObject, Object, WellKnownTags};
use ember_store::Store;
use std::rc::Rc;

pub struct Driver<'a> {
    arena: &'a ExprArena,
    tags: &'a WellKnownTags,
    interner: &'a StringInterner,
    store: Store,
    cell_stack: Vec<Cell>,
    value_stack: Vec<Object>,
    config: Config,
    steps: usize,
}

impl<'a> Driver<'a> {
    pub fn new(
        arena: &'a ExprArena,
        tags: &'a WellKnownTags,
        interner: &'a StringInterner,
        store: Store,
        config: Config,
    ) -> Self {
        Driver {
            arena,
            tags,
            interner,
            store,
            cell_stack: Vec::new(),
            value_stack: Vec::new(),
            config,
            steps: 0,
        }
    }

    fn ctx(&self) -> Ctx<'_> {
        Ctx {
            arena: self.arena,
            tags: self.tags,
            interner: self.interner,
        }
    }

    fn push_translated(&mut self, id: ExprId) -> Result<(), EvalError> {
        let cell = translator::translate(&self.ctx(), &self.store, id)?;
        self.cell_stack.push(cell);
        Ok(())
    }

    fn pop_value(&mut self) -> Object {
        self.value_stack
            .pop()
            .unwrap_or_else(|| unreachable!("value stack underflow: driver invariant violated"))
    }

    /// Run the driver loop to completion, starting from `entry`.
    pub fn run(&mut self, entry: ExprId) -> Result<Object, EvalError> {
        self.push_translated(entry)?;
        while let Some(cell) = self.cell_stack.pop() {
            self.steps += 1;
            if let Some(max) = self.config.max_cells {
                if self.steps > max {
                    return Err(errors::resource_exhausted(max));
                }
            }
            if self.config.debug_trace {
                tracing::trace!(step = self.steps, cell = ?cell, "driver step");
            }
            self.visit(cell)?;
        }
        Ok(self.pop_value())
    }

    fn visit(&mut self, cell: Cell) -> Result<(), EvalError> {
        match cell {
            Cell::Literal(object) => {
                self.value_stack.push(object);
                Ok(())
            }
            Cell::VarRef(name) => {
                let index = self
                    .store
                    .lookup(name)
                    .ok_or_else(|| errors::unbound_variable(self.interner, name))?;
                self.value_stack.push(self.store.get(index).clone());
                Ok(())
            }
            Cell::FunInit { callee, args } => {
                self.cell_stack.push(Cell::FunArgs { args });
                self.push_translated(callee)
            }
            Cell::FunArgs { args } => self.visit_fun_args(args),
            Cell::FunCall { f, arity } => self.visit_fun_call(&f, arity),
            Cell::FunCleanup { restore_frame } => {
                self.store.exit_call_frame(restore_frame);
                Ok(())
            }
            Cell::LetInit { pattern, value, body } => {
                self.cell_stack.push(Cell::LetBind { pattern, body });
                self.push_translated(value)
            }
            Cell::LetBind { pattern, body } => self.visit_let_bind(&pattern, body),
            Cell::ScopePop => {
                self.store.pop_scope();
                Ok(())
            }
        }
    }

    /// A function value sits on top of the value stack; consume as many of
    /// `args` as its effective arity allows, leaving any remainder to be
    /// re-dispatched against this call's result.
    fn visit_fun_args(&mut self, args: Vec<ExprId>) -> Result<(), EvalError> {
        let callee = self.pop_value();
        let f = callee.as_function().ok_or_else(|| errors::malformed_ast("call target is not a function"))?;
        let f = f.clone();

        let effective = f.effective_arity();
        let applied = effective.min(args.len());
        let (consumed, remaining) = args.split_at(applied);

        if !remaining.is_empty() {
            self.cell_stack.push(Cell::FunArgs {
                args: remaining.to_vec(),
            });
        }
        self.cell_stack.push(Cell::FunCall {
            f,
            arity: applied,
        });
        for id in consumed.iter().rev() {
            self.push_translated(*id)?;
        }
        Ok(())
    }

    fn visit_fun_call(&mut self, f: &Rc<FunctionObject>, arity: usize) -> Result<(), EvalError> {
        let mut supplied: Vec<Object> = (0..arity).map(|_| self.pop_value()).collect();
        supplied.reverse();

        let mut full_args = f.bound.clone();
        full_args.extend(supplied);

        if full_args.len() < f.arity {
            let residual = f.apply_partial(&full_args[f.bound.len()..]);
            self.value_stack.push(self.tags.function(residual));
            return Ok(());
        }

        match match_function(f, &full_args) {
            Ok((bindings, path)) => {
                let lexical_parent = match &path.body {
                    Evaluable::Closure { captured_frame, .. } => captured_frame.clone(),
                    Evaluable::Native(_) => self.store.current_frame(),
                };
                let restore = self.store.enter_call_frame(&lexical_parent);
                self.cell_stack.push(Cell::FunCleanup { restore_frame: restore });

                match &path.body {
                    Evaluable::Closure { body, snapshot, .. } => {
                        for (&name, &index) in snapshot {
                            self.store.bind_index(name, index);
                        }
                        for (name, object) in bindings {
                            self.store.bind(name, object);
                        }
                        self.push_translated(*body)
                    }
                    Evaluable::Native(native) => {
                        let result = native(&full_args).map_err(|e| errors::from_native_error(self.interner, e))?;
                        self.value_stack.push(result);
                        Ok(())
                    }
                }
            }
            Err(mismatches) => {
                let annotated: Vec<_> = f
                    .paths
                    .iter()
                    .zip(mismatches)
                    .enumerate()
                    .map(|(index, (path, mismatch))| (index, path, mismatch))
                    .collect();
                Err(errors::no_pattern_match(self.interner, &annotated))
            }
        }
    }

    fn visit_let_bind(&mut self, pattern: &ember_ir::Pattern, body: ExprId) -> Result<(), EvalError> {
        let value = self.pop_value();
        self.store.add_scope();

        let mut acc = ember_patterns::Bindings::default();
        if let Err(match_error) = ember_patterns::match_pattern(pattern, &value, &mut acc) {
            self.store.pop_scope();
            return Err(let_bind_error(self.interner, match_error));
        }

        for (name, object) in acc {
            self.store.assign(name, object);
        }

        self.cell_stack.push(Cell::ScopePop);
        self.push_translated(body)
    }
}

fn let_bind_error(interner: &StringInterner, error: ember_patterns::MatchError) -> EvalError {
    match error {
        ember_patterns::MatchError::DuplicateBinding(name) => errors::duplicate_binding(interner, name),
        other => errors::malformed_ast(format!("let pattern did not match its value: {other:?}")),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod driver_tests {
    use super::*;
    use ember_ir::{Expr, Pattern};
    use pretty_assertions::assert_eq;

    fn setup() -> (ExprArena, StringInterner, WellKnownTags) {
        let arena = ExprArena::new();
        let interner = StringInterner::new();
        let tags = WellKnownTags::new(&interner);
        (arena, interner, tags)
    }

    fn run(arena: &ExprArena, tags: &WellKnownTags, interner: &StringInterner, entry: ExprId) -> Result<Object, EvalError> {
        let mut store = Store::new();
        crate::builtins::install_builtins(&mut store, interner, tags);
        let mut driver = Driver::new(arena, tags, interner, store, Config::default());
        driver.run(entry)
    }

    #[test]
    fn literal_int_evaluates_to_itself() {
        let (mut arena, interner, tags) = setup();
        let id = arena.push(Expr::IntLit(7));
        let result = run(&arena, &tags, &interner, id).unwrap();
        assert_eq!(result.as_int(), Some(7));
    }

    #[test]
    fn let_binding_is_visible_in_body() {
        let (mut arena, interner, tags) = setup();
        let x = interner.intern("x");
        let five = arena.push(Expr::IntLit(5));
        let var_x = arena.push(Expr::Var(x));
        let let_expr = arena.push(Expr::Let {
            pattern: Pattern::variable(x),
            value: five,
            body: var_x,
        });
        let result = run(&arena, &tags, &interner, let_expr).unwrap();
        assert_eq!(result.as_int(), Some(5));
    }

    #[test]
    fn calling_a_builtin_applies_it() {
        let (mut arena, interner, tags) = setup();
        let plus = interner.intern("+");
        let callee = arena.push(Expr::Var(plus));
        let a = arena.push(Expr::IntLit(2));
        let b = arena.push(Expr::IntLit(3));
        let call = arena.push(Expr::Call { callee, args: vec![a, b] });
        let result = run(&arena, &tags, &interner, call).unwrap();
        assert_eq!(result.as_int(), Some(5));
    }

    #[test]
    fn let_bound_expression_evaluates_arguments_left_to_right() {
        let (mut arena, interner, tags) = setup();
        // let x := 5 in x * (x + 1)
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
        let let_expr = arena.push(Expr::Let {
            pattern: Pattern::variable(x),
            value: five,
            body: product,
        });
        let result = run(&arena, &tags, &interner, let_expr).unwrap();
        assert_eq!(result.as_int(), Some(30));
    }

    #[test]
    fn self_loop_pattern_matches_deeply_wrapped_int() {
        let (mut arena, interner, tags) = setup();
        // (fn (Int (Int n)) -> n)(42)
        let n = interner.intern("n");
        let body = arena.push(Expr::Var(n));
        let path = ember_ir::PathDef {
            input_patterns: vec![Pattern::object(tags.int, vec![Pattern::object(tags.int, vec![Pattern::variable(n)])])],
            output_pattern: Pattern::variable(n),
            body,
        };
        let fun_def = arena.push(Expr::FunDef { paths: vec![path] });
        let arg = arena.push(Expr::IntLit(42));
        let call = arena.push(Expr::Call { callee: fun_def, args: vec![arg] });
        let result = run(&arena, &tags, &interner, call).unwrap();
        assert_eq!(result.as_int(), Some(42));
    }

    #[test]
    fn closures_capture_their_defining_scope() {
        let (mut arena, interner, tags) = setup();
        // let k := 10 in (fn (x) -> x + k)(5)
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
        let path = ember_ir::PathDef {
            input_patterns: vec![Pattern::variable(x)],
            output_pattern: Pattern::variable(x),
            body,
        };
        let fun_def = arena.push(Expr::FunDef { paths: vec![path] });
        let five = arena.push(Expr::IntLit(5));
        let call = arena.push(Expr::Call { callee: fun_def, args: vec![five] });
        let let_expr = arena.push(Expr::Let {
            pattern: Pattern::variable(k),
            value: ten,
            body: call,
        });
        let result = run(&arena, &tags, &interner, let_expr).unwrap();
        assert_eq!(result.as_int(), Some(15));
    }

    #[test]
    fn no_path_matches_reports_the_first_incompatible_argument() {
        let (mut arena, interner, tags) = setup();
        let a = interner.intern("a");
        let body = arena.push(Expr::IntLit(0));
        let path = ember_ir::PathDef {
            input_patterns: vec![Pattern::object(tags.int, vec![Pattern::variable(a)])],
            output_pattern: Pattern::variable(a),
            body,
        };
        let fun_def = arena.push(Expr::FunDef { paths: vec![path] });
        let arg = arena.push(Expr::BoolLit(true));
        let call = arena.push(Expr::Call { callee: fun_def, args: vec![arg] });
        let err = run(&arena, &tags, &interner, call).unwrap_err();
        match err {
            EvalError::NoPatternMatch(diag) => {
                assert_eq!(diag.0.len(), 1);
                assert!(diag.0[0].rendered.contains("<Int a>"));
            }
            other => panic!("expected NoPatternMatch, got {other:?}"),
        }
    }

    #[test]
    fn over_application_calls_the_result_with_remaining_arguments() {
        let (mut arena, interner, tags) = setup();
        // fn (x) -> fn (y) -> x + y, applied to (2, 3) in one call
        let x = interner.intern("x");
        let y = interner.intern("y");
        let plus = interner.intern("+");
        let plus_callee = arena.push(Expr::Var(plus));
        let var_x = arena.push(Expr::Var(x));
        let var_y = arena.push(Expr::Var(y));
        let inner_body = arena.push(Expr::Call {
            callee: plus_callee,
            args: vec![var_x, var_y],
        });
        let inner_path = ember_ir::PathDef {
            input_patterns: vec![Pattern::variable(y)],
            output_pattern: Pattern::variable(y),
            body: inner_body,
        };
        let inner_fun = arena.push(Expr::FunDef { paths: vec![inner_path] });
        let outer_path = ember_ir::PathDef {
            input_patterns: vec![Pattern::variable(x)],
            output_pattern: Pattern::variable(x),
            body: inner_fun,
        };
        let outer_fun = arena.push(Expr::FunDef { paths: vec![outer_path] });
        let two = arena.push(Expr::IntLit(2));
        let three = arena.push(Expr::IntLit(3));
        let call = arena.push(Expr::Call {
            callee: outer_fun,
            args: vec![two, three],
        });
        let result = run(&arena, &tags, &interner, call).unwrap();
        assert_eq!(result.as_int(), Some(5));
    }

    #[test]
    fn boolean_and_short_of_a_true_operand_is_false() {
        let (mut arena, interner, tags) = setup();
        // true && false
        let and = interner.intern("&&");
        let callee = arena.push(Expr::Var(and));
        let t = arena.push(Expr::BoolLit(true));
        let f = arena.push(Expr::BoolLit(false));
        let call = arena.push(Expr::Call { callee, args: vec![t, f] });
        let result = run(&arena, &tags, &interner, call).unwrap();
        assert_eq!(result.as_bool(), Some(false));
    }

    #[test]
    fn second_path_is_selected_when_the_first_path_does_not_match() {
        let (mut arena, interner, tags) = setup();
        // fn (<Int a> <Int b> -> a + b | <Bool a> <Bool b> -> a && b) applied to (true, false)
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
        let int_path = ember_ir::PathDef {
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
        let bool_path = ember_ir::PathDef {
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
        let call = arena.push(Expr::Call {
            callee: fun_def,
            args: vec![t, f],
        });
        let result = run(&arena, &tags, &interner, call).unwrap();
        assert_eq!(result.as_bool(), Some(false));
    }

    #[test]
    fn under_application_yields_a_residual_function() {
        let (mut arena, interner, tags) = setup();
        let plus = interner.intern("+");
        let callee = arena.push(Expr::Var(plus));
        let two = arena.push(Expr::IntLit(2));
        let partial_call = arena.push(Expr::Call { callee, args: vec![two] });
        let result = run(&arena, &tags, &interner, partial_call).unwrap();
        let residual = result.as_function().unwrap();
        assert_eq!(residual.effective_arity(), 1);
    }
}
