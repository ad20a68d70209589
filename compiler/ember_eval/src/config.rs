//! Evaluator configuration and its builder.

use crate::driver::Driver;
use crate::errors::EvalError;
use ember_ir::{ExprArena, ExprId, StringInterner};
use ember_patterns::{Object, WellKnownTags};

/// Tunable evaluator behavior.
#[derive(Clone, Debug)]
pub struct Config {
    /// Emit a `tracing::trace!` event per driver step.
    pub debug_trace: bool,
    /// Abort with `EvalError::ResourceExhausted` after this many driver steps.
    /// `None` means unbounded.
    pub max_cells: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug_trace: false,
            max_cells: None,
        }
    }
}

/// Builds an [`Evaluator`] with optional overrides, defaulting the rest.
pub struct EvaluatorBuilder<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    debug_trace: Option<bool>,
    max_cells: Option<usize>,
}

impl<'a> EvaluatorBuilder<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Self {
            arena,
            interner,
            debug_trace: None,
            max_cells: None,
        }
    }

    #[must_use]
    pub fn debug_trace(mut self, enabled: bool) -> Self {
        self.debug_trace = Some(enabled);
        self
    }

    #[must_use]
    pub fn max_cells(mut self, limit: usize) -> Self {
        self.max_cells = Some(limit);
        self
    }

    pub fn build(self) -> Evaluator<'a> {
        let config = Config {
            debug_trace: self.debug_trace.unwrap_or_default(),
            max_cells: self.max_cells,
        };
        Evaluator {
            arena: self.arena,
            interner: self.interner,
            config,
        }
    }
}

/// A configured, ready-to-run evaluator over a fixed arena and interner.
pub struct Evaluator<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    config: Config,
}

impl<'a> Evaluator<'a> {
    /// Install built-ins into a fresh store and run `entry` to completion.
    pub fn run(&self, entry: ExprId) -> Result<Object, EvalError> {
        let mut store = ember_store::Store::new();
        let tags = WellKnownTags::new(self.interner);
        crate::builtins::install_builtins(&mut store, self.interner, &tags);
        let mut driver = Driver::new(self.arena, &tags, self.interner, store, self.config.clone());
        driver.run(entry)
    }
}

/// Convenience entry point: build a default evaluator and run `entry`.
pub fn evaluate(arena: &ExprArena, interner: &StringInterner, entry: ExprId) -> Result<Object, EvalError> {
    EvaluatorBuilder::new(arena, interner).build().run(entry)
}
