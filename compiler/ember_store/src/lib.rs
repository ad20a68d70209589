//! The store: a flat, append-only value slab plus a tree of scope frames.
//!
//! Closures capture free variables by *slab index*, never by frame pointer,
//! so the slab's append-only discipline is what lets multiple closures share
//! captured state without ever forming a reference cycle. A naive
//! implementation leaks the slab monotonically for the program's lifetime;
//! that is an accepted tradeoff, not a bug.

use ember_ir::{Frame, Name};
use ember_patterns::Object;
use rustc_hash::FxHashMap;

/// Owns the value slab and the currently active scope frame.
pub struct Store {
    slab: Vec<Object>,
    current: Frame,
}

impl Store {
    /// A fresh store with one global root frame and an empty slab.
    pub fn new() -> Self {
        Store {
            slab: Vec::new(),
            current: Frame::root(),
        }
    }

    /// The frame currently active for binding/lookup.
    pub fn current_frame(&self) -> Frame {
        self.current.clone()
    }

    /// Push a fresh binding layer onto the current frame.
    pub fn add_scope(&self) {
        self.current.push_layer();
    }

    /// Pop the most recently pushed binding layer from the current frame.
    pub fn pop_scope(&self) {
        self.current.pop_layer();
    }

    /// Write `value` to a fresh slab slot and bind `name` to it in the
    /// current frame's innermost layer. Returns the new slot's index.
    pub fn bind(&mut self, name: Name, value: Object) -> usize {
        let index = self.slab.len();
        self.slab.push(value);
        self.current.bind_in_top_layer(name, index);
        index
    }

    /// Record `name → index` without allocating a new slab slot; used when
    /// projecting a closure's snapshot into the callee's scope.
    pub fn bind_index(&self, name: Name, index: usize) {
        self.current.bind_in_top_layer(name, index);
    }

    /// If `name` already resolves, overwrite the slab slot it resolves to;
    /// otherwise allocate a fresh binding via [`Store::bind`].
    pub fn assign(&mut self, name: Name, value: Object) {
        match self.lookup(name) {
            Some(index) => self.slab[index] = value,
            None => {
                self.bind(name, value);
            }
        }
    }

    /// Search the current frame's layers innermost-first, then its parent
    /// chain. Always returns the innermost binding.
    pub fn lookup(&self, name: Name) -> Option<usize> {
        self.current.lookup(name)
    }

    /// Resolve every name in `names`, failing fast on the first unbound one.
    /// Used to snapshot a closure's free variables.
    pub fn lookup_all<I: IntoIterator<Item = Name>>(&self, names: I) -> Result<FxHashMap<Name, usize>, Name> {
        let mut map = FxHashMap::default();
        for name in names {
            match self.lookup(name) {
                Some(index) => {
                    map.insert(name, index);
                }
                None => return Err(name),
            }
        }
        Ok(map)
    }

    pub fn get(&self, index: usize) -> &Object {
        &self.slab[index]
    }

    /// Enter a fresh call frame lexically parented under `lexical_parent`
    /// (the closure's captured frame, or the current frame for a native
    /// call), making it current. Returns the frame that was current before
    /// the call, for the caller to stash and restore on cleanup.
    pub fn enter_call_frame(&mut self, lexical_parent: &Frame) -> Frame {
        let previous = self.current.clone();
        self.current = Frame::child_of(lexical_parent);
        previous
    }

    /// Restore `restore_to` as the current frame (the mirror image of
    /// [`Store::enter_call_frame`], invoked by the `FunCleanup` cell).
    pub fn exit_call_frame(&mut self, restore_to: Frame) {
        self.current = restore_to;
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
