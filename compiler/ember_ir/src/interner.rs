//! String interner for identifier storage.
//!
//! The source crate this one descends from shards its interner across 16
//! `RwLock`-guarded buckets for concurrent compilation. A single-threaded,
//! single-driver evaluator has no concurrent interning to speed up, so this
//! interner collapses that to one shard; `Name` equality is unaffected since
//! it is still decided purely by index.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

struct InternData {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl InternData {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        Self {
            map,
            strings: vec![empty],
        }
    }
}

/// Interns identifier text into compact [`Name`] values.
///
/// # Example
///
/// ```
/// use ember_ir::StringInterner;
///
/// let interner = StringInterner::new();
/// let a = interner.intern("x");
/// let b = interner.intern("x");
/// assert_eq!(a, b);
/// assert_eq!(interner.resolve(a), "x");
/// ```
pub struct StringInterner {
    data: RwLock<InternData>,
}

impl StringInterner {
    /// Create a new interner with the empty string pre-interned at `Name::EMPTY`.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(InternData::with_empty()),
        }
    }

    /// Intern `s`, returning the same `Name` for equal text on every call.
    pub fn intern(&self, s: &str) -> Name {
        {
            let guard = self.data.read();
            if let Some(&index) = guard.map.get(s) {
                return Name::from_index(index);
            }
        }

        let mut guard = self.data.write();
        if let Some(&index) = guard.map.get(s) {
            return Name::from_index(index);
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("interner exceeded {} entries", u32::MAX));
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Name::from_index(index)
    }

    /// Resolve a previously interned `Name` back to its text.
    ///
    /// # Panics
    /// Panics if `name` was not produced by this interner.
    pub fn resolve(&self, name: Name) -> &'static str {
        let guard = self.data.read();
        guard.strings[name.index()]
    }

    /// Number of distinct strings interned (including the pre-interned empty string).
    pub fn len(&self) -> usize {
        self.data.read().strings.len()
    }

    /// Whether only the pre-interned empty string is present.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod interner_tests {
    use super::*;

    #[test]
    fn interning_same_text_yields_same_name() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern("foo"), interner.intern("foo"));
    }

    #[test]
    fn interning_distinct_text_yields_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("foo"), interner.intern("bar"));
    }

    #[test]
    fn resolve_round_trips() {
        let interner = StringInterner::new();
        let name = interner.intern("hello");
        assert_eq!(interner.resolve(name), "hello");
    }

    #[test]
    fn empty_string_is_pre_interned() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
    }
}
