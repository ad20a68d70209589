//! Pattern syntax shared by the AST (function-definition nodes carry patterns)
//! and the matching algebra (`ember_patterns`) that interprets them.

use super::Name;

/// A primitive payload carried by a literal pattern or an omega object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LiteralValue {
    Int(i64),
    Bool(bool),
}

/// One of the three pattern variants.
///
/// Patterns are small trees private to a single function path; unlike
/// expressions they are never shared between closures, so they are plain
/// owned trees rather than arena-indexed nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Pattern {
    /// `V(name)` — binds the matched object to `name`.
    Variable(Name),
    /// `L(tag, value)` — matches an omega object of `tag` whose payload equals `value`.
    Literal { tag: Name, value: LiteralValue },
    /// `O(tag, children)` — matches by tag and recurses positionally over `children`.
    Object { tag: Name, children: Vec<Pattern> },
}

impl Pattern {
    pub fn variable(name: Name) -> Self {
        Pattern::Variable(name)
    }

    pub fn literal(tag: Name, value: LiteralValue) -> Self {
        Pattern::Literal { tag, value }
    }

    pub fn object(tag: Name, children: Vec<Pattern>) -> Self {
        Pattern::Object { tag, children }
    }

    /// Identifiers this pattern binds (exactly its variable-pattern identifiers).
    pub fn bound_names(&self, out: &mut Vec<Name>) {
        match self {
            Pattern::Variable(name) => out.push(*name),
            Pattern::Literal { .. } => {}
            Pattern::Object { children, .. } => {
                for child in children {
                    child.bound_names(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod pattern_tests {
    use super::*;

    #[test]
    fn variable_pattern_binds_its_own_name() {
        let n = Name::from_raw(1);
        let mut out = Vec::new();
        Pattern::variable(n).bound_names(&mut out);
        assert_eq!(out, vec![n]);
    }

    #[test]
    fn literal_pattern_binds_nothing() {
        let mut out = Vec::new();
        Pattern::literal(Name::from_raw(1), LiteralValue::Int(3)).bound_names(&mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn object_pattern_collects_nested_variable_names() {
        let a = Name::from_raw(2);
        let b = Name::from_raw(3);
        let tag = Name::from_raw(1);
        let pattern = Pattern::object(
            tag,
            vec![
                Pattern::variable(a),
                Pattern::object(tag, vec![Pattern::variable(b)]),
            ],
        );
        let mut out = Vec::new();
        pattern.bound_names(&mut out);
        assert_eq!(out, vec![a, b]);
    }
}
