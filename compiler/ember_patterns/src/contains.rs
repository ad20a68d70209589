//! The `contains` preorder on patterns: `contains(p, q)` holds iff every
//! object matched by `q` is also matched by `p`.

use ember_ir::Pattern;

/// Whether `p` contains `q` in the matching preorder.
///
/// Recurses on pattern shape, same caveat as [`crate::match_pattern`]
/// regarding deep self-loop nesting.
pub fn contains(p: &Pattern, q: &Pattern) -> bool {
    ember_stack::ensure_sufficient_stack(|| contains_inner(p, q))
}

fn contains_inner(p: &Pattern, q: &Pattern) -> bool {
    match (p, q) {
        (Pattern::Variable(_), _) => true,
        (Pattern::Literal { tag: t1, value: v1 }, Pattern::Literal { tag: t2, value: v2 }) => {
            t1 == t2 && v1 == v2
        }
        (Pattern::Literal { tag: t1, .. }, Pattern::Object { tag: t2, children }) if children.len() == 1 => {
            t1 == t2 && contains(p, &children[0])
        }
        (Pattern::Object { tag: t1, children: as_ }, Pattern::Object { tag: t2, children: bs })
            if as_.len() == bs.len() =>
        {
            t1 == t2 && as_.iter().zip(bs).all(|(a, b)| contains(a, b))
        }
        (Pattern::Object { tag: t1, children }, Pattern::Literal { tag: t2, .. }) if children.len() == 1 => {
            t1 == t2 && contains(&children[0], q)
        }
        _ => false,
    }
}
