//! Human-readable rendering of patterns and objects for error messages.

use ember_ir::{LiteralValue, Pattern, StringInterner};
use ember_patterns::{Object, Primitive};

pub fn describe_pattern(interner: &StringInterner, pattern: &Pattern) -> String {
    match pattern {
        Pattern::Variable(name) => interner.resolve(*name).to_owned(),
        Pattern::Literal { tag, value } => {
            format!("<{} {}>", interner.resolve(*tag), describe_literal_value(value))
        }
        Pattern::Object { tag, children } => {
            let mut rendered = format!("<{}", interner.resolve(*tag));
            for child in children {
                rendered.push(' ');
                rendered.push_str(&describe_pattern(interner, child));
            }
            rendered.push('>');
            rendered
        }
    }
}

fn describe_literal_value(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Int(v) => v.to_string(),
        LiteralValue::Bool(v) => v.to_string(),
    }
}

pub fn describe_object(interner: &StringInterner, object: &Object) -> String {
    match object.payload() {
        Some(Primitive::Int(v)) => format!("{} {v}", interner.resolve(object.tag)),
        Some(Primitive::Bool(v)) => format!("{} {v}", interner.resolve(object.tag)),
        Some(Primitive::Function(_)) => format!("{} <function>", interner.resolve(object.tag)),
        None => {
            let mut rendered = format!("{} (", interner.resolve(object.tag));
            let children = object.children();
            for (index, child) in children.iter().enumerate() {
                if index > 0 {
                    rendered.push_str(", ");
                }
                rendered.push_str(&describe_object(interner, child));
            }
            rendered.push(')');
            rendered
        }
    }
}

#[cfg(test)]
mod diagnostics_tests {
    use super::*;
    use ember_patterns::WellKnownTags;

    #[test]
    fn renders_object_pattern_with_one_variable_child() {
        let interner = StringInterner::new();
        let tags = WellKnownTags::new(&interner);
        let a = interner.intern("a");
        let pattern = Pattern::object(tags.int, vec![Pattern::variable(a)]);
        assert_eq!(describe_pattern(&interner, &pattern), "<Int a>");
    }

    #[test]
    fn renders_omega_object() {
        let interner = StringInterner::new();
        let tags = WellKnownTags::new(&interner);
        assert_eq!(describe_object(&interner, &tags.bool(true)), "Bool true");
    }
}
