//! Membership test: does a runtime value satisfy a descriptor?
//!
//! - Simple descriptors require the exact raw type. No subtype widening: a
//!   descriptor for `i64` never accepts an `i32`.
//! - Numeric-kind markers accept the concrete type they are bound to.
//! - Container kinds accept any value reporting that container kind.
//! - Parameterized descriptors additionally require every held element to
//!   satisfy at least one argument. Empty containers satisfy any arguments.
//! - Absent values satisfy nothing.
use crate::descriptor::{RawType, TypeDescriptor};
use crate::shape::Shape;

pub fn matches(value: &dyn Shape, descriptor: &TypeDescriptor) -> bool {
    if value.is_absent() || !raw_matches(value, descriptor.raw()) {
        return false;
    }
    if !descriptor.is_parameterized() {
        return true;
    }
    // only element-holding values can carry type arguments
    if value.container_kind().is_none() {
        return false;
    }
    let args = descriptor.args();
    value
        .elements()
        .all(|element| args.iter().any(|arg| matches(element, arg)))
}

fn raw_matches(value: &dyn Shape, raw: &RawType) -> bool {
    match raw {
        RawType::Type(_) => value.raw_type() == *raw,
        RawType::Primitive(kind) => {
            let actual = value.raw_type();
            actual == *raw || actual == RawType::Type(kind.bound_type())
        }
        RawType::Container(kind) => value.container_kind() == Some(*kind),
    }
}

/// First descriptor in `types` that `value` satisfies.
pub fn first_match<'t>(value: &dyn Shape, types: &'t [TypeDescriptor]) -> Option<(usize, &'t TypeDescriptor)> {
    types
        .iter()
        .enumerate()
        .find(|(_, descriptor)| matches(value, descriptor))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ContainerKind, PrimitiveKind};
    use std::collections::{BTreeMap, HashSet};

    fn string() -> TypeDescriptor {
        TypeDescriptor::of::<String>()
    }

    #[test]
    fn simple_descriptors_need_the_exact_type() {
        assert!(matches(&"a".to_string(), &string()));
        assert!(matches(&42i32, &TypeDescriptor::of::<i32>()));
        assert!(!matches(&42i32, &TypeDescriptor::of::<i64>()));
        assert!(!matches(&3.14f32, &TypeDescriptor::of::<f64>()));
    }

    #[test]
    fn numeric_markers_accept_their_bound_type() {
        let pairs: [(&dyn Shape, PrimitiveKind); 8] = [
            (&1i8, PrimitiveKind::Byte),
            (&1i16, PrimitiveKind::Short),
            (&1i32, PrimitiveKind::Int),
            (&1i64, PrimitiveKind::Long),
            (&1.0f32, PrimitiveKind::Float),
            (&1.0f64, PrimitiveKind::Double),
            (&true, PrimitiveKind::Boolean),
            (&'c', PrimitiveKind::Character),
        ];
        for (value, kind) in pairs {
            assert!(matches(value, &TypeDescriptor::primitive(kind)), "{kind:?}");
        }
        assert!(!matches(&1i64, &TypeDescriptor::primitive(PrimitiveKind::Int)));
        assert!(!matches(&1u8, &TypeDescriptor::primitive(PrimitiveKind::Byte)));
    }

    #[test]
    fn bare_container_kind_ignores_elements() {
        let list = TypeDescriptor::simple(ContainerKind::List);
        assert!(matches(&vec![1i32, 2], &list));
        assert!(matches(&vec!["a".to_string()], &list));
        assert!(!matches(&"a".to_string(), &list));
    }

    #[test]
    fn parameterized_checks_every_element() {
        let list_of_string = TypeDescriptor::list(string());
        assert!(matches(&vec!["Hello".to_string(), "World".to_string()], &list_of_string));
        assert!(!matches(&vec![1i32, 2, 3], &list_of_string));

        let mixed: Vec<Box<dyn Shape>> = vec![Box::new("Hello".to_string()), Box::new(1i32)];
        assert!(!matches(&mixed, &list_of_string));

        let either = TypeDescriptor::parameterized(ContainerKind::List, [string(), TypeDescriptor::of::<i32>()]);
        assert!(matches(&mixed, &either));
    }

    #[test]
    fn empty_containers_match_any_arguments() {
        let empty: Vec<i32> = Vec::new();
        assert!(matches(&empty, &TypeDescriptor::list(string())));
        assert!(matches(&empty, &TypeDescriptor::list(TypeDescriptor::of::<f64>())));
        assert!(!matches(&empty, &TypeDescriptor::set(string())));
    }

    #[test]
    fn container_kind_must_agree() {
        let set: HashSet<String> = ["Hello".to_string()].into_iter().collect();
        assert!(!matches(&set, &TypeDescriptor::list(string())));
        assert!(matches(&set, &TypeDescriptor::set(string())));

        let map: BTreeMap<String, i64> = [("a".to_string(), 1)].into_iter().collect();
        assert!(matches(&map, &TypeDescriptor::map(TypeDescriptor::of::<i64>())));
        assert!(!matches(&map, &TypeDescriptor::map(string())));
    }

    #[test]
    fn nested_descriptors_recurse() {
        let nested = TypeDescriptor::list(TypeDescriptor::list(string()));
        assert!(matches(&vec![vec!["Hello".to_string(), "World".to_string()]], &nested));
        assert!(!matches(&vec!["Hello".to_string()], &nested));
    }

    #[test]
    fn scalars_never_match_parameterized_descriptors() {
        let d = TypeDescriptor::parameterized(RawType::of::<String>(), [string()]);
        assert!(!matches(&"a".to_string(), &d));
    }

    #[test]
    fn absent_values_and_elements_never_match() {
        assert!(!matches(&None::<String>, &string()));
        assert!(matches(&Some("a".to_string()), &string()));
        let holes = vec![Some("a".to_string()), None];
        assert!(!matches(&holes, &TypeDescriptor::list(string())));
    }

    #[test]
    fn first_match_is_in_declaration_order() {
        let types = [
            TypeDescriptor::simple(ContainerKind::List),
            TypeDescriptor::list(string()),
        ];
        let (index, descriptor) = first_match(&vec!["a".to_string()], &types).unwrap();
        assert_eq!(index, 0);
        assert_eq!(descriptor, &types[0]);
        assert!(first_match(&1i32, &types).is_none());
    }
}
