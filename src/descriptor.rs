//! Immutable type descriptors.
//!
//! A descriptor is either simple (`String`, `int`, `list`) or parameterized
//! (`list<String>`, `map<list<i64>>`): a raw type plus an ordered list of
//! argument descriptors, nested to any depth. Equality and hashing are
//! structural and order-sensitive on arguments.
pub mod kind;
pub mod parse;

use std::fmt;

pub use kind::{ContainerKind, PrimitiveKind, RawType, TypeName};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    raw: RawType,
    args: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Descriptor with no type arguments.
    pub fn simple(raw: impl Into<RawType>) -> Self {
        Self { raw: raw.into(), args: Vec::new() }
    }

    /// Descriptor with ordered type arguments. No arguments yields a simple descriptor.
    pub fn parameterized<I>(raw: impl Into<RawType>, args: I) -> Self
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        Self { raw: raw.into(), args: args.into_iter().collect() }
    }

    /// Simple descriptor for the concrete Rust type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::simple(RawType::of::<T>())
    }

    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::simple(kind)
    }

    pub fn list(elem: TypeDescriptor) -> Self {
        Self::parameterized(ContainerKind::List, [elem])
    }

    pub fn set(elem: TypeDescriptor) -> Self {
        Self::parameterized(ContainerKind::Set, [elem])
    }

    /// Map descriptor; the argument constrains the map values.
    pub fn map(value: TypeDescriptor) -> Self {
        Self::parameterized(ContainerKind::Map, [value])
    }

    pub fn raw(&self) -> &RawType {
        &self.raw
    }

    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    pub fn is_parameterized(&self) -> bool {
        !self.args.is_empty()
    }

    /// Nesting depth: 0 for simple descriptors.
    pub fn depth(&self) -> usize {
        self.args.iter().map(|a| a.depth() + 1).max().unwrap_or(0)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;
        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl From<PrimitiveKind> for TypeDescriptor {
    fn from(kind: PrimitiveKind) -> Self {
        Self::primitive(kind)
    }
}

impl From<ContainerKind> for TypeDescriptor {
    fn from(kind: ContainerKind) -> Self {
        Self::simple(kind)
    }
}

/// Renders `[a, b, c]` for diagnostics.
pub(crate) fn display_list(types: &[TypeDescriptor]) -> String {
    let parts: Vec<String> = types.iter().map(ToString::to_string).collect();
    format!("[{}]", parts.join(", "))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn display_simple_and_nested() {
        assert_eq!(TypeDescriptor::of::<String>().to_string(), "String");
        assert_eq!(TypeDescriptor::primitive(PrimitiveKind::Int).to_string(), "int");
        let nested = TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::of::<String>()));
        assert_eq!(nested.to_string(), "list<list<String>>");
        let pair = TypeDescriptor::parameterized(
            ContainerKind::Map,
            [TypeDescriptor::of::<i64>(), TypeDescriptor::of::<f64>()],
        );
        assert_eq!(pair.to_string(), "map<i64, f64>");
    }

    #[test]
    fn equality_is_structural_and_order_sensitive() {
        let a = TypeDescriptor::parameterized(
            ContainerKind::List,
            [TypeDescriptor::of::<String>(), TypeDescriptor::of::<i32>()],
        );
        let b = TypeDescriptor::parameterized(
            ContainerKind::List,
            [TypeDescriptor::of::<String>(), TypeDescriptor::of::<i32>()],
        );
        let swapped = TypeDescriptor::parameterized(
            ContainerKind::List,
            [TypeDescriptor::of::<i32>(), TypeDescriptor::of::<String>()],
        );
        assert_eq!(a, b);
        assert_ne!(a, swapped);
        assert_ne!(TypeDescriptor::list(TypeDescriptor::of::<String>()), TypeDescriptor::set(TypeDescriptor::of::<String>()));

        let set: HashSet<TypeDescriptor> = [a.clone(), b, swapped].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&a));
    }

    #[test]
    fn marker_and_concrete_descriptors_stay_distinct() {
        assert_ne!(TypeDescriptor::primitive(PrimitiveKind::Int), TypeDescriptor::of::<i32>());
    }

    #[test]
    fn parameterized_without_args_is_simple() {
        let d = TypeDescriptor::parameterized(ContainerKind::List, Vec::new());
        assert!(!d.is_parameterized());
        assert_eq!(d, TypeDescriptor::simple(ContainerKind::List));
        assert_eq!(d.depth(), 0);
    }

    #[test]
    fn depth_counts_nesting() {
        let d = TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::of::<String>())));
        assert_eq!(d.depth(), 3);
    }
}
