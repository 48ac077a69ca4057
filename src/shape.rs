//! Runtime shape probe for union payloads.
//!
//! Membership testing never inspects a payload directly; it asks the payload
//! for its raw type, its container kind and its elements through [`Shape`].
pub mod json;

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;

use crate::descriptor::{ContainerKind, RawType};

/// What a value can tell the matcher about itself.
///
/// Payloads are `Send + Sync` so a [`crate::Union`] can sit behind a lock
/// shared between threads.
pub trait Shape: Any + Send + Sync + fmt::Debug {
    /// The concrete runtime type of the value.
    fn raw_type(&self) -> RawType {
        RawType::of::<Self>()
    }

    /// `Some` when the value holds elements that parameterized descriptors constrain.
    fn container_kind(&self) -> Option<ContainerKind> {
        None
    }

    /// Elements currently held. Empty for non-containers.
    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
        Box::new(std::iter::empty())
    }

    /// True for values standing for "nothing" (`None`, JSON `null`).
    fn is_absent(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    /// Name of the type [`Shape::as_any`] downcasts to.
    fn downcast_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

macro_rules! impl_scalar_shape {
    ($($t:ty),* $(,)?) => {
        $(
            impl Shape for $t {
                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

impl_scalar_shape!(
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
    f32, f64, bool, char, String, (),
);

macro_rules! impl_container_shape {
    ($kind:expr => $($coll:ident),*) => {
        $(
            impl<T: Shape> Shape for $coll<T> {
                fn container_kind(&self) -> Option<ContainerKind> {
                    Some($kind)
                }

                fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
                    Box::new(self.iter().map(|x| x as &dyn Shape))
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

impl_container_shape!(ContainerKind::List => Vec, VecDeque);
impl_container_shape!(ContainerKind::Set => HashSet, BTreeSet);

impl<K: fmt::Debug + Send + Sync + 'static, V: Shape> Shape for HashMap<K, V> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::Map)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
        Box::new(self.values().map(|x| x as &dyn Shape))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<K: fmt::Debug + Send + Sync + 'static, V: Shape> Shape for BTreeMap<K, V> {
    fn container_kind(&self) -> Option<ContainerKind> {
        Some(ContainerKind::Map)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
        Box::new(self.values().map(|x| x as &dyn Shape))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// `Some(v)` is probed as `v`; `None` is absent.
impl<T: Shape> Shape for Option<T> {
    fn raw_type(&self) -> RawType {
        match self {
            Some(v) => v.raw_type(),
            None => RawType::of::<Self>(),
        }
    }

    fn container_kind(&self) -> Option<ContainerKind> {
        self.as_ref().and_then(Shape::container_kind)
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
        match self {
            Some(v) => v.elements(),
            None => Box::new(std::iter::empty()),
        }
    }

    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(Shape::is_absent)
    }

    fn as_any(&self) -> &dyn Any {
        match self {
            Some(v) => v.as_any(),
            None => self,
        }
    }

    fn downcast_type_name(&self) -> &'static str {
        match self {
            Some(v) => v.downcast_type_name(),
            None => std::any::type_name::<Self>(),
        }
    }
}

/// Boxed payloads delegate to the boxed value, so `Vec<Box<dyn Shape>>` is a
/// heterogeneous list whose elements are probed individually.
impl Shape for Box<dyn Shape> {
    fn raw_type(&self) -> RawType {
        (**self).raw_type()
    }

    fn container_kind(&self) -> Option<ContainerKind> {
        (**self).container_kind()
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
        (**self).elements()
    }

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn as_any(&self) -> &dyn Any {
        (**self).as_any()
    }

    fn downcast_type_name(&self) -> &'static str {
        (**self).downcast_type_name()
    }
}

/// Name of the value's runtime type, for diagnostics.
pub fn describe(value: &dyn Shape) -> String {
    if value.is_absent() {
        return "null".to_string();
    }
    value.raw_type().to_string()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars_report_their_own_type() {
        assert_eq!(42i32.raw_type(), RawType::of::<i32>());
        assert_eq!("x".to_string().raw_type(), RawType::of::<String>());
        assert!(42i32.container_kind().is_none());
        assert_eq!(42i32.elements().count(), 0);
    }

    #[test]
    fn collections_expose_kind_and_elements() {
        let v = vec![1i32, 2, 3];
        assert_eq!(v.raw_type(), RawType::of::<Vec<i32>>());
        assert_eq!(v.container_kind(), Some(ContainerKind::List));
        assert_eq!(v.elements().count(), 3);

        let s: BTreeSet<String> = ["a".to_string()].into_iter().collect();
        assert_eq!(s.container_kind(), Some(ContainerKind::Set));

        let m: HashMap<String, i64> = [("k".to_string(), 1i64)].into_iter().collect();
        assert_eq!(m.container_kind(), Some(ContainerKind::Map));
        let values: Vec<RawType> = m.elements().map(|e| e.raw_type()).collect();
        assert_eq!(values, vec![RawType::of::<i64>()]);
    }

    #[test]
    fn option_delegates_or_is_absent() {
        let some: Option<i32> = Some(7);
        assert_eq!(some.raw_type(), RawType::of::<i32>());
        assert_eq!(some.as_any().downcast_ref::<i32>(), Some(&7));
        assert!(!some.is_absent());

        let none: Option<i32> = None;
        assert!(none.is_absent());
        assert_eq!(describe(&none), "null");
    }

    #[test]
    fn boxed_values_delegate() {
        let mixed: Vec<Box<dyn Shape>> = vec![Box::new("Hello".to_string()), Box::new(1i32)];
        let kinds: Vec<RawType> = mixed.elements().map(|e| e.raw_type()).collect();
        assert_eq!(kinds, vec![RawType::of::<String>(), RawType::of::<i32>()]);
        assert_eq!(mixed[1].as_any().downcast_ref::<i32>(), Some(&1));
    }

    #[test]
    fn describe_uses_short_names() {
        assert_eq!(describe(&vec!["a".to_string()]), "Vec<String>");
        assert_eq!(describe(&3.14f32), "f32");
    }
}
