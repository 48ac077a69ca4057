//! A value slot constrained to a fixed, declared set of types.
//!
//! The allow-list is set once by [`Union::of_types`] and never changes. Every
//! write runs the membership test against it in declaration order and keeps
//! the first descriptor that matches; every guarded read runs the same test
//! against the descriptor the caller asks for.
//!
//! ```
//! use typed_union::{TypeDescriptor, Union};
//!
//! let mut union = Union::of_types([
//!     TypeDescriptor::of::<String>(),
//!     TypeDescriptor::of::<i32>(),
//! ])?;
//! union.set_value(42i32)?;
//! assert_eq!(union.current_type(), Some(&TypeDescriptor::of::<i32>()));
//! assert!(union.set_value(3.14f64).is_err());
//! assert_eq!(union.get_as::<i32>()?, &42);
//! # Ok::<(), typed_union::UnionError>(())
//! ```
use std::fmt;

use tracing::{debug, trace};

use crate::descriptor::{TypeDescriptor, display_list};
use crate::error::UnionError;
use crate::matching::{first_match, matches};
use crate::shape::{Shape, describe};

#[derive(Debug)]
pub struct Union {
    types: Box<[TypeDescriptor]>,
    slot: Option<Slot>,
}

/// The held value and the index of the allowed descriptor it matched.
#[derive(Debug)]
struct Slot {
    value: Box<dyn Shape>,
    type_index: usize,
}

impl Union {
    /// Declare a union over `types`. An empty list is rejected.
    pub fn of_types<I>(types: I) -> Result<Self, UnionError>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let types: Box<[TypeDescriptor]> = types.into_iter().collect();
        if types.is_empty() {
            return Err(UnionError::InvalidConfiguration);
        }
        Ok(Self { types, slot: None })
    }

    /// Store `candidate` under the first allowed descriptor it matches.
    ///
    /// On failure the union keeps whatever it held before.
    pub fn set_value<V: Shape>(&mut self, candidate: V) -> Result<&TypeDescriptor, UnionError> {
        self.set_boxed(Box::new(candidate))
    }

    /// Like [`Union::set_value`] for an already boxed payload.
    pub fn set_boxed(&mut self, candidate: Box<dyn Shape>) -> Result<&TypeDescriptor, UnionError> {
        if candidate.is_absent() {
            debug!("rejected absent value");
            return Err(UnionError::NullValue);
        }
        let Some((type_index, descriptor)) = first_match(&*candidate, &self.types) else {
            let found = describe(&*candidate);
            debug!(%found, "rejected value matching no allowed type");
            return Err(UnionError::TypeMismatch {
                found,
                expected: display_list(&self.types),
            });
        };
        debug!(ty = %descriptor, "stored value");
        self.slot = Some(Slot { value: candidate, type_index });
        Ok(&self.types[type_index])
    }

    /// The held value with no type check at all.
    ///
    /// This is the unguarded read: the caller is trusted to know what was
    /// stored. Prefer [`Union::get`] or [`Union::try_consume`] when the type
    /// has to be verified.
    pub fn value(&self) -> Option<&dyn Shape> {
        self.slot.as_ref().map(|slot| &*slot.value)
    }

    /// Downcast the held value to `T` without consulting any descriptor.
    pub fn value_as<T: 'static>(&self) -> Option<&T> {
        self.value()?.as_any().downcast_ref::<T>()
    }

    /// The held value, if it satisfies `descriptor`.
    pub fn get(&self, descriptor: &TypeDescriptor) -> Result<&dyn Shape, UnionError> {
        trace!(%descriptor, "guarded read");
        match self.value() {
            Some(value) if matches(value, descriptor) => Ok(value),
            value => Err(UnionError::TypeMismatch {
                found: value.map_or_else(|| "nothing".to_string(), describe),
                expected: descriptor.to_string(),
            }),
        }
    }

    /// The held value as `T`, checked against `TypeDescriptor::of::<T>()`.
    ///
    /// A value can match the descriptor and still not downcast to `T` (a JSON
    /// number probes as `i64` but holds a `serde_json::Number`). The mismatch
    /// then names the type the value does downcast to; use [`Union::get`] to
    /// read it.
    pub fn get_as<T: 'static>(&self) -> Result<&T, UnionError> {
        let descriptor = TypeDescriptor::of::<T>();
        let value = self.get(&descriptor)?;
        value.as_any().downcast_ref::<T>().ok_or_else(|| UnionError::TypeMismatch {
            found: value.downcast_type_name().to_string(),
            expected: descriptor.to_string(),
        })
    }

    /// Run `handler` on the held value if it satisfies `descriptor`.
    ///
    /// Returns whether the handler ran. A mismatch (or an empty union) is not
    /// an error: the handler is simply not called.
    pub fn try_consume<F>(&self, handler: F, descriptor: &TypeDescriptor) -> bool
    where
        F: FnOnce(&dyn Shape),
    {
        match self.value() {
            Some(value) if matches(value, descriptor) => {
                trace!(%descriptor, "consuming value");
                handler(value);
                true
            }
            _ => false,
        }
    }

    /// Run `handler` on the held value if it is a `T`.
    pub fn try_consume_as<T, F>(&self, handler: F) -> bool
    where
        T: 'static,
        F: FnOnce(&T),
    {
        let descriptor = TypeDescriptor::of::<T>();
        let Some(value) = self.value().filter(|value| matches(*value, &descriptor)) else {
            return false;
        };
        match value.as_any().downcast_ref::<T>() {
            Some(typed) => {
                trace!(%descriptor, "consuming value");
                handler(typed);
                true
            }
            None => false,
        }
    }

    /// The declared allow-list, in declaration order.
    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    /// The allowed descriptor the held value matched when it was stored.
    pub fn current_type(&self) -> Option<&TypeDescriptor> {
        self.slot.as_ref().map(|slot| &self.types[slot.type_index])
    }

    pub fn has_value(&self) -> bool {
        self.slot.is_some()
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let types = display_list(&self.types);
        match &self.slot {
            None => write!(f, "Union{{types={types}, value=null}}"),
            Some(slot) => write!(
                f,
                "Union{{types={types}, type={}, value={:?}}}",
                self.types[slot.type_index], slot.value
            ),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
