//! Constrained polymorphic value container.
//!
//! A [`Union`] holds at most one value whose type must belong to a fixed set
//! of [`TypeDescriptor`]s declared at construction. Values describe
//! themselves to the matcher through [`Shape`]; descriptors can be simple
//! (`String`), numeric-kind markers (`int`), or parameterized container
//! shapes (`list<list<String>>`) whose elements are checked recursively.
#[macro_use]
mod macros;

pub mod config;
pub mod descriptor;
pub mod error;
pub mod matching;
pub mod shape;
pub mod union;

pub use config::{ConfigError, UnionConfig};
pub use descriptor::{ContainerKind, PrimitiveKind, RawType, TypeDescriptor, TypeName};
pub use error::{DescriptorParseError, UnionError};
pub use matching::matches;
pub use shape::Shape;
pub use union::Union;
