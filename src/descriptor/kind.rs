use std::any::{self, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Fixed-width numeric-kind markers.
///
/// A marker matches a value of the concrete Rust type it is bound to, so a
/// union declared with `PrimitiveKind::Int` and one declared with
/// `TypeDescriptor::of::<i32>()` accept exactly the same values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Boolean,
    Character,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Boolean,
        Self::Character,
    ];

    /// The concrete Rust type holding values of this kind.
    pub fn bound_type(self) -> TypeName {
        match self {
            Self::Byte => TypeName::of::<i8>(),
            Self::Short => TypeName::of::<i16>(),
            Self::Int => TypeName::of::<i32>(),
            Self::Long => TypeName::of::<i64>(),
            Self::Float => TypeName::of::<f32>(),
            Self::Double => TypeName::of::<f64>(),
            Self::Boolean => TypeName::of::<bool>(),
            Self::Character => TypeName::of::<char>(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Character => "character",
        }
    }
}

/// Element-holding container kinds, independent of the concrete collection type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKind {
    /// `Vec`, `VecDeque`, JSON arrays.
    List,
    /// `HashSet`, `BTreeSet`.
    Set,
    /// `HashMap`, `BTreeMap`, JSON objects. Elements are the map values.
    Map,
}

impl ContainerKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Set => "set",
            Self::Map => "map",
        }
    }
}

/// A concrete Rust type: compared by `TypeId`, displayed by its path-stripped name.
#[derive(Clone, Copy)]
pub struct TypeName {
    id: TypeId,
    name: &'static str,
}

impl TypeName {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<T>(), name: any::type_name::<T>() }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified name as reported by `std::any::type_name`.
    pub fn full_name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeName {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeName {}

impl Hash for TypeName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short_type_name(self.name))
    }
}

/// The non-parameterized part of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawType {
    Type(TypeName),
    Primitive(PrimitiveKind),
    Container(ContainerKind),
}

impl RawType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::Type(TypeName::of::<T>())
    }
}

impl From<PrimitiveKind> for RawType {
    fn from(kind: PrimitiveKind) -> Self {
        Self::Primitive(kind)
    }
}

impl From<ContainerKind> for RawType {
    fn from(kind: ContainerKind) -> Self {
        Self::Container(kind)
    }
}

impl From<TypeName> for RawType {
    fn from(name: TypeName) -> Self {
        Self::Type(name)
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => name.fmt(f),
            Self::Primitive(kind) => f.write_str(kind.name()),
            Self::Container(kind) => f.write_str(kind.name()),
        }
    }
}

/// `alloc::vec::Vec<alloc::string::String>` → `Vec<String>`
pub(crate) fn short_type_name(full: &str) -> String {
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (i, c) in full.char_indices() {
        match c {
            ':' => segment_start = i + 1,
            '<' | '>' | ',' | ' ' | '(' | ')' | '[' | ']' | ';' | '&' => {
                out.push_str(&full[segment_start..i]);
                out.push(c);
                segment_start = i + 1;
            }
            _ => {}
        }
    }
    out.push_str(&full[segment_start..]);
    out
}
