//! Textual descriptors: `String`, `int`, `list<list<String>>`, `map<i64, f64>`.
//!
//! The grammar is the `Display` form of [`TypeDescriptor`]. Names resolve
//! against a fixed table; anything else is rejected.
use std::collections::HashMap;
use std::str::FromStr;

use once_cell::sync::Lazy;

use super::{ContainerKind, PrimitiveKind, RawType, TypeDescriptor};
use crate::error::DescriptorParseError;

/// Deepest argument nesting accepted from text, as in `serde_json`.
pub const MAX_DEPTH: usize = 128;

static NAMED_TYPES: Lazy<HashMap<&'static str, RawType>> = Lazy::new(|| {
    let mut names = HashMap::new();
    names.insert("String", RawType::of::<String>());
    names.insert("string", RawType::of::<String>());
    names.insert("i8", RawType::of::<i8>());
    names.insert("i16", RawType::of::<i16>());
    names.insert("i32", RawType::of::<i32>());
    names.insert("i64", RawType::of::<i64>());
    names.insert("u8", RawType::of::<u8>());
    names.insert("u16", RawType::of::<u16>());
    names.insert("u32", RawType::of::<u32>());
    names.insert("u64", RawType::of::<u64>());
    names.insert("f32", RawType::of::<f32>());
    names.insert("f64", RawType::of::<f64>());
    names.insert("bool", RawType::of::<bool>());
    names.insert("char", RawType::of::<char>());
    for kind in PrimitiveKind::ALL {
        names.insert(kind.name(), RawType::Primitive(kind));
    }
    for kind in [ContainerKind::List, ContainerKind::Set, ContainerKind::Map] {
        names.insert(kind.name(), RawType::Container(kind));
    }
    names
});

/// Resolve a bare type name (no arguments).
pub fn lookup(name: &str) -> Option<RawType> {
    NAMED_TYPES.get(name).copied()
}

impl FromStr for TypeDescriptor {
    type Err = DescriptorParseError;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser { src, pos: 0, depth: 0 };
        let descriptor = parser.descriptor()?;
        parser.skip_ws();
        match parser.peek() {
            None => Ok(descriptor),
            Some(c) => Err(DescriptorParseError::Unexpected { found: c, offset: parser.pos }),
        }
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn name(&mut self) -> Result<&'a str, DescriptorParseError> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }
            self.pos += 1;
        }
        if start == self.pos {
            return Err(DescriptorParseError::MissingName(start));
        }
        Ok(&self.src[start..self.pos])
    }

    fn expect(&mut self, wanted: char) -> Result<(), DescriptorParseError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(c) => Err(DescriptorParseError::Unexpected { found: c, offset: self.pos }),
            None => Err(DescriptorParseError::UnexpectedEnd(wanted)),
        }
    }

    fn descriptor(&mut self) -> Result<TypeDescriptor, DescriptorParseError> {
        let name = self.name()?;
        let raw = lookup(name).ok_or_else(|| DescriptorParseError::UnknownType(name.to_string()))?;
        self.skip_ws();
        if self.peek() != Some('<') {
            return Ok(TypeDescriptor::simple(raw));
        }
        if self.depth == MAX_DEPTH {
            return Err(DescriptorParseError::TooDeep(MAX_DEPTH));
        }
        self.expect('<')?;
        self.depth += 1;
        let mut args = vec![self.descriptor()?];
        loop {
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.pos += 1;
                    args.push(self.descriptor()?);
                }
                _ => break,
            }
        }
        self.expect('>')?;
        self.depth -= 1;
        Ok(TypeDescriptor::parameterized(raw, args))
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_names() {
        assert_eq!("String".parse::<TypeDescriptor>().unwrap(), TypeDescriptor::of::<String>());
        assert_eq!("i64".parse::<TypeDescriptor>().unwrap(), TypeDescriptor::of::<i64>());
        assert_eq!(
            "int".parse::<TypeDescriptor>().unwrap(),
            TypeDescriptor::primitive(PrimitiveKind::Int)
        );
        assert_eq!("list".parse::<TypeDescriptor>().unwrap(), TypeDescriptor::simple(ContainerKind::List));
    }

    #[test]
    fn parses_nested_arguments_with_whitespace() {
        let d: TypeDescriptor = " list< list <String> > ".parse().unwrap();
        assert_eq!(d, TypeDescriptor::list(TypeDescriptor::list(TypeDescriptor::of::<String>())));

        let pair: TypeDescriptor = "map<i64,f64>".parse().unwrap();
        assert_eq!(pair.args().len(), 2);
        assert_eq!(pair.to_string(), "map<i64, f64>");
    }

    #[test]
    fn display_form_parses_back() {
        let d = TypeDescriptor::set(TypeDescriptor::map(TypeDescriptor::primitive(PrimitiveKind::Double)));
        assert_eq!(d.to_string().parse::<TypeDescriptor>().unwrap(), d);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            "Strin".parse::<TypeDescriptor>(),
            Err(DescriptorParseError::UnknownType("Strin".into()))
        );
        assert_eq!("".parse::<TypeDescriptor>(), Err(DescriptorParseError::MissingName(0)));
        assert_eq!("list<String".parse::<TypeDescriptor>(), Err(DescriptorParseError::UnexpectedEnd('>')));
        assert_eq!(
            "list<String>>".parse::<TypeDescriptor>(),
            Err(DescriptorParseError::Unexpected { found: '>', offset: 12 })
        );
        assert_eq!("list<>".parse::<TypeDescriptor>(), Err(DescriptorParseError::MissingName(5)));
    }

    fn nested_lists(levels: usize) -> String {
        format!("{}String{}", "list<".repeat(levels), ">".repeat(levels))
    }

    #[test]
    fn nesting_is_bounded() {
        let deepest: TypeDescriptor = nested_lists(MAX_DEPTH).parse().unwrap();
        assert_eq!(deepest.depth(), MAX_DEPTH);
        assert_eq!(
            nested_lists(MAX_DEPTH + 1).parse::<TypeDescriptor>(),
            Err(DescriptorParseError::TooDeep(MAX_DEPTH))
        );
        assert_eq!(
            nested_lists(200_000).parse::<TypeDescriptor>(),
            Err(DescriptorParseError::TooDeep(MAX_DEPTH))
        );
    }
}
