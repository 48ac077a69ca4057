//! `serde_json::Value` as a union payload.
//!
//! Strings probe as `String`, booleans as `bool`, integers as `i64` (or `u64`
//! past `i64::MAX`), every other number as `f64`. Arrays are lists, objects are
//! maps over their values, and `null` is absent.
use std::any::Any;

use serde_json::{Map, Number, Value};

use super::Shape;
use crate::descriptor::{ContainerKind, RawType};

fn number_type(n: &Number) -> RawType {
    if n.is_i64() {
        RawType::of::<i64>()
    } else if n.is_u64() {
        RawType::of::<u64>()
    } else {
        RawType::of::<f64>()
    }
}

impl Shape for Value {
    fn raw_type(&self) -> RawType {
        match self {
            Value::Null => RawType::of::<Value>(),
            Value::Bool(_) => RawType::of::<bool>(),
            Value::Number(n) => number_type(n),
            Value::String(_) => RawType::of::<String>(),
            Value::Array(_) => RawType::of::<Vec<Value>>(),
            Value::Object(_) => RawType::of::<Map<String, Value>>(),
        }
    }

    fn container_kind(&self) -> Option<ContainerKind> {
        match self {
            Value::Array(_) => Some(ContainerKind::List),
            Value::Object(_) => Some(ContainerKind::Map),
            _ => None,
        }
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Shape> + '_> {
        match self {
            Value::Array(xs) => Box::new(xs.iter().map(|x| x as &dyn Shape)),
            Value::Object(m) => Box::new(m.values().map(|x| x as &dyn Shape)),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn is_absent(&self) -> bool {
        self.is_null()
    }

    /// Strings, booleans, arrays and objects downcast to their inner Rust
    /// value; numbers downcast to `serde_json::Number`.
    fn as_any(&self) -> &dyn Any {
        match self {
            Value::Null => self,
            Value::Bool(b) => b,
            Value::Number(n) => n,
            Value::String(s) => s,
            Value::Array(xs) => xs,
            Value::Object(m) => m,
        }
    }

    fn downcast_type_name(&self) -> &'static str {
        match self {
            Value::Null => std::any::type_name::<Value>(),
            Value::Bool(_) => std::any::type_name::<bool>(),
            Value::Number(_) => std::any::type_name::<Number>(),
            Value::String(_) => std::any::type_name::<String>(),
            Value::Array(_) => std::any::type_name::<Vec<Value>>(),
            Value::Object(_) => std::any::type_name::<Map<String, Value>>(),
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
