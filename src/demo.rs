//! Model types that keep a union field behind strongly typed setters.
use anyhow::Result;
use typed_union::{Shape, TypeDescriptor, Union, union_of};

/// A model whose `prop1` is `String | i32 | f64`.
///
/// The three member types are distinct, so each gets its own setter and
/// callers never hand the union an arbitrary value.
pub struct ModelType {
    prop1: Union,
}

impl ModelType {
    pub fn new() -> Result<Self> {
        Ok(Self { prop1: union_of![String, i32, f64]? })
    }

    pub fn prop1(&self) -> &Union {
        &self.prop1
    }

    pub fn set_prop1_str(&mut self, value: String) -> Result<()> {
        self.prop1.set_value(value)?;
        Ok(())
    }

    pub fn set_prop1_int(&mut self, value: i32) -> Result<()> {
        self.prop1.set_value(value)?;
        Ok(())
    }

    pub fn set_prop1_double(&mut self, value: f64) -> Result<()> {
        self.prop1.set_value(value)?;
        Ok(())
    }
}

/// A model whose `foo_values` is `list<String> | list<i32> | list<f32>`.
///
/// All three members are lists, so the setters need distinct names and
/// readers go through `try_consume` with the element type they expect.
pub struct GenericModelType {
    foo_values: Union,
}

impl GenericModelType {
    pub fn new() -> Result<Self> {
        let foo_values = Union::of_types([
            TypeDescriptor::list(TypeDescriptor::of::<String>()),
            TypeDescriptor::list(TypeDescriptor::of::<i32>()),
            TypeDescriptor::list(TypeDescriptor::of::<f32>()),
        ])?;
        Ok(Self { foo_values })
    }

    pub fn foo_values(&self) -> &Union {
        &self.foo_values
    }

    pub fn set_foo_values_as_strings(&mut self, values: Vec<String>) -> Result<()> {
        self.foo_values.set_value(values)?;
        Ok(())
    }

    pub fn set_foo_values_as_integers(&mut self, values: Vec<i32>) -> Result<()> {
        self.foo_values.set_value(values)?;
        Ok(())
    }

    pub fn set_foo_values_as_floats(&mut self, values: Vec<f32>) -> Result<()> {
        self.foo_values.set_value(values)?;
        Ok(())
    }
}

fn describe_prop(union: &Union) -> String {
    if let Some(s) = union.value_as::<String>() {
        format!("String value: {s}")
    } else if let Some(i) = union.value_as::<i32>() {
        format!("Integer value: {i}")
    } else if let Some(d) = union.value_as::<f64>() {
        format!("Double value: {d}")
    } else {
        format!("Unknown type: {}", union.current_type().map_or_else(|| "none".to_string(), ToString::to_string))
    }
}

pub fn run() -> Result<()> {
    let mut model = ModelType::new()?;

    model.set_prop1_str("Hello".to_string())?;
    println!("{}", describe_prop(model.prop1()));
    model.prop1().try_consume_as::<String, _>(|v| println!("String value from closure: {v}"));
    println!("Value (from get_as): {}", model.prop1().get_as::<String>()?);

    model.set_prop1_int(123)?;
    println!("{}", describe_prop(model.prop1()));
    model.set_prop1_double(3.14)?;
    println!("{}", describe_prop(model.prop1()));

    // i64 is not a declared member
    let mut raw = union_of![String, i32, f64]?;
    if let Err(error) = raw.set_value(123i64) {
        println!("Caught error: {error}");
    }

    let mut generic = GenericModelType::new()?;
    generic.set_foo_values_as_strings(vec!["Hello".to_string(), "World".to_string()])?;
    let strings = TypeDescriptor::list(TypeDescriptor::of::<String>());
    generic
        .foo_values()
        .try_consume(|v: &dyn Shape| println!("Strings: {v:?}"), &strings);
    generic.set_foo_values_as_integers(vec![1, 2, 3])?;
    println!("{}", generic.foo_values());
    generic.set_foo_values_as_floats(vec![1.5, 2.5])?;
    println!("{}", generic.foo_values());

    Ok(())
}
