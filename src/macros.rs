/// Declare a [`Union`](crate::Union) over concrete Rust types.
///
/// `union_of![String, i32, f64]` is `Union::of_types` over
/// `TypeDescriptor::of::<T>()` for each listed type; the list doubles as the
/// declaration of which types a field may hold.
///
/// ```
/// use typed_union::union_of;
///
/// let mut prop = union_of![String, i32, f64]?;
/// prop.set_value(23i32)?;
/// assert_eq!(prop.types().len(), 3);
/// # Ok::<(), typed_union::UnionError>(())
/// ```
#[macro_export]
macro_rules! union_of {
    ($($t:ty),+ $(,)?) => {
        $crate::Union::of_types([$($crate::TypeDescriptor::of::<$t>()),+])
    };
}
