use crate::descriptor::TypeInfo;
use crate::shape::Shape;
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// A test on a slot's type, used by [`Container::apply_if`](crate::Container::apply_if)
///
/// Predicates see only the element type, never the stored value.
pub trait Predicate {
    fn check(&self, info: &TypeInfo) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&TypeInfo) -> bool,
{
    fn check(&self, info: &TypeInfo) -> bool {
        self(info)
    }
}

/// Selects the elements of another shape
impl Predicate for Shape {
    fn check(&self, info: &TypeInfo) -> bool {
        self.contains(info.id())
    }
}

/// Matches exactly one type. See [`is`].
pub struct Is<T>(PhantomData<fn() -> T>);

impl<T: 'static> Predicate for Is<T> {
    fn check(&self, info: &TypeInfo) -> bool {
        info.id() == TypeId::of::<T>()
    }
}

impl<T> fmt::Debug for Is<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Is<{}>", std::any::type_name::<T>())
    }
}

/// Selects slots of type `T` only
pub fn is<T: 'static>() -> Is<T> {
    Is(PhantomData)
}

/// Inverts a predicate. See [`not`].
#[derive(Debug, Clone)]
pub struct Not<P>(P);

impl<P: Predicate> Predicate for Not<P> {
    fn check(&self, info: &TypeInfo) -> bool {
        !self.0.check(info)
    }
}

pub fn not<P: Predicate>(predicate: P) -> Not<P> {
    Not(predicate)
}
