use crate::descriptor::TypeList;
use crate::error::ShapeError;
use crate::predicate::Predicate;
use crate::shape::Shape;
use crate::slot::Slot;
use std::fmt;
use std::mem;
use tracing::debug;

/// A heterogeneous container holding one value per element type of its shape
///
/// Every slot is default-initialized when the container is built. Values are
/// addressed by type; asking for a type outside the shape is reported as
/// [`ShapeError::NotInShape`] without touching any slot.
///
/// `Container` has no internal locking. It is `Send + Sync`, so callers that
/// need shared mutation wrap it in a mutex of their choosing.
///
/// # Examples
///
/// ```
/// use sovran_typeset::{is, Container, ShapeError};
///
/// let mut tuple = Container::of::<(i32, f32)>();
/// tuple.set(123i32)?;
/// tuple.set(456.0f32)?;
///
/// // double every value
/// tuple.apply(|slot| {
///     if let Some(v) = slot.downcast_mut::<i32>() {
///         *v *= 2;
///     } else if let Some(v) = slot.downcast_mut::<f32>() {
///         *v *= 2.0;
///     }
/// });
///
/// // and the i32 once more
/// tuple.apply_if(is::<i32>(), |slot| {
///     if let Some(v) = slot.downcast_mut::<i32>() {
///         *v *= 2;
///     }
/// });
///
/// assert_eq!(*tuple.get::<i32>()?, 492);
/// assert_eq!(*tuple.get::<f32>()?, 912.0);
/// # Ok::<(), ShapeError>(())
/// ```
pub struct Container {
    shape: Shape,
    slots: Vec<Slot>,
}

impl Container {
    /// Builds a container over `shape` with every slot default-initialized
    pub fn new(shape: Shape) -> Self {
        let slots = shape.iter().map(|info| Slot::new(*info)).collect();
        debug!(shape = %shape, "instantiated container");
        Self { shape, slots }
    }

    /// Builds a container over the canonical shape of a declared type list
    pub fn of<L: TypeList>() -> Self {
        Self::new(Shape::of::<L>())
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `T` is an element of this container's shape
    pub fn has<T: 'static>(&self) -> bool {
        self.shape.has::<T>()
    }

    fn slot<T: 'static>(&self) -> Option<&Slot> {
        self.shape.position::<T>().and_then(|i| self.slots.get(i))
    }

    fn slot_mut<T: 'static>(&mut self) -> Option<&mut Slot> {
        self.shape.position::<T>().and_then(|i| self.slots.get_mut(i))
    }

    /// Returns a reference to the value stored for `T`
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotInShape` if `T` is not an element of the shape.
    pub fn get<T: 'static>(&self) -> Result<&T, ShapeError> {
        self.slot::<T>()
            .and_then(Slot::downcast_ref::<T>)
            .ok_or_else(ShapeError::not_in_shape::<T>)
    }

    /// Returns a mutable reference to the value stored for `T`
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotInShape` if `T` is not an element of the shape.
    pub fn get_mut<T: 'static>(&mut self) -> Result<&mut T, ShapeError> {
        self.slot_mut::<T>()
            .and_then(Slot::downcast_mut::<T>)
            .ok_or_else(ShapeError::not_in_shape::<T>)
    }

    /// Overwrites the value stored for `T`
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotInShape` if `T` is not an element of the shape.
    pub fn set<T: 'static>(&mut self, value: T) -> Result<(), ShapeError> {
        *self.get_mut::<T>()? = value;
        Ok(())
    }

    /// Stores `value` for `T` and returns the value it replaced
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotInShape` if `T` is not an element of the shape.
    pub fn replace<T: 'static>(&mut self, value: T) -> Result<T, ShapeError> {
        Ok(mem::replace(self.get_mut::<T>()?, value))
    }

    /// Gets a value by executing a closure with read access
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotInShape` if `T` is not an element of the shape.
    pub fn with<T: 'static, F, R>(&self, f: F) -> Result<R, ShapeError>
    where
        F: FnOnce(&T) -> R,
    {
        self.get::<T>().map(f)
    }

    /// Gets a value by executing a closure with write access
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::NotInShape` if `T` is not an element of the shape.
    pub fn with_mut<T: 'static, F, R>(&mut self, f: F) -> Result<R, ShapeError>
    where
        F: FnOnce(&mut T) -> R,
    {
        self.get_mut::<T>().map(f)
    }

    /// Visits every slot exactly once, in shape order
    pub fn apply<F>(&mut self, mut visitor: F)
    where
        F: FnMut(&mut Slot),
    {
        for slot in &mut self.slots {
            visitor(slot);
        }
    }

    /// Visits, in shape order, the slots whose type satisfies `predicate`
    pub fn apply_if<P, F>(&mut self, predicate: P, mut visitor: F)
    where
        P: Predicate,
        F: FnMut(&mut Slot),
    {
        for slot in &mut self.slots {
            if predicate.check(slot.type_info()) {
                visitor(slot);
            }
        }
    }

    /// Read-only iteration over the slots, in shape order
    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(Shape::empty())
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.slots
                    .iter()
                    .map(|slot| (slot.type_info().name(), slot.value())),
            )
            .finish()
    }
}
