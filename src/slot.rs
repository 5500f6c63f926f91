use crate::descriptor::{Element, TypeInfo};
use std::fmt;

/// The storage for the single value of one element type
///
/// Slots are handed to traversal visitors. The stored value can be inspected
/// through [`Slot::value`] or reached at its concrete type with the downcast
/// methods; its type never changes.
pub struct Slot {
    info: TypeInfo,
    value: Box<dyn Element>,
}

impl Slot {
    /// Creates a slot holding a default value of the described type
    pub(crate) fn new(info: TypeInfo) -> Self {
        Self {
            info,
            value: info.instantiate(),
        }
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.info
    }

    /// Check if the slot holds a value of type T
    pub fn is<T: 'static>(&self) -> bool {
        self.info.is::<T>()
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        (*self.value).as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        (*self.value).as_any_mut().downcast_mut::<T>()
    }

    /// The stored value, type-erased
    pub fn value(&self) -> &dyn Element {
        &*self.value
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("type", &self.info.name())
            .field("value", &self.value)
            .finish()
    }
}
