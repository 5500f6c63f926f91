use thiserror::Error;

/// Errors that can occur when accessing a container or deriving a shape
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    /// The requested type is not an element of the container's shape
    #[error("type `{type_name}` is not an element of this shape")]
    NotInShape { type_name: &'static str },
    /// A mapping rule has no replacement for one of the shape's elements
    #[error("mapping rule is undefined for element type `{type_name}`")]
    Unmapped { type_name: &'static str },
}

impl ShapeError {
    pub(crate) fn not_in_shape<T: ?Sized>() -> Self {
        Self::NotInShape {
            type_name: std::any::type_name::<T>(),
        }
    }
}
