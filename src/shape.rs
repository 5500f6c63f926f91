use crate::descriptor::{Descriptor, TypeInfo, TypeList};
use std::any::TypeId;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A canonical container shape
///
/// An ordered list of distinct plain element types. Every `Shape` is produced
/// by canonicalizing a declared list of [`Descriptor`]s:
///
/// - an empty nested shape is dropped,
/// - a non-empty nested shape is spliced in place of itself,
/// - a plain type that occurs again later in the list (directly or inside a
///   nested shape) is dropped, so the *last* occurrence survives in its own
///   position.
///
/// Shapes share their element list, so cloning one is cheap.
///
/// # Examples
///
/// ```
/// use sovran_typeset::{Shape, ShapeOf};
///
/// let shape = Shape::of::<(i16, ShapeOf<(i32, f32)>, f64)>();
/// assert_eq!(shape.type_names(), vec!["i16", "i32", "f32", "f64"]);
///
/// let deduped = Shape::of::<(i32, f32, i32)>();
/// assert_eq!(deduped.type_names(), vec!["f32", "i32"]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    types: Arc<[TypeInfo]>,
}

impl Shape {
    /// The shape with no elements
    pub fn empty() -> Self {
        Self {
            types: Arc::from(Vec::new()),
        }
    }

    /// Canonicalizes the shape declared by a tuple of element types
    pub fn of<L: TypeList>() -> Self {
        Self::from_descriptors(L::descriptors())
    }

    /// Canonicalizes an arbitrary ordered list of descriptors
    pub fn from_descriptors<I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = Descriptor>,
    {
        Self {
            types: Arc::from(canonicalize(descriptors.into_iter().collect())),
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn has<T: ?Sized + 'static>(&self) -> bool {
        self.contains(TypeId::of::<T>())
    }

    pub fn contains(&self, id: TypeId) -> bool {
        self.position_of(id).is_some()
    }

    /// Index of `T`'s slot in shape order
    pub fn position<T: ?Sized + 'static>(&self) -> Option<usize> {
        self.position_of(TypeId::of::<T>())
    }

    pub fn position_of(&self, id: TypeId) -> Option<usize> {
        self.types.iter().position(|info| info.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TypeInfo> {
        self.types.iter()
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.types.iter().map(TypeInfo::name).collect()
    }

    /// The shape's elements as plain descriptors, in order
    pub fn descriptors(&self) -> impl Iterator<Item = Descriptor> + '_ {
        self.types.iter().copied().map(Descriptor::Type)
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = &'a TypeInfo;
    type IntoIter = std::slice::Iter<'a, TypeInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.types.iter()).finish()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.type_names().join(", "))
    }
}

/// Rewrites a declared list front to back until only distinct plain types remain.
fn canonicalize(declared: Vec<Descriptor>) -> Vec<TypeInfo> {
    let declared_len = declared.len();
    let mut pending: VecDeque<Descriptor> = declared.into();
    let mut types = Vec::with_capacity(pending.len());

    while let Some(head) = pending.pop_front() {
        match head {
            Descriptor::Shape(nested) if nested.is_empty() => {
                trace!("dropping empty nested shape");
            }
            Descriptor::Shape(nested) => {
                trace!(shape = %nested, "splicing nested shape");
                for info in nested.types.iter().rev() {
                    pending.push_front(Descriptor::Type(*info));
                }
            }
            Descriptor::Type(info) => {
                if pending.iter().any(|later| later.covers(info.id())) {
                    trace!(element = info.name(), "dropping earlier duplicate");
                } else {
                    types.push(info);
                }
            }
        }
    }

    debug!(
        declared = declared_len,
        canonical = types.len(),
        "canonicalized shape"
    );
    types
}
