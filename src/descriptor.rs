use crate::shape::Shape;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A value that can live in a container slot
///
/// Blanket-implemented for every `'static + Debug + Send + Sync` type. Declaring
/// a type in a shape additionally requires `Default`, since every slot starts
/// out default-initialized.
pub trait Element: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Element for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn make_default<T: Element + Default>() -> Box<dyn Element> {
    Box::new(T::default())
}

/// Identity record for one plain element type
///
/// Two records are equal iff they describe the same type. The record also
/// knows how to build a default value of its type, which is how a container
/// fills its slots.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    make: fn() -> Box<dyn Element>,
}

impl TypeInfo {
    pub fn of<T: Element + Default>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            make: make_default::<T>,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name as reported by [`std::any::type_name`]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    pub(crate) fn instantiate(&self) -> Box<dyn Element> {
        (self.make)()
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// One entry of a declared type list: a plain type or a nested shape
#[derive(Clone, PartialEq, Eq)]
pub enum Descriptor {
    Type(TypeInfo),
    Shape(Shape),
}

impl Descriptor {
    /// Describes a plain type or a `ShapeOf<...>` declaration
    pub fn of<M: Member>() -> Self {
        M::describe()
    }

    /// Whether this entry is `id` itself or a nested shape holding it
    pub fn covers(&self, id: TypeId) -> bool {
        match self {
            Self::Type(info) => info.id() == id,
            Self::Shape(shape) => shape.contains(id),
        }
    }
}

impl From<TypeInfo> for Descriptor {
    fn from(info: TypeInfo) -> Self {
        Self::Type(info)
    }
}

impl From<Shape> for Descriptor {
    fn from(shape: Shape) -> Self {
        Self::Shape(shape)
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(info) => fmt::Debug::fmt(info, f),
            Self::Shape(shape) => write!(f, "ShapeOf{shape}"),
        }
    }
}

/// Declaration marker for a nested container shape
///
/// `ShapeOf<(A, B)>` used inside a type list stands for "the elements of the
/// shape `[A, B]`" and is flattened into its parent during canonicalization.
/// `ShapeOf<()>` is the empty shape. The marker is never instantiated.
pub struct ShapeOf<L>(PhantomData<fn() -> L>);

/// A type that may appear in a declared type list
pub trait Member: 'static {
    fn describe() -> Descriptor;
}

impl<T: Element + Default> Member for T {
    fn describe() -> Descriptor {
        Descriptor::Type(TypeInfo::of::<T>())
    }
}

impl<L: TypeList> Member for ShapeOf<L> {
    fn describe() -> Descriptor {
        Descriptor::Shape(Shape::of::<L>())
    }
}

/// An ordered list of element types, written as a tuple
///
/// Implemented for `()`, tuples of up to sixteen [`Member`]s, and
/// `ShapeOf<L>` so that shape aliases can be instantiated directly.
pub trait TypeList: 'static {
    fn descriptors() -> Vec<Descriptor>;
}

impl TypeList for () {
    fn descriptors() -> Vec<Descriptor> {
        Vec::new()
    }
}

impl<L: TypeList> TypeList for ShapeOf<L> {
    fn descriptors() -> Vec<Descriptor> {
        L::descriptors()
    }
}

macro_rules! impl_type_list {
    ($($name:ident),+) => {
        impl<$($name: Member),+> TypeList for ($($name,)+) {
            fn descriptors() -> Vec<Descriptor> {
                vec![$($name::describe()),+]
            }
        }
    };
}

impl_type_list!(A);
impl_type_list!(A, B);
impl_type_list!(A, B, C);
impl_type_list!(A, B, C, D);
impl_type_list!(A, B, C, D, E);
impl_type_list!(A, B, C, D, E, F);
impl_type_list!(A, B, C, D, E, F, G);
impl_type_list!(A, B, C, D, E, F, G, H);
impl_type_list!(A, B, C, D, E, F, G, H, I);
impl_type_list!(A, B, C, D, E, F, G, H, I, J);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L, M);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L, M, N);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O);
impl_type_list!(A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P);
