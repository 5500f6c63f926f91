use crate::descriptor::{Descriptor, Member, TypeInfo};
use crate::error::ShapeError;
use crate::shape::Shape;
use std::any::TypeId;
use std::collections::HashMap;
use tracing::debug;

/// A type-to-type substitution used to derive one shape from another
///
/// Returning `None` means the rule is undefined for `source`; mapping a shape
/// that contains such a type fails with [`ShapeError::Unmapped`].
pub trait Rule {
    fn map_type(&self, source: &TypeInfo) -> Option<Descriptor>;
}

impl<F> Rule for F
where
    F: Fn(&TypeInfo) -> Option<Descriptor>,
{
    fn map_type(&self, source: &TypeInfo) -> Option<Descriptor> {
        self(source)
    }
}

/// A [`Rule`] built from explicit per-type routes and an optional fallback
///
/// # Examples
///
/// ```
/// use sovran_typeset::{RuleTable, Shape, ShapeError};
///
/// // f32 becomes f64, everything else becomes i64
/// let rule = RuleTable::new().route::<f32, f64>().fallback::<i64>();
///
/// let mapped = Shape::of::<(i32, f32, u8)>().map(&rule)?;
/// assert_eq!(mapped.type_names(), vec!["f64", "i64"]);
/// # Ok::<(), ShapeError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    routes: HashMap<TypeId, Descriptor>,
    fallback: Option<Descriptor>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `S` to `D`; `D` may be a plain type or a `ShapeOf<...>`
    pub fn route<S: ?Sized + 'static, D: Member>(self) -> Self {
        self.route_to(TypeId::of::<S>(), D::describe())
    }

    pub fn route_to(mut self, source: TypeId, target: impl Into<Descriptor>) -> Self {
        self.routes.insert(source, target.into());
        self
    }

    /// Target for every type without an explicit route
    pub fn fallback<D: Member>(mut self) -> Self {
        self.fallback = Some(D::describe());
        self
    }
}

impl Rule for RuleTable {
    fn map_type(&self, source: &TypeInfo) -> Option<Descriptor> {
        self.routes
            .get(&source.id())
            .or(self.fallback.as_ref())
            .cloned()
    }
}

impl Shape {
    /// Derives a new shape by passing every element through `rule`
    ///
    /// The substituted list is canonicalized again, so types that several
    /// elements map onto collapse into one slot, and rules that yield nested
    /// shapes are flattened. The rule is applied to this shape's elements
    /// only; it does not recurse into the shapes it returns.
    ///
    /// # Errors
    ///
    /// Returns `ShapeError::Unmapped` if the rule is undefined for any element.
    pub fn map<R: Rule + ?Sized>(&self, rule: &R) -> Result<Shape, ShapeError> {
        let substituted = self
            .iter()
            .map(|info| {
                rule.map_type(info).ok_or(ShapeError::Unmapped {
                    type_name: info.name(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mapped = Shape::from_descriptors(substituted);
        debug!(source = %self, target = %mapped, "mapped shape");
        Ok(mapped)
    }
}
