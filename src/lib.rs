//! # sovran-typeset
//!
//! A heterogeneous container that holds exactly one value per element type.
//!
//! A container's *shape* is declared as a list of types, written as a tuple.
//! The list is canonicalized when the shape is built:
//!
//! - nested shapes (`ShapeOf<...>`) are flattened into their parent,
//! - empty nested shapes disappear,
//! - a type declared more than once keeps only its *last* occurrence.
//!
//! The resulting container offers type-indexed access (`has`, `get`, `set`),
//! traversal of every slot in shape order (`apply`), traversal filtered by a
//! type predicate (`apply_if`), and shape derivation through a type-to-type
//! rule (`Shape::map`), whose result is canonicalized again.
//!
//! ## Key Features
//!
//! - **Type-indexed**: each element type owns one slot, addressed by type
//! - **Canonical shapes**: flattening and deduplication happen once, up front
//! - **Derivable shapes**: map a set of types onto a deduplicated set of related types
//! - **Plain value type**: no locking; wrap it in a mutex if you need to share it
//!
//! ## Usage Examples
//!
//! ### Declaring and Accessing a Container
//!
//! ```rust
//! use sovran_typeset::{Container, ShapeError, ShapeOf};
//!
//! fn main() -> Result<(), ShapeError> {
//!     type Pair = ShapeOf<(i32, f32)>;
//!
//!     // nested shapes are flattened: [i16, i32, f32, f64]
//!     let mut flat = Container::of::<(i16, Pair, f64)>();
//!     flat.set(1i16)?;
//!     flat.set(2i32)?;
//!     flat.set(3.0f32)?;
//!     flat.set(666.0f64)?;
//!
//!     assert_eq!(flat.len(), 4);
//!     assert_eq!(*flat.get::<i32>()?, 2);
//!
//!     // types outside the shape are rejected
//!     assert!(!flat.has::<u8>());
//!     match flat.get::<u8>() {
//!         Err(ShapeError::NotInShape { type_name }) => assert_eq!(type_name, "u8"),
//!         other => panic!("unexpected {other:?}"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Deduplication
//!
//! ```rust
//! use sovran_typeset::{Shape, ShapeOf};
//!
//! // the earlier i32 and f32 are dropped in favour of their later occurrences
//! let shape = Shape::of::<(i32, ShapeOf<(f32, f64, i32)>, f32)>();
//! assert_eq!(shape.type_names(), vec!["f64", "i32", "f32"]);
//! ```
//!
//! ### Deriving a Shape
//!
//! ```rust
//! use sovran_typeset::{Container, RuleTable, Shape, ShapeError};
//!
//! fn main() -> Result<(), ShapeError> {
//!     let rule = RuleTable::new().route::<f32, f64>().fallback::<i64>();
//!     let mapped = Shape::of::<(i32, f32)>().map(&rule)?;
//!
//!     let mut derived = Container::new(mapped);
//!     derived.set(111i64)?;
//!     derived.set(333.0f64)?;
//!     assert_eq!(*derived.get::<i64>()?, 111);
//!     Ok(())
//! }
//! ```
//!
//! ### Sharing a Container Between Threads
//!
//! ```rust
//! use sovran_typeset::Container;
//! use std::sync::{Arc, Mutex};
//! use std::thread;
//!
//! let counters = Arc::new(Mutex::new(Container::of::<(u32, u64)>()));
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let counters = Arc::clone(&counters);
//!         thread::spawn(move || {
//!             if let Ok(mut counters) = counters.lock() {
//!                 let _ = counters.with_mut(|n: &mut u32| *n += 1);
//!             }
//!         })
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//!
//! assert_eq!(counters.lock().unwrap().get::<u32>(), Ok(&4));
//! ```

mod container;
mod descriptor;
mod error;
mod predicate;
mod rule;
mod shape;
mod slot;

pub use container::Container;
pub use descriptor::{Descriptor, Element, Member, ShapeOf, TypeInfo, TypeList};
pub use error::ShapeError;
pub use predicate::{is, not, Is, Not, Predicate};
pub use rule::{Rule, RuleTable};
pub use shape::Shape;
pub use slot::Slot;

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
