//! Tagged unions with a widened field surface, and pairwise merging of two
//! struct shapes, both generated by macros.
//!
//! # Unions
//!
//! [`define_union!`] takes enums annotated with `#[tag(<discriminator>)]` and
//! emits, next to each enum, a fieldless tag enum, an accessor named after
//! the discriminator, a `keys` listing, and one widened accessor per field
//! name appearing in any variant. Before narrowing, every cross-variant field
//! is readable as an `Option`:
//!
//! ```
//! use widen::define_union;
//!
//! define_union! {
//!     #[tag(status)]
//!     pub enum RequestState {
//!         Loading { progress: u32 },
//!         Success { data: String },
//!         Error { error: String },
//!     }
//! }
//!
//! let state = RequestState::Loading { progress: 40 };
//! assert_eq!(state.status(), RequestStateStatus::Loading);
//! assert_eq!(state.progress(), Some(&40));
//! assert_eq!(state.data(), None);
//! assert_eq!(state.keys(), ["status", "progress"]);
//! assert_eq!(RequestStateStatus::Error.to_string(), "error");
//! ```
//!
//! Narrowing is ordinary pattern matching: inside a `match` arm, the
//! variant's own fields are available at full type, with no `Option` in
//! sight.
//!
//! Every generated union implements [`Discriminated`] and its tag enum
//! implements [`Tag`], so code can be generic over any of them:
//!
//! ```
//! use widen::{Discriminated, Tag, define_union};
//!
//! define_union! {
//!     #[tag(kind)]
//!     enum Signal {
//!         Start,
//!         Stop { reason: String },
//!     }
//! }
//!
//! fn describe<D: Discriminated>(value: &D) -> String {
//!     format!("{} = {}", D::DISCRIMINATOR, value.tag().as_str())
//! }
//!
//! assert_eq!(describe(&Signal::Start), "kind = start");
//! assert_eq!(SignalKind::VALUES.len(), 2);
//! ```
//!
//! # Merging shapes
//!
//! [`merge_shapes!`] combines two struct shapes into one: fields declared by
//! both shapes keep their common type (or become a per-field union enum when
//! the declarations disagree), fields declared by one shape only become
//! `Option`s, and `From` impls embed either shape losslessly:
//!
//! ```
//! use widen::merge_shapes;
//!
//! merge_shapes! {
//!     #[merged]
//!     #[derive(Debug, PartialEq)]
//!     pub struct TaskState;
//!
//!     #[shape]
//!     #[derive(Debug, PartialEq)]
//!     pub struct IdleState {
//!         pub status: String,
//!     }
//!
//!     #[shape]
//!     #[derive(Debug, PartialEq)]
//!     pub struct ProcessingState {
//!         pub status: String,
//!         pub progress: u32,
//!     }
//! }
//!
//! let task = TaskState::from(IdleState { status: "idle".to_owned() });
//! assert_eq!(task.status, "idle");
//! assert_eq!(task.progress, None);
//! ```

pub mod discriminated;

pub use discriminated::{Discriminated, Tag};
pub use widen_def::{define_union, merge_shapes};
