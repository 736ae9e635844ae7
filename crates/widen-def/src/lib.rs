//! This crate defines the macros [`define_union!`] and [`merge_shapes!`]
//! behind the `widen` crate. The macros turn annotated item definitions into
//! tagged unions with a widened field-access surface, and into pairwise
//! merges of two struct shapes.
//!
//! This crate is an implementation detail; the generated code refers to the
//! `widen` crate by absolute path, so the macros must be used through it.

mod definitions;
mod emit_merge;
mod emit_union;
mod fields;
mod parse;
mod validate;

use emit_merge::emit_merge;
use emit_union::emit_unions;
use syn::parse_macro_input;
use validate::{validate_merge_input, validate_union_input};

use self::definitions::{MergeInput, UnionInput};

/// Helper to return a syn error as a compiler error if one of the stages fails.
macro_rules! try_syn_err {
    ($x:expr) => {
        match $x {
            Ok(value) => value,
            Err(error) => return error.to_compile_error().into(),
        }
    };
}

/// Define one or more tagged unions with a widened field surface.
///
/// Every enum annotated `#[tag(<discriminator>)]` is emitted as written
/// (marker stripped), together with:
///
/// - a fieldless *tag enum* named after the union and the discriminator
///   (`RequestState` with `#[tag(status)]` gives `RequestStateStatus`), with
///   one variant per union variant in declaration order, a `VALUES` constant,
///   an `as_str` method yielding the snake-case tag literal, and a `Display`
///   impl;
/// - an accessor named after the discriminator, returning the tag enum;
/// - a `keys` method listing the field names present on the current variant,
///   discriminator first;
/// - one widened accessor per field name appearing in *any* variant: `Some`
///   of a reference on the variants declaring the field, `None` on the rest.
///   When declaring variants disagree on the field's type, the accessor
///   returns a generated per-field *reference union* enum holding the
///   reference at whichever type the current variant declares;
/// - impls of `widen::Discriminated` for the union and `widen::Tag` for the
///   tag enum.
///
/// Variants must have named fields or be unit, and the enum must not be
/// generic. Variant names must stay distinct after the snake-case rendering
/// (`FooBar` and `FOOBar` would share a tag literal). Items without the
/// marker attribute are passed through unchanged.
///
/// # Examples
///
/// ```ignore
/// define_union! {
///     #[tag(status)]
///     pub enum RequestState {
///         Loading { progress: u32 },
///         Success { data: String },
///         Error { error: String },
///     }
/// }
///
/// let state = RequestState::Loading { progress: 7 };
/// assert_eq!(state.status(), RequestStateStatus::Loading);
/// assert_eq!(state.progress(), Some(&7));
/// assert_eq!(state.data(), None);
/// assert_eq!(state.keys(), ["status", "progress"]);
/// ```
#[proc_macro]
pub fn define_union(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let def = parse_macro_input!(input as UnionInput);
    try_syn_err!(validate_union_input(&def));
    proc_macro::TokenStream::from(emit_unions(&def))
}

/// Merge two struct shapes into one.
///
/// The invocation must contain exactly one unit struct annotated `#[merged]`
/// (the declaration of the merged struct) and exactly two structs annotated
/// `#[shape]`. Both shapes are emitted as written (markers stripped),
/// followed by:
///
/// - the merged struct, carrying the attributes written on the `#[merged]`
///   declaration, with one field per field name of either shape, in first
///   appearance order. A field declared by both shapes at one type keeps that
///   type; declared by both at differing types, it becomes a generated
///   per-field union enum with one variant per shape; declared by one shape
///   only, it is wrapped in `Option` (unless it already is an `Option`);
/// - `From<A>` and `From<B>` impls converting either shape losslessly into
///   the merged struct, filling the other shape's exclusive fields with
///   `None`.
///
/// # Examples
///
/// ```ignore
/// merge_shapes! {
///     #[merged]
///     #[derive(Debug, PartialEq)]
///     pub struct TaskState;
///
///     #[shape]
///     #[derive(Debug, PartialEq)]
///     pub struct IdleState {
///         pub status: String,
///     }
///
///     #[shape]
///     #[derive(Debug, PartialEq)]
///     pub struct ProcessingState {
///         pub status: String,
///         pub progress: u32,
///     }
/// }
///
/// let task = TaskState::from(IdleState { status: "idle".to_owned() });
/// assert_eq!(task.progress, None);
/// ```
#[proc_macro]
pub fn merge_shapes(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let def = parse_macro_input!(input as MergeInput);
    try_syn_err!(validate_merge_input(&def));
    proc_macro::TokenStream::from(emit_merge(&def))
}
