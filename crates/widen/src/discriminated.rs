//! The traits implemented by the types that
//! [`define_union!`](crate::define_union) emits: the seam through which
//! generated unions can be consumed generically.

use std::{fmt, hash::Hash};

/// A discriminator tag: the fieldless enum generated alongside a union,
/// enumerating its variants.
///
/// Implemented by the generated tag enums; not intended to be implemented by
/// hand.
pub trait Tag: Copy + Eq + Hash + fmt::Debug + fmt::Display + Sized + 'static {
    /// Every tag value, in the union's declaration order.
    const VALUES: &'static [Self];

    /// The snake-case name of this tag.
    fn as_str(&self) -> &'static str;
}

/// A tagged union: a type whose discriminator identifies the active variant,
/// with key introspection over the variant's fields.
pub trait Discriminated {
    /// The tag enum of this union.
    type Tag: Tag;

    /// The name of the discriminator, as given to `#[tag(..)]`.
    const DISCRIMINATOR: &'static str;

    /// Which variant this value currently is.
    fn tag(&self) -> Self::Tag;

    /// The names of the fields present on this value, discriminator first.
    fn keys(&self) -> &'static [&'static str];
}
