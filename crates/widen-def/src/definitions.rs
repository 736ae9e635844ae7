//! Data types for storing the parsed input given to the
//! [`define_union!`](crate::define_union) and
//! [`merge_shapes!`](crate::merge_shapes) macros.

/// Marker attribute that selects an enum inside `define_union!` for
/// processing; its argument names the discriminator.
pub(crate) const TAG_ATTR_NAME: &str = "tag";

/// Marker attribute that selects a source shape inside `merge_shapes!`.
pub(crate) const SHAPE_ATTR_NAME: &str = "shape";

/// Marker attribute on the unit struct whose body `merge_shapes!` produces.
pub(crate) const MERGED_ATTR_NAME: &str = "merged";

/// Name of the generated introspection method on unions; variant fields must
/// not collide with it.
pub(crate) const KEYS_METHOD_NAME: &str = "keys";

/// A single named field of a variant or shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldDef {
    pub(crate) attrs: Vec<syn::Attribute>,
    pub(crate) visibility: syn::Visibility,
    pub(crate) name: syn::Ident,
    pub(crate) ty: syn::Type,
}

/// One variant of a union definition: a tag together with its field shape.
///
/// Unit variants carry an empty field list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VariantDef {
    pub(crate) name: syn::Ident,
    pub(crate) fields: Vec<FieldDef>,
}

/// A union definition: the annotated enum (with the marker attribute already
/// stripped, ready for re-emission) and the analyzed view of its variants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UnionDef {
    pub(crate) item: syn::ItemEnum,
    pub(crate) discriminator: syn::Ident,
    pub(crate) variants: Vec<VariantDef>,
}

impl UnionDef {
    /// Get the name of the union.
    pub(crate) fn name(&self) -> &syn::Ident {
        &self.item.ident
    }

    /// The visibility of the union, shared by everything emitted for it.
    pub(crate) fn visibility(&self) -> &syn::Visibility {
        &self.item.vis
    }
}

/// Everything inside one `define_union!` invocation: the union definitions,
/// as well as other items that are passed through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UnionInput {
    pub(crate) unions: Vec<UnionDef>,
    pub(crate) other_items: Vec<syn::Item>,
}

/// A source shape of a merge: the annotated struct (marker stripped) plus the
/// analyzed field list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ShapeDef {
    pub(crate) item: syn::ItemStruct,
    pub(crate) fields: Vec<FieldDef>,
}

impl ShapeDef {
    /// Get the name of the shape.
    pub(crate) fn name(&self) -> &syn::Ident {
        &self.item.ident
    }
}

/// The `#[merged]` declaration: a unit struct whose body the macro produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MergedDef {
    pub(crate) visibility: syn::Visibility,
    pub(crate) attrs: Vec<syn::Attribute>,
    pub(crate) name: syn::Ident,
}

/// Everything inside one `merge_shapes!` invocation.
///
/// Arity of `merged` (exactly one) and `shapes` (exactly two) is checked by
/// [`validate`](crate::validate), not here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MergeInput {
    pub(crate) merged: Vec<MergedDef>,
    pub(crate) shapes: Vec<ShapeDef>,
    pub(crate) other_items: Vec<syn::Item>,
}
