//! Utilities for parsing the structures defined in [`super::definitions`] using
//! the [`syn`] crate.

use syn::{
    Attribute, Field, Item, ItemEnum, ItemStruct, Variant, parse::Parse, spanned::Spanned,
};

use super::definitions::{
    FieldDef, MERGED_ATTR_NAME, MergeInput, MergedDef, SHAPE_ATTR_NAME, ShapeDef, TAG_ATTR_NAME,
    UnionDef, UnionInput, VariantDef,
};

/// Ensure that the given generics are empty, by returning an error otherwise.
///
/// Generics are not allowed in union and shape definitions due to the
/// complexity of generating field accessors and merged shapes for them.
fn ensure_generics_empty(generics: &syn::Generics) -> Result<(), syn::Error> {
    if generics.const_params().next().is_some()
        || generics.type_params().next().is_some()
        || generics.lifetimes().next().is_some()
    {
        Err(syn::Error::new(
            generics.span(),
            "Generics and lifetimes are not supported in union and shape definitions",
        ))
    } else {
        Ok(())
    }
}

/// Whether the given attribute list contains a marker attribute with the given
/// name.
fn has_marker(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Ensure that every marker attribute with the given name in the list is bare,
/// i.e. written without arguments.
fn ensure_marker_bare(attrs: &[Attribute], name: &str) -> Result<(), syn::Error> {
    for attr in attrs {
        if attr.path().is_ident(name) {
            attr.meta.require_path_only().map_err(|_| {
                syn::Error::new(attr.span(), format!("`#[{name}]` does not take any arguments"))
            })?;
        }
    }
    Ok(())
}

/// Remove every marker attribute with the given name from the item's
/// attribute list, so that the item can be re-emitted as plain Rust.
fn strip_marker(attrs: &mut Vec<Attribute>, name: &str) {
    attrs.retain(|attr| !attr.path().is_ident(name));
}

impl TryFrom<&Field> for FieldDef {
    type Error = syn::Error;
    fn try_from(value: &Field) -> Result<Self, Self::Error> {
        match &value.ident {
            Some(ident) => Ok(FieldDef {
                attrs: value.attrs.clone(),
                visibility: value.vis.clone(),
                name: ident.clone(),
                ty: value.ty.clone(),
            }),
            None => Err(syn::Error::new(value.span(), "Fields must be named")),
        }
    }
}

impl TryFrom<&Variant> for VariantDef {
    type Error = syn::Error;
    fn try_from(value: &Variant) -> Result<Self, Self::Error> {
        let fields = match &value.fields {
            syn::Fields::Named(fields) => fields
                .named
                .iter()
                .map(FieldDef::try_from)
                .collect::<Result<_, _>>()?,
            syn::Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    value.span(),
                    "Tuple variants are not supported in union definitions; use named fields",
                ));
            }
            syn::Fields::Unit => Vec::new(),
        };
        Ok(VariantDef { name: value.ident.clone(), fields })
    }
}

impl TryFrom<&ItemEnum> for UnionDef {
    type Error = syn::Error;
    fn try_from(value: &ItemEnum) -> Result<Self, Self::Error> {
        ensure_generics_empty(&value.generics)?;

        // Extract the discriminator name from the `#[tag(...)]` attribute,
        // rejecting repeated attributes since each union has a single
        // discriminator.
        let mut discriminator: Option<syn::Ident> = None;
        for attr in &value.attrs {
            if attr.path().is_ident(TAG_ATTR_NAME) {
                if discriminator.is_some() {
                    return Err(syn::Error::new(
                        attr.span(),
                        format!("Duplicate `#[{TAG_ATTR_NAME}(...)]` attribute"),
                    ));
                }
                discriminator = Some(attr.parse_args::<syn::Ident>().map_err(|_| {
                    syn::Error::new(
                        attr.span(),
                        format!(
                            "Expected a single discriminator name, as in `#[{TAG_ATTR_NAME}(kind)]`"
                        ),
                    )
                })?);
            }
        }
        let discriminator = discriminator.ok_or_else(|| {
            syn::Error::new(
                value.span(),
                format!("Expected a `#[{TAG_ATTR_NAME}(...)]` attribute"),
            )
        })?;

        let mut item = value.clone();
        strip_marker(&mut item.attrs, TAG_ATTR_NAME);

        Ok(UnionDef {
            item,
            discriminator,
            variants: value.variants.iter().map(VariantDef::try_from).collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<&ItemStruct> for ShapeDef {
    type Error = syn::Error;
    fn try_from(value: &ItemStruct) -> Result<Self, Self::Error> {
        ensure_generics_empty(&value.generics)?;
        ensure_marker_bare(&value.attrs, SHAPE_ATTR_NAME)?;

        let fields = match &value.fields {
            syn::Fields::Named(fields) => fields
                .named
                .iter()
                .map(FieldDef::try_from)
                .collect::<Result<_, _>>()?,
            syn::Fields::Unnamed(_) => {
                return Err(syn::Error::new(
                    value.fields.span(),
                    "Tuple structs are not supported as shapes; use named fields",
                ));
            }
            // A unit struct is an empty shape.
            syn::Fields::Unit => Vec::new(),
        };

        let mut item = value.clone();
        strip_marker(&mut item.attrs, SHAPE_ATTR_NAME);

        Ok(ShapeDef { item, fields })
    }
}

impl TryFrom<&ItemStruct> for MergedDef {
    type Error = syn::Error;
    fn try_from(value: &ItemStruct) -> Result<Self, Self::Error> {
        ensure_generics_empty(&value.generics)?;
        ensure_marker_bare(&value.attrs, MERGED_ATTR_NAME)?;

        match &value.fields {
            syn::Fields::Unit => {}
            _ => {
                return Err(syn::Error::new(
                    value.fields.span(),
                    format!(
                        "The `#[{MERGED_ATTR_NAME}]` struct must be a unit struct; its fields are produced by the macro"
                    ),
                ));
            }
        }

        let mut attrs = value.attrs.clone();
        strip_marker(&mut attrs, MERGED_ATTR_NAME);

        Ok(MergedDef { visibility: value.vis.clone(), attrs, name: value.ident.clone() })
    }
}

/// Helper type so that we can implement [`TryFrom<&Item>`] for optional
/// [`UnionDef`].
#[derive(Clone, Debug, PartialEq, Eq)]
struct MaybeUnionDef(Option<UnionDef>);

impl TryFrom<&Item> for MaybeUnionDef {
    type Error = syn::Error;
    fn try_from(value: &Item) -> Result<Self, Self::Error> {
        match value {
            Item::Enum(enum_item) if has_marker(&enum_item.attrs, TAG_ATTR_NAME) => {
                Ok(MaybeUnionDef(Some(UnionDef::try_from(enum_item)?)))
            }
            Item::Struct(struct_item) if has_marker(&struct_item.attrs, TAG_ATTR_NAME) => {
                Err(syn::Error::new(
                    value.span(),
                    format!("`#[{TAG_ATTR_NAME}(...)]` is only supported on enum definitions"),
                ))
            }
            _ => Ok(MaybeUnionDef(None)),
        }
    }
}

/// Classification of a single item inside a `merge_shapes!` invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
enum MaybeMergeItem {
    Merged(MergedDef),
    Shape(ShapeDef),
    Other,
}

impl TryFrom<&Item> for MaybeMergeItem {
    type Error = syn::Error;
    fn try_from(value: &Item) -> Result<Self, Self::Error> {
        match value {
            Item::Struct(struct_item) => {
                let is_merged = has_marker(&struct_item.attrs, MERGED_ATTR_NAME);
                let is_shape = has_marker(&struct_item.attrs, SHAPE_ATTR_NAME);
                match (is_merged, is_shape) {
                    (true, true) => Err(syn::Error::new(
                        value.span(),
                        format!(
                            "A struct cannot be marked with both `#[{MERGED_ATTR_NAME}]` and `#[{SHAPE_ATTR_NAME}]`"
                        ),
                    )),
                    (true, false) => Ok(MaybeMergeItem::Merged(MergedDef::try_from(struct_item)?)),
                    (false, true) => Ok(MaybeMergeItem::Shape(ShapeDef::try_from(struct_item)?)),
                    (false, false) => Ok(MaybeMergeItem::Other),
                }
            }
            Item::Enum(enum_item)
                if has_marker(&enum_item.attrs, MERGED_ATTR_NAME)
                    || has_marker(&enum_item.attrs, SHAPE_ATTR_NAME) =>
            {
                Err(syn::Error::new(
                    value.span(),
                    format!(
                        "`#[{MERGED_ATTR_NAME}]` and `#[{SHAPE_ATTR_NAME}]` are only supported on struct definitions"
                    ),
                ))
            }
            _ => Ok(MaybeMergeItem::Other),
        }
    }
}

impl Parse for UnionInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut unions = Vec::new();
        let mut other_items = Vec::new();

        // Parse a list of items, and filter out the ones which are union
        // definitions into their own data structure. Declaration order is kept
        // so that the output is deterministic.
        while !input.is_empty() {
            let item: Item = input.parse()?;
            if let MaybeUnionDef(Some(union_def)) = MaybeUnionDef::try_from(&item)? {
                unions.push(union_def);
            } else {
                other_items.push(item);
            }
        }

        Ok(UnionInput { unions, other_items })
    }
}

impl Parse for MergeInput {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        let mut merged = Vec::new();
        let mut shapes = Vec::new();
        let mut other_items = Vec::new();

        while !input.is_empty() {
            let item: Item = input.parse()?;
            match MaybeMergeItem::try_from(&item)? {
                MaybeMergeItem::Merged(def) => merged.push(def),
                MaybeMergeItem::Shape(def) => shapes.push(def),
                MaybeMergeItem::Other => other_items.push(item),
            }
        }

        Ok(MergeInput { merged, shapes, other_items })
    }
}
