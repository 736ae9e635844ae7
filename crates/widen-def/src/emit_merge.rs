//! Functions to emit the expansion of a shape merge, given a parsed
//! [`MergeInput`]: both source structs, the merged struct, the per-field
//! union enums for overlapping fields of differing type, and the `From`
//! conversions into the merged struct.

use convert_case::{Case, Casing};
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::{
    definitions::{FieldDef, MergeInput, MergedDef, ShapeDef},
    fields::{FieldSlot, collect_field_universe, is_option, literal_name},
};

/// How one field of the merged struct relates to the two source shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
enum MergedFieldKind {
    /// Declared by both shapes with one agreed type: carried over as is.
    Shared,
    /// Declared by both shapes with differing types: held by the per-field
    /// union enum.
    Conflicted { union_name: syn::Ident },
    /// Declared by one shape only, possibly already optional there.
    Exclusive { source: usize, already_optional: bool },
}

/// One field of the merged struct: the underlying universe slot plus how it
/// is populated.
struct MergedField<'a> {
    slot: &'a FieldSlot,
    kind: MergedFieldKind,
}

impl MergedField<'_> {
    /// The declaration this field carries its attributes and visibility from:
    /// its first appearance over the two shapes.
    fn source_field(&self) -> &FieldDef {
        &self.slot.occurrences[0].field
    }

    /// The type the field has on the merged struct.
    fn merged_ty(&self) -> TokenStream {
        let ty = &self.source_field().ty;
        match &self.kind {
            MergedFieldKind::Shared => quote!(#ty),
            MergedFieldKind::Conflicted { union_name } => quote!(#union_name),
            MergedFieldKind::Exclusive { already_optional: true, .. } => quote!(#ty),
            MergedFieldKind::Exclusive { already_optional: false, .. } => quote!(Option<#ty>),
        }
    }
}

/// The name of the union enum emitted for a conflicted field, e.g.
/// `TaskStateProgress` for a field `progress` of a merged struct `TaskState`.
fn union_enum_name(merged: &MergedDef, slot: &FieldSlot) -> syn::Ident {
    format_ident!("{}{}", merged.name, literal_name(&slot.name).to_case(Case::Pascal))
}

/// Work out how every field of the merged struct is populated, in first
/// appearance order over the two shapes.
fn plan_merged_fields<'a>(merged: &MergedDef, universe: &'a [FieldSlot]) -> Vec<MergedField<'a>> {
    universe
        .iter()
        .map(|slot| {
            let kind = if slot.is_universal(2) {
                if slot.is_conflicted() {
                    MergedFieldKind::Conflicted { union_name: union_enum_name(merged, slot) }
                } else {
                    MergedFieldKind::Shared
                }
            } else {
                let occurrence = &slot.occurrences[0];
                MergedFieldKind::Exclusive {
                    source: occurrence.source,
                    already_optional: is_option(&occurrence.field.ty),
                }
            };
            MergedField { slot, kind }
        })
        .collect_vec()
}

/// Emit other items given in the [`merge_shapes!`](crate::merge_shapes)
/// macro.
fn emit_other_items(input: &MergeInput) -> TokenStream {
    input.other_items.iter().map(|item| -> TokenStream { quote!(#item) }).collect()
}

/// Emit the source shapes themselves, markers already stripped.
fn emit_shape_items(input: &MergeInput) -> TokenStream {
    input
        .shapes
        .iter()
        .map(|shape| -> TokenStream {
            let item = &shape.item;
            quote!(#item)
        })
        .collect()
}

/// Emit the union enum for one conflicted field: one variant per source
/// shape, named after it, holding that shape's declared type.
///
/// The enum receives the `#[derive(..)]` attributes of the merged
/// declaration, so that the merged struct's own derives stay satisfiable.
fn emit_union_enum(
    merged: &MergedDef,
    shapes: &[ShapeDef],
    slot: &FieldSlot,
) -> TokenStream {
    let visibility = &merged.visibility;
    let union_name = union_enum_name(merged, slot);
    let derives =
        merged.attrs.iter().filter(|attr| attr.path().is_ident("derive")).collect_vec();
    let variants = slot
        .occurrences
        .iter()
        .map(|occurrence| {
            let shape_name = shapes[occurrence.source].name();
            let ty = &occurrence.field.ty;
            quote!(#shape_name(#ty))
        })
        .collect_vec();

    let doc = format!(
        " The `{}` field of a [`{}`], at whichever type its source shape declares.",
        literal_name(&slot.name),
        merged.name
    );

    quote! {
        #[doc = #doc]
        #(#derives)*
        #visibility enum #union_name {
            #(#variants),*
        }
    }
}

/// Emit the union enums for every conflicted field of the merge.
fn emit_union_enums(
    merged: &MergedDef,
    shapes: &[ShapeDef],
    universe: &[FieldSlot],
) -> TokenStream {
    universe
        .iter()
        .filter(|slot| slot.is_universal(2) && slot.is_conflicted())
        .map(|slot| emit_union_enum(merged, shapes, slot))
        .collect()
}

/// Emit the merged struct itself, fields in first appearance order, carrying
/// the attributes written on the merged declaration.
fn emit_merged_struct(merged: &MergedDef, fields: &[MergedField<'_>]) -> TokenStream {
    let attrs = &merged.attrs;
    let visibility = &merged.visibility;
    let name = &merged.name;
    let rendered_fields = fields
        .iter()
        .map(|field| {
            let FieldDef { attrs, visibility, name, .. } = field.source_field();
            let ty = field.merged_ty();
            quote! {
                #(#attrs)*
                #visibility #name: #ty
            }
        })
        .collect_vec();

    quote! {
        #(#attrs)*
        #visibility struct #name {
            #(#rendered_fields),*
        }
    }
}

/// Emit the `From` conversion of one source shape into the merged struct:
/// shared fields move over (wrapped into the union enum when conflicted), own
/// exclusive fields become `Some`, the other shape's exclusive fields `None`.
fn emit_from_impl(
    merged: &MergedDef,
    shapes: &[ShapeDef],
    fields: &[MergedField<'_>],
    source: usize,
) -> TokenStream {
    let merged_name = &merged.name;
    let shape_name = shapes[source].name();
    let value = if shapes[source].fields.is_empty() {
        format_ident!("_value")
    } else {
        format_ident!("value")
    };

    let inits = fields
        .iter()
        .map(|field| {
            let field_name = &field.slot.name;
            let init = match &field.kind {
                MergedFieldKind::Shared => quote!(#value.#field_name),
                MergedFieldKind::Conflicted { union_name } => {
                    quote!(#union_name::#shape_name(#value.#field_name))
                }
                MergedFieldKind::Exclusive { source: declaring, already_optional } => {
                    if *declaring == source {
                        if *already_optional {
                            quote!(#value.#field_name)
                        } else {
                            quote!(Some(#value.#field_name))
                        }
                    } else {
                        quote!(None)
                    }
                }
            };
            quote!(#field_name: #init)
        })
        .collect_vec();

    quote! {
        impl ::core::convert::From<#shape_name> for #merged_name {
            fn from(#value: #shape_name) -> #merged_name {
                #merged_name {
                    #(#inits),*
                }
            }
        }
    }
}

/// Emit the expansion of a whole [`merge_shapes!`](crate::merge_shapes)
/// invocation. Expects input already validated to one merged declaration and
/// two shapes.
pub(crate) fn emit_merge(input: &MergeInput) -> TokenStream {
    let merged = &input.merged[0];
    let shapes = input.shapes.as_slice();
    let universe =
        collect_field_universe(shapes.iter().map(|shape| shape.fields.as_slice()));
    let fields = plan_merged_fields(merged, &universe);

    [
        emit_other_items(input),
        emit_shape_items(input),
        emit_union_enums(merged, shapes, &universe),
        emit_merged_struct(merged, &fields),
        emit_from_impl(merged, shapes, &fields, 0),
        emit_from_impl(merged, shapes, &fields, 1),
    ]
    .into_iter()
    .collect()
}
