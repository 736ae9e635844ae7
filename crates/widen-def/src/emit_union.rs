//! Functions to emit the expansion of union definitions, given a parsed
//! [`UnionInput`]: the enums themselves, their tag enums, the widened field
//! accessors, and the `Discriminated` wiring.

use convert_case::{Case, Casing};
use itertools::Itertools;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::{
    definitions::{UnionDef, UnionInput},
    fields::{FieldSlot, collect_field_universe, literal_name, tag_literal},
};

/// The name of the generated tag enum of a union, e.g. `RequestStateStatus`
/// for a union `RequestState` with a `status` discriminator.
fn tag_enum_name(union_def: &UnionDef) -> syn::Ident {
    format_ident!(
        "{}{}",
        union_def.name(),
        literal_name(&union_def.discriminator).to_case(Case::Pascal)
    )
}

/// The name of the generated reference union for a conflicted field, e.g.
/// `PacketSeqRef` for a field `seq` of a union `Packet`.
fn ref_union_name(union_def: &UnionDef, slot: &FieldSlot) -> syn::Ident {
    format_ident!(
        "{}{}Ref",
        union_def.name(),
        literal_name(&slot.name).to_case(Case::Pascal)
    )
}

/// Emit other items given in the [`define_union!`](crate::define_union)
/// macro.
fn emit_other_items(input: &UnionInput) -> TokenStream {
    input.other_items.iter().map(|item| -> TokenStream { quote!(#item) }).collect()
}

/// Emit the tag enum of a union: one fieldless variant per union variant, in
/// declaration order, together with its inherent surface, `Display`, and the
/// `Tag` trait impl.
fn emit_tag_enum(union_def: &UnionDef) -> TokenStream {
    let visibility = union_def.visibility();
    let union_name = union_def.name();
    let tag_name = tag_enum_name(union_def);
    let variant_names = union_def.variants.iter().map(|variant| &variant.name).collect_vec();
    let variant_count = variant_names.len();
    let tag_literals = variant_names.iter().map(|name| tag_literal(name)).collect_vec();

    let as_str_body = if variant_names.is_empty() {
        quote!(match self {})
    } else {
        quote! {
            match self {
                #(#tag_name::#variant_names => #tag_literals),*
            }
        }
    };

    let doc = format!(" The tag of a [`{union_name}`] value: which variant it is.");
    let values_doc = format!(" Every tag of [`{union_name}`], in declaration order.");

    quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #visibility enum #tag_name {
            #(#variant_names),*
        }

        impl #tag_name {
            #[doc = #values_doc]
            #visibility const VALUES: [#tag_name; #variant_count] =
                [#(#tag_name::#variant_names),*];

            #[doc = " The snake-case name of this tag."]
            #visibility fn as_str(self) -> &'static str {
                #as_str_body
            }
        }

        impl ::core::fmt::Display for #tag_name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::widen::Tag for #tag_name {
            const VALUES: &'static [#tag_name] = &#tag_name::VALUES;

            fn as_str(&self) -> &'static str {
                #tag_name::as_str(*self)
            }
        }
    }
}

/// Emit the discriminator accessor of a union, named after the discriminator
/// itself.
fn emit_tag_method(union_def: &UnionDef) -> TokenStream {
    let visibility = union_def.visibility();
    let union_name = union_def.name();
    let tag_name = tag_enum_name(union_def);
    let discriminator = &union_def.discriminator;

    let body = if union_def.variants.is_empty() {
        quote!(match *self {})
    } else {
        let arms = union_def.variants.iter().map(|variant| {
            let name = &variant.name;
            quote!(#union_name::#name { .. } => #tag_name::#name)
        });
        quote!(match self { #(#arms),* })
    };

    let doc = format!(" Which variant this [`{union_name}`] currently is.");
    quote! {
        #[doc = #doc]
        #visibility fn #discriminator(&self) -> #tag_name {
            #body
        }
    }
}

/// Emit the `keys` introspection method of a union: the discriminator name
/// followed by the active variant's own field names, in declaration order.
fn emit_keys_method(union_def: &UnionDef) -> TokenStream {
    let visibility = union_def.visibility();
    let union_name = union_def.name();
    let discriminator_key = literal_name(&union_def.discriminator);

    let body = if union_def.variants.is_empty() {
        quote!(match *self {})
    } else {
        let arms = union_def.variants.iter().map(|variant| {
            let name = &variant.name;
            let keys = std::iter::once(discriminator_key.clone())
                .chain(variant.fields.iter().map(|field| literal_name(&field.name)))
                .collect_vec();
            quote!(#union_name::#name { .. } => &[#(#keys),*])
        });
        quote!(match self { #(#arms),* })
    };

    quote! {
        #[doc = " The names of the fields present on this value, discriminator first."]
        #visibility fn keys(&self) -> &'static [&'static str] {
            #body
        }
    }
}

/// Emit the widened accessor for one field of the union's field universe.
///
/// Variants that declare the field answer `Some`, other variants `None`. When
/// the declaring variants disagree on the field's type, the accessor goes
/// through the per-field reference union instead of a direct reference.
fn emit_field_accessor(union_def: &UnionDef, slot: &FieldSlot) -> TokenStream {
    let visibility = union_def.visibility();
    let union_name = union_def.name();
    let field_name = &slot.name;

    let (return_ty, arms) = match slot.shared_ty() {
        Some(ty) => (
            quote!(Option<&#ty>),
            slot.occurrences
                .iter()
                .map(|occurrence| {
                    let variant_name = &union_def.variants[occurrence.source].name;
                    quote!(#union_name::#variant_name { #field_name, .. } => Some(#field_name))
                })
                .collect_vec(),
        ),
        None => {
            let ref_name = ref_union_name(union_def, slot);
            (
                quote!(Option<#ref_name<'_>>),
                slot.occurrences
                    .iter()
                    .map(|occurrence| {
                        let variant_name = &union_def.variants[occurrence.source].name;
                        quote! {
                            #union_name::#variant_name { #field_name, .. } =>
                                Some(#ref_name::#variant_name(#field_name))
                        }
                    })
                    .collect_vec(),
            )
        }
    };

    // A catch-all arm is only needed when some variant does not declare the
    // field; when all of them do, it would be unreachable.
    let catch_all =
        (!slot.is_universal(union_def.variants.len())).then(|| quote!(_ => None,));

    let doc = format!(
        " The `{}` field of this value, if the current variant declares one.",
        literal_name(field_name)
    );

    quote! {
        #[doc = #doc]
        #visibility fn #field_name(&self) -> #return_ty {
            match self {
                #(#arms,)*
                #catch_all
            }
        }
    }
}

/// Emit the inherent impl of a union: the discriminator accessor, the `keys`
/// listing, and the widened field accessors.
fn emit_union_methods(union_def: &UnionDef, universe: &[FieldSlot]) -> TokenStream {
    let union_name = union_def.name();
    let tag_method = emit_tag_method(union_def);
    let keys_method = emit_keys_method(union_def);
    let accessors =
        universe.iter().map(|slot| emit_field_accessor(union_def, slot)).collect_vec();

    quote! {
        impl #union_name {
            #tag_method

            #keys_method

            #(#accessors)*
        }
    }
}

/// Emit the reference union for one conflicted field: one variant per
/// declaring union variant, holding a reference at that variant's declared
/// type.
fn emit_ref_union(union_def: &UnionDef, slot: &FieldSlot) -> TokenStream {
    let visibility = union_def.visibility();
    let ref_name = ref_union_name(union_def, slot);
    let variants = slot
        .occurrences
        .iter()
        .map(|occurrence| {
            let variant_name = &union_def.variants[occurrence.source].name;
            let ty = &occurrence.field.ty;
            quote!(#variant_name(&'a #ty))
        })
        .collect_vec();

    let doc = format!(
        " A reference to the `{}` field of a [`{}`], at the type the current variant declares it.",
        literal_name(&slot.name),
        union_def.name()
    );

    quote! {
        #[doc = #doc]
        #[derive(Clone, Copy)]
        #visibility enum #ref_name<'a> {
            #(#variants),*
        }
    }
}

/// Emit the reference unions for every conflicted field of a union.
fn emit_ref_unions(union_def: &UnionDef, universe: &[FieldSlot]) -> TokenStream {
    universe
        .iter()
        .filter(|slot| slot.is_conflicted())
        .map(|slot| emit_ref_union(union_def, slot))
        .collect()
}

/// Emit the `Discriminated` impl of a union, delegating to the inherent
/// methods.
fn emit_discriminated_impl(union_def: &UnionDef) -> TokenStream {
    let union_name = union_def.name();
    let tag_name = tag_enum_name(union_def);
    let discriminator = &union_def.discriminator;
    let discriminator_literal = literal_name(discriminator);

    quote! {
        impl ::widen::Discriminated for #union_name {
            type Tag = #tag_name;

            const DISCRIMINATOR: &'static str = #discriminator_literal;

            fn tag(&self) -> #tag_name {
                #union_name::#discriminator(self)
            }

            fn keys(&self) -> &'static [&'static str] {
                #union_name::keys(self)
            }
        }
    }
}

/// Emit the full expansion of a single union definition.
fn emit_union(union_def: &UnionDef) -> TokenStream {
    let universe = collect_field_universe(
        union_def.variants.iter().map(|variant| variant.fields.as_slice()),
    );
    let item = &union_def.item;

    [
        quote!(#item),
        emit_tag_enum(union_def),
        emit_ref_unions(union_def, &universe),
        emit_union_methods(union_def, &universe),
        emit_discriminated_impl(union_def),
    ]
    .into_iter()
    .collect()
}

/// Emit the expansion of a whole [`define_union!`](crate::define_union)
/// invocation.
pub(crate) fn emit_unions(input: &UnionInput) -> TokenStream {
    [emit_other_items(input), input.unions.iter().map(emit_union).collect()]
        .into_iter()
        .collect()
}
