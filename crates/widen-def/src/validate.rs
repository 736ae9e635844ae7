//! Validation of parsed [`UnionInput`]s and [`MergeInput`]s before emitting.
//!
//! Anything that would lead to nonsensical or colliding generated items is
//! rejected here with a spanned error, rather than letting the compiler
//! produce cryptic errors about the expansion.

use std::collections::{HashMap, HashSet};

use proc_macro2::Span;

use crate::{
    definitions::{
        KEYS_METHOD_NAME, MERGED_ATTR_NAME, MergeInput, SHAPE_ATTR_NAME, ShapeDef, TAG_ATTR_NAME,
        UnionDef, UnionInput, VariantDef,
    },
    fields::{literal_name, tag_literal},
};

pub(crate) fn validate_union_input(input: &UnionInput) -> Result<(), syn::Error> {
    if input.unions.is_empty() {
        return Err(syn::Error::new(
            Span::call_site(),
            format!("Expected at least one enum marked with `#[{TAG_ATTR_NAME}(...)]`"),
        ));
    }
    for union_def in &input.unions {
        validate_union(union_def)?;
    }
    Ok(())
}

fn validate_union(union_def: &UnionDef) -> Result<(), syn::Error> {
    if literal_name(&union_def.discriminator) == KEYS_METHOD_NAME {
        return Err(syn::Error::new(
            union_def.discriminator.span(),
            format!(
                "The discriminator cannot be named `{KEYS_METHOD_NAME}`; this name is used by the generated key listing"
            ),
        ));
    }

    let mut seen_variants = HashSet::new();
    let mut seen_literals: HashMap<String, &syn::Ident> = HashMap::new();
    for variant in &union_def.variants {
        if !seen_variants.insert(literal_name(&variant.name)) {
            return Err(syn::Error::new(
                variant.name.span(),
                format!(
                    "Duplicate variant name `{}` in union `{}`",
                    variant.name,
                    union_def.name()
                ),
            ));
        }
        // Distinct variant names can still render to the same snake-case
        // literal, which would leave `as_str` unable to tell the tags apart.
        if let Some(previous) = seen_literals.insert(tag_literal(&variant.name), &variant.name) {
            return Err(syn::Error::new(
                variant.name.span(),
                format!(
                    "Variants `{previous}` and `{}` of union `{}` render to the same tag literal `{}`",
                    variant.name,
                    union_def.name(),
                    tag_literal(&variant.name)
                ),
            ));
        }
        validate_variant(union_def, variant)?;
    }
    Ok(())
}

fn validate_variant(union_def: &UnionDef, variant: &VariantDef) -> Result<(), syn::Error> {
    let mut seen_fields = HashSet::new();
    for field in &variant.fields {
        // Raw and plain spellings of one identifier name the same field, so
        // every check here compares the unraw'd form.
        let field_literal = literal_name(&field.name);
        if !seen_fields.insert(field_literal.clone()) {
            return Err(syn::Error::new(
                field.name.span(),
                format!("Duplicate field name `{}` in variant `{}`", field.name, variant.name),
            ));
        }
        // The discriminator is reported as a key of every variant, and its
        // accessor is named after it, so a field cannot share its name.
        if field_literal == literal_name(&union_def.discriminator) {
            return Err(syn::Error::new(
                field.name.span(),
                format!(
                    "Field `{}` in variant `{}` collides with the union discriminator",
                    field.name, variant.name
                ),
            ));
        }
        if field_literal == KEYS_METHOD_NAME {
            return Err(syn::Error::new(
                field.name.span(),
                format!(
                    "Field name `{KEYS_METHOD_NAME}` is reserved for the generated key listing"
                ),
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_merge_input(input: &MergeInput) -> Result<(), syn::Error> {
    let merged = match input.merged.as_slice() {
        [] => {
            return Err(syn::Error::new(
                Span::call_site(),
                format!("Expected a struct marked with `#[{MERGED_ATTR_NAME}]`"),
            ));
        }
        [merged] => merged,
        [_, second, ..] => {
            return Err(syn::Error::new(
                second.name.span(),
                format!("Only one `#[{MERGED_ATTR_NAME}]` struct is allowed"),
            ));
        }
    };

    if input.shapes.len() != 2 {
        return Err(syn::Error::new(
            Span::call_site(),
            format!(
                "Expected exactly two structs marked with `#[{SHAPE_ATTR_NAME}]`, found {}",
                input.shapes.len()
            ),
        ));
    }

    for shape in &input.shapes {
        validate_shape(shape)?;
    }

    // The merged struct and the shapes all become items in the expansion, and
    // shape names become variant names of merged field unions.
    let mut seen_names = HashSet::new();
    for name in
        std::iter::once(&merged.name).chain(input.shapes.iter().map(|shape| shape.name()))
    {
        if !seen_names.insert(literal_name(name)) {
            return Err(syn::Error::new(
                name.span(),
                format!(
                    "Duplicate name `{name}`; the merged struct and the shapes must have distinct names"
                ),
            ));
        }
    }

    Ok(())
}

fn validate_shape(shape: &ShapeDef) -> Result<(), syn::Error> {
    let mut seen_fields = HashSet::new();
    for field in &shape.fields {
        if !seen_fields.insert(literal_name(&field.name)) {
            return Err(syn::Error::new(
                field.name.span(),
                format!("Duplicate field name `{}` in shape `{}`", field.name, shape.name()),
            ));
        }
    }
    Ok(())
}
