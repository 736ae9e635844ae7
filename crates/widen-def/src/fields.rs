//! Analysis of field occurrences across a set of field lists, i.e. the
//! variants of a union or the shapes of a merge.
//!
//! The result is the universe of field names in first-appearance order, with
//! every occurrence of each name recorded alongside its declared type. This is
//! what accessor generation and shape merging are driven by.

use convert_case::{Case, Casing};
use indexmap::IndexMap;
use syn::ext::IdentExt;

use crate::definitions::FieldDef;

/// A single occurrence of a field name: the index of the field list it
/// appeared in, and the declaration it had there.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldOccurrence {
    pub(crate) source: usize,
    pub(crate) field: FieldDef,
}

/// All occurrences of one field name across a set of field lists.
///
/// Slots are only ever constructed with at least one occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldSlot {
    pub(crate) name: syn::Ident,
    pub(crate) occurrences: Vec<FieldOccurrence>,
}

impl FieldSlot {
    /// Whether the field appears in every one of `source_count` field lists.
    pub(crate) fn is_universal(&self, source_count: usize) -> bool {
        self.occurrences.len() == source_count
    }

    /// The single declared type of this field, if all of its occurrences agree
    /// token-for-token. `None` means the declarations conflict.
    pub(crate) fn shared_ty(&self) -> Option<&syn::Type> {
        let (first, rest) = self.occurrences.split_first()?;
        rest.iter()
            .all(|occurrence| occurrence.field.ty == first.field.ty)
            .then_some(&first.field.ty)
    }

    /// Whether the occurrences of this field disagree about its type.
    pub(crate) fn is_conflicted(&self) -> bool {
        self.shared_ty().is_none()
    }
}

/// Collect the universe of field names across the given field lists, in first
/// appearance order.
///
/// Names are compared by their unraw'd spelling: `r#site` and `site` are the
/// same identifier to the compiler, so they land in the same slot.
pub(crate) fn collect_field_universe<'a>(
    field_lists: impl IntoIterator<Item = &'a [FieldDef]>,
) -> Vec<FieldSlot> {
    let mut slots: IndexMap<String, FieldSlot> = IndexMap::new();
    for (source, fields) in field_lists.into_iter().enumerate() {
        for field in fields {
            slots
                .entry(literal_name(&field.name))
                .or_insert_with(|| FieldSlot { name: field.name.clone(), occurrences: Vec::new() })
                .occurrences
                .push(FieldOccurrence { source, field: field.clone() });
        }
    }
    slots.into_values().collect()
}

/// The string form of an identifier, without any raw `r#` prefix, for use in
/// emitted string literals.
pub(crate) fn literal_name(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

/// The tag literal of a variant: the snake-case rendering of its name.
pub(crate) fn tag_literal(name: &syn::Ident) -> String {
    literal_name(name).to_case(Case::Snake)
}

/// Whether the given type is syntactically an `Option`, either bare or spelled
/// through one of the standard library paths.
///
/// This is a token-level check; type aliases that rename `Option` are not
/// seen through.
pub(crate) fn is_option(ty: &syn::Type) -> bool {
    let syn::Type::Path(type_path) = ty else { return false };
    if type_path.qself.is_some() {
        return false;
    }
    let segments = &type_path.path.segments;
    let Some(last) = segments.last() else { return false };
    if last.ident != "Option" {
        return false;
    }
    match segments.len() {
        1 => true,
        3 => {
            let mut prefix = segments.iter().take(2).map(|segment| segment.ident.to_string());
            let (first, second) = (prefix.next(), prefix.next());
            matches!(
                (first.as_deref(), second.as_deref()),
                (Some("std") | Some("core"), Some("option"))
            )
        }
        _ => false,
    }
}
