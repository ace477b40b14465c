//!
//! Macros for the main crate.
//!

mod type_traversal;
mod utils;

use proc_macro::TokenStream as Tokens;
use quote::{quote, ToTokens};
use syn::parse_macro_input;
use type_traversal::{is_named_type, variant_path};
use utils::{get_item_attrs, get_struct_member_where_type, RfcSection, ToRustdoc};

///
/// ## RfcRef
///
/// Allows easy reference of **RFC 8259**, the JSON grammar.
///
/// This macro will add an additional section at the top of the Rustdoc
/// for the item attached, linking to the relevant section of the RFC.
///
/// ### Example
///
/// ```ignore
/// use jsonlint_macros::RfcRef;
///
/// #[RfcRef("Numbers", "6")]
/// struct NumberGrammar;
/// ```
///
#[allow(non_snake_case)]
#[proc_macro_attribute]
pub fn RfcRef(params: Tokens, target: Tokens) -> Tokens {
    let mut target: syn::Item = parse_macro_input!(target);
    let params: RfcSection = parse_macro_input!(params);
    let attrs = params.to_rustdoc();

    let Some(original_attrs) = get_item_attrs(&mut target) else {
        return syn::Error::new_spanned(target, "Cannot add RFC ref to this item.")
            .into_compile_error()
            .into();
    };

    // Prepend our new documentation to the start of
    // the attribute macros.
    *original_attrs = attrs
        .into_iter()
        .chain(original_attrs.iter().cloned())
        .collect();

    target.into_token_stream().into()
}

///
/// ## Spanned
///
/// Implements `crate::common::Spanned`.
///
/// * On a `struct`, the first field of type `Position` is returned.
/// * On an `enum`, every variant must hold exactly one unnamed field,
///   either a `Position` or something which is itself `Spanned`.
///
#[proc_macro_derive(Spanned)]
pub fn spanned(target: Tokens) -> Tokens {
    let target: syn::Item = parse_macro_input!(target);

    let (ident, generics, body) = match &target {
        syn::Item::Struct(st) => {
            let Some(member) =
                get_struct_member_where_type(st, |ty| is_named_type(ty, "Position").is_some())
            else {
                return syn::Error::new_spanned(st, "Expected a field of type `Position`.")
                    .into_compile_error()
                    .into();
            };

            (&st.ident, &st.generics, quote! { #member })
        }
        syn::Item::Enum(en) => {
            let mut arms = vec![];

            for var in &en.variants {
                let syn::Fields::Unnamed(syn::FieldsUnnamed { unnamed, .. }) = &var.fields else {
                    return syn::Error::new_spanned(var, "Expected a single unnamed field.")
                        .into_compile_error()
                        .into();
                };

                let (Some(field), 1) = (unnamed.first(), unnamed.len()) else {
                    return syn::Error::new_spanned(var, "Expected a single unnamed field.")
                        .into_compile_error()
                        .into();
                };

                let path = variant_path(&var.ident);
                arms.push(if is_named_type(&field.ty, "Position").is_some() {
                    quote! { #path(inner) => *inner }
                } else {
                    quote! { #path(inner) => crate::common::Spanned::position(inner) }
                });
            }

            (
                &en.ident,
                &en.generics,
                quote! {
                    match self {
                        #(#arms),*
                    }
                },
            )
        }
        _ => {
            return syn::Error::new_spanned(target, "Cannot derive `Spanned` for this item.")
                .into_compile_error()
                .into();
        }
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics crate::common::Spanned for #ident #ty_generics #where_clause {
            fn position(&self) -> crate::common::Position {
                #body
            }
        }
    }
    .into()
}
