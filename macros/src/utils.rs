//!
//! Utilities for the utility macros.
//!

use std::ops::Deref;

use syn::{parse::ParseStream, parse_quote, Token};

use crate::type_traversal::{field_access, index};

const RFC_8259: &str = "https://www.rfc-editor.org/rfc/rfc8259";

///
/// A lit str which must not be empty.
///
pub struct NonEmptyStr(syn::LitStr);

impl syn::parse::Parse for NonEmptyStr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let lit: syn::LitStr = input.parse()?;

        if lit.value().trim().is_empty() {
            return Err(syn::Error::new(lit.span(), "This should not be empty."));
        }

        Ok(Self(lit))
    }
}

impl Deref for NonEmptyStr {
    type Target = syn::LitStr;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

///
/// Parameters of `#[RfcRef("Title", "section")]`.
///
pub struct RfcSection {
    title: NonEmptyStr,
    section: NonEmptyStr,
}

impl syn::parse::Parse for RfcSection {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let title: NonEmptyStr = input.parse()?;
        let _: Token![,] = input.parse()?;
        let section: NonEmptyStr = input.parse()?;

        Ok(Self { title, section })
    }
}

pub trait ToRustdoc {
    fn to_rustdoc(&self) -> Vec<syn::Attribute>;
}

impl ToRustdoc for RfcSection {
    fn to_rustdoc(&self) -> Vec<syn::Attribute> {
        let section = self.section.value();
        let title = self.title.value();

        let lines = [
            format!(" ### RFC 8259: {title}"),
            format!(" See [RFC 8259 \u{a7}{section}]({RFC_8259}#section-{section})."),
            String::from(""),
            String::from(" ---"),
            String::from(""),
        ];

        lines
            .into_iter()
            .map(|line| parse_quote!(#[doc = #line]))
            .collect()
    }
}

///
/// Returns the attributes of an item, if it can carry documentation.
///
pub fn get_item_attrs(item: &mut syn::Item) -> Option<&mut Vec<syn::Attribute>> {
    match item {
        syn::Item::Const(syn::ItemConst { attrs, .. })
        | syn::Item::Enum(syn::ItemEnum { attrs, .. })
        | syn::Item::Fn(syn::ItemFn { attrs, .. })
        | syn::Item::Mod(syn::ItemMod { attrs, .. })
        | syn::Item::Static(syn::ItemStatic { attrs, .. })
        | syn::Item::Struct(syn::ItemStruct { attrs, .. })
        | syn::Item::Trait(syn::ItemTrait { attrs, .. })
        | syn::Item::Type(syn::ItemType { attrs, .. }) => Some(attrs),
        _ => None,
    }
}

///
/// Finds the first field of a struct whose type satisfies `pred`,
/// returning the expression `self.$field`.
///
pub fn get_struct_member_where_type(
    st: &syn::ItemStruct,
    pred: impl Fn(&syn::Type) -> bool,
) -> Option<syn::Expr> {
    match &st.fields {
        syn::Fields::Named(syn::FieldsNamed { named, .. }) => named
            .iter()
            .find(|f| pred(&f.ty))
            .and_then(|f| f.ident.clone())
            .map(field_access),
        syn::Fields::Unnamed(syn::FieldsUnnamed { unnamed, .. }) => unnamed
            .iter()
            .enumerate()
            .find(|(_, f)| pred(&f.ty))
            .map(|(i, _)| field_access(index(i as u32))),
        syn::Fields::Unit => None,
    }
}
