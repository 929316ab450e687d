//! Paths of the `bean_meta` items the generated code refers to.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the access path to the `bean_meta` crate from the caller, see
/// [`bean_macro_utils::Manifest`].
pub(crate) fn bean_meta() -> syn::Path {
    bean_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("bean_meta"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn macro_exports_(bean_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #bean_meta_path::__macro_exports
    }
}

#[inline(always)]
pub(crate) fn annotations_(bean_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #bean_meta_path::info::Annotations
    }
}

#[inline(always)]
pub(crate) fn schema_(bean_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #bean_meta_path::schema
    }
}

#[inline(always)]
pub(crate) fn info_(bean_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #bean_meta_path::info
    }
}

#[inline(always)]
pub(crate) fn accessor_kind_(bean_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #bean_meta_path::AccessorKind
    }
}

#[inline(always)]
pub(crate) fn validate_(bean_meta_path: &syn::Path) -> TokenStream {
    quote! {
        #bean_meta_path::ops::validate
    }
}
