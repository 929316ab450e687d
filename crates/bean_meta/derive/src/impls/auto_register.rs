use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::BeanStruct;

/// Submits a `BeanFactory` for `#[bean(auto_register)]` types.
#[cfg(feature = "auto_register")]
pub(crate) fn impl_auto_register(bean: &BeanStruct) -> TokenStream {
    let Some(span) = bean.attrs.auto_register else {
        return TokenStream::new();
    };
    let bean_meta_path = &bean.bean_meta_path;
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let ident = bean.ident;

    quote_spanned! { span =>
        #macro_exports_::inventory::submit! {
            #bean_meta_path::registry::BeanFactory::new(
                ::core::any::TypeId::of::<#ident>,
                <#ident as #bean_meta_path::DescribeBean>::schema,
                <#ident as #bean_meta_path::DescribeBean>::ACCESSOR,
            )
        }
    }
}

#[cfg(not(feature = "auto_register"))]
pub(crate) fn impl_auto_register(_: &BeanStruct) -> TokenStream {
    TokenStream::new()
}
