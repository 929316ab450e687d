use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// `TypePath` and `Typed`, the type info of a bean is opaque.
pub(crate) fn impl_type_path_and_typed(bean: &BeanStruct) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let info_ = crate::path::info_(bean_meta_path);
    let ident = bean.ident;
    let name = ident.to_string();

    quote! {
        impl #info_::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #name)
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }

            #[inline]
            fn type_ident() -> &'static str {
                #name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }
        }

        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #info_::NonGenericTypeInfoCell = #info_::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| #info_::TypeInfo::Opaque(#info_::OpaqueInfo::new::<Self>()))
            }
        }
    }
}

/// `Value` and `Bean`.
///
/// Equality goes through `PartialEq`, the hash combines the hashes of the
/// property fields.
pub(crate) fn impl_value_and_bean(bean: &BeanStruct) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let ident = bean.ident;
    let fields = bean.properties.iter().map(|p| p.ident);

    quote! {
        impl #bean_meta_path::Value for #ident {
            fn clone_value(&self) -> #macro_exports_::Box<dyn #bean_meta_path::Value> {
                #macro_exports_::Box::new(::core::clone::Clone::clone(self))
            }

            fn value_eq(&self, other: &dyn #bean_meta_path::Value) -> bool {
                other
                    .downcast_ref::<Self>()
                    .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
            }

            fn value_hash(&self) -> u64 {
                let mut hasher = #bean_meta_path::value_hasher();
                ::core::hash::Hasher::write(
                    &mut hasher,
                    <Self as #bean_meta_path::info::TypePath>::type_path().as_bytes(),
                );
                #(
                    ::core::hash::Hasher::write_u64(
                        &mut hasher,
                        #bean_meta_path::Value::value_hash(&self.#fields),
                    );
                )*
                ::core::hash::Hasher::finish(&hasher)
            }

            fn value_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }

            #[inline]
            fn value_ref(&self) -> #bean_meta_path::ValueRef<'_> {
                #bean_meta_path::ValueRef::Bean(self)
            }
        }

        impl #bean_meta_path::Bean for #ident {
            #[inline]
            fn bean_schema(&self) -> &'static #bean_meta_path::schema::BeanSchema {
                <Self as #bean_meta_path::DescribeBean>::schema()
            }

            #[inline]
            fn accessor_kind(&self) -> #bean_meta_path::AccessorKind {
                <Self as #bean_meta_path::DescribeBean>::ACCESSOR
            }
        }
    }
}
