use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{AccessorKind, BeanStruct, GetStyle, PropertyField, Validate};

// -----------------------------------------------------------------------------
// Member functions

/// `|b: &dyn Bean| -> Result<Option<Box<dyn Value>>, MemberError>` reading
/// the field as the schema declares it.
fn read_field(bean: &BeanStruct, field: &PropertyField) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let ident = field.ident;
    let wrap = if field.nullable {
        quote!(#macro_exports_::boxed_opt)
    } else {
        quote!(#macro_exports_::some)
    };
    quote! {
        |bean: &dyn #bean_meta_path::Bean| {
            ::core::result::Result::Ok(#wrap(::core::clone::Clone::clone(
                &#macro_exports_::instance::<Self>(bean)?.#ident,
            )))
        }
    }
}

/// Reads the whole `Option` of a nullable field.
fn read_wrapped(bean: &BeanStruct, field: &PropertyField) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let ident = field.ident;
    quote! {
        |bean: &dyn #bean_meta_path::Bean| {
            ::core::result::Result::Ok(#macro_exports_::some(::core::clone::Clone::clone(
                &#macro_exports_::instance::<Self>(bean)?.#ident,
            )))
        }
    }
}

/// The read function matching the member the descriptor binds.
fn read_property(bean: &BeanStruct, field: &PropertyField) -> TokenStream {
    match field.attrs.get {
        GetStyle::Wrapped => read_wrapped(bean, field),
        GetStyle::Smart | GetStyle::Field | GetStyle::Optional => read_field(bean, field),
    }
}

/// `|b: &mut dyn Bean, v: Option<Box<dyn Value>>| -> Result<(), MemberError>`.
fn write_field(bean: &BeanStruct, field: &PropertyField) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let ident = field.ident;
    let name = &field.name;
    let assign = if field.nullable {
        quote!(#macro_exports_::assign_opt(&mut #macro_exports_::instance_mut::<Self>(bean)?.#ident, value))
    } else {
        quote!(#macro_exports_::assign(&mut #macro_exports_::instance_mut::<Self>(bean)?.#ident, #name, value))
    };
    quote! {
        |bean: &mut dyn #bean_meta_path::Bean,
         value: ::core::option::Option<#macro_exports_::Box<dyn #bean_meta_path::Value>>| {
            #assign
        }
    }
}

/// Reads a derived property through its function.
fn read_derived(bean: &BeanStruct, compute: &syn::ExprPath) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    quote! {
        |bean: &dyn #bean_meta_path::Bean| {
            ::core::result::Result::Ok(#macro_exports_::some(#compute(
                #macro_exports_::instance::<Self>(bean)?,
            )))
        }
    }
}

// -----------------------------------------------------------------------------
// Declarations

fn field_decl(bean: &BeanStruct, field: &PropertyField) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let schema_ = crate::path::schema_(bean_meta_path);
    let decl_ty = field.decl_ty;
    let name = &field.name;
    let style = match field.attrs.get {
        GetStyle::Field => quote!(#schema_::GetStyle::Field),
        GetStyle::Optional => quote!(#schema_::GetStyle::Optional),
        GetStyle::Smart | GetStyle::Wrapped => quote!(#schema_::GetStyle::Accessor),
    };
    let nullable = field.nullable.then(|| quote!(.nullable()));
    let read = read_field(bean, field);
    let write = bean.is_mutable().then(|| {
        let write = write_field(bean, field);
        quote!(.with_write(#write))
    });
    let annotations = field.attrs.annotations.get_expression_with(bean_meta_path);

    quote! {
        .with_field(
            #schema_::FieldDecl::new::<#decl_ty>(#name)
                .property(#style)
                #nullable
                .with_read(#read)
                #write
                #annotations
        )
    }
}

fn accessor_decls(bean: &BeanStruct, field: &PropertyField) -> TokenStream {
    if !field.has_getter() {
        return TokenStream::new();
    }
    let bean_meta_path = &bean.bean_meta_path;
    let schema_ = crate::path::schema_(bean_meta_path);
    let decl_ty = field.decl_ty;
    let getter = field.getter_name();
    let (returns, read) = match field.attrs.get {
        GetStyle::Wrapped => (
            quote!(::core::option::Option<#decl_ty>),
            read_wrapped(bean, field),
        ),
        _ => (quote!(#decl_ty), read_field(bean, field)),
    };
    let setter = bean.is_mutable().then(|| {
        let setter = field.setter_name();
        let write = write_field(bean, field);
        quote! {
            .with_method(#schema_::MethodDecl::setter::<#decl_ty>(#setter, #write))
        }
    });
    quote! {
        .with_method(#schema_::MethodDecl::getter::<#returns>(#getter, #read))
        #setter
    }
}

fn derived_decls(bean: &BeanStruct) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let schema_ = crate::path::schema_(bean_meta_path);
    let decls = bean.attrs.derived.iter().map(|derived| {
        let ty = &derived.ty;
        let name = derived.name.to_string();
        let getter = format!("get_{name}");
        let read = read_derived(bean, &derived.compute);
        quote! {
            .with_method(#schema_::MethodDecl::getter::<#ty>(#getter, #read).derived(#name))
        }
    });
    quote!(#(#decls)*)
}

/// Takes one constructor argument, applying the declared validation.
fn take_argument(bean: &BeanStruct, field: &PropertyField, index: usize) -> TokenStream {
    let validate_ = crate::path::validate_(&bean.bean_meta_path);
    let decl_ty = field.decl_ty;
    let name = &field.name;
    let taken = quote!(args.take_opt::<#decl_ty>(#index)?);
    let checked = match field.attrs.validate {
        Some(Validate::NotNull) => Some(quote!(#validate_::not_null(#taken, #name)?)),
        Some(Validate::NotEmpty) => Some(quote!(#validate_::not_empty(#taken, #name)?)),
        None => None,
    };
    match (checked, field.nullable) {
        (Some(checked), true) => quote!(::core::option::Option::Some(#checked)),
        (Some(checked), false) => checked,
        (None, true) => taken,
        (None, false) => quote!(args.take::<#decl_ty>(#index)?),
    }
}

fn constructor_decl(bean: &BeanStruct) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let schema_ = crate::path::schema_(bean_meta_path);
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let signature = quote! {
        -> ::core::result::Result<
            #macro_exports_::Box<dyn #bean_meta_path::Bean>,
            #bean_meta_path::MemberError,
        >
    };

    if bean.is_mutable() {
        return quote! {
            .with_constructor(#schema_::ConstructorDecl::new(|_: #schema_::Args| #signature {
                ::core::result::Result::Ok(#macro_exports_::bean(
                    <Self as ::core::default::Default>::default(),
                ))
            }))
        };
    }

    let idents = bean.properties.iter().map(|p| p.ident);
    let values = bean
        .properties
        .iter()
        .enumerate()
        .map(|(index, field)| take_argument(bean, field, index));
    let others = &bean.others;
    let params = bean.properties.iter().map(|p| p.decl_ty);

    quote! {
        .with_constructor(
            #schema_::ConstructorDecl::new(|mut args: #schema_::Args| #signature {
                ::core::result::Result::Ok(#macro_exports_::bean(Self {
                    #(#idents: #values,)*
                    #(#others: ::core::default::Default::default(),)*
                }))
            })
            #(.with_param::<#params>())*
        )
    }
}

fn generated_decls(bean: &BeanStruct) -> TokenStream {
    let schema_ = crate::path::schema_(&bean.bean_meta_path);
    let fields = bean.properties.iter().map(|field| {
        let name = &field.name;
        let read = read_property(bean, field);
        let write = bean.is_mutable().then(|| {
            let write = write_field(bean, field);
            quote!(.with_set(#write))
        });
        quote! {
            .with_generated(#schema_::GeneratedAccessor::new(#name, #read)#write)
        }
    });
    let derived = bean.attrs.derived.iter().map(|derived| {
        let name = derived.name.to_string();
        let read = read_derived(bean, &derived.compute);
        quote! {
            .with_generated(#schema_::GeneratedAccessor::new(#name, #read))
        }
    });
    quote!(#(#fields)* #(#derived)*)
}

// -----------------------------------------------------------------------------
// DescribeBean

/// `DescribeBean`, with the schema built on first use.
pub(crate) fn impl_describe_bean(bean: &BeanStruct) -> TokenStream {
    let bean_meta_path = &bean.bean_meta_path;
    let schema_ = crate::path::schema_(bean_meta_path);
    let macro_exports_ = crate::path::macro_exports_(bean_meta_path);
    let accessor_kind_ = crate::path::accessor_kind_(bean_meta_path);
    let ident = bean.ident;

    let accessor = match bean.attrs.accessor {
        AccessorKind::Reflective => quote!(#accessor_kind_::Reflective),
        AccessorKind::Handle => quote!(#accessor_kind_::Handle),
        AccessorKind::Generated => quote!(#accessor_kind_::Generated),
    };

    let init = match &bean.attrs.schema {
        Some(path) => quote!(#path),
        None => {
            let mutable = bean.is_mutable().then(|| quote!(.mutable()));
            let annotations = bean.attrs.annotations.get_expression_with(bean_meta_path);
            let fields = bean.properties.iter().map(|field| field_decl(bean, field));
            let accessors = bean.properties.iter().map(|field| accessor_decls(bean, field));
            let derived = derived_decls(bean);
            let constructor = constructor_decl(bean);
            let generated = generated_decls(bean);
            quote! {
                || {
                    #schema_::BeanSchema::new::<Self>()
                        #mutable
                        #annotations
                        #(#fields)*
                        #(#accessors)*
                        #derived
                        #constructor
                        #generated
                }
            }
        }
    };

    quote! {
        impl #bean_meta_path::DescribeBean for #ident {
            const ACCESSOR: #accessor_kind_ = #accessor;

            fn schema() -> &'static #schema_::BeanSchema {
                static SCHEMA: #macro_exports_::OnceLock<#schema_::BeanSchema> =
                    #macro_exports_::OnceLock::new();
                SCHEMA.get_or_init(#init)
            }
        }
    }
}
