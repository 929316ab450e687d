// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod schema;
mod trait_value;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::BeanStruct;

/// Every impl emitted by `#[derive(Bean)]`.
pub(crate) fn impl_bean(bean: &BeanStruct) -> TokenStream {
    let type_path = trait_value::impl_type_path_and_typed(bean);
    let value = trait_value::impl_value_and_bean(bean);
    let describe = schema::impl_describe_bean(bean);
    let auto_register = auto_register::impl_auto_register(bean);

    quote! {
        #type_path
        #value
        #describe
        #auto_register
    }
}
