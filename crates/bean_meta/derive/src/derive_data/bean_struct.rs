use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericArgument, Ident, Path, PathArguments, Type};

use super::{BeanAttributes, GetStyle, PropertyAttributes};

// -----------------------------------------------------------------------------
// Nullable types

/// Returns `T` if `ty` is spelled `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// PropertyField

/// A field carrying `#[property]`.
pub(crate) struct PropertyField<'a> {
    pub ident: &'a Ident,
    pub name: String,
    /// The type the schema declares: `T` for an `Option<T>` field.
    pub decl_ty: &'a Type,
    /// The field is an `Option`.
    pub nullable: bool,
    pub attrs: PropertyAttributes,
}

impl PropertyField<'_> {
    /// Name of the conventional getter.
    pub fn getter_name(&self) -> String {
        let is_bool = matches!(self.decl_ty, Type::Path(p) if p.path.is_ident("bool"));
        if is_bool && !self.nullable && self.attrs.get == GetStyle::Smart {
            format!("is_{}", self.name)
        } else {
            format!("get_{}", self.name)
        }
    }

    #[inline]
    pub fn setter_name(&self) -> String {
        format!("set_{}", self.name)
    }

    /// The property is read through a schema getter.
    #[inline]
    pub fn has_getter(&self) -> bool {
        matches!(self.attrs.get, GetStyle::Smart | GetStyle::Wrapped)
    }
}

// -----------------------------------------------------------------------------
// BeanStruct

/// A struct deriving `Bean`.
pub(crate) struct BeanStruct<'a> {
    pub ident: &'a Ident,
    pub bean_meta_path: Path,
    pub attrs: BeanAttributes,
    pub properties: Vec<PropertyField<'a>>,
    /// Fields without `#[property]`, set to their default by constructors.
    pub others: Vec<&'a Ident>,
}

impl<'a> BeanStruct<'a> {
    pub fn from_derive_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new(
                input.span(),
                "`Bean` can only be derived for structs with named fields",
            ));
        };
        let Fields::Named(fields) = &data.fields else {
            return Err(syn::Error::new(
                data.fields.span(),
                "`Bean` can only be derived for structs with named fields",
            ));
        };
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "`Bean` cannot be derived for generic types",
            ));
        }

        let attrs = BeanAttributes::parse(&input.attrs)?;
        let mut properties = Vec::new();
        let mut others = Vec::new();

        for field in &fields.named {
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };
            let Some(field_attrs) = PropertyAttributes::parse(&field.attrs)? else {
                others.push(ident);
                continue;
            };
            let inner = option_inner(&field.ty);
            let nullable = inner.is_some();
            if !nullable
                && matches!(field_attrs.get, GetStyle::Optional | GetStyle::Wrapped)
                && let Some(span) = field_attrs.get_span
            {
                return Err(syn::Error::new(span, "this get style needs an `Option` field"));
            }
            properties.push(PropertyField {
                ident,
                name: ident.to_string().trim_start_matches("r#").to_owned(),
                decl_ty: inner.unwrap_or(&field.ty),
                nullable,
                attrs: field_attrs,
            });
        }

        for derived in &attrs.derived {
            if properties.iter().any(|p| derived.name == p.name) {
                return Err(syn::Error::new(
                    derived.name.span(),
                    "a derived property cannot share the name of a field property",
                ));
            }
        }

        Ok(Self {
            ident: &input.ident,
            bean_meta_path: crate::path::bean_meta(),
            attrs,
            properties,
            others,
        })
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.attrs.mutable.is_some()
    }
}
