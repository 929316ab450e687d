use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::ParseStream;
use syn::{Attribute, Expr, ExprPath, Ident, LitStr, Path, Token, Type, parenthesized};

use crate::{BEAN_ATTRIBUTE_NAME, PROPERTY_ATTRIBUTE_NAME};

// -----------------------------------------------------------------------------
// Annotations

/// `@expr` entries of a `#[bean(..)]` or `#[property(..)]` attribute.
#[derive(Default)]
pub(crate) struct Annotations {
    values: Vec<Expr>,
}

impl Annotations {
    /// Parse `@` annotation.
    ///
    /// Examples:
    /// - `#[property(@Label("street"))]`
    /// - `#[bean(@10u8)]`
    fn parse_inner_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        input.parse::<Token![@]>()?;
        self.values.push(input.parse()?);
        Ok(())
    }

    /// Returns nothing if there is no annotation, otherwise:
    ///
    /// ```ignore
    /// .with_annotations(_path_::info::Annotations::new()(.with( ... ))*)
    /// ```
    pub fn get_expression_with(&self, bean_meta_path: &Path) -> TokenStream {
        if self.values.is_empty() {
            return TokenStream::new();
        }
        let annotations_ = crate::path::annotations_(bean_meta_path);
        let values = &self.values;
        quote! {
            .with_annotations(
                #annotations_::new()
                    #(.with(#values))*
            )
        }
    }
}

// -----------------------------------------------------------------------------
// Shared helpers

fn parse_str_value(input: ParseStream) -> syn::Result<LitStr> {
    input.parse::<Token![=]>()?;
    input.parse()
}

fn set_once<T>(slot: &mut Option<T>, value: T, span: Span, what: &str) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(span, format!("`{what}` is set twice")));
    }
    *slot = Some(value);
    Ok(())
}

/// Calls `item` on every comma separated entry of every attribute named
/// `name`.
fn parse_attributes(
    attrs: &[Attribute],
    name: &str,
    mut item: impl FnMut(ParseStream) -> syn::Result<()>,
) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
        found = true;
        if matches!(attr.meta, syn::Meta::Path(_)) {
            continue;
        }
        attr.parse_args_with(|input: ParseStream| {
            while !input.is_empty() {
                item(input)?;
                if input.is_empty() {
                    break;
                }
                input.parse::<Token![,]>()?;
            }
            Ok(())
        })?;
    }
    Ok(found)
}

// -----------------------------------------------------------------------------
// Type attributes

/// The accessor strategy selected by `#[bean(accessor = "..")]`.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum AccessorKind {
    Reflective,
    Handle,
    #[default]
    Generated,
}

/// A derived property: `derived(name: Type = path)`.
pub(crate) struct DerivedProperty {
    pub name: Ident,
    pub ty: Type,
    pub compute: ExprPath,
}

/// Everything `#[bean(..)]` can carry.
#[derive(Default)]
pub(crate) struct BeanAttributes {
    pub accessor: AccessorKind,
    pub mutable: Option<Span>,
    pub auto_register: Option<Span>,
    pub schema: Option<Path>,
    pub derived: Vec<DerivedProperty>,
    pub annotations: Annotations,
}

impl BeanAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        let mut accessor = None;
        parse_attributes(attrs, BEAN_ATTRIBUTE_NAME, |input| this.parse_item(input, &mut accessor))?;
        // A hand-written schema carries no generated accessor table.
        this.accessor = match (accessor, &this.schema) {
            (Some(kind), _) => kind,
            (None, Some(_)) => AccessorKind::Handle,
            (None, None) => AccessorKind::default(),
        };
        Ok(this)
    }

    fn parse_item(&mut self, input: ParseStream, accessor: &mut Option<AccessorKind>) -> syn::Result<()> {
        if input.peek(Token![@]) {
            return self.annotations.parse_inner_stream(input);
        }
        let ident: Ident = input.parse()?;
        match ident.to_string().as_str() {
            "mutable" => set_once(&mut self.mutable, ident.span(), ident.span(), "mutable"),
            "auto_register" => {
                set_once(&mut self.auto_register, ident.span(), ident.span(), "auto_register")
            }
            "accessor" => {
                let lit = parse_str_value(input)?;
                let kind = match lit.value().as_str() {
                    "reflective" => AccessorKind::Reflective,
                    "handle" => AccessorKind::Handle,
                    "generated" => AccessorKind::Generated,
                    _ => {
                        return Err(syn::Error::new(
                            lit.span(),
                            "expected `reflective`, `handle` or `generated`",
                        ));
                    }
                };
                set_once(accessor, kind, lit.span(), "accessor")
            }
            "schema" => {
                input.parse::<Token![=]>()?;
                let path: Path = input.parse()?;
                set_once(&mut self.schema, path, ident.span(), "schema")
            }
            "derived" => {
                let inner;
                parenthesized!(inner in input);
                let name: Ident = inner.parse()?;
                inner.parse::<Token![:]>()?;
                let ty: Type = inner.parse()?;
                inner.parse::<Token![=]>()?;
                let compute: ExprPath = inner.parse()?;
                self.derived.push(DerivedProperty { name, ty, compute });
                Ok(())
            }
            _ => Err(syn::Error::new(
                ident.span(),
                "unknown `bean` argument, expected `accessor`, `mutable`, `auto_register`, \
                 `schema`, `derived` or `@annotation`",
            )),
        }
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// How a property is read, `#[property(get = "..")]`.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum GetStyle {
    /// Through the generated `get_<name>` / `is_<name>` getter.
    #[default]
    Smart,
    /// Straight from the field.
    Field,
    /// Straight from the field, a nullable field.
    Optional,
    /// Through a getter returning the whole `Option`.
    Wrapped,
}

/// A constructor check, `#[property(validate = "..")]`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Validate {
    NotNull,
    NotEmpty,
}

/// Everything `#[property(..)]` can carry.
#[derive(Default)]
pub(crate) struct PropertyAttributes {
    pub get: GetStyle,
    pub get_span: Option<Span>,
    pub validate: Option<Validate>,
    pub annotations: Annotations,
}

impl PropertyAttributes {
    /// Returns `None` if the field has no `#[property]` attribute.
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Option<Self>> {
        let mut this = Self::default();
        let mut get = None;
        let found = parse_attributes(attrs, PROPERTY_ATTRIBUTE_NAME, |input| this.parse_item(input, &mut get))?;
        if let Some((style, span)) = get {
            this.get = style;
            this.get_span = Some(span);
        }
        Ok(found.then_some(this))
    }

    fn parse_item(&mut self, input: ParseStream, get: &mut Option<(GetStyle, Span)>) -> syn::Result<()> {
        if input.peek(Token![@]) {
            return self.annotations.parse_inner_stream(input);
        }
        let ident: Ident = input.parse()?;
        match ident.to_string().as_str() {
            "get" => {
                let lit = parse_str_value(input)?;
                let style = match lit.value().as_str() {
                    "smart" => GetStyle::Smart,
                    "field" => GetStyle::Field,
                    "optional" => GetStyle::Optional,
                    "wrapped" => GetStyle::Wrapped,
                    _ => {
                        return Err(syn::Error::new(
                            lit.span(),
                            "expected `smart`, `field`, `optional` or `wrapped`",
                        ));
                    }
                };
                set_once(get, (style, lit.span()), lit.span(), "get")
            }
            "validate" => {
                let lit = parse_str_value(input)?;
                let check = match lit.value().as_str() {
                    "not_null" => Validate::NotNull,
                    "not_empty" => Validate::NotEmpty,
                    _ => {
                        return Err(syn::Error::new(lit.span(), "expected `not_null` or `not_empty`"));
                    }
                };
                set_once(&mut self.validate, check, lit.span(), "validate")
            }
            _ => Err(syn::Error::new(
                ident.span(),
                "unknown `property` argument, expected `get`, `validate` or `@annotation`",
            )),
        }
    }
}
