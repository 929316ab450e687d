//! Declarations of bean types.
//!
//! A [`BeanSchema`] lists the members of one bean type: its fields, getters
//! and setters, constructors and the generated accessor table. It is the only
//! input of descriptor construction. `#[derive(Bean)]` emits one per type;
//! schemas can also be written by hand.
//!
//! # Examples
//!
//! ```
//! use bean_meta::schema::{Args, BeanSchema, ConstructorDecl, FieldDecl, GetStyle, MethodDecl};
//! use bean_meta::__macro_exports::{bean, instance, some};
//! use bean_meta::{AccessorKind, BeanDescriptor, derive::Bean};
//!
//! #[derive(Bean, Clone, Debug, PartialEq)]
//! #[bean(schema = label_schema)]
//! struct Label {
//!     text: String,
//! }
//!
//! fn label_schema() -> BeanSchema {
//!     BeanSchema::new::<Label>()
//!         .with_field(
//!             FieldDecl::new::<String>("text")
//!                 .property(GetStyle::Accessor)
//!                 .with_read(|b| Ok(some(instance::<Label>(b)?.text.clone()))),
//!         )
//!         .with_method(MethodDecl::getter::<String>("get_text", |b| {
//!             Ok(some(instance::<Label>(b)?.text.to_uppercase()))
//!         }))
//!         .with_constructor(ConstructorDecl::new(|mut args: Args| {
//!             Ok(bean(Label { text: args.take(0)? }))
//!         }).with_param::<String>())
//! }
//!
//! let descriptor = BeanDescriptor::from_schema(
//!     <Label as bean_meta::DescribeBean>::schema(),
//!     AccessorKind::Handle,
//! ).unwrap();
//! let label = Label { text: "park lane".into() };
//! let text = descriptor.property("text").unwrap();
//! assert_eq!(text.get_as::<String>(&label).unwrap().as_deref(), Some("PARK LANE"));
//! ```

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{Annotations, Type, TypePath};

// -----------------------------------------------------------------------------
// Modules

mod args;
mod member;

// -----------------------------------------------------------------------------
// Exports

pub use args::Args;
pub use member::{ConstructFn, ReadFn, WriteFn};
pub use member::{ConstructorDecl, FieldDecl, GeneratedAccessor, GetStyle, MethodDecl, MethodKind};

// -----------------------------------------------------------------------------
// BeanSchema

/// The declared members of a bean type.
pub struct BeanSchema {
    ty: Type,
    mutable: bool,
    parent: Option<&'static BeanSchema>,
    fields: Vec<FieldDecl>,
    methods: Vec<MethodDecl>,
    constructors: Vec<ConstructorDecl>,
    generated: Vec<GeneratedAccessor>,
    annotations: Option<Arc<Annotations>>,
}

impl BeanSchema {
    /// Starts the schema of an immutable bean type `T`.
    pub fn new<T: TypePath>() -> Self {
        Self {
            ty: Type::of::<T>(),
            mutable: false,
            parent: None,
            fields: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
            generated: Vec::new(),
            annotations: None,
        }
    }

    /// Marks the type as mutable: built through a zero-argument constructor
    /// and setters.
    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    /// Sets the schema of the ancestor, searched for inherited getters and
    /// setters.
    pub fn with_parent(mut self, parent: &'static BeanSchema) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorDecl) -> Self {
        self.constructors.push(constructor);
        self
    }

    pub fn with_generated(mut self, accessor: GeneratedAccessor) -> Self {
        self.generated.push(accessor);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(Arc::new(annotations));
        self
    }

    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    #[inline]
    pub fn is_mutable(&self) -> bool {
        self.mutable
    }

    #[inline]
    pub fn parent(&self) -> Option<&'static BeanSchema> {
        self.parent
    }

    /// Fields in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    /// Returns the own field named `name`.
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name() == name)
    }

    #[inline]
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    /// Returns the own method named `name`.
    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name() == name)
    }

    /// Returns the method named `name`, searching this schema first and then
    /// the ancestor chain.
    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        let mut schema = Some(self);
        while let Some(current) = schema {
            if let Some(method) = current.method(name) {
                return Some(method);
            }
            schema = current.parent;
        }
        None
    }

    #[inline]
    pub fn constructors(&self) -> &[ConstructorDecl] {
        &self.constructors
    }

    #[inline]
    pub fn generated(&self) -> &[GeneratedAccessor] {
        &self.generated
    }

    /// Returns the generated accessor of the property `name`.
    pub fn generated_for(&self, name: &str) -> Option<&GeneratedAccessor> {
        self.generated.iter().find(|g| g.name() == name)
    }

    #[inline]
    pub fn annotations(&self) -> &Annotations {
        self.annotations.as_deref().unwrap_or(Annotations::EMPTY)
    }
}

impl fmt::Debug for BeanSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanSchema")
            .field("type", &self.ty)
            .field("mutable", &self.mutable)
            .field("fields", &self.fields)
            .field("methods", &self.methods)
            .field("constructors", &self.constructors)
            .finish_non_exhaustive()
    }
}
