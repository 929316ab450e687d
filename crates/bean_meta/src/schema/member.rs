use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::info::{Annotations, TypeInfo, Typed};
use crate::schema::Args;
use crate::{Bean, MemberError, Value};

// -----------------------------------------------------------------------------
// Function shapes

/// Reads a member of a bean, `Ok(None)` is a null value.
pub type ReadFn = fn(&dyn Bean) -> Result<Option<Box<dyn Value>>, MemberError>;

/// Writes a member of a bean, `None` writes null.
pub type WriteFn = fn(&mut dyn Bean, Option<Box<dyn Value>>) -> Result<(), MemberError>;

/// Invokes a constructor with positional arguments.
pub type ConstructFn = fn(Args) -> Result<Box<dyn Bean>, MemberError>;

// -----------------------------------------------------------------------------
// GetStyle

/// How a property-bearing field is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GetStyle {
    /// Bound directly to the field.
    Field,
    /// Bound directly to the field, a nullable field whose getter wraps the
    /// value into `Option`.
    Optional,
    /// Read through the conventional getter, `get_<name>` or `is_<name>`.
    Accessor,
}

// -----------------------------------------------------------------------------
// FieldDecl

/// A field of a bean type.
///
/// Only fields with a [`GetStyle`] declare a property. `Option<T>` fields are
/// declared with type `T` and marked [`nullable`](FieldDecl::nullable).
pub struct FieldDecl {
    name: &'static str,
    info: &'static TypeInfo,
    style: Option<GetStyle>,
    nullable: bool,
    is_static: bool,
    inherited: bool,
    read: Option<ReadFn>,
    write: Option<WriteFn>,
    annotations: Option<Arc<Annotations>>,
}

impl FieldDecl {
    /// Declares a plain field of type `T`.
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            info: T::type_info(),
            style: None,
            nullable: false,
            is_static: false,
            inherited: false,
            read: None,
            write: None,
            annotations: None,
        }
    }

    /// Marks the field as a property read in the given style.
    pub fn property(mut self, style: GetStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the field as a static (type-level) member, never a property.
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Marks the field as declared by an ancestor.
    pub fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    pub fn with_read(mut self, read: ReadFn) -> Self {
        self.read = Some(read);
        self
    }

    pub fn with_write(mut self, write: WriteFn) -> Self {
        self.write = Some(write);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(Arc::new(annotations));
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    #[inline]
    pub fn style(&self) -> Option<GetStyle> {
        self.style
    }

    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.is_static
    }

    #[inline]
    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    #[inline]
    pub fn reader(&self) -> Option<ReadFn> {
        self.read
    }

    #[inline]
    pub fn writer(&self) -> Option<WriteFn> {
        self.write
    }

    #[inline]
    pub fn annotations(&self) -> &Annotations {
        self.annotations.as_deref().unwrap_or(Annotations::EMPTY)
    }

    #[inline]
    pub(crate) fn shared_annotations(&self) -> Option<Arc<Annotations>> {
        self.annotations.clone()
    }
}

impl fmt::Debug for FieldDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDecl")
            .field("name", &self.name)
            .field("type", self.info.ty())
            .field("style", &self.style)
            .field("nullable", &self.nullable)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// MethodDecl

/// What a method does.
#[derive(Debug, Clone, Copy)]
pub enum MethodKind {
    /// A getter returning `returns`.
    Getter {
        returns: &'static TypeInfo,
        read: ReadFn,
    },
    /// A setter taking one `param`.
    Setter {
        param: &'static TypeInfo,
        write: WriteFn,
    },
}

/// A getter or setter of a bean type.
pub struct MethodDecl {
    name: &'static str,
    kind: MethodKind,
    derived: Option<&'static str>,
    annotations: Option<Arc<Annotations>>,
}

impl MethodDecl {
    /// Declares a getter returning `R`.
    pub fn getter<R: Typed>(name: &'static str, read: ReadFn) -> Self {
        Self {
            name,
            kind: MethodKind::Getter {
                returns: R::type_info(),
                read,
            },
            derived: None,
            annotations: None,
        }
    }

    /// Declares a setter taking `P`.
    pub fn setter<P: Typed>(name: &'static str, write: WriteFn) -> Self {
        Self {
            name,
            kind: MethodKind::Setter {
                param: P::type_info(),
                write,
            },
            derived: None,
            annotations: None,
        }
    }

    /// Marks a getter as the source of a derived property.
    pub fn derived(mut self, property: &'static str) -> Self {
        self.derived = Some(property);
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = Some(Arc::new(annotations));
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    /// The return type of a getter.
    pub fn return_info(&self) -> Option<&'static TypeInfo> {
        match self.kind {
            MethodKind::Getter { returns, .. } => Some(returns),
            MethodKind::Setter { .. } => None,
        }
    }

    /// The parameter type of a setter.
    pub fn param_info(&self) -> Option<&'static TypeInfo> {
        match self.kind {
            MethodKind::Setter { param, .. } => Some(param),
            MethodKind::Getter { .. } => None,
        }
    }

    pub fn reader(&self) -> Option<ReadFn> {
        match self.kind {
            MethodKind::Getter { read, .. } => Some(read),
            MethodKind::Setter { .. } => None,
        }
    }

    pub fn writer(&self) -> Option<WriteFn> {
        match self.kind {
            MethodKind::Setter { write, .. } => Some(write),
            MethodKind::Getter { .. } => None,
        }
    }

    /// The name of the derived property this getter computes.
    #[inline]
    pub fn derived_property(&self) -> Option<&'static str> {
        self.derived
    }

    #[inline]
    pub fn annotations(&self) -> &Annotations {
        self.annotations.as_deref().unwrap_or(Annotations::EMPTY)
    }

    #[inline]
    pub(crate) fn shared_annotations(&self) -> Option<Arc<Annotations>> {
        self.annotations.clone()
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("derived", &self.derived)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// ConstructorDecl

/// A constructor of a bean type.
pub struct ConstructorDecl {
    params: Vec<&'static TypeInfo>,
    invoke: ConstructFn,
}

impl ConstructorDecl {
    /// Declares a constructor, parameters are added with
    /// [`with_param`](Self::with_param).
    pub fn new(invoke: ConstructFn) -> Self {
        Self {
            params: Vec::new(),
            invoke,
        }
    }

    /// Appends a parameter of type `T`.
    pub fn with_param<T: Typed>(mut self) -> Self {
        self.params.push(T::type_info());
        self
    }

    #[inline]
    pub fn params(&self) -> &[&'static TypeInfo] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn invoke(&self, args: Args) -> Result<Box<dyn Bean>, MemberError> {
        (self.invoke)(args)
    }

    /// `true` if the parameter types are exactly `types`, in order.
    pub(crate) fn matches_exactly(&self, types: &[&'static TypeInfo]) -> bool {
        self.params.len() == types.len()
            && self
                .params
                .iter()
                .zip(types)
                .all(|(param, ty)| param.ty_id() == ty.ty_id())
    }

    /// `true` if every parameter accepts the corresponding type of `types`.
    pub(crate) fn matches_leniently(&self, types: &[&'static TypeInfo]) -> bool {
        self.params.len() == types.len()
            && self
                .params
                .iter()
                .zip(types)
                .all(|(param, ty)| param.is_assignable_from(ty))
    }
}

impl fmt::Debug for ConstructorDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.params.iter().map(|p| p.ty()))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GeneratedAccessor

/// An entry of the generated accessor table: direct closures over one
/// property, emitted by `#[derive(Bean)]`.
#[derive(Clone, Copy)]
pub struct GeneratedAccessor {
    name: &'static str,
    get: ReadFn,
    set: Option<WriteFn>,
}

impl GeneratedAccessor {
    pub const fn new(name: &'static str, get: ReadFn) -> Self {
        Self {
            name,
            get,
            set: None,
        }
    }

    pub const fn with_set(mut self, set: WriteFn) -> Self {
        self.set = Some(set);
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn getter(&self) -> ReadFn {
        self.get
    }

    #[inline]
    pub fn setter(&self) -> Option<WriteFn> {
        self.set
    }
}

impl fmt::Debug for GeneratedAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedAccessor")
            .field("name", &self.name)
            .field("writable", &self.set.is_some())
            .finish()
    }
}
