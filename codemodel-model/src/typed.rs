//! Schema-checked annotation builder.
//!
//! An [`AnnotationSchema`] lists the members of one annotation type and the
//! kind of value each accepts. A [`TypedAnnotation`] validates every call
//! against the schema before forwarding it to [`AnnotationMut`].

use crate::annotation::{Annotatable, AnnotationMut};
use crate::expr::Expr;
use crate::registry::CodeModel;
use codemodel_core::{AnnotationId, Error, Result, TypeId};
use indexmap::IndexMap;

/// Value kind accepted by an annotation member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// A constant expression: primitive, string or literal.
    Value,
    /// A class literal.
    Class,
    /// An enum constant.
    Enum,
    /// A nested annotation.
    Annotation,
    /// An array of the element kind.
    Array(Box<MemberKind>),
}

impl MemberKind {
    /// Array of `element`.
    #[must_use]
    pub fn array(element: MemberKind) -> Self {
        Self::Array(Box::new(element))
    }
}

/// Member names and kinds of an annotation type.
#[derive(Debug, Clone)]
pub struct AnnotationSchema {
    annotation: String,
    members: IndexMap<String, MemberKind>,
}

impl AnnotationSchema {
    /// Schema for the annotation with the given fully qualified name.
    #[must_use]
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
            members: IndexMap::new(),
        }
    }

    /// Declares a member.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, kind: MemberKind) -> Self {
        self.members.insert(name.into(), kind);
        self
    }

    /// Fully qualified annotation name.
    #[must_use]
    pub fn annotation(&self) -> &str {
        &self.annotation
    }

    /// Kind of a member.
    #[must_use]
    pub fn kind(&self, member: &str) -> Option<&MemberKind> {
        self.members.get(member)
    }
}

/// Annotation use whose members are checked against a schema.
pub struct TypedAnnotation<'a> {
    inner: AnnotationMut<'a>,
    schema: &'a AnnotationSchema,
}

impl<'a> TypedAnnotation<'a> {
    /// Annotates `target` with the schema's annotation type.
    ///
    /// # Errors
    /// Propagates failures of [`CodeModel::annotate`].
    pub fn annotate(
        model: &'a mut CodeModel,
        target: Annotatable,
        schema: &'a AnnotationSchema,
    ) -> Result<Self> {
        let ty = model.ref_name(&schema.annotation);
        let id = model.annotate(target, ty)?;
        Ok(Self {
            inner: AnnotationMut::new(model, id),
            schema,
        })
    }

    /// Handle of the underlying annotation use.
    #[must_use]
    pub fn id(&self) -> AnnotationId {
        self.inner.id()
    }

    fn check(&self, member: &str, scalar: &MemberKind, array: bool) -> Result<()> {
        let Some(kind) = self.schema.kind(member) else {
            return Err(Error::invalid_operation(format!(
                "'{}' has no member '{member}'",
                self.schema.annotation
            )));
        };
        let matches = match kind {
            MemberKind::Array(element) => array && element.as_ref() == scalar,
            other => !array && other == scalar,
        };
        if matches {
            Ok(())
        } else {
            Err(Error::invalid_operation(format!(
                "member '{member}' of '{}' expects {kind:?}",
                self.schema.annotation
            )))
        }
    }

    /// Sets a constant member.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the schema does not accept a
    /// constant for `member`.
    pub fn set(&mut self, member: &str, value: impl Into<Expr>) -> Result<&mut Self> {
        self.check(member, &MemberKind::Value, false)?;
        self.inner.param(member, value);
        Ok(self)
    }

    /// Sets a class literal member.
    ///
    /// # Errors
    /// As [`TypedAnnotation::set`].
    pub fn set_class(&mut self, member: &str, ty: TypeId) -> Result<&mut Self> {
        self.check(member, &MemberKind::Class, false)?;
        self.inner.param_type(member, ty);
        Ok(self)
    }

    /// Sets an enum constant member.
    ///
    /// # Errors
    /// As [`TypedAnnotation::set`].
    pub fn set_enum(
        &mut self,
        member: &str,
        enum_type: TypeId,
        constant: &str,
    ) -> Result<&mut Self> {
        self.check(member, &MemberKind::Enum, false)?;
        self.inner.param_enum(member, enum_type, constant);
        Ok(self)
    }

    /// Sets a nested annotation member and returns it.
    ///
    /// # Errors
    /// As [`TypedAnnotation::set`].
    pub fn set_annotation(&mut self, member: &str, ty: TypeId) -> Result<AnnotationId> {
        self.check(member, &MemberKind::Annotation, false)?;
        Ok(self.inner.param_annotation(member, ty))
    }

    /// Appends a constant to an array member.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] unless `member` is an array of
    /// constants.
    pub fn add(&mut self, member: &str, value: impl Into<Expr>) -> Result<&mut Self> {
        self.check(member, &MemberKind::Value, true)?;
        self.inner.param_array(member).add(value);
        Ok(self)
    }

    /// Appends a class literal to an array member.
    ///
    /// # Errors
    /// As [`TypedAnnotation::add`].
    pub fn add_class(&mut self, member: &str, ty: TypeId) -> Result<&mut Self> {
        self.check(member, &MemberKind::Class, true)?;
        self.inner.param_array(member).add_type(ty);
        Ok(self)
    }

    /// Appends an enum constant to an array member.
    ///
    /// # Errors
    /// As [`TypedAnnotation::add`].
    pub fn add_enum(&mut self, member: &str, enum_type: TypeId, constant: &str) -> Result<&mut Self> {
        self.check(member, &MemberKind::Enum, true)?;
        self.inner.param_array(member).add_enum(enum_type, constant);
        Ok(self)
    }
}
