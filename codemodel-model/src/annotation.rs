//! Annotation uses.
//!
//! An [`AnnotationUse`] is a class reference plus an insertion-ordered map of
//! member values. A lone member named `value` renders in the compact
//! single-value form.

use crate::expr::Expr;
use crate::registry::CodeModel;
use codemodel_core::{AnnotationId, ClassId, Error, MethodId, PackageId, Result, TypeId, VarId};
use indexmap::IndexMap;

/// Value of an annotation member.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    /// A constant expression.
    Expr(Expr),
    /// A class literal; primitives are boxed when rendered.
    Type(TypeId),
    /// A nested annotation.
    Annotation(AnnotationId),
    /// `{..}` array of values.
    Array(Vec<AnnotationValue>),
}

/// One use of an annotation.
#[derive(Debug, Clone)]
pub struct AnnotationUse {
    pub(crate) class: TypeId,
    pub(crate) members: IndexMap<String, AnnotationValue>,
}

impl AnnotationUse {
    /// Annotation type.
    #[must_use]
    pub fn class(&self) -> TypeId {
        self.class
    }

    /// Members in insertion order.
    #[must_use]
    pub fn members(&self) -> &IndexMap<String, AnnotationValue> {
        &self.members
    }
}

/// Declarations that can carry annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotatable {
    /// A class.
    Class(ClassId),
    /// A method or constructor.
    Method(MethodId),
    /// A field, local or parameter.
    Var(VarId),
    /// A named package; written to `package-info`.
    Package(PackageId),
    /// An enum constant of the class.
    EnumConstant(ClassId, String),
}

/// Mutable view of an annotation use.
pub struct AnnotationMut<'a> {
    model: &'a mut CodeModel,
    id: AnnotationId,
}

impl<'a> AnnotationMut<'a> {
    pub(crate) fn new(model: &'a mut CodeModel, id: AnnotationId) -> Self {
        Self { model, id }
    }

    fn members(&mut self) -> &mut IndexMap<String, AnnotationValue> {
        &mut self.model.annotations[self.id.index()].members
    }

    /// Handle of the annotation.
    #[must_use]
    pub fn id(&self) -> AnnotationId {
        self.id
    }

    /// Sets a member to a constant expression.
    pub fn param(&mut self, name: impl Into<String>, value: impl Into<Expr>) -> &mut Self {
        self.members()
            .insert(name.into(), AnnotationValue::Expr(value.into()));
        self
    }

    /// Sets a member to a class literal.
    pub fn param_type(&mut self, name: impl Into<String>, ty: TypeId) -> &mut Self {
        self.members().insert(name.into(), AnnotationValue::Type(ty));
        self
    }

    /// Sets a member to an enum constant.
    pub fn param_enum(
        &mut self,
        name: impl Into<String>,
        enum_type: TypeId,
        constant: impl Into<String>,
    ) -> &mut Self {
        self.param(name, Expr::static_field(enum_type, constant))
    }

    /// Sets a member to a nested annotation and returns it.
    pub fn param_annotation(&mut self, name: impl Into<String>, ty: TypeId) -> AnnotationId {
        let nested = self.model.new_annotation(ty);
        self.members()
            .insert(name.into(), AnnotationValue::Annotation(nested));
        nested
    }

    /// Array member, created empty on first use.
    ///
    /// A scalar value already stored under `name` becomes the first element.
    pub fn param_array(&mut self, name: impl Into<String>) -> AnnotationArrayMut<'_> {
        let name = name.into();
        let members = self.members();
        match members.get_mut(&name) {
            Some(AnnotationValue::Array(_)) => {}
            Some(other) => {
                let first = other.clone();
                *other = AnnotationValue::Array(vec![first]);
            }
            None => {
                members.insert(name.clone(), AnnotationValue::Array(Vec::new()));
            }
        }
        AnnotationArrayMut {
            model: &mut *self.model,
            id: self.id,
            name,
        }
    }
}

/// Mutable view of an array member of an annotation.
pub struct AnnotationArrayMut<'a> {
    model: &'a mut CodeModel,
    id: AnnotationId,
    name: String,
}

impl AnnotationArrayMut<'_> {
    fn push(&mut self, value: AnnotationValue) {
        if let Some(AnnotationValue::Array(values)) = self.model.annotations[self.id.index()]
            .members
            .get_mut(&self.name)
        {
            values.push(value);
        }
    }

    /// Appends a constant expression.
    pub fn add(&mut self, value: impl Into<Expr>) -> &mut Self {
        self.push(AnnotationValue::Expr(value.into()));
        self
    }

    /// Appends a class literal.
    pub fn add_type(&mut self, ty: TypeId) -> &mut Self {
        self.push(AnnotationValue::Type(ty));
        self
    }

    /// Appends an enum constant.
    pub fn add_enum(&mut self, enum_type: TypeId, constant: impl Into<String>) -> &mut Self {
        self.add(Expr::static_field(enum_type, constant))
    }

    /// Appends a nested annotation and returns it.
    pub fn add_annotation(&mut self, ty: TypeId) -> AnnotationId {
        let nested = self.model.new_annotation(ty);
        self.push(AnnotationValue::Annotation(nested));
        nested
    }
}

impl CodeModel {
    /// Creates a free-standing annotation use, e.g. for a member value.
    pub fn new_annotation(&mut self, ty: TypeId) -> AnnotationId {
        let id = AnnotationId::next(self.annotations.len());
        self.annotations.push(AnnotationUse {
            class: ty,
            members: IndexMap::new(),
        });
        id
    }

    /// Annotates a declaration.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] for the unnamed package and for
    /// an enum constant that does not exist.
    pub fn annotate(&mut self, target: Annotatable, ty: TypeId) -> Result<AnnotationId> {
        match &target {
            Annotatable::Package(package) if self.packages[package.index()].is_unnamed() => {
                return Err(Error::invalid_operation(
                    "the unnamed package cannot be annotated",
                ));
            }
            Annotatable::EnumConstant(class, name)
                if !self.classes[class.index()].enum_constants.contains_key(name) =>
            {
                return Err(Error::invalid_operation(format!(
                    "enum constant '{name}' does not exist"
                )));
            }
            _ => {}
        }

        let id = self.new_annotation(ty);
        let list = match target {
            Annotatable::Class(class) => &mut self.classes[class.index()].annotations,
            Annotatable::Method(method) => &mut self.methods[method.index()].annotations,
            Annotatable::Var(var) => &mut self.vars[var.index()].annotations,
            Annotatable::Package(package) => &mut self.packages[package.index()].annotations,
            Annotatable::EnumConstant(class, name) => {
                match self.classes[class.index()].enum_constants.get_mut(&name) {
                    Some(constant) => &mut constant.annotations,
                    None => return Err(Error::invalid_operation("enum constant vanished")),
                }
            }
        };
        list.push(id);
        Ok(id)
    }

    /// Returns an annotation use.
    #[must_use]
    pub fn annotation(&self, id: AnnotationId) -> &AnnotationUse {
        &self.annotations[id.index()]
    }

    /// Mutable view of an annotation use.
    pub fn annotation_mut(&mut self, id: AnnotationId) -> AnnotationMut<'_> {
        AnnotationMut::new(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassKind;

    #[test]
    fn test_members_keep_insertion_order() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("a.Test", ClassKind::Class).expect("class");
        let ty = cm.ref_name("java.lang.SuppressWarnings");
        let ann = cm.annotate(Annotatable::Class(class), ty).expect("annotate");
        cm.annotation_mut(ann)
            .param("b", 1)
            .param("a", "x")
            .param("b", 2);

        let names: Vec<&str> = cm
            .annotation(ann)
            .members()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(cm.class(class).annotations(), &[ann]);
    }

    #[test]
    fn test_array_member_promotes_scalar() {
        let mut cm = CodeModel::new();
        let ty = cm.ref_name("java.lang.SuppressWarnings");
        let ann = cm.new_annotation(ty);
        let mut view = cm.annotation_mut(ann);
        view.param("value", "unchecked");
        view.param_array("value").add("rawtypes");

        match &cm.annotation(ann).members()["value"] {
            AnnotationValue::Array(values) => assert_eq!(values.len(), 2),
            other => panic!("unexpected value {other:?}"),
        }
    }

    #[test]
    fn test_unnamed_package_rejects_annotations() {
        let mut cm = CodeModel::new();
        let ty = cm.ref_name("java.lang.Deprecated");
        let root = cm.root_package();
        let err = cm
            .annotate(Annotatable::Package(root), ty)
            .expect_err("root package");
        assert!(matches!(err, Error::InvalidOperation { .. }));

        let named = cm.package("com.acme").expect("package");
        assert!(cm.annotate(Annotatable::Package(named), ty).is_ok());
    }

    #[test]
    fn test_enum_constant_annotation() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("a.Color", ClassKind::Enum).expect("enum");
        let ty = cm.ref_name("java.lang.Deprecated");
        assert!(
            cm.annotate(Annotatable::EnumConstant(class, "RED".into()), ty)
                .is_err()
        );
        cm.class_mut(class).enum_constant("RED").expect("constant");
        assert!(
            cm.annotate(Annotatable::EnumConstant(class, "RED".into()), ty)
                .is_ok()
        );
    }
}
