//! Methods and constructors.

use crate::annotation::{Annotatable, AnnotationValue};
use crate::expr::Expr;
use crate::javadoc::DocComment;
use crate::registry::CodeModel;
use crate::var::Var;
use codemodel_core::names::is_java_identifier;
use codemodel_core::{
    AnnotationId, BlockId, ClassId, Error, MethodId, ModKind, Mods, Result, TypeId, VarId,
};

/// A method or constructor declaration.
#[derive(Debug, Clone)]
pub struct Method {
    pub(crate) owner: ClassId,
    pub(crate) name: String,
    pub(crate) mods: Mods,
    pub(crate) ret: Option<TypeId>,
    pub(crate) params: Vec<VarId>,
    pub(crate) var_param: Option<VarId>,
    pub(crate) throws: Vec<TypeId>,
    pub(crate) body: Option<BlockId>,
    pub(crate) default_value: Option<AnnotationValue>,
    pub(crate) type_params: Vec<TypeId>,
    pub(crate) javadoc: Option<DocComment>,
    pub(crate) annotations: Vec<AnnotationId>,
}

impl Method {
    pub(crate) fn new(owner: ClassId, mods: Mods, ret: Option<TypeId>, name: &str) -> Self {
        Self {
            owner,
            name: name.to_string(),
            mods,
            ret,
            params: Vec::new(),
            var_param: None,
            throws: Vec::new(),
            body: None,
            default_value: None,
            type_params: Vec::new(),
            javadoc: None,
            annotations: Vec::new(),
        }
    }

    /// Declaring class.
    #[must_use]
    pub fn owner(&self) -> ClassId {
        self.owner
    }

    /// Method name; the class name for constructors.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modifiers.
    #[must_use]
    pub fn mods(&self) -> Mods {
        self.mods
    }

    /// Return type; `None` for constructors.
    #[must_use]
    pub fn return_type(&self) -> Option<TypeId> {
        self.ret
    }

    /// True for constructors.
    #[must_use]
    pub fn is_constructor(&self) -> bool {
        self.ret.is_none()
    }

    /// Positional parameters.
    #[must_use]
    pub fn params(&self) -> &[VarId] {
        &self.params
    }

    /// Trailing var-arg parameter; its type is the array type.
    #[must_use]
    pub fn var_param(&self) -> Option<VarId> {
        self.var_param
    }

    /// Declared exceptions, ordered by name.
    #[must_use]
    pub fn throws(&self) -> &[TypeId] {
        &self.throws
    }

    /// Body, if one was requested.
    #[must_use]
    pub fn body(&self) -> Option<BlockId> {
        self.body
    }

    /// Default value of an annotation type member.
    #[must_use]
    pub fn default_value(&self) -> Option<&AnnotationValue> {
        self.default_value.as_ref()
    }

    /// Declared type variables.
    #[must_use]
    pub fn type_params(&self) -> &[TypeId] {
        &self.type_params
    }

    /// Javadoc.
    #[must_use]
    pub fn javadoc(&self) -> Option<&DocComment> {
        self.javadoc.as_ref()
    }

    /// Annotations in order.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationId] {
        &self.annotations
    }
}

/// Mutable view of a method.
pub struct MethodMut<'a> {
    model: &'a mut CodeModel,
    id: MethodId,
}

impl<'a> MethodMut<'a> {
    pub(crate) fn new(model: &'a mut CodeModel, id: MethodId) -> Self {
        Self { model, id }
    }

    fn method(&mut self) -> &mut Method {
        &mut self.model.methods[self.id.index()]
    }

    /// Handle of the method.
    #[must_use]
    pub fn id(&self) -> MethodId {
        self.id
    }

    fn new_param(&mut self, mods: Mods, ty: TypeId, name: &str) -> Result<VarId> {
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        let mods = mods.check(ModKind::Var)?;
        Ok(self.model.push_var(Var::new(mods, ty, name, None)))
    }

    /// Appends a positional parameter.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn param(&mut self, mods: Mods, ty: TypeId, name: &str) -> Result<VarId> {
        let var = self.new_param(mods, ty, name)?;
        self.method().params.push(var);
        Ok(var)
    }

    /// Adds the trailing var-arg parameter; `ty` is the element type.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateVarArgs`] if the method already has one.
    pub fn var_param(&mut self, mods: Mods, ty: TypeId, name: &str) -> Result<VarId> {
        if self.method().var_param.is_some() {
            return Err(Error::DuplicateVarArgs {
                method: self.method().name.clone(),
            });
        }
        let array = self.model.array(ty);
        let var = self.new_param(mods, array, name)?;
        self.method().var_param = Some(var);
        Ok(var)
    }

    /// Declares a thrown exception; the list stays ordered by name.
    pub fn throws(&mut self, exception: TypeId) -> &mut Self {
        let model = &*self.model;
        let throws = &model.methods[self.id.index()].throws;
        if let Err(index) =
            throws.binary_search_by(|entry| model.full_name(*entry).cmp(&model.full_name(exception)))
        {
            self.method().throws.insert(index, exception);
        }
        self
    }

    /// Method body, created on first use.
    pub fn body(&mut self) -> BlockId {
        if let Some(body) = self.method().body {
            return body;
        }
        let body = self.model.new_block(true, true);
        self.method().body = Some(body);
        body
    }

    /// Sets the default value of an annotation type member.
    pub fn default_value(&mut self, value: impl Into<Expr>) -> &mut Self {
        self.method().default_value = Some(AnnotationValue::Expr(value.into()));
        self
    }

    /// Sets a class literal as the default value of an annotation type member.
    pub fn default_type(&mut self, ty: TypeId) -> &mut Self {
        self.method().default_value = Some(AnnotationValue::Type(ty));
        self
    }

    /// Declares a type parameter.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name.
    pub fn generify(&mut self, name: &str) -> Result<TypeId> {
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        let var = self.model.new_type_var(name);
        self.method().type_params.push(var);
        Ok(var)
    }

    /// Declares a bounded type parameter.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name.
    pub fn generify_bounded(&mut self, name: &str, bound: TypeId) -> Result<TypeId> {
        let var = self.generify(name)?;
        self.model.bind_bound(var, bound)?;
        Ok(var)
    }

    /// Replaces the return type; ignored for constructors.
    pub fn set_return_type(&mut self, ty: TypeId) -> &mut Self {
        let method = self.method();
        if method.ret.is_some() {
            method.ret = Some(ty);
        }
        self
    }

    /// Replaces the modifiers.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn set_mods(&mut self, mods: Mods) -> Result<&mut Self> {
        self.method().mods = mods.check(ModKind::Method)?;
        Ok(self)
    }

    /// Javadoc, created on first use.
    pub fn javadoc(&mut self) -> &mut DocComment {
        self.method().javadoc.get_or_insert_with(DocComment::default)
    }

    /// Adds an annotation.
    ///
    /// # Errors
    /// Propagates failures of [`CodeModel::annotate`].
    pub fn annotate(&mut self, ty: TypeId) -> Result<AnnotationId> {
        self.model.annotate(Annotatable::Method(self.id), ty)
    }
}

impl CodeModel {
    pub(crate) fn push_method(&mut self, method: Method) -> MethodId {
        let id = MethodId::next(self.methods.len());
        self.methods.push(method);
        id
    }

    /// Returns a method.
    #[must_use]
    pub fn method(&self, id: MethodId) -> &Method {
        &self.methods[id.index()]
    }

    /// Mutable view of a method.
    pub fn method_mut(&mut self, id: MethodId) -> MethodMut<'_> {
        MethodMut::new(self, id)
    }

    /// Parameter types of a method in order, excluding the var-arg.
    #[must_use]
    pub fn param_types(&self, id: MethodId) -> Vec<TypeId> {
        self.methods[id.index()]
            .params
            .iter()
            .map(|p| self.vars[p.index()].ty)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassKind;

    fn method(cm: &mut CodeModel) -> MethodId {
        let class = cm.new_class("a.Test", ClassKind::Class).expect("class");
        cm.class_mut(class)
            .method(Mods::PUBLIC, TypeId::VOID, "run")
            .expect("method")
    }

    #[test]
    fn test_var_param_is_array_and_unique() {
        let mut cm = CodeModel::new();
        let m = method(&mut cm);
        let string = cm.ref_name("java.lang.String");
        let args = cm
            .method_mut(m)
            .var_param(Mods::NONE, string, "args")
            .expect("varargs");
        assert_eq!(cm.element_type(cm.var(args).ty()), Some(string));

        let err = cm
            .method_mut(m)
            .var_param(Mods::NONE, TypeId::INT, "more")
            .expect_err("second varargs");
        assert!(matches!(err, Error::DuplicateVarArgs { .. }));
        assert!(cm.param_types(m).is_empty());
    }

    #[test]
    fn test_throws_sorted_and_unique() {
        let mut cm = CodeModel::new();
        let m = method(&mut cm);
        let io = cm.ref_name("java.io.IOException");
        let interrupted = cm.ref_name("java.lang.InterruptedException");
        cm.method_mut(m)
            .throws(interrupted)
            .throws(io)
            .throws(interrupted);
        assert_eq!(cm.method(m).throws(), &[io, interrupted]);
    }

    #[test]
    fn test_lazy_body() {
        let mut cm = CodeModel::new();
        let m = method(&mut cm);
        assert!(cm.method(m).body().is_none());
        let body = cm.method_mut(m).body();
        assert_eq!(cm.method_mut(m).body(), body);
        assert_eq!(cm.method(m).body(), Some(body));
    }

    #[test]
    fn test_param_modifiers() {
        let mut cm = CodeModel::new();
        let m = method(&mut cm);
        assert!(cm.method_mut(m).param(Mods::FINAL, TypeId::INT, "x").is_ok());
        assert!(
            cm.method_mut(m)
                .param(Mods::PUBLIC, TypeId::INT, "y")
                .is_err()
        );
        assert_eq!(cm.param_types(m), vec![TypeId::INT]);
    }

    #[test]
    fn test_constructor_return_type_is_fixed() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("a.Test", ClassKind::Class).expect("class");
        let ctor = cm.class_mut(class).constructor(Mods::PUBLIC).expect("ctor");
        cm.method_mut(ctor).set_return_type(TypeId::INT);
        assert!(cm.method(ctor).is_constructor());
        assert_eq!(cm.method(ctor).name(), "Test");
    }
}
