//! Fields, local variables and parameters.

use crate::annotation::Annotatable;
use crate::expr::Expr;
use crate::javadoc::DocComment;
use crate::registry::CodeModel;
use codemodel_core::names::is_java_identifier;
use codemodel_core::{AnnotationId, ClassId, Error, ModKind, Mods, Result, TypeId, VarId};

/// A variable declaration.
#[derive(Debug, Clone)]
pub struct Var {
    pub(crate) name: String,
    pub(crate) ty: TypeId,
    pub(crate) mods: Mods,
    pub(crate) init: Option<Expr>,
    pub(crate) annotations: Vec<AnnotationId>,
    pub(crate) owner: Option<ClassId>,
    pub(crate) javadoc: Option<DocComment>,
}

impl Var {
    pub(crate) fn new(mods: Mods, ty: TypeId, name: &str, init: Option<Expr>) -> Self {
        Self {
            name: name.to_string(),
            ty,
            mods,
            init,
            annotations: Vec::new(),
            owner: None,
            javadoc: None,
        }
    }

    /// Variable name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type.
    #[must_use]
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Modifiers.
    #[must_use]
    pub fn mods(&self) -> Mods {
        self.mods
    }

    /// Initializer.
    #[must_use]
    pub fn init(&self) -> Option<&Expr> {
        self.init.as_ref()
    }

    /// Annotations in order.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationId] {
        &self.annotations
    }

    /// Declaring class of a field.
    #[must_use]
    pub fn owner(&self) -> Option<ClassId> {
        self.owner
    }

    /// Javadoc of a field.
    #[must_use]
    pub fn javadoc(&self) -> Option<&DocComment> {
        self.javadoc.as_ref()
    }

    /// True for fields.
    #[must_use]
    pub fn is_field(&self) -> bool {
        self.owner.is_some()
    }
}

/// Mutable view of a variable.
pub struct VarMut<'a> {
    model: &'a mut CodeModel,
    id: VarId,
}

impl<'a> VarMut<'a> {
    pub(crate) fn new(model: &'a mut CodeModel, id: VarId) -> Self {
        Self { model, id }
    }

    fn var(&mut self) -> &mut Var {
        &mut self.model.vars[self.id.index()]
    }

    /// Handle of the variable.
    #[must_use]
    pub fn id(&self) -> VarId {
        self.id
    }

    /// Replaces the declared type.
    pub fn set_type(&mut self, ty: TypeId) -> &mut Self {
        self.var().ty = ty;
        self
    }

    /// Sets the initializer.
    pub fn init(&mut self, init: impl Into<Expr>) -> &mut Self {
        self.var().init = Some(init.into());
        self
    }

    /// Replaces the modifiers.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModifiers`] if a modifier is illegal for the
    /// kind of variable.
    pub fn set_mods(&mut self, mods: Mods) -> Result<&mut Self> {
        let kind = if self.var().is_field() {
            ModKind::Field
        } else {
            ModKind::Var
        };
        self.var().mods = mods.check(kind)?;
        Ok(self)
    }

    /// Javadoc of the variable, created on first use.
    pub fn javadoc(&mut self) -> &mut DocComment {
        self.var().javadoc.get_or_insert_with(DocComment::default)
    }

    /// Adds an annotation.
    ///
    /// # Errors
    /// Propagates failures of [`CodeModel::annotate`].
    pub fn annotate(&mut self, ty: TypeId) -> Result<AnnotationId> {
        self.model.annotate(Annotatable::Var(self.id), ty)
    }

    /// Renames the variable.
    ///
    /// A field keeps its position in the owner's field map.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::DuplicateDeclaration`] if the owner already has a field
    /// with that name.
    pub fn rename(&mut self, name: &str) -> Result<&mut Self> {
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        let old = self.var().name.clone();
        if old == name {
            return Ok(self);
        }
        if let Some(owner) = self.var().owner {
            let fields = &mut self.model.classes[owner.index()].fields;
            if let Some(existing) = fields.get(name) {
                return Err(Error::duplicate_field(name, *existing));
            }
            if let Some(index) = fields.get_index_of(old.as_str()) {
                fields.shift_remove_index(index);
                fields.shift_insert(index, name.to_string(), self.id);
            }
        }
        self.var().name = name.to_string();
        Ok(self)
    }
}

impl CodeModel {
    pub(crate) fn push_var(&mut self, var: Var) -> VarId {
        let id = VarId::next(self.vars.len());
        self.vars.push(var);
        id
    }

    /// Returns a variable.
    #[must_use]
    pub fn var(&self, id: VarId) -> &Var {
        &self.vars[id.index()]
    }

    /// Mutable view of a variable.
    pub fn var_mut(&mut self, id: VarId) -> VarMut<'_> {
        VarMut::new(self, id)
    }
}
