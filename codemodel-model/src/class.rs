//! Classes defined in the model.
//!
//! A [`DefinedClass`] is created through [`PackageMut::class`] or
//! [`ClassMut::nested`] and edited through a [`ClassMut`] view.
//!
//! [`PackageMut::class`]: crate::package::PackageMut::class

use crate::annotation::Annotatable;
use crate::expr::Expr;
use crate::javadoc::DocComment;
use crate::method::Method;
use crate::registry::CodeModel;
use crate::types::{ClassKind, TypeKind};
use crate::var::Var;
use codemodel_core::names::is_java_identifier;
use codemodel_core::{
    AnnotationId, BlockId, ClassId, Error, MethodId, ModKind, Mods, PackageId, Result, TypeId,
    VarId,
};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// Where a class is declared.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Container {
    /// Top level in a package.
    Package(PackageId),
    /// Nested in a class.
    Class(ClassId),
}

/// A constant of an enum class.
#[derive(Debug, Clone, Default)]
pub struct EnumConstant {
    pub(crate) args: Vec<Expr>,
    pub(crate) javadoc: Option<DocComment>,
    pub(crate) annotations: Vec<AnnotationId>,
}

impl EnumConstant {
    /// Constructor arguments.
    #[must_use]
    pub fn args(&self) -> &[Expr] {
        &self.args
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

/// A class, interface, annotation type or enum declared in the model.
#[derive(Debug, Clone)]
pub struct DefinedClass {
    pub(crate) ty: TypeId,
    pub(crate) name: String,
    pub(crate) kind: ClassKind,
    pub(crate) mods: Mods,
    pub(crate) package: PackageId,
    pub(crate) outer: Option<ClassId>,
    pub(crate) superclass: Option<TypeId>,
    pub(crate) interfaces: Vec<TypeId>,
    pub(crate) fields: IndexMap<String, VarId>,
    pub(crate) constructors: Vec<MethodId>,
    pub(crate) methods: Vec<MethodId>,
    pub(crate) classes: BTreeMap<String, ClassId>,
    pub(crate) upper_case: Option<HashMap<String, ClassId>>,
    pub(crate) init: Option<BlockId>,
    pub(crate) instance_init: Option<BlockId>,
    pub(crate) javadoc: Option<DocComment>,
    pub(crate) annotations: Vec<AnnotationId>,
    pub(crate) enum_constants: IndexMap<String, EnumConstant>,
    pub(crate) type_params: Vec<TypeId>,
    pub(crate) hidden: bool,
    pub(crate) direct: Option<String>,
    pub(crate) anonymous_base: Option<TypeId>,
}

impl DefinedClass {
    fn new(
        ty: TypeId,
        name: &str,
        kind: ClassKind,
        mods: Mods,
        package: PackageId,
        outer: Option<ClassId>,
        case_sensitive: bool,
    ) -> Self {
        Self {
            ty,
            name: name.to_string(),
            kind,
            mods,
            package,
            outer,
            superclass: None,
            interfaces: Vec::new(),
            fields: IndexMap::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            classes: BTreeMap::new(),
            upper_case: (!case_sensitive).then(HashMap::new),
            init: None,
            instance_init: None,
            javadoc: None,
            annotations: Vec::new(),
            enum_constants: IndexMap::new(),
            type_params: Vec::new(),
            hidden: false,
            direct: None,
            anonymous_base: None,
        }
    }

    /// Simple name; empty for anonymous classes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declaration kind.
    #[must_use]
    pub fn kind(&self) -> ClassKind {
        self.kind
    }

    /// Modifiers.
    #[must_use]
    pub fn mods(&self) -> Mods {
        self.mods
    }

    /// Type handle of the class.
    #[must_use]
    pub fn ty(&self) -> TypeId {
        self.ty
    }

    /// Package the class belongs to.
    #[must_use]
    pub fn package(&self) -> PackageId {
        self.package
    }

    /// Enclosing class of a nested class.
    #[must_use]
    pub fn outer(&self) -> Option<ClassId> {
        self.outer
    }

    /// Explicit superclass.
    #[must_use]
    pub fn superclass(&self) -> Option<TypeId> {
        self.superclass
    }

    /// Implemented interfaces, ordered by name.
    #[must_use]
    pub fn interfaces(&self) -> &[TypeId] {
        &self.interfaces
    }

    /// Fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, VarId> {
        &self.fields
    }

    /// Field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<VarId> {
        self.fields.get(name).copied()
    }

    /// Constructors in declaration order.
    #[must_use]
    pub fn constructors(&self) -> &[MethodId] {
        &self.constructors
    }

    /// Methods in declaration order.
    #[must_use]
    pub fn methods(&self) -> &[MethodId] {
        &self.methods
    }

    /// Nested classes in name order.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes.values().copied()
    }

    /// Nested class by simple name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<ClassId> {
        self.classes.get(name).copied()
    }

    /// Static initializer.
    #[must_use]
    pub fn init(&self) -> Option<BlockId> {
        self.init
    }

    /// Instance initializer.
    #[must_use]
    pub fn instance_init(&self) -> Option<BlockId> {
        self.instance_init
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

    /// Enum constants in insertion order.
    #[must_use]
    pub fn enum_constants(&self) -> &IndexMap<String, EnumConstant> {
        &self.enum_constants
    }

    /// Declared type variables.
    #[must_use]
    pub fn type_params(&self) -> &[TypeId] {
        &self.type_params
    }

    /// Whether the build skips this class.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Verbatim source appended to the body.
    #[must_use]
    pub fn direct(&self) -> Option<&str> {
        self.direct.as_deref()
    }

    /// Base type of an anonymous class.
    #[must_use]
    pub fn anonymous_base(&self) -> Option<TypeId> {
        self.anonymous_base
    }

    /// True for anonymous classes.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.anonymous_base.is_some()
    }
}

impl CodeModel {
    /// Declares a class in a package or an outer class.
    pub(crate) fn create_class(
        &mut self,
        container: Container,
        mods: Mods,
        name: &str,
        kind: ClassKind,
    ) -> Result<ClassId> {
        if name.trim().is_empty() || !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        let mod_kind = if kind.is_interface() {
            ModKind::Interface
        } else {
            ModKind::Class
        };
        let mods = mods.check(mod_kind)?;

        let (names, upper_case) = match container {
            Container::Package(p) => {
                let package = &self.packages[p.index()];
                (&package.classes, &package.upper_case)
            }
            Container::Class(c) => {
                let outer = &self.classes[c.index()];
                (&outer.classes, &outer.upper_case)
            }
        };
        let existing = names.get(name).copied().or_else(|| {
            upper_case
                .as_ref()
                .and_then(|upper| upper.get(&name.to_uppercase()).copied())
        });
        if let Some(existing) = existing {
            return Err(Error::ClassAlreadyExists {
                name: name.to_string(),
                existing,
            });
        }

        let (package, outer) = match container {
            Container::Package(p) => (p, None),
            Container::Class(c) => (self.classes[c.index()].package, Some(c)),
        };
        let id = ClassId::next(self.classes.len());
        let ty = self.push_type(TypeKind::Defined(id));
        let case_sensitive = self.config.case_sensitive;
        self.classes.push(DefinedClass::new(
            ty,
            name,
            kind,
            mods,
            package,
            outer,
            case_sensitive,
        ));

        let (names, upper_case) = match container {
            Container::Package(p) => {
                let package = &mut self.packages[p.index()];
                (&mut package.classes, &mut package.upper_case)
            }
            Container::Class(c) => {
                let outer = &mut self.classes[c.index()];
                (&mut outer.classes, &mut outer.upper_case)
            }
        };
        names.insert(name.to_string(), id);
        if let Some(upper) = upper_case.as_mut() {
            upper.insert(name.to_uppercase(), id);
        }

        tracing::debug!("declared {} {} as {:?}", kind.keyword(), name, id);
        Ok(id)
    }

    /// Creates an anonymous class deriving from `base`.
    ///
    /// The class is not registered in any package; it renders inline as the
    /// body of a `new base(..) {..}` invocation.
    pub fn anonymous_class(&mut self, base: TypeId) -> ClassId {
        let id = ClassId::next(self.classes.len());
        let ty = self.push_type(TypeKind::Defined(id));
        let mut class = DefinedClass::new(
            ty,
            "",
            ClassKind::Class,
            Mods::NONE,
            self.root_package(),
            None,
            true,
        );
        class.anonymous_base = Some(base);
        self.classes.push(class);
        id
    }

    /// Returns a class.
    #[must_use]
    pub fn class(&self, id: ClassId) -> &DefinedClass {
        &self.classes[id.index()]
    }

    /// Mutable view of a class.
    pub fn class_mut(&mut self, id: ClassId) -> ClassMut<'_> {
        ClassMut::new(self, id)
    }

    /// Method of `class` named `name` whose parameter types are exactly
    /// `params`.
    #[must_use]
    pub fn get_method(&self, class: ClassId, name: &str, params: &[TypeId]) -> Option<MethodId> {
        self.classes[class.index()]
            .methods
            .iter()
            .copied()
            .find(|m| {
                let method = &self.methods[m.index()];
                method.name == name && self.has_signature(method, params)
            })
    }

    /// Constructor of `class` whose parameter types are exactly `params`.
    #[must_use]
    pub fn get_constructor(&self, class: ClassId, params: &[TypeId]) -> Option<MethodId> {
        self.classes[class.index()]
            .constructors
            .iter()
            .copied()
            .find(|m| self.has_signature(&self.methods[m.index()], params))
    }

    fn has_signature(&self, method: &Method, params: &[TypeId]) -> bool {
        method.params.len() == params.len()
            && method
                .params
                .iter()
                .zip(params)
                .all(|(param, ty)| self.vars[param.index()].ty == *ty)
    }
}

/// Mutable view of a class.
pub struct ClassMut<'a> {
    model: &'a mut CodeModel,
    id: ClassId,
}

impl<'a> ClassMut<'a> {
    pub(crate) fn new(model: &'a mut CodeModel, id: ClassId) -> Self {
        Self { model, id }
    }

    fn class(&mut self) -> &mut DefinedClass {
        &mut self.model.classes[self.id.index()]
    }

    /// Handle of the class.
    #[must_use]
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Type handle of the class.
    #[must_use]
    pub fn ty(&self) -> TypeId {
        self.model.classes[self.id.index()].ty
    }

    /// Sets the superclass.
    ///
    /// On an interface an interface superclass is added to the extended
    /// interfaces instead.
    ///
    /// # Errors
    /// Returns [`Error::IllegalInheritance`] if an interface is given a class,
    /// or if this class encloses the superclass.
    pub fn extends(&mut self, superclass: TypeId) -> Result<&mut Self> {
        let kind = self.class().kind;
        let name = self.class().name.clone();
        if kind.is_interface() {
            if self.model.is_interface(superclass) {
                return Ok(self.implements(superclass));
            }
            return Err(Error::inheritance(format!(
                "interface '{name}' cannot extend class '{}'",
                self.model.full_name(superclass)
            )));
        }

        let own = self.ty();
        let mut outer = self.model.outer(superclass);
        while let Some(o) = outer {
            if o == own {
                return Err(Error::inheritance(format!(
                    "outer class '{name}' may not subclass its inner class '{}'",
                    self.model.name(superclass)
                )));
            }
            outer = self.model.outer(o);
        }

        self.class().superclass = Some(superclass);
        Ok(self)
    }

    /// Adds an implemented interface; the list stays ordered by name.
    pub fn implements(&mut self, interface: TypeId) -> &mut Self {
        let model = &*self.model;
        let interfaces = &model.classes[self.id.index()].interfaces;
        if let Err(index) =
            interfaces.binary_search_by(|entry| model.compare_types(*entry, interface))
        {
            self.class().interfaces.insert(index, interface);
        }
        self
    }

    /// Declares a field.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateDeclaration`] if the name is taken,
    /// [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn field(&mut self, mods: Mods, ty: TypeId, name: &str) -> Result<VarId> {
        self.declare_field(mods, ty, name, None)
    }

    /// Declares a field with an initializer.
    ///
    /// # Errors
    /// As [`ClassMut::field`].
    pub fn field_init(
        &mut self,
        mods: Mods,
        ty: TypeId,
        name: &str,
        init: impl Into<Expr>,
    ) -> Result<VarId> {
        self.declare_field(mods, ty, name, Some(init.into()))
    }

    fn declare_field(
        &mut self,
        mods: Mods,
        ty: TypeId,
        name: &str,
        init: Option<Expr>,
    ) -> Result<VarId> {
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        let mods = mods.check(ModKind::Field)?;
        if let Some(existing) = self.class().fields.get(name) {
            return Err(Error::duplicate_field(name, *existing));
        }
        let mut var = Var::new(mods, ty, name, init);
        var.owner = Some(self.id);
        let id = self.model.push_var(var);
        self.class().fields.insert(name.to_string(), id);
        Ok(id)
    }

    /// Removes a field.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the field is not declared by
    /// this class.
    pub fn remove_field(&mut self, field: VarId) -> Result<()> {
        let name = self.model.vars[field.index()].name.clone();
        if self.class().fields.get(&name) != Some(&field) {
            return Err(Error::invalid_operation(format!(
                "'{name}' is not a field of '{}'",
                self.class().name
            )));
        }
        self.class().fields.shift_remove(&name);
        self.model.vars[field.index()].owner = None;
        Ok(())
    }

    /// Declares a method.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn method(&mut self, mods: Mods, ret: TypeId, name: &str) -> Result<MethodId> {
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        let mods = mods.check(ModKind::Method)?;
        let id = self
            .model
            .push_method(Method::new(self.id, mods, Some(ret), name));
        self.class().methods.push(id);
        Ok(id)
    }

    /// Declares a constructor.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn constructor(&mut self, mods: Mods) -> Result<MethodId> {
        let mods = mods.check(ModKind::Method)?;
        let name = self.class().name.clone();
        let id = self
            .model
            .push_method(Method::new(self.id, mods, None, &name));
        self.class().constructors.push(id);
        Ok(id)
    }

    /// Removes a method or constructor.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if it is not declared by this
    /// class.
    pub fn remove_method(&mut self, method: MethodId) -> Result<()> {
        let class = self.class();
        if let Some(index) = class.methods.iter().position(|m| *m == method) {
            class.methods.remove(index);
        } else if let Some(index) = class.constructors.iter().position(|m| *m == method) {
            class.constructors.remove(index);
        } else {
            return Err(Error::invalid_operation(format!(
                "method is not declared by '{}'",
                class.name
            )));
        }
        Ok(())
    }

    /// Declares a nested class.
    ///
    /// # Errors
    /// As [`PackageMut::class`](crate::package::PackageMut::class).
    pub fn nested(&mut self, mods: Mods, name: &str, kind: ClassKind) -> Result<ClassId> {
        self.model
            .create_class(Container::Class(self.id), mods, name, kind)
    }

    /// Removes a nested class.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the class is not nested in this
    /// class.
    pub fn remove_class(&mut self, nested: ClassId) -> Result<()> {
        let name = self.model.classes[nested.index()].name.clone();
        let class = self.class();
        if class.classes.get(&name) != Some(&nested) {
            return Err(Error::invalid_operation(format!(
                "'{name}' is not nested in '{}'",
                class.name
            )));
        }
        class.classes.remove(&name);
        if let Some(upper) = class.upper_case.as_mut() {
            upper.remove(&name.to_uppercase());
        }
        Ok(())
    }

    /// Static initializer, created on first use.
    pub fn init(&mut self) -> BlockId {
        if let Some(block) = self.class().init {
            return block;
        }
        let block = self.model.new_block(true, true);
        self.class().init = Some(block);
        block
    }

    /// Instance initializer, created on first use.
    pub fn instance_init(&mut self) -> BlockId {
        if let Some(block) = self.class().instance_init {
            return block;
        }
        let block = self.model.new_block(true, true);
        self.class().instance_init = Some(block);
        block
    }

    /// Javadoc, created on first use.
    pub fn javadoc(&mut self) -> &mut DocComment {
        self.class().javadoc.get_or_insert_with(DocComment::default)
    }

    /// Adds an annotation.
    ///
    /// # Errors
    /// Propagates failures of [`CodeModel::annotate`].
    pub fn annotate(&mut self, ty: TypeId) -> Result<AnnotationId> {
        self.model.annotate(Annotatable::Class(self.id), ty)
    }

    /// Enum constant, created on first use.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the class is not an enum and
    /// [`Error::InvalidIdentifier`] for an illegal name.
    pub fn enum_constant(&mut self, name: &str) -> Result<EnumConstantMut<'_>> {
        if self.class().kind != ClassKind::Enum {
            return Err(Error::invalid_operation(format!(
                "'{}' is not an enum",
                self.class().name
            )));
        }
        if !is_java_identifier(name) {
            return Err(Error::invalid_identifier(name));
        }
        self.class()
            .enum_constants
            .entry(name.to_string())
            .or_default();
        Ok(EnumConstantMut {
            model: &mut *self.model,
            class: self.id,
            name: name.to_string(),
        })
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
        self.class().type_params.push(var);
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

    /// Replaces the modifiers.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn set_mods(&mut self, mods: Mods) -> Result<&mut Self> {
        let kind = if self.class().kind.is_interface() {
            ModKind::Interface
        } else {
            ModKind::Class
        };
        self.class().mods = mods.check(kind)?;
        Ok(self)
    }

    /// Excludes the class from the build.
    pub fn hide(&mut self) -> &mut Self {
        self.class().hidden = true;
        self
    }

    /// Appends verbatim source to the class body.
    pub fn direct(&mut self, source: &str) -> &mut Self {
        self.class()
            .direct
            .get_or_insert_with(String::new)
            .push_str(source);
        self
    }
}

/// Mutable view of an enum constant.
pub struct EnumConstantMut<'a> {
    model: &'a mut CodeModel,
    class: ClassId,
    name: String,
}

impl EnumConstantMut<'_> {
    fn constant(&mut self) -> Option<&mut EnumConstant> {
        self.model.classes[self.class.index()]
            .enum_constants
            .get_mut(&self.name)
    }

    /// Appends a constructor argument.
    pub fn arg(&mut self, arg: impl Into<Expr>) -> &mut Self {
        let arg = arg.into();
        if let Some(constant) = self.constant() {
            constant.args.push(arg);
        }
        self
    }

    /// Javadoc, created on first use.
    pub fn javadoc(&mut self) -> Option<&mut DocComment> {
        self.constant()
            .map(|constant| constant.javadoc.get_or_insert_with(DocComment::default))
    }

    /// Adds an annotation.
    ///
    /// # Errors
    /// Propagates failures of [`CodeModel::annotate`].
    pub fn annotate(&mut self, ty: TypeId) -> Result<AnnotationId> {
        self.model
            .annotate(Annotatable::EnumConstant(self.class, self.name.clone()), ty)
    }

    /// Expression referring to the constant.
    #[must_use]
    pub fn reference(&self) -> Expr {
        Expr::static_field(self.model.classes[self.class.index()].ty, self.name.clone())
    }
}
