//! The owning registry.
//!
//! [`CodeModel`] owns every package, class, member, statement and interned
//! type of one generation task. Nodes reference each other through arena
//! handles, so the mutually referential class graph never forms ownership
//! cycles.

use crate::annotation::AnnotationUse;
use crate::block::{Block, Conditional, ForLoop, Switch, TryBlock};
use crate::catalog::ExternalType;
use crate::class::{Container, DefinedClass};
use crate::config::ModelConfig;
use crate::method::Method;
use crate::package::{Package, PackageMut};
use crate::types::{PrimitiveKind, ReferencedClass, TypeData, TypeKind};
use crate::var::Var;
use codemodel_core::names::is_java_package_name;
use codemodel_core::{ClassId, Error, Mods, PackageId, Result, TypeId};
use std::collections::{BTreeMap, HashMap};

/// Registry of a code model.
#[derive(Debug)]
pub struct CodeModel {
    pub(crate) config: ModelConfig,
    pub(crate) types: Vec<TypeData>,
    pub(crate) by_name: HashMap<String, TypeId>,
    pub(crate) narrowings: HashMap<(TypeId, Vec<TypeId>), TypeId>,
    pub(crate) boxed: [TypeId; 9],
    pub(crate) packages: Vec<Package>,
    pub(crate) package_index: BTreeMap<String, PackageId>,
    pub(crate) classes: Vec<DefinedClass>,
    pub(crate) methods: Vec<Method>,
    pub(crate) vars: Vec<Var>,
    pub(crate) blocks: Vec<Block>,
    pub(crate) annotations: Vec<AnnotationUse>,
    pub(crate) conditionals: Vec<Conditional>,
    pub(crate) switches: Vec<Switch>,
    pub(crate) tries: Vec<TryBlock>,
    pub(crate) for_loops: Vec<ForLoop>,
}

impl CodeModel {
    /// Creates an empty model with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ModelConfig::default())
    }

    /// Creates an empty model.
    ///
    /// The primitives, the null type and `java.lang.Object` occupy the
    /// reserved [`TypeId`] slots; the boxed primitive classes are interned
    /// right after.
    #[must_use]
    pub fn with_config(config: ModelConfig) -> Self {
        let mut model = Self {
            config,
            types: Vec::new(),
            by_name: HashMap::new(),
            narrowings: HashMap::new(),
            boxed: [TypeId::OBJECT; 9],
            packages: Vec::new(),
            package_index: BTreeMap::new(),
            classes: Vec::new(),
            methods: Vec::new(),
            vars: Vec::new(),
            blocks: Vec::new(),
            annotations: Vec::new(),
            conditionals: Vec::new(),
            switches: Vec::new(),
            tries: Vec::new(),
            for_loops: Vec::new(),
        };

        for primitive in PrimitiveKind::ALL {
            model.push_type(TypeKind::Primitive(primitive));
        }
        model.push_type(TypeKind::Null);

        let object = model.push_type(TypeKind::Referenced(ReferencedClass {
            full_name: "java.lang.Object".to_string(),
            kind: Default::default(),
            is_abstract: false,
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            outer: None,
        }));
        debug_assert_eq!(object, TypeId::OBJECT);
        model.by_name.insert("java.lang.Object".to_string(), object);

        model.packages.push(Package::new(String::new(), model.config.case_sensitive));
        model
            .package_index
            .insert(String::new(), PackageId::new(0));

        for (i, primitive) in PrimitiveKind::ALL.into_iter().enumerate() {
            model.boxed[i] = model.ref_name(primitive.wrapper_name());
        }

        model
    }

    /// Returns the configuration the model was created with.
    #[must_use]
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Whether class names are compared case sensitively.
    #[must_use]
    pub fn is_case_sensitive(&self) -> bool {
        self.config.case_sensitive
    }

    pub(crate) fn push_type(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId::next(self.types.len());
        self.types.push(TypeData::new(kind));
        id
    }

    /// Interned reference to an external type.
    ///
    /// Array handles recurse into their component and return its array.
    ///
    /// # Errors
    /// Returns [`Error::UnresolvedType`] if a class is not in the catalog.
    pub fn ref_external(&mut self, ty: &ExternalType) -> Result<TypeId> {
        match ty {
            ExternalType::Primitive(p) => Ok(p.type_id()),
            ExternalType::Array(component) => {
                let component = self.ref_external(component)?;
                Ok(self.array(component))
            }
            ExternalType::Class(name) => {
                if let Some(id) = self.by_name.get(name.as_str()) {
                    return Ok(*id);
                }
                self.intern_catalog(name).ok_or_else(|| Error::UnresolvedType {
                    name: name.clone(),
                })
            }
        }
    }

    /// Interned reference to a class by fully qualified name.
    ///
    /// Names unknown to the catalog become direct references whose
    /// superclass is `Object`; this never fails.
    pub fn ref_name(&mut self, name: &str) -> TypeId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        if let Some(id) = self.intern_catalog(name) {
            return id;
        }
        self.direct_class(name)
    }

    /// Interned reference that trusts `name` without consulting the catalog.
    pub fn direct_class(&mut self, name: &str) -> TypeId {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        tracing::debug!("interning direct class reference {}", name);
        let id = self.push_type(TypeKind::Direct(name.to_string()));
        self.by_name.insert(name.to_string(), id);
        id
    }

    fn intern_catalog(&mut self, name: &str) -> Option<TypeId> {
        let info = self.config.catalog.get(name)?.clone();
        if let Some(id) = self.by_name.get(&info.name) {
            return Some(*id);
        }

        let id = self.push_type(TypeKind::Referenced(ReferencedClass {
            full_name: info.name.clone(),
            kind: info.kind,
            is_abstract: info.is_abstract,
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            outer: None,
        }));
        self.by_name.insert(info.name.clone(), id);
        tracing::debug!("interned catalog class {} as {:?}", info.name, id);

        let type_params: Vec<TypeId> = info
            .type_params
            .iter()
            .map(|p| self.new_type_var(p.clone()))
            .collect();
        let superclass = info.superclass.as_deref().map(|s| self.ref_name(s));
        let interfaces: Vec<TypeId> = info.interfaces.iter().map(|i| self.ref_name(i)).collect();
        let outer = info.outer.as_deref().map(|o| self.ref_name(o));

        if let TypeKind::Referenced(class) = &mut self.types[id.index()].kind {
            class.type_params = type_params;
            class.superclass = superclass;
            class.interfaces = interfaces;
            class.outer = outer;
        }
        Some(id)
    }

    /// `? extends Object`, shared by the whole model.
    pub fn wildcard(&mut self) -> TypeId {
        self.wildcard_of(TypeId::OBJECT)
    }

    /// The type of the `null` literal.
    #[must_use]
    pub fn null_type(&self) -> TypeId {
        TypeId::NULL
    }

    /// Gets or creates the package with the given dotted name.
    ///
    /// # Errors
    /// Returns [`Error::InvalidIdentifier`] if a segment of `name` is not an
    /// identifier.
    pub fn package(&mut self, name: &str) -> Result<PackageId> {
        if let Some(id) = self.package_index.get(name) {
            return Ok(*id);
        }
        if !is_java_package_name(name) {
            return Err(Error::invalid_identifier(name));
        }
        let id = PackageId::next(self.packages.len());
        self.packages
            .push(Package::new(name.to_string(), self.config.case_sensitive));
        self.package_index.insert(name.to_string(), id);
        tracing::debug!("created package '{}'", name);
        Ok(id)
    }

    /// The unnamed package.
    #[must_use]
    pub fn root_package(&self) -> PackageId {
        PackageId::new(0)
    }

    /// Looks up an existing package.
    #[must_use]
    pub fn find_package(&self, name: &str) -> Option<PackageId> {
        self.package_index.get(name).copied()
    }

    /// Returns a package.
    #[must_use]
    pub fn get_package(&self, id: PackageId) -> &Package {
        &self.packages[id.index()]
    }

    /// Mutable view of a package.
    pub fn package_mut(&mut self, id: PackageId) -> PackageMut<'_> {
        PackageMut::new(self, id)
    }

    /// All packages in name order.
    pub fn packages(&self) -> impl Iterator<Item = PackageId> + '_ {
        self.package_index.values().copied()
    }

    /// Creates a public top-level class from a fully qualified name.
    ///
    /// # Errors
    /// Returns [`Error::ClassAlreadyExists`] on a name collision and
    /// [`Error::InvalidIdentifier`] for a malformed name.
    pub fn new_class(&mut self, fqn: &str, kind: crate::types::ClassKind) -> Result<ClassId> {
        let (package, name) = match fqn.rsplit_once('.') {
            Some((package, name)) => (self.package(package)?, name),
            None => (self.root_package(), fqn),
        };
        self.create_class(Container::Package(package), Mods::PUBLIC, name, kind)
    }

    /// Looks up a top-level class by fully qualified name.
    #[must_use]
    pub fn get_class(&self, fqn: &str) -> Option<ClassId> {
        let (package, name) = fqn.rsplit_once('.').unwrap_or(("", fqn));
        let package = self.find_package(package)?;
        self.get_package(package).get_class(name)
    }

    /// Total number of files a build writes.
    #[must_use]
    pub fn count_artifacts(&self) -> usize {
        self.packages
            .iter()
            .map(|package| package.count_artifacts(self))
            .sum()
    }
}

impl Default for CodeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ClassKind;

    #[test]
    fn test_reserved_slots() {
        let cm = CodeModel::new();
        assert_eq!(cm.full_name(TypeId::OBJECT), "java.lang.Object");
        assert_eq!(cm.name(TypeId::NULL), "null");
        assert_eq!(cm.name(TypeId::VOID), "void");
    }

    #[test]
    fn test_external_refs_are_interned() {
        let mut cm = CodeModel::new();
        let a = cm.ref_name("java.util.ArrayList");
        let b = cm
            .ref_external(&ExternalType::class("java.util.ArrayList"))
            .expect("catalog class");
        assert_eq!(a, b);

        let list = cm.ref_name("java.util.List");
        assert!(cm.interfaces(a).contains(&list));
    }

    #[test]
    fn test_array_handles_recurse() {
        let mut cm = CodeModel::new();
        let string = cm.ref_name("java.lang.String");
        let nested = ExternalType::array(ExternalType::array(ExternalType::class(
            "java.lang.String",
        )));
        let ty = cm.ref_external(&nested).expect("array");
        let inner = cm.array(string);
        assert_eq!(ty, cm.array(inner));
    }

    #[test]
    fn test_unknown_name_falls_back_to_direct() {
        let mut cm = CodeModel::new();
        let ty = cm.ref_name("com.acme.Widget");
        assert!(matches!(cm.type_kind(ty), TypeKind::Direct(_)));
        assert_eq!(cm.name(ty), "Widget");
        assert_eq!(cm.package_name(ty), "com.acme");
        assert_eq!(cm.superclass(ty), Some(TypeId::OBJECT));
        assert!(cm.interfaces(ty).is_empty());
        assert_eq!(cm.ref_name("com.acme.Widget"), ty);

        let err = cm
            .ref_external(&ExternalType::class("com.acme.Widget2"))
            .expect_err("not in catalog");
        assert!(matches!(err, Error::UnresolvedType { .. }));
    }

    #[test]
    fn test_nested_catalog_class() {
        let mut cm = CodeModel::new();
        let entry = cm.ref_name("java.util.Map$Entry");
        let map = cm.ref_name("java.util.Map");
        assert_eq!(cm.outer(entry), Some(map));
        assert_eq!(cm.full_name(entry), "java.util.Map.Entry");
        assert_eq!(cm.binary_name(entry), "java.util.Map$Entry");
        assert_eq!(cm.package_name(entry), "java.util");
    }

    #[test]
    fn test_wildcard_is_cached() {
        let mut cm = CodeModel::new();
        let a = cm.wildcard();
        let b = cm.wildcard();
        assert_eq!(a, b);
        assert_eq!(cm.name(a), "? extends Object");
    }

    #[test]
    fn test_package_get_or_create() {
        let mut cm = CodeModel::new();
        let a = cm.package("com.acme").expect("package");
        let b = cm.package("com.acme").expect("package");
        assert_eq!(a, b);
        assert_eq!(cm.package("").expect("root"), cm.root_package());
        assert!(cm.package("com.1acme").is_err());
    }

    #[test]
    fn test_new_class_and_lookup() {
        let mut cm = CodeModel::new();
        let class = cm
            .new_class("com.acme.Widget", ClassKind::Class)
            .expect("class");
        assert_eq!(cm.get_class("com.acme.Widget"), Some(class));
        assert_eq!(cm.full_name(cm.class_type(class)), "com.acme.Widget");

        let err = cm
            .new_class("com.acme.Widget", ClassKind::Interface)
            .expect_err("duplicate");
        assert_eq!(err.existing_class(), Some(class));
    }
}
