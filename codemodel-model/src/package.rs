//! Packages.

use crate::annotation::Annotatable;
use crate::class::Container;
use crate::javadoc::DocComment;
use crate::registry::CodeModel;
use crate::resource::ResourceFile;
use crate::types::ClassKind;
use codemodel_core::{AnnotationId, ClassId, Error, Mods, PackageId, Result, TypeId};
use std::collections::{BTreeMap, HashMap};

/// A package: its classes, resource files and package-level metadata.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    pub(crate) classes: BTreeMap<String, ClassId>,
    pub(crate) upper_case: Option<HashMap<String, ClassId>>,
    pub(crate) resources: Vec<ResourceFile>,
    pub(crate) annotations: Vec<AnnotationId>,
    pub(crate) javadoc: Option<DocComment>,
}

impl Package {
    pub(crate) fn new(name: String, case_sensitive: bool) -> Self {
        Self {
            name,
            classes: BTreeMap::new(),
            upper_case: (!case_sensitive).then(HashMap::new),
            resources: Vec::new(),
            annotations: Vec::new(),
            javadoc: None,
        }
    }

    /// Dotted name; empty for the unnamed package.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True for the unnamed package.
    #[must_use]
    pub fn is_unnamed(&self) -> bool {
        self.name.is_empty()
    }

    /// Top-level class by simple name.
    #[must_use]
    pub fn get_class(&self, name: &str) -> Option<ClassId> {
        self.classes.get(name).copied()
    }

    /// Top-level classes in name order.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes.values().copied()
    }

    /// Resource files in insertion order.
    #[must_use]
    pub fn resources(&self) -> &[ResourceFile] {
        &self.resources
    }

    /// Whether a resource with this file name exists.
    #[must_use]
    pub fn has_resource(&self, name: &str) -> bool {
        self.resources.iter().any(|r| r.name() == name)
    }

    /// Package annotations.
    #[must_use]
    pub fn annotations(&self) -> &[AnnotationId] {
        &self.annotations
    }

    /// Package javadoc.
    #[must_use]
    pub fn javadoc(&self) -> Option<&DocComment> {
        self.javadoc.as_ref()
    }

    /// Whether a `package-info` file is needed.
    #[must_use]
    pub fn has_package_info(&self) -> bool {
        self.javadoc.is_some() || !self.annotations.is_empty()
    }

    /// Files a build writes for this package.
    #[must_use]
    pub fn count_artifacts(&self, model: &CodeModel) -> usize {
        let classes = self
            .classes()
            .filter(|class| !model.class(*class).is_hidden())
            .count();
        classes + usize::from(self.has_package_info()) + self.resources.len()
    }
}

/// Mutable view of a package.
pub struct PackageMut<'a> {
    model: &'a mut CodeModel,
    id: PackageId,
}

impl<'a> PackageMut<'a> {
    pub(crate) fn new(model: &'a mut CodeModel, id: PackageId) -> Self {
        Self { model, id }
    }

    fn package(&mut self) -> &mut Package {
        &mut self.model.packages[self.id.index()]
    }

    /// Handle of the package.
    #[must_use]
    pub fn id(&self) -> PackageId {
        self.id
    }

    /// Declares a top-level class.
    ///
    /// # Errors
    /// Returns [`Error::ClassAlreadyExists`] if the name is taken,
    /// [`Error::InvalidIdentifier`] for an illegal name and
    /// [`Error::InvalidModifiers`] for illegal modifiers.
    pub fn class(&mut self, mods: Mods, name: &str, kind: ClassKind) -> Result<ClassId> {
        self.model
            .create_class(Container::Package(self.id), mods, name, kind)
    }

    /// Removes a top-level class.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if the class is not a member of
    /// this package.
    pub fn remove_class(&mut self, class: ClassId) -> Result<()> {
        let name = self.model.classes[class.index()].name.clone();
        let package = self.package();
        if package.classes.get(&name) != Some(&class) {
            return Err(Error::invalid_operation(format!(
                "class '{name}' is not declared in package '{}'",
                package.name
            )));
        }
        package.classes.remove(&name);
        if let Some(upper) = package.upper_case.as_mut() {
            upper.remove(&name.to_uppercase());
        }
        Ok(())
    }

    /// Adds a resource file.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateDeclaration`] if a resource with the same
    /// file name exists.
    pub fn add_resource(&mut self, resource: ResourceFile) -> Result<&mut Self> {
        if self.package().has_resource(resource.name()) {
            return Err(Error::duplicate("resource", resource.name()));
        }
        self.package().resources.push(resource);
        Ok(self)
    }

    /// Removes a resource file by name, returning it.
    pub fn remove_resource(&mut self, name: &str) -> Option<ResourceFile> {
        let resources = &mut self.package().resources;
        let index = resources.iter().position(|r| r.name() == name)?;
        Some(resources.remove(index))
    }

    /// Package javadoc, created on first use.
    pub fn javadoc(&mut self) -> &mut DocComment {
        self.package().javadoc.get_or_insert_with(DocComment::default)
    }

    /// Annotates the package.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] for the unnamed package.
    pub fn annotate(&mut self, ty: TypeId) -> Result<AnnotationId> {
        self.model.annotate(Annotatable::Package(self.id), ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;

    #[test]
    fn test_classes_in_name_order() {
        let mut cm = CodeModel::new();
        let package = cm.package("com.acme").expect("package");
        let b = cm
            .package_mut(package)
            .class(Mods::PUBLIC, "Beta", ClassKind::Class)
            .expect("Beta");
        let a = cm
            .package_mut(package)
            .class(Mods::PUBLIC, "Alpha", ClassKind::Class)
            .expect("Alpha");
        let order: Vec<ClassId> = cm.get_package(package).classes().collect();
        assert_eq!(order, vec![a, b]);
    }

    #[test]
    fn test_case_insensitive_collision() {
        let config = ModelConfig::new().case_sensitive(false);
        let mut cm = CodeModel::with_config(config);
        let package = cm.package("com.acme").expect("package");
        let first = cm
            .package_mut(package)
            .class(Mods::PUBLIC, "Widget", ClassKind::Class)
            .expect("Widget");
        let err = cm
            .package_mut(package)
            .class(Mods::PUBLIC, "WIDGET", ClassKind::Class)
            .expect_err("shadowed");
        assert_eq!(err.existing_class(), Some(first));
    }

    #[test]
    fn test_case_sensitive_allows_both() {
        let config = ModelConfig::new().case_sensitive(true);
        let mut cm = CodeModel::with_config(config);
        let package = cm.package("com.acme").expect("package");
        let mut view = cm.package_mut(package);
        assert!(view.class(Mods::PUBLIC, "Widget", ClassKind::Class).is_ok());
        assert!(view.class(Mods::PUBLIC, "WIDGET", ClassKind::Class).is_ok());
    }

    #[test]
    fn test_remove_class_keeps_shadow_index_consistent() {
        let config = ModelConfig::new().case_sensitive(false);
        let mut cm = CodeModel::with_config(config);
        let package = cm.package("com.acme").expect("package");
        let widget = cm
            .package_mut(package)
            .class(Mods::PUBLIC, "Widget", ClassKind::Class)
            .expect("Widget");
        cm.package_mut(package).remove_class(widget).expect("remove");
        assert!(cm.get_package(package).get_class("Widget").is_none());
        assert!(
            cm.package_mut(package)
                .class(Mods::PUBLIC, "WIDGET", ClassKind::Class)
                .is_ok()
        );
        assert!(cm.package_mut(package).remove_class(widget).is_err());
    }

    #[test]
    fn test_resources_and_artifacts() {
        let mut cm = CodeModel::new();
        let package = cm.package("com.acme").expect("package");
        cm.package_mut(package)
            .add_resource(ResourceFile::text("notes.txt", "hi"))
            .expect("resource");
        assert!(
            cm.package_mut(package)
                .add_resource(ResourceFile::text("notes.txt", "again"))
                .is_err()
        );
        cm.package_mut(package)
            .class(Mods::PUBLIC, "Widget", ClassKind::Class)
            .expect("Widget");
        cm.package_mut(package).javadoc().append("Widgets.");
        assert_eq!(cm.count_artifacts(), 3);

        assert!(cm.package_mut(package).remove_resource("notes.txt").is_some());
        assert_eq!(cm.count_artifacts(), 2);
    }
}
