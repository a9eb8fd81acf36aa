//! Catalog of externally defined types.
//!
//! The model never introspects a runtime. Classes that generated code refers
//! to but does not define are described up front by a [`TypeCatalog`]:
//! name, kind, supertypes, type parameters and enclosing class. The default
//! catalog covers the commonly used part of the JDK.

use crate::types::{ClassKind, PrimitiveKind};
use std::collections::HashMap;

/// Description of one external class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    /// Canonical name, nested classes joined with `.`.
    pub name: String,
    /// Declaration kind.
    pub kind: ClassKind,
    /// Whether the class is abstract.
    pub is_abstract: bool,
    /// Fully qualified superclass name.
    pub superclass: Option<String>,
    /// Fully qualified names of the implemented interfaces.
    pub interfaces: Vec<String>,
    /// Names of the declared type variables.
    pub type_params: Vec<String>,
    /// Fully qualified name of the enclosing class.
    pub outer: Option<String>,
}

impl ClassInfo {
    /// Describes a concrete class extending `Object`.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            is_abstract: false,
            superclass: Some("java.lang.Object".to_string()),
            interfaces: Vec::new(),
            type_params: Vec::new(),
            outer: None,
        }
    }

    /// Describes an interface.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Interface,
            superclass: None,
            ..Self::class(name)
        }
    }

    /// Describes an annotation type.
    #[must_use]
    pub fn annotation(name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Annotation,
            superclass: None,
            interfaces: vec!["java.lang.annotation.Annotation".to_string()],
            ..Self::class(name)
        }
    }

    /// Describes an enum.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            kind: ClassKind::Enum,
            superclass: Some("java.lang.Enum".to_string()),
            ..Self::class(name)
        }
    }

    /// Sets the superclass.
    #[must_use]
    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Adds an implemented (or, for interfaces, extended) interface.
    #[must_use]
    pub fn implements(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Adds a type parameter.
    #[must_use]
    pub fn type_param(mut self, name: impl Into<String>) -> Self {
        self.type_params.push(name.into());
        self
    }

    /// Marks the class abstract.
    #[must_use]
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Sets the enclosing class.
    #[must_use]
    pub fn nested_in(mut self, outer: impl Into<String>) -> Self {
        self.outer = Some(outer.into());
        self
    }
}

/// Handle to an external type, resolved through the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExternalType {
    /// A class by fully qualified name; `$` separates nested classes.
    Class(String),
    /// Array of the component.
    Array(Box<ExternalType>),
    /// A primitive.
    Primitive(PrimitiveKind),
}

impl ExternalType {
    /// Class handle.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class(name.into())
    }

    /// Array handle.
    #[must_use]
    pub fn array(component: ExternalType) -> Self {
        Self::Array(Box::new(component))
    }
}

/// Lookup table of external classes.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    classes: HashMap<String, ClassInfo>,
}

impl TypeCatalog {
    /// Creates an empty catalog.
    ///
    /// `java.lang.Object` is always available to the model even when it is
    /// missing here.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a catalog preloaded with common JDK classes.
    #[must_use]
    pub fn jdk() -> Self {
        let mut catalog = Self::empty();
        for info in jdk_classes() {
            catalog.register(info);
        }
        catalog
    }

    /// Adds or replaces a class description.
    pub fn register(&mut self, info: ClassInfo) {
        self.classes.insert(info.name.clone(), info);
    }

    /// Looks up a class; binary names with `$` are accepted.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ClassInfo> {
        if name.contains('$') {
            self.classes.get(&name.replace('$', "."))
        } else {
            self.classes.get(name)
        }
    }

    /// Whether a class is known.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of known classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True if the catalog knows no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

fn jdk_classes() -> Vec<ClassInfo> {
    const COMPARABLE: &str = "java.lang.Comparable";
    const SERIALIZABLE: &str = "java.io.Serializable";
    const COLLECTION: &str = "java.util.Collection";

    let number = |name: &str| {
        ClassInfo::class(name)
            .extends("java.lang.Number")
            .implements(COMPARABLE)
    };

    vec![
        // java.lang
        ClassInfo {
            superclass: None,
            ..ClassInfo::class("java.lang.Object")
        },
        ClassInfo::class("java.lang.String")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE)
            .implements("java.lang.CharSequence"),
        ClassInfo::interface("java.lang.CharSequence"),
        ClassInfo::interface(COMPARABLE).type_param("T"),
        ClassInfo::interface("java.lang.Iterable").type_param("T"),
        ClassInfo::interface("java.lang.Runnable"),
        ClassInfo::interface("java.lang.AutoCloseable"),
        ClassInfo::interface("java.lang.Cloneable"),
        ClassInfo::class("java.lang.Number")
            .abstract_class()
            .implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Boolean")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE),
        ClassInfo::class("java.lang.Character")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE),
        number("java.lang.Byte"),
        number("java.lang.Short"),
        number("java.lang.Integer"),
        number("java.lang.Long"),
        number("java.lang.Float"),
        number("java.lang.Double"),
        ClassInfo::class("java.lang.Void"),
        ClassInfo::class("java.lang.Enum")
            .abstract_class()
            .type_param("E")
            .implements(COMPARABLE)
            .implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Class")
            .type_param("T")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Throwable").implements(SERIALIZABLE),
        ClassInfo::class("java.lang.Exception").extends("java.lang.Throwable"),
        ClassInfo::class("java.lang.RuntimeException").extends("java.lang.Exception"),
        ClassInfo::class("java.lang.Error").extends("java.lang.Throwable"),
        ClassInfo::class("java.lang.IllegalArgumentException")
            .extends("java.lang.RuntimeException"),
        ClassInfo::class("java.lang.IllegalStateException")
            .extends("java.lang.RuntimeException"),
        ClassInfo::class("java.lang.NullPointerException").extends("java.lang.RuntimeException"),
        ClassInfo::class("java.lang.UnsupportedOperationException")
            .extends("java.lang.RuntimeException"),
        ClassInfo::annotation("java.lang.Override"),
        ClassInfo::annotation("java.lang.Deprecated"),
        ClassInfo::annotation("java.lang.SuppressWarnings"),
        ClassInfo::annotation("java.lang.FunctionalInterface"),
        ClassInfo::class("java.lang.StringBuilder")
            .implements(SERIALIZABLE)
            .implements("java.lang.CharSequence"),
        ClassInfo::class("java.lang.Math"),
        ClassInfo::class("java.lang.System"),
        ClassInfo::class("java.lang.Thread").implements("java.lang.Runnable"),
        // java.io
        ClassInfo::interface(SERIALIZABLE),
        ClassInfo::class("java.io.IOException").extends("java.lang.Exception"),
        ClassInfo::interface("java.io.Closeable").implements("java.lang.AutoCloseable"),
        // java.util
        ClassInfo::interface(COLLECTION)
            .type_param("E")
            .implements("java.lang.Iterable"),
        ClassInfo::interface("java.util.List")
            .type_param("E")
            .implements(COLLECTION),
        ClassInfo::interface("java.util.Set")
            .type_param("E")
            .implements(COLLECTION),
        ClassInfo::interface("java.util.Map")
            .type_param("K")
            .type_param("V"),
        ClassInfo::interface("java.util.Map.Entry")
            .type_param("K")
            .type_param("V")
            .nested_in("java.util.Map"),
        ClassInfo::interface("java.util.Iterator").type_param("E"),
        ClassInfo::class("java.util.AbstractCollection")
            .abstract_class()
            .type_param("E")
            .implements(COLLECTION),
        ClassInfo::class("java.util.AbstractList")
            .abstract_class()
            .type_param("E")
            .extends("java.util.AbstractCollection")
            .implements("java.util.List"),
        ClassInfo::class("java.util.ArrayList")
            .type_param("E")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.LinkedList")
            .type_param("E")
            .extends("java.util.AbstractList")
            .implements("java.util.List")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.HashMap")
            .type_param("K")
            .type_param("V")
            .implements("java.util.Map")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.LinkedHashMap")
            .type_param("K")
            .type_param("V")
            .extends("java.util.HashMap")
            .implements("java.util.Map"),
        ClassInfo::class("java.util.TreeMap")
            .type_param("K")
            .type_param("V")
            .implements("java.util.Map")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.HashSet")
            .type_param("E")
            .extends("java.util.AbstractCollection")
            .implements("java.util.Set")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.LinkedHashSet")
            .type_param("E")
            .extends("java.util.HashSet")
            .implements("java.util.Set"),
        ClassInfo::class("java.util.TreeSet")
            .type_param("E")
            .extends("java.util.AbstractCollection")
            .implements("java.util.Set")
            .implements(SERIALIZABLE),
        ClassInfo::class("java.util.Collections"),
        ClassInfo::class("java.util.Arrays"),
        ClassInfo::class("java.util.Objects"),
        ClassInfo::class("java.util.Optional").type_param("T"),
        ClassInfo::class("java.util.Date")
            .implements(SERIALIZABLE)
            .implements(COMPARABLE),
        // java.lang.annotation
        ClassInfo::interface("java.lang.annotation.Annotation"),
        ClassInfo::annotation("java.lang.annotation.Retention"),
        ClassInfo::enumeration("java.lang.annotation.RetentionPolicy"),
        ClassInfo::annotation("java.lang.annotation.Target"),
        ClassInfo::enumeration("java.lang.annotation.ElementType"),
        ClassInfo::annotation("java.lang.annotation.Documented"),
        ClassInfo::annotation("java.lang.annotation.Inherited"),
    ]
}
