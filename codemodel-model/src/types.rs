//! Type system.
//!
//! Every type usable in a declaration is interned in the registry and
//! addressed by a [`TypeId`]. The closed [`TypeKind`] sum covers primitives,
//! classes defined in the model, classes from the type catalog, arrays,
//! generic narrowings, type variables, wildcards, unresolved direct
//! references and the type of `null`.

use crate::registry::CodeModel;
use codemodel_core::{ClassId, Error, Result, TypeId};
use std::cmp::Ordering;

/// The nine primitive types, in reserved [`TypeId`] order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PrimitiveKind {
    /// `void`
    Void,
    /// `boolean`
    Boolean,
    /// `byte`
    Byte,
    /// `short`
    Short,
    /// `char`
    Char,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `long`
    Long,
    /// `double`
    Double,
}

impl PrimitiveKind {
    /// All primitive kinds in handle order.
    pub const ALL: [PrimitiveKind; 9] = [
        Self::Void,
        Self::Boolean,
        Self::Byte,
        Self::Short,
        Self::Char,
        Self::Int,
        Self::Float,
        Self::Long,
        Self::Double,
    ];

    /// Keyword of the primitive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Boolean => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Char => "char",
            Self::Int => "int",
            Self::Float => "float",
            Self::Long => "long",
            Self::Double => "double",
        }
    }

    /// Fully qualified name of the boxed counterpart.
    #[must_use]
    pub const fn wrapper_name(self) -> &'static str {
        match self {
            Self::Void => "java.lang.Void",
            Self::Boolean => "java.lang.Boolean",
            Self::Byte => "java.lang.Byte",
            Self::Short => "java.lang.Short",
            Self::Char => "java.lang.Character",
            Self::Int => "java.lang.Integer",
            Self::Float => "java.lang.Float",
            Self::Long => "java.lang.Long",
            Self::Double => "java.lang.Double",
        }
    }

    /// Reserved handle of the primitive.
    #[must_use]
    pub const fn type_id(self) -> TypeId {
        TypeId::new(self as u32)
    }

    /// Looks up a primitive by keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Looks up a primitive by its reserved handle.
    #[must_use]
    pub fn from_type(ty: TypeId) -> Option<Self> {
        Self::ALL.get(ty.index()).copied()
    }
}

/// Kind of a class declaration.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum ClassKind {
    /// `class`
    #[default]
    Class,
    /// `interface`
    Interface,
    /// `@interface`
    Annotation,
    /// `enum`
    Enum,
}

impl ClassKind {
    /// Declaration keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Annotation => "@interface",
            Self::Enum => "enum",
        }
    }

    /// Interfaces and annotation types.
    #[must_use]
    pub const fn is_interface(self) -> bool {
        matches!(self, Self::Interface | Self::Annotation)
    }
}

/// A class resolved from the type catalog.
#[derive(Debug, Clone)]
pub struct ReferencedClass {
    /// Canonical name, nested classes joined with `.`.
    pub full_name: String,
    /// Declaration kind.
    pub kind: ClassKind,
    /// Whether the class is abstract.
    pub is_abstract: bool,
    /// Direct superclass; `None` for `Object` and interfaces.
    pub superclass: Option<TypeId>,
    /// Directly implemented interfaces.
    pub interfaces: Vec<TypeId>,
    /// Declared type variables.
    pub type_params: Vec<TypeId>,
    /// Enclosing class.
    pub outer: Option<TypeId>,
}

impl ReferencedClass {
    /// Simple name.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        simple_name(&self.full_name)
    }
}

/// A declared type variable.
#[derive(Debug, Clone)]
pub struct TypeVarData {
    /// Variable name.
    pub name: String,
    /// Upper bound, set at most once.
    pub bound: Option<TypeId>,
}

/// Variant payload of an interned type.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A primitive.
    Primitive(PrimitiveKind),
    /// A class declared in this model.
    Defined(ClassId),
    /// A class known to the type catalog.
    Referenced(ReferencedClass),
    /// Array of the component type.
    Array(TypeId),
    /// A generic class with type arguments applied.
    Narrowed {
        /// The generic class.
        basis: TypeId,
        /// Type arguments in order.
        args: Vec<TypeId>,
    },
    /// A type variable.
    TypeVar(TypeVarData),
    /// `? extends bound`.
    Wildcard(TypeId),
    /// A class known only by its fully qualified name.
    Direct(String),
    /// The type of `null`.
    Null,
}

/// Arena slot of an interned type with its lazily populated wrappers.
#[derive(Debug, Clone)]
pub struct TypeData {
    pub(crate) kind: TypeKind,
    pub(crate) array: Option<TypeId>,
    pub(crate) wildcard: Option<TypeId>,
}

impl TypeData {
    pub(crate) fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            array: None,
            wildcard: None,
        }
    }
}

/// Part of a dotted name after the last `.`.
pub(crate) fn simple_name(full: &str) -> &str {
    full.rsplit_once('.').map_or(full, |(_, name)| name)
}

/// Part of a dotted name before the last `.`, or `""`.
pub(crate) fn qualifier(full: &str) -> &str {
    full.rsplit_once('.').map_or("", |(prefix, _)| prefix)
}

impl CodeModel {
    /// Returns the variant payload of a type.
    #[must_use]
    pub fn type_kind(&self, ty: TypeId) -> &TypeKind {
        &self.types[ty.index()].kind
    }

    /// Returns the handle of a primitive type by keyword.
    ///
    /// # Errors
    /// Returns [`Error::InvalidTypeName`] for anything but the nine keywords.
    pub fn primitive(&self, name: &str) -> Result<TypeId> {
        PrimitiveKind::from_name(name)
            .map(PrimitiveKind::type_id)
            .ok_or_else(|| Error::InvalidTypeName {
                name: name.to_string(),
            })
    }

    /// Short name of a type.
    #[must_use]
    pub fn name(&self, ty: TypeId) -> String {
        match self.type_kind(ty) {
            TypeKind::Primitive(p) => p.name().to_string(),
            TypeKind::Defined(c) => {
                let class = &self.classes[c.index()];
                match class.anonymous_base {
                    Some(base) => self.name(base),
                    None => class.name.clone(),
                }
            }
            TypeKind::Referenced(r) => r.simple_name().to_string(),
            TypeKind::Array(c) => format!("{}[]", self.name(*c)),
            TypeKind::Narrowed { basis, args } => {
                let args: Vec<String> = args.iter().map(|a| self.name(*a)).collect();
                format!("{}<{}>", self.name(*basis), args.join(","))
            }
            TypeKind::TypeVar(v) => v.name.clone(),
            TypeKind::Wildcard(b) => format!("? extends {}", self.name(*b)),
            TypeKind::Direct(n) => simple_name(n).to_string(),
            TypeKind::Null => "null".to_string(),
        }
    }

    /// Fully qualified name of a type.
    #[must_use]
    pub fn full_name(&self, ty: TypeId) -> String {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => {
                let class = &self.classes[c.index()];
                if let Some(base) = class.anonymous_base {
                    return self.full_name(base);
                }
                match class.outer {
                    Some(outer) => {
                        format!("{}.{}", self.full_name(self.class_type(outer)), class.name)
                    }
                    None => {
                        let package = &self.packages[class.package.index()];
                        if package.is_unnamed() {
                            class.name.clone()
                        } else {
                            format!("{}.{}", package.name(), class.name)
                        }
                    }
                }
            }
            TypeKind::Referenced(r) => r.full_name.clone(),
            TypeKind::Array(c) => format!("{}[]", self.full_name(*c)),
            TypeKind::Narrowed { basis, args } => {
                let args: Vec<String> = args.iter().map(|a| self.full_name(*a)).collect();
                format!("{}<{}>", self.full_name(*basis), args.join(","))
            }
            TypeKind::Wildcard(b) => format!("? extends {}", self.full_name(*b)),
            TypeKind::Direct(n) => n.clone(),
            TypeKind::Primitive(_) | TypeKind::TypeVar(_) | TypeKind::Null => self.name(ty),
        }
    }

    /// Binary name: nested classes are joined with `$`.
    #[must_use]
    pub fn binary_name(&self, ty: TypeId) -> String {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => {
                let class = &self.classes[c.index()];
                match (class.anonymous_base, class.outer) {
                    (Some(base), _) => self.binary_name(base),
                    (None, Some(outer)) => {
                        format!(
                            "{}${}",
                            self.binary_name(self.class_type(outer)),
                            class.name
                        )
                    }
                    (None, None) => self.full_name(ty),
                }
            }
            TypeKind::Referenced(r) => match r.outer {
                Some(outer) => format!("{}${}", self.binary_name(outer), r.simple_name()),
                None => r.full_name.clone(),
            },
            TypeKind::Array(c) => format!("{}[]", self.binary_name(*c)),
            TypeKind::Narrowed { basis, args } => {
                let args: Vec<String> = args.iter().map(|a| self.binary_name(*a)).collect();
                format!("{}<{}>", self.binary_name(*basis), args.join(","))
            }
            _ => self.full_name(ty),
        }
    }

    /// Name of the package a type belongs to; `""` for the unnamed package
    /// and for types that have no package.
    #[must_use]
    pub fn package_name(&self, ty: TypeId) -> String {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => {
                let class = &self.classes[c.index()];
                match class.anonymous_base {
                    Some(base) => self.package_name(base),
                    None => self.packages[class.package.index()].name().to_string(),
                }
            }
            TypeKind::Referenced(r) => match r.outer {
                Some(outer) => self.package_name(outer),
                None => qualifier(&r.full_name).to_string(),
            },
            TypeKind::Direct(n) => qualifier(n).to_string(),
            TypeKind::Narrowed { basis, .. } => self.package_name(*basis),
            TypeKind::Primitive(_)
            | TypeKind::Array(_)
            | TypeKind::TypeVar(_)
            | TypeKind::Wildcard(_)
            | TypeKind::Null => String::new(),
        }
    }

    /// Enclosing class of a nested class.
    #[must_use]
    pub fn outer(&self, ty: TypeId) -> Option<TypeId> {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => self.classes[c.index()]
                .outer
                .map(|outer| self.class_type(outer)),
            TypeKind::Referenced(r) => r.outer,
            TypeKind::Narrowed { basis, .. } => self.outer(*basis),
            _ => None,
        }
    }

    /// The model class behind a type, if it was defined in this model.
    #[must_use]
    pub fn defined_class(&self, ty: TypeId) -> Option<ClassId> {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => Some(*c),
            _ => None,
        }
    }

    /// The type handle of a defined class.
    #[must_use]
    pub fn class_type(&self, class: ClassId) -> TypeId {
        self.classes[class.index()].ty
    }

    /// Primitive type?
    #[must_use]
    pub fn is_primitive(&self, ty: TypeId) -> bool {
        matches!(self.type_kind(ty), TypeKind::Primitive(_))
    }

    /// Reference type (anything that is not primitive)?
    #[must_use]
    pub fn is_reference(&self, ty: TypeId) -> bool {
        !self.is_primitive(ty)
    }

    /// Array type?
    #[must_use]
    pub fn is_array(&self, ty: TypeId) -> bool {
        matches!(self.type_kind(ty), TypeKind::Array(_))
    }

    /// Component type of an array.
    #[must_use]
    pub fn element_type(&self, ty: TypeId) -> Option<TypeId> {
        match self.type_kind(ty) {
            TypeKind::Array(c) => Some(*c),
            _ => None,
        }
    }

    /// Interface or annotation type?
    #[must_use]
    pub fn is_interface(&self, ty: TypeId) -> bool {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => self.classes[c.index()].kind.is_interface(),
            TypeKind::Referenced(r) => r.kind.is_interface(),
            TypeKind::Narrowed { basis, .. } => self.is_interface(*basis),
            _ => false,
        }
    }

    /// Abstract class?
    #[must_use]
    pub fn is_abstract(&self, ty: TypeId) -> bool {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => self.classes[c.index()].mods.is_abstract(),
            TypeKind::Referenced(r) => r.is_abstract,
            TypeKind::Narrowed { basis, .. } => self.is_abstract(*basis),
            _ => false,
        }
    }

    /// Declared type variables of a generic class.
    #[must_use]
    pub fn type_params(&self, ty: TypeId) -> Vec<TypeId> {
        match self.type_kind(ty) {
            TypeKind::Defined(c) => self.classes[c.index()].type_params.clone(),
            TypeKind::Referenced(r) => r.type_params.clone(),
            _ => Vec::new(),
        }
    }

    /// Type arguments of a narrowed class.
    #[must_use]
    pub fn type_args(&self, ty: TypeId) -> &[TypeId] {
        match self.type_kind(ty) {
            TypeKind::Narrowed { args, .. } => args,
            _ => &[],
        }
    }

    /// The generic class with its type arguments removed.
    #[must_use]
    pub fn erasure(&self, ty: TypeId) -> TypeId {
        match self.type_kind(ty) {
            TypeKind::Narrowed { basis, .. } => *basis,
            _ => ty,
        }
    }

    /// True for narrowed classes.
    #[must_use]
    pub fn is_parameterized(&self, ty: TypeId) -> bool {
        self.erasure(ty) != ty
    }

    /// Boxed counterpart of a primitive; other types are returned unchanged.
    #[must_use]
    pub fn boxify(&self, ty: TypeId) -> TypeId {
        match self.type_kind(ty) {
            TypeKind::Primitive(p) => self.boxed[*p as usize],
            _ => ty,
        }
    }

    /// Primitive counterpart of a boxed class; other types are returned
    /// unchanged.
    #[must_use]
    pub fn unboxify(&self, ty: TypeId) -> TypeId {
        self.boxed
            .iter()
            .position(|boxed| *boxed == ty)
            .map_or(ty, |i| PrimitiveKind::ALL[i].type_id())
    }

    /// Array of `ty`, created on first use.
    pub fn array(&mut self, ty: TypeId) -> TypeId {
        if let Some(array) = self.types[ty.index()].array {
            return array;
        }
        let array = self.push_type(TypeKind::Array(ty));
        self.types[ty.index()].array = Some(array);
        array
    }

    /// `? extends bound`, created on first use.
    pub fn wildcard_of(&mut self, bound: TypeId) -> TypeId {
        if let Some(wildcard) = self.types[bound.index()].wildcard {
            return wildcard;
        }
        let wildcard = self.push_type(TypeKind::Wildcard(bound));
        self.types[bound.index()].wildcard = Some(wildcard);
        wildcard
    }

    /// Applies type arguments to a generic class.
    ///
    /// Narrowing an already narrowed class appends to its arguments.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] for primitives and the null type.
    pub fn narrow(&mut self, basis: TypeId, args: &[TypeId]) -> Result<TypeId> {
        match self.type_kind(basis) {
            TypeKind::Primitive(_) | TypeKind::Null => Err(Error::invalid_operation(format!(
                "type '{}' cannot be narrowed",
                self.name(basis)
            ))),
            TypeKind::Narrowed {
                basis: inner,
                args: existing,
            } => {
                let inner = *inner;
                let mut all = existing.clone();
                all.extend_from_slice(args);
                Ok(self.intern_narrowed(inner, all))
            }
            _ => Ok(self.intern_narrowed(basis, args.to_vec())),
        }
    }

    pub(crate) fn intern_narrowed(&mut self, basis: TypeId, args: Vec<TypeId>) -> TypeId {
        let key = (basis, args);
        if let Some(id) = self.narrowings.get(&key) {
            return *id;
        }
        let id = self.push_type(TypeKind::Narrowed {
            basis,
            args: key.1.clone(),
        });
        self.narrowings.insert(key, id);
        id
    }

    /// Creates a fresh, unbounded type variable.
    pub fn new_type_var(&mut self, name: impl Into<String>) -> TypeId {
        self.push_type(TypeKind::TypeVar(TypeVarData {
            name: name.into(),
            bound: None,
        }))
    }

    /// Sets the upper bound of a type variable.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOperation`] if `var` is not a type variable or
    /// already has a bound.
    pub fn bind_bound(&mut self, var: TypeId, bound: TypeId) -> Result<()> {
        match &mut self.types[var.index()].kind {
            TypeKind::TypeVar(data) => match data.bound {
                Some(_) => Err(Error::invalid_operation(format!(
                    "type variable '{}' already has a bound",
                    data.name
                ))),
                None => {
                    data.bound = Some(bound);
                    Ok(())
                }
            },
            _ => Err(Error::invalid_operation("only type variables can be bound")),
        }
    }

    /// Direct superclass, with type arguments substituted for narrowed
    /// classes. `None` for `Object`, primitives and the null type.
    pub fn superclass(&mut self, ty: TypeId) -> Option<TypeId> {
        match self.type_kind(ty).clone() {
            TypeKind::Primitive(_) | TypeKind::Null => None,
            TypeKind::Defined(c) => {
                let class = &self.classes[c.index()];
                match (class.superclass, class.anonymous_base) {
                    (Some(sup), _) => Some(sup),
                    (None, Some(base)) if !self.is_interface(base) => Some(base),
                    _ => Some(TypeId::OBJECT),
                }
            }
            TypeKind::Referenced(r) => match r.superclass {
                Some(sup) => Some(sup),
                None if r.kind.is_interface() => Some(TypeId::OBJECT),
                None => None,
            },
            TypeKind::Array(_) | TypeKind::Direct(_) => Some(TypeId::OBJECT),
            TypeKind::Narrowed { basis, args } => {
                let sup = self.superclass(basis)?;
                let params = self.type_params(basis);
                Some(self.substitute_params(sup, &params, &args))
            }
            TypeKind::TypeVar(v) => Some(v.bound.unwrap_or(TypeId::OBJECT)),
            TypeKind::Wildcard(bound) => Some(bound),
        }
    }

    /// Directly implemented interfaces, substituted for narrowed classes.
    pub fn interfaces(&mut self, ty: TypeId) -> Vec<TypeId> {
        match self.type_kind(ty).clone() {
            TypeKind::Defined(c) => {
                let class = &self.classes[c.index()];
                match class.anonymous_base {
                    Some(base) if self.is_interface(base) => vec![base],
                    _ => class.interfaces.clone(),
                }
            }
            TypeKind::Referenced(r) => r.interfaces,
            TypeKind::Narrowed { basis, args } => {
                let params = self.type_params(basis);
                self.interfaces(basis)
                    .into_iter()
                    .map(|itf| self.substitute_params(itf, &params, &args))
                    .collect()
            }
            TypeKind::TypeVar(v) => v.bound.map(|b| self.interfaces(b)).unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Replaces the type variables `vars` with `args` throughout `ty`.
    ///
    /// Returns `ty` itself when nothing changes.
    pub fn substitute_params(&mut self, ty: TypeId, vars: &[TypeId], args: &[TypeId]) -> TypeId {
        match self.type_kind(ty).clone() {
            TypeKind::TypeVar(_) => vars
                .iter()
                .position(|v| *v == ty)
                .and_then(|i| args.get(i).copied())
                .unwrap_or(ty),
            TypeKind::Array(component) => {
                let substituted = self.substitute_params(component, vars, args);
                if substituted == component {
                    ty
                } else {
                    self.array(substituted)
                }
            }
            TypeKind::Narrowed {
                basis,
                args: current,
            } => {
                let substituted: Vec<TypeId> = current
                    .iter()
                    .map(|a| self.substitute_params(*a, vars, args))
                    .collect();
                if substituted == current {
                    ty
                } else {
                    self.intern_narrowed(basis, substituted)
                }
            }
            TypeKind::Wildcard(bound) => {
                let substituted = self.substitute_params(bound, vars, args);
                if substituted == bound {
                    ty
                } else {
                    self.wildcard_of(substituted)
                }
            }
            _ => ty,
        }
    }

    /// Walks the supertypes of `ty` looking for a parameterization of
    /// `base`, which is compared by erasure.
    pub fn base_class(&mut self, ty: TypeId, base: TypeId) -> Option<TypeId> {
        if self.erasure(ty) == base {
            return Some(ty);
        }
        if let Some(sup) = self.superclass(ty)
            && let Some(found) = self.base_class(sup, base)
        {
            return Some(found);
        }
        for itf in self.interfaces(ty) {
            if let Some(found) = self.base_class(itf, base) {
                return Some(found);
            }
        }
        None
    }

    /// Returns true if a value of `derived` can be assigned to `ty`.
    pub fn is_assignable_from(&mut self, ty: TypeId, derived: TypeId) -> bool {
        if derived == TypeId::NULL || ty == derived || ty == TypeId::OBJECT {
            return true;
        }
        if let Some(sup) = self.superclass(derived)
            && self.is_assignable_from(ty, sup)
        {
            return true;
        }
        if self.is_interface(ty) {
            for itf in self.interfaces(derived) {
                if self.is_assignable_from(ty, itf) {
                    return true;
                }
            }
        }
        false
    }

    /// Orders types with `java*` names first, then by full name.
    #[must_use]
    pub fn compare_types(&self, a: TypeId, b: TypeId) -> Ordering {
        let lhs = self.full_name(a);
        let rhs = self.full_name(b);
        match (lhs.starts_with("java"), rhs.starts_with("java")) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => lhs.cmp(&rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ExternalType;

    #[test]
    fn test_primitive_lookup() {
        let cm = CodeModel::new();
        assert_eq!(cm.primitive("int").expect("int"), TypeId::INT);
        assert_eq!(cm.name(TypeId::BOOLEAN), "boolean");
        let err = cm.primitive("integer").expect_err("not a primitive");
        assert!(matches!(err, Error::InvalidTypeName { .. }));
    }

    #[test]
    fn test_array_is_cached() {
        let mut cm = CodeModel::new();
        let a = cm.array(TypeId::INT);
        let b = cm.array(TypeId::INT);
        assert_eq!(a, b);
        assert_eq!(cm.name(a), "int[]");
        assert_eq!(cm.element_type(a), Some(TypeId::INT));
        assert_eq!(cm.superclass(a), Some(TypeId::OBJECT));
    }

    #[test]
    fn test_boxing_table() {
        let cm = CodeModel::new();
        let boxed = cm.boxify(TypeId::INT);
        assert_eq!(cm.full_name(boxed), "java.lang.Integer");
        assert_eq!(cm.unboxify(boxed), TypeId::INT);
        assert_eq!(cm.boxify(TypeId::OBJECT), TypeId::OBJECT);
        assert_eq!(cm.unboxify(TypeId::OBJECT), TypeId::OBJECT);
    }

    #[test]
    fn test_narrowing_names_and_erasure() {
        let mut cm = CodeModel::new();
        let list = cm
            .ref_external(&ExternalType::class("java.util.List"))
            .expect("List");
        let string = cm.ref_name("java.lang.String");
        let list_of_string = cm.narrow(list, &[string]).expect("narrow");

        assert_eq!(cm.name(list_of_string), "List<String>");
        assert_eq!(cm.full_name(list_of_string), "java.util.List<java.lang.String>");
        assert_eq!(cm.erasure(list_of_string), list);
        assert!(cm.is_parameterized(list_of_string));
        assert!(cm.is_interface(list_of_string));
        assert_eq!(cm.narrow(list, &[string]).expect("narrow"), list_of_string);
        assert!(cm.narrow(TypeId::INT, &[string]).is_err());
    }

    #[test]
    fn test_substitute_is_identity_when_unchanged() {
        let mut cm = CodeModel::new();
        let t = cm.new_type_var("T");
        let u = cm.new_type_var("U");
        let string = cm.ref_name("java.lang.String");
        let t_array = cm.array(t);

        assert_eq!(cm.substitute_params(t_array, &[u], &[string]), t_array);
        let substituted = cm.substitute_params(t_array, &[t], &[string]);
        assert_eq!(substituted, cm.array(string));
    }

    #[test]
    fn test_type_var_bound_once() {
        let mut cm = CodeModel::new();
        let t = cm.new_type_var("T");
        let number = cm.ref_name("java.lang.Number");
        cm.bind_bound(t, number).expect("first bound");
        assert!(cm.bind_bound(t, number).is_err());
        assert_eq!(cm.superclass(t), Some(number));
    }

    #[test]
    fn test_assignability() {
        let mut cm = CodeModel::new();
        let number = cm.ref_name("java.lang.Number");
        let integer = cm.boxify(TypeId::INT);
        let comparable = cm.ref_name("java.lang.Comparable");

        assert!(cm.is_assignable_from(number, integer));
        assert!(!cm.is_assignable_from(integer, number));
        assert!(cm.is_assignable_from(comparable, integer));
        assert!(cm.is_assignable_from(integer, TypeId::NULL));
        assert!(cm.is_assignable_from(TypeId::OBJECT, comparable));
    }

    #[test]
    fn test_compare_types_puts_java_first() {
        let mut cm = CodeModel::new();
        let string = cm.ref_name("java.lang.String");
        let local = cm.ref_name("com.acme.Alpha");
        assert_eq!(cm.compare_types(string, local), Ordering::Less);
        assert_eq!(cm.compare_types(local, string), Ordering::Greater);
    }
}
