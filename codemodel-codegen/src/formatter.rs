//! Two-pass Java source formatter.
//!
//! Rendering a top-level class walks its declaration twice. The collecting
//! pass records every class reference and identifier per short name; the
//! collected table then decides which classes can be imported and printed
//! by their short name. The printing pass walks the same tree again and
//! writes the compilation unit.
//!
//! The per-node generators live in [`crate::java`].

use crate::config::FormatterConfig;
use crate::error::{CodegenError, Result};
use codemodel_core::names::is_identifier_start;
use codemodel_core::{BlockId, ClassId, PackageId, TypeId};
use codemodel_model::{CodeModel, Expr, Statement, TypeKind};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Marker closing a type argument list.
///
/// Printed as `>`, but remembered as the last character so that
/// `Foo<Bar> x` gets a space while `new Foo<Bar>()` does not.
pub(crate) const CLOSE_TYPE_ARGS: char = '\u{FFFF}';

/// Pass the formatter is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Record references; produce no output.
    Collecting,
    /// Write text.
    Printing,
}

/// Classes and identifier usage seen under one short name.
#[derive(Debug, Default)]
struct ReferenceList {
    classes: Vec<TypeId>,
    id: bool,
}

impl ReferenceList {
    fn add(&mut self, ty: TypeId) {
        if !self.classes.contains(&ty) {
            self.classes.push(ty);
        }
    }
}

/// A standalone piece of the model for [`Formatter::render_fragment`].
#[derive(Debug, Clone, Copy)]
pub enum Fragment<'a> {
    /// A type reference.
    Type(TypeId),
    /// An expression.
    Expr(&'a Expr),
    /// A single statement.
    Statement(&'a Statement),
    /// A block, braces included.
    Block(BlockId),
    /// A class declaration without package or imports.
    Class(ClassId),
}

/// Java source printer with import resolution.
///
/// A formatter is consumed by the render call, so every render starts from
/// a clean collision table and indentation.
pub struct Formatter<'m> {
    pub(crate) model: &'m CodeModel,
    config: FormatterConfig,
    mode: Mode,
    out: String,
    level: usize,
    last_char: Option<char>,
    at_bol: bool,
    refs: BTreeMap<String, ReferenceList>,
    imported: HashSet<TypeId>,
}

impl<'m> Formatter<'m> {
    /// Creates a formatter over `model`.
    #[must_use]
    pub fn new(model: &'m CodeModel, config: &FormatterConfig) -> Self {
        Self {
            model,
            config: config.clone(),
            mode: Mode::Printing,
            out: String::new(),
            level: 0,
            last_char: None,
            at_bol: true,
            refs: BTreeMap::new(),
            imported: HashSet::new(),
        }
    }

    /// Current pass.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn is_printing(&self) -> bool {
        self.mode == Mode::Printing
    }

    /// Renders the compilation unit of a top-level class: the `package`
    /// line, imports, a blank line and the declaration.
    ///
    /// # Arguments
    /// * `class` - A class declared directly in a package
    ///
    /// # Returns
    /// The source text of the file.
    ///
    /// # Errors
    /// Returns [`CodegenError::Generation`] for nested and anonymous classes.
    pub fn render_class(mut self, class: ClassId) -> Result<String> {
        let model = self.model;
        let decl = model.class(class);
        if decl.outer().is_some() || decl.is_anonymous() {
            return Err(CodegenError::generation(format!(
                "'{}' is not a top-level class",
                model.full_name(decl.ty())
            )));
        }

        tracing::debug!("collecting references of {}", model.full_name(decl.ty()));
        self.mode = Mode::Collecting;
        self.declare_class(class);

        let importable: Vec<TypeId> = self
            .refs
            .values()
            .filter(|list| !list.id && !self.collides(list, class))
            .filter_map(|list| list.classes.first().copied())
            .collect();
        self.imported.extend(importable);
        self.imported.insert(decl.ty());

        let imports = self.import_names(class);
        tracing::debug!(
            "printing {} with {} imports",
            model.full_name(decl.ty()),
            imports.len()
        );
        self.mode = Mode::Printing;

        let package = model.get_package(decl.package());
        if !package.is_unnamed() {
            self.package_line(decl.package());
            self.nl();
        }
        for name in &imports {
            self.p("import").p(name).pc(';').nl();
        }
        self.nl();
        self.declare_class(class);
        Ok(self.out)
    }

    /// Renders `package-info.java` for a package: its javadoc, annotations
    /// and `package` line. Names are printed fully qualified.
    #[must_use]
    pub fn render_package_info(mut self, package: PackageId) -> String {
        let model = self.model;
        self.mode = Mode::Printing;
        let pkg = model.get_package(package);
        if let Some(doc) = pkg.javadoc() {
            self.doc_comment(doc);
        }
        for annotation in pkg.annotations() {
            self.annotation_use(*annotation).nl();
        }
        self.package_line(package);
        self.out
    }

    /// Prints a fragment in isolation. No imports are in scope, so every
    /// class is printed by its fully qualified name.
    #[must_use]
    pub fn render_fragment(mut self, fragment: Fragment<'_>) -> String {
        self.mode = Mode::Printing;
        match fragment {
            Fragment::Type(ty) => {
                self.generate_type(ty);
            }
            Fragment::Expr(expr) => {
                self.expr(expr);
            }
            Fragment::Statement(statement) => self.statement(statement),
            Fragment::Block(block) => self.state_block(block),
            Fragment::Class(class) => self.declare_class(class),
        }
        self.out
    }

    fn collides(&self, list: &ReferenceList, enclosing: ClassId) -> bool {
        if list.classes.len() > 1 || (list.id && !list.classes.is_empty()) {
            return true;
        }
        let model = self.model;
        let package = model.get_package(model.class(enclosing).package());
        list.classes.iter().any(|ty| {
            let shadowed = self
                .config
                .implicit_package_name()
                .is_some_and(|implicit| model.package_name(*ty) == implicit)
                && package.get_class(&model.name(*ty)).is_some();
            shadowed || model.outer(*ty).is_some()
        })
    }

    fn import_names(&self, class: ClassId) -> BTreeSet<String> {
        let model = self.model;
        let own_package = model.package_name(model.class_type(class));
        let mut names = BTreeSet::new();
        for ty in &self.imported {
            let mut ty = *ty;
            if model.is_parameterized(ty) {
                tracing::warn!(
                    "importing {} through its erasure",
                    model.full_name(ty)
                );
                ty = model.erasure(ty);
            }
            let package = model.package_name(ty);
            if package.is_empty()
                || self.config.implicit_package_name() == Some(package.as_str())
                || (package == own_package && model.outer(ty).is_none())
            {
                continue;
            }
            names.insert(model.full_name(ty));
        }
        names
    }

    /// Prints a token, preceded by indentation at the start of a line or by
    /// a space where the two adjacent characters require one.
    pub(crate) fn p(&mut self, s: &str) -> &mut Self {
        if self.is_printing() {
            if let (Some(first), Some(last)) = (s.chars().next(), s.chars().last()) {
                self.space_if_needed(first);
                self.out.push_str(s);
                self.last_char = Some(last);
            }
        }
        self
    }

    /// Prints a single character; [`CLOSE_TYPE_ARGS`] prints `>`.
    pub(crate) fn pc(&mut self, c: char) -> &mut Self {
        if self.is_printing() {
            if c == CLOSE_TYPE_ARGS {
                self.out.push('>');
            } else {
                self.space_if_needed(c);
                self.out.push(c);
            }
            self.last_char = Some(c);
        }
        self
    }

    pub(crate) fn nl(&mut self) -> &mut Self {
        if self.is_printing() {
            self.out.push('\n');
            self.last_char = None;
            self.at_bol = true;
        }
        self
    }

    /// Indents.
    pub(crate) fn i(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Outdents.
    pub(crate) fn o(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    fn space_if_needed(&mut self, c: char) {
        if self.at_bol {
            for _ in 0..self.level {
                self.out.push_str(&self.config.indent);
            }
            self.at_bol = false;
        } else if self.last_char.is_some_and(|last| need_space(last, c)) {
            self.out.push(' ');
        }
    }

    /// Prints an identifier. While collecting, marks the short name as used
    /// by something other than a type.
    pub(crate) fn id(&mut self, name: &str) -> &mut Self {
        match self.mode {
            Mode::Printing => self.p(name),
            Mode::Collecting => {
                let model = self.model;
                let list = self.refs.entry(name.to_string()).or_default();
                list.id = !list.classes.iter().any(|ty| model.outer(*ty).is_some());
                self
            }
        }
    }

    /// Prints a class reference by short, outer-qualified or fully
    /// qualified name. Other types are delegated to
    /// [`Formatter::generate_type`].
    pub(crate) fn type_ref(&mut self, ty: TypeId) -> &mut Self {
        let model = self.model;
        let ty = model
            .defined_class(ty)
            .and_then(|class| model.class(class).anonymous_base())
            .unwrap_or(ty);
        if !matches!(
            model.type_kind(ty),
            TypeKind::Defined(_) | TypeKind::Referenced(_) | TypeKind::Direct(_)
        ) {
            return self.generate_type(ty);
        }

        match self.mode {
            Mode::Printing => {
                if self.imported.contains(&ty) {
                    self.p(&model.name(ty))
                } else if let Some(outer) = model.outer(ty) {
                    self.type_ref(outer).pc('.').p(&model.name(ty))
                } else {
                    self.p(&model.full_name(ty))
                }
            }
            Mode::Collecting => {
                self.refs.entry(model.name(ty)).or_default().add(ty);
                self
            }
        }
    }

    /// Prints `items` separated by commas.
    pub(crate) fn comma_list<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut each: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for (index, item) in items.into_iter().enumerate() {
            if index > 0 {
                self.pc(',');
            }
            each(self, item);
        }
        self
    }
}

/// Whether a space must separate two adjacent characters.
pub(crate) fn need_space(c1: char, c2: char) -> bool {
    if c1.is_whitespace() || c2.is_whitespace() {
        return false;
    }
    if (c1 == ']' && c2 == '{') || c1 == ';' {
        return true;
    }
    if c1 == CLOSE_TYPE_ARGS {
        return c2 != '(';
    }
    if (c1 == ')' && c2 == '{') || c1 == ',' || c1 == '=' || c2 == '=' {
        return true;
    }
    if c1.is_ascii_digit() {
        return !matches!(c2, '(' | ')' | ';' | ',');
    }
    if is_identifier_start(c1) {
        return matches!(c2, '{' | '}' | '+' | '>' | '@') || is_identifier_start(c2);
    }
    if is_identifier_start(c2) {
        return matches!(c1, ']' | ')' | '}' | '+');
    }
    if c2.is_ascii_digit() {
        return c1 != '(';
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemodel_core::Mods;
    use codemodel_model::ClassKind;

    fn render(cm: &CodeModel, class: ClassId) -> String {
        Formatter::new(cm, &FormatterConfig::default())
            .render_class(class)
            .expect("render")
    }

    #[test]
    fn test_need_space_table() {
        assert!(need_space(']', '{'));
        assert!(need_space(';', 'x'));
        assert!(need_space(CLOSE_TYPE_ARGS, 'x'));
        assert!(!need_space(CLOSE_TYPE_ARGS, '('));
        assert!(need_space(')', '{'));
        assert!(need_space('x', '='));
        assert!(!need_space('1', ')'));
        assert!(need_space('1', 'L'));
        assert!(need_space('a', 'b'));
        assert!(!need_space('a', '('));
        assert!(need_space(')', 'a'));
        assert!(!need_space('(', 'a'));
        assert!(!need_space('(', '1'));
        assert!(!need_space('.', 'a'));
        assert!(!need_space(' ', '1'));
    }

    #[test]
    fn test_simple_class_has_no_imports() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("Test", ClassKind::Class).expect("class");
        cm.class_mut(class)
            .method(Mods::PUBLIC, TypeId::VOID, "foo")
            .expect("method");

        let text = render(&cm, class);
        assert!(!text.contains("import"));
        assert!(!text.contains("package"));
        assert!(text.contains("public class Test {"));
        assert!(text.contains("    public void foo() {\n    }\n"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_package_line_and_imports() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Registry", ClassKind::Class).expect("class");
        let list = cm.ref_name("java.util.List");
        let string = cm.ref_name("java.lang.String");
        let strings = cm.narrow(list, &[string]).expect("narrow");
        cm.class_mut(class)
            .field(Mods::PRIVATE, strings, "names")
            .expect("field");

        let text = render(&cm, class);
        assert!(text.starts_with("package com.acme;\n\nimport java.util.List;\n\n"));
        assert!(text.contains("    private List<String> names;\n"));
        assert!(!text.contains("import java.lang"));
    }

    #[test]
    fn test_colliding_short_names_are_qualified() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Dates", ClassKind::Class).expect("class");
        let util_date = cm.ref_name("java.util.Date");
        let sql_date = cm.ref_name("java.sql.Date");
        let mut view = cm.class_mut(class);
        view.field(Mods::PRIVATE, util_date, "created").expect("a");
        view.field(Mods::PRIVATE, sql_date, "stored").expect("b");

        let text = render(&cm, class);
        assert!(text.contains("private java.util.Date created;"));
        assert!(text.contains("private java.sql.Date stored;"));
        assert!(!text.contains("import java.util.Date;"));
        assert!(!text.contains("import java.sql.Date;"));
    }

    #[test]
    fn test_identifier_blocks_import() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Holder", ClassKind::Class).expect("class");
        let list = cm.ref_name("java.util.List");
        let mut view = cm.class_mut(class);
        view.field(Mods::PRIVATE, list, "items").expect("items");
        view.field(Mods::PRIVATE, TypeId::INT, "List").expect("List");

        let text = render(&cm, class);
        assert!(text.contains("private java.util.List items;"));
        assert!(!text.contains("import java.util.List;"));
    }

    #[test]
    fn test_implicit_package_shadowed_by_sibling() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Parser", ClassKind::Class).expect("class");
        cm.new_class("com.acme.String", ClassKind::Class).expect("sibling");
        let string = cm.ref_name("java.lang.String");
        cm.class_mut(class)
            .field(Mods::PRIVATE, string, "input")
            .expect("field");

        let text = render(&cm, class);
        assert!(text.contains("private java.lang.String input;"));
    }

    #[test]
    fn test_without_implicit_package_java_lang_is_imported() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Named", ClassKind::Class).expect("class");
        let string = cm.ref_name("java.lang.String");
        cm.class_mut(class)
            .field(Mods::PRIVATE, string, "name")
            .expect("field");

        let config = FormatterConfig::new().implicit_package(None);
        let text = Formatter::new(&cm, &config)
            .render_class(class)
            .expect("render");
        assert!(text.contains("import java.lang.String;"));
        assert!(text.contains("private String name;"));
    }

    #[test]
    fn test_nested_classes_are_outer_qualified() {
        let mut cm = CodeModel::new();
        let outer = cm.new_class("com.acme.Outer", ClassKind::Class).expect("outer");
        let middle = cm
            .class_mut(outer)
            .nested(Mods::PUBLIC | Mods::STATIC, "Middle", ClassKind::Class)
            .expect("middle");
        let inner = cm
            .class_mut(middle)
            .nested(Mods::PUBLIC | Mods::STATIC, "Inner", ClassKind::Class)
            .expect("inner");
        let inner_ty = cm.class_type(inner);
        let middle_ty = cm.class_type(middle);
        cm.class_mut(outer)
            .field(Mods::PRIVATE, inner_ty, "inner")
            .expect("field");
        cm.class_mut(inner)
            .field(Mods::PRIVATE, middle_ty, "parent")
            .expect("field");

        let text = render(&cm, outer);
        assert!(text.contains("private Outer.Middle.Inner inner;"));
        assert!(text.contains("private Outer.Middle parent;"));
        assert!(!text.contains("import"));
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Repeat", ClassKind::Class).expect("class");
        let map = cm.ref_name("java.util.Map");
        let string = cm.ref_name("java.lang.String");
        let ty = cm.narrow(map, &[string, string]).expect("narrow");
        let m = cm
            .class_mut(class)
            .method(Mods::PUBLIC, ty, "index")
            .expect("method");
        let body = cm.method_mut(m).body();
        cm.block_mut(body).return_value(Expr::Null);

        assert_eq!(render(&cm, class), render(&cm, class));
    }

    #[test]
    fn test_nested_class_cannot_be_rendered_alone() {
        let mut cm = CodeModel::new();
        let outer = cm.new_class("a.Outer", ClassKind::Class).expect("outer");
        let inner = cm
            .class_mut(outer)
            .nested(Mods::PUBLIC, "Inner", ClassKind::Class)
            .expect("inner");
        let err = Formatter::new(&cm, &FormatterConfig::default())
            .render_class(inner)
            .expect_err("nested");
        assert!(matches!(err, CodegenError::Generation { .. }));
    }

    #[test]
    fn test_fragment_uses_full_names() {
        let mut cm = CodeModel::new();
        let list = cm.ref_name("java.util.List");
        let string = cm.ref_name("java.lang.String");
        let ty = cm.narrow(list, &[string]).expect("narrow");
        let text = Formatter::new(&cm, &FormatterConfig::default())
            .render_fragment(Fragment::Type(ty));
        assert_eq!(text, "java.util.List<java.lang.String>");
    }

    #[test]
    fn test_custom_indent() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("Tabs", ClassKind::Class).expect("class");
        cm.class_mut(class)
            .field(Mods::NONE, TypeId::INT, "x")
            .expect("field");
        let config = FormatterConfig::new().indent("\t");
        let text = Formatter::new(&cm, &config)
            .render_class(class)
            .expect("render");
        assert!(text.contains("\n\tint x;\n"));
    }
}
