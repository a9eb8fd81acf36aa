//! Writing a whole model to code writers.

use crate::config::BuildConfig;
use crate::error::Result;
use crate::formatter::Formatter;
use crate::writer::{CodeWriter, escape_unicode, prolog_comment};
use codemodel_core::PackageId;
use codemodel_model::CodeModel;
use std::io::Write;

/// Number of files written by a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Class sources and `package-info` files.
    pub sources: usize,
    /// Resource files.
    pub resources: usize,
}

impl BuildReport {
    /// Total number of files.
    #[must_use]
    pub fn total(&self) -> usize {
        self.sources + self.resources
    }
}

enum Sinks<'w> {
    Shared(&'w mut dyn CodeWriter),
    Split {
        sources: &'w mut dyn CodeWriter,
        resources: &'w mut dyn CodeWriter,
    },
}

impl Sinks<'_> {
    fn sources(&mut self) -> &mut dyn CodeWriter {
        match self {
            Self::Shared(writer) => &mut **writer,
            Self::Split { sources, .. } => &mut **sources,
        }
    }

    fn resources(&mut self) -> &mut dyn CodeWriter {
        match self {
            Self::Shared(writer) => &mut **writer,
            Self::Split { resources, .. } => &mut **resources,
        }
    }

    fn close(&mut self) -> Result<()> {
        match self {
            Self::Shared(writer) => writer.close(),
            Self::Split { sources, resources } => {
                sources.close()?;
                resources.close()
            }
        }
    }
}

/// Writes every package of `model` to one writer.
///
/// # Arguments
/// * `model` - The model to write
/// * `writer` - Destination of sources and resources
/// * `config` - Build options
///
/// # Returns
/// The number of files written.
///
/// # Errors
/// Returns an error if rendering or writing a file fails.
pub fn build(
    model: &CodeModel,
    writer: &mut dyn CodeWriter,
    config: &BuildConfig,
) -> Result<BuildReport> {
    build_into(model, Sinks::Shared(writer), config)
}

/// Writes sources and resources to separate writers.
///
/// # Errors
/// Returns an error if rendering or writing a file fails.
pub fn build_split(
    model: &CodeModel,
    sources: &mut dyn CodeWriter,
    resources: &mut dyn CodeWriter,
    config: &BuildConfig,
) -> Result<BuildReport> {
    build_into(model, Sinks::Split { sources, resources }, config)
}

fn build_into(model: &CodeModel, mut sinks: Sinks<'_>, config: &BuildConfig) -> Result<BuildReport> {
    tracing::info!("building {} artifacts", model.count_artifacts());
    let mut report = BuildReport::default();
    for package in model.packages() {
        build_package(model, package, &mut sinks, config, &mut report)?;
    }
    sinks.close()?;
    tracing::info!(
        "wrote {} sources and {} resources",
        report.sources,
        report.resources
    );
    Ok(report)
}

fn build_package(
    model: &CodeModel,
    id: PackageId,
    sinks: &mut Sinks<'_>,
    config: &BuildConfig,
    report: &mut BuildReport,
) -> Result<()> {
    let package = model.get_package(id);
    let name = package.name();

    for class in package.classes() {
        let decl = model.class(class);
        if decl.is_hidden() {
            tracing::debug!("skipping hidden class {}", decl.name());
            continue;
        }
        let text = Formatter::new(model, config.formatter_config()).render_class(class)?;
        let file = format!("{}.{}", decl.name(), config.extension());
        write_source(sinks.sources(), name, &file, &text, config)?;
        report.sources += 1;
    }

    if package.has_package_info() {
        let text = Formatter::new(model, config.formatter_config()).render_package_info(id);
        let file = format!("package-info.{}", config.extension());
        write_source(sinks.sources(), name, &file, &text, config)?;
        report.sources += 1;
    }

    for resource in package.resources() {
        let mut out = sinks.resources().open_binary(name, resource.name())?;
        out.write_all(&resource.contents())?;
        out.flush()?;
        report.resources += 1;
    }
    Ok(())
}

fn write_source(
    writer: &mut dyn CodeWriter,
    package: &str,
    file: &str,
    text: &str,
    config: &BuildConfig,
) -> Result<()> {
    let mut source = match &config.prolog {
        Some(prolog) => prolog_comment(prolog),
        None => String::new(),
    };
    source.push_str(text);
    if config.escape_non_ascii {
        source = escape_unicode(&source, true);
    }
    writer.write_source(package, file, &source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::MemoryCodeWriter;
    use codemodel_core::{Mods, TypeId};
    use codemodel_model::{Annotatable, ClassKind, Literal, ResourceFile};

    fn sample() -> CodeModel {
        let mut cm = CodeModel::new();
        cm.new_class("com.acme.Alpha", ClassKind::Class).expect("alpha");
        let hidden = cm.new_class("com.acme.Hidden", ClassKind::Class).expect("hidden");
        cm.class_mut(hidden).hide();
        cm.new_class("Root", ClassKind::Interface).expect("root");

        let package = cm.package("com.acme").expect("package");
        let deprecated = cm.ref_name("java.lang.Deprecated");
        cm.annotate(Annotatable::Package(package), deprecated)
            .expect("annotate");
        cm.package_mut(package)
            .add_resource(ResourceFile::property("app.properties").entry("name", "demo"))
            .expect("resource");
        cm
    }

    #[test]
    fn test_build_writes_every_artifact() {
        let cm = sample();
        let mut writer = MemoryCodeWriter::new();
        let report = build(&cm, &mut writer, &BuildConfig::default()).expect("build");

        assert_eq!(report, BuildReport { sources: 3, resources: 1 });
        assert_eq!(report.total(), cm.count_artifacts());
        let paths: Vec<&str> = writer.files().keys().map(String::as_str).collect();
        assert_eq!(
            paths,
            vec![
                "Root.java",
                "com/acme/Alpha.java",
                "com/acme/app.properties",
                "com/acme/package-info.java",
            ]
        );
        assert_eq!(
            writer.text("com/acme/package-info.java"),
            Some("@java.lang.Deprecated\npackage com.acme;\n")
        );
        assert_eq!(writer.text("com/acme/app.properties"), Some("name=demo\n"));
        assert!(
            writer
                .text("com/acme/Alpha.java")
                .is_some_and(|text| text.starts_with("package com.acme;\n"))
        );
    }

    #[test]
    fn test_split_writers() {
        let cm = sample();
        let mut sources = MemoryCodeWriter::new();
        let mut resources = MemoryCodeWriter::new();
        build_split(&cm, &mut sources, &mut resources, &BuildConfig::default()).expect("build");
        assert_eq!(sources.files().len(), 3);
        assert_eq!(resources.files().len(), 1);
    }

    #[test]
    fn test_prolog_extension_and_escaping() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("Menu", ClassKind::Class).expect("class");
        cm.class_mut(class).javadoc().append("Caf\u{e9} specials.");
        cm.class_mut(class)
            .field_init(Mods::NONE, TypeId::CHAR, "c", Literal::from('x'))
            .expect("field");

        let config = BuildConfig::new()
            .source_extension("jav")
            .escape_non_ascii(true)
            .prolog("generated");
        let mut writer = MemoryCodeWriter::new();
        build(&cm, &mut writer, &config).expect("build");

        let text = writer.text("Menu.jav").expect("source");
        assert!(text.starts_with("//\n// generated\n//\n\n"));
        assert!(text.contains(" * Caf\\u00E9 specials.\n"));
        assert!(text.contains("    char c = 'x';\n"));
    }
}
