//! Output sinks for generated files.
//!
//! A [`CodeWriter`] receives every file of a build addressed by package name
//! and file name. Sources go through [`CodeWriter::write_source`], which
//! escapes control characters; resources are copied byte for byte through
//! [`CodeWriter::open_binary`].

use crate::error::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Destination of generated files.
pub trait CodeWriter {
    /// Opens a sink for `file` in `package`; `""` is the unnamed package.
    /// The sink borrows the writer, so only one file is open at a time.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be created.
    fn open_binary(&mut self, package: &str, file: &str) -> Result<Box<dyn Write + '_>>;

    /// Writes a source file, escaping control characters as `\uXXXX`.
    ///
    /// # Errors
    /// Returns an IO error if the file cannot be written.
    fn write_source(&mut self, package: &str, file: &str, text: &str) -> Result<()> {
        let escaped = escape_unicode(text, false);
        let mut out = self.open_binary(package, file)?;
        out.write_all(escaped.as_bytes())?;
        out.flush()?;
        Ok(())
    }

    /// Finishes the output.
    ///
    /// # Errors
    /// Returns an IO error if pending output cannot be completed.
    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Replaces control characters other than space, tab, CR and LF with
/// `\uXXXX` escapes. With `non_ascii`, every character above `0x7F` is
/// escaped too, as UTF-16 code units.
#[must_use]
pub fn escape_unicode(text: &str, non_ascii: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let control = (c as u32) < 0x20 && !matches!(c, ' ' | '\t' | '\r' | '\n');
        if control || (non_ascii && !c.is_ascii()) {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                out.push_str(&format!("\\u{unit:04X}"));
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// The `//` comment block written above a source file.
#[must_use]
pub fn prolog_comment(prolog: &str) -> String {
    let mut out = String::from("//\n");
    for line in prolog.lines() {
        out.push_str("// ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("//\n\n");
    out
}

fn package_path(package: &str) -> String {
    package.replace('.', "/")
}

/// Writes files into a directory tree, one directory per package segment.
#[derive(Debug)]
pub struct FileCodeWriter {
    target: PathBuf,
    read_only: bool,
    written: Vec<PathBuf>,
}

impl FileCodeWriter {
    /// Creates a writer rooted at an existing directory.
    ///
    /// # Errors
    /// Returns an IO error of kind `NotFound` if `target` is not a directory.
    pub fn new(target: impl Into<PathBuf>) -> Result<Self> {
        let target = target.into();
        if !target.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{}: non-existent directory", target.display()),
            )
            .into());
        }
        Ok(Self {
            target,
            read_only: false,
            written: Vec::new(),
        })
    }

    /// Marks every written file read-only on [`CodeWriter::close`].
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Root directory.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    fn file_path(&self, package: &str, file: &str) -> Result<PathBuf> {
        let dir = if package.is_empty() {
            self.target.clone()
        } else {
            self.target.join(package_path(package))
        };
        fs::create_dir_all(&dir)?;
        let path = dir.join(file);
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(path)
    }
}

impl CodeWriter for FileCodeWriter {
    fn open_binary(&mut self, package: &str, file: &str) -> Result<Box<dyn Write + '_>> {
        let path = self.file_path(package, file)?;
        tracing::debug!("writing {}", path.display());
        let out = fs::File::create(&path)?;
        self.written.push(path);
        Ok(Box::new(BufWriter::new(out)))
    }

    fn close(&mut self) -> Result<()> {
        if !self.read_only {
            return Ok(());
        }
        for path in self.written.drain(..) {
            let mut permissions = fs::metadata(&path)?.permissions();
            permissions.set_readonly(true);
            fs::set_permissions(&path, permissions)?;
        }
        Ok(())
    }
}

/// Writes every file into one stream, each preceded by a separator line
/// naming it.
#[derive(Debug)]
pub struct SingleStreamCodeWriter<W: Write> {
    out: W,
}

impl<W: Write> SingleStreamCodeWriter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CodeWriter for SingleStreamCodeWriter<W> {
    fn open_binary(&mut self, package: &str, file: &str) -> Result<Box<dyn Write + '_>> {
        let rule = "-".repeat(35);
        let name = if package.is_empty() {
            file.to_string()
        } else {
            format!("{package}.{file}")
        };
        writeln!(self.out, "{rule}{name}{rule}")?;
        Ok(Box::new(&mut self.out))
    }

    fn close(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Collects files in memory, keyed by `/`-separated path.
#[derive(Debug, Default)]
pub struct MemoryCodeWriter {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryCodeWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file written so far.
    #[must_use]
    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }

    /// Contents of a file as text, if it exists and is valid UTF-8.
    #[must_use]
    pub fn text(&self, path: &str) -> Option<&str> {
        self.files
            .get(path)
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}

impl CodeWriter for MemoryCodeWriter {
    fn open_binary(&mut self, package: &str, file: &str) -> Result<Box<dyn Write + '_>> {
        let path = if package.is_empty() {
            file.to_string()
        } else {
            format!("{}/{file}", package_path(package))
        };
        let buffer = self.files.entry(path).or_default();
        buffer.clear();
        Ok(Box::new(buffer))
    }
}

/// Prefixes every source file with a `//` comment block; binary files pass
/// through unchanged.
#[derive(Debug)]
pub struct PrologCodeWriter<W: CodeWriter> {
    inner: W,
    prolog: String,
}

impl<W: CodeWriter> PrologCodeWriter<W> {
    #[must_use]
    pub fn new(inner: W, prolog: impl Into<String>) -> Self {
        Self {
            inner,
            prolog: prolog.into(),
        }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: CodeWriter> CodeWriter for PrologCodeWriter<W> {
    fn open_binary(&mut self, package: &str, file: &str) -> Result<Box<dyn Write + '_>> {
        self.inner.open_binary(package, file)
    }

    fn write_source(&mut self, package: &str, file: &str, text: &str) -> Result<()> {
        let mut source = prolog_comment(&self.prolog);
        source.push_str(text);
        self.inner.write_source(package, file, &source)
    }

    fn close(&mut self) -> Result<()> {
        self.inner.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_unicode() {
        assert_eq!(escape_unicode("a\u{1b}b\t\n", false), "a\\u001Bb\t\n");
        assert_eq!(escape_unicode("caf\u{e9}", false), "caf\u{e9}");
        assert_eq!(escape_unicode("caf\u{e9}", true), "caf\\u00E9");
        assert_eq!(escape_unicode("\u{1F600}", true), "\\uD83D\\uDE00");
    }

    #[test]
    fn test_prolog_comment() {
        assert_eq!(
            prolog_comment("Generated code.\nDo not edit."),
            "//\n// Generated code.\n// Do not edit.\n//\n\n"
        );
    }

    #[test]
    fn test_memory_writer_paths() {
        let mut writer = MemoryCodeWriter::new();
        writer
            .write_source("com.acme", "Foo.java", "class Foo {}\n")
            .expect("source");
        writer
            .open_binary("", "data.bin")
            .expect("open")
            .write_all(&[1, 2, 3])
            .expect("write");

        assert_eq!(writer.text("com/acme/Foo.java"), Some("class Foo {}\n"));
        assert_eq!(writer.files()["data.bin"], vec![1, 2, 3]);
    }

    #[test]
    fn test_single_stream_separators() {
        let mut writer = SingleStreamCodeWriter::new(Vec::new());
        writer.write_source("com.acme", "A.java", "a\n").expect("a");
        writer.write_source("", "B.java", "b\n").expect("b");
        writer.close().expect("close");

        let text = String::from_utf8(writer.into_inner()).expect("utf8");
        let rule = "-".repeat(35);
        assert_eq!(
            text,
            format!("{rule}com.acme.A.java{rule}\na\n{rule}B.java{rule}\nb\n")
        );
    }

    #[test]
    fn test_prolog_wraps_sources_only() {
        let mut writer = PrologCodeWriter::new(MemoryCodeWriter::new(), "generated");
        writer.write_source("p", "A.java", "class A {}\n").expect("source");
        writer
            .open_binary("p", "a.txt")
            .expect("open")
            .write_all(b"raw")
            .expect("write");

        let inner = writer.into_inner();
        assert_eq!(inner.text("p/A.java"), Some("//\n// generated\n//\n\nclass A {}\n"));
        assert_eq!(inner.text("p/a.txt"), Some("raw"));
    }

    #[test]
    fn test_file_writer_requires_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = FileCodeWriter::new(dir.path().join("missing")).expect_err("missing");
        assert!(matches!(err, crate::error::CodegenError::Io(_)));
    }

    #[test]
    fn test_file_writer_replaces_and_marks_read_only() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut writer = FileCodeWriter::new(dir.path()).expect("writer");
        writer.write_source("com.acme", "A.java", "old\n").expect("old");
        writer.write_source("com.acme", "A.java", "new\n").expect("new");
        let path = dir.path().join("com").join("acme").join("A.java");
        assert_eq!(fs::read_to_string(&path).expect("read"), "new\n");
        writer.close().expect("close");
        assert!(!fs::metadata(&path).expect("meta").permissions().readonly());

        let mut writer = FileCodeWriter::new(dir.path()).expect("writer").read_only(true);
        writer.write_source("", "B.java", "b\n").expect("b");
        writer.close().expect("close");
        let path = dir.path().join("B.java");
        assert!(fs::metadata(&path).expect("meta").permissions().readonly());
    }
}
