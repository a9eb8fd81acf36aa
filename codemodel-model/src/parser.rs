//! Parsing of type names such as `java.util.Map<String, List<Integer>>[]`.

use crate::registry::CodeModel;
use crate::types::PrimitiveKind;
use codemodel_core::names::is_identifier_part;
use codemodel_core::{Error, Result, TypeId};

impl CodeModel {
    /// Resolves a textual type name.
    ///
    /// Accepts primitives, dotted class names, `<..>` type arguments,
    /// `? extends X` wildcards and trailing `[]` suffixes. Class names are
    /// resolved through [`CodeModel::ref_name`].
    ///
    /// # Errors
    /// Returns [`Error::MalformedTypeName`] if the text does not parse.
    pub fn parse_type(&mut self, text: &str) -> Result<TypeId> {
        let text = text.trim();
        if let Some(component) = text.strip_suffix("[]") {
            let component = self.parse_type(component)?;
            return Ok(self.array(component));
        }
        if let Some(primitive) = PrimitiveKind::from_name(text) {
            return Ok(primitive.type_id());
        }

        let mut parser = TypeNameParser {
            model: self,
            input: text,
            pos: 0,
        };
        let ty = parser.type_name()?;
        if parser.pos != text.len() {
            return Err(parser.error("unexpected trailing characters"));
        }
        Ok(ty)
    }
}

struct TypeNameParser<'m, 's> {
    model: &'m mut CodeModel,
    input: &'s str,
    pos: usize,
}

impl TypeNameParser<'_, '_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn error(&self, message: &str) -> Error {
        Error::malformed(self.input, format!("{message} at offset {}", self.pos))
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn type_name(&mut self) -> Result<TypeId> {
        self.skip_ws();
        if self.peek() == Some('?') {
            self.pos += 1;
            self.skip_ws();
            if let Some(after) = self.rest().strip_prefix("extends") {
                self.pos = self.input.len() - after.len();
                self.skip_ws();
                let bound = self.type_name()?;
                return Ok(self.model.wildcard_of(bound));
            }
            if self.rest().starts_with("super") {
                return Err(self.error("'? super' bounds are not supported"));
            }
            return Err(self.error("only 'extends' or 'super' may follow '?'"));
        }

        let start = self.pos;
        let len: usize = self
            .rest()
            .chars()
            .take_while(|c| is_identifier_part(*c) || *c == '.')
            .map(char::len_utf8)
            .sum();
        self.pos += len;
        let name = &self.input[start..self.pos];
        if name.is_empty() || name.starts_with('.') || name.ends_with('.') || name.contains("..")
        {
            return Err(self.error("expected a type name"));
        }

        let ty = match PrimitiveKind::from_name(name) {
            Some(primitive) => primitive.type_id(),
            None => self.model.ref_name(name),
        };
        self.suffix(ty)
    }

    fn suffix(&mut self, mut ty: TypeId) -> Result<TypeId> {
        loop {
            self.skip_ws();
            match self.peek() {
                Some('<') => ty = self.arguments(ty)?,
                Some('[') => {
                    if !self.rest().starts_with("[]") {
                        return Err(self.error("expected ']'"));
                    }
                    self.pos += 2;
                    ty = self.model.array(ty);
                }
                _ => return Ok(ty),
            }
        }
    }

    fn arguments(&mut self, basis: TypeId) -> Result<TypeId> {
        self.pos += 1;
        let mut args = Vec::new();
        loop {
            args.push(self.type_name()?);
            self.skip_ws();
            match self.peek() {
                None => return Err(self.error("missing '>'")),
                Some('>') => {
                    self.pos += 1;
                    return self.model.narrow(basis, &args);
                }
                Some(',') => self.pos += 1,
                Some(_) => return Err(self.error("expected ',' or '>'")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKind;

    #[test]
    fn test_primitives_and_arrays() {
        let mut cm = CodeModel::new();
        assert_eq!(cm.parse_type("int").expect("int"), TypeId::INT);
        let matrix = cm.parse_type("double[][]").expect("matrix");
        let row = cm.array(TypeId::DOUBLE);
        assert_eq!(matrix, cm.array(row));
    }

    #[test]
    fn test_nested_arguments_are_interned() {
        let mut cm = CodeModel::new();
        let a = cm
            .parse_type("java.util.Map<java.lang.String, java.util.List<java.lang.Integer>>")
            .expect("map");
        let b = cm
            .parse_type("java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>")
            .expect("map");
        assert_eq!(a, b);
        assert_eq!(
            cm.full_name(a),
            "java.util.Map<java.lang.String,java.util.List<java.lang.Integer>>"
        );
    }

    #[test]
    fn test_wildcards() {
        let mut cm = CodeModel::new();
        let ty = cm
            .parse_type("java.util.List<? extends java.lang.Number>")
            .expect("list");
        let arg = cm.type_args(ty)[0];
        assert!(matches!(cm.type_kind(arg), TypeKind::Wildcard(_)));

        let err = cm
            .parse_type("java.util.List<? super java.lang.Number>")
            .expect_err("super");
        assert!(matches!(err, Error::MalformedTypeName { .. }));
    }

    #[test]
    fn test_malformed_names() {
        let mut cm = CodeModel::new();
        for text in [
            "java.util.List<java.lang.String",
            "java.util.List<java.lang.String>>",
            "java.util.List[",
            "a..B",
            "",
            "Foo Bar",
        ] {
            assert!(cm.parse_type(text).is_err(), "{text} should not parse");
        }
    }

    #[test]
    fn test_array_of_generic() {
        let mut cm = CodeModel::new();
        let ty = cm.parse_type("java.util.List<int[]>[]").expect("array");
        let element = cm.element_type(ty).expect("element");
        let ints = cm.array(TypeId::INT);
        assert_eq!(cm.type_args(element), &[ints]);
    }
}
