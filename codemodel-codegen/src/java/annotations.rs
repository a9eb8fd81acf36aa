//! Annotation uses and member values.

use crate::formatter::Formatter;
use codemodel_core::AnnotationId;
use codemodel_model::AnnotationValue;

impl Formatter<'_> {
    /// `@Type`, `@Type(value)` or `@Type(a = x, b = y)`.
    pub(crate) fn annotation_use(&mut self, id: AnnotationId) -> &mut Self {
        let model = self.model;
        let annotation = model.annotation(id);
        self.pc('@').type_ref(annotation.class());

        let members = annotation.members();
        if members.is_empty() {
            return self;
        }
        self.pc('(');
        match members.get("value") {
            Some(value) if members.len() == 1 => {
                self.annotation_value(value);
            }
            _ => {
                self.comma_list(members, |f, (name, value)| {
                    f.p(name).pc('=').annotation_value(value);
                });
            }
        }
        self.pc(')')
    }

    pub(crate) fn annotation_value(&mut self, value: &AnnotationValue) -> &mut Self {
        let model = self.model;
        match value {
            AnnotationValue::Expr(expr) => self.expr(expr),
            AnnotationValue::Type(ty) => self
                .generate_type(model.erasure(model.boxify(*ty)))
                .p(".class"),
            AnnotationValue::Annotation(nested) => self.annotation_use(*nested),
            AnnotationValue::Array(values) => {
                self.pc('{').nl().i();
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        self.pc(',').nl();
                    }
                    self.annotation_value(value);
                }
                self.nl().o().pc('}')
            }
        }
    }
}
