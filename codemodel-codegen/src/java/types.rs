//! Type references and type parameter declarations.

use crate::formatter::{CLOSE_TYPE_ARGS, Formatter};
use codemodel_core::TypeId;
use codemodel_model::TypeKind;

impl Formatter<'_> {
    /// Prints a type as it appears in a declaration or expression.
    pub(crate) fn generate_type(&mut self, ty: TypeId) -> &mut Self {
        let model = self.model;
        match model.type_kind(ty) {
            TypeKind::Primitive(primitive) => self.p(primitive.name()),
            TypeKind::Defined(_) | TypeKind::Referenced(_) | TypeKind::Direct(_) => {
                self.type_ref(ty)
            }
            TypeKind::Array(component) => self.generate_type(*component).p("[]"),
            TypeKind::Narrowed { basis, args } => {
                self.type_ref(*basis).pc('<');
                self.comma_list(args, |f, arg| {
                    f.generate_type(*arg);
                });
                self.pc(CLOSE_TYPE_ARGS)
            }
            TypeKind::TypeVar(var) => self.id(&var.name),
            TypeKind::Wildcard(bound) => {
                if *bound == TypeId::OBJECT {
                    self.p("?")
                } else {
                    self.p("? extends").generate_type(*bound)
                }
            }
            TypeKind::Null => self.p("null"),
        }
    }

    /// Prints `<T extends Bound, U>` for a non-empty parameter list.
    pub(crate) fn declare_type_params(&mut self, params: &[TypeId]) -> &mut Self {
        if params.is_empty() {
            return self;
        }
        let model = self.model;
        self.pc('<');
        self.comma_list(params, |f, param| {
            if let TypeKind::TypeVar(var) = model.type_kind(*param) {
                f.id(&var.name);
                if let Some(bound) = var.bound {
                    f.p("extends").generate_type(bound);
                }
            }
        });
        self.pc(CLOSE_TYPE_ARGS)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FormatterConfig;
    use crate::formatter::{Formatter, Fragment};
    use codemodel_core::{Mods, TypeId};
    use codemodel_model::{ClassKind, CodeModel};

    fn fragment(cm: &CodeModel, ty: TypeId) -> String {
        Formatter::new(cm, &FormatterConfig::default()).render_fragment(Fragment::Type(ty))
    }

    #[test]
    fn test_arrays_and_wildcards() {
        let mut cm = CodeModel::new();
        let ints = cm.array(TypeId::INT);
        let matrix = cm.array(ints);
        assert_eq!(fragment(&cm, matrix), "int[][]");

        let number = cm.ref_name("java.lang.Number");
        let list = cm.ref_name("java.util.List");
        let bounded = cm.wildcard_of(number);
        let any = cm.wildcard();
        let ty = cm.narrow(list, &[bounded]).expect("narrow");
        assert_eq!(
            fragment(&cm, ty),
            "java.util.List<? extends java.lang.Number>"
        );
        let ty = cm.narrow(list, &[any]).expect("narrow");
        assert_eq!(fragment(&cm, ty), "java.util.List<?>");
    }

    #[test]
    fn test_generic_class_declaration() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Box", ClassKind::Class).expect("class");
        let number = cm.ref_name("java.lang.Number");
        let t = cm
            .class_mut(class)
            .generify_bounded("T", number)
            .expect("T");
        cm.class_mut(class).generify("U").expect("U");
        cm.class_mut(class)
            .field(Mods::PRIVATE, t, "value")
            .expect("field");

        let text = Formatter::new(&cm, &FormatterConfig::default())
            .render_class(class)
            .expect("render");
        assert!(text.contains("public class Box<T extends Number, U> {"));
        assert!(text.contains("    private T value;"));
    }
}
