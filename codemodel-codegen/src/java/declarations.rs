//! Package lines and class, method and enum constant declarations.

use crate::formatter::Formatter;
use codemodel_core::{ClassId, MethodId, Mods, PackageId, TypeId};
use codemodel_model::EnumConstant;

impl Formatter<'_> {
    pub(crate) fn mods(&mut self, mods: Mods) -> &mut Self {
        for keyword in mods.keywords() {
            self.p(keyword);
        }
        self
    }

    /// `package name;` followed by a newline; nothing for the unnamed
    /// package.
    pub(crate) fn package_line(&mut self, id: PackageId) -> &mut Self {
        let package = self.model.get_package(id);
        if !package.is_unnamed() {
            let line = format!("package {};", package.name());
            self.p(&line).nl();
        }
        self
    }

    /// Prints the header and body of a class.
    ///
    /// The `extends` and `implements` clauses go on their own indented
    /// lines; an explicit `java.lang.Object` superclass is omitted.
    pub(crate) fn declare_class(&mut self, id: ClassId) {
        let model = self.model;
        let class = model.class(id);
        if let Some(doc) = class.javadoc() {
            self.nl().doc_comment(doc);
        }
        for annotation in class.annotations() {
            self.annotation_use(*annotation).nl();
        }

        self.mods(class.mods())
            .p(class.kind().keyword())
            .id(class.name())
            .declare_type_params(class.type_params());

        let superclass = class.superclass().filter(|ty| *ty != TypeId::OBJECT);
        if let Some(superclass) = superclass {
            self.nl().i().p("extends").generate_type(superclass).nl().o();
        }
        if !class.interfaces().is_empty() {
            if superclass.is_none() {
                self.nl();
            }
            let keyword = if class.kind().is_interface() {
                "extends"
            } else {
                "implements"
            };
            self.i().p(keyword);
            self.comma_list(class.interfaces(), |f, ty| {
                f.generate_type(*ty);
            });
            self.nl().o();
        }
        self.class_body(id);
    }

    /// `{ constants fields initializers constructors methods classes }`
    pub(crate) fn class_body(&mut self, id: ClassId) -> &mut Self {
        let model = self.model;
        let class = model.class(id);
        self.pc('{').nl().i();

        let constants = class.enum_constants();
        if !constants.is_empty() {
            for (index, (name, constant)) in constants.iter().enumerate() {
                if index > 0 {
                    self.pc(',').nl();
                }
                self.declare_enum_constant(name, constant);
            }
            self.pc(';').nl();
        }

        for field in class.fields().values() {
            if let Some(doc) = model.var(*field).javadoc() {
                self.doc_comment(doc);
            }
            self.declare_var(*field);
        }
        if let Some(init) = class.init() {
            self.nl().p("static").state_block(init);
        }
        if let Some(init) = class.instance_init() {
            self.nl().state_block(init);
        }
        for method in class.constructors().iter().chain(class.methods()) {
            self.nl().declare_method(*method);
        }
        for nested in class.classes() {
            self.nl().declare_class(nested);
        }
        if let Some(direct) = class.direct() {
            self.p(direct);
        }
        self.o().pc('}').nl()
    }

    fn declare_enum_constant(&mut self, name: &str, constant: &EnumConstant) {
        if let Some(doc) = constant.javadoc() {
            self.nl().doc_comment(doc);
        }
        for annotation in constant.annotations() {
            self.annotation_use(*annotation).nl();
        }
        self.id(name);
        if !constant.args().is_empty() {
            self.pc('(').exprs(constant.args()).pc(')');
        }
    }

    /// Prints a method or constructor. Methods without a body get an empty
    /// one unless they are abstract, native or declared by an interface.
    fn declare_method(&mut self, id: MethodId) {
        let model = self.model;
        let method = model.method(id);
        if let Some(doc) = method.javadoc() {
            self.doc_comment(doc);
        }
        for annotation in method.annotations() {
            self.annotation_use(*annotation).nl();
        }
        self.mods(method.mods())
            .declare_type_params(method.type_params());
        if let Some(ret) = method.return_type() {
            self.generate_type(ret);
        }
        self.id(method.name()).pc('(').i();

        for (index, param) in method.params().iter().enumerate() {
            if index > 0 {
                self.pc(',');
            }
            if !model.var(*param).annotations().is_empty() {
                self.nl();
            }
            self.bind_var(*param);
        }
        if let Some(var_param) = method.var_param() {
            if !method.params().is_empty() {
                self.pc(',');
            }
            let var = model.var(var_param);
            let element = model.element_type(var.ty()).unwrap_or(var.ty());
            self.generate_type(element).p("... ").id(var.name());
        }
        self.o().pc(')');

        if !method.throws().is_empty() {
            self.nl().i().p("throws");
            self.comma_list(method.throws(), |f, ty| {
                f.generate_type(*ty);
            });
            self.nl().o();
        }
        if let Some(value) = method.default_value() {
            self.p("default ").annotation_value(value);
        }

        let owner = model.class(method.owner());
        if let Some(body) = method.body() {
            self.state_block(body);
        } else if !owner.kind().is_interface()
            && !method.mods().is_abstract()
            && !method.mods().is_native()
        {
            self.pc('{').nl().pc('}').nl();
        } else {
            self.pc(';').nl();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FormatterConfig;
    use crate::formatter::Formatter;
    use codemodel_core::{ClassId, Error, Mods, TypeId};
    use codemodel_model::{ClassKind, CodeModel, Expr, Invocation};

    fn render(cm: &CodeModel, class: ClassId) -> String {
        Formatter::new(cm, &FormatterConfig::default())
            .render_class(class)
            .expect("render")
    }

    #[test]
    fn test_var_args_method() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Varargs", ClassKind::Class).expect("class");
        let string = cm.ref_name("java.lang.String");
        let integer = cm.ref_name("java.lang.Integer");
        let m = cm
            .class_mut(class)
            .method(Mods::NONE, TypeId::VOID, "foo")
            .expect("foo");
        let mut method = cm.method_mut(m);
        method.param(Mods::NONE, string, "param1").expect("param1");
        method.param(Mods::NONE, integer, "param2").expect("param2");
        method
            .var_param(Mods::NONE, TypeId::OBJECT, "param3")
            .expect("param3");
        let err = method
            .var_param(Mods::NONE, TypeId::OBJECT, "param4")
            .expect_err("second var-arg");
        assert!(matches!(err, Error::DuplicateVarArgs { .. }));

        let text = render(&cm, class);
        assert!(text.contains(
            "    void foo(String param1, Integer param2, Object... param3) {\n    }\n"
        ));
    }

    #[test]
    fn test_header_clauses() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Worker", ClassKind::Class).expect("class");
        let base = cm.ref_name("com.acme.base.Base");
        let runnable = cm.ref_name("java.lang.Runnable");
        let io = cm.ref_name("java.io.IOException");
        let mut view = cm.class_mut(class);
        view.extends(base).expect("extends").implements(runnable);
        let run = view.method(Mods::PUBLIC, TypeId::VOID, "run").expect("run");
        cm.method_mut(run).throws(io);

        let text = render(&cm, class);
        assert!(text.contains("import com.acme.base.Base;\n"));
        assert!(text.contains("import java.io.IOException;\n"));
        assert!(text.contains("public class Worker\n    extends Base\n    implements Runnable\n{\n"));
        assert!(text.contains("    public void run()\n        throws IOException\n    {\n    }\n"));
    }

    #[test]
    fn test_object_superclass_is_omitted() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Plain", ClassKind::Class).expect("class");
        cm.class_mut(class).extends(TypeId::OBJECT).expect("extends");
        assert!(render(&cm, class).contains("public class Plain {\n"));
    }

    #[test]
    fn test_interface_members() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Shape", ClassKind::Interface).expect("class");
        let comparable = cm.ref_name("java.lang.Comparable");
        let mut view = cm.class_mut(class);
        view.implements(comparable);
        view.method(Mods::NONE, TypeId::DOUBLE, "area").expect("area");

        let text = render(&cm, class);
        assert!(text.contains("public interface Shape\n    extends Comparable\n{\n"));
        assert!(text.contains("    double area();\n"));
    }

    #[test]
    fn test_annotation_member_default() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Label", ClassKind::Annotation).expect("class");
        let string = cm.ref_name("java.lang.String");
        let m = cm
            .class_mut(class)
            .method(Mods::NONE, string, "value")
            .expect("value");
        cm.method_mut(m).default_value("none");

        let text = render(&cm, class);
        assert!(text.contains("    String value() default \"none\";\n"));
    }

    #[test]
    fn test_enum_constants_keep_order() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Planet", ClassKind::Enum).expect("class");
        let mut view = cm.class_mut(class);
        view.enum_constant("MERCURY").expect("c").arg(1);
        view.enum_constant("VENUS").expect("c").arg(2);
        view.enum_constant("EARTH").expect("c").arg(3);
        view.field(Mods::PRIVATE | Mods::FINAL, TypeId::INT, "order")
            .expect("field");

        let text = render(&cm, class);
        assert!(text.contains(
            "public enum Planet {\n    MERCURY(1),\n    VENUS(2),\n    EARTH(3);\n    private final int order;\n"
        ));
    }

    #[test]
    fn test_constructor_initializers_and_direct() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Counter", ClassKind::Class).expect("class");
        let mut view = cm.class_mut(class);
        let count = view.field(Mods::PRIVATE, TypeId::INT, "count").expect("count");
        let init = view.init();
        let ctor = view.constructor(Mods::PUBLIC).expect("ctor");
        view.direct("// generated\n");
        cm.block_mut(init).invoke(Invocation::call("setup"));
        let body = cm.method_mut(ctor).body();
        cm.block_mut(body).assign(Expr::this_field("count"), 0);
        cm.var_mut(count).javadoc().append("Number of ticks.");

        let text = render(&cm, class);
        assert!(text.contains("    /**\n     * Number of ticks.\n     * \n     */\n    private int count;\n"));
        assert!(text.contains("\n    static {\n        setup();\n    }\n"));
        assert!(text.contains("\n    public Counter() {\n        this.count = 0;\n    }\n"));
        assert!(text.contains("    // generated\n}\n"));
    }

    #[test]
    fn test_abstract_method_has_no_body() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Base", ClassKind::Class).expect("class");
        let mut view = cm.class_mut(class);
        view.set_mods(Mods::PUBLIC | Mods::ABSTRACT).expect("mods");
        let m = view
            .method(Mods::PROTECTED | Mods::ABSTRACT, TypeId::VOID, "apply")
            .expect("apply");
        let t = cm.method_mut(m).generify("T").expect("T");
        cm.method_mut(m).param(Mods::FINAL, t, "value").expect("value");

        let text = render(&cm, class);
        assert!(text.contains("public abstract class Base {\n"));
        assert!(text.contains("    protected abstract<T> void apply(final T value);\n"));
    }
}
