//! Expressions.

use crate::formatter::Formatter;
use codemodel_model::{Callee, Expr, Invocation, NewArray, Target};

impl Formatter<'_> {
    /// Prints an expression.
    pub(crate) fn expr(&mut self, expr: &Expr) -> &mut Self {
        let model = self.model;
        match expr {
            Expr::Lit(literal) => self.p(&literal.token()),
            Expr::Null => self.p("null"),
            Expr::This => self.p("this"),
            Expr::Super => self.p("super"),
            Expr::Var(var) => self.id(model.var(*var).name()),
            Expr::Field {
                target: Some(target),
                name,
            } => self.expr(target).pc('.').p(name),
            Expr::Field { target: None, name } => self.id(name),
            Expr::StaticField { ty, name } => self.generate_type(*ty).pc('.').p(name),
            Expr::Component { array, index } => {
                self.expr(array).pc('[').expr(index).pc(']')
            }
            Expr::Invoke(invocation) => self.invocation(invocation),
            Expr::NewArray(array) => self.new_array(array),
            Expr::Unary { op, expr } => self.pc('(').p(op.symbol()).expr(expr).pc(')'),
            Expr::Postfix { op, expr } => self.expr(expr).p(op.symbol()),
            Expr::Binary { op, lhs, rhs } => self
                .pc('(')
                .expr(lhs)
                .p(op.symbol())
                .expr(rhs)
                .pc(')'),
            Expr::Ternary {
                test,
                then,
                otherwise,
            } => self
                .pc('(')
                .expr(test)
                .pc('?')
                .expr(then)
                .pc(':')
                .expr(otherwise)
                .pc(')'),
            Expr::InstanceOf { expr, ty } => self
                .pc('(')
                .expr(expr)
                .p("instanceof")
                .generate_type(*ty)
                .pc(')'),
            Expr::Cast { ty, expr } => self.p("((").generate_type(*ty).pc(')').expr(expr).pc(')'),
            Expr::Assign { lhs, op, rhs } => {
                let token = match op {
                    Some(op) => format!("{}=", op.symbol()),
                    None => "=".to_string(),
                };
                self.expr(lhs).p(&token).expr(rhs)
            }
            Expr::DotClass(ty) => self.generate_type(model.erasure(*ty)).p(".class"),
            Expr::Direct(source) => self.pc('(').p(source).pc(')'),
        }
    }

    /// Prints expressions separated by commas.
    pub(crate) fn exprs(&mut self, exprs: &[Expr]) -> &mut Self {
        self.comma_list(exprs, |f, expr| {
            f.expr(expr);
        })
    }

    fn invocation(&mut self, invocation: &Invocation) -> &mut Self {
        let model = self.model;
        let array_init = matches!(invocation.callee, Callee::New(ty) if model.is_array(ty));
        match &invocation.callee {
            Callee::New(ty) => {
                self.p("new").generate_type(*ty);
            }
            Callee::Method {
                target: Some(Target::Expr(target)),
                name,
            } => {
                self.expr(target).pc('.').p(name);
            }
            Callee::Method {
                target: Some(Target::Type(ty)),
                name,
            } => {
                self.generate_type(*ty).pc('.').p(name);
            }
            Callee::Method { target: None, name } => {
                self.id(name);
            }
        }

        let (open, close) = if array_init { ('{', '}') } else { ('(', ')') };
        self.pc(open).exprs(&invocation.args).pc(close);

        if let Callee::New(ty) = invocation.callee {
            let anonymous = model
                .defined_class(ty)
                .filter(|class| model.class(*class).is_anonymous());
            if let Some(class) = anonymous {
                self.class_body(class);
            }
        }
        self
    }

    /// `new T[size][]..` or `new T[][]{..}`; the size goes into the first
    /// bracket pair even when the element type is itself an array.
    fn new_array(&mut self, array: &NewArray) -> &mut Self {
        let model = self.model;
        let mut element = array.ty;
        let mut dims = 0;
        while let Some(component) = model.element_type(element) {
            element = component;
            dims += 1;
        }

        self.p("new").generate_type(element).pc('[');
        if let Some(size) = &array.size {
            self.expr(size);
        }
        self.pc(']');
        for _ in 0..dims {
            self.p("[]");
        }

        if array.size.is_none() || array.exprs.is_some() {
            self.pc('{');
            match &array.exprs {
                Some(exprs) if !exprs.is_empty() => {
                    self.exprs(exprs);
                }
                _ => {
                    self.pc(' ');
                }
            }
            self.pc('}');
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FormatterConfig;
    use crate::formatter::{Formatter, Fragment};
    use codemodel_core::{Mods, TypeId};
    use codemodel_model::expr::{FALSE, TRUE};
    use codemodel_model::{CodeModel, Expr, Invocation, NewArray, op};

    fn render(cm: &CodeModel, expr: &Expr) -> String {
        Formatter::new(cm, &FormatterConfig::default()).render_fragment(Fragment::Expr(expr))
    }

    #[test]
    fn test_boolean_folding_renders_literals() {
        let cm = CodeModel::new();
        let a = Expr::field("a");
        assert_eq!(render(&cm, &a.clone().cand(FALSE)), render(&cm, &FALSE));
        assert_eq!(render(&cm, &a.clone().cor(TRUE)), "true");
        assert_eq!(render(&cm, &op::not(TRUE)), "false");
        assert_eq!(render(&cm, &a.cand(Expr::field("b"))), "(a&&b)");
    }

    #[test]
    fn test_numeric_edge_cases() {
        let cm = CodeModel::new();
        assert_eq!(render(&cm, &Expr::lit(-0.0f64)), "-0.0D");
        assert_eq!(render(&cm, &Expr::lit(0.0f64)), "0.0D");
        assert_eq!(render(&cm, &Expr::lit(-0.0f32)), "-0.0F");
        assert_eq!(
            render(&cm, &Expr::lit(f64::INFINITY)),
            "java.lang.Double.POSITIVE_INFINITY"
        );
        assert_eq!(render(&cm, &Expr::lit(f64::NAN)), "java.lang.Double.NaN");
        assert_eq!(render(&cm, &Expr::lit(10i64)), "10L");
    }

    #[test]
    fn test_operators_and_assignments() {
        let cm = CodeModel::new();
        assert_eq!(render(&cm, &Expr::field("a").plus(1)), "(a + 1)");
        assert_eq!(render(&cm, &Expr::field("x").assign(1)), "x = 1");
        assert_eq!(render(&cm, &Expr::field("x").assign_plus(2)), "x += 2");
        assert_eq!(render(&cm, &Expr::field("o").cast(TypeId::INT)), "((int) o)");
        assert_eq!(render(&cm, &op::neg(Expr::field("n"))), "(-n)");
        assert_eq!(render(&cm, &Expr::this_field("size")), "this.size");
    }

    #[test]
    fn test_invocations() {
        let mut cm = CodeModel::new();
        let call: Expr = Expr::This.invoke("size").arg(1).arg("a").into();
        assert_eq!(render(&cm, &call), "this.size(1, \"a\")");

        let list = cm.ref_name("java.util.ArrayList");
        let string = cm.ref_name("java.lang.String");
        let strings = cm.narrow(list, &[string]).expect("narrow");
        let created: Expr = Invocation::new_instance(strings).into();
        assert_eq!(
            render(&cm, &created),
            "new java.util.ArrayList<java.lang.String>()"
        );

        let collections = cm.ref_name("java.util.Collections");
        let call: Expr = Invocation::static_call(collections, "emptyList").into();
        assert_eq!(render(&cm, &call), "java.util.Collections.emptyList()");
        assert_eq!(render(&cm, &Expr::dot_class(strings)), "java.util.ArrayList.class");
    }

    #[test]
    fn test_array_creation() {
        let mut cm = CodeModel::new();
        let init: Expr = NewArray::new(TypeId::INT).add(1).add(2).into();
        assert_eq!(render(&cm, &init), "new int[] { 1, 2 }");

        let ints = cm.array(TypeId::INT);
        let empty: Expr = NewArray::new(ints).into();
        assert_eq!(render(&cm, &empty), "new int[][] { }");
    }

    #[test]
    fn test_anonymous_class_body() {
        let mut cm = CodeModel::new();
        let runnable = cm.ref_name("java.lang.Runnable");
        let anon = cm.anonymous_class(runnable);
        cm.class_mut(anon)
            .method(Mods::PUBLIC, TypeId::VOID, "run")
            .expect("run");
        let created: Expr = Invocation::new_instance(cm.class_type(anon)).into();

        let text = render(&cm, &created);
        assert!(text.starts_with("new java.lang.Runnable() {\n"));
        assert!(text.contains("    public void run() {\n    }\n"));
        assert!(text.ends_with("}\n"));
    }
}
