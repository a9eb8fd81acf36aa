//! Blocks, local variables and statements.

use crate::formatter::Formatter;
use codemodel_core::{BlockId, ForId, IfId, SwitchId, TryId, VarId};
use codemodel_model::{Case, Content, DEFAULT_CATCH_PARAM, Expr, ForInit, Statement};

impl Formatter<'_> {
    /// Prints a block without a trailing newline.
    pub(crate) fn generate_block(&mut self, id: BlockId) -> &mut Self {
        let model = self.model;
        let block = model.block(id);
        if block.braces_required() {
            self.pc('{').nl();
        }
        if block.indent_required() {
            self.i();
        }
        self.block_body(id);
        if block.indent_required() {
            self.o();
        }
        if block.braces_required() {
            self.pc('}');
        }
        self
    }

    /// Prints a block as a statement.
    pub(crate) fn state_block(&mut self, id: BlockId) {
        self.generate_block(id);
        if self.model.block(id).braces_required() {
            self.nl();
        }
    }

    fn block_body(&mut self, id: BlockId) {
        let model = self.model;
        for content in model.block(id).content() {
            match content {
                Content::Decl(var) => self.declare_var(*var),
                Content::Stmt(statement) => self.statement(statement),
            }
        }
    }

    /// `annotations mods type name [= init]`
    pub(crate) fn bind_var(&mut self, id: VarId) -> &mut Self {
        let model = self.model;
        let var = model.var(id);
        for annotation in var.annotations() {
            self.annotation_use(*annotation).nl();
        }
        self.mods(var.mods()).generate_type(var.ty()).id(var.name());
        if let Some(init) = var.init() {
            self.pc('=').expr(init);
        }
        self
    }

    pub(crate) fn declare_var(&mut self, id: VarId) {
        self.bind_var(id).pc(';').nl();
    }

    /// `kw test` when the test already carries parentheses, `kw (test)`
    /// otherwise.
    fn keyword_test(&mut self, keyword: &str, test: &Expr) -> &mut Self {
        if test.has_top_op() {
            self.p(&format!("{keyword} ")).expr(test)
        } else {
            self.p(&format!("{keyword} (")).expr(test).pc(')')
        }
    }

    /// Prints a statement, newline included.
    pub(crate) fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Expr(expr) => {
                self.expr(expr).pc(';').nl();
            }
            Statement::If(id) => self.conditional(*id),
            Statement::Switch(id) => self.switch(*id),
            Statement::Try(id) => self.try_block(*id),
            Statement::For(id) => self.for_loop(*id),
            Statement::ForEach {
                var,
                collection,
                body,
            } => {
                let model = self.model;
                let var = model.var(*var);
                self.p("for (")
                    .generate_type(var.ty())
                    .id(var.name())
                    .p(": ")
                    .expr(collection)
                    .pc(')')
                    .generate_block(*body)
                    .nl();
            }
            Statement::While { test, body } => {
                self.keyword_test("while", test);
                self.state_block(*body);
            }
            Statement::Do { test, body } => {
                self.p("do")
                    .generate_block(*body)
                    .keyword_test("while", test)
                    .pc(';')
                    .nl();
            }
            Statement::Return(Some(value)) => {
                self.p("return ").expr(value).pc(';').nl();
            }
            Statement::Return(None) => {
                self.p("return").pc(';').nl();
            }
            Statement::Throw(exception) => {
                self.p("throw ").expr(exception).pc(';').nl();
            }
            Statement::Break(label) => self.jump("break", label.as_deref()),
            Statement::Continue(label) => self.jump("continue", label.as_deref()),
            Statement::Label(name) => {
                self.p(name).pc(':').nl();
            }
            Statement::Direct(source) => {
                self.p(source).nl();
            }
            Statement::Block(id) => self.state_block(*id),
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&str>) {
        self.p(keyword);
        if let Some(label) = label {
            self.p(label);
        }
        self.pc(';').nl();
    }

    /// A constant `true` test prints the then-branch inline and a constant
    /// `false` test prints the else-branch, if any.
    fn conditional(&mut self, id: IfId) {
        let model = self.model;
        let cond = model.conditional(id);
        let test = cond.test();
        if test.is_true() {
            self.block_body(cond.then());
            return;
        }
        if test.is_false() {
            if let Some(otherwise) = cond.else_block() {
                self.block_body(otherwise);
            }
            return;
        }

        self.keyword_test("if", test).generate_block(cond.then());
        if let Some(otherwise) = cond.else_block() {
            self.p("else").generate_block(otherwise);
        }
        self.nl();
    }

    fn switch(&mut self, id: SwitchId) {
        let model = self.model;
        let switch = model.switch(id);
        self.keyword_test("switch", switch.test()).p(" {").nl();
        for case in switch.cases() {
            self.case(case);
        }
        if let Some(default) = switch.default_case() {
            self.case(default);
        }
        self.pc('}').nl();
    }

    fn case(&mut self, case: &Case) {
        self.i();
        match case.label() {
            Some(label) => self.p("case ").expr(label).pc(':').nl(),
            None => self.p("default:").nl(),
        };
        self.state_block(case.body());
        self.o();
    }

    fn try_block(&mut self, id: TryId) {
        let model = self.model;
        let try_block = model.try_block(id);
        self.p("try").generate_block(try_block.body());
        for catch in try_block.catches() {
            self.p("catch (");
            match catch.var() {
                Some(var) => {
                    self.bind_var(var);
                }
                None => {
                    self.generate_type(catch.exception()).id(DEFAULT_CATCH_PARAM);
                }
            }
            self.pc(')').generate_block(catch.body());
        }
        if let Some(finally) = try_block.finally() {
            self.p("finally").generate_block(finally);
        }
        self.nl();
    }

    fn for_loop(&mut self, id: ForId) {
        let model = self.model;
        let for_loop = model.for_loop(id);
        self.p("for (");
        self.comma_list(for_loop.inits(), |f, init| match init {
            ForInit::Var(var) => {
                f.bind_var(*var);
            }
            ForInit::Expr(expr) => {
                f.expr(expr);
            }
        });
        self.pc(';');
        if let Some(test) = for_loop.test() {
            self.expr(test);
        }
        self.pc(';')
            .exprs(for_loop.updates())
            .pc(')')
            .generate_block(for_loop.body())
            .nl();
    }
}

#[cfg(test)]
mod tests {
    use crate::config::FormatterConfig;
    use crate::formatter::{Formatter, Fragment};
    use codemodel_core::{BlockId, Mods, TypeId};
    use codemodel_model::expr::{FALSE, TRUE};
    use codemodel_model::{CodeModel, Expr, Invocation};

    fn render(cm: &CodeModel, block: BlockId) -> String {
        Formatter::new(cm, &FormatterConfig::default()).render_fragment(Fragment::Block(block))
    }

    #[test]
    fn test_constant_conditions_fold() {
        let mut cm = CodeModel::new();
        let b = cm.detached_block();
        let mut block = cm.block_mut(b);
        let then = block.if_(TRUE).then();
        cm.block_mut(then).invoke(Invocation::call("foo"));
        assert_eq!(render(&cm, b), "{\n    foo();\n}\n");

        let b = cm.detached_block();
        let mut block = cm.block_mut(b);
        let then = block.if_(FALSE).then();
        cm.block_mut(then).invoke(Invocation::call("never"));
        assert_eq!(render(&cm, b), "{\n}\n");
    }

    #[test]
    fn test_if_else() {
        let mut cm = CodeModel::new();
        let b = cm.detached_block();
        let mut block = cm.block_mut(b);
        let mut cond = block.if_(Expr::field("ready"));
        let then = cond.then();
        let otherwise = cond.else_();
        cm.block_mut(then).invoke(Invocation::call("start"));
        cm.block_mut(otherwise).invoke(Invocation::call("wait"));

        assert_eq!(
            render(&cm, b),
            "{\n    if (ready) {\n        start();\n    } else {\n        wait();\n    }\n}\n"
        );
    }

    #[test]
    fn test_try_catch_finally() {
        let mut cm = CodeModel::new();
        let io = cm.ref_name("java.io.IOException");
        let b = cm.detached_block();
        let mut block = cm.block_mut(b);
        let mut try_ = block.try_();
        let body = try_.body();
        try_.catch(io);
        let finally = try_.finally();
        cm.block_mut(body).invoke(Invocation::call("read"));
        cm.block_mut(finally).invoke(Invocation::call("close"));

        assert_eq!(
            render(&cm, b),
            "{\n    try {\n        read();\n    } catch (java.io.IOException _x) {\n    } finally {\n        close();\n    }\n}\n"
        );
    }

    #[test]
    fn test_named_catch_parameter() {
        let mut cm = CodeModel::new();
        let io = cm.ref_name("java.io.IOException");
        let b = cm.detached_block();
        let catch = cm.block_mut(b).try_().catch(io);
        let e = cm.catch_param(catch, "e").expect("param");
        let body = cm.catch_body(catch);
        cm.block_mut(body).throw_(e);

        let text = render(&cm, b);
        assert!(text.contains("} catch (java.io.IOException e) {\n        throw e;\n    }\n"));
    }

    #[test]
    fn test_switch_cases() {
        let mut cm = CodeModel::new();
        let b = cm.detached_block();
        let mut block = cm.block_mut(b);
        let mut switch = block.switch_(Expr::field("kind"));
        let a = switch.case("a");
        let default = switch.default_case();
        cm.block_mut(a).invoke(Invocation::call("go")).break_();
        cm.block_mut(default).invoke(Invocation::call("stop"));

        assert_eq!(
            render(&cm, b),
            "{\n    switch (kind) {\n        case \"a\":\n            go();\n            break;\n        default:\n            stop();\n    }\n}\n"
        );
    }

    #[test]
    fn test_loops() {
        let mut cm = CodeModel::new();
        let string = cm.ref_name("java.lang.String");
        let b = cm.detached_block();

        let mut block = cm.block_mut(b);
        let mut for_loop = block.for_();
        let i = for_loop
            .init(Mods::NONE, TypeId::INT, "i", 0)
            .expect("init");
        for_loop.test(Expr::from(i).lt(10)).update(Expr::from(i).incr());
        let body = for_loop.body();
        cm.block_mut(body).invoke(Invocation::call("step").arg(i));

        let mut block = cm.block_mut(b);
        let (s, each) = block
            .for_each(string, "s", Expr::field("items"))
            .expect("for each");
        cm.block_mut(each).invoke(Invocation::call("print").arg(s));

        let mut block = cm.block_mut(b);
        let spin = block.while_(Expr::field("busy"));
        cm.block_mut(spin).continue_label("outer");
        let mut block = cm.block_mut(b);
        let once = block.do_(Expr::field("again"));
        cm.block_mut(once).return_();

        let text = render(&cm, b);
        assert!(text.contains("    for (int i = 0; (i< 10); i ++) {\n        step(i);\n    }\n"));
        assert!(text.contains("    for (java.lang.String s: items) {\n        print(s);\n    }\n"));
        assert!(text.contains("    while (busy) {\n        continue outer;\n    }\n"));
        assert!(text.contains("    do {\n        return;\n    } while (again);\n"));
    }

    #[test]
    fn test_declarations_and_jumps() {
        let mut cm = CodeModel::new();
        let b = cm.detached_block();
        let mut block = cm.block_mut(b);
        let x = block
            .decl_init(Mods::FINAL, TypeId::INT, "x", 1)
            .expect("x");
        block.assign_plus(x, 2);
        block.label("top").expect("label");
        block.direct_statement("assert x > 0;");
        block.return_value(x);

        assert_eq!(
            render(&cm, b),
            "{\n    final int x = 1;\n    x += 2;\n    top:\n    assert x > 0;\n    return x;\n}\n"
        );
    }

    #[test]
    fn test_unbraced_nested_block() {
        let mut cm = CodeModel::new();
        let b = cm.detached_block();
        let inner = cm.block_mut(b).block();
        cm.block_mut(inner).invoke(Invocation::call("run"));
        assert_eq!(render(&cm, b), "{\n    run();\n}\n");
    }
}
