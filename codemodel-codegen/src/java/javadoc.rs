//! Javadoc comments.

use crate::formatter::Formatter;
use codemodel_core::TypeId;
use codemodel_model::{CommentPart, CommentText, DocComment};

const TAG_INDENT: &str = " *     ";

/// Breaks up `*/` so that comment text cannot close the comment.
#[must_use]
pub fn escape_comment(text: &str) -> String {
    text.replace("*/", "*<!---->/")
}

impl Formatter<'_> {
    /// Prints a `/** .. */` block: the body, then `@param`, `@return`,
    /// `@throws`, `@deprecated` and custom tags.
    pub(crate) fn doc_comment(&mut self, doc: &DocComment) -> &mut Self {
        self.p("/**").nl();
        self.comment_text(doc.body(), " * ");
        self.p(" * ").nl();

        for (name, text) in doc.params() {
            let tag = format!(" * @param {name}");
            self.p(&tag).nl();
            self.comment_text(text, TAG_INDENT);
        }
        if let Some(text) = doc.returns() {
            self.p(" * @return").nl();
            self.comment_text(text, TAG_INDENT);
        }
        for (ty, text) in doc.throws() {
            self.p(" * @throws ").type_ref(*ty).nl();
            self.comment_text(text, TAG_INDENT);
        }
        if let Some(text) = doc.deprecated() {
            self.p(" * @deprecated").nl();
            self.comment_text(text, TAG_INDENT);
        }
        for (name, attributes) in doc.xdoclets() {
            let mut tag = format!(" * @{name}");
            for (key, value) in attributes {
                tag.push_str(&format!(" {key} = \"{value}\""));
            }
            self.p(&tag).nl();
        }
        self.p(" */").nl()
    }

    /// Prints comment text with `indent` at the start of every line. While
    /// collecting, only the referenced types are visited.
    fn comment_text(&mut self, text: &CommentText, indent: &str) {
        if !self.is_printing() {
            for part in text.parts() {
                if let CommentPart::Type(ty) = part {
                    self.type_ref(*ty);
                }
            }
            return;
        }
        if text.is_empty() {
            return;
        }

        self.p(indent);
        for part in text.parts() {
            match part {
                CommentPart::Text(s) => {
                    let mut lines = s.split('\n');
                    if let Some(first) = lines.next() {
                        self.p(&escape_comment(first));
                    }
                    for line in lines {
                        self.nl().p(indent).p(&escape_comment(line));
                    }
                }
                CommentPart::Type(ty) => self.link(*ty),
            }
        }
        self.nl();
    }

    /// `{@link T}`; type arguments are spelled out in `{@code}` brackets.
    fn link(&mut self, ty: TypeId) {
        let model = self.model;
        if model.is_parameterized(ty) {
            self.link(model.erasure(ty));
            self.p("{@code <}");
            for (index, arg) in model.type_args(ty).iter().enumerate() {
                if index > 0 {
                    self.pc(',');
                }
                self.link(*arg);
            }
            self.p("{@code >}");
        } else {
            self.p("{@link ").type_ref(ty).pc('}');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatterConfig;
    use codemodel_core::{ClassId, Mods};
    use codemodel_model::{ClassKind, CodeModel};

    fn render(cm: &CodeModel, class: ClassId) -> String {
        Formatter::new(cm, &FormatterConfig::default())
            .render_class(class)
            .expect("render")
    }

    #[test]
    fn test_escape_comment() {
        assert_eq!(escape_comment("a */ b"), "a *<!---->/ b");
        assert_eq!(escape_comment("plain"), "plain");
    }

    #[test]
    fn test_method_tags() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Io", ClassKind::Class).expect("class");
        let io = cm.ref_name("java.io.IOException");
        let m = cm
            .class_mut(class)
            .method(Mods::PUBLIC, TypeId::INT, "read")
            .expect("read");
        let mut method = cm.method_mut(m);
        let doc = method.javadoc();
        doc.append("Reads a byte.\nBlocks when empty.");
        doc.add_param("timeout").append("in millis");
        doc.add_return().append("the byte");
        doc.add_throws(io).append("on failure");

        let text = render(&cm, class);
        assert!(text.contains("import java.io.IOException;\n"));
        assert!(text.contains(concat!(
            "    /**\n",
            "     * Reads a byte.\n",
            "     * Blocks when empty.\n",
            "     * \n",
            "     * @param timeout\n",
            "     *     in millis\n",
            "     * @return\n",
            "     *     the byte\n",
            "     * @throws IOException\n",
            "     *     on failure\n",
            "     */\n",
            "    public int read() {\n",
        )));
    }

    #[test]
    fn test_links_take_part_in_imports() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Doc", ClassKind::Class).expect("class");
        let list = cm.ref_name("java.util.List");
        cm.class_mut(class)
            .javadoc()
            .append("See ")
            .append_type(list)
            .append(" and mind the */ marker.");

        let text = render(&cm, class);
        assert!(text.contains("import java.util.List;\n"));
        assert!(text.contains(" * See {@link List } and mind the *<!---->/ marker.\n"));
    }

    #[test]
    fn test_xdoclet_and_deprecated() {
        let mut cm = CodeModel::new();
        let class = cm.new_class("com.acme.Old", ClassKind::Class).expect("class");
        let mut view = cm.class_mut(class);
        let doc = view.javadoc();
        doc.add_deprecated().append("use New");
        doc.add_xdoclet("hibernate.class")
            .insert("table".to_string(), "OLD".to_string());

        let text = render(&cm, class);
        assert!(text.contains(" * @deprecated\n *     use New\n * @hibernate.class table = \"OLD\"\n */\npublic class Old {\n"));
    }
}
