//! Documentation comments.

use codemodel_core::TypeId;
use indexmap::IndexMap;

/// One fragment of comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentPart {
    /// Plain text; may span several lines.
    Text(String),
    /// A type, rendered as a `{@link}` and taking part in import resolution.
    Type(TypeId),
}

/// A run of comment fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentText {
    parts: Vec<CommentPart>,
}

impl CommentText {
    /// Appends text.
    pub fn append(&mut self, text: impl Into<String>) -> &mut Self {
        self.parts.push(CommentPart::Text(text.into()));
        self
    }

    /// Appends a type reference.
    pub fn append_type(&mut self, ty: TypeId) -> &mut Self {
        self.parts.push(CommentPart::Type(ty));
        self
    }

    /// Fragments in order.
    #[must_use]
    pub fn parts(&self) -> &[CommentPart] {
        &self.parts
    }

    /// True if nothing was appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// A javadoc comment with its block tags.
///
/// Tags render after the main text in a fixed order: `@param`, `@return`,
/// `@throws`, `@deprecated`, then custom xdoclet tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    body: CommentText,
    params: IndexMap<String, CommentText>,
    returns: Option<CommentText>,
    throws: IndexMap<TypeId, CommentText>,
    deprecated: Option<CommentText>,
    xdoclets: IndexMap<String, IndexMap<String, String>>,
}

impl DocComment {
    /// Appends text to the main body.
    pub fn append(&mut self, text: impl Into<String>) -> &mut Self {
        self.body.append(text);
        self
    }

    /// Appends a type reference to the main body.
    pub fn append_type(&mut self, ty: TypeId) -> &mut Self {
        self.body.append_type(ty);
        self
    }

    /// Text of the `@param` tag for `name`, created on first use.
    pub fn add_param(&mut self, name: impl Into<String>) -> &mut CommentText {
        self.params.entry(name.into()).or_default()
    }

    /// Text of the `@return` tag, created on first use.
    pub fn add_return(&mut self) -> &mut CommentText {
        self.returns.get_or_insert_with(CommentText::default)
    }

    /// Text of the `@throws` tag for `ty`, created on first use.
    pub fn add_throws(&mut self, ty: TypeId) -> &mut CommentText {
        self.throws.entry(ty).or_default()
    }

    /// Text of the `@deprecated` tag, created on first use.
    pub fn add_deprecated(&mut self) -> &mut CommentText {
        self.deprecated.get_or_insert_with(CommentText::default)
    }

    /// Attributes of a custom tag, created on first use.
    pub fn add_xdoclet(&mut self, name: impl Into<String>) -> &mut IndexMap<String, String> {
        self.xdoclets.entry(name.into()).or_default()
    }

    /// Main body.
    #[must_use]
    pub fn body(&self) -> &CommentText {
        &self.body
    }

    /// `@param` tags in insertion order.
    #[must_use]
    pub fn params(&self) -> &IndexMap<String, CommentText> {
        &self.params
    }

    /// `@return` tag.
    #[must_use]
    pub fn returns(&self) -> Option<&CommentText> {
        self.returns.as_ref()
    }

    /// `@throws` tags in insertion order.
    #[must_use]
    pub fn throws(&self) -> &IndexMap<TypeId, CommentText> {
        &self.throws
    }

    /// `@deprecated` tag.
    #[must_use]
    pub fn deprecated(&self) -> Option<&CommentText> {
        self.deprecated.as_ref()
    }

    /// Custom tags in insertion order.
    #[must_use]
    pub fn xdoclets(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.xdoclets
    }

    /// Types referenced anywhere in the comment.
    pub fn referenced_types(&self) -> impl Iterator<Item = TypeId> + '_ {
        let texts = std::iter::once(&self.body)
            .chain(self.params.values())
            .chain(self.returns.iter())
            .chain(self.throws.values())
            .chain(self.deprecated.iter());
        texts
            .flat_map(|text| text.parts.iter())
            .filter_map(|part| match part {
                CommentPart::Type(ty) => Some(*ty),
                CommentPart::Text(_) => None,
            })
            .chain(self.throws.keys().copied())
    }
}
