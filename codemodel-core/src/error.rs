//! Error types for code model operations.

use crate::ids::{ClassId, VarId};
use thiserror::Error;

/// Error type for building and querying a code model.
#[derive(Debug, Error)]
pub enum Error {
    /// A member with the same name already exists in its container.
    #[error("{kind} '{name}' is already defined")]
    DuplicateDeclaration {
        /// Kind of declaration (field, enum constant, ...).
        kind: String,
        /// Name of the duplicate.
        name: String,
        /// The field that was declared first, for field collisions.
        existing: Option<VarId>,
    },

    /// A class with the same name already exists in its package or outer class.
    #[error("class '{name}' already exists")]
    ClassAlreadyExists {
        /// Name that collided.
        name: String,
        /// The class that was declared first.
        existing: ClassId,
    },

    /// A name is not a legal identifier.
    #[error("'{name}' is not a valid identifier")]
    InvalidIdentifier {
        /// Rejected name.
        name: String,
    },

    /// A superclass assignment is not allowed.
    #[error("illegal inheritance: {message}")]
    IllegalInheritance {
        /// Error message.
        message: String,
    },

    /// A textual type name could not be parsed.
    #[error("malformed type name '{input}': {message}")]
    MalformedTypeName {
        /// The text being parsed.
        input: String,
        /// Error message.
        message: String,
    },

    /// A block cursor was moved outside the block.
    #[error("position {position} is out of range for a block of {len} entries")]
    InvalidPosition {
        /// Requested position.
        position: usize,
        /// Number of entries in the block.
        len: usize,
    },

    /// A method received a second var-arg parameter.
    #[error("method '{method}' already has a var-arg parameter")]
    DuplicateVarArgs {
        /// Method name.
        method: String,
    },

    /// Not one of the primitive type names.
    #[error("'{name}' is not a primitive type name")]
    InvalidTypeName {
        /// Rejected name.
        name: String,
    },

    /// A modifier set is not legal for a declaration kind.
    #[error("illegal modifiers for {kind}: {mods}")]
    InvalidModifiers {
        /// Rendered modifier set.
        mods: String,
        /// Declaration kind.
        kind: String,
    },

    /// An external type is not known to the type catalog.
    #[error("unresolved type '{name}'")]
    UnresolvedType {
        /// Fully qualified name.
        name: String,
    },

    /// The operation is not valid for the target.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Error message.
        message: String,
    },
}

impl Error {
    /// Creates a duplicate declaration error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDeclaration {
            kind: kind.into(),
            name: name.into(),
            existing: None,
        }
    }

    /// Creates a duplicate field error carrying the field declared first.
    pub fn duplicate_field(name: impl Into<String>, existing: VarId) -> Self {
        Self::DuplicateDeclaration {
            kind: "field".to_string(),
            name: name.into(),
            existing: Some(existing),
        }
    }

    /// Creates an invalid identifier error.
    pub fn invalid_identifier(name: impl Into<String>) -> Self {
        Self::InvalidIdentifier { name: name.into() }
    }

    /// Creates an illegal inheritance error.
    pub fn inheritance(message: impl Into<String>) -> Self {
        Self::IllegalInheritance {
            message: message.into(),
        }
    }

    /// Creates a malformed type name error.
    pub fn malformed(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedTypeName {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Returns the previously declared field of a duplicate field error.
    #[must_use]
    pub fn existing_var(&self) -> Option<VarId> {
        match self {
            Self::DuplicateDeclaration { existing, .. } => *existing,
            _ => None,
        }
    }

    /// Returns the previously declared class of a [`Error::ClassAlreadyExists`].
    #[must_use]
    pub fn existing_class(&self) -> Option<ClassId> {
        match self {
            Self::ClassAlreadyExists { existing, .. } => Some(*existing),
            _ => None,
        }
    }
}

/// Result type alias for code model operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::duplicate("field", "x");
        assert_eq!(err.to_string(), "field 'x' is already defined");

        let err = Error::InvalidPosition {
            position: 4,
            len: 2,
        };
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_existing_class() {
        let err = Error::ClassAlreadyExists {
            name: "Foo".to_string(),
            existing: ClassId::new(7),
        };
        assert_eq!(err.existing_class(), Some(ClassId::new(7)));
        assert_eq!(Error::invalid_identifier("1x").existing_class(), None);
    }

    #[test]
    fn test_existing_var() {
        let err = Error::duplicate_field("x", VarId::new(3));
        assert_eq!(err.existing_var(), Some(VarId::new(3)));
        assert_eq!(err.to_string(), "field 'x' is already defined");
        assert_eq!(Error::duplicate("resource", "a.txt").existing_var(), None);
    }
}
