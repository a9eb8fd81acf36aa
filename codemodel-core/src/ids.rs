//! Arena handles.
//!
//! Every node of a code model lives in an arena owned by the registry and is
//! addressed by one of the `Copy` handles below. Handles are only meaningful
//! for the registry that produced them.

macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(u32);

        impl $name {
            /// Creates a handle from an arena index.
            #[must_use]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            /// Returns the arena index.
            #[must_use]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Creates a handle for the next slot of an arena of length `len`.
            #[must_use]
            pub fn next(len: usize) -> Self {
                Self(u32::try_from(len).unwrap_or(u32::MAX))
            }
        }
    };
}

arena_handle!(
    /// Handle to an interned type.
    TypeId
);
arena_handle!(
    /// Handle to a package.
    PackageId
);
arena_handle!(
    /// Handle to a class defined in the model.
    ClassId
);
arena_handle!(
    /// Handle to a method or constructor.
    MethodId
);
arena_handle!(
    /// Handle to a field, local variable or parameter.
    VarId
);
arena_handle!(
    /// Handle to a statement block.
    BlockId
);
arena_handle!(
    /// Handle to an annotation use.
    AnnotationId
);
arena_handle!(
    /// Handle to an `if` statement.
    IfId
);
arena_handle!(
    /// Handle to a `switch` statement.
    SwitchId
);
arena_handle!(
    /// Handle to a `try` statement.
    TryId
);
arena_handle!(
    /// Handle to a classic `for` loop.
    ForId
);

impl TypeId {
    /// `void`.
    pub const VOID: TypeId = TypeId(0);
    /// `boolean`.
    pub const BOOLEAN: TypeId = TypeId(1);
    /// `byte`.
    pub const BYTE: TypeId = TypeId(2);
    /// `short`.
    pub const SHORT: TypeId = TypeId(3);
    /// `char`.
    pub const CHAR: TypeId = TypeId(4);
    /// `int`.
    pub const INT: TypeId = TypeId(5);
    /// `float`.
    pub const FLOAT: TypeId = TypeId(6);
    /// `long`.
    pub const LONG: TypeId = TypeId(7);
    /// `double`.
    pub const DOUBLE: TypeId = TypeId(8);
    /// The type of the `null` literal.
    pub const NULL: TypeId = TypeId(9);
    /// `java.lang.Object`.
    pub const OBJECT: TypeId = TypeId(10);

    /// First index available to interned types.
    pub const FIRST_DYNAMIC: u32 = 11;

    /// Returns true for the nine primitive handles.
    #[inline]
    #[must_use]
    pub const fn is_primitive_handle(self) -> bool {
        self.0 <= Self::DOUBLE.0
    }
}

/// Handle to one catch clause of a `try` statement.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct CatchId {
    try_id: TryId,
    index: usize,
}

impl CatchId {
    /// Creates a handle to clause `index` of `try_id`.
    #[inline]
    #[must_use]
    pub const fn new(try_id: TryId, index: usize) -> Self {
        Self { try_id, index }
    }

    /// Owning `try` statement.
    #[inline]
    #[must_use]
    pub const fn try_id(self) -> TryId {
        self.try_id
    }

    /// Position of the clause.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_type_ids() {
        assert!(TypeId::VOID.is_primitive_handle());
        assert!(TypeId::DOUBLE.is_primitive_handle());
        assert!(!TypeId::NULL.is_primitive_handle());
        assert!(!TypeId::OBJECT.is_primitive_handle());
        assert_eq!(TypeId::FIRST_DYNAMIC as usize, TypeId::OBJECT.index() + 1);
    }

    #[test]
    fn test_catch_id_parts() {
        let id = CatchId::new(TryId::new(4), 2);
        assert_eq!(id.try_id(), TryId::new(4));
        assert_eq!(id.index(), 2);
        assert_ne!(id, CatchId::new(TryId::new(4), 1));
    }

    #[test]
    fn test_next_handle() {
        let id = ClassId::next(3);
        assert_eq!(id.index(), 3);
        assert_eq!(id, ClassId::new(3));
    }
}
